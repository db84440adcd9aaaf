use crate::areas::repository::Repository;
use crate::artifacts::status::status_info::Status;

impl Repository {
    pub async fn status(&mut self) -> anyhow::Result<()> {
        let index = self.index();
        let mut index = index.lock().await;
        index.rehydrate()?;

        let status_info = Status::new(self).initialize(&index)?;
        write!(self.writer(), "{}", status_info)?;

        Ok(())
    }
}
