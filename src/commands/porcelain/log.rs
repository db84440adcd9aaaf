use crate::areas::repository::Repository;
use crate::artifacts::log::LogEntry;
use crate::artifacts::log::rev_list::RevList;

impl Repository {
    /// First-parent history from HEAD, newest first
    pub async fn log(&mut self) -> anyhow::Result<()> {
        let head_oid = self.refs().read_head()?;

        for entry in RevList::new(self.database(), head_oid) {
            let (commit_oid, commit) = entry?;
            write!(self.writer(), "{}", LogEntry::new(&commit_oid, &commit))?;
        }

        Ok(())
    }

    /// Every commit in the object store, in digest order
    pub async fn global_log(&mut self) -> anyhow::Result<()> {
        for commit_oid in self.database().list_commits()? {
            let commit = self.database().load_commit(&commit_oid)?;
            write!(self.writer(), "{}", LogEntry::new(&commit_oid, &commit))?;
        }

        Ok(())
    }

    pub async fn find(&mut self, message: &str) -> anyhow::Result<()> {
        let mut found = false;

        for commit_oid in self.database().list_commits()? {
            let commit = self.database().load_commit(&commit_oid)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", commit_oid)?;
                found = true;
            }
        }

        if !found {
            writeln!(self.writer(), "Found no commit with that message.")?;
        }

        Ok(())
    }
}
