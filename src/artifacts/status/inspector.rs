use crate::areas::index::Index;
use crate::areas::workspace::Workspace;
use crate::artifacts::objects::commit::FileTree;
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use derive_new::new;

/// Compares one path across the working tree, the staging area and HEAD
#[derive(new)]
pub struct Inspector<'r> {
    workspace: &'r Workspace,
    head_tree: &'r FileTree,
    index: &'r Index,
}

impl<'r> Inspector<'r> {
    fn working_oid(&self, path: &str) -> anyhow::Result<Option<ObjectId>> {
        if !self.workspace.exists(path) {
            return Ok(None);
        }

        Ok(Some(ObjectId::hash(&self.workspace.read_file(path)?)))
    }

    /// Unstaged change of a tracked or staged path, if any
    ///
    /// A staged path is compared against its staged blob; a tracked path
    /// without a pending change is compared against HEAD. Paths staged for
    /// removal have no unstaged change.
    pub fn check_workspace_change(&self, path: &str) -> anyhow::Result<Option<WorkspaceChangeType>> {
        if self.index.is_staged_for_removal(path) {
            return Ok(None);
        }

        let expected = match self.index.staged_addition(path) {
            Some(staged) => staged,
            None => match self.head_tree.get(path) {
                Some(tracked) => tracked,
                None => return Ok(None),
            },
        };

        match self.working_oid(path)? {
            None => Ok(Some(WorkspaceChangeType::Deleted)),
            Some(actual) if &actual != expected => Ok(Some(WorkspaceChangeType::Modified)),
            Some(_) => Ok(None),
        }
    }

    /// Present in the working tree but neither tracked nor staged for addition,
    /// or staged for removal yet present again
    pub fn is_untracked(&self, path: &str) -> bool {
        let unknown = !self.head_tree.contains_key(path) && self.index.staged_addition(path).is_none();

        unknown || self.index.is_staged_for_removal(path)
    }
}
