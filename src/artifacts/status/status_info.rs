use crate::areas::index::Index;
use crate::areas::repository::Repository;
use crate::artifacts::branch::branch_name::BranchName;
use crate::artifacts::status::file_change::WorkspaceChangeType;
use crate::artifacts::status::inspector::Inspector;
use derive_new::new;
use std::collections::{BTreeMap, BTreeSet};

pub type ChangeSet = BTreeMap<String, WorkspaceChangeType>;
pub type FileSet = BTreeSet<String>;

/// Snapshot of the repository state shown by `status`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusInfo {
    pub(crate) branches: Vec<BranchName>,
    pub(crate) current_branch: BranchName,
    pub(crate) staged_files: FileSet,
    pub(crate) removed_files: FileSet,
    pub(crate) workspace_changeset: ChangeSet,
    pub(crate) untracked_files: FileSet,
}

#[derive(new)]
pub struct Status<'r> {
    repository: &'r Repository,
}

impl<'r> Status<'r> {
    pub fn initialize(&self, index: &Index) -> anyhow::Result<StatusInfo> {
        let (_, head_commit) = self.repository.head_commit()?;
        let head_tree = head_commit.tree();
        let workspace = self.repository.workspace();
        let inspector = Inspector::new(workspace, head_tree, index);

        let working_files = workspace.list_files()?;

        // every path that could carry an unstaged change
        let candidates = head_tree
            .keys()
            .chain(index.additions().keys())
            .collect::<BTreeSet<_>>();
        let mut workspace_changeset = ChangeSet::new();
        for path in candidates {
            if let Some(change) = inspector.check_workspace_change(path)? {
                workspace_changeset.insert(path.clone(), change);
            }
        }

        let untracked_files = working_files
            .into_iter()
            .filter(|path| inspector.is_untracked(path))
            .collect::<FileSet>();

        Ok(StatusInfo {
            branches: self.repository.refs().list_branches()?,
            current_branch: self.repository.refs().current_branch()?,
            staged_files: index.additions().keys().cloned().collect(),
            removed_files: index.removals().keys().cloned().collect(),
            workspace_changeset,
            untracked_files,
        })
    }
}

impl StatusInfo {
    fn write_section(
        f: &mut std::fmt::Formatter<'_>,
        title: &str,
        lines: impl Iterator<Item = String>,
    ) -> std::fmt::Result {
        writeln!(f, "=== {} ===", title)?;
        for line in lines {
            writeln!(f, "{}", line)?;
        }
        writeln!(f)
    }
}

impl std::fmt::Display for StatusInfo {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        Self::write_section(
            f,
            "Branches",
            self.branches.iter().map(|branch| {
                if branch == &self.current_branch {
                    format!("*{}", branch)
                } else {
                    branch.to_string()
                }
            }),
        )?;
        Self::write_section(f, "Staged Files", self.staged_files.iter().cloned())?;
        Self::write_section(f, "Removed Files", self.removed_files.iter().cloned())?;
        Self::write_section(
            f,
            "Modifications Not Staged For Commit",
            self.workspace_changeset
                .iter()
                .map(|(path, change)| format!("{} {}", path, change)),
        )?;
        Self::write_section(f, "Untracked Files", self.untracked_files.iter().cloned())
    }
}
