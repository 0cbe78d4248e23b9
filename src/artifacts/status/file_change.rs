use colored::Colorize;

/// A change to a tracked or staged file that is not staged itself
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WorkspaceChangeType {
    Modified,
    Deleted,
}

impl WorkspaceChangeType {
    pub fn label(&self) -> &'static str {
        match self {
            WorkspaceChangeType::Modified => "modified",
            WorkspaceChangeType::Deleted => "deleted",
        }
    }

    pub fn colored_label(&self) -> String {
        let label = format!("({})", self.label());
        match self {
            WorkspaceChangeType::Modified => label.yellow().to_string(),
            WorkspaceChangeType::Deleted => label.red().to_string(),
        }
    }
}

impl std::fmt::Display for WorkspaceChangeType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}
