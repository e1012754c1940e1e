/// Error kinds surfaced by stack resolution and rebase orchestration.
///
/// Every variant renders a human-readable description; nested causes are
/// reachable through `source()` and printed as a chain by `main`.
#[derive(Debug, thiserror::Error)]
pub enum StackError {
    #[error("branch `{name}` is not a valid stack branch name: {reason}")]
    InvalidStackName { name: String, reason: String },

    #[error("branch `{branch}` of the stack does not exist")]
    BranchNotFound {
        branch: String,
        #[source]
        source: git2::Error,
    },

    #[error("unable to read the commit history of branch `{branch}`")]
    HistoryRead {
        branch: String,
        #[source]
        source: git2::Error,
    },

    #[error(
        "stack has drifted at branch `{branch}`: expected its parent commit to be `{expected}` \
         (the tip of `{prev_branch}`), found `{found}`"
    )]
    StackDrift {
        branch: String,
        prev_branch: String,
        expected: String,
        found: String,
    },

    #[error("unable to infer target branch: HEAD is not attached to a branch")]
    DetachedHead,

    #[error("{step} failed: `{command}` exited with status {code}")]
    Subprocess {
        step: String,
        command: String,
        code: i32,
    },

    #[error("unable to access the current working directory")]
    WorkingDirectory(#[source] std::io::Error),

    #[error("unable to open git repository")]
    RepositoryOpen(#[source] git2::Error),

    #[error(transparent)]
    Git(#[from] git2::Error),
}

pub type Result<T> = std::result::Result<T, StackError>;
