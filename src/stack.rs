use crate::error::{Result, StackError};

/// A parsed stack branch name.
///
/// The branches of a stack are named `<base>-<N>` where `N` is the branch's
/// 1-indexed position. Parsing the last branch name of the stack therefore
/// yields both the base name and the stack's depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackName {
    pub base: String,
    pub depth: usize,
}

impl StackName {
    /// Parses a target branch name into `(base, depth)`.
    ///
    /// The depth is the base-10 integer after the last `-`. The separator
    /// must exist at index >= 1 and the suffix must be a positive integer.
    pub fn parse(name: &str) -> Result<Self> {
        let invalid = |reason: &str| StackError::InvalidStackName {
            name: name.to_string(),
            reason: reason.to_string(),
        };

        let separator = match name.rfind('-') {
            Some(0) | None => return Err(invalid("missing or leading `-` separator")),
            Some(index) => index,
        };

        let base = &name[..separator];
        let suffix = &name[separator + 1..];

        let depth: usize = suffix
            .parse()
            .map_err(|_| invalid("suffix is not a base-10 integer"))?;

        if depth == 0 {
            return Err(invalid("stack position must be greater than zero"));
        }

        Ok(StackName {
            base: base.to_string(),
            depth,
        })
    }

    /// Name of the branch at 1-indexed stack position `position`.
    pub fn branch_at(&self, position: usize) -> String {
        format!("{}-{}", self.base, position)
    }
}

/// A resolved branch of the stack, carrying its tip commit id at resolution
/// time. The rebase engine relies on `tip` being the pre-rebase tip when it
/// detaches the next branch's single commit from its old base.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackBranch {
    pub name: String,
    pub tip: String,
}

/// Read-only repository access needed to resolve a stack.
///
/// `GitStack` implements this over git2; tests substitute an in-memory fake.
pub trait RepoView {
    /// Tip commit id of the local branch `branch_name`, or `BranchNotFound`.
    fn branch_tip(&self, branch_name: &str) -> Result<String>;

    /// The `limit` most recent commit ids reachable from the branch tip,
    /// most recent first.
    fn recent_commits(&self, branch_name: &str, limit: usize) -> Result<Vec<String>>;
}

/// Resolves and validates the ordered chain `<base>-1 ..= <base>-<depth>`.
///
/// Resolution is strictly sequential: position `i` is validated against the
/// just-resolved tip of position `i - 1`. Each branch must hold exactly one
/// commit on top of its predecessor's current tip; any other shape means the
/// stack was rewritten out of band and resolution refuses with `StackDrift`.
pub fn resolve_stack(view: &impl RepoView, target_branch: &str) -> Result<Vec<StackBranch>> {
    let stack_name = StackName::parse(target_branch)?;

    let mut stack: Vec<StackBranch> = Vec::with_capacity(stack_name.depth);

    for position in 1..=stack_name.depth {
        let branch_name = stack_name.branch_at(position);
        view.branch_tip(&branch_name)?;

        let tip = if position == 1 {
            let commits = view.recent_commits(&branch_name, 1)?;
            match commits.first() {
                Some(tip) => tip.clone(),
                None => return Err(short_history(&branch_name)),
            }
        } else {
            let commits = view.recent_commits(&branch_name, 2)?;
            let (tip, parent) = match (commits.first(), commits.get(1)) {
                (Some(tip), Some(parent)) => (tip.clone(), parent.clone()),
                _ => return Err(short_history(&branch_name)),
            };

            let previous = &stack[position - 2];
            if parent != previous.tip {
                return Err(StackError::StackDrift {
                    branch: branch_name,
                    prev_branch: previous.name.clone(),
                    expected: previous.tip.clone(),
                    found: parent,
                });
            }

            tip
        };

        stack.push(StackBranch {
            name: branch_name,
            tip,
        });
    }

    Ok(stack)
}

fn short_history(branch_name: &str) -> StackError {
    StackError::HistoryRead {
        branch: branch_name.to_string(),
        source: git2::Error::from_str("commit history is shorter than the stack requires"),
    }
}
