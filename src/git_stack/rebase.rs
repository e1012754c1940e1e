use colored::*;

use super::GitStack;
use crate::error::Result;
use crate::stack::StackBranch;

/// Scoped stash of local working-tree changes.
///
/// Acquisition runs `git stash push` unconditionally; the guard pops the
/// stash when dropped, on every exit path. The pop only happens if the push
/// actually created a stash entry, so a clean working tree never triggers a
/// spurious pop and a created entry is popped exactly once.
struct StashGuard<'a> {
    git_stack: &'a GitStack,
    created: bool,
}

impl<'a> StashGuard<'a> {
    fn acquire(git_stack: &'a GitStack) -> Result<Self> {
        let before = git_stack.stash_tip();
        git_stack.run_git("stash", &["stash", "push"])?;
        let created = git_stack.stash_tip() != before;

        Ok(StashGuard { git_stack, created })
    }
}

impl Drop for StashGuard<'_> {
    fn drop(&mut self) {
        if !self.created {
            return;
        }

        if let Err(err) = self.git_stack.run_git("stash", &["stash", "pop"]) {
            eprintln!(
                "{} failed to restore stashed local changes: {}",
                "warning:".yellow().bold(),
                err
            );
            eprintln!(
                "Your changes are still in the stash. Run {} to restore them.",
                "git stash pop".bold()
            );
        }
    }
}

impl GitStack {
    /// Rebases the stack, branch by branch, onto the freshly fetched tip of
    /// `parent` on `remote`.
    ///
    /// Branch 1 is rebased directly onto `<remote>/<parent>`. Every later
    /// branch is rebased `--onto` its predecessor's just-produced tip, using
    /// the predecessor's pre-rebase tip recorded during stack resolution as
    /// the detach point, so each step replays only that branch's own commit.
    ///
    /// Steps run strictly in order: a conflict left unresolved by the
    /// operator stops the run and later branches are not touched.
    pub fn rebase(&self, stack: &[StackBranch], remote: &str, parent: &str) -> Result<()> {
        let orig_branch = self.current_branch_name()?;

        let _stash = StashGuard::acquire(self)?;

        self.run_git("fetch", &["fetch", remote, parent])?;

        let parent_ref = format!("{}/{}", remote, parent);
        let total = stack.len();

        for (index, branch) in stack.iter().enumerate() {
            let onto = if index == 0 {
                &parent_ref
            } else {
                &stack[index - 1].name
            };

            println!();
            println!(
                "📌 [{}/{}] Rebasing {} onto {}...",
                index + 1,
                total,
                branch.name.bold(),
                onto.bold()
            );

            if index == 0 {
                self.run_git("rebase", &["rebase", &parent_ref, &branch.name])?;
            } else {
                let previous = &stack[index - 1];
                self.run_git(
                    "rebase",
                    &[
                        "rebase",
                        "--onto",
                        &previous.name,
                        &previous.tip,
                        &branch.name,
                    ],
                )?;
            }
        }

        let current_branch = self.current_branch_name()?;
        if current_branch != orig_branch {
            println!();
            println!("Switching back to branch: {}", orig_branch.bold());
            self.checkout_branch(&orig_branch)?;
        }

        Ok(())
    }
}
