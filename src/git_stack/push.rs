use colored::*;

use super::GitStack;
use crate::error::Result;
use crate::stack::StackBranch;

impl GitStack {
    /// Publishes every branch of the stack in a single atomic push.
    ///
    /// `--force-with-lease` makes each ref update conditional on the remote
    /// ref still being where it was last observed locally; `--atomic` makes
    /// the update all-or-nothing across the stack.
    pub fn push(&self, stack: &[StackBranch], remote: &str) -> Result<()> {
        let mut args = vec!["push", "--atomic", "--force-with-lease", remote];
        args.extend(stack.iter().map(|branch| branch.name.as_str()));

        println!();
        self.run_git("push", &args)?;

        println!(
            "✅ Pushed {} branches.",
            format!("{}", stack.len()).bold()
        );

        Ok(())
    }
}
