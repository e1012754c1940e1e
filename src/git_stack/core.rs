use std::env;
use std::process::{self, Command};

use colored::*;
use git2::{BranchType, ErrorClass, ErrorCode, Repository};

use super::GitStack;
use crate::error::{Result, StackError};
use crate::executable_name;
use crate::stack::RepoView;

impl GitStack {
    pub fn init() -> Result<Self> {
        let name_of_current_executable = executable_name();

        let cwd = env::current_dir().map_err(StackError::WorkingDirectory)?;

        let repo = match Repository::discover(&cwd) {
            Ok(repo) => repo,
            Err(ref e)
                if e.class() == ErrorClass::Repository && e.code() == ErrorCode::NotFound =>
            {
                eprintln!(
                    "{} Not a git repository (or any of the parent directories)",
                    "error:".red().bold()
                );
                eprintln!(
                    "\n{} This command must be run inside a git repository.",
                    "hint:".yellow().bold()
                );
                process::exit(1);
            }
            Err(e) => return Err(StackError::RepositoryOpen(e)),
        };

        if repo.is_bare() {
            eprintln!(
                "Cannot run {} on bare git repository.",
                name_of_current_executable
            );
            process::exit(1);
        }

        Ok(GitStack { repo })
    }

    /// Name of the currently checked-out branch, or `DetachedHead` if HEAD
    /// is not attached to a named branch.
    pub fn current_branch_name(&self) -> Result<String> {
        if self.repo.head_detached()? {
            return Err(StackError::DetachedHead);
        }

        let head = self.repo.head()?;
        match head.shorthand() {
            Some(branch_name) if branch_name != "HEAD" => Ok(branch_name.to_string()),
            _ => Err(StackError::DetachedHead),
        }
    }

    /// The remote configured for `branch_name` (`branch.<name>.remote`),
    /// falling back to `origin`.
    pub fn remote_for_branch(&self, branch_name: &str) -> Result<String> {
        let config = self.repo.config()?;

        match config.get_string(&format!("branch.{}.remote", branch_name)) {
            Ok(remote) => Ok(remote),
            Err(ref e) if e.code() == ErrorCode::NotFound => Ok(String::from("origin")),
            Err(e) => Err(e.into()),
        }
    }

    pub fn checkout_branch(&self, branch_name: &str) -> Result<()> {
        let (object, reference) = self.repo.revparse_ext(branch_name)?;

        // set working directory
        self.repo.checkout_tree(&object, None)?;

        // set HEAD to branch_name
        match reference.as_ref().and_then(|r| r.name()) {
            // ref_name is an actual reference like branches or tags
            Some(ref_name) => self.repo.set_head(ref_name)?,
            // this is a commit, not a reference
            None => self.repo.set_head_detached(object.id())?,
        }

        Ok(())
    }

    /// Commit id at the top of the stash reflog, if any entry exists.
    pub fn stash_tip(&self) -> Option<String> {
        self.repo
            .refname_to_id("refs/stash")
            .ok()
            .map(|oid| oid.to_string())
    }

    /// Runs a git subcommand attached to the controlling terminal, echoing
    /// the command line for operator visibility. The call blocks until the
    /// subprocess exits, including any interactive conflict resolution.
    pub fn run_git(&self, step: &str, args: &[&str]) -> Result<()> {
        let command = format!("git {}", args.join(" "));
        println!("{}", command);

        let status = Command::new("git")
            .args(args)
            .status()
            .unwrap_or_else(|_| panic!("Unable to run: {}", &command));

        if !status.success() {
            return Err(StackError::Subprocess {
                step: step.to_string(),
                command,
                code: status.code().unwrap_or(1),
            });
        }

        Ok(())
    }
}

impl RepoView for GitStack {
    fn branch_tip(&self, branch_name: &str) -> Result<String> {
        let branch = match self.repo.find_branch(branch_name, BranchType::Local) {
            Ok(branch) => branch,
            Err(e) if e.code() == ErrorCode::NotFound => {
                return Err(StackError::BranchNotFound {
                    branch: branch_name.to_string(),
                    source: e,
                });
            }
            Err(e) => return Err(e.into()),
        };

        match branch.get().target() {
            Some(oid) => Ok(oid.to_string()),
            None => Err(StackError::BranchNotFound {
                branch: branch_name.to_string(),
                source: git2::Error::from_str("branch reference does not point at a commit"),
            }),
        }
    }

    fn recent_commits(&self, branch_name: &str, limit: usize) -> Result<Vec<String>> {
        let history_read = |source: git2::Error| StackError::HistoryRead {
            branch: branch_name.to_string(),
            source,
        };

        let mut revwalk = self.repo.revwalk().map_err(history_read)?;
        revwalk
            .push_ref(&format!("refs/heads/{}", branch_name))
            .map_err(history_read)?;

        let mut commits = Vec::with_capacity(limit);
        for oid in revwalk.take(limit) {
            commits.push(oid.map_err(history_read)?.to_string());
        }

        Ok(commits)
    }
}
