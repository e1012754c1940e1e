use clap::ArgMatches;
use colored::*;

use crate::error::Result;
use crate::stack::{resolve_stack, StackBranch};
use crate::GitStack;

pub fn run(arg_matches: ArgMatches) -> Result<()> {
    match arg_matches.subcommand() {
        ("rebase", Some(sub_matches)) => {
            // Rebase a stack of commit branches onto an updated parent.

            let git_stack = GitStack::init()?;

            let parent = sub_matches.value_of("parent").unwrap();
            let push_after_rebase = sub_matches.is_present("push");

            let target_branch = match sub_matches.value_of("target_branch") {
                Some(target_branch) => target_branch.to_string(),
                None => git_stack.current_branch_name()?,
            };

            let stack = resolve_stack(&git_stack, &target_branch)?;
            let remote = git_stack.remote_for_branch(parent)?;

            display_stack(&stack, parent);

            git_stack.rebase(&stack, &remote, parent)?;

            if push_after_rebase {
                git_stack.push(&stack, &remote)?;
            }

            println!();
            println!("🎉 Successfully rebased stack {}", target_branch.bold());

            Ok(())
        }
        _ => unreachable!("clap rejects missing or unknown subcommands"),
    }
}

fn display_stack(stack: &[StackBranch], parent: &str) {
    println!("Resolved stack of {} branches:", stack.len());

    for branch in stack.iter().rev() {
        println!(
            "{:>6}{} ⦁ {}",
            "",
            branch.name.bold(),
            short_id(&branch.tip)
        );
    }

    println!("{:>6}{} (parent branch)", "", parent);
}

fn short_id(commit_id: &str) -> &str {
    &commit_id[..7.min(commit_id.len())]
}
