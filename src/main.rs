use std::error::Error;
use std::ffi::OsString;
use std::process;

use colored::*;

mod cli;
mod commands;
mod error;
mod git_stack;
mod stack;

use cli::parse_arg_matches;
use commands::run;

// Re-export for use by other modules
pub use git_stack::GitStack;

pub fn executable_name() -> String {
    let name = std::env::current_exe()
        .expect("Cannot get the path of current executable.")
        .file_name()
        .expect("Cannot get the executable name.")
        .to_string_lossy()
        .into_owned();
    if let Some(git_cmd) = name.strip_prefix("git-") {
        if !git_cmd.is_empty() {
            return format!("git {}", git_cmd);
        }
    }
    name
}

fn run_app<I, T>(arguments: I)
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let arg_matches = parse_arg_matches(arguments);

    match run(arg_matches) {
        Ok(()) => {}
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);

            let mut cause = err.source();
            while let Some(source) = cause {
                eprintln!("{} {}", "caused by:".yellow().bold(), source);
                cause = source.source();
            }

            process::exit(1);
        }
    }
}

fn main() {
    run_app(std::env::args_os());
}
