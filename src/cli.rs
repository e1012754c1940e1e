use std::ffi::OsString;

use clap::{App, AppSettings, Arg, ArgMatches, SubCommand};

use crate::executable_name;

pub fn parse_arg_matches<'a, I, T>(arguments: I) -> ArgMatches<'a>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let rebase_subcommand = SubCommand::with_name("rebase")
        .about("Rebase a stack of commit branches onto an updated parent branch.")
        .arg(
            Arg::with_name("parent")
                .short("p")
                .long("parent")
                .value_name("branch_name")
                .help("Parent branch to rebase the stack onto.")
                .default_value("main")
                .takes_value(true),
        )
        .arg(
            Arg::with_name("push")
                .long("push")
                .help("Force-push the rebased stack atomically to its remote.")
                .takes_value(false),
        )
        .arg(
            Arg::with_name("target_branch")
                .help("Last branch of the stack, named <base>-<N>. Defaults to the current branch.")
                .required(false)
                .index(1),
        );

    let arg_matches = App::new("git-stack")
        .bin_name(executable_name())
        .version(env!("CARGO_PKG_VERSION"))
        .about("Tool for rebasing a stack of single-commit git branches.")
        .setting(AppSettings::SubcommandRequiredElseHelp)
        .subcommand(rebase_subcommand)
        .get_matches_from(arguments);

    arg_matches
}
