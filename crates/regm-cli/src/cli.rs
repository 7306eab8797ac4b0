use clap::{ArgAction, Args, Parser, Subcommand};

pub const REGM_HELP_TEMPLATE: &str =
    "{before-help}\nUsage:\n    {usage}\n\nCommands:\n{subcommands}\n\nGlobal options:\n{options}\n";

pub const REGM_BEFORE_HELP: &str = concat!(
    "regm ",
    env!("CARGO_PKG_VERSION"),
    ": npm registry manager\n\n",
    "Aliases live one file per alias under REGM_HOME (default ~/.regm); the active\n",
    "registry is the `registry=` line of REGM_NPMRC (default ~/.npmrc).\n",
);

#[derive(Parser, Debug)]
#[command(
    name = "regm",
    author,
    version,
    propagate_version = false,
    disable_help_subcommand = true,
    before_help = REGM_BEFORE_HELP,
    help_template = REGM_HELP_TEMPLATE
)]
pub struct RegmCli {
    #[arg(
        short,
        long,
        help = "Suppress human output (the exit status still reports failures)",
        global = true
    )]
    pub quiet: bool,
    #[arg(
        short,
        long,
        action = ArgAction::Count,
        help = "Increase logging (-vv reaches trace)",
        global = true
    )]
    pub verbose: u8,
    #[arg(long, help = "Force trace logging regardless of -v/-q", global = true)]
    pub trace: bool,
    #[arg(
        long,
        help = "Emit {status,message,details} JSON envelopes",
        global = true
    )]
    pub json: bool,
    #[arg(long, help = "Disable colored human output", global = true)]
    pub no_color: bool,
    #[command(subcommand)]
    pub command: CommandGroupCli,
}

#[derive(Subcommand, Debug)]
pub enum CommandGroupCli {
    #[command(
        about = "List every registry alias, marking the one in use.",
        visible_alias = "list"
    )]
    Ls,
    #[command(about = "Show the registry the package manager currently uses.")]
    Current,
    #[command(
        about = "Point the package manager at an alias.",
        override_usage = "regm use <ALIAS>"
    )]
    Use(UseArgs),
    #[command(
        about = "Add a user alias; HOME defaults to the uri.",
        override_usage = "regm add <ALIAS> <URI> [HOME]"
    )]
    Add(AddArgs),
    #[command(
        about = "Delete a user alias (presets cannot be deleted).",
        visible_alias = "rm",
        override_usage = "regm del <ALIAS>"
    )]
    Del(DelArgs),
    #[command(
        about = "Probe one alias, or every alias, and report latency.",
        visible_alias = "ping",
        override_usage = "regm test [ALIAS]"
    )]
    Test(TestArgs),
}

// Positionals are collected as lists so a missing one reaches the command
// layer and is reported there instead of by clap.

#[derive(Args, Debug)]
pub struct UseArgs {
    #[arg(value_name = "ALIAS", num_args = 0..=1)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct AddArgs {
    #[arg(value_name = "ALIAS URI [HOME]", num_args = 0..=3)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct DelArgs {
    #[arg(value_name = "ALIAS", num_args = 0..=1)]
    pub args: Vec<String>,
}

#[derive(Args, Debug)]
pub struct TestArgs {
    #[arg(value_name = "ALIAS", num_args = 0..=1)]
    pub args: Vec<String>,
}
