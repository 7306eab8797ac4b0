use atty::Stream;
use clap::Parser;
use color_eyre::{eyre::eyre, Result};
use regm_core::{CommandContext, GlobalOptions};

mod cli;
mod dispatch;
mod output;
mod style;

use cli::RegmCli;
use dispatch::dispatch_command;
use output::{emit_output, OutputOptions, StyledProbeReporter};
use style::Style;

fn main() -> Result<()> {
    color_eyre::install()?;

    let cli = RegmCli::parse();
    init_tracing(cli.trace, cli.verbose);

    let global = GlobalOptions {
        quiet: cli.quiet,
        json: cli.json,
    };
    let ctx = CommandContext::new(&global).map_err(|err| eyre!("{err:?}"))?;

    let style = Style::new(cli.no_color, atty::is(Stream::Stdout));
    let reporter = StyledProbeReporter::new(style);

    let (info, outcome) = dispatch_command(&ctx, &cli.command, &reporter)?;
    let opts = OutputOptions {
        quiet: cli.quiet,
        json: cli.json,
    };
    let code = emit_output(&opts, &style, info, &outcome)?;

    if code == 0 {
        Ok(())
    } else {
        std::process::exit(code);
    }
}

fn init_tracing(trace: bool, verbose: u8) {
    let level = if trace {
        "trace"
    } else {
        match verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };

    let filter = format!("regm_core={level},regm_cli={level}");
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_level(true)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
