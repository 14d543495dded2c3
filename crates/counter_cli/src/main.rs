use clap::Parser;

use crate::opts::Opts;
use crate::shell::Shell;

mod opts;
mod output;
mod shell;

fn main() -> anyhow::Result<()> {
    let args = argfile::expand_args(argfile::parse_fromfile, argfile::PREFIX)?;

    let opts = Opts::parse_from(args);

    cli::tracing::configure_tracing(opts.trace.clone(), opts.verbose.clone())?;

    let shell = Shell::new();

    for event in opts.events() {
        shell.dispatch(event)?;
    }

    print!("{}", output::render_view(&shell.view(), opts.output)?);

    Ok(())
}
