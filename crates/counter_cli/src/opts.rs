use std::path::PathBuf;

use clap::Parser;
use clap_verbosity_flag::{InfoLevel, Verbosity};
use cli::args::{OperationArg, OutputFormatArg};
use counter_app::Event;

#[derive(Parser, Debug)]
#[command(name = "counter_cli")]
#[command(bin_name = "counter_cli")]
#[command(version, about, long_about = None)]
pub(crate) struct Opts {
    /// Operations to apply to the counter, in order
    #[arg(value_enum, value_name = "OPERATION")]
    pub(crate) operations: Vec<OperationArg>,

    /// Write this value to the counter before applying any operation, negative values are allowed
    #[arg(long, value_name = "VALUE", env = "COUNTER_INITIAL", allow_hyphen_values = true)]
    pub(crate) initial: Option<i64>,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormatArg::Text)]
    pub(crate) output: OutputFormatArg,

    /// Trace log file, `--trace=FILE` or just `--trace` for `trace.log`
    #[arg(long, num_args = 0..=1, require_equals = true, default_missing_value = "trace.log")]
    pub(crate) trace: Option<PathBuf>,

    #[command(flatten)]
    pub(crate) verbose: Verbosity<InfoLevel>,
}

impl Opts {
    /// The events to send to the core, in order.
    pub(crate) fn events(&self) -> Vec<Event> {
        self.initial
            .map(|value| Event::Set {
                value,
            })
            .into_iter()
            .chain(
                self.operations
                    .iter()
                    .copied()
                    .map(Event::from),
            )
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Opts::command().debug_assert();
    }

    #[test]
    fn initial_value_is_written_first() {
        let opts = Opts::parse_from(["counter_cli", "increment", "--initial", "-4", "double"]);

        assert_eq!(opts.events(), vec![
            Event::Set {
                value: -4
            },
            Event::Increment,
            Event::Double,
        ]);
    }

    #[test]
    fn no_operations() {
        let opts = Opts::parse_from(["counter_cli"]);

        assert_eq!(opts.output, OutputFormatArg::Text);
        assert!(opts.trace.is_none());
        // `--initial` may come from the environment
        assert_eq!(opts.events().len(), usize::from(opts.initial.is_some()));
    }

    #[test]
    fn bare_trace_does_not_consume_an_operation() {
        let opts = Opts::parse_from(["counter_cli", "--trace", "increment"]);

        assert_eq!(opts.trace, Some(PathBuf::from("trace.log")));
        assert_eq!(opts.operations, vec![OperationArg::Increment]);
    }

    #[test]
    fn trace_file_requires_equals() {
        let opts = Opts::parse_from(["counter_cli", "--trace=custom.log", "double"]);

        assert_eq!(opts.trace, Some(PathBuf::from("custom.log")));
        assert_eq!(opts.operations, vec![OperationArg::Double]);
    }

    #[test]
    fn unknown_operation_is_rejected() {
        let result = Opts::try_parse_from(["counter_cli", "triple"]);

        assert!(result.is_err());
    }
}
