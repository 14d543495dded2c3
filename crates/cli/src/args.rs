use clap::ValueEnum;
use counter_app::Event;

/// Args decouple of CLI arg handling requirements from the internal data structures

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum OperationArg {
    Increment,
    /// No-op when the counter is 0
    Decrement,
    Double,
    Reset,
}

impl From<OperationArg> for Event {
    fn from(value: OperationArg) -> Self {
        match value {
            OperationArg::Increment => Self::Increment,
            OperationArg::Decrement => Self::Decrement,
            OperationArg::Double => Self::Double,
            OperationArg::Reset => Self::Reset,
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
#[value(rename_all = "lower")]
pub enum OutputFormatArg {
    #[default]
    Text,
    Json,
}
