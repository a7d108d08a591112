use clap::ValueEnum;
use renumber_core::Strategy;

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

impl From<OutputFormat> for renumber_core::OutputFormat {
    fn from(arg: OutputFormat) -> Self {
        match arg {
            OutputFormat::Summary => Self::Summary,
            OutputFormat::Json => Self::Json,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum StrategyArg {
    /// Rename file by file and stop at the first failure
    BestEffort,
    /// Compute every new name before renaming anything
    PlanThenCommit,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::BestEffort => Self::BestEffort,
            StrategyArg::PlanThenCommit => Self::PlanThenCommit,
        }
    }
}
