pub mod executor;
pub mod reporter;
pub mod types;

pub use executor::{LifecycleRunner, run_suite};
pub use reporter::{ConsoleReporter, ReportSink};
pub use types::{Outcome, Statistics, StatisticsAggregator, SuiteReport, TestRecord};
