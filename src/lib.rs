pub mod config;
pub mod error;
pub mod launcher;
pub mod logger;
pub mod runner;
pub mod samples;
pub mod suite;

// Re-export commonly used types
pub use error::{Result, RutestError};
pub use launcher::{Launcher, SuiteRegistry};
pub use runner::{Outcome, Statistics};
pub use suite::{Role, RoleMarkers, Suite, SuiteDefinition};
