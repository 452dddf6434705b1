pub mod classifier;
pub mod definition;
pub mod types;

// Re-export commonly used types
pub use classifier::{RoleClassifier, RoleSet};
pub use definition::Suite;
pub use types::{
    IntoMethodResult, InvokeError, MethodDescriptor, MethodResult, Role, RoleMarkers,
    SuiteDefinition, SuiteInstance, TestFailure,
};
