pub mod database_reporter;

pub use database_reporter::{DatabaseReporter, WorkflowReport};
