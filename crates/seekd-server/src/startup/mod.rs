//! Process startup concerns

pub mod logging;

pub use logging::{LoggingGuard, init_logging};
