//! Runtime configuration and process lifecycle.

pub mod options;
pub mod shutdown;
