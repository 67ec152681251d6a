//! Types shared between the hexcoord library and its CLI.

pub mod errors;
