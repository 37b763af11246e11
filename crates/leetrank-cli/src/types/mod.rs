//! Error types shared by the fetcher and the commands.

pub mod error;

pub use error::*;
