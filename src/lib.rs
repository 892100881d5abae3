pub mod changelog;
pub mod config;
pub mod error;
pub mod git;
pub mod input;
pub mod logger;
pub mod release;
pub mod version;

pub use error::CliError;
