pub mod archive;
pub mod cli;
pub mod config;
pub mod download;
pub mod error;
pub mod install;
pub mod utils;
pub mod verification;

pub use config::Config;
pub use error::NlpFetchError;
