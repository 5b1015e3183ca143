pub mod agents;
pub mod config;
pub mod error;
pub mod llm;
pub mod models;
pub mod prompt;
pub mod tools;
pub mod utils;

pub use error::{Error, Result};
