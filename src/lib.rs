pub mod analyzers;
pub mod config;
pub mod data;
pub mod error;
pub mod output;
pub mod prompt;
pub mod session;
