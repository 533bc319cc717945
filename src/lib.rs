// Library entry point
pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod logging;
pub mod pipeline;
pub mod sink;
pub mod source;
