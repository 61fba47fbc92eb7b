pub mod cli;
pub mod config;
pub mod enricher;
pub mod error;
pub mod export;
pub mod import;
pub mod logging;
pub mod pipeline;
pub mod registry;
pub mod session;
