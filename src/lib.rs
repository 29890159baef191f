//! Synthetic marketplace core: prompt-driven listing generation with a local
//! simulation fallback, and an in-memory newest-first catalog.

pub mod catalog;
pub mod cli;
pub mod config;
pub mod credential;
pub mod errors;
pub mod generate;
pub mod logging;
pub mod prompt;
pub mod provider;
pub mod session;
pub mod summarize;
pub mod ux;
pub mod wire;
