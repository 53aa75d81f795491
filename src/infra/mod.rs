pub mod api;
pub mod config;
pub mod diagnostics;
pub mod loader;
pub mod parser;
