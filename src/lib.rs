// Library surface for headless/integration tests and reuse.
// Terminal setup and CLI parsing stay in main.rs.
pub mod app;
pub mod app_dirs;
pub mod config;
pub mod highlight;
pub mod logging;
pub mod passage;
pub mod runtime;
pub mod scoring;
pub mod session;
pub mod ui;
