pub mod app;
pub mod client;
pub mod consent;
pub mod core;
pub mod host;
pub mod loader;
pub mod queue;
