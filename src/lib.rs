pub mod cli;
pub mod config;
pub mod error;
pub mod github;
pub mod models;
pub mod orchestrator;
pub mod pagination;
pub mod query;
pub mod render;
pub mod store;
pub mod theme;
pub mod types;
