pub mod ballot;
pub mod actions;
pub mod server;
pub mod config;
pub mod commands;
