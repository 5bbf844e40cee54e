//! `yougile`: command-line client for the YouGile project-management API.

pub mod cli;
pub mod client;
pub mod commands;
pub mod config;
pub mod context;
pub mod error;
pub mod logging;
pub mod login;
pub mod output;
