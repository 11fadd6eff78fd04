//! vq-manager - manage Cortex Analyst verified queries through the Snowflake SQL API.
//!
//! This library exposes the core modules for use in integration tests.

pub mod api;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod logging;
