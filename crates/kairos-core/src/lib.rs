//! Shared configuration, constants and error types for the Kairos workspace.

pub mod config;
pub mod constants;
pub mod error;
