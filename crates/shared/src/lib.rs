//! Shared types, errors, and configuration for Stowage.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for users and stored images
//! - Application-wide error types
//! - Server configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::{AppConfig, ServerConfig};
pub use error::AppError;
