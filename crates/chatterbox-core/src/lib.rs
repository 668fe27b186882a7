//! Core types and configuration for the Chatter Box dev tools.
//!
//! This crate defines the `chatterbox.toml` schema ([`ChatterboxConfig`]),
//! the `KEY=VALUE` environment-file loader ([`Environment`]), container
//! image references ([`ImageRef`]), and shared error types.

pub mod config;
pub mod env;
pub mod error;
pub mod image;

pub use config::{
    ChatterboxConfig, DeployConfig, DevConfig, EmailDevConfig, ImageConfig, ServerDevConfig,
};
pub use env::{EnvEntry, EnvFile, EnvFileError, Environment, ParseError};
pub use error::{Error, Result};
pub use image::{BuiltImage, ImageRef, ImageRefError, unix_timestamp};
