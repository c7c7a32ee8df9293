//! Command line front end for the pennywise bill splitter.
//!
//! This crate is a caller of `pennywise-calculator` like any other
//! presentation layer: it turns typed text into amounts, runs the split and
//! renders the outcome.

pub mod cli;
pub mod config;
pub mod logging;
pub mod render;

pub use cli::{Cli, Command, OutputFormat};
pub use config::{ConfigSource, LoadedConfig, PennywiseConfig};
