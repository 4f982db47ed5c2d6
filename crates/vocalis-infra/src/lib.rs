//! Infrastructure layer for Vocalis.
//!
//! Implements the ports defined in `vocalis-core` against the real world:
//! the local filesystem adapter used to persist speech assets, and the
//! `vocalis.toml` configuration loader.

pub mod config;
pub mod filesystem;
