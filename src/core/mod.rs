//! Core domain logic for resub
//!
//! This module contains the rewrite logic with no direct I/O.
//! All external interactions are abstracted through port traits.
//!
//! ## Architecture
//!
//! - `models/` - Domain types (Rule, RuleSet, LevelMap, Level)
//! - `services/` - Rewrite engine and the level rewrite
//! - `ports/` - Trait definitions for file access and version control
//! - `error` - Configuration and per-file error types

pub mod error;
pub mod models;
pub mod ports;
pub mod services;
