//! intl-sync - keeps per-language translation resources in step with the
//! translations declared in source code.
//!
//! Source files declare translations with `defineTranslations(...)`. Each
//! build pass extracts those declarations, reconciles them against the JSON
//! resource files of every language, and writes the merged result back.
//! Passes over unchanged sources are skipped.
//!
//! ## Module Structure
//!
//! - `build`: One build pass (cache gate, extraction, export)
//! - `cli`: Command-line interface layer
//! - `config`: Configuration file loading and parsing
//! - `core`: Reconciliation engine, resource repository, change-detection cache
//! - `extract`: Tracked-file scanning and static declaration extraction
//! - `logging`: Tracing subscriber setup

pub mod build;
pub mod cli;
pub mod config;
pub mod core;
pub mod extract;
pub mod logging;
