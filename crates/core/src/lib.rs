//! Amazonas Core - Shared domain types.
//!
//! This crate provides the types shared by every Amazonas component:
//! - `db` - MongoDB provisioning (validators, indexes) and sample data seeding
//! - `cli` - Command-line entry point for provisioning and seeding
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no database driver, no
//! runtime. Documents stored in MongoDB are built from these types by the
//! `amazonas-db` crate.
//!
//! # Modules
//!
//! - [`types`] - Business identifiers, emails, prices, ratings, closed status
//!   enumerations, collection kinds and schema generations

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
