//! Core types for Amazonas.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod collection;
pub mod email;
pub mod id;
pub mod price;
pub mod rating;
pub mod status;

pub use collection::{CollectionKind, SchemaGeneration};
pub use email::{Email, EmailError};
pub use id::*;
pub use price::{CurrencyCode, Price};
pub use rating::{Rating, RatingError};
pub use status::*;
