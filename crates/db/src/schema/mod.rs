//! Declarative collection definitions: validators and indexes.

pub mod indexes;
pub mod validators;

use amazonas_core::{CollectionKind, SchemaGeneration};
use bson::{Document, doc};

pub use indexes::{IndexKey, IndexSpec, indexes};
pub use validators::validator;

/// Everything the provisioner applies to one collection.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionSchema {
    pub kind: CollectionKind,
    /// `$jsonSchema` body (without the `$jsonSchema` wrapper).
    pub validator: Document,
    pub indexes: &'static [IndexSpec],
}

impl CollectionSchema {
    /// Definition of `kind` in `generation`.
    #[must_use]
    pub fn new(kind: CollectionKind, generation: SchemaGeneration) -> Self {
        Self {
            kind,
            validator: validator(kind, generation),
            indexes: indexes(kind),
        }
    }

    /// All six collections in dependency order.
    #[must_use]
    pub fn all(generation: SchemaGeneration) -> Vec<Self> {
        CollectionKind::ALL
            .into_iter()
            .map(|kind| Self::new(kind, generation))
            .collect()
    }

    /// Human-readable description used by `amazonas schema`.
    #[must_use]
    pub fn describe(&self) -> Document {
        let indexes: Vec<Document> = self
            .indexes
            .iter()
            .map(|index| {
                doc! {
                    "name": index.name,
                    "key": index.key_document(),
                    "unique": index.unique,
                }
            })
            .collect();
        doc! {
            "collection": self.kind.name(),
            "validator": { "$jsonSchema": self.validator.clone() },
            "validationLevel": crate::provision::VALIDATION_LEVEL,
            "indexes": indexes,
        }
    }
}
