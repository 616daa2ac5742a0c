//! Query descriptions and in-memory evaluation.
//!
//! A [`Query`] is the narrow contract both collaborators speak: an operation
//! kind, a structural filter, and an option set. The interceptor derives
//! cache keys from exactly those three parts.

pub mod eval;
pub mod types;

pub use eval::{compare_bson, compare_docs, eval_filter, get_path, project_fields};
pub use types::{CmpOp, Filter, FindOptions, Order, QueryKind, SortSpec};

use crate::types::Document;
use serde::{Deserialize, Serialize};

/// A single logical query against one collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Query {
    pub kind: QueryKind,
    pub filter: Filter,
    #[serde(default)]
    pub options: FindOptions,
    /// Payload for write kinds; irrelevant to key derivation since writes
    /// always bypass the cache.
    #[serde(default)]
    pub documents: Vec<Document>,
}

impl Query {
    #[must_use]
    pub fn find(filter: Filter, options: FindOptions) -> Self {
        Self { kind: QueryKind::Find, filter, options, documents: Vec::new() }
    }

    #[must_use]
    pub fn find_one(filter: Filter) -> Self {
        Self {
            kind: QueryKind::FindOne,
            filter,
            options: FindOptions { limit: Some(1), ..FindOptions::default() },
            documents: Vec::new(),
        }
    }

    #[must_use]
    pub fn count(filter: Filter) -> Self {
        Self {
            kind: QueryKind::CountDocuments,
            filter,
            options: FindOptions::default(),
            documents: Vec::new(),
        }
    }

    #[must_use]
    pub fn distinct(path: impl Into<String>, filter: Filter) -> Self {
        Self {
            kind: QueryKind::Distinct,
            filter,
            options: FindOptions { distinct: Some(path.into()), ..FindOptions::default() },
            documents: Vec::new(),
        }
    }

    #[must_use]
    pub fn insert_one(document: Document) -> Self {
        Self {
            kind: QueryKind::InsertOne,
            filter: Filter::True,
            options: FindOptions::default(),
            documents: vec![document],
        }
    }

    #[must_use]
    pub fn insert_many(documents: Vec<Document>) -> Self {
        Self {
            kind: QueryKind::InsertMany,
            filter: Filter::True,
            options: FindOptions::default(),
            documents,
        }
    }

    #[must_use]
    pub fn delete_many(filter: Filter) -> Self {
        Self {
            kind: QueryKind::DeleteMany,
            filter,
            options: FindOptions::default(),
            documents: Vec::new(),
        }
    }
}
