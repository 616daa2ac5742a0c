use bson::Bson;
use serde::{Deserialize, Serialize};

// Safety limits to prevent resource abuse
pub(crate) const MAX_PATH_DEPTH: usize = 32;
pub(crate) const MAX_IN_SET: usize = 1000;
pub(crate) const MAX_SORT_FIELDS: usize = 8;
pub(crate) const MAX_LIMIT: usize = 10_000;

/// Operation kinds understood by the query layer. Serialized names follow the
/// conventional driver spellings so keys and logs read naturally.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum QueryKind {
    Count,
    CountDocuments,
    Find,
    FindOne,
    Distinct,
    InsertOne,
    InsertMany,
    DeleteMany,
}

impl QueryKind {
    /// Write and administrative kinds mutate the source of truth; they are
    /// never eligible for cache interception.
    #[must_use]
    pub fn is_write(self) -> bool {
        matches!(self, Self::InsertOne | Self::InsertMany | Self::DeleteMany)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Order {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SortSpec {
    pub field: String,
    pub order: Order,
}

/// Options carried by read queries.
///
/// Semantics:
/// - When `projection` is `Some(fields)`, returned documents contain only those fields.
/// - Sorting is applied before projection.
/// - Results are sliced by `skip`/`limit` with an internal maximum of `MAX_LIMIT`.
/// - `distinct` names the dotted path a `Distinct` query collects values from.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindOptions {
    pub projection: Option<Vec<String>>,
    pub sort: Option<Vec<SortSpec>>,
    pub limit: Option<usize>,
    pub skip: Option<usize>,
    #[serde(default)]
    pub distinct: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    Eq,
    Gt,
    Gte,
    Lt,
    Lte,
}

/// Structural filter predicate over dotted document paths.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Filter {
    True,
    And(Vec<Filter>),
    Or(Vec<Filter>),
    Not(Box<Filter>),
    Exists { path: String, exists: bool },
    In { path: String, values: Vec<Bson> },
    Cmp { path: String, op: CmpOp, value: Bson },
}

impl Filter {
    /// Equality shorthand, by far the most common predicate in workloads.
    #[must_use]
    pub fn eq(path: impl Into<String>, value: impl Into<Bson>) -> Self {
        Self::Cmp { path: path.into(), op: CmpOp::Eq, value: value.into() }
    }
}
