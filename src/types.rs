/// A document is a BSON object; collections are named groups of documents.
pub type Document = bson::Document;

/// Canonical structural serialization of a read query, used as the cache key.
pub type CacheKey = String;
