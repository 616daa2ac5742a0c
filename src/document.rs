use crate::errors::Error;
use crate::types::Document;
use bson::{Bson, doc};
use serde::Serialize;
use serde::de::DeserializeOwned;

// Cache payloads are BSON bytes wrapping the full result collection in a
// single envelope document (BSON has no top-level array). BSON keeps the
// numeric widths and other value types of the stored documents intact, so a
// hit rebuilds exactly what the source of truth returned.

const ENVELOPE_FIELD: &str = "r";

/// Serializes a result collection into the cache payload representation.
pub fn encode_payload(docs: &[Document]) -> Result<Vec<u8>, Error> {
    let envelope = doc! { ENVELOPE_FIELD: docs.to_vec() };
    Ok(bson::to_vec(&envelope)?)
}

/// Rebuilds a result collection from a cache payload.
pub fn decode_payload(bytes: &[u8]) -> Result<Vec<Document>, Error> {
    let envelope: Document = bson::from_slice(bytes)?;
    let Some(Bson::Array(items)) = envelope.get(ENVELOPE_FIELD) else {
        return Err(Error::CacheFault("malformed cache payload envelope".into()));
    };
    items
        .iter()
        .map(|item| match item {
            Bson::Document(d) => Ok(d.clone()),
            _ => Err(Error::CacheFault("malformed cache payload element".into())),
        })
        .collect()
}

/// Rehydrates one generic document into a caller-defined domain type.
pub fn rehydrate<T: DeserializeOwned>(doc: &Document) -> Result<T, Error> {
    Ok(serde_json::from_value(serde_json::to_value(doc)?)?)
}

/// Lowers a domain value into a generic document, e.g. before an insert.
pub fn dehydrate<T: Serialize>(value: &T) -> Result<Document, Error> {
    Ok(serde_json::from_value(serde_json::to_value(value)?)?)
}
