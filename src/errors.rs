use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Connectivity error: {0}")]
    Connectivity(String),

    #[error("Cache fault: {0}")]
    CacheFault(String),

    #[error("Statistics error: {0}")]
    Statistics(String),

    #[error("Query error: {0}")]
    Query(String),

    #[error("Serde JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("BSON encode: {0}")]
    BsonEncode(#[from] bson::ser::Error),

    #[error("BSON decode: {0}")]
    BsonDecode(#[from] bson::de::Error),
}
