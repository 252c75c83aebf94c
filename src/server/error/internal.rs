use thiserror::Error;

/// Internal issues with the codebase indicating unexpected behavior & possible bugs
#[derive(Error, Debug)]
pub enum InternalError {
    /// A JSON column holds data that no longer matches its expected shape.
    ///
    /// Results in a 500 Internal Server Error with a generic message returned
    /// to client.
    #[error("Failed to decode {column} of {table} {id}: {source}")]
    CorruptJsonColumn {
        table: &'static str,
        column: &'static str,
        id: i32,
        #[source]
        source: serde_json::Error,
    },

    /// Signing a JWT failed.
    #[error("Failed to encode token: {0}")]
    TokenEncoding(#[source] jsonwebtoken::errors::Error),

    /// A row that was just written could not be read back.
    #[error("{entity} {id} missing after write")]
    MissingAfterWrite { entity: &'static str, id: i32 },
}
