use thiserror::Error;

#[derive(Debug, Error)]
pub enum KindredError {
    #[error("No identity is logged in")]
    Unauthenticated,

    #[error("Target identity not found: {id}")]
    TargetNotFound { id: String },

    #[error("Lookup '{lookup}' failed: {source}")]
    LookupFailure {
        lookup: &'static str,
        #[source]
        source: Box<KindredError>,
    },

    #[error("{field} cannot be blank")]
    BlankField { field: String },

    #[error("{field} is not valid: {reason}")]
    InvalidField { field: String, reason: String },

    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    #[error("{entity_type} already exists: {identifier}")]
    AlreadyExists {
        entity_type: String,
        identifier: String,
    },

    #[error("Cannot connect with yourself")]
    CannotConnectSelf,

    #[error("Relationship between these identities is blocked")]
    RelationshipBlocked,

    #[error("Relationship cannot move from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Only {expected} may do this")]
    NotPermitted { expected: String },

    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid UUID: {0}")]
    InvalidId(#[from] uuid::Error),

    #[error("{0}")]
    Other(String),
}

impl KindredError {
    /// Wraps an error raised by one of the profile read interfaces.
    pub fn lookup(lookup: &'static str, source: KindredError) -> Self {
        KindredError::LookupFailure {
            lookup,
            source: Box::new(source),
        }
    }

    pub fn not_found(entity_type: &str, id: impl ToString) -> Self {
        KindredError::NotFound {
            entity_type: entity_type.to_string(),
            id: id.to_string(),
        }
    }
}

pub type KindredResult<T> = Result<T, KindredError>;
