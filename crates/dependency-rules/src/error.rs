use thiserror::Error;

/// Errors raised while decoding dependency rules from their wire form.
#[derive(Debug, Error)]
pub enum RuleError {
    #[error("dependency rule for '{field}' declares no predicate")]
    MissingPredicate { field: String },
    #[error("dependency rule for '{field}' declares more than one predicate: {keys:?}")]
    AmbiguousPredicate {
        field: String,
        keys: Vec<&'static str>,
    },
    #[error("dependency rule for '{field}' expects `{key}: true`")]
    InvalidFlag { field: String, key: &'static str },
    #[error("json parse error: {0}")]
    Json(#[from] serde_json::Error),
}
