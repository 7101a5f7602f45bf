#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CookieError {
    /// Keyed lookup of an attribute the entry type does not know about.
    #[error("'{kind}' object has no attribute '{attribute}'")]
    AttributeNotFound {
        attribute: String,
        kind: &'static str,
    },

    #[error("invalid cookie name: {0:?}")]
    InvalidName(String),

    #[error("invalid value for cookie attribute {attribute}: {value:?}")]
    InvalidAttribute {
        attribute: &'static str,
        value: String,
    },
}
