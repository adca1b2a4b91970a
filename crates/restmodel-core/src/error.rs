//! Error types shared across the RestModel crates.

use serde_json::Value;

/// Convenience alias for results carrying [`Error`].
pub type Result<T> = std::result::Result<T, Error>;

/// All failures surfaced by the mapping engine and the endpoint layer.
///
/// There is no local recovery policy anywhere in the stack: every failure
/// either fails the returned future or, for validity checks, comes back as a
/// plain `false` instead of an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// A verb returned status >= 400. Carries the raw, unmapped response body.
    Http {
        /// The HTTP status code.
        status: u16,
        /// The raw error payload, exactly as the backend produced it.
        body: Value,
    },
    /// The underlying transport call failed outright (connect, I/O, decode).
    Transport(String),
    /// A relation or container referenced a model name the registry does not know.
    UnknownModel(String),
    /// A delete was requested for an instance that has no identifier value.
    MissingReference {
        /// The model whose instance was missing its identifier.
        model: String,
        /// The reference field name that was looked up.
        reference: String,
    },
    /// Page navigation was requested on a result without a pagination descriptor.
    MissingPagination,
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Http { status, body } => {
                write!(f, "http error {status}: {body}")
            }
            Error::Transport(msg) => write!(f, "transport error: {msg}"),
            Error::UnknownModel(name) => write!(f, "unknown model: {name}"),
            Error::MissingReference { model, reference } => {
                write!(f, "model {model} has no value for reference field {reference}")
            }
            Error::MissingPagination => {
                write!(f, "result carries no pagination descriptor")
            }
        }
    }
}

impl std::error::Error for Error {}

impl Error {
    /// The HTTP status code, if this is an HTTP-level error.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The raw error payload, if this is an HTTP-level error.
    #[must_use]
    pub fn body(&self) -> Option<&Value> {
        match self {
            Error::Http { body, .. } => Some(body),
            _ => None,
        }
    }
}
