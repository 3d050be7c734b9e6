use core::fmt;

/// Errors reported by the map and its underlying table.
///
/// Only [`Error::NotFound`] is expected during normal use. The other two
/// variants mean the table cannot be trusted any more: the infallible map
/// methods panic when they see them, while [`HashMap::set`] and
/// [`HashMap::delete`] hand them back so callers can tell a broken invariant
/// apart from a missing key.
///
/// [`HashMap::set`]: crate::HashMap::set
/// [`HashMap::delete`]: crate::HashMap::delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The requested key is not present.
    NotFound,
    /// An index, offset, or capacity was outside the range the table accepts.
    InvalidArgument(&'static str),
    /// The slot table and the entry arrays disagree.
    InternalConsistency(&'static str),
}

impl Error {
    /// Returns `true` for [`Error::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, Error::NotFound)
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "key not found"),
            Error::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            Error::InternalConsistency(msg) => write!(f, "broken table invariant: {}", msg),
        }
    }
}

impl core::error::Error for Error {}
