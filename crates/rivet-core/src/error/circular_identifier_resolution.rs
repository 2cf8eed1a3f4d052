use super::Error;

/// Error when join column types depend on each other through identifier
/// columns and no independent base type ever enters the cycle.
///
/// The path lists every `Class.column` visited, ending with the one that
/// closed the loop.
#[derive(Debug)]
pub(super) struct CircularIdentifierResolution {
    path: Box<[String]>,
}

impl std::error::Error for CircularIdentifierResolution {}

impl core::fmt::Display for CircularIdentifierResolution {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(f, "circular identifier resolution: {}", self.path.join(" -> "))
    }
}

impl Error {
    /// Creates a circular identifier resolution error.
    pub fn circular_identifier_resolution(path: Vec<String>) -> Error {
        Error::from(super::ErrorKind::CircularIdentifierResolution(
            CircularIdentifierResolution { path: path.into() },
        ))
    }

    /// Returns `true` if this error is a circular identifier resolution error.
    pub fn is_circular_identifier_resolution(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::CircularIdentifierResolution(_)
        )
    }
}
