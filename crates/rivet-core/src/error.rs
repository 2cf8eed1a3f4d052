mod circular_identifier_resolution;
mod composite_primary_key_as_foreign_id;
mod illegal_identifier_association;
mod invalid_mapping;
mod non_cacheable_entity_association;
mod unresolvable_target_entity;

use circular_identifier_resolution::CircularIdentifierResolution;
use composite_primary_key_as_foreign_id::CompositePrimaryKeyAsForeignId;
use illegal_identifier_association::IllegalIdentifierAssociation;
use invalid_mapping::InvalidMapping;
use non_cacheable_entity_association::NonCacheableEntityAssociation;
use std::sync::Arc;
use unresolvable_target_entity::UnresolvableTargetEntity;

/// An error raised while building association mapping metadata.
///
/// Every error aborts the compilation pass that produced it. None of them are
/// retryable; the offending declaration has to be fixed and the whole pass run
/// again.
#[derive(Clone)]
pub struct Error {
    inner: Arc<ErrorInner>,
}

#[derive(Debug)]
struct ErrorInner {
    kind: ErrorKind,
}

impl Error {
    fn kind(&self) -> &ErrorKind {
        &self.inner.kind
    }

    /// Returns the name of the class the error is reported against, if the
    /// error kind carries one.
    pub fn class_name(&self) -> Option<&str> {
        match self.kind() {
            ErrorKind::IllegalIdentifierAssociation(err) => Some(err.class_name()),
            ErrorKind::NonCacheableEntityAssociation(err) => Some(err.class_name()),
            ErrorKind::CompositePrimaryKeyAsForeignId(err) => Some(err.class_name()),
            ErrorKind::UnresolvableTargetEntity(err) => Some(err.class_name()),
            _ => None,
        }
    }

    /// Returns the name of the field the error is reported against, if the
    /// error kind carries one.
    pub fn field_name(&self) -> Option<&str> {
        match self.kind() {
            ErrorKind::IllegalIdentifierAssociation(err) => Some(err.field_name()),
            ErrorKind::NonCacheableEntityAssociation(err) => Some(err.field_name()),
            ErrorKind::CompositePrimaryKeyAsForeignId(err) => Some(err.field_name()),
            ErrorKind::UnresolvableTargetEntity(err) => Some(err.field_name()),
            _ => None,
        }
    }
}

impl std::error::Error for Error {}

impl core::fmt::Display for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        core::fmt::Display::fmt(self.kind(), f)
    }
}

impl core::fmt::Debug for Error {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        if !f.alternate() {
            core::fmt::Display::fmt(self, f)
        } else {
            f.debug_struct("Error")
                .field("kind", &self.inner.kind)
                .finish()
        }
    }
}

#[derive(Debug)]
enum ErrorKind {
    IllegalIdentifierAssociation(IllegalIdentifierAssociation),
    NonCacheableEntityAssociation(NonCacheableEntityAssociation),
    CompositePrimaryKeyAsForeignId(CompositePrimaryKeyAsForeignId),
    UnresolvableTargetEntity(UnresolvableTargetEntity),
    CircularIdentifierResolution(CircularIdentifierResolution),
    InvalidMapping(InvalidMapping),
}

impl core::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        use self::ErrorKind::*;

        match self {
            IllegalIdentifierAssociation(err) => core::fmt::Display::fmt(err, f),
            NonCacheableEntityAssociation(err) => core::fmt::Display::fmt(err, f),
            CompositePrimaryKeyAsForeignId(err) => core::fmt::Display::fmt(err, f),
            UnresolvableTargetEntity(err) => core::fmt::Display::fmt(err, f),
            CircularIdentifierResolution(err) => core::fmt::Display::fmt(err, f),
            InvalidMapping(err) => core::fmt::Display::fmt(err, f),
        }
    }
}

impl From<ErrorKind> for Error {
    fn from(kind: ErrorKind) -> Error {
        Error {
            inner: Arc::new(ErrorInner { kind }),
        }
    }
}
