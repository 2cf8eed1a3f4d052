use super::Error;

/// Error when a cacheable entity uses a non-cacheable association as (part
/// of) its identifier.
///
/// Cache entries for the entity are keyed by the association, so the
/// association must be cacheable as well.
#[derive(Debug)]
pub(super) struct NonCacheableEntityAssociation {
    class_name: Box<str>,
    field_name: Box<str>,
}

impl NonCacheableEntityAssociation {
    pub(super) fn class_name(&self) -> &str {
        &self.class_name
    }

    pub(super) fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl std::error::Error for NonCacheableEntityAssociation {}

impl core::fmt::Display for NonCacheableEntityAssociation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "entity `{}` is cacheable but its identifier association `{}` is not",
            self.class_name, self.field_name
        )
    }
}

impl Error {
    /// Creates a non-cacheable entity association error.
    pub fn non_cacheable_entity_association(
        class_name: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::NonCacheableEntityAssociation(
            NonCacheableEntityAssociation {
                class_name: class_name.into().into(),
                field_name: field_name.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a non-cacheable entity association error.
    pub fn is_non_cacheable_entity_association(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::NonCacheableEntityAssociation(_)
        )
    }
}
