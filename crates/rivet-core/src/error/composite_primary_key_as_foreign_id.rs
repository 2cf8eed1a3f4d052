use super::Error;

/// Error when an identifier association is backed by more than one join
/// column. Multi-column foreign keys cannot take part in the owning entity's
/// identifier.
#[derive(Debug)]
pub(super) struct CompositePrimaryKeyAsForeignId {
    class_name: Box<str>,
    target_entity: Box<str>,
    field_name: Box<str>,
}

impl CompositePrimaryKeyAsForeignId {
    pub(super) fn class_name(&self) -> &str {
        &self.class_name
    }

    pub(super) fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl std::error::Error for CompositePrimaryKeyAsForeignId {}

impl core::fmt::Display for CompositePrimaryKeyAsForeignId {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "cannot map `{}::{}` as a foreign identifier: target `{}` is referenced \
             through more than one join column",
            self.class_name, self.field_name, self.target_entity
        )
    }
}

impl Error {
    /// Creates an error for an identifier association that resolves to more
    /// than one join column.
    pub fn composite_primary_key_as_foreign_id(
        class_name: impl Into<String>,
        target_entity: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::CompositePrimaryKeyAsForeignId(
            CompositePrimaryKeyAsForeignId {
                class_name: class_name.into().into(),
                target_entity: target_entity.into().into(),
                field_name: field_name.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is a composite primary key as foreign id
    /// error.
    pub fn is_composite_primary_key_as_foreign_id(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::CompositePrimaryKeyAsForeignId(_)
        )
    }
}
