use super::Error;

/// Error when a deferred join column type cannot be resolved because the
/// association's target entity was never registered with the building
/// context.
#[derive(Debug)]
pub(super) struct UnresolvableTargetEntity {
    class_name: Box<str>,
    field_name: Box<str>,
    target_entity: Box<str>,
}

impl UnresolvableTargetEntity {
    pub(super) fn class_name(&self) -> &str {
        &self.class_name
    }

    pub(super) fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl std::error::Error for UnresolvableTargetEntity {}

impl core::fmt::Display for UnresolvableTargetEntity {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        write!(
            f,
            "target entity `{}` of `{}::{}` was never registered",
            self.target_entity, self.class_name, self.field_name
        )
    }
}

impl Error {
    /// Creates an unresolvable target entity error.
    pub fn unresolvable_target_entity(
        class_name: impl Into<String>,
        field_name: impl Into<String>,
        target_entity: impl Into<String>,
    ) -> Error {
        Error::from(super::ErrorKind::UnresolvableTargetEntity(
            UnresolvableTargetEntity {
                class_name: class_name.into().into(),
                field_name: field_name.into().into(),
                target_entity: target_entity.into().into(),
            },
        ))
    }

    /// Returns `true` if this error is an unresolvable target entity error.
    pub fn is_unresolvable_target_entity(&self) -> bool {
        matches!(self.kind(), super::ErrorKind::UnresolvableTargetEntity(_))
    }
}
