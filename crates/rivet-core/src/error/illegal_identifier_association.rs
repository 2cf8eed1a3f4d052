use super::Error;

/// Error when a to-one association carries an identifier marker it is not
/// allowed to have.
///
/// This occurs when:
/// - The association is also marked for orphan removal. An orphan removal
///   cascade would null out a primary key column.
/// - The association is the inverse side. Only the side holding the foreign
///   key has a column the identifier can be anchored on.
#[derive(Debug)]
pub(super) struct IllegalIdentifierAssociation {
    kind: IllegalIdentifierAssociationKind,
    class_name: Box<str>,
    field_name: Box<str>,
}

#[derive(Debug, PartialEq, Eq)]
enum IllegalIdentifierAssociationKind {
    OrphanRemoval,
    InverseSide,
}

impl IllegalIdentifierAssociation {
    pub(super) fn class_name(&self) -> &str {
        &self.class_name
    }

    pub(super) fn field_name(&self) -> &str {
        &self.field_name
    }
}

impl std::error::Error for IllegalIdentifierAssociation {}

impl core::fmt::Display for IllegalIdentifierAssociation {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        match self.kind {
            IllegalIdentifierAssociationKind::OrphanRemoval => write!(
                f,
                "illegal orphan removal on identifier association `{}::{}`",
                self.class_name, self.field_name
            ),
            IllegalIdentifierAssociationKind::InverseSide => write!(
                f,
                "inverse side `{}::{}` cannot be used as an identifier",
                self.class_name, self.field_name
            ),
        }
    }
}

impl Error {
    /// Creates an error for an identifier association that is also marked for
    /// orphan removal.
    pub fn illegal_orphan_removal_on_identifier_association(
        class_name: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Error {
        Error::illegal_identifier_association(
            IllegalIdentifierAssociationKind::OrphanRemoval,
            class_name.into(),
            field_name.into(),
        )
    }

    /// Creates an error for an identifier association declared on the inverse
    /// (non-owning) side.
    pub fn illegal_inverse_identifier_association(
        class_name: impl Into<String>,
        field_name: impl Into<String>,
    ) -> Error {
        Error::illegal_identifier_association(
            IllegalIdentifierAssociationKind::InverseSide,
            class_name.into(),
            field_name.into(),
        )
    }

    fn illegal_identifier_association(
        kind: IllegalIdentifierAssociationKind,
        class_name: String,
        field_name: String,
    ) -> Error {
        Error::from(super::ErrorKind::IllegalIdentifierAssociation(
            IllegalIdentifierAssociation {
                kind,
                class_name: class_name.into(),
                field_name: field_name.into(),
            },
        ))
    }

    /// Returns `true` if this error is an orphan removal on identifier
    /// association error.
    pub fn is_illegal_orphan_removal_on_identifier_association(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::IllegalIdentifierAssociation(err)
                if err.kind == IllegalIdentifierAssociationKind::OrphanRemoval
        )
    }

    /// Returns `true` if this error is an inverse identifier association error.
    pub fn is_illegal_inverse_identifier_association(&self) -> bool {
        matches!(
            self.kind(),
            super::ErrorKind::IllegalIdentifierAssociation(err)
                if err.kind == IllegalIdentifierAssociationKind::InverseSide
        )
    }
}
