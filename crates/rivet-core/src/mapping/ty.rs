use crate::context::ResolverId;

use std::fmt;

/// SQL-level storage type of a column.
///
/// The scalar type system itself lives with the persistence layer. This
/// enumeration only names the types so that a join column can take on the
/// type of the column it references.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    Boolean,

    /// Signed, `n` bytes wide
    Integer(u8),

    /// Unsigned, `n` bytes wide
    UnsignedInteger(u8),

    Text,

    /// Text of at most `n` characters
    VarChar(u64),

    Uuid,

    /// Optional `(precision, scale)`
    Numeric(Option<(u32, u32)>),

    Blob,

    /// Exactly `n` bytes
    Binary(u8),

    /// Fractional seconds precision, 0 to 9 digits
    Timestamp(u8),

    Date,

    /// A type the persistence layer knows by name only
    Custom(String),
}

/// The data type slot of a join column.
///
/// Join columns start out [`Deferred`](DataType::Deferred): the type they
/// need belongs to the referenced column of another class, which may not be
/// registered yet. The building context binds the slot when it drains its
/// pending resolvers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DataType {
    Deferred(ResolverId),
    Resolved(Type),
}

impl DataType {
    pub fn is_resolved(&self) -> bool {
        matches!(self, Self::Resolved(_))
    }

    pub fn as_resolved(&self) -> Option<&Type> {
        match self {
            Self::Resolved(ty) => Some(ty),
            Self::Deferred(_) => None,
        }
    }

    pub fn resolver(&self) -> Option<ResolverId> {
        match self {
            Self::Deferred(id) => Some(*id),
            Self::Resolved(_) => None,
        }
    }
}

impl From<Type> for DataType {
    fn from(value: Type) -> Self {
        Self::Resolved(value)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Boolean => f.write_str("BOOLEAN"),
            Type::Integer(size) => write!(f, "INTEGER({size})"),
            Type::UnsignedInteger(size) => write!(f, "UNSIGNED_INTEGER({size})"),
            Type::Text => f.write_str("TEXT"),
            Type::VarChar(len) => write!(f, "VARCHAR({len})"),
            Type::Uuid => f.write_str("UUID"),
            Type::Numeric(None) => f.write_str("NUMERIC"),
            Type::Numeric(Some((precision, scale))) => {
                write!(f, "NUMERIC({precision}, {scale})")
            }
            Type::Blob => f.write_str("BLOB"),
            Type::Binary(size) => write!(f, "BINARY({size})"),
            Type::Timestamp(precision) => write!(f, "TIMESTAMP({precision})"),
            Type::Date => f.write_str("DATE"),
            Type::Custom(custom) => f.write_str(&custom.to_uppercase()),
        }
    }
}
