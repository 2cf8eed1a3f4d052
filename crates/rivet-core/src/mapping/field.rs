use super::Type;

/// A scalar (non-association) field and the column it is stored in.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldMetadata {
    /// The field name
    pub name: String,

    /// The name of the column in the class's table
    pub column_name: String,

    /// The column's storage type
    pub ty: Type,

    pub nullable: bool,

    pub unique: bool,
}

impl FieldMetadata {
    /// Creates a non-nullable field stored in a column of the same name.
    pub fn new(name: impl Into<String>, ty: Type) -> Self {
        let name = name.into();
        Self {
            column_name: name.clone(),
            name,
            ty,
            nullable: false,
            unique: false,
        }
    }

    pub fn column_name(mut self, column_name: impl Into<String>) -> Self {
        self.column_name = column_name.into();
        self
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = nullable;
        self
    }
}
