use super::{DataType, Type};

/// A physical foreign key column implementing a to-one association.
#[derive(Debug, Clone, PartialEq)]
pub struct JoinColumnMetadata {
    /// The name of the column on the owning class's table.
    pub column_name: String,

    /// The column on the target class's table this column points to.
    pub referenced_column_name: String,

    pub nullable: bool,

    pub unique: bool,

    /// Referential action applied by the database when the target row is
    /// deleted, upper-cased.
    pub on_delete: Option<String>,

    /// Raw column DDL, if declared.
    pub column_definition: Option<String>,

    /// The column's data type, bound to the referenced column's type once
    /// the building context drains its resolvers.
    pub ty: DataType,

    /// True when `column_name` came from the naming strategy
    pub(crate) implicit_name: bool,

    /// True when `referenced_column_name` came from the naming strategy. Such
    /// columns are retargeted to the target's first identifier column during
    /// resolution.
    pub(crate) implicit_referenced_column: bool,
}

impl JoinColumnMetadata {
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    pub fn referenced_column_name(&self) -> &str {
        &self.referenced_column_name
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn is_unique(&self) -> bool {
        self.unique
    }

    /// Returns the resolved type, or `None` while resolution is pending.
    pub fn ty(&self) -> Option<&Type> {
        self.ty.as_resolved()
    }
}
