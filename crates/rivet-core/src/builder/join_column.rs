use crate::context::ResolverId;
use crate::decl;
use crate::mapping::{ComponentMetadata, DataType, JoinColumnMetadata};
use crate::MetadataBuildingContext;

/// Builds one join column, from a declaration or from naming conventions.
///
/// Declared values are used verbatim. Anything the declaration leaves out
/// falls back to the context's naming strategy: the column references the
/// strategy's reference column, and is named after the field and that
/// column.
#[derive(Debug, Clone)]
pub struct JoinColumnMetadataBuilder<'a> {
    cx: &'a MetadataBuildingContext,

    class_name: Option<String>,

    field_name: Option<String>,

    join_column: Option<decl::JoinColumn>,

    /// Undeclared nullability is `!required`
    required: bool,

    /// Undeclared uniqueness
    unique: bool,
}

impl<'a> JoinColumnMetadataBuilder<'a> {
    pub fn new(cx: &'a MetadataBuildingContext) -> Self {
        Self {
            cx,
            class_name: None,
            field_name: None,
            join_column: None,
            required: false,
            unique: false,
        }
    }

    pub fn with_component_metadata(&mut self, component: &ComponentMetadata) -> &mut Self {
        self.class_name = Some(component.class_name.clone());
        self
    }

    pub fn with_field_name(&mut self, field_name: impl Into<String>) -> &mut Self {
        self.field_name = Some(field_name.into());
        self
    }

    /// Sets the declaration to build from. `None` builds a column purely from
    /// conventions.
    pub fn with_join_column_annotation(
        &mut self,
        join_column: Option<decl::JoinColumn>,
    ) -> &mut Self {
        self.join_column = join_column;
        self
    }

    /// A required association gets non-nullable join columns unless the
    /// declaration says otherwise.
    pub fn with_required(&mut self, required: bool) -> &mut Self {
        self.required = required;
        self
    }

    pub fn with_unique(&mut self, unique: bool) -> &mut Self {
        self.unique = unique;
        self
    }

    /// Builds the join column. Its type is left pending; the caller binds it
    /// to a resolver.
    ///
    /// # Panics
    ///
    /// If no field name was configured.
    pub fn build(&self) -> JoinColumnMetadata {
        let field_name = self.field_name.as_deref().unwrap_or_else(|| {
            panic!(
                "join column of `{}` built before `with_field_name()`",
                self.class_name.as_deref().unwrap_or("<unknown class>")
            )
        });

        let naming = self.cx.config().naming_strategy();
        let declaration = self.join_column.as_ref();

        let referenced_column_name =
            declaration.and_then(|decl| non_empty(decl.referenced_column_name.as_deref()));
        let implicit_referenced_column = referenced_column_name.is_none();
        let referenced_column_name =
            referenced_column_name.unwrap_or_else(|| naming.reference_column_name());

        let column_name = declaration.and_then(|decl| non_empty(decl.name.as_deref()));
        let implicit_name = column_name.is_none();
        let column_name = column_name
            .unwrap_or_else(|| naming.join_column_name(field_name, &referenced_column_name));

        JoinColumnMetadata {
            column_name,
            referenced_column_name,
            nullable: declaration
                .and_then(|decl| decl.nullable)
                .unwrap_or(!self.required),
            unique: declaration
                .and_then(|decl| decl.unique)
                .unwrap_or(self.unique),
            on_delete: declaration
                .and_then(|decl| non_empty(decl.on_delete.as_deref()))
                .map(|on_delete| on_delete.to_uppercase()),
            column_definition: declaration
                .and_then(|decl| non_empty(decl.column_definition.as_deref())),
            ty: DataType::Deferred(ResolverId::placeholder()),
            implicit_name,
            implicit_referenced_column,
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|value| !value.is_empty()).map(str::to_string)
}
