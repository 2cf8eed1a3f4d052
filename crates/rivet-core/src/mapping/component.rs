use super::{CachePolicy, FieldMetadata, JoinColumnMetadata, ToOneAssociationMetadata, Type};
use crate::context::ResolverId;
use crate::{decl, Error, Result};

use indexmap::IndexMap;

/// Mapping metadata of one persistent class.
///
/// Filled in field by field during a build pass, then owned by the
/// [`MetadataBuildingContext`](crate::MetadataBuildingContext) until the pass
/// completes.
#[derive(Debug, Clone, PartialEq)]
pub struct ComponentMetadata {
    pub class_name: String,

    /// If the mapping names a table for the class, this is set.
    pub table_name: Option<String>,

    /// Names of the fields composing the identifier, in first-registered
    /// order. Never contains duplicates.
    pub identifier: Vec<String>,

    pub cache: Option<CachePolicy>,

    /// Fields and associations keyed by field name, in declaration order.
    pub properties: IndexMap<String, Property>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Property {
    Field(FieldMetadata),
    ToOne(ToOneAssociationMetadata),
}

/// A column of a class's table, found by name.
#[derive(Debug, Clone, Copy)]
pub enum Column<'a> {
    Field(&'a FieldMetadata),
    JoinColumn(&'a ToOneAssociationMetadata, &'a JoinColumnMetadata),
}

impl ComponentMetadata {
    pub fn new(class_name: impl Into<String>) -> Self {
        Self {
            class_name: class_name.into(),
            table_name: None,
            identifier: vec![],
            cache: None,
            properties: IndexMap::new(),
        }
    }

    pub fn class_name(&self) -> &str {
        &self.class_name
    }

    pub fn cache(&self) -> Option<&CachePolicy> {
        self.cache.as_ref()
    }

    pub fn set_cache(&mut self, cache: Option<CachePolicy>) {
        self.cache = cache;
    }

    pub fn identifier(&self) -> &[String] {
        &self.identifier
    }

    pub fn is_identifier(&self, field_name: &str) -> bool {
        self.identifier.iter().any(|name| name == field_name)
    }

    /// Registers a field as part of the identifier. Returns `false` if it
    /// already was; builders may visit an identifier field more than once.
    pub fn add_identifier(&mut self, field_name: impl Into<String>) -> bool {
        let field_name = field_name.into();

        if self.is_identifier(&field_name) {
            return false;
        }

        self.identifier.push(field_name);
        true
    }

    /// Adds a scalar field. Fields flagged `id` join the identifier.
    pub fn add_field(&mut self, field: FieldMetadata, id: Option<decl::Id>) -> Result<()> {
        let name = field.name.clone();
        self.add_property(name.clone(), Property::Field(field))?;

        if id.is_some() {
            self.add_identifier(name);
        }

        Ok(())
    }

    /// Adds a to-one association. Associations built as identifier
    /// associations join the identifier.
    pub fn add_association(&mut self, association: ToOneAssociationMetadata) -> Result<()> {
        if association.source_entity != self.class_name {
            return Err(Error::invalid_mapping(format!(
                "association `{}::{}` was built for a different class than `{}`",
                association.source_entity, association.field_name, self.class_name
            )));
        }

        let name = association.field_name.clone();
        let primary_key = association.primary_key;
        self.add_property(name.clone(), Property::ToOne(association))?;

        if primary_key {
            self.add_identifier(name);
        }

        Ok(())
    }

    fn add_property(&mut self, name: String, property: Property) -> Result<()> {
        if self.properties.contains_key(&name) {
            return Err(Error::invalid_mapping(format!(
                "field `{}::{}` is declared more than once",
                self.class_name, name
            )));
        }

        self.properties.insert(name, property);
        Ok(())
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.get(name)
    }

    pub fn field(&self, name: &str) -> Option<&FieldMetadata> {
        self.property(name).and_then(Property::as_field)
    }

    pub fn association(&self, name: &str) -> Option<&ToOneAssociationMetadata> {
        self.property(name).and_then(Property::as_to_one)
    }

    pub(crate) fn association_mut(&mut self, name: &str) -> Option<&mut ToOneAssociationMetadata> {
        match self.properties.get_mut(name) {
            Some(Property::ToOne(association)) => Some(association),
            _ => None,
        }
    }

    pub fn associations(&self) -> impl Iterator<Item = &ToOneAssociationMetadata> + '_ {
        self.properties.values().filter_map(Property::as_to_one)
    }

    /// Finds a column of the class's table by name, either a field's column
    /// or a join column of an owning association.
    pub fn column(&self, column_name: &str) -> Option<Column<'_>> {
        self.properties
            .values()
            .find_map(|property| match property {
                Property::Field(field) if field.column_name == column_name => {
                    Some(Column::Field(field))
                }
                Property::ToOne(association) => association
                    .join_column(column_name)
                    .map(|join_column| Column::JoinColumn(association, join_column)),
                _ => None,
            })
    }

    /// Names of the identifier columns, in identifier order.
    ///
    /// An identifier association contributes its single join column. Fields
    /// that are not (yet) declared are skipped.
    pub fn identifier_columns(&self) -> Vec<&str> {
        self.identifier
            .iter()
            .filter_map(|name| match self.property(name)? {
                Property::Field(field) => Some(field.column_name.as_str()),
                Property::ToOne(association) => association
                    .join_columns
                    .first()
                    .map(|join_column| join_column.column_name.as_str()),
            })
            .collect()
    }
}

impl Property {
    pub fn name(&self) -> &str {
        match self {
            Self::Field(field) => &field.name,
            Self::ToOne(association) => &association.field_name,
        }
    }

    pub fn as_field(&self) -> Option<&FieldMetadata> {
        match self {
            Self::Field(field) => Some(field),
            _ => None,
        }
    }

    pub fn as_to_one(&self) -> Option<&ToOneAssociationMetadata> {
        match self {
            Self::ToOne(association) => Some(association),
            _ => None,
        }
    }
}

impl<'a> Column<'a> {
    /// The column's type, or `None` if it is a join column still waiting on
    /// resolution.
    pub fn ty(&self) -> Option<&'a Type> {
        match self {
            Self::Field(field) => Some(&field.ty),
            Self::JoinColumn(_, join_column) => join_column.ty.as_resolved(),
        }
    }

    /// The resolver the column's type is waiting on, if any.
    pub(crate) fn pending_resolver(&self) -> Option<ResolverId> {
        match self {
            Self::Field(_) => None,
            Self::JoinColumn(_, join_column) => join_column.ty.resolver(),
        }
    }
}
