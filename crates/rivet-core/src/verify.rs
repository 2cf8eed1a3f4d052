use crate::mapping::{ComponentMetadata, Property, Schema, ToOneAssociationMetadata};
use crate::{Error, Result};

use std::collections::HashSet;

struct Verify<'a> {
    schema: &'a Schema,
}

impl Schema {
    pub(crate) fn verify(&self) -> Result<()> {
        Verify { schema: self }.verify()
    }
}

impl Verify<'_> {
    fn verify(&self) -> Result<()> {
        for component in self.schema.components() {
            self.verify_identifier(component)?;
            self.verify_column_names_unique(component)?;

            for association in component.associations() {
                self.verify_join_columns_resolved(association)?;
                self.verify_identifier_association(component, association)?;
            }
        }

        Ok(())
    }

    fn verify_identifier(&self, component: &ComponentMetadata) -> Result<()> {
        if component.identifier.is_empty() {
            return Err(Error::invalid_mapping(format!(
                "class `{}` has no identifier",
                component.class_name
            )));
        }

        for field_name in &component.identifier {
            if component.property(field_name).is_none() {
                return Err(Error::invalid_mapping(format!(
                    "identifier field `{}::{}` is not declared",
                    component.class_name, field_name
                )));
            }
        }

        Ok(())
    }

    /// Field columns and join columns share the class's table, so no two of
    /// them may have the same name.
    fn verify_column_names_unique(&self, component: &ComponentMetadata) -> Result<()> {
        let mut seen = HashSet::new();

        for property in component.properties.values() {
            let column_names: Vec<&str> = match property {
                Property::Field(field) => vec![field.column_name.as_str()],
                Property::ToOne(association) => association
                    .join_columns
                    .iter()
                    .map(|join_column| join_column.column_name.as_str())
                    .collect(),
            };

            for column_name in column_names {
                if !seen.insert(column_name) {
                    return Err(Error::invalid_mapping(format!(
                        "column `{}.{}` is mapped more than once",
                        component.class_name, column_name
                    )));
                }
            }
        }

        Ok(())
    }

    fn verify_join_columns_resolved(&self, association: &ToOneAssociationMetadata) -> Result<()> {
        for join_column in &association.join_columns {
            if !join_column.ty.is_resolved() {
                return Err(Error::invalid_mapping(format!(
                    "type of join column `{}.{}` was never resolved",
                    association.source_entity, join_column.column_name
                )));
            }
        }

        Ok(())
    }

    fn verify_identifier_association(
        &self,
        component: &ComponentMetadata,
        association: &ToOneAssociationMetadata,
    ) -> Result<()> {
        if !association.primary_key {
            return Ok(());
        }

        if association.orphan_removal {
            return Err(Error::illegal_orphan_removal_on_identifier_association(
                &component.class_name,
                &association.field_name,
            ));
        }

        if !association.is_owning_side() {
            return Err(Error::illegal_inverse_identifier_association(
                &component.class_name,
                &association.field_name,
            ));
        }

        if association.join_columns.len() != 1 {
            return Err(Error::composite_primary_key_as_foreign_id(
                &component.class_name,
                &association.target_entity,
                &association.field_name,
            ));
        }

        if !component.is_identifier(&association.field_name) {
            return Err(Error::invalid_mapping(format!(
                "`{}::{}` is flagged as an identifier association but is not part of the identifier",
                component.class_name, association.field_name
            )));
        }

        Ok(())
    }
}
