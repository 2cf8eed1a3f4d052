//! Naming conventions for columns the mapping does not name explicitly.

use heck::ToSnakeCase;

use std::fmt;

/// Derives column names from field names.
pub trait NamingStrategy: fmt::Debug {
    /// Name of the column a join column references when none is declared.
    fn reference_column_name(&self) -> String;

    /// Name of a join column implementing `field_name` that references
    /// `referenced_column_name`.
    fn join_column_name(&self, field_name: &str, referenced_column_name: &str) -> String;
}

/// Joins the field name and the referenced column with `_`, verbatim.
///
/// `customer` referencing `id` becomes `customer_id`.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultNamingStrategy;

/// Snake-cases both parts before joining them.
///
/// `billingAddress` referencing `addressId` becomes `billing_address_address_id`.
#[derive(Debug, Default, Clone, Copy)]
pub struct UnderscoreNamingStrategy;

impl NamingStrategy for DefaultNamingStrategy {
    fn reference_column_name(&self) -> String {
        "id".to_string()
    }

    fn join_column_name(&self, field_name: &str, referenced_column_name: &str) -> String {
        format!("{field_name}_{referenced_column_name}")
    }
}

impl NamingStrategy for UnderscoreNamingStrategy {
    fn reference_column_name(&self) -> String {
        "id".to_string()
    }

    fn join_column_name(&self, field_name: &str, referenced_column_name: &str) -> String {
        format!(
            "{}_{}",
            field_name.to_snake_case(),
            referenced_column_name.to_snake_case()
        )
    }
}
