//! Per-field mapping declarations.
//!
//! These are plain data handed over by whatever reads the mapping source
//! (attributes, a schema file, hand-written code). Every value left as `None`
//! falls back to a naming convention or default when the metadata is built.

use crate::mapping::{CacheUsage, Cascade, FetchMode};

/// Marks a field as part of its class's identifier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Id;

/// Declares a single join column.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinColumn {
    /// Column name on the owning table.
    pub name: Option<String>,

    /// Column on the target table this column points to.
    pub referenced_column_name: Option<String>,

    pub nullable: Option<bool>,

    pub unique: Option<bool>,

    /// Referential action, e.g. `CASCADE` or `SET NULL`.
    pub on_delete: Option<String>,

    /// Raw column DDL used verbatim instead of the generated definition.
    pub column_definition: Option<String>,
}

/// Declares the join columns of a multi-column foreign key, in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JoinColumns(pub Vec<JoinColumn>);

/// Marks a class or an association as cacheable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Cache {
    pub usage: Option<CacheUsage>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManyToOne {
    pub target_entity: String,
    pub cascade: Vec<Cascade>,
    pub fetch: Option<FetchMode>,
    pub inversed_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OneToOne {
    pub target_entity: String,
    pub cascade: Vec<Cascade>,
    pub fetch: Option<FetchMode>,

    /// Set on the inverse side; names the owning side's field.
    pub mapped_by: Option<String>,

    /// Set on the owning side; names the inverse side's field.
    pub inversed_by: Option<String>,

    pub orphan_removal: bool,
}

/// The relationship declaration of a to-one field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToOne {
    OneToOne(OneToOne),
    ManyToOne(ManyToOne),
}

impl JoinColumn {
    pub fn new(name: impl Into<String>, referenced_column_name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            referenced_column_name: Some(referenced_column_name.into()),
            ..Self::default()
        }
    }

    pub fn nullable(mut self, nullable: bool) -> Self {
        self.nullable = Some(nullable);
        self
    }

    pub fn unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    pub fn on_delete(mut self, on_delete: impl Into<String>) -> Self {
        self.on_delete = Some(on_delete.into());
        self
    }
}

impl Cache {
    pub fn new(usage: CacheUsage) -> Self {
        Self {
            usage: Some(usage),
            region: None,
        }
    }

    pub fn region(mut self, region: impl Into<String>) -> Self {
        self.region = Some(region.into());
        self
    }
}

impl ManyToOne {
    pub fn new(target_entity: impl Into<String>) -> Self {
        Self {
            target_entity: target_entity.into(),
            ..Self::default()
        }
    }
}

impl OneToOne {
    pub fn new(target_entity: impl Into<String>) -> Self {
        Self {
            target_entity: target_entity.into(),
            ..Self::default()
        }
    }

    pub fn mapped_by(mut self, field: impl Into<String>) -> Self {
        self.mapped_by = Some(field.into());
        self
    }

    pub fn orphan_removal(mut self, orphan_removal: bool) -> Self {
        self.orphan_removal = orphan_removal;
        self
    }
}

impl ToOne {
    pub fn target_entity(&self) -> &str {
        match self {
            Self::OneToOne(one_to_one) => &one_to_one.target_entity,
            Self::ManyToOne(many_to_one) => &many_to_one.target_entity,
        }
    }
}

impl From<OneToOne> for ToOne {
    fn from(value: OneToOne) -> Self {
        Self::OneToOne(value)
    }
}

impl From<ManyToOne> for ToOne {
    fn from(value: ManyToOne) -> Self {
        Self::ManyToOne(value)
    }
}
