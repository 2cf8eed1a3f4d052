use super::{CachePolicy, JoinColumnMetadata};

/// A single-valued association: one-to-one or many-to-one.
#[derive(Debug, Clone, PartialEq)]
pub struct ToOneAssociationMetadata {
    pub kind: ToOneKind,

    /// The association's field name on the source class
    pub field_name: String,

    /// Class that declares the association
    pub source_entity: String,

    /// Class the association points to
    pub target_entity: String,

    /// Inverse side only: the owning side's field on the target
    pub mapped_by: Option<String>,

    /// Owning side only: the inverse side's field on the target, if the
    /// association is bidirectional
    pub inversed_by: Option<String>,

    /// True if the association is (part of) the source class's identifier
    pub primary_key: bool,

    pub orphan_removal: bool,

    pub cascade: Vec<Cascade>,

    pub fetch: FetchMode,

    pub cache: Option<CachePolicy>,

    /// Join columns in declaration order. Empty on the inverse side.
    pub join_columns: Vec<JoinColumnMetadata>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ToOneKind {
    OneToOne,
    ManyToOne,
}

/// Operations propagated from the source entity to the association's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cascade {
    Persist,
    Remove,
    Refresh,
    /// Shorthand for every other option. Expanded when the association is
    /// built.
    All,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum FetchMode {
    #[default]
    Lazy,
    Eager,
    ExtraLazy,
}

impl ToOneAssociationMetadata {
    pub(crate) fn new(
        kind: ToOneKind,
        field_name: impl Into<String>,
        source_entity: impl Into<String>,
        target_entity: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            field_name: field_name.into(),
            source_entity: source_entity.into(),
            target_entity: target_entity.into(),
            mapped_by: None,
            inversed_by: None,
            primary_key: false,
            orphan_removal: false,
            cascade: vec![],
            fetch: FetchMode::default(),
            cache: None,
            join_columns: vec![],
        }
    }

    pub fn field_name(&self) -> &str {
        &self.field_name
    }

    pub fn target_entity(&self) -> &str {
        &self.target_entity
    }

    /// True if this side physically holds the foreign key.
    pub fn is_owning_side(&self) -> bool {
        self.mapped_by.is_none()
    }

    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    pub fn is_orphan_removal(&self) -> bool {
        self.orphan_removal
    }

    pub fn cache(&self) -> Option<&CachePolicy> {
        self.cache.as_ref()
    }

    pub fn join_columns(&self) -> &[JoinColumnMetadata] {
        &self.join_columns
    }

    pub fn join_column(&self, column_name: &str) -> Option<&JoinColumnMetadata> {
        self.join_columns
            .iter()
            .find(|join_column| join_column.column_name == column_name)
    }

    pub(crate) fn add_join_column(&mut self, join_column: JoinColumnMetadata) {
        self.join_columns.push(join_column);
    }

    pub fn is_cascade(&self, cascade: Cascade) -> bool {
        self.cascade.contains(&cascade)
    }
}

impl Cascade {
    /// Expands `All` and removes duplicates, keeping first-seen order.
    pub(crate) fn normalize(cascade: &[Cascade]) -> Vec<Cascade> {
        let expanded = if cascade.contains(&Cascade::All) {
            &[Cascade::Persist, Cascade::Remove, Cascade::Refresh][..]
        } else {
            cascade
        };

        let mut ret = Vec::with_capacity(expanded.len());
        for item in expanded {
            if !ret.contains(item) {
                ret.push(*item);
            }
        }
        ret
    }
}
