use super::{ComponentMetadata, ToOneAssociationMetadata};

use indexmap::IndexMap;

/// The resolved metadata graph of one compilation pass.
///
/// Every join column type is bound and every identifier list is final. This
/// is what the persistence layer consumes. It is read-only:
///
/// ```compile_fail
/// let mut schema = rivet_core::Schema::default();
/// schema.components.clear();
/// ```
#[derive(Debug, Default)]
pub struct Schema {
    pub(crate) components: IndexMap<String, ComponentMetadata>,
}

impl Schema {
    /// Get a component by class name
    pub fn component(&self, class_name: &str) -> Option<&ComponentMetadata> {
        self.components.get(class_name)
    }

    pub fn components(&self) -> impl Iterator<Item = &ComponentMetadata> {
        self.components.values()
    }

    /// Get an association by class and field name
    pub fn association(
        &self,
        class_name: &str,
        field_name: &str,
    ) -> Option<&ToOneAssociationMetadata> {
        self.component(class_name)?.association(field_name)
    }

    pub fn into_components(self) -> IndexMap<String, ComponentMetadata> {
        self.components
    }
}
