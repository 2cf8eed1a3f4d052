use super::CacheMetadataBuilder;
use crate::decl;
use crate::mapping::{CachePolicy, ComponentMetadata};
use crate::MetadataBuildingContext;

/// Configuration shared by every association builder.
///
/// Concrete builders embed this and read the owning class, field and cache
/// policy from it. [`with_component_metadata`](Self::with_component_metadata)
/// and [`with_field_name`](Self::with_field_name) must both be called before
/// building.
#[derive(Debug, Clone)]
pub struct AssociationMetadataBuilder<'a> {
    cx: &'a MetadataBuildingContext,

    class_name: Option<String>,

    /// Cache policy of the owning class, copied when the class is set
    component_cache: Option<CachePolicy>,

    field_name: Option<String>,

    cache: Option<decl::Cache>,

    cache_builder: CacheMetadataBuilder<'a>,
}

impl<'a> AssociationMetadataBuilder<'a> {
    pub fn new(cx: &'a MetadataBuildingContext) -> Self {
        Self {
            cx,
            class_name: None,
            component_cache: None,
            field_name: None,
            cache: None,
            cache_builder: CacheMetadataBuilder::new(cx),
        }
    }

    pub fn with_component_metadata(&mut self, component: &ComponentMetadata) -> &mut Self {
        self.class_name = Some(component.class_name.clone());
        self.component_cache = component.cache.clone();
        self.cache_builder.with_component_metadata(component);
        self
    }

    pub fn with_field_name(&mut self, field_name: impl Into<String>) -> &mut Self {
        let field_name = field_name.into();
        self.cache_builder.with_field_name(field_name.clone());
        self.field_name = Some(field_name);
        self
    }

    pub fn with_cache_annotation(&mut self, cache: Option<decl::Cache>) -> &mut Self {
        self.cache = cache;
        self
    }

    pub(crate) fn cx(&self) -> &'a MetadataBuildingContext {
        self.cx
    }

    /// # Panics
    ///
    /// If no class was configured.
    pub(crate) fn class_name(&self) -> &str {
        self.class_name
            .as_deref()
            .expect("association built before `with_component_metadata()`")
    }

    /// # Panics
    ///
    /// If no field was configured.
    pub(crate) fn field_name(&self) -> &str {
        match self.field_name.as_deref() {
            Some(field_name) => field_name,
            None => panic!(
                "association of `{}` built before `with_field_name()`",
                self.class_name()
            ),
        }
    }

    pub(crate) fn component_cache(&self) -> Option<&CachePolicy> {
        self.component_cache.as_ref()
    }

    pub(crate) fn build_cache(&self) -> Option<CachePolicy> {
        self.cache_builder.build(self.cache.as_ref())
    }
}
