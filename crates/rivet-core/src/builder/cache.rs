use crate::decl;
use crate::mapping::{CachePolicy, ComponentMetadata};
use crate::MetadataBuildingContext;

/// Builds the cache policy of a class or of one of its associations.
#[derive(Debug, Clone)]
pub struct CacheMetadataBuilder<'a> {
    cx: &'a MetadataBuildingContext,

    class_name: Option<String>,

    /// Set when building an association's policy
    field_name: Option<String>,
}

impl<'a> CacheMetadataBuilder<'a> {
    pub fn new(cx: &'a MetadataBuildingContext) -> Self {
        Self {
            cx,
            class_name: None,
            field_name: None,
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

    /// Returns `None` when there is no declaration, i.e. the class or
    /// association is not cacheable.
    ///
    /// A declaration without a region gets one named after the class, and the
    /// field when building an association's policy.
    pub fn build(&self, declaration: Option<&decl::Cache>) -> Option<CachePolicy> {
        let declaration = declaration?;

        let usage = declaration
            .usage
            .unwrap_or(self.cx.config().default_cache_usage);

        let region = match &declaration.region {
            Some(region) if !region.is_empty() => region.clone(),
            _ => self.default_region(),
        };

        Some(CachePolicy::new(region, usage))
    }

    fn default_region(&self) -> String {
        let class_name = self
            .class_name
            .as_deref()
            .expect("cache policy built before `with_component_metadata()`");

        let region = class_name
            .to_lowercase()
            .replace("::", "_")
            .replace('\\', "_");

        match &self.field_name {
            Some(field_name) => format!("{region}__{field_name}"),
            None => region,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::CacheUsage;
    use crate::Config;

    #[test]
    fn no_declaration_is_not_cacheable() {
        let cx = MetadataBuildingContext::default();
        let component = ComponentMetadata::new("Order");

        let mut builder = CacheMetadataBuilder::new(&cx);
        builder.with_component_metadata(&component);

        assert_eq!(builder.build(None), None);
    }

    #[test]
    fn region_defaults_to_class_and_field() {
        let cx = MetadataBuildingContext::default();
        let component = ComponentMetadata::new("shop::OrderLine");

        let mut builder = CacheMetadataBuilder::new(&cx);
        builder.with_component_metadata(&component);

        let policy = builder.build(Some(&decl::Cache::default())).unwrap();
        assert_eq!(policy.region, "shop_orderline");
        assert_eq!(policy.usage, CacheUsage::ReadOnly);

        builder.with_field_name("order");
        let policy = builder
            .build(Some(&decl::Cache::new(CacheUsage::ReadWrite)))
            .unwrap();
        assert_eq!(policy.region, "shop_orderline__order");
        assert_eq!(policy.usage, CacheUsage::ReadWrite);
    }

    #[test]
    fn explicit_region_and_configured_usage() {
        let cx = MetadataBuildingContext::new(
            Config::new().default_cache_usage(CacheUsage::NonstrictReadWrite),
        );
        let component = ComponentMetadata::new("Order");

        let mut builder = CacheMetadataBuilder::new(&cx);
        builder
            .with_component_metadata(&component)
            .with_field_name("customer");

        let policy = builder
            .build(Some(&decl::Cache::default().region("orders")))
            .unwrap();
        assert_eq!(policy, CachePolicy::new("orders", CacheUsage::NonstrictReadWrite));
    }
}
