use super::{AssociationMetadataBuilder, JoinColumnMetadataBuilder};
use crate::decl;
use crate::mapping::{Cascade, ComponentMetadata, DataType, ToOneAssociationMetadata, ToOneKind};
use crate::{Error, MetadataBuildingContext, Result};

/// Builds one-to-one and many-to-one associations.
///
/// Building checks whether the association may serve as (part of) its
/// class's identifier and assembles its join columns. The type of each join
/// column is left to a resolver queued on the context, since the target class
/// may not be registered yet.
///
/// ```
/// use rivet_core::{decl, mapping::ComponentMetadata};
/// use rivet_core::{MetadataBuildingContext, ToOneAssociationMetadataBuilder};
///
/// let cx = MetadataBuildingContext::default();
/// let order = ComponentMetadata::new("Order");
///
/// let association = ToOneAssociationMetadataBuilder::new(&cx)
///     .with_component_metadata(&order)
///     .with_field_name("customer")
///     .with_many_to_one(decl::ManyToOne::new("Customer"))
///     .build()
///     .unwrap();
///
/// assert_eq!(association.join_columns()[0].column_name(), "customer_id");
/// assert!(!association.is_primary_key());
/// assert_eq!(cx.pending_resolvers(), 1);
/// ```
#[derive(Debug, Clone)]
pub struct ToOneAssociationMetadataBuilder<'a> {
    association: AssociationMetadataBuilder<'a>,

    join_column_builder: JoinColumnMetadataBuilder<'a>,

    relation: Option<decl::ToOne>,

    id: Option<decl::Id>,

    join_column: Option<decl::JoinColumn>,

    join_columns: Option<decl::JoinColumns>,
}

impl<'a> ToOneAssociationMetadataBuilder<'a> {
    pub fn new(cx: &'a MetadataBuildingContext) -> Self {
        Self {
            association: AssociationMetadataBuilder::new(cx),
            join_column_builder: JoinColumnMetadataBuilder::new(cx),
            relation: None,
            id: None,
            join_column: None,
            join_columns: None,
        }
    }

    pub fn with_component_metadata(&mut self, component: &ComponentMetadata) -> &mut Self {
        self.association.with_component_metadata(component);
        self.join_column_builder.with_component_metadata(component);
        self
    }

    pub fn with_field_name(&mut self, field_name: impl Into<String>) -> &mut Self {
        let field_name = field_name.into();
        self.join_column_builder.with_field_name(field_name.clone());
        self.association.with_field_name(field_name);
        self
    }

    pub fn with_cache_annotation(&mut self, cache: Option<decl::Cache>) -> &mut Self {
        self.association.with_cache_annotation(cache);
        self
    }

    pub fn with_to_one(&mut self, relation: impl Into<decl::ToOne>) -> &mut Self {
        self.relation = Some(relation.into());
        self
    }

    pub fn with_one_to_one(&mut self, one_to_one: decl::OneToOne) -> &mut Self {
        self.with_to_one(one_to_one)
    }

    pub fn with_many_to_one(&mut self, many_to_one: decl::ManyToOne) -> &mut Self {
        self.with_to_one(many_to_one)
    }

    pub fn with_id_annotation(&mut self, id: Option<decl::Id>) -> &mut Self {
        self.id = id;
        self
    }

    pub fn with_join_column_annotation(&mut self, join_column: Option<decl::JoinColumn>) -> &mut Self {
        self.join_column = join_column;
        self
    }

    pub fn with_join_columns_annotation(
        &mut self,
        join_columns: Option<decl::JoinColumns>,
    ) -> &mut Self {
        self.join_columns = join_columns;
        self
    }

    /// Builds the association.
    ///
    /// The builder itself is left untouched. The only effect on the context
    /// is one queued resolver per join column, and only when building
    /// succeeds.
    ///
    /// # Panics
    ///
    /// If the class, field or relationship was never configured.
    pub fn build(&self) -> Result<ToOneAssociationMetadata> {
        let mut association = self.build_relation();
        association.cache = self.association.build_cache();

        self.build_primary_key(&mut association)?;

        if association.is_owning_side() {
            self.build_join_columns(&mut association)?;
        } else if self.join_column.is_some() || self.join_columns.is_some() {
            if self.association.cx().config().strict_declarations {
                return Err(Error::invalid_mapping(format!(
                    "inverse side `{}::{}` declares join columns",
                    association.source_entity, association.field_name
                )));
            }

            log::warn!(
                "ignoring join column declarations on inverse side `{}::{}`",
                association.source_entity,
                association.field_name
            );
        }

        log::debug!(
            "built {:?} association `{}::{}` -> `{}`; primary_key={}; join_columns={}",
            association.kind,
            association.source_entity,
            association.field_name,
            association.target_entity,
            association.primary_key,
            association.join_columns.len()
        );

        Ok(association)
    }

    fn build_relation(&self) -> ToOneAssociationMetadata {
        let class_name = self.association.class_name();
        let field_name = self.association.field_name();

        let Some(relation) = &self.relation else {
            panic!("association `{class_name}::{field_name}` built without a relationship declaration");
        };

        match relation {
            decl::ToOne::OneToOne(one_to_one) => {
                let mut association = ToOneAssociationMetadata::new(
                    ToOneKind::OneToOne,
                    field_name,
                    class_name,
                    &one_to_one.target_entity,
                );
                association.mapped_by = non_empty(&one_to_one.mapped_by);
                association.inversed_by = non_empty(&one_to_one.inversed_by);
                association.orphan_removal = one_to_one.orphan_removal;
                association.cascade = Cascade::normalize(&one_to_one.cascade);
                association.fetch = one_to_one.fetch.unwrap_or_default();
                association
            }
            decl::ToOne::ManyToOne(many_to_one) => {
                let mut association = ToOneAssociationMetadata::new(
                    ToOneKind::ManyToOne,
                    field_name,
                    class_name,
                    &many_to_one.target_entity,
                );
                association.inversed_by = non_empty(&many_to_one.inversed_by);
                association.cascade = Cascade::normalize(&many_to_one.cascade);
                association.fetch = many_to_one.fetch.unwrap_or_default();
                association
            }
        }
    }

    /// Flags the association as an identifier association if it carries an
    /// identifier marker. Registering the field with the class's identifier
    /// happens when the association is added to the class.
    fn build_primary_key(&self, association: &mut ToOneAssociationMetadata) -> Result<()> {
        if self.id.is_none() {
            return Ok(());
        }

        let class_name = self.association.class_name();
        let field_name = self.association.field_name();

        if association.orphan_removal {
            return Err(Error::illegal_orphan_removal_on_identifier_association(
                class_name, field_name,
            ));
        }

        if !association.is_owning_side() {
            return Err(Error::illegal_inverse_identifier_association(
                class_name, field_name,
            ));
        }

        if self.association.component_cache().is_some() && association.cache.is_none() {
            return Err(Error::non_cacheable_entity_association(
                class_name, field_name,
            ));
        }

        association.primary_key = true;
        Ok(())
    }

    /// Assembles the join columns from the multi-column declaration, the
    /// single-column declaration or conventions, in that order of
    /// precedence.
    fn build_join_columns(&self, association: &mut ToOneAssociationMetadata) -> Result<()> {
        let declarations = self.join_column_declarations(association)?;

        // Checked before any resolver is queued so a rejected association
        // leaves the context untouched.
        if association.primary_key && declarations.len() > 1 {
            return Err(Error::composite_primary_key_as_foreign_id(
                &association.source_entity,
                &association.target_entity,
                &association.field_name,
            ));
        }

        let unique = association.kind == ToOneKind::OneToOne
            && declarations.len() == 1
            && !association.primary_key;

        let mut builder = self.join_column_builder.clone();
        builder
            .with_required(association.primary_key)
            .with_unique(unique);

        let cx = self.association.cx();

        for declaration in declarations {
            builder.with_join_column_annotation(declaration);
            let mut join_column = builder.build();

            let resolver =
                cx.create_lazy_data_type_resolver(association, association.join_columns.len());
            join_column.ty = DataType::Deferred(resolver);

            association.add_join_column(join_column);
        }

        Ok(())
    }

    /// One entry per join column to build. `None` builds from conventions.
    fn join_column_declarations(
        &self,
        association: &ToOneAssociationMetadata,
    ) -> Result<Vec<Option<decl::JoinColumn>>> {
        let strict = self.association.cx().config().strict_declarations;

        match (&self.join_column, &self.join_columns) {
            (Some(_), Some(_)) if strict => Err(Error::invalid_mapping(format!(
                "`{}::{}` declares both a join column and a list of join columns",
                association.source_entity, association.field_name
            ))),
            (join_column, Some(decl::JoinColumns(join_columns))) => {
                if join_columns.is_empty() {
                    return Err(Error::invalid_mapping(format!(
                        "`{}::{}` declares an empty list of join columns",
                        association.source_entity, association.field_name
                    )));
                }

                if join_column.is_some() {
                    log::warn!(
                        "`{}::{}` declares both a join column and a list of join columns; \
                         using the list",
                        association.source_entity,
                        association.field_name
                    );
                }

                Ok(join_columns.iter().cloned().map(Some).collect())
            }
            (Some(join_column), None) => Ok(vec![Some(join_column.clone())]),
            (None, None) => Ok(vec![None]),
        }
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|value| !value.is_empty()).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::ResolverId;
    use crate::mapping::{CachePolicy, CacheUsage, FetchMode};
    use crate::Config;

    fn builder<'a>(
        cx: &'a MetadataBuildingContext,
        component: &ComponentMetadata,
        field_name: &str,
    ) -> ToOneAssociationMetadataBuilder<'a> {
        let mut builder = ToOneAssociationMetadataBuilder::new(cx);
        builder
            .with_component_metadata(component)
            .with_field_name(field_name);
        builder
    }

    fn cached(class_name: &str) -> ComponentMetadata {
        let mut component = ComponentMetadata::new(class_name);
        component.set_cache(Some(CachePolicy::new(
            class_name.to_lowercase(),
            CacheUsage::ReadOnly,
        )));
        component
    }

    #[test]
    fn many_to_one_by_convention() {
        let cx = MetadataBuildingContext::default();
        let order = ComponentMetadata::new("Order");

        let association = builder(&cx, &order, "customer")
            .with_many_to_one(decl::ManyToOne {
                cascade: vec![Cascade::Persist, Cascade::Persist],
                fetch: Some(FetchMode::Eager),
                ..decl::ManyToOne::new("Customer")
            })
            .build()
            .unwrap();

        assert_eq!(association.kind, ToOneKind::ManyToOne);
        assert_eq!(association.source_entity, "Order");
        assert_eq!(association.target_entity, "Customer");
        assert!(association.is_owning_side());
        assert!(!association.is_primary_key());
        assert_eq!(association.cascade, [Cascade::Persist]);
        assert_eq!(association.fetch, FetchMode::Eager);
        assert_eq!(association.join_columns.len(), 1);

        let join_column = &association.join_columns[0];
        assert_eq!(join_column.column_name, "customer_id");
        assert_eq!(join_column.referenced_column_name, "id");
        assert!(join_column.nullable);
        assert!(!join_column.unique);
        assert_eq!(join_column.ty.resolver(), Some(ResolverId(0)));
        assert_eq!(cx.pending_resolvers(), 1);
    }

    #[test]
    fn owning_one_to_one_is_unique() {
        let cx = MetadataBuildingContext::default();
        let user = ComponentMetadata::new("User");

        let association = builder(&cx, &user, "profile")
            .with_one_to_one(decl::OneToOne {
                cascade: vec![Cascade::All],
                ..decl::OneToOne::new("Profile")
            })
            .build()
            .unwrap();

        assert_eq!(association.kind, ToOneKind::OneToOne);
        assert!(association.join_columns[0].unique);
        assert_eq!(
            association.cascade,
            [Cascade::Persist, Cascade::Remove, Cascade::Refresh]
        );
    }

    #[test]
    fn inverse_one_to_one_has_no_join_columns() {
        let cx = MetadataBuildingContext::default();
        let user = ComponentMetadata::new("User");

        let association = builder(&cx, &user, "profile")
            .with_one_to_one(decl::OneToOne::new("Profile").mapped_by("user"))
            .build()
            .unwrap();

        assert!(!association.is_owning_side());
        assert_eq!(association.mapped_by.as_deref(), Some("user"));
        assert!(association.join_columns.is_empty());
        assert_eq!(cx.pending_resolvers(), 0);
    }

    #[test]
    fn join_columns_on_inverse_side() {
        let inverse = |cx: &MetadataBuildingContext| {
            builder(cx, &ComponentMetadata::new("User"), "profile")
                .with_one_to_one(decl::OneToOne::new("Profile").mapped_by("user"))
                .with_join_column_annotation(Some(decl::JoinColumn::new("profile_id", "id")))
                .build()
        };

        let strict = MetadataBuildingContext::default();
        let err = inverse(&strict).unwrap_err();
        assert!(err.is_invalid_mapping());
        assert_eq!(
            err.to_string(),
            "invalid mapping: inverse side `User::profile` declares join columns"
        );

        let lenient = MetadataBuildingContext::new(Config::new().strict_declarations(false));
        let association = inverse(&lenient).unwrap();
        assert!(association.join_columns.is_empty());
        assert_eq!(lenient.pending_resolvers(), 0);
    }

    #[test]
    fn inverse_side_cannot_be_identifier() {
        let cx = MetadataBuildingContext::default();
        let user = ComponentMetadata::new("User");

        let err = builder(&cx, &user, "profile")
            .with_one_to_one(decl::OneToOne::new("Profile").mapped_by("user"))
            .with_id_annotation(Some(decl::Id))
            .build()
            .unwrap_err();

        assert!(err.is_illegal_inverse_identifier_association());
        assert_eq!(err.class_name(), Some("User"));
        assert_eq!(err.field_name(), Some("profile"));
    }

    #[test]
    fn orphan_removal_is_checked_before_owning_side() {
        let cx = MetadataBuildingContext::default();
        let user = ComponentMetadata::new("User");

        let err = builder(&cx, &user, "profile")
            .with_one_to_one(
                decl::OneToOne::new("Profile")
                    .mapped_by("user")
                    .orphan_removal(true),
            )
            .with_id_annotation(Some(decl::Id))
            .build()
            .unwrap_err();

        assert!(err.is_illegal_orphan_removal_on_identifier_association());
    }

    #[test]
    fn cacheable_class_needs_cacheable_identifier_association() {
        let cx = MetadataBuildingContext::default();
        let line = cached("OrderLine");

        let mut builder = builder(&cx, &line, "order");
        builder
            .with_many_to_one(decl::ManyToOne::new("Order"))
            .with_id_annotation(Some(decl::Id));

        let err = builder.build().unwrap_err();
        assert!(err.is_non_cacheable_entity_association());
        assert_eq!(cx.pending_resolvers(), 0);

        let association = builder
            .with_cache_annotation(Some(decl::Cache::default()))
            .build()
            .unwrap();
        assert!(association.is_primary_key());
        assert_eq!(association.cache().unwrap().region, "orderline__order");
    }

    #[test]
    fn identifier_join_column_is_required() {
        let cx = MetadataBuildingContext::default();
        let line = ComponentMetadata::new("OrderLine");

        let association = builder(&cx, &line, "order")
            .with_many_to_one(decl::ManyToOne::new("Order"))
            .with_id_annotation(Some(decl::Id))
            .with_join_column_annotation(Some(decl::JoinColumn::new("order_id", "id")))
            .build()
            .unwrap();

        assert!(association.is_primary_key());
        assert!(!association.join_columns[0].nullable);
    }

    #[test]
    fn composite_identifier_association_is_rejected() {
        let cx = MetadataBuildingContext::default();
        let shipment = ComponentMetadata::new("Shipment");

        let err = builder(&cx, &shipment, "order")
            .with_many_to_one(decl::ManyToOne::new("Order"))
            .with_id_annotation(Some(decl::Id))
            .with_join_columns_annotation(Some(decl::JoinColumns(vec![
                decl::JoinColumn::new("order_region", "region"),
                decl::JoinColumn::new("order_number", "number"),
            ])))
            .build()
            .unwrap_err();

        assert!(err.is_composite_primary_key_as_foreign_id());
        assert_eq!(cx.pending_resolvers(), 0);
    }

    #[test]
    fn multi_column_declaration_keeps_order() {
        let cx = MetadataBuildingContext::default();
        let shipment = ComponentMetadata::new("Shipment");

        let association = builder(&cx, &shipment, "order")
            .with_many_to_one(decl::ManyToOne::new("Order"))
            .with_join_columns_annotation(Some(decl::JoinColumns(vec![
                decl::JoinColumn::new("order_region", "region"),
                decl::JoinColumn::new("order_number", "number"),
            ])))
            .build()
            .unwrap();

        let names: Vec<_> = association
            .join_columns
            .iter()
            .map(|join_column| join_column.column_name.as_str())
            .collect();
        assert_eq!(names, ["order_region", "order_number"]);
        assert_eq!(cx.pending_resolvers(), 2);
    }

    #[test]
    fn conflicting_declarations() {
        let conflicting = |cx: &MetadataBuildingContext| {
            builder(cx, &ComponentMetadata::new("Order"), "customer")
                .with_many_to_one(decl::ManyToOne::new("Customer"))
                .with_join_column_annotation(Some(decl::JoinColumn::new("single_id", "id")))
                .with_join_columns_annotation(Some(decl::JoinColumns(vec![
                    decl::JoinColumn::new("multi_id", "id"),
                ])))
                .build()
        };

        let strict = MetadataBuildingContext::default();
        assert!(conflicting(&strict).unwrap_err().is_invalid_mapping());

        let lenient = MetadataBuildingContext::new(Config::new().strict_declarations(false));
        let association = conflicting(&lenient).unwrap();
        assert_eq!(association.join_columns[0].column_name, "multi_id");
    }

    #[test]
    fn empty_join_columns_declaration() {
        let cx = MetadataBuildingContext::default();

        let err = builder(&cx, &ComponentMetadata::new("Order"), "customer")
            .with_many_to_one(decl::ManyToOne::new("Customer"))
            .with_join_columns_annotation(Some(decl::JoinColumns::default()))
            .build()
            .unwrap_err();

        assert!(err.is_invalid_mapping());
    }

    #[test]
    #[should_panic(expected = "without a relationship declaration")]
    fn build_without_relationship_panics() {
        let cx = MetadataBuildingContext::default();
        let _ = builder(&cx, &ComponentMetadata::new("Order"), "customer").build();
    }
}
