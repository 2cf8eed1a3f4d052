use pretty_assertions::assert_eq;
use rivet_core::decl;
use rivet_core::mapping::{CachePolicy, CacheUsage, ComponentMetadata, FieldMetadata, Type};
use rivet_core::{MetadataBuildingContext, ToOneAssociationMetadataBuilder};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn entity(class_name: &str) -> ComponentMetadata {
    let mut component = ComponentMetadata::new(class_name);
    component
        .add_field(FieldMetadata::new("id", Type::Integer(8)), Some(decl::Id))
        .unwrap();
    component
}

fn order_line_builder<'a>(
    cx: &'a MetadataBuildingContext,
    line: &ComponentMetadata,
) -> ToOneAssociationMetadataBuilder<'a> {
    let mut builder = ToOneAssociationMetadataBuilder::new(cx);
    builder
        .with_component_metadata(line)
        .with_field_name("order")
        .with_many_to_one(decl::ManyToOne::new("Order"))
        .with_id_annotation(Some(decl::Id))
        .with_join_column_annotation(Some(decl::JoinColumn::new("order_id", "id")));
    builder
}

#[test]
fn order_line_identified_by_order() {
    init_logging();

    let cx = MetadataBuildingContext::default();
    let mut line = ComponentMetadata::new("OrderLine");
    line.add_field(FieldMetadata::new("line_number", Type::Integer(4)), Some(decl::Id))
        .unwrap();

    let association = order_line_builder(&cx, &line).build().unwrap();
    assert!(association.is_primary_key());
    assert!(association.is_owning_side());

    line.add_association(association).unwrap();
    assert_eq!(line.identifier(), ["line_number", "order"]);

    cx.register_component(line).unwrap();
    cx.register_component(entity("Order")).unwrap();

    let schema = cx.resolve().unwrap();
    let line = schema.component("OrderLine").unwrap();
    assert_eq!(line.identifier_columns(), ["line_number", "order_id"]);

    let join_column = &schema.association("OrderLine", "order").unwrap().join_columns()[0];
    assert_eq!(join_column.column_name(), "order_id");
    assert_eq!(join_column.referenced_column_name(), "id");
    assert!(!join_column.is_nullable());
    assert_eq!(join_column.ty(), Some(&Type::Integer(8)));
}

#[test]
fn orphan_removal_on_identifier_association() {
    init_logging();

    let cx = MetadataBuildingContext::default();
    let line = ComponentMetadata::new("OrderLine");

    let err = order_line_builder(&cx, &line)
        .with_one_to_one(decl::OneToOne::new("Order").orphan_removal(true))
        .build()
        .unwrap_err();

    assert!(err.is_illegal_orphan_removal_on_identifier_association());
    assert_eq!(err.class_name(), Some("OrderLine"));
    assert_eq!(err.field_name(), Some("order"));
    assert_eq!(
        err.to_string(),
        "illegal orphan removal on identifier association `OrderLine::order`"
    );
    assert_eq!(cx.pending_resolvers(), 0);
}

#[test]
fn inverse_identifier_association() {
    init_logging();

    let cx = MetadataBuildingContext::default();
    let line = ComponentMetadata::new("OrderLine");

    let err = order_line_builder(&cx, &line)
        .with_one_to_one(decl::OneToOne::new("Order").mapped_by("line"))
        .build()
        .unwrap_err();

    assert!(err.is_illegal_inverse_identifier_association());
}

#[test]
fn cacheable_entity_with_non_cacheable_identifier_association() {
    init_logging();

    let cx = MetadataBuildingContext::default();
    let mut line = ComponentMetadata::new("OrderLine");
    line.set_cache(Some(CachePolicy::new("order_lines", CacheUsage::ReadWrite)));

    let err = order_line_builder(&cx, &line).build().unwrap_err();
    assert!(err.is_non_cacheable_entity_association());
    assert_eq!(
        err.to_string(),
        "entity `OrderLine` is cacheable but its identifier association `order` is not"
    );

    let association = order_line_builder(&cx, &line)
        .with_cache_annotation(Some(decl::Cache::new(CacheUsage::ReadWrite)))
        .build()
        .unwrap();
    assert!(association.is_primary_key());
    assert_eq!(
        association.cache(),
        Some(&CachePolicy::new("orderline__order", CacheUsage::ReadWrite))
    );
}

#[test]
fn identifier_association_needs_a_single_join_column() {
    init_logging();

    let cx = MetadataBuildingContext::default();
    let shipment = ComponentMetadata::new("Shipment");

    let composite = decl::JoinColumns(vec![
        decl::JoinColumn::new("order_region", "region"),
        decl::JoinColumn::new("order_number", "number"),
    ]);

    let mut builder = ToOneAssociationMetadataBuilder::new(&cx);
    builder
        .with_component_metadata(&shipment)
        .with_field_name("order")
        .with_many_to_one(decl::ManyToOne::new("Order"))
        .with_id_annotation(Some(decl::Id))
        .with_join_columns_annotation(Some(composite));

    let err = builder.build().unwrap_err();
    assert!(err.is_composite_primary_key_as_foreign_id());
    assert_eq!(
        err.to_string(),
        "cannot map `Shipment::order` as a foreign identifier: target `Order` \
         is referenced through more than one join column"
    );

    let association = builder
        .with_join_columns_annotation(Some(decl::JoinColumns(vec![decl::JoinColumn::new(
            "order_id", "id",
        )])))
        .build()
        .unwrap();
    assert!(association.is_primary_key());
    assert_eq!(association.join_columns().len(), 1);
    assert_eq!(cx.pending_resolvers(), 1);
}

#[test]
fn identifier_registration_is_idempotent() {
    let mut line = ComponentMetadata::new("OrderLine");

    assert!(line.add_identifier("order"));
    assert!(line.add_identifier("line_number"));
    assert!(!line.add_identifier("order"));

    assert_eq!(line.identifier(), ["order", "line_number"]);
}

#[test]
fn rebuilding_an_identifier_association_registers_it_once() {
    init_logging();

    let cx = MetadataBuildingContext::default();
    let line = ComponentMetadata::new("OrderLine");
    let builder = order_line_builder(&cx, &line);

    let first = builder.build().unwrap();
    let second = builder.build().unwrap();
    assert_eq!(first.join_columns()[0].column_name(), second.join_columns()[0].column_name());

    let mut registered = line.clone();
    registered.add_association(first).unwrap();
    assert!(registered.add_association(second).unwrap_err().is_invalid_mapping());
    assert_eq!(registered.identifier(), ["order"]);
}
