use pretty_assertions::assert_eq;
use rivet_core::decl;
use rivet_core::mapping::{ComponentMetadata, FieldMetadata, Type};
use rivet_core::{MetadataBuildingContext, ToOneAssociationMetadataBuilder};

use std::thread;

const CLASSES: usize = 16;

fn class_name(index: usize) -> String {
    format!("Node{index}")
}

/// Builds `Node{index}`, which points at the next node and is typed by a
/// differently sized integer so every resolved type is distinguishable.
fn build_node(cx: &MetadataBuildingContext, index: usize) {
    let mut node = ComponentMetadata::new(class_name(index));
    node.add_field(
        FieldMetadata::new("id", Type::Integer(index as u8 + 1)),
        Some(decl::Id),
    )
    .unwrap();

    let next = ToOneAssociationMetadataBuilder::new(cx)
        .with_component_metadata(&node)
        .with_field_name("next")
        .with_many_to_one(decl::ManyToOne::new(class_name((index + 1) % CLASSES)))
        .build()
        .unwrap();
    node.add_association(next).unwrap();

    cx.register_component(node).unwrap();
}

#[test]
fn classes_built_on_separate_threads() {
    let _ = env_logger::builder().is_test(true).try_init();

    let cx = MetadataBuildingContext::default();

    thread::scope(|s| {
        for index in 0..CLASSES {
            let cx = &cx;
            s.spawn(move || build_node(cx, index));
        }
    });

    assert_eq!(cx.pending_resolvers(), CLASSES);

    let schema = cx.resolve().unwrap();
    assert_eq!(schema.components().count(), CLASSES);

    for index in 0..CLASSES {
        let join_column = &schema
            .association(&class_name(index), "next")
            .unwrap()
            .join_columns()[0];

        let next = (index + 1) % CLASSES;
        assert_eq!(join_column.ty(), Some(&Type::Integer(next as u8 + 1)));
    }
}
