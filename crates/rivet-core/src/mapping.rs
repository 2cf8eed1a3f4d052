//! Association mapping metadata.

mod association;
pub use association::{Cascade, FetchMode, ToOneAssociationMetadata, ToOneKind};

mod cache;
pub use cache::{CachePolicy, CacheUsage};

mod component;
pub use component::{Column, ComponentMetadata, Property};

mod field;
pub use field::FieldMetadata;

mod join_column;
pub use join_column::JoinColumnMetadata;

mod schema;
pub use schema::Schema;

mod ty;
pub use ty::{DataType, Type};
