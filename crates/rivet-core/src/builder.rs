//! Builders turning per-field declarations into mapping metadata.
//!
//! Builders are configured with chained `with_*` calls and then produce a new
//! value from `build()`. They can be reconfigured and built again, one field
//! after another.

mod association;
pub use association::AssociationMetadataBuilder;

mod cache;
pub use cache::CacheMetadataBuilder;

mod join_column;
pub use join_column::JoinColumnMetadataBuilder;

mod to_one;
pub use to_one::ToOneAssociationMetadataBuilder;
