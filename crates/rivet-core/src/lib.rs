pub mod builder;
pub use builder::{
    AssociationMetadataBuilder, CacheMetadataBuilder, JoinColumnMetadataBuilder,
    ToOneAssociationMetadataBuilder,
};

mod config;
pub use config::Config;

pub mod context;
pub use context::MetadataBuildingContext;

pub mod decl;

mod error;
pub use error::Error;

pub mod mapping;
pub use mapping::Schema;

pub mod naming;
pub use naming::NamingStrategy;

mod verify;

/// A Result type alias that uses rivet's [`Error`] type.
pub type Result<T> = core::result::Result<T, Error>;
