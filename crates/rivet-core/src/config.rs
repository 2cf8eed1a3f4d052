use crate::mapping::CacheUsage;
use crate::naming::{DefaultNamingStrategy, NamingStrategy};

use std::sync::Arc;

/// Settings for one mapping compilation pass.
#[derive(Debug, Clone)]
pub struct Config {
    /// Derives join column names the mapping leaves out
    pub(crate) naming: Arc<dyn NamingStrategy + Send + Sync>,

    /// Usage of cache declarations that do not name one
    pub(crate) default_cache_usage: CacheUsage,

    /// If set, a field declaring both a single join column and a list of join
    /// columns is rejected. Otherwise the list wins.
    pub(crate) strict_declarations: bool,
}

impl Config {
    pub fn new() -> Self {
        Self {
            naming: Arc::new(DefaultNamingStrategy),
            default_cache_usage: CacheUsage::ReadOnly,
            strict_declarations: true,
        }
    }

    pub fn naming(mut self, naming: impl NamingStrategy + Send + Sync + 'static) -> Self {
        self.naming = Arc::new(naming);
        self
    }

    pub fn default_cache_usage(mut self, usage: CacheUsage) -> Self {
        self.default_cache_usage = usage;
        self
    }

    pub fn strict_declarations(mut self, strict: bool) -> Self {
        self.strict_declarations = strict;
        self
    }

    pub fn naming_strategy(&self) -> &(dyn NamingStrategy + Send + Sync) {
        &*self.naming
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
