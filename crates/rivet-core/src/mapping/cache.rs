/// Cache settings of a class or an association. Absence means "not
/// cacheable".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachePolicy {
    /// Name of the cache region entries are stored in
    pub region: String,

    pub usage: CacheUsage,
}

/// Concurrency strategy of a cache region.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum CacheUsage {
    #[default]
    ReadOnly,
    NonstrictReadWrite,
    ReadWrite,
}

impl CachePolicy {
    pub fn new(region: impl Into<String>, usage: CacheUsage) -> Self {
        Self {
            region: region.into(),
            usage,
        }
    }
}
