//! Configuration types for the EntityStore.

/// Configuration for an `EntityStore`.
#[derive(Debug, Clone, Default)]
pub struct StoreConfig {
    /// Skip rows that fail to decode into the entity type instead of failing
    /// the whole fetch.
    ///
    /// Defaults to `false`: a malformed row turns the fetch into a fetch error
    /// and the previous list is kept.
    pub skip_invalid_rows: bool,
}

impl StoreConfig {
    /// A config that drops undecodable rows (each one is logged at `warn`).
    pub fn lenient() -> Self {
        Self {
            skip_invalid_rows: true,
        }
    }
}
