// ── Query cache ──
//
// Keyed, time-aware cache for query results, plus the key builders each
// resource family uses to address its entries.

mod key;
mod store;

pub use key::{QueryKey, Resource, ResourceKeys};
pub use store::{CacheEvent, QueryCache};
