pub mod clock;
pub mod key;
pub mod ttl_cache;

pub use clock::{Clock, ManualClock, SystemClock};
pub use key::{cache_key, fingerprint, CacheNamespace};
pub use ttl_cache::{CacheEntry, CacheStats, TtlCache, DEFAULT_MAX_ITEMS, DEFAULT_TTL_SECONDS};
