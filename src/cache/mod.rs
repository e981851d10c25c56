// Cache module.
// Time-bounded storage for repository fetch results, in memory or on disk.

pub mod clock;
pub mod file;
pub mod paths;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use file::FileCache;
pub use store::{CacheEntry, CacheStore, MemoryCache, REPO_CACHE_TTL};
