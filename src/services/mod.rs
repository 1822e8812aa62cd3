// Service exports
pub mod cache;
pub mod remote;
pub mod source;

pub use cache::{CacheKey, FeedCache};
pub use remote::RemoteFeedClient;
pub use source::{FeedSource, FeedSupplier, SourceError};
