// JSON-file request cache
// Keeps API calls down across runs: URL in, response body out

pub mod cache;

pub use cache::{CacheError, RequestCache};
