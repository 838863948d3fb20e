//! Outbound data sources used by network-backed tools.
//!
//! ```rust
//! use sfetch::{FetchErrorKind, JokeFilter};
//!
//! let filter = JokeFilter::safe();
//! assert_eq!(filter.category(), "Programming");
//! assert!(filter.query_pairs().iter().any(|(key, _)| key == "blacklistFlags"));
//! assert_ne!(FetchErrorKind::RemoteFormat, FetchErrorKind::RemoteUnavailable);
//! ```

mod error;
mod fetcher;
mod filter;
mod transport;

pub use error::{FetchError, FetchErrorKind};
pub use fetcher::{JOKE_API_BASE_URL, JokeFetcher};
pub use filter::{JokeFilter, SAFE_BLACKLIST_FLAGS};
pub use transport::{HttpJokeTransport, JokeTransport, TransportFuture};
