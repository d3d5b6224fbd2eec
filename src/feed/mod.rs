// Feed module: where articles come from.

pub mod rss;
pub mod traits;

pub use rss::RssFeed;
pub use traits::FeedSource;
