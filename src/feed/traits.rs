use crate::model::{ArticleRecord, FeedError};

#[async_trait::async_trait]
pub trait FeedSource: Send + Sync {
    /// Fetches the current feed. Articles come back in feed order.
    async fn articles(&self) -> Result<Vec<ArticleRecord>, FeedError>;
}
