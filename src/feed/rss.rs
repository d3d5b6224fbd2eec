use crate::feed::traits::FeedSource;
use crate::model::{ArticleRecord, FeedError};
use feed_rs::model::Entry;
use reqwest::Client;
use std::time::Duration;
use tracing::info;

pub struct RssFeed {
    client: Client,
    url: String,
}

impl RssFeed {
    pub fn new(url: &str, user_agent: &str, timeout: Duration) -> Result<Self, FeedError> {
        let client = Client::builder()
            .user_agent(user_agent)
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            url: url.to_string(),
        })
    }
}

#[async_trait::async_trait]
impl FeedSource for RssFeed {
    async fn articles(&self) -> Result<Vec<ArticleRecord>, FeedError> {
        let response = self.client.get(&self.url).send().await?;

        if !response.status().is_success() {
            return Err(FeedError::Status(response.status()));
        }

        let bytes = response.bytes().await?;
        let articles = parse_feed(&bytes)?;
        info!(feed_url = %self.url, items = articles.len(), "feed parsed");
        Ok(articles)
    }
}

/// Parses RSS/Atom bytes into article records.
pub fn parse_feed(bytes: &[u8]) -> Result<Vec<ArticleRecord>, FeedError> {
    let feed = feed_rs::parser::parse(bytes)?;
    Ok(feed.entries.into_iter().map(to_article).collect())
}

fn to_article(entry: Entry) -> ArticleRecord {
    let title = entry
        .title
        .map(|t| t.content)
        .filter(|t| !t.trim().is_empty())
        .unwrap_or_else(|| "Untitled".to_string());

    let body = entry.content.and_then(|c| c.body).unwrap_or_default();

    ArticleRecord {
        title,
        published: entry.published.or(entry.updated),
        body,
    }
}
