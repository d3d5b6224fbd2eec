// One batch run: feed -> extractor -> reconciler
use crate::extractor::Extractor;
use crate::feed::FeedSource;
use crate::model::FeedError;
use crate::reconciler::{Dataset, ReconcileReport, Reconciler};
use tracing::{info, warn};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub articles: usize,
    pub extraction_faults: usize,
    pub candidates: usize,
    pub reconcile: ReconcileReport,
}

/// Processes every article in the feed, one at a time, and returns the
/// grown dataset. Nothing is persisted here; a feed fault ends the run
/// before any dataset is handed back.
pub async fn run(
    feed: &dyn FeedSource,
    extractor: &Extractor,
    reconciler: &mut Reconciler,
    mut dataset: Dataset,
) -> Result<(Dataset, RunSummary), FeedError> {
    let articles = feed.articles().await?;
    info!("Fetched {} articles", articles.len());

    let mut summary = RunSummary::default();
    for article in articles {
        summary.articles += 1;

        let candidates = match extractor.extract(&article) {
            Ok(candidates) => candidates,
            Err(e) => {
                warn!(title = %article.title, error = %e, "skipping article");
                summary.extraction_faults += 1;
                continue;
            }
        };
        info!(
            title = %article.title,
            published = ?article.published,
            candidates = candidates.len(),
            "extracted"
        );
        summary.candidates += candidates.len();

        let (grown, report) = reconciler.reconcile(candidates, dataset).await;
        dataset = grown;
        summary.reconcile += report;
    }

    Ok((dataset, summary))
}
