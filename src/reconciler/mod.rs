// Reconciler module: merges candidates into the dataset under the one-record-per-address rule.

pub mod dataset;

pub use dataset::Dataset;

use crate::geocoder::Geocoder;
use crate::model::{CandidateRecord, Coordinates, FinalizedRecord, GeocodeError};
use chrono::NaiveDate;
use std::ops::AddAssign;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{sleep, sleep_until, timeout, Instant};
use tracing::{debug, info, warn};

/// Outcome of one resolver call.
#[derive(Debug)]
pub enum Resolution {
    Resolved(Coordinates),
    Unresolved,
    Fault(GeocodeError),
}

/// What happened to one candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileStep {
    Known,
    Added,
    Unresolved,
    Faulted,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReconcileReport {
    pub added: usize,
    pub known: usize,
    pub unresolved: usize,
    pub faulted: usize,
}

impl ReconcileReport {
    fn record(&mut self, step: ReconcileStep) {
        match step {
            ReconcileStep::Known => self.known += 1,
            ReconcileStep::Added => self.added += 1,
            ReconcileStep::Unresolved => self.unresolved += 1,
            ReconcileStep::Faulted => self.faulted += 1,
        }
    }
}

impl AddAssign for ReconcileReport {
    fn add_assign(&mut self, other: Self) {
        self.added += other.added;
        self.known += other.known;
        self.unresolved += other.unresolved;
        self.faulted += other.faulted;
    }
}

/// Drives the geocoder for candidates the dataset does not know yet.
///
/// Resolver calls are strictly sequential. Each one is bounded by
/// `timeout`, and consecutive calls are at least `politeness` apart, also
/// across separate `reconcile` calls. Candidates that are already known
/// never touch the resolver and never wait.
pub struct Reconciler {
    geocoder: Arc<dyn Geocoder>,
    timeout: Duration,
    politeness: Duration,
    today: NaiveDate,
    last_call: Option<Instant>,
}

impl Reconciler {
    /// `today` is stamped on every record added through this reconciler.
    pub fn new(geocoder: Arc<dyn Geocoder>, timeout: Duration, politeness: Duration, today: NaiveDate) -> Self {
        Self {
            geocoder,
            timeout,
            politeness,
            today,
            last_call: None,
        }
    }

    /// Consumes `dataset` and hands back its extension. Records are only
    /// ever appended, so the result is a superset of the input.
    pub async fn reconcile<I>(&mut self, candidates: I, mut dataset: Dataset) -> (Dataset, ReconcileReport)
    where
        I: IntoIterator<Item = CandidateRecord>,
    {
        let mut report = ReconcileReport::default();
        for candidate in candidates {
            let step = self.reconcile_one(candidate, &mut dataset).await;
            report.record(step);
        }
        (dataset, report)
    }

    async fn reconcile_one(&mut self, candidate: CandidateRecord, dataset: &mut Dataset) -> ReconcileStep {
        if dataset.contains(&candidate.address_text) {
            debug!(address = %candidate.address_text, "already known");
            return ReconcileStep::Known;
        }

        match self.resolve(&candidate.address_text).await {
            Resolution::Resolved(coords) => {
                info!(
                    name = %candidate.name,
                    address = %candidate.address_text,
                    lat = coords.lat,
                    lon = coords.lon,
                    "new restaurant"
                );
                dataset.insert(FinalizedRecord::from_candidate(candidate, coords, self.today));
                ReconcileStep::Added
            }
            Resolution::Unresolved => {
                debug!(address = %candidate.address_text, "no geocoding match");
                ReconcileStep::Unresolved
            }
            Resolution::Fault(e) => {
                warn!(address = %candidate.address_text, error = %e, "geocoding failed");
                ReconcileStep::Faulted
            }
        }
    }

    /// One bounded resolver call, after waiting out the politeness delay.
    pub async fn resolve(&mut self, address: &str) -> Resolution {
        if let Some(last) = self.last_call {
            match last.checked_add(self.politeness) {
                Some(due) => sleep_until(due).await,
                None => sleep(self.politeness).await,
            }
        }

        let outcome = timeout(self.timeout, self.geocoder.geocode(address)).await;
        self.last_call = Some(Instant::now());

        match outcome {
            Ok(Ok(Some(coords))) => Resolution::Resolved(coords),
            Ok(Ok(None)) => Resolution::Unresolved,
            Ok(Err(e)) => Resolution::Fault(e),
            Err(_) => Resolution::Fault(GeocodeError::Timeout(self.timeout)),
        }
    }
}
