use std::collections::HashMap;
use std::sync::Arc;

use sha2::{Digest, Sha256};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::audio::features::AnalysisResult;
use crate::config::Config;
use crate::error::AnalysisError;

/// Content fingerprint of an upload: SHA-256 over the raw bytes, hex
/// encoded. Identical uploads always map to the same cache entry.
pub fn fingerprint(bytes: &[u8]) -> String {
    format!("{:x}", Sha256::digest(bytes))
}

/// Where a job stands, as seen by a polling caller.
#[derive(Debug, Clone)]
pub enum JobStatus {
    Processing,
    Complete(Arc<AnalysisResult>),
    Error(String),
    NotFound,
}

/// Outcome of submitting an upload.
#[derive(Debug, Clone)]
pub enum Submitted {
    /// A previous run already analyzed these exact bytes; the result is
    /// returned synchronously.
    Cached(Arc<AnalysisResult>),
    /// A new run was dispatched; poll [`JobRunner::status`] with this id.
    Accepted(Uuid),
}

/// Dispatches analysis runs off the caller's path and caches results by
/// content fingerprint.
///
/// Create one per process and share it. Runs execute on the blocking
/// thread pool; callers poll for completion. The job table and cache
/// live for the life of the process and are never evicted. Cache writes
/// are insert-if-absent, so concurrent identical uploads may race to
/// compute but converge on one entry.
#[derive(Clone)]
pub struct JobRunner {
    config: Config,
    jobs: Arc<RwLock<HashMap<Uuid, JobStatus>>>,
    cache: Arc<RwLock<HashMap<String, Arc<AnalysisResult>>>>,
}

impl JobRunner {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            jobs: Arc::new(RwLock::new(HashMap::new())),
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Submit raw upload bytes for analysis.
    ///
    /// Empty payloads are rejected up front — no job is created for them.
    /// A fingerprint hit returns the cached result synchronously; anything
    /// else dispatches a background run and returns its job id.
    pub async fn submit(&self, bytes: Vec<u8>) -> Result<Submitted, AnalysisError> {
        if bytes.is_empty() {
            return Err(AnalysisError::Decode("empty payload".into()));
        }

        let fp = fingerprint(&bytes);
        if let Some(hit) = self.cache.read().await.get(&fp).cloned() {
            log::debug!("cache hit for fingerprint {fp}");
            return Ok(Submitted::Cached(hit));
        }

        let id = Uuid::new_v4();
        self.jobs.write().await.insert(id, JobStatus::Processing);

        let jobs = Arc::clone(&self.jobs);
        let cache = Arc::clone(&self.cache);
        let config = self.config.clone();

        tokio::spawn(async move {
            let outcome =
                tokio::task::spawn_blocking(move || crate::analyze_bytes(bytes, &config)).await;

            let status = match outcome {
                Ok(Ok(result)) => {
                    let result = Arc::new(result);
                    // Insert-if-absent: a racing run for the same bytes
                    // computed the same value, keep whichever landed first.
                    cache
                        .write()
                        .await
                        .entry(fp)
                        .or_insert_with(|| Arc::clone(&result));
                    JobStatus::Complete(result)
                }
                Ok(Err(e)) => {
                    log::warn!("analysis job {id} failed: {e}");
                    JobStatus::Error(e.to_string())
                }
                Err(e) => {
                    log::error!("analysis job {id} aborted: {e}");
                    JobStatus::Error("analysis aborted unexpectedly".into())
                }
            };

            jobs.write().await.insert(id, status);
        });

        Ok(Submitted::Accepted(id))
    }

    /// Current state of a job. Each job has a single writer (its own run);
    /// completion becomes visible to pollers when the run's final write
    /// lands.
    pub async fn status(&self, id: Uuid) -> JobStatus {
        self.jobs
            .read()
            .await
            .get(&id)
            .cloned()
            .unwrap_or(JobStatus::NotFound)
    }

    /// Read-through cache lookup by fingerprint.
    pub async fn cached(&self, fp: &str) -> Option<Arc<AnalysisResult>> {
        self.cache.read().await.get(fp).cloned()
    }
}
