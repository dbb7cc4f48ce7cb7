//! Validates translate requests and runs each accepted one as its own task.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use stran_common::{language_name, TabId};
use stran_config::{SettingsProvider, SettingsSnapshot};
use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tracing::{debug, error, warn};

use crate::bridge::BridgeReply;
use crate::job::{AsyncJob, JobCompletion, JobHandle};
use crate::{TranslateError, TranslationClient, TranslationRequest};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Translation bridge between page script and background workers.
///
/// Lives on the control thread. Workers never touch browser state: they
/// only send a [`JobCompletion`] back, which the owner collects with
/// [`drain_completed`](Self::drain_completed).
pub struct JobDispatcher {
    client: Arc<dyn TranslationClient>,
    settings: Arc<dyn SettingsProvider>,
    runtime: Handle,
    timeout: Duration,
    completion_tx: mpsc::UnboundedSender<JobCompletion>,
    completion_rx: mpsc::UnboundedReceiver<JobCompletion>,
    in_flight: Arc<AtomicUsize>,
}

impl JobDispatcher {
    pub fn new(
        client: Arc<dyn TranslationClient>,
        settings: Arc<dyn SettingsProvider>,
        runtime: Handle,
    ) -> Self {
        let (completion_tx, completion_rx) = mpsc::unbounded_channel();
        Self {
            client,
            settings,
            runtime,
            timeout: DEFAULT_TIMEOUT,
            completion_tx,
            completion_rx,
            in_flight: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Accept or reject a translate request from the page in `origin`.
    ///
    /// Rejection is synchronous and creates no job. On acceptance the
    /// settings are captured now; later changes do not reach this job.
    pub fn translate(&self, origin: TabId, text: &str) -> Result<JobHandle, TranslateError> {
        if text.is_empty() {
            return Err(TranslateError::Validation("No text provided".into()));
        }

        let snapshot = self.settings.snapshot();
        if !snapshot.has_api_key() {
            return Err(TranslateError::Validation("No API key provided".into()));
        }

        let job = AsyncJob::new(origin, text.to_owned());
        let handle = JobHandle {
            id: job.id().clone(),
        };

        debug!(
            job = %handle.id,
            tab_id = %origin,
            target = %snapshot.target_language,
            chars = text.chars().count(),
            "translation job accepted"
        );

        self.in_flight.fetch_add(1, Ordering::SeqCst);
        let client = Arc::clone(&self.client);
        let tx = self.completion_tx.clone();
        let in_flight = Arc::clone(&self.in_flight);
        let timeout = self.timeout;
        let handle_id = handle.id.clone();

        // The inner task is the panic boundary: a client that panics still
        // yields exactly one completion.
        self.runtime.spawn(async move {
            let worker =
                tokio::spawn(async move { run_job(job, client.as_ref(), snapshot, timeout).await });
            let completion = match worker.await {
                Ok(completion) => completion,
                Err(e) => {
                    error!(job = %handle_id, error = %e, "translation worker aborted");
                    JobCompletion::abandoned(
                        handle_id,
                        origin,
                        TranslateError::Transport("translation worker panicked".into()),
                    )
                }
            };
            in_flight.fetch_sub(1, Ordering::SeqCst);
            if tx.send(completion).is_err() {
                debug!("dispatcher dropped before job completed");
            }
        });

        Ok(handle)
    }

    /// [`translate`](Self::translate) folded into the page-facing reply.
    pub fn handle_request(&self, origin: TabId, text: &str) -> BridgeReply {
        match self.translate(origin, text) {
            Ok(handle) => handle.reply(),
            Err(e) => BridgeReply::Rejected {
                error: e.to_string(),
            },
        }
    }

    /// Number of jobs whose terminal event has not been produced yet.
    pub fn in_flight(&self) -> usize {
        self.in_flight.load(Ordering::SeqCst)
    }

    /// Every completion produced since the last call. Never blocks.
    pub fn drain_completed(&mut self) -> Vec<JobCompletion> {
        let mut completed = Vec::new();
        while let Ok(completion) = self.completion_rx.try_recv() {
            completed.push(completion);
        }
        completed
    }

    /// Wait for the next completion.
    pub async fn next_completed(&mut self) -> Option<JobCompletion> {
        self.completion_rx.recv().await
    }
}

async fn run_job(
    job: AsyncJob,
    client: &dyn TranslationClient,
    snapshot: SettingsSnapshot,
    timeout: Duration,
) -> JobCompletion {
    let Some(language) = language_name(&snapshot.target_language) else {
        warn!(job = %job.id(), code = %snapshot.target_language, "unknown target language");
        return job.finish(Err(TranslateError::UnknownLanguage(
            snapshot.target_language,
        )));
    };

    let request = TranslationRequest {
        text: job.input().to_owned(),
        api_key: snapshot.api_key,
        language_name: language,
    };

    let result = match tokio::time::timeout(timeout, client.translate(&request)).await {
        Ok(result) => result,
        Err(_) => Err(TranslateError::Timeout(timeout)),
    };

    match &result {
        Ok(_) => debug!(job = %job.id(), "translation job completed"),
        Err(e) => warn!(job = %job.id(), error = %e, "translation job failed"),
    }

    job.finish(result)
}
