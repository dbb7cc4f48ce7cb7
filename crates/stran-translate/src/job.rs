//! One background translation request and its terminal result.

use stran_common::{JobId, TabId};

use crate::bridge::{BridgeEvent, BridgeReply};
use crate::TranslateError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Running,
    Succeeded(String),
    Failed(String),
}

impl JobState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, JobState::Running)
    }
}

/// A job owned by its worker task from spawn until its completion is sent.
#[derive(Debug)]
pub struct AsyncJob {
    id: JobId,
    origin: TabId,
    input: String,
    state: JobState,
}

impl AsyncJob {
    pub(crate) fn new(origin: TabId, input: String) -> Self {
        Self {
            id: JobId::new(),
            origin,
            input,
            state: JobState::Running,
        }
    }

    pub fn id(&self) -> &JobId {
        &self.id
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn state(&self) -> &JobState {
        &self.state
    }

    /// Move to a terminal state and hand the job's result off.
    ///
    /// Consumes the job, so a job can finish only once.
    pub(crate) fn finish(mut self, result: Result<String, TranslateError>) -> JobCompletion {
        let outcome = match result {
            Ok(text) => JobOutcome::Succeeded(text),
            Err(e) => JobOutcome::Failed(e.to_string()),
        };
        self.state = match &outcome {
            JobOutcome::Succeeded(text) => JobState::Succeeded(text.clone()),
            JobOutcome::Failed(message) => JobState::Failed(message.clone()),
        };
        tracing::trace!(job = %self.id, state = ?self.state, "job finished");
        JobCompletion {
            job: self.id,
            origin: self.origin,
            outcome,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobOutcome {
    Succeeded(String),
    Failed(String),
}

/// Terminal event of a job, marshalled back to the control thread.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCompletion {
    pub job: JobId,
    /// Tab whose page asked for the translation.
    pub origin: TabId,
    pub outcome: JobOutcome,
}

impl JobCompletion {
    /// Terminal event for a job whose worker died before finishing it.
    pub(crate) fn abandoned(job: JobId, origin: TabId, error: TranslateError) -> Self {
        Self {
            job,
            origin,
            outcome: JobOutcome::Failed(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.outcome, JobOutcome::Succeeded(_))
    }

    pub fn to_bridge_event(&self) -> BridgeEvent {
        match &self.outcome {
            JobOutcome::Succeeded(text) => BridgeEvent::Translated {
                worker: self.job.clone(),
                translated_text: text.clone(),
            },
            JobOutcome::Failed(error) => BridgeEvent::Failed {
                worker: self.job.clone(),
                error: error.clone(),
            },
        }
    }
}

/// Acknowledgement that a job was accepted. Not the result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobHandle {
    pub id: JobId,
}

impl JobHandle {
    pub fn reply(&self) -> BridgeReply {
        BridgeReply::Accepted {
            worker: self.id.clone(),
        }
    }
}
