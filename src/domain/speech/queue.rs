use super::error::SpeechServiceError;
use super::language::LanguageCode;
use super::service::SpeechService;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};
use uuid::Uuid;

/// One unit of asynchronous synthesis work. Processed by exactly one
/// worker; the id is the caller's only handle on the result.
#[derive(Debug, Clone)]
pub struct SynthesisJob {
    pub id: Uuid,
    pub text: String,
    pub language: LanguageCode,
}

/// Explicit queue in front of a fixed pool of synthesis workers.
///
/// Enqueueing never blocks the caller; the worker count bounds how many
/// jobs synthesize concurrently. Dropping the queue closes the channel
/// and the workers drain and exit.
pub struct SynthesisQueue {
    tx: mpsc::UnboundedSender<SynthesisJob>,
}

impl SynthesisQueue {
    /// Create the queue and its receiving end. Workers are attached with
    /// [`Self::spawn_workers`] once the service that owns this queue
    /// exists.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<SynthesisJob>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Spawn `workers` tasks draining the queue through `service`.
    pub fn spawn_workers(
        workers: usize,
        rx: mpsc::UnboundedReceiver<SynthesisJob>,
        service: Arc<SpeechService>,
    ) {
        let rx = Arc::new(Mutex::new(rx));
        for worker_id in 0..workers.max(1) {
            let rx = rx.clone();
            let service = service.clone();
            tokio::spawn(async move {
                tracing::debug!(worker_id, "synthesis worker started");
                loop {
                    // Hold the lock only while waiting for the next job
                    let job = rx.lock().await.recv().await;
                    let Some(job) = job else {
                        tracing::debug!(worker_id, "synthesis queue closed, worker exiting");
                        break;
                    };

                    let job_id = job.id;
                    tracing::info!(worker_id, job_id = %job_id, "synthesis job started");
                    // No retry: a failed job stays permanently non-ready
                    if let Err(error) = service.run_job(job).await {
                        tracing::error!(
                            worker_id,
                            job_id = %job_id,
                            error = %error,
                            "synthesis job failed"
                        );
                    } else {
                        tracing::info!(worker_id, job_id = %job_id, "synthesis job completed");
                    }
                }
            });
        }
    }

    pub fn enqueue(&self, job: SynthesisJob) -> Result<(), SpeechServiceError> {
        self.tx.send(job).map_err(|_| {
            SpeechServiceError::Dependency("synthesis queue is closed".to_string())
        })
    }
}
