//! Scheduler service built on tokio-cron-scheduler.
//!
//! Jobs are registered with a cron expression and the timezone it is read
//! in, and tracked by metadata so the host can list what is scheduled.

use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use tokio::sync::{Mutex, RwLock};
use tokio_cron_scheduler::{Job, JobScheduler};
use tracing::{debug, info, warn};
use uuid::Uuid;

/// Type alias for job identifiers (same as tokio-cron-scheduler's `JobId`).
pub type JobId = Uuid;

/// Cron-based job scheduler with job metadata tracking.
pub struct SchedulerService {
    scheduler: Arc<Mutex<JobScheduler>>,
    jobs: Arc<RwLock<HashMap<JobId, JobMetadata>>>,
    is_running: Arc<RwLock<bool>>,
}

/// Metadata for a scheduled job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobMetadata {
    /// Job identifier.
    pub id: JobId,
    /// Human-readable name.
    pub name: String,
    /// Six-field cron expression (seconds first).
    pub cron_expression: String,
    /// Timezone the expression is evaluated in.
    pub timezone: Tz,
    /// What the job does.
    pub description: Option<String>,
}

impl SchedulerService {
    /// Creates a scheduler that is not yet running.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying scheduler cannot be created.
    pub async fn new() -> Result<Self> {
        let scheduler = JobScheduler::new()
            .await
            .context("Failed to create JobScheduler")?;

        debug!("JobScheduler created");

        Ok(Self {
            scheduler: Arc::new(Mutex::new(scheduler)),
            jobs: Arc::new(RwLock::new(HashMap::new())),
            is_running: Arc::new(RwLock::new(false)),
        })
    }

    /// Starts processing scheduled jobs.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler fails to start.
    pub async fn start(&self) -> Result<()> {
        let mut is_running = self.is_running.write().await;
        if *is_running {
            warn!("Scheduler is already running");
            return Ok(());
        }

        self.scheduler
            .lock()
            .await
            .start()
            .await
            .context("Failed to start scheduler")?;

        *is_running = true;
        info!("Scheduler started");
        Ok(())
    }

    /// Stops the scheduler.
    ///
    /// # Errors
    ///
    /// Returns an error if the scheduler fails to shut down cleanly.
    pub async fn stop(&self) -> Result<()> {
        let mut is_running = self.is_running.write().await;
        if !*is_running {
            warn!("Scheduler is not running");
            return Ok(());
        }

        self.scheduler
            .lock()
            .await
            .shutdown()
            .await
            .context("Failed to shutdown scheduler")?;

        *is_running = false;
        info!("Scheduler stopped");
        Ok(())
    }

    /// Whether the scheduler is running.
    pub async fn is_running(&self) -> bool {
        *self.is_running.read().await
    }

    /// Adds a job that runs `job_fn` whenever `cron_expression` fires in `timezone`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cron expression is invalid or the job cannot be added.
    pub async fn add_job<F, Fut>(
        &self,
        name: &str,
        cron_expression: &str,
        timezone: Tz,
        description: Option<String>,
        job_fn: F,
    ) -> Result<JobId>
    where
        F: Fn() -> Fut + Send + Sync + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let job = Job::new_async_tz(cron_expression, timezone, move |_uuid, _scheduler| {
            let run = job_fn();
            Box::pin(async move {
                run.await;
            })
        })
        .with_context(|| format!("Invalid cron expression for job {name}: {cron_expression}"))?;

        let job_id = self
            .scheduler
            .lock()
            .await
            .add(job)
            .await
            .with_context(|| format!("Failed to add job {name} to scheduler"))?;

        let metadata = JobMetadata {
            id: job_id,
            name: name.to_string(),
            cron_expression: cron_expression.to_string(),
            timezone,
            description,
        };
        self.jobs.write().await.insert(job_id, metadata);

        info!(job = name, cron = cron_expression, %timezone, "Scheduled job");
        Ok(job_id)
    }

    /// Every scheduled job.
    pub async fn list_jobs(&self) -> Vec<JobMetadata> {
        self.jobs.read().await.values().cloned().collect()
    }

    /// Metadata for one job.
    pub async fn get_job(&self, job_id: JobId) -> Option<JobMetadata> {
        self.jobs.read().await.get(&job_id).cloned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const SHANGHAI: Tz = chrono_tz::Asia::Shanghai;

    #[tokio::test]
    async fn test_scheduler_start_stop() {
        let scheduler = SchedulerService::new().await.unwrap();
        assert!(!scheduler.is_running().await);

        scheduler.start().await.unwrap();
        assert!(scheduler.is_running().await);

        scheduler.stop().await.unwrap();
        assert!(!scheduler.is_running().await);
    }

    #[tokio::test]
    async fn test_add_job_records_metadata() {
        let scheduler = SchedulerService::new().await.unwrap();
        let counter = Arc::new(AtomicUsize::new(0));
        let counter_clone = counter.clone();

        let job_id = scheduler
            .add_job("daily_reset", "0 0 21 * * *", SHANGHAI, Some("Reset".to_string()), move || {
                let counter = counter_clone.clone();
                async move {
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            })
            .await
            .unwrap();

        let metadata = scheduler.get_job(job_id).await.unwrap();
        assert_eq!(metadata.name, "daily_reset");
        assert_eq!(metadata.cron_expression, "0 0 21 * * *");
        assert_eq!(metadata.timezone, SHANGHAI);
        assert_eq!(scheduler.list_jobs().await.len(), 1);
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_invalid_cron_expression() {
        let scheduler = SchedulerService::new().await.unwrap();
        let result = scheduler
            .add_job("broken", "not a cron", SHANGHAI, None, || async {})
            .await;
        assert!(result.is_err());
        assert!(scheduler.list_jobs().await.is_empty());
    }
}
