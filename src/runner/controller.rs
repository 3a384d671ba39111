use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

use reqwest::Client;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::info;

use crate::error::{AppError, AppResult, ValidationError};
use crate::metrics::{MeasurementStore, RunSummary, Snapshot};

use super::params::RunParameters;
use super::pool;

/// Lifecycle of a run. `Completed` and `Cancelled` are terminal until the
/// next start overwrites them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    Idle,
    Running,
    Completed,
    Cancelled,
}

impl RunState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            RunState::Idle => "idle",
            RunState::Running => "running",
            RunState::Completed => "completed",
            RunState::Cancelled => "cancelled",
        }
    }

    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, RunState::Completed | RunState::Cancelled)
    }
}

#[derive(Debug)]
struct ControllerShared {
    store: Arc<MeasurementStore>,
    state: Mutex<RunState>,
    cancel: Arc<AtomicBool>,
}

impl ControllerShared {
    fn set_state(&self, next: RunState) {
        *self
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = next;
    }

    fn state(&self) -> RunState {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Orchestrates one run end to end: validates the start, resets the store,
/// drives the pool in the background, and derives the summary once every
/// worker has joined.
#[derive(Debug)]
pub struct RunController {
    shared: Arc<ControllerShared>,
    handle: Mutex<Option<JoinHandle<RunSummary>>>,
}

impl Default for RunController {
    fn default() -> Self {
        Self::new()
    }
}

impl RunController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shared: Arc::new(ControllerShared {
                store: Arc::new(MeasurementStore::new()),
                state: Mutex::new(RunState::Idle),
                cancel: Arc::new(AtomicBool::new(false)),
            }),
            handle: Mutex::new(None),
        }
    }

    /// Starts a run in the background and returns immediately. Progress is
    /// observable through [`Self::snapshot`] and [`Self::completed`].
    ///
    /// Must be called from within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::RunInProgress`] when a run is already
    /// active; parameter validation itself happens in
    /// [`RunParameters::new`].
    pub fn start(&self, client: Client, params: RunParameters) -> Result<(), ValidationError> {
        {
            let mut state = self
                .shared
                .state
                .lock()
                .unwrap_or_else(PoisonError::into_inner);
            if *state == RunState::Running {
                return Err(ValidationError::RunInProgress);
            }
            self.shared.store.reset();
            self.shared.cancel.store(false, Ordering::SeqCst);
            *state = RunState::Running;
        }

        info!(
            "Starting test: {} requests of {} bytes across {} workers against {}",
            params.total_requests(),
            params.payload_size(),
            params.worker_count(),
            params.server_address()
        );

        let shared = Arc::clone(&self.shared);
        let started = Instant::now();
        let handle = tokio::spawn(async move {
            pool::run_pool(
                client,
                params,
                Arc::clone(&shared.store),
                Arc::clone(&shared.cancel),
            )
            .await;

            let elapsed = started.elapsed();
            let summary = RunSummary::from_snapshot(&shared.store.snapshot(), elapsed);
            shared.set_state(RunState::Completed);
            info!("Test completed in {:.2} seconds", summary.elapsed_secs);
            summary
        });

        *self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(handle);
        Ok(())
    }

    /// Requests a graceful wind-down: workers stop before their next request
    /// but in-flight requests run to completion. The run still joins and
    /// produces a summary.
    pub fn request_stop(&self) {
        let mut state = self
            .shared
            .state
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if *state == RunState::Running {
            self.shared.cancel.store(true, Ordering::SeqCst);
            *state = RunState::Cancelled;
            info!("Test stop requested...");
        }
    }

    #[must_use]
    pub fn state(&self) -> RunState {
        self.shared.state()
    }

    /// Live, consistent view of the aggregate for progress reporting.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.shared.store.snapshot()
    }

    /// Requests attempted so far; monotonically increasing during a run.
    #[must_use]
    pub fn completed(&self) -> u64 {
        self.shared.store.completed()
    }

    /// Awaits the active run and returns its summary.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::NoActiveRun`] when no run was started, or a
    /// join error if the background task failed.
    pub async fn wait(&self) -> AppResult<RunSummary> {
        let handle = self
            .handle
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take();
        let Some(handle) = handle else {
            return Err(AppError::validation(ValidationError::NoActiveRun));
        };
        Ok(handle.await?)
    }
}
