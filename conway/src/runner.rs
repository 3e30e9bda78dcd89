//! Continuous stepping on a background task
//!
//! A `Runner` owns a small tokio runtime and at most one stepping loop. The
//! loop advances the shared grid, notifies an optional observer, then sleeps
//! for the configured interval. The sleep races a oneshot stop signal, so
//! `stop()` takes effect without waiting out the interval.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use log::{debug, info, warn};
use tokio::runtime::Runtime;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::task::JoinHandle;

use crate::config::LifeConfig;
use crate::error::Result;
use crate::grid::Grid;

/// Grid shared between the control thread and the stepping loop
pub type SharedGrid = Arc<Mutex<Grid>>;

/// Called with the new generation number after every automatic step
pub type StepObserver = Arc<dyn Fn(u64) + Send + Sync>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunState {
    #[default]
    Idle,
    Running,
}

/// Wrap a grid for use with a `Runner`
pub fn shared(grid: Grid) -> SharedGrid {
    Arc::new(Mutex::new(grid))
}

/// Lock the grid, recovering it if a previous holder panicked.
///
/// `Grid::step` swaps its buffers only after the next generation is fully
/// written, so a poisoned grid is still a whole generation.
pub fn lock_grid(grid: &SharedGrid) -> MutexGuard<'_, Grid> {
    grid.lock().unwrap_or_else(PoisonError::into_inner)
}

struct RunningTask {
    stop: oneshot::Sender<()>,
    handle: JoinHandle<()>,
}

pub struct Runner {
    grid: SharedGrid,
    interval: Duration,
    runtime: Runtime,
    task: Option<RunningTask>,
    on_step: Option<StepObserver>,
}

impl Runner {
    pub fn new(grid: SharedGrid, config: &LifeConfig) -> Result<Self> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("conway-runner")
            .enable_time()
            .build()?;

        Ok(Self {
            grid,
            interval: config.interval,
            runtime,
            task: None,
            on_step: None,
        })
    }

    pub fn grid(&self) -> &SharedGrid {
        &self.grid
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn state(&self) -> RunState {
        if self.task.is_some() {
            RunState::Running
        } else {
            RunState::Idle
        }
    }

    pub fn is_running(&self) -> bool {
        self.state() == RunState::Running
    }

    /// Register the observer for automatic steps. Applies from the next `start()`.
    pub fn set_on_step<F>(&mut self, observer: F)
    where
        F: Fn(u64) + Send + Sync + 'static,
    {
        self.on_step = Some(Arc::new(observer));
    }

    /// Begin stepping in the background. Ignored while already running.
    pub fn start(&mut self) {
        if self.task.is_some() {
            debug!("start ignored: runner already running");
            return;
        }

        let (stop, stop_rx) = oneshot::channel();
        let handle = self.runtime.spawn(run_loop(
            Arc::clone(&self.grid),
            self.interval,
            stop_rx,
            self.on_step.clone(),
        ));
        self.task = Some(RunningTask { stop, handle });
        info!("runner started, interval {:?}", self.interval);
    }

    /// Stop the background loop and wait for it to exit.
    ///
    /// When this returns no further automatic steps will happen. Ignored while idle.
    pub fn stop(&mut self) {
        let Some(task) = self.task.take() else {
            return;
        };

        // The loop may already have exited on its own; nothing to signal then.
        let _ = task.stop.send(());
        if let Err(e) = self.runtime.block_on(task.handle) {
            warn!("runner loop ended abnormally: {e}");
        }
        info!("runner stopped at generation {}", lock_grid(&self.grid).generation());
    }

    /// Advance exactly one generation from the caller's thread.
    ///
    /// Only valid while idle; returns `false` without stepping otherwise.
    pub fn step_once(&mut self) -> bool {
        if self.is_running() {
            warn!("step_once ignored while running");
            return false;
        }
        lock_grid(&self.grid).step();
        true
    }
}

impl Drop for Runner {
    fn drop(&mut self) {
        self.stop();
    }
}

async fn run_loop(
    grid: SharedGrid,
    interval: Duration,
    mut stop: oneshot::Receiver<()>,
    on_step: Option<StepObserver>,
) {
    loop {
        if !matches!(stop.try_recv(), Err(TryRecvError::Empty)) {
            break;
        }

        let generation = {
            let mut grid = lock_grid(&grid);
            grid.step();
            grid.generation()
        };
        if let Some(notify) = &on_step {
            notify(generation);
        }

        tokio::select! {
            biased;
            _ = &mut stop => break,
            _ = tokio::time::sleep(interval) => {}
        }
    }
    debug!("runner loop exited");
}
