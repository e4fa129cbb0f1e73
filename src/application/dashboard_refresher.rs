// Dashboard refresher - Periodic fetch, correlate and render of stream tiles
use crate::application::feed_source::{FeedError, FeedSource};
use crate::application::tile_container::{TileContainer, TileElement, TileRenderer};
use crate::domain::tile::correlate;
use chrono::{DateTime, Utc};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;
use tokio::sync::oneshot;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CycleOutcome {
    /// The container now holds `tiles` freshly rendered tiles
    Rendered { tiles: usize },
    /// A feed failed; the container was left as it was
    Failed,
    /// Another cycle was still running
    Skipped,
}

/// Running totals, shown on the console page
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RefreshStatus {
    pub rendered: u64,
    pub failed: u64,
    pub skipped: u64,
    pub last_rendered_at: Option<DateTime<Utc>>,
    pub last_error: Option<String>,
}

pub struct DashboardRefresher {
    source: Arc<dyn FeedSource>,
    container: Arc<dyn TileContainer>,
    renderer: Arc<dyn TileRenderer>,
    in_flight: AtomicBool,
    status: Mutex<RefreshStatus>,
}

impl DashboardRefresher {
    pub fn new(
        source: Arc<dyn FeedSource>,
        container: Arc<dyn TileContainer>,
        renderer: Arc<dyn TileRenderer>,
    ) -> Self {
        Self {
            source,
            container,
            renderer,
            in_flight: AtomicBool::new(false),
            status: Mutex::new(RefreshStatus::default()),
        }
    }

    /// Run one fetch-correlate-render pass.
    ///
    /// Feed errors stop the pass before anything is rendered and are only
    /// logged; they never reach the caller. A call made while another pass is
    /// still running returns [`CycleOutcome::Skipped`] without touching either
    /// feed.
    pub async fn refresh_cycle(&self) -> CycleOutcome {
        let Some(_guard) = InFlightGuard::acquire(&self.in_flight) else {
            tracing::debug!("previous refresh still in flight, skipping tick");
            self.update_status(|s| s.skipped += 1);
            return CycleOutcome::Skipped;
        };

        match self.render_latest().await {
            Ok(tiles) => {
                tracing::debug!(
                    container = self.container.container_id(),
                    tiles,
                    "rendered stream tiles"
                );
                self.update_status(|s| {
                    s.rendered += 1;
                    s.last_rendered_at = Some(Utc::now());
                    s.last_error = None;
                });
                CycleOutcome::Rendered { tiles }
            }
            Err(e) => {
                tracing::warn!(
                    endpoint = e.endpoint(),
                    error = %e,
                    "refresh failed, keeping previous tiles"
                );
                self.update_status(|s| {
                    s.failed += 1;
                    s.last_error = Some(e.to_string());
                });
                CycleOutcome::Failed
            }
        }
    }

    async fn render_latest(&self) -> Result<usize, FeedError> {
        let streams = self.source.fetch_streams().await?;
        let metrics = self.source.fetch_metrics().await?;

        let tiles = correlate(&streams, &metrics);
        let children: Vec<TileElement> = tiles.iter().map(|t| self.renderer.render(t)).collect();
        self.container.replace_children(children);

        Ok(tiles.len())
    }

    /// Refresh now, then once every `period` until the handle is stopped.
    ///
    /// Each tick's cycle runs on its own task so a slow fetch does not push
    /// back the schedule; overlapping ticks are skipped by
    /// [`refresh_cycle`](Self::refresh_cycle). Cycle tasks belong to the
    /// scheduler, so once [`RefreshHandle::stop`] returns nothing renders.
    ///
    /// # Panics
    ///
    /// If `period` is zero.
    pub fn start(self: Arc<Self>, period: Duration) -> RefreshHandle {
        assert!(!period.is_zero(), "refresh period must be non-zero");

        let (stop_tx, mut stop_rx) = oneshot::channel::<()>();

        let task = tokio::spawn(async move {
            tracing::info!(period_ms = period.as_millis() as u64, "dashboard refresh started");

            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            let mut cycles = JoinSet::new();

            loop {
                tokio::select! {
                    _ = &mut stop_rx => break,
                    _ = ticker.tick() => {
                        let refresher = self.clone();
                        cycles.spawn(async move {
                            refresher.refresh_cycle().await;
                        });
                    }
                    Some(joined) = cycles.join_next(), if !cycles.is_empty() => {
                        if let Err(e) = joined {
                            tracing::error!(error = %e, "refresh cycle task failed");
                        }
                    }
                }
            }

            // an aborted cycle is dropped at a fetch, before it can render
            cycles.abort_all();
            while cycles.join_next().await.is_some() {}

            tracing::info!("dashboard refresh stopped");
        });

        RefreshHandle {
            stop: Some(stop_tx),
            task,
        }
    }

    pub fn status(&self) -> RefreshStatus {
        self.status.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn update_status(&self, f: impl FnOnce(&mut RefreshStatus)) {
        let mut status = self.status.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut status);
    }
}

/// Owns the running refresh schedule. Dropping the handle also ends the
/// schedule; `stop` additionally waits until the scheduler and every cycle
/// it started have finished.
pub struct RefreshHandle {
    stop: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

impl RefreshHandle {
    pub async fn stop(mut self) {
        if let Some(stop) = self.stop.take() {
            let _ = stop.send(());
        }
        if let Err(e) = (&mut self.task).await {
            tracing::error!(error = %e, "refresh scheduler task ended abnormally");
        }
    }
}

struct InFlightGuard<'a>(&'a AtomicBool);

impl<'a> InFlightGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
