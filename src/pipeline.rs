//! Event wiring: dataset and viewport streams in, render passes out.
//!
//! A single background task subscribes to both streams. Any event arms a
//! debounce window, and further events restart it; when the window elapses
//! the latest dataset snapshot is paired with the latest viewport and run
//! through one filter-and-aggregate pass into the sink. The channels
//! conflate, so a burst of map interactions costs one pass over the newest
//! values, never a queue of stale ones.

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, Duration};
use tracing::{debug, error, info};

use crate::aggregate::aggregate;
use crate::constants::DEFAULT_DEBOUNCE_MS;
use crate::render::RenderSink;
use crate::store::HexagonSnapshot;
use crate::viewport::Viewport;
use crate::visibility::filter_visible;

/// Everything a pipeline needs to run.
pub struct PipelineProps<S: RenderSink> {
    /// Dataset snapshots from the store.
    pub hexagons: watch::Receiver<HexagonSnapshot>,
    /// Viewport snapshots from the map collaborator.
    pub viewport: watch::Receiver<Option<Viewport>>,
    /// Where finished passes are drawn.
    pub sink: S,
    /// Quiet window between the last event and the pass it triggers.
    pub debounce: Duration,
}

impl<S: RenderSink> PipelineProps<S> {
    /// Props with the standard debounce window.
    pub fn new(
        hexagons: watch::Receiver<HexagonSnapshot>,
        viewport: watch::Receiver<Option<Viewport>>,
        sink: S,
    ) -> Self {
        Self {
            hexagons,
            viewport,
            sink,
            debounce: Duration::from_millis(DEFAULT_DEBOUNCE_MS),
        }
    }
}

/// Handle to a running pipeline task.
pub struct PipelineHandle {
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl PipelineHandle {
    /// Stops the pipeline and waits for it to wind down.
    ///
    /// After this resolves no further pass runs and the sink is not touched
    /// again. Dropping the handle without calling this stops the task too,
    /// without waiting.
    pub async fn shutdown(self) {
        let _ = self.shutdown.send(true);
        let _ = self.task.await;
    }

    /// Whether the task has already wound down on its own.
    pub fn is_finished(&self) -> bool {
        self.task.is_finished()
    }
}

/// The background worker driving render passes.
pub struct OverlayPipeline<S: RenderSink> {
    hexagons: watch::Receiver<HexagonSnapshot>,
    viewport: watch::Receiver<Option<Viewport>>,
    sink: S,
    debounce: Duration,
    shutdown: watch::Receiver<bool>,
}

impl<S: RenderSink + Send + 'static> OverlayPipeline<S> {
    /// Spawns the pipeline task and returns its handle.
    pub fn spawn(props: PipelineProps<S>) -> PipelineHandle {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let worker = OverlayPipeline {
            hexagons: props.hexagons,
            viewport: props.viewport,
            sink: props.sink,
            debounce: props.debounce,
            shutdown: shutdown_rx,
        };

        let task = tokio::spawn(worker.run());
        PipelineHandle {
            shutdown: shutdown_tx,
            task,
        }
    }

    async fn run(mut self) {
        info!(
            debounce_ms = self.debounce.as_millis() as u64,
            "overlay pipeline started"
        );

        // Both channels replay their current value, so a fresh pipeline owes
        // one pass right away: the first window is armed at startup.
        let mut pending = true;

        loop {
            if !pending {
                tokio::select! {
                    biased;

                    _ = self.shutdown.changed() => break,

                    changed = self.hexagons.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        pending = true;
                    }

                    changed = self.viewport.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        pending = true;
                    }
                }
            }

            if !self.debounce_quiet_window().await {
                break;
            }

            self.render_pass();
            pending = false;
        }

        info!("overlay pipeline stopped");
    }

    /// Waits until no event has arrived for a full debounce window.
    ///
    /// Returns false when the pipeline should stop instead of firing.
    async fn debounce_quiet_window(&mut self) -> bool {
        loop {
            let window = time::sleep(self.debounce);
            tokio::pin!(window);

            tokio::select! {
                biased;

                _ = self.shutdown.changed() => return false,

                changed = self.hexagons.changed() => {
                    if changed.is_err() {
                        return false;
                    }
                    // restart the window
                }

                changed = self.viewport.changed() => {
                    if changed.is_err() {
                        return false;
                    }
                }

                _ = &mut window => return true,
            }
        }
    }

    /// One filter + aggregate + draw cycle over the latest snapshots.
    fn render_pass(&mut self) {
        let hexagons = self.hexagons.borrow_and_update().clone();
        let viewport = *self.viewport.borrow_and_update();

        let (bounds, zoom) = match viewport {
            Some(viewport) => (Some(viewport.bounds), viewport.zoom),
            None => (None, 0.0),
        };

        let visible = filter_visible(&hexagons, bounds.as_ref());
        match aggregate(&visible, zoom) {
            Ok(cells) => {
                self.sink.clear();
                for cell in &cells {
                    self.sink.draw(cell);
                }
                debug!(
                    hexagons = hexagons.len(),
                    visible = visible.len(),
                    cells = cells.len(),
                    zoom,
                    "overlay pass rendered"
                );
            }
            Err(error) => {
                // The sink is untouched: the previous frame stays up
                error!(%error, "overlay pass failed");
            }
        }
    }
}
