use crate::foundation::error::{StyleError, StyleResult};
use crate::host::Host;
use crate::poll::schedule::{PollOpts, PollSchedule};
use crate::snapshot::builder::build_snapshot;
use crate::snapshot::model::PanelSnapshot;
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

/// One poll tick's output.
#[derive(Clone, Debug)]
pub struct PollUpdate {
    /// Freshly built snapshot.
    pub snapshot: PanelSnapshot,
    /// Whether its signature differs from the previous tick's.
    pub changed: bool,
    /// Delay the loop will wait before the next tick.
    pub next_delay: Duration,
}

enum Msg {
    ForceRefresh,
    SetStyle(String),
    Stop,
}

/// Lock the shared host, recovering it if a previous holder panicked.
pub fn lock_host<H: ?Sized>(host: &Mutex<H>) -> MutexGuard<'_, H> {
    host.lock().unwrap_or_else(PoisonError::into_inner)
}

/// Start the adaptive poll loop on its own thread.
///
/// The first tick runs immediately. Each tick builds a snapshot for the requested style id,
/// hands it to `on_tick`, then adopts the snapshot's `current_style_id` as the id for the next
/// tick. The loop runs until the returned handle is stopped or dropped.
pub fn spawn_poll<H, F>(
    host: Arc<Mutex<H>>,
    opts: PollOpts,
    style_id: impl Into<String>,
    on_tick: F,
) -> StyleResult<PollHandle>
where
    H: Host + Send + ?Sized + 'static,
    F: FnMut(PollUpdate) + Send + 'static,
{
    opts.validate()?;
    let (tx, rx) = mpsc::channel::<Msg>();
    let requested = style_id.into();
    let join = std::thread::Builder::new()
        .name("layerstyle-poll".to_string())
        .spawn(move || run_loop(&host, opts, requested, on_tick, &rx))
        .map_err(|e| StyleError::Other(anyhow::Error::new(e).context("spawn poll thread")))?;
    Ok(PollHandle {
        tx,
        join: Some(join),
    })
}

fn run_loop<H, F>(
    host: &Mutex<H>,
    opts: PollOpts,
    mut requested: String,
    mut on_tick: F,
    rx: &mpsc::Receiver<Msg>,
) where
    H: Host + ?Sized,
    F: FnMut(PollUpdate),
{
    let mut schedule = PollSchedule::new(opts, Instant::now());
    loop {
        let snapshot = build_snapshot(&*lock_host(host), &requested);
        let now = Instant::now();
        let changed = schedule.observe(snapshot.layer_hash, now);
        let next_delay = schedule.next_delay(now);
        if changed {
            tracing::debug!(hash = %snapshot.layer_hash, "layer changed");
        }
        requested.clone_from(&snapshot.current_style_id);
        on_tick(PollUpdate {
            snapshot,
            changed,
            next_delay,
        });

        match rx.recv_timeout(next_delay) {
            Ok(Msg::ForceRefresh) => schedule.force_refresh(Instant::now()),
            Ok(Msg::SetStyle(id)) => {
                requested = id;
                schedule.force_refresh(Instant::now());
            }
            Err(RecvTimeoutError::Timeout) => {}
            Ok(Msg::Stop) | Err(RecvTimeoutError::Disconnected) => break,
        }
    }
    tracing::debug!("poll loop stopped");
}

/// Control handle of a running poll loop. Dropping it stops the loop and joins the thread.
pub struct PollHandle {
    tx: Sender<Msg>,
    join: Option<JoinHandle<()>>,
}

impl PollHandle {
    /// Poll now and return to the active interval.
    ///
    /// Call after a mutation completes; the next snapshot observes it.
    pub fn force_refresh(&self) {
        self.send(Msg::ForceRefresh);
    }

    /// Change the requested style id and poll now.
    pub fn set_style(&self, style_id: impl Into<String>) {
        self.send(Msg::SetStyle(style_id.into()));
    }

    /// Stop the loop and wait for its thread to finish.
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn send(&self, msg: Msg) {
        if self.tx.send(msg).is_err() {
            tracing::debug!("poll loop is no longer running");
        }
    }

    fn shutdown(&mut self) {
        let Some(join) = self.join.take() else {
            return;
        };
        let _ = self.tx.send(Msg::Stop);
        if join.join().is_err() {
            tracing::warn!("poll thread panicked");
        }
    }
}

impl Drop for PollHandle {
    fn drop(&mut self) {
        self.shutdown();
    }
}

#[cfg(test)]
#[path = "../../tests/unit/poll/worker.rs"]
mod tests;
