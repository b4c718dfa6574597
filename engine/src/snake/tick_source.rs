use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

/// One timer firing. `generation` identifies the arm that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tick {
    pub generation: u64,
}

/// The session's only periodic timer.
///
/// Arming always cancels the previous timer first, and ticks carry the
/// generation of the arm that produced them, so a tick already queued by a
/// cancelled timer can be told apart and dropped.
pub struct TickSource {
    sender: mpsc::UnboundedSender<Tick>,
    handle: Option<JoinHandle<()>>,
    generation: u64,
    period: Option<Duration>,
}

impl TickSource {
    pub fn new(sender: mpsc::UnboundedSender<Tick>) -> Self {
        Self {
            sender,
            handle: None,
            generation: 0,
            period: None,
        }
    }

    /// Must be called from within a tokio runtime.
    pub fn arm(&mut self, period: Duration) {
        self.cancel();
        self.generation += 1;
        self.period = Some(period);

        let sender = self.sender.clone();
        let generation = self.generation;
        self.handle = Some(tokio::spawn(async move {
            let mut timer = interval_at(Instant::now() + period, period);
            timer.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                timer.tick().await;
                if sender.send(Tick { generation }).is_err() {
                    break;
                }
            }
        }));
    }

    /// Safe to call any number of times.
    pub fn cancel(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
        }
        self.period = None;
    }

    pub fn is_armed(&self) -> bool {
        self.handle.is_some()
    }

    pub fn period(&self) -> Option<Duration> {
        self.period
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn accepts(&self, tick: Tick) -> bool {
        self.is_armed() && tick.generation == self.generation
    }
}

impl Drop for TickSource {
    fn drop(&mut self) {
        self.cancel();
    }
}
