//! Per-question countdown.
//!
//! Each armed countdown is a tokio task tagged with the epoch it was
//! started under. It emits one `Tick` per second and exactly one `Expired`
//! when it runs out, then stops on its own. Consumers compare the event
//! epoch against their current one, so an event from a cancelled or
//! superseded countdown is discarded instead of firing a phantom
//! transition.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerEvent {
    Tick { epoch: u64 },
    Expired { epoch: u64 },
}

impl TimerEvent {
    pub const fn epoch(self) -> u64 {
        match self {
            TimerEvent::Tick { epoch } | TimerEvent::Expired { epoch } => epoch,
        }
    }
}

#[derive(Debug)]
pub struct QuestionTimer {
    epoch: u64,
    handle: JoinHandle<()>,
}

impl QuestionTimer {
    /// Arms a countdown of `secs` seconds. Events land on `events`; the
    /// task exits after `Expired` or when the receiver goes away.
    pub fn start(epoch: u64, secs: u32, events: mpsc::Sender<TimerEvent>) -> Self {
        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(1));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first interval tick completes immediately; consume it so
            // the countdown starts a full second out.
            interval.tick().await;

            for _ in 0..secs {
                interval.tick().await;
                if events.send(TimerEvent::Tick { epoch }).await.is_err() {
                    return;
                }
            }
            let _ = events.send(TimerEvent::Expired { epoch }).await;
        });

        Self { epoch, handle }
    }

    pub const fn epoch(&self) -> u64 {
        self.epoch
    }

    pub fn cancel(&self) {
        self.handle.abort();
    }
}

impl Drop for QuestionTimer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
