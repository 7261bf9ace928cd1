//! Event mailbox feeding the watchface
//!
//! Wall-clock ticks and sub-tick timer expiries arrive from two different
//! platform services. Both are posted into one [`EventQueue`] and drained by
//! the single loop that owns the [`Watchface`](crate::watchface::Watchface),
//! so face state is never touched from two places at once. The queue is
//! built on an `embassy-sync` channel with a no-op mutex: everything runs on
//! one executor.

use embassy_sync::blocking_mutex::raw::NoopRawMutex;
use embassy_sync::channel::Channel;
use log::warn;

use crate::animation::RunId;
use crate::error::{SpindleError, SpindleResult};
use crate::time::{TimeUnits, WallClock};

/// Default mailbox capacity
pub const EVENT_QUEUE_CAPACITY: usize = 8;

/// Input to the watchface state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WatchEvent {
    /// The tick service reports that `units` rolled over at `time`
    TimeChanged { time: WallClock, units: TimeUnits },
    /// A one-shot timer issued for `RunId` expired
    SubTick(RunId),
}

/// Fixed-capacity FIFO of [`WatchEvent`]s.
pub struct EventQueue<const N: usize = EVENT_QUEUE_CAPACITY> {
    channel: Channel<NoopRawMutex, WatchEvent, N>,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    pub const fn new() -> Self {
        Self {
            channel: Channel::new(),
        }
    }

    /// Enqueue an event, failing if the mailbox is full.
    pub fn post(&self, event: WatchEvent) -> SpindleResult<()> {
        self.channel.try_send(event).map_err(|_| {
            warn!("Event queue full, dropping {:?}", event);
            SpindleError::EventQueueFull { capacity: N }
        })
    }

    /// Oldest pending event.
    pub fn next(&self) -> Option<WatchEvent> {
        self.channel.try_receive().ok()
    }

    pub fn len(&self) -> usize {
        self.channel.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channel.is_empty()
    }
}
