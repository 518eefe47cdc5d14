use crate::border_data::SectionBorderData;
use crate::core::work_timer::WorkTimer;
use crate::core::SmallKeyHashMap;
use crate::section_key::SectionKey;

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;

/// Identifies one load cycle of one section. A section gets a new stamp every time it is loaded after being unloaded, so a
/// result computed during an earlier cycle can be told apart from a current one.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct LoadStamp(pub u64);

impl LoadStamp {
    /// Never issued to a loaded section.
    pub const NOT_LOADED: Self = Self(0);
}

/// The only state shared between the owner thread and worker tasks. Everything in here is guarded by one lock.
#[derive(Default)]
pub(crate) struct CalculationInbox {
    /// Finished results waiting for the next merge pass, with the load cycle they were computed for.
    pub pending_additions: SmallKeyHashMap<SectionKey, (LoadStamp, SectionBorderData)>,
    /// Keys that have been handed to a worker and haven't reported back yet, with the load cycle of the latest dispatch.
    pub queued_for_calculation: SmallKeyHashMap<SectionKey, LoadStamp>,
    /// Bumped whenever the worker pool is torn down. Tasks spawned under an older epoch are ignored.
    pub epoch: u64,
    /// Results discarded at hand-off because their key had been unloaded or dispatched again since.
    pub stale_discarded: u64,
    pub timer: WorkTimer,
}

impl CalculationInbox {
    pub fn publish(
        &mut self,
        key: SectionKey,
        stamp: LoadStamp,
        data: SectionBorderData,
        cpu_time: Duration,
    ) {
        self.pending_additions.insert(key, (stamp, data));
        self.queued_for_calculation.remove(&key);
        self.timer.complete_item(cpu_time);
    }

    /// True iff the latest dispatch of `key` was made under `stamp`.
    fn is_current(&self, key: SectionKey, stamp: LoadStamp) -> bool {
        self.queued_for_calculation.get(&key) == Some(&stamp)
    }

    /// Forget all in-flight work. Tasks that are still running will find their epoch stale.
    pub fn invalidate(&mut self) {
        self.epoch += 1;
        self.pending_additions.clear();
        self.queued_for_calculation.clear();
    }
}

pub(crate) type SharedInbox = Arc<Mutex<CalculationInbox>>;

/// How a worker task reports back to the [`BorderCache`](crate::BorderCache) that spawned it.
///
/// Every method holds the inbox lock only for a couple of O(1) collection operations.
#[derive(Clone)]
pub(crate) struct CompletionHandle {
    inbox: SharedInbox,
    epoch: u64,
}

impl CompletionHandle {
    pub fn new(inbox: SharedInbox, epoch: u64) -> Self {
        Self { inbox, epoch }
    }

    /// Publishes `data` for the next merge pass and releases the queue slot for `key`, unless the key has been dispatched
    /// again under a newer load cycle or is no longer queued at all.
    pub fn result_ready(
        &self,
        key: SectionKey,
        stamp: LoadStamp,
        data: SectionBorderData,
        cpu_time: Duration,
    ) {
        let mut inbox = self.inbox.lock();
        if inbox.epoch != self.epoch {
            log::trace!("Discarding border result for {:?} from a shut down pool", key);
            return;
        }
        if inbox.is_current(key, stamp) {
            inbox.publish(key, stamp, data, cpu_time);
        } else {
            log::trace!("Discarding border result for {:?} from an earlier load", key);
            inbox.timer.complete_item(cpu_time);
            inbox.stale_discarded += 1;
        }
    }

    /// The calculation blew up. Releasing the queue slot lets a later frame try again.
    pub fn calculation_failed(&self, key: SectionKey, stamp: LoadStamp) {
        let mut inbox = self.inbox.lock();
        if inbox.epoch != self.epoch {
            return;
        }
        if inbox.is_current(key, stamp) {
            inbox.queued_for_calculation.remove(&key);
        }
        inbox.timer.fail_item();
    }

    /// The calculation was cancelled before it produced anything.
    pub fn calculation_abandoned(&self, key: SectionKey, stamp: LoadStamp) {
        let mut inbox = self.inbox.lock();
        if inbox.epoch != self.epoch {
            return;
        }
        if inbox.is_current(key, stamp) {
            inbox.queued_for_calculation.remove(&key);
        }
    }
}
