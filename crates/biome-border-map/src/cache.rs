mod inbox;
mod worker_pool;

use inbox::{CalculationInbox, CompletionHandle, LoadStamp, SharedInbox};
use worker_pool::WorkerPool;

use crate::border_data::SectionBorderData;
use crate::calculator::SectionBorderCalculator;
use crate::config::CacheConfig;
use crate::core::work_timer::WorkTimer;
use crate::core::{SmallKeyHashMap, SmallKeyHashSet};
use crate::neighbors::is_ready_for_calculation;
use crate::section_key::SectionKey;
use crate::world::BiomeSource;

use std::sync::Arc;
use std::time::Duration;

/// # Border Cache
///
/// Tracks which sections are loaded, schedules border calculation for sections that are ready, and serves finished results to
/// the renderer.
///
/// ## Threading
///
/// The cache is owned by a single thread (usually the render thread) which performs every load, unload, query and dispatch
/// through `&mut self`. The loaded set and the ready cache are only ever touched by that thread, so cache hits never lock.
///
/// Worker tasks run on a [`rayon`] pool and only talk to the owner through a lock-guarded inbox of finished results plus the
/// set of keys still being calculated. Once per frame, [`BorderCache::query_and_dispatch`] takes that lock to merge finished
/// results and queue new work in one pass, so a result is always visible before the dispatch decision for its key is made.
///
/// ## Lifecycle of a key
///
/// 1. [`section_loaded`](BorderCache::section_loaded) adds it to the loaded set.
/// 2. When visible, loaded, and surrounded by fully generated neighbors, it is queued and handed to one worker.
/// 3. The worker's result waits in the inbox until the next merge pass moves it into the ready cache, unless the section was
///    unloaded in the meantime, in which case the result is dropped. This holds even if the section was loaded again before
///    the result arrived: every load starts a new cycle, and the new cycle gets a calculation of its own.
/// 4. [`section_unloaded`](BorderCache::section_unloaded) removes it from both the loaded set and the ready cache. A key in the
///    ready cache is never recalculated until this happens.
///
/// The worker pool is created on first dispatch (or by [`start`](BorderCache::start)) and torn down by
/// [`shutdown`](BorderCache::shutdown). Any operation is valid after shutdown; the next dispatch creates a fresh pool.
pub struct BorderCache {
    config: CacheConfig,

    // Owner thread only.
    loaded_sections: SmallKeyHashMap<SectionKey, LoadStamp>,
    last_load_stamp: u64,
    ready_sections: SmallKeyHashMap<SectionKey, SectionBorderData>,
    dispatched: u64,
    stale_dropped: u64,

    // Shared with worker tasks.
    inbox: SharedInbox,
    pool: Option<WorkerPool>,
}

/// A snapshot of the cache's bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CacheStats {
    pub loaded: usize,
    pub ready: usize,
    pub queued: usize,
    pub pending: usize,
    /// Tasks spawned since the cache was created.
    pub dispatched: u64,
    /// Results dropped because their section had been unloaded since the calculation was dispatched.
    pub stale_dropped: u64,
    /// Worker time since the last [`BorderCache::take_work_timer`].
    pub work: WorkTimer,
    pub pool_running: bool,
}

impl BorderCache {
    pub fn new(config: CacheConfig) -> Self {
        Self {
            config,
            loaded_sections: Default::default(),
            last_load_stamp: LoadStamp::NOT_LOADED.0,
            ready_sections: Default::default(),
            dispatched: 0,
            stale_dropped: 0,
            inbox: Default::default(),
            pool: None,
        }
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Creates the worker pool now instead of waiting for the first dispatch. Returns `true` if a pool is running.
    pub fn start(&mut self) -> bool {
        let _inbox = self.inbox.lock();
        ensure_pool(&mut self.pool, self.config.calculation_threads()).is_some()
    }

    pub fn section_loaded(&mut self, key: SectionKey) {
        if !self.loaded_sections.contains_key(&key) {
            self.last_load_stamp += 1;
            self.loaded_sections
                .insert(key, LoadStamp(self.last_load_stamp));
        }
    }

    /// Forgets the section and its border data. A calculation already in flight is left alone; its result will be dropped
    /// when it arrives, even if the section has been loaded again by then.
    pub fn section_unloaded(&mut self, key: SectionKey) {
        self.loaded_sections.remove(&key);
        self.ready_sections.remove(&key);
    }

    /// Loads every section of the column at `(x, z)` within the configured section range.
    pub fn column_loaded(&mut self, x: i32, z: i32) {
        for y in self.config.section_range.iter_y() {
            self.section_loaded(SectionKey::new(x, y, z));
        }
    }

    pub fn column_unloaded(&mut self, x: i32, z: i32) {
        for y in self.config.section_range.iter_y() {
            self.section_unloaded(SectionKey::new(x, y, z));
        }
    }

    /// Hands a finished result to the cache, exactly as a worker task would.
    ///
    /// The result belongs to the section's current load cycle, or to none at all if the section isn't loaded.
    pub fn result_ready(&self, key: SectionKey, data: SectionBorderData) {
        let stamp = self
            .loaded_sections
            .get(&key)
            .copied()
            .unwrap_or(LoadStamp::NOT_LOADED);
        self.inbox.lock().publish(key, stamp, data, Duration::ZERO);
    }

    pub fn any_loaded(&self) -> bool {
        !self.loaded_sections.is_empty()
    }

    pub fn is_loaded(&self, key: SectionKey) -> bool {
        self.loaded_sections.contains_key(&key)
    }

    pub fn get(&self, key: SectionKey) -> Option<&SectionBorderData> {
        self.ready_sections.get(&key)
    }

    pub fn num_ready(&self) -> usize {
        self.ready_sections.len()
    }

    pub fn is_queued(&self, key: SectionKey) -> bool {
        self.inbox.lock().queued_for_calculation.contains_key(&key)
    }

    pub fn stats(&self) -> CacheStats {
        let inbox = self.inbox.lock();
        CacheStats {
            loaded: self.loaded_sections.len(),
            ready: self.ready_sections.len(),
            queued: inbox.queued_for_calculation.len(),
            pending: inbox.pending_additions.len(),
            dispatched: self.dispatched,
            stale_dropped: self.stale_dropped + inbox.stale_discarded,
            work: inbox.timer,
            pool_running: self.pool.is_some(),
        }
    }

    /// Returns the worker time accumulated since the last call.
    pub fn take_work_timer(&self) -> WorkTimer {
        self.inbox.lock().timer.take()
    }

    /// True iff `key` and all of its neighbors are loaded and fully generated.
    pub fn is_ready_for_calculation<W: BiomeSource>(&self, key: SectionKey, world: &W) -> bool {
        is_ready_for_calculation(
            key,
            self.config.section_range,
            |k| self.loaded_sections.contains_key(&k),
            |k| world.generation_status(k),
        )
    }

    /// The per-frame entry point.
    ///
    /// Every `visible` section with border data is passed to `rx`. The misses that are ready for calculation are then queued in
    /// the same merge pass that publishes all results finished since the last frame. Returns the number of new tasks.
    pub fn query_and_dispatch<W: BiomeSource>(
        &mut self,
        visible: impl IntoIterator<Item = SectionKey>,
        world: &Arc<W>,
        mut rx: impl FnMut(SectionKey, &SectionBorderData),
    ) -> usize {
        let mut to_queue = Vec::new();
        let mut seen = SmallKeyHashSet::default();
        for key in visible {
            if let Some(data) = self.ready_sections.get(&key) {
                rx(key, data);
            } else if self.is_ready_for_calculation(key, &**world) && seen.insert(key) {
                to_queue.push(key);
            }
        }

        self.merge_and_dispatch(to_queue, world)
    }

    fn merge_and_dispatch<W: BiomeSource>(
        &mut self,
        to_queue: Vec<SectionKey>,
        world: &Arc<W>,
    ) -> usize {
        let mut inbox = self.inbox.lock();
        let CalculationInbox {
            pending_additions,
            queued_for_calculation,
            epoch,
            ..
        } = &mut *inbox;

        for (key, (stamp, data)) in pending_additions.drain() {
            if self.loaded_sections.get(&key) == Some(&stamp) {
                self.ready_sections.insert(key, data);
            } else {
                log::trace!("Dropping border result for unloaded section {:?}", key);
                self.stale_dropped += 1;
            }
        }

        // A key may have been published by the merge above after it was collected as a miss. A key queued under an earlier
        // load cycle is queued again; that older result will be discarded.
        let loaded_sections = &self.loaded_sections;
        let ready_sections = &self.ready_sections;
        let to_queue: Vec<(SectionKey, LoadStamp)> = to_queue
            .into_iter()
            .filter(|key| !ready_sections.contains_key(key))
            .filter_map(|key| loaded_sections.get(&key).map(|&stamp| (key, stamp)))
            .filter(|(key, stamp)| queued_for_calculation.get(key) != Some(stamp))
            .collect();
        if to_queue.is_empty() {
            return 0;
        }

        let pool = match ensure_pool(&mut self.pool, self.config.calculation_threads()) {
            Some(pool) => pool,
            None => return 0,
        };

        let calculator = Arc::new(SectionBorderCalculator::new(
            world.clone(),
            self.config.section_range,
            self.config.sample_stride(),
        ));
        let handle = CompletionHandle::new(self.inbox.clone(), *epoch);
        for &(key, stamp) in to_queue.iter() {
            queued_for_calculation.insert(key, stamp);
            pool.spawn_calculation(key, stamp, calculator.clone(), handle.clone());
        }

        log::debug!(
            "Queued {} sections for border calculation ({} in flight)",
            to_queue.len(),
            queued_for_calculation.len()
        );
        self.dispatched += to_queue.len() as u64;

        to_queue.len()
    }

    /// Cancels queued and running calculations and releases the worker pool. Results from those calculations will never be
    /// published. Safe to call at any time, any number of times.
    pub fn shutdown(&mut self) {
        let mut inbox = self.inbox.lock();
        if let Some(pool) = self.pool.take() {
            log::debug!(
                "Shutting down border calculation pool ({} sections in flight)",
                inbox.queued_for_calculation.len()
            );
            drop(pool);
        }
        inbox.invalidate();
    }

    /// Shuts down and forgets every section, ready for a new world.
    pub fn clear(&mut self) {
        self.shutdown();
        self.loaded_sections.clear();
        self.ready_sections.clear();
    }
}

fn ensure_pool(pool: &mut Option<WorkerPool>, num_threads: usize) -> Option<&WorkerPool> {
    if pool.is_none() {
        match WorkerPool::new(num_threads) {
            Ok(new_pool) => {
                log::debug!(
                    "Started border calculation pool with {} threads",
                    new_pool.num_threads()
                );
                *pool = Some(new_pool);
            }
            Err(e) => {
                log::error!("Failed to start border calculation pool: {}", e);
                return None;
            }
        }
    }
    pool.as_ref()
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝
