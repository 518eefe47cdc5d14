use super::inbox::{CompletionHandle, LoadStamp};
use crate::calculator::SectionBorderCalculator;
use crate::section_key::SectionKey;
use crate::world::BiomeSource;

use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// A fixed set of threads for border calculation, with one cancel flag shared by every task spawned on it.
///
/// Dropping the pool raises the flag. Tasks that have not started yet return immediately; running tasks stop at their next
/// check. The threads themselves exit once the queue drains.
pub(crate) struct WorkerPool {
    threads: ThreadPool,
    cancel: Arc<AtomicBool>,
}

impl WorkerPool {
    pub fn new(num_threads: usize) -> Result<Self, ThreadPoolBuildError> {
        let threads = ThreadPoolBuilder::new()
            .num_threads(num_threads)
            .thread_name(|i| format!("border-calc-{}", i))
            .panic_handler(|_| log::error!("Border calculation thread panicked outside of a task"))
            .build()?;

        Ok(Self {
            threads,
            cancel: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn num_threads(&self) -> usize {
        self.threads.current_num_threads()
    }

    pub fn spawn_calculation<W: BiomeSource>(
        &self,
        key: SectionKey,
        stamp: LoadStamp,
        calculator: Arc<SectionBorderCalculator<W>>,
        handle: CompletionHandle,
    ) {
        let cancel = self.cancel.clone();
        self.threads
            .spawn(move || run_calculation(key, stamp, &calculator, &handle, &cancel));
    }
}

impl Drop for WorkerPool {
    fn drop(&mut self) {
        self.cancel.store(true, Ordering::Release);
    }
}

/// The body of one worker task. Always reports back through `handle`, whatever happens to the calculation.
pub(crate) fn run_calculation<W: BiomeSource>(
    key: SectionKey,
    stamp: LoadStamp,
    calculator: &SectionBorderCalculator<W>,
    handle: &CompletionHandle,
    cancel: &AtomicBool,
) {
    if cancel.load(Ordering::Acquire) {
        handle.calculation_abandoned(key, stamp);
        return;
    }

    let start = Instant::now();
    match panic::catch_unwind(AssertUnwindSafe(|| calculator.calculate(key, cancel))) {
        Ok(Some(data)) => handle.result_ready(key, stamp, data, start.elapsed()),
        Ok(None) => handle.calculation_abandoned(key, stamp),
        Err(_) => {
            log::warn!("Border calculation for {:?} panicked; it will be retried", key);
            handle.calculation_failed(key, stamp);
        }
    }
}
