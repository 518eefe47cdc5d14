use std::convert::TryInto;
use std::time::Duration;

/// Accumulates the CPU time spent on background work items, along with how many of them finished or failed.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct WorkTimer {
    total_cpu_time: Duration,
    longest_item: Duration,
    items_completed: u32,
    items_failed: u32,
}

impl WorkTimer {
    pub fn total_cpu_time(&self) -> Duration {
        self.total_cpu_time
    }

    pub fn longest_item(&self) -> Duration {
        self.longest_item
    }

    pub fn items_completed(&self) -> u32 {
        self.items_completed
    }

    pub fn items_failed(&self) -> u32 {
        self.items_failed
    }

    pub fn complete_item(&mut self, d: Duration) {
        self.total_cpu_time += d;
        self.longest_item = self.longest_item.max(d);
        self.items_completed = self.items_completed.saturating_add(1);
    }

    pub fn fail_item(&mut self) {
        self.items_failed = self.items_failed.saturating_add(1);
    }

    pub fn average_cpu_time_us(&self) -> u32 {
        let total_us: u32 = self
            .total_cpu_time
            .as_micros()
            .try_into()
            .unwrap_or(u32::MAX);

        total_us / self.items_completed.max(1)
    }

    /// Returns the current totals and starts over from zero.
    pub fn take(&mut self) -> Self {
        std::mem::take(self)
    }
}

// ████████╗███████╗███████╗████████╗
// ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝
//    ██║   █████╗  ███████╗   ██║
//    ██║   ██╔══╝  ╚════██║   ██║
//    ██║   ███████╗███████║   ██║
//    ╚═╝   ╚══════╝╚══════╝   ╚═╝

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn average_ignores_failures() {
        let mut timer = WorkTimer::default();
        timer.complete_item(Duration::from_micros(100));
        timer.complete_item(Duration::from_micros(300));
        timer.fail_item();

        assert_eq!(timer.items_completed(), 2);
        assert_eq!(timer.items_failed(), 1);
        assert_eq!(timer.average_cpu_time_us(), 200);
        assert_eq!(timer.longest_item(), Duration::from_micros(300));
    }

    #[test]
    fn take_resets() {
        let mut timer = WorkTimer::default();
        timer.complete_item(Duration::from_millis(2));

        let taken = timer.take();
        assert_eq!(taken.items_completed(), 1);
        assert_eq!(timer, WorkTimer::default());
        assert_eq!(timer.average_cpu_time_us(), 0);
    }
}
