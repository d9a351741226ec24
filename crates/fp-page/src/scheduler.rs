//! Deterministic timer scheduler.
//!
//! Virtual-time replacement for setTimeout/setInterval: the embedder
//! calls `advance` with elapsed milliseconds and receives the tasks that
//! came due, in firing order. Nothing here touches the wall clock.

/// Timer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

#[derive(Debug, Clone)]
struct Entry<T> {
    id: TimerId,
    task: T,
    deadline: u64,
    period: Option<u64>,
}

/// Virtual-time timer scheduler.
#[derive(Debug)]
pub struct Scheduler<T> {
    now: u64,
    next_id: u64,
    entries: Vec<Entry<T>>,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_id: 1,
            entries: Vec::new(),
        }
    }

    /// Current virtual time in milliseconds.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Schedule a one-shot task.
    pub fn schedule_once(&mut self, task: T, delay_ms: u64) -> TimerId {
        self.push(task, delay_ms, None)
    }

    /// Schedule a repeating task. A zero period is clamped to 1 ms.
    pub fn schedule_repeating(&mut self, task: T, period_ms: u64) -> TimerId {
        let period = period_ms.max(1);
        self.push(task, period, Some(period))
    }

    fn push(&mut self, task: T, delay_ms: u64, period: Option<u64>) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.entries.push(Entry {
            id,
            task,
            deadline: self.now + delay_ms,
            period,
        });
        id
    }

    /// Cancel a timer. Returns whether it was still pending.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        self.entries.len() != before
    }

    /// Check whether a timer is still pending.
    pub fn is_scheduled(&self, id: TimerId) -> bool {
        self.entries.iter().any(|e| e.id == id)
    }

    /// Check whether anything is pending.
    pub fn has_pending(&self) -> bool {
        !self.entries.is_empty()
    }

    /// Advance virtual time and collect due tasks in firing order.
    ///
    /// Repeating timers fire as many times as their period fits into the
    /// advanced window; ties fire in scheduling order.
    pub fn advance(&mut self, delta_ms: u64) -> Vec<(TimerId, T)> {
        self.now += delta_ms;
        let mut fired = Vec::new();

        loop {
            let due = self
                .entries
                .iter()
                .enumerate()
                .filter(|(_, e)| e.deadline <= self.now)
                .min_by_key(|(_, e)| (e.deadline, e.id.0))
                .map(|(i, _)| i);
            let Some(index) = due else { break };

            let (id, task, period) = {
                let entry = &self.entries[index];
                (entry.id, entry.task.clone(), entry.period)
            };
            fired.push((id, task));
            match period {
                Some(period) => self.entries[index].deadline += period,
                None => {
                    self.entries.swap_remove(index);
                }
            }
        }

        fired
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}
