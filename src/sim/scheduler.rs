//! Logical clock and task scheduler
//!
//! Every timed behavior of a run is a [`TaskKind`] registered here, either
//! one-shot or periodic. There is at most one entry per kind, so registering
//! again replaces the old entry and a run can never leak a duplicate. Due
//! tasks are handed out one at a time in (due time, kind priority) order;
//! `cancel_all` empties the queue so nothing runs after a phase change.

/// Timed work a run can schedule, in same-millisecond priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum TaskKind {
    /// Jump integration while airborne
    Physics,
    /// Move obstacles and pickups, then evaluate collisions
    Advance,
    /// Spawn the next obstacle (one-shot, rescheduled with a random delay)
    SpawnObstacle,
    /// Roll for a shield pickup
    SpawnPowerUp,
    /// Per-interval score increment
    Score,
    /// Per-second shield countdown
    ShieldCountdown,
}

#[derive(Debug, Clone, Copy)]
struct Entry {
    kind: TaskKind,
    due_ms: u64,
    period_ms: Option<u64>,
}

#[derive(Debug, Clone, Default)]
pub struct Scheduler {
    now_ms: u64,
    entries: Vec<Entry>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current logical time
    pub fn now(&self) -> u64 {
        self.now_ms
    }

    /// Run `kind` every `period_ms`, first after one period
    pub fn every(&mut self, kind: TaskKind, period_ms: u64) {
        let period_ms = period_ms.max(1);
        self.insert(Entry {
            kind,
            due_ms: self.now_ms + period_ms,
            period_ms: Some(period_ms),
        });
    }

    /// Run `kind` once after `delay_ms`
    pub fn once(&mut self, kind: TaskKind, delay_ms: u64) {
        self.insert(Entry {
            kind,
            due_ms: self.now_ms + delay_ms,
            period_ms: None,
        });
    }

    /// Change the period of a periodic task; takes effect from its next run
    pub fn set_period(&mut self, kind: TaskKind, period_ms: u64) {
        if let Some(entry) = self.entries.iter_mut().find(|e| e.kind == kind) {
            if entry.period_ms.is_some() {
                entry.period_ms = Some(period_ms.max(1));
            }
        }
    }

    pub fn cancel(&mut self, kind: TaskKind) {
        self.entries.retain(|e| e.kind != kind);
    }

    pub fn cancel_all(&mut self) {
        self.entries.clear();
    }

    pub fn is_scheduled(&self, kind: TaskKind) -> bool {
        self.entries.iter().any(|e| e.kind == kind)
    }

    /// Registered task kinds in priority order
    pub fn scheduled(&self) -> Vec<TaskKind> {
        let mut kinds: Vec<_> = self.entries.iter().map(|e| e.kind).collect();
        kinds.sort();
        kinds
    }

    /// Period of a registered periodic task
    pub fn period(&self, kind: TaskKind) -> Option<u64> {
        self.entries.iter().find(|e| e.kind == kind).and_then(|e| e.period_ms)
    }

    /// Pop the next task due at or before `until_ms`, moving the clock to its
    /// due time. Periodic tasks are re-armed, one-shots removed.
    pub fn pop_due(&mut self, until_ms: u64) -> Option<TaskKind> {
        let idx = self
            .entries
            .iter()
            .enumerate()
            .filter(|(_, e)| e.due_ms <= until_ms)
            .min_by_key(|(_, e)| (e.due_ms, e.kind))
            .map(|(i, _)| i)?;

        let entry = self.entries[idx];
        self.now_ms = self.now_ms.max(entry.due_ms);
        match entry.period_ms {
            Some(period) => self.entries[idx].due_ms = entry.due_ms + period,
            None => {
                self.entries.swap_remove(idx);
            }
        }
        Some(entry.kind)
    }

    /// Move the clock forward without running anything
    pub fn advance_to(&mut self, until_ms: u64) {
        self.now_ms = self.now_ms.max(until_ms);
    }

    fn insert(&mut self, entry: Entry) {
        self.cancel(entry.kind);
        self.entries.push(entry);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain(scheduler: &mut Scheduler, until_ms: u64) -> Vec<(u64, TaskKind)> {
        let mut ran = Vec::new();
        while let Some(kind) = scheduler.pop_due(until_ms) {
            ran.push((scheduler.now(), kind));
        }
        scheduler.advance_to(until_ms);
        ran
    }

    #[test]
    fn test_periodic_rearms() {
        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Score, 100);
        let ran = drain(&mut scheduler, 350);
        assert_eq!(
            ran,
            vec![(100, TaskKind::Score), (200, TaskKind::Score), (300, TaskKind::Score)]
        );
        assert_eq!(scheduler.now(), 350);
        assert!(scheduler.is_scheduled(TaskKind::Score));
    }

    #[test]
    fn test_once_runs_once() {
        let mut scheduler = Scheduler::new();
        scheduler.once(TaskKind::SpawnObstacle, 1000);
        assert!(drain(&mut scheduler, 999).is_empty());
        assert_eq!(drain(&mut scheduler, 5000), vec![(1000, TaskKind::SpawnObstacle)]);
        assert!(!scheduler.is_scheduled(TaskKind::SpawnObstacle));
    }

    #[test]
    fn test_same_time_runs_in_priority_order() {
        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Advance, 20);
        scheduler.every(TaskKind::Physics, 20);
        let ran = drain(&mut scheduler, 40);
        assert_eq!(
            ran,
            vec![
                (20, TaskKind::Physics),
                (20, TaskKind::Advance),
                (40, TaskKind::Physics),
                (40, TaskKind::Advance),
            ]
        );
    }

    #[test]
    fn test_registering_again_replaces() {
        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Score, 100);
        scheduler.every(TaskKind::Score, 50);
        assert_eq!(scheduler.scheduled(), vec![TaskKind::Score]);
        assert_eq!(scheduler.period(TaskKind::Score), Some(50));
    }

    #[test]
    fn test_set_period_applies_from_next_run() {
        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Advance, 20);
        assert_eq!(scheduler.pop_due(20), Some(TaskKind::Advance));
        scheduler.set_period(TaskKind::Advance, 19);
        // already armed for 40; next gap shrinks after that
        assert_eq!(scheduler.pop_due(40), Some(TaskKind::Advance));
        assert_eq!(scheduler.pop_due(58), None);
        assert_eq!(scheduler.pop_due(59), Some(TaskKind::Advance));
    }

    #[test]
    fn test_cancel_all_stops_everything() {
        let mut scheduler = Scheduler::new();
        scheduler.every(TaskKind::Score, 100);
        scheduler.every(TaskKind::Advance, 20);
        scheduler.once(TaskKind::SpawnObstacle, 10);
        scheduler.cancel_all();
        assert!(drain(&mut scheduler, 10_000).is_empty());
        assert!(scheduler.scheduled().is_empty());
    }
}
