// core/timer.rs
//
// Logical timers driven by the game clock. No threads, no wall-clock reads:
// a timer fires on the first `tick` whose `now` reaches its due time.
//
// Usage:
//   let mut timers = Scheduler::new();
//   let id = timers.every(now, 8000.0, Task::Spawn);
//   for task in timers.tick(now) { ... }

/// Handle to a scheduled timer, used for cancellation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(u32);

/// What happens when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimerMode {
    /// Fire once, then drop the timer.
    #[default]
    Once,
    /// Fire, then reschedule `interval` ms after the previous due time.
    Repeat { interval: f64 },
}

#[derive(Debug, Clone)]
struct Timer<T> {
    id: TimerId,
    due: f64,
    mode: TimerMode,
    payload: T,
}

/// Smallest interval a repeating timer may use; keeps a catch-up tick finite.
const MIN_INTERVAL_MS: f64 = 1.0;

/// Collection of pending timers carrying payloads of type `T`.
#[derive(Debug, Clone)]
pub struct Scheduler<T> {
    timers: Vec<Timer<T>>,
    next_id: u32,
}

impl<T: Clone> Scheduler<T> {
    pub fn new() -> Self {
        Self {
            timers: Vec::new(),
            next_id: 1,
        }
    }

    fn push(&mut self, due: f64, mode: TimerMode, payload: T) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.push(Timer { id, due, mode, payload });
        id
    }

    /// Fire `payload` once, `delay` ms after `now`.
    pub fn after(&mut self, now: f64, delay: f64, payload: T) -> TimerId {
        self.push(now + delay.max(0.0), TimerMode::Once, payload)
    }

    /// Fire `payload` every `interval` ms, first at `now + interval`.
    pub fn every(&mut self, now: f64, interval: f64, payload: T) -> TimerId {
        let interval = interval.max(MIN_INTERVAL_MS);
        self.push(now + interval, TimerMode::Repeat { interval }, payload)
    }

    /// Cancel a pending timer. Returns false if it already fired or was unknown.
    pub fn cancel(&mut self, id: TimerId) -> bool {
        let before = self.timers.len();
        self.timers.retain(|t| t.id != id);
        self.timers.len() != before
    }

    pub fn is_pending(&self, id: TimerId) -> bool {
        self.timers.iter().any(|t| t.id == id)
    }

    /// Collect every payload due at or before `now`, ordered by due time and
    /// then by scheduling order. A repeating timer that fell behind fires once
    /// per missed interval.
    pub fn tick(&mut self, now: f64) -> Vec<T> {
        let mut fired: Vec<(f64, TimerId, T)> = Vec::new();

        for timer in self.timers.iter_mut() {
            while timer.due <= now {
                fired.push((timer.due, timer.id, timer.payload.clone()));
                match timer.mode {
                    TimerMode::Once => break,
                    TimerMode::Repeat { interval } => timer.due += interval,
                }
            }
        }

        self.timers
            .retain(|t| !(t.mode == TimerMode::Once && t.due <= now));

        fired.sort_by(|a, b| a.0.total_cmp(&b.0).then(a.1 .0.cmp(&b.1 .0)));
        fired.into_iter().map(|(_, _, payload)| payload).collect()
    }

    /// Drop every pending timer.
    pub fn clear(&mut self) {
        self.timers.clear();
    }

    pub fn len(&self) -> usize {
        self.timers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.timers.is_empty()
    }
}

impl<T: Clone> Default for Scheduler<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_shot_fires_at_due_time() {
        let mut timers = Scheduler::new();
        timers.after(0.0, 1500.0, "reveal");
        assert!(timers.tick(1499.0).is_empty());
        assert_eq!(timers.tick(1500.0), vec!["reveal"]);
        assert!(timers.is_empty());
        assert!(timers.tick(5000.0).is_empty());
    }

    #[test]
    fn repeating_timer_reschedules() {
        let mut timers = Scheduler::new();
        timers.every(0.0, 8000.0, 7u32);
        assert!(timers.tick(7999.0).is_empty());
        assert_eq!(timers.tick(8000.0), vec![7]);
        assert_eq!(timers.tick(16000.0), vec![7]);
        assert_eq!(timers.len(), 1);
    }

    #[test]
    fn repeating_timer_catches_up() {
        let mut timers = Scheduler::new();
        timers.every(0.0, 100.0, 'x');
        assert_eq!(timers.tick(350.0).len(), 3);
        assert_eq!(timers.tick(400.0).len(), 1);
    }

    #[test]
    fn fired_in_due_order() {
        let mut timers = Scheduler::new();
        timers.after(0.0, 800.0, 2);
        timers.after(0.0, 400.0, 1);
        timers.after(0.0, 0.0, 0);
        assert_eq!(timers.tick(1000.0), vec![0, 1, 2]);
    }

    #[test]
    fn cancel_removes_pending() {
        let mut timers = Scheduler::new();
        let id = timers.every(0.0, 100.0, ());
        assert!(timers.is_pending(id));
        assert!(timers.cancel(id));
        assert!(!timers.cancel(id));
        assert!(timers.tick(1000.0).is_empty());
    }
}
