//! Single-threaded cooperative tick queue.
//!
//! The host advances the queue one turn at a time; tasks are armed for the
//! next turn or N turns out and drained in FIFO scheduling order within a
//! turn. Long-running work is decomposed into per-turn steps on this queue
//! so no single turn performs unbounded world mutation. There is no
//! cancellation: an armed task runs exactly once.

#[derive(Debug)]
struct Entry<T> {
    due: u64,
    seq: u64,
    task: T,
}

/// A deferred-execution queue keyed to a turn counter.
#[derive(Debug)]
pub struct TickQueue<T> {
    now: u64,
    next_seq: u64,
    pending: Vec<Entry<T>>,
}

impl<T> TickQueue<T> {
    pub fn new() -> Self {
        Self {
            now: 0,
            next_seq: 0,
            pending: Vec::new(),
        }
    }

    /// Current turn counter. Starts at 0; the first [`advance`](Self::advance)
    /// moves to turn 1.
    pub fn now(&self) -> u64 {
        self.now
    }

    /// Arm a task for the next turn.
    pub fn run_next_turn(&mut self, task: T) {
        self.run_after_delay(task, 1);
    }

    /// Arm a task `turns` from now. A task never runs within the turn that
    /// armed it, so a delay of 0 also lands on the next turn.
    pub fn run_after_delay(&mut self, task: T, turns: u64) {
        let entry = Entry {
            due: self.now + turns.max(1),
            seq: self.next_seq,
            task,
        };
        self.next_seq += 1;
        self.pending.push(entry);
    }

    /// Advance one turn and take every task that came due, in the order it
    /// was armed.
    pub fn advance(&mut self) -> Vec<T> {
        self.now += 1;
        let now = self.now;
        let mut due = Vec::new();
        let mut rest = Vec::new();
        for entry in self.pending.drain(..) {
            if entry.due <= now {
                due.push(entry);
            } else {
                rest.push(entry);
            }
        }
        self.pending = rest;
        due.sort_by_key(|e| e.seq);
        due.into_iter().map(|e| e.task).collect()
    }

    /// True when nothing is armed.
    pub fn is_idle(&self) -> bool {
        self.pending.is_empty()
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T> Default for TickQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fifo_within_a_turn() {
        let mut queue = TickQueue::new();
        queue.run_next_turn("first");
        queue.run_next_turn("second");
        queue.run_next_turn("third");
        assert_eq!(queue.advance(), vec!["first", "second", "third"]);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_delay_defers_past_earlier_turns() {
        let mut queue = TickQueue::new();
        queue.run_after_delay("late", 3);
        queue.run_next_turn("early");
        assert_eq!(queue.advance(), vec!["early"]);
        assert_eq!(queue.advance(), Vec::<&str>::new());
        assert_eq!(queue.advance(), vec!["late"]);
    }

    #[test]
    fn test_zero_delay_still_waits_a_turn() {
        let mut queue = TickQueue::new();
        queue.run_after_delay("task", 0);
        assert!(!queue.is_idle());
        assert_eq!(queue.advance(), vec!["task"]);
    }

    #[test]
    fn test_rearmed_task_runs_next_turn() {
        // The drill pattern: a step that re-arms itself each turn.
        let mut queue = TickQueue::new();
        queue.run_next_turn(3u32);
        let mut opened = Vec::new();
        while !queue.is_idle() {
            for remaining in queue.advance() {
                opened.push(remaining);
                if remaining > 1 {
                    queue.run_next_turn(remaining - 1);
                }
            }
        }
        assert_eq!(opened, vec![3, 2, 1]);
        assert_eq!(queue.now(), 3);
    }

    #[test]
    fn test_interleaved_delays_preserve_arm_order() {
        let mut queue = TickQueue::new();
        queue.run_after_delay("a", 2);
        queue.run_next_turn("b");
        queue.run_after_delay("c", 2);
        assert_eq!(queue.advance(), vec!["b"]);
        assert_eq!(queue.advance(), vec!["a", "c"]);
    }
}
