//! Delayed stage transitions
//!
//! Stage changes wait a moment so the last pop or wrong guess can render.
//! Each scheduled transition carries the generation it was created in;
//! `cancel_all` (used by restart) bumps the generation so nothing stale fires.

use serde::{Deserialize, Serialize};

use super::state::FailReason;

/// A stage change waiting on its timer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Transition {
    EnterGuessing,
    EnterFailed(FailReason),
}

/// Handle returned by `Scheduler::schedule`, valid until cancelled or fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerToken {
    generation: u64,
    id: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Scheduled {
    token: TimerToken,
    /// Seconds left before firing
    remaining: f32,
    transition: Transition,
}

/// Fire-once timers driven by the simulation clock
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Scheduler {
    generation: u64,
    next_id: u64,
    queue: Vec<Scheduled>,
}

impl Scheduler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue `transition` to fire after `delay` seconds
    pub fn schedule(&mut self, transition: Transition, delay: f32) -> TimerToken {
        let token = TimerToken {
            generation: self.generation,
            id: self.next_id,
        };
        self.next_id += 1;
        self.queue.push(Scheduled {
            token,
            remaining: delay.max(0.0),
            transition,
        });
        token
    }

    /// Cancel one timer. Returns false if it already fired or was cancelled.
    pub fn cancel(&mut self, token: TimerToken) -> bool {
        let before = self.queue.len();
        self.queue.retain(|s| s.token != token);
        self.queue.len() != before
    }

    /// Drop every pending timer and invalidate outstanding tokens
    pub fn cancel_all(&mut self) {
        self.generation += 1;
        self.queue.clear();
    }

    /// Whether `token` still refers to a pending timer
    pub fn is_pending(&self, token: TimerToken) -> bool {
        token.generation == self.generation && self.queue.iter().any(|s| s.token == token)
    }

    /// Whether any transition is waiting
    pub fn has_pending(&self) -> bool {
        !self.queue.is_empty()
    }

    /// Advance timers by `dt` and return due transitions in scheduling order
    pub fn advance(&mut self, dt: f32) -> Vec<Transition> {
        let generation = self.generation;
        let mut due = Vec::new();
        self.queue.retain_mut(|s| {
            s.remaining -= dt;
            if s.remaining <= 0.0 {
                if s.token.generation == generation {
                    due.push(s.transition);
                }
                false
            } else {
                true
            }
        });
        due
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_after_delay() {
        let mut sched = Scheduler::new();
        sched.schedule(Transition::EnterGuessing, 0.5);

        assert!(sched.advance(0.3).is_empty());
        assert!(sched.has_pending());
        assert_eq!(sched.advance(0.3), vec![Transition::EnterGuessing]);
        assert!(!sched.has_pending());
        // Fire-once
        assert!(sched.advance(1.0).is_empty());
    }

    #[test]
    fn test_cancel_all_invalidates_tokens() {
        let mut sched = Scheduler::new();
        let token = sched.schedule(Transition::EnterFailed(FailReason::OutOfShots), 0.4);
        assert!(sched.is_pending(token));

        sched.cancel_all();
        assert!(!sched.is_pending(token));
        assert!(!sched.cancel(token));
        assert!(sched.advance(10.0).is_empty());
    }

    #[test]
    fn test_cancel_single() {
        let mut sched = Scheduler::new();
        let a = sched.schedule(Transition::EnterGuessing, 0.1);
        let b = sched.schedule(Transition::EnterFailed(FailReason::OutOfChances), 0.2);
        assert!(sched.cancel(a));
        assert!(sched.is_pending(b));
        assert_eq!(
            sched.advance(1.0),
            vec![Transition::EnterFailed(FailReason::OutOfChances)]
        );
    }

    #[test]
    fn test_zero_delay_fires_next_advance() {
        let mut sched = Scheduler::new();
        sched.schedule(Transition::EnterGuessing, 0.0);
        assert_eq!(sched.advance(0.0), vec![Transition::EnterGuessing]);
    }
}
