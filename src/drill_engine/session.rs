//! Per-drill answer state: `AwaitingAnswer -> Checked -> AwaitingAnswer`.
//!
//! Generators know nothing about streaks or buttons; a UI keeps one
//! `DrillSession` per open drill and feeds it raw input.

use serde::{Deserialize, Serialize};

use crate::drill_engine::{
    checker::check_answer,
    models::{CheckResult, Problem, Verdict},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionState {
    AwaitingAnswer,
    Checked,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DrillSession {
    problem: Problem,
    state: SessionState,
    streak: u32,
}

impl DrillSession {
    pub fn new(problem: Problem) -> Self {
        DrillSession { problem, state: SessionState::AwaitingAnswer, streak: 0 }
    }

    pub fn problem(&self) -> &Problem {
        &self.problem
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Check `raw_input`. Returns `None` when the answer was already checked.
    ///
    /// An empty answer leaves state and streak alone. A wrong answer resets
    /// the streak; drills that allow a retry stay open for another try.
    pub fn submit(&mut self, raw_input: &str) -> Option<CheckResult> {
        if self.state == SessionState::Checked {
            return None;
        }
        let result = check_answer(&self.problem, raw_input);
        match result.verdict {
            Verdict::Empty => {}
            Verdict::Correct => {
                self.streak += 1;
                self.state = SessionState::Checked;
            }
            Verdict::Incorrect => {
                self.streak = 0;
                if !self.problem.drill.allows_retry() {
                    self.state = SessionState::Checked;
                }
            }
        }
        Some(result)
    }

    /// Give up on the current problem: the streak is lost and the answer is
    /// returned for display.
    pub fn reveal(&mut self) -> String {
        self.streak = 0;
        self.state = SessionState::Checked;
        self.problem.reveal_text.clone()
    }

    /// Replace the problem and reopen for input. The streak carries over.
    pub fn next(&mut self, problem: Problem) {
        self.problem = problem;
        self.state = SessionState::AwaitingAnswer;
    }
}
