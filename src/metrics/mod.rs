pub mod logger;
pub mod report;

pub use report::{Reporter, TableRow};

use crate::game::Outcome;
use serde::{Deserialize, Serialize};
use std::ops::{Add, AddAssign};

/// Running win count for one experiment.
///
/// Tallies from independent batches combine with `+`, which is associative
/// and commutative, so parallel chunks can be merged in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tally {
    pub trials: u64,
    pub wins: u64,
    pub first_pick_right: u64,
}

impl Tally {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, outcome: Outcome, first_pick_right: bool) {
        self.trials += 1;
        if outcome.is_win() {
            self.wins += 1;
        }
        if first_pick_right {
            self.first_pick_right += 1;
        }
    }

    /// Relative frequency of wins, 0.0 when nothing was played.
    pub fn frequency(&self) -> f64 {
        if self.trials > 0 {
            self.wins as f64 / self.trials as f64
        } else {
            0.0
        }
    }

    pub fn first_pick_frequency(&self) -> f64 {
        if self.trials > 0 {
            self.first_pick_right as f64 / self.trials as f64
        } else {
            0.0
        }
    }

    pub fn losses(&self) -> u64 {
        self.trials - self.wins
    }
}

impl Add for Tally {
    type Output = Tally;

    fn add(self, other: Tally) -> Tally {
        Tally {
            trials: self.trials + other.trials,
            wins: self.wins + other.wins,
            first_pick_right: self.first_pick_right + other.first_pick_right,
        }
    }
}

impl AddAssign for Tally {
    fn add_assign(&mut self, other: Tally) {
        *self = *self + other;
    }
}

impl std::iter::Sum for Tally {
    fn sum<I: Iterator<Item = Tally>>(iter: I) -> Tally {
        iter.fold(Tally::new(), |acc, t| acc + t)
    }
}
