use super::{Decision, Strategy};
use crate::game::Board;
use rand::{Rng, RngCore};

const DEFAULT_P: f64 = 0.5;

/// A player who can't make up their mind and switches with probability `p`.
#[derive(Debug, Clone)]
pub struct CoinFlip {
    p: f64,
}

impl CoinFlip {
    pub fn new() -> Self {
        Self { p: DEFAULT_P }
    }

    /// Usage: CoinFlip::new().with_probability(0.8)
    ///
    /// Values outside `[0, 1]` are clamped; NaN and infinities fall back to 0.5.
    pub fn with_probability(mut self, p: f64) -> Self {
        self.p = if p.is_finite() { p.clamp(0.0, 1.0) } else { DEFAULT_P };
        self
    }

    pub fn probability(&self) -> f64 {
        self.p
    }
}

impl Default for CoinFlip {
    fn default() -> Self {
        Self::new()
    }
}

impl Strategy for CoinFlip {
    fn decide(&mut self, _board: &Board, rng: &mut dyn RngCore) -> Decision {
        if rng.gen_bool(self.p) {
            Decision::Switch
        } else {
            Decision::Stay
        }
    }

    fn name(&self) -> &str { "Random" }

    fn clone_box(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}
