// The two textbook players. Neither looks at the board.

use super::{Decision, Strategy};
use crate::game::Board;
use rand::RngCore;

#[derive(Debug, Clone, Default)]
pub struct AlwaysSwitch;

impl AlwaysSwitch {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for AlwaysSwitch {
    fn decide(&mut self, _board: &Board, _rng: &mut dyn RngCore) -> Decision {
        Decision::Switch
    }

    fn name(&self) -> &str { "Switch" }

    fn clone_box(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}

#[derive(Debug, Clone, Default)]
pub struct AlwaysStay;

impl AlwaysStay {
    pub fn new() -> Self {
        Self
    }
}

impl Strategy for AlwaysStay {
    fn decide(&mut self, _board: &Board, _rng: &mut dyn RngCore) -> Decision {
        Decision::Stay
    }

    fn name(&self) -> &str { "Stay" }

    fn clone_box(&self) -> Box<dyn Strategy> {
        Box::new(self.clone())
    }
}
