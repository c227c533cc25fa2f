pub mod static_strategies;
pub mod coin_flip;

use crate::error::{MontyError, Result};
use crate::game::Board;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Decision {
    Stay,
    Switch,
}

impl From<bool> for Decision {
    fn from(switch: bool) -> Self {
        if switch { Decision::Switch } else { Decision::Stay }
    }
}

/// What the player does once the host has opened the other doors.
pub trait Strategy: Send + Sync + fmt::Debug {
    fn decide(&mut self, board: &Board, rng: &mut dyn RngCore) -> Decision;
    fn name(&self) -> &str;
    fn clone_box(&self) -> Box<dyn Strategy>;
}

/// Fixed switch-or-stay player, the shape the experiment API takes as a bool.
pub fn fixed(switch: bool) -> Box<dyn Strategy> {
    if switch {
        Box::new(static_strategies::AlwaysSwitch::new())
    } else {
        Box::new(static_strategies::AlwaysStay::new())
    }
}

pub struct StrategyRegistry {
    strategies: HashMap<String, Box<dyn Fn() -> Box<dyn Strategy> + Send + Sync>>,
}

impl StrategyRegistry {
    pub fn new() -> Self {
        let mut registry = Self {
            strategies: HashMap::new(),
        };
        registry.register_builtin();
        registry
    }

    fn register_builtin(&mut self) {
        self.register("switch", || Box::new(static_strategies::AlwaysSwitch::new()));
        self.register("change", || Box::new(static_strategies::AlwaysSwitch::new()));
        self.register("stay", || Box::new(static_strategies::AlwaysStay::new()));
        self.register("keep", || Box::new(static_strategies::AlwaysStay::new()));
        self.register("random", || Box::new(coin_flip::CoinFlip::new()));
    }

    pub fn register<F>(&mut self, name: &str, factory: F)
    where
        F: Fn() -> Box<dyn Strategy> + Send + Sync + 'static,
    {
        self.strategies.insert(name.to_lowercase(), Box::new(factory));
    }

    pub fn create(&self, name: &str) -> Result<Box<dyn Strategy>> {
        self.strategies
            .get(&name.to_lowercase())
            .map(|factory| factory())
            .ok_or_else(|| MontyError::UnknownStrategy(name.to_string()))
    }

    pub fn list(&self) -> Vec<String> {
        let mut names: Vec<String> = self.strategies.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn global() -> &'static StrategyRegistry {
        use std::sync::OnceLock;
        static REGISTRY: OnceLock<StrategyRegistry> = OnceLock::new();
        REGISTRY.get_or_init(StrategyRegistry::new)
    }
}

impl Default for StrategyRegistry {
    fn default() -> Self {
        Self::new()
    }
}
