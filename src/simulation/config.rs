use crate::error::{MontyError, Result};
use crate::game::board::check_door_count;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentConfig {
    pub name: String,
    pub strategy_name: String,
    pub num_games: u64,
    pub num_doors: usize,
    /// Fixed first pick (0-based). Random each game when `None`.
    pub initial_pick: Option<usize>,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub show_progress: bool,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            name: "default_experiment".to_string(),
            strategy_name: "switch".to_string(),
            num_games: 10_000,
            num_doors: 3,
            initial_pick: None,
            seed: None,
            parallel: false,
            show_progress: false,
        }
    }
}

impl ExperimentConfig {
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn with_strategy(mut self, strategy: impl Into<String>) -> Self {
        self.strategy_name = strategy.into();
        self
    }

    pub fn with_games(mut self, games: u64) -> Self {
        self.num_games = games;
        self
    }

    pub fn with_doors(mut self, doors: usize) -> Self {
        self.num_doors = doors;
        self
    }

    pub fn with_initial_pick(mut self, pick: usize) -> Self {
        self.initial_pick = Some(pick);
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_show_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_trial_count(self.num_games)?;
        check_door_count(self.num_doors)?;
        if let Some(pick) = self.initial_pick {
            if pick >= self.num_doors {
                return Err(MontyError::config(format!(
                    "initial pick {} is outside 0..{}",
                    pick, self.num_doors
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    pub num_games: u64,
    pub min_doors: usize,
    pub max_doors: usize,
    pub seed: Option<u64>,
    pub parallel: bool,
    pub progress: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            num_games: 10_000,
            min_doors: 3,
            max_doors: 10,
            seed: None,
            parallel: false,
            progress: true,
        }
    }
}

impl TableConfig {
    pub fn with_range(mut self, low: usize, high: usize) -> Self {
        self.min_doors = low;
        self.max_doors = high;
        self
    }

    pub fn with_games(mut self, games: u64) -> Self {
        self.num_games = games;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn validate(&self) -> Result<()> {
        check_trial_count(self.num_games)?;
        if self.min_doors > self.max_doors {
            return Err(MontyError::config(format!(
                "door range {}..={} is empty",
                self.min_doors, self.max_doors
            )));
        }
        check_door_count(self.min_doors)
    }
}

pub(crate) fn check_trial_count(n_trials: u64) -> Result<()> {
    if n_trials == 0 {
        return Err(MontyError::config("an experiment needs at least one game"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(ExperimentConfig::default().validate().is_ok());
        assert!(TableConfig::default().validate().is_ok());
    }

    #[test]
    fn experiment_config_rejects_bad_values() {
        let base = ExperimentConfig::default();
        assert!(base.clone().with_games(0).validate().is_err());
        assert!(base.clone().with_doors(2).validate().is_err());
        assert!(base.clone().with_doors(4).with_initial_pick(4).validate().is_err());
        assert!(base.with_doors(4).with_initial_pick(3).validate().is_ok());
    }

    #[test]
    fn builders_fill_every_field() {
        let config = ExperimentConfig::default()
            .with_name("five_doors")
            .with_strategy("random")
            .with_games(42)
            .with_doors(5)
            .with_initial_pick(4)
            .with_seed(9)
            .with_parallel(true)
            .with_show_progress(true);

        assert_eq!(config.name, "five_doors");
        assert_eq!(config.strategy_name, "random");
        assert_eq!(config.num_games, 42);
        assert_eq!(config.num_doors, 5);
        assert_eq!(config.initial_pick, Some(4));
        assert_eq!(config.seed, Some(9));
        assert!(config.parallel);
        assert!(config.show_progress);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn table_config_rejects_bad_ranges() {
        let base = TableConfig::default();
        assert!(base.clone().with_range(5, 4).validate().is_err());
        assert!(base.clone().with_range(2, 6).validate().is_err());
        assert!(base.clone().with_games(0).validate().is_err());
        assert!(base.with_range(3, 3).validate().is_ok());
    }
}
