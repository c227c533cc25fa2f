pub mod config;
pub use config::{ExperimentConfig, TableConfig};

use crate::error::{MontyError, Result};
use crate::game::{Board, Outcome};
use crate::game::board::check_door_count;
use crate::metrics::Tally;
use crate::strategies::{self, Decision, Strategy, StrategyRegistry};
use config::check_trial_count;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};
use tracing::{debug, info};

/// Games per parallel chunk. Each chunk gets its own derived seed, so results
/// don't depend on the thread count.
pub const CHUNK_SIZE: u64 = 4096;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrialRecord {
    pub outcome: Outcome,
    pub first_pick_right: bool,
}

/// Plays complete games against an injected random source.
pub struct Runner<R: Rng = StdRng> {
    rng: R,
    show_progress: bool,
}

impl Runner<StdRng> {
    pub fn seeded(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }

    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
}

impl<R: Rng> Runner<R> {
    pub fn new(rng: R) -> Self {
        Self {
            rng,
            show_progress: false,
        }
    }

    /// Logs every board as it is played.
    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    /// One full game with a fixed switch-or-stay player.
    pub fn run_trial(
        &mut self,
        n_doors: usize,
        switch_strategy: bool,
        initial_pick: Option<usize>,
    ) -> Result<Outcome> {
        let mut strategy = strategies::fixed(switch_strategy);
        self.play(n_doors, strategy.as_mut(), initial_pick)
            .map(|record| record.outcome)
    }

    /// Pick, reveal, let the strategy decide, open everything.
    ///
    /// The returned outcome is always `Win` or `Loss`.
    pub fn play(
        &mut self,
        n_doors: usize,
        strategy: &mut dyn Strategy,
        initial_pick: Option<usize>,
    ) -> Result<TrialRecord> {
        let mut board = Board::new(n_doors, &mut self.rng)?;

        let pick = match initial_pick {
            Some(pick) => pick,
            None => self.rng.gen_range(0..n_doors),
        };
        board.pick(pick)?;
        let first_pick_right = pick == board.prize_index();
        self.trace(&board, "picked");

        board.reveal_others(&mut self.rng)?;
        self.trace(&board, "revealed");

        if strategy.decide(&board, &mut self.rng) == Decision::Switch {
            board.switch()?;
            self.trace(&board, "switched");
        }

        board.reveal_all();
        let outcome = board.outcome();
        self.trace(&board, "resolved");

        if outcome == Outcome::Undetermined {
            return Err(MontyError::UndeterminedOutcome);
        }

        debug!(
            "doors={} prize={} first_pick={} final_pick={:?} -> {:?}",
            n_doors,
            board.prize_index(),
            pick,
            board.picked_index(),
            outcome
        );

        Ok(TrialRecord {
            outcome,
            first_pick_right,
        })
    }

    /// Relative frequency of wins over `n_trials` games.
    pub fn run_experiment(
        &mut self,
        n_trials: u64,
        n_doors: usize,
        switch_strategy: bool,
    ) -> Result<f64> {
        let mut strategy = strategies::fixed(switch_strategy);
        self.tally(n_trials, n_doors, strategy.as_mut(), None)
            .map(|tally| tally.frequency())
    }

    pub fn tally(
        &mut self,
        n_trials: u64,
        n_doors: usize,
        strategy: &mut dyn Strategy,
        initial_pick: Option<usize>,
    ) -> Result<Tally> {
        check_trial_count(n_trials)?;
        check_door_count(n_doors)?;

        let mut tally = Tally::new();
        for i in 0..n_trials {
            if self.show_progress {
                info!("Playing game {} of {}...", i + 1, n_trials);
            }
            let record = self.play(n_doors, strategy, initial_pick)?;
            tally.record(record.outcome, record.first_pick_right);
        }
        Ok(tally)
    }

    fn trace(&self, board: &Board, stage: &str) {
        if !self.show_progress {
            return;
        }
        info!("[{}]", stage);
        for line in board.render() {
            info!("  {}", line);
        }
        if stage == "resolved" {
            info!("  {}", board.outcome());
        }
    }
}

/// Same as [`Runner::tally`] but spread over the rayon pool.
pub fn tally_parallel(
    n_trials: u64,
    n_doors: usize,
    strategy: &dyn Strategy,
    initial_pick: Option<usize>,
    seed: u64,
) -> Result<Tally> {
    check_trial_count(n_trials)?;
    check_door_count(n_doors)?;

    let chunks = n_trials.div_ceil(CHUNK_SIZE);
    let tallies = (0..chunks)
        .into_par_iter()
        .map(|chunk| {
            let start = chunk * CHUNK_SIZE;
            let len = CHUNK_SIZE.min(n_trials - start);
            let mut runner = Runner::seeded(seed.wrapping_add(chunk));
            let mut strategy = strategy.clone_box();
            runner.tally(len, n_doors, strategy.as_mut(), initial_pick)
        })
        .collect::<Result<Vec<Tally>>>()?;

    Ok(tallies.into_iter().sum())
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExperimentReport {
    pub name: String,
    pub strategy_name: String,
    pub num_doors: usize,
    pub seed: u64,
    pub tally: Tally,
    pub frequency: f64,
    pub elapsed: Duration,
}

/// A configured batch of games, the way the CLI's `auto` command runs one.
pub struct Experiment {
    config: ExperimentConfig,
}

impl Experiment {
    pub fn new(config: ExperimentConfig) -> Self {
        Self { config }
    }

    pub fn run(&self) -> Result<ExperimentReport> {
        self.config.validate()?;
        let mut strategy = StrategyRegistry::global().create(&self.config.strategy_name)?;

        let seed = self.config.seed.unwrap_or_else(rand::random);

        info!("Starting experiment: {}", self.config.name);
        info!("Strategy: {}", strategy.name());
        info!("Games: {}, Doors: {}", self.config.num_games, self.config.num_doors);
        info!("Seed: {}", seed);

        let start = Instant::now();
        let tally = if self.config.parallel && !self.config.show_progress {
            tally_parallel(
                self.config.num_games,
                self.config.num_doors,
                strategy.as_ref(),
                self.config.initial_pick,
                seed,
            )?
        } else {
            Runner::seeded(seed)
                .with_progress(self.config.show_progress)
                .tally(
                    self.config.num_games,
                    self.config.num_doors,
                    strategy.as_mut(),
                    self.config.initial_pick,
                )?
        };
        let elapsed = start.elapsed();

        info!(
            "Won {} of {} games ({:.2}%), first pick right in {:.2}%",
            tally.wins,
            tally.trials,
            tally.frequency() * 100.0,
            tally.first_pick_frequency() * 100.0
        );

        Ok(ExperimentReport {
            name: self.config.name.clone(),
            strategy_name: strategy.name().to_string(),
            num_doors: self.config.num_doors,
            seed,
            tally,
            frequency: tally.frequency(),
            elapsed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trials_always_resolve() {
        let mut runner = Runner::seeded(17);
        for n in 3..=8 {
            for switch in [true, false] {
                let outcome = runner.run_trial(n, switch, None).unwrap();
                assert_ne!(outcome, Outcome::Undetermined);
            }
        }
    }

    #[test]
    fn fixed_pick_is_used() {
        let mut runner = Runner::seeded(2);
        let mut strategy = strategies::fixed(false);
        for _ in 0..200 {
            let record = runner.play(4, strategy.as_mut(), Some(3)).unwrap();
            // staying with door 3 wins exactly when it held the prize
            assert_eq!(record.outcome.is_win(), record.first_pick_right);
        }
    }

    #[test]
    fn switching_wins_exactly_when_first_pick_was_wrong() {
        let mut runner = Runner::seeded(8);
        let mut strategy = strategies::fixed(true);
        for n in [3, 5, 10] {
            for _ in 0..200 {
                let record = runner.play(n, strategy.as_mut(), None).unwrap();
                assert_eq!(record.outcome.is_win(), !record.first_pick_right);
            }
        }
    }

    #[test]
    fn bad_configuration_fails_before_playing() {
        let mut runner = Runner::seeded(0);
        assert!(matches!(
            runner.run_experiment(0, 3, true),
            Err(MontyError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            runner.run_experiment(10, 2, true),
            Err(MontyError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            runner.run_trial(3, true, Some(3)),
            Err(MontyError::IndexOutOfRange { index: 3, len: 3 })
        ));
    }

    #[test]
    fn same_seed_same_result() {
        let a = Runner::seeded(99).run_experiment(500, 4, true).unwrap();
        let b = Runner::seeded(99).run_experiment(500, 4, true).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn parallel_tally_counts_every_game() {
        let strategy = strategies::fixed(true);
        let tally = tally_parallel(CHUNK_SIZE * 2 + 17, 3, strategy.as_ref(), None, 5).unwrap();
        assert_eq!(tally.trials, CHUNK_SIZE * 2 + 17);

        let again = tally_parallel(CHUNK_SIZE * 2 + 17, 3, strategy.as_ref(), None, 5).unwrap();
        assert_eq!(tally, again);
    }

    #[test]
    fn experiment_reports_its_seed() {
        let config = ExperimentConfig::default()
            .with_games(300)
            .with_doors(5)
            .with_strategy("stay")
            .with_seed(1234);
        let report = Experiment::new(config).run().unwrap();

        assert_eq!(report.seed, 1234);
        assert_eq!(report.tally.trials, 300);
        assert_eq!(report.strategy_name, "Stay");
        assert_eq!(report.frequency, report.tally.frequency());
    }

    #[test]
    fn parallel_experiment_matches_parallel_tally() {
        let config = ExperimentConfig::default()
            .with_games(CHUNK_SIZE + 100)
            .with_doors(4)
            .with_seed(21)
            .with_parallel(true);
        let report = Experiment::new(config).run().unwrap();

        let strategy = strategies::fixed(true);
        let expected = tally_parallel(CHUNK_SIZE + 100, 4, strategy.as_ref(), None, 21).unwrap();
        assert_eq!(report.tally, expected);
    }

    #[test]
    fn experiment_rejects_unknown_strategy() {
        let config = ExperimentConfig::default().with_strategy("psychic");
        assert!(matches!(
            Experiment::new(config).run(),
            Err(MontyError::UnknownStrategy(_))
        ));
    }
}
