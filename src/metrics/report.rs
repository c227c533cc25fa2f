use crate::error::Result;
use crate::simulation::{Runner, TableConfig};
use indicatif::{ProgressBar, ProgressStyle};
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableRow {
    pub door_count: usize,
    pub freq_with_switch: f64,
    pub freq_without_switch: f64,
}

/// Win frequency of both strategies for every door count in a range.
pub struct Reporter {
    config: TableConfig,
}

impl Reporter {
    pub fn new(config: TableConfig) -> Self {
        Self { config }
    }

    /// Rows in ascending door-count order.
    ///
    /// Every cell runs on its own seed derived from the base seed, so the
    /// sequential and parallel paths produce the same table.
    pub fn table(&self) -> Result<Vec<TableRow>> {
        self.config.validate()?;
        let base_seed = self.config.seed.unwrap_or_else(rand::random);
        let games = self.config.num_games;
        let counts: Vec<usize> = (self.config.min_doors..=self.config.max_doors).collect();

        info!(
            "Dependency table: doors {}..={}, {} games per cell, seed {}",
            self.config.min_doors, self.config.max_doors, games, base_seed
        );

        let pb = if self.config.progress {
            ProgressBar::new(counts.len() as u64 * 2)
        } else {
            ProgressBar::hidden()
        };
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.orange/yellow} {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░"),
        );

        let cell = |doors: usize, switch: bool| -> Result<f64> {
            let seed = base_seed.wrapping_add(((doors as u64) << 1) | switch as u64);
            let freq = Runner::seeded(seed).run_experiment(games, doors, switch)?;
            pb.inc(1);
            Ok(freq)
        };
        let row = |doors: usize| -> Result<TableRow> {
            let row = TableRow {
                door_count: doors,
                freq_with_switch: cell(doors, true)?,
                freq_without_switch: cell(doors, false)?,
            };
            info!(
                "{} doors: switch {:.6}, stay {:.6}",
                row.door_count, row.freq_with_switch, row.freq_without_switch
            );
            Ok(row)
        };

        let rows = if self.config.parallel {
            counts.into_par_iter().map(row).collect::<Result<Vec<_>>>()?
        } else {
            counts.into_iter().map(row).collect::<Result<Vec<_>>>()?
        };

        pb.finish_with_message("Table complete");
        Ok(rows)
    }
}

/// Builds the table from one injected runner, row by row.
pub fn table<R: Rng>(
    runner: &mut Runner<R>,
    n_trials: u64,
    low: usize,
    high: usize,
) -> Result<Vec<TableRow>> {
    TableConfig::default()
        .with_games(n_trials)
        .with_range(low, high)
        .validate()?;

    (low..=high)
        .map(|doors| -> Result<TableRow> {
            Ok(TableRow {
                door_count: doors,
                freq_with_switch: runner.run_experiment(n_trials, doors, true)?,
                freq_without_switch: runner.run_experiment(n_trials, doors, false)?,
            })
        })
        .collect()
}

pub fn render_table(rows: &[TableRow], num_games: u64) -> String {
    let mut out = String::new();
    out.push_str("Relative frequency of wins depending on the number of doors and the strategy\n");
    out.push_str(&format!("Number of experiments for each number of doors: {}\n", num_games));
    out.push_str("╔═══════╦═══════════════╦══════════════════╗\n");
    out.push_str("║ Doors ║ With changing ║ Without changing ║\n");
    out.push_str("╠═══════╬═══════════════╬══════════════════╣\n");
    for row in rows {
        out.push_str(&format!(
            "║ {:<5} ║ {:<13.6} ║ {:<16.6} ║\n",
            row.door_count, row.freq_with_switch, row.freq_without_switch
        ));
    }
    out.push_str("╚═══════╩═══════════════╩══════════════════╝\n");
    out
}
