pub mod error;
pub mod game;
pub mod strategies;
pub mod simulation;
pub mod metrics;
pub mod interactive;

pub use error::{MontyError, Result};
pub use game::{Board, Door, Outcome};
pub use strategies::Strategy;
pub use simulation::{Experiment, ExperimentConfig, Runner, TableConfig};
pub use metrics::{Reporter, Tally};

pub mod prelude {
    pub use crate::error::{MontyError, Result};
    pub use crate::game::{Board, Door, Outcome};
    pub use crate::strategies::{Decision, Strategy, StrategyRegistry};
    pub use crate::simulation::{Experiment, ExperimentConfig, Runner, TableConfig};
    pub use crate::metrics::{Reporter, TableRow, Tally};
}
