//! Multi-armed bandit simulation
//!
//! Agents repeatedly pick one of several [arms](arm::Arm) with unknown reward distributions,
//! record what they got in an [`OutcomeLedger`](ledger::OutcomeLedger), and trade exploration
//! against exploitation according to their strategy. The [`runner`] pits strategies against the
//! same arms and tallies which one collects the most reward.

/// The bandit agent interface
pub mod agent;

/// Implemented bandit algorithms
pub mod algo;

/// Reward sources
pub mod arm;

/// Implementations of strategies for time-decaying hyperparameters
pub mod decay;

/// Exploration policies
pub mod exploration;

/// Per-agent record of pulls and rewards
pub mod ledger;

/// Comparison harness
pub mod runner;

/// Results visualization boundary
pub mod viz;

mod util;
