use std::{fmt, sync::Arc};

use thiserror::Error;

use crate::{arm::Arm, ledger::OutcomeLedger};

/// Misuse of an agent's lifecycle
///
/// Both variants mean the caller skipped a step, so they are surfaced rather than retried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AgentError {
    #[error("no arms are bound to the agent")]
    NoArmsBound,
    #[error("initialization step needs to be executed first")]
    UninitializedAgent,
}

/// A bandit agent that repeatedly picks one of a fixed list of arms
///
/// Every agent owns its [`OutcomeLedger`]; the arm list is shared and read-only.
/// The [`Display`](fmt::Display) output is the agent's label in logs and plots.
pub trait Agent: fmt::Display {
    /// Bind the arms to choose from
    ///
    /// Must happen before any selection. Arm identity is the position in this list.
    fn bind(&mut self, arms: Arc<[Arm]>);

    /// The agent's record of every pull so far
    fn ledger(&self) -> &OutcomeLedger;

    /// Run any warm-up pulls the strategy needs before it can select arms
    ///
    /// Calling this again after it succeeded is a no-op.
    fn initialize(&mut self) -> Result<(), AgentError> {
        Ok(())
    }

    /// Whether the agent is ready to act
    fn is_initialized(&self) -> bool {
        true
    }

    /// Choose the next arm to pull according to the strategy
    fn select_arm(&mut self) -> Result<usize, AgentError>;

    /// Select an arm, pull it and record the outcome
    ///
    /// **Returns** the reward
    fn take_action(&mut self) -> Result<f64, AgentError>;

    /// Take `n` actions in sequence, stopping at the first error
    fn take_actions(&mut self, n: u32) -> Result<(), AgentError> {
        for _ in 0..n {
            self.take_action()?;
        }
        Ok(())
    }
}
