use std::{fmt, sync::Arc};

use log::info;

use crate::{
    agent::{Agent, AgentError},
    arm::Arm,
    exploration::{UCBVariant, UCB1Normal, UCB1Tuned, UCB1},
    ledger::OutcomeLedger,
    util::argmax_first,
};

use super::BanditCore;

/// Upper confidence bound agent
///
/// The agent must be [initialized](Agent::initialize) once after binding its arms, which pulls
/// every arm [`V::INIT_PULLS`](UCBVariant::INIT_PULLS) times. Afterwards each action pulls the
/// arm with the highest confidence index, ties going to the first arm.
pub struct UCBAgent<V: UCBVariant> {
    core: BanditCore,
    variant: V,
    initialized: bool,
}

/// UCB1 (Auer et al. 2002)
pub type UCB1Agent = UCBAgent<UCB1>;

/// UCB1-Tuned, which caps the exploration bonus by an empirical variance bound
pub type UCB1TunedAgent = UCBAgent<UCB1Tuned>;

/// UCB1-Normal, for normally distributed rewards
pub type UCB1NormalAgent = UCBAgent<UCB1Normal>;

impl<V: UCBVariant> UCBAgent<V> {
    pub fn new() -> Self {
        Self::from_seed(None)
    }

    /// Agent with a deterministic random stream
    pub fn with_seed(seed: u64) -> Self {
        Self::from_seed(Some(seed))
    }

    fn from_seed(seed: Option<u64>) -> Self {
        Self {
            core: BanditCore::new(seed),
            variant: V::default(),
            initialized: false,
        }
    }
}

impl<V: UCBVariant> Default for UCBAgent<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: UCBVariant> fmt::Display for UCBAgent<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}()", V::NAME)
    }
}

impl<V: UCBVariant> Agent for UCBAgent<V> {
    fn bind(&mut self, arms: Arc<[Arm]>) {
        self.core.bind(arms);
    }

    fn ledger(&self) -> &OutcomeLedger {
        &self.core.ledger
    }

    fn initialize(&mut self) -> Result<(), AgentError> {
        if self.initialized {
            info!("{}: initialization step has been executed before", self);
            return Ok(());
        }

        let k = self.core.arms()?.len();
        for arm in 0..k {
            for _ in 0..V::INIT_PULLS {
                self.core.pull(arm)?;
            }
        }
        self.initialized = true;
        Ok(())
    }

    fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn select_arm(&mut self) -> Result<usize, AgentError> {
        if !self.initialized {
            return Err(AgentError::UninitializedAgent);
        }

        let core = &mut self.core;
        let k = core.arms.as_deref().map_or(0, <[Arm]>::len);
        if k == 0 {
            return Err(AgentError::NoArmsBound);
        }
        // arms bound after initialization have no statistics to index
        if (0..k).any(|arm| core.ledger.lookup(arm).pulls < V::INIT_PULLS) {
            return Err(AgentError::UninitializedAgent);
        }
        if let Some(arm) = self.variant.forced_arm(&core.ledger, k, &mut core.rng) {
            return Ok(arm);
        }

        let total = core.ledger.total_pulls();
        let indices = (0..k).map(|arm| self.variant.index(&core.ledger.lookup(arm), total));
        // k > 0 and every arm met its initialization pulls, so no index is NaN and there is a max
        argmax_first(indices).ok_or(AgentError::NoArmsBound)
    }

    fn take_action(&mut self) -> Result<f64, AgentError> {
        let arm = self.select_arm()?;
        self.core.pull(arm)
    }
}
