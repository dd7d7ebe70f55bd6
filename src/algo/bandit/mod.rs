use std::sync::Arc;

use log::trace;
use rand::{rngs::StdRng, Rng, SeedableRng};

use crate::{
    agent::{Agent, AgentError},
    arm::Arm,
    decay,
    ledger::OutcomeLedger,
};

pub mod epsilon_greedy;
pub mod ucb;

pub use epsilon_greedy::{EpsilonGreedyAgent, EpsilonGreedyAgentConfig};
pub use ucb::{UCB1Agent, UCB1NormalAgent, UCB1TunedAgent, UCBAgent};

/// State shared by every bandit agent: the bound arms, the ledger, and a private random stream
#[derive(Debug, Clone)]
struct BanditCore {
    arms: Option<Arc<[Arm]>>,
    ledger: OutcomeLedger,
    rng: StdRng,
}

impl BanditCore {
    fn new(seed: Option<u64>) -> Self {
        Self {
            arms: None,
            ledger: OutcomeLedger::new(),
            rng: seed.map_or_else(StdRng::from_entropy, StdRng::seed_from_u64),
        }
    }

    fn bind(&mut self, arms: Arc<[Arm]>) {
        self.arms = Some(arms);
    }

    /// The bound arms, which are never empty
    fn arms(&self) -> Result<&[Arm], AgentError> {
        self.arms
            .as_deref()
            .filter(|arms| !arms.is_empty())
            .ok_or(AgentError::NoArmsBound)
    }

    /// Pull `arm` and record the reward
    fn pull(&mut self, arm: usize) -> Result<f64, AgentError> {
        let source = self.arms()?[arm];
        let reward = source.pull(&mut self.rng);
        trace!("pulled arm {arm} ({source}): {reward}");
        self.ledger.record_action(arm, reward);
        Ok(reward)
    }
}

/// The standard roster compared by repeated trials
///
/// Adaptive epsilon greedy, UCB1, UCB1-Tuned and UCB1-Normal, each seeded from `rng`.
pub fn default_agents<R: Rng + ?Sized>(rng: &mut R) -> Vec<Box<dyn Agent>> {
    vec![
        Box::new(EpsilonGreedyAgent::new(EpsilonGreedyAgentConfig {
            epsilon_decay_strategy: decay::InverseTime::harmonic(),
            seed: Some(rng.gen()),
        })),
        Box::new(UCB1Agent::with_seed(rng.gen())),
        Box::new(UCB1TunedAgent::with_seed(rng.gen())),
        Box::new(UCB1NormalAgent::with_seed(rng.gen())),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn core_requires_arms() {
        let mut core = BanditCore::new(Some(0));
        assert_eq!(core.pull(0), Err(AgentError::NoArmsBound), "unbound");

        core.bind(Arc::from(Vec::<Arm>::new()));
        assert_eq!(core.pull(0), Err(AgentError::NoArmsBound), "empty list");

        core.bind(Arc::from(vec![Arm::bernoulli(1.0).unwrap()]));
        assert_eq!(core.pull(0), Ok(1.0));
        assert_eq!(core.ledger.total_pulls(), 1);
    }

    #[test]
    fn default_roster_labels() {
        let mut rng = StdRng::seed_from_u64(0);
        let labels = default_agents(&mut rng)
            .iter()
            .map(|agent| agent.to_string())
            .collect::<Vec<_>>();
        assert_eq!(labels.len(), 4);
        assert!(labels[0].starts_with("EpsilonGreedyAgent"));
        assert_eq!(labels[1..], ["UCB1()", "UCB1Tuned()", "UCB1Normal()"]);
    }
}
