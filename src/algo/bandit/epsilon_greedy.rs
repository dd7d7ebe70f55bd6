use std::{fmt, sync::Arc};

use rand::Rng;

use crate::{
    agent::{Agent, AgentError},
    arm::Arm,
    assert_interval,
    decay::{self, Decay},
    exploration::{Choice, EpsilonGreedy},
    ledger::OutcomeLedger,
    util::argmax_first,
};

use super::BanditCore;

/// Configuration for the [`EpsilonGreedyAgent`]
#[derive(Debug, Clone)]
pub struct EpsilonGreedyAgentConfig<D> {
    /// Epsilon as a function of the number of pulls taken so far
    ///
    /// **Default**: an [`InverseTime`](decay::InverseTime) schedule giving epsilon = 1 / (1 + N)
    pub epsilon_decay_strategy: D,
    /// Seed for the agent's random stream, drawn from entropy if `None`
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for EpsilonGreedyAgentConfig<decay::InverseTime> {
    fn default() -> Self {
        Self {
            epsilon_decay_strategy: decay::InverseTime::harmonic(),
            seed: None,
        }
    }
}

impl EpsilonGreedyAgentConfig<decay::Constant> {
    /// A fixed epsilon
    ///
    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn fixed(epsilon: f64) -> Self {
        assert_interval!(epsilon, 0.0, 1.0);
        Self {
            epsilon_decay_strategy: decay::Constant::new(epsilon),
            seed: None,
        }
    }
}

/// Epsilon greedy bandit agent
///
/// With probability epsilon it pulls a uniformly random arm, otherwise the arm with the highest
/// sample mean. Arms that were never pulled are estimated at `0`, and ties go to the first arm.
pub struct EpsilonGreedyAgent<D: Decay> {
    core: BanditCore,
    exploration: EpsilonGreedy<D>,
}

impl<D: Decay> EpsilonGreedyAgent<D> {
    pub fn new(config: EpsilonGreedyAgentConfig<D>) -> Self {
        Self {
            core: BanditCore::new(config.seed),
            exploration: EpsilonGreedy::new(config.epsilon_decay_strategy),
        }
    }

    fn random_arm(&mut self) -> Result<usize, AgentError> {
        let k = self.core.arms()?.len();
        Ok(self.core.rng.gen_range(0..k))
    }

    fn current_best_arm(&self) -> Result<usize, AgentError> {
        let arms = self.core.arms()?;
        let estimates = (0..arms.len()).map(|arm| {
            self.core
                .ledger
                .lookup(arm)
                .sample_mean()
                .unwrap_or_default()
        });
        // `arms()` rejected an empty list and finite rewards give finite means, so there is a max
        argmax_first(estimates).ok_or(AgentError::NoArmsBound)
    }
}

impl EpsilonGreedyAgent<decay::InverseTime> {
    /// Agent with the adaptive epsilon 1 / (1 + N)
    pub fn adaptive() -> Self {
        Self::new(EpsilonGreedyAgentConfig::default())
    }
}

impl EpsilonGreedyAgent<decay::Constant> {
    /// Agent with a fixed epsilon
    ///
    /// **Panics** if `epsilon` is not in the interval `[0,1]`
    pub fn with_epsilon(epsilon: f64) -> Self {
        Self::new(EpsilonGreedyAgentConfig::fixed(epsilon))
    }
}

impl<D: Decay> fmt::Display for EpsilonGreedyAgent<D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EpsilonGreedyAgent(epsilon={:?})", self.exploration.schedule())
    }
}

impl<D: Decay> Agent for EpsilonGreedyAgent<D> {
    fn bind(&mut self, arms: Arc<[Arm]>) {
        self.core.bind(arms);
    }

    fn ledger(&self) -> &OutcomeLedger {
        &self.core.ledger
    }

    fn select_arm(&mut self) -> Result<usize, AgentError> {
        self.core.arms()?;
        let t = self.core.ledger.total_pulls() as f64;
        match self.exploration.choose(t, &mut self.core.rng) {
            Choice::Explore => self.random_arm(),
            Choice::Exploit => self.current_best_arm(),
        }
    }

    fn take_action(&mut self) -> Result<f64, AgentError> {
        let arm = self.select_arm()?;
        self.core.pull(arm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bernoulli_arms(probs: &[f64]) -> Arc<[Arm]> {
        probs.iter().map(|&p| Arm::bernoulli(p).unwrap()).collect()
    }

    #[test]
    fn unbound_agent_fails() {
        let mut agent = EpsilonGreedyAgent::adaptive();
        assert_eq!(agent.take_action(), Err(AgentError::NoArmsBound));
        assert_eq!(agent.select_arm(), Err(AgentError::NoArmsBound));
        assert_eq!(agent.ledger().total_pulls(), 0, "nothing recorded");
    }

    #[test]
    fn zero_epsilon_exploits() {
        let mut agent = EpsilonGreedyAgent::with_epsilon(0.0);
        let arms = bernoulli_arms(&[0.0, 1.0, 0.0]);
        agent.bind(arms);

        // prime: arm 1 paid 1.0, others 0.0
        for arm in 0..3 {
            agent.core.pull(arm).unwrap();
        }
        for _ in 0..100 {
            assert_eq!(agent.select_arm(), Ok(1), "best sample mean wins");
            agent.take_action().unwrap();
        }
        assert_eq!(agent.ledger().lookup(1).pulls, 101);
    }

    #[test]
    fn unpulled_arms_estimate_zero() {
        let mut agent = EpsilonGreedyAgent::with_epsilon(0.0);
        agent.bind(bernoulli_arms(&[0.5, 0.5, 0.5]));
        assert_eq!(agent.select_arm(), Ok(0), "all-zero tie goes to the first arm");

        // a negative mean ranks below the neutral 0 of unpulled arms
        agent.core.ledger.record_action(0, -1.0);
        assert_eq!(agent.select_arm(), Ok(1));
    }

    #[test]
    fn full_epsilon_explores_every_arm() {
        let mut agent = EpsilonGreedyAgent::new(EpsilonGreedyAgentConfig {
            seed: Some(9),
            ..EpsilonGreedyAgentConfig::fixed(1.0)
        });
        agent.bind(bernoulli_arms(&[0.1, 0.2, 0.3, 0.4]));
        agent.take_actions(400).unwrap();
        for arm in 0..4 {
            assert!(agent.ledger().lookup(arm).pulls > 50, "arm {arm} explored");
        }
    }

    #[test]
    fn seeded_agents_repeat() {
        let arms = bernoulli_arms(&[0.2, 0.5, 0.8]);
        let run = |seed| {
            let mut agent = EpsilonGreedyAgent::new(EpsilonGreedyAgentConfig {
                epsilon_decay_strategy: decay::InverseTime::harmonic(),
                seed: Some(seed),
            });
            agent.bind(arms.clone());
            agent.take_actions(500).unwrap();
            agent.ledger().pulls().to_vec()
        };
        assert_eq!(run(42), run(42), "same seed, same history");
    }

    #[test]
    fn fixed_epsilon_agent_finds_best_arm() {
        let mut agent = EpsilonGreedyAgent::new(EpsilonGreedyAgentConfig {
            seed: Some(3),
            ..EpsilonGreedyAgentConfig::fixed(0.1)
        });
        agent.bind(bernoulli_arms(&[0.0, 0.0, 1.0]));
        agent.take_actions(1000).unwrap();
        assert!(
            agent.ledger().lookup(2).pulls > 800,
            "certain arm dominates once discovered"
        );
    }

    #[test]
    fn linear_schedule_turns_greedy() {
        let mut agent = EpsilonGreedyAgent::new(EpsilonGreedyAgentConfig {
            epsilon_decay_strategy: decay::Linear::new(0.01, 1.0, 0.0).unwrap(),
            seed: Some(5),
        });
        agent.bind(bernoulli_arms(&[0.0, 1.0]));
        agent.take_actions(100).unwrap();
        assert!(agent.ledger().lookup(1).pulls > 0, "explored while epsilon > 0");

        // epsilon has hit 0: every further pull goes to the best sample mean
        let before = agent.ledger().lookup(1).pulls;
        agent.take_actions(50).unwrap();
        assert_eq!(agent.ledger().lookup(1).pulls, before + 50);
    }

    #[test]
    fn exponential_schedule_settles_on_best_arm() {
        let mut agent = EpsilonGreedyAgent::new(EpsilonGreedyAgentConfig {
            epsilon_decay_strategy: decay::Exponential::new(0.05, 1.0, 0.0).unwrap(),
            seed: Some(6),
        });
        agent.bind(bernoulli_arms(&[0.0, 0.0, 1.0]));
        agent.take_actions(1000).unwrap();
        let losers = agent.ledger().lookup(0).pulls + agent.ledger().lookup(1).pulls;
        assert!(losers > 0, "explored early on");
        assert!(
            agent.ledger().lookup(2).pulls > 900,
            "epsilon decays towards 0 and greedy pulls dominate"
        );
    }

    #[test]
    #[should_panic(expected = "Must be in the interval")]
    fn epsilon_out_of_range_panics() {
        EpsilonGreedyAgent::with_epsilon(1.5);
    }

    #[test]
    fn display_label() {
        let agent = EpsilonGreedyAgent::with_epsilon(0.1);
        assert_eq!(
            agent.to_string(),
            "EpsilonGreedyAgent(epsilon=Constant { value: 0.1 })"
        );
    }
}
