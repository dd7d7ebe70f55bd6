use std::sync::Arc;

use log::{debug, info};
use rand::{rngs::StdRng, SeedableRng};

use crate::{
    agent::{Agent, AgentError},
    algo::bandit::default_agents,
    arm::Arm,
    util::argmax_first,
    viz::RewardPlot,
};

/// Configuration for the [`ExperimentRunner`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExperimentConfig {
    /// Pulls each agent takes per comparison, initialization pulls included
    ///
    /// **Default**: `1000`
    pub iterations: u32,
    /// Number of comparisons run by [`ExperimentRunner::run`]
    ///
    /// **Default**: `1000`
    pub trials: u32,
    /// Seed of the master random stream that seeds every agent, drawn from entropy if `None`
    ///
    /// **Default**: `None`
    pub seed: Option<u64>,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            iterations: 1000,
            trials: 1000,
            seed: None,
        }
    }
}

/// Run every agent against the same arms until each has taken `iterations` pulls
///
/// Each agent is bound to `arms`, initialized, and then acts for whatever remains of its budget,
/// so an agent that already acted is resumed without repeating its initialization. When `plot`
/// is given, each agent's cumulative reward curve is handed to it.
pub fn compare(
    agents: &mut [Box<dyn Agent>],
    arms: &Arc<[Arm]>,
    iterations: u32,
    mut plot: Option<&mut dyn RewardPlot>,
) -> Result<(), AgentError> {
    for agent in agents.iter_mut() {
        info!("running agent {agent}");
        agent.bind(Arc::clone(arms));
        agent.initialize()?;

        let remaining = iterations.saturating_sub(agent.ledger().total_pulls());
        agent.take_actions(remaining)?;

        if let Some(plot) = plot.as_deref_mut() {
            plot.plot(&agent.to_string(), &agent.ledger().cumulative_rewards());
        }
    }

    if let Some(plot) = plot {
        plot.finish();
    }
    Ok(())
}

/// Compares bandit strategies over many independent trials
pub struct ExperimentRunner {
    config: ExperimentConfig,
    rng: StdRng,
}

impl ExperimentRunner {
    pub fn new(config: ExperimentConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_entropy, StdRng::seed_from_u64);
        Self { config, rng }
    }

    pub fn config(&self) -> &ExperimentConfig {
        &self.config
    }

    /// [`compare`] with the configured iteration budget
    pub fn compare(
        &self,
        agents: &mut [Box<dyn Agent>],
        arms: &Arc<[Arm]>,
        plot: Option<&mut dyn RewardPlot>,
    ) -> Result<(), AgentError> {
        compare(agents, arms, self.config.iterations, plot)
    }

    /// [`run_repeated_trials`](Self::run_repeated_trials) with the configured trials and iterations
    pub fn run(&mut self, arms: &Arc<[Arm]>) -> Result<Vec<u32>, AgentError> {
        let ExperimentConfig {
            iterations, trials, ..
        } = self.config;
        self.run_repeated_trials(arms, trials, iterations)
    }

    /// Pit the [default roster](default_agents) against `arms` `trials` times
    ///
    /// **Returns** how often each strategy collected the highest total reward, in roster order
    pub fn run_repeated_trials(
        &mut self,
        arms: &Arc<[Arm]>,
        trials: u32,
        iterations: u32,
    ) -> Result<Vec<u32>, AgentError> {
        self.run_repeated_trials_with(arms, trials, iterations, |rng| default_agents(rng))
    }

    /// Like [`run_repeated_trials`](Self::run_repeated_trials) with a custom roster
    ///
    /// `make_agents` builds fresh agents for every trial and should seed them from the given
    /// stream, which keeps a seeded runner reproducible. Ties go to the earlier agent.
    pub fn run_repeated_trials_with<F>(
        &mut self,
        arms: &Arc<[Arm]>,
        trials: u32,
        iterations: u32,
        mut make_agents: F,
    ) -> Result<Vec<u32>, AgentError>
    where
        F: FnMut(&mut StdRng) -> Vec<Box<dyn Agent>>,
    {
        // the first roster sizes the tally, so zero trials still report one count per strategy
        let mut agents = make_agents(&mut self.rng);
        let mut win_count = vec![0; agents.len()];
        for trial in 0..trials {
            if trial > 0 {
                agents = make_agents(&mut self.rng);
            }
            if win_count.len() < agents.len() {
                win_count.resize(agents.len(), 0);
            }

            compare(&mut agents, arms, iterations, None)?;

            let totals = agents.iter().map(|agent| agent.ledger().total_reward());
            if let Some(winner) = argmax_first(totals) {
                debug!("trial {trial}: {} won", agents[winner]);
                win_count[winner] += 1;
            }
        }
        Ok(win_count)
    }
}
