/// A single recorded pull
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pull {
    /// Index of the pulled arm in the bound arm list
    pub arm: usize,
    /// The reward received
    pub reward: f64,
}

/// Aggregate statistics for one arm
///
/// The sums are exact running sums, so every estimate derived from them is reproducible
/// from the raw rewards.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ArmRecord {
    pub pulls: u32,
    pub reward_sum: f64,
    pub reward_squared_sum: f64,
}

impl ArmRecord {
    /// `reward_sum / pulls`, or `None` if the arm was never pulled
    pub fn sample_mean(&self) -> Option<f64> {
        (self.pulls > 0).then(|| self.reward_sum / self.pulls as f64)
    }
}

/// Log of every pull an agent made, with per-arm aggregates and totals
#[derive(Debug, Clone, Default)]
pub struct OutcomeLedger {
    records: Vec<ArmRecord>,
    history: Vec<Pull>,
    total_pulls: u32,
    total_reward: f64,
}

impl OutcomeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the reward received from pulling `arm`
    pub fn record_action(&mut self, arm: usize, reward: f64) {
        if arm >= self.records.len() {
            self.records.resize(arm + 1, ArmRecord::default());
        }
        let record = &mut self.records[arm];
        record.pulls += 1;
        record.reward_sum += reward;
        record.reward_squared_sum += reward * reward;

        self.total_pulls += 1;
        self.total_reward += reward;
        self.history.push(Pull { arm, reward });
    }

    /// Aggregates for `arm`, zeroed if it has never been pulled
    pub fn lookup(&self, arm: usize) -> ArmRecord {
        self.records.get(arm).copied().unwrap_or_default()
    }

    pub fn total_pulls(&self) -> u32 {
        self.total_pulls
    }

    pub fn total_reward(&self) -> f64 {
        self.total_reward
    }

    /// Every pull in the order it happened
    pub fn pulls(&self) -> &[Pull] {
        &self.history
    }

    /// Rewards in pull order
    pub fn rewards(&self) -> impl Iterator<Item = f64> + '_ {
        self.history.iter().map(|p| p.reward)
    }

    /// Running total of rewards after each pull
    pub fn cumulative_rewards(&self) -> Vec<f64> {
        self.rewards()
            .scan(0.0, |acc, r| {
                *acc += r;
                Some(*acc)
            })
            .collect()
    }
}
