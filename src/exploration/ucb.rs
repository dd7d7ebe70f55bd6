use rand::{seq::SliceRandom, Rng};

use crate::ledger::{ArmRecord, OutcomeLedger};

/// An upper confidence bound index policy
///
/// Implementors rank arms by an optimistic estimate of their mean: the sample mean plus an
/// exploration bonus that grows with total experience `N` and shrinks with the arm's own pull
/// count `n`. Indices are only meaningful once every arm has at least [`INIT_PULLS`](Self::INIT_PULLS)
/// pulls recorded.
pub trait UCBVariant: Default {
    /// Label used when displaying an agent
    const NAME: &'static str;

    /// Pulls of each arm performed by the initialization step
    const INIT_PULLS: u32;

    /// Confidence index of an arm given its record and the total pull count `N`
    fn index(&self, record: &ArmRecord, total_pulls: u32) -> f64;

    /// An arm that must be pulled before any index is trusted, if there is one
    fn forced_arm<R: Rng + ?Sized>(
        &self,
        _ledger: &OutcomeLedger,
        _num_arms: usize,
        _rng: &mut R,
    ) -> Option<usize> {
        None
    }
}

/// mean + √(2 ln N / n)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UCB1;

impl UCBVariant for UCB1 {
    const NAME: &'static str = "UCB1";
    const INIT_PULLS: u32 = 1;

    fn index(&self, record: &ArmRecord, total_pulls: u32) -> f64 {
        let n = record.pulls as f64;
        let mean = record.reward_sum / n;
        mean + (2.0 * (total_pulls as f64).ln() / n).sqrt()
    }
}

/// mean + √(min(V, 1/4) ln N / n)
///
/// where V = Σx²/n - mean² + √(2 ln N / n) is an upper confidence bound on the arm's variance.
/// The cap of 1/4 is the largest variance a reward in `[0, 1]` can have.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UCB1Tuned;

impl UCBVariant for UCB1Tuned {
    const NAME: &'static str = "UCB1Tuned";
    const INIT_PULLS: u32 = 1;

    fn index(&self, record: &ArmRecord, total_pulls: u32) -> f64 {
        let n = record.pulls as f64;
        let ln_total = (total_pulls as f64).ln();
        let mean = record.reward_sum / n;

        let variance_bound =
            record.reward_squared_sum / n - mean * mean + (2.0 * ln_total / n).sqrt();
        mean + (variance_bound.min(0.25) * ln_total / n).sqrt()
    }
}

/// mean + √(16 SV ln(N - 1) / n)
///
/// where SV = (Σx² - n mean²) / (n - 1) is the sample variance. Arms with fewer than
/// max(3, ⌈8 ln N⌉) pulls are pulled before any index is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UCB1Normal;

impl UCB1Normal {
    /// Minimum pulls an arm needs before its index is trusted
    pub fn min_pulls(total_pulls: u32) -> u32 {
        let log_bound = (8.0 * (total_pulls as f64).ln()).ceil();
        // ln of fewer than 1 pull is negative or -inf, both of which the floor of 3 absorbs
        log_bound.max(3.0) as u32
    }
}

impl UCBVariant for UCB1Normal {
    const NAME: &'static str = "UCB1Normal";
    const INIT_PULLS: u32 = 2;

    fn index(&self, record: &ArmRecord, total_pulls: u32) -> f64 {
        let n = record.pulls as f64;
        let mean = record.reward_sum / n;
        // rounding can push a zero variance slightly negative
        let sample_variance =
            ((record.reward_squared_sum - n * mean * mean) / (n - 1.0)).max(0.0);
        mean + (16.0 * sample_variance * (total_pulls as f64 - 1.0).ln() / n).sqrt()
    }

    fn forced_arm<R: Rng + ?Sized>(
        &self,
        ledger: &OutcomeLedger,
        num_arms: usize,
        rng: &mut R,
    ) -> Option<usize> {
        let threshold = Self::min_pulls(ledger.total_pulls());
        let starved = (0..num_arms)
            .filter(|&arm| ledger.lookup(arm).pulls < threshold)
            .collect::<Vec<_>>();
        starved.choose(rng).copied()
    }
}
