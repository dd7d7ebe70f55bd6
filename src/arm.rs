use std::fmt;

use rand::Rng;
use rand_distr::{Bernoulli, Distribution, Normal};
use statrs::distribution::{ContinuousCDF, Normal as NormalCdf};
use thiserror::Error;

/// Number of candidates drawn per attempt when sampling a truncated normal arm
pub const CANDIDATE_BATCH: usize = 10;

/// Smallest probability mass a truncated normal arm may keep inside its bounds
pub const MIN_ACCEPTANCE: f64 = 1e-4;

/// Error constructing an [`Arm`]
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ArmError {
    #[error("mean must be finite, got {0}")]
    InvalidMean(f64),
    #[error("spread must be finite and positive, got {0}")]
    InvalidSpread(f64),
    #[error("success probability must be in the interval [0, 1], got {0}")]
    InvalidProbability(f64),
    #[error("lower bound {lower} must be less than upper bound {upper}")]
    InvalidBounds { lower: f64, upper: f64 },
    #[error("bounds keep only {mass:.2e} of the reward distribution")]
    BoundsTooTight { mass: f64 },
}

/// An arm with normally distributed rewards, optionally truncated to `[lower_bound, upper_bound]`
#[derive(Debug, Clone, Copy)]
pub struct NormalArm {
    mean: f64,
    spread: f64,
    lower_bound: Option<f64>,
    upper_bound: Option<f64>,
    dist: Normal<f64>,
}

impl NormalArm {
    pub fn mean(&self) -> f64 {
        self.mean
    }

    pub fn spread(&self) -> f64 {
        self.spread
    }

    pub fn bounds(&self) -> (Option<f64>, Option<f64>) {
        (self.lower_bound, self.upper_bound)
    }

    fn is_truncated(&self) -> bool {
        self.lower_bound.is_some() || self.upper_bound.is_some()
    }

    fn contains(&self, x: f64) -> bool {
        self.lower_bound.map_or(true, |lo| x >= lo) && self.upper_bound.map_or(true, |hi| x <= hi)
    }

    /// Draw a reward
    ///
    /// Truncated arms draw batches of [`CANDIDATE_BATCH`] candidates and return the first one
    /// inside the bounds, drawing another batch whenever a whole batch misses. Construction
    /// guarantees at least [`MIN_ACCEPTANCE`] of the mass lies inside, so this terminates.
    fn pull<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if !self.is_truncated() {
            return self.dist.sample(rng);
        }
        loop {
            let batch: [f64; CANDIDATE_BATCH] = std::array::from_fn(|_| self.dist.sample(&mut *rng));
            if let Some(reward) = batch.into_iter().find(|&x| self.contains(x)) {
                return reward;
            }
        }
    }
}

/// An arm paying `1.0` with probability `p` and `0.0` otherwise
#[derive(Debug, Clone, Copy)]
pub struct BernoulliArm {
    p: f64,
    dist: Bernoulli,
}

impl BernoulliArm {
    pub fn success_probability(&self) -> f64 {
        self.p
    }

    fn pull<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        if self.dist.sample(rng) {
            1.0
        } else {
            0.0
        }
    }
}

/// A reward source an agent can pull
///
/// Arms are immutable generators over fixed parameters; all randomness comes from the caller.
/// An arm's identity is its position in the list an agent is bound to.
#[derive(Debug, Clone, Copy)]
pub enum Arm {
    Normal(NormalArm),
    Bernoulli(BernoulliArm),
}

impl Arm {
    /// Untruncated normal arm
    pub fn normal(mean: f64, spread: f64) -> Result<Self, ArmError> {
        Self::truncated_normal(mean, spread, None, None)
    }

    /// Normal arm whose rewards are restricted to `[lower_bound, upper_bound]`
    ///
    /// **Errors** if the bounds are inverted, NaN, or keep less than [`MIN_ACCEPTANCE`] of the
    /// distribution
    pub fn truncated_normal(
        mean: f64,
        spread: f64,
        lower_bound: Option<f64>,
        upper_bound: Option<f64>,
    ) -> Result<Self, ArmError> {
        if !mean.is_finite() {
            return Err(ArmError::InvalidMean(mean));
        }
        if !(spread.is_finite() && spread > 0.0) {
            return Err(ArmError::InvalidSpread(spread));
        }
        // a NaN bound fails the comparison as well
        let lower = lower_bound.unwrap_or(f64::NEG_INFINITY);
        let upper = upper_bound.unwrap_or(f64::INFINITY);
        if !(lower < upper) {
            return Err(ArmError::InvalidBounds { lower, upper });
        }

        let cdf = NormalCdf::new(mean, spread).map_err(|_| ArmError::InvalidSpread(spread))?;
        let mass =
            upper_bound.map_or(1.0, |hi| cdf.cdf(hi)) - lower_bound.map_or(0.0, |lo| cdf.cdf(lo));
        if !(mass >= MIN_ACCEPTANCE) {
            return Err(ArmError::BoundsTooTight { mass });
        }

        let dist = Normal::new(mean, spread).map_err(|_| ArmError::InvalidSpread(spread))?;
        Ok(Self::Normal(NormalArm {
            mean,
            spread,
            lower_bound,
            upper_bound,
            dist,
        }))
    }

    /// Bernoulli arm with success probability `p`
    pub fn bernoulli(p: f64) -> Result<Self, ArmError> {
        let dist = Bernoulli::new(p).map_err(|_| ArmError::InvalidProbability(p))?;
        Ok(Self::Bernoulli(BernoulliArm { p, dist }))
    }

    /// Pull the arm, drawing one reward
    pub fn pull<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match self {
            Self::Normal(arm) => arm.pull(rng),
            Self::Bernoulli(arm) => arm.pull(rng),
        }
    }
}

impl fmt::Display for Arm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Normal(arm) => {
                write!(f, "Normal(mean={}, spread={}", arm.mean, arm.spread)?;
                if let Some(lo) = arm.lower_bound {
                    write!(f, ", lower={lo}")?;
                }
                if let Some(hi) = arm.upper_bound {
                    write!(f, ", upper={hi}")?;
                }
                write!(f, ")")
            }
            Self::Bernoulli(arm) => write!(f, "Bernoulli(p={})", arm.p),
        }
    }
}
