use rand::Rng;

use crate::decay::Decay;

use super::Choice;

/// Epsilon greedy exploration policy with time-decaying epsilon threshold
#[derive(Debug, Clone)]
pub struct EpsilonGreedy<D: Decay> {
    epsilon: D,
}

impl<D: Decay> EpsilonGreedy<D> {
    /// Initialize epsilon greedy policy with a decay strategy
    pub fn new(decay: D) -> Self {
        Self { epsilon: decay }
    }

    /// The epsilon schedule
    pub fn schedule(&self) -> &D {
        &self.epsilon
    }

    /// Invoke epsilon greedy policy at time `t`
    ///
    /// Explores when a uniform draw from `[0, 1)` falls below epsilon, so an epsilon of `0` never explores.
    pub fn choose<R: Rng + ?Sized>(&self, t: f64, rng: &mut R) -> Choice {
        let epsilon = self.epsilon.evaluate(t);
        if rng.gen::<f64>() < epsilon {
            Choice::Explore
        } else {
            Choice::Exploit
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, SeedableRng};

    use super::*;
    use crate::decay::{Constant, InverseTime};

    #[test]
    fn extremes_are_deterministic() {
        let mut rng = StdRng::seed_from_u64(0);
        let greedy = EpsilonGreedy::new(Constant::new(0.0));
        let random = EpsilonGreedy::new(Constant::new(1.0));
        for t in 0..1000 {
            assert_eq!(greedy.choose(t as f64, &mut rng), Choice::Exploit);
            assert_eq!(random.choose(t as f64, &mut rng), Choice::Explore);
        }
    }

    #[test]
    fn harmonic_schedule_explores_less_over_time() {
        let mut rng = StdRng::seed_from_u64(1);
        let policy = EpsilonGreedy::new(InverseTime::harmonic());
        assert_eq!(policy.choose(0.0, &mut rng), Choice::Explore, "epsilon starts at 1");

        let explored = (0..1000)
            .filter(|_| policy.choose(10_000.0, &mut rng) == Choice::Explore)
            .count();
        assert!(explored < 10, "explored {explored} times at epsilon ~ 1e-4");
    }
}
