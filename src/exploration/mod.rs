/// Exploration policy result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Explore,
    Exploit,
}

mod epsilon_greedy;
mod ucb;

pub use epsilon_greedy::EpsilonGreedy;
pub use ucb::{UCBVariant, UCB1Normal, UCB1Tuned, UCB1};
