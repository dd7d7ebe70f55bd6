/// Multi-armed bandit agents
pub mod bandit;
