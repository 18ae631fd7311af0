pub mod narrator;
pub mod runner;
mod runner_tests;

pub use narrator::Narrator;
pub use runner::Simulation;
