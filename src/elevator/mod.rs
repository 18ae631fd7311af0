pub mod fleet;
mod fleet_tests;
pub mod fsm;

pub use fleet::Fleet;
pub use fsm::ElevatorConsumer;
