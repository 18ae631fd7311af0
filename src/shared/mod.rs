pub mod macros;
pub mod structs;

pub use structs::Behaviour;
pub use structs::Call;
pub use structs::ElevatorReport;
pub use structs::ElevatorSnapshot;
pub use structs::ElevatorState;
pub use structs::ProgressEvent;
pub use structs::SimulationSummary;
