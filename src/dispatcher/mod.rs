pub mod dispatcher;
mod dispatcher_tests;

pub use dispatcher::select_elevator;
pub use dispatcher::select_elevator_with;
