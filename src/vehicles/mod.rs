pub mod controls;
pub mod state;

pub use controls::{Action, SteeringPolicy};
pub use state::VehicleState;
