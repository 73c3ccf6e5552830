mod simulator;
mod state;
mod traits;

pub use simulator::{BicycleEngineFactory, Simulator, SimulatorConfig};
pub use state::{RewardPoint, SimSnapshot, SimState};
pub use traits::{EngineFactory, EngineSnapshot, SimulationEngine};
