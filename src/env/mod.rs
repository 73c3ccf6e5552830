mod clock;
mod controller;
mod errors;
mod observation;
mod registry;
mod rewards;
mod spaces;
mod traits;

pub use clock::EpisodeClock;
pub use controller::{DrivingEnv, EpisodePhase};
pub use errors::EnvError;
pub use observation::{assemble_observation, ImageObservation, Observation};
pub use registry::{BoxedEnv, EnvConstructor, EnvRegistry, DRIVING_SIM_ENV_ID};
pub use rewards::sample_reward_points;
pub use spaces::{ActionSpace, Interval, ObservationSpace};
pub use traits::{Environment, Info, StepResult};
