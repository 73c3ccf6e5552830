use std::{env, error::Error, io};
use tracing::info;

use drivingsim::{
    utils::wrap_angle, Action, DrivingEnv, EnvConfig, Environment, RewardPoint, VehicleState,
};

const CRUISE_SPEED: f64 = 150.0; // px/s

/// Steer towards the nearest remaining reward point at a steady speed.
fn pursue(vehicle: &VehicleState, targets: &[RewardPoint]) -> Action {
    let nearest = targets.iter().min_by(|a, b| {
        let da = (a.position - vehicle.position).norm();
        let db = (b.position - vehicle.position).norm();
        da.total_cmp(&db)
    });

    let steering_angle = nearest.map_or(0.0, |target| {
        let to_target = target.position - vehicle.position;
        wrap_angle(to_target.y.atan2(to_target.x) - vehicle.angle)
    });
    let acceleration = (CRUISE_SPEED - vehicle.speed) * 2.0;

    Action::new(acceleration, steering_angle)
}

/// Run one seeded episode and save the last frame.
///
/// Usage: `drivingsim [SEED] [OUTPUT_PNG]`. Set `DRIVINGSIM_CONFIG` to a YAML
/// file to override the default configuration.
fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();

    let mut args = env::args().skip(1);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(42);
    let output = args.next().unwrap_or_else(|| "frame.png".to_string());

    let config = match env::var("DRIVINGSIM_CONFIG") {
        Ok(path) => EnvConfig::from_yaml_file(path)?,
        Err(_) => EnvConfig::default(),
    };

    let mut driving_env = DrivingEnv::new(config)?;
    driving_env.reset(Some(seed), None)?;
    let mut total_reward = 0.0;

    let last_observation = loop {
        let action = match driving_env.engine() {
            Some(sim) => pursue(&sim.state().vehicle_state, &sim.state().reward_points),
            None => Action::default(),
        };
        let step = driving_env.step(&action.to_array())?;
        total_reward += step.reward;

        if step.terminated || step.truncated {
            break step.observation;
        }
    };

    info!(
        "Episode finished after {} frames with total reward {}",
        driving_env.frames_taken(),
        total_reward
    );
    last_observation.image.as_image().save(&output)?;
    println!("Saved final frame to {}", output);

    Ok(())
}
