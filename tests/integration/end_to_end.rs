use drivingsim::{
    DrivingEnv, EnvConfig, EnvRegistry, Environment, EpisodePhase, Observation, RewardConfig,
    DRIVING_SIM_ENV_ID,
};
use pretty_assertions::assert_eq;

use crate::common::{assert_observation_valid, assert_reward_points_valid};

#[test]
fn test_full_seeded_episode_with_bicycle_engine() {
    let mut env = DrivingEnv::new(EnvConfig::default()).unwrap();
    let (obs, _) = env.reset(Some(42), None).unwrap();
    assert_observation_valid(&obs);
    let reward_points = env.reward_points().to_vec();
    assert_reward_points_valid(&reward_points, &RewardConfig::default());

    let mut total_reward = 0.0;
    for frame in 1..=750u64 {
        let step = env.step(&[0.0, 0.0]).unwrap();
        assert_eq!(step.terminated, frame == 750, "frame {}", frame);
        assert!(!step.truncated);
        assert_eq!(step.observation.image.shape(), [1280, 800, 3]);
        total_reward += step.reward;
    }
    assert_eq!(env.phase(), EpisodePhase::Terminated);
    // A vehicle parked at the origin never reaches the reward area.
    assert_eq!(total_reward, 0.0);

    let mut fresh = DrivingEnv::new(EnvConfig::default()).unwrap();
    fresh.reset(Some(42), None).unwrap();
    assert_eq!(fresh.reward_points(), reward_points.as_slice());
}

#[test]
fn test_seeded_initial_observations_match() {
    let mut first = DrivingEnv::new(EnvConfig::default()).unwrap();
    let mut second = DrivingEnv::new(EnvConfig::default()).unwrap();

    let (a, _) = first.reset(Some(7), None).unwrap();
    let (b, _) = second.reset(Some(7), None).unwrap();

    assert!(a == b, "Identical seeds should render identical frames");
}

#[test]
fn test_driving_into_reward_point_collects_it_once() {
    let config = EnvConfig {
        duration_s: 2.0,
        rewards: RewardConfig {
            count: 1,
            reward: 10.0,
            x_range: [60.0, 60.0],
            y_range: [0.0, 0.0],
        },
        ..Default::default()
    };
    let mut env = DrivingEnv::new(config).unwrap();
    env.reset(Some(0), None).unwrap();

    let rewards: Vec<f64> = (0..30)
        .map(|_| env.step(&[100.0, 0.0]).unwrap().reward)
        .collect();

    assert_eq!(rewards.iter().filter(|r| **r != 0.0).count(), 1);
    assert_eq!(rewards.iter().sum::<f64>(), 10.0);

    let remaining = &env.engine().unwrap().state().reward_points;
    assert!(remaining.is_empty());
    // The environment keeps the points it handed to the engine.
    assert_eq!(env.reward_points().len(), 1);
}

#[test]
fn test_earlier_observations_are_not_modified_by_later_steps() {
    let mut env = DrivingEnv::new(EnvConfig::default()).unwrap();
    let (initial, _) = env.reset(Some(3), None).unwrap();
    let snapshot: Observation = initial.clone();

    let mut last = None;
    for _ in 0..10 {
        last = Some(env.step(&[100.0, 0.5]).unwrap().observation);
    }
    let last = last.unwrap();

    assert!(initial == snapshot);
    assert_eq!(initial.speed, [0.0]);
    assert!(last.speed[0] > 0.0);
    assert!(initial.image != last.image, "The vehicle should have moved");
}

#[test]
fn test_registry_builds_driving_env() {
    let registry = EnvRegistry::default();
    assert!(registry.contains(DRIVING_SIM_ENV_ID));

    let mut env = registry.make(DRIVING_SIM_ENV_ID, &EnvConfig::default()).unwrap();
    let (obs, _) = env.reset(Some(1), None).unwrap();
    assert_observation_valid(&obs);
    assert_eq!(env.action_space().shape(), [2]);
    assert!(env.step(&[0.0, 0.0]).is_ok());
}
