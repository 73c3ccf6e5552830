use drivingsim::{
    DrivingEnv, EnvConfig, EnvError, Environment, EpisodePhase, RewardConfig, SteeringPolicy,
};
use pretty_assertions::assert_eq;
use std::f64::consts::PI;
use std::time::Duration;

use crate::common::{assert_observation_valid, assert_reward_points_valid, fake_env, FakeBehavior};

fn default_fake() -> (
    DrivingEnv<crate::common::FakeFactory>,
    std::rc::Rc<crate::common::FakeLog>,
) {
    fake_env(EnvConfig::default(), FakeBehavior::default())
}

#[test]
fn test_same_seed_same_reward_points_across_environments() {
    for seed in [0, 1, 42, 1234, u64::MAX] {
        let (mut first, _) = default_fake();
        let (mut second, _) = default_fake();

        first.reset(Some(seed), None).unwrap();
        second.reset(Some(seed), None).unwrap();

        assert_eq!(
            first.reward_points(),
            second.reward_points(),
            "Seed {} produced different reward points",
            seed
        );
    }
}

#[test]
fn test_engine_receives_sampled_reward_points() {
    let (mut env, log) = default_fake();
    env.reset(Some(9), None).unwrap();

    let constructed = log.constructed.borrow();
    assert_eq!(constructed.len(), 1);
    assert_eq!(constructed[0].as_slice(), env.reward_points());
    assert_eq!(env.engine().unwrap().reward_points.as_slice(), env.reward_points());
}

#[test]
fn test_reward_points_within_bounds_for_many_seeds() {
    let (mut env, _) = default_fake();
    let config = RewardConfig::default();

    for seed in 0..50 {
        env.reset(Some(seed), None).unwrap();
        assert_reward_points_valid(env.reward_points(), &config);
    }
}

#[test]
fn test_reset_state() {
    let (mut env, _) = default_fake();
    let (obs, info) = env.reset(Some(3), None).unwrap();

    assert_eq!(env.phase(), EpisodePhase::Running);
    assert_eq!(env.frames_taken(), 0);
    assert_eq!(env.elapsed_s(), 0.0);
    assert_eq!(obs.speed, [0.0]);
    assert!(info.is_empty());
    assert_observation_valid(&obs);
    assert!(env.observation_space().contains(&obs));

    let vehicle = &env.engine().unwrap().vehicle;
    assert_eq!(vehicle.position.x, 0.0);
    assert_eq!(vehicle.position.y, 0.0);
    assert_eq!(vehicle.angle, 0.0);
}

#[test]
fn test_seeded_then_unseeded_resets_are_reproducible() {
    let run = || {
        let (mut env, _) = default_fake();
        env.reset(Some(5), None).unwrap();
        let first = env.reward_points().to_vec();
        env.reset(None, None).unwrap();
        (first, env.reward_points().to_vec())
    };

    let (first_a, second_a) = run();
    let (first_b, second_b) = run();

    assert_eq!(first_a, first_b);
    assert_eq!(second_a, second_b);
    assert_ne!(first_a, second_a, "Unseeded reset should draw new points");
}

#[test]
fn test_unseeded_environments_differ() {
    let (mut first, _) = default_fake();
    let (mut second, _) = default_fake();

    first.reset(None, None).unwrap();
    second.reset(None, None).unwrap();

    assert_ne!(first.reward_points(), second.reward_points());
}

#[test]
fn test_terminates_exactly_at_episode_length() {
    let (mut env, log) = default_fake();
    env.reset(Some(0), None).unwrap();
    assert_eq!(env.config().max_episode_steps(), 750);

    for frame in 1..=750u64 {
        let step = env.step(&[0.0, 0.0]).unwrap();
        assert!(!step.truncated);
        assert_eq!(step.terminated, frame == 750, "Unexpected termination flag at frame {}", frame);
        assert_eq!(env.frames_taken(), frame);
    }

    assert_eq!(env.phase(), EpisodePhase::Terminated);
    assert!((env.elapsed_s() - 30.0).abs() < 1e-9);

    let actions = log.actions.borrow();
    assert_eq!(actions.len(), 750);
    assert!(actions
        .iter()
        .all(|(_, delta_t)| *delta_t == Duration::from_secs_f64(1.0 / 25.0)));
}

#[test]
fn test_step_after_termination_is_rejected() {
    let config = EnvConfig {
        fps: 10.0,
        duration_s: 0.2,
        ..Default::default()
    };
    let (mut env, log) = fake_env(config, FakeBehavior::default());
    env.reset(Some(0), None).unwrap();
    env.step(&[0.0, 0.0]).unwrap();
    assert!(env.step(&[0.0, 0.0]).unwrap().terminated);

    let err = env.step(&[0.0, 0.0]).unwrap_err();
    assert!(matches!(
        err,
        EnvError::UninitializedEpisode(EpisodePhase::Terminated)
    ));
    assert_eq!(env.frames_taken(), 2);
    assert_eq!(log.actions.borrow().len(), 2);

    env.reset(Some(0), None).unwrap();
    assert!(env.step(&[0.0, 0.0]).is_ok());
}

#[test]
fn test_step_before_reset_is_rejected() {
    let (mut env, log) = default_fake();
    assert!(matches!(
        env.step(&[0.0, 0.0]),
        Err(EnvError::UninitializedEpisode(EpisodePhase::Uninitialized))
    ));
    assert!(log.constructed.borrow().is_empty());
}

#[test]
fn test_observation_shape_every_step() {
    let config = EnvConfig {
        duration_s: 0.4,
        ..Default::default()
    };
    let (mut env, _) = fake_env(config, FakeBehavior::default());
    let (obs, _) = env.reset(Some(1), None).unwrap();
    assert_observation_valid(&obs);

    for _ in 0..10 {
        let step = env.step(&[25.0, 0.1]).unwrap();
        assert_observation_valid(&step.observation);
    }
}

#[test]
fn test_speed_reported_from_engine() {
    let (mut env, _) = default_fake();
    env.reset(Some(1), None).unwrap();

    let first = env.step(&[50.0, 0.0]).unwrap();
    let second = env.step(&[50.0, 0.0]).unwrap();

    approx::assert_relative_eq!(first.observation.speed[0], 2.0, epsilon = 1e-9);
    approx::assert_relative_eq!(second.observation.speed[0], 4.0, epsilon = 1e-9);
}

#[test]
fn test_reward_passed_through_verbatim() {
    let behavior = FakeBehavior {
        reward_per_step: -3.25,
        ..Default::default()
    };
    let (mut env, _) = fake_env(EnvConfig::default(), behavior);
    env.reset(Some(1), None).unwrap();

    assert_eq!(env.step(&[0.0, 0.0]).unwrap().reward, -3.25);
}

#[test]
fn test_out_of_range_steering_is_clipped_by_default() {
    let (mut env, log) = default_fake();
    env.reset(Some(1), None).unwrap();

    env.step(&[1.0, 4.0]).unwrap();
    env.step(&[1.0, -4.0]).unwrap();

    let actions = log.actions.borrow();
    assert_eq!(actions[0].0.steering_angle, PI);
    assert_eq!(actions[1].0.steering_angle, -PI);
    assert_eq!(actions[0].0.acceleration, 1.0);
}

#[test]
fn test_out_of_range_steering_is_rejected_when_configured() {
    let config = EnvConfig {
        steering_policy: SteeringPolicy::Reject,
        ..Default::default()
    };
    let (mut env, log) = fake_env(config, FakeBehavior::default());
    env.reset(Some(1), None).unwrap();

    for steering in [4.0, -4.0, 3.2] {
        let err = env.step(&[0.0, steering]).unwrap_err();
        assert!(matches!(err, EnvError::InvalidAction(_)), "{:?}", err);
    }
    assert_eq!(env.phase(), EpisodePhase::Running);
    assert_eq!(env.frames_taken(), 0);
    assert!(log.actions.borrow().is_empty());

    env.step(&[0.0, PI]).unwrap();
    assert_eq!(env.frames_taken(), 1);
}

#[test]
fn test_malformed_actions_are_rejected() {
    let (mut env, _) = default_fake();
    env.reset(Some(1), None).unwrap();

    for action in [
        vec![],
        vec![1.0],
        vec![1.0, 0.0, 0.0],
        vec![f64::NAN, 0.0],
        vec![0.0, f64::INFINITY],
    ] {
        assert!(
            matches!(env.step(&action), Err(EnvError::InvalidAction(_))),
            "Action {:?} should be rejected",
            action
        );
    }
    assert_eq!(env.frames_taken(), 0);
}

#[test]
fn test_engine_failure_faults_episode() {
    let behavior = FakeBehavior {
        fail_advance_on: Some(3),
        ..Default::default()
    };
    let (mut env, _) = fake_env(EnvConfig::default(), behavior);
    env.reset(Some(1), None).unwrap();
    env.step(&[0.0, 0.0]).unwrap();
    env.step(&[0.0, 0.0]).unwrap();

    let err = env.step(&[0.0, 0.0]).unwrap_err();
    assert!(matches!(err, EnvError::SimulatorFault(_)));
    assert_eq!(env.phase(), EpisodePhase::Faulted);
    assert_eq!(env.frames_taken(), 2);

    assert!(matches!(
        env.step(&[0.0, 0.0]),
        Err(EnvError::UninitializedEpisode(EpisodePhase::Faulted))
    ));

    env.reset(Some(1), None).unwrap();
    assert_eq!(env.phase(), EpisodePhase::Running);
    assert!(env.step(&[0.0, 0.0]).is_ok());
}

#[test]
fn test_undecodable_frame_faults_episode() {
    let behavior = FakeBehavior {
        bad_frame_after: Some(1),
        ..Default::default()
    };
    let (mut env, _) = fake_env(EnvConfig::default(), behavior);
    env.reset(Some(1), None).unwrap();
    env.step(&[0.0, 0.0]).unwrap();

    let err = env.step(&[0.0, 0.0]).unwrap_err();
    assert!(matches!(err, EnvError::RenderDecode(_)), "{:?}", err);
    assert_eq!(env.phase(), EpisodePhase::Faulted);
}

#[test]
fn test_reset_builds_fresh_engine() {
    let (mut env, log) = default_fake();
    env.reset(Some(1), None).unwrap();
    for _ in 0..5 {
        env.step(&[10.0, 0.0]).unwrap();
    }
    assert_eq!(env.engine().unwrap().advances, 5);

    let (obs, _) = env.reset(Some(2), None).unwrap();
    assert_eq!(log.constructed.borrow().len(), 2);
    assert_eq!(env.engine().unwrap().advances, 0);
    assert_eq!(env.frames_taken(), 0);
    assert_eq!(obs.speed, [0.0]);
}

#[test]
fn test_one_render_per_observation() {
    let (mut env, log) = default_fake();
    env.reset(Some(1), None).unwrap();
    for _ in 0..4 {
        env.step(&[0.0, 0.0]).unwrap();
    }
    assert_eq!(log.renders.get(), 5);
}

#[test]
fn test_reward_count_and_region_follow_config() {
    let config = EnvConfig {
        rewards: RewardConfig {
            count: 2,
            reward: 3.5,
            x_range: [100.0, 200.0],
            y_range: [300.0, 300.0],
        },
        ..Default::default()
    };
    let (mut env, _) = fake_env(config.clone(), FakeBehavior::default());
    env.reset(Some(11), None).unwrap();

    assert_reward_points_valid(env.reward_points(), &config.rewards);
    assert!(env.reward_points().iter().all(|p| p.position.y == 300.0));
}
