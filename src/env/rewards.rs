use rand::Rng;

use crate::config::RewardConfig;
use crate::simulation::RewardPoint;

/// Draw the reward points of one episode from `rng`.
///
/// Each point consumes two uniform draws, x then y, from the inclusive
/// rectangle of `config`.
pub fn sample_reward_points<R: Rng + ?Sized>(rng: &mut R, config: &RewardConfig) -> Vec<RewardPoint> {
    let [x_min, x_max] = config.x_range;
    let [y_min, y_max] = config.y_range;

    (0..config.count)
        .map(|_| {
            let x = rng.gen_range(x_min..=x_max);
            let y = rng.gen_range(y_min..=y_max);
            RewardPoint::new(x, y, config.reward)
        })
        .collect()
}
