use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

/// The random stream owned by a single environment.
///
/// An explicit seed restarts the stream. Reseeding without a seed keeps
/// drawing from the current stream, and a stream that was never seeded is
/// initialised from OS entropy.
#[derive(Debug, Clone, Default)]
pub struct EpisodeRng {
    rng: Option<ChaCha8Rng>,
    seed: Option<u64>,
}

impl EpisodeRng {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: Some(ChaCha8Rng::seed_from_u64(seed)),
            seed: Some(seed),
        }
    }

    /// The last explicit seed, if the stream was ever seeded.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn is_initialized(&self) -> bool {
        self.rng.is_some()
    }

    /// Prepare the stream for a new episode and hand it out for sampling.
    pub fn reseed(&mut self, seed: Option<u64>) -> &mut ChaCha8Rng {
        match seed {
            Some(seed) => {
                debug!("Seeding episode RNG with seed: {}", seed);
                self.seed = Some(seed);
                self.rng.insert(ChaCha8Rng::seed_from_u64(seed))
            }
            None => self.rng.get_or_insert_with(|| {
                info!("No seed provided, using entropy");
                ChaCha8Rng::from_entropy()
            }),
        }
    }
}
