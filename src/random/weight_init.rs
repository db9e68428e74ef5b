use rand::prelude::*;
use rand::rngs::StdRng;
use uuid::{Builder, Uuid};

/// Uniform source for initial weights, biases and neuron/synapse identities.
///
/// Passed explicitly into every constructor that needs randomness. Seeding it
/// once makes the whole network construction reproducible.
#[derive(Debug, Clone)]
pub struct WeightInit {
    rng: StdRng,
}

impl WeightInit {
    /// Seeded when `seed` is `Some`, otherwise drawn from OS entropy.
    pub fn new(seed: Option<u64>) -> WeightInit {
        match seed {
            Some(seed) => WeightInit::seeded(seed),
            None => WeightInit::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> WeightInit {
        WeightInit { rng: StdRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> WeightInit {
        WeightInit { rng: StdRng::from_entropy() }
    }

    /// Uniform draw in [-1, 1).
    pub fn next_weight(&mut self) -> f64 {
        self.rng.gen::<f64>() * 2.0 - 1.0
    }

    /// Random-version UUID built from this generator's stream.
    pub fn next_id(&mut self) -> Uuid {
        Builder::from_random_bytes(self.rng.gen()).into_uuid()
    }
}

impl Default for WeightInit {
    fn default() -> Self {
        WeightInit::from_entropy()
    }
}
