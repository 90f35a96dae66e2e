//! The ordered, index-addressable pattern catalog.

use rand::prelude::*;
use rand_pcg::Mcg128Xsl64;

use crate::config::RandomConfig;
use crate::pattern::{builtin_providers, PatternProvider, VibrationStep};

/// A fixed, ordered collection of pattern providers.
///
/// The catalog owns the RNG used by its random providers so that a seeded
/// catalog replays the same sequences draw for draw.
#[derive(Debug)]
pub struct Catalog {
    providers: Vec<PatternProvider>,
    rng: Mcg128Xsl64,
}

impl Catalog {
    /// Catalog over an explicit provider list.
    pub fn new(providers: Vec<PatternProvider>, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => Mcg128Xsl64::seed_from_u64(seed),
            None => Mcg128Xsl64::from_entropy(),
        };
        Self { providers, rng }
    }

    /// The built-in pattern list.
    pub fn builtin(random: &RandomConfig) -> Self {
        Self::new(builtin_providers(random.spec()), random.seed)
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&PatternProvider> {
        self.providers.get(index)
    }

    /// Provider names in navigation order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }

    /// Position of the provider with the given name, if present.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.providers.iter().position(|p| p.name() == name)
    }

    /// The step sequence of the provider at `index`.
    ///
    /// Random providers draw and cache their sequence here. Panics never:
    /// an out-of-range index yields an empty slice.
    pub fn steps(&mut self, index: usize) -> &[VibrationStep] {
        let Self { providers, rng } = self;
        match providers.get_mut(index) {
            Some(provider) => provider.steps(rng),
            None => &[],
        }
    }

    /// Invalidate the cached sequence of the provider at `index`, if random.
    pub fn invalidate(&mut self, index: usize) {
        if let Some(provider) = self.providers.get_mut(index) {
            provider.invalidate();
        }
    }
}
