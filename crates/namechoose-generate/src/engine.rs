use rand::seq::IndexedRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::{info, warn};

use namechoose_core::{Gender, GeneratedName, NameError, Result};

use crate::composer::compose;
use crate::model::GenerateOptions;
use crate::registry::{NationalityDescriptor, NationalityRegistry};

/// Seed a `ChaCha8Rng`, drawing a fresh seed when none is given.
///
/// The seed actually used is returned so callers can report it.
pub fn seeded_rng(seed: Option<u64>) -> (u64, ChaCha8Rng) {
    let seed = seed.unwrap_or_else(|| rand::rng().random());
    (seed, ChaCha8Rng::seed_from_u64(seed))
}

/// Entry point for generating batches of names from a registry.
#[derive(Debug, Clone, Copy)]
pub struct GenerationEngine<'r> {
    registry: &'r NationalityRegistry,
}

impl<'r> GenerationEngine<'r> {
    pub fn new(registry: &'r NationalityRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &'r NationalityRegistry {
        self.registry
    }

    /// Start a batch with its own seeded random source.
    pub fn generate(&self, options: &GenerateOptions) -> Result<GeneratedNames<'r, ChaCha8Rng>> {
        let (seed, rng) = seeded_rng(options.seed);
        info!(
            seed,
            nationality = options.nationality.as_deref().unwrap_or("random"),
            gender = options.gender.map(Gender::as_str).unwrap_or("random"),
            count = options.count,
            "generation started"
        );
        let names =
            self.generate_with_rng(options.nationality.as_deref(), options.gender, options.count, rng)?;
        Ok(names.with_seed(seed))
    }

    /// Start a batch drawing from a caller-supplied random source.
    ///
    /// The nationality is resolved once, before any name is produced.
    /// Without one, every name draws its nationality from the registry.
    pub fn generate_with_rng<R: Rng>(
        &self,
        nationality: Option<&str>,
        gender: Option<Gender>,
        count: usize,
        rng: R,
    ) -> Result<GeneratedNames<'r, R>> {
        if count == 0 {
            return Err(NameError::InvalidArgument(
                "count must be at least 1".to_string(),
            ));
        }
        let target = nationality
            .map(|identifier| self.registry.resolve(identifier))
            .transpose()?;

        Ok(GeneratedNames {
            registry: self.registry,
            target,
            gender,
            remaining: count,
            produced: 0,
            seed: None,
            failed: false,
            rng,
        })
    }
}

/// Lazy, finite sequence of generated names.
///
/// Ends after `count` names or right after the first error.
#[derive(Debug)]
pub struct GeneratedNames<'r, R> {
    registry: &'r NationalityRegistry,
    target: Option<&'r NationalityDescriptor>,
    gender: Option<Gender>,
    remaining: usize,
    produced: usize,
    seed: Option<u64>,
    failed: bool,
    rng: R,
}

impl<R> GeneratedNames<'_, R> {
    fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Seed of the random source when the batch seeded it.
    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn produced(&self) -> usize {
        self.produced
    }
}

impl<'r, R: Rng> GeneratedNames<'r, R> {
    fn next_descriptor(&mut self) -> Result<&'r NationalityDescriptor> {
        if let Some(target) = self.target {
            return Ok(target);
        }
        self.registry
            .list_all()
            .choose(&mut self.rng)
            .ok_or_else(|| NameError::data("registry", "no nationalities registered"))
    }
}

impl<R: Rng> Iterator for GeneratedNames<'_, R> {
    type Item = Result<GeneratedName>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.remaining == 0 {
            return None;
        }

        let result = self
            .next_descriptor()
            .and_then(|descriptor| compose(descriptor, self.gender, &mut self.rng));
        match &result {
            Ok(_) => {
                self.remaining -= 1;
                self.produced += 1;
                if self.remaining == 0 {
                    info!(names = self.produced, "generation finished");
                }
            }
            Err(err) => {
                self.failed = true;
                warn!(produced = self.produced, error = %err, "generation aborted");
            }
        }
        Some(result)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        if self.failed {
            (0, Some(0))
        } else {
            (0, Some(self.remaining))
        }
    }
}

impl<R: Rng> std::iter::FusedIterator for GeneratedNames<'_, R> {}
