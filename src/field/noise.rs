use ::noise::{NoiseFn, Simplex};

/// Seeded 3D simplex noise, owned by one mounted background.
///
/// The permutation table is derived from the seed once at construction and never reseeded, so
/// two fields built from the same seed agree everywhere and fields with different seeds are
/// independent. Samples are continuous and bounded to `[-1, 1]`.
#[derive(Clone, Debug)]
pub struct NoiseField {
    seed: u32,
    simplex: Simplex,
}

impl NoiseField {
    pub fn new(seed: u32) -> Self {
        Self {
            seed,
            simplex: Simplex::new(seed),
        }
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn sample(&self, x: f64, y: f64, z: f64) -> f64 {
        let v = self.simplex.get([x, y, z]);
        if v.is_finite() { v.clamp(-1.0, 1.0) } else { 0.0 }
    }
}

/// Seed for a mount that did not configure one.
///
/// SplitMix64 over the wall clock; only used when determinism was not requested.
pub fn entropy_seed() -> u32 {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x9E37_79B9_7F4A_7C15);
    let mut z = nanos.wrapping_add(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    (z ^ (z >> 31)) as u32
}

#[cfg(test)]
#[path = "../../tests/unit/field/noise.rs"]
mod tests;
