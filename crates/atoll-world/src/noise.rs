use fastnoise_lite::{FastNoiseLite, NoiseType};

/// Deterministic 2D noise in `[-1, 1]`.
pub trait NoiseSource {
    fn noise2d(&self, x: f32, y: f32) -> f32;
}

impl<F> NoiseSource for F
where
    F: Fn(f32, f32) -> f32,
{
    #[inline]
    fn noise2d(&self, x: f32, y: f32) -> f32 {
        self(x, y)
    }
}

/// OpenSimplex2 noise sampled at unit frequency; callers scale coordinates.
pub struct SimplexNoise {
    inner: FastNoiseLite,
}

impl SimplexNoise {
    pub fn new(seed: i32) -> Self {
        let mut inner = FastNoiseLite::with_seed(seed);
        inner.set_noise_type(Some(NoiseType::OpenSimplex2));
        inner.set_frequency(Some(1.0));
        Self { inner }
    }
}

impl NoiseSource for SimplexNoise {
    #[inline]
    fn noise2d(&self, x: f32, y: f32) -> f32 {
        self.inner.get_noise_2d(x, y).clamp(-1.0, 1.0)
    }
}

impl std::fmt::Debug for SimplexNoise {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SimplexNoise").finish_non_exhaustive()
    }
}
