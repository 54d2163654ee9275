//! Shared helpers for the cross-crate tests.

use flycam_shared::math::{Quat, Vec3};
use rand::{rngs::StdRng, Rng, SeedableRng};

/// Installs a test-friendly subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with_test_writer()
        .try_init();
}

/// Deterministic generator so failures reproduce.
pub fn seeded_rng(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Vector with components in `[-range, range]`.
pub fn random_vec3(rng: &mut impl Rng, range: f32) -> Vec3 {
    Vec3::new(
        rng.gen_range(-range..=range),
        rng.gen_range(-range..=range),
        rng.gen_range(-range..=range),
    )
}

/// Unit axis, rejecting samples too short to normalize reliably.
pub fn random_axis(rng: &mut impl Rng) -> Vec3 {
    loop {
        let v = random_vec3(rng, 1.0);
        if v.magnitude() > 0.1 {
            if let Ok(axis) = v.normalize() {
                return axis;
            }
        }
    }
}

/// Rotation by a random angle around a random axis.
pub fn random_rotation(rng: &mut impl Rng) -> Quat {
    Quat::from_angle_axis(rng.gen_range(-180.0..180.0), random_axis(rng))
}
