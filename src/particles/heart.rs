//! Heart target-shape sampling
//!
//! Rejection sampling against the implicit heart curve
//! `(x^2 + (y + notch)^2 - 1)^3 - x^2 * (y + notch)^3 <= 0`,
//! extruded over a thin z slab. Accepted points are scaled per axis,
//! jittered for organic density, and lifted to recenter the silhouette.

use super::random::RandomSource;

/// Heart silhouette scale and jitter parameters
#[derive(Clone, Copy, Debug)]
pub struct HeartConfig {
    pub width: f32,
    pub height: f32,
    pub thickness: f32,
    /// Vertical recenter applied after scaling
    pub y_offset: f32,
    /// Offset inside the implicit curve; larger cuts a deeper top notch
    pub notch: f32,
    /// Multiplicative jitter half-range (0.1 = +-10%)
    pub jitter: f32,
}

impl Default for HeartConfig {
    fn default() -> Self {
        Self {
            width: 11.5,
            height: 10.5,
            thickness: 6.5,
            y_offset: 4.0,
            notch: 0.45,
            jitter: 0.1,
        }
    }
}

/// Rejection attempts before giving up on the remaining points.
/// The curve fills roughly a third of the sampling box, so 16k points
/// need ~50k attempts; the cap only matters for degenerate configs.
const MAX_ATTEMPTS: usize = 1_000_000;

/// True when the unscaled (x, y) sample lies inside the heart curve
pub fn inside_heart(x: f32, y: f32, notch: f32) -> bool {
    let ay = y + notch;
    let term = x * x + ay * ay - 1.0;
    term * term * term - x * x * ay * ay * ay <= 0.0
}

/// Sample `count` positions on the heart as a flat xyz vector.
///
/// Returns fewer than `count` points only if the attempt budget runs
/// out; the caller decides how to tolerate a shortfall.
pub fn generate_heart_points(
    count: usize,
    config: &HeartConfig,
    rng: &mut impl RandomSource,
) -> Vec<f32> {
    let mut points = Vec::with_capacity(count * 3);
    let mut accepted = 0usize;
    let mut attempts = 0usize;

    while accepted < count && attempts < MAX_ATTEMPTS {
        attempts += 1;
        let x = rng.range(-1.5, 1.5);
        let y = rng.range(-1.5, 1.5);
        let z = rng.range(-0.75, 0.75);

        if !inside_heart(x, y, config.notch) {
            continue;
        }

        let jitter = 1.0 + (rng.next_f32() - 0.5) * 2.0 * config.jitter;
        points.push(x * config.width * jitter);
        points.push(y * config.height * jitter + config.y_offset);
        points.push(z * config.thickness * jitter);
        accepted += 1;
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::random::Xorshift32;

    #[test]
    fn reaches_exact_cardinality() {
        let mut rng = Xorshift32::new(11);
        let points = generate_heart_points(5_000, &HeartConfig::default(), &mut rng);
        assert_eq!(points.len(), 5_000 * 3);
    }

    #[test]
    fn curve_membership_anchors() {
        let notch = HeartConfig::default().notch;
        // Center of the heart body
        assert!(inside_heart(0.0, 0.0, notch));
        // Well outside the bounding lobe
        assert!(!inside_heart(1.4, 1.4, notch));
        assert!(!inside_heart(0.0, -1.46, notch));
        // Inside the top notch, between the lobes
        assert!(!inside_heart(0.0, 0.95, notch));
    }

    #[test]
    fn scaled_points_stay_in_scaled_box() {
        let cfg = HeartConfig::default();
        let mut rng = Xorshift32::new(12);
        let points = generate_heart_points(2_000, &cfg, &mut rng);

        let max_scale = 1.0 + cfg.jitter;
        for p in points.chunks_exact(3) {
            assert!(p[0].abs() <= 1.5 * cfg.width * max_scale);
            assert!((p[1] - cfg.y_offset).abs() <= 1.5 * cfg.height * max_scale);
            assert!(p[2].abs() <= 0.75 * cfg.thickness * max_scale);
        }
    }

    #[test]
    fn unjittered_points_satisfy_curve_after_unscaling() {
        let cfg = HeartConfig {
            jitter: 0.0,
            ..HeartConfig::default()
        };
        let mut rng = Xorshift32::new(13);
        let points = generate_heart_points(1_000, &cfg, &mut rng);

        for p in points.chunks_exact(3) {
            let x = p[0] / cfg.width;
            let y = (p[1] - cfg.y_offset) / cfg.height;
            assert!(inside_heart(x, y, cfg.notch), "escaped curve: {:?}", p);
        }
    }

    #[test]
    fn exhausted_budget_returns_partial_shape() {
        // A notch this deep leaves no interior at all, so every
        // attempt is rejected and the budget is the only way out.
        let cfg = HeartConfig {
            notch: 100.0,
            ..HeartConfig::default()
        };
        let mut rng = Xorshift32::new(14);
        let points = generate_heart_points(10, &cfg, &mut rng);
        assert!(points.is_empty());
    }
}
