//! Particle cloud storage and base-shape generation
//!
//! SoA layout: flat position/color/size buffers ready for direct GPU
//! upload. Colors and sizes are assigned once at spawn and never
//! touched again; only positions are interpolated.

use super::random::RandomSource;

/// Particle count for the field. Dense enough for a solid heart
/// silhouette, cheap enough to re-upload every morph frame.
pub const PARTICLE_COUNT: usize = 16_000;

/// Spherical spawn region and size range for the base cloud
#[derive(Clone, Copy, Debug)]
pub struct RegionConfig {
    pub min_radius: f32,
    pub max_radius: f32,
    pub min_size: f32,
    pub max_size: f32,
}

impl Default for RegionConfig {
    fn default() -> Self {
        Self {
            min_radius: 20.0,
            max_radius: 50.0,
            min_size: 0.2,
            max_size: 0.8,
        }
    }
}

/// Fixed-size particle field, exclusively owned by the morph engine
pub struct ParticleCloud {
    /// Flat xyz positions, 3 * count
    pub positions: Vec<f32>,
    /// Flat rgb colors, 3 * count
    pub colors: Vec<f32>,
    /// Per-particle point sizes
    pub sizes: Vec<f32>,
}

impl ParticleCloud {
    pub fn len(&self) -> usize {
        self.sizes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sizes.is_empty()
    }
}

/// Generate the initial diffuse sphere.
///
/// Points are uniform by solid angle (phi from acos of a uniform
/// sample, not a uniform angle, which would clump at the poles) with
/// radius in [min_radius, max_radius).
pub fn spawn_base_cloud(
    count: usize,
    region: &RegionConfig,
    rng: &mut impl RandomSource,
) -> ParticleCloud {
    let mut positions = Vec::with_capacity(count * 3);
    let mut colors = Vec::with_capacity(count * 3);
    let mut sizes = Vec::with_capacity(count);

    for _ in 0..count {
        let r = rng.range(region.min_radius, region.max_radius);
        let theta = rng.range(0.0, std::f32::consts::TAU);
        let phi = (2.0 * rng.next_f32() - 1.0).clamp(-1.0, 1.0).acos();

        positions.push(r * phi.sin() * theta.cos());
        positions.push(r * phi.sin() * theta.sin());
        positions.push(r * phi.cos());

        let [cr, cg, cb] = pick_palette_color(rng);
        colors.push(cr);
        colors.push(cg);
        colors.push(cb);

        sizes.push(rng.range(region.min_size, region.max_size));
    }

    ParticleCloud {
        positions,
        colors,
        sizes,
    }
}

/// Three-way categorical palette: 20% white, 20% gold, 60% pink
fn pick_palette_color(rng: &mut impl RandomSource) -> [f32; 3] {
    let r = rng.next_f32();
    if r > 0.8 {
        // White
        hsl_to_rgb(0.0, 0.0, 1.0)
    } else if r > 0.6 {
        // Gold
        hsl_to_rgb(0.12, 1.0, 0.8)
    } else {
        // Pink, hue jittered for variety
        let hue = 0.92 + rng.next_f32() * 0.05;
        hsl_to_rgb(hue, 0.8, 0.7)
    }
}

/// HSL to RGB, hue in turns [0,1] (wrapping), s/l in [0,1]
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> [f32; 3] {
    fn hue_to_channel(p: f32, q: f32, mut t: f32) -> f32 {
        t = t.rem_euclid(1.0);
        if t < 1.0 / 6.0 {
            p + (q - p) * 6.0 * t
        } else if t < 0.5 {
            q
        } else if t < 2.0 / 3.0 {
            p + (q - p) * (2.0 / 3.0 - t) * 6.0
        } else {
            p
        }
    }

    if s == 0.0 {
        return [l, l, l];
    }
    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;
    [
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::particles::random::Xorshift32;

    #[test]
    fn base_cloud_has_requested_cardinality() {
        let mut rng = Xorshift32::new(1);
        let cloud = spawn_base_cloud(500, &RegionConfig::default(), &mut rng);
        assert_eq!(cloud.len(), 500);
        assert_eq!(cloud.positions.len(), 1500);
        assert_eq!(cloud.colors.len(), 1500);
    }

    #[test]
    fn radii_stay_in_spawn_shell() {
        let mut rng = Xorshift32::new(2);
        let region = RegionConfig::default();
        let cloud = spawn_base_cloud(2_000, &region, &mut rng);

        for p in cloud.positions.chunks_exact(3) {
            let r = (p[0] * p[0] + p[1] * p[1] + p[2] * p[2]).sqrt();
            assert!(r >= region.min_radius - 1e-3 && r <= region.max_radius + 1e-3);
        }
    }

    #[test]
    fn sizes_stay_in_range() {
        let mut rng = Xorshift32::new(3);
        let region = RegionConfig::default();
        let cloud = spawn_base_cloud(2_000, &region, &mut rng);
        for &s in &cloud.sizes {
            assert!((region.min_size..region.max_size).contains(&s));
        }
    }

    #[test]
    fn palette_split_approximates_20_20_60() {
        let mut rng = Xorshift32::new(4);
        let cloud = spawn_base_cloud(10_000, &RegionConfig::default(), &mut rng);

        let white = [1.0f32, 1.0, 1.0];
        let gold = hsl_to_rgb(0.12, 1.0, 0.8);
        let mut whites = 0usize;
        let mut golds = 0usize;
        let mut pinks = 0usize;
        for c in cloud.colors.chunks_exact(3) {
            if c == &white[..] {
                whites += 1;
            } else if c == &gold[..] {
                golds += 1;
            } else {
                pinks += 1;
            }
        }

        // 5 sigma-ish tolerance on 10k samples
        assert!((whites as f32 / 10_000.0 - 0.2).abs() < 0.03, "whites: {whites}");
        assert!((golds as f32 / 10_000.0 - 0.2).abs() < 0.03, "golds: {golds}");
        assert!((pinks as f32 / 10_000.0 - 0.6).abs() < 0.03, "pinks: {pinks}");
    }

    #[test]
    fn deterministic_under_injected_source() {
        let a = spawn_base_cloud(100, &RegionConfig::default(), &mut Xorshift32::new(9));
        let b = spawn_base_cloud(100, &RegionConfig::default(), &mut Xorshift32::new(9));
        assert_eq!(a.positions, b.positions);
        assert_eq!(a.colors, b.colors);
        assert_eq!(a.sizes, b.sizes);
    }

    #[test]
    fn hsl_anchors() {
        assert_eq!(hsl_to_rgb(0.0, 0.0, 1.0), [1.0, 1.0, 1.0]);
        assert_eq!(hsl_to_rgb(0.5, 0.0, 0.25), [0.25, 0.25, 0.25]);
        // Pure red
        let [r, g, b] = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!((r - 1.0).abs() < 1e-6 && g.abs() < 1e-6 && b.abs() < 1e-6);
    }
}
