//! CPU reference implementation of the wave and shading formulas.
//!
//! These functions mirror the WGSL in `assets/shaders/modules/height_field.wgsl`
//! and `assets/shaders/raster/surface.wgsl` so the numerical behavior of the
//! GPU stages can be verified without a device. Constants here must stay in
//! sync with their WGSL counterparts.

use std::f32::consts::TAU;

use glam::{Vec2, Vec3};

/// Number of full sine cycles across the [0, 1] UV range on each axis.
/// Mirrors `WAVE_CYCLES` in `modules/height_field.wgsl`.
pub const WAVE_CYCLES: f32 = 4.0;

/// Falloff coefficient of the radial envelope.
/// Mirrors `WAVE_FALLOFF` in `modules/height_field.wgsl`.
pub const WAVE_FALLOFF: f32 = 8.0;

/// World-space light direction (unnormalized).
/// Mirrors `LIGHT_DIR` in `raster/surface.wgsl`.
pub const LIGHT_DIR: Vec3 = Vec3::new(0.3, 0.8, 0.5);

/// Lower bound on the diffuse term, keeping back faces faintly visible.
/// Mirrors `MIN_DIFFUSE` in `raster/surface.wgsl`.
pub const MIN_DIFFUSE: f32 = 0.05;

/// Oscillatory component of the wave pattern: a product of sines with
/// `WAVE_CYCLES` full cycles per axis, so the pattern repeats every
/// 1 / `WAVE_CYCLES` in u and in v.
pub fn wave_sinusoid(uv: Vec2) -> f32 {
    (TAU * WAVE_CYCLES * uv.x).sin() * (TAU * WAVE_CYCLES * uv.y).sin()
}

/// Radial Gaussian envelope centered on UV (0.5, 0.5).
pub fn wave_envelope(uv: Vec2) -> f32 {
    let centered = uv - Vec2::splat(0.5);
    (-WAVE_FALLOFF * centered.dot(centered)).exp()
}

/// Full wave amplitude at a UV coordinate: sinusoid attenuated by the
/// envelope.
pub fn wave_value(uv: Vec2) -> f32 {
    wave_sinusoid(uv) * wave_envelope(uv)
}

/// Clamp a texel coordinate into `[0, dim - 1]` on each axis.
pub fn clamp_texel(coord: [i32; 2], dims: [u32; 2]) -> [i32; 2] {
    [
        coord[0].clamp(0, dims[0] as i32 - 1),
        coord[1].clamp(0, dims[1] as i32 - 1),
    ]
}

/// Lambertian diffuse term with a minimum floor, exactly
/// `max(dot(n, l), MIN_DIFFUSE)`.
pub fn lambert(normal: Vec3, light_dir: Vec3) -> f32 {
    normal.dot(light_dir).max(MIN_DIFFUSE)
}

/// A square single-channel height field stored row-major, matching what the
/// compute stage writes into the red channel of its storage texture.
pub struct HeightField {
    size: u32,
    data: Vec<f32>,
}

impl HeightField {
    /// Build a field of `size` x `size` texels by evaluating the wave formula
    /// at each texel's UV coordinate, the same mapping the compute shader
    /// uses (`uv = texel / size`).
    #[must_use]
    pub fn from_wave(size: u32) -> Self {
        let mut data = Vec::with_capacity(size as usize * size as usize);
        for y in 0..size {
            for x in 0..size {
                let uv =
                    Vec2::new(x as f32 / size as f32, y as f32 / size as f32);
                data.push(wave_value(uv));
            }
        }
        Self { size, data }
    }

    /// Side length in texels.
    pub fn size(&self) -> u32 {
        self.size
    }

    /// Height at a texel coordinate, with edge clamping. This is the single
    /// lookup path shared by displacement and normal estimation, mirroring
    /// `height_at` in the WGSL module.
    pub fn sample(&self, coord: [i32; 2]) -> f32 {
        let c = clamp_texel(coord, [self.size, self.size]);
        self.data[c[1] as usize * self.size as usize + c[0] as usize]
    }

    /// Surface normal at a texel from central differences of neighboring
    /// heights, mirroring `estimate_normal` in the WGSL module.
    pub fn normal(&self, coord: [i32; 2]) -> Vec3 {
        let [x, y] = coord;
        let left = self.sample([x - 1, y]);
        let right = self.sample([x + 1, y]);
        let near = self.sample([x, y - 1]);
        let far = self.sample([x, y + 1]);

        Vec3::new(0.5 * (left - right), 1.0, 0.5 * (near - far)).normalize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    #[test]
    fn wave_vanishes_at_center() {
        // sin(4π) · sin(4π) · exp(0) = 0
        let v = wave_value(Vec2::splat(0.5));
        assert!(v.abs() < EPS, "expected 0 at center, got {v}");
    }

    #[test]
    fn sinusoid_repeats_every_quarter_uv() {
        let period = 1.0 / WAVE_CYCLES;
        for &(u, v) in
            &[(0.1, 0.2), (0.33, 0.71), (0.05, 0.9), (0.625, 0.375)]
        {
            let base = wave_sinusoid(Vec2::new(u, v));
            let shifted_u = wave_sinusoid(Vec2::new(u + period, v));
            let shifted_v = wave_sinusoid(Vec2::new(u, v + period));
            assert!((base - shifted_u).abs() < EPS);
            assert!((base - shifted_v).abs() < EPS);
        }
    }

    #[test]
    fn envelope_attenuates_away_from_center() {
        let center = wave_envelope(Vec2::splat(0.5));
        let corner = wave_envelope(Vec2::ZERO);
        assert!((center - 1.0).abs() < EPS);
        assert!(corner < center);
        assert!(corner > 0.0);
    }

    #[test]
    fn clamping_keeps_neighbors_in_bounds() {
        let dims = [64, 64];
        assert_eq!(clamp_texel([-1, 0], dims), [0, 0]);
        assert_eq!(clamp_texel([0, -1], dims), [0, 0]);
        assert_eq!(clamp_texel([64, 63], dims), [63, 63]);
        assert_eq!(clamp_texel([63, 64], dims), [63, 63]);
        assert_eq!(clamp_texel([12, 40], dims), [12, 40]);
    }

    #[test]
    fn border_normals_use_clamped_neighbors() {
        let field = HeightField::from_wave(32);
        let edge = field.size() as i32 - 1;
        // Every corner and edge coordinate must produce a finite unit normal.
        for &coord in &[
            [0, 0],
            [edge, 0],
            [0, edge],
            [edge, edge],
            [0, edge / 2],
            [edge / 2, edge],
        ] {
            let n = field.normal(coord);
            assert!(n.is_finite());
            assert!((n.length() - 1.0).abs() < EPS);
        }
    }

    #[test]
    fn lambert_never_falls_below_floor() {
        let light = LIGHT_DIR.normalize();
        // Facing away from the light the dot product is negative, so the
        // floor must win.
        assert_eq!(lambert(-light, light), MIN_DIFFUSE);
        // Facing the light the raw dot product passes through.
        assert!((lambert(light, light) - 1.0).abs() < EPS);
        // An oblique angle stays at max(dot, floor).
        let n = Vec3::new(0.0, 1.0, 0.0);
        let expected = n.dot(light).max(MIN_DIFFUSE);
        assert_eq!(lambert(n, light), expected);
    }

    #[test]
    fn displacement_and_normal_share_one_lookup() {
        let field = HeightField::from_wave(16);
        // The height the vertex stage would displace by and the center value
        // the slope estimate is built around come from the same sample path.
        for &coord in &[[0, 0], [7, 3], [15, 15]] {
            let displaced = field.sample(coord);
            let clamped = clamp_texel(coord, [16, 16]);
            let direct = field.sample(clamped);
            assert_eq!(displaced, direct);
        }
    }
}
