//! Recursive ray-cast integrator.
//!
//! Each bounce computes a direct-lighting term at the hit (surface color plus
//! Lambert and Phong contributions of every unshadowed light) and multiplies
//! it with whatever the scattered ray brings back:
//!
//! ```text
//! ray_cast(r, d) = direct(hit) * ray_cast(scattered, d - 1)
//! ```
//!
//! Misses return a sky gradient, absorbed rays and exhausted depth return
//! black. Pixels average jittered samples, then get gamma 2 and 8-bit
//! quantization.

use crate::bucket::{generate_buckets, render_bucket, BucketResult};
use crate::hittable::{HitRecord, Hittable};
use crate::{Color, ImageBuffer, ScatterResult, Scene};
use lattice_math::{random_f64, reflect, Interval, Ray};
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Minimum ray parameter for primary, scattered and shadow rays.
///
/// Keeps a surface from re-hitting itself through rounding (shadow acne).
pub const SHADOW_EPSILON: f64 = 0.001;

/// Phong exponent for light highlights.
pub const SHININESS: i32 = 4;

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Output width in pixels
    pub image_width: u32,
    /// Output height in pixels
    pub image_height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum ray bounce depth
    pub max_depth: u32,
    /// Base seed; every pixel derives its own stream from it
    pub seed: u64,
    /// Edge length of the square tiles rendered in parallel
    pub bucket_size: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            image_width: 400,
            image_height: 360,
            samples_per_pixel: 100,
            max_depth: 50,
            seed: 0,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
        }
    }
}

impl RenderConfig {
    /// Width over height.
    pub fn aspect_ratio(&self) -> f64 {
        self.image_width as f64 / self.image_height.max(1) as f64
    }
}

/// Compute the color seen by a ray.
pub fn ray_cast(ray: &Ray, scene: &Scene, depth: u32, rng: &mut dyn RngCore) -> Color {
    // If we've exceeded max depth, return black (no light)
    if depth == 0 {
        return Color::ZERO;
    }

    let Some(rec) = scene.hit(ray, Interval::new(SHADOW_EPSILON, f64::INFINITY)) else {
        return sky_gradient(ray);
    };

    match rec.material.scatter(ray, &rec, rng) {
        Some(scatter) => {
            let direct = direct_lighting(scene, &rec, &scatter);
            direct * ray_cast(&scatter.scattered, scene, depth - 1, rng)
        }
        // Ray was absorbed
        None => Color::ZERO,
    }
}

/// Surface color plus the contribution of every light that can see the hit.
fn direct_lighting(scene: &Scene, rec: &HitRecord, scatter: &ScatterResult) -> Color {
    let mut color = scatter.attenuation;

    for light in scene.lights() {
        let light_direction = light.direction(rec.p);
        let light_distance = light.distance(rec.p);
        let light_color = light.color();

        // Hard shadow: anything between the hit and the light blocks it entirely
        let shadow_ray = Ray::new(rec.p, light_direction);
        if scene.is_occluded(&shadow_ray, Interval::new(SHADOW_EPSILON, light_distance)) {
            continue;
        }

        let diffuse_intensity = rec.normal.dot(light_direction);
        if diffuse_intensity > 0.0 {
            color += light_color * scatter.diffuse * diffuse_intensity;
        }

        let reflected = reflect(-light_direction, rec.normal);
        let specular_intensity = reflected.dot(light_direction);
        if specular_intensity > 0.0 {
            color += light_color * scatter.specular * specular_intensity.powi(SHININESS);
        }
    }

    color
}

/// Compute sky gradient background.
pub fn sky_gradient(ray: &Ray) -> Color {
    let unit_direction = ray.direction().normalize();
    let a = 0.5 * (unit_direction.y + 1.0);
    let white = Color::new(1.0, 1.0, 1.0);
    let blue = Color::new(0.5, 0.7, 1.0);
    white * (1.0 - a) + blue * a
}

/// Convert an averaged linear color to 8-bit RGB.
///
/// Gamma 2 (square root), clamp to [0, 0.999], scale by 256.
pub fn color_to_rgb(color: Color) -> [u8; 3] {
    let intensity = Interval::new(0.0, 0.999);
    let channel = |c: f64| (256.0 * intensity.clamp(c.max(0.0).sqrt())) as u8;
    [channel(color.x), channel(color.y), channel(color.z)]
}

/// Random stream owned by a single pixel.
///
/// Pixels never share a generator, so the image does not depend on how
/// work is split across threads.
fn pixel_rng(seed: u64, x: u32, y: u32) -> StdRng {
    let pixel = ((y as u64) << 32) | x as u64;
    StdRng::seed_from_u64(seed.wrapping_mul(0x9E37_79B9_7F4A_7C15) ^ pixel)
}

/// Render a single pixel with multi-sampling.
///
/// `y` counts scanlines from the bottom. Returns the averaged linear color.
pub fn render_pixel(scene: &Scene, x: u32, y: u32, config: &RenderConfig) -> Color {
    let samples = config.samples_per_pixel.max(1);
    let u_span = config.image_width.saturating_sub(1).max(1) as f64;
    let v_span = config.image_height.saturating_sub(1).max(1) as f64;
    let camera = scene.camera();
    let mut rng = pixel_rng(config.seed, x, y);

    let mut pixel_color = Color::ZERO;
    for _ in 0..samples {
        // Box filter: jitter inside the pixel footprint
        let s = (x as f64 + random_f64(&mut rng)) / u_span;
        let t = (y as f64 + random_f64(&mut rng)) / v_span;
        let ray = camera.get_ray(s, t);
        pixel_color += ray_cast(&ray, scene, config.max_depth, &mut rng);
    }

    // Average the samples
    pixel_color / samples as f64
}

/// Render the entire scene to an image buffer.
///
/// Buckets are traced in parallel; the result is identical to a serial render.
pub fn render(scene: &Scene, config: &RenderConfig) -> ImageBuffer {
    if config.samples_per_pixel == 0 {
        log::warn!("samples_per_pixel is 0, using 1 sample per pixel");
    }
    log::info!(
        "Rendering {}x{} @ {} spp, max depth {}",
        config.image_width,
        config.image_height,
        config.samples_per_pixel.max(1),
        config.max_depth
    );

    let start = Instant::now();
    let buckets = generate_buckets(
        config.image_width,
        config.image_height,
        config.bucket_size.max(1),
    );
    let bucket_count = buckets.len();

    let results: Vec<BucketResult> = buckets
        .into_par_iter()
        .map(|bucket| {
            let pixels = render_bucket(&bucket, scene, config);
            log::debug!("Bucket {}/{} done", bucket.index + 1, bucket_count);
            BucketResult::new(bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(config.image_width, config.image_height);
    for result in &results {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let x = bucket.x + i as u32 % bucket.width;
            let y = bucket.y + i as u32 / bucket.width;
            image.set(x, y, color_to_rgb(*color));
        }
    }

    log::info!("Rendered {} buckets in {:?}", bucket_count, start.elapsed());
    image
}
