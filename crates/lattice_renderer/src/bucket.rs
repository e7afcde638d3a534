//! Tile partitioning for parallel rendering.
//!
//! The image is cut into square buckets that rayon traces independently.
//! Coordinates use the renderer's row order: `y = 0` is the bottom scanline.

use crate::renderer::render_pixel;
use crate::{Color, RenderConfig, Scene};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// X coordinate of the bucket's first column
    pub x: u32,
    /// Y coordinate of the bucket's first row
    pub y: u32,
    pub width: u32,
    pub height: u32,
    /// Position of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    fn center_distance_sq(&self, center_x: f64, center_y: f64) -> f64 {
        let x = self.x as f64 + self.width as f64 / 2.0;
        let y = self.y as f64 + self.height as f64 / 2.0;
        (x - center_x).powi(2) + (y - center_y).powi(2)
    }
}

/// Default bucket edge in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 32;

/// Generate buckets covering a `width` x `height` image, center first.
///
/// Edge buckets are cropped to the image. A `bucket_size` of 0 is treated as 1.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let size = bucket_size.max(1);
    let mut buckets = Vec::new();

    for y in (0..height).step_by(size as usize) {
        for x in (0..width).step_by(size as usize) {
            let bw = size.min(width - x);
            let bh = size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    // Center outward; stable sort keeps scan order among equal distances
    let center_x = width as f64 / 2.0;
    let center_y = height as f64 / 2.0;
    buckets.sort_by(|a, b| {
        a.center_distance_sq(center_x, center_y)
            .total_cmp(&b.center_distance_sq(center_x, center_y))
    });

    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Render a single bucket. Returns averaged colors in row-major order.
pub fn render_bucket(bucket: &Bucket, scene: &Scene, config: &RenderConfig) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let color = render_pixel(scene, bucket.x + local_x, bucket.y + local_y, config);
            pixels.push(color);
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn covered(buckets: &[Bucket]) -> HashSet<(u32, u32)> {
        let mut pixels = HashSet::new();
        for b in buckets {
            for y in b.y..b.y + b.height {
                for x in b.x..b.x + b.width {
                    assert!(pixels.insert((x, y)), "pixel ({x}, {y}) covered twice");
                }
            }
        }
        pixels
    }

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4);

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 32);
        // 4 columns x 3 rows, right and top edges cropped
        assert_eq!(buckets.len(), 12);
        assert_eq!(covered(&buckets).len(), 100 * 70);
        assert!(buckets.iter().all(|b| b.x + b.width <= 100 && b.y + b.height <= 70));
    }

    #[test]
    fn test_spiral_order_starts_at_center() {
        let buckets = generate_buckets(96, 96, 32);
        assert_eq!((buckets[0].x, buckets[0].y), (32, 32));

        for (i, bucket) in buckets.iter().enumerate() {
            assert_eq!(bucket.index, i);
        }
    }

    #[test]
    fn test_degenerate_sizes() {
        assert!(generate_buckets(0, 10, 32).is_empty());
        assert!(generate_buckets(10, 0, 32).is_empty());
        // Zero bucket size falls back to single pixels
        assert_eq!(generate_buckets(3, 2, 0).len(), 6);
    }
}
