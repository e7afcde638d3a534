//! Lattice renderer - CPU recursive ray casting.
//!
//! Brute-force closest-hit traversal over spheres, triangles and triangle
//! meshes, with hard shadows from point and directional lights and
//! multiplicative mirror/metal/diffuse bounces.

mod bucket;
mod camera;
mod hittable;
mod image_buffer;
mod light;
mod material;
mod mesh;
mod renderer;
mod scene;
mod sphere;
mod triangle;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use hittable::{HitRecord, Hittable};
pub use image_buffer::{ImageBuffer, ImageError, ImageResult};
pub use light::{DirectionalLight, Light, PointLight, DIRECTIONAL_LIGHT_DISTANCE};
pub use material::{Material, Metal, Mirror, ScatterResult, Uniform};
pub use mesh::Mesh;
pub use renderer::{
    color_to_rgb, ray_cast, render, render_pixel, sky_gradient, RenderConfig, SHADOW_EPSILON,
    SHININESS,
};
pub use scene::Scene;
pub use sphere::Sphere;
pub use triangle::Triangle;

/// Re-export math types from lattice_math
pub use lattice_math::{Color, Interval, Point3, Ray, Vec3};
