//! JSON scene configuration.
//!
//! Every section is optional; an empty object reproduces the demo scene.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use lattice_blob::{PointSource, VertexPlacement};
use lattice_math::{Color, Point3, Vec3};
use lattice_renderer::RenderConfig;
use serde::Deserialize;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub render: RenderConfig,
    pub camera: CameraConfig,
    pub light: LightConfig,
    pub blob: BlobConfig,
}

impl Config {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config {}", path.display()))?;
        let config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config {}", path.display()))?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CameraConfig {
    pub look_from: Point3,
    pub look_at: Point3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov: f64,
    /// Viewport aspect; the image aspect when absent
    pub aspect_ratio: Option<f64>,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            look_from: Vec3::new(-1.0, 1.0, 1.0),
            look_at: Vec3::ZERO,
            up: Vec3::Y,
            vfov: 90.0,
            aspect_ratio: None,
        }
    }
}

/// Directional light; `direction` points toward the light.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LightConfig {
    pub direction: Vec3,
    pub color: Color,
    pub intensity: f64,
}

impl Default for LightConfig {
    fn default() -> Self {
        Self {
            direction: Vec3::new(1.0, 4.0, 10.0),
            color: Color::ONE,
            intensity: 1.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BlobConfig {
    pub origin: Point3,
    /// Edge length of the cubic lattice
    pub extent: f64,
    pub cell_size: f64,
    pub threshold: f64,
    pub placement: VertexPlacement,
    pub field: FieldConfig,
    /// Small spheres marking the eight lattice corners
    pub markers: bool,
}

impl Default for BlobConfig {
    fn default() -> Self {
        Self {
            origin: Vec3::ZERO,
            extent: 4.0,
            cell_size: 1.0,
            threshold: 0.9,
            placement: VertexPlacement::Midpoint,
            field: FieldConfig::Sphere,
            markers: true,
        }
    }
}

impl BlobConfig {
    pub fn center(&self) -> Point3 {
        self.origin + Vec3::splat(self.extent / 2.0)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase", deny_unknown_fields)]
pub enum FieldConfig {
    /// Distance to a sphere of radius `threshold` at the lattice centre
    #[default]
    Sphere,
    /// Inverse-distance point sources
    Metaballs { sources: Vec<PointSource> },
}
