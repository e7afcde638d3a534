//! Demo scene assembly: corner markers, the extracted blob and one light.

use std::sync::Arc;

use anyhow::{Context, Result};
use lattice_blob::{Blob, PointSources, PotentialField, SphereDistance};
use lattice_math::{Color, Vec3};
use lattice_renderer::{Camera, DirectionalLight, Material, Mesh, Scene, Sphere, Uniform};

use crate::config::{BlobConfig, Config, FieldConfig};

const MARKER_RADIUS: f64 = 0.1;

pub fn build_scene(config: &Config) -> Result<Scene> {
    let camera_config = &config.camera;
    let aspect_ratio = camera_config
        .aspect_ratio
        .unwrap_or_else(|| config.render.aspect_ratio());
    let camera = Camera::new(
        camera_config.look_from,
        camera_config.look_at,
        camera_config.up,
        camera_config.vfov,
        aspect_ratio,
    );

    let mut scene = Scene::new(camera);

    let blue: Arc<dyn Material> = Arc::new(Uniform::new(Color::new(0.2, 0.4, 0.9), 0.5, 0.5));
    let ground: Arc<dyn Material> = Arc::new(Uniform::new(Color::new(0.8, 0.8, 0.0), 0.5, 0.5));

    if config.blob.markers {
        for corner in lattice_corners(&config.blob) {
            scene.add_object(Box::new(Sphere::new(corner, MARKER_RADIUS, blue.clone())));
        }
    }

    let mesh = build_blob(&config.blob, ground)?;
    log::info!("Blob mesh: {} triangles", mesh.len());
    scene.add_object(Box::new(mesh));

    let light = &config.light;
    scene.add_light(Box::new(DirectionalLight::new(
        light.direction,
        light.color,
        light.intensity,
    )));

    Ok(scene)
}

fn lattice_corners(blob: &BlobConfig) -> [Vec3; 8] {
    let e = blob.extent;
    [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(e, 0.0, 0.0),
        Vec3::new(0.0, e, 0.0),
        Vec3::new(0.0, 0.0, e),
        Vec3::new(e, e, 0.0),
        Vec3::new(e, 0.0, e),
        Vec3::new(0.0, e, e),
        Vec3::new(e, e, e),
    ]
    .map(|offset| blob.origin + offset)
}

pub fn build_blob(blob_config: &BlobConfig, material: Arc<dyn Material>) -> Result<Mesh> {
    let blob = Blob::new(
        blob_config.origin,
        blob_config.origin + Vec3::splat(blob_config.extent),
        blob_config.cell_size,
        blob_config.threshold,
    )
    .context("Invalid blob lattice")?
    .with_placement(blob_config.placement);

    let field: Box<dyn PotentialField> = match &blob_config.field {
        FieldConfig::Sphere => Box::new(SphereDistance::new(
            blob_config.center(),
            blob_config.threshold,
        )),
        FieldConfig::Metaballs { sources } => {
            Box::new(sources.iter().copied().collect::<PointSources>())
        }
    };

    blob.extract(field.as_ref(), material)
        .context("Marching cubes failed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lattice_blob::PointSource;
    use lattice_renderer::{Hittable, Interval, Ray};

    #[test]
    fn test_demo_scene_contents() {
        let scene = build_scene(&Config::default()).unwrap();
        // Eight markers and the blob
        assert_eq!(scene.objects().len(), 9);
        assert_eq!(scene.lights().len(), 1);
    }

    #[test]
    fn test_markers_sit_on_lattice_corners() {
        let scene = build_scene(&Config::default()).unwrap();
        // Looking down at the (4, 4, 4) corner
        let ray = Ray::new(Vec3::new(4.0, 10.0, 4.0), Vec3::NEG_Y);
        let rec = scene.hit(&ray, Interval::new(0.001, f64::INFINITY)).unwrap();
        assert!((rec.p.y - 4.1).abs() < 1e-9);
    }

    #[test]
    fn test_demo_blob_reaches_radius() {
        let config = Config::default();
        let ground: Arc<dyn Material> = Arc::new(Uniform::new(Color::ONE, 0.5, 0.5));
        let mesh = build_blob(&config.blob, ground).unwrap();
        assert!(!mesh.is_empty());

        // Inside corners span x = 1..3, so edge midpoints reach 0.5 and 3.5
        let (min, max) = mesh.bounds().unwrap();
        assert!(min.min_element() >= 0.0 && max.max_element() <= 4.0);
        assert_eq!((min.x, max.x), (0.5, 3.5));
    }

    #[test]
    fn test_without_markers() {
        let mut config = Config::default();
        config.blob.markers = false;
        let scene = build_scene(&config).unwrap();
        assert_eq!(scene.objects().len(), 1);
    }

    #[test]
    fn test_metaball_blob() {
        let mut config = Config::default();
        config.blob.cell_size = 0.5;
        config.blob.threshold = 1.0;
        config.blob.field = FieldConfig::Metaballs {
            sources: vec![PointSource {
                position: Vec3::splat(2.0),
                intensity: 1.0,
            }],
        };
        let material: Arc<dyn Material> = Arc::new(Uniform::new(Color::ONE, 0.5, 0.5));
        assert!(!build_blob(&config.blob, material).unwrap().is_empty());
    }

    #[test]
    fn test_bad_cell_size_is_reported() {
        let mut config = Config::default();
        config.blob.cell_size = 0.0;
        let err = match build_scene(&config) {
            Ok(_) => panic!("zero cell size was accepted"),
            Err(err) => err,
        };
        assert!(format!("{err:#}").contains("cell size"));
    }
}
