//! Light sources for direct illumination and shadow rays.

use lattice_math::{Color, Point3, Vec3};

/// Distance reported by a [`DirectionalLight`].
///
/// Bounds the shadow ray so it stays finite while reaching past any
/// realistic scene.
pub const DIRECTIONAL_LIGHT_DISTANCE: f64 = 1.0e6;

/// A light seen from a surface point.
pub trait Light: Send + Sync {
    /// Unit vector from `point` towards the light.
    fn direction(&self, point: Point3) -> Vec3;

    /// Distance from `point` to the light, used to clip shadow rays.
    fn distance(&self, point: Point3) -> f64;

    /// Radiance: base color scaled by intensity.
    fn color(&self) -> Color;
}

/// Omnidirectional light at a position. No falloff.
#[derive(Debug, Clone)]
pub struct PointLight {
    position: Point3,
    color: Color,
    intensity: f64,
}

impl PointLight {
    pub fn new(position: Point3, color: Color, intensity: f64) -> Self {
        Self {
            position,
            color,
            intensity,
        }
    }
}

impl Light for PointLight {
    fn direction(&self, point: Point3) -> Vec3 {
        (self.position - point).normalize()
    }

    fn distance(&self, point: Point3) -> f64 {
        (self.position - point).length()
    }

    fn color(&self) -> Color {
        self.color * self.intensity
    }
}

/// Light infinitely far away along a fixed direction (e.g. the sun).
#[derive(Debug, Clone)]
pub struct DirectionalLight {
    /// Unit vector pointing towards the light
    direction: Vec3,
    color: Color,
    intensity: f64,
}

impl DirectionalLight {
    /// `direction` points from the scene towards the light; it is normalized here.
    pub fn new(direction: Vec3, color: Color, intensity: f64) -> Self {
        Self {
            direction: direction.normalize(),
            color,
            intensity,
        }
    }
}

impl Light for DirectionalLight {
    fn direction(&self, _point: Point3) -> Vec3 {
        self.direction
    }

    fn distance(&self, _point: Point3) -> f64 {
        DIRECTIONAL_LIGHT_DISTANCE
    }

    fn color(&self) -> Color {
        self.color * self.intensity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_point_light() {
        let light = PointLight::new(Vec3::new(0.0, 4.0, 0.0), Color::ONE, 0.5);
        let p = Vec3::new(0.0, 1.0, 0.0);

        assert!((light.direction(p) - Vec3::Y).length() < 1e-12);
        assert!((light.distance(p) - 3.0).abs() < 1e-12);
        assert_eq!(light.color(), Color::splat(0.5));
    }

    #[test]
    fn test_directional_light() {
        let light = DirectionalLight::new(Vec3::new(1.0, 4.0, 10.0), Color::ONE, 1.0);

        let a = light.direction(Vec3::ZERO);
        let b = light.direction(Vec3::new(100.0, -3.0, 7.0));
        assert_eq!(a, b);
        assert!((a.length() - 1.0).abs() < 1e-12);

        let d = light.distance(Vec3::new(5.0, 5.0, 5.0));
        assert!(d.is_finite());
        assert_eq!(d, DIRECTIONAL_LIGHT_DISTANCE);
    }
}
