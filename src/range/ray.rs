//! Ray casting against upright cylinders
//!
//! World convention: +y up, the camera looks down -z at zero yaw.

use glam::{Vec2, Vec3};

/// A half-line from `origin` along unit `dir`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    pub origin: Vec3,
    pub dir: Vec3,
}

impl Ray {
    pub fn new(origin: Vec3, dir: Vec3) -> Self {
        Self {
            origin,
            dir: dir.normalize_or_zero(),
        }
    }

    #[inline]
    pub fn at(&self, t: f32) -> Vec3 {
        self.origin + self.dir * t
    }
}

/// A capped cylinder standing on `base`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cylinder {
    /// Center of the bottom cap
    pub base: Vec3,
    pub radius: f32,
    pub height: f32,
}

impl Cylinder {
    fn contains_xz(&self, p: Vec3) -> bool {
        let d = Vec2::new(p.x - self.base.x, p.z - self.base.z);
        d.length_squared() <= self.radius * self.radius
    }

    fn within_height(&self, y: f32) -> bool {
        y >= self.base.y && y <= self.base.y + self.height
    }
}

/// Distance along the ray to the first hit, if any
pub fn ray_cylinder(ray: &Ray, cyl: &Cylinder) -> Option<f32> {
    let mut nearest: Option<f32> = None;
    let mut consider = |t: f32| {
        if t >= 0.0 && nearest.is_none_or(|n| t < n) {
            nearest = Some(t);
        }
    };

    // Side wall: solve |o + t*d|^2 = r^2 in the xz plane
    let o = Vec2::new(ray.origin.x - cyl.base.x, ray.origin.z - cyl.base.z);
    let d = Vec2::new(ray.dir.x, ray.dir.z);
    let a = d.length_squared();
    if a > 1e-8 {
        let b = 2.0 * o.dot(d);
        let c = o.length_squared() - cyl.radius * cyl.radius;
        let disc = b * b - 4.0 * a * c;
        if disc >= 0.0 {
            let sqrt = disc.sqrt();
            for t in [(-b - sqrt) / (2.0 * a), (-b + sqrt) / (2.0 * a)] {
                if cyl.within_height(ray.at(t).y) {
                    consider(t);
                }
            }
        }
    }

    // Caps
    if ray.dir.y.abs() > 1e-8 {
        for plane_y in [cyl.base.y, cyl.base.y + cyl.height] {
            let t = (plane_y - ray.origin.y) / ray.dir.y;
            if cyl.contains_xz(ray.at(t)) {
                consider(t);
            }
        }
    }

    nearest
}

/// Unit view direction for a yaw/pitch pair (radians)
pub fn look_direction(yaw: f32, pitch: f32) -> Vec3 {
    Vec3::new(
        -yaw.sin() * pitch.cos(),
        pitch.sin(),
        -yaw.cos() * pitch.cos(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post() -> Cylinder {
        Cylinder {
            base: Vec3::new(0.0, 0.0, -10.0),
            radius: 0.5,
            height: 2.0,
        }
    }

    #[test]
    fn test_straight_hit_on_side() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::NEG_Z);
        let t = ray_cylinder(&ray, &post()).unwrap();
        assert!((t - 9.5).abs() < 1e-4);
    }

    #[test]
    fn test_miss_beside() {
        let ray = Ray::new(Vec3::new(1.0, 1.0, 0.0), Vec3::NEG_Z);
        assert!(ray_cylinder(&ray, &post()).is_none());
    }

    #[test]
    fn test_miss_above() {
        let ray = Ray::new(Vec3::new(0.0, 3.0, 0.0), Vec3::NEG_Z);
        assert!(ray_cylinder(&ray, &post()).is_none());
    }

    #[test]
    fn test_behind_is_ignored() {
        let ray = Ray::new(Vec3::new(0.0, 1.0, 0.0), Vec3::Z);
        assert!(ray_cylinder(&ray, &post()).is_none());
    }

    #[test]
    fn test_hit_top_cap_from_above() {
        let ray = Ray::new(Vec3::new(0.0, 5.0, -10.0), Vec3::NEG_Y);
        let t = ray_cylinder(&ray, &post()).unwrap();
        assert!((t - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_look_direction_default_is_forward() {
        let dir = look_direction(0.0, 0.0);
        assert!((dir - Vec3::NEG_Z).length() < 1e-6);
        let left = look_direction(std::f32::consts::FRAC_PI_2, 0.0);
        assert!((left - Vec3::NEG_X).length() < 1e-6);
    }
}
