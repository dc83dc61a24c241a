use nalgebra::{Rotation3, Vector3};

use detector_types::units::DEG;

/// Proper rotation of a placed volume.
///
/// The `rotate_*` methods pre-multiply: `r.rotate_x(a)` yields `Rx(a) * r`, so
/// successive calls accumulate in the frame of the mother volume.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rotation(Rotation3<f64>);

impl Rotation {
    pub fn identity() -> Self {
        Self(Rotation3::identity())
    }

    /// Rotation about X by `angle` radians, then Y, then Z.
    pub fn from_angles(angles: [f64; 3]) -> Self {
        Self::identity()
            .rotate_x(angles[0])
            .rotate_y(angles[1])
            .rotate_z(angles[2])
    }

    pub fn from_degrees(angles: [f64; 3]) -> Self {
        Self::from_angles([angles[0] * DEG, angles[1] * DEG, angles[2] * DEG])
    }

    pub fn rotate_x(self, angle: f64) -> Self {
        Self(Rotation3::from_axis_angle(&Vector3::x_axis(), angle) * self.0)
    }

    pub fn rotate_y(self, angle: f64) -> Self {
        Self(Rotation3::from_axis_angle(&Vector3::y_axis(), angle) * self.0)
    }

    pub fn rotate_z(self, angle: f64) -> Self {
        Self(Rotation3::from_axis_angle(&Vector3::z_axis(), angle) * self.0)
    }

    /// `self * other`: apply `other` first.
    pub fn compose(self, other: Rotation) -> Self {
        Self(self.0 * other.0)
    }

    pub fn apply(&self, v: [f64; 3]) -> [f64; 3] {
        let r = self.0 * Vector3::new(v[0], v[1], v[2]);
        [r.x, r.y, r.z]
    }

    /// Largest absolute difference between matrix entries. Unlike the relative
    /// rotation angle this stays accurate for nearly equal rotations.
    pub fn deviation(&self, other: &Rotation) -> f64 {
        (self.0.matrix() - other.0.matrix()).amax()
    }

    pub fn is_identity(&self, tolerance: f64) -> bool {
        self.deviation(&Rotation::identity()) <= tolerance
    }
}

impl From<Rotation3<f64>> for Rotation {
    fn from(rotation: Rotation3<f64>) -> Self {
        Self(rotation)
    }
}

impl Default for Rotation {
    fn default() -> Self {
        Self::identity()
    }
}

/// Rigid transform of a daughter within its mother frame.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Transform {
    pub rotation: Rotation,
    pub translation: [f64; 3],
}

impl Transform {
    pub fn new(rotation: Rotation, translation: [f64; 3]) -> Self {
        Self {
            rotation,
            translation,
        }
    }

    pub fn identity() -> Self {
        Self::default()
    }

    pub fn translation(translation: [f64; 3]) -> Self {
        Self {
            rotation: Rotation::identity(),
            translation,
        }
    }

    /// Map a point from the daughter frame into the mother frame.
    pub fn apply_point(&self, p: [f64; 3]) -> [f64; 3] {
        let r = self.rotation.apply(p);
        [
            r[0] + self.translation[0],
            r[1] + self.translation[1],
            r[2] + self.translation[2],
        ]
    }
}
