use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);
    pub const UNIT_Z: Self = Self::new(0.0, 0.0, 1.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    pub fn length(self) -> f32 {
        self.dot(self).sqrt()
    }

    pub fn dot(self, other: Self) -> f32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub fn cross(self, other: Self) -> Self {
        Self::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    pub fn normalize_or_zero(self) -> Self {
        let length = self.length();
        if length <= f32::EPSILON {
            Self::ZERO
        } else {
            self * (1.0 / length)
        }
    }

    /// Distance on the ground plane, ignoring height.
    pub fn planar_distance(self, other: Self) -> f32 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    pub fn lerp(self, target: Self, alpha: f32) -> Self {
        self + (target - self) * alpha
    }

    pub fn with_z(self, z: f32) -> Self {
        Self { z, ..self }
    }

    /// Unit vector on the ground plane pointing along `yaw_degrees` (0 = +x, 90 = +y).
    pub fn from_yaw(yaw_degrees: f32) -> Self {
        let radians = yaw_degrees.to_radians();
        Self::new(radians.cos(), radians.sin(), 0.0)
    }

    pub fn rotated_about_x(self, degrees: f32, pivot: Self) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dy = self.y - pivot.y;
        let dz = self.z - pivot.z;
        Self::new(
            self.x,
            pivot.y + dy * cos - dz * sin,
            pivot.z + dy * sin + dz * cos,
        )
    }

    pub fn rotated_about_y(self, degrees: f32, pivot: Self) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dz = self.z - pivot.z;
        Self::new(
            pivot.x + dx * cos + dz * sin,
            self.y,
            pivot.z - dx * sin + dz * cos,
        )
    }

    pub fn rotated_about_z(self, degrees: f32, pivot: Self) -> Self {
        let (sin, cos) = degrees.to_radians().sin_cos();
        let dx = self.x - pivot.x;
        let dy = self.y - pivot.y;
        Self::new(
            pivot.x + dx * cos - dy * sin,
            pivot.y + dx * sin + dy * cos,
            self.z,
        )
    }

    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite() && self.z.is_finite()
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl AddAssign for Vec3 {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl SubAssign for Vec3 {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl Mul<f32> for Vec3 {
    type Output = Self;

    fn mul(self, rhs: f32) -> Self {
        Self::new(self.x * rhs, self.y * rhs, self.z * rhs)
    }
}

impl Neg for Vec3 {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y, -self.z)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_vec3_close(actual: Vec3, expected: Vec3) {
        assert!(
            (actual - expected).length() < 1e-3,
            "expected {expected:?}, got {actual:?}"
        );
    }

    #[test]
    fn planar_distance_ignores_height() {
        let a = Vec3::new(0.0, 0.0, 0.0);
        let b = Vec3::new(3.0, 4.0, 100.0);
        assert!((a.planar_distance(b) - 5.0).abs() < 1e-6);
    }

    #[test]
    fn quarter_turn_about_z_pivot() {
        let point = Vec3::new(10.0, 0.0, 5.0);
        let rotated = point.rotated_about_z(90.0, Vec3::ZERO);
        assert_vec3_close(rotated, Vec3::new(0.0, 10.0, 5.0));
    }

    #[test]
    fn rotation_about_x_respects_external_pivot() {
        let point = Vec3::new(1.0, 2.0, 0.0);
        let rotated = point.rotated_about_x(90.0, Vec3::new(0.0, 0.0, 0.0));
        assert_vec3_close(rotated, Vec3::new(1.0, 0.0, 2.0));
    }

    #[test]
    fn rotation_about_y_then_back_is_identity() {
        let pivot = Vec3::new(4.0, -2.0, 7.0);
        let point = Vec3::new(-3.0, 1.0, 2.0);
        let back = point
            .rotated_about_y(37.0, pivot)
            .rotated_about_y(-37.0, pivot);
        assert_vec3_close(back, point);
    }

    #[test]
    fn normalize_zero_vector_stays_zero() {
        assert_eq!(Vec3::ZERO.normalize_or_zero(), Vec3::ZERO);
    }

    #[test]
    fn yaw_ninety_points_along_positive_y() {
        assert_vec3_close(Vec3::from_yaw(90.0), Vec3::new(0.0, 1.0, 0.0));
    }
}
