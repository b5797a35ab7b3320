use std::fmt;
use std::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

/// 2D vector in world (grid) or screen space. Screen y grows downward.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Vector2 {
    pub x: f32,
    pub y: f32,
}

impl Vector2 {
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    pub const fn zero() -> Self {
        Self::new(0.0, 0.0)
    }

    pub const fn one() -> Self {
        Self::new(1.0, 1.0)
    }

    pub const fn up() -> Self {
        Self::new(0.0, -1.0)
    }

    pub const fn down() -> Self {
        Self::new(0.0, 1.0)
    }

    pub const fn left() -> Self {
        Self::new(-1.0, 0.0)
    }

    pub const fn right() -> Self {
        Self::new(1.0, 0.0)
    }

    /// Unit vector pointing along `angle` (radians).
    #[inline]
    pub fn from_angle(angle: f32) -> Self {
        Self::new(angle.cos(), angle.sin())
    }

    #[inline]
    pub fn dot(self, b: Self) -> f32 {
        self.x * b.x + self.y * b.y
    }

    /// Z component of the 3D cross product.
    #[inline]
    pub fn cross(self, b: Self) -> f32 {
        self.x * b.y - self.y * b.x
    }

    #[inline]
    pub fn length_squared(self) -> f32 {
        self.dot(self)
    }

    #[inline]
    pub fn length(self) -> f32 {
        self.length_squared().sqrt()
    }

    #[inline]
    pub fn distance_squared(self, b: Self) -> f32 {
        (self - b).length_squared()
    }

    #[inline]
    pub fn distance(self, b: Self) -> f32 {
        self.distance_squared(b).sqrt()
    }

    /// Returns the zero vector when the length is zero instead of NaNs.
    pub fn normalize(self) -> Self {
        let len = self.length();
        if len == 0.0 {
            return Self::zero();
        }
        Self::new(self.x / len, self.y / len)
    }

    #[inline]
    pub fn floor(self) -> Self {
        Self::new(self.x.floor(), self.y.floor())
    }
}

impl fmt::Display for Vector2 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

macro_rules! component_op {
    ($trait:ident, $fn:ident, $assign_trait:ident, $assign_fn:ident, $op:tt) => {
        impl $trait for Vector2 {
            type Output = Vector2;

            #[inline]
            fn $fn(self, b: Vector2) -> Vector2 {
                Vector2::new(self.x $op b.x, self.y $op b.y)
            }
        }

        impl $assign_trait for Vector2 {
            #[inline]
            fn $assign_fn(&mut self, b: Vector2) {
                *self = *self $op b;
            }
        }
    };
}

component_op!(Add, add, AddAssign, add_assign, +);
component_op!(Sub, sub, SubAssign, sub_assign, -);
component_op!(Mul, mul, MulAssign, mul_assign, *);
component_op!(Div, div, DivAssign, div_assign, /);

impl Mul<f32> for Vector2 {
    type Output = Vector2;

    #[inline]
    fn mul(self, s: f32) -> Vector2 {
        Vector2::new(self.x * s, self.y * s)
    }
}

impl Neg for Vector2 {
    type Output = Vector2;

    #[inline]
    fn neg(self) -> Vector2 {
        Vector2::new(-self.x, -self.y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn operators_return_new_values() {
        let a = Vector2::new(1.0, 2.0);
        let b = Vector2::new(3.0, -4.0);
        assert_eq!(a + b, Vector2::new(4.0, -2.0));
        assert_eq!(a - b, Vector2::new(-2.0, 6.0));
        assert_eq!(a * b, Vector2::new(3.0, -8.0));
        assert_eq!(b / Vector2::new(3.0, 2.0), Vector2::new(1.0, -2.0));
        assert_eq!(a * 2.0, Vector2::new(2.0, 4.0));
        assert_eq!(-a, Vector2::new(-1.0, -2.0));
        // inputs untouched
        assert_eq!(a, Vector2::new(1.0, 2.0));
    }

    #[test]
    fn in_place_mutators() {
        let mut v = Vector2::one();
        v += Vector2::new(1.0, 2.0);
        v *= Vector2::new(2.0, 2.0);
        v -= Vector2::one();
        v /= Vector2::new(3.0, 5.0);
        assert_eq!(v, Vector2::new(1.0, 1.0));
    }

    #[test]
    fn length_and_distance() {
        let v = Vector2::new(3.0, 4.0);
        assert_eq!(v.length(), 5.0);
        assert_eq!(v.length_squared(), 25.0);
        assert_eq!(Vector2::zero().distance(v), 5.0);
        assert!((v.normalize().length() - 1.0).abs() < 1e-6);
        assert_eq!(Vector2::zero().normalize(), Vector2::zero());
    }

    #[test]
    fn dot_cross_and_display() {
        assert_eq!(Vector2::right().dot(Vector2::down()), 0.0);
        assert_eq!(Vector2::right().cross(Vector2::down()), 1.0);
        assert_eq!(Vector2::new(1.5, -2.0).to_string(), "(1.5, -2)");
    }
}
