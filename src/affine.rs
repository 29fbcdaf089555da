//! Minimal 2D affine transform.
//!
//! Row-major six-coefficient map:
//!
//! ```text
//! |x'|   |a b c| |x|
//! |y'| = |d e f| |y|
//! |1 |   |0 0 1| |1|
//! ```
//!
//! This covers what the gallery needs (identity, translate/rotate/scale
//! primitives, composition, point application, and inversion for sampling)
//! without pulling in a linear-algebra crate.

use std::ops::Mul;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Self = Self {
        a: 1.0,
        b: 0.0,
        c: 0.0,
        d: 0.0,
        e: 1.0,
        f: 0.0,
    };

    /// Pure translation by `(tx, ty)`.
    pub const fn translation(tx: f64, ty: f64) -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: tx,
            d: 0.0,
            e: 1.0,
            f: ty,
        }
    }

    /// Rotation by `radians`, counterclockwise in a y-up coordinate system.
    pub fn rotation(radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: cos,
            b: -sin,
            c: 0.0,
            d: sin,
            e: cos,
            f: 0.0,
        }
    }

    /// Non-uniform scale about the origin.
    pub const fn scale(sx: f64, sy: f64) -> Self {
        Self {
            a: sx,
            b: 0.0,
            c: 0.0,
            d: 0.0,
            e: sy,
            f: 0.0,
        }
    }

    /// Map a point through the transform.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        (
            self.a * x + self.b * y + self.c,
            self.d * x + self.e * y + self.f,
        )
    }

    /// Invert the transform, or `None` when the linear part is singular.
    pub fn inverse(&self) -> Option<Self> {
        let det = self.a * self.e - self.b * self.d;
        if det.abs() < 1e-12 {
            return None;
        }
        Some(Self {
            a: self.e / det,
            b: -self.b / det,
            c: (self.b * self.f - self.c * self.e) / det,
            d: -self.d / det,
            e: self.a / det,
            f: (self.c * self.d - self.a * self.f) / det,
        })
    }

    /// Coefficient-wise comparison within `eps`.
    pub fn approx_eq(&self, other: &Self, eps: f64) -> bool {
        (self.a - other.a).abs() < eps
            && (self.b - other.b).abs() < eps
            && (self.c - other.c).abs() < eps
            && (self.d - other.d).abs() < eps
            && (self.e - other.e).abs() < eps
            && (self.f - other.f).abs() < eps
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Affine {
    type Output = Self;

    /// Composition: `(lhs * rhs).apply(p)` equals `lhs.apply(rhs.apply(p))`,
    /// so right-multiplying a primitive appends it to the front of the
    /// point-mapping pipeline.
    fn mul(self, rhs: Self) -> Self {
        Self {
            a: self.a * rhs.a + self.b * rhs.d,
            b: self.a * rhs.b + self.b * rhs.e,
            c: self.a * rhs.c + self.b * rhs.f + self.c,
            d: self.d * rhs.a + self.e * rhs.d,
            e: self.d * rhs.b + self.e * rhs.e,
            f: self.d * rhs.c + self.e * rhs.f + self.f,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn default_is_identity() {
        assert_eq!(Affine::default(), Affine::IDENTITY);
    }

    #[test]
    fn identity_multiply() {
        let t = Affine::translation(3.0, -4.0);
        assert_eq!(Affine::IDENTITY * t, t);
        assert_eq!(t * Affine::IDENTITY, t);
    }

    #[test]
    fn translations_add() {
        let t = Affine::translation(1.0, 2.0) * Affine::translation(3.0, 4.0);
        assert_eq!(t.apply(0.0, 0.0), (4.0, 6.0));
    }

    #[test]
    fn composition_order_applies_rhs_first() {
        // Scale then translate vs translate then scale differ in the offset.
        let ts = Affine::translation(10.0, 0.0) * Affine::scale(2.0, 2.0);
        let st = Affine::scale(2.0, 2.0) * Affine::translation(10.0, 0.0);
        assert_eq!(ts.apply(1.0, 1.0), (12.0, 2.0));
        assert_eq!(st.apply(1.0, 1.0), (22.0, 2.0));
    }

    #[test]
    fn rotation_quarter_turn() {
        let r = Affine::rotation(std::f64::consts::FRAC_PI_2);
        let (x, y) = r.apply(1.0, 0.0);
        assert!((x - 0.0).abs() < EPS);
        assert!((y - 1.0).abs() < EPS);
    }

    #[test]
    fn inverse_round_trip() {
        let t = Affine::translation(-5.0, 7.0)
            * Affine::rotation(0.6)
            * Affine::scale(2.0, 0.5);
        let inv = t.inverse().unwrap();
        assert!((t * inv).approx_eq(&Affine::IDENTITY, EPS));
        assert!((inv * t).approx_eq(&Affine::IDENTITY, EPS));
    }

    #[test]
    fn singular_has_no_inverse() {
        assert!(Affine::scale(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn flip_conjugation_reverses_rotation() {
        // Sandwiching a rotation between two vertical flips negates its
        // angle; this is what keeps on-screen rotation directions honest.
        let flip = Affine::scale(1.0, -1.0);
        let r = Affine::rotation(0.25);
        let conjugated = flip * r * flip;
        assert!(conjugated.approx_eq(&Affine::rotation(-0.25), EPS));
    }
}
