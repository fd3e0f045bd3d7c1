/// A 2D affine transformation stored as the top two rows of a 3x3 matrix,
/// in row-major order.
///
/// Used to place animated glyphs: transforms compose parent to child and are
/// handed to the rasterizer as-is.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Matrix data in row-major order: [a, b, tx, c, d, ty]
    pub data: [f32; 6],
}

impl Transform {
    /// Identity matrix (no transformation)
    pub const IDENTITY: Self = Self {
        data: [
            1.0, 0.0, 0.0, // row 0
            0.0, 1.0, 0.0, // row 1
        ],
    };

    /// Create an identity transform
    pub fn identity() -> Self {
        Self::IDENTITY
    }

    /// Create a translation transform
    pub fn translate(x: f32, y: f32) -> Self {
        Self {
            data: [
                1.0, 0.0, x, // row 0
                0.0, 1.0, y, // row 1
            ],
        }
    }

    /// Create a rotation transform. Positive angles turn clockwise on a
    /// y-down surface.
    pub fn rotate(angle_radians: f32) -> Self {
        let cos = angle_radians.cos();
        let sin = angle_radians.sin();
        Self {
            data: [
                cos, -sin, 0.0, // row 0
                sin, cos, 0.0, // row 1
            ],
        }
    }

    /// Create a uniform scale transform
    pub fn scale(s: f32) -> Self {
        Self::scale_xy(s, s)
    }

    /// Create a non-uniform scale transform
    pub fn scale_xy(sx: f32, sy: f32) -> Self {
        Self {
            data: [
                sx, 0.0, 0.0, // row 0
                0.0, sy, 0.0, // row 1
            ],
        }
    }

    /// Compose this transform with another: self * other
    /// Applies `other` first, then `self`.
    pub fn then(&self, other: &Transform) -> Transform {
        let [a1, b1, tx1, c1, d1, ty1] = self.data;
        let [a2, b2, tx2, c2, d2, ty2] = other.data;

        Transform {
            data: [
                a1 * a2 + b1 * c2,
                a1 * b2 + b1 * d2,
                a1 * tx2 + b1 * ty2 + tx1,
                c1 * a2 + d1 * c2,
                c1 * b2 + d1 * d2,
                c1 * tx2 + d1 * ty2 + ty1,
            ],
        }
    }

    /// Apply this transform around `(x, y)` instead of the coordinate origin
    pub fn around(&self, x: f32, y: f32) -> Transform {
        Transform::translate(x, y)
            .then(self)
            .then(&Transform::translate(-x, -y))
    }

    /// Compute the inverse of this transform.
    /// A degenerate (zero-determinant) transform inverts to identity.
    pub fn inverse(&self) -> Transform {
        let [a, b, tx, c, d, ty] = self.data;

        let det = a * d - b * c;
        if det.abs() < 1e-10 {
            return Transform::IDENTITY;
        }

        let inv_det = 1.0 / det;
        Transform {
            data: [
                d * inv_det,
                -b * inv_det,
                (b * ty - d * tx) * inv_det,
                -c * inv_det,
                a * inv_det,
                (c * tx - a * ty) * inv_det,
            ],
        }
    }

    /// Transform a 2D point
    pub fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        let [a, b, tx, c, d, ty] = self.data;
        (a * x + b * y + tx, c * x + d * y + ty)
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// Convert to the rasterizer's transform type
    pub fn to_skia(&self) -> resvg::tiny_skia::Transform {
        let [a, b, tx, c, d, ty] = self.data;
        resvg::tiny_skia::Transform::from_row(a, c, b, d, tx, ty)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-4
    }

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert!(t.is_identity());
        assert_eq!(t.transform_point(10.0, 20.0), (10.0, 20.0));
    }

    #[test]
    fn test_translate() {
        let t = Transform::translate(5.0, 10.0);
        assert_eq!(t.transform_point(10.0, 20.0), (15.0, 30.0));
    }

    #[test]
    fn test_rotate() {
        // Quarter turn clockwise on a y-down surface: +x goes to +y
        let (x, y) = Transform::rotate(PI / 2.0).transform_point(1.0, 0.0);
        assert!(approx_eq(x, 0.0));
        assert!(approx_eq(y, 1.0));
    }

    #[test]
    fn test_scale_xy() {
        let t = Transform::scale_xy(2.0, 3.0);
        assert_eq!(t.transform_point(1.0, 1.0), (2.0, 3.0));
    }

    #[test]
    fn test_compose() {
        // Scale first, then translate
        let t = Transform::translate(10.0, 0.0).then(&Transform::scale(2.0));
        assert_eq!(t.transform_point(1.0, 1.0), (12.0, 2.0));
    }

    #[test]
    fn test_around_keeps_pivot_fixed() {
        let t = Transform::rotate(0.7).then(&Transform::scale(1.5)).around(50.0, 40.0);
        let (x, y) = t.transform_point(50.0, 40.0);
        assert!(approx_eq(x, 50.0));
        assert!(approx_eq(y, 40.0));
    }

    #[test]
    fn test_inverse_round_trip() {
        let t = Transform::translate(3.0, -7.0)
            .then(&Transform::rotate(0.4))
            .then(&Transform::scale_xy(2.0, 0.5));
        let (x, y) = t.transform_point(4.0, 9.0);
        let (bx, by) = t.inverse().transform_point(x, y);
        assert!(approx_eq(bx, 4.0));
        assert!(approx_eq(by, 9.0));
    }

    #[test]
    fn test_degenerate_inverse_is_identity() {
        assert!(Transform::scale(0.0).inverse().is_identity());
    }
}
