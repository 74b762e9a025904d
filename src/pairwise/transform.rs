//! Rigid 2D transforms (rotation, translation, optional mirror).

/// A rigid 2D transform.
///
/// A point `p` maps to `M · R(angle) · p + (tx, ty)`, where `R` is the
/// counter-clockwise rotation and `M` negates the x coordinate when `mirror`
/// is set. `angle` is in degrees and normalized to `[0, 360)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RigidTransform2D {
    pub angle: f64,
    pub tx: f64,
    pub ty: f64,
    pub mirror: bool,
}

impl Default for RigidTransform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl RigidTransform2D {
    pub fn new(angle: f64, tx: f64, ty: f64, mirror: bool) -> Self {
        Self {
            angle: normalize_degrees(angle),
            tx,
            ty,
            mirror,
        }
    }

    pub const fn identity() -> Self {
        Self {
            angle: 0.0,
            tx: 0.0,
            ty: 0.0,
            mirror: false,
        }
    }

    /// Returns `self ∘ first`: the transform that applies `first`, then `self`.
    pub fn compose(&self, first: &RigidTransform2D) -> RigidTransform2D {
        let a = self.linear();
        let b = first.linear();
        let m = [
            [
                a[0][0] * b[0][0] + a[0][1] * b[1][0],
                a[0][0] * b[0][1] + a[0][1] * b[1][1],
            ],
            [
                a[1][0] * b[0][0] + a[1][1] * b[1][0],
                a[1][0] * b[0][1] + a[1][1] * b[1][1],
            ],
        ];
        let (x, y) = self.apply_linear(first.tx, first.ty);
        from_parts(m, x + self.tx, y + self.ty)
    }

    /// The transform undoing `self`.
    pub fn inverse(&self) -> RigidTransform2D {
        let l = self.linear();
        // Orthonormal: the inverse is the transpose.
        let t = [[l[0][0], l[1][0]], [l[0][1], l[1][1]]];
        let x = -(t[0][0] * self.tx + t[0][1] * self.ty);
        let y = -(t[1][0] * self.tx + t[1][1] * self.ty);
        from_parts(t, x, y)
    }

    /// Maps a point through the transform.
    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let (lx, ly) = self.apply_linear(x, y);
        (lx + self.tx, ly + self.ty)
    }

    /// Component-wise comparison with angle wrap-around.
    pub fn approx_eq(&self, other: &RigidTransform2D, tol: f64) -> bool {
        let mut da = (self.angle - other.angle).abs() % 360.0;
        if da > 180.0 {
            da = 360.0 - da;
        }
        self.mirror == other.mirror
            && da <= tol
            && (self.tx - other.tx).abs() <= tol
            && (self.ty - other.ty).abs() <= tol
    }

    fn apply_linear(&self, x: f64, y: f64) -> (f64, f64) {
        let l = self.linear();
        (l[0][0] * x + l[0][1] * y, l[1][0] * x + l[1][1] * y)
    }

    fn linear(&self) -> [[f64; 2]; 2] {
        let (s, c) = self.angle.to_radians().sin_cos();
        let f = if self.mirror { -1.0 } else { 1.0 };
        [[f * c, -f * s], [s, c]]
    }
}

/// Rebuilds a transform from its linear part. The second row is always
/// `[sin, cos]`, the sign of the first row carries the mirror.
fn from_parts(m: [[f64; 2]; 2], tx: f64, ty: f64) -> RigidTransform2D {
    let det = m[0][0] * m[1][1] - m[0][1] * m[1][0];
    let angle = m[1][0].atan2(m[1][1]).to_degrees();
    RigidTransform2D::new(angle, tx, ty, det < 0.0)
}

fn normalize_degrees(angle: f64) -> f64 {
    let a = angle.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360 for tiny negative inputs
    if a >= 360.0 {
        0.0
    } else {
        a
    }
}
