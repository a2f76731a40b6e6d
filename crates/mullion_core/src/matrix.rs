//! Row-major 3x3 matrices and Wayland output transforms.

use crate::rect::Rect;

/// The eight Wayland output transforms (rotation and flip applied by the
/// physical display).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputTransform {
    #[default]
    Normal,
    Rotate90,
    Rotate180,
    Rotate270,
    Flipped,
    Flipped90,
    Flipped180,
    Flipped270,
}

impl OutputTransform {
    /// The transform's fixed 3x3 matrix.
    pub fn matrix(self) -> Mat3 {
        #[rustfmt::skip]
        let m = match self {
            OutputTransform::Normal =>    [ 1.0,  0.0, 0.0,  0.0,  1.0, 0.0, 0.0, 0.0, 1.0],
            OutputTransform::Rotate90 =>  [ 0.0,  1.0, 0.0, -1.0,  0.0, 0.0, 0.0, 0.0, 1.0],
            OutputTransform::Rotate180 => [-1.0,  0.0, 0.0,  0.0, -1.0, 0.0, 0.0, 0.0, 1.0],
            OutputTransform::Rotate270 => [ 0.0, -1.0, 0.0,  1.0,  0.0, 0.0, 0.0, 0.0, 1.0],
            OutputTransform::Flipped =>   [-1.0,  0.0, 0.0,  0.0,  1.0, 0.0, 0.0, 0.0, 1.0],
            OutputTransform::Flipped90 => [ 0.0,  1.0, 0.0,  1.0,  0.0, 0.0, 0.0, 0.0, 1.0],
            OutputTransform::Flipped180 => [ 1.0, 0.0, 0.0,  0.0, -1.0, 0.0, 0.0, 0.0, 1.0],
            OutputTransform::Flipped270 => [ 0.0, -1.0, 0.0, -1.0, 0.0, 0.0, 0.0, 0.0, 1.0],
        };
        Mat3(m)
    }
}

/// A row-major 3x3 affine matrix.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Mat3(pub [f32; 9]);

impl Mat3 {
    pub const IDENTITY: Mat3 = Mat3([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0]);

    /// `self * other`, row-major.
    pub fn multiply(&self, other: &Mat3) -> Mat3 {
        let a = &self.0;
        let b = &other.0;
        let mut m = [0.0f32; 9];
        for row in 0..3 {
            for col in 0..3 {
                m[row * 3 + col] = a[row * 3] * b[col]
                    + a[row * 3 + 1] * b[3 + col]
                    + a[row * 3 + 2] * b[6 + col];
            }
        }
        Mat3(m)
    }

    pub fn translate(&mut self, x: f32, y: f32) {
        let t = Mat3([1.0, 0.0, x, 0.0, 1.0, y, 0.0, 0.0, 1.0]);
        *self = self.multiply(&t);
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        let s = Mat3([x, 0.0, 0.0, 0.0, y, 0.0, 0.0, 0.0, 1.0]);
        *self = self.multiply(&s);
    }

    /// Counter-clockwise rotation by `rad` radians.
    pub fn rotate(&mut self, rad: f32) {
        let (sin, cos) = rad.sin_cos();
        let r = Mat3([cos, -sin, 0.0, sin, cos, 0.0, 0.0, 0.0, 1.0]);
        *self = self.multiply(&r);
    }

    /// Right-multiplies by an output transform's matrix.
    pub fn transform(&mut self, transform: OutputTransform) {
        *self = self.multiply(&transform.matrix());
    }

    pub fn transpose(&self) -> Mat3 {
        let m = &self.0;
        Mat3([m[0], m[3], m[6], m[1], m[4], m[7], m[2], m[5], m[8]])
    }

    /// Transforms a point, assuming an affine bottom row.
    pub fn apply(&self, x: f32, y: f32) -> (f32, f32) {
        let m = &self.0;
        (
            m[0] * x + m[1] * y + m[2],
            m[3] * x + m[4] * y + m[5],
        )
    }

    /// Builds the projection for a box: unit square -> box -> output space.
    ///
    /// Composition order: translate to the box origin; rotate around the box
    /// center if a rotation is set; scale to the box size; recenter and apply
    /// the output transform if it is not the identity; finally left-multiply
    /// by the caller-supplied output projection. The order is significant.
    pub fn project_box(
        rect: &Rect,
        transform: OutputTransform,
        rotation: f32,
        projection: &Mat3,
    ) -> Mat3 {
        let mut mat = Mat3::IDENTITY;
        mat.translate(rect.x, rect.y);

        if rotation != 0.0 {
            mat.translate(rect.width / 2.0, rect.height / 2.0);
            mat.rotate(rotation);
            mat.translate(-rect.width / 2.0, -rect.height / 2.0);
        }

        mat.scale(rect.width, rect.height);

        if transform != OutputTransform::Normal {
            mat.translate(0.5, 0.5);
            mat.transform(transform);
            mat.translate(-0.5, -0.5);
        }

        projection.multiply(&mat)
    }

    /// The matrix as three column-major `vec4` columns, the layout WGSL
    /// expects for a `mat3x3<f32>` uniform.
    pub fn to_gpu_columns(&self) -> [[f32; 4]; 3] {
        let m = &self.0;
        [
            [m[0], m[3], m[6], 0.0],
            [m[1], m[4], m[7], 0.0],
            [m[2], m[5], m[8], 0.0],
        ]
    }
}

impl Default for Mat3 {
    fn default() -> Self {
        Mat3::IDENTITY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(a: (f32, f32), b: (f32, f32)) {
        assert!((a.0 - b.0).abs() < 1e-4 && (a.1 - b.1).abs() < 1e-4, "{a:?} != {b:?}");
    }

    #[test]
    fn identity_multiplication() {
        let m = Mat3([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 0.0, 0.0, 1.0]);
        assert_eq!(m.multiply(&Mat3::IDENTITY), m);
        assert_eq!(Mat3::IDENTITY.multiply(&m), m);
    }

    #[test]
    fn translate_then_scale_order() {
        let mut m = Mat3::IDENTITY;
        m.translate(10.0, 20.0);
        m.scale(2.0, 3.0);
        // Scaling is applied to the point first, then the translation.
        assert_close(m.apply(1.0, 1.0), (12.0, 23.0));
    }

    #[test]
    fn project_box_maps_unit_square_to_box() {
        let rect = Rect::new(10.0, 20.0, 100.0, 50.0);
        let m = Mat3::project_box(&rect, OutputTransform::Normal, 0.0, &Mat3::IDENTITY);
        assert_close(m.apply(0.0, 0.0), (10.0, 20.0));
        assert_close(m.apply(1.0, 1.0), (110.0, 70.0));
    }

    #[test]
    fn project_box_rotation_preserves_center() {
        let rect = Rect::new(0.0, 0.0, 10.0, 10.0);
        let m = Mat3::project_box(
            &rect,
            OutputTransform::Normal,
            std::f32::consts::FRAC_PI_2,
            &Mat3::IDENTITY,
        );
        // The box center is the rotation pivot and stays in place.
        assert_close(m.apply(0.5, 0.5), (5.0, 5.0));
    }

    #[test]
    fn rotate180_flips_unit_square_in_place() {
        let rect = Rect::new(0.0, 0.0, 1.0, 1.0);
        let m = Mat3::project_box(&rect, OutputTransform::Rotate180, 0.0, &Mat3::IDENTITY);
        assert_close(m.apply(0.0, 0.0), (1.0, 1.0));
        assert_close(m.apply(1.0, 0.0), (0.0, 1.0));
    }

    #[test]
    fn transpose_round_trips() {
        let m = Mat3([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        assert_eq!(m.transpose().transpose(), m);
    }

    #[test]
    fn gpu_columns_are_column_major() {
        let m = Mat3([1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0]);
        let cols = m.to_gpu_columns();
        assert_eq!(cols[0], [1.0, 4.0, 7.0, 0.0]);
        assert_eq!(cols[2], [3.0, 6.0, 9.0, 0.0]);
    }
}
