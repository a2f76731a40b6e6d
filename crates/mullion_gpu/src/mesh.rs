//! The 3x3 decoration mesh.
//!
//! Decorations are drawn as a unit square partitioned into nine cells. The
//! inner cell boundaries sit at each edge's corner-radius inset, so the four
//! corner cells cover exactly the rounded regions:
//!
//! ```text
//!      ob  il  ir  oe
//!     0 ┌───┬───┬───┐ ob
//!       │ ╭─┼───┼─╮ │
//!       ├─┼─┼───┼─┼─┤ it
//!       │ │ │   │ │ │
//!       ├─┼─┼───┼─┼─┤ ib ┐
//!       │ ╰─┼───┼─╯ │    ├ corner inset
//!     1 └───┴───┴───┘ oe ┘
//!       0           1
//! ```
//!
//! Texture coordinates place the distance-field origin so that corner cells
//! sweep 1..0 toward the center, edge cells vary along one axis only, and
//! the center cell sits at the origin. The fragment stage turns the distance
//! from that origin into rounded-corner coverage.

use bytemuck::{Pod, Zeroable};

/// One interleaved mesh vertex.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DecorationVertex {
    pub pos: [f32; 2],
    pub uv: [f32; 2],
}

pub const VERTICES_PER_QUAD: usize = 6;
pub const MESH_VERTEX_COUNT: usize = 9 * VERTICES_PER_QUAD;

/// Per-edge corner insets in unit-square terms, clamped so opposing insets
/// never cross: if they would, both collapse to their midpoint.
pub(crate) fn clamped_insets(corner_radius: [f32; 4]) -> (f32, f32, f32, f32) {
    let (ob, oe) = (0.0f32, 1.0f32);
    let mut it = ob + corner_radius[0];
    let mut ib = oe - corner_radius[2];
    let mut il = ob + corner_radius[3];
    let mut ir = oe - corner_radius[1];
    if il > ir {
        let mid = (il + ir) / 2.0;
        il = mid;
        ir = mid;
    }
    if it > ib {
        let mid = (it + ib) / 2.0;
        it = mid;
        ib = mid;
    }
    (it, ir, ib, il)
}

/// Two CCW triangles covering the rect with the given top/right/bottom/left
/// positions and texture coordinates.
fn quad(
    out: &mut [DecorationVertex],
    (t, r, b, l): (f32, f32, f32, f32),
    (ut, ur, ub, ul): (f32, f32, f32, f32),
) {
    let v = |x: f32, y: f32, u: f32, w: f32| DecorationVertex {
        pos: [x, y],
        uv: [u, w],
    };
    out[0] = v(r, t, ur, ut);
    out[1] = v(l, t, ul, ut);
    out[2] = v(l, b, ul, ub);
    out[3] = v(l, b, ul, ub);
    out[4] = v(r, b, ur, ub);
    out[5] = v(r, t, ur, ut);
}

/// Builds the mesh for per-edge corner radii (top, right, bottom, left, in
/// unit-square terms) and a corner shift that slides the texcoord origin of
/// the non-corner cells.
pub fn decoration_mesh(
    corner_radius: [f32; 4],
    corner_shift: [f32; 2],
) -> [DecorationVertex; MESH_VERTEX_COUNT] {
    let (ob, oe) = (0.0f32, 1.0f32);
    let (it, ir, ib, il) = clamped_insets(corner_radius);

    let [px0_v, px0_h] = corner_shift;
    let px1 = 1.0f32;

    let cells = [
        // Top row.
        ((ob, il, it, ob), (px1, px0_h, px0_v, px1)),
        ((ob, ir, it, il), (px1, px0_h, px0_v, px0_h)),
        ((ob, oe, it, ir), (px1, px1, px0_v, px0_h)),
        // Middle row.
        ((it, il, ib, ob), (px0_v, px0_h, px0_v, px1)),
        ((it, ir, ib, il), (px0_v, px0_h, px0_v, px0_h)),
        ((it, oe, ib, ir), (px0_v, px1, px0_v, px0_h)),
        // Bottom row.
        ((ib, il, oe, ob), (px0_v, px0_h, px1, px1)),
        ((ib, ir, oe, il), (px0_v, px0_h, px1, px0_h)),
        ((ib, oe, oe, ir), (px0_v, px1, px1, px0_h)),
    ];

    let mut vertices = [DecorationVertex::default(); MESH_VERTEX_COUNT];
    for (i, (pos, uv)) in cells.into_iter().enumerate() {
        quad(&mut vertices[i * VERTICES_PER_QUAD..(i + 1) * VERTICES_PER_QUAD], pos, uv);
    }
    vertices
}

/// A single unit quad with pass-through texture coordinates, used for
/// content textures.
pub fn unit_quad() -> [DecorationVertex; VERTICES_PER_QUAD] {
    let mut vertices = [DecorationVertex::default(); VERTICES_PER_QUAD];
    quad(
        &mut vertices,
        (0.0, 1.0, 1.0, 0.0),
        (0.0, 1.0, 1.0, 0.0),
    );
    vertices
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_radius_center_cell_fills_the_square() {
        let (it, ir, ib, il) = clamped_insets([0.0; 4]);
        assert_eq!((it, ir, ib, il), (0.0, 1.0, 1.0, 0.0));
    }

    #[test]
    fn crossing_insets_collapse_to_midpoint() {
        // Left and right radius 8 on a width-10 box: both insets land on the
        // box midpoint (0.5 in unit terms, 5px in box terms).
        let (_, ir, _, il) = clamped_insets([0.0, 0.8, 0.0, 0.8]);
        assert_eq!(il, 0.5);
        assert_eq!(ir, 0.5);
    }

    #[test]
    fn asymmetric_crossing_still_meets_in_the_middle() {
        // it = 0.875 crosses ib = 0.625; both collapse to 0.75, which is
        // exactly representable.
        let (it, _, ib, _) = clamped_insets([0.875, 0.0, 0.375, 0.0]);
        assert_eq!(it, ib);
        assert_eq!(it, 0.75);
    }

    #[test]
    fn mesh_tiles_the_unit_square() {
        let mesh = decoration_mesh([0.25, 0.25, 0.25, 0.25], [0.0, 0.0]);
        assert_eq!(mesh.len(), MESH_VERTEX_COUNT);
        for vertex in &mesh {
            assert!(vertex.pos[0] >= 0.0 && vertex.pos[0] <= 1.0);
            assert!(vertex.pos[1] >= 0.0 && vertex.pos[1] <= 1.0);
        }
        // The three column boundaries of the top row line up at the insets.
        assert_eq!(mesh[0].pos, [0.25, 0.0]);
        assert_eq!(mesh[1].pos, [0.0, 0.0]);
    }

    #[test]
    fn center_cell_uv_sits_at_the_origin() {
        let mesh = decoration_mesh([0.25; 4], [0.0, 0.0]);
        let center = &mesh[4 * VERTICES_PER_QUAD..5 * VERTICES_PER_QUAD];
        for vertex in center {
            assert_eq!(vertex.uv, [0.0, 0.0]);
        }
    }

    #[test]
    fn corner_cell_uv_reaches_one_at_the_outside() {
        let mesh = decoration_mesh([0.25; 4], [0.0, 0.0]);
        // First vertex of the top-left cell is its top-right position; the
        // top edge carries uv.y == 1.
        assert_eq!(mesh[0].uv[1], 1.0);
    }
}
