use cubefield_core::mesh::{CUBE_INDEX_COUNT, CUBE_VERTEX_COUNT, FLOATS_PER_VERTEX};
use cubefield_core::{build_instances, cube_template, index_count, GridBounds, SceneError};
use glam::IVec3;

#[test]
fn template_has_24_vertices_and_36_indices() {
    let t = cube_template();
    assert_eq!(t.vertices.len(), 24);
    assert_eq!(t.indices.len(), 36);
    assert!(t.indices.iter().all(|&i| i < 24));
}

#[test]
fn side_three_grid_sizes() {
    let b = GridBounds::cube(3);
    let buf = build_instances(&b, cube_template()).unwrap();
    assert_eq!(buf.cell_count, 27);
    assert_eq!(buf.as_floats().len(), 27 * 24 * 9);
    assert_eq!(buf.as_floats().len(), 5832);
    assert_eq!(buf.indices.len(), 972);
    assert_eq!(index_count(&b), Ok(972));
}

#[test]
fn eighty_one_cell_grid_sizes() {
    let b = GridBounds::new(0..3, 0..3, 0..9);
    let buf = build_instances(&b, cube_template()).unwrap();
    assert_eq!(buf.cell_count, 81);
    assert_eq!(buf.as_floats().len(), 17496);
    assert_eq!(buf.indices.len(), 2916);
}

#[test]
fn cubefield_grid_sizes() {
    let b = GridBounds::symmetric(15);
    assert_eq!(b.x, -7..8);
    let buf = build_instances(&b, cube_template()).unwrap();
    assert_eq!(buf.cell_count, 3375);
    assert_eq!(buf.as_floats().len(), 729_000);
    assert_eq!(buf.vertex_bytes().len(), 729_000 * 4);
    assert_eq!(buf.index_bytes().len(), 3375 * 36 * 4);
}

#[test]
fn every_index_addresses_a_real_vertex() {
    let buf = build_instances(&GridBounds::symmetric(5), cube_template()).unwrap();
    let n = buf.vertices.len() as u32;
    assert!(buf.indices.iter().all(|&i| i < n));
}

#[test]
fn copies_carry_their_cell_offset_and_rebased_indices() {
    let b = GridBounds::cube(3);
    let t = cube_template();
    let buf = build_instances(&b, t).unwrap();
    for (k, cell) in b.cells().enumerate() {
        let expected = cell.as_vec3().to_array();
        let verts = &buf.vertices[k * CUBE_VERTEX_COUNT..(k + 1) * CUBE_VERTEX_COUNT];
        for (v, tv) in verts.iter().zip(t.vertices.iter()) {
            assert_eq!(v.instance_offset, expected);
            assert_eq!(v.position, tv.position);
            assert_eq!(v.normal, tv.normal);
        }
        let idx = &buf.indices[k * CUBE_INDEX_COUNT..(k + 1) * CUBE_INDEX_COUNT];
        let base = (k * CUBE_VERTEX_COUNT) as u32;
        for (i, ti) in idx.iter().zip(t.indices.iter()) {
            assert_eq!(*i, ti + base);
        }
    }
}

#[test]
fn first_and_last_cells_follow_build_order() {
    let buf = build_instances(&GridBounds::cube(3), cube_template()).unwrap();
    let floats = buf.as_floats();
    // instance_offset of vertex 0 and of the final vertex
    assert_eq!(&floats[6..9], &[0.0, 0.0, 0.0]);
    let last = floats.len() - FLOATS_PER_VERTEX;
    assert_eq!(&floats[last + 6..last + 9], &[2.0, 2.0, 2.0]);
    assert_eq!(GridBounds::cube(3).cell_index(IVec3::new(1, 2, 0)), Some(7));
}

#[test]
fn empty_grid_builds_empty_buffers() {
    let buf = build_instances(&GridBounds::new(0..0, 0..4, 0..4), cube_template()).unwrap();
    assert!(buf.vertices.is_empty());
    assert!(buf.indices.is_empty());
}

#[test]
fn overflowing_grid_reports_its_cell_count() {
    let b = GridBounds::cube(2000);
    assert_eq!(
        index_count(&b),
        Err(SceneError::IndexOverflow {
            cells: 8_000_000_000
        })
    );
}
