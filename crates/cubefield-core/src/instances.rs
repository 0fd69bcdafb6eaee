use crate::error::SceneError;
use crate::mesh::{MeshTemplate, Vertex, CUBE_INDEX_COUNT, CUBE_VERTEX_COUNT};
use glam::{IVec3, Vec3};
use std::ops::Range;

/// Integer lattice visited by the builder, one range per axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GridBounds {
    pub x: Range<i32>,
    pub y: Range<i32>,
    pub z: Range<i32>,
}

impl GridBounds {
    pub fn new(x: Range<i32>, y: Range<i32>, z: Range<i32>) -> Self {
        Self { x, y, z }
    }

    /// `[0, side)` on every axis.
    pub fn cube(side: u32) -> Self {
        let s = side as i32;
        Self::new(0..s, 0..s, 0..s)
    }

    /// `side` cells centred on zero; odd sides are symmetric (15 → -7..=7),
    /// even sides lean negative (4 → -2..=1).
    pub fn symmetric(side: u32) -> Self {
        let s = side as i32;
        let lo = -(s / 2);
        Self::new(lo..lo + s, lo..lo + s, lo..lo + s)
    }

    pub fn cell_count(&self) -> u64 {
        axis_len(&self.x) * axis_len(&self.y) * axis_len(&self.z)
    }

    /// Lattice cells in build order: z outer, y middle, x inner.
    pub fn cells(&self) -> impl Iterator<Item = IVec3> {
        let (xs, ys) = (self.x.clone(), self.y.clone());
        self.z.clone().flat_map(move |z| {
            let xs = xs.clone();
            ys.clone()
                .flat_map(move |y| xs.clone().map(move |x| IVec3::new(x, y, z)))
        })
    }

    /// Position of `cell` in build order, or `None` outside the bounds.
    pub fn cell_index(&self, cell: IVec3) -> Option<u64> {
        if !(self.x.contains(&cell.x) && self.y.contains(&cell.y) && self.z.contains(&cell.z)) {
            return None;
        }
        let (nx, ny) = (axis_len(&self.x), axis_len(&self.y));
        let dx = (cell.x - self.x.start) as u64;
        let dy = (cell.y - self.y.start) as u64;
        let dz = (cell.z - self.z.start) as u64;
        Some((dz * ny + dy) * nx + dx)
    }

    /// Midpoint of the occupied lattice coordinates.
    pub fn center(&self) -> Vec3 {
        let mid = |r: &Range<i32>| (r.start as f32 + (r.end - 1) as f32) * 0.5;
        Vec3::new(mid(&self.x), mid(&self.y), mid(&self.z))
    }
}

fn axis_len(r: &Range<i32>) -> u64 {
    if r.end > r.start {
        (r.end as i64 - r.start as i64) as u64
    } else {
        0
    }
}

/// Vertices written for `bounds`, if every one is addressable by a `u32` index.
pub fn vertex_count(bounds: &GridBounds) -> Result<u32, SceneError> {
    let cells = bounds.cell_count();
    cells
        .checked_mul(CUBE_VERTEX_COUNT as u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(SceneError::IndexOverflow { cells })
}

/// Indices issued by a single indexed draw of `bounds`.
///
/// Tighter than [`vertex_count`]: the draw count itself is a `u32`, so grids
/// past `u32::MAX / 36` cells build fine but cannot be drawn in one call.
pub fn index_count(bounds: &GridBounds) -> Result<u32, SceneError> {
    let cells = bounds.cell_count();
    vertex_count(bounds)?;
    cells
        .checked_mul(CUBE_INDEX_COUNT as u64)
        .and_then(|n| u32::try_from(n).ok())
        .ok_or(SceneError::IndexOverflow { cells })
}

/// Flat vertex and index data for the whole grid.
#[derive(Clone, Debug)]
pub struct InstanceBuffers {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub cell_count: u32,
}

impl InstanceBuffers {
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn vertex_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    pub fn index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.indices)
    }
}

/// Replicates `template` once per lattice cell.
///
/// Each copy gets the cell's integer coordinate in `instance_offset` and its
/// indices rebased by `cell_index * 24`. Both buffers are sized up front.
/// Fails only when a vertex would fall outside `u32` index range.
pub fn build_instances(
    bounds: &GridBounds,
    template: &MeshTemplate,
) -> Result<InstanceBuffers, SceneError> {
    let cells = bounds.cell_count();
    let overflow = || SceneError::IndexOverflow { cells };
    let vertex_len = usize::try_from(vertex_count(bounds)?).map_err(|_| overflow())?;
    let index_len = cells
        .checked_mul(CUBE_INDEX_COUNT as u64)
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(overflow)?;

    let mut vertices = Vec::with_capacity(vertex_len);
    let mut indices = Vec::with_capacity(index_len);

    for (cell_index, cell) in bounds.cells().enumerate() {
        let offset = cell.as_vec3().to_array();
        let base = (cell_index * CUBE_VERTEX_COUNT) as u32;
        vertices.extend(template.vertices.iter().map(|v| Vertex {
            instance_offset: offset,
            ..*v
        }));
        indices.extend(template.indices.iter().map(|i| i + base));
    }

    debug_assert_eq!(vertices.len(), vertex_len);
    debug_assert_eq!(indices.len(), index_len);
    log::debug!(
        "[instances] built {} cells ({} vertices, {} indices)",
        cells,
        vertices.len(),
        indices.len()
    );

    Ok(InstanceBuffers {
        vertices,
        indices,
        cell_count: cells as u32,
    })
}
