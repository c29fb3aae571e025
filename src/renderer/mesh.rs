use wgpu::util::DeviceExt;

/// Vertex of the surface grid: world-space position plus the UV used for
/// height lookup and coloring.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SurfaceVertex {
    /// World-space position (y is displaced in the vertex shader).
    pub position: [f32; 3],
    /// Normalized grid coordinate in [0, 1].
    pub uv: [f32; 2],
}

impl SurfaceVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x2];

    /// Vertex buffer layout matching the raster shader's input locations.
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: size_of::<SurfaceVertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Largest supported grid resolution per side. Keeps vertex counts within
/// u32 index range and buffer sizes sane for user-supplied options.
pub const MAX_RESOLUTION: u32 = 2048;

/// Clamp a requested grid resolution into the supported range.
pub fn grid_resolution(requested: u32) -> u32 {
    requested.clamp(2, MAX_RESOLUTION)
}

/// Build a flat grid of `resolution` x `resolution` vertices spanning
/// `extent` world units on the XZ plane, with UVs covering [0, 1].
/// Out-of-range resolutions are clamped via [`grid_resolution`].
pub fn generate(
    resolution: u32,
    extent: f32,
) -> (Vec<SurfaceVertex>, Vec<u32>) {
    let res = grid_resolution(resolution);
    let step = 1.0 / (res - 1) as f32;

    let mut vertices = Vec::with_capacity(res as usize * res as usize);
    for z in 0..res {
        for x in 0..res {
            let u = x as f32 * step;
            let v = z as f32 * step;
            vertices.push(SurfaceVertex {
                position: [u * extent, 0.0, v * extent],
                uv: [u, v],
            });
        }
    }

    let mut indices =
        Vec::with_capacity((res - 1) as usize * (res - 1) as usize * 6);
    for z in 0..res - 1 {
        for x in 0..res - 1 {
            let i = z * res + x;
            // Two counter-clockwise triangles per cell, viewed from +Y.
            indices.extend_from_slice(&[i, i + res, i + 1]);
            indices.extend_from_slice(&[i + 1, i + res, i + res + 1]);
        }
    }

    (vertices, indices)
}

/// GPU buffers for the surface grid.
pub struct SurfaceMesh {
    /// Vertex buffer holding the grid vertices.
    pub vertex_buffer: wgpu::Buffer,
    /// 32-bit index buffer.
    pub index_buffer: wgpu::Buffer,
    /// Number of indices to draw.
    pub index_count: u32,
}

impl SurfaceMesh {
    /// Upload a freshly generated grid to the GPU.
    pub fn new(device: &wgpu::Device, resolution: u32, extent: f32) -> Self {
        let (vertices, indices) = generate(resolution, extent);

        let vertex_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Surface Vertex Buffer"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        let index_buffer =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Surface Index Buffer"),
                contents: bytemuck::cast_slice(&indices),
                usage: wgpu::BufferUsages::INDEX,
            });

        Self {
            vertex_buffer,
            index_buffer,
            index_count: indices.len() as u32,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grid_has_expected_counts() {
        let (vertices, indices) = generate(128, 5.0);
        assert_eq!(vertices.len(), 128 * 128);
        assert_eq!(indices.len(), 127 * 127 * 6);
    }

    #[test]
    fn uvs_cover_unit_square() {
        let (vertices, _) = generate(4, 2.0);
        assert_eq!(vertices.first().unwrap().uv, [0.0, 0.0]);
        assert_eq!(vertices.last().unwrap().uv, [1.0, 1.0]);
    }

    #[test]
    fn positions_span_extent() {
        let extent = 5.0;
        let (vertices, _) = generate(8, extent);
        let max_x = vertices
            .iter()
            .map(|v| v.position[0])
            .fold(f32::MIN, f32::max);
        let max_z = vertices
            .iter()
            .map(|v| v.position[2])
            .fold(f32::MIN, f32::max);
        assert_eq!(max_x, extent);
        assert_eq!(max_z, extent);
        assert!(vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn indices_stay_in_range() {
        let (vertices, indices) = generate(16, 1.0);
        assert!(indices.iter().all(|&i| (i as usize) < vertices.len()));
    }

    #[test]
    fn degenerate_resolution_clamps_to_one_quad() {
        let (vertices, indices) = generate(1, 1.0);
        assert_eq!(vertices.len(), 4);
        assert_eq!(indices.len(), 6);
    }

    #[test]
    fn resolution_clamps_without_overflow() {
        // Requests past the cap (including ones whose squared vertex count
        // would overflow u32) clamp instead of wrapping.
        assert_eq!(grid_resolution(100_000), MAX_RESOLUTION);
        assert_eq!(grid_resolution(u32::MAX), MAX_RESOLUTION);
        assert_eq!(grid_resolution(0), 2);
        assert_eq!(grid_resolution(128), 128);
    }
}
