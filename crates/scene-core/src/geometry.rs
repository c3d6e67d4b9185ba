use crate::constants::{MESH_POSITION, MESH_ROTATION_X};
use crate::error::SceneError;
use glam::{Mat4, Vec3};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PlaneVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

/// Subdivided plane in the XY plane, centered on the origin, facing +Z.
#[derive(Clone, Debug)]
pub struct PlaneGeometry {
    pub width: f32,
    pub height: f32,
    pub segments_x: u32,
    pub segments_y: u32,
    pub vertices: Vec<PlaneVertex>,
    pub indices: Vec<u32>,
}

impl PlaneGeometry {
    pub fn new(width: f32, height: f32, segments_x: u32, segments_y: u32) -> Result<Self, SceneError> {
        if segments_x == 0 || segments_y == 0 {
            return Err(SceneError::InvalidGeometry);
        }
        let grid_x1 = segments_x + 1;
        let grid_y1 = segments_y + 1;
        let seg_w = width / segments_x as f32;
        let seg_h = height / segments_y as f32;

        let mut vertices = Vec::with_capacity((grid_x1 * grid_y1) as usize);
        for iy in 0..grid_y1 {
            let y = iy as f32 * seg_h - height * 0.5;
            for ix in 0..grid_x1 {
                let x = ix as f32 * seg_w - width * 0.5;
                vertices.push(PlaneVertex {
                    position: [x, -y, 0.0],
                    uv: [
                        ix as f32 / segments_x as f32,
                        1.0 - iy as f32 / segments_y as f32,
                    ],
                });
            }
        }

        let mut indices = Vec::with_capacity((segments_x * segments_y * 6) as usize);
        for iy in 0..segments_y {
            for ix in 0..segments_x {
                let a = ix + grid_x1 * iy;
                let b = ix + grid_x1 * (iy + 1);
                let c = ix + 1 + grid_x1 * (iy + 1);
                let d = ix + 1 + grid_x1 * iy;
                indices.extend_from_slice(&[a, b, d, b, c, d]);
            }
        }

        Ok(Self {
            width,
            height,
            segments_x,
            segments_y,
            vertices,
            indices,
        })
    }

    pub fn index_count(&self) -> u32 {
        self.indices.len() as u32
    }
}

/// Model matrix of the wave mesh: laid flat (rotated about X) then lifted.
pub fn mesh_model_matrix() -> Mat4 {
    Mat4::from_translation(Vec3::from_array(MESH_POSITION)) * Mat4::from_rotation_x(MESH_ROTATION_X)
}
