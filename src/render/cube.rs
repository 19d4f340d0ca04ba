//! Static cube geometry.

use glow::HasContext;

use crate::abs::Vertex;

/// A cube vertex with a position and texture coordinates.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubeVertex {
    pub position: [f32; 3],
    pub uv: [f32; 2],
}

impl Vertex for CubeVertex {
    fn vertex_attribs(gl: &glow::Context) {
        let stride = std::mem::size_of::<CubeVertex>() as i32;
        unsafe {
            gl.vertex_attrib_pointer_f32(0, 3, glow::FLOAT, false, stride, 0);
            gl.enable_vertex_attrib_array(0);
            gl.vertex_attrib_pointer_f32(
                1,
                2,
                glow::FLOAT,
                false,
                stride,
                std::mem::offset_of!(CubeVertex, uv) as i32,
            );
            gl.enable_vertex_attrib_array(1);
        }
    }
}

/// A position-only vertex, used for the untextured light cube.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LightVertex {
    pub position: [f32; 3],
}

impl Vertex for LightVertex {
    fn vertex_attribs(gl: &glow::Context) {
        unsafe {
            gl.vertex_attrib_pointer_f32(
                0,
                3,
                glow::FLOAT,
                false,
                std::mem::size_of::<LightVertex>() as i32,
                0,
            );
            gl.enable_vertex_attrib_array(0);
        }
    }
}

impl From<CubeVertex> for LightVertex {
    fn from(v: CubeVertex) -> Self {
        LightVertex {
            position: v.position,
        }
    }
}

const fn v(x: f32, y: f32, z: f32, u: f32, w: f32) -> CubeVertex {
    CubeVertex {
        position: [x, y, z],
        uv: [u, w],
    }
}

/// A unit cube centred on the origin: six faces, two triangles each.
#[rustfmt::skip]
pub const CUBE_VERTICES: [CubeVertex; 36] = [
    // back
    v(-0.5, -0.5, -0.5, 0.0, 0.0), v( 0.5, -0.5, -0.5, 1.0, 0.0), v( 0.5,  0.5, -0.5, 1.0, 1.0),
    v( 0.5,  0.5, -0.5, 1.0, 1.0), v(-0.5,  0.5, -0.5, 0.0, 1.0), v(-0.5, -0.5, -0.5, 0.0, 0.0),
    // front
    v(-0.5, -0.5,  0.5, 0.0, 0.0), v( 0.5, -0.5,  0.5, 1.0, 0.0), v( 0.5,  0.5,  0.5, 1.0, 1.0),
    v( 0.5,  0.5,  0.5, 1.0, 1.0), v(-0.5,  0.5,  0.5, 0.0, 1.0), v(-0.5, -0.5,  0.5, 0.0, 0.0),
    // left
    v(-0.5,  0.5,  0.5, 1.0, 0.0), v(-0.5,  0.5, -0.5, 1.0, 1.0), v(-0.5, -0.5, -0.5, 0.0, 1.0),
    v(-0.5, -0.5, -0.5, 0.0, 1.0), v(-0.5, -0.5,  0.5, 0.0, 0.0), v(-0.5,  0.5,  0.5, 1.0, 0.0),
    // right
    v( 0.5,  0.5,  0.5, 1.0, 0.0), v( 0.5,  0.5, -0.5, 1.0, 1.0), v( 0.5, -0.5, -0.5, 0.0, 1.0),
    v( 0.5, -0.5, -0.5, 0.0, 1.0), v( 0.5, -0.5,  0.5, 0.0, 0.0), v( 0.5,  0.5,  0.5, 1.0, 0.0),
    // bottom
    v(-0.5, -0.5, -0.5, 0.0, 1.0), v( 0.5, -0.5, -0.5, 1.0, 1.0), v( 0.5, -0.5,  0.5, 1.0, 0.0),
    v( 0.5, -0.5,  0.5, 1.0, 0.0), v(-0.5, -0.5,  0.5, 0.0, 0.0), v(-0.5, -0.5, -0.5, 0.0, 1.0),
    // top
    v(-0.5,  0.5, -0.5, 0.0, 1.0), v( 0.5,  0.5, -0.5, 1.0, 1.0), v( 0.5,  0.5,  0.5, 1.0, 0.0),
    v( 0.5,  0.5,  0.5, 1.0, 0.0), v(-0.5,  0.5,  0.5, 0.0, 0.0), v(-0.5,  0.5, -0.5, 0.0, 1.0),
];

/// The cube vertices without texture coordinates.
pub fn light_vertices() -> Vec<LightVertex> {
    CUBE_VERTICES.iter().copied().map(LightVertex::from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layouts() {
        assert_eq!(std::mem::size_of::<CubeVertex>(), 20);
        assert_eq!(std::mem::offset_of!(CubeVertex, uv), 12);
        assert_eq!(std::mem::size_of::<LightVertex>(), 12);
    }

    #[test]
    fn test_cube_is_unit_sized() {
        for vertex in CUBE_VERTICES {
            assert!(vertex.position.iter().all(|c| c.abs() == 0.5));
            assert!(vertex.uv.iter().all(|c| *c == 0.0 || *c == 1.0));
        }
        let light = light_vertices();
        assert_eq!(light.len(), 36);
        assert_eq!(light[7].position, CUBE_VERTICES[7].position);
    }
}
