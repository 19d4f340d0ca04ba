//! Module for anything related to rendering.
//!
//! This module contains the cube scene drawn by the demo: a textured object cube and a small
//! light cube, each spinning around its own randomly chosen axis.

use std::sync::Arc;

use glam::Vec3;
use glow::HasContext;

use crate::{
    abs::{Mesh, ShaderProgram, Texture, Viewport},
    config::Config,
};

pub mod cube;
pub mod transform;

use transform::Spin;

/// Texture unit the object cube samples from.
pub const OBJECT_TEXTURE_UNIT: u32 = 0;

pub const OBJECT_LIGHT_COLOR: Vec3 = Vec3::new(1.0, 0.6, 0.8);
pub const LAMP_LIGHT_COLOR: Vec3 = Vec3::new(1.0, 0.2, 0.6);

/// Spin of the textured object cube around `axis`.
pub fn object_spin(axis: Vec3) -> Spin {
    Spin::new(Vec3::new(-0.8, 0.0, -3.0), axis, 60.0, 1.0)
}

/// Spin of the small light cube around `axis`.
pub fn lamp_spin(axis: Vec3) -> Spin {
    Spin::new(Vec3::new(1.5, 0.2, -2.5), axis, 150.0, 0.2)
}

/// Everything needed to draw one frame of the demo.
pub struct CubeScene {
    gl: Arc<glow::Context>,
    clear_color: [f32; 4],
    object_mesh: Mesh,
    lamp_mesh: Mesh,
    object_program: ShaderProgram,
    lamp_program: ShaderProgram,
    texture: Texture,
    object_spin: Spin,
    lamp_spin: Spin,
}

impl CubeScene {
    /// Uploads the meshes, builds both shader programs and loads the texture.
    ///
    /// The rotation axes are picked here, once, for the lifetime of the scene.
    pub fn new(gl: &Arc<glow::Context>, config: &Config) -> Result<Self, String> {
        let assets = &config.assets;

        let object_mesh = Mesh::new(gl, &cube::CUBE_VERTICES[..])?;
        let lamp_mesh = Mesh::new(gl, &cube::light_vertices())?;

        let object_program = ShaderProgram::from_files(
            gl,
            assets.resolve(&assets.cube_vertex),
            assets.resolve(&assets.cube_fragment),
        )
        .map_err(|e| e.to_string())?;
        let lamp_program = ShaderProgram::from_files(
            gl,
            assets.resolve(&assets.light_vertex),
            assets.resolve(&assets.light_fragment),
        )
        .map_err(|e| e.to_string())?;

        let texture = Texture::from_path(gl, assets.resolve(&assets.texture))?;

        let mut rng = rand::rng();
        let object_axis = transform::random_axis(&mut rng);
        let lamp_axis = transform::random_axis(&mut rng);
        for axis in [object_axis, lamp_axis] {
            log::info!("rotating axis: {}, {}, {}", axis.x, axis.y, axis.z);
        }

        Ok(Self {
            gl: Arc::clone(gl),
            clear_color: config.clear_color,
            object_mesh,
            lamp_mesh,
            object_program,
            lamp_program,
            texture,
            object_spin: object_spin(object_axis),
            lamp_spin: lamp_spin(lamp_axis),
        })
    }

    /// Clears the frame and draws both cubes as they are `elapsed` seconds after start.
    pub fn render(&self, elapsed: f32, viewport: Viewport) {
        let [r, g, b, a] = self.clear_color;
        unsafe {
            self.gl.clear_color(r, g, b, a);
            self.gl.clear(glow::COLOR_BUFFER_BIT | glow::DEPTH_BUFFER_BIT);
        }

        let view = transform::view_matrix();
        let proj = transform::projection_matrix(viewport);

        self.texture.bind(OBJECT_TEXTURE_UNIT);
        self.object_program.use_program();
        self.object_program.set_uniform("ourTexture", OBJECT_TEXTURE_UNIT as i32);
        self.object_program.set_uniform("lightColor", OBJECT_LIGHT_COLOR);
        self.object_program.set_uniform("model", self.object_spin.model_matrix(elapsed));
        self.object_program.set_uniform("view", view);
        self.object_program.set_uniform("proj", proj);
        self.object_mesh.draw();

        self.lamp_program.use_program();
        self.lamp_program.set_uniform("lightColor", LAMP_LIGHT_COLOR);
        self.lamp_program.set_uniform("model", self.lamp_spin.model_matrix(elapsed));
        self.lamp_program.set_uniform("view", view);
        self.lamp_program.set_uniform("proj", proj);
        self.lamp_mesh.draw();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lamp_is_small_and_fast() {
        let object = object_spin(Vec3::Z);
        let lamp = lamp_spin(Vec3::Z);
        assert_eq!(object.scale, 1.0);
        assert_eq!(lamp.scale, 0.2);
        assert!(lamp.degrees_per_second > object.degrees_per_second);
        assert_eq!(lamp.translation, Vec3::new(1.5, 0.2, -2.5));
    }
}
