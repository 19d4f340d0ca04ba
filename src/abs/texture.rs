//! Structs and functions for handling textures.
//!
//! The module provides the [`Texture`] struct which is a CPU representation of a GPU texture.

use std::{path::Path, sync::Arc};

use glow::HasContext;
use image::{DynamicImage, GenericImageView};

/// The pixel layout a decoded image is uploaded with.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PixelFormat {
    Rgb,
    Rgba,
}

impl PixelFormat {
    /// Picks the upload format for an image with `channels` colour channels.
    ///
    /// Only four-channel images keep their alpha; everything else is expanded to RGB.
    pub fn from_channel_count(channels: u8) -> Self {
        if channels == 4 {
            PixelFormat::Rgba
        } else {
            PixelFormat::Rgb
        }
    }

    /// Returns the OpenGL format enum.
    pub fn gl_format(self) -> u32 {
        match self {
            PixelFormat::Rgb => glow::RGB,
            PixelFormat::Rgba => glow::RGBA,
        }
    }

    /// Converts `image` into tightly packed bytes of this format.
    fn pixels(self, image: &DynamicImage) -> Vec<u8> {
        match self {
            PixelFormat::Rgb => image.to_rgb8().into_raw(),
            PixelFormat::Rgba => image.to_rgba8().into_raw(),
        }
    }
}

/// Represents a texture stored on the GPU side.
pub struct Texture {
    gl: Arc<glow::Context>,
    id: glow::Texture,
    width: u32,
    height: u32,
    format: PixelFormat,
}

impl Texture {
    /// Decodes the image at `path` and uploads it as a new texture.
    pub fn from_path(gl: &Arc<glow::Context>, path: impl AsRef<Path>) -> Result<Self, String> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|e| {
            let msg = format!("Failed to load texture {}: {e}", path.display());
            log::error!("{msg}");
            msg
        })?;
        let texture = Self::new(gl, &image)?;
        log::debug!(
            "loaded texture {} ({}x{}, {:?})",
            path.display(),
            texture.width(),
            texture.height(),
            texture.format()
        );
        Ok(texture)
    }

    /// Creates a new texture from the given [`image::DynamicImage`].
    ///
    /// The texture repeats on both axes, is filtered linearly and has mipmaps generated.
    pub fn new(gl: &Arc<glow::Context>, image: &DynamicImage) -> Result<Self, String> {
        let (width, height) = image.dimensions();
        let format = PixelFormat::from_channel_count(image.color().channel_count());
        let data = format.pixels(image);
        unsafe {
            let texture = gl.create_texture().map_err(|e| {
                log::error!("Failed to create texture: {e}");
                e
            })?;
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, glow::REPEAT as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, glow::REPEAT as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                glow::LINEAR as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                glow::LINEAR as i32,
            );
            // RGB rows are not 4-byte aligned for every width.
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                format.gl_format() as i32,
                width as i32,
                height as i32,
                0,
                format.gl_format(),
                glow::UNSIGNED_BYTE,
                glow::PixelUnpackData::Slice(Some(data.as_slice())),
            );
            gl.generate_mipmap(glow::TEXTURE_2D);
            gl.bind_texture(glow::TEXTURE_2D, None);

            Ok(Self {
                gl: Arc::clone(gl),
                id: texture,
                width,
                height,
                format,
            })
        }
    }

    /// Returns the width of the texture.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the texture.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the format the texture was uploaded with.
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Binds the texture to the specified texture unit.
    pub fn bind(&self, unit: u32) {
        unsafe {
            self.gl.active_texture(glow::TEXTURE0 + unit);
            self.gl.bind_texture(glow::TEXTURE_2D, Some(self.id));
        }
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        unsafe {
            self.gl.delete_texture(self.id);
        }
    }
}
