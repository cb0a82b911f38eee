/// Texture - a 2D RGBA8 texture decoded from an image file
///
/// Pixels are converted to RGBA8 whatever the source format and flipped so the
/// first row uploaded is the bottom of the image, matching texture coordinates
/// with (0, 0) at the lower left. The CPU copy is dropped once uploaded.

use std::path::{Path, PathBuf};
use std::rc::Rc;

use crate::error::{Error, Result};
use crate::graphics_device::{GraphicsDevice, TextureFilter, TextureHandle, TextureWrap};
use crate::{quadgl_debug, quadgl_error};

/// 2D RGBA8 texture resource
pub struct Texture {
    device: Rc<dyn GraphicsDevice>,
    handle: TextureHandle,
    width: u32,
    height: u32,
    bits_per_pixel: u32,
    path: Option<PathBuf>,
}

impl Texture {
    /// Decode an image file and upload it
    ///
    /// # Errors
    ///
    /// `Error::ImageDecode` if the file is missing or cannot be decoded. No
    /// GPU object is created in that case.
    pub fn from_file(device: Rc<dyn GraphicsDevice>, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let image = image::open(path).map_err(|err| {
            quadgl_error!("quadgl::Texture", "Failed to load '{}': {}", path.display(), err);
            Error::ImageDecode {
                path: path.display().to_string(),
                reason: err.to_string(),
            }
        })?;

        let bits_per_pixel = u32::from(image.color().channel_count()) * 8;
        let mut pixels = image.into_rgba8();
        image::imageops::flip_vertical_in_place(&mut pixels);
        let (width, height) = pixels.dimensions();

        let mut texture = Self::upload(device, width, height, pixels.as_raw())?;
        texture.bits_per_pixel = bits_per_pixel;
        texture.path = Some(path.to_path_buf());

        quadgl_debug!(
            "quadgl::Texture",
            "Loaded {} ({}x{}, {} bpp) as texture #{}",
            path.display(),
            width,
            height,
            bits_per_pixel,
            texture.handle.0
        );
        Ok(texture)
    }

    /// Upload tightly packed RGBA8 rows, bottom row first
    ///
    /// # Errors
    ///
    /// `Error::InvalidResource` if a dimension is zero or `pixels` is not
    /// `width * height * 4` bytes long.
    pub fn from_rgba8(
        device: Rc<dyn GraphicsDevice>,
        width: u32,
        height: u32,
        pixels: &[u8],
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidResource(format!(
                "texture dimensions must be non-zero, got {}x{}",
                width, height
            )));
        }
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(Error::InvalidResource(format!(
                "{}x{} RGBA8 texture needs {} bytes, got {}",
                width,
                height,
                expected,
                pixels.len()
            )));
        }

        Self::upload(device, width, height, pixels)
    }

    fn upload(device: Rc<dyn GraphicsDevice>, width: u32, height: u32, pixels: &[u8]) -> Result<Self> {
        let handle = device.create_texture()?;
        let texture = Self {
            device,
            handle,
            width,
            height,
            bits_per_pixel: 32,
            path: None,
        };

        let device = texture.device.as_ref();
        device.bind_texture(Some(handle));
        device.texture_filter(TextureFilter::Linear, TextureFilter::Linear);
        device.texture_wrap(TextureWrap::ClampToEdge, TextureWrap::ClampToEdge);
        device.texture_image_rgba8(width, height, pixels);
        device.bind_texture(None);

        Ok(texture)
    }

    /// Activate texture unit `slot` and bind this texture to it
    pub fn bind(&self, slot: u32) {
        self.device.active_texture_unit(slot);
        self.device.bind_texture(Some(self.handle));
    }

    /// Clear the binding of unit 0
    pub fn unbind(&self) {
        self.device.active_texture_unit(0);
        self.device.bind_texture(None);
    }

    pub fn handle(&self) -> TextureHandle {
        self.handle
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channel count of the source image times 8
    pub fn bits_per_pixel(&self) -> u32 {
        self.bits_per_pixel
    }

    /// Source file, when built with `from_file`
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

impl Drop for Texture {
    fn drop(&mut self) {
        self.device.delete_texture(self.handle);
    }
}

#[cfg(test)]
#[path = "texture_tests.rs"]
mod tests;
