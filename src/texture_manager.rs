use std::collections::HashMap;

use egui::{ColorImage, Context, TextureHandle, TextureOptions};

use crate::surface::{Layer, RasterSurface, Surface};

/// GPU copies of the two surfaces, re-uploaded only when a surface's
/// version moves.
#[derive(Default)]
pub struct TextureManager {
    /// Uploaded texture and the surface version it was built from
    textures: HashMap<Layer, (TextureHandle, u64)>,
}

impl std::fmt::Debug for TextureManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TextureManager")
            .field("cached", &self.textures.len())
            .finish()
    }
}

impl TextureManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Texture for `layer`, uploading the surface if it changed since the
    /// last call
    pub fn texture_for(&mut self, ctx: &Context, layer: Layer, surface: &RasterSurface) -> &TextureHandle {
        let version = surface.version();
        let stale = self
            .textures
            .get(&layer)
            .is_none_or(|(_, uploaded)| *uploaded != version);

        if stale {
            let image = to_color_image(surface);
            match self.textures.get_mut(&layer) {
                Some((handle, uploaded)) => {
                    handle.set(image, TextureOptions::NEAREST);
                    *uploaded = version;
                }
                None => {
                    let name = format!("{layer:?}_surface");
                    let handle = ctx.load_texture(name, image, TextureOptions::NEAREST);
                    self.textures.insert(layer, (handle, version));
                }
            }
        }

        &self.textures[&layer].0
    }
}

/// Copy a surface into an egui image
pub fn to_color_image(surface: &RasterSurface) -> ColorImage {
    let size = [surface.width() as usize, surface.height() as usize];
    ColorImage::from_rgba_unmultiplied(size, surface.image().as_raw())
}
