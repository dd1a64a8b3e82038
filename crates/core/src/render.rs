//! Renderer interface.
//!
//! Drawing is done by the host. The core only reports, per visible block,
//! which skin to use and where it sits in pixel units.

use crate::types::{PixelPos, SkinId};

pub trait Renderer {
    fn draw_block(&mut self, skin: SkinId, pos: PixelPos);
}

/// Collects draw calls. Useful for tests and headless hosts.
impl Renderer for Vec<(SkinId, PixelPos)> {
    fn draw_block(&mut self, skin: SkinId, pos: PixelPos) {
        self.push((skin, pos));
    }
}
