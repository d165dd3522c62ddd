use std::{ffi::OsStr, path::Path};

use image::RgbaImage;

use crate::{
    constants::{PALETTE_SECTION_COUNT, PALETTE_SECTION_LENGTH},
    error::SmpError,
    parser::parse_smp,
    types::{Pixel, Smp, SmpFrame},
};

/// Alpha value reserved for outline pixels so downstream compositing can tell
/// them apart from ordinary player-color pixels.
const OUTLINE_ALPHA: u8 = 254;

impl Smp {
    pub fn open_from_bytes(bytes: &[u8]) -> Result<Smp, SmpError> {
        parse_smp(bytes)
    }

    pub fn open_from_file(path: impl AsRef<OsStr> + AsRef<Path>) -> Result<Smp, SmpError> {
        let bytes = std::fs::read(path).map_err(|op| SmpError::IOError { source: op })?;

        Self::open_from_bytes(&bytes)
    }
}

fn lookup(palette: &[[u8; 3]], index: usize) -> Result<[u8; 3], SmpError> {
    palette
        .get(index)
        .copied()
        .ok_or(SmpError::PaletteIndexOutOfRange {
            index,
            len: palette.len(),
        })
}

impl SmpFrame {
    /// Clamped like the decoder clamps, so the render surface always matches
    /// the decoded pixel matrix even when the header carries negative values.
    pub fn dimensions(&self) -> (u32, u32) {
        (
            self.header.width.max(0) as u32,
            self.header.height.max(0) as u32,
        )
    }

    pub fn hotspot(&self) -> (i32, i32) {
        (self.header.hotspot_x, self.header.hotspot_y)
    }

    /// Renders the frame against caller-supplied palettes.
    ///
    /// `main_palette` is the 1024-entry table split into 4 sections of 256
    /// colors; a standard pixel's palette number picks the section modulo 4.
    /// `player_palette` is indexed directly by player-color pixels and at
    /// index 0 by outline pixels.
    pub fn to_rgba(
        &self,
        main_palette: &[[u8; 3]],
        player_palette: &[[u8; 3]],
    ) -> Result<RgbaImage, SmpError> {
        let (width, height) = self.dimensions();
        let mut image = RgbaImage::new(width, height);

        for (y, pixel_row) in self.pixels.iter().enumerate() {
            for (x, pixel) in pixel_row.iter().enumerate() {
                let rgba = match *pixel {
                    Pixel::Transparent => [0, 0, 0, 0],
                    // the shadow index is an intensity, carried as alpha
                    Pixel::Shadow { index } => [0, 0, 0, index],
                    Pixel::Standard { index, palette, .. } => {
                        let index = index as usize
                            + PALETTE_SECTION_LENGTH * (palette as usize % PALETTE_SECTION_COUNT);
                        let [r, g, b] = lookup(main_palette, index)?;

                        [r, g, b, 255]
                    }
                    Pixel::PlayerColor { index, .. } => {
                        let [r, g, b] = lookup(player_palette, index as usize)?;

                        [r, g, b, 255]
                    }
                    Pixel::Outline => {
                        let [r, g, b] = lookup(player_palette, 0)?;

                        [r, g, b, OUTLINE_ALPHA]
                    }
                };

                image.put_pixel(x as u32, y as u32, image::Rgba(rgba));
            }
        }

        Ok(image)
    }

    /// Packs the two opaque payload bytes of every pixel into the alpha
    /// channel, RGB zeroed. Meaningful for main frames; what the value encodes
    /// upstream is not fully understood, so the packing is kept verbatim.
    pub fn to_damage_mask(&self) -> RgbaImage {
        let (width, height) = self.dimensions();
        let mut image = RgbaImage::new(width, height);

        for (y, pixel_row) in self.pixels.iter().enumerate() {
            for (x, pixel) in pixel_row.iter().enumerate() {
                image.put_pixel(
                    x as u32,
                    y as u32,
                    image::Rgba([0, 0, 0, pixel.damage_alpha()]),
                );
            }
        }

        image
    }
}
