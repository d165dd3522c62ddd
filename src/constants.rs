pub const COMMENT_LENGTH: usize = 32;

/// 28 bytes of padding before the frame-header count of a bundle.
pub const BUNDLE_PADDING_LENGTH: usize = 28;

pub const FRAME_HEADER_LENGTH: usize = 32;

pub const FRAME_TYPE_MAIN: i32 = 0x02;
pub const FRAME_TYPE_SHADOW: i32 = 0x04;
pub const FRAME_TYPE_OUTLINE_1: i32 = 0x08;
pub const FRAME_TYPE_OUTLINE_2: i32 = 0x10;

/// Either halfword of a boundary entry being 0xFFFF marks the whole row transparent.
pub const ROW_TRANSPARENT_SENTINEL: u16 = 0xFFFF;

/// The main palette is 4 sections of 256 colors; a pixel's palette number
/// selects the section modulo 4.
pub const PALETTE_SECTION_LENGTH: usize = 256;
pub const PALETTE_SECTION_COUNT: usize = 4;
