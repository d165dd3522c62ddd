use std::{fmt, str::from_utf8};

#[derive(Debug)]
pub struct SmpHeader {
    // [u8; 4]
    pub magic: Vec<u8>,
    pub unknown1: u32,
    pub frame_count: i32,
    pub unknown2: u32,
    pub unknown3: u32,
    pub offset1: u32,
    pub file_size: u32,
    pub unknown4: u32,
    // [u8; 32]
    pub comment: Comment,
}

/// NUL-padded text. Use get_string() rather than the raw bytes.
#[derive(Clone)]
pub struct Comment(pub Vec<u8>);

impl Comment {
    pub fn get_string(&self) -> String {
        let mut res: Vec<u8> = vec![];

        for c in self.get_bytes() {
            if *c == 0 || *c < 32 || *c > 127 {
                break;
            }

            res.push(*c);
        }

        from_utf8(&res).unwrap_or_default().to_string()
    }

    pub fn get_bytes(&self) -> &Vec<u8> {
        &self.0
    }
}

impl fmt::Debug for Comment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple(&self.get_string()).field(&self.0).finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameKind {
    Main,
    Shadow,
    Outline,
}

impl fmt::Display for FrameKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FrameKind::Main => write!(f, "main"),
            FrameKind::Shadow => write!(f, "shadow"),
            FrameKind::Outline => write!(f, "outline"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct SmpFrameHeader {
    pub width: i32,
    pub height: i32,
    pub hotspot_x: i32,
    pub hotspot_y: i32,
    pub frame_type: i32,
    /// Absolute file offset of the boundary table. Stored bundle-relative on
    /// disk; resolved against the bundle base while parsing.
    pub outline_table_offset: usize,
    /// Absolute file offset of the per-row command-offset table.
    pub cmd_table_offset: usize,
    pub flags: u32,
}

/// Per-row transparent margins from the boundary table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    /// The whole row is transparent; it has no command stream.
    Transparent,
    Margins { left: u16, right: u16 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pixel {
    Transparent,
    Standard {
        index: u8,
        palette: u8,
        unknown1: u8,
        unknown2: u8,
    },
    PlayerColor {
        index: u8,
        palette: u8,
        unknown1: u8,
        unknown2: u8,
    },
    Shadow {
        index: u8,
    },
    /// The stream carries no color for outlines; the compositor resolves
    /// player index 0.
    Outline,
}

impl Pixel {
    /// Damage-mask alpha: the two opaque payload bytes packed as
    /// `(unknown2 << 2) | unknown1`. Kinds without payload contribute 0.
    pub fn damage_alpha(&self) -> u8 {
        match *self {
            Pixel::Standard {
                unknown1, unknown2, ..
            }
            | Pixel::PlayerColor {
                unknown1, unknown2, ..
            } => (unknown2 << 2) | unknown1,
            _ => 0,
        }
    }
}

// Vec<[r, g, b]>
pub type SmpPalette = Vec<[u8; 3]>;

#[derive(Debug)]
pub struct SmpFrame {
    pub header: SmpFrameHeader,
    pub kind: FrameKind,
    pub boundaries: Vec<Boundary>,
    /// Absolute file offset of each row's command stream.
    pub cmd_offsets: Vec<usize>,
    // [[Pixel; width]; height]
    pub pixels: Vec<Vec<Pixel>>,
}

#[derive(Debug)]
pub struct Smp {
    pub header: SmpHeader,
    pub main_frames: Vec<SmpFrame>,
    pub shadow_frames: Vec<SmpFrame>,
    pub outline_frames: Vec<SmpFrame>,
}
