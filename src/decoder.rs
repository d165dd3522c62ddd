//! Row instruction decoding.
//!
//! Every row of a frame is one opcode stream. The low 2 bits of an opcode pick
//! the operation, the high 6 bits hold `run length - 1`. The three frame kinds
//! share this structure but read different payloads for the color-bearing
//! commands.

use crate::{
    error::SmpError,
    types::{Boundary, FrameKind, Pixel},
};

const OPCODE_SKIP: u8 = 0b00;
const OPCODE_COLOR_LIST: u8 = 0b01;
const OPCODE_PLAYER_COLOR: u8 = 0b10;
const OPCODE_END_OF_ROW: u8 = 0b11;

fn read_byte(file: &[u8], pos: &mut usize) -> Result<u8, SmpError> {
    let byte = *file.get(*pos).ok_or(SmpError::TruncatedTable {
        table: "row command stream",
        offset: *pos,
    })?;

    *pos += 1;

    Ok(byte)
}

/// Decodes one row into exactly `width` pixels.
///
/// A sentinel boundary short-circuits to a fully transparent row; its command
/// offset is never dereferenced. Otherwise the transparent margins bracket the
/// decoded command pixels and the stream must account for the middle exactly.
pub(crate) fn decode_row(
    file: &[u8],
    kind: FrameKind,
    boundary: Boundary,
    cmd_offset: usize,
    width: usize,
    row: usize,
) -> Result<Vec<Pixel>, SmpError> {
    let (left, right) = match boundary {
        Boundary::Transparent => return Ok(vec![Pixel::Transparent; width]),
        Boundary::Margins { left, right } => (left as usize, right as usize),
    };

    // margins wider than the row can never decode to exactly `width` pixels
    let expected = width
        .checked_sub(left + right)
        .ok_or(SmpError::RowLengthMismatch {
            row,
            expected: width,
            actual: left + right,
            kind,
        })?;

    let mut pixels = vec![Pixel::Transparent; left];
    let mut pos = cmd_offset;
    let mut decoded = 0usize;
    // shadow rows may leave their last pixel implicit; it repeats this byte
    let mut last_shadow_byte: Option<u8> = None;

    loop {
        if decoded > expected {
            return Err(SmpError::RowLengthMismatch {
                row,
                expected,
                actual: decoded,
                kind,
            });
        }

        let opcode = read_byte(file, &mut pos)?;
        let run = (opcode >> 2) as usize + 1;

        match opcode & 0b11 {
            OPCODE_END_OF_ROW => {
                if kind == FrameKind::Shadow && decoded < expected {
                    pixels.push(Pixel::Shadow {
                        index: last_shadow_byte.unwrap_or_default(),
                    });
                    decoded += 1;
                }

                break;
            }
            OPCODE_SKIP => {
                pixels.resize(pixels.len() + run, Pixel::Transparent);
                decoded += run;
            }
            OPCODE_COLOR_LIST => {
                match kind {
                    FrameKind::Main => {
                        for _ in 0..run {
                            let index = read_byte(file, &mut pos)?;
                            let palette = read_byte(file, &mut pos)?;
                            let unknown1 = read_byte(file, &mut pos)?;
                            let unknown2 = read_byte(file, &mut pos)?;

                            pixels.push(Pixel::Standard {
                                index,
                                palette,
                                unknown1,
                                unknown2,
                            });
                        }
                    }
                    FrameKind::Shadow => {
                        for _ in 0..run {
                            let index = read_byte(file, &mut pos)?;

                            last_shadow_byte = Some(index);
                            pixels.push(Pixel::Shadow { index });
                        }
                    }
                    // no payload; the outline color lives in the player palette
                    FrameKind::Outline => {
                        pixels.resize(pixels.len() + run, Pixel::Outline);
                    }
                }

                decoded += run;
            }
            OPCODE_PLAYER_COLOR => match kind {
                FrameKind::Main => {
                    for _ in 0..run {
                        let index = read_byte(file, &mut pos)?;
                        let palette = read_byte(file, &mut pos)?;
                        let unknown1 = read_byte(file, &mut pos)?;
                        let unknown2 = read_byte(file, &mut pos)?;

                        pixels.push(Pixel::PlayerColor {
                            index,
                            palette,
                            unknown1,
                            unknown2,
                        });
                    }

                    decoded += run;
                }
                FrameKind::Shadow | FrameKind::Outline => {
                    return Err(SmpError::UnknownDrawCommand { opcode, row, kind });
                }
            },
            _ => unreachable!("2-bit opcode tag"),
        }
    }

    if decoded != expected {
        return Err(SmpError::RowLengthMismatch {
            row,
            expected,
            actual: decoded,
            kind,
        });
    }

    pixels.resize(pixels.len() + right, Pixel::Transparent);

    Ok(pixels)
}
