use nom::{
    bytes::complete::take,
    combinator::map,
    multi::count,
    number::complete::{le_i32, le_u16, le_u32, le_u8},
    IResult as _IResult, Parser,
};

use crate::{
    constants::{
        BUNDLE_PADDING_LENGTH, COMMENT_LENGTH, FRAME_HEADER_LENGTH, FRAME_TYPE_MAIN,
        FRAME_TYPE_OUTLINE_1, FRAME_TYPE_OUTLINE_2, FRAME_TYPE_SHADOW, ROW_TRANSPARENT_SENTINEL,
    },
    decoder::decode_row,
    error::SmpError,
    types::{Boundary, Comment, FrameKind, Smp, SmpFrame, SmpFrameHeader, SmpHeader},
};

pub type IResult<'a, T> = _IResult<&'a [u8], T>;

/// Re-slices the file from an absolute offset, turning an out-of-range offset
/// into a typed error instead of a panic.
fn slice_from<'a>(
    file: &'a [u8],
    offset: usize,
    table: &'static str,
) -> Result<&'a [u8], SmpError> {
    file.get(offset..)
        .ok_or(SmpError::TruncatedTable { table, offset })
}

fn classify_frame_type(code: i32) -> Option<FrameKind> {
    match code {
        FRAME_TYPE_MAIN => Some(FrameKind::Main),
        FRAME_TYPE_SHADOW => Some(FrameKind::Shadow),
        FRAME_TYPE_OUTLINE_1 | FRAME_TYPE_OUTLINE_2 => Some(FrameKind::Outline),
        _ => None,
    }
}

fn parse_header(i: &[u8]) -> IResult<SmpHeader> {
    map(
        (
            count(le_u8, 4),
            le_u32,
            le_i32,
            le_u32,
            le_u32,
            le_u32,
            le_u32,
            le_u32,
            take(COMMENT_LENGTH),
        ),
        |(magic, unknown1, frame_count, unknown2, unknown3, offset1, file_size, unknown4, comment): (
            Vec<u8>,
            u32,
            i32,
            u32,
            u32,
            u32,
            u32,
            u32,
            &[u8],
        )| SmpHeader {
            magic,
            unknown1,
            frame_count,
            unknown2,
            unknown3,
            offset1,
            file_size,
            unknown4,
            comment: Comment(comment.to_vec()),
        },
    )
    .parse(i)
}

fn parse_frame_header(i: &[u8], bundle_offset: usize) -> IResult<SmpFrameHeader> {
    map(
        (le_i32, le_i32, le_i32, le_i32, le_i32, le_u32, le_u32, le_u32),
        |(
            width,
            height,
            hotspot_x,
            hotspot_y,
            frame_type,
            outline_table_offset,
            cmd_table_offset,
            flags,
        )| SmpFrameHeader {
            width,
            height,
            hotspot_x,
            hotspot_y,
            frame_type,
            // table offsets are stored relative to the bundle base
            outline_table_offset: bundle_offset + outline_table_offset as usize,
            cmd_table_offset: bundle_offset + cmd_table_offset as usize,
            flags,
        },
    )
    .parse(i)
}

fn parse_bundle(i: &[u8], bundle_offset: usize) -> IResult<Vec<SmpFrameHeader>> {
    let (i, _padding) = take(BUNDLE_PADDING_LENGTH)(i)?;
    let (i, header_count) = le_i32.parse(i)?;

    count(
        |i| parse_frame_header(i, bundle_offset),
        header_count.max(0) as usize,
    )
    .parse(i)
}

fn parse_bundle_offsets(i: &[u8], bundle_count: usize) -> IResult<Vec<u32>> {
    count(le_u32, bundle_count).parse(i)
}

fn parse_cmd_offsets(i: &[u8], height: usize, bundle_offset: usize) -> IResult<Vec<usize>> {
    count(
        map(le_u32, |offset| bundle_offset + offset as usize),
        height,
    )
    .parse(i)
}

fn parse_boundary(i: &[u8]) -> IResult<Boundary> {
    map((le_u16, le_u16), |(left, right)| {
        if left == ROW_TRANSPARENT_SENTINEL || right == ROW_TRANSPARENT_SENTINEL {
            Boundary::Transparent
        } else {
            Boundary::Margins { left, right }
        }
    })
    .parse(i)
}

fn parse_frame(
    file: &[u8],
    header: SmpFrameHeader,
    kind: FrameKind,
    bundle_offset: usize,
) -> Result<SmpFrame, SmpError> {
    let width = header.width.max(0) as usize;
    let height = header.height.max(0) as usize;

    let boundary_start = slice_from(file, header.outline_table_offset, "boundary table")?;
    let (_, boundaries) =
        count(parse_boundary, height)
            .parse(boundary_start)
            .map_err(|_| SmpError::TruncatedTable {
                table: "boundary table",
                offset: header.outline_table_offset,
            })?;

    let cmd_start = slice_from(file, header.cmd_table_offset, "command offset table")?;
    let (_, cmd_offsets) = parse_cmd_offsets(cmd_start, height, bundle_offset).map_err(|_| {
        SmpError::TruncatedTable {
            table: "command offset table",
            offset: header.cmd_table_offset,
        }
    })?;

    let mut pixels = Vec::with_capacity(height);

    for row in 0..height {
        pixels.push(decode_row(
            file,
            kind,
            boundaries[row],
            cmd_offsets[row],
            width,
            row,
        )?);
    }

    Ok(SmpFrame {
        header,
        kind,
        boundaries,
        cmd_offsets,
        pixels,
    })
}

pub fn parse_smp(i: &[u8]) -> Result<Smp, SmpError> {
    let file = i;

    let (i, header) = parse_header(file).map_err(|_| SmpError::TruncatedHeader)?;
    let bundle_count = usize::try_from(header.frame_count).map_err(|_| SmpError::TruncatedHeader)?;

    // the bundle offset table immediately follows the header
    let (_, bundle_offsets) =
        parse_bundle_offsets(i, bundle_count).map_err(|_| SmpError::TruncatedHeader)?;

    let mut main_frames = vec![];
    let mut shadow_frames = vec![];
    let mut outline_frames = vec![];

    for bundle_offset in bundle_offsets {
        let bundle_offset = bundle_offset as usize;
        let bundle_start = slice_from(file, bundle_offset, "frame bundle")?;

        let (_, frame_headers) =
            parse_bundle(bundle_start, bundle_offset).map_err(|_| SmpError::TruncatedTable {
                table: "frame bundle",
                offset: bundle_offset,
            })?;

        for (idx, frame_header) in frame_headers.into_iter().enumerate() {
            let kind = classify_frame_type(frame_header.frame_type).ok_or(
                SmpError::UnknownFrameType {
                    code: frame_header.frame_type,
                    offset: bundle_offset + BUNDLE_PADDING_LENGTH + 4 + idx * FRAME_HEADER_LENGTH,
                },
            )?;

            let frame = parse_frame(file, frame_header, kind, bundle_offset)?;

            match kind {
                FrameKind::Main => main_frames.push(frame),
                FrameKind::Shadow => shadow_frames.push(frame),
                FrameKind::Outline => outline_frames.push(frame),
            }
        }
    }

    Ok(Smp {
        header,
        main_frames,
        shadow_frames,
        outline_frames,
    })
}
