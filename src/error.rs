use crate::types::FrameKind;

#[derive(Debug, thiserror::Error)]
pub enum SmpError {
    #[error("Buffer too short for file header and bundle offset table")]
    TruncatedHeader,
    #[error("Buffer too short for {table} at offset {offset:#x}")]
    TruncatedTable {
        table: &'static str,
        offset: usize,
    },
    #[error("Unknown frame type {code:#04x} at offset {offset:#x}")]
    UnknownFrameType { code: i32, offset: usize },
    #[error("Unknown draw command {opcode:#04x} in row {row} of {kind} frame")]
    UnknownDrawCommand {
        opcode: u8,
        row: usize,
        kind: FrameKind,
    },
    #[error("Row {row} of {kind} frame decoded {actual} pixels, expected {expected}")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        actual: usize,
        kind: FrameKind,
    },
    #[error("Palette index {index} out of range for palette of {len} entries")]
    PaletteIndexOutOfRange { index: usize, len: usize },
    #[error("IOError: {source}")]
    IOError {
        #[from]
        source: std::io::Error,
    },
}
