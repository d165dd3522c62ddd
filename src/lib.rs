//! SMP sprite container parsing.
//!
//! SMP is the successor of the SLP sprite format. A container holds one frame
//! bundle per animation step; each bundle groups a main graphic with its
//! shadow and player-outline frames. Rows are stored run-length encoded with
//! per-row transparent margins, and pixels reference caller-supplied palettes
//! at render time.
pub mod error;

mod constants;
mod decoder;
mod parser;
mod types;
mod utils;

pub use types::*;
