//! Chapter canonicalization.
//!
//! A work's feed holds one record per upload, so the same chapter number shows up once
//! per scanlation group. The pipeline here turns that into one chapter per number:
//!
//! 1. [`normalizer`] maps each raw record to a [`NormalizedChapter`](crate::models::NormalizedChapter)
//! 2. [`key`] picks the dedup key
//! 3. [`tie_break`] decides between two records with the same key
//! 4. [`assembler`] folds the whole feed and sorts the survivors
//!
//! Everything in this module is synchronous and keeps no state between calls.

pub mod assembler;
pub mod key;
pub mod normalizer;
pub mod tie_break;

pub use assembler::{assemble, Assembler};
pub use key::{ChapterKey, ExactKey, FloorKey, KeyResolver};
pub use normalizer::normalize;
pub use tie_break::{winner, Verdict};
