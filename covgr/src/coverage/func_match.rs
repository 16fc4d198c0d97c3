use crate::coverage::model::{FuncExtent, ProfileBlock, Totals};
use crate::error::CovgrError;

/// Returns the contiguous run of `blocks` that falls inside `extent`.
///
/// Both sequences are position-sorted by their producers, so a single
/// forward scan suffices: blocks strictly before the extent are skipped,
/// the first block past it terminates the scan. The boundary tie-breaks
/// mirror the cover profile's half-open column convention: a block
/// starting at the extent's exact end position is past it, and a block
/// ending at the extent's exact start position is before it.
///
/// A function with no blocks at all means the profile and the source
/// analysis disagree about the file; that is an upstream defect, surfaced
/// as a structured error so the caller can abort the whole run.
pub fn matched_blocks<'a>(
    extent: &FuncExtent,
    file_name: &str,
    blocks: &'a [ProfileBlock],
) -> Result<&'a [ProfileBlock], CovgrError> {
    let mut start: Option<usize> = None;
    for (i, b) in blocks.iter().enumerate() {
        let past = b.start_line > extent.end_line
            || (b.start_line == extent.end_line && b.start_col >= extent.end_col);
        if past {
            return match start {
                Some(s) => Ok(&blocks[s..i]),
                None => Err(no_blocks(extent, file_name)),
            };
        }
        let before = b.end_line < extent.start_line
            || (b.end_line == extent.start_line && b.end_col <= extent.start_col);
        if before {
            continue;
        }
        if start.is_none() {
            start = Some(i);
        }
    }
    match start {
        Some(s) => Ok(&blocks[s..]),
        None => Err(no_blocks(extent, file_name)),
    }
}

fn no_blocks(extent: &FuncExtent, file_name: &str) -> CovgrError {
    CovgrError::FunctionWithoutBlocks {
        function: extent.name.clone(),
        file: file_name.to_string(),
    }
}

/// Sums covered versus total statements over a block list. A block's
/// statements are counted as covered iff it ran at least once; there is
/// no partial credit within a block.
pub fn tally(blocks: &[ProfileBlock]) -> Totals {
    blocks.iter().fold(Totals::default(), |acc, b| Totals {
        covered: acc.covered + if b.count > 0 { i64::from(b.num_stmts) } else { 0 },
        total: acc.total + i64::from(b.num_stmts),
    })
}
