use crate::coverage::model::ProfileBlock;

/// `"L"` for a single-line extent, `"L1-L2"` otherwise.
pub fn format_block(b: &ProfileBlock) -> String {
    format_range(b.start_line, b.end_line)
}

/// Collapses a matched block list into one range spanning from the first
/// block's start to the last block's end. Used for fully covered
/// functions when every function is being listed.
pub fn span_blocks(blocks: &[ProfileBlock]) -> String {
    let (Some(first), Some(last)) = (blocks.first(), blocks.last()) else {
        return String::new();
    };
    format_range(first.start_line, last.end_line)
}

/// Every block rendered individually, comma-joined, in block order.
pub fn all_blocks(blocks: &[ProfileBlock]) -> String {
    blocks
        .iter()
        .map(format_block)
        .collect::<Vec<_>>()
        .join(",")
}

/// The primary rendering: maximal runs of consecutive uncovered blocks,
/// each flushed as one merged range when a covered block (or the end of
/// the list) is reached. Merging follows block order, not physical line
/// contiguity: two uncovered blocks separated by a line gap but by no
/// covered block still become one range spanning the gap.
pub fn missing_ranges(blocks: &[ProfileBlock]) -> String {
    let mut out: Vec<String> = vec![];
    let mut open: Option<(u32, u32)> = None;
    for b in blocks {
        if b.count > 0 {
            if let Some((start, end)) = open.take() {
                out.push(format_range(start, end));
            }
            continue;
        }
        let start = open.map_or(b.start_line, |(start, _)| start);
        open = Some((start, b.end_line));
    }
    if let Some((start, end)) = open {
        out.push(format_range(start, end));
    }
    out.join(",")
}

fn format_range(start: u32, end: u32) -> String {
    if start == end {
        format!("{start}")
    } else {
        format!("{start}-{end}")
    }
}
