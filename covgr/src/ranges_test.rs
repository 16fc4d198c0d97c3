use crate::coverage::model::ProfileBlock;
use crate::coverage::ranges::{all_blocks, format_block, missing_ranges, span_blocks};

fn block(start_line: u32, end_line: u32, count: u64) -> ProfileBlock {
    ProfileBlock {
        start_line,
        start_col: 1,
        end_line,
        end_col: 2,
        num_stmts: 1,
        count,
    }
}

#[test]
fn single_line_block_renders_one_number() {
    assert_eq!(format_block(&block(22, 22, 0)), "22");
}

#[test]
fn multi_line_block_renders_a_range() {
    assert_eq!(format_block(&block(11, 13, 0)), "11-13");
}

#[test]
fn span_collapses_the_whole_list() {
    let blocks = vec![block(7, 9, 1), block(10, 12, 1), block(14, 14, 1)];
    assert_eq!(span_blocks(&blocks), "7-14");
    assert_eq!(span_blocks(&blocks[..1]), "7-9");
    assert_eq!(span_blocks(&[]), "");
}

#[test]
fn all_blocks_lists_every_block_in_order() {
    let blocks = vec![block(7, 9, 1), block(11, 11, 0), block(15, 23, 1)];
    assert_eq!(all_blocks(&blocks), "7-9,11,15-23");
    assert_eq!(all_blocks(&[]), "");
}

#[test]
fn fully_covered_list_has_no_missing_ranges() {
    let blocks = vec![block(7, 9, 1), block(10, 12, 3)];
    assert_eq!(missing_ranges(&blocks), "");
}

#[test]
fn fully_uncovered_list_is_one_merged_range() {
    let blocks = vec![block(7, 9, 0), block(10, 12, 0), block(14, 20, 0)];
    assert_eq!(missing_ranges(&blocks), "7-20");
}

#[test]
fn covered_blocks_split_the_runs() {
    let blocks = vec![
        block(15, 17, 1),
        block(17, 19, 0),
        block(19, 21, 1),
        block(22, 22, 0),
    ];
    assert_eq!(missing_ranges(&blocks), "17-19,22");
}

#[test]
fn uncovered_runs_merge_across_line_gaps() {
    // Blocks 5-6 and 20-21 are far apart, but no covered block separates
    // them in block order, so they report as one span.
    let blocks = vec![block(2, 3, 1), block(5, 6, 0), block(20, 21, 0)];
    assert_eq!(missing_ranges(&blocks), "5-21");
}

#[test]
fn leading_and_trailing_runs_both_flush() {
    let blocks = vec![block(2, 3, 0), block(5, 6, 1), block(8, 9, 0)];
    assert_eq!(missing_ranges(&blocks), "2-3,8-9");
}
