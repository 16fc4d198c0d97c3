use crate::coverage::func_match::{matched_blocks, tally};
use crate::coverage::model::{FuncExtent, ProfileBlock};
use crate::error::CovgrError;

fn block(
    start_line: u32,
    start_col: u32,
    end_line: u32,
    end_col: u32,
    num_stmts: u32,
    count: u64,
) -> ProfileBlock {
    ProfileBlock {
        start_line,
        start_col,
        end_line,
        end_col,
        num_stmts,
        count,
    }
}

fn extent(name: &str, start_line: u32, start_col: u32, end_line: u32, end_col: u32) -> FuncExtent {
    FuncExtent {
        name: name.to_string(),
        start_line,
        start_col,
        end_line,
        end_col,
    }
}

fn fixture_blocks() -> Vec<ProfileBlock> {
    vec![
        block(7, 22, 9, 2, 1, 1),
        block(11, 24, 13, 2, 1, 0),
        block(15, 34, 17, 7, 2, 1),
        block(17, 7, 19, 3, 1, 0),
        block(19, 9, 21, 3, 1, 1),
        block(22, 2, 22, 10, 1, 1),
    ]
}

#[test]
fn matches_contiguous_blocks_inside_the_extent() {
    let blocks = fixture_blocks();
    let f = extent("partlytested", 15, 1, 23, 2);
    let matched = matched_blocks(&f, "testpkg.go", &blocks).unwrap();
    assert_eq!(matched, &blocks[2..]);
    assert!(matched.first().unwrap().start_line >= f.start_line);
    assert!(matched.last().unwrap().end_line <= f.end_line);
}

#[test]
fn stops_at_the_first_block_past_the_extent() {
    let blocks = fixture_blocks();
    let f = extent("tested", 7, 1, 9, 2);
    assert_eq!(
        matched_blocks(&f, "testpkg.go", &blocks).unwrap(),
        &blocks[..1]
    );
}

#[test]
fn skips_blocks_before_the_extent() {
    let blocks = fixture_blocks();
    let f = extent("untested", 11, 1, 13, 2);
    assert_eq!(
        matched_blocks(&f, "testpkg.go", &blocks).unwrap(),
        &blocks[1..2]
    );
}

#[test]
fn block_starting_at_the_end_boundary_is_past() {
    // Same line, column exactly at the extent's end: past, not inside.
    let blocks = vec![block(5, 2, 8, 10, 1, 1), block(9, 2, 12, 2, 1, 0)];
    let f = extent("f", 5, 1, 9, 2);
    assert_eq!(matched_blocks(&f, "a.go", &blocks).unwrap(), &blocks[..1]);
}

#[test]
fn block_ending_at_the_start_boundary_is_before() {
    let blocks = vec![block(2, 2, 5, 1, 1, 1), block(5, 10, 8, 2, 1, 0)];
    let f = extent("f", 5, 1, 9, 2);
    assert_eq!(matched_blocks(&f, "a.go", &blocks).unwrap(), &blocks[1..]);
}

#[test]
fn function_without_blocks_is_a_structured_error() {
    let blocks = fixture_blocks();
    let f = extent("ghost", 30, 1, 32, 2);
    match matched_blocks(&f, "testpkg.go", &blocks) {
        Err(CovgrError::FunctionWithoutBlocks { function, file }) => {
            assert_eq!(function, "ghost");
            assert_eq!(file, "testpkg.go");
        }
        other => panic!("expected FunctionWithoutBlocks, got {other:?}"),
    }
}

#[test]
fn function_without_blocks_before_other_blocks_is_also_an_error() {
    let blocks = vec![block(20, 2, 22, 2, 1, 1)];
    let f = extent("early", 5, 1, 9, 2);
    assert!(matches!(
        matched_blocks(&f, "a.go", &blocks),
        Err(CovgrError::FunctionWithoutBlocks { .. })
    ));
}

#[test]
fn extents_partition_the_block_list() {
    let blocks = fixture_blocks();
    let funcs = [
        extent("tested", 7, 1, 9, 2),
        extent("untested", 11, 1, 13, 2),
        extent("partlytested", 15, 1, 23, 2),
    ];
    let mut seen = 0usize;
    let mut stmts = 0i64;
    for f in &funcs {
        let matched = matched_blocks(f, "testpkg.go", &blocks).unwrap();
        assert_eq!(matched.as_ptr(), blocks[seen..].as_ptr());
        seen += matched.len();
        stmts += tally(matched).total;
    }
    assert_eq!(seen, blocks.len());
    assert_eq!(stmts, tally(&blocks).total);
}

#[test]
fn tally_of_empty_list_is_zero() {
    let t = tally(&[]);
    assert_eq!((t.covered, t.total), (0, 0));
    assert_eq!(t.pct(), 100.0);
}

#[test]
fn tally_counts_blocks_atomically() {
    let t = tally(&fixture_blocks());
    assert_eq!((t.covered, t.total), (5, 7));
}
