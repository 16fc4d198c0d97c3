use std::collections::BTreeMap;
use std::path::Path;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::coverage::model::{CoverMode, Profile, ProfileBlock};
use crate::error::CovgrError;

// file:startLine.startCol,endLine.endCol numStmts hitCount
static BLOCK_LINE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(.+):(\d+)\.(\d+),(\d+)\.(\d+) (\d+) (\d+)$").unwrap());

pub fn read_profile(path: &Path) -> Result<Vec<Profile>, CovgrError> {
    let text = std::fs::read_to_string(path).map_err(|source| CovgrError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_profile_text(path, &text)
}

/// Parses the text form of a coverage profile into per-file profiles,
/// sorted by file name with blocks sorted by position. Concatenated runs
/// produce duplicate block records; those are merged here (counts add in
/// count/atomic mode, or in set mode) so the core sees each extent once.
pub fn parse_profile_text(path: &Path, text: &str) -> Result<Vec<Profile>, CovgrError> {
    let mut mode: Option<CoverMode> = None;
    let mut by_file: BTreeMap<String, Vec<ProfileBlock>> = BTreeMap::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        let line_no = idx + 1;
        if let Some(raw_mode) = line.strip_prefix("mode: ") {
            let parsed =
                CoverMode::parse(raw_mode).ok_or_else(|| CovgrError::ProfileParse {
                    path: path.to_path_buf(),
                    line: line_no,
                    message: format!("unknown cover mode {raw_mode:?}"),
                })?;
            mode = Some(parsed);
            continue;
        }
        if mode.is_none() {
            return Err(CovgrError::ProfileParse {
                path: path.to_path_buf(),
                line: line_no,
                message: "missing mode header".to_string(),
            });
        }
        let caps = BLOCK_LINE_RE
            .captures(line)
            .ok_or_else(|| CovgrError::ProfileParse {
                path: path.to_path_buf(),
                line: line_no,
                message: format!("line {line:?} does not match the block grammar"),
            })?;
        let parse_err = |e: std::num::ParseIntError| CovgrError::ProfileParse {
            path: path.to_path_buf(),
            line: line_no,
            message: e.to_string(),
        };
        // Positions and statement counts must fit u32; out-of-range
        // values reject the line rather than wrap.
        let field = |i: usize| caps[i].parse::<u32>().map_err(parse_err);
        let block = ProfileBlock {
            start_line: field(2)?,
            start_col: field(3)?,
            end_line: field(4)?,
            end_col: field(5)?,
            num_stmts: field(6)?,
            count: caps[7].parse::<u64>().map_err(parse_err)?,
        };
        by_file.entry(caps[1].to_string()).or_default().push(block);
    }

    let mode = mode.ok_or_else(|| CovgrError::ProfileParse {
        path: path.to_path_buf(),
        line: 1,
        message: "missing mode header".to_string(),
    })?;

    Ok(by_file
        .into_iter()
        .map(|(file_name, mut blocks)| {
            blocks.sort_by_key(|b| (b.start_line, b.start_col, b.end_line, b.end_col));
            Profile {
                file_name,
                mode,
                blocks: merge_duplicate_blocks(blocks, mode),
            }
        })
        .collect())
}

fn merge_duplicate_blocks(blocks: Vec<ProfileBlock>, mode: CoverMode) -> Vec<ProfileBlock> {
    let mut out: Vec<ProfileBlock> = Vec::with_capacity(blocks.len());
    for b in blocks {
        match out.last_mut() {
            Some(prev) if same_extent(prev, &b) => match mode {
                CoverMode::Set => prev.count |= b.count,
                CoverMode::Count | CoverMode::Atomic => {
                    prev.count = prev.count.saturating_add(b.count);
                }
            },
            _ => out.push(b),
        }
    }
    out
}

fn same_extent(a: &ProfileBlock, b: &ProfileBlock) -> bool {
    a.start_line == b.start_line
        && a.start_col == b.start_col
        && a.end_line == b.end_line
        && a.end_col == b.end_col
        && a.num_stmts == b.num_stmts
}
