use std::io::Write;

use crate::coverage::func_match::{matched_blocks, tally};
use crate::coverage::model::{FuncExtent, Profile, Totals};
use crate::coverage::ranges::{missing_ranges, span_blocks};
use crate::coverage::tabbed::render_tabbed;
use crate::error::CovgrError;

/// Source-analysis seam: yields the position-sorted, non-overlapping
/// function extents declared in a profile's file. The production
/// implementation lives in `gopkg` (import-path lookup + `gosrc` scan);
/// tests substitute a fixture-backed one.
pub trait FuncResolver {
    fn resolve(&self, file_name: &str) -> Result<Vec<FuncExtent>, CovgrError>;
}

/// How many leading characters to trim from every printed file path.
///
/// With a single distinct directory the whole directory (and its
/// trailing separator) is redundant. With several, the longest common
/// character prefix goes; that prefix may cut mid-directory-name, which
/// is accepted rather than special-cased. Full-path mode trims nothing.
pub fn path_offset(profiles: &[Profile], full_paths: bool) -> usize {
    if full_paths {
        return 0;
    }
    let mut dirs: Vec<&str> = profiles.iter().map(|p| dir_component(&p.file_name)).collect();
    dirs.dedup();
    match dirs.as_slice() {
        [] => 0,
        [only] => with_separator(only.len()),
        [first, rest @ ..] => {
            let prefix = rest.iter().fold(*first, |acc, d| common_prefix(acc, d));
            with_separator(prefix.len())
        }
    }
}

fn with_separator(len: usize) -> usize {
    // Also drop the trailing path separator, unless nothing is trimmed.
    if len == 0 { 0 } else { len + 1 }
}

fn dir_component(file_name: &str) -> &str {
    match file_name.rsplit_once('/') {
        Some(("", _)) => "/",
        Some((dir, _)) => dir,
        None => ".",
    }
}

fn common_prefix<'a>(a: &'a str, b: &str) -> &'a str {
    let mut n = a
        .bytes()
        .zip(b.bytes())
        .take_while(|(x, y)| x == y)
        .count();
    while !a.is_char_boundary(n) {
        n -= 1;
    }
    &a[..n]
}

/// Walks every profile in order, matches each function's blocks, and
/// writes one aligned row per reported function plus the final total
/// row. `all` lists fully covered (and `_`-named) functions too and
/// switches to full, untrimmed paths.
pub fn render_report(
    profiles: &[Profile],
    resolver: &dyn FuncResolver,
    all: bool,
    out: &mut dyn Write,
) -> Result<(), CovgrError> {
    let offset = path_offset(profiles, all);
    let mut rows: Vec<Vec<String>> = vec![];
    let mut run_totals = Totals::default();

    for profile in profiles {
        let funcs = resolver.resolve(&profile.file_name)?;
        let shown = profile
            .file_name
            .get(offset..)
            .unwrap_or(profile.file_name.as_str());
        for f in &funcs {
            let blocks = matched_blocks(f, &profile.file_name, &profile.blocks)?;
            let totals = tally(blocks);
            // Side-effect-only `_` functions are conventionally exempt
            // from coverage; they only show up (and count) under `all`.
            if f.name == "_" && !all {
                continue;
            }
            run_totals = run_totals.add(totals);
            if totals.covered == totals.total && !all {
                continue;
            }
            let ranges = if totals.covered == totals.total {
                span_blocks(blocks)
            } else {
                missing_ranges(blocks)
            };
            rows.push(vec![
                format!("{shown}:{}:", f.start_line),
                f.name.clone(),
                format!("{:5.1}% {}", totals.pct(), ranges),
            ]);
        }
    }

    rows.push(vec![
        "total:".to_string(),
        "(statements)".to_string(),
        format!("{:5.1}%", run_totals.pct()),
    ]);
    out.write_all(render_tabbed(&rows).as_bytes())
        .map_err(CovgrError::ReportWrite)
}
