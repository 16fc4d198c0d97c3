/// One statement-coverage unit from the profile: a source extent, the
/// number of statements it stands for, and how often it ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProfileBlock {
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
    pub num_stmts: u32,
    pub count: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoverMode {
    Set,
    Count,
    Atomic,
}

impl CoverMode {
    pub fn parse(raw: &str) -> Option<CoverMode> {
        Some(match raw.trim() {
            "set" => CoverMode::Set,
            "count" => CoverMode::Count,
            "atomic" => CoverMode::Atomic,
            _ => return None,
        })
    }
}

/// All blocks recorded for one instrumented source file, ordered by
/// `(start_line, start_col)`. The parser establishes the order once; the
/// matching and reporting layers never re-sort.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub file_name: String,
    pub mode: CoverMode,
    pub blocks: Vec<ProfileBlock>,
}

/// The textual span of one top-level function or method declaration.
/// Lines and columns are 1-based byte positions; the end position is one
/// past the body's closing brace.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuncExtent {
    pub name: String,
    pub start_line: u32,
    pub start_col: u32,
    pub end_line: u32,
    pub end_col: u32,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Totals {
    pub covered: i64,
    pub total: i64,
}

impl Totals {
    pub fn pct(self) -> f64 {
        if self.total == 0 {
            // Nothing to cover counts as fully covered.
            100.0
        } else {
            100.0 * self.covered as f64 / self.total as f64
        }
    }

    pub fn add(self, other: Totals) -> Totals {
        Totals {
            covered: self.covered + other.covered,
            total: self.total + other.total,
        }
    }
}
