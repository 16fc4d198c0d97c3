//! Elastic tab layout for the report table.
//!
//! Cells are tab-terminated, not tab-separated: every cell except the
//! last in its row is padded with tabs until it clears the widest cell
//! of its column plus one padding column, with tab stops every eight
//! columns. This keeps the output byte-compatible with consumers that
//! expect classic tabwriter-style alignment.

const TAB_STOP: usize = 8;

pub fn render_tabbed(rows: &[Vec<String>]) -> String {
    let widths = column_widths(rows);
    let mut out = String::new();
    for row in rows {
        let mut pos = 0usize;
        for (c, cell) in row.iter().enumerate() {
            let col_start = pos;
            out.push_str(cell);
            pos += display_width(cell);
            if c + 1 < row.len() {
                let target = col_start + widths[c] + 1;
                while pos < target {
                    out.push('\t');
                    pos = (pos / TAB_STOP + 1) * TAB_STOP;
                }
            }
        }
        out.push('\n');
    }
    out
}

fn column_widths(rows: &[Vec<String>]) -> Vec<usize> {
    let mut widths: Vec<usize> = vec![];
    for row in rows {
        if row.len() < 2 {
            continue;
        }
        // The last cell of a row is never padded and does not widen its
        // column.
        for (c, cell) in row[..row.len() - 1].iter().enumerate() {
            if widths.len() <= c {
                widths.resize(c + 1, 0);
            }
            widths[c] = widths[c].max(display_width(cell));
        }
    }
    widths
}

// Widths are in characters, not bytes; Go identifiers may be non-ASCII.
fn display_width(cell: &str) -> usize {
    cell.chars().count()
}
