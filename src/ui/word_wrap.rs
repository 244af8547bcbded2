use std::ops::Range;

/// Greedy wrap of word widths into rows of word indices, one space between
/// words. A word wider than the area gets a row to itself.
pub fn wrap(widths: &[usize], max_width: usize) -> Vec<Range<usize>> {
    let mut rows = Vec::new();
    let mut start = 0;
    let mut line_width = 0;

    for (i, &w) in widths.iter().enumerate() {
        if i > start && line_width + 1 + w > max_width {
            rows.push(start..i);
            start = i;
            line_width = 0;
        }
        line_width += if i > start { 1 + w } else { w };
    }
    if start < widths.len() {
        rows.push(start..widths.len());
    }
    rows
}

pub fn row_of(rows: &[Range<usize>], word: usize) -> Option<usize> {
    rows.iter().position(|r| r.contains(&word))
}

/// First visible row: keeps the active row a third of the way down, then
/// applies the manual nudge without scrolling past the last row.
pub fn scroll_offset(active_row: usize, total_rows: usize, visible: usize, nudge: usize) -> usize {
    let lead = visible / 3;
    let offset = active_row.saturating_sub(lead) + nudge;
    offset.min(total_rows.saturating_sub(1))
}
