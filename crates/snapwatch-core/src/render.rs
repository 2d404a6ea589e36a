//! Plain-text status table.
//!
//! Accumulates per-snap report blocks and renders them once, after all
//! snaps are processed. Within a block, a name/channel/version cell equal
//! to the cell directly above it renders blank (vertical cell merging);
//! a rule separates blocks.

use crate::report::SnapReport;

/// Column headers, in render order.
const HEADERS: [&str; 7] = ["Name", "Channel", "Version", "Arch", "Rev", "Date", "Build"];

/// Leading columns whose repeated values merge into the row above.
const MERGED_COLUMNS: usize = 3;

/// Gap between columns.
const COLUMN_GAP: usize = 2;

/// Accumulates snap blocks and renders them as one aligned table.
#[derive(Debug, Default)]
pub struct StatusTable {
    blocks: Vec<Block>,
}

#[derive(Debug)]
struct Block {
    rows: Vec<[String; 7]>,
    summary: String,
}

impl StatusTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one snap's channel rows and summary line.
    pub fn push(&mut self, report: &SnapReport) {
        let rows = report
            .rows
            .iter()
            .map(|row| {
                [
                    row.name.clone(),
                    row.channel.clone(),
                    row.version.clone(),
                    row.architecture.clone(),
                    row.revision.to_string(),
                    row.released_at.clone(),
                    row.build_mark.clone(),
                ]
            })
            .collect();

        self.blocks.push(Block {
            rows,
            summary: report.summary.clone(),
        });
    }

    /// True when no snap has been pushed.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Render the table as one string, trailing newline included.
    pub fn render(&self) -> String {
        let widths = self.column_widths();

        let mut out = String::new();
        push_line(&mut out, &widths, &HEADERS);
        push_rule(&mut out, &widths);

        for block in &self.blocks {
            let mut previous: Option<&[String; 7]> = None;
            for row in &block.rows {
                let mut cells = row.clone();
                // Compare against the unmerged previous row so a value that
                // repeats after a gap still renders.
                if let Some(prev) = previous {
                    for col in 0..MERGED_COLUMNS {
                        if cells[col] == prev[col] {
                            cells[col] = String::new();
                        }
                    }
                }
                push_line(&mut out, &widths, &cells);
                previous = Some(row);
            }

            let mut summary_cells: [String; 7] = Default::default();
            summary_cells[0] = block.summary.clone();
            push_line(&mut out, &widths, &summary_cells);
            push_rule(&mut out, &widths);
        }

        out
    }

    fn column_widths(&self) -> [usize; 7] {
        let mut widths = [0usize; 7];
        for (i, header) in HEADERS.iter().enumerate() {
            widths[i] = display_width(header);
        }

        for block in &self.blocks {
            for row in &block.rows {
                for (i, cell) in row.iter().enumerate() {
                    widths[i] = widths[i].max(display_width(cell));
                }
            }
            widths[0] = widths[0].max(display_width(&block.summary));
        }

        widths
    }
}

fn display_width(s: &str) -> usize {
    s.chars().count()
}

fn push_line<S: AsRef<str>>(out: &mut String, widths: &[usize; 7], cells: &[S; 7]) {
    let mut line = String::new();
    for (i, cell) in cells.iter().enumerate() {
        if i > 0 {
            for _ in 0..COLUMN_GAP {
                line.push(' ');
            }
        }
        line.push_str(cell.as_ref());
        for _ in 0..widths[i].saturating_sub(display_width(cell.as_ref())) {
            line.push(' ');
        }
    }

    out.push_str(line.trim_end());
    out.push('\n');
}

fn push_rule(out: &mut String, widths: &[usize; 7]) {
    let total: usize = widths.iter().sum::<usize>() + COLUMN_GAP * (widths.len() - 1);
    out.push_str(&"-".repeat(total));
    out.push('\n');
}
