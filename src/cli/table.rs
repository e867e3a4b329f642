use colored::Colorize;

use crate::cli::output;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Align {
    Left,
    Right,
}

#[derive(Debug, Clone)]
pub struct TableColumn {
    pub header: &'static str,
    pub align: Align,
}

impl TableColumn {
    pub const fn left(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Left,
        }
    }

    pub const fn right(header: &'static str) -> Self {
        Self {
            header,
            align: Align::Right,
        }
    }
}

/// Padded plain-text table. Column widths follow the widest cell; styling hooks receive
/// already padded text so colors never disturb alignment.
#[derive(Debug, Clone)]
pub struct Table {
    columns: Vec<TableColumn>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new(columns: Vec<TableColumn>) -> Self {
        Self {
            columns,
            rows: Vec::new(),
        }
    }

    pub fn add_row(&mut self, cells: Vec<String>) {
        self.rows.push(cells);
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn widths(&self) -> Vec<usize> {
        self.columns
            .iter()
            .enumerate()
            .map(|(idx, column)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(idx))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(column.header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }

    fn pad(cell: &str, width: usize, align: Align) -> String {
        match align {
            Align::Left => format!("{cell:<width$}"),
            Align::Right => format!("{cell:>width$}"),
        }
    }

    /// Renders header, rule and rows. `style_cell(row, column, padded)` may decorate a cell.
    pub fn render_with(&self, style_cell: impl Fn(usize, usize, String) -> String) -> Vec<String> {
        let widths = self.widths();
        let mut lines = Vec::with_capacity(self.rows.len() + 2);

        let header = self
            .columns
            .iter()
            .zip(&widths)
            .map(|(column, &width)| Self::pad(column.header, width, column.align))
            .collect::<Vec<_>>()
            .join("  ");
        lines.push(header.trim_end().to_string());
        let rule_width = widths.iter().sum::<usize>() + widths.len().saturating_sub(1) * 2;
        lines.push("-".repeat(rule_width));

        for (row_idx, row) in self.rows.iter().enumerate() {
            let line = self
                .columns
                .iter()
                .zip(&widths)
                .enumerate()
                .map(|(col_idx, (column, &width))| {
                    let cell = row.get(col_idx).map(String::as_str).unwrap_or("");
                    style_cell(row_idx, col_idx, Self::pad(cell, width, column.align))
                })
                .collect::<Vec<_>>()
                .join("  ");
            lines.push(line.trim_end().to_string());
        }
        lines
    }

    pub fn print_with(&self, style_cell: impl Fn(usize, usize, String) -> String) {
        let lines = self.render_with(style_cell);
        let color = output::preferences().color_enabled;
        for (idx, line) in lines.iter().enumerate() {
            if idx == 0 && color {
                println!("{}", line.bold());
            } else {
                println!("{line}");
            }
        }
    }
}
