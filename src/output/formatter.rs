//! Fixed-width table layout for streamed result rows
//!
//! Rows arrive one at a time, so column widths are decided up front and
//! longer cells are truncated.

/// Text alignment options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Alignment {
    Left,
    Right,
    Center,
}

/// Column definition for table formatting
#[derive(Debug, Clone)]
pub struct Column {
    pub header: String,
    pub alignment: Alignment,
    pub width: usize,
}

impl Column {
    pub fn new(header: &str, alignment: Alignment, width: usize) -> Self {
        Self {
            header: header.to_string(),
            alignment,
            width: width.max(header.chars().count()),
        }
    }
}

/// Table layout shared by the plain and colored table output
#[derive(Debug, Clone)]
pub struct TableLayout {
    pub columns: Vec<Column>,
}

impl TableLayout {
    /// Layout of the resolver results table
    pub fn results() -> Self {
        Self {
            columns: vec![
                Column::new("#", Alignment::Right, 3),
                Column::new("Name", Alignment::Left, 24),
                Column::new("Location", Alignment::Left, 10),
                Column::new("Status", Alignment::Left, 7),
                Column::new("Time", Alignment::Right, 7),
                Column::new("IP", Alignment::Left, 18),
            ],
        }
    }

    /// `+-----+----+` style border
    pub fn border(&self) -> String {
        let mut border = String::from("+");
        for column in &self.columns {
            border.push_str(&"-".repeat(column.width + 2));
            border.push('+');
        }
        border
    }

    /// Pad each cell to its column width
    pub fn pad_cells(&self, cells: &[String]) -> Vec<String> {
        self.columns
            .iter()
            .zip(cells.iter())
            .map(|(column, cell)| align_text(cell, column.width, column.alignment))
            .collect()
    }

    /// Join already padded (and possibly colored) cells into a row
    pub fn join_row<S: AsRef<str>>(&self, cells: &[S]) -> String {
        let mut row = String::from("|");
        for cell in cells {
            row.push(' ');
            row.push_str(cell.as_ref());
            row.push_str(" |");
        }
        row
    }

    pub fn header_row(&self) -> String {
        let headers: Vec<String> = self.columns.iter().map(|c| c.header.clone()).collect();
        self.join_row(&self.pad_cells(&headers))
    }
}

/// Align text within specified width, truncating on overflow
pub fn align_text(text: &str, width: usize, alignment: Alignment) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.chars().take(width).collect();
    }

    let padding = width - len;
    match alignment {
        Alignment::Left => format!("{}{}", text, " ".repeat(padding)),
        Alignment::Right => format!("{}{}", " ".repeat(padding), text),
        Alignment::Center => {
            let left_pad = padding / 2;
            let right_pad = padding - left_pad;
            format!("{}{}{}", " ".repeat(left_pad), text, " ".repeat(right_pad))
        }
    }
}
