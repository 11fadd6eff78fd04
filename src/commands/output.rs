//! Transport-agnostic command output types.
//!
//! Handlers return a CommandOutput; the binary renders it to stdout.

/// Output from a command handler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutput {
    /// Informational message (success, status, etc.).
    Info(String),

    /// Structured table data for display.
    Table {
        /// Column headers.
        headers: Vec<String>,
        /// Row data (each row is a vector of cell values).
        rows: Vec<Vec<String>>,
    },

    /// A JSON document, printed verbatim.
    Json(String),
}

impl CommandOutput {
    /// Creates an info message.
    pub fn info(msg: impl Into<String>) -> Self {
        Self::Info(msg.into())
    }

    /// Creates a table output.
    pub fn table(headers: Vec<String>, rows: Vec<Vec<String>>) -> Self {
        Self::Table { headers, rows }
    }

    /// Renders the output as plain text (without a trailing newline).
    pub fn render(&self) -> String {
        match self {
            Self::Info(msg) => msg.clone(),
            Self::Json(doc) => doc.clone(),
            Self::Table { headers, rows } => render_table(headers, rows),
        }
    }
}

/// Renders a left-aligned table with a dashed rule under the header.
///
/// Every column but the last is padded to its widest cell; the last column
/// is left ragged.
pub fn render_table(headers: &[String], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, header)| {
            rows.iter()
                .filter_map(|row| row.get(i))
                .map(|cell| cell.chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let format_line = |cells: &[String]| -> String {
        let last = headers.len().saturating_sub(1);
        (0..headers.len())
            .map(|i| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                if i == last {
                    cell.to_string()
                } else {
                    format!("{:<width$}", cell, width = widths[i])
                }
            })
            .collect::<Vec<_>>()
            .join("  ")
    };

    let header_line = format_line(headers);
    let mut lines = vec![header_line.clone(), "-".repeat(header_line.chars().count())];
    lines.extend(rows.iter().map(|row| format_line(row.as_slice())));
    lines.join("\n")
}
