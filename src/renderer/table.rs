use textwrap::wrap;

const MIN_COLUMN_WIDTH: usize = 3;

/// Box-drawn table whose cells wrap to fit the terminal.
#[derive(Debug, Clone, Default)]
pub struct Table {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    pub fn new<I, S>(headers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            headers: headers.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Missing cells are padded with empty strings, extra cells dropped.
    pub fn add_row<I, S>(&mut self, cells: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut row: Vec<String> = cells.into_iter().map(Into::into).collect();
        row.resize(self.headers.len(), String::new());
        self.rows.push(row);
    }

    fn column_widths(&self, max_width: usize) -> Vec<usize> {
        let columns = self.headers.len();
        let mut widths: Vec<usize> = self
            .headers
            .iter()
            .map(|h| h.chars().count().max(MIN_COLUMN_WIDTH))
            .collect();
        for row in &self.rows {
            for (i, cell) in row.iter().enumerate() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }

        // "  │ " + " │ " between columns + " │"
        let chrome = 2 + 2 + 3 * columns.saturating_sub(1) + 2;
        let available = max_width.saturating_sub(chrome).max(columns * MIN_COLUMN_WIDTH);
        let total: usize = widths.iter().sum();
        if total > available {
            let scale = available as f64 / total as f64;
            for width in widths.iter_mut() {
                *width = ((*width as f64 * scale) as usize).max(MIN_COLUMN_WIDTH);
            }
        }
        widths
    }

    fn border(output: &mut String, widths: &[usize], left: char, mid: char, right: char) {
        output.push_str("  ");
        output.push(left);
        for (i, width) in widths.iter().enumerate() {
            output.push_str(&"─".repeat(width + 2));
            if i + 1 < widths.len() {
                output.push(mid);
            }
        }
        output.push(right);
        output.push('\n');
    }

    fn render_row(output: &mut String, cells: &[String], widths: &[usize]) {
        let wrapped: Vec<Vec<String>> = cells
            .iter()
            .zip(widths)
            .map(|(cell, &width)| {
                let lines: Vec<String> = wrap(cell, width).into_iter().map(|l| l.into_owned()).collect();
                if lines.is_empty() {
                    vec![String::new()]
                } else {
                    lines
                }
            })
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(1);

        for line in 0..height {
            output.push_str("  │ ");
            for (i, (cell_lines, &width)) in wrapped.iter().zip(widths).enumerate() {
                let text = cell_lines.get(line).map(String::as_str).unwrap_or("");
                let pad = width.saturating_sub(text.chars().count());
                output.push_str(text);
                output.push_str(&" ".repeat(pad));
                if i + 1 < widths.len() {
                    output.push_str(" │ ");
                }
            }
            output.push_str(" │\n");
        }
    }

    pub fn render(&self, max_width: usize) -> String {
        if self.headers.is_empty() {
            return String::new();
        }
        let widths = self.column_widths(max_width);
        let mut output = String::new();

        Self::border(&mut output, &widths, '┌', '┬', '┐');
        Self::render_row(&mut output, &self.headers, &widths);
        Self::border(&mut output, &widths, '├', '┼', '┤');
        for (i, row) in self.rows.iter().enumerate() {
            Self::render_row(&mut output, row, &widths);
            if i + 1 < self.rows.len() {
                Self::border(&mut output, &widths, '├', '┼', '┤');
            }
        }
        Self::border(&mut output, &widths, '└', '┴', '┘');

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headers_and_rows_in_boxes() {
        let mut table = Table::new(["#", "Model"]);
        table.add_row(["1", "Llama 3 70B"]);
        let out = table.render(80);
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[0].starts_with("  ┌"));
        assert!(lines[1].contains("Model"));
        assert!(lines[3].contains("Llama 3 70B"));
        assert!(lines[4].ends_with('┘'));
        let width = lines[0].chars().count();
        assert!(lines.iter().all(|l| l.chars().count() == width));
    }

    #[test]
    fn long_cells_wrap_instead_of_overflowing() {
        let mut table = Table::new(["Model", "Notes"]);
        table.add_row(["Mixtral 8x7B", "Expert mixture model with multiple specialists approach"]);
        let out = table.render(40);
        assert!(out.lines().all(|l| l.chars().count() <= 40));
        assert!(out.contains("Expert"));
    }

    #[test]
    fn short_rows_are_padded() {
        let mut table = Table::new(["a", "b", "c"]);
        table.add_row(["only one"]);
        assert!(table.render(60).contains("only one"));
    }
}
