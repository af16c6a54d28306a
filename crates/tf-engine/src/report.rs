//! Markdown-ish text builder used by every tool template.

use std::fmt::Write;

/// Append-only builder for one generated result.
#[derive(Debug, Default)]
pub struct ReportWriter {
    out: String,
}

impl ReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(&mut self, text: &str) -> &mut Self {
        let _ = writeln!(self.out, "# {}\n", text);
        self
    }

    pub fn heading(&mut self, text: &str) -> &mut Self {
        self.ensure_gap();
        let _ = writeln!(self.out, "## {}\n", text);
        self
    }

    pub fn subheading(&mut self, text: &str) -> &mut Self {
        self.ensure_gap();
        let _ = writeln!(self.out, "### {}\n", text);
        self
    }

    /// `**Label:** value`
    pub fn field(&mut self, label: &str, value: impl std::fmt::Display) -> &mut Self {
        let _ = writeln!(self.out, "**{}:** {}", label, value);
        self
    }

    pub fn bullet(&mut self, text: impl std::fmt::Display) -> &mut Self {
        let _ = writeln!(self.out, "- {}", text);
        self
    }

    pub fn bullets<I, T>(&mut self, items: I) -> &mut Self
    where
        I: IntoIterator<Item = T>,
        T: std::fmt::Display,
    {
        for item in items {
            self.bullet(item);
        }
        self
    }

    pub fn numbered(&mut self, n: usize, text: impl std::fmt::Display) -> &mut Self {
        let _ = writeln!(self.out, "{}. {}", n, text);
        self
    }

    pub fn checkbox(&mut self, done: bool, text: impl std::fmt::Display) -> &mut Self {
        let mark = if done { "x" } else { " " };
        let _ = writeln!(self.out, "- [{}] {}", mark, text);
        self
    }

    pub fn paragraph(&mut self, text: impl std::fmt::Display) -> &mut Self {
        self.ensure_gap();
        let _ = writeln!(self.out, "{}\n", text);
        self
    }

    pub fn quote(&mut self, text: &str) -> &mut Self {
        self.ensure_gap();
        for line in text.lines() {
            let _ = writeln!(self.out, "> {}", line);
        }
        self.out.push('\n');
        self
    }

    pub fn code_block(&mut self, lang: &str, body: &str) -> &mut Self {
        self.ensure_gap();
        let _ = writeln!(self.out, "```{}\n{}\n```\n", lang, body.trim_end());
        self
    }

    /// Simple pipe table. Rows shorter than the header are padded with blanks.
    pub fn table(&mut self, header: &[&str], rows: &[Vec<String>]) -> &mut Self {
        self.ensure_gap();
        let _ = writeln!(self.out, "| {} |", header.join(" | "));
        let rule: Vec<&str> = header.iter().map(|_| "---").collect();
        let _ = writeln!(self.out, "| {} |", rule.join(" | "));
        for row in rows {
            let mut cells: Vec<&str> = row.iter().map(String::as_str).collect();
            cells.resize(header.len(), "");
            let _ = writeln!(self.out, "| {} |", cells.join(" | "));
        }
        self.out.push('\n');
        self
    }

    pub fn blank(&mut self) -> &mut Self {
        self.out.push('\n');
        self
    }

    pub fn finish(self) -> String {
        let mut out = self.out;
        while out.ends_with("\n\n") {
            out.pop();
        }
        out
    }

    fn ensure_gap(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with("\n\n") {
            if !self.out.ends_with('\n') {
                self.out.push('\n');
            }
            self.out.push('\n');
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sections_are_separated() {
        let mut w = ReportWriter::new();
        w.title("Quiz")
            .field("Difficulty", "Hard")
            .heading("Questions")
            .numbered(1, "What is 2 + 2?");
        let out = w.finish();
        assert_eq!(
            out,
            "# Quiz\n\n**Difficulty:** Hard\n\n## Questions\n\n1. What is 2 + 2?\n"
        );
    }

    #[test]
    fn test_table_pads_short_rows() {
        let mut w = ReportWriter::new();
        w.table(&["Week", "Focus"], &[vec!["1".to_string()]]);
        let out = w.finish();
        assert!(out.contains("| Week | Focus |"));
        assert!(out.contains("| 1 |  |"));
    }

    #[test]
    fn test_quote_and_code_block() {
        let mut w = ReportWriter::new();
        w.quote("line one\nline two").code_block("json", "{}\n\n");
        let out = w.finish();
        assert!(out.contains("> line one\n> line two\n"));
        assert!(out.contains("```json\n{}\n```"));
    }
}
