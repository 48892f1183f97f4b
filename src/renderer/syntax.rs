use once_cell::sync::Lazy;
use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

const THEME: &str = "base16-ocean.dark";

static HIGHLIGHTER: Lazy<Highlighter> = Lazy::new(Highlighter::load);

/// Syntax definitions and theme, loaded once per process.
pub struct Highlighter {
    syntax_set: SyntaxSet,
    theme_set: ThemeSet,
}

impl Highlighter {
    pub fn global() -> &'static Highlighter {
        &HIGHLIGHTER
    }

    fn load() -> Self {
        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme_set: ThemeSet::load_defaults(),
        }
    }

    fn syntax_for(&self, language: &str) -> &SyntaxReference {
        // ABAP has no bundled grammar; SQL is the closest match for Open SQL snippets.
        let language = match language.to_ascii_lowercase().as_str() {
            "abap" => "sql".to_string(),
            other => other.to_string(),
        };
        self.syntax_set
            .find_syntax_by_token(&language)
            .or_else(|| self.syntax_set.find_syntax_by_extension(&language))
            .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text())
    }

    fn theme(&self) -> Option<&Theme> {
        self.theme_set
            .themes
            .get(THEME)
            .or_else(|| self.theme_set.themes.values().next())
    }

    /// Returns `code` with terminal colour escapes, each line indented by
    /// `indent`. Falls back to plain text when highlighting fails.
    pub fn highlight(&self, code: &str, language: &str, indent: &str) -> String {
        let mut output = String::with_capacity(code.len() * 2);
        let Some(theme) = self.theme() else {
            for line in LinesWithEndings::from(code) {
                output.push_str(indent);
                output.push_str(line);
            }
            return output;
        };

        let mut highlighter = HighlightLines::new(self.syntax_for(language), theme);
        for line in LinesWithEndings::from(code) {
            output.push_str(indent);
            match highlighter.highlight_line(line, &self.syntax_set) {
                Ok(ranges) => output.push_str(&as_24_bit_terminal_escaped(&ranges[..], false)),
                Err(_) => output.push_str(line),
            }
        }
        output.push_str("\x1b[0m");
        output
    }
}
