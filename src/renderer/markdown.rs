use crate::renderer::Highlighter;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Parser, Tag};
use std::fmt::Write;
use textwrap::{wrap, Options};

const BOLD: &str = "\x1B[1m";
const BOLD_OFF: &str = "\x1B[22m";
const ITALIC: &str = "\x1B[3m";
const ITALIC_OFF: &str = "\x1B[23m";
const UNDERLINE: &str = "\x1B[4m";
const UNDERLINE_OFF: &str = "\x1B[24m";

/// Turns the model's markdown answer into wrapped, coloured terminal text.
pub struct MarkdownRenderer {
    width: usize,
    wrap_options: Options<'static>,
}

// Per-render state; a stack entry per open list holds the next number for
// ordered lists.
#[derive(Default)]
struct RenderState {
    output: String,
    paragraph: String,
    lists: Vec<Option<u64>>,
    item_marker: Option<String>,
    code: Option<(String, String)>,
}

impl MarkdownRenderer {
    pub fn new(width: usize) -> Self {
        let wrap_options = Options::new(width)
            .initial_indent("  ")
            .subsequent_indent("  ");

        Self {
            width,
            wrap_options,
        }
    }

    pub fn horizontal_rule(&self) -> String {
        format!("  {}", "─".repeat(self.width.saturating_sub(2)))
    }

    pub fn render(&self, text: &str) -> String {
        let mut state = RenderState {
            output: String::with_capacity(text.len() * 2),
            ..RenderState::default()
        };

        for event in Parser::new(text) {
            if let Some((_, code)) = state.code.as_mut() {
                match &event {
                    Event::Text(text) => {
                        code.push_str(text);
                        continue;
                    }
                    Event::End(Tag::CodeBlock(_)) => {}
                    _ => continue,
                }
            }

            match event {
                Event::Start(Tag::Heading(..)) => {
                    self.flush_paragraph(&mut state);
                }
                Event::End(Tag::Heading(level, ..)) => {
                    let (open, close) = match level {
                        HeadingLevel::H1 | HeadingLevel::H2 => (
                            format!("{BOLD}{UNDERLINE}"),
                            format!("{UNDERLINE_OFF}{BOLD_OFF}"),
                        ),
                        _ => (BOLD.to_string(), BOLD_OFF.to_string()),
                    };
                    let heading = std::mem::take(&mut state.paragraph);
                    for line in wrap(heading.trim(), &self.wrap_options) {
                        writeln!(state.output, "{open}{line}{close}").ok();
                    }
                    state.output.push('\n');
                }
                Event::Start(Tag::CodeBlock(kind)) => {
                    self.flush_paragraph(&mut state);
                    let language = match kind {
                        CodeBlockKind::Fenced(lang) if !lang.is_empty() => lang.to_string(),
                        _ => "txt".to_string(),
                    };
                    state.code = Some((language, String::new()));
                }
                Event::End(Tag::CodeBlock(_)) => {
                    if let Some((language, code)) = state.code.take() {
                        state
                            .output
                            .push_str(&Highlighter::global().highlight(&code, &language, "    "));
                        if !state.output.ends_with('\n') {
                            state.output.push('\n');
                        }
                        state.output.push('\n');
                    }
                }
                Event::Start(Tag::List(start)) => {
                    self.flush_paragraph(&mut state);
                    state.lists.push(start);
                }
                Event::End(Tag::List(_)) => {
                    self.flush_paragraph(&mut state);
                    state.lists.pop();
                    if state.lists.is_empty() {
                        state.output.push('\n');
                    }
                }
                Event::Start(Tag::Item) => {
                    self.flush_paragraph(&mut state);
                    let marker = match state.lists.last_mut() {
                        Some(Some(n)) => {
                            let marker = format!("{}. ", n);
                            *n += 1;
                            marker
                        }
                        _ => "• ".to_string(),
                    };
                    state.item_marker = Some(marker);
                }
                Event::End(Tag::Item) => {
                    self.flush_paragraph(&mut state);
                }
                Event::Start(Tag::Paragraph) => {
                    self.flush_paragraph(&mut state);
                }
                Event::End(Tag::Paragraph) => {
                    self.flush_paragraph(&mut state);
                    if state.lists.is_empty() {
                        state.output.push('\n');
                    }
                }
                Event::Start(Tag::Emphasis) => state.paragraph.push_str(ITALIC),
                Event::End(Tag::Emphasis) => state.paragraph.push_str(ITALIC_OFF),
                Event::Start(Tag::Strong) => state.paragraph.push_str(BOLD),
                Event::End(Tag::Strong) => state.paragraph.push_str(BOLD_OFF),
                Event::Code(text) => {
                    state.paragraph.push('`');
                    state.paragraph.push_str(&text);
                    state.paragraph.push('`');
                }
                Event::Text(text) => state.paragraph.push_str(&text),
                Event::SoftBreak => state.paragraph.push(' '),
                Event::HardBreak => {
                    self.flush_paragraph(&mut state);
                }
                Event::Rule => {
                    self.flush_paragraph(&mut state);
                    state.output.push_str(&self.horizontal_rule());
                    state.output.push_str("\n\n");
                }
                _ => {}
            }
        }

        self.flush_paragraph(&mut state);
        state.output.trim_end().to_string()
    }

    fn flush_paragraph(&self, state: &mut RenderState) {
        let marker = state.item_marker.take();
        if state.paragraph.trim().is_empty() {
            state.paragraph.clear();
            // Keep the marker for the item's first real line of text.
            state.item_marker = marker;
            return;
        }

        let text = std::mem::take(&mut state.paragraph);
        let depth = state.lists.len();
        if depth == 0 {
            for line in wrap(text.trim(), &self.wrap_options) {
                writeln!(state.output, "{}", line).ok();
            }
            return;
        }

        let base = "  ".repeat(depth);
        let first = format!("{}{}", base, marker.as_deref().unwrap_or("  "));
        let rest = " ".repeat(first.chars().count());
        let options = Options::new(self.width)
            .initial_indent(&first)
            .subsequent_indent(&rest);
        for line in wrap(text.trim(), &options) {
            writeln!(state.output, "{}", line).ok();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strip_ansi(s: &str) -> String {
        let mut out = String::new();
        let mut chars = s.chars();
        while let Some(c) = chars.next() {
            if c == '\x1B' {
                for c in chars.by_ref() {
                    if c.is_ascii_alphabetic() {
                        break;
                    }
                }
            } else {
                out.push(c);
            }
        }
        out
    }

    #[test]
    fn paragraphs_are_indented_and_wrapped() {
        let renderer = MarkdownRenderer::new(30);
        let out = renderer.render("Check the update request queue in SM13 before restarting anything.");
        for line in out.lines() {
            assert!(line.starts_with("  "));
            assert!(line.chars().count() <= 30);
        }
    }

    #[test]
    fn ordered_lists_keep_numbers() {
        let renderer = MarkdownRenderer::new(80);
        let out = strip_ansi(&renderer.render("1. Error Analysis\n2. Immediate Steps\n"));
        assert!(out.contains("1. Error Analysis"));
        assert!(out.contains("2. Immediate Steps"));
    }

    #[test]
    fn bullet_lists_use_dots() {
        let renderer = MarkdownRenderer::new(80);
        let out = strip_ansi(&renderer.render("* ST22\n* SM21\n"));
        assert!(out.contains("• ST22"));
        assert!(out.contains("• SM21"));
    }

    #[test]
    fn headings_are_bold() {
        let renderer = MarkdownRenderer::new(80);
        let out = renderer.render("## Error Analysis\n\nText");
        assert!(out.contains(BOLD));
        assert!(strip_ansi(&out).contains("Error Analysis"));
    }

    #[test]
    fn code_blocks_are_highlighted_not_wrapped() {
        let renderer = MarkdownRenderer::new(20);
        let out = renderer.render("```sql\nSELECT matnr FROM mara WHERE mtart = 'FERT'.\n```\n");
        let plain = strip_ansi(&out);
        assert!(plain.contains("SELECT matnr FROM mara WHERE mtart = 'FERT'."));
    }

    #[test]
    fn rules_span_the_width() {
        let renderer = MarkdownRenderer::new(12);
        assert_eq!(renderer.horizontal_rule().chars().count(), 12);
        assert!(renderer.render("a\n\n---\n\nb").contains(&renderer.horizontal_rule()));
    }
}
