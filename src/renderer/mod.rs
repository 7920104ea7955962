//! Text renderer for the element tree.
//!
//! Walks an element subtree in display order and writes one line per
//! textual element. Nesting is shown by indenting under row containers.
//! Styling goes through crossterm: labels bold, errors red, help and
//! placeholders dim. Plain mode drops the escape codes, for tests and logs.
//!
//! ```ignore
//! let mut stdout = std::io::stdout();
//! TextRenderer::styled().write(&mut stdout, form_root)?;
//! ```

use std::io;

use crossterm::style::Stylize;

use crate::engine::arrays::{content, core};
use crate::engine::tree;
use crate::types::{ElementFlags, ElementKind};
use crate::widgets::input::PLACEHOLDER_CLASS;
use crate::widgets::list_field::LIST_ROW_CLASS;
use crate::widgets::row::ROW_CLASS;

/// Renders element subtrees as text.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextRenderer {
    styled: bool,
}

impl TextRenderer {
    /// No escape codes.
    pub fn plain() -> Self {
        Self { styled: false }
    }

    /// ANSI styling via crossterm.
    pub fn styled() -> Self {
        Self { styled: true }
    }

    /// Lines for `root` and everything below it.
    pub fn lines(&self, root: usize) -> Vec<String> {
        tree::descendants(root)
            .into_iter()
            .filter(|&index| core::get_element_kind(index).is_textual())
            .map(|index| {
                let indent = "  ".repeat(nesting(root, index));
                format!("{}{}", indent, self.line(index))
            })
            .collect()
    }

    /// The whole subtree as one string, newline separated.
    pub fn render(&self, root: usize) -> String {
        self.lines(root).join("\n")
    }

    /// Render every root element.
    pub fn render_all(&self) -> String {
        tree::roots()
            .into_iter()
            .map(|root| self.render(root))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn write(&self, out: &mut impl io::Write, root: usize) -> io::Result<()> {
        for line in self.lines(root) {
            writeln!(out, "{}", line)?;
        }
        out.flush()
    }

    fn line(&self, index: usize) -> String {
        let text = content::get_text(index);
        let flags = core::get_flags(index);
        match core::get_element_kind(index) {
            ElementKind::Label => self.paint(text, |t| t.bold().to_string()),
            ElementKind::Help => self.paint(text, |t| t.dim().to_string()),
            ElementKind::Error => self.paint(format!("! {}", text), |t| t.red().to_string()),
            ElementKind::Input => {
                let boxed = format!("[{}]", text);
                if content::has_class(index, PLACEHOLDER_CLASS) {
                    self.paint(boxed, |t| t.dim().italic().to_string())
                } else {
                    boxed
                }
            }
            ElementKind::Checkbox => {
                let mark = if flags.contains(ElementFlags::CHECKED) { "[x]" } else { "[ ]" };
                mark.to_string()
            }
            ElementKind::Button => self.paint(format!("<{}>", text), |t| t.cyan().to_string()),
            ElementKind::Text | ElementKind::Container => text,
        }
    }

    fn paint(&self, text: String, style: impl FnOnce(String) -> String) -> String {
        if self.styled { style(text) } else { text }
    }
}

/// Row containers between `root` and `index`.
fn nesting(root: usize, index: usize) -> usize {
    let mut depth = 0;
    let mut current = core::get_parent_index(index);
    while let Some(parent) = current {
        if parent == root {
            break;
        }
        if content::has_class(parent, ROW_CLASS) || content::has_class(parent, LIST_ROW_CLASS) {
            depth += 1;
        }
        current = core::get_parent_index(parent);
    }
    depth
}
