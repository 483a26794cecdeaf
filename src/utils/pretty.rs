//! Pretty printing for constraint systems.
//!
//! `Display` gives the compact single-line forms; the [`PrettyPrint`]
//! trait lays long systems out over several lines within a width.

use crate::polyhedral::{Constraint, ConstraintSystem};
use pretty::{BoxAllocator, DocAllocator, DocBuilder};

/// Default line width for pretty printing.
pub const DEFAULT_WIDTH: usize = 80;

/// A pretty-printable value.
pub trait PrettyPrint {
    /// Convert to a pretty document.
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D>;

    /// Pretty print to a string with the given width.
    fn pretty_print(&self, width: usize) -> String {
        let allocator = BoxAllocator;
        let doc = self.to_doc(&allocator);
        let mut output = String::new();
        doc.render_fmt(width, &mut output)
            .expect("rendering into a String does not fail");
        output
    }

    /// Pretty print with default width.
    fn pretty(&self) -> String {
        self.pretty_print(DEFAULT_WIDTH)
    }
}

impl PrettyPrint for Constraint {
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        allocator.text(self.to_string())
    }
}

impl PrettyPrint for ConstraintSystem {
    /// `{c0, c1, ...}` on one line when it fits, otherwise one constraint
    /// per line indented by two.
    fn to_doc<'a, D: DocAllocator<'a>>(&self, allocator: &'a D) -> DocBuilder<'a, D> {
        if self.is_empty() {
            return allocator.text("{}");
        }
        let mut body = allocator.nil();
        for (i, c) in self.iter().enumerate() {
            if i > 0 {
                body = body.append(allocator.text(",")).append(allocator.line());
            }
            body = body.append(c.to_doc(allocator));
        }
        allocator
            .text("{")
            .append(allocator.line_().append(body).nest(2))
            .append(allocator.line_())
            .append(allocator.text("}"))
            .group()
    }
}

/// Indent every non-empty line of `s` by `spaces`.
pub fn indent(s: &str, spaces: usize) -> String {
    let indent_str = " ".repeat(spaces);
    s.lines()
        .map(|line| {
            if line.is_empty() {
                line.to_string()
            } else {
                format!("{}{}", indent_str, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// One line per constraint with its kind and any degenerate status,
/// followed by a summary line.
pub fn classification_report(system: &ConstraintSystem) -> String {
    let mut lines = String::new();
    for (i, c) in system.iter().enumerate() {
        lines.push_str(&format!("[{}] {}: {}", i, c, c.kind()));
        if c.is_tautological() {
            lines.push_str(" (tautological)");
        } else if c.is_inconsistent() {
            lines.push_str(" (inconsistent)");
        }
        lines.push('\n');
    }
    format!(
        "constraints: {} in {} dimensions\n{}",
        system.len(),
        system.space_dimension(),
        indent(&lines, 2)
    )
}
