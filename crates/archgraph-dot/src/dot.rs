//! DOT format primitives: escaping, attribute lists and an indenting writer.

use std::fmt::Write;

use archgraph_core::{Justify, Label};

/// Escape special characters for a quoted DOT string.
pub fn escape(input: &str) -> String {
    input
        .replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
        .replace('\r', "")
}

/// Quote an identifier; every id is quoted so keys may hold any character.
pub fn quote_id(id: &str) -> String {
    format!("\"{}\"", escape(id))
}

/// Render a label as an escaped DOT string body.
///
/// Centered lines are joined with `\n`; left and right justified lines are
/// each terminated with `\l` / `\r`, which is how the engine aligns them.
pub fn render_label(label: &Label) -> String {
    let lines = label.lines().iter().map(|l| escape(l));
    match label.justification() {
        Justify::Center => lines.collect::<Vec<_>>().join("\\n"),
        Justify::Left => lines.map(|l| l + "\\l").collect(),
        Justify::Right => lines.map(|l| l + "\\r").collect(),
    }
}

/// Write indentation to output.
pub fn write_indent(output: &mut String, level: usize) {
    for _ in 0..level {
        output.push_str("  ");
    }
}

/// An ordered attribute list whose values are stored already escaped.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Attrs(Vec<(&'static str, String)>);

impl Attrs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a plain text attribute.
    pub fn text(&mut self, key: &'static str, value: impl AsRef<str>) -> &mut Self {
        self.0.push((key, escape(value.as_ref())));
        self
    }

    /// Add a plain text attribute if present.
    pub fn text_opt<V: AsRef<str>>(&mut self, key: &'static str, value: Option<V>) -> &mut Self {
        if let Some(value) = value {
            self.text(key, value);
        }
        self
    }

    pub fn label(&mut self, label: &Label) -> &mut Self {
        self.0.push(("label", render_label(label)));
        self
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    fn write_to(&self, output: &mut String) {
        for (i, (key, value)) in self.0.iter().enumerate() {
            if i > 0 {
                output.push_str(", ");
            }
            let _ = write!(output, "{key}=\"{value}\"");
        }
    }
}

/// A DOT graph builder for constructing valid DOT output.
pub struct DotBuilder {
    output: String,
    indent: usize,
}

impl DotBuilder {
    /// Create a new directed graph with the given name.
    pub fn new(name: &str) -> Self {
        let mut output = String::with_capacity(4096);
        let _ = writeln!(output, "digraph {} {{", quote_id(name));
        Self { output, indent: 1 }
    }

    /// Add a graph (or current cluster) attribute.
    pub fn attr(&mut self, key: &str, value: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "{}=\"{}\";", key, escape(value));
        self
    }

    /// Add every entry of `attrs` as a graph (or current cluster) attribute.
    pub fn attrs(&mut self, attrs: &Attrs) -> &mut Self {
        for (key, value) in &attrs.0 {
            write_indent(&mut self.output, self.indent);
            let _ = writeln!(self.output, "{key}=\"{value}\";");
        }
        self
    }

    /// Add a default attribute statement (`node [...]` or `edge [...]`).
    pub fn defaults(&mut self, kind: &str, attrs: &Attrs) -> &mut Self {
        if attrs.is_empty() {
            return self;
        }
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{kind} [");
        attrs.write_to(&mut self.output);
        self.output.push_str("];\n");
        self
    }

    /// Add a blank line for readability.
    pub fn blank(&mut self) -> &mut Self {
        self.output.push('\n');
        self
    }

    /// Add a node with attributes.
    pub fn node(&mut self, id: &str, attrs: &Attrs) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{}", quote_id(id));
        if !attrs.is_empty() {
            self.output.push_str(" [");
            attrs.write_to(&mut self.output);
            self.output.push(']');
        }
        self.output.push_str(";\n");
        self
    }

    /// Add an edge with attributes.
    pub fn edge(&mut self, from: &str, to: &str, attrs: &Attrs) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = write!(self.output, "{} -> {}", quote_id(from), quote_id(to));
        if !attrs.is_empty() {
            self.output.push_str(" [");
            attrs.write_to(&mut self.output);
            self.output.push(']');
        }
        self.output.push_str(";\n");
        self
    }

    /// Start a subgraph; `id` must already carry the cluster prefix.
    pub fn start_cluster(&mut self, id: &str) -> &mut Self {
        write_indent(&mut self.output, self.indent);
        let _ = writeln!(self.output, "subgraph {} {{", quote_id(id));
        self.indent += 1;
        self
    }

    /// End the current subgraph cluster.
    pub fn end_cluster(&mut self) -> &mut Self {
        self.indent = self.indent.saturating_sub(1);
        write_indent(&mut self.output, self.indent);
        self.output.push_str("}\n");
        self
    }

    /// Finish building and return the DOT string.
    pub fn build(mut self) -> String {
        self.output.push_str("}\n");
        self.output
    }

    /// Get current indent level.
    pub fn indent(&self) -> usize {
        self.indent
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape() {
        assert_eq!(escape(r#"say "hi""#), r#"say \"hi\""#);
        assert_eq!(escape("a\\b"), "a\\\\b");
        assert_eq!(escape("one\ntwo"), "one\\ntwo");
    }

    #[test]
    fn test_render_label_justification() {
        let label = Label::new("{\n  \"kind\": \"simple\"\n}");
        assert_eq!(render_label(&label), "{\\n  \\\"kind\\\": \\\"simple\\\"\\n}");

        let left = label.clone().justify(Justify::Left);
        assert_eq!(
            render_label(&left),
            "{\\l  \\\"kind\\\": \\\"simple\\\"\\l}\\l"
        );
    }

    #[test]
    fn test_builder_output() {
        let mut dot = DotBuilder::new("G");
        dot.attr("rankdir", "LR");
        let mut attrs = Attrs::new();
        attrs.text("shape", "box");
        dot.node("a b", &attrs);
        dot.start_cluster("cluster_x");
        assert_eq!(dot.indent(), 2);
        dot.node("c", &Attrs::new());
        dot.end_cluster();
        dot.edge("a b", "c", &Attrs::new());

        let expected = "digraph \"G\" {\n  rankdir=\"LR\";\n  \"a b\" [shape=\"box\"];\n  subgraph \"cluster_x\" {\n    \"c\";\n  }\n  \"a b\" -> \"c\";\n}\n";
        assert_eq!(dot.build(), expected);
    }
}
