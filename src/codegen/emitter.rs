//! Append-only buffer of generated source text.

/// Ordered statement buffer shared by one generation run.
///
/// An appended fragment may span several lines or hold a lone brace; the
/// fragments as a whole must keep braces balanced for the beautifier.
#[derive(Debug, Default)]
pub struct Emitter {
    lines: Vec<String>,
}

impl Emitter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a line or block of text.
    pub fn append(&mut self, text: impl Into<String>) {
        self.lines.push(text.into());
    }

    /// Fragments appended so far, in order.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Join all fragments into one text, one fragment per line.
    pub fn into_text(self) -> String {
        let mut text = self.lines.join("\n");
        text.push('\n');
        text
    }
}
