// ============================================================
// Layer 4 — Text Preprocessor
// ============================================================
// Cleans raw question and answer strings before tokenisation.
//
// VQA annotation dumps routinely contain:
//   - Non-breaking spaces (U+00A0) from web scraping
//   - Zero-width spaces (U+200B) from copy-pasting
//   - Stray newlines and tabs from CSV/JSON round trips
//   - Doubled spaces from concatenated annotator edits
//
// Left in place, the tokenizer would waste vocabulary entries
// on whitespace variants and the same question could tokenize
// two different ways. Questions and answers are single-line
// texts, so cleaning is simpler than for documents: normalise
// every whitespace/control character to a plain space, collapse
// runs, trim the ends.
//
// Lowercasing is NOT done here — that is the tokenizer's
// normaliser's job, and doing it twice would hide bugs in the
// vocabulary build.
//
// Reference: Rust Book §8 (Strings in Rust)

pub struct Preprocessor;

impl Preprocessor {
    pub fn new() -> Self {
        Self
    }

    /// Clean one raw question or answer string.
    pub fn clean(&self, text: &str) -> String {
        let mut out        = String::with_capacity(text.len());
        let mut last_space = true; // leading spaces are dropped

        for c in text.chars() {
            // Every whitespace variant and control character
            // becomes a candidate single space
            let c = match c {
                '\u{00A0}' | '\u{200B}' | '\u{FEFF}' => ' ',
                c if c.is_whitespace() || c.is_control() => ' ',
                c => c,
            };

            if c == ' ' {
                if !last_space {
                    out.push(' ');
                }
                last_space = true;
            } else {
                out.push(c);
                last_space = false;
            }
        }

        // Drop a single trailing space left by the collapse
        if out.ends_with(' ') {
            out.pop();
        }
        out
    }
}

impl Default for Preprocessor {
    fn default() -> Self {
        Self::new()
    }
}
