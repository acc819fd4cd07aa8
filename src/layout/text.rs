use crate::font::{FontBook, FontFace, SpanFont};
use crate::units::Pt;
use crate::ComposeError;

const TABSIZE: usize = 4;

/// One wrapped line of text and its rendered extent
#[derive(Debug, Clone, PartialEq)]
pub struct Line {
    pub text: String,
    pub width: Pt,
    pub height: Pt,
}

/// Measures and wraps text for one font at one size.
///
/// Wrapping is word based: words are separated by single spaces and a line is broken at
/// the last space that keeps it within the maximum width, dropping that space. Runs of
/// spaces are preserved as empty words, so re-joining the lines of a paragraph with
/// single spaces gives back the paragraph. A word that is wider than the maximum width on
/// its own is split between characters; a single character wider than the maximum is
/// still placed on its own line so wrapping always makes progress.
///
/// Explicit line breaks (`\n`, `\r\n` or `\r`) always end a line, and tabs count as
/// four spaces.
#[derive(Debug, Clone, Copy)]
pub struct TextMeasurer<'f> {
    face: &'f FontFace,
    size: Pt,
}

impl<'f> TextMeasurer<'f> {
    pub fn new(fonts: &'f FontBook, font: SpanFont) -> Result<TextMeasurer<'f>, ComposeError> {
        Ok(TextMeasurer {
            face: fonts.get(font.id)?,
            size: font.size,
        })
    }

    pub fn for_face(face: &'f FontFace, size: Pt) -> TextMeasurer<'f> {
        TextMeasurer { face, size }
    }

    /// Rendered width of `text` as a single line
    pub fn width_of(&self, text: &str) -> Pt {
        self.face.width_of(text, self.size)
    }

    pub fn line_height(&self) -> Pt {
        self.face.line_height(self.size)
    }

    /// Break `text` into lines no wider than `max_width`. Always returns at least one
    /// line, which is empty for empty input.
    pub fn wrap(&self, text: &str, max_width: Pt) -> Vec<Line> {
        // replace tabs with spaces
        let text = text.replace('\t', &" ".repeat(TABSIZE));
        // normalize newlines
        let text = text.replace("\r\n", "\n").replace('\r', "\n");

        let mut lines = Vec::new();
        for paragraph in text.split('\n') {
            self.wrap_paragraph(paragraph, max_width, &mut lines);
        }
        lines
    }

    fn wrap_paragraph(&self, paragraph: &str, max_width: Pt, lines: &mut Vec<Line>) {
        let mut current = String::new();
        let mut has_words = false;

        for word in paragraph.split(' ') {
            if has_words {
                let candidate = format!("{current} {word}");
                if self.width_of(&candidate) <= max_width {
                    current = candidate;
                    continue;
                }
                lines.push(self.line(std::mem::take(&mut current)));
            }

            if self.width_of(word) <= max_width {
                current.push_str(word);
            } else {
                current = self.split_word(word, max_width, lines);
            }
            has_words = true;
        }

        lines.push(self.line(current));
    }

    /// Push every full-width chunk of an over-long word and return the remainder, which
    /// the next word may continue
    fn split_word(&self, word: &str, max_width: Pt, lines: &mut Vec<Line>) -> String {
        let mut chunk = String::new();
        for ch in word.chars() {
            chunk.push(ch);
            if chunk.chars().count() > 1 && self.width_of(&chunk) > max_width {
                chunk.pop();
                lines.push(self.line(std::mem::take(&mut chunk)));
                chunk.push(ch);
            }
        }
        chunk
    }

    fn line(&self, text: String) -> Line {
        Line {
            width: self.width_of(&text),
            height: self.line_height(),
            text,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::font::StandardFont;

    fn helvetica() -> FontFace {
        FontFace::Standard(StandardFont::Helvetica)
    }

    #[test]
    fn empty_input_gives_one_empty_line() {
        let face = helvetica();
        let lines = TextMeasurer::for_face(&face, Pt(10.0)).wrap("", Pt(100.0));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines[0].text, "");
        assert_eq!(lines[0].width, Pt(0.0));
    }

    #[test]
    fn breaks_at_word_boundaries() {
        let face = helvetica();
        let measurer = TextMeasurer::for_face(&face, Pt(10.0));
        let max = measurer.width_of("alpha beta");
        let lines = measurer.wrap("alpha beta gamma", max);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["alpha beta", "gamma"]);
        assert!(lines.iter().all(|l| l.width <= max));
    }

    #[test]
    fn splits_words_wider_than_the_line() {
        let face = helvetica();
        let measurer = TextMeasurer::for_face(&face, Pt(10.0));
        let max = measurer.width_of("0000");
        let lines = measurer.wrap("0000000000 1", max);
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["0000", "0000", "00 1"]);
    }

    #[test]
    fn honours_explicit_newlines_and_tabs() {
        let face = helvetica();
        let measurer = TextMeasurer::for_face(&face, Pt(10.0));
        let lines = measurer.wrap("one\r\ntwo\rthree\n\tfour", Pt(500.0));
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["one", "two", "three", "    four"]);
    }

    #[test]
    fn rejoining_lines_restores_the_paragraph() {
        let face = helvetica();
        let measurer = TextMeasurer::for_face(&face, Pt(8.0));
        let text = "Fragile  cargo must be loaded last and secured with straps on both sides";
        for max in [40.0, 75.5, 120.0, 300.0] {
            let lines = measurer.wrap(text, Pt(max));
            let rejoined: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
            assert_eq!(rejoined.join(" "), text);
            assert!(lines.iter().all(|l| l.width <= Pt(max)));
        }
    }

    #[test]
    fn single_glyph_wider_than_the_line_is_still_placed() {
        let face = helvetica();
        let lines = TextMeasurer::for_face(&face, Pt(10.0)).wrap("WW", Pt(1.0));
        let texts: Vec<&str> = lines.iter().map(|l| l.text.as_str()).collect();
        assert_eq!(texts, vec!["W", "W"]);
    }
}
