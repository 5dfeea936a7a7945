//! Greedy word wrapping against measured widths

use super::metrics::Font;

/// Split `text` into lines no wider than `max_width` millimetres.
///
/// Explicit newlines always start a new line. A single word wider than the
/// line is broken between characters. Empty input yields one empty line so
/// that every value occupies at least one line.
pub fn wrap_text(text: &str, font: Font, font_size: f32, max_width: f32) -> Vec<String> {
    let space_width = font.char_width(' ', font_size);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let paragraph = paragraph.trim_end_matches('\r');
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = font.text_width(word, font_size);

            if !current.is_empty() {
                if current_width + space_width + word_width <= max_width {
                    current.push(' ');
                    current.push_str(word);
                    current_width += space_width + word_width;
                    continue;
                }
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }

            if word_width <= max_width {
                current.push_str(word);
                current_width = word_width;
                continue;
            }

            for ch in word.chars() {
                let ch_width = font.char_width(ch, font_size);
                if !current.is_empty() && current_width + ch_width > max_width {
                    lines.push(std::mem::take(&mut current));
                    current_width = 0.0;
                }
                current.push(ch);
                current_width += ch_width;
            }
        }

        lines.push(current);
    }

    lines
}
