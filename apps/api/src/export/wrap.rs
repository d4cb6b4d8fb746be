//! Greedy word wrap against the static metric tables.

use crate::export::font_metrics::{get_metrics, Face};

/// Splits `text` into lines no wider than `max_width_pt`.
///
/// Words are packed greedily; a single word wider than the line is broken between
/// characters. Blank input yields no lines.
pub fn wrap_lines(text: &str, face: Face, size_pt: f32, max_width_pt: f32) -> Vec<String> {
    let metrics = get_metrics(face);
    let space_w = metrics.space(size_pt);
    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;

    for word in text.split_whitespace() {
        let word_w = metrics.measure(word, size_pt);

        if !current.is_empty() && current_width + space_w + word_w <= max_width_pt {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
            continue;
        }

        if !current.is_empty() {
            lines.push(std::mem::take(&mut current));
        }

        if word_w <= max_width_pt {
            current.push_str(word);
            current_width = word_w;
            continue;
        }

        // Overlong word (URLs, hashes): hard-break it.
        current_width = 0.0;
        for c in word.chars() {
            let mut buf = [0u8; 4];
            let c_w = metrics.measure(c.encode_utf8(&mut buf), size_pt);
            if !current.is_empty() && current_width + c_w > max_width_pt {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            current.push(c);
            current_width += c_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
