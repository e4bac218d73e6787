use mindloom_core::LayoutConfig;

/// Wrap width (in characters) for a node at `depth`: wide near the root, narrower deeper down,
/// never below `wrap_width_min`.
pub fn wrap_width_for_depth(depth: usize, config: &LayoutConfig) -> usize {
    config
        .wrap_width_root
        .saturating_sub(depth)
        .max(config.wrap_width_min)
        .max(1)
}

/// Splits `text` into display lines of at most `max_chars` characters.
///
/// Text without spaces that is too long (e.g. CJK runs) is cut into fixed-size chunks. Otherwise
/// words are packed greedily, and a single over-long word is hard-split into chunks. At most
/// `max_lines` lines are returned; the rest is dropped.
pub fn wrap_label(text: &str, max_chars: usize, max_lines: usize) -> Vec<String> {
    let max_chars = max_chars.max(1);
    let text = text.trim();
    if text.is_empty() {
        return vec![String::new()];
    }

    if !text.contains(' ') && text.chars().count() > max_chars {
        let mut lines = chunk_chars(text, max_chars);
        lines.truncate(max_lines);
        return lines;
    }

    let mut lines: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut current_len = 0usize;

    for word in text.split_whitespace() {
        let word_len = word.chars().count();
        if word_len > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            lines.extend(chunk_chars(word, max_chars));
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_len = word_len;
            continue;
        }

        if current_len + 1 + word_len <= max_chars {
            current.push(' ');
            current.push_str(word);
            current_len += 1 + word_len;
        } else {
            lines.push(std::mem::replace(&mut current, word.to_string()));
            current_len = word_len;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines.truncate(max_lines);
    lines
}

fn chunk_chars(text: &str, size: usize) -> Vec<String> {
    let chars = text.chars().collect::<Vec<_>>();
    chars
        .chunks(size.max(1))
        .map(|c| c.iter().collect::<String>())
        .collect()
}
