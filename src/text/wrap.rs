/// Greedily pack whitespace-separated words into lines of at most `max_chars_per_line`
/// characters.
///
/// Lengths are counted in Unicode scalar values. A word longer than the limit is never split;
/// it sits alone on its own line and overflows. The pending line is flushed whenever a word
/// does not fit, even when it is still empty, so an over-long first word is preceded by an
/// empty line. The result always holds at least one line, so an empty caption yields `[""]`.
pub fn wrap_lines(text: &str, max_chars_per_line: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    // Includes one trailing separator per word already on the line.
    let mut running = 0usize;

    for word in text.split_whitespace() {
        let len = word.chars().count();
        if running + len <= max_chars_per_line {
            current.push_str(word);
            current.push(' ');
            running += len + 1;
            continue;
        }
        lines.push(current.trim_end().to_owned());
        current.clear();
        current.push_str(word);
        current.push(' ');
        running = len + 1;
    }

    lines.push(current.trim_end().to_owned());
    lines
}

#[cfg(test)]
#[path = "../../tests/unit/text/wrap.rs"]
mod tests;
