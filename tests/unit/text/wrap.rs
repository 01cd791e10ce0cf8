use super::*;

const CAPTION: &str = "1 & 2 BHK Luxury Apartments at just Rs.34.97 Lakhs";

#[test]
fn short_text_is_one_line() {
    assert_eq!(wrap_lines("Shop Now", 31), vec!["Shop Now".to_owned()]);
}

#[test]
fn empty_text_yields_one_empty_line() {
    for n in [1, 5, 31, 1000] {
        assert_eq!(wrap_lines("", n), vec![String::new()]);
    }
    assert_eq!(wrap_lines("   \t ", 10), vec![String::new()]);
}

#[test]
fn default_caption_wraps_at_31_chars() {
    let lines = wrap_lines(CAPTION, 31);
    assert_eq!(
        lines,
        vec![
            "1 & 2 BHK Luxury Apartments at".to_owned(),
            "just Rs.34.97 Lakhs".to_owned(),
        ]
    );
    for line in &lines {
        assert!(line.chars().count() <= 31, "{line:?}");
    }
}

#[test]
fn wrapping_preserves_word_sequence() {
    for limit in [1, 3, 7, 12, 31, 80] {
        let lines = wrap_lines(CAPTION, limit);
        let rejoined: Vec<&str> = lines.iter().flat_map(|l| l.split_whitespace()).collect();
        let original: Vec<&str> = CAPTION.split_whitespace().collect();
        assert_eq!(rejoined, original, "limit {limit}");
        for line in &lines {
            let n = line.chars().count();
            assert!(
                n <= limit || !line.contains(' '),
                "limit {limit}: {line:?} exceeds the limit with more than one word"
            );
        }
    }
}

#[test]
fn overlong_first_word_is_preceded_by_an_empty_line() {
    let lines = wrap_lines("Supercalifragilistic is long", 8);
    assert_eq!(
        lines,
        vec![
            String::new(),
            "Supercalifragilistic".to_owned(),
            "is long".to_owned(),
        ]
    );
}

#[test]
fn overlong_word_after_other_words_gets_its_own_line() {
    let lines = wrap_lines("go Supercalifragilistic now", 8);
    assert_eq!(
        lines,
        vec![
            "go".to_owned(),
            "Supercalifragilistic".to_owned(),
            "now".to_owned(),
        ]
    );
}

#[test]
fn counts_characters_not_bytes() {
    // Each word is 5 chars but 10 bytes.
    let lines = wrap_lines("ééééé ààààà", 11);
    assert_eq!(lines, vec!["ééééé ààààà".to_owned()]);
}

#[test]
fn repeated_separators_collapse() {
    assert_eq!(wrap_lines("a   b\n c", 80), vec!["a b c".to_owned()]);
}
