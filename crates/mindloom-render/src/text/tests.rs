use super::*;
use mindloom_core::LayoutConfig;

#[test]
fn short_text_stays_on_one_line() {
    assert_eq!(wrap_label("Borrowing", 22, 6), ["Borrowing"]);
}

#[test]
fn empty_text_yields_one_empty_line() {
    assert_eq!(wrap_label("   ", 22, 6), [""]);
}

#[test]
fn words_are_packed_greedily() {
    let lines = wrap_label("Update the changelog with every user-facing change", 22, 6);
    assert_eq!(
        lines,
        ["Update the changelog", "with every user-facing", "change"]
    );
    assert!(lines.iter().all(|l| l.chars().count() <= 22));
}

#[test]
fn unbroken_token_is_chunked() {
    let token = "a".repeat(40);
    let lines = wrap_label(&token, 22, 6);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].chars().count(), 22);
    assert_eq!(lines[1].chars().count(), 18);
}

#[test]
fn chunking_is_capped_at_max_lines() {
    let token = "x".repeat(500);
    let lines = wrap_label(&token, 22, 6);
    assert_eq!(lines.len(), 6);
    assert!(lines.iter().all(|l| l.chars().count() == 22));
}

#[test]
fn long_word_inside_a_sentence_flushes_and_splits() {
    let lines = wrap_label("see Pagerduty_rotation_handover_checklist now", 14, 6);
    assert_eq!(
        lines,
        ["see", "Pagerduty_rota", "tion_handover_", "checklist", "now"]
    );
}

#[test]
fn chunks_count_chars_not_bytes() {
    let text = "東京リージョンのレイテンシ調査と対策の議事録まとめ";
    let lines = wrap_label(text, 14, 6);
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[0].chars().count(), 14);
    assert_eq!(lines.concat(), text);
}

#[test]
fn overflow_words_are_truncated_silently() {
    let words: Vec<String> = (0..40).map(|i| format!("w{i}")).collect();
    let text = words.join(" ");
    let lines = wrap_label(&text, 14, 6);
    assert_eq!(lines.len(), 6);
    assert!(!lines.concat().contains("w39"));
}

#[test]
fn wrap_width_shrinks_with_depth_down_to_the_floor() {
    let cfg = LayoutConfig::default();
    assert_eq!(wrap_width_for_depth(0, &cfg), 24);
    assert_eq!(wrap_width_for_depth(2, &cfg), 22);
    assert_eq!(wrap_width_for_depth(10, &cfg), 14);
    assert_eq!(wrap_width_for_depth(100, &cfg), 14);
}

#[test]
fn measurers_estimate_widths() {
    let det = DeterministicTextMeasurer::default();
    assert_eq!(det.line_width("abcde"), 5.0 * 6.8);
    assert_eq!(det.line_width("東京"), 2.0 * 6.8);

    let wide = UnicodeWidthTextMeasurer::new(1.0);
    assert_eq!(wide.line_width("東京"), 4.0);
    assert_eq!(wide.line_width("ab"), 2.0);

    let lines = vec!["ab".to_string(), "abcd".to_string()];
    assert_eq!(
        DeterministicTextMeasurer::new(1.0).max_line_width(&lines),
        4.0
    );
}
