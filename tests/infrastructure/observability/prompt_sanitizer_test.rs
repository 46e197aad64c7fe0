use digitize::infrastructure::observability::sanitize_prompt;

#[test]
fn given_blank_prompt_when_sanitizing_then_returns_empty_marker() {
    assert_eq!(sanitize_prompt("   "), "[EMPTY]");
}

#[test]
fn given_long_prompt_when_sanitizing_then_truncates_with_total() {
    let prompt = "a".repeat(150);

    let sanitized = sanitize_prompt(&prompt);

    assert_eq!(sanitized, format!("{}... (150 chars total)", "a".repeat(100)));
}

#[test]
fn given_personal_data_when_sanitizing_then_masks_it() {
    let sanitized =
        sanitize_prompt("Extract fields for jane.doe@example.com account 12345678 token=abc123");

    assert_eq!(
        sanitized,
        "Extract fields for [EMAIL] account [NUMBER] token=[REDACTED]"
    );
}
