const MAX_VISIBLE_CHARS: usize = 50;

const SENSITIVE_PATTERNS: [&str; 5] = ["Bearer ", "api_key=", "password=", "secret=", "token="];

/// Shortens user-supplied text for log lines and masks credential-like values.
pub fn sanitize_text(text: &str) -> String {
    let trimmed = text.trim();

    if trimmed.is_empty() {
        return String::from("[EMPTY]");
    }

    let total = trimmed.chars().count();
    let visible = if total > MAX_VISIBLE_CHARS {
        let head: String = trimmed.chars().take(MAX_VISIBLE_CHARS).collect();
        format!("{}... ({} chars total)", head, total)
    } else {
        trimmed.to_string()
    };

    SENSITIVE_PATTERNS
        .iter()
        .fold(visible, |acc, pattern| redact_after(&acc, pattern))
}

fn redact_after(text: &str, pattern: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(idx) = rest.find(pattern) {
        let value_start = idx + pattern.len();
        let value_end = rest[value_start..]
            .find(|c: char| c.is_whitespace() || matches!(c, '&' | '"' | '\''))
            .map(|i| value_start + i)
            .unwrap_or(rest.len());

        out.push_str(&rest[..value_start]);
        out.push_str("[REDACTED]");
        rest = &rest[value_end..];
    }

    out.push_str(rest);
    out
}
