//! Attachment name and payload normalisation

/// Reduce a user file name to a safe attachment stem.
///
/// The extension is dropped, every run of characters outside
/// `[A-Za-z0-9_-]` becomes a single `_`, and `_`/`-` are trimmed from both
/// ends. Returns `None` when nothing is left.
pub fn sanitize_file_name(raw: &str) -> Option<String> {
    let stem = match raw.rfind('.') {
        Some(dot) if dot > 0 => &raw[..dot],
        _ => raw,
    };

    let mut cleaned = String::with_capacity(stem.len());
    let mut in_run = false;
    for ch in stem.chars() {
        if ch.is_ascii_alphanumeric() || ch == '_' || ch == '-' {
            cleaned.push(ch);
            in_run = false;
        } else if !in_run {
            cleaned.push('_');
            in_run = true;
        }
    }

    let trimmed = cleaned.trim_matches(|c| c == '_' || c == '-');
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Data portion of a base64 payload, with any `data:<mime>;base64,` prefix removed.
///
/// Returns `None` for a data URI with no data section.
pub fn strip_data_uri(payload: &str) -> Option<&str> {
    if !payload.starts_with("data:") {
        return Some(payload);
    }
    payload.split_once(',').map(|(_, data)| data)
}

/// Extension used for an attachment of the given MIME type
pub fn mime_subtype(mime_type: &str) -> &str {
    mime_type
        .split_once('/')
        .map(|(_, subtype)| subtype)
        .unwrap_or(mime_type)
}
