

#[inline]
pub fn safe_truncate(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}


#[inline]
pub fn safe_truncate_ellipsis(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        format!("{}...", s.chars().take(max_chars).collect::<String>())
    } else {
        s.to_string()
    }
}

/// Masks a credential for log output, keeping only the first few characters.
pub fn redact(secret: &str) -> String {
    if secret.is_empty() {
        return String::new();
    }
    format!("{}***", safe_truncate(secret, 4))
}
