use regex::Regex;

/// Humanize the gap between an instant and now ("5m ago").
pub fn humanize_age(instant: chrono::DateTime<chrono::Utc>) -> String {
    let total_secs = chrono::Utc::now().signed_duration_since(instant).num_seconds();
    if total_secs < 0 {
        // Clock skew between the snapshot source and this machine
        return "just now".to_string();
    }
    if total_secs < 60 {
        format!("{}s ago", total_secs)
    } else if total_secs < 3600 {
        format!("{}m ago", total_secs / 60)
    } else if total_secs < 86400 {
        format!("{}h ago", total_secs / 3600)
    } else {
        format!("{}d ago", total_secs / 86400)
    }
}

/// Compile a case-insensitive message filter. Empty and invalid patterns
/// yield `None`, which callers treat as "no filter".
pub fn compile_filter(pattern: &str) -> Option<Regex> {
    if pattern.is_empty() {
        return None;
    }
    Regex::new(&format!("(?i){}", pattern)).ok()
}
