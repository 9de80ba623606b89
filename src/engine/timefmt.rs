/// Format milliseconds as `M:SS.s` (minutes unpadded, seconds zero padded
/// to two digits with one decimal).
pub fn format_clock(ms: f64) -> String {
    let tenths = (ms.max(0.0) / 100.0).round() as u64;
    let minutes = tenths / 600;
    let rem = tenths % 600;
    format!("{}:{:02}.{}", minutes, rem / 10, rem % 10)
}

/// Seconds with at least one decimal: `5000` -> `5.0`, `2500` -> `2.5`.
pub fn seconds_text(ms: u64) -> String {
    if ms % 1000 == 0 {
        return format!("{}.0", ms / 1000);
    }
    let text = format!("{:.3}", ms as f64 / 1000.0);
    text.trim_end_matches('0').to_string()
}
