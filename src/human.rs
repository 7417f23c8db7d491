//! Human-readable byte formatting.

/// Converts a byte count to a human-readable string.
///
/// Counts below 1024 render as the literal integer. Larger counts render as
/// the value divided by 1024^n with two decimal places and a `K`/`M`/`G`
/// suffix; each branch includes its upper power-of-1024 boundary, so exactly
/// 1024^2 still renders in `K`. Counts above 1024^4 fall back to the raw
/// integer.
///
/// ```
/// use tartrim::human::human_size;
///
/// assert_eq!(human_size(512), "512");
/// assert_eq!(human_size(1536), "1.50K");
/// assert_eq!(human_size(3 * 1024 * 1024), "3.00M");
/// ```
pub fn human_size(bytes: u64) -> String {
    const K: u64 = 1024;

    if bytes < K {
        bytes.to_string()
    } else if bytes <= K.pow(2) {
        format!("{:.2}K", bytes as f64 / K as f64)
    } else if bytes <= K.pow(3) {
        format!("{:.2}M", bytes as f64 / K.pow(2) as f64)
    } else if bytes <= K.pow(4) {
        format!("{:.2}G", bytes as f64 / K.pow(3) as f64)
    } else {
        bytes.to_string()
    }
}
