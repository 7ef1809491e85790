//! Amount and duration formatting for progress lines
//!
//! Ready-made amount formatters (binary byte sizes, bare counts,
//! unit-suffixed counts) plus the fixed duration rendering used for
//! remaining-time and elapsed-time suffixes.

use humansize::{format_size, BINARY};

/// Render a byte amount with binary units (KiB, MiB, ...)
pub fn binary_size(amount: u64) -> String {
    format_size(amount, BINARY)
}

/// Render an amount as a bare integer
pub fn plain(amount: u64) -> String {
    amount.to_string()
}

/// Build a formatter that appends a fixed unit suffix
///
/// # Example
/// ```
/// use meterline::format::with_unit;
/// let pages = with_unit("pages");
/// assert_eq!(pages(3), "3 pages");
/// ```
pub fn with_unit(unit: impl Into<String>) -> impl Fn(u64) -> String + Send + Sync {
    let unit = unit.into();
    move |amount| format!("{} {}", amount, unit)
}

/// Render whole seconds as exactly one descending unit pair
///
/// Picks days+hours at one day or more, hours+minutes at one hour or more,
/// minutes+seconds at one minute or more, and bare seconds below that.
pub fn duration_str(secs: u64) -> String {
    let days = secs / 86_400;
    let hours = (secs % 86_400) / 3_600;
    let minutes = (secs % 3_600) / 60;
    let seconds = secs % 60;

    if days > 0 {
        format!("{}d {}h", days, hours)
    } else if hours > 0 {
        format!("{}h {}m", hours, minutes)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_bucket_boundaries() {
        assert_eq!(duration_str(0), "0s");
        assert_eq!(duration_str(59), "59s");
        assert_eq!(duration_str(60), "1m 0s");
        assert_eq!(duration_str(61), "1m 1s");
        assert_eq!(duration_str(3_599), "59m 59s");
        assert_eq!(duration_str(3_600), "1h 0m");
        assert_eq!(duration_str(86_399), "23h 59m");
        assert_eq!(duration_str(86_400), "1d 0h");
        assert_eq!(duration_str(93_600), "1d 2h");
    }

    #[test]
    fn test_binary_size() {
        assert_eq!(binary_size(0), "0 B");
        assert_eq!(binary_size(1024), "1 KiB");
        assert_eq!(binary_size(1024 * 1024), "1 MiB");
        assert!(binary_size(1536).contains("KiB"));
    }

    #[test]
    fn test_plain() {
        assert_eq!(plain(0), "0");
        assert_eq!(plain(48_954_879), "48954879");
    }

    #[test]
    fn test_with_unit() {
        let pages = with_unit("pages");
        assert_eq!(pages(0), "0 pages");
        assert_eq!(pages(12), "12 pages");
    }
}
