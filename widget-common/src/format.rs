/// Shorten a count with a K or M suffix: `1500` → `1.5K`, `2000000` → `2M`.
pub fn format_number(n: u64) -> String {
    if n >= 1_000_000 {
        with_suffix(n as f64 / 1_000_000.0, "M")
    } else if n >= 1_000 {
        with_suffix(n as f64 / 1_000.0, "K")
    } else {
        n.to_string()
    }
}

/// One decimal place, with a trailing `.0` dropped.
fn with_suffix(value: f64, suffix: &str) -> String {
    let formatted = format!("{value:.1}");
    let trimmed = formatted.strip_suffix(".0").unwrap_or(&formatted);
    format!("{trimmed}{suffix}")
}

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Human-readable size in powers of 1024: `1536` → `1.5 KB`.
pub fn format_file_size(bytes: u64) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    // Round to one decimal, then print without a trailing zero
    let rounded = (value * 10.0).round() / 10.0;
    format!("{} {}", rounded, SIZE_UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number_small() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
    }

    #[test]
    fn test_format_number_thousands() {
        assert_eq!(format_number(1_000), "1K");
        assert_eq!(format_number(1_500), "1.5K");
        assert_eq!(format_number(12_340), "12.3K");
    }

    #[test]
    fn test_format_number_millions() {
        assert_eq!(format_number(2_000_000), "2M");
        assert_eq!(format_number(3_260_000), "3.3M");
    }

    #[test]
    fn test_format_file_size() {
        assert_eq!(format_file_size(0), "0 Bytes");
        assert_eq!(format_file_size(512), "512 Bytes");
        assert_eq!(format_file_size(1024), "1 KB");
        assert_eq!(format_file_size(1536), "1.5 KB");
        assert_eq!(format_file_size(5 * 1024 * 1024), "5 MB");
    }
}
