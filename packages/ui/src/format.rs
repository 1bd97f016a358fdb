//! Display formatting for money, percentages, and timestamps.

/// `1250000.5` → `"$1,250,000.50"`. Whole amounts drop the cents.
pub fn money(value: f64) -> String {
    let negative = value < 0.0;
    let total_cents = (value.abs() * 100.0).round() as u64;
    let whole = total_cents / 100;
    let cents = total_cents % 100;

    let mut grouped = String::new();
    let digits = whole.to_string();
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    if cents == 0 {
        format!("{sign}${grouped}")
    } else {
        format!("{sign}${grouped}.{cents:02}")
    }
}

/// `12.5` → `"12.5%"`, trimming a trailing `.0`.
pub fn percent(value: f64) -> String {
    let text = format!("{value:.1}");
    let text = text.strip_suffix(".0").unwrap_or(&text);
    format!("{text}%")
}

/// Keeps the date part of an ISO timestamp; anything else passes through.
pub fn short_date(timestamp: &str) -> &str {
    timestamp.split('T').next().unwrap_or(timestamp)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn money_groups_thousands() {
        assert_eq!(money(0.0), "$0");
        assert_eq!(money(950.0), "$950");
        assert_eq!(money(1250.0), "$1,250");
        assert_eq!(money(1_250_000.5), "$1,250,000.50");
        assert_eq!(money(-50_000.0), "-$50,000");
    }

    #[test]
    fn percent_trims_whole_numbers() {
        assert_eq!(percent(12.0), "12%");
        assert_eq!(percent(12.5), "12.5%");
        assert_eq!(percent(0.0), "0%");
    }

    #[test]
    fn short_date_strips_time() {
        assert_eq!(short_date("2025-03-14T09:26:53Z"), "2025-03-14");
        assert_eq!(short_date("yesterday"), "yesterday");
    }
}
