//! Presentation helpers handed to the view.
//!
//! The engine only deals in whole amounts; turning them into text is done
//! here, behind [`CurrencyFormatter`], so a view can swap in its own locale.

use chrono::NaiveDate;

use crate::pricing::{Amount, BookingType};

pub trait CurrencyFormatter {
    fn format(&self, amount: Amount) -> String;
}

/// Rupees with Indian digit grouping: `₹1,23,456`
#[derive(Debug, Clone, Copy, Default)]
pub struct RupeeFormatter;

impl CurrencyFormatter for RupeeFormatter {
    fn format(&self, amount: Amount) -> String {
        let sign = if amount < 0 { "-" } else { "" };
        format!("{}₹{}", sign, group_indian(amount.unsigned_abs()))
    }
}

/// Last three digits, then pairs.
fn group_indian(value: u64) -> String {
    let digits = value.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}

pub fn booking_type_label(booking_type: BookingType) -> &'static str {
    match booking_type {
        BookingType::Match => "Match Booking",
        BookingType::Nets => "Net Practice",
    }
}

/// `Fri, 16 Oct 2026`
pub fn format_summary_date(date: NaiveDate) -> String {
    date.format("%a, %-d %b %Y").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rupee_grouping() {
        let fmt = RupeeFormatter;
        assert_eq!(fmt.format(0), "₹0");
        assert_eq!(fmt.format(944), "₹944");
        assert_eq!(fmt.format(7434), "₹7,434");
        assert_eq!(fmt.format(12_345), "₹12,345");
        assert_eq!(fmt.format(123_456), "₹1,23,456");
        assert_eq!(fmt.format(12_345_678), "₹1,23,45,678");
        assert_eq!(fmt.format(-2500), "-₹2,500");
    }

    #[test]
    fn test_labels() {
        assert_eq!(booking_type_label(BookingType::Match), "Match Booking");
        assert_eq!(booking_type_label(BookingType::Nets), "Net Practice");
    }

    #[test]
    fn test_summary_date() {
        let date = NaiveDate::from_ymd_opt(2026, 10, 16).unwrap();
        assert_eq!(format_summary_date(date), "Fri, 16 Oct 2026");
        let date = NaiveDate::from_ymd_opt(2026, 11, 2).unwrap();
        assert_eq!(format_summary_date(date), "Mon, 2 Nov 2026");
    }
}
