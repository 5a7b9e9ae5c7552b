//! Reporting aggregate tests
//!
//! Tests for the arithmetic behind the consumption and valuation reports:
//! - Date range filtering is inclusive of both boundary days
//! - Sector consumption sums keep their positive sign and ordering
//! - Stock valuation is quantity times unit price, zero stock excluded

use chrono::NaiveDate;
use proptest::prelude::*;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::str::FromStr;

use shared::types::DateRange;

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn day(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Test that both boundary days of a range are included, mirroring the
    /// BETWEEN clause of the movement range report
    #[test]
    fn test_date_range_boundaries_included() {
        let range = DateRange {
            start: day(2025, 3, 1),
            end: day(2025, 3, 31),
        };

        assert!(range.contains(day(2025, 3, 1)));
        assert!(range.contains(day(2025, 3, 31)));
        assert!(range.contains(day(2025, 3, 15)));
        assert!(!range.contains(day(2025, 2, 28)));
        assert!(!range.contains(day(2025, 4, 1)));
    }

    /// Test consumption grouping: exit quantities sum per sector with their
    /// stored positive sign, largest consumer first
    #[test]
    fn test_consumption_grouping_and_ordering() {
        let exits = [
            ("Maintenance", 10i64),
            ("Front Desk", 3),
            ("Maintenance", 25),
            ("Cleaning", 12),
        ];

        let mut totals: BTreeMap<&str, i64> = BTreeMap::new();
        for (sector, quantity) in exits {
            *totals.entry(sector).or_insert(0) += quantity;
        }

        let mut rows: Vec<(&str, i64)> = totals.into_iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1));

        assert_eq!(
            rows,
            vec![("Maintenance", 35), ("Cleaning", 12), ("Front Desk", 3)]
        );
        assert!(rows.iter().all(|(_, total)| *total > 0));
    }

    /// Test the average exit quantity calculation
    #[test]
    fn test_average_exit_quantity() {
        let quantities = [dec("10"), dec("20"), dec("15")];
        let sum: Decimal = quantities.iter().copied().sum();
        let average = sum / Decimal::from(quantities.len() as i64);

        assert_eq!(average, dec("15"));
    }

    /// Test stock valuation: quantity times unit price, summed per category
    #[test]
    fn test_valued_stock_per_category() {
        let products = [
            ("Office", 10i32, dec("2.50")),
            ("Office", 4, dec("12.00")),
            ("Cleaning", 7, dec("3.10")),
        ];

        let mut totals: BTreeMap<&str, Decimal> = BTreeMap::new();
        for (category, stock, price) in products {
            *totals.entry(category).or_insert(Decimal::ZERO) += Decimal::from(stock) * price;
        }

        assert_eq!(totals["Office"], dec("73.00"));
        assert_eq!(totals["Cleaning"], dec("21.70"));
    }

    /// Test that zero-stock products contribute nothing to valuation and
    /// are filtered before grouping
    #[test]
    fn test_valuation_excludes_zero_stock() {
        let products = [("Office", 0i32, dec("99.99")), ("Office", 2, dec("1.00"))];

        let total: Decimal = products
            .iter()
            .filter(|(_, stock, _)| *stock > 0)
            .map(|(_, stock, price)| Decimal::from(*stock) * price)
            .sum();

        assert_eq!(total, dec("2.00"));
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// Property: a date is in a range exactly when it is neither before the
    /// start nor after the end
    #[test]
    fn prop_range_membership(
        start_offset in 0u64..3650,
        length in 0u64..365,
        probe_offset in 0u64..5000,
    ) {
        let epoch = day(2020, 1, 1);
        let start = epoch + chrono::Days::new(start_offset);
        let end = start + chrono::Days::new(length);
        let probe = epoch + chrono::Days::new(probe_offset);

        let range = DateRange { start, end };
        prop_assert_eq!(range.contains(probe), probe >= start && probe <= end);
    }

    /// Property: a single-day range contains exactly that day
    #[test]
    fn prop_single_day_range(offset in 0u64..3650) {
        let date = day(2020, 1, 1) + chrono::Days::new(offset);
        let range = DateRange { start: date, end: date };

        prop_assert!(range.contains(date));
        prop_assert!(!range.contains(date + chrono::Days::new(1)));
        if let Some(previous) = date.pred_opt() {
            prop_assert!(!range.contains(previous));
        }
    }

    /// Property: grouped consumption totals preserve the grand total
    #[test]
    fn prop_grouping_preserves_total(
        exits in prop::collection::vec(("[a-d]", 1..100i64), 0..40)
    ) {
        let grand_total: i64 = exits.iter().map(|(_, q)| q).sum();

        let mut totals: BTreeMap<String, i64> = BTreeMap::new();
        for (sector, quantity) in &exits {
            *totals.entry(sector.clone()).or_insert(0) += quantity;
        }

        let grouped_total: i64 = totals.values().sum();
        prop_assert_eq!(grouped_total, grand_total);
        prop_assert!(totals.values().all(|t| *t > 0));
    }

    /// Property: valuation is additive in stock quantity
    #[test]
    fn prop_valuation_additive(a in 0..10_000i32, b in 0..10_000i32, cents in 0..100_000i64) {
        let price = Decimal::new(cents, 2);
        let combined = Decimal::from(a + b) * price;
        let separate = Decimal::from(a) * price + Decimal::from(b) * price;

        prop_assert_eq!(combined, separate);
    }
}
