//! Computes the running point balance from the full ledger.

use crate::ledger::Record;

/// Sum the signed point deltas over all records.
///
/// The balance is never cached or stored: every read recomputes it from a
/// full scan of the ledger. Returns 0 for an empty ledger.
pub fn compute_total(records: &[Record]) -> i64 {
    records.iter().map(|record| record.points).sum()
}

#[cfg(test)]
mod compute_total_tests {
    use time::macros::datetime;

    use crate::ledger::Record;

    use super::compute_total;

    #[test]
    fn empty_ledger_totals_zero() {
        assert_eq!(compute_total(&[]), 0);
    }

    #[test]
    fn total_is_sum_of_deltas() {
        let when = datetime!(2026-03-01 08:00);
        let records = vec![
            Record::income("Focused study (45 min)", 15, None, when),
            Record::income("Past paper", 50, None, when),
            Record::expense("Milk tea", 60, None, when),
            Record::income("Early check-in", 10, None, when),
        ];

        assert_eq!(compute_total(&records), 15);
    }

    #[test]
    fn total_can_go_negative() {
        // Nothing in the data model forbids a ledger that was edited by hand
        // into deficit; the sum is reported as-is.
        let when = datetime!(2026-03-01 08:00);
        let records = vec![
            Record::income("Past paper", 50, None, when),
            Record::expense("Massage voucher", 200, None, when),
        ];

        assert_eq!(compute_total(&records), -150);
    }
}
