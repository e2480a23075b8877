use std::cmp::Ordering;

use crate::team::TeamRecord;

/// League order between two records: win percentage, then points for, both descending.
pub fn compare_records(a: &TeamRecord, b: &TeamRecord) -> Ordering {
    b.win_pct()
        .total_cmp(&a.win_pct())
        .then_with(|| b.points_for.total_cmp(&a.points_for))
}

/// Final standings as team indices, first place first.
///
/// Teams still level after points for keep their input order. The records
/// themselves are left untouched.
pub fn rank_standings(records: &[TeamRecord]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..records.len()).collect();
    order.sort_by(|&a, &b| compare_records(&records[a], &records[b]));
    order
}
