//! Date ranges and the click reconciliation used by range pickers.
//!
//! A click in range mode goes through two steps. The calendar first
//! [`propose`]s a range by adding the clicked day to the range it was shown.
//! The picker then [`reconcile`]s that proposal against the range it has
//! stored, which decides whether the click starts a new range or completes
//! the pending one. The rules are checked in this order:
//!
//! 0. With no proposal (the calendar deselected its one-day range), the
//!    stored start is kept and the end cleared ([`Branch::Cleared`]).
//! 1. With no stored start, or a stored range that is already complete, the
//!    click starts a new range:
//!    - if the proposed end lies after the stored end, the new start is the
//!      proposed end ([`Branch::PastEnd`]);
//!    - if the proposal starts inside the stored range, the new start is the
//!      proposed end when that end lies strictly inside the stored range,
//!      and the proposed start otherwise ([`Branch::InsideRange`]);
//!    - otherwise the new start is the proposed start ([`Branch::FreshStart`]).
//! 2. With a start and no end, a complete proposal commits the range with its
//!    ends in ascending order ([`Branch::Committed`]). An incomplete one
//!    leaves the stored range alone ([`Branch::Unchanged`]).

use chrono::NaiveDate;
use std::fmt;

/// A possibly half-open range of days. Both ends are inclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: Some(to),
        }
    }

    /// A range with only its start chosen.
    pub fn starting(from: NaiveDate) -> Self {
        Self {
            from: Some(from),
            to: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn is_complete(&self) -> bool {
        self.from.is_some() && self.to.is_some()
    }

    /// Whether `day` lies within a complete range, ends included.
    pub fn contains(&self, day: NaiveDate) -> bool {
        match (self.from, self.to) {
            (Some(from), Some(to)) => from <= day && day <= to,
            _ => false,
        }
    }
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = |d: Option<NaiveDate>| d.map_or_else(|| "…".to_string(), |d| d.to_string());
        write!(f, "{} - {}", end(self.from), end(self.to))
    }
}

/// Add a clicked day to the range the calendar is showing.
///
/// Returns `None` when the click deselects the range entirely (clicking the
/// single day of a one-day range).
pub fn propose(click: NaiveDate, shown: Option<&DateRange>) -> Option<DateRange> {
    let (from, to) = shown.map_or((None, None), |r| (r.from, r.to));
    match (from, to) {
        (Some(from), None) => {
            if click < from {
                Some(DateRange::new(click, from))
            } else {
                Some(DateRange::new(from, click))
            }
        }
        (Some(from), Some(to)) => {
            if click == from && click == to {
                None
            } else if click == from {
                Some(DateRange::new(from, click))
            } else if click == to || click < from {
                Some(DateRange::new(click, to))
            } else {
                Some(DateRange::new(from, click))
            }
        }
        // Nothing shown, or an end without a start.
        (None, _) => Some(DateRange::new(click, click)),
    }
}

/// Which reconciliation rule applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Branch {
    /// No proposal; the stored start is kept and the end dropped.
    Cleared,
    /// The proposed end lies past the stored end.
    PastEnd,
    /// The proposal starts inside the stored range.
    InsideRange,
    /// A new range starting at the proposed start.
    FreshStart,
    /// The second click of a pending range.
    Committed,
    /// A second click with an incomplete proposal; nothing changes.
    Unchanged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Reconciled {
    pub branch: Branch,
    /// The range to store and report, `None` for [`Branch::Unchanged`].
    pub range: Option<DateRange>,
}

impl Reconciled {
    fn new(branch: Branch, range: DateRange) -> Self {
        tracing::debug!(?branch, %range, "range reconciled");
        Self {
            branch,
            range: Some(range),
        }
    }
}

/// Reconcile a proposed range against the stored one.
pub fn reconcile(stored: Option<&DateRange>, proposed: Option<DateRange>) -> Reconciled {
    let stored = stored.copied().unwrap_or_default();
    let Some(proposed) = proposed else {
        return Reconciled::new(
            Branch::Cleared,
            DateRange {
                from: stored.from,
                to: None,
            },
        );
    };

    if stored.from.is_none() || stored.is_complete() {
        if let (Some(proposed_to), Some(stored_to)) = (proposed.to, stored.to) {
            if stored_to < proposed_to {
                return Reconciled::new(Branch::PastEnd, DateRange { from: Some(proposed_to), to: None });
            }
        }
        if let (Some(from), Some(to), Some(click)) = (stored.from, stored.to, proposed.from) {
            if from <= click && click <= to {
                let partially_outside = proposed.to.is_some_and(|p| from < p && p < to);
                let start = if partially_outside { proposed.to } else { proposed.from };
                return Reconciled::new(Branch::InsideRange, DateRange { from: start, to: None });
            }
        }
        return Reconciled::new(
            Branch::FreshStart,
            DateRange {
                from: proposed.from,
                to: None,
            },
        );
    }

    match (proposed.from, proposed.to) {
        (Some(a), Some(b)) => Reconciled::new(Branch::Committed, DateRange::new(a.min(b), a.max(b))),
        _ => {
            tracing::debug!("incomplete proposal on second click");
            Reconciled {
                branch: Branch::Unchanged,
                range: None,
            }
        }
    }
}

/// Apply a click to the stored range: [`propose`] then [`reconcile`].
pub fn click(stored: Option<&DateRange>, day: NaiveDate) -> Reconciled {
    reconcile(stored, propose(day, stored))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, day).unwrap()
    }

    #[test]
    fn first_click_starts_range() {
        let r = click(None, d(10));
        assert_eq!(r.branch, Branch::FreshStart);
        assert_eq!(r.range, Some(DateRange::starting(d(10))));
    }

    #[test]
    fn second_click_commits_in_order() {
        let start = DateRange::starting(d(10));
        let r = click(Some(&start), d(14));
        assert_eq!(r.branch, Branch::Committed);
        assert_eq!(r.range, Some(DateRange::new(d(10), d(14))));

        let r = click(Some(&start), d(3));
        assert_eq!(r.branch, Branch::Committed);
        assert_eq!(r.range, Some(DateRange::new(d(3), d(10))));
    }

    #[test]
    fn same_day_twice_commits_one_day_range() {
        let start = DateRange::starting(d(10));
        let r = click(Some(&start), d(10));
        assert_eq!(r.range, Some(DateRange::new(d(10), d(10))));
    }

    #[test]
    fn click_after_range_restarts_past_end() {
        let stored = DateRange::new(d(5), d(10));
        let r = click(Some(&stored), d(20));
        assert_eq!(r.branch, Branch::PastEnd);
        assert_eq!(r.range, Some(DateRange::starting(d(20))));
    }

    #[test]
    fn click_inside_range_restarts_at_click() {
        let stored = DateRange::new(d(5), d(10));
        let r = click(Some(&stored), d(7));
        assert_eq!(r.branch, Branch::InsideRange);
        assert_eq!(r.range, Some(DateRange::starting(d(7))));

        let r = click(Some(&stored), d(5));
        assert_eq!(r.branch, Branch::InsideRange);
        assert_eq!(r.range, Some(DateRange::starting(d(5))));

        let r = click(Some(&stored), d(10));
        assert_eq!(r.branch, Branch::InsideRange);
        assert_eq!(r.range, Some(DateRange::starting(d(10))));
    }

    #[test]
    fn click_before_range_restarts_fresh() {
        let stored = DateRange::new(d(5), d(10));
        let r = click(Some(&stored), d(2));
        assert_eq!(r.branch, Branch::FreshStart);
        assert_eq!(r.range, Some(DateRange::starting(d(2))));
    }

    #[test]
    fn deselecting_one_day_range_keeps_start() {
        let stored = DateRange::new(d(5), d(5));
        let r = click(Some(&stored), d(5));
        assert_eq!(r.branch, Branch::Cleared);
        assert_eq!(r.range, Some(DateRange::starting(d(5))));
    }

    #[test]
    fn incomplete_second_proposal_changes_nothing() {
        let start = DateRange::starting(d(5));
        let r = reconcile(Some(&start), Some(DateRange::starting(d(9))));
        assert_eq!(r.branch, Branch::Unchanged);
        assert_eq!(r.range, None);
    }

    #[test]
    fn contains_is_inclusive() {
        let r = DateRange::new(d(5), d(10));
        assert!(r.contains(d(5)) && r.contains(d(10)));
        assert!(!r.contains(d(11)));
        assert!(!DateRange::starting(d(5)).contains(d(5)));
    }

    fn day() -> impl Strategy<Value = NaiveDate> {
        (0i64..3650).prop_map(|n| d(1) + chrono::Duration::days(n))
    }

    proptest! {
        #[test]
        fn two_clicks_give_ascending_range(a in day(), b in day()) {
            let first = click(None, a).range.unwrap();
            let second = click(Some(&first), b).range.unwrap();
            prop_assert_eq!(second, DateRange::new(a.min(b), a.max(b)));
        }

        #[test]
        fn third_click_starts_fresh(a in day(), b in day(), c in day()) {
            let first = click(None, a).range.unwrap();
            let second = click(Some(&first), b).range.unwrap();
            let third = click(Some(&second), c);
            prop_assert_eq!(third.range, Some(DateRange::starting(c)));
        }
    }
}
