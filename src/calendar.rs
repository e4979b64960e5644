use std::collections::BTreeSet;

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::engine::AvailabilityError;

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DayMark {
    Past,
    Booked,
    Selected,
    InRange,
    Open,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DayCell {
    pub date: NaiveDate,
    pub mark: DayMark,
}

impl DayCell {
    pub fn is_selectable(&self) -> bool {
        !matches!(self.mark, DayMark::Past | DayMark::Booked)
    }
}

/// Check-in/check-out currently picked in the widget.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Selection {
    pub check_in: Option<NaiveDate>,
    pub check_out: Option<NaiveDate>,
}

impl Selection {
    fn marks(&self, day: NaiveDate) -> Option<DayMark> {
        if self.check_in == Some(day) || self.check_out == Some(day) {
            return Some(DayMark::Selected);
        }
        match (self.check_in, self.check_out) {
            (Some(start), Some(end)) if start < day && day < end => Some(DayMark::InRange),
            _ => None,
        }
    }
}

/// One month of a Sunday-first calendar grid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthView {
    pub year: i32,
    pub month: u32,
    /// Empty cells before day 1.
    pub leading_blanks: u32,
    pub days: Vec<DayCell>,
}

impl MonthView {
    pub fn build(
        year: i32,
        month: u32,
        booked: &BTreeSet<NaiveDate>,
        selection: &Selection,
        today: NaiveDate,
    ) -> Result<Self, AvailabilityError> {
        let first = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or(AvailabilityError::InvalidMonth { year, month })?;

        let days = first
            .iter_days()
            .take_while(|d| d.month() == month)
            .map(|date| {
                let mark = if date < today {
                    DayMark::Past
                } else if booked.contains(&date) {
                    DayMark::Booked
                } else {
                    selection.marks(date).unwrap_or(DayMark::Open)
                };
                DayCell { date, mark }
            })
            .collect();

        Ok(Self {
            year,
            month,
            leading_blanks: first.weekday().num_days_from_sunday(),
            days,
        })
    }

    pub fn title(&self) -> String {
        let name = (self.month as usize)
            .checked_sub(1)
            .and_then(|i| MONTH_NAMES.get(i))
            .copied()
            .unwrap_or("Unknown month");
        format!("{name} {}", self.year)
    }

    pub fn count(&self, mark: DayMark) -> usize {
        self.days.iter().filter(|c| c.mark == mark).count()
    }
}

/// Parse `YYYY-MM`.
pub fn parse_month(raw: &str) -> Result<(i32, u32), AvailabilityError> {
    let malformed = || AvailabilityError::MalformedDate {
        value: raw.to_string(),
    };
    let (y, m) = raw.trim().split_once('-').ok_or_else(malformed)?;
    let year: i32 = y.parse().map_err(|_| malformed())?;
    let month: u32 = m.parse().map_err(|_| malformed())?;
    if !(1..=12).contains(&month) {
        return Err(AvailabilityError::InvalidMonth { year, month });
    }
    Ok((year, month))
}

/// `None` when the year would leave the `i32` range.
pub fn next_month(year: i32, month: u32) -> Option<(i32, u32)> {
    if month >= 12 {
        year.checked_add(1).map(|y| (y, 1))
    } else {
        Some((year, month + 1))
    }
}

pub fn prev_month(year: i32, month: u32) -> Option<(i32, u32)> {
    if month <= 1 {
        year.checked_sub(1).map(|y| (y, 12))
    } else {
        Some((year, month - 1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::day::parse_day;

    fn d(s: &str) -> NaiveDate {
        parse_day(s).unwrap()
    }

    fn mark_of(view: &MonthView, day: &str) -> DayMark {
        view.days.iter().find(|c| c.date == d(day)).unwrap().mark
    }

    #[test]
    fn february_leap_year_grid() {
        let view =
            MonthView::build(2024, 2, &BTreeSet::new(), &Selection::default(), d("2024-01-01"))
                .unwrap();
        assert_eq!(view.days.len(), 29);
        // 2024-02-01 is a Thursday.
        assert_eq!(view.leading_blanks, 4);
        assert_eq!(view.title(), "February 2024");
        assert_eq!(view.count(DayMark::Open), 29);
    }

    #[test]
    fn mark_precedence() {
        let booked: BTreeSet<_> = [d("2024-03-10"), d("2024-03-12")].into_iter().collect();
        let selection = Selection {
            check_in: Some(d("2024-03-08")),
            check_out: Some(d("2024-03-12")),
        };
        let view = MonthView::build(2024, 3, &booked, &selection, d("2024-03-09")).unwrap();

        assert_eq!(mark_of(&view, "2024-03-08"), DayMark::Past);
        assert_eq!(mark_of(&view, "2024-03-09"), DayMark::InRange);
        assert_eq!(mark_of(&view, "2024-03-10"), DayMark::Booked);
        assert_eq!(mark_of(&view, "2024-03-11"), DayMark::InRange);
        assert_eq!(mark_of(&view, "2024-03-12"), DayMark::Booked);
        assert_eq!(mark_of(&view, "2024-03-13"), DayMark::Open);
        assert_eq!(view.count(DayMark::Past), 8);
    }

    #[test]
    fn selected_ends_without_range() {
        let selection = Selection {
            check_in: Some(d("2024-03-20")),
            check_out: None,
        };
        let view =
            MonthView::build(2024, 3, &BTreeSet::new(), &selection, d("2024-03-01")).unwrap();
        assert_eq!(mark_of(&view, "2024-03-20"), DayMark::Selected);
        assert_eq!(view.count(DayMark::InRange), 0);
    }

    #[test]
    fn selectability() {
        let booked: BTreeSet<_> = [d("2024-03-15")].into_iter().collect();
        let view =
            MonthView::build(2024, 3, &booked, &Selection::default(), d("2024-03-10")).unwrap();
        let selectable: Vec<_> = view.days.iter().filter(|c| c.is_selectable()).collect();
        assert_eq!(selectable.len(), 31 - 9 - 1);
    }

    #[test]
    fn invalid_month_rejected() {
        assert_eq!(
            MonthView::build(2024, 13, &BTreeSet::new(), &Selection::default(), d("2024-01-01")),
            Err(AvailabilityError::InvalidMonth { year: 2024, month: 13 })
        );
        assert!(parse_month("2024-00").is_err());
        assert!(parse_month("March").is_err());
        assert_eq!(parse_month("2024-03"), Ok((2024, 3)));
    }

    #[test]
    fn month_navigation_rolls_over() {
        assert_eq!(next_month(2024, 12), Some((2025, 1)));
        assert_eq!(prev_month(2024, 1), Some((2023, 12)));
        assert_eq!(next_month(2024, 2), Some((2024, 3)));
    }

    #[test]
    fn month_navigation_stops_at_year_limits() {
        assert_eq!(next_month(i32::MAX, 12), None);
        assert_eq!(prev_month(i32::MIN, 1), None);
        assert_eq!(next_month(i32::MAX, 11), Some((i32::MAX, 12)));
    }

    #[test]
    fn title_of_hand_built_view_never_panics() {
        let mut view = MonthView {
            year: 2024,
            month: 0,
            leading_blanks: 0,
            days: Vec::new(),
        };
        assert_eq!(view.title(), "Unknown month 2024");
        view.month = 13;
        assert_eq!(view.title(), "Unknown month 2024");
        view.month = 12;
        assert_eq!(view.title(), "December 2024");
    }
}
