use chrono::{Duration, NaiveDate};
use std::fmt;
use std::str::FromStr;

use crate::calendar::{MonthBounds, MonthCursor};
use crate::error::{Error, ErrorKind};
use crate::period::Selection;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PredefinedOption {
    Today,
    Yesterday,
    Last7Days,
    Last30Days,
    ThisMonth,
    LastMonth,
    Overall,
}

impl PredefinedOption {
    /// Display order in the sidebar.
    pub const ALL: [PredefinedOption; 7] = [
        PredefinedOption::Today,
        PredefinedOption::Yesterday,
        PredefinedOption::Last7Days,
        PredefinedOption::Last30Days,
        PredefinedOption::ThisMonth,
        PredefinedOption::LastMonth,
        PredefinedOption::Overall,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            PredefinedOption::Today => "today",
            PredefinedOption::Yesterday => "yesterday",
            PredefinedOption::Last7Days => "last7days",
            PredefinedOption::Last30Days => "last30days",
            PredefinedOption::ThisMonth => "thisMonth",
            PredefinedOption::LastMonth => "lastMonth",
            PredefinedOption::Overall => "overall",
        }
    }

    /// Untranslated label.
    pub fn label(&self) -> &'static str {
        match self {
            PredefinedOption::Today => "Today",
            PredefinedOption::Yesterday => "Yesterday",
            PredefinedOption::Last7Days => "Last 7 days",
            PredefinedOption::Last30Days => "Last 30 days",
            PredefinedOption::ThisMonth => "This month",
            PredefinedOption::LastMonth => "Last month",
            PredefinedOption::Overall => "Overall",
        }
    }
}

impl fmt::Display for PredefinedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PredefinedOption {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PredefinedOption::ALL
            .iter()
            .find(|opt| opt.name().eq_ignore_ascii_case(s))
            .copied()
            .ok_or_else(|| Error::new(ErrorKind::ConfigParse, &format!("unknown option '{}'", s)))
    }
}

/// Values of the predefined options, fixed when the dropdown is created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PredefinedOptions {
    values: Vec<(PredefinedOption, Selection)>,
}

impl PredefinedOptions {
    /// `overall` is only offered when a lower bound is known; it then runs
    /// up to the upper bound or today, whichever comes first.
    pub fn new(
        today: NaiveDate,
        overall_from: Option<NaiveDate>,
        overall_to: Option<NaiveDate>,
    ) -> Self {
        let this_month = MonthBounds::containing(&today);
        let last_month = MonthBounds::of(MonthCursor::from(today).prev());

        let mut values = vec![
            (PredefinedOption::Today, Selection::Single(today)),
            (
                PredefinedOption::Yesterday,
                Selection::Single(today - Duration::days(1)),
            ),
            (
                PredefinedOption::Last7Days,
                Selection::range(today - Duration::days(6), today),
            ),
            (
                PredefinedOption::Last30Days,
                Selection::range(today - Duration::days(29), today),
            ),
            (
                PredefinedOption::ThisMonth,
                Selection::range(this_month.start(), today),
            ),
            (
                PredefinedOption::LastMonth,
                Selection::range(last_month.start(), last_month.end()),
            ),
        ];

        if let Some(from) = overall_from {
            let to = overall_to.map_or(today, |to| to.min(today));
            values.push((PredefinedOption::Overall, Selection::range(from, to)));
        }

        PredefinedOptions { values }
    }

    pub fn get(&self, option: PredefinedOption) -> Option<Selection> {
        self.values
            .iter()
            .find(|(opt, _)| *opt == option)
            .map(|(_, value)| *value)
    }

    pub fn contains(&self, option: PredefinedOption) -> bool {
        self.get(option).is_some()
    }

    /// Available options in display order.
    pub fn iter(&self) -> impl Iterator<Item = &(PredefinedOption, Selection)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn values_relative_to_today() {
        let opts = PredefinedOptions::new(date(2024, 3, 15), None, None);

        assert_eq!(opts.get(PredefinedOption::Today), Some(Selection::Single(date(2024, 3, 15))));
        assert_eq!(
            opts.get(PredefinedOption::Yesterday),
            Some(Selection::Single(date(2024, 3, 14)))
        );
        assert_eq!(
            opts.get(PredefinedOption::Last7Days),
            Some(Selection::range(date(2024, 3, 9), date(2024, 3, 15)))
        );
        assert_eq!(
            opts.get(PredefinedOption::Last30Days),
            Some(Selection::range(date(2024, 2, 15), date(2024, 3, 15)))
        );
        assert_eq!(
            opts.get(PredefinedOption::ThisMonth),
            Some(Selection::range(date(2024, 3, 1), date(2024, 3, 15)))
        );
        assert_eq!(
            opts.get(PredefinedOption::LastMonth),
            Some(Selection::range(date(2024, 2, 1), date(2024, 2, 29)))
        );
    }

    #[test]
    fn last_month_in_january_is_december() {
        let opts = PredefinedOptions::new(date(2024, 1, 3), None, None);
        assert_eq!(
            opts.get(PredefinedOption::LastMonth),
            Some(Selection::range(date(2023, 12, 1), date(2023, 12, 31)))
        );
    }

    #[test]
    fn overall_needs_lower_bound() {
        let opts = PredefinedOptions::new(date(2024, 3, 15), None, Some(date(2024, 3, 1)));
        assert!(!opts.contains(PredefinedOption::Overall));
        assert_eq!(opts.len(), 6);
    }

    #[test]
    fn overall_is_capped_at_today() {
        let today = date(2024, 3, 15);
        let opts = PredefinedOptions::new(today, Some(date(2023, 1, 1)), Some(date(2025, 1, 1)));
        assert_eq!(
            opts.get(PredefinedOption::Overall),
            Some(Selection::range(date(2023, 1, 1), today))
        );

        let opts = PredefinedOptions::new(today, Some(date(2023, 1, 1)), Some(date(2023, 6, 30)));
        assert_eq!(
            opts.get(PredefinedOption::Overall),
            Some(Selection::range(date(2023, 1, 1), date(2023, 6, 30)))
        );

        let opts = PredefinedOptions::new(today, Some(date(2023, 1, 1)), None);
        assert_eq!(
            opts.get(PredefinedOption::Overall),
            Some(Selection::range(date(2023, 1, 1), today))
        );
    }

    #[test]
    fn names_round_trip() {
        assert_eq!("last7days".parse::<PredefinedOption>().unwrap(), PredefinedOption::Last7Days);
        assert!("fortnight".parse::<PredefinedOption>().is_err());
    }
}
