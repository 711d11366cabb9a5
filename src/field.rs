//! The period picker as a form field: a toggle showing the current period
//! and the dropdown, talking `YYYY-MM-DD` strings to the outside.

use chrono::NaiveDate;
use std::time::Duration;
use toml::value::Table;

use crate::config::{Config, Translator};
use crate::dropdown::{Dropdown, DropdownEvent, PredefinedOption};
use crate::locale::Locale;
use crate::period::{parse_date, Selection};
use crate::props;

/// Keys consumed by the field itself, everything else goes to the toggle.
pub const OWN_KEYS: [&str; 7] = [
    "from",
    "to",
    "placeholder",
    "min_from",
    "max_to",
    "locale",
    "translations",
];

#[derive(Debug, Clone, PartialEq)]
pub struct FieldProps {
    pub placeholder: String,
    pub locale: String,
    /// Lower bound of the "overall" option.
    pub min_from: Option<String>,
    /// Upper bound of the "overall" option.
    pub max_to: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
    pub translator: Translator,
    pub dropdown: Table,
}

impl From<&Config> for FieldProps {
    fn from(config: &Config) -> Self {
        FieldProps {
            placeholder: config.placeholder.clone(),
            locale: config.locale.clone(),
            min_from: config.min_from.clone(),
            max_to: config.max_to.clone(),
            from: config.from.clone(),
            to: config.to.clone(),
            translator: config.translations.clone(),
            dropdown: config.dropdown.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldEvent {
    Change { from: String, to: String },
}

/// Selection described by an external `from`/`to` pair.
///
/// Only a complete pair selects something. Strings that do not parse are
/// treated as no selection.
pub fn compose_value(from: Option<&str>, to: Option<&str>) -> Selection {
    Selection::from_strings(from, to).unwrap_or_else(|e| {
        log::warn!("ignoring period {:?} - {:?}: {}", from, to, e);
        Selection::Empty
    })
}

fn bound(value: &Option<String>) -> Option<NaiveDate> {
    let value = value.as_deref()?;
    match parse_date(value) {
        Ok(date) => Some(date),
        Err(e) => {
            log::warn!("ignoring bound '{}': {}", value, e);
            None
        }
    }
}

pub struct PeriodField {
    props: FieldProps,
    locale: &'static Locale,
    value: Selection,
    open: bool,
    dropdown: Dropdown,
}

impl PeriodField {
    pub fn new(props: FieldProps, today: NaiveDate, hover_delay: Duration) -> Self {
        let locale = Locale::for_tag(&props.locale);
        let value = compose_value(props.from.as_deref(), props.to.as_deref());

        let dropdown = Dropdown::new(
            value,
            locale,
            today,
            bound(&props.min_from),
            bound(&props.max_to),
            hover_delay,
        );

        PeriodField {
            props,
            locale,
            value,
            open: false,
            dropdown,
        }
    }

    /// Recomputes the value if `from`, `to` or the locale changed.
    pub fn set_props(&mut self, props: FieldProps) {
        if props.locale != self.props.locale {
            self.locale = Locale::for_tag(&props.locale);
            self.dropdown.set_locale(self.locale);
        }

        if props.from != self.props.from
            || props.to != self.props.to
            || props.locale != self.props.locale
        {
            self.value = compose_value(props.from.as_deref(), props.to.as_deref());
        }

        self.props = props;
        self.dropdown.receive(self.value, self.open);
    }

    pub fn props(&self) -> &FieldProps {
        &self.props
    }

    pub fn value(&self) -> Selection {
        self.value
    }

    pub fn locale(&self) -> &'static Locale {
        self.locale
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn dropdown(&self) -> &Dropdown {
        &self.dropdown
    }

    pub fn dropdown_mut(&mut self) -> &mut Dropdown {
        &mut self.dropdown
    }

    /// Options handed through to the toggle.
    pub fn toggle_options(&self) -> Table {
        props::build_from(&self.props.dropdown)
            .without(&OWN_KEYS)
            .result()
    }

    pub fn is_disabled(&self) -> bool {
        props::flag(&self.toggle_options(), "disabled")
    }

    pub fn pull_right(&self) -> bool {
        props::flag(&self.toggle_options(), "pull_right")
    }

    pub fn translate<'a>(&'a self, msg: &'a str) -> &'a str {
        self.props.translator.translate(msg)
    }

    /// Opens or closes the dropdown. Returns `true` if it was just opened.
    pub fn set_open(&mut self, open: bool) -> bool {
        if open && self.is_disabled() {
            log::debug!("field is disabled, not opening");
            return false;
        }

        self.open = open;
        self.dropdown.receive(self.value, open)
    }

    pub fn toggle(&mut self) -> bool {
        self.set_open(!self.open)
    }

    /// Feeds back what the dropdown decided.
    pub fn handle(&mut self, event: DropdownEvent) -> Option<FieldEvent> {
        match event {
            DropdownEvent::Choose(value) => {
                self.value = value;
                self.set_open(false);
                value
                    .to_strings()
                    .map(|(from, to)| FieldEvent::Change { from, to })
            }
            DropdownEvent::Cancel => {
                self.set_open(false);
                None
            }
        }
    }

    /// Chooses a predefined option without going through the dropdown's UI.
    pub fn pick(&mut self, option: PredefinedOption) -> Option<FieldEvent> {
        let event = self.dropdown.pick_option(option)?;
        self.handle(event)
    }

    /// Text on the toggle.
    pub fn toggle_text(&self) -> String {
        let locale = self.locale;
        self.value
            .display_with(|d| locale.long_date(d), |d| locale.short_date(d))
            .unwrap_or_else(|| self.props.placeholder.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dropdown::HOVER_DELAY;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn field_props(from: Option<&str>, to: Option<&str>) -> FieldProps {
        FieldProps {
            from: from.map(str::to_owned),
            to: to.map(str::to_owned),
            ..FieldProps::from(&Config::default())
        }
    }

    fn field(props: FieldProps) -> PeriodField {
        PeriodField::new(props, date(2024, 3, 15), HOVER_DELAY)
    }

    #[test]
    fn equal_strings_are_a_single_day() {
        let f = field(field_props(Some("2024-02-01"), Some("2024-02-01")));
        assert_eq!(f.value(), Selection::Single(date(2024, 2, 1)));
        assert_eq!(f.toggle_text(), "February 1, 2024");
        assert_eq!(f.dropdown().value(), f.value());
    }

    #[test]
    fn range_uses_short_format() {
        let f = field(field_props(Some("2024-02-09"), Some("2024-02-01")));
        assert_eq!(f.toggle_text(), "Feb 1, 2024 - Feb 9, 2024");
    }

    #[test]
    fn incomplete_or_garbage_is_empty() {
        assert_eq!(field(field_props(Some("2024-02-01"), None)).value(), Selection::Empty);

        let f = field(field_props(Some("2024-02-01"), Some("tomorrow")));
        assert_eq!(f.value(), Selection::Empty);
        assert_eq!(f.toggle_text(), "Select period");
    }

    #[test]
    fn overall_requires_min_from() {
        let f = field(field_props(None, None));
        assert!(!f.dropdown().options().contains(PredefinedOption::Overall));

        let f = field(FieldProps {
            min_from: Some("2023-01-01".to_owned()),
            ..field_props(None, None)
        });
        assert_eq!(
            f.dropdown().options().get(PredefinedOption::Overall),
            Some(Selection::range(date(2023, 1, 1), date(2024, 3, 15)))
        );
    }

    #[test]
    fn choosing_emits_change_and_closes() {
        let mut f = field(field_props(None, None));
        f.set_open(true);

        let event = f.dropdown_mut().pick_option(PredefinedOption::Last7Days).unwrap();
        assert_eq!(
            f.handle(event),
            Some(FieldEvent::Change {
                from: "2024-03-09".to_owned(),
                to: "2024-03-15".to_owned()
            })
        );
        assert!(!f.is_open());
        assert_eq!(f.dropdown().value(), f.value());
        assert_eq!(f.toggle_text(), "Mar 9, 2024 - Mar 15, 2024");
    }

    #[test]
    fn pick_by_name() {
        let mut f = field(field_props(None, None));
        let option: PredefinedOption = "Yesterday".parse().unwrap();

        assert_eq!(
            f.pick(option),
            Some(FieldEvent::Change {
                from: "2024-03-14".to_owned(),
                to: "2024-03-14".to_owned()
            })
        );
        assert_eq!(f.toggle_text(), "March 14, 2024");
        // not offered without a lower bound
        assert_eq!(f.pick(PredefinedOption::Overall), None);
    }

    #[test]
    fn single_day_change_repeats_date() {
        let mut f = field(field_props(None, None));
        f.set_open(true);
        f.dropdown_mut().click_date(date(2024, 3, 1));

        let event = f.dropdown_mut().confirm().unwrap();
        assert_eq!(
            f.handle(event),
            Some(FieldEvent::Change {
                from: "2024-03-01".to_owned(),
                to: "2024-03-01".to_owned()
            })
        );
    }

    #[test]
    fn cancel_closes_and_keeps_value() {
        let mut f = field(field_props(Some("2024-02-01"), Some("2024-02-03")));
        f.set_open(true);
        f.dropdown_mut().click_outside();

        let event = f.dropdown_mut().cancel();
        assert_eq!(f.handle(event), None);
        assert!(!f.is_open());
        assert_eq!(f.dropdown().value(), f.value());
        assert_eq!(f.value(), Selection::range(date(2024, 2, 1), date(2024, 2, 3)));
    }

    #[test]
    fn new_props_recompose_value() {
        let mut f = field(field_props(None, None));
        f.set_props(field_props(Some("2024-01-05"), Some("2024-01-05")));
        assert_eq!(f.value(), Selection::Single(date(2024, 1, 5)));
        assert_eq!(f.dropdown().value(), f.value());

        f.set_props(FieldProps {
            locale: "de".to_owned(),
            ..field_props(Some("2024-01-05"), Some("2024-01-05"))
        });
        assert_eq!(f.toggle_text(), "5. Januar 2024");
    }

    #[test]
    fn own_keys_are_not_forwarded() {
        let mut dropdown = Table::new();
        dropdown.insert("from".to_owned(), "2024-01-01".into());
        dropdown.insert("pull_right".to_owned(), true.into());
        dropdown.insert("disabled".to_owned(), true.into());

        let mut f = field(FieldProps {
            dropdown,
            ..field_props(None, None)
        });

        let forwarded = f.toggle_options();
        assert!(!forwarded.contains_key("from"));
        assert!(f.pull_right());
        assert!(f.is_disabled());
        assert!(!f.set_open(true));
        assert!(!f.is_open());
    }
}
