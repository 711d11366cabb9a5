use crate::locale::Locale;

/// Weekday labels in column order, starting at the locale's first weekday.
pub fn weekday_labels(locale: &Locale) -> [&'static str; 7] {
    let mut labels = [""; 7];
    let mut day = locale.first_weekday();

    // always seven days in a week
    for label in labels.iter_mut() {
        *label = locale.weekday_name(day);
        day = day.succ();
    }

    labels
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_weeks_start_on_sunday() {
        assert_eq!(
            weekday_labels(Locale::for_tag("en")),
            ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"]
        );
    }

    #[test]
    fn german_weeks_start_on_monday() {
        assert_eq!(
            weekday_labels(Locale::for_tag("de")),
            ["Mo", "Di", "Mi", "Do", "Fr", "Sa", "So"]
        );
    }
}
