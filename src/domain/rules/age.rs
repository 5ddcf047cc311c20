//! Child age in whole calendar months.

use chrono::{Datelike, NaiveDate};

/// Whole calendar months between `birth` and `reference`.
///
/// A month counts once the reference day reaches the birth day, or when the
/// reference date is the last day of its month (Jan 31 to Feb 28 is one month).
/// The result is at most -1 when `reference` precedes `birth`, even by a day.
pub fn age_in_months(birth: NaiveDate, reference: NaiveDate) -> i32 {
    if reference < birth {
        return -age_in_months(reference, birth).max(1);
    }

    let mut months = (reference.year() - birth.year()) * 12
        + (reference.month() as i32 - birth.month() as i32);

    if reference.day() < birth.day() && !is_last_day_of_month(reference) {
        months -= 1;
    }

    months
}

/// The date ages are measured at: the event date when known, else today.
pub fn reference_date(event_date: Option<NaiveDate>, today: NaiveDate) -> NaiveDate {
    event_date.unwrap_or(today)
}

/// Human label for an age: months under two years, years and months above.
pub fn format_age(months: i32) -> String {
    if months < 24 {
        return format!("{} months", months);
    }

    let years = months / 12;
    let rest = months % 12;
    let years_label = if years == 1 { "year" } else { "years" };

    if rest == 0 {
        format!("{} {}", years, years_label)
    } else {
        let months_label = if rest == 1 { "month" } else { "months" };
        format!("{} {} {} {}", years, years_label, rest, months_label)
    }
}

fn is_last_day_of_month(date: NaiveDate) -> bool {
    date.succ_opt().is_none_or(|next| next.month() != date.month())
}
