//! Free-text date extraction for task titles and notes.
//!
//! Strategies run in a fixed priority order and the first one that yields a
//! real calendar date wins. Several strategies can match overlapping parts
//! of the same text ("2024-03-05 (05/03/24)"), so the order is part of the
//! contract:
//!
//! 1. ISO date `YYYY-MM-DD`
//! 2. `D/M/YYYY` (day-first, `/` or `-`)
//! 3. `D/M/YY` (day-first, two-digit year, see [`expand_two_digit_year`])
//! 4. `D/M` with the reference year
//! 5. Month name next to a day ("Mar 5", "5th of March")
//! 6. `next <weekday>`
//! 7. `today` / `tomorrow`

use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use regex::{Captures, Regex};

use crate::types::DatePattern;

type Strategy = fn(&str, NaiveDate) -> Option<NaiveDate>;

/// Priority-ordered strategies. A slice, not a map: iteration order matters.
const STRATEGIES: &[(DatePattern, Strategy)] = &[
    (DatePattern::IsoDate, iso_date),
    (DatePattern::DayMonthFullYear, day_month_full_year),
    (DatePattern::DayMonthShortYear, day_month_short_year),
    (DatePattern::DayMonth, day_month),
    (DatePattern::MonthName, month_name),
    (DatePattern::NextWeekday, next_weekday),
    (DatePattern::RelativeDay, relative_day),
];

/// Year-bearing strategies for structured deadline fields, which carry no
/// reference date. None of them read the reference.
const STRUCTURED_STRATEGIES: &[Strategy] = &[
    iso_date,
    year_first_date,
    day_month_full_year,
    day_month_short_year,
];

const MONTHS: &str = r"jan(?:uary)?|feb(?:ruary)?|mar(?:ch)?|apr(?:il)?|may|june?|july?|aug(?:ust)?|sep(?:t(?:ember)?)?|oct(?:ober)?|nov(?:ember)?|dec(?:ember)?";

const WEEKDAYS: &str = r"mon(?:day)?|tue(?:s(?:day)?)?|wed(?:nesday)?|thu(?:r(?:s(?:day)?)?)?|fri(?:day)?|sat(?:urday)?|sun(?:day)?";

// Compile-once regex patterns via OnceLock.
fn re_iso() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{4})-(\d{2})-(\d{2})").unwrap())
}

fn re_ymd_loose() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{4})[/-](\d{1,2})[/-](\d{1,2})").unwrap())
}

fn re_dmy_full() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{4})").unwrap())
}

fn re_dmy_short() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})[/-](\d{1,2})[/-](\d{2})").unwrap())
}

fn re_dm() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2})[/-](\d{1,2})").unwrap())
}

fn re_month_name() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(&format!(
            r"(?i)\b(?:({m})\.?\s*(\d{{1,2}})(?:st|nd|rd|th)?\b|(\d{{1,2}})(?:st|nd|rd|th)?\s*(?:of\s+)?({m})\b)",
            m = MONTHS
        ))
        .unwrap()
    })
}

fn re_next_weekday() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(&format!(r"(?i)\bnext\s+({})\b", WEEKDAYS)).unwrap())
}

fn re_today() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\btoday\b").unwrap())
}

fn re_tomorrow() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)\btomorrow\b").unwrap())
}

/// Extract the first date found in `text`.
///
/// `reference` supplies the implicit year for day/month expressions and the
/// anchor for `next <weekday>`, `today` and `tomorrow`.
pub fn resolve_date(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    resolve_date_with_pattern(text, reference).map(|(date, _)| date)
}

/// Like [`resolve_date`], also reporting which strategy matched.
pub fn resolve_date_with_pattern(
    text: &str,
    reference: NaiveDate,
) -> Option<(NaiveDate, DatePattern)> {
    if text.trim().is_empty() {
        return None;
    }

    STRATEGIES
        .iter()
        .find_map(|(pattern, strategy)| strategy(text, reference).map(|date| (date, *pattern)))
}

/// Parse a structured deadline field written in any year-bearing numeric
/// form: `2024-06-12`, `2024/6/12`, `06/12/2024`, `06-12-24`.
pub fn resolve_structured(text: &str) -> Option<NaiveDate> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }

    STRUCTURED_STRATEGIES
        .iter()
        .find_map(|strategy| strategy(text, NaiveDate::MIN))
}

/// Two-digit years: 00-40 → 2000-2040, 41-99 → 1941-1999.
///
/// A fixed pivot, not a window around the current year.
pub fn expand_two_digit_year(yy: u32) -> i32 {
    if yy <= 40 {
        2000 + yy as i32
    } else {
        1900 + yy as i32
    }
}

fn iso_date(text: &str, _reference: NaiveDate) -> Option<NaiveDate> {
    first_valid(re_iso(), text, |caps| {
        ymd(num(caps, 1)? as i32, num(caps, 2)?, num(caps, 3)?)
    })
}

fn year_first_date(text: &str, _reference: NaiveDate) -> Option<NaiveDate> {
    first_valid(re_ymd_loose(), text, |caps| {
        ymd(num(caps, 1)? as i32, num(caps, 2)?, num(caps, 3)?)
    })
}

fn day_month_full_year(text: &str, _reference: NaiveDate) -> Option<NaiveDate> {
    first_valid(re_dmy_full(), text, |caps| {
        ymd(num(caps, 3)? as i32, num(caps, 2)?, num(caps, 1)?)
    })
}

fn day_month_short_year(text: &str, _reference: NaiveDate) -> Option<NaiveDate> {
    first_valid(re_dmy_short(), text, |caps| {
        let year = expand_two_digit_year(num(caps, 3)?);
        ymd(year, num(caps, 2)?, num(caps, 1)?)
    })
}

fn day_month(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    re_dm()
        .captures_iter(text)
        .filter(|caps| {
            let m = caps.get(0).map(|m| (m.start(), m.end()));
            m.is_some_and(|(start, end)| !part_of_longer_date(text, start, end))
        })
        .find_map(|caps| ymd(reference.year(), num(&caps, 2)?, num(&caps, 1)?))
}

fn month_name(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    re_month_name().captures_iter(text).find_map(|caps| {
        let (month, day) = match (caps.get(1), caps.get(4)) {
            (Some(month), _) => (month.as_str(), num(&caps, 2)?),
            (None, Some(month)) => (month.as_str(), num(&caps, 3)?),
            (None, None) => return None,
        };
        ymd(reference.year(), month_number(month)?, day)
    })
}

fn next_weekday(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    let caps = re_next_weekday().captures(text)?;
    let target = weekday_from_name(caps.get(1)?.as_str())?;
    let ahead = (7 + target.num_days_from_monday() as u64
        - reference.weekday().num_days_from_monday() as u64)
        % 7;
    // "next" never means today
    let ahead = if ahead == 0 { 7 } else { ahead };
    reference.checked_add_days(Days::new(ahead))
}

fn relative_day(text: &str, reference: NaiveDate) -> Option<NaiveDate> {
    if re_today().is_match(text) {
        return Some(reference);
    }
    if re_tomorrow().is_match(text) {
        return reference.succ_opt();
    }
    None
}

/// First match that is not glued to other digits and forms a real date.
fn first_valid<F>(re: &Regex, text: &str, build: F) -> Option<NaiveDate>
where
    F: Fn(&Captures) -> Option<NaiveDate>,
{
    re.captures_iter(text)
        .filter(|caps| {
            caps.get(0)
                .is_some_and(|m| digit_bounded(text, m.start(), m.end()))
        })
        .find_map(|caps| build(&caps))
}

/// True when the match is not directly preceded or followed by a digit.
fn digit_bounded(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.is_some_and(|c| c.is_ascii_digit()) && !after.is_some_and(|c| c.is_ascii_digit())
}

/// A bare `D/M` candidate that is really a slice of `D/M/Y` or `Y-M-D`.
fn part_of_longer_date(text: &str, start: usize, end: usize) -> bool {
    if !digit_bounded(text, start, end) {
        return true;
    }
    let mut after = text[end..].chars();
    let glued_after = matches!(after.next(), Some('/') | Some('-'))
        && after.next().is_some_and(|c| c.is_ascii_digit());
    let mut before = text[..start].chars().rev();
    let glued_before = matches!(before.next(), Some('/') | Some('-'))
        && before.next().is_some_and(|c| c.is_ascii_digit());
    glued_after || glued_before
}

fn num(caps: &Captures, idx: usize) -> Option<u32> {
    caps.get(idx)?.as_str().parse().ok()
}

fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, month, day)
}

fn month_number(name: &str) -> Option<u32> {
    let key = name.get(..3)?.to_ascii_lowercase();
    let month = match key.as_str() {
        "jan" => 1,
        "feb" => 2,
        "mar" => 3,
        "apr" => 4,
        "may" => 5,
        "jun" => 6,
        "jul" => 7,
        "aug" => 8,
        "sep" => 9,
        "oct" => 10,
        "nov" => 11,
        "dec" => 12,
        _ => return None,
    };
    Some(month)
}

fn weekday_from_name(name: &str) -> Option<Weekday> {
    let key = name.get(..3)?.to_ascii_lowercase();
    let weekday = match key.as_str() {
        "mon" => Weekday::Mon,
        "tue" => Weekday::Tue,
        "wed" => Weekday::Wed,
        "thu" => Weekday::Thu,
        "fri" => Weekday::Fri,
        "sat" => Weekday::Sat,
        "sun" => Weekday::Sun,
        _ => return None,
    };
    Some(weekday)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    // 2024-01-01 is a Monday
    fn monday() -> NaiveDate {
        d(2024, 1, 1)
    }

    #[test]
    fn iso_wins_over_short_year() {
        let got = resolve_date_with_pattern("Due 2024-03-05 (05/03/24)", monday());
        assert_eq!(got, Some((d(2024, 3, 5), DatePattern::IsoDate)));
    }

    #[test]
    fn iso_inside_timestamp() {
        assert_eq!(
            resolve_date("synced 2024-03-05T10:00:00Z", monday()),
            Some(d(2024, 3, 5))
        );
    }

    #[test]
    fn full_year_is_day_first() {
        let got = resolve_date_with_pattern("ship 06/12/2025", monday());
        assert_eq!(got, Some((d(2025, 12, 6), DatePattern::DayMonthFullYear)));
        assert_eq!(resolve_date("ship 6-12-2025", monday()), Some(d(2025, 12, 6)));
    }

    #[test]
    fn two_digit_year_pivot() {
        assert_eq!(resolve_date("12/05/41", monday()), Some(d(1941, 5, 12)));
        assert_eq!(resolve_date("12/05/40", monday()), Some(d(2040, 5, 12)));
        assert_eq!(resolve_date("12-05-41", monday()), Some(d(1941, 5, 12)));
        assert_eq!(resolve_date("12-05-40", monday()), Some(d(2040, 5, 12)));
        assert_eq!(resolve_date("1/2/00", monday()), Some(d(2000, 2, 1)));
        assert_eq!(expand_two_digit_year(99), 1999);
    }

    #[test]
    fn day_month_uses_reference_year() {
        let got = resolve_date_with_pattern("ship by 6/12", monday());
        assert_eq!(got, Some((d(2024, 12, 6), DatePattern::DayMonth)));
    }

    #[test]
    fn impossible_dates_are_skipped() {
        // 31/02/2024 is rejected by every numeric strategy; "3/4" still counts
        assert_eq!(
            resolve_date("31/02/2024 or 3/4", monday()),
            Some(d(2024, 4, 3))
        );
        assert_eq!(resolve_date("2024-13-45", monday()), None);
    }

    #[test]
    fn bare_day_month_not_taken_from_longer_date() {
        // "3/4" follows "2024-", so it is the tail of a year-first date
        assert_eq!(resolve_date("2024-3/4", monday()), None);
        assert_eq!(resolve_date("v2024-3/4 then 5/6", monday()), Some(d(2024, 6, 5)));
        // "7/8" sits right after "6-", so neither half stands alone
        assert_eq!(resolve_date("5/6-7/8", monday()), None);
    }

    #[test]
    fn year_bearing_date_beats_month_name() {
        assert_eq!(
            resolve_date("Mar 5 or 01/02/2025", monday()),
            Some(d(2025, 2, 1))
        );
    }

    #[test]
    fn month_name_either_order() {
        assert_eq!(
            resolve_date("talk to finance Mar 5", monday()),
            Some(d(2024, 3, 5))
        );
        assert_eq!(resolve_date("launch on 5th of March", monday()), Some(d(2024, 3, 5)));
        assert_eq!(resolve_date("review JUNE 3rd", monday()), Some(d(2024, 6, 3)));
        assert_eq!(resolve_date("due 12 sept.", monday()), Some(d(2024, 9, 12)));
    }

    #[test]
    fn month_name_without_space() {
        assert_eq!(resolve_date("demo Mar5", monday()), Some(d(2024, 3, 5)));
        assert_eq!(resolve_date("demo 5Mar", monday()), Some(d(2024, 3, 5)));
        assert_eq!(resolve_date("summar5 recap", monday()), None);
    }

    #[test]
    fn month_name_ignores_years() {
        assert_eq!(resolve_date("Jan 2025 planning", monday()), None);
    }

    #[test]
    fn next_weekday_rolls_past_today() {
        assert_eq!(resolve_date("next Monday", monday()), Some(d(2024, 1, 8)));
        assert_eq!(
            resolve_date("talk to finance next friday", monday()),
            Some(d(2024, 1, 5))
        );
        assert_eq!(resolve_date("NEXT sun", monday()), Some(d(2024, 1, 7)));
    }

    #[test]
    fn next_weekday_from_midweek() {
        // 2024-01-03 is a Wednesday
        assert_eq!(resolve_date("next tue", d(2024, 1, 3)), Some(d(2024, 1, 9)));
    }

    #[test]
    fn next_weekday_at_end_of_calendar() {
        assert_eq!(resolve_date("next monday", NaiveDate::MAX), None);
        assert_eq!(resolve_date("tomorrow", NaiveDate::MAX), None);
    }

    #[test]
    fn structured_fields_accept_year_bearing_forms() {
        assert_eq!(resolve_structured("2024-06-12"), Some(d(2024, 6, 12)));
        assert_eq!(resolve_structured("2024/06/12"), Some(d(2024, 6, 12)));
        assert_eq!(resolve_structured("2024-6-3"), Some(d(2024, 6, 3)));
        assert_eq!(resolve_structured("06/12/2024"), Some(d(2024, 12, 6)));
        assert_eq!(resolve_structured("06-12-24"), Some(d(2024, 12, 6)));
        assert_eq!(resolve_structured("6/12"), None);
        assert_eq!(resolve_structured("soon"), None);
        assert_eq!(resolve_structured(""), None);
    }

    #[test]
    fn today_and_tomorrow() {
        assert_eq!(resolve_date("Finish TODAY", monday()), Some(monday()));
        let got = resolve_date_with_pattern("finish by tomorrow", monday());
        assert_eq!(got, Some((d(2024, 1, 2), DatePattern::RelativeDay)));
        assert_eq!(resolve_date("today or tomorrow", monday()), Some(monday()));
    }

    #[test]
    fn whole_words_only() {
        assert_eq!(resolve_date("plan tomorrowland trip", monday()), None);
    }

    #[test]
    fn no_date_in_text() {
        assert_eq!(resolve_date("call the bank", monday()), None);
        assert_eq!(resolve_date("   ", monday()), None);
        assert_eq!(resolve_date("", monday()), None);
    }
}
