//! Decision-year extraction and year arithmetic.

/// Earliest year accepted as a decision year.
pub const EARLIEST_DECISION_YEAR: i32 = 1990;

/// Find the decision year mentioned in free text.
///
/// Returns the first standalone four-digit token starting with `19` or `20`
/// that falls within `1990..=current_year + 1`. Tokens glued to letters,
/// digits, or underscores (`"2019s"`, `"A2020"`) do not count.
pub fn extract_decision_year(text: &str, current_year: i32) -> Option<i32> {
    let latest = current_year.saturating_add(1);

    text.split(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
        .filter(|token| {
            token.len() == 4
                && token.bytes().all(|b| b.is_ascii_digit())
                && (token.starts_with("19") || token.starts_with("20"))
        })
        .filter_map(|token| token.parse::<i32>().ok())
        .find(|year| (EARLIEST_DECISION_YEAR..=latest).contains(year))
}

/// The year of the event at `index` in a sequence starting at `start`.
///
/// Saturates at `i32::MAX` rather than overflowing.
pub fn year_at(start: i32, index: usize) -> i32 {
    i32::try_from(index)
        .ok()
        .and_then(|offset| start.checked_add(offset))
        .unwrap_or(i32::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_first_year_in_range() {
        let text = "In 2019 I quit my job, and in 2021 I moved.";
        assert_eq!(extract_decision_year(text, 2026), Some(2019));
    }

    #[test]
    fn skips_out_of_range_years() {
        let text = "Born in 1985, in 2015 I chose art school.";
        assert_eq!(extract_decision_year(text, 2026), Some(2015));
    }

    #[test]
    fn accepts_next_year_but_not_beyond() {
        assert_eq!(extract_decision_year("planning for 2027", 2026), Some(2027));
        assert_eq!(extract_decision_year("planning for 2028", 2026), None);
    }

    #[test]
    fn ignores_tokens_glued_to_words() {
        assert_eq!(extract_decision_year("the 2010s were wild", 2026), None);
        assert_eq!(extract_decision_year("room A2020", 2026), None);
        assert_eq!(extract_decision_year("code 12019", 2026), None);
    }

    #[test]
    fn punctuation_is_a_boundary() {
        assert_eq!(extract_decision_year("(2012), moved", 2026), Some(2012));
        assert_eq!(extract_decision_year("2003-ish", 2026), Some(2003));
    }

    #[test]
    fn no_year_returns_none() {
        assert_eq!(extract_decision_year("I left home", 2026), None);
        assert_eq!(extract_decision_year("", 2026), None);
    }

    #[test]
    fn year_at_adds_index() {
        assert_eq!(year_at(2019, 0), 2019);
        assert_eq!(year_at(2019, 4), 2023);
        assert_eq!(year_at(i32::MAX, 1), i32::MAX);
    }
}
