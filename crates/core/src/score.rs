//! Best-effort extraction of a `home-away` score from a raw result string.
//!
//! Grammar: `ws* digits ws* '-' ws* digits ws*`. Anything else, including
//! numbers of 2^31 or more, is "no score": a pending match, not an error.

use serde::{Deserialize, Serialize};
use std::iter::Peekable;
use std::str::Chars;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: u32,
    pub away: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    HomeWin,
    AwayWin,
    Draw,
}

impl Score {
    pub fn outcome(self) -> Outcome {
        match self.home.cmp(&self.away) {
            std::cmp::Ordering::Greater => Outcome::HomeWin,
            std::cmp::Ordering::Less => Outcome::AwayWin,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }
}

fn skip_whitespace(chars: &mut Peekable<Chars<'_>>) {
    while chars.next_if(|c| c.is_whitespace()).is_some() {}
}

fn number(chars: &mut Peekable<Chars<'_>>) -> Option<u32> {
    let mut digits = String::new();
    while let Some(c) = chars.next_if(char::is_ascii_digit) {
        digits.push(c);
    }
    let n: i32 = digits.parse().ok()?;
    u32::try_from(n).ok()
}

pub fn parse_score(text: &str) -> Option<Score> {
    let mut chars = text.chars().peekable();
    skip_whitespace(&mut chars);
    let home = number(&mut chars)?;
    skip_whitespace(&mut chars);
    chars.next_if_eq(&'-')?;
    skip_whitespace(&mut chars);
    let away = number(&mut chars)?;
    skip_whitespace(&mut chars);
    if chars.next().is_some() {
        return None;
    }
    Some(Score { home, away })
}

/// `parse_score` over an optional result; absent input is "no score".
pub fn parse_result(result: Option<&str>) -> Option<Score> {
    result.and_then(parse_score)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn score(home: u32, away: u32) -> Option<Score> {
        Some(Score { home, away })
    }

    #[test]
    fn accepts_plain_and_spaced_scores() {
        assert_eq!(parse_score("3-1"), score(3, 1));
        assert_eq!(parse_score("  10 - 2 "), score(10, 2));
        assert_eq!(parse_score("0-0"), score(0, 0));
        assert_eq!(parse_score("\t2-\t3\n"), score(2, 3));
        assert_eq!(parse_score("2147483647-0"), score(2_147_483_647, 0));
    }

    #[test]
    fn rejects_malformed_results() {
        assert_eq!(parse_score("3-1x"), None);
        assert_eq!(parse_score("-"), None);
        assert_eq!(parse_score(""), None);
        assert_eq!(parse_score("3"), None);
        assert_eq!(parse_score("3:1"), None);
        assert_eq!(parse_score("-1-2"), None);
        assert_eq!(parse_score("1--2"), None);
        assert_eq!(parse_score("pendiente"), None);
        assert_eq!(parse_score("99999999999-1"), None);
        assert_eq!(parse_score("4000000000-0"), None);
        assert_eq!(parse_score("0-2147483648"), None);
    }

    #[test]
    fn absent_result_is_no_score() {
        assert_eq!(parse_result(None), None);
        assert_eq!(parse_result(Some("2-2")), score(2, 2));
    }

    #[test]
    fn outcomes() {
        assert_eq!(Score { home: 2, away: 0 }.outcome(), Outcome::HomeWin);
        assert_eq!(Score { home: 0, away: 1 }.outcome(), Outcome::AwayWin);
        assert_eq!(Score { home: 1, away: 1 }.outcome(), Outcome::Draw);
    }
}
