// src/services/dates.rs

//! Date text extraction and parsing for listing entries.

use chrono::NaiveDate;
use regex::Regex;

use crate::models::{DateRule, Replacement};

/// Upper-case the first letter of every alphabetic run, lower-case the rest.
///
/// `"MEDIA BULLETIN dated 5th APRIL"` becomes `"Media Bulletin Dated 5Th April"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_word = false;
    for c in text.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}

/// Cut the raw date substring out of an entry's text.
///
/// Returns `None` when the text does not have the shape the rule expects.
pub fn extract_date_text(text: &str, rule: &DateRule) -> Option<String> {
    match rule {
        DateRule::Offsets { day, month, year } => {
            let chars: Vec<char> = text.trim().chars().collect();
            let field = |start: usize, len: usize| -> Option<String> {
                chars.get(start..start + len).map(|c| c.iter().collect())
            };
            Some(format!(
                "{} {} {}",
                field(*day, 2)?,
                field(*month, 2)?,
                field(*year, 4)?
            ))
        }
        DateRule::Labelled {
            label,
            skip,
            separators,
        } => {
            let mut rest = after_label(text, label, *skip)?;
            for separator in separators {
                rest = rest.replace(separator.as_str(), " ");
            }
            Some(rest.trim().to_string())
        }
        DateRule::LabelledTokens { label, skip } => {
            let rest = after_label(text, label, *skip)?;
            let ascii: String = rest.chars().filter(char::is_ascii).collect();
            let cleaned = ascii.replace(',', " ");
            let tokens: Vec<&str> = cleaned.split_whitespace().collect();
            if tokens.len() < 3 {
                return None;
            }
            let last = &tokens[tokens.len() - 3..];
            let day: String = last[0].chars().filter(char::is_ascii_digit).collect();
            Some(format!("{} {} {}", day, last[1], last[2]))
        }
    }
}

/// Title-case `text`, find `label` followed by at least one character and
/// return the match minus its first `skip` characters.
fn after_label(text: &str, label: &str, skip: usize) -> Option<String> {
    let titled = title_case(text);
    let pattern = Regex::new(&format!("{}.(.*)", regex::escape(label))).ok()?;
    let found = pattern.find(&titled)?;
    Some(found.as_str().chars().skip(skip).collect())
}

/// Parse `text` with each format in turn; the first match wins.
///
/// When nothing matches, month-token corrections are applied to the middle
/// token of a three-token date and the formats are tried again.
pub fn parse_date(
    text: &str,
    formats: &[String],
    corrections: &[Replacement],
) -> Option<NaiveDate> {
    if let Some(date) = try_formats(text, formats) {
        return Some(date);
    }

    let tokens: Vec<&str> = text.split_whitespace().collect();
    let [day, month, year] = tokens.as_slice() else {
        return None;
    };
    corrections
        .iter()
        .filter(|c| c.from == *month)
        .find_map(|c| {
            log::debug!("Correcting month token {:?} to {:?} in {:?}", c.from, c.to, text);
            try_formats(&format!("{} {} {}", day, c.to, year), formats)
        })
}

fn try_formats(text: &str, formats: &[String]) -> Option<NaiveDate> {
    formats
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(text, format).ok())
}
