//! # Date/Time Converter
//!
//! Instants travel as text rendered with a date pattern the caller supplies on every call.
//! The pattern is never stored on the wire or on the converter: generated code always passes
//! the same literal pattern for a given field, and the receiving side has to agree on it.
//!
//! Patterns use the Unicode (LDML) date field syntax, e.g. `yyyy-MM-dd'T'HH:mm:ss'Z'`:
//!
//! | Field                 | Meaning                                   |
//! |-----------------------|-------------------------------------------|
//! | `y` `yyyy` / `yy`     | year / two digit year (parsed as `20yy`)  |
//! | `M` `MM` `MMM` `MMMM` | month, number or name                     |
//! | `d` `dd`, `D` `DDD`   | day of month, day of year                 |
//! | `H` `HH`, `h` `hh`, `a` | hour (0-23), hour (1-12), AM/PM         |
//! | `m` `mm`, `s` `ss`    | minute, second                            |
//! | `S` .. `SSSSSSSSS`    | fraction of a second                      |
//! | `E` `EEE`, `EEEE`     | weekday name (ignored when parsing)       |
//! | `Z` `ZZ` `ZZZ` `xx`   | offset as `+HHMM`                         |
//! | `XXX` `xxx` `ZZZZZ`   | offset as `+HH:MM`                        |
//!
//! Text between single quotes is literal, `''` is a quote, any other letter is rejected and
//! every other character is literal.
//!
//! Years past 9999 are written with a leading sign (`+10000`), which `yyyy` also accepts when
//! parsing.
//!
//! Instants are always formatted in UTC. The only exception is an instant at the very edge of
//! the calendar whose UTC form does not exist; it is formatted at its own offset. When parsing, fields the pattern does not mention
//! default to the epoch (`1970-01-01T00:00:00`), and a parsed offset is applied before the
//! result is normalised to UTC.
use crate::{SerializationError, WireValue};
use std::num::NonZeroU8;
use time::{Date, Month, OffsetDateTime, PrimitiveDateTime, Time, UtcOffset, parsing::Parsed};

/// Formats `value` in UTC with `pattern`.
///
/// # Errors
///
/// Fails with a `Format` error only when the pattern itself is unusable.
pub fn serialize(value: &OffsetDateTime, pattern: &str) -> Result<WireValue, SerializationError> {
    format(value, pattern).map(WireValue::String)
}

/// Parses text produced with `pattern` back into a UTC instant.
///
/// # Errors
///
/// `TypeMismatch` for non-text wire values, `Format` when the text does not match the pattern.
pub fn deserialize(wire: &WireValue, pattern: &str) -> Result<OffsetDateTime, SerializationError> {
    let WireValue::String(text) = wire else {
        return Err(SerializationError::type_mismatch("date/time string", wire));
    };

    parse(text, pattern)
}

pub fn format(value: &OffsetDateTime, pattern: &str) -> Result<String, SerializationError> {
    let rendered = value.to_string();
    let description = translate(pattern).map_err(|e| SerializationError::format(&rendered, pattern, e))?;
    let items = time::format_description::parse(&description)
        .map_err(|e| SerializationError::format(&rendered, pattern, e))?;

    let utc = value.checked_to_offset(UtcOffset::UTC).unwrap_or(*value);

    utc.format(&items)
        .map_err(|e| SerializationError::format(&rendered, pattern, e))
}

pub fn parse(text: &str, pattern: &str) -> Result<OffsetDateTime, SerializationError> {
    let fail = |reason: &dyn std::fmt::Display| SerializationError::format(text, pattern, reason);

    let description = translate(pattern).map_err(|e| fail(&e))?;
    let items = time::format_description::parse(&description).map_err(|e| fail(&e))?;

    let mut parsed = Parsed::new();
    let remaining = parsed
        .parse_items(text.as_bytes(), items.as_slice())
        .map_err(|e| fail(&e))?;

    if !remaining.is_empty() {
        return Err(fail(&"unexpected trailing characters"));
    }

    assemble(&parsed).map_err(|e| fail(&e))
}

/// Builds the instant out of whatever fields the pattern provided.
fn assemble(parsed: &Parsed) -> Result<OffsetDateTime, String> {
    let year = match (parsed.year(), parsed.year_last_two()) {
        (Some(year), _) => year,
        (None, Some(last_two)) => 2000 + i32::from(last_two),
        (None, None) => 1970,
    };

    let date = match (parsed.month(), parsed.day(), parsed.ordinal()) {
        (None, None, Some(ordinal)) => Date::from_ordinal_date(year, ordinal.get()),
        (month, day, _) => Date::from_calendar_date(
            year,
            month.unwrap_or(Month::January),
            day.map_or(1, NonZeroU8::get),
        ),
    }
    .map_err(|e| e.to_string())?;

    let hour = match (parsed.hour_24(), parsed.hour_12(), parsed.hour_12_is_pm()) {
        (Some(hour), _, _) => hour,
        (None, Some(hour), is_pm) => hour.get() % 12 + if is_pm == Some(true) { 12 } else { 0 },
        (None, None, _) => 0,
    };

    let time = Time::from_hms_nano(
        hour,
        parsed.minute().unwrap_or(0),
        parsed.second().unwrap_or(0),
        parsed.subsecond().unwrap_or(0),
    )
    .map_err(|e| e.to_string())?;

    let offset = UtcOffset::from_hms(
        parsed.offset_hour().unwrap_or(0),
        parsed.offset_minute_signed().unwrap_or(0),
        0,
    )
    .map_err(|e| e.to_string())?;

    PrimitiveDateTime::new(date, time)
        .assume_offset(offset)
        .checked_to_offset(UtcOffset::UTC)
        .ok_or_else(|| "instant out of range in UTC".to_string())
}

/// Rewrites an LDML date pattern into a `time` format description.
fn translate(pattern: &str) -> Result<String, String> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];

        if c == '\'' {
            i += 1;
            if chars.get(i) == Some(&'\'') {
                out.push('\'');
                i += 1;
                continue;
            }
            loop {
                match chars.get(i) {
                    None => return Err("unterminated quoted literal".to_string()),
                    Some('\'') if chars.get(i + 1) == Some(&'\'') => {
                        out.push('\'');
                        i += 2;
                    }
                    Some('\'') => {
                        i += 1;
                        break;
                    }
                    Some(literal) => {
                        push_literal(&mut out, *literal);
                        i += 1;
                    }
                }
            }
            continue;
        }

        if c.is_ascii_alphabetic() {
            let run = chars[i..].iter().take_while(|&&next| next == c).count();
            let component = component(c, run)
                .ok_or_else(|| format!("unsupported date field '{}'", c.to_string().repeat(run)))?;
            out.push_str(&component);
            i += run;
            continue;
        }

        push_literal(&mut out, c);
        i += 1;
    }

    Ok(out)
}

fn push_literal(out: &mut String, c: char) {
    if c == '[' {
        out.push_str("[[");
    } else {
        out.push(c);
    }
}

fn component(field: char, width: usize) -> Option<String> {
    let component = match (field, width) {
        ('y', 1) => "[year padding:none]",
        ('y', 2) => "[year repr:last_two]",
        ('y', _) => "[year]",
        ('M', 1) => "[month padding:none]",
        ('M', 2) => "[month]",
        ('M', 3) => "[month repr:short]",
        ('M', 4) => "[month repr:long]",
        ('d', 1) => "[day padding:none]",
        ('d', 2) => "[day]",
        ('D', 1 | 2) => "[ordinal padding:none]",
        ('D', 3) => "[ordinal]",
        ('H', 1) => "[hour padding:none]",
        ('H', 2) => "[hour]",
        ('h', 1) => "[hour repr:12 padding:none]",
        ('h', 2) => "[hour repr:12]",
        ('a', 1) => "[period]",
        ('m', 1) => "[minute padding:none]",
        ('m', 2) => "[minute]",
        ('s', 1) => "[second padding:none]",
        ('s', 2) => "[second]",
        ('S', 1..=9) => return Some(format!("[subsecond digits:{width}]")),
        ('E', 1..=3) => "[weekday repr:short]",
        ('E', 4) => "[weekday]",
        ('Z', 1..=3) | ('x', 2) => "[offset_hour sign:mandatory][offset_minute]",
        ('Z', 5) | ('X', 3) | ('x', 3) => "[offset_hour sign:mandatory]:[offset_minute]",
        _ => return None,
    };
    Some(component.to_string())
}
