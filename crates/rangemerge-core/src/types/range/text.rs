//! Range literal text format: `empty`, `[a,b)`, `(,b]`, `[a,)`.
//! Bound values containing delimiters or whitespace are double-quoted, with
//! embedded quotes and backslashes doubled.

use crate::types::{Range, RangeBound, RangeElement, RangeError};
use serde::{Deserialize, Deserializer, Serialize, Serializer, de};
use std::{fmt, str::FromStr};

const EMPTY: &str = "empty";

impl<T: RangeElement> fmt::Display for Range<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let (Some(lower), Some(upper)) = (self.lower_bound(), self.upper_bound()) else {
            return f.write_str(EMPTY);
        };

        f.write_str(if lower.is_inclusive() { "[" } else { "(" })?;
        if let Some(value) = lower.value() {
            write_bound_text(f, &value.to_text())?;
        }
        f.write_str(",")?;
        if let Some(value) = upper.value() {
            write_bound_text(f, &value.to_text())?;
        }
        f.write_str(if upper.is_inclusive() { "]" } else { ")" })
    }
}

fn needs_quotes(text: &str) -> bool {
    text.is_empty()
        || text.chars().any(|ch| {
            matches!(ch, '"' | '\\' | '(' | ')' | '[' | ']' | ',') || ch.is_whitespace()
        })
}

fn write_bound_text(f: &mut fmt::Formatter<'_>, text: &str) -> fmt::Result {
    if !needs_quotes(text) {
        return f.write_str(text);
    }

    f.write_str("\"")?;
    for ch in text.chars() {
        if matches!(ch, '"' | '\\') {
            write!(f, "{ch}")?;
        }
        write!(f, "{ch}")?;
    }
    f.write_str("\"")
}

impl<T: RangeElement> FromStr for Range<T> {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        if input.eq_ignore_ascii_case(EMPTY) {
            return Ok(Self::empty());
        }

        let parse_err = |reason: String| RangeError::Parse {
            input: input.to_string(),
            reason,
        };

        let literal = RangeLiteral::parse(input).map_err(|reason| parse_err(reason.to_string()))?;
        let lower = literal.lower_bound().map_err(&parse_err)?;
        let upper = literal.upper_bound().map_err(&parse_err)?;

        Self::new(lower, upper)
    }
}

///
/// RangeLiteral
///
/// Split form of a non-empty range literal before the bound values are
/// decoded into the element type.
///

struct RangeLiteral {
    lower_inc: bool,
    lower: Option<String>,
    upper: Option<String>,
    upper_inc: bool,
}

impl RangeLiteral {
    fn parse(input: &str) -> Result<Self, &'static str> {
        let lower_inc = match input.chars().next() {
            Some('[') => true,
            Some('(') => false,
            _ => return Err("missing left parenthesis or bracket"),
        };

        let (lower, rest) = split_bound(&input[1..])?;
        let rest = rest.strip_prefix(',').ok_or("missing comma after lower bound")?;
        let (upper, rest) = split_bound(rest)?;

        let upper_inc = match rest {
            "]" => true,
            ")" => false,
            _ if rest.starts_with([']', ')']) => {
                return Err("junk after right parenthesis or bracket");
            }
            _ => return Err("too many commas"),
        };

        Ok(Self {
            lower_inc,
            lower,
            upper,
            upper_inc,
        })
    }

    fn lower_bound<T: RangeElement>(&self) -> Result<RangeBound<T>, String> {
        decode_bound(self.lower.as_deref(), self.lower_inc)
    }

    fn upper_bound<T: RangeElement>(&self) -> Result<RangeBound<T>, String> {
        decode_bound(self.upper.as_deref(), self.upper_inc)
    }
}

fn decode_bound<T: RangeElement>(text: Option<&str>, inclusive: bool) -> Result<RangeBound<T>, String> {
    let Some(text) = text else {
        return Ok(RangeBound::Unbounded);
    };
    let value = T::parse_text(text)?;

    Ok(if inclusive {
        RangeBound::Inclusive(value)
    } else {
        RangeBound::Exclusive(value)
    })
}

// Read one bound value up to the next unquoted delimiter. An absent value
// (nothing between the delimiters) means the bound is unbounded.
fn split_bound(input: &str) -> Result<(Option<String>, &str), &'static str> {
    let mut out = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = input.char_indices().peekable();

    while let Some((idx, ch)) = chars.next() {
        match ch {
            '"' if in_quotes => {
                if matches!(chars.peek(), Some((_, '"'))) {
                    out.push('"');
                    chars.next();
                } else {
                    in_quotes = false;
                }
            }
            '"' => {
                in_quotes = true;
                quoted = true;
            }
            '\\' => match chars.next() {
                Some((_, escaped)) => out.push(escaped),
                None => return Err("unexpected end of input"),
            },
            ',' | ')' | ']' if !in_quotes => {
                let value = if quoted {
                    Some(out)
                } else {
                    let trimmed = out.trim();
                    (!trimmed.is_empty()).then(|| trimmed.to_string())
                };

                return Ok((value, &input[idx..]));
            }
            _ => out.push(ch),
        }
    }

    Err("unexpected end of input")
}

impl<T: RangeElement> Serialize for Range<T> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de, T: RangeElement> Deserialize<'de> for Range<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;

        text.parse().map_err(de::Error::custom)
    }
}
