//! Literal formatting for OData URLs.

use std::borrow::Cow;

use chrono::DateTime;
use chrono::FixedOffset;
use chrono::NaiveDate;
use chrono::NaiveDateTime;
use chrono::NaiveTime;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::InputError;
use crate::model::metadata::AttributeType;

/// The OData literal type a FetchXML value is written as.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueType {
    String,
    DateTime,
    Boolean,
    Guid,
    /// 32-bit integer.
    Integer,
    /// 64-bit integer.
    BigInt,
    Decimal,
    Double,
}

impl ValueType {
    /// Selects the literal type for an attribute type.
    pub fn for_attribute(attribute_type: AttributeType) -> Self {
        match attribute_type {
            AttributeType::Money | AttributeType::Decimal => Self::Decimal,
            AttributeType::BigInt => Self::BigInt,
            AttributeType::Boolean => Self::Boolean,
            AttributeType::Double => Self::Double,
            AttributeType::Integer
            | AttributeType::State
            | AttributeType::Status
            | AttributeType::Picklist => Self::Integer,
            AttributeType::Uniqueidentifier
            | AttributeType::Lookup
            | AttributeType::Customer
            | AttributeType::Owner => Self::Guid,
            AttributeType::DateTime => Self::DateTime,
            _ => Self::String,
        }
    }

    fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::DateTime => "datetime",
            Self::Boolean => "boolean",
            Self::Guid => "guid",
            Self::Integer => "integer",
            Self::BigInt => "bigint",
            Self::Decimal => "decimal",
            Self::Double => "double",
        }
    }
}

/// Formats a FetchXML literal as an OData literal of the given type.
///
/// # Example
///
/// ```
/// use fetchxml_lib::query::odata::{format_value, ValueType};
///
/// assert_eq!(format_value(ValueType::String, "O'Neil & Sons").unwrap(), "'O%27%27Neil+%26+Sons'");
/// assert_eq!(format_value(ValueType::DateTime, "2020-01-01").unwrap(), "2020-01-01");
/// assert_eq!(format_value(ValueType::Boolean, "1").unwrap(), "true");
/// assert!(format_value(ValueType::Integer, "ten").is_err());
/// ```
pub fn format_value(value_type: ValueType, value: &str) -> Result<String, InputError> {
    let invalid = |err: &dyn ToString| InputError::invalid_value(value, value_type.name(), err.to_string());

    match value_type {
        ValueType::String => Ok(escape_string(value)),
        ValueType::DateTime => format_datetime(value).ok_or_else(|| invalid(&"unrecognized date format")),
        ValueType::Boolean => Ok(if value == "1" { "true" } else { "false" }.to_string()),
        ValueType::Guid => Uuid::parse_str(value.trim())
            .map(|id| id.hyphenated().to_string())
            .map_err(|e| invalid(&e)),
        ValueType::Integer => value
            .trim()
            .parse::<i32>()
            .map(|n| encode(&n.to_string()))
            .map_err(|e| invalid(&e)),
        ValueType::BigInt => value
            .trim()
            .parse::<i64>()
            .map(|n| encode(&n.to_string()))
            .map_err(|e| invalid(&e)),
        ValueType::Decimal => value
            .trim()
            .parse::<Decimal>()
            .map(|n| encode(&n.to_string()))
            .map_err(|e| invalid(&e)),
        ValueType::Double => value
            .trim()
            .parse::<f64>()
            .map_err(|e| invalid(&e))
            .and_then(|n| {
                if n.is_finite() {
                    Ok(encode(&n.to_string()))
                } else {
                    Err(invalid(&"not a finite number"))
                }
            }),
    }
}

/// Quotes and encodes a string literal.
///
/// Single quotes are doubled, then the text is percent-encoded.
pub fn escape_string(s: &str) -> String {
    format!("'{}'", encode(&s.replace('\'', "''")))
}

/// Percent-encodes text for use in a query string.
///
/// Spaces become `+`. Escapes use lowercase hex, and `!`, `(` and `)` are
/// left as they are.
pub fn encode(s: &str) -> String {
    url::form_urlencoded::byte_serialize(s.as_bytes())
        .map(|chunk| match chunk {
            "%21" => Cow::Borrowed("!"),
            "%28" => Cow::Borrowed("("),
            "%29" => Cow::Borrowed(")"),
            escaped if escaped.starts_with('%') => Cow::Owned(escaped.to_ascii_lowercase()),
            plain => Cow::Borrowed(plain),
        })
        .collect()
}

/// Renders midnight as a plain date, anything else as a UTC timestamp.
fn format_datetime(value: &str) -> Option<String> {
    let parsed = parse_datetime(value.trim())?;

    if parsed.time() == NaiveTime::MIN {
        Some(parsed.format("%Y-%m-%d").to_string())
    } else {
        Some(parsed.with_timezone(&Utc).format("%Y-%m-%dT%H:%M:%SZ").to_string())
    }
}

/// Parses an offset-aware timestamp. Values without an offset are UTC.
fn parse_datetime(value: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt);
    }

    let utc = FixedOffset::east_opt(0)?;
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return naive.and_local_timezone(utc).single();
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .map(|date| date.and_time(NaiveTime::MIN))
        .and_then(|naive| naive.and_local_timezone(utc).single())
}
