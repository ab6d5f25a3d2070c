//! Human-readable size and duration parsing.
//!
//! Policy documents express sizes as magnitude strings ("2.37MB", "1 KiB")
//! and durations as humantime strings ("8h", "1000w") or numeric seconds.
//! The parsers here are pure data transformation and are unit-tested
//! directly against the boundary cases.

use std::fmt;
use std::time::Duration;

use serde::Deserializer;
use serde::de::{self, Visitor};

/// Decimal suffixes are powers of 1000; binary suffixes powers of 1024.
/// Lowercase "k" and the two-letter binary forms are canonical; "K" and
/// "Ki" are accepted because they are common, if technically wrong.
/// Two-letter suffixes must be matched before their one-letter prefixes.
const SUFFIXES: [(&str, f64); 14] = [
    ("ki", 1_024.0),
    ("Ki", 1_024.0),
    ("Mi", 1_048_576.0),
    ("Gi", 1_073_741_824.0),
    ("Ti", 1_099_511_627_776.0),
    ("Pi", 1_125_899_906_842_624.0),
    ("Ei", 1_152_921_504_606_846_976.0),
    ("k", 1e3),
    ("K", 1e3),
    ("M", 1e6),
    ("G", 1e9),
    ("T", 1e12),
    ("P", 1e15),
    ("E", 1e18),
];

/// Parse a human-readable byte count into a whole number of bytes.
///
/// An optional trailing "B" (or, incorrectly, "b") is stripped first. The
/// remaining suffix selects a multiplier from the table above. The mantissa
/// may be decimal, but the product must resolve to a whole number of bytes
/// or the input is rejected; this catches way-too-much-precision inputs
/// such as "1.234567KiB".
pub fn parse_size(input: &str) -> Result<u64, String> {
    let mut v = input.trim();
    if let Some(stripped) = v.strip_suffix(['B', 'b']) {
        v = stripped.trim_end();
    }
    // Maybe it is just a stringified integer.
    if let Ok(n) = v.parse::<u64>() {
        return Ok(n);
    }
    let (mantissa, multiplier) = split_suffix(v);
    let mantissa: f64 = mantissa
        .trim()
        .parse()
        .map_err(|_| format!("could not convert '{input}' to bytes"))?;
    if mantissa < 0.0 {
        return Err(format!("size '{input}' is negative"));
    }
    let product = mantissa * multiplier;
    let rounded = product.round();
    // Tolerate float representation error but reject genuinely fractional
    // byte counts.
    if (product - rounded).abs() > 1e-6 * product.max(1.0) {
        return Err(format!(
            "'{input}' does not resolve to a whole number of bytes"
        ));
    }
    if !rounded.is_finite() || rounded < 0.0 || rounded >= u64::MAX as f64 {
        return Err(format!("size '{input}' is out of range"));
    }
    Ok(rounded as u64)
}

fn split_suffix(v: &str) -> (&str, f64) {
    for (suffix, multiplier) in SUFFIXES {
        if let Some(rest) = v.strip_suffix(suffix) {
            return (rest, multiplier);
        }
    }
    (v, 1.0)
}

/// Parse a humantime duration string such as "8h" or "1000w".
pub fn parse_duration_str(input: &str) -> Result<Duration, String> {
    humantime::parse_duration(input.trim())
        .map_err(|err| format!("could not parse duration '{input}': {err}"))
}

/// Deserialize a byte count from an integer, an integral float, or a
/// human-readable size string.
pub fn de_size<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    struct SizeVisitor;

    impl Visitor<'_> for SizeVisitor {
        type Value = u64;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a byte count or human-readable size string")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<u64, E> {
            Ok(v)
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<u64, E> {
            u64::try_from(v).map_err(|_| E::custom(format!("size {v} is negative")))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<u64, E> {
            if v < 0.0 || v.fract() != 0.0 || v >= u64::MAX as f64 {
                return Err(E::custom(format!("could not convert {v} to a byte count")));
            }
            Ok(v as u64)
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<u64, E> {
            parse_size(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(SizeVisitor)
}

/// Deserialize an optional duration from a humantime string or numeric
/// seconds. Null and absent both mean "unset".
pub fn de_opt_duration<'de, D>(deserializer: D) -> Result<Option<Duration>, D::Error>
where
    D: Deserializer<'de>,
{
    struct OptVisitor;

    impl<'de> Visitor<'de> for OptVisitor {
        type Value = Option<Duration>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a duration string, numeric seconds, or null")
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2>(self, deserializer: D2) -> Result<Self::Value, D2::Error>
        where
            D2: Deserializer<'de>,
        {
            de_duration(deserializer).map(Some)
        }
    }

    deserializer.deserialize_option(OptVisitor)
}

fn de_duration<'de, D>(deserializer: D) -> Result<Duration, D::Error>
where
    D: Deserializer<'de>,
{
    struct DurVisitor;

    impl Visitor<'_> for DurVisitor {
        type Value = Duration;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a duration string or numeric seconds")
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Duration, E> {
            Ok(Duration::from_secs(v))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Duration, E> {
            let secs =
                u64::try_from(v).map_err(|_| E::custom(format!("duration {v} is negative")))?;
            Ok(Duration::from_secs(secs))
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Duration, E> {
            if !v.is_finite() || v < 0.0 {
                return Err(E::custom(format!("could not convert {v} to a duration")));
            }
            Ok(Duration::from_secs_f64(v))
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Duration, E> {
            parse_duration_str(v).map_err(E::custom)
        }
    }

    deserializer.deserialize_any(DurVisitor)
}
