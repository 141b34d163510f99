use std::collections::BTreeMap;
use std::fmt;
use std::ops::RangeInclusive;

use url::form_urlencoded;

use crate::config::query::{
    KEY_DEPOSIT, KEY_DURATION, KEY_END_WEIGHT, KEY_FEES, KEY_INITIAL_WEIGHT, KEY_VOLUME,
};
use crate::config::{AMOUNT_RANGE, FEE_RANGE, QUERY_DEFAULTS, SHARE_KEY_ORDER};
use crate::domain::{DurationBucket, Fees, RunSettings, Weight};

/// Flat string-keyed query representation of a [`RunSettings`].
pub type QueryMap = BTreeMap<String, String>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryField {
    Duration,
    InitialWeight,
    EndWeight,
    Deposit,
    Fees,
    Volume,
}

impl QueryField {
    pub fn key(self) -> &'static str {
        match self {
            QueryField::Duration => KEY_DURATION,
            QueryField::InitialWeight => KEY_INITIAL_WEIGHT,
            QueryField::EndWeight => KEY_END_WEIGHT,
            QueryField::Deposit => KEY_DEPOSIT,
            QueryField::Fees => KEY_FEES,
            QueryField::Volume => KEY_VOLUME,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum DecodeReason {
    /// Duration is not one of the named buckets
    UnknownDuration(String),
    /// A pair field did not hold exactly two comma-separated values
    WrongArity { found: usize },
    /// A token was empty, non-numeric or not finite
    NotANumber(String),
    /// A number the settings form cannot hold
    OutOfRange { value: f64, min: f64, max: f64 },
}

/// Why a query could not be turned into settings. Names the first failing field.
#[derive(Debug, Clone, PartialEq)]
pub struct DecodeError {
    pub field: QueryField,
    pub reason: DecodeReason,
}

impl fmt::Display for DecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = self.field.key();
        match &self.reason {
            DecodeReason::UnknownDuration(value) => {
                write!(f, "invalid `{}`: unknown duration '{}'", key, value)
            }
            DecodeReason::WrongArity { found } => write!(
                f,
                "invalid `{}`: expected 2 comma-separated values, found {}",
                key, found
            ),
            DecodeReason::NotANumber(token) => {
                write!(f, "invalid `{}`: '{}' is not a number", key, token)
            }
            DecodeReason::OutOfRange { value, min, max } => write!(
                f,
                "invalid `{}`: {} is outside {}..={}",
                key,
                format_number(*value),
                format_number(*min),
                format_number(*max)
            ),
        }
    }
}

impl std::error::Error for DecodeError {}

/// Decodes a query into settings.
///
/// Caller keys are merged over [`QUERY_DEFAULTS`], so missing keys fall back
/// to defaults. Decoding is all-or-nothing: the first invalid field fails the
/// whole decode and no partial settings are returned.
pub fn decode(query: &QueryMap) -> Result<RunSettings, DecodeError> {
    let mut merged: BTreeMap<&str, &str> = QUERY_DEFAULTS.entries().into_iter().collect();
    for (key, value) in query {
        merged.insert(key.as_str(), value.as_str());
    }
    let get = |key: &str| merged.get(key).copied().unwrap_or_default();

    let duration_name = get(KEY_DURATION).trim();
    let duration = DurationBucket::from_name(duration_name).ok_or_else(|| DecodeError {
        field: QueryField::Duration,
        reason: DecodeReason::UnknownDuration(duration_name.to_string()),
    })?;

    let (stars, osmo) = decode_pair(
        QueryField::InitialWeight,
        get(KEY_INITIAL_WEIGHT),
        &AMOUNT_RANGE,
    )?;
    let initial_weight = Weight::new(stars, osmo);

    let (stars, osmo) = decode_pair(QueryField::EndWeight, get(KEY_END_WEIGHT), &AMOUNT_RANGE)?;
    let end_weight = Weight::new(stars, osmo);

    let (stars, osmo) = decode_pair(QueryField::Deposit, get(KEY_DEPOSIT), &AMOUNT_RANGE)?;
    let deposit = Weight::new(stars, osmo);

    let (swap, exit) = decode_pair(QueryField::Fees, get(KEY_FEES), &FEE_RANGE)?;
    let fees = Fees::new(swap, exit);

    let volume = decode_number(QueryField::Volume, get(KEY_VOLUME), &AMOUNT_RANGE)?;

    Ok(RunSettings {
        initial_weight,
        end_weight,
        deposit,
        duration,
        volume,
        fees,
    })
}

/// Inverse of [`decode`]: one key per field, pairs comma-joined.
pub fn encode(settings: &RunSettings) -> QueryMap {
    let pair = |a: f64, b: f64| format!("{},{}", format_number(a), format_number(b));

    let mut query = QueryMap::new();
    query.insert(KEY_DURATION.to_string(), settings.duration.name().to_string());
    query.insert(
        KEY_INITIAL_WEIGHT.to_string(),
        pair(settings.initial_weight.stars, settings.initial_weight.osmo),
    );
    query.insert(
        KEY_END_WEIGHT.to_string(),
        pair(settings.end_weight.stars, settings.end_weight.osmo),
    );
    query.insert(
        KEY_DEPOSIT.to_string(),
        pair(settings.deposit.stars, settings.deposit.osmo),
    );
    query.insert(
        KEY_FEES.to_string(),
        pair(settings.fees.swap, settings.fees.exit),
    );
    query.insert(KEY_VOLUME.to_string(), format_number(settings.volume));
    query
}

/// Parses a raw query string into a map. Accepts a bare query
/// (`duration=3d&...`), a leading `?`, or a full URL. Repeated keys keep the
/// last value.
pub fn parse_query_string(raw: &str) -> QueryMap {
    let raw = raw.trim();
    let query = if raw.contains("://") {
        match url::Url::parse(raw) {
            Ok(parsed) => parsed.query().unwrap_or_default().to_string(),
            Err(e) => {
                log::warn!("Could not parse '{}' as a URL: {}", raw, e);
                String::new()
            }
        }
    } else {
        raw.trim_start_matches('?').to_string()
    };

    url::form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect()
}

/// Serializes a query map in share-link key order. Keys outside the known set
/// are appended afterwards in map order. Pair commas stay literal.
pub fn to_query_string(query: &QueryMap) -> String {
    let known = SHARE_KEY_ORDER
        .iter()
        .filter_map(|key| query.get(*key).map(|value| (*key, value.as_str())));
    let extra = query
        .iter()
        .filter(|(key, _)| !SHARE_KEY_ORDER.contains(&key.as_str()))
        .map(|(key, value)| (key.as_str(), value.as_str()));

    known
        .chain(extra)
        .map(|(key, value)| format!("{}={}", escape(key), escape_pair(value)))
        .collect::<Vec<_>>()
        .join("&")
}

/// Share link reconstructing `settings` from the in-memory state.
pub fn share_url(base_url: &str, settings: &RunSettings) -> String {
    format!(
        "{}/?{}",
        base_url.trim_end_matches('/'),
        to_query_string(&encode(settings))
    )
}

/// Canonical numeric text: shortest round-tripping form, no exponent,
/// no trailing `.0` on whole values.
pub fn format_number(value: f64) -> String {
    format!("{}", value)
}

fn escape(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes()).collect()
}

fn escape_pair(value: &str) -> String {
    value.split(',').map(escape).collect::<Vec<_>>().join(",")
}

fn decode_pair(
    field: QueryField,
    raw: &str,
    range: &RangeInclusive<f64>,
) -> Result<(f64, f64), DecodeError> {
    let tokens: Vec<&str> = raw.split(',').collect();
    if tokens.len() != 2 {
        return Err(DecodeError {
            field,
            reason: DecodeReason::WrongArity {
                found: tokens.len(),
            },
        });
    }
    Ok((
        decode_number(field, tokens[0], range)?,
        decode_number(field, tokens[1], range)?,
    ))
}

fn decode_number(
    field: QueryField,
    token: &str,
    range: &RangeInclusive<f64>,
) -> Result<f64, DecodeError> {
    let token = token.trim();
    let value = match token.parse::<f64>() {
        Ok(n) if n.is_finite() => n,
        _ => {
            return Err(DecodeError {
                field,
                reason: DecodeReason::NotANumber(token.to_string()),
            });
        }
    };

    if !range.contains(&value) {
        return Err(DecodeError {
            field,
            reason: DecodeReason::OutOfRange {
                value,
                min: *range.start(),
                max: *range.end(),
            },
        });
    }
    Ok(value)
}
