use std::fmt;

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::Serialize;
use serde_json::Value;

use crate::error::HashedStateError;

/// Characters left alone by `encodeURIComponent`; everything else is escaped,
/// including the `#` and `=` delimiters.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// A URL fragment split into its `#`-delimited segments.
///
/// Segments are kept as raw text, so segments this editor does not own, or
/// cannot parse, survive a rewrite untouched and in order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragment {
    segments: Vec<String>,
}

impl Fragment {
    /// Parses `#a=1#b=2`; the leading `#` is optional and empty segments are dropped.
    pub fn parse(fragment: &str) -> Self {
        let body = fragment.strip_prefix('#').unwrap_or(fragment);
        Self {
            segments: body
                .split('#')
                .filter(|segment| !segment.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// Raw (still encoded) value of the first segment named `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.segments
            .iter()
            .filter_map(|segment| segment.split_once('='))
            .find(|(key, _)| *key == name)
            .map(|(_, value)| value)
    }

    /// Replaces the value of every segment named `name`, or appends a new
    /// segment when there is none.
    pub fn set(&mut self, name: &str, encoded_value: &str) {
        let mut found = false;
        for segment in &mut self.segments {
            if segment.split_once('=').is_some_and(|(key, _)| key == name) {
                *segment = format!("{name}={encoded_value}");
                found = true;
            }
        }
        if !found {
            self.segments.push(format!("{name}={encoded_value}"));
        }
    }
}

impl fmt::Display for Fragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            write!(f, "#{segment}")?;
        }
        Ok(())
    }
}

/// Serializes a value to JSON and percent-encodes it for the fragment.
pub fn encode_value<T: Serialize + ?Sized>(value: &T) -> Result<String, HashedStateError> {
    let json = serde_json::to_string(value)?;
    Ok(utf8_percent_encode(&json, COMPONENT).to_string())
}

/// Decodes a raw segment value. Accepts both fully escaped values and the raw
/// JSON some browsers hand back from `location.hash`.
pub fn decode_value(raw: &str) -> Result<Value, HashedStateError> {
    let decoded = percent_decode_str(raw)
        .decode_utf8()
        .map_err(|_| HashedStateError::InvalidEncoding(raw.to_owned()))?;
    Ok(serde_json::from_str(&decoded)?)
}
