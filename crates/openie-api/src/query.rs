//! Query string parsing
//!
//! Decodes a raw query string into an ordered multi-map. Parameters are
//! separated by `&` or `;`, each split at its first `=`. Names and values are
//! form-decoded (`+` is a space, `%XX` is a byte). Decoded bytes that are not
//! UTF-8 are replaced with U+FFFD rather than rejected.
//!
//! Author: hephaex@gmail.com

use std::borrow::Cow;

use indexmap::IndexMap;
use thiserror::Error;

/// Query decoding errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum QueryError {
    #[error("Malformed percent-escape at byte {position} in '{component}'")]
    MalformedEscape { component: String, position: usize },
}

/// Decoded request parameters in first-occurrence order
///
/// Each occurrence of a name appends one value; a segment without `=`
/// appends `None`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QueryParams {
    params: IndexMap<String, Vec<Option<String>>>,
}

impl QueryParams {
    /// Parse a raw (still percent-encoded) query string
    pub fn parse(raw_query: Option<&str>) -> Result<Self, QueryError> {
        let mut params: IndexMap<String, Vec<Option<String>>> = IndexMap::new();

        let Some(raw_query) = raw_query else {
            return Ok(Self { params });
        };

        // Empty segments are kept: "a=1&&b=2" records an empty name
        for segment in raw_query.split(['&', ';']) {
            let (name, value) = match segment.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (segment, None),
            };

            let name = decode_component(name)?;
            let value = value.map(decode_component).transpose()?;
            params.entry(name).or_default().push(value);
        }

        Ok(Self { params })
    }

    /// All values supplied for `name`, in order
    pub fn get(&self, name: &str) -> Option<&[Option<String>]> {
        self.params.get(name).map(Vec::as_slice)
    }

    /// Value of the first occurrence of `name`
    ///
    /// `Some(None)` means the name appeared without `=`.
    pub fn first(&self, name: &str) -> Option<Option<&str>> {
        self.params
            .get(name)
            .and_then(|values| values.first())
            .map(Option::as_deref)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.params.contains_key(name)
    }

    /// Parameter names in first-occurrence order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.params.len()
    }

    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }
}

/// Form-decode a single name or value
pub fn decode_component(raw: &str) -> Result<String, QueryError> {
    check_escapes(raw)?;

    let spaced: Cow<'_, str> = if raw.contains('+') {
        Cow::Owned(raw.replace('+', " "))
    } else {
        Cow::Borrowed(raw)
    };

    let bytes = urlencoding::decode_binary(spaced.as_bytes());
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Every `%` must be followed by two hex digits
fn check_escapes(raw: &str) -> Result<(), QueryError> {
    let bytes = raw.as_bytes();
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|hex| hex.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(QueryError::MalformedEscape {
                    component: raw.to_string(),
                    position: i,
                });
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    Ok(())
}
