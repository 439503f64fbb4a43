//! Deployment-specific payload conventions for `create`.
//!
//! When the engine cannot decode a `create` payload as structured records,
//! the console consults this registry by object id. Objects without an entry
//! reject the payload as a syntax error.

use std::collections::BTreeMap;

use fleet_types::{DataRecord, DataValue};

use super::CommandError;

/// Object id whose instances accept a bare integer payload.
pub const BARE_INTEGER_OBJECT: u16 = 31024;

/// Converts operator text into records for one object.
pub type FallbackParser = fn(&str) -> Result<Vec<DataRecord>, CommandError>;

/// Fallback parsers keyed by object id.
#[derive(Debug, Clone)]
pub struct PayloadFallbacks {
    parsers: BTreeMap<u16, FallbackParser>,
}

impl PayloadFallbacks {
    /// Builds a registry with no entries.
    #[must_use]
    pub const fn empty() -> Self {
        Self {
            parsers: BTreeMap::new(),
        }
    }

    /// Registers `parser` for `object`, replacing any previous entry.
    #[must_use]
    pub fn with(mut self, object: u16, parser: FallbackParser) -> Self {
        self.parsers.insert(object, parser);
        self
    }

    /// Parses `text` with the entry for `object`, if there is one.
    #[must_use]
    pub fn parse(&self, object: u16, text: &str) -> Option<Result<Vec<DataRecord>, CommandError>> {
        self.parsers.get(&object).map(|parser| parser(text))
    }
}

impl Default for PayloadFallbacks {
    fn default() -> Self {
        Self::empty().with(BARE_INTEGER_OBJECT, bare_integer)
    }
}

/// Reads a signed integer as the value of resource 1.
///
/// # Errors
///
/// Returns [`CommandError::InvalidValue`] when `text` is not an integer.
/// Trailing text after the digits is rejected, not ignored.
pub fn bare_integer(text: &str) -> Result<Vec<DataRecord>, CommandError> {
    let value = text
        .parse::<i64>()
        .map_err(|_| CommandError::InvalidValue)?;
    Ok(vec![DataRecord::new(1, DataValue::Integer(value))])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_registry_accepts_bare_integers_for_reserved_object() {
        let fallbacks = PayloadFallbacks::default();
        let records = fallbacks
            .parse(BARE_INTEGER_OBJECT, "-42")
            .expect("entry registered")
            .expect("integer parses");
        assert_eq!(records, vec![DataRecord::new(1, DataValue::Integer(-42))]);
    }

    #[test]
    fn non_integer_is_an_invalid_value() {
        let outcome = PayloadFallbacks::default().parse(BARE_INTEGER_OBJECT, "4x");
        assert!(matches!(outcome, Some(Err(CommandError::InvalidValue))));
    }

    #[test]
    fn digits_followed_by_text_are_rejected() {
        let outcome = PayloadFallbacks::default().parse(BARE_INTEGER_OBJECT, "42abc");
        assert!(matches!(outcome, Some(Err(CommandError::InvalidValue))));
    }

    #[test]
    fn other_objects_have_no_fallback() {
        assert!(PayloadFallbacks::default().parse(1024, "7").is_none());
        assert!(PayloadFallbacks::empty().parse(BARE_INTEGER_OBJECT, "7").is_none());
    }
}
