//! `application/x-www-form-urlencoded` body decoding.
//!
//! Stricter than a general purpose urlencoded parser: every `&`-separated field
//! has to contain a `=`, so `name` or an empty field is an error instead of a key
//! with an empty value.

use std::collections::HashMap;

use crate::ensure;
use crate::protocol::ParseError;

/// Decoded form fields. When a name repeats, the last value wins.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormParams {
    inner: HashMap<String, String>,
}

impl FormParams {
    pub fn get(&self, name: &str) -> Option<&str> {
        self.inner.get(name).map(String::as_str)
    }
}

/// Decodes a urlencoded form body.
///
/// Names and values are percent-decoded and `+` becomes a space.
///
/// # Errors
///
/// Returns [`ParseError::MissingEquals`] for the first field without a `=`.
pub fn decode(body: &str) -> Result<FormParams, ParseError> {
    let mut inner = HashMap::new();

    for field in body.split('&') {
        ensure!(field.contains('='), ParseError::missing_equals(field));

        let pairs = serde_urlencoded::from_str::<Vec<(String, String)>>(field).map_err(ParseError::invalid_body)?;
        inner.extend(pairs);
    }

    Ok(FormParams { inner })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_plus_and_percent() {
        let params = decode("guest=Hello+World%21").unwrap();
        let expected = HashMap::from([("guest".to_owned(), "Hello World!".to_owned())]);
        assert_eq!(params, FormParams { inner: expected });
    }

    #[test]
    fn decodes_names_too() {
        let params = decode("first%20name=a&x+y=%3D%26").unwrap();
        assert_eq!(params.get("first name"), Some("a"));
        assert_eq!(params.get("x y"), Some("=&"));
    }

    #[test]
    fn splits_on_first_equals_only() {
        let params = decode("expr=a=b").unwrap();
        assert_eq!(params.get("expr"), Some("a=b"));
    }

    #[test]
    fn empty_value_is_allowed() {
        let params = decode("guest=").unwrap();
        assert_eq!(params.get("guest"), Some(""));
    }

    #[test]
    fn last_duplicate_wins() {
        let params = decode("guest=one&guest=two").unwrap();
        assert_eq!(params.get("guest"), Some("two"));
    }

    #[test]
    fn field_without_equals_is_an_error() {
        let error = decode("guest=hello&flag").unwrap_err();
        assert!(matches!(error, ParseError::MissingEquals { field } if field == "flag"));
    }

    #[test]
    fn empty_body_is_an_error() {
        assert!(matches!(decode(""), Err(ParseError::MissingEquals { .. })));
        assert!(matches!(decode("a=1&&b=2"), Err(ParseError::MissingEquals { .. })));
    }
}
