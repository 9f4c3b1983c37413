//! Utility functions and types.

use std::fmt::Debug;

/// Redacts a string by replacing all but the first and last three characters
/// with asterisks.
///
/// - Fewer than 12 characters: entirely redacted.
/// - 12 or more characters: only the first three and the last three survive.
///
/// Enough survives to tell two redacted values apart without leaking either.
pub(crate) struct Redact<'a>(&'a str);

impl<'a> From<&'a String> for Redact<'a> {
    fn from(value: &'a String) -> Self {
        Redact(value.as_str())
    }
}

impl<'a> From<&'a Option<String>> for Redact<'a> {
    fn from(value: &'a Option<String>) -> Self {
        match value {
            None => Redact(""),
            Some(v) => Redact(v),
        }
    }
}

impl<'a> Debug for Redact<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let length = self.0.len();
        if length == 0 {
            f.write_str("EMPTY")
        } else if length < 12 {
            f.write_str("***")
        } else {
            f.write_str(&self.0[..3])?;
            f.write_str("***")?;
            f.write_str(&self.0[length - 3..])
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redact() {
        let cases = vec![
            ("Short".to_string(), "***"),
            ("Hello World!".to_string(), "Hel***ld!"),
            ("This is a longer string".to_string(), "Thi***ing"),
            ("".to_string(), "EMPTY"),
            ("HelloWorld".to_string(), "***"),
        ];

        for (input, expected) in cases {
            assert_eq!(
                format!("{:?}", Redact::from(&input)),
                expected,
                "Failed on input: {}",
                input
            );
        }
    }
}
