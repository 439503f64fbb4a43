//! Whitespace tokenizer for command lines.
//!
//! Handlers pull arguments one at a time from a cursor and must finish with
//! [`end_of_args`]; any leftover text is a syntax error.

use super::CommandError;

/// Splits the next whitespace-delimited token off `remaining`.
///
/// Returns the token and the text after it, or `None` when only whitespace
/// is left.
#[must_use]
pub fn next_argument(remaining: &str) -> Option<(&str, &str)> {
    let trimmed = remaining.trim_start();
    if trimmed.is_empty() {
        return None;
    }
    let end = trimmed.find(char::is_whitespace).unwrap_or(trimmed.len());
    Some(trimmed.split_at(end))
}

/// Succeeds when only whitespace is left after `cursor`.
///
/// # Errors
///
/// Returns [`CommandError::Syntax`] when any other text remains.
pub fn end_of_args(cursor: &str) -> Result<(), CommandError> {
    if cursor.trim_start().is_empty() {
        Ok(())
    } else {
        Err(CommandError::Syntax)
    }
}

/// Cursor over the arguments of one command line.
#[derive(Debug, Clone, Copy)]
pub struct Arguments<'a> {
    rest: &'a str,
}

impl<'a> Arguments<'a> {
    /// Starts a cursor at `line`.
    #[must_use]
    pub const fn new(line: &'a str) -> Self {
        Self { rest: line }
    }

    /// Takes a required argument.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Syntax`] when no argument is left.
    pub fn required(&mut self) -> Result<&'a str, CommandError> {
        self.optional().ok_or(CommandError::Syntax)
    }

    /// Takes an argument if one is left.
    pub fn optional(&mut self) -> Option<&'a str> {
        let (token, rest) = next_argument(self.rest)?;
        self.rest = rest;
        Some(token)
    }

    /// Requires that nothing is left.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError::Syntax`] on trailing text.
    pub fn finish(self) -> Result<(), CommandError> {
        end_of_args(self.rest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("read 1 /3", Some(("read", " 1 /3")))]
    #[case("   /3/0  ", Some(("/3/0", "  ")))]
    #[case("\t1\t/3", Some(("1", "\t/3")))]
    #[case("   ", None)]
    #[case("", None)]
    fn splits_tokens(#[case] input: &str, #[case] expected: Option<(&str, &str)>) {
        assert_eq!(next_argument(input), expected);
    }

    #[rstest]
    #[case("", true)]
    #[case("  \t ", true)]
    #[case(" extra", false)]
    fn detects_trailing_text(#[case] cursor: &str, #[case] at_end: bool) {
        assert_eq!(end_of_args(cursor).is_ok(), at_end);
    }

    #[test]
    fn cursor_walks_arguments_then_requires_end() {
        let mut arguments = Arguments::new(" 3 /1024/7 42");
        assert_eq!(arguments.required().ok(), Some("3"));
        assert_eq!(arguments.required().ok(), Some("/1024/7"));
        assert!(arguments.finish().is_err());
        assert_eq!(arguments.optional(), Some("42"));
        assert!(arguments.finish().is_ok());
        assert!(arguments.required().is_err());
    }
}
