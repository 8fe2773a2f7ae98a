//! Interactive prompts
//!
//! Prompts read from any `BufRead` and write to any `Write` so the store
//! decision can be resolved from a terminal, a pipe, or a test buffer.

use std::io::{BufRead, Write};

use crate::error::{Result, VitalsError};

/// Single accepted affirmative answer, compared case-insensitively
pub const AFFIRMATIVE: &str = "s";

/// Question asked before the pipeline runs
pub const STORE_QUESTION: &str = "Do you want to save the data to MongoDB? (s/n): ";

/// Connection string request
pub const URI_QUESTION: &str = "Enter your MongoDB connection string:\n> ";

/// True if `answer` is the affirmative token
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case(AFFIRMATIVE)
}

/// Print `question` and read one line
///
/// # Returns
/// * `Result<Option<String>>` - Trimmed line, or `None` at end of input
pub fn prompt_line<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> Result<Option<String>> {
    write!(output, "{question}")
        .and_then(|_| output.flush())
        .map_err(|e| VitalsError::Generic(format!("Failed to flush stdout: {}", e)))?;

    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .map_err(|e| VitalsError::Generic(format!("Failed to read input: {}", e)))?;

    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Ask a yes/no question; anything but the affirmative token is a no
pub fn prompt_confirmation<R: BufRead, W: Write>(
    question: &str,
    input: &mut R,
    output: &mut W,
) -> Result<bool> {
    Ok(prompt_line(question, input, output)?
        .as_deref()
        .is_some_and(is_affirmative))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_is_affirmative() {
        assert!(is_affirmative("s"));
        assert!(is_affirmative("S"));
        assert!(is_affirmative(" s\n"));
        assert!(!is_affirmative("si"));
        assert!(!is_affirmative("y"));
        assert!(!is_affirmative("n"));
        assert!(!is_affirmative(""));
    }

    #[test]
    fn test_prompt_confirmation() {
        let mut output = Vec::new();
        let confirmed =
            prompt_confirmation(STORE_QUESTION, &mut Cursor::new("S\n"), &mut output).unwrap();
        assert!(confirmed);
        assert_eq!(String::from_utf8(output).unwrap(), STORE_QUESTION);

        let confirmed =
            prompt_confirmation(STORE_QUESTION, &mut Cursor::new("no\n"), &mut Vec::new()).unwrap();
        assert!(!confirmed);
    }

    #[test]
    fn test_prompt_at_end_of_input() {
        let mut empty = Cursor::new("");
        assert_eq!(prompt_line(URI_QUESTION, &mut empty, &mut Vec::new()).unwrap(), None);
        assert!(!prompt_confirmation(STORE_QUESTION, &mut Cursor::new(""), &mut Vec::new()).unwrap());
    }

    #[test]
    fn test_prompt_line_trims() {
        let line = prompt_line(
            URI_QUESTION,
            &mut Cursor::new("  mongodb://localhost:27017 \n"),
            &mut Vec::new(),
        )
        .unwrap();
        assert_eq!(line.as_deref(), Some("mongodb://localhost:27017"));
    }
}
