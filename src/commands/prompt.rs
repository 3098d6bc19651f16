//! Line-based terminal prompts.

use std::io::{self, BufRead, Write};

/// Print `label` (with an optional bracketed hint) and read one line.
///
/// Returns the trimmed answer, which may be empty.
///
/// # Errors
///
/// Fails on IO errors, or with `UnexpectedEof` if input is closed.
pub fn ask<R: BufRead, W: Write>(
    input: &mut R,
    output: &mut W,
    label: &str,
    hint: Option<&str>,
) -> io::Result<String> {
    match hint {
        Some(hint) if !hint.is_empty() => write!(output, "{} [{}]: ", label, hint)?,
        _ => write!(output, "{}: ", label)?,
    }
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed before an answer was given",
        ));
    }

    Ok(line.trim().to_string())
}

/// Ask a yes/no question; anything but "y" or "yes" means no.
pub fn confirm<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> io::Result<bool> {
    let answer = ask(input, output, question, Some("y/N"))?;
    Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_ask_trims_answer() {
        let mut input = Cursor::new("  PROJ \n");
        let mut output = Vec::new();

        let answer = ask(&mut input, &mut output, "Project", Some("OPS")).unwrap();

        assert_eq!(answer, "PROJ");
        assert_eq!(String::from_utf8(output).unwrap(), "Project [OPS]: ");
    }

    #[test]
    fn test_ask_eof() {
        let mut input = Cursor::new("");
        let err = ask(&mut input, &mut Vec::new(), "Project", None).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::UnexpectedEof);
    }

    #[test]
    fn test_confirm() {
        let mut output = Vec::new();
        assert!(confirm(&mut Cursor::new("Y\n"), &mut output, "Overwrite?").unwrap());
        assert!(confirm(&mut Cursor::new("yes\n"), &mut output, "Overwrite?").unwrap());
        assert!(!confirm(&mut Cursor::new("\n"), &mut output, "Overwrite?").unwrap());
        assert!(!confirm(&mut Cursor::new("nope\n"), &mut output, "Overwrite?").unwrap());
    }
}
