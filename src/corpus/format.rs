//! Canonical text rendering and field extraction
//!
//! The canonical form is a single searchable string:
//! `the title of the patent is {title} and its abstract is {abstract} dated {date}`.
//! Rendering lowercases title and abstract; extraction is the exact inverse
//! apart from that one-directional case transformation.

use thiserror::Error;

pub const TITLE_PREFIX: &str = "the title of the patent is ";
pub const ABSTRACT_DELIMITER: &str = " and its abstract is ";
pub const DATE_DELIMITER: &str = " dated ";

#[derive(Error, Debug)]
pub enum FormatError {
    #[error("Malformed canonical record: delimiter {delimiter:?} not found")]
    MalformedRecord { delimiter: &'static str },
}

/// Render a record into its canonical searchable string.
pub fn render(title: &str, abstract_text: &str, date: &str) -> String {
    format!(
        "{}{}{}{}{}{}",
        TITLE_PREFIX,
        title.to_lowercase(),
        ABSTRACT_DELIMITER,
        abstract_text.to_lowercase(),
        DATE_DELIMITER,
        date
    )
}

/// Extract the (lowercased) title from a canonical string.
pub fn extract_title(text: &str) -> Result<&str, FormatError> {
    let start = text
        .find(TITLE_PREFIX)
        .ok_or(FormatError::MalformedRecord {
            delimiter: TITLE_PREFIX,
        })?
        + TITLE_PREFIX.len();
    let end = text[start..]
        .find(ABSTRACT_DELIMITER)
        .ok_or(FormatError::MalformedRecord {
            delimiter: ABSTRACT_DELIMITER,
        })?;
    Ok(&text[start..start + end])
}

/// Extract the (lowercased) abstract from a canonical string.
pub fn extract_abstract(text: &str) -> Result<&str, FormatError> {
    let start = text
        .find(ABSTRACT_DELIMITER)
        .ok_or(FormatError::MalformedRecord {
            delimiter: ABSTRACT_DELIMITER,
        })?
        + ABSTRACT_DELIMITER.len();
    // rfind: the date never contains the delimiter, the abstract might
    let end = text[start..]
        .rfind(DATE_DELIMITER)
        .ok_or(FormatError::MalformedRecord {
            delimiter: DATE_DELIMITER,
        })?;
    Ok(&text[start..start + end])
}

/// Extract the verbatim date from a canonical string.
pub fn extract_date(text: &str) -> Result<&str, FormatError> {
    let start = text
        .rfind(DATE_DELIMITER)
        .ok_or(FormatError::MalformedRecord {
            delimiter: DATE_DELIMITER,
        })?
        + DATE_DELIMITER.len();
    Ok(&text[start..])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trip() {
        let text = render("Neural Net Widget", "A Device.", "2020-01-01");
        assert_eq!(extract_title(&text).unwrap(), "neural net widget");
        assert_eq!(extract_abstract(&text).unwrap(), "a device.");
        assert_eq!(extract_date(&text).unwrap(), "2020-01-01");
    }

    #[test]
    fn round_trip_with_delimiter_in_abstract() {
        let text = render("Widget", "a device, dated and tested.", "2020-01-01");
        assert_eq!(extract_abstract(&text).unwrap(), "a device, dated and tested.");
        assert_eq!(extract_date(&text).unwrap(), "2020-01-01");
    }

    #[test]
    fn malformed_record_is_rejected() {
        let result = extract_title("not a canonical string");
        assert!(matches!(
            result,
            Err(FormatError::MalformedRecord { delimiter }) if delimiter == TITLE_PREFIX
        ));

        let result = extract_abstract("the title of the patent is x");
        assert!(result.is_err());

        let result = extract_date("the title of the patent is x and its abstract is y");
        assert!(result.is_err());
    }

    #[test]
    fn empty_fields_round_trip() {
        let text = render("", "", "");
        assert_eq!(extract_title(&text).unwrap(), "");
        assert_eq!(extract_abstract(&text).unwrap(), "");
        assert_eq!(extract_date(&text).unwrap(), "");
    }
}
