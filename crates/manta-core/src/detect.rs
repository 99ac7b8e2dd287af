//! Input-format detection for raw document text.

use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputFormat {
    #[default]
    Json,
    Xml,
}

impl InputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            InputFormat::Json => "json",
            InputFormat::Xml => "xml",
        }
    }
}

impl FromStr for InputFormat {
    type Err = ();

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            _ => Err(()),
        }
    }
}

/// Classifies raw text as XML or JSON.
///
/// XML documents are recognized by their first non-whitespace byte (`<`); everything else is
/// handed to the JSON path, whose own parser reports malformed input.
pub fn detect_format(text: &str) -> InputFormat {
    if text.trim_start().starts_with('<') {
        InputFormat::Xml
    } else {
        InputFormat::Json
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detects_xml_by_leading_angle_bracket() {
        assert_eq!(detect_format("  <config/>"), InputFormat::Xml);
        assert_eq!(detect_format("<a>1</a>"), InputFormat::Xml);
    }

    #[test]
    fn everything_else_is_json() {
        assert_eq!(detect_format("{\"a\": 1}"), InputFormat::Json);
        assert_eq!(detect_format("[1, 2]"), InputFormat::Json);
        assert_eq!(detect_format(""), InputFormat::Json);
    }

    #[test]
    fn parses_format_names_case_insensitively() {
        assert_eq!("XML".parse::<InputFormat>(), Ok(InputFormat::Xml));
        assert_eq!(" json ".parse::<InputFormat>(), Ok(InputFormat::Json));
        assert!("yaml".parse::<InputFormat>().is_err());
    }
}
