//! Formatting helpers for the node detail-inspection surface.
//!
//! When a node is activated, the consumer receives `{content, path}` from
//! [`crate::graph::NodeData`]. The content is the builder's newline-joined `"key: value"` text;
//! these helpers re-parse it into typed lines for display and produce the copyable forms.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailKind {
    Boolean,
    Number,
    String,
}

/// One re-parsed `"key: value"` line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailLine {
    pub key: String,
    /// Display token: booleans lowercased, numbers kept verbatim, strings re-quoted.
    pub value: String,
    pub kind: DetailKind,
    /// Trailing-comma hint for JSON-ish rendering; follows source line position, so a final
    /// line without a `:` still suppresses the comma of nothing after it.
    pub has_comma: bool,
}

/// Splits node content into typed key/value lines.
///
/// Lines without a `:` are skipped. The value type is inferred per line: `true`/`false`
/// (case-insensitive) → boolean, text with a leading numeric prefix → number, everything else →
/// string with any surrounding quotes stripped before re-quoting.
pub fn content_lines(content: &str) -> Vec<DetailLine> {
    if content.trim().is_empty() {
        return Vec::new();
    }

    let lines: Vec<&str> = content.split('\n').collect();
    let mut out = Vec::new();
    for (index, line) in lines.iter().enumerate() {
        let Some((raw_key, raw_value)) = line.split_once(':') else {
            continue;
        };
        let key = raw_key.trim().to_string();
        let raw_value = raw_value.trim();

        let (value, kind) = if raw_value.eq_ignore_ascii_case("true")
            || raw_value.eq_ignore_ascii_case("false")
        {
            (raw_value.to_ascii_lowercase(), DetailKind::Boolean)
        } else if parse_float_prefix(raw_value).is_some() {
            (raw_value.to_string(), DetailKind::Number)
        } else {
            (
                format!("\"{}\"", strip_surrounding_quotes(raw_value)),
                DetailKind::String,
            )
        };

        out.push(DetailLine {
            key,
            value,
            kind,
            has_comma: index != lines.len() - 1,
        });
    }
    out
}

/// Copyable JSON-ish rendering of node content.
///
/// Content with no parsable lines falls back to a quoted literal, matching what the detail
/// surface shows for single-value leaves.
pub fn formatted_json_string(content: &str) -> String {
    let lines = content_lines(content);
    if lines.is_empty() {
        return format!("\"{}\"", content.trim());
    }

    let mut out = String::from("{\n");
    for line in &lines {
        out.push_str(&format!(
            "    \"{}\": {}{}\n",
            line.key,
            line.value,
            if line.has_comma { "," } else { "" }
        ));
    }
    out.push('}');
    out
}

/// Braces the root segment of an inspection path for display: `Root.a` → `{Root}.a`.
pub fn display_path(path: &str) -> String {
    let trimmed = path.trim();
    match trimmed.strip_prefix("Root") {
        Some(rest) => format!("{{Root}}{rest}"),
        None => trimmed.to_string(),
    }
}

/// Leading-prefix float parse (`"1.5abc"` → `1.5`), the typing rule the detail surface uses for
/// its number column.
fn parse_float_prefix(raw: &str) -> Option<f64> {
    let text = raw.trim_start();
    let bytes = text.as_bytes();
    let mut i = 0usize;

    if matches!(bytes.first(), Some(b'+' | b'-')) {
        i += 1;
    }
    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let mut has_digits = i > int_start;
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        let frac_start = i;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        has_digits = has_digits || i > frac_start;
    }
    if !has_digits {
        return None;
    }

    let mantissa_end = i;
    if i < bytes.len() && matches!(bytes[i], b'e' | b'E') {
        let mut j = i + 1;
        if j < bytes.len() && matches!(bytes[j], b'+' | b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        i = if j > exp_start { j } else { mantissa_end };
    }

    text[..i].parse::<f64>().ok()
}

fn strip_surrounding_quotes(raw: &str) -> &str {
    raw.strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(raw)
}
