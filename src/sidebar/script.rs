//! The JavaScript statement that wraps a sidebar payload on disk.
//!
//! Rustdoc writes `window.SIDEBAR_ITEMS = {...};`. Older toolchains wrote
//! `initSidebarItems({...});`. Both are accepted; anything else around the
//! JSON object is rejected with the byte offset of the offending input.

use crate::error::SidebarError;
use serde::de::DeserializeOwned;

/// Global identifier current rustdoc assigns the payload to.
pub const DEFAULT_GLOBAL: &str = "SIDEBAR_ITEMS";

const LEGACY_CALL: &str = "initSidebarItems";

/// Shape of the statement a payload was found in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EnvelopeForm {
    /// `window.SIDEBAR_ITEMS = {...};` (the `window.` prefix is optional)
    Assignment { global: String, window: bool },
    /// `initSidebarItems({...});`
    InitCall,
}

impl Default for EnvelopeForm {
    fn default() -> Self {
        Self::Assignment {
            global: DEFAULT_GLOBAL.to_string(),
            window: true,
        }
    }
}

impl EnvelopeForm {
    /// Wrap a serialized payload back into its statement.
    pub fn wrap(&self, payload: &str) -> String {
        match self {
            Self::Assignment {
                global,
                window: true,
            } => format!("window.{} = {};", global, payload),
            Self::Assignment {
                global,
                window: false,
            } => format!("{} = {};", global, payload),
            Self::InitCall => format!("{}({});", LEGACY_CALL, payload),
        }
    }
}

/// Parser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Identifier the payload must be assigned to.
    pub global: String,
    /// Reject category labels outside the known set instead of keeping them.
    pub strict_categories: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            global: DEFAULT_GLOBAL.to_string(),
            strict_categories: false,
        }
    }
}

/// Strip the envelope and deserialize the single JSON value inside it.
pub(crate) fn extract<T: DeserializeOwned>(
    text: &str,
    options: &ParseOptions,
) -> Result<(EnvelopeForm, T), SidebarError> {
    let mut cursor = Cursor::new(text);
    cursor.skip_whitespace();
    let form = parse_prefix(&mut cursor, options)?;

    let body_start = cursor.pos;
    let mut stream = serde_json::Deserializer::from_str(cursor.rest()).into_iter::<T>();
    let payload = match stream.next() {
        Some(result) => result?,
        None => return Err(SidebarError::envelope(body_start, "missing payload object")),
    };
    cursor.pos += stream.byte_offset();

    parse_suffix(&mut cursor, &form)?;
    Ok((form, payload))
}

fn parse_prefix(cursor: &mut Cursor<'_>, options: &ParseOptions) -> Result<EnvelopeForm, SidebarError> {
    let start = cursor.pos;
    let first = cursor.take_identifier();

    if first == LEGACY_CALL {
        cursor.skip_whitespace();
        cursor.expect('(')?;
        cursor.skip_whitespace();
        return Ok(EnvelopeForm::InitCall);
    }

    let (window, global) = if first == "window" {
        cursor.skip_whitespace();
        cursor.expect('.')?;
        cursor.skip_whitespace();
        (true, cursor.take_identifier())
    } else {
        (false, first)
    };

    if global.is_empty() {
        return Err(SidebarError::envelope(
            start,
            format!("expected `window.{} = ` or `{}(`", options.global, LEGACY_CALL),
        ));
    }
    if global != options.global {
        return Err(SidebarError::envelope(
            cursor.pos - global.len(),
            format!("expected global `{}`, found `{}`", options.global, global),
        ));
    }

    let form = EnvelopeForm::Assignment {
        global: global.to_string(),
        window,
    };
    cursor.skip_whitespace();
    cursor.expect('=')?;
    cursor.skip_whitespace();
    Ok(form)
}

fn parse_suffix(cursor: &mut Cursor<'_>, form: &EnvelopeForm) -> Result<(), SidebarError> {
    cursor.skip_whitespace();
    if *form == EnvelopeForm::InitCall {
        cursor.expect(')')?;
        cursor.skip_whitespace();
    }
    cursor.eat(';');
    cursor.skip_whitespace();
    if cursor.at_end() {
        Ok(())
    } else {
        Err(SidebarError::envelope(
            cursor.pos,
            "unexpected content after the sidebar statement",
        ))
    }
}

struct Cursor<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Cursor<'a> {
    const fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    fn at_end(&self) -> bool {
        self.pos >= self.text.len()
    }

    fn peek(&self) -> Option<char> {
        self.rest().chars().next()
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            // Editors occasionally prepend a byte order mark.
            if c.is_whitespace() || c == '\u{feff}' {
                self.pos += c.len_utf8();
            } else {
                break;
            }
        }
    }

    fn take_identifier(&mut self) -> &'a str {
        let rest = self.rest();
        let len = rest
            .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_' || c == '$'))
            .unwrap_or(rest.len());
        self.pos += len;
        &rest[..len]
    }

    fn eat(&mut self, expected: char) -> bool {
        if self.peek() == Some(expected) {
            self.pos += expected.len_utf8();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, expected: char) -> Result<(), SidebarError> {
        if self.eat(expected) {
            return Ok(());
        }
        let found = self
            .peek()
            .map_or_else(|| "end of input".to_string(), |c| format!("`{}`", c));
        Err(SidebarError::envelope(
            self.pos,
            format!("expected `{}`, found {}", expected, found),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert2::{check, let_assert};
    use rstest::rstest;
    use serde_json::{Value, json};

    fn parse(text: &str) -> Result<(EnvelopeForm, Value), SidebarError> {
        extract(text, &ParseOptions::default())
    }

    #[rstest]
    #[case(r#"window.SIDEBAR_ITEMS = {"fn":[]};"#, true)]
    #[case(r#"SIDEBAR_ITEMS={"fn":[]}"#, false)]
    #[case("\u{feff}  window . SIDEBAR_ITEMS =\n{\"fn\":[]} ;\n", true)]
    fn test_assignment_forms(#[case] text: &str, #[case] window: bool) {
        let_assert!(Ok((form, value)) = parse(text));
        check!(
            form == EnvelopeForm::Assignment {
                global: DEFAULT_GLOBAL.to_string(),
                window
            }
        );
        check!(value == json!({"fn": []}));
    }

    #[test]
    fn test_legacy_call_form() {
        let_assert!(Ok((form, value)) = parse(r#"initSidebarItems({"mod":[["a","b"]]});"#));
        check!(form == EnvelopeForm::InitCall);
        check!(value == json!({"mod": [["a", "b"]]}));
    }

    #[test]
    fn test_custom_global() {
        let options = ParseOptions {
            global: "ALL_ITEMS".to_string(),
            ..ParseOptions::default()
        };
        let result: Result<(EnvelopeForm, Value), _> =
            extract(r#"window.ALL_ITEMS = {};"#, &options);
        check!(result.is_ok());
    }

    #[rstest]
    #[case(r#"window.OTHER = {};"#, 7)]
    #[case(r#"window.SIDEBAR_ITEMS {};"#, 21)]
    #[case(r#"var x = {};"#, 0)]
    #[case(r#"window.SIDEBAR_ITEMS = {}; alert(1)"#, 27)]
    #[case(r#"initSidebarItems({};"#, 19)]
    fn test_rejected_envelopes(#[case] text: &str, #[case] expected_offset: usize) {
        let_assert!(Err(SidebarError::Envelope { offset, .. }) = parse(text));
        check!(offset == expected_offset);
    }

    #[test]
    fn test_missing_payload() {
        let_assert!(Err(SidebarError::Envelope { message, .. }) = parse("window.SIDEBAR_ITEMS = "));
        check!(message.contains("missing payload"));
    }

    #[test]
    fn test_invalid_json_payload() {
        let_assert!(Err(SidebarError::Json(_)) = parse(r#"window.SIDEBAR_ITEMS = {"fn":[};"#));
    }

    #[rstest]
    #[case(EnvelopeForm::default(), "window.SIDEBAR_ITEMS = {};")]
    #[case(EnvelopeForm::InitCall, "initSidebarItems({});")]
    #[case(
        EnvelopeForm::Assignment { global: "X".to_string(), window: false },
        "X = {};"
    )]
    fn test_wrap(#[case] form: EnvelopeForm, #[case] expected: &str) {
        check!(form.wrap("{}") == expected);
    }
}
