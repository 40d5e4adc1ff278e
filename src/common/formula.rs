use std::{fmt, ops};

/// A `filterByFormula` expression.
///
/// The client only builds two kinds of formula itself, field equality and
/// record id lookup. Their string literal is quoted with `"` and any `\` or
/// `"` inside the value is backslash-escaped. Field names are put between
/// braces as given. Anything else is passed through verbatim.
///
/// ```rust
/// use airtable_crud::common::formula::Formula;
///
/// let formula = Formula::equals("Status", "Done");
/// assert_eq!(formula.to_string(), r#"{Status}="Done""#);
///
/// let formula = Formula::record_id("rec123");
/// assert_eq!(&*formula, r#"RECORD_ID()="rec123""#);
/// ```
#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
pub struct Formula(String);

impl Formula {
    /// Formula matching records whose `field` equals `value`.
    pub fn equals(field: &str, value: &str) -> Self {
        Self(format!("{{{field}}}={}", quote(value)))
    }

    /// Formula matching the record with the given id.
    pub fn record_id(id: &str) -> Self {
        Self(format!("RECORD_ID()={}", quote(id)))
    }

    /// Wrap a caller-supplied formula without inspecting it.
    pub fn raw(formula: impl Into<String>) -> Self {
        Self(formula.into())
    }
}

fn quote(value: &str) -> String {
    let mut quoted = String::with_capacity(value.len() + 2);
    quoted.push('"');
    for c in value.chars() {
        if matches!(c, '"' | '\\') {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}

impl ops::Deref for Formula {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Formula {
    fn from(formula: String) -> Self {
        Self(formula)
    }
}

impl From<&str> for Formula {
    fn from(formula: &str) -> Self {
        Self(formula.to_string())
    }
}

impl From<Formula> for String {
    fn from(formula: Formula) -> Self {
        formula.0
    }
}
