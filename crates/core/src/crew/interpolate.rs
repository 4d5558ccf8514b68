//! `{key}` placeholder substitution for agent and task text.
//!
//! Only identifier-shaped placeholders are substituted, so JSON snippets or
//! code samples inside a description (`{"a": 1}`, `fn main() {}`) pass through
//! untouched.

use crate::error::CrewError;
use regex::{Captures, Regex};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Runtime input record handed to `kickoff`
pub type Inputs = BTreeMap<String, String>;

fn placeholder() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| {
        Regex::new(r"\{([A-Za-z_][A-Za-z0-9_\-]*)\}").expect("placeholder regex is valid")
    })
}

/// Replace every `{key}` in `template` with `inputs[key]`.
///
/// `field` names the text being interpolated and only shows up in errors.
pub fn interpolate(template: &str, inputs: &Inputs, field: &str) -> Result<String, CrewError> {
    if let Some(missing) = placeholder()
        .captures_iter(template)
        .map(|caps| caps[1].to_string())
        .find(|key| !inputs.contains_key(key))
    {
        return Err(CrewError::MissingInput {
            key: missing,
            field: field.to_string(),
        });
    }

    Ok(placeholder()
        .replace_all(template, |caps: &Captures| inputs[&caps[1]].clone())
        .into_owned())
}
