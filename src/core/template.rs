//! Path template placeholders (`{variable}`)

use regex::Regex;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Variables recognised in path templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TemplateVariable {
    Category,
    Filename,
    Timestamp,
    Date,
    StepId,
}

impl TemplateVariable {
    pub const ALL: [TemplateVariable; 5] = [
        TemplateVariable::Category,
        TemplateVariable::Filename,
        TemplateVariable::Timestamp,
        TemplateVariable::Date,
        TemplateVariable::StepId,
    ];

    /// Name as written between the braces
    pub fn name(&self) -> &'static str {
        match self {
            TemplateVariable::Category => "category",
            TemplateVariable::Filename => "filename",
            TemplateVariable::Timestamp => "timestamp",
            TemplateVariable::Date => "date",
            TemplateVariable::StepId => "stepId",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|v| v.name() == name)
    }
}

fn placeholder_regex() -> &'static Regex {
    static PLACEHOLDER: OnceLock<Regex> = OnceLock::new();
    PLACEHOLDER.get_or_init(|| Regex::new(r"\{([^{}]*)\}").expect("placeholder pattern is valid"))
}

/// Path separators accepted in templates
const SEPARATORS: &[char] = &['/', '\\'];

fn repeated_separator_regex() -> &'static Regex {
    static REPEATED: OnceLock<Regex> = OnceLock::new();
    REPEATED.get_or_init(|| Regex::new(r"[/\\]{2,}").expect("separator pattern is valid"))
}

/// Placeholder names in a template, in order of appearance
pub fn placeholders(template: &str) -> Vec<&str> {
    placeholder_regex()
        .captures_iter(template)
        .filter_map(|caps| caps.get(1))
        .map(|m| m.as_str())
        .collect()
}

/// Placeholder names that are not one of the recognised variables
pub fn unknown_placeholders(template: &str) -> Vec<&str> {
    placeholders(template)
        .into_iter()
        .filter(|name| TemplateVariable::from_name(name).is_none())
        .collect()
}

/// Replace known placeholders with values; anything without a value stays as written
pub fn substitute(template: &str, values: &HashMap<TemplateVariable, String>) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &regex::Captures| {
            TemplateVariable::from_name(&caps[1])
                .and_then(|var| values.get(&var))
                .cloned()
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}

/// Directory part of an input template usable for folder checks.
///
/// Strips every placeholder, collapses the separators left behind and trims
/// trailing separators. `"inbox/audio/{category}/"` becomes `"inbox/audio"`.
/// Both `/` and `\` count as separators. A relative input stays relative:
/// `"{category}/notes/"` becomes `"notes"`.
pub fn derive_base_path(input: &str) -> String {
    let input = input.trim();
    let stripped = placeholder_regex().replace_all(input, "");
    let collapsed = repeated_separator_regex().replace_all(&stripped, |caps: &regex::Captures| {
        caps[0][..1].to_string()
    });

    let base = collapsed.trim_end_matches(SEPARATORS);
    if input.starts_with(SEPARATORS) {
        base.to_string()
    } else {
        base.trim_start_matches(SEPARATORS).to_string()
    }
}
