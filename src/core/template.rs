//! Resource filename template.
//!
//! A template such as `intl.{language}.json` doubles as a matcher (is this
//! file a resource?), an extractor (which language is it?) and an expander
//! (where does the resource of language X live?).

use std::sync::LazyLock;

use regex::Regex;

use super::error::IntlError;

pub const LANGUAGE_PLACEHOLDER: &str = "{language}";

pub const DEFAULT_FILENAME_TEMPLATE: &str = "intl.{language}.json";

/// Language codes such as `en`, `pt_BR`, or `en-US`.
const LANGUAGE_PATTERN: &str = "[a-zA-Z]+(?:[_-][a-zA-Z]+)?";

static DEFAULT_MATCHER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^intl\.([a-zA-Z]+(?:[_-][a-zA-Z]+)?)\.json$").unwrap());

#[derive(Debug, Clone)]
pub struct FilenameTemplate {
    prefix: String,
    suffix: String,
    matcher: Regex,
}

impl FilenameTemplate {
    pub fn parse(template: &str) -> Result<Self, IntlError> {
        let invalid = || IntlError::InvalidTemplate {
            template: template.to_string(),
        };

        if template.matches(LANGUAGE_PLACEHOLDER).count() != 1 {
            return Err(invalid());
        }
        let (prefix, suffix) = template
            .split_once(LANGUAGE_PLACEHOLDER)
            .ok_or_else(invalid)?;
        if prefix.contains(['/', '\\']) || suffix.contains(['/', '\\']) {
            return Err(invalid());
        }

        let matcher = Regex::new(&format!(
            "^{}({}){}$",
            regex::escape(prefix),
            LANGUAGE_PATTERN,
            regex::escape(suffix)
        ))
        .map_err(|_| invalid())?;

        Ok(Self {
            prefix: prefix.to_string(),
            suffix: suffix.to_string(),
            matcher,
        })
    }

    pub fn matches(&self, file_name: &str) -> bool {
        self.matcher.is_match(file_name)
    }

    pub fn extract(&self, file_name: &str) -> Option<String> {
        self.matcher
            .captures(file_name)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }

    pub fn expand(&self, language: &str) -> String {
        format!("{}{}{}", self.prefix, language, self.suffix)
    }

    /// True if the resource written for `language` is read back as `language`.
    pub fn accepts_language(&self, language: &str) -> bool {
        self.extract(&self.expand(language)).as_deref() == Some(language)
    }
}

impl Default for FilenameTemplate {
    fn default() -> Self {
        Self {
            prefix: "intl.".to_string(),
            suffix: ".json".to_string(),
            matcher: DEFAULT_MATCHER.clone(),
        }
    }
}
