use std::collections::HashMap;
use std::sync::LazyLock;

use regex::{Captures, Regex};

/// Source of runtime values for context-mode evaluation.
///
/// Filters only read from a context; they never cache or mutate it.
pub trait EvaluationContext {
    /// Substitute any placeholders inside `text`.
    fn resolve(&self, text: &str) -> String;

    /// Whether a variable called `name` is defined.
    fn exists(&self, name: &str) -> bool;
}

impl<T: EvaluationContext + ?Sized> EvaluationContext for &T {
    fn resolve(&self, text: &str) -> String {
        (**self).resolve(text)
    }

    fn exists(&self, name: &str) -> bool {
        (**self).exists(name)
    }
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\$\{([^{}]+)\}").expect("placeholder pattern is a valid regex"));

/// Map-backed context substituting `${name}` placeholders.
///
/// Unknown placeholders are left as written.
#[derive(Debug, Clone, Default)]
pub struct MapContext {
    vars: HashMap<String, String>,
}

impl MapContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.vars.insert(name.into(), value.into());
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(String::as_str)
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MapContext {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self { vars: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect() }
    }
}

impl EvaluationContext for MapContext {
    fn resolve(&self, text: &str) -> String {
        PLACEHOLDER
            .replace_all(text, |caps: &Captures| match self.get(caps[1].trim()) {
                Some(value) => value.to_string(),
                None => caps[0].to_string(),
            })
            .into_owned()
    }

    /// Accepts either a bare name or a single `${name}` placeholder.
    fn exists(&self, name: &str) -> bool {
        let name = name.trim();
        let name = name
            .strip_prefix("${")
            .and_then(|rest| rest.strip_suffix('}'))
            .unwrap_or(name);
        self.vars.contains_key(name.trim())
    }
}
