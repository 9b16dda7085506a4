//! Named GraphQL field selections
//!
//! Tests share selection sets per GraphQL type instead of repeating them in
//! every query. A selection may reference other types with `$Name`:
//!
//! ```yaml
//! Application: 'id name webhooks { $Webhook }'
//! Webhook: 'id type url'
//! ```
//!
//! `fields_for("Application")` then gives `id name webhooks { id type url }`.
use new_string_template::template::Template;
use regex::Regex;
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

/// Nesting limit, reached only by cyclic definitions
pub const MAX_DEPTH: usize = 16;

// type names are PascalCase, `$first` style arguments are left alone
const REFERENCE_PATTERN: &str = r"\$([A-Z][A-Za-z0-9_]*)";

#[derive(Clone, Debug, Default)]
pub struct FieldsProvider {
    selections: HashMap<String, String>,
}

pub enum FieldsError {
    UnknownType(String),
    TooDeep(String),
    Template(String),
    Load(String),
}
impl std::error::Error for FieldsError {}

impl fmt::Display for FieldsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            FieldsError::UnknownType(name) => write!(f, "No fields defined for type {}", name),
            FieldsError::TooDeep(name) => write!(
                f,
                "Fields of type {} nest deeper than {} levels",
                name, MAX_DEPTH
            ),
            FieldsError::Template(e) => write!(f, "Fields template error: {}", e),
            FieldsError::Load(e) => write!(f, "Can not load fields: {}", e),
        }
    }
}
impl fmt::Debug for FieldsError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

impl FieldsProvider {
    pub fn new(selections: HashMap<String, String>) -> Self {
        Self { selections }
    }

    /// Read selections from a yaml mapping of type name to selection
    pub fn from_yaml_file(path: &Path) -> Result<Self, FieldsError> {
        let data =
            std::fs::read_to_string(path).map_err(|e| FieldsError::Load(e.to_string()))?;
        let selections: HashMap<String, String> =
            serde_yaml::from_str(&data).map_err(|e| FieldsError::Load(e.to_string()))?;
        tracing::debug!("Loaded {} field selections from {:?}", selections.len(), path);
        Ok(Self::new(selections))
    }

    pub fn with_type(mut self, type_name: &str, selection: &str) -> Self {
        self.selections
            .insert(type_name.to_string(), selection.to_string());
        self
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.selections.contains_key(type_name)
    }

    /// Returns the expanded selection of the type
    pub fn fields_for(&self, type_name: &str) -> Result<String, FieldsError> {
        let regex = Regex::new(REFERENCE_PATTERN)
            .map_err(|e| FieldsError::Template(e.to_string()))?;
        self.expand(type_name, &regex, 0)
    }

    fn expand(&self, type_name: &str, regex: &Regex, depth: usize) -> Result<String, FieldsError> {
        if depth > MAX_DEPTH {
            return Err(FieldsError::TooDeep(type_name.to_string()));
        }
        let selection = self
            .selections
            .get(type_name)
            .ok_or_else(|| FieldsError::UnknownType(type_name.to_string()))?;

        let mut rendered: Vec<(String, String)> = Vec::new();
        for caps in regex.captures_iter(selection) {
            let name = &caps[1];
            if rendered.iter().any(|(n, _)| n == name) {
                continue;
            }
            let nested = self.expand(name, regex, depth + 1)?;
            rendered.push((name.to_string(), nested));
        }
        if rendered.is_empty() {
            return Ok(selection.clone());
        }
        tracing::trace!("Expanding {} with {:?}", type_name, rendered);

        let vars: HashMap<&str, &str> = rendered
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect();
        Template::new(selection.clone())
            .with_regex(regex)
            .render(&vars)
            .map_err(|e| FieldsError::Template(e.to_string()))
    }
}
