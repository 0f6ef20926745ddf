//! Substitution context shared by every template in one operation

use std::collections::BTreeMap;

use crate::naming::{escape_string_literal, NameForms};

/// Immutable mapping from template variable name to its value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubstitutionContext {
    values: BTreeMap<String, String>,
}

impl SubstitutionContext {
    /// Create an empty context
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Return a copy of this context with one more variable
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.values.insert(name.into(), value.into());
        self
    }

    /// Variables describing a generated component (model, api, service)
    #[must_use]
    pub fn for_component(forms: &NameForms) -> Self {
        Self::new()
            .with("name", &forms.identifier)
            .with("plural_name", &forms.plural_identifier)
            .with("class_name", &forms.class_identifier)
            .with("kebab_name", &forms.kebab_identifier)
            .with("display_name", &forms.display_name)
            .with("display_name_literal", escape_string_literal(&forms.display_name))
            .with("title_name", forms.title())
    }

    /// Variables describing a whole project
    ///
    /// Carries every component variable plus `project_*` aliases, so the
    /// same template text works at either level.
    #[must_use]
    pub fn for_project(forms: &NameForms) -> Self {
        Self::for_component(forms)
            .with("project_name", &forms.identifier)
            .with("project_class_name", &forms.class_identifier)
            .with("project_kebab_name", &forms.kebab_identifier)
            .with("project_display_name", &forms.display_name)
            .with(
                "project_display_name_literal",
                escape_string_literal(&forms.display_name),
            )
            .with("project_title", forms.title())
    }

    /// Look up a variable
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }
}
