//! Template substitution port used by the artifact renderer.

use std::collections::BTreeMap;

use crate::domain::AppError;

/// Variables substituted into a phase template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TemplateContext {
    pub variables: BTreeMap<String, String>,
}

impl TemplateContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a variable to the context.
    pub fn with_var(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.variables.insert(name.into(), value.to_string());
        self
    }
}

/// Trait for rendering templates.
///
/// Templates may only substitute `{{ var }}` values; loops and conditionals are
/// expressed by the caller, one render per item.
pub trait TemplateRenderer {
    /// Render `template` with `context`; `template_name` is used for error reporting.
    fn render(
        &self,
        template: &str,
        context: &TemplateContext,
        template_name: &str,
    ) -> Result<String, AppError>;
}
