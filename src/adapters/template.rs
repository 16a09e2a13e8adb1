//! Minijinja-backed substitution for the embedded Dockerfile templates.

use std::sync::OnceLock;

use minijinja::{AutoEscape, Environment, UndefinedBehavior};

use crate::domain::AppError;
use crate::domain::render::{TemplateContext, TemplateRenderer};

/// Block and comment openers; phase templates are substitution-only.
const CONTROL_TOKENS: [&str; 2] = ["{%", "{#"];

/// Renders phase templates with strict undefined handling and no escaping, so
/// shell text such as `&&` or `<` reaches the Dockerfile verbatim.
#[derive(Debug, Clone, Copy, Default)]
pub struct MinijinjaTemplateRenderer;

impl MinijinjaTemplateRenderer {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateRenderer for MinijinjaTemplateRenderer {
    fn render(
        &self,
        template: &str,
        context: &TemplateContext,
        template_name: &str,
    ) -> Result<String, AppError> {
        if let Some(token) = CONTROL_TOKENS.iter().find(|token| template.contains(*token)) {
            return Err(AppError::TemplateRender {
                template: template_name.to_string(),
                reason: format!("template syntax '{}' is not allowed", token),
            });
        }

        environment().render_str(template, &context.variables).map_err(|err| {
            AppError::TemplateRender {
                template: template_name.to_string(),
                reason: err.to_string(),
            }
        })
    }
}

fn environment() -> &'static Environment<'static> {
    static ENVIRONMENT: OnceLock<Environment<'static>> = OnceLock::new();
    ENVIRONMENT.get_or_init(|| {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env
    })
}
