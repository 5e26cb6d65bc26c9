//! Text rendering of the expense form card.
//!
//! Each control renders as a label line followed by its current value (or its
//! placeholder when empty). A field's error message is printed directly
//! beneath its control.

use colored::Colorize;

use crate::form::schema::{FieldDescriptor, FieldKind};
use crate::form::state::ExpenseForm;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Style {
    Header,
    Label,
    Value,
    Placeholder,
    Error,
    Button,
}

/// Renders an [`ExpenseForm`] to lines of text.
#[derive(Debug, Clone, Copy, Default)]
pub struct FormRenderer {
    plain: bool,
}

impl FormRenderer {
    pub fn new() -> Self {
        Self { plain: false }
    }

    /// Renderer without colours or glyphs, for logs, tests and non-TTY output.
    pub fn plain() -> Self {
        Self { plain: true }
    }

    pub fn render(&self, form: &ExpenseForm) -> Vec<String> {
        let descriptor = form.descriptor();
        let mut lines = vec![self.apply(Style::Header, &format!("=== {} ===", descriptor.title))];

        for field in &descriptor.fields {
            lines.extend(self.render_field(form, field));
        }

        lines.push(String::new());
        lines.push(self.apply(Style::Button, &format!("[ {} ]", descriptor.submit_label)));
        lines
    }

    pub fn render_to_string(&self, form: &ExpenseForm) -> String {
        self.render(form).join("\n")
    }

    fn render_field(&self, form: &ExpenseForm, field: &FieldDescriptor) -> Vec<String> {
        let mut lines = vec![self.apply(Style::Label, &field.label)];

        let value = form.value(field.key);
        let control = if value.is_empty() {
            self.apply(Style::Placeholder, field.placeholder.unwrap_or(""))
        } else {
            self.apply(Style::Value, value)
        };
        lines.push(format!("  > {control}"));

        if let FieldKind::Choice(options) = &field.kind {
            lines.push(format!("    options: {}", options.join(" | ")));
        }

        if let Some(error) = form.errors().get(field.key) {
            lines.push(format!("    {}", self.apply(Style::Error, &error.message)));
        }
        lines
    }

    fn apply(&self, style: Style, text: &str) -> String {
        if self.plain {
            return match style {
                Style::Error => format!("ERROR: {text}"),
                _ => text.to_string(),
            };
        }
        match style {
            Style::Header | Style::Label => text.bold().to_string(),
            Style::Value => text.to_string(),
            Style::Placeholder => text.dimmed().to_string(),
            Style::Error => format!("✖ {text}").red().to_string(),
            Style::Button => text.bright_cyan().bold().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;

    fn position(lines: &[String], needle: &str) -> usize {
        lines
            .iter()
            .position(|line| line.contains(needle))
            .unwrap_or_else(|| panic!("`{needle}` not rendered:\n{}", lines.join("\n")))
    }

    #[test]
    fn empty_form_shows_placeholders_and_button() {
        let form = ExpenseForm::new(&FormConfig::default());
        let lines = FormRenderer::plain().render(&form);

        assert_eq!(lines[0], "=== Add New Expense ===");
        assert!(lines.iter().any(|l| l == "  > e.g. Weekly Groceries"));
        assert!(lines.iter().any(|l| l == "Amount ($)"));
        assert!(lines
            .iter()
            .any(|l| l == "    options: Groceries | Transport | Utilities | Entertainment | Other"));
        assert!(lines.iter().any(|l| l == "    options: Card | Cash | UPI"));
        assert_eq!(lines.last().unwrap(), "[ Save Expense ]");
        assert!(!lines.iter().any(|l| l.contains("ERROR")));
    }

    #[test]
    fn errors_render_beneath_their_control() {
        let mut form = ExpenseForm::new(&FormConfig::default());
        form.set_field("description", "Lunch").unwrap();
        form.set_field("amount", "0").unwrap();
        form.submit().unwrap();

        let lines = FormRenderer::plain().render(&form);
        let amount_label = position(&lines, "Amount ($)");
        let amount_error = position(&lines, "ERROR: Amount must be greater than 0");
        let date_label = position(&lines, "Date");
        assert!(amount_label < amount_error && amount_error < date_label);

        assert!(lines.iter().any(|l| l == "  > Lunch"));
        assert!(!lines.iter().any(|l| l.contains("Description is required")));
    }
}
