//! Sources of field input for the terminal front-end.

use std::io::BufRead;

use dialoguer::{theme::ColorfulTheme, Confirm, Input, Select};

use crate::cli::output;
use crate::errors::FormError;
use crate::form::{FieldDescriptor, FieldKind, ValidationError};

/// Everything needed to ask for one field.
pub struct PromptContext<'a> {
    pub descriptor: &'a FieldDescriptor,
    /// Raw value currently held by the form, empty when unset.
    pub current: &'a str,
    /// Error from the last submit, shown so the user knows what to fix.
    pub error: Option<&'a ValidationError>,
    pub index: usize,
    pub total: usize,
}

/// Interaction surface used by the shell to collect raw field values.
pub trait FormInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> Result<String, FormError>;

    /// Whether the user wants to enter another expense after a successful submit.
    fn another(&mut self) -> Result<bool, FormError>;
}

/// Menu entries for a choice prompt.
///
/// A field without a listed value starts on its placeholder entry, which maps
/// back to an empty value so that leaving it untouched is reported as missing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChoiceItems {
    items: Vec<String>,
    has_blank: bool,
    default: usize,
}

impl ChoiceItems {
    pub fn new(options: &[String], placeholder: Option<&str>, current: &str) -> Self {
        let current = current.trim();
        let selected = options
            .iter()
            .position(|option| !current.is_empty() && option.eq_ignore_ascii_case(current));

        match selected {
            Some(index) => Self {
                items: options.to_vec(),
                has_blank: false,
                default: index,
            },
            None => {
                let mut items = Vec::with_capacity(options.len() + 1);
                items.push(placeholder.unwrap_or("(none)").to_string());
                items.extend(options.iter().cloned());
                Self {
                    items,
                    has_blank: true,
                    default: 0,
                }
            }
        }
    }

    pub fn items(&self) -> &[String] {
        &self.items
    }

    pub fn default_index(&self) -> usize {
        self.default
    }

    /// Raw field value for the selected menu index.
    pub fn value_at(&self, index: usize) -> String {
        if self.has_blank && index == 0 {
            return String::new();
        }
        self.items.get(index).cloned().unwrap_or_default()
    }
}

/// Interactive prompts backed by dialoguer.
pub struct DialoguerInteraction {
    theme: ColorfulTheme,
}

impl DialoguerInteraction {
    pub fn new() -> Self {
        Self {
            theme: ColorfulTheme::default(),
        }
    }

    fn step_title(context: &PromptContext<'_>) -> String {
        format!(
            "[{}/{}] {}",
            context.index + 1,
            context.total,
            context.descriptor.label
        )
    }

    fn prompt_choice(
        &self,
        context: &PromptContext<'_>,
        options: &[String],
    ) -> Result<String, FormError> {
        let choices = ChoiceItems::new(options, context.descriptor.placeholder, context.current);
        let index = Select::with_theme(&self.theme)
            .with_prompt(Self::step_title(context))
            .items(choices.items())
            .default(choices.default_index())
            .interact()?;
        Ok(choices.value_at(index))
    }

    fn prompt_text(&self, context: &PromptContext<'_>) -> Result<String, FormError> {
        let mut prompt = Self::step_title(context);
        if let Some(placeholder) = context.descriptor.placeholder {
            prompt.push_str(&format!(" ({placeholder})"));
        }
        let value = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(context.current)
            .allow_empty(true)
            .interact_text()?;
        Ok(value)
    }
}

impl Default for DialoguerInteraction {
    fn default() -> Self {
        Self::new()
    }
}

impl FormInteraction for DialoguerInteraction {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> Result<String, FormError> {
        if let Some(error) = context.error {
            output::warning(&error.message);
        }
        match &context.descriptor.kind {
            FieldKind::Choice(options) if !options.is_empty() => {
                self.prompt_choice(context, options)
            }
            _ => self.prompt_text(context),
        }
    }

    fn another(&mut self) -> Result<bool, FormError> {
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt("Add another expense?")
            .default(false)
            .interact()?)
    }
}

/// Line-oriented input for scripted sessions: one line answers one prompt.
pub struct ScriptedInteraction<R: BufRead> {
    reader: R,
}

impl<R: BufRead> ScriptedInteraction<R> {
    pub fn new(reader: R) -> Self {
        Self { reader }
    }
}

impl<R: BufRead> FormInteraction for ScriptedInteraction<R> {
    fn prompt_field(&mut self, context: &PromptContext<'_>) -> Result<String, FormError> {
        if let Some(error) = context.error {
            output::warning(format!("{}: {}", context.descriptor.label, error.message));
        }
        let mut line = String::new();
        if self.reader.read_line(&mut line)? == 0 {
            return Err(FormError::InputClosed);
        }
        let value = line.trim_end_matches(['\r', '\n']).to_string();
        tracing::trace!(field = context.descriptor.key, "scripted input");
        Ok(value)
    }

    /// Blank lines between expenses are separators; trailing whitespace ends the session.
    fn another(&mut self) -> Result<bool, FormError> {
        loop {
            let buf = self.reader.fill_buf()?;
            if buf.is_empty() {
                return Ok(false);
            }
            let blank = buf.iter().take_while(|b| b.is_ascii_whitespace()).count();
            if blank == 0 {
                return Ok(true);
            }
            self.reader.consume(blank);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FormConfig;
    use crate::form::expense_descriptor;
    use std::io::Cursor;

    #[test]
    fn scripted_interaction_reads_lines_until_eof() {
        let descriptor = expense_descriptor(&FormConfig::default());
        let field = &descriptor.fields[0];
        let context = PromptContext {
            descriptor: field,
            current: "",
            error: None,
            index: 0,
            total: descriptor.fields.len(),
        };
        let mut interaction = ScriptedInteraction::new(Cursor::new("Coffee\r\n\nTea\n  \r\n\n"));

        assert_eq!(interaction.prompt_field(&context).unwrap(), "Coffee");
        assert!(interaction.another().unwrap());
        assert_eq!(interaction.prompt_field(&context).unwrap(), "Tea");
        assert!(!interaction.another().unwrap());
        assert!(matches!(
            interaction.prompt_field(&context),
            Err(FormError::InputClosed)
        ));
    }

    #[test]
    fn blank_line_inside_a_form_is_an_empty_answer() {
        let descriptor = expense_descriptor(&FormConfig::default());
        let context = PromptContext {
            descriptor: &descriptor.fields[0],
            current: "",
            error: None,
            index: 0,
            total: descriptor.fields.len(),
        };
        let mut interaction = ScriptedInteraction::new(Cursor::new("\nLunch\n"));
        assert_eq!(interaction.prompt_field(&context).unwrap(), "");
        assert_eq!(interaction.prompt_field(&context).unwrap(), "Lunch");
    }

    fn options() -> Vec<String> {
        vec!["Card".to_string(), "Cash".to_string(), "UPI".to_string()]
    }

    #[test]
    fn unset_choice_starts_on_placeholder_that_maps_to_empty() {
        let choices = ChoiceItems::new(&options(), Some("Select payment mode"), "");
        assert_eq!(
            choices.items(),
            ["Select payment mode", "Card", "Cash", "UPI"]
        );
        assert_eq!(choices.default_index(), 0);
        assert_eq!(choices.value_at(0), "");
        assert_eq!(choices.value_at(1), "Card");
        assert_eq!(choices.value_at(3), "UPI");
    }

    #[test]
    fn listed_choice_is_preselected_without_placeholder() {
        let choices = ChoiceItems::new(&options(), Some("Select payment mode"), " cash ");
        assert_eq!(choices.items(), ["Card", "Cash", "UPI"]);
        assert_eq!(choices.default_index(), 1);
        assert_eq!(choices.value_at(1), "Cash");
        assert_eq!(choices.value_at(0), "Card");
    }

    #[test]
    fn unlisted_current_value_falls_back_to_placeholder() {
        let choices = ChoiceItems::new(&options(), None, "Cheque");
        assert_eq!(choices.items()[0], "(none)");
        assert_eq!(choices.value_at(choices.default_index()), "");
    }

    #[test]
    fn untouched_choice_is_reported_as_required() {
        let descriptor = expense_descriptor(&FormConfig::default());
        let category = descriptor.field(crate::form::fields::CATEGORY).unwrap();
        let choices = ChoiceItems::new(
            category.options().unwrap(),
            category.placeholder,
            "",
        );
        let err = category
            .validator
            .validate(&choices.value_at(choices.default_index()))
            .unwrap_err();
        assert_eq!(err.message, "Select a category");
    }
}
