use std::env;
use std::io::{self, BufRead};

use crate::cli::interaction::{
    DialoguerInteraction, FormInteraction, PromptContext, ScriptedInteraction,
};
use crate::cli::output::{self, OutputPreferences};
use crate::config::{ConfigManager, FormConfig};
use crate::domain::ExpenseInput;
use crate::errors::FormError;
use crate::form::{ExpenseForm, FormRenderer, SubmitOutcome};

const SCRIPT_ENV: &str = "EXPENSE_FORM_SCRIPT";

/// Entry point used by the `expense_form` binary.
pub fn run_cli(args: &[String]) -> Result<(), FormError> {
    let command = args.first().map(String::as_str).unwrap_or("add");
    tracing::debug!(command, "dispatching command");

    match command {
        "add" => {
            let config = ConfigManager::new().load()?;
            if script_mode() {
                output::set_preferences(OutputPreferences { plain_mode: true });
                let stdin = io::stdin();
                let mut interaction = ScriptedInteraction::new(stdin.lock());
                run_session(&config, &mut interaction, FormRenderer::plain())
                    .map(|_| ())
            } else {
                let mut interaction = DialoguerInteraction::new();
                run_session(&config, &mut interaction, FormRenderer::new()).map(|_| ())
            }
        }
        "init-config" => {
            let manager = ConfigManager::new();
            if manager.path().exists() {
                output::info(format!(
                    "Config already exists at {}",
                    manager.path().display()
                ));
            } else {
                manager.save(&FormConfig::default())?;
                output::success(format!("Wrote default config to {}", manager.path().display()));
            }
            Ok(())
        }
        "config-path" => {
            println!("{}", ConfigManager::new().path().display());
            Ok(())
        }
        "version" | "--version" => {
            println!("{}", version_line());
            Ok(())
        }
        "help" | "--help" => {
            print_usage();
            Ok(())
        }
        other => {
            print_usage();
            Err(FormError::UnknownCommand(other.to_string()))
        }
    }
}

fn script_mode() -> bool {
    env::var(SCRIPT_ENV).map(|v| v == "1").unwrap_or(false)
}

/// Collects expenses until the interaction declines another entry.
/// Returns the number of expenses submitted.
pub fn run_session<I: FormInteraction>(
    config: &FormConfig,
    interaction: &mut I,
    renderer: FormRenderer,
) -> Result<usize, FormError> {
    let mut form = ExpenseForm::new(config).with_on_submit(report_expense);
    let mut submitted = 0;

    loop {
        output::section(&form.descriptor().title);
        fill_and_submit(&mut form, interaction, renderer)?;
        submitted += 1;
        if !interaction.another()? {
            break;
        }
    }

    tracing::info!(submitted, "session finished");
    Ok(submitted)
}

/// Prompts every field, then re-prompts only the rejected ones until a
/// submit goes through.
pub fn fill_and_submit<I: FormInteraction>(
    form: &mut ExpenseForm,
    interaction: &mut I,
    renderer: FormRenderer,
) -> Result<(), FormError> {
    let mut pending: Vec<&'static str> = form.descriptor().fields.iter().map(|f| f.key).collect();

    loop {
        for key in &pending {
            let value = {
                let descriptor = form.descriptor();
                let total = descriptor.fields.len();
                let (index, field) = descriptor
                    .fields
                    .iter()
                    .enumerate()
                    .find(|(_, field)| field.key == *key)
                    .ok_or_else(|| FormError::UnknownField(key.to_string()))?;
                let context = PromptContext {
                    descriptor: field,
                    current: form.value(key),
                    error: form.errors().get(key),
                    index,
                    total,
                };
                interaction.prompt_field(&context)?
            };
            form.set_field(key, value)?;
        }

        match form.submit()? {
            SubmitOutcome::Submitted => return Ok(()),
            SubmitOutcome::Rejected(errors) => {
                println!("{}", renderer.render_to_string(form));
                output::warning(format!(
                    "Fix {} field(s) and submit again.",
                    errors.len()
                ));
                pending = form
                    .descriptor()
                    .fields
                    .iter()
                    .map(|f| f.key)
                    .filter(|key| errors.contains(key))
                    .collect();
            }
        }
    }
}

/// Host-side submit handler: logs the payload and confirms the save.
fn report_expense(expense: ExpenseInput) {
    match serde_json::to_string(&expense) {
        Ok(json) => {
            tracing::info!(payload = %json, "Expense submitted");
            println!("{json}");
        }
        Err(err) => {
            tracing::error!(error = %err, "failed to serialize expense");
            output::error(format!("Could not serialize expense: {err}"));
        }
    }
    output::success("Expense saved!");
}

fn version_line() -> String {
    format!(
        "expense_form {} ({} {}) built {} for {} [{}] with {}",
        env!("CARGO_PKG_VERSION"),
        env!("EXPENSE_FORM_BUILD_HASH"),
        env!("EXPENSE_FORM_BUILD_STATUS"),
        env!("EXPENSE_FORM_BUILD_TIMESTAMP"),
        env!("EXPENSE_FORM_BUILD_TARGET"),
        env!("EXPENSE_FORM_BUILD_PROFILE"),
        env!("EXPENSE_FORM_BUILD_RUSTC"),
    )
}

fn print_usage() {
    eprintln!(
        "Usage: expense_form [command]\n\
         Commands:\n  \
         add            enter expenses (default)\n  \
         init-config    write the default config file\n  \
         config-path    print the config file location\n  \
         version        print build information\n\
         Set {SCRIPT_ENV}=1 to read answers line by line from stdin."
    );
}

/// Lets library users drive a session from any line source.
pub fn run_scripted<R: BufRead>(config: &FormConfig, reader: R) -> Result<usize, FormError> {
    let mut interaction = ScriptedInteraction::new(reader);
    run_session(config, &mut interaction, FormRenderer::plain())
}
