pub mod interaction;
pub mod output;
mod shell;

pub use shell::{fill_and_submit, run_cli, run_scripted, run_session};
