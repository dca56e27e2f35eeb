//! Interactive terminal front end for the catalog screen.

use std::io::Write;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader, Lines};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::clients::ScreenClient;
use crate::domain::{FormField, ProductDraft};
use crate::error::ScreenError;
use crate::render::render_table;
use crate::screen_actor::{DeleteOutcome, Prompt, SubmitOutcome};

const HELP: &str = "\
Commands:
  list            reload and show the product table
  add             add a product
  edit <code>     edit the product with this code
  delete <code>   delete the product with this code
  help            show this help
  quit            leave
While filling the form, press Enter to keep the shown value and type '-' to clear it.";

type BoxedReader = Box<dyn AsyncBufRead + Unpin + Send>;

/// Line source shared by the command loop and the prompt.
///
/// Only one reader holds the lock at a time, so a confirmation asked by the
/// screen never races the command loop for stdin.
#[derive(Clone)]
pub struct LineInput {
    lines: Arc<Mutex<Lines<BoxedReader>>>,
}

impl LineInput {
    pub fn stdin() -> Self {
        Self::from_reader(BufReader::new(tokio::io::stdin()))
    }

    pub fn from_reader(reader: impl AsyncBufRead + Unpin + Send + 'static) -> Self {
        let boxed: BoxedReader = Box::new(reader);
        Self {
            lines: Arc::new(Mutex::new(boxed.lines())),
        }
    }

    /// Prints `prompt` and reads one line. `None` at end of input.
    pub async fn ask(&self, prompt: &str) -> std::io::Result<Option<String>> {
        print!("{}", prompt);
        std::io::stdout().flush()?;
        let mut lines = self.lines.lock().await;
        lines.next_line().await
    }
}

/// Alerts and confirmations on the terminal.
pub struct TerminalPrompt {
    input: LineInput,
}

impl TerminalPrompt {
    pub fn new(input: LineInput) -> Self {
        Self { input }
    }
}

#[async_trait]
impl Prompt for TerminalPrompt {
    async fn alert(&mut self, message: &str) {
        println!("! {}", message);
    }

    async fn confirm(&mut self, message: &str) -> bool {
        match self.input.ask(&format!("{} [y/N] ", message)).await {
            Ok(Some(answer)) => is_yes(&answer),
            Ok(None) => false,
            Err(e) => {
                warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TerminalCommand {
    List,
    Add,
    Edit(String),
    Delete(String),
    Help,
    Quit,
}

pub fn parse_command(line: &str) -> Result<TerminalCommand, String> {
    let mut parts = line.trim().splitn(2, char::is_whitespace);
    let verb = parts.next().unwrap_or_default().to_ascii_lowercase();
    let arg = parts.next().map(str::trim).filter(|a| !a.is_empty());

    match (verb.as_str(), arg) {
        ("list" | "ls", None) => Ok(TerminalCommand::List),
        ("add" | "new", None) => Ok(TerminalCommand::Add),
        ("edit", Some(code)) => Ok(TerminalCommand::Edit(code.to_string())),
        ("delete" | "rm", Some(code)) => Ok(TerminalCommand::Delete(code.to_string())),
        ("help" | "?", _) => Ok(TerminalCommand::Help),
        ("quit" | "exit" | "q", None) => Ok(TerminalCommand::Quit),
        ("edit" | "delete" | "rm", None) => Err(format!("Usage: {} <code>", verb)),
        ("", _) => Err(String::new()),
        _ => Err(format!("Unknown command: {}. Type 'help' for the list.", line.trim())),
    }
}

/// What a typed answer does to a form field.
#[derive(Debug, PartialEq, Eq)]
enum FieldInput {
    Keep,
    Clear,
    Set(String),
}

fn field_input(answer: &str) -> FieldInput {
    match answer.trim() {
        "" => FieldInput::Keep,
        "-" => FieldInput::Clear,
        _ => FieldInput::Set(answer.to_string()),
    }
}

pub async fn print_table(screen: &ScreenClient) -> Result<(), ScreenError> {
    let view = screen.view().await?;
    println!("{}", render_table(&view.products));
    Ok(())
}

/// Runs the command loop until `quit` or end of input.
pub async fn run_interactive(screen: &ScreenClient, input: &LineInput) -> anyhow::Result<()> {
    info!("Interactive session started");
    // A failed initial load has already been alerted.
    let _ = screen.mount().await;
    print_table(screen).await?;
    println!("{}", HELP);

    while let Some(line) = input.ask("> ").await? {
        let command = match parse_command(&line) {
            Ok(command) => command,
            Err(msg) => {
                if !msg.is_empty() {
                    println!("{}", msg);
                }
                continue;
            }
        };
        debug!(?command, "Terminal command");

        match command {
            TerminalCommand::List => {
                let _ = screen.mount().await;
                print_table(screen).await?;
            }
            TerminalCommand::Add => {
                screen.open_create().await?;
                fill_and_submit(screen, input, ProductDraft::default(), false).await?;
            }
            TerminalCommand::Edit(code) => match screen.edit(code).await {
                Ok(draft) => fill_and_submit(screen, input, draft, true).await?,
                Err(e) => println!("{}", e),
            },
            TerminalCommand::Delete(code) => match screen.delete(code).await {
                Ok(DeleteOutcome::Deleted(_)) => print_table(screen).await?,
                Ok(DeleteOutcome::Cancelled) => println!("Deletion cancelled."),
                Err(_) => {}
            },
            TerminalCommand::Help => println!("{}", HELP),
            TerminalCommand::Quit => break,
        }
    }

    info!("Interactive session ended");
    Ok(())
}

/// Walks the form fields, then submits. A rejected submit can be retried with
/// the draft kept as typed.
async fn fill_and_submit(
    screen: &ScreenClient,
    input: &LineInput,
    mut draft: ProductDraft,
    editing: bool,
) -> anyhow::Result<()> {
    loop {
        for field in FormField::ALL {
            if editing && field == FormField::Code {
                continue;
            }
            let marker = if field.is_required() { "*" } else { "" };
            let question = format!("{}{} [{}]: ", field.label(), marker, draft.get(field));
            let Some(answer) = input.ask(&question).await? else {
                screen.close_form().await?;
                return Ok(());
            };
            let value = match field_input(&answer) {
                FieldInput::Keep => continue,
                FieldInput::Clear => String::new(),
                FieldInput::Set(value) => value,
            };
            screen.set_field(field, value.clone()).await?;
            draft.set(field, value);
        }

        match screen.submit().await {
            Ok(SubmitOutcome::Created(code)) | Ok(SubmitOutcome::Updated(code)) => {
                debug!(code = %code, "Form submitted");
                print_table(screen).await?;
                return Ok(());
            }
            Err(ScreenError::Form(_)) | Err(ScreenError::Api(_)) => {
                let again = input.ask("Edit the form again? [y/N] ").await?;
                if !again.as_deref().map(is_yes).unwrap_or(false) {
                    screen.close_form().await?;
                    return Ok(());
                }
            }
            Err(e) => return Err(e.into()),
        }
    }
}
