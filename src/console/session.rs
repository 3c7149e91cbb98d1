use crate::api::client::Transport;
use crate::api::operations::Operation;
use crate::api::reconciler::FormEffect;
use crate::console::command::{Command, HELP};
use crate::console::render::{render_form, render_results};
use crate::console::state::{CustomerConsole, ViewState};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::debug;

/// An operator session: one form, one result list, fed line by line.
///
/// Commands run one at a time, so a session never trips the in-flight
/// guard itself. The guard lives in [`CustomerConsole::dispatch`] and covers
/// callers that share one console across tasks.
pub struct Session<T> {
    console: CustomerConsole<T>,
    view: ViewState,
}

impl<T: Transport> Session<T> {
    pub fn new(console: CustomerConsole<T>) -> Self {
        Self {
            console,
            view: ViewState::new(),
        }
    }

    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Execute one command and return the text to print, `None` on quit
    pub async fn handle(&mut self, command: Command) -> Option<String> {
        let output = match command {
            Command::Set(field, value) => {
                self.view.form.set(field, value);
                String::new()
            }
            Command::Unset(field) => {
                self.view.form.set(field, "");
                String::new()
            }
            Command::Show => render_form(&self.view.form),
            Command::Results => render_results(&self.view.results),
            Command::Clear => {
                self.view.clear_form();
                format!("{}\n", self.view.flash)
            }
            Command::Run(operation) => {
                let outcome = self.console.run(operation, &mut self.view).await;
                let mut out = format!("{}\n", outcome.message);
                if operation == Operation::Search && outcome.is_success() {
                    out.push_str(&render_results(&self.view.results));
                } else if outcome.form != FormEffect::Unchanged {
                    out.push_str(&render_form(&self.view.form));
                }
                out
            }
            Command::Help => HELP.to_string(),
            Command::Quit => return None,
            Command::Nothing => String::new(),
        };
        Some(output)
    }

    /// Read commands until end of input or `quit`
    pub async fn run<R, W>(&mut self, reader: R, writer: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await.context("Failed to read command")? {
            let output = match Command::parse(&line) {
                Ok(command) => {
                    debug!(command = ?command, "Handling command");
                    match self.handle(command).await {
                        Some(output) => output,
                        None => break,
                    }
                }
                Err(e) => format!("{}\n", e),
            };

            if !output.is_empty() {
                writer
                    .write_all(output.as_bytes())
                    .await
                    .context("Failed to write output")?;
                writer.flush().await.context("Failed to flush output")?;
            }
        }

        Ok(())
    }
}
