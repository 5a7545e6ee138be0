/*
[INPUT]:  Operator keystrokes and command results
[OUTPUT]: Prompt rendering, dispatch, and one message line per failure
[POS]:    Shell loop - read, dispatch, print, repeat
[UPDATE]: When prompt behavior or the error-message table changes
*/

use std::collections::VecDeque;
use std::fmt;
use std::io::{self, BufRead, Write};

use dialoguer::theme::Theme;
use dialoguer::{Completion, History};
use dialoguer::{Input, Password};
use goxsh_adapter::{GoxClient, GoxError};
use tracing::debug;

use crate::dispatch;
use crate::error::{Result, ShellError};

const HISTORY_CAPACITY: usize = 200;

enum ReadLine {
    Line(String),
    Interrupted,
    Eof,
}

/// The interactive shell: owns the exchange client and the line history,
/// runs the read-dispatch-print loop until `exit` or end of input.
pub struct Shell {
    client: GoxClient,
    history: CommandHistory,
    running: bool,
}

impl Shell {
    pub fn new(client: GoxClient) -> Self {
        Self {
            client,
            history: CommandHistory::new(HISTORY_CAPACITY),
            running: true,
        }
    }

    pub fn client(&self) -> &GoxClient {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut GoxClient {
        &mut self.client
    }

    /// Ask the loop to stop after the current command
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub async fn run(&mut self) {
        while self.running {
            let line = match self.read_line() {
                ReadLine::Line(line) => line,
                ReadLine::Interrupted => {
                    println!();
                    continue;
                }
                ReadLine::Eof => {
                    println!("exit");
                    break;
                }
            };

            let mut tokens = line.split_whitespace();
            let Some(first) = tokens.next() else { continue };
            let command = first.to_owned();
            let args: Vec<String> = tokens.map(str::to_owned).collect();

            // Racing against ctrl_c drops the in-flight command (and any
            // request it carries) without taking down the shell.
            tokio::select! {
                result = self.execute(&command, &args) => {
                    if let Err(err) = result {
                        self.report(&err);
                    }
                }
                _ = tokio::signal::ctrl_c() => println!(),
            }
        }
    }

    async fn execute(&mut self, command: &str, args: &[String]) -> Result<()> {
        match dispatch::resolve(command) {
            Some(spec) => {
                dispatch::check_arity(spec, args.len())?;
                (spec.handler)(self, args).await
            }
            // The unknown-command path ignores its arguments and never fails.
            None => {
                println!("{command}: Unknown command.");
                Ok(())
            }
        }
    }

    /// Map one failure to exactly one printed line
    fn report(&self, err: &ShellError) {
        match err {
            ShellError::Command(message) | ShellError::Arity(message) => println!("{message}"),
            ShellError::Interrupted => println!(),
            ShellError::Client(client_err) => self.report_client(client_err),
        }
    }

    fn report_client(&self, err: &GoxError) {
        let exchange = self.client.exchange_name();
        match err {
            GoxError::Api(message) => println!("{exchange} error: {message}"),
            GoxError::LoginRejected => {
                println!("{exchange} rejected the login credentials. Maybe you made a typo?");
            }
            GoxError::NoCredentials => {
                println!("No login credentials entered. Use the login command first.");
            }
            GoxError::EmptyField(field) => println!("Empty {field}."),
            GoxError::Transport(detail) => {
                debug!(error = %detail, "transport failure");
                println!("Could not reach {exchange}. Check your connection and try again.");
            }
            GoxError::UnexpectedResponse(detail) => {
                debug!(detail = %detail, "unexpected response payload");
                println!("Unexpected response from {exchange}.");
            }
            other => println!("Internal error: {other}"),
        }
    }

    fn prompt_text(&self) -> String {
        format!("{}$ ", self.client.username().unwrap_or(""))
    }

    fn read_line(&mut self) -> ReadLine {
        let prompt = self.prompt_text();
        if !console::user_attended() {
            print!("{prompt}");
            let _ = io::stdout().flush();
            return read_plain_line();
        }

        let completion = CommandCompletion;
        let input = Input::<String>::with_theme(&PromptTheme)
            .with_prompt(prompt)
            .allow_empty(true)
            .history_with(&mut self.history)
            .completion_with(&completion)
            .interact_text();
        match input {
            Ok(line) => ReadLine::Line(line),
            Err(dialoguer::Error::IO(err)) if err.kind() == io::ErrorKind::Interrupted => {
                ReadLine::Interrupted
            }
            Err(_) => ReadLine::Eof,
        }
    }

    /// Re-prompt until a non-empty username is entered
    pub(crate) fn prompt_username(&self) -> Result<String> {
        loop {
            let entry = self.read_field("Username: ", false)?;
            let trimmed = entry.trim();
            if !trimmed.is_empty() {
                return Ok(trimmed.to_owned());
            }
        }
    }

    /// Re-prompt until a non-empty password is entered; echo stays off
    pub(crate) fn prompt_password(&self) -> Result<String> {
        loop {
            let entry = self.read_field("Password: ", true)?;
            if !entry.is_empty() {
                return Ok(entry);
            }
        }
    }

    fn read_field(&self, prompt: &str, hidden: bool) -> Result<String> {
        if !console::user_attended() {
            print!("{prompt}");
            let _ = io::stdout().flush();
            return match read_plain_line() {
                ReadLine::Line(line) => Ok(line),
                _ => Err(ShellError::Interrupted),
            };
        }

        let entry = if hidden {
            Password::with_theme(&PromptTheme)
                .with_prompt(prompt)
                .allow_empty_password(true)
                .interact()
        } else {
            Input::<String>::with_theme(&PromptTheme)
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
        };
        entry.map_err(|_| ShellError::Interrupted)
    }
}

fn read_plain_line() -> ReadLine {
    let mut buffer = String::new();
    match io::stdin().lock().read_line(&mut buffer) {
        Ok(0) => ReadLine::Eof,
        Ok(_) => ReadLine::Line(buffer.trim_end_matches(['\r', '\n']).to_owned()),
        Err(err) if err.kind() == io::ErrorKind::Interrupted => ReadLine::Interrupted,
        Err(_) => ReadLine::Eof,
    }
}

/// Session-local command history for the line editor
struct CommandHistory {
    entries: VecDeque<String>,
    capacity: usize,
}

impl CommandHistory {
    fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::new(),
            capacity,
        }
    }
}

impl History<String> for CommandHistory {
    fn read(&self, pos: usize) -> Option<String> {
        self.entries.get(pos).cloned()
    }

    fn write(&mut self, val: &String) {
        if val.trim().is_empty() {
            return;
        }
        if self.entries.front().map(String::as_str) == Some(val.as_str()) {
            return;
        }
        self.entries.push_front(val.clone());
        self.entries.truncate(self.capacity);
    }
}

/// Tab completion over the command word. Arguments are left alone; the
/// dispatcher answers the prefix query.
struct CommandCompletion;

impl Completion for CommandCompletion {
    fn get(&self, input: &str) -> Option<String> {
        if input.contains(char::is_whitespace) {
            return None;
        }
        let matches = dispatch::complete(input);
        match matches.as_slice() {
            [] => None,
            // A unique match gets a trailing separator so the operator can
            // keep typing arguments.
            [only] => Some(format!("{only} ")),
            many => {
                let common = common_prefix(many);
                (common.len() > input.len()).then(|| common.to_owned())
            }
        }
    }
}

fn common_prefix<'a>(names: &[&'a str]) -> &'a str {
    let Some(first) = names.first() else {
        return "";
    };
    let mut end = first.len();
    for name in &names[1..] {
        end = first
            .bytes()
            .zip(name.bytes())
            .take(end)
            .take_while(|(a, b)| a == b)
            .count();
    }
    &first[..end]
}

/// Renders prompts verbatim: the shell prompt carries its own trailing
/// "$ " and the login prompts their ": ".
struct PromptTheme;

impl Theme for PromptTheme {
    fn format_input_prompt(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        _default: Option<&str>,
    ) -> fmt::Result {
        write!(f, "{prompt}")
    }

    fn format_input_prompt_selection(
        &self,
        f: &mut dyn fmt::Write,
        prompt: &str,
        sel: &str,
    ) -> fmt::Result {
        write!(f, "{prompt}{sel}")
    }
}
