use std::{
    borrow::Cow,
    io::{self, BufRead, StdinLock},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output;

const SCRIPT_ENV: &str = "BILLBOOK_CLI_SCRIPT";

/// Runs the shell. Setting `BILLBOOK_CLI_SCRIPT` reads commands from stdin
/// without prompts or confirmations.
pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    let mut source = match mode {
        CliMode::Interactive => {
            let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
            editor.set_helper(Some(CommandHelper::new(context.completion_words())));
            editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
            output::info("Type `help` to list commands. Indices come from `list`.");
            LineSource::Editor(Box::new(editor))
        }
        CliMode::Script => LineSource::Stdin(io::stdin().lock()),
    };

    run_loop(&mut context, &mut source)
}

/// Where command lines come from.
enum LineSource {
    Editor(Box<Editor<CommandHelper, DefaultHistory>>),
    Stdin(StdinLock<'static>),
}

enum Input {
    Line(String),
    Interrupted,
    Finished,
}

impl LineSource {
    fn next(&mut self, prompt: &str) -> Result<Input, CliError> {
        match self {
            LineSource::Editor(editor) => match editor.readline(prompt) {
                Ok(line) => {
                    if !line.trim().is_empty() {
                        editor.add_history_entry(line.trim()).ok();
                    }
                    Ok(Input::Line(line))
                }
                Err(ReadlineError::Interrupted) => Ok(Input::Interrupted),
                Err(ReadlineError::Eof) => Ok(Input::Finished),
                Err(err) => Err(err.into()),
            },
            LineSource::Stdin(stdin) => {
                let mut line = String::new();
                if stdin.read_line(&mut line)? == 0 {
                    return Ok(Input::Finished);
                }
                Ok(Input::Line(line))
            }
        }
    }
}

fn run_loop(context: &mut ShellContext, source: &mut LineSource) -> Result<(), CliError> {
    loop {
        let line = match source.next(&context.prompt())? {
            Input::Line(line) => line,
            Input::Interrupted => {
                if context.confirm_exit()? {
                    break;
                }
                continue;
            }
            Input::Finished => break,
        };

        match handle_line(context, &line) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => context.report_error(err)?,
        }
    }

    if context.session.has_unsaved_changes() {
        output::warning("Leaving with changes that could not be saved.");
    }
    Ok(())
}

/// Tokenizes and dispatches one line. Blank lines and `#` comments are skipped.
pub(crate) fn handle_line(
    context: &mut ShellContext,
    line: &str,
) -> Result<LoopControl, CommandError> {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not parse `{}`: {}", line.trim(), err));
            return Ok(LoopControl::Continue);
        }
    };

    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };
    if raw.starts_with('#') {
        return Ok(LoopControl::Continue);
    }

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.dispatch(&raw.to_lowercase(), raw, &args)
}

/// Completes command names and aliases in the first word, and subcommands
/// of `person`, `bill`, and `installment` in the second.
struct CommandHelper {
    words: Vec<String>,
}

const SUBCOMMANDS: &[(&str, &[&str])] = &[
    ("person", &["add", "delete"]),
    ("bill", &["add", "delete", "image"]),
    ("installment", &["add", "delete"]),
    ("config", &["show", "set"]),
];

impl CommandHelper {
    fn new(words: Vec<&'static str>) -> Self {
        let mut words: Vec<String> = words.into_iter().map(str::to_string).collect();
        words.sort();
        words.dedup();
        Self { words }
    }

    fn candidates(&self, line: &str, start: usize) -> Vec<String> {
        let needle = line[start..].to_ascii_lowercase();
        let earlier: Vec<&str> = line[..start].split_whitespace().collect();
        let pool: Vec<&str> = match earlier.as_slice() {
            [] => self.words.iter().map(String::as_str).collect(),
            [command] => SUBCOMMANDS
                .iter()
                .find(|(name, _)| command.eq_ignore_ascii_case(name))
                .map(|(_, subs)| subs.to_vec())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        pool.into_iter()
            .filter(|word| word.starts_with(&needle))
            .map(str::to_string)
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let pairs = self
            .candidates(prefix, start)
            .into_iter()
            .map(|word| Pair {
                display: word.clone(),
                replacement: word,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, _ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        Ok(ValidationResult::Valid(None))
    }
}
