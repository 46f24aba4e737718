//! Interactive prompts
//!
//! Every blocking prompt returns a [`PromptOutcome`]; cancellation and a
//! closed input stream are ordinary values, never errors.

use console::Term;
use dialoguer::theme::ColorfulTheme;
use dialoguer::{Confirm, Input};
use std::collections::VecDeque;
use std::io::{self, BufRead, IsTerminal, StdinLock, Stdout, Write};

/// Result of a blocking prompt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptOutcome<T> {
    /// The user answered
    Value(T),
    /// The user pressed Ctrl+C
    Cancelled,
    /// Input ended or is not interactive
    StreamClosed,
}

impl<T> PromptOutcome<T> {
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> PromptOutcome<U> {
        match self {
            PromptOutcome::Value(v) => PromptOutcome::Value(f(v)),
            PromptOutcome::Cancelled => PromptOutcome::Cancelled,
            PromptOutcome::StreamClosed => PromptOutcome::StreamClosed,
        }
    }

    pub fn value(self) -> Option<T> {
        match self {
            PromptOutcome::Value(v) => Some(v),
            _ => None,
        }
    }
}

/// Source of interactive answers
pub trait Prompter {
    /// Ask for a number in `0..=max`, re-asking until the answer is in range
    fn choose(&mut self, prompt: &str, max: usize, default: usize) -> PromptOutcome<usize>;

    /// Ask a yes/no question
    fn confirm(&mut self, prompt: &str, default: bool) -> PromptOutcome<bool>;

    /// Ask for free text; an empty answer is allowed
    fn text(&mut self, prompt: &str) -> PromptOutcome<String>;
}

/// Prompter for the current process.
///
/// Dialoguer needs a terminal on stdin and on the stream it draws to; it draws
/// on stdout, or on stderr when only stdout is redirected. Piped input gets
/// line-based prompts.
pub fn stdio_prompter() -> Box<dyn Prompter> {
    if io::stdin().is_terminal() {
        for term in [Term::stdout(), Term::stderr()] {
            if term.is_term() {
                return Box::new(TerminalPrompter::on(term));
            }
        }
    }
    Box::new(LinePrompter::stdio())
}

/// Terminal prompts rendered with dialoguer
pub struct TerminalPrompter {
    theme: ColorfulTheme,
    term: Term,
}

impl TerminalPrompter {
    /// Prompts drawn on `term`
    pub fn on(term: Term) -> Self {
        TerminalPrompter {
            theme: ColorfulTheme::default(),
            term,
        }
    }
}

impl Prompter for TerminalPrompter {
    fn choose(&mut self, prompt: &str, max: usize, default: usize) -> PromptOutcome<usize> {
        let result = Input::<usize>::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default.min(max))
            .validate_with(move |choice: &usize| -> Result<(), String> {
                if *choice <= max {
                    Ok(())
                } else {
                    Err(format!("Please enter a number between 0 and {}", max))
                }
            })
            .interact_text_on(&self.term);

        outcome(result)
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> PromptOutcome<bool> {
        let result = Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(default)
            .interact_on(&self.term);

        outcome(result)
    }

    fn text(&mut self, prompt: &str) -> PromptOutcome<String> {
        let result = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true)
            .interact_text_on(&self.term);

        outcome(result)
    }
}

/// Map a dialoguer result onto a prompt outcome. Ctrl+C is read as a key in
/// raw mode and surfaces as `Interrupted`; anything else means no usable input.
fn outcome<T>(result: Result<T, dialoguer::Error>) -> PromptOutcome<T> {
    match result {
        Ok(value) => PromptOutcome::Value(value),
        Err(dialoguer::Error::IO(e)) if e.kind() == io::ErrorKind::Interrupted => {
            PromptOutcome::Cancelled
        }
        Err(_) => PromptOutcome::StreamClosed,
    }
}

/// Line-based prompts: the question is written to `output` and one line is
/// read from `input` per answer. End of input is [`PromptOutcome::StreamClosed`].
pub struct LinePrompter<R, W> {
    input: R,
    output: W,
}

impl LinePrompter<StdinLock<'static>, Stdout> {
    /// Questions on stdout, answers from stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        LinePrompter { input, output }
    }

    fn say(&mut self, message: &str) {
        writeln!(self.output, "{}", message).ok();
    }

    /// Write `question` and read one line without its line ending
    fn ask(&mut self, question: &str) -> PromptOutcome<String> {
        write!(self.output, "{}", question).ok();
        self.output.flush().ok();

        let mut line = String::new();
        match self.input.read_line(&mut line) {
            Ok(0) => PromptOutcome::StreamClosed,
            Ok(_) => PromptOutcome::Value(line.trim_end_matches(['\n', '\r']).to_string()),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => PromptOutcome::Cancelled,
            Err(_) => PromptOutcome::StreamClosed,
        }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn choose(&mut self, prompt: &str, max: usize, default: usize) -> PromptOutcome<usize> {
        let default = default.min(max);
        loop {
            let answer = match self.ask(&format!("{} [0-{}] ({}): ", prompt, max, default)) {
                PromptOutcome::Value(answer) => answer,
                PromptOutcome::Cancelled => return PromptOutcome::Cancelled,
                PromptOutcome::StreamClosed => return PromptOutcome::StreamClosed,
            };

            let answer = answer.trim();
            if answer.is_empty() {
                return PromptOutcome::Value(default);
            }
            match answer.parse::<usize>() {
                Ok(choice) if choice <= max => return PromptOutcome::Value(choice),
                _ => self.say(&format!("Please enter a number between 0 and {}", max)),
            }
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> PromptOutcome<bool> {
        let hint = if default { "[Y/n]" } else { "[y/N]" };
        loop {
            let answer = match self.ask(&format!("{} {}: ", prompt, hint)) {
                PromptOutcome::Value(answer) => answer,
                PromptOutcome::Cancelled => return PromptOutcome::Cancelled,
                PromptOutcome::StreamClosed => return PromptOutcome::StreamClosed,
            };

            match answer.trim().to_lowercase().as_str() {
                "" => return PromptOutcome::Value(default),
                "y" | "yes" => return PromptOutcome::Value(true),
                "n" | "no" => return PromptOutcome::Value(false),
                _ => self.say("Please answer y or n"),
            }
        }
    }

    fn text(&mut self, prompt: &str) -> PromptOutcome<String> {
        self.ask(&format!("{}: ", prompt))
    }
}

/// A canned answer for [`ScriptedPrompter`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Answer {
    Choice(usize),
    Yes,
    No,
    Text(String),
    /// Accept whatever default the prompt offers
    Default,
    Cancel,
    Eof,
}

/// Kind of question a prompter was asked
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuestionKind {
    Choose,
    Confirm,
    Text,
}

/// Replays a fixed list of answers and records every question. Used for tests
/// and non-interactive drivers.
#[derive(Debug, Default)]
pub struct ScriptedPrompter {
    answers: VecDeque<Answer>,
    asked: Vec<(QuestionKind, String)>,
}

impl ScriptedPrompter {
    pub fn new(answers: Vec<Answer>) -> Self {
        ScriptedPrompter {
            answers: answers.into(),
            asked: Vec::new(),
        }
    }

    /// Questions asked so far
    pub fn asked(&self) -> &[(QuestionKind, String)] {
        &self.asked
    }

    /// Answers not consumed yet
    pub fn remaining(&self) -> usize {
        self.answers.len()
    }

    fn next(&mut self, kind: QuestionKind, prompt: &str) -> Option<Answer> {
        self.asked.push((kind, prompt.to_string()));
        self.answers.pop_front()
    }
}

impl Prompter for ScriptedPrompter {
    fn choose(&mut self, prompt: &str, max: usize, default: usize) -> PromptOutcome<usize> {
        loop {
            match self.next(QuestionKind::Choose, prompt) {
                Some(Answer::Choice(n)) if n <= max => return PromptOutcome::Value(n),
                // Out of range: ask again, like the terminal prompt does
                Some(Answer::Choice(_)) => continue,
                Some(Answer::Default) => return PromptOutcome::Value(default.min(max)),
                Some(Answer::Cancel) => return PromptOutcome::Cancelled,
                _ => return PromptOutcome::StreamClosed,
            }
        }
    }

    fn confirm(&mut self, prompt: &str, default: bool) -> PromptOutcome<bool> {
        match self.next(QuestionKind::Confirm, prompt) {
            Some(Answer::Yes) => PromptOutcome::Value(true),
            Some(Answer::No) => PromptOutcome::Value(false),
            Some(Answer::Default) => PromptOutcome::Value(default),
            Some(Answer::Cancel) => PromptOutcome::Cancelled,
            _ => PromptOutcome::StreamClosed,
        }
    }

    fn text(&mut self, prompt: &str) -> PromptOutcome<String> {
        match self.next(QuestionKind::Text, prompt) {
            Some(Answer::Text(s)) => PromptOutcome::Value(s),
            Some(Answer::Default) => PromptOutcome::Value(String::new()),
            Some(Answer::Cancel) => PromptOutcome::Cancelled,
            _ => PromptOutcome::StreamClosed,
        }
    }
}
