// ABOUTME: User interaction seams — yes/no confirmation and choosing from a list.
// ABOUTME: Terminal implementations for the binary and scripted ones for tests.

use std::collections::VecDeque;
use std::io::{self, BufRead, BufReader, Stderr, Stdin, Write};

/// Answers a yes/no question before a destructive step.
pub trait Confirm {
    fn confirm(&mut self, question: &str) -> io::Result<bool>;
}

impl<F> Confirm for F
where
    F: FnMut(&str) -> bool,
{
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        Ok(self(question))
    }
}

/// Chooses one entry from a list, or reads a free-form line.
///
/// `None` means the user cancelled.
pub trait Picker {
    fn pick(&mut self, prompt: &str, items: &[String]) -> io::Result<Option<String>>;

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>>;
}

/// Everything a command needs from the user.
pub trait Prompter: Confirm + Picker {}

impl<T: Confirm + Picker> Prompter for T {}

/// Prompts on a terminal: questions and menus go to `output`, answers come from `input`.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<BufReader<Stdin>, Stderr> {
    /// Prompt over stdin/stderr, leaving stdout free for session payloads.
    ///
    /// Stdin is not held locked, so a layout host may read it before the first prompt.
    pub fn stdio() -> Self {
        Self::new(BufReader::new(io::stdin()), io::stderr())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Ask and read one trimmed answer line. `None` on end of input.
    fn ask(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        let mut prompt = format!("{question} (y or n) ");
        loop {
            let Some(answer) = self.ask(&prompt)? else {
                return Ok(false);
            };
            match answer.to_ascii_lowercase().as_str() {
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                _ => prompt = format!("Please answer y or n. {question} (y or n) "),
            }
        }
    }
}

impl<R: BufRead, W: Write> Picker for TerminalPrompt<R, W> {
    fn pick(&mut self, prompt: &str, items: &[String]) -> io::Result<Option<String>> {
        for (i, item) in items.iter().enumerate() {
            writeln!(self.output, "{:>3}) {}", i + 1, item)?;
        }
        loop {
            let Some(answer) = self.ask(&format!("{prompt}: "))? else {
                return Ok(None);
            };
            if answer.is_empty() {
                return Ok(None);
            }
            if let Some(item) = match_choice(&answer, items) {
                return Ok(Some(item.clone()));
            }
            writeln!(self.output, "No match for {answer:?}")?;
        }
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        let answer = self.ask(&format!("{prompt}: "))?;
        Ok(answer.filter(|a| !a.is_empty()))
    }
}

/// Match an answer against a menu: a 1-based index, an exact name, or a unique prefix.
fn match_choice<'a>(answer: &str, items: &'a [String]) -> Option<&'a String> {
    if let Ok(n) = answer.parse::<usize>() {
        if let Some(item) = n.checked_sub(1).and_then(|i| items.get(i)) {
            return Some(item);
        }
    }
    if let Some(item) = items.iter().find(|item| item.as_str() == answer) {
        return Some(item);
    }
    let mut prefixed = items.iter().filter(|item| item.starts_with(answer));
    match (prefixed.next(), prefixed.next()) {
        (Some(item), None) => Some(item),
        _ => None,
    }
}

/// Answers yes to every confirmation and delegates picking to the wrapped prompter.
pub struct AssumeYes<P>(pub P);

impl<P> Confirm for AssumeYes<P> {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        tracing::debug!(question, "assuming yes");
        Ok(true)
    }
}

impl<P: Picker> Picker for AssumeYes<P> {
    fn pick(&mut self, prompt: &str, items: &[String]) -> io::Result<Option<String>> {
        self.0.pick(prompt, items)
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.0.read_line(prompt)
    }
}

/// Replays queued answers and records every question asked.
///
/// An exhausted queue answers no, picks nothing, and reads nothing.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    pub confirms: VecDeque<bool>,
    pub picks: VecDeque<Option<String>>,
    pub lines: VecDeque<Option<String>>,
    pub asked: Vec<String>,
}

impl ScriptedPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm_with(mut self, answer: bool) -> Self {
        self.confirms.push_back(answer);
        self
    }

    pub fn pick_with(mut self, choice: Option<&str>) -> Self {
        self.picks.push_back(choice.map(str::to_string));
        self
    }

    pub fn line_with(mut self, line: Option<&str>) -> Self {
        self.lines.push_back(line.map(str::to_string));
        self
    }
}

impl Confirm for ScriptedPrompt {
    fn confirm(&mut self, question: &str) -> io::Result<bool> {
        self.asked.push(question.to_string());
        Ok(self.confirms.pop_front().unwrap_or(false))
    }
}

impl Picker for ScriptedPrompt {
    fn pick(&mut self, prompt: &str, items: &[String]) -> io::Result<Option<String>> {
        self.asked.push(prompt.to_string());
        let choice = self.picks.pop_front().flatten();
        Ok(choice.filter(|c| items.contains(c)))
    }

    fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        self.asked.push(prompt.to_string());
        Ok(self.lines.pop_front().flatten())
    }
}
