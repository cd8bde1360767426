//! Line-oriented console prompts with re-prompting on invalid input.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use tracing::debug;

use crate::data::filter::{day_names, month_names};
use crate::data::{City, DayFilter, MonthFilter};

const INVALID_INPUT: &str = "Check your input and try again.";

/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl FromStr for Answer {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "yes" | "y" => Ok(Answer::Yes),
            "no" | "n" => Ok(Answer::No),
            _ => Err(()),
        }
    }
}

/// Prompts on `output` and reads answers from `input`.
///
/// Every `ask_*` method returns `Ok(None)` once input is exhausted, which
/// callers treat as the user leaving.
pub struct Console<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Console<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }

    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks `question` until the answer parses as `T`.
    pub fn ask<T: FromStr>(&mut self, question: &str, retry: &str) -> io::Result<Option<T>> {
        loop {
            writeln!(self.output, "\n{question}")?;
            self.output.flush()?;

            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse() {
                Ok(value) => return Ok(Some(value)),
                Err(_) => {
                    debug!(input = %line, "Rejected console input");
                    writeln!(self.output, "{retry}")?;
                }
            }
        }
    }

    pub fn ask_city(&mut self) -> io::Result<Option<City>> {
        self.ask(
            "Which city would you like to view? New York City, Chicago or Washington?",
            INVALID_INPUT,
        )
    }

    pub fn ask_month(&mut self) -> io::Result<Option<MonthFilter>> {
        let names: Vec<_> = month_names().chain(["All"]).collect();
        self.ask(
            &format!("Which month would you like to view? {}.", names.join(", ")),
            INVALID_INPUT,
        )
    }

    pub fn ask_day(&mut self) -> io::Result<Option<DayFilter>> {
        let names: Vec<_> = day_names().chain(["All"]).collect();
        self.ask(
            &format!(
                "Which day of the week would you like to view? {}.",
                names.join(", ")
            ),
            INVALID_INPUT,
        )
    }

    /// `Some(true)` for yes, `Some(false)` for no.
    pub fn ask_yes_no(&mut self, question: &str) -> io::Result<Option<bool>> {
        let answer = self.ask::<Answer>(
            &format!("{question} Enter yes or no."),
            "Your input is invalid. Please enter only 'yes' or 'no'.",
        )?;
        Ok(answer.map(|a| a == Answer::Yes))
    }
}
