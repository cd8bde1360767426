//! The interactive query loop: choose a city and filters, print the report,
//! optionally page through raw rows, then start over or quit.

use anyhow::Result;
use std::io::{BufRead, Write};
use tracing::{error, info};

use crate::analyzers::analyze;
use crate::config::CityCatalog;
use crate::data::{Dataset, TripFilter, load_city};
use crate::output::{PAGE_SIZE, write_analysis, write_rows, write_selection, write_separator};
use crate::prompt::Console;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Quit,
}

pub struct Session<'a, R, W> {
    catalog: &'a CityCatalog,
    console: Console<R, W>,
}

impl<'a, R: BufRead, W: Write> Session<'a, R, W> {
    pub fn new(catalog: &'a CityCatalog, console: Console<R, W>) -> Self {
        Self { catalog, console }
    }

    pub fn into_console(self) -> Console<R, W> {
        self.console
    }

    /// Runs query cycles until the user declines to restart or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(
            self.console.output(),
            "\nHello! Let's explore some US bikeshare data!"
        )?;

        let mut cycles = 0;
        loop {
            cycles += 1;
            if self.cycle()? == Flow::Quit {
                break;
            }
            match self.console.ask_yes_no("Would you like to restart?")? {
                Some(true) => continue,
                Some(false) | None => break,
            }
        }

        info!(cycles, "Session finished");
        writeln!(self.console.output(), "\nHave a great day")?;
        Ok(())
    }

    fn cycle(&mut self) -> Result<Flow> {
        let Some(city) = self.console.ask_city()? else {
            return Ok(Flow::Quit);
        };
        let Some(month) = self.console.ask_month()? else {
            return Ok(Flow::Quit);
        };
        let Some(day) = self.console.ask_day()? else {
            return Ok(Flow::Quit);
        };
        let filter = TripFilter::new(month, day);

        let dataset = match load_city(self.catalog, city) {
            Ok(dataset) => dataset,
            Err(e) => {
                error!(city = %city, error = %e, "Failed to load trip data");
                writeln!(self.console.output(), "\nCould not load data for {city}: {e}")?;
                return Ok(Flow::Continue);
            }
        };
        let filtered = filter.apply(&dataset);
        info!(city = %city, filter = %filter, rows = filtered.len(), "Query");

        let out = self.console.output();
        write_selection(out, city, &filter, filtered.len())?;
        write_analysis(out, &analyze(&filtered))?;

        self.page_rows(&filtered)
    }

    /// Shows raw rows [`PAGE_SIZE`] at a time while the user keeps asking.
    fn page_rows(&mut self, dataset: &Dataset) -> Result<Flow> {
        let mut pages = dataset.records().chunks(PAGE_SIZE).enumerate().peekable();
        let mut question = "Would you like to view five rows of raw data related to your selections?";

        while pages.peek().is_some() {
            match self.console.ask_yes_no(question)? {
                None => return Ok(Flow::Quit),
                Some(false) => break,
                Some(true) => {}
            }
            if let Some((page, rows)) = pages.next() {
                write_rows(self.console.output(), dataset.schema(), rows, page * PAGE_SIZE)?;
            }
            if pages.peek().is_none() {
                writeln!(self.console.output(), "\nNo more rows to display.")?;
            }
            question = "Would you like to view the next five rows?";
        }

        write_separator(self.console.output())?;
        Ok(Flow::Continue)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn run(catalog: &CityCatalog, input: &str) -> String {
        let console = Console::new(Cursor::new(input.as_bytes().to_vec()), Vec::new());
        let mut session = Session::new(catalog, console);
        session.run().unwrap();
        String::from_utf8(session.into_console().into_inner().1).unwrap()
    }

    #[test]
    fn test_missing_file_is_reported_and_session_continues() {
        let catalog = CityCatalog::new("no/such/dir");
        let out = run(&catalog, "chicago\nall\nall\nno\n");

        assert!(out.contains("Could not load data for Chicago"));
        assert!(out.contains("Would you like to restart?"));
        assert!(out.contains("Have a great day"));
    }

    #[test]
    fn test_end_of_input_ends_session() {
        let catalog = CityCatalog::new(".");
        let out = run(&catalog, "washington\n");

        assert!(out.contains("Which month"));
        assert!(!out.contains("Which day"));
        assert!(out.contains("Have a great day"));
    }
}
