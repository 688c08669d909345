// Line-based prompts over any reader/writer pair so the loops can be tested
use birdscout_core::{resolve_state, validate_selection, Selection, StateChoice, StateTable};
use std::io::{self, BufRead, Write};

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    /// Print `message` and read one line. `None` means end of input.
    pub fn ask(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    /// Ask for a state name until it is one we know, or the user quits
    pub fn ask_state(&mut self, message: &str, states: &StateTable) -> io::Result<StateChoice> {
        let mut message = message;
        loop {
            let Some(answer) = self.ask(message)? else {
                return Ok(StateChoice::Exit);
            };

            match resolve_state(&answer, states) {
                StateChoice::Unknown => message = "Please enter a valid state:",
                choice => return Ok(choice),
            }
        }
    }

    /// Ask for a number in `1..=maximum`; `None` when the user quits.
    ///
    /// `domain` and `action` fill in the retry message, e.g. "county" and
    /// "query".
    pub fn ask_selection(
        &mut self,
        message: &str,
        maximum: u32,
        domain: &str,
        action: &str,
    ) -> io::Result<Option<u32>> {
        let retry = format!(
            "Please choose a valid integer for the {} you would like to {} or \"exit\":",
            domain, action
        );

        let mut message = message;
        loop {
            let Some(answer) = self.ask(message)? else {
                return Ok(None);
            };

            match validate_selection(&answer, maximum) {
                Selection::Valid(value) => return Ok(Some(value)),
                Selection::Exit => return Ok(None),
                Selection::Invalid => message = &retry,
            }
        }
    }
}
