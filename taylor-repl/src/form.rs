//! Reading the calculator form from the user.

use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, BufRead};
use taylor_series::input::Inputs;

/// Prompts for the fields of the form, one after another. Each prompt starts out with the answer
/// given the previous time.
pub struct Form {
    rl: DefaultEditor,
    previous: Inputs,

    /// The number of lines written while reading the last form.
    lines: usize,
}

impl Form {
    pub fn new(order: u32) -> Result<Self, ReadlineError> {
        Ok(Self {
            rl: DefaultEditor::new()?,
            previous: Inputs { order, ..Default::default() },
            lines: 0,
        })
    }

    /// Returns the number of lines written to the terminal while reading the last form.
    pub fn lines(&self) -> usize {
        self.lines
    }

    /// Reads one field, using `initial` as the starting text.
    fn field(&mut self, prompt: &str, initial: &str) -> Result<String, ReadlineError> {
        let answer = self.rl.readline_with_initial(prompt, (initial, ""))?;
        self.lines += 1;
        if !answer.trim().is_empty() {
            self.rl.add_history_entry(&answer)?;
        }
        Ok(answer)
    }

    /// Reads the order until it is an integer from 1 to 10.
    fn order(&mut self) -> Result<u32, ReadlineError> {
        loop {
            let initial = self.previous.order.to_string();
            let answer = self.field("order> ", &initial)?;
            match answer.trim().parse::<u32>() {
                Ok(order) if (1..=10).contains(&order) => return Ok(order),
                _ => {
                    eprintln!("the order must be an integer from 1 to 10");
                    self.lines += 1;
                },
            }
        }
    }

    /// Reads all fields of the form. Returns [`ReadlineError::Eof`] or
    /// [`ReadlineError::Interrupted`] when the user wants to stop.
    pub fn read(&mut self) -> Result<Inputs, ReadlineError> {
        let previous = self.previous.clone();
        self.lines = 0;
        let inputs = Inputs {
            function: self.field("function> ", &previous.function)?,
            variables: self.field("variables> ", &previous.variables)?,
            expansions: self.field("expansions> ", &previous.expansions)?,
            order: self.order()?,
        };
        self.previous = inputs.clone();
        Ok(inputs)
    }
}

/// Reads the form from the first four lines of the reader: the function, the variables, the
/// expansion points, and optionally the order. A missing or blank order line keeps
/// `default_order`.
pub fn read_lines(reader: impl BufRead, default_order: u32) -> io::Result<Inputs> {
    let mut lines = reader.lines().take(4);
    let mut next = || lines.next().transpose().map(Option::unwrap_or_default);

    let function = next()?;
    let variables = next()?;
    let expansions = next()?;
    let order = next()?;
    let order = match order.trim() {
        "" => default_order,
        order => order.parse().map_err(|_| io::Error::new(
            io::ErrorKind::InvalidData,
            format!("`{}` is not a valid order", order),
        ))?,
    };

    Ok(Inputs { function, variables, expansions, order })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn four_lines() {
        let inputs = read_lines("sin(x)*y\nx, y\nx=0; y=1\n4\nignored\n".as_bytes(), 3).unwrap();
        assert_eq!(inputs, Inputs {
            function: "sin(x)*y".to_string(),
            variables: "x, y".to_string(),
            expansions: "x=0; y=1".to_string(),
            order: 4,
        });
    }

    #[test]
    fn default_order() {
        let inputs = read_lines("x\nx\nx=0\n".as_bytes(), 3).unwrap();
        assert_eq!(inputs.order, 3);
    }

    #[test]
    fn invalid_order() {
        let err = read_lines("x\nx\nx=0\nthree\n".as_bytes(), 3).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::InvalidData);
    }
}
