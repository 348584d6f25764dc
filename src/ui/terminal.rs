use std::io::{self, BufRead, Write};

use super::{Ui, View};

/// Interactive terminal front end
#[derive(Debug, Clone, Default)]
pub struct TerminalUi {
    assume_yes: bool,
}

impl TerminalUi {
    pub fn new(assume_yes: bool) -> Self {
        Self { assume_yes }
    }
}

impl Ui for TerminalUi {
    fn alert(&self, message: &str) {
        println!("{}", message);
    }

    fn confirm(&self, question: &str) -> bool {
        if self.assume_yes {
            return true;
        }

        print!("{} [y/N] ", question);
        if io::stdout().flush().is_err() {
            return false;
        }

        let mut answer = String::new();
        match io::stdin().lock().read_line(&mut answer) {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                tracing::error!(error = %e, "Failed to read confirmation");
                false
            }
        }
    }

    fn redirect(&self, view: &View) {
        println!("-> {}: run '{}'", view, view.command());
    }

    fn show(&self, content: &str) {
        println!();
        println!("{}", content);
        println!();
    }
}
