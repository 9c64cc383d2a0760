use std::time::Duration;

use console::style;
use indicatif::{ProgressBar, ProgressFinish, ProgressStyle};

use crate::terminal as term;

pub struct Spinner {
    progress: ProgressBar,
    message: String,
}

impl Drop for Spinner {
    fn drop(&mut self) {
        if !self.progress.is_finished() {
            self.fail();
        }
    }
}

impl Spinner {
    /// Finish the spinner, replacing it with a success line.
    pub fn finish(self) {
        self.progress.finish_and_clear();
        term::success(&self.message);
    }

    /// Clear the spinner without leaving a line behind.
    pub fn clear(self) {
        self.progress.finish_and_clear();
    }

    /// Fail the spinner, leaving an error line behind.
    pub fn failed(mut self) {
        self.fail();
    }

    pub fn message(&mut self, msg: impl ToString) {
        let msg = msg.to_string();

        self.progress.set_message(msg.clone());
        self.message = msg;
    }

    fn fail(&mut self) {
        self.progress.finish_and_clear();
        eprintln!("{} {}", style("!!").red().reverse(), self.message);
    }
}

pub fn spinner(message: impl ToString) -> Spinner {
    let message = message.to_string();
    let spinner_style = ProgressStyle::with_template("{spinner} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner())
        .tick_strings(&[
            &style("\\ ").yellow().to_string(),
            &style("| ").yellow().to_string(),
            &style("/ ").yellow().to_string(),
            &style("| ").yellow().to_string(),
        ]);

    let progress = ProgressBar::new_spinner().with_finish(ProgressFinish::AndClear);
    progress.set_style(spinner_style);
    progress.enable_steady_tick(Duration::from_millis(99));
    progress.set_message(message.clone());

    Spinner { progress, message }
}
