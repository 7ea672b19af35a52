// Message sinks for the conversational front ends

use std::io::Write;

/// Something that can show a message to the user
pub trait Ui {
    fn print_message(&mut self, text: &str);
}

/// Writes each message to stdout
#[derive(Debug, Default)]
pub struct ConsoleUi;

impl Ui for ConsoleUi {
    fn print_message(&mut self, text: &str) {
        let mut stdout = std::io::stdout().lock();
        // A closed pipe must not take the session down
        let _ = writeln!(stdout, "{}", text);
        let _ = stdout.flush();
    }
}

/// Collects messages in memory
#[derive(Debug, Default)]
pub struct BufferUi {
    messages: Vec<String>,
}

impl BufferUi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    /// Everything printed so far, one message per line
    pub fn text(&self) -> String {
        self.messages.join("\n")
    }

    /// Take the collected messages, leaving the buffer empty
    pub fn drain(&mut self) -> String {
        let text = self.text();
        self.messages.clear();
        text
    }
}

impl Ui for BufferUi {
    fn print_message(&mut self, text: &str) {
        self.messages.push(text.to_string());
    }
}
