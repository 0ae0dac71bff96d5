//! TUI App State
//!
//! Holds the conversation, the typed input line, and the in-flight streamed
//! response. The fragment pipeline lives here so a turn can be driven in
//! tests without a terminal attached.

use markdown::StreamAccumulator;
use skycast_core::{extract_text, ConversationState};

/// A response currently being streamed.
pub struct InFlight {
    pub accumulator: StreamAccumulator,
    /// Latest interim normalization shown in the history pane.
    pub rendered: String,
    pub fragments: usize,
}

pub struct AppState {
    pub conversation: ConversationState,
    pub input: String,
    pub in_flight: Option<InFlight>,
    pub status: String,
    pub should_quit: bool,
    pub show_thinking: bool,
}

impl AppState {
    pub fn new(conversation: ConversationState, show_thinking: bool) -> Self {
        Self {
            conversation,
            input: String::new(),
            in_flight: None,
            status: "Type your message (Enter to send, Esc to quit)".into(),
            should_quit: false,
            show_thinking,
        }
    }

    pub fn is_streaming(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Take the typed prompt if one is ready to send.
    ///
    /// Empty input and input typed while a response is streaming are
    /// ignored; `/`-prefixed input is handled as a UI command.
    pub fn take_input(&mut self) -> Option<String> {
        if self.is_streaming() || self.input.trim().is_empty() {
            return None;
        }
        let typed = std::mem::take(&mut self.input);
        let typed = typed.trim().to_string();

        if let Some(command) = typed.strip_prefix('/') {
            self.run_command(command);
            return None;
        }
        Some(typed)
    }

    fn run_command(&mut self, command: &str) {
        match command {
            "clear" => {
                self.conversation.transcript.clear();
                self.status = "History cleared.".into();
            }
            other => {
                self.status = format!("Unknown command: /{other}");
            }
        }
    }

    /// Record the outgoing prompt and open a fresh accumulator.
    pub fn begin_stream(&mut self, prompt: &str) {
        self.conversation.push_user(prompt);
        self.in_flight = Some(InFlight {
            accumulator: StreamAccumulator::new(self.show_thinking),
            rendered: String::new(),
            fragments: 0,
        });
        self.status = "SkyCast is answering…".into();
    }

    /// Feed one raw fragment through payload extraction and the
    /// accumulator. Returns true when the interim render changed.
    pub fn apply_fragment(&mut self, raw: &str) -> bool {
        let Some(in_flight) = &mut self.in_flight else {
            return false;
        };
        let text = extract_text(raw);
        in_flight.fragments += 1;
        match in_flight.accumulator.push(&text) {
            Some(interim) => {
                in_flight.rendered = interim;
                true
            }
            None => false,
        }
    }

    /// Close the stream: final cursor-free normalization, pushed onto the
    /// transcript. Returns the final text together with the fragment count.
    pub fn finish_stream(&mut self) -> Option<(String, usize)> {
        let in_flight = self.in_flight.take()?;
        let fragments = in_flight.fragments;
        let final_text = in_flight.accumulator.finish();
        self.conversation.push_assistant(final_text.clone());
        self.status = "Type your message (Enter to send, Esc to quit)".into();
        Some((final_text, fragments))
    }
}
