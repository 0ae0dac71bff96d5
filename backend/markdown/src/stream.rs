//! Fragment accumulation and refresh cadence.
//!
//! One accumulator lives for the duration of one streamed response. The
//! caller appends fragments as they arrive and re-renders only when the
//! cadence fires, then takes one final cursor-free render at stream end.

use crate::normalize::normalize;

/// Marker appended to interim renders while a response is still streaming.
pub const STREAM_CURSOR: &str = " ▌";

/// Running concatenation of all fragments received for one response.
#[derive(Debug)]
pub struct StreamAccumulator {
    buffer: String,
    show_thinking: bool,
}

impl StreamAccumulator {
    pub fn new(show_thinking: bool) -> Self {
        Self {
            buffer: String::new(),
            show_thinking,
        }
    }

    /// Append one fragment.
    ///
    /// Returns the interim normalization when a re-render is due: the
    /// buffer's character count is a multiple of 3, or the fragment ends in
    /// a space or newline. Word and line boundaries always render; the
    /// modulo keeps tight token loops from redrawing on every fragment.
    pub fn push(&mut self, fragment: &str) -> Option<String> {
        self.buffer.push_str(fragment);
        let due = self.buffer.chars().count() % 3 == 0
            || fragment.ends_with(' ')
            || fragment.ends_with('\n');
        due.then(|| normalize(&self.buffer, self.show_thinking))
    }

    /// Final pass over the complete buffer. Thinking segments are visible
    /// in the finished render regardless of the interim setting.
    pub fn finish(self) -> String {
        normalize(&self.buffer, true)
    }

    /// The raw, unnormalized buffer.
    pub fn raw(&self) -> &str {
        &self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_renders_at_least_once_then_finalizes() {
        let mut acc = StreamAccumulator::new(true);
        let mut interim = Vec::new();

        for fragment in ["The", " current", " temperature is 30C."] {
            if let Some(text) = acc.push(fragment) {
                interim.push(format!("{}{}", text, STREAM_CURSOR));
            }
        }

        // "The" lands on a 3-char boundary; the later fragments end in
        // neither space nor newline and miss the modulo.
        assert_eq!(interim.len(), 1);
        assert!(interim[0].ends_with(STREAM_CURSOR));

        let final_text = acc.finish();
        assert_eq!(final_text, "The current temperature is 30C.");
        assert!(!final_text.contains(STREAM_CURSOR.trim()));
    }

    #[test]
    fn test_space_suffix_forces_render() {
        let mut acc = StreamAccumulator::new(true);
        // 5 chars: modulo misses, trailing space still renders.
        assert!(acc.push("hell ").is_some());
    }

    #[test]
    fn test_newline_suffix_forces_render() {
        let mut acc = StreamAccumulator::new(true);
        assert!(acc.push("line\n").is_some());
    }

    #[test]
    fn test_quiet_fragment_skips_render() {
        let mut acc = StreamAccumulator::new(true);
        // 4 chars, no whitespace suffix.
        assert!(acc.push("hmm?").is_none());
        assert_eq!(acc.raw(), "hmm?");
    }

    #[test]
    fn test_interim_hides_thinking_final_shows_it() {
        let mut acc = StreamAccumulator::new(false);
        let interim = acc.push("a <thinking>x</thinking> b ").unwrap();
        assert!(!interim.contains("thinking"));

        let final_text = acc.finish();
        assert!(final_text.contains("<thinking>x</thinking>"));
    }

    #[test]
    fn test_empty_accumulator() {
        let acc = StreamAccumulator::new(true);
        assert!(acc.is_empty());
        assert_eq!(acc.finish(), "");
    }
}
