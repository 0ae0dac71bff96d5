//! Context preamble formatting.

use crate::types::Turn;

/// Format retrieved turns as plain-text context for the agent.
///
/// The chat flow prepends this to the first prompt of a session so the
/// runtime sees recent history without any protocol-level support.
pub fn context_preamble(turns: &[Turn]) -> Option<String> {
    if turns.is_empty() {
        return None;
    }

    let lines: Vec<String> = turns
        .iter()
        .map(|turn| format!("{}: {}", turn.role, turn.content))
        .collect();

    Some(format!("Recent conversation:\n{}", lines.join("\n")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_history_is_none() {
        assert!(context_preamble(&[]).is_none());
    }

    #[test]
    fn test_turns_render_role_prefixed_lines() {
        let turns = vec![Turn::user("weather in Doha?"), Turn::assistant("30C, sunny.")];
        let preamble = context_preamble(&turns).unwrap();
        assert_eq!(
            preamble,
            "Recent conversation:\nuser: weather in Doha?\nassistant: 30C, sunny."
        );
    }
}
