//! TUI event loop.
//!
//! One logical flow per submission: the prompt is streamed to the agent,
//! fragments render on the refresh cadence, and the stream is fully drained
//! (or errored, or cancelled) before the next submission can start.

use std::io::{self, Stdout};
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use crossterm::event::{Event, EventStream};
use crossterm::execute;
use crossterm::terminal::{
    disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen,
};
use futures_util::StreamExt;
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use tokio_util::sync::CancellationToken;
use tracing::info;

use logging::{ChatEvent, EventLogger};
use skycast_client::AgentClient;
use skycast_core::{AgentPayload, ConversationState};
use skycast_memory::{recall_preamble, record_exchange, TurnStore};

use crate::app::AppState;
use crate::input::handle_key_event;
use crate::render::draw_ui;

type Tui = Terminal<CrosstermBackend<Stdout>>;

/// Everything the chat loop needs.
pub struct TuiOptions {
    pub client: AgentClient,
    pub store: Option<Arc<dyn TurnStore>>,
    pub actor_id: String,
    /// Memory thread the transcript is stored under, stable across runs.
    pub memory_session: String,
    pub last_k: usize,
    pub show_thinking: bool,
    pub refresh_delay: Duration,
}

/// Run the chat UI until the user quits. Returns the final conversation.
pub async fn run(options: TuiOptions) -> Result<ConversationState> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(stdout))?;

    let result = event_loop(&mut terminal, options).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn event_loop(terminal: &mut Tui, options: TuiOptions) -> Result<ConversationState> {
    let conversation = ConversationState::new(options.actor_id.clone());
    let mut app = AppState::new(conversation, options.show_thinking);
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| draw_ui(f, &app))?;

        if app.should_quit {
            break;
        }

        match events.next().await {
            Some(Ok(Event::Key(key))) => {
                if let Some(prompt) = handle_key_event(key, &mut app) {
                    run_turn(terminal, &mut events, &mut app, &options, prompt).await?;
                }
            }
            // Resize and other events redraw on the next pass.
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(e.into()),
            None => break,
        }
    }

    Ok(app.conversation)
}

/// Drive one submission end to end.
async fn run_turn(
    terminal: &mut Tui,
    events: &mut EventStream,
    app: &mut AppState,
    options: &TuiOptions,
    prompt: String,
) -> Result<()> {
    let session_id = app.conversation.session_id;
    let session_tag = session_id.to_string();

    // Recent history rides along as plain-text context on the session's
    // first prompt only; the runtime keeps its own state within a session.
    let outbound = match &options.store {
        Some(store) if app.conversation.is_first_turn() => {
            match recall_preamble(
                store.as_ref(),
                &options.actor_id,
                &options.memory_session,
                options.last_k,
            )
            .await
            {
                Some(preamble) => format!("{preamble}\n\n{prompt}"),
                None => prompt.clone(),
            }
        }
        _ => prompt.clone(),
    };

    EventLogger::log_event(
        &session_tag,
        ChatEvent::PromptSubmitted {
            chars: prompt.chars().count(),
        },
    );

    app.begin_stream(&prompt);
    terminal.draw(|f| draw_ui(f, app))?;

    let cancel = CancellationToken::new();
    let mut rx = options
        .client
        .invoke_streaming(&outbound, session_id, cancel.clone());

    loop {
        tokio::select! {
            fragment = rx.recv() => match fragment {
                Some(raw) => {
                    if let Some(tool_name) = tool_annotation_name(&raw) {
                        EventLogger::log_event(&session_tag, ChatEvent::ToolAnnotation { tool_name });
                    }
                    if app.apply_fragment(&raw) {
                        terminal.draw(|f| draw_ui(f, app))?;
                    }
                    // Pacing only; correctness does not depend on it.
                    tokio::time::sleep(options.refresh_delay).await;
                }
                None => break,
            },
            maybe_event = events.next() => {
                match maybe_event {
                    Some(Ok(Event::Key(key))) => {
                        handle_key_event(key, app);
                        if app.should_quit {
                            cancel.cancel();
                            break;
                        }
                    }
                    Some(_) => {}
                    None => {
                        cancel.cancel();
                        break;
                    }
                }
            }
        }
    }

    let Some((final_text, fragments)) = app.finish_stream() else {
        return Ok(());
    };
    terminal.draw(|f| draw_ui(f, app))?;

    if final_text.starts_with("Error invoking agent:") {
        EventLogger::log_event(
            &session_tag,
            ChatEvent::AgentError {
                error_msg: final_text.clone(),
            },
        );
    } else {
        EventLogger::log_event(
            &session_tag,
            ChatEvent::ResponseCompleted {
                fragments,
                chars: final_text.chars().count(),
            },
        );
    }

    if let Some(store) = &options.store {
        record_exchange(
            store.as_ref(),
            &options.actor_id,
            &options.memory_session,
            &prompt,
            &final_text,
        )
        .await;
    }

    info!(fragments, "turn complete");
    Ok(())
}

fn tool_annotation_name(raw: &str) -> Option<String> {
    match serde_json::from_str::<AgentPayload>(raw) {
        Ok(AgentPayload::ToolUse { current_tool_use }) => Some(current_tool_use.name),
        _ => None,
    }
}
