//! One-shot ask: stream a single prompt and print the final answer.

use anyhow::Result;
use tokio_util::sync::CancellationToken;
use tracing::info;

use markdown::{to_plain_text, StreamAccumulator};
use skycast_config::SkycastConfig;
use skycast_core::{extract_text, ConversationState};
use skycast_memory::{recall_preamble, record_exchange};

use crate::{build_client, build_store};

pub async fn run(config: &SkycastConfig, prompt: &str, plain: bool) -> Result<()> {
    let client = build_client(config)?;
    let store = build_store(config);
    let memory = config.memory.clone().unwrap_or_default();
    let actor_id = memory.effective_actor_id();
    let memory_session = memory.effective_session_id();

    let conversation = ConversationState::new(actor_id.clone());

    let outbound = match &store {
        Some(store) => match recall_preamble(
            store.as_ref(),
            &actor_id,
            &memory_session,
            memory.effective_last_k(),
        )
        .await
        {
            Some(preamble) => format!("{preamble}\n\n{prompt}"),
            None => prompt.to_string(),
        },
        None => prompt.to_string(),
    };

    let mut rx = client.invoke_streaming(&outbound, conversation.session_id, CancellationToken::new());

    // Same accumulator as the chat UI; interim renders are simply unused
    // for piped output.
    let mut accumulator = StreamAccumulator::new(true);
    let mut fragments = 0usize;
    while let Some(raw) = rx.recv().await {
        fragments += 1;
        let _ = accumulator.push(&extract_text(&raw));
    }

    let final_text = accumulator.finish();
    info!(fragments, chars = final_text.chars().count(), "answer complete");

    if let Some(store) = &store {
        record_exchange(store.as_ref(), &actor_id, &memory_session, prompt, &final_text).await;
    }

    if plain {
        println!("{}", to_plain_text(&final_text));
    } else {
        println!("{final_text}");
    }

    Ok(())
}
