//! Background driver for a single chat turn. The GUI thread spawns the
//! turn and polls the channel each frame; exactly one turn is in flight
//! at a time.

use std::sync::mpsc::Sender;
use std::thread;

use providers::GeminiClient;

/// Reply used when the API answers 200 but carries no candidate text.
pub const FALLBACK_REPLY: &str = "The shadow reflects nothingness.";

#[derive(Debug, Clone)]
pub enum TurnOutcome {
    /// Text to reveal in the chat panel.
    Reply(String),
    /// Human-readable failure detail for a system message.
    Failure(String),
}

/// Run one `generateContent` call on a worker thread and report the
/// outcome. No retries and no timeout beyond the transport's own.
pub fn run_chat_turn(
    tx: Sender<TurnOutcome>,
    api_key: String,
    model: String,
    system_instruction: String,
    user_text: String,
) {
    thread::spawn(move || {
        let outcome = match tokio::runtime::Runtime::new() {
            Ok(rt) => {
                let client = GeminiClient::new(api_key, model);
                match rt.block_on(client.generate(&user_text, &system_instruction)) {
                    Ok(Some(text)) => TurnOutcome::Reply(text),
                    Ok(None) => TurnOutcome::Reply(FALLBACK_REPLY.to_string()),
                    Err(e) => {
                        tracing::warn!(error = %e, "chat turn failed");
                        TurnOutcome::Failure(e.to_string())
                    }
                }
            }
            Err(e) => TurnOutcome::Failure(format!("Failed to start async runtime: {}", e)),
        };
        // Receiver may be gone if the app closed mid-turn.
        let _ = tx.send(outcome);
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::time::Duration;

    #[test]
    fn test_turn_reports_failure_on_unreachable_host() {
        let (tx, rx) = mpsc::channel();
        run_chat_turn(
            tx,
            "test-key".to_string(),
            // Invalid model id keeps the request local to name resolution
            // or a 4xx; either way the turn must deliver an outcome.
            "no-such-model".to_string(),
            "base".to_string(),
            "hello".to_string(),
        );
        match rx.recv_timeout(Duration::from_secs(60)) {
            Ok(TurnOutcome::Failure(detail)) => assert!(!detail.is_empty()),
            Ok(TurnOutcome::Reply(_)) => {}
            Err(e) => panic!("no outcome delivered: {}", e),
        }
    }
}
