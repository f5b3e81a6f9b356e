use anyhow::Result;

use crate::Turn;
use crate::conversation::Conversation;
use crate::inference::InferenceClient;
use crate::prompt::{self, ContextWindow, FullHistory, SYSTEM_INSTRUCTION};

/// Shown in place of a reply when the backend cannot produce one.
pub const REPLY_UNAVAILABLE: &str =
    "I couldn't get a response right now. Give it a moment and try again.";

/// The front-end the session talks through.
pub trait RenderSurface {
    /// Redraw the transcript from the full history.
    fn display_history(&mut self, turns: &[Turn]);

    /// Next submission from the user, or `None` when the session ends.
    fn next_user_input(&mut self) -> Result<Option<String>>;

    /// Out-of-band notice. Shown to the user but never entered into the
    /// history, so it is never replayed to the model.
    fn display_notice(&mut self, message: &str);
}

/// One chat session: owns the history and drives the exchange loop.
///
/// Strictly sequential. A submission is fully resolved, reply appended
/// or notice shown, before the next one is read.
pub struct Session<C, S> {
    conversation: Conversation,
    client: C,
    surface: S,
    window: Box<dyn ContextWindow>,
}

impl<C: InferenceClient, S: RenderSurface> Session<C, S> {
    pub fn new(client: C, surface: S) -> Self {
        Self::with_window(client, surface, Box::new(FullHistory))
    }

    pub fn with_window(client: C, surface: S, window: Box<dyn ContextWindow>) -> Self {
        Self {
            conversation: Conversation::new(),
            client,
            surface,
            window,
        }
    }

    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run the exchange loop until the surface reports end of input.
    pub async fn run(&mut self) -> Result<()> {
        loop {
            self.surface.display_history(self.conversation.all());

            let input = match self.surface.next_user_input()? {
                Some(text) => text,
                None => break,
            };

            // Blank submissions never reach the backend.
            if input.trim().is_empty() {
                continue;
            }

            self.conversation.push_user(input);

            let prompt_turns =
                prompt::build_prompt(SYSTEM_INSTRUCTION, &self.conversation, self.window.as_ref());

            match self.client.generate(&prompt_turns).await {
                Ok(reply) => self.conversation.push_assistant(reply),
                Err(e) => {
                    tracing::warn!(error = %e, "inference request failed");
                    self.surface.display_notice(REPLY_UNAVAILABLE);
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;
    use crate::conversation::GREETING;
    use crate::error::ChatError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Mutex;

    struct StubClient {
        replies: Mutex<VecDeque<Result<String, ChatError>>>,
        prompts: Mutex<Vec<Vec<Turn>>>,
    }

    impl StubClient {
        fn with_replies(replies: Vec<Result<String, ChatError>>) -> Self {
            Self {
                replies: Mutex::new(replies.into_iter().collect()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl InferenceClient for StubClient {
        async fn generate(&self, prompt: &[Turn]) -> Result<String, ChatError> {
            self.prompts.lock().unwrap().push(prompt.to_vec());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or_else(|| Err(ChatError::InferenceUnavailable("no scripted reply".into())))
        }
    }

    struct ScriptedSurface {
        inputs: VecDeque<String>,
        redraws: usize,
        notices: Vec<String>,
    }

    impl ScriptedSurface {
        fn typing(inputs: &[&str]) -> Self {
            Self {
                inputs: inputs.iter().map(|s| s.to_string()).collect(),
                redraws: 0,
                notices: Vec::new(),
            }
        }
    }

    impl RenderSurface for ScriptedSurface {
        fn display_history(&mut self, _turns: &[Turn]) {
            self.redraws += 1;
        }

        fn next_user_input(&mut self) -> Result<Option<String>> {
            Ok(self.inputs.pop_front())
        }

        fn display_notice(&mut self, message: &str) {
            self.notices.push(message.to_string());
        }
    }

    #[tokio::test]
    async fn round_trip_appends_turns_in_order() {
        let client = StubClient::with_replies(vec![Ok("That's okay, tell me more.".to_string())]);
        let surface = ScriptedSurface::typing(&["I feel anxious"]);
        let mut session = Session::new(client, surface);
        session.run().await.unwrap();

        let turns = session.conversation().all();
        assert_eq!(turns.len(), 3);
        assert_eq!(turns[0], Turn::assistant(GREETING));
        assert_eq!(turns[1], Turn::user("I feel anxious"));
        assert_eq!(turns[2], Turn::assistant("That's okay, tell me more."));
    }

    #[tokio::test]
    async fn prompt_replays_instruction_and_history() {
        let client = StubClient::with_replies(vec![Ok("ok".to_string())]);
        let surface = ScriptedSurface::typing(&["I feel anxious"]);
        let mut session = Session::new(client, surface);
        session.run().await.unwrap();

        let prompts = session.client.prompts.lock().unwrap();
        assert_eq!(prompts.len(), 1);
        assert_eq!(
            prompts[0],
            vec![
                Turn::system(SYSTEM_INSTRUCTION),
                Turn::assistant(GREETING),
                Turn::user("I feel anxious"),
            ]
        );
    }

    #[tokio::test]
    async fn blank_input_appends_nothing_and_calls_nothing() {
        let client = StubClient::with_replies(vec![]);
        let surface = ScriptedSurface::typing(&["", "   "]);
        let mut session = Session::new(client, surface);
        session.run().await.unwrap();

        assert_eq!(session.conversation().len(), 1);
        assert_eq!(session.client.calls(), 0);
    }

    #[tokio::test]
    async fn failed_reply_becomes_a_notice_not_a_turn() {
        let client = StubClient::with_replies(vec![Err(ChatError::InferenceUnavailable(
            "connection refused".to_string(),
        ))]);
        let surface = ScriptedSurface::typing(&["hello?"]);
        let mut session = Session::new(client, surface);
        session.run().await.unwrap();

        let turns = session.conversation().all();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::User);
        assert_eq!(session.surface.notices, vec![REPLY_UNAVAILABLE.to_string()]);
    }

    #[tokio::test]
    async fn session_survives_a_failure_and_continues() {
        let client = StubClient::with_replies(vec![
            Err(ChatError::InferenceUnavailable("oops".to_string())),
            Ok("Still here with you.".to_string()),
        ]);
        let surface = ScriptedSurface::typing(&["are you there", "hello again"]);
        let mut session = Session::new(client, surface);
        session.run().await.unwrap();

        let turns = session.conversation().all();
        assert_eq!(
            turns.last().unwrap(),
            &Turn::assistant("Still here with you.")
        );
        assert_eq!(session.surface.notices.len(), 1);
    }

    #[tokio::test]
    async fn history_is_redrawn_each_cycle() {
        let client = StubClient::with_replies(vec![Ok("hi".to_string())]);
        let surface = ScriptedSurface::typing(&["hello"]);
        let mut session = Session::new(client, surface);
        session.run().await.unwrap();

        // One redraw before the input, one before end of session.
        assert_eq!(session.surface.redraws, 2);
    }

    #[tokio::test]
    async fn bounded_window_limits_the_replayed_history() {
        let client = StubClient::with_replies(vec![Ok("one".to_string()), Ok("two".to_string())]);
        let surface = ScriptedSurface::typing(&["first message", "second message"]);
        let mut session = Session::with_window(
            client,
            surface,
            Box::new(crate::prompt::RecentTurns { max_turns: 1 }),
        );
        session.run().await.unwrap();

        let prompts = session.client.prompts.lock().unwrap();
        assert_eq!(
            prompts[1],
            vec![
                Turn::system(SYSTEM_INSTRUCTION),
                Turn::user("second message"),
            ]
        );
    }
}
