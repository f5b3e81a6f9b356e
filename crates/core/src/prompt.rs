use crate::conversation::Conversation;
use crate::{Role, Turn};

/// Instruction sent as the first entry of every request. It is injected
/// at build time and never stored in the conversation itself.
pub const SYSTEM_INSTRUCTION: &str =
    "You are a supportive and empathetic mental health assistant. \
     Listen carefully, respond kindly, and encourage self-reflection. \
     You are not a doctor or therapist. Avoid giving medical advice. \
     Always reply in a caring tone and in English.";

/// Selects which slice of the stored history is replayed to the model.
pub trait ContextWindow {
    fn select<'a>(&self, turns: &'a [Turn]) -> &'a [Turn];
}

/// Replays the entire history on every request, so prompt size grows
/// with conversation length. Swap in [`RecentTurns`] to bound it.
pub struct FullHistory;

impl ContextWindow for FullHistory {
    fn select<'a>(&self, turns: &'a [Turn]) -> &'a [Turn] {
        turns
    }
}

/// Keeps only the most recent turns.
pub struct RecentTurns {
    pub max_turns: usize,
}

impl ContextWindow for RecentTurns {
    fn select<'a>(&self, turns: &'a [Turn]) -> &'a [Turn] {
        let start = turns.len().saturating_sub(self.max_turns);
        &turns[start..]
    }
}

/// Build the structured prompt for one generation request: the system
/// instruction first, then the windowed history in original order.
/// System turns inside the history are never replayed; the store never
/// contains one, but a stray entry must not override the instruction.
pub fn build_prompt(
    system_instruction: &str,
    conversation: &Conversation,
    window: &dyn ContextWindow,
) -> Vec<Turn> {
    let mut prompt = Vec::with_capacity(conversation.len() + 1);
    prompt.push(Turn::system(system_instruction));

    for turn in window.select(conversation.all()) {
        if turn.role == Role::System {
            continue;
        }
        prompt.push(turn.clone());
    }

    prompt
}
