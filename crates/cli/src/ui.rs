use anyhow::Result;
use std::io::{self, Write};

use mindcare_core::inference::OllamaClient;
use mindcare_core::session::{RenderSurface, Session};
use mindcare_core::{Role, Turn};

use crate::config::Config;

pub fn print_banner(config: &Config) {
    println!("🧘 MindCare Chat");
    println!("💬 A safe, private space to express yourself and feel heard.\n");
    println!("🌿 How I can support you:");
    println!("   😌 Calm your thoughts");
    println!("   😔 Talk through sadness");
    println!("   🌟 Find motivation again");
    println!("   💭 Simply share what's on your mind\n");
    println!("🧠 Note: This is not a substitute for professional therapy or crisis help.");
    println!("Listener model: {}. Type 'quit' to exit.\n", config.model);
}

/// Stdin/stdout rendition of the transcript. Tracks how much of the
/// history is already on screen and only prints the rest; the user's
/// own words are on screen from typing them.
pub struct TerminalSurface {
    printed: usize,
    pending: Option<String>,
    interactive: bool,
}

impl TerminalSurface {
    pub fn interactive() -> Self {
        Self {
            printed: 0,
            pending: None,
            interactive: true,
        }
    }

    pub fn one_shot(message: String) -> Self {
        Self {
            printed: 0,
            pending: Some(message),
            interactive: false,
        }
    }
}

impl RenderSurface for TerminalSurface {
    fn display_history(&mut self, turns: &[Turn]) {
        for turn in &turns[self.printed..] {
            if turn.role == Role::Assistant {
                println!("MindCare: {}\n", turn.content);
            }
        }
        self.printed = turns.len();
    }

    fn next_user_input(&mut self) -> Result<Option<String>> {
        if let Some(message) = self.pending.take() {
            println!("You: {}\n", message);
            println!("🧠 Thinking...\n");
            return Ok(Some(message));
        }

        if !self.interactive {
            return Ok(None);
        }

        print!("You: ");
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            // EOF ends the session
            println!();
            return Ok(None);
        }
        let input = input.trim();

        if input.eq_ignore_ascii_case("quit") {
            println!("\nTake care of yourself. 💛");
            return Ok(None);
        }

        if !input.is_empty() {
            println!("\n🧠 Thinking...\n");
        }

        Ok(Some(input.to_string()))
    }

    fn display_notice(&mut self, message: &str) {
        eprintln!("❌ {}\n", message);
    }
}

pub async fn interactive_chat(config: &Config) -> Result<()> {
    let client = OllamaClient::new(config.ollama_url.clone(), config.model.clone())?;
    let mut session = Session::new(client, TerminalSurface::interactive());
    session.run().await
}

pub async fn single_message(config: &Config, message: String) -> Result<()> {
    let client = OllamaClient::new(config.ollama_url.clone(), config.model.clone())?;
    let mut session = Session::new(client, TerminalSurface::one_shot(message));
    session.run().await
}
