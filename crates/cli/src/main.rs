mod config;
mod ui;

use anyhow::Result;
use config::Config;
use mindcare_core::models;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Load config
    let mut config = match Config::load() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load config: {}", e);
            return Err(e);
        }
    };

    // Environment override for the backend address
    if let Ok(url) = std::env::var("MINDCARE_OLLAMA_URL") {
        config.ollama_url = url;
    }

    // Parse args
    let args: Vec<String> = std::env::args().collect();

    // Handle commands — default to chat if no args
    let command = args.get(1).map(|s| s.as_str()).unwrap_or("chat");

    match command {
        "chat" => {
            ui::print_banner(&config);
            ui::interactive_chat(&config).await?;
        }
        "models" => {
            println!("Available listener models:");
            for model in models::AVAILABLE_MODELS {
                let marker = if model.id == config.model { "*" } else { " " };
                println!("  {} {:<18} {}", marker, model.id, model.label);
            }
        }
        "config" => {
            if args.len() < 3 {
                println!("Current config:");
                println!("  Ollama URL: {}", config.ollama_url);
                println!("  Model: {}", config.model);
            } else if args[2] == "set" && args.len() >= 5 {
                match args[3].as_str() {
                    "server" => {
                        config.ollama_url = args[4].clone();
                        config.save()?;
                        println!("Ollama URL updated to: {}", config.ollama_url);
                    }
                    "model" => match config.set_model(&args[4]) {
                        Ok(()) => {
                            config.save()?;
                            println!("Model updated to: {}", config.model);
                        }
                        Err(e) => eprintln!("{}", e),
                    },
                    _ => print_usage(),
                }
            } else {
                print_usage();
            }
        }
        message => {
            // Treat any other argument as a message
            ui::single_message(&config, message.to_string()).await?;
        }
    }

    Ok(())
}

fn print_usage() {
    println!("MindCare - a listening companion in your terminal");
    println!("\nUsage:");
    println!("  mindcare                        Start interactive chat");
    println!("  mindcare \"your message\"         Send a single message");
    println!("  mindcare models                 List available listener models");
    println!("  mindcare config                 Show current configuration");
    println!("  mindcare config set server URL  Set the Ollama URL");
    println!("  mindcare config set model ID    Pick a listener model");
}
