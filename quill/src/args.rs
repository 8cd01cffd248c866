use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Quill LLM gateway
#[derive(Debug, Parser)]
#[command(name = "quill", about = "Send prompts to Anthropic, OpenAI, or Azure OpenAI with a fixed local tool catalog")]
pub struct Args {
    /// Path to configuration file
    #[arg(short, long, env = "QUILL_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Send a single prompt and print the reply
    Ask {
        /// Prompt text
        prompt: String,

        /// System prompt sent ahead of the user turn
        #[arg(short, long)]
        system: Option<String>,

        /// Backend to use (anthropic, openai, azure); defaults to the
        /// config file, then `LLM_PROVIDER`, then anthropic
        #[arg(short, long)]
        backend: Option<String>,

        /// Override the model (or Azure deployment fallback)
        #[arg(short, long)]
        model: Option<String>,
    },

    /// List supported backends and whether each is configured
    Backends,
}
