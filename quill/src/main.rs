#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use args::{Args, Command};
use clap::Parser;
use quill_config::{Config, EnvSnapshot};
use quill_llm::{GatewayFactory, Message, Provider};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let env = EnvSnapshot::capture();

    // Load configuration
    let config = match &args.config {
        Some(path) => Config::load(path, &env)?,
        None => Config::default(),
    };

    quill_telemetry::init(&config.log)?;

    let factory = GatewayFactory::new(env);

    match args.command {
        Command::Ask {
            prompt,
            system,
            backend,
            model,
        } => ask(&factory, &config, prompt, system, backend.as_deref(), model).await,
        Command::Backends => {
            list_backends(&factory);
            Ok(())
        }
    }
}

async fn ask(
    factory: &GatewayFactory,
    config: &Config,
    prompt: String,
    system: Option<String>,
    backend: Option<&str>,
    model: Option<String>,
) -> anyhow::Result<()> {
    let backend = match (backend, config.backend) {
        (Some(name), _) => name.parse()?,
        (None, Some(backend)) => backend,
        (None, None) => factory.default_backend()?,
    };

    let mut overrides = config.provider(backend).cloned().unwrap_or_default();
    if model.is_some() {
        overrides.model = model;
    }

    let gateway = factory.create_for(backend, Some(overrides))?;

    let mut messages = Vec::with_capacity(2);
    if let Some(system) = system {
        messages.push(Message::system(system));
    }
    messages.push(Message::user(prompt));

    tracing::info!(backend = %backend, "sending prompt");

    let response = tokio::select! {
        response = gateway.send_message(&messages) => response?,
        () = interrupted() => anyhow::bail!("interrupted"),
    };

    if let Some(usage) = response.usage {
        tracing::info!(
            input_tokens = usage.input_tokens,
            output_tokens = usage.output_tokens,
            "request complete"
        );
    }

    if !response.content.is_empty() {
        println!("{}", response.content);
    }
    for call in &response.tool_calls {
        println!("{}", serde_json::to_string(call)?);
    }

    Ok(())
}

fn list_backends(factory: &GatewayFactory) {
    for backend in factory.list_available_backends() {
        let status = if factory.is_available(backend.as_str()) {
            "available"
        } else {
            "unavailable"
        };
        println!("{backend}\t{status}\t(requires {})", backend.required_env().join(", "));
    }
}

/// Resolve on Ctrl+C; dropping the in-flight request aborts it
async fn interrupted() {
    if tokio::signal::ctrl_c().await.is_err() {
        std::future::pending::<()>().await;
    }
}
