// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::env;
use std::process::ExitCode;

use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use the_brickyard::bricks::BrickFactory;
use the_brickyard::config::{load_pipe_config, PipeBuilder};
use the_brickyard::content::Content;
use the_brickyard::pipe::Pipe;

fn usage(program: &str) {
    eprintln!("Usage: {} <pipe.yaml|pipe.json> [input_text]", program);
    eprintln!("       {} --library", program);
    eprintln!("Example: {} configs/caesar-base64.yaml \"hello world\"", program);
}

#[tokio::main]
async fn main() -> ExitCode {
    // Diagnostics go to stderr so stdout stays machine readable
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("the-brickyard");

    let result = match args.get(1).map(String::as_str) {
        Some("--library") => print_library(),
        Some("--help") | Some("-h") | None => {
            usage(program);
            return ExitCode::FAILURE;
        }
        Some(path) => run_pipe(path, args.get(2).map(String::as_str)).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("❌ {:#}", err);
            ExitCode::FAILURE
        }
    }
}

fn print_library() -> Result<()> {
    let factory = BrickFactory::instance()?;
    let library = serde_json::to_string_pretty(&factory.get_library())?;
    println!("{}", library);
    Ok(())
}

async fn run_pipe(path: &str, input: Option<&str>) -> Result<()> {
    let factory = BrickFactory::instance()?;
    let config = load_pipe_config(path)?;
    let mut pipe = PipeBuilder::from_config(&config, &factory)
        .await
        .with_context(|| format!("Failed to build pipe from '{}'", path))?;

    if let Some(input) = input {
        let report = pipe.set_input(Content::from_string(input)).await;
        pipe.render_all(&report).await;
    }

    print_pipe(&pipe);
    Ok(())
}

fn print_pipe(pipe: &Pipe) {
    println!("🧱 Pipe with {} bricks", pipe.len());
    println!("═══════════════════════════════════");
    for (index, brick) in pipe.bricks().iter().enumerate() {
        let title = brick.meta().title;
        if let Some(error) = brick.error() {
            println!("[{}] {} ❌ {}", index, title, error);
        } else if brick.is_viewer() {
            println!("[{}] {}: {}", index, title, brick.view().unwrap_or(""));
        } else if brick.is_reversed() {
            println!("[{}] {} (reversed)", index, title);
        } else {
            println!("[{}] {}", index, title);
        }
    }
}
