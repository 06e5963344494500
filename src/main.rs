//! docdesk command-line entry point.
//!
//! Subcommands drive the controllers against a terminal view; `serve`
//! starts the browser front-end.

// Allow pedantic clippy warnings that don't add value for this codebase
#![allow(clippy::manual_let_else)]
#![allow(clippy::unused_async)]

use mimalloc::MiMalloc;

/// Global allocator for improved performance (M-MIMALLOC-APPS).
#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

use std::path::Path;
use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use tracing::{debug, error};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use docdesk::config::{AppConfig, Cli, Command};
use docdesk::model::FileUpload;
use docdesk::view::TerminalView;
use docdesk::{ChatWidget, DocumentManager, HttpGateway};

#[tokio::main]
async fn main() -> ExitCode {
    // Load .env (if present)
    let _ = dotenv();

    let cli = Cli::parse();

    // Initialize tracing (M-LOG-STRUCTURED). Logs go to stderr so command
    // output stays pipeable.
    let default_level = if cli.command == Command::Serve {
        "info"
    } else {
        "warn"
    };
    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    match run(cli).await {
        Ok(code) => code,
        Err(err) => {
            error!(name: "docdesk.failed", error = %err, "Command failed");
            eprintln!("Error: {err:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = AppConfig::from_cli(&cli)?;
    debug!(
        name: "config.loaded",
        backend = %config.backend.base_url,
        timeout_secs = config.backend.request_timeout_secs,
        "Configuration loaded"
    );

    let gateway = HttpGateway::from_config(&config.backend)?;
    let datetime_format = config.ui.datetime_format.as_str();

    // Controllers already reported failures through the view; the exit code
    // only reflects whether the operation went through.
    let ok = match cli.command {
        Command::List => {
            let mut admin = DocumentManager::new(gateway, TerminalView::new())
                .with_datetime_format(datetime_format);
            admin.refresh_list().await.is_ok()
        }
        Command::Open { name, no_browser } => {
            let view = TerminalView::new().no_browser(no_browser);
            let mut admin = DocumentManager::new(gateway, view);
            admin.open_document(&name)?;
            true
        }
        Command::Upload { file } => {
            let mut admin = DocumentManager::new(gateway, TerminalView::new())
                .with_datetime_format(datetime_format);
            let file = read_upload(file.as_deref()).await?;
            admin.upload_document(file).await.is_ok()
        }
        Command::Delete { name, yes } => {
            let mut admin = DocumentManager::new(gateway, TerminalView::new().assume_yes(yes))
                .with_datetime_format(datetime_format);
            admin.delete_document(&name).await.is_ok()
        }
        Command::Replace { name, file } => {
            let mut admin = DocumentManager::new(gateway, TerminalView::new())
                .with_datetime_format(datetime_format);
            let file = read_upload(file.as_deref()).await?;
            admin.begin_replace(&name);
            admin.confirm_replace(file).await.is_ok()
        }
        Command::Ask { query } => {
            let mut view = TerminalView::new();
            view.set_input(query.join(" "));
            let mut chat = ChatWidget::new(gateway, view);
            chat.send_message().await.is_ok()
        }
        Command::Chat => {
            chat_loop(ChatWidget::new(gateway, TerminalView::new())).await;
            true
        }
        Command::Serve => {
            docdesk::web::serve(&config).await?;
            true
        }
    };

    Ok(if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Read the chosen file, if any. A missing argument reaches the controller
/// as "no file chosen".
async fn read_upload(path: Option<&Path>) -> anyhow::Result<Option<FileUpload>> {
    match path {
        Some(path) => Ok(Some(FileUpload::from_path(path).await?)),
        None => Ok(None),
    }
}

/// Interactive chat until `/quit` or end of input.
async fn chat_loop(mut chat: ChatWidget<HttpGateway, TerminalView>) {
    println!("Ask about the documents. Type /quit to leave.");
    loop {
        let line = match dialoguer::Input::<String>::new()
            .with_prompt(">")
            .allow_empty(true)
            .interact_text()
        {
            Ok(line) => line,
            Err(err) => {
                debug!(name: "chat.input.closed", error = %err, "Input closed");
                break;
            }
        };
        if line.trim() == "/quit" {
            break;
        }
        chat.view_mut().set_input(line);
        // Failures are shown as notices; the session carries on.
        let _ = chat.send_message().await;
    }
}
