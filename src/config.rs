use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use config::{Config, Environment, File};
use serde::Deserialize;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file path
    #[arg(short, long, global = true, env = "CONFIG_FILE")]
    pub config: Option<String>,

    /// Backend base URL
    #[arg(long, global = true, env = "BACKEND_URL")]
    pub base_url: Option<String>,

    /// Port for the browser front-end
    #[arg(long, global = true, env = "PORT")]
    pub port: Option<u16>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List stored documents
    List,
    /// Open a document in the system browser
    Open {
        /// Document name
        name: String,
        /// Print the document URL instead of launching a browser
        #[arg(long)]
        no_browser: bool,
    },
    /// Upload a new PDF
    Upload {
        /// File to upload
        file: Option<PathBuf>,
    },
    /// Delete a document
    Delete {
        /// Document name
        name: String,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Replace a stored document with a new file
    Replace {
        /// Document to replace
        name: String,
        /// Replacement file
        file: Option<PathBuf>,
    },
    /// Ask a single question
    Ask {
        /// Question text
        #[arg(required = true, num_args = 1..)]
        query: Vec<String>,
    },
    /// Interactive chat session
    Chat,
    /// Serve the admin and chat pages over HTTP
    Serve,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub backend: BackendConfig,
    pub ui: UiConfig,
    pub web: WebConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendConfig {
    pub base_url: String,
    /// Zero disables the timeout.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct UiConfig {
    /// `chrono` format string for document modification times.
    pub datetime_format: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    pub port: u16,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            datetime_format: DEFAULT_DATETIME_FORMAT.to_string(),
        }
    }
}

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_DATETIME_FORMAT: &str = "%d/%m/%Y, %H:%M:%S";

impl AppConfig {
    pub fn load_from_args<I, T>(args: I) -> Result<Self, config::ConfigError>
    where
        I: IntoIterator<Item = T>,
        T: Into<std::ffi::OsString> + Clone,
    {
        let cli =
            Cli::try_parse_from(args).map_err(|e| config::ConfigError::Message(e.to_string()))?;
        Self::from_cli(&cli)
    }

    /// Priority: CLI flag > CLI env var > `DOCDESK_` env > config file > defaults.
    pub fn from_cli(cli: &Cli) -> Result<Self, config::ConfigError> {
        let mut builder = Config::builder()
            .set_default("backend.base_url", DEFAULT_BASE_URL)?
            .set_default("backend.request_timeout_secs", 120)?
            .set_default("ui.datetime_format", DEFAULT_DATETIME_FORMAT)?
            .set_default("web.host", "127.0.0.1")?
            .set_default("web.port", 3000)?;

        // An explicit file must exist; ./config.{yaml,toml,json} is optional.
        builder = match &cli.config {
            Some(path) => builder.add_source(File::from(Path::new(path))),
            None => builder.add_source(File::with_name("config").required(false)),
        };

        // E.g. DOCDESK_BACKEND__BASE_URL=http://rag.internal:5000
        builder = builder.add_source(
            Environment::with_prefix("DOCDESK")
                .prefix_separator("_")
                .separator("__")
                .try_parsing(true),
        );

        // clap already folded BACKEND_URL / PORT into these.
        if let Some(url) = &cli.base_url {
            builder = builder.set_override("backend.base_url", url.as_str())?;
        }
        if let Some(port) = cli.port {
            builder = builder.set_override("web.port", i64::from(port))?;
        }

        let cfg = builder.build()?;
        cfg.try_deserialize()
    }
}
