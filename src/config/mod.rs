//! Configuration layer: typed settings with layered precedence (file → env → CLI).

mod cli;

use std::{fmt, net::SocketAddr, str::FromStr, time::Duration};

use clap::{Parser, ValueEnum};
use config::{Config, Environment, File};
use serde::Deserialize;
use thiserror::Error;
use tracing::level_filters::LevelFilter;
use url::Url;

pub use cli::{
    CliArgs, Command, ContentMode, ContentOverrides, PostArgs, RelatedArgs, ServeArgs, Transport,
};

const DEFAULT_CONFIG_BASENAME: &str = "config/default";
const LOCAL_CONFIG_BASENAME: &str = "recompile";
const DEFAULT_ENVIRONMENT: &str = "master";
const DEFAULT_DELIVERY_URL: &str = "https://cdn.contentful.com";
const DEFAULT_TIMEOUT_SECS: u64 = 10;
const DEFAULT_HOST: &str = "127.0.0.1";
const DEFAULT_PORT: u16 = 3000;
pub const DEFAULT_PROXY_PATH: &str = "/api/contentful";
pub const HEALTH_PATH: &str = "/health";

/// Fully-resolved settings after precedence resolution and validation.
#[derive(Debug, Clone)]
pub struct Settings {
    pub content: ContentSettings,
    pub logging: LoggingSettings,
    pub server: ServerSettings,
}

#[derive(Clone)]
pub struct ContentSettings {
    pub mode: ContentMode,
    pub transport: Transport,
    pub space_id: Option<String>,
    pub access_token: Option<String>,
    pub environment: String,
    pub delivery_url: Url,
    pub proxy_url: Option<Url>,
    pub timeout: Duration,
}

impl fmt::Debug for ContentSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentSettings")
            .field("mode", &self.mode)
            .field("transport", &self.transport)
            .field("space_id", &self.space_id)
            .field("access_token", &self.access_token.as_ref().map(|_| "<redacted>"))
            .field("environment", &self.environment)
            .field("delivery_url", &self.delivery_url.as_str())
            .field("proxy_url", &self.proxy_url.as_ref().map(Url::as_str))
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct LoggingSettings {
    pub level: LevelFilter,
    pub format: LogFormat,
}

#[derive(Debug, Clone, Copy)]
pub enum LogFormat {
    Json,
    Compact,
}

#[derive(Debug, Clone)]
pub struct ServerSettings {
    pub addr: SocketAddr,
    pub proxy_path: String,
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to build configuration: {0}")]
    Build(#[from] config::ConfigError),
    #[error("invalid configuration for `{key}`: {reason}")]
    Invalid { key: &'static str, reason: String },
}

impl LoadError {
    fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::Invalid {
            key,
            reason: reason.into(),
        }
    }
}

/// Load settings using the configured precedence (file → environment → CLI).
pub fn load(cli: &CliArgs) -> Result<Settings, LoadError> {
    let mut builder = Config::builder()
        .add_source(File::with_name(DEFAULT_CONFIG_BASENAME).required(false))
        .add_source(File::with_name(LOCAL_CONFIG_BASENAME).required(false));

    if let Some(path) = cli.config_file.as_ref() {
        builder = builder.add_source(File::from(path.as_path()).required(true));
    }

    builder = builder.add_source(Environment::with_prefix("RECOMPILE").separator("__"));

    let mut raw: RawSettings = builder.build()?.try_deserialize()?;

    raw.apply_content_overrides(&cli.overrides);
    if let Command::Serve(args) = &cli.command {
        raw.apply_serve_overrides(args);
    }

    Settings::from_raw(raw)
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawSettings {
    content: RawContentSettings,
    logging: RawLoggingSettings,
    server: RawServerSettings,
}

impl RawSettings {
    fn apply_content_overrides(&mut self, overrides: &ContentOverrides) {
        if let Some(mode) = overrides.mode {
            self.content.mode = Some(mode.as_str().to_string());
        }
        if let Some(transport) = overrides.transport {
            self.content.transport = Some(transport.as_str().to_string());
        }
        if let Some(space_id) = overrides.space_id.as_ref() {
            self.content.space_id = Some(space_id.clone());
        }
        if let Some(token) = overrides.access_token.as_ref() {
            self.content.access_token = Some(token.clone());
        }
        if let Some(environment) = overrides.environment.as_ref() {
            self.content.environment = Some(environment.clone());
        }
        if let Some(url) = overrides.delivery_url.as_ref() {
            self.content.delivery_url = Some(url.clone());
        }
        if let Some(url) = overrides.proxy_url.as_ref() {
            self.content.proxy_url = Some(url.clone());
        }
        if let Some(seconds) = overrides.timeout_seconds {
            self.content.timeout_seconds = Some(seconds);
        }
        if let Some(level) = overrides.log_level.as_ref() {
            self.logging.level = Some(level.clone());
        }
        if let Some(json) = overrides.log_json {
            self.logging.json = Some(json);
        }
    }

    fn apply_serve_overrides(&mut self, overrides: &ServeArgs) {
        if let Some(host) = overrides.host.as_ref() {
            self.server.host = Some(host.clone());
        }
        if let Some(port) = overrides.port {
            self.server.port = Some(port);
        }
        if let Some(path) = overrides.path.as_ref() {
            self.server.proxy_path = Some(path.clone());
        }
    }
}

impl Settings {
    fn from_raw(raw: RawSettings) -> Result<Self, LoadError> {
        let RawSettings {
            content,
            logging,
            server,
        } = raw;

        let content = build_content_settings(content)?;
        let logging = build_logging_settings(logging)?;
        let server = build_server_settings(server)?;

        Ok(Self {
            content,
            logging,
            server,
        })
    }
}

fn build_content_settings(content: RawContentSettings) -> Result<ContentSettings, LoadError> {
    let mode = match content.mode {
        Some(value) => parse_choice::<ContentMode>(&value, "content.mode")?,
        None => ContentMode::Live,
    };
    let transport = match content.transport {
        Some(value) => parse_choice::<Transport>(&value, "content.transport")?,
        None => Transport::Direct,
    };

    let environment = non_blank(content.environment)
        .unwrap_or_else(|| DEFAULT_ENVIRONMENT.to_string());

    let delivery_url = parse_http_url(
        content
            .delivery_url
            .as_deref()
            .unwrap_or(DEFAULT_DELIVERY_URL),
        "content.delivery_url",
    )?;

    let proxy_url = non_blank(content.proxy_url)
        .map(|value| parse_http_url(&value, "content.proxy_url"))
        .transpose()?;
    if mode == ContentMode::Live && transport == Transport::Proxy && proxy_url.is_none() {
        return Err(LoadError::invalid(
            "content.proxy_url",
            "required when transport is `proxy`",
        ));
    }

    let timeout_secs = content.timeout_seconds.unwrap_or(DEFAULT_TIMEOUT_SECS);
    if timeout_secs == 0 {
        return Err(LoadError::invalid(
            "content.timeout_seconds",
            "must be greater than zero",
        ));
    }

    Ok(ContentSettings {
        mode,
        transport,
        space_id: non_blank(content.space_id),
        access_token: non_blank(content.access_token),
        environment,
        delivery_url,
        proxy_url,
        timeout: Duration::from_secs(timeout_secs),
    })
}

fn build_logging_settings(logging: RawLoggingSettings) -> Result<LoggingSettings, LoadError> {
    let level = match logging.level {
        Some(level) => LevelFilter::from_str(level.as_str()).map_err(|err| {
            LoadError::invalid("logging.level", format!("failed to parse: {err}"))
        })?,
        None => LevelFilter::INFO,
    };

    let format = if logging.json.unwrap_or(false) {
        LogFormat::Json
    } else {
        LogFormat::Compact
    };

    Ok(LoggingSettings { level, format })
}

fn build_server_settings(server: RawServerSettings) -> Result<ServerSettings, LoadError> {
    let host = server.host.unwrap_or_else(|| DEFAULT_HOST.to_string());

    let port = server.port.unwrap_or(DEFAULT_PORT);
    if port == 0 {
        return Err(LoadError::invalid(
            "server.port",
            "port must be greater than zero",
        ));
    }

    let addr = parse_socket_addr(&host, port)
        .map_err(|reason| LoadError::invalid("server.addr", reason))?;

    let proxy_path = server
        .proxy_path
        .unwrap_or_else(|| DEFAULT_PROXY_PATH.to_string());
    if !proxy_path.starts_with('/') || proxy_path.len() < 2 {
        return Err(LoadError::invalid(
            "server.proxy_path",
            "must start with `/` and name a path",
        ));
    }
    if proxy_path == HEALTH_PATH {
        return Err(LoadError::invalid(
            "server.proxy_path",
            format!("`{HEALTH_PATH}` is reserved"),
        ));
    }

    Ok(ServerSettings { addr, proxy_path })
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawContentSettings {
    mode: Option<String>,
    transport: Option<String>,
    space_id: Option<String>,
    access_token: Option<String>,
    environment: Option<String>,
    delivery_url: Option<String>,
    proxy_url: Option<String>,
    timeout_seconds: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawLoggingSettings {
    level: Option<String>,
    json: Option<bool>,
}

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
struct RawServerSettings {
    host: Option<String>,
    port: Option<u16>,
    proxy_path: Option<String>,
}

fn parse_choice<T: ValueEnum>(value: &str, key: &'static str) -> Result<T, LoadError> {
    T::from_str(value.trim(), true).map_err(|reason| LoadError::invalid(key, reason))
}

fn parse_http_url(value: &str, key: &'static str) -> Result<Url, LoadError> {
    let url = Url::parse(value.trim())
        .map_err(|err| LoadError::invalid(key, format!("invalid URL `{value}`: {err}")))?;
    match url.scheme() {
        "http" | "https" => Ok(url),
        other => Err(LoadError::invalid(
            key,
            format!("unsupported scheme `{other}`"),
        )),
    }
}

fn parse_socket_addr(host: &str, port: u16) -> Result<SocketAddr, String> {
    let candidate = format!("{host}:{port}");
    candidate
        .parse()
        .map_err(|err| format!("invalid address `{candidate}`: {err}"))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.and_then(|value| {
        let trimmed = value.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    })
}

/// Resolve configuration using the supplied CLI arguments, returning both for downstream use.
pub fn load_with_cli() -> Result<(CliArgs, Settings), LoadError> {
    let args = CliArgs::parse();
    let settings = load(&args)?;
    Ok((args, settings))
}
