use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum, builder::BoolishValueParser};

/// Command-line arguments for the recompile binary.
#[derive(Debug, Parser)]
#[command(
    name = "recompile",
    version,
    about = "Please Recompile content layer: fetch resolved CMS content or serve the content proxy"
)]
pub struct CliArgs {
    /// Optional path to a configuration file.
    #[arg(
        long = "config-file",
        env = "RECOMPILE_CONFIG_FILE",
        value_name = "PATH",
        global = true
    )]
    pub config_file: Option<PathBuf>,

    #[command(flatten)]
    pub overrides: ContentOverrides,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Print the home page hero.
    Hero,
    /// Print every post, newest first.
    Posts,
    /// Print one post by slug, with its related posts.
    Post(PostArgs),
    /// Print posts sharing a tag with the given tag slugs.
    Related(RelatedArgs),
    /// Print the site settings record.
    Settings,
    /// Print the footer.
    Footer,
    /// Print the resume page.
    Resume,
    /// Print the contact page.
    Contact,
    /// Print the full home view: hero, posts, month timeline, and page chrome.
    Home,
    /// Run the same-origin content proxy.
    Serve(ServeArgs),
}

#[derive(Debug, Args, Clone)]
pub struct PostArgs {
    /// Slug of the post to open.
    pub slug: String,

    /// Maximum number of related posts to include.
    #[arg(long, default_value_t = 3)]
    pub related: usize,
}

#[derive(Debug, Args, Clone)]
pub struct RelatedArgs {
    /// Slug of the current post, never part of the result.
    pub slug: String,

    /// Tag slug to match; repeat for several tags.
    #[arg(long = "tag", value_name = "SLUG", required = true)]
    pub tags: Vec<String>,

    /// Maximum number of related posts.
    #[arg(long, default_value_t = 3)]
    pub limit: usize,
}

#[derive(Debug, Args, Default, Clone)]
pub struct ServeArgs {
    /// Override the listener host.
    #[arg(long = "host", value_name = "HOST")]
    pub host: Option<String>,

    /// Override the listener port.
    #[arg(long = "port", value_name = "PORT")]
    pub port: Option<u16>,

    /// Override the path the proxy answers on.
    #[arg(long = "path", value_name = "PATH")]
    pub path: Option<String>,
}

/// Content and logging overrides accepted before or after any subcommand.
#[derive(Debug, Args, Default, Clone)]
pub struct ContentOverrides {
    /// Content mode: `live` asks the CMS, `mock` serves built-in content only.
    #[arg(long = "mode", value_enum, global = true)]
    pub mode: Option<ContentMode>,

    /// How live content is fetched.
    #[arg(long = "transport", value_enum, global = true)]
    pub transport: Option<Transport>,

    /// Contentful space identifier.
    #[arg(
        long = "space-id",
        env = "CONTENTFUL_SPACE_ID",
        value_name = "ID",
        global = true
    )]
    pub space_id: Option<String>,

    /// Contentful delivery access token.
    #[arg(
        long = "access-token",
        env = "CONTENTFUL_ACCESS_TOKEN",
        value_name = "TOKEN",
        hide_env_values = true,
        global = true
    )]
    pub access_token: Option<String>,

    /// Contentful environment.
    #[arg(
        long = "environment",
        env = "CONTENTFUL_ENVIRONMENT",
        value_name = "NAME",
        global = true
    )]
    pub environment: Option<String>,

    /// Override the Delivery API base URL.
    #[arg(long = "delivery-url", value_name = "URL", global = true)]
    pub delivery_url: Option<String>,

    /// Absolute URL of the content proxy endpoint (transport = proxy).
    #[arg(long = "proxy-url", value_name = "URL", global = true)]
    pub proxy_url: Option<String>,

    /// Override the outbound request timeout.
    #[arg(long = "timeout-seconds", value_name = "SECONDS", global = true)]
    pub timeout_seconds: Option<u64>,

    /// Override the base log level (trace|debug|info|warn|error).
    #[arg(long = "log-level", value_name = "LEVEL", global = true)]
    pub log_level: Option<String>,

    /// Toggle JSON logging.
    #[arg(
        long = "log-json",
        value_name = "BOOL",
        value_parser = BoolishValueParser::new(),
        global = true
    )]
    pub log_json: Option<bool>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ContentMode {
    Live,
    Mock,
}

impl ContentMode {
    pub fn as_str(self) -> &'static str {
        match self {
            ContentMode::Live => "live",
            ContentMode::Mock => "mock",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Transport {
    Direct,
    Proxy,
}

impl Transport {
    pub fn as_str(self) -> &'static str {
        match self {
            Transport::Direct => "direct",
            Transport::Proxy => "proxy",
        }
    }
}
