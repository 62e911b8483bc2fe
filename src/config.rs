use std::net::SocketAddr;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(
    name = "pollweb",
    about = "Poll voting web front end",
    disable_help_subcommand = true
)]
pub struct Cli {
    #[command(flatten)]
    pub config: Config,
}

#[derive(clap::Args, Debug, Clone)]
pub struct Config {
    #[arg(
        long,
        env = "POLLWEB_BIND",
        value_name = "ADDR",
        default_value = "127.0.0.1:8080"
    )]
    pub bind: SocketAddr,

    #[arg(
        long = "backend-base-url",
        env = "POLLWEB_BACKEND_BASE_URL",
        value_name = "ORIGIN",
        default_value = "http://127.0.0.1:8081"
    )]
    pub backend_base_url: String,

    #[arg(
        long = "refresh-interval-secs",
        env = "POLLWEB_REFRESH_INTERVAL_SECS",
        value_name = "SECS",
        default_value_t = 5,
        value_parser = clap::value_parser!(u64).range(1..=300)
    )]
    pub refresh_interval_secs: u64,

    #[arg(
        long = "backend-timeout-secs",
        env = "POLLWEB_BACKEND_TIMEOUT_SECS",
        value_name = "SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..=60)
    )]
    pub backend_timeout_secs: u64,

    #[arg(
        long = "queue-capacity",
        env = "POLLWEB_QUEUE_CAPACITY",
        value_name = "N",
        default_value_t = 128,
        value_parser = clap::value_parser!(u64).range(1..=65536)
    )]
    pub queue_capacity: u64,

    #[arg(
        long,
        env = "POLLWEB_QUESTION",
        value_name = "TEXT",
        default_value = "Which do you prefer?"
    )]
    pub question: String,

    #[arg(
        long,
        env = "POLLWEB_CHOICES",
        value_name = "LIST",
        value_delimiter = ',',
        default_value = "cats,dogs"
    )]
    pub choices: Vec<String>,

    /// Image paths shown next to choices, matched by position. Shorter lists
    /// leave trailing choices without an image.
    #[arg(
        long,
        env = "POLLWEB_IMAGES",
        value_name = "LIST",
        value_delimiter = ','
    )]
    pub images: Vec<String>,
}
