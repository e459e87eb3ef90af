//! rosapi CLI Client
//!
//! Command-line interface for running API commands against a router.

use std::process::ExitCode;
use std::time::Duration;

use clap::{Parser, Subcommand};
use rosapi::{Config, Connection, ParsedResponse, Record, DEFAULT_PORT};
use tracing_subscriber::{fmt, EnvFilter};

/// rosapi CLI
#[derive(Parser, Debug)]
#[command(name = "rosapi-cli")]
#[command(about = "Run RouterOS API commands")]
#[command(version)]
struct Args {
    /// Router address
    #[arg(short = 'H', long, default_value = "192.168.88.1")]
    host: String,

    /// API service port (8729 is the usual API-SSL port)
    #[arg(short, long, default_value_t = DEFAULT_PORT)]
    port: u16,

    /// Login name
    #[arg(short, long, default_value = "admin")]
    user: String,

    /// Login password
    #[arg(short = 'P', long, default_value = "")]
    password: String,

    /// Connect over TLS (certificate is not verified)
    #[arg(long)]
    tls: bool,

    /// Connect and socket timeout in seconds
    #[arg(short, long, default_value = "3")]
    timeout: u64,

    /// Connect attempts before giving up
    #[arg(short, long, default_value = "3")]
    attempts: u32,

    /// Seconds to wait between connect attempts
    #[arg(short, long, default_value = "2")]
    delay: u64,

    /// Log every word sent and received
    #[arg(long)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a free-form command line, e.g. "/interface/print ?type=ether"
    Exec {
        /// The command line
        line: String,
    },

    /// Run a command with key=value parameters
    Comm {
        /// Command path, e.g. /ip/address/add
        command: String,

        /// Parameters as key=value (keys may start with ? or ~)
        params: Vec<String>,
    },

    /// Send words verbatim as one sentence and print the raw reply
    Raw {
        /// Words to send
        #[arg(required = true)]
        words: Vec<String>,
    },
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_filter = if args.debug { "info,rosapi=debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();

    let config = Config::builder()
        .port(args.port)
        .tls(args.tls)
        .timeout(Duration::from_secs(args.timeout))
        .attempts(args.attempts)
        .delay(Duration::from_secs(args.delay))
        .debug(args.debug)
        .build();

    let mut conn = Connection::new(config);
    if let Err(e) = conn.connect(&args.host, &args.user, &args.password) {
        tracing::error!("{}", e);
        if let Some(reason) = conn.last_error() {
            tracing::error!("Last failure: {}", reason);
        }
        return ExitCode::FAILURE;
    }

    let result = match args.command {
        Commands::Exec { line } => conn.execmd(&line).map(|reply| print_response(&reply)),
        Commands::Comm { command, params } => {
            let pairs: Vec<(String, String)> = params
                .iter()
                .map(|p| match p.split_once('=') {
                    Some((k, v)) => (k.to_string(), v.to_string()),
                    None => (p.clone(), String::new()),
                })
                .collect();
            conn.comm(&command, pairs).map(|reply| print_response(&reply))
        }
        Commands::Raw { words } => conn.write_sentence(&words).and_then(|_| {
            for word in conn.read_words()? {
                println!("{}", word);
            }
            Ok(true)
        }),
    };

    conn.disconnect();

    match result {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            tracing::error!("Command failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

/// Print every record; returns false when the router reported an error
fn print_response(reply: &ParsedResponse) -> bool {
    for record in &reply.replies {
        print_record("re", record);
    }
    for record in &reply.traps {
        print_record("trap", record);
    }
    for record in &reply.fatals {
        print_record("fatal", record);
    }
    !reply.has_errors()
}

fn print_record(tag: &str, record: &Record) {
    println!("!{}", tag);
    for (key, value) in record.iter() {
        println!("  {}={}", key, value);
    }
}
