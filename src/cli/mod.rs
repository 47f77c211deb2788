use anyhow::Result;
use clap::{Args, Parser, Subcommand};

pub mod serve;

pub const DEFAULT_HOST: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 5000;

/// Where the server listens
#[derive(Args, Debug, PartialEq)]
pub struct ServeArgs {
    /// Set the server host address
    #[arg(long, default_value = DEFAULT_HOST)]
    host: String,

    /// Set the server port
    #[arg(long, env = "PORT", default_value_t = DEFAULT_PORT)]
    port: u16,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// Run the chat relay server
    Serve(ServeArgs),
}

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Command>,

    // Serving is the only thing this binary does so the serve
    // options are accepted without the subcommand too
    #[command(flatten)]
    serve: ServeArgs,
}

pub async fn run() -> Result<()> {
    // Pick up OPENAI_API_KEY and friends from a local .env file
    dotenv::dotenv().ok();

    let args = Cli::parse();

    let ServeArgs { host, port } = match args.command {
        Some(Command::Serve(serve_args)) => serve_args,
        None => args.serve,
    };
    serve::run(host, port).await?;

    Ok(())
}
