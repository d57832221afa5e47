use clap::{Parser, Subcommand};
use remit_rpc::RpcConfig;
use std::path::PathBuf;
use std::time::Duration;

mod commands;

/// remit payment command-line interface.
#[derive(Parser)]
#[command(name = "remit")]
#[command(about = "Preview and send payments through a remit API")]
#[command(version)]
struct Cli {
    /// API base URL.
    #[arg(long, env = "REMIT_API_URL", default_value = "http://localhost:8000")]
    api: String,

    /// HTTP request timeout in seconds.
    #[arg(long, default_value = "30")]
    timeout_secs: u64,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the confirmation breakdown of a payment intent.
    Preview {
        /// Payment intent JSON file.
        intent: PathBuf,

        /// Leave the recipient's fee to the recipient.
        #[arg(long)]
        no_pay_recipient_fee: bool,

        /// Look up the recipient's email in the identity directory.
        #[arg(long)]
        resolve: bool,
    },

    /// Confirm and submit a payment intent.
    Send {
        /// Payment intent JSON file.
        intent: PathBuf,

        /// Sending account ('G...'). Its secret seed is prompted for.
        #[arg(long)]
        account: String,

        /// Leave the recipient's fee to the recipient.
        #[arg(long)]
        no_pay_recipient_fee: bool,
    },

    /// Decode an account or balance id.
    DecodeId {
        /// 'G...' or 'B...' identifier.
        id: String,
    },
}

/// Application context shared across commands.
pub struct AppContext {
    rpc_config: RpcConfig,
}

impl AppContext {
    fn from_cli(cli: &Cli) -> Self {
        Self {
            rpc_config: RpcConfig {
                url: cli.api.clone(),
                timeout: Duration::from_secs(cli.timeout_secs),
                ..Default::default()
            },
        }
    }
}

#[tokio::main]
async fn main() {
    env_logger::init();
    let cli = Cli::parse();
    let ctx = AppContext::from_cli(&cli);

    let result = match cli.command {
        Commands::Preview {
            intent,
            no_pay_recipient_fee,
            resolve,
        } => commands::preview(&ctx, &intent, !no_pay_recipient_fee, resolve).await,
        Commands::Send {
            intent,
            account,
            no_pay_recipient_fee,
        } => commands::send(&ctx, &intent, &account, !no_pay_recipient_fee).await,
        Commands::DecodeId { id } => commands::decode_id(&id),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
