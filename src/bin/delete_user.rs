use clap::Parser;
use std::process::ExitCode;
use userdel::client::DeleteUserClient;
use userdel::logger::*;
use userdel::ui::DEFAULT_BASE_URL;

/// Delete a user account through the HTTP API.
///
/// $ cargo run --bin delete_user -- --token fake-access-token:alice bob
#[derive(Parser, Debug)]
struct Args {
    /// Origin of the userdel server.
    #[arg(long, default_value = DEFAULT_BASE_URL)]
    base_url: String,

    /// Bearer token sent in the Authorization header.
    #[arg(long, env = "USERDEL_TOKEN")]
    token: Option<String>,

    /// Username of the account to delete.
    username: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();

    let _logger = Logger::new_stderr_bootstrap();

    let client = DeleteUserClient::new(args.base_url, args.token);
    let alert = client.submit(&args.username).await;
    println!("{}", alert);

    if alert.is_acknowledged() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
