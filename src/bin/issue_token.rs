use clap::Parser;
use userdel::application_port::TokenCodec;
use userdel::domain_model::Caller;
use userdel::logger::*;
use userdel::server::jwt_codec;
use userdel::settings::parse_settings;

/// Issue an access token signed with the configured key.
///
/// $ USERDEL__AUTH__SIGNING_KEY=... cargo run --bin issue_token -- --admin root
#[derive(Parser, Debug)]
struct Args {
    /// Settings file holding the [auth] section.
    #[arg(long)]
    settings: Option<String>,

    /// Mark the token holder as an administrator.
    #[arg(long)]
    admin: bool,

    /// Username carried in the token subject.
    username: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let _logger = Logger::new_stderr_bootstrap();

    let settings = parse_settings(args.settings.as_deref())?;
    let codec = jwt_codec(&settings.auth, cfg!(debug_assertions))?;

    let caller = Caller {
        username: args.username,
        is_admin: args.admin,
    };
    let (token, expires_at) = codec.issue_access_token(&caller).await?;
    info!(username = %caller.username, admin = caller.is_admin, %expires_at, "token issued");
    println!("{}", token.0);

    Ok(())
}
