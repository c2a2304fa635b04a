//! One-shot login/me/logout flow.

use clap::Args;

use authgate_client::AuthClient;

/// Arguments for the `once` command.
#[derive(Debug, Args)]
pub struct OnceArgs {
    /// Username
    #[arg(short, long, default_value = "demo")]
    pub username: String,

    /// Password
    #[arg(short, long, default_value = "demo")]
    pub password: String,
}

/// Execute the one-shot flow.
pub async fn execute(args: &OnceArgs, server: &str) -> anyhow::Result<()> {
    let client = AuthClient::connect(server)?;

    let issued = client.login(&args.username, &args.password).await?;
    println!(
        "Logged in, access token valid for {}s",
        issued.expires_in_sec
    );

    let me = client.me().await?;
    println!("Authenticated as {}", me["userId"]);

    client.logout().await;
    println!("Logged out");

    Ok(())
}
