//! Poll loop demonstrating automatic access token refresh.
//!
//! Mirrors the demo UI panel: tries a session restore first, falls back to
//! a fresh login, then polls /me on an interval. When the access token
//! expires, the call wrapper refreshes it transparently; each refresh is
//! reported through the token cache's change listener.

use std::sync::Arc;
use std::time::Duration;

use clap::Args;

use authgate_client::{AuthClient, ChangeCause};

/// Arguments for the `watch` command.
#[derive(Debug, Args)]
pub struct WatchArgs {
    /// Username
    #[arg(short, long, default_value = "demo")]
    pub username: String,

    /// Password
    #[arg(short, long, default_value = "demo")]
    pub password: String,

    /// Seconds between /me polls
    #[arg(short, long, default_value_t = 3)]
    pub interval: u64,

    /// Number of polls before exiting (0 = run until interrupted)
    #[arg(short, long, default_value_t = 0)]
    pub count: u64,
}

/// Execute the watch loop.
pub async fn execute(args: &WatchArgs, server: &str) -> anyhow::Result<()> {
    let client = AuthClient::connect(server)?;

    client.cache().subscribe(Arc::new(|change| {
        let label = match change.cause {
            ChangeCause::Login => "login",
            ChangeCause::Refresh => "auto-refresh",
            ChangeCause::Clear => "cleared",
        };
        match change.expires_in_sec {
            Some(ttl) => println!("[token] {label}: new access token, valid {ttl}s"),
            None => println!("[token] {label}"),
        }
    }));

    match client.restore_session().await {
        Ok(_) => println!("Session restored from refresh cookie"),
        Err(e) => {
            println!("Session restore failed ({e}), logging in");
            client.login(&args.username, &args.password).await?;
        }
    }

    let mut polls = 0u64;
    loop {
        match client.me().await {
            Ok(me) => println!("/me -> {}", me["userId"]),
            Err(e) => {
                println!("/me failed: {e}");
                break;
            }
        }

        polls += 1;
        if args.count > 0 && polls >= args.count {
            break;
        }
        tokio::time::sleep(Duration::from_secs(args.interval)).await;
    }

    client.logout().await;
    println!("Logged out");
    Ok(())
}
