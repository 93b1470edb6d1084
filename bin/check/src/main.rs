//! Runs one authorization check against Bitbucket and reports the outcome.
//!
//! Exit status is 0 when authorized, 1 when denied and 2 on error.

mod config;

use config::CheckConfig;
use portcullis_bitbucket::BitbucketProvider;
use portcullis_provider::Provider;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> ExitCode {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = match CheckConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "Failed to load configuration");
            return ExitCode::from(2);
        }
    };

    let session = config.session();
    let provider = BitbucketProvider::new(config.provider).with_options(config.bitbucket);
    tracing::info!(
        provider = provider.provider_name(),
        validate_url = provider.data().validate_url(),
        team = provider.team(),
        group = provider.group(),
        "Running authorization check"
    );

    match provider.get_email_address(&session).await {
        Ok(Some(email)) => {
            println!("authorized {email}");
            ExitCode::SUCCESS
        }
        Ok(None) => {
            println!("denied");
            ExitCode::from(1)
        }
        Err(report) => {
            tracing::error!(error = %report, "Authorization check failed");
            ExitCode::from(2)
        }
    }
}
