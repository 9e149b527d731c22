//! wedding-rsvp - answer a wedding invitation from the terminal
//!
//! Runs the same RSVP flow as the invitation page against a live service:
//! resolve the guest from the link, check for a prior answer, then accept or
//! decline.

use std::process::ExitCode;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;
use wedding_rsvp::{GuestIdentity, RsvpClient, RsvpController, UiEvent, UiUpdate};

/// Command-line arguments for wedding-rsvp
#[derive(Parser, Debug)]
#[command(name = "wedding-rsvp")]
#[command(about = "Answer a wedding invitation from the terminal")]
#[command(version)]
struct Args {
    /// Invitation link, e.g. https://example.com/abc123?to=Ana+Cruz
    invitation_url: Url,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", env = "WEDDING_RSVP_TIMEOUT_SECS")]
    timeout_secs: u64,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand, Debug)]
enum Action {
    /// Show whether this invitation has been answered
    Status,
    /// Accept the invitation
    Accept {
        /// Number of guests attending (blank means 1)
        #[arg(long, default_value = "")]
        guests: String,
    },
    /// Decline the invitation
    Decline,
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "wedding_rsvp=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = Args::parse();

    let guest = GuestIdentity::from_url(&args.invitation_url);
    info!(
        guest_id = guest.guest_id.as_ref().map(|id| id.as_str()).unwrap_or("<none>"),
        display_name = %guest.display_name,
        "Resolved invitation"
    );

    let client = RsvpClient::with_timeout(
        args.invitation_url.clone(),
        Duration::from_secs(args.timeout_secs),
    )
    .context("Failed to create RSVP client")?;

    let mut controller = RsvpController::new(guest, client);
    print_updates(&controller.dispatch(UiEvent::PageLoaded).await);

    let events = match args.action {
        Action::Status => return Ok(ExitCode::SUCCESS),
        Action::Accept { guests } => vec![
            UiEvent::AcceptSelected,
            UiEvent::SubmitPressed {
                guest_count: guests,
            },
        ],
        Action::Decline => vec![UiEvent::DeclineSelected],
    };

    if controller.flow().is_answered() {
        println!("This invitation has already been answered.");
        return Ok(ExitCode::SUCCESS);
    }

    for event in events {
        print_updates(&controller.dispatch(event).await);
    }

    if controller.flow().is_answered() {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}

fn print_updates(updates: &[UiUpdate]) {
    for update in updates {
        match update {
            UiUpdate::Render(view) => print!("{}", view),
            UiUpdate::Notify(notice) => eprint!("{}", notice),
        }
    }
}
