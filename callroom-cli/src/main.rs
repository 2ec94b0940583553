use anyhow::{Context, Result};
use callroom_client::{
    ApiConfig, CallHandle, CallRoom, ChannelConfig, ClientConfig, RestSignalingApi,
    SignalingChannel, TransportConfig, WebRtcTransport,
};
use callroom_core::RoomStatus;
use clap::Parser;
use colored::*;
use dialoguer::Select;
use dialoguer::theme::ColorfulTheme;
use std::sync::Arc;
use tokio::sync::{broadcast, watch};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "callroom")]
#[command(about = "Two-party call room over a signaling relay")]
struct Cli {
    /// Base URL of the signaling REST backend.
    #[arg(long, env = "CALLROOM_SERVER", default_value = "http://localhost:8088")]
    server: String,

    /// Websocket URL the relay broadcasts on.
    #[arg(long, env = "CALLROOM_WS", default_value = "ws://localhost:8088/")]
    ws: String,

    #[arg(short, long, env = "CALLROOM_ROOM")]
    room: String,

    #[arg(short, long, env = "CALLROOM_USERNAME")]
    username: String,

    /// STUN/TURN urls; repeat or separate with commas.
    #[arg(long = "stun", env = "CALLROOM_STUN", value_delimiter = ',')]
    stun: Vec<String>,

    /// Stay in `initializationFailed`/`sdpReset` until asked to re-arm.
    #[arg(long, env = "CALLROOM_NO_REARM")]
    no_rearm: bool,
}

impl Cli {
    fn into_config(self) -> ClientConfig {
        let transport = if self.stun.is_empty() {
            TransportConfig::default()
        } else {
            TransportConfig {
                ice_servers: self.stun,
            }
        };

        ClientConfig {
            room: self.room,
            username: self.username,
            api: ApiConfig::new(self.server),
            channel: ChannelConfig {
                url: self.ws,
                ..Default::default()
            },
            transport,
            auto_rearm: !self.no_rearm,
        }
    }
}

#[derive(Clone, Copy)]
enum Action {
    Call,
    Accept,
    Reject,
    HangUp,
    Rearm,
    Status,
    Quit,
}

const ACTIONS: [(Action, &str); 7] = [
    (Action::Call, "Start call"),
    (Action::Accept, "Accept incoming call"),
    (Action::Reject, "Reject incoming call"),
    (Action::HangUp, "Hang up"),
    (Action::Rearm, "Back to standby"),
    (Action::Status, "Show status"),
    (Action::Quit, "Quit"),
];

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("callroom_client=info,callroom_core=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Cli::parse().into_config();

    println!(
        "{} {} as {}",
        "📞 Joining room".green().bold(),
        config.room.bold(),
        config.username.bold()
    );

    let (transport, transport_events) = WebRtcTransport::new(config.transport.clone());
    let api = RestSignalingApi::new(config.api.clone()).context("Failed to build HTTP client")?;
    let channel = SignalingChannel::new(config.channel.clone());
    let connectivity = channel.connectivity();

    let (room, handle) = CallRoom::new(
        config,
        Box::new(transport),
        transport_events,
        Arc::new(api),
    );
    let room_task = tokio::spawn(room.run());
    let channel_task = channel.spawn(handle.clone());

    tokio::spawn(print_statuses(handle.subscribe()));
    tokio::spawn(print_connectivity(connectivity));

    loop {
        let action = tokio::task::spawn_blocking(choose_action)
            .await
            .context("Menu task panicked")??;

        match action {
            Action::Call => handle.start_call().await?,
            Action::Accept => handle.accept_call().await?,
            Action::Reject => handle.reject_call().await?,
            Action::HangUp => handle.end_call().await?,
            Action::Rearm => handle.enter_view().await?,
            Action::Status => print_snapshot(&handle),
            Action::Quit => break,
        }
    }

    println!("{}", "👋 Leaving room...".cyan());
    handle.shutdown().await?;
    room_task.await.context("Call room task panicked")?;
    channel_task.abort();

    Ok(())
}

fn choose_action() -> Result<Action> {
    let labels: Vec<&str> = ACTIONS.iter().map(|(_, label)| *label).collect();
    let index = Select::with_theme(&ColorfulTheme::default())
        .with_prompt("Call room")
        .items(&labels)
        .default(0)
        .interact()
        .context("Failed to read menu choice")?;
    Ok(ACTIONS[index].0)
}

fn paint(status: RoomStatus) -> ColoredString {
    let text = status.as_str();
    match status {
        RoomStatus::OngoingConnected => text.green().bold(),
        RoomStatus::IncomingCall => text.yellow().bold(),
        RoomStatus::InitializationFailed | RoomStatus::ReceiveRejected => text.red().bold(),
        RoomStatus::OngoingDisconnected => text.red(),
        RoomStatus::Standby | RoomStatus::SdpReset => text.dimmed(),
        _ => text.cyan(),
    }
}

fn print_snapshot(handle: &CallHandle) {
    let snapshot = handle.snapshot();
    println!("   status:       {}", paint(snapshot.status));
    println!("   call:         {}", snapshot.generation);
    println!(
        "   participants: {} {:?}",
        snapshot.participant_count, snapshot.participants
    );
    if let Some(notification) = snapshot.last_notification {
        println!("   last notice:  {:?}", notification);
    }
    if let Some(failure) = snapshot.last_failure {
        println!("   last failure: {}", failure.to_string().red());
    }
}

async fn print_statuses(mut statuses: broadcast::Receiver<RoomStatus>) {
    loop {
        match statuses.recv().await {
            Ok(status) => println!("{} {}", "•".dimmed(), paint(status)),
            Err(broadcast::error::RecvError::Lagged(_)) => continue,
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}

async fn print_connectivity(mut connected: watch::Receiver<bool>) {
    while connected.changed().await.is_ok() {
        if *connected.borrow_and_update() {
            println!("{}", "🔌 Relay connected".green());
        } else {
            println!("{}", "🔌 Relay disconnected".red());
        }
    }
}
