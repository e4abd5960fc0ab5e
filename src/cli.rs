use clap::{Parser, Subcommand};
use inquire::Text;
use tokio::sync::mpsc;
use tokio::time::{timeout, Duration};

use crate::config::AppConfig;
use crate::events::ChatEvent;
use crate::runtime;
use crate::service::scheduling::SchedulingCoordinator;

const REPLY_TIMEOUT: Duration = Duration::from_secs(20);
const DRAIN_TIMEOUT: Duration = Duration::from_millis(300);

#[derive(Parser)]
#[command(name = "vpabot", about = "Chat assistant that schedules calendar events")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive chat loop; type /quit to leave.
    Chat,
    /// Send one message and print the outcome.
    Send { text: String },
}

pub async fn run(config: AppConfig) {
    // Fine to panic here
    let cli = Cli::parse();
    let (coordinator, mut rx) = match runtime::build(&config) {
        Ok(built) => built,
        Err(err) => {
            eprintln!("Startup failed: {}", err);
            return;
        }
    };

    match cli.command {
        Commands::Chat => chat_loop(&coordinator, &mut rx).await,
        Commands::Send { text } => {
            let handle = coordinator.submit(&text).await;
            let _ = handle.await;
            drain_events(&mut rx).await;
        }
    }
    coordinator.shutdown();
}

async fn chat_loop(coordinator: &SchedulingCoordinator, rx: &mut mpsc::Receiver<ChatEvent>) {
    loop {
        let line = match Text::new("You:").prompt() {
            Ok(line) => line,
            Err(_) => break,
        };
        let line = line.trim().to_string();
        if line.is_empty() {
            println!("Please enter text!");
            continue;
        }
        if line == "/quit" {
            break;
        }

        let _ = coordinator.submit(&line).await;
        match timeout(REPLY_TIMEOUT, rx.recv()).await {
            Ok(Some(event)) => render(&event),
            Ok(None) => break,
            Err(_) => println!("(still waiting for a reply...)"),
        }
        // A scheduling turn emits a second event right behind the reply.
        drain_events(rx).await;
    }
}

async fn drain_events(rx: &mut mpsc::Receiver<ChatEvent>) {
    while let Ok(Some(event)) = timeout(DRAIN_TIMEOUT, rx.recv()).await {
        render(&event);
    }
}

fn render(event: &ChatEvent) {
    match event {
        ChatEvent::BotReply { text } => println!("Bot: {}", text),
        ChatEvent::ScheduleCreated {
            activity_label,
            start_display,
        } => println!("Jadwal {} berhasil dibuat untuk {}", activity_label, start_display),
        ChatEvent::Failure { message } => println!("{}", message),
    }
}
