// CareBot CLI Entry Point
// Reads messages from stdin and answers with the routed reply.

use anyhow::Context;
use clap::Parser;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{error, info};

use carebot_core::chat::{markdown, Command, Session};
use carebot_core::config::{AppConfig, LogFormat};
use carebot_core::survey::SurveySummary;
use carebot_core::{bootstrap, logging, DefaultRouter};

const PROMPT: &str = "How are you feeling today? ";
const HELP: &str = "Commands: /history, /timeline, /survey <file.csv>, /help, /quit";

#[derive(Debug, Parser)]
#[command(name = "carebot", version, about = "Personalized mental health assistant")]
struct Args {
    /// Seed for reply selection
    #[arg(long)]
    seed: Option<u64>,

    /// Minimum intent confidence (0.0 - 1.0)
    #[arg(long)]
    threshold: Option<f64>,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    /// Summarise a survey CSV and exit
    #[arg(long, value_name = "CSV")]
    survey: Option<PathBuf>,
}

fn load_config(args: &Args) -> anyhow::Result<AppConfig> {
    let mut config = AppConfig::from_env().context("Invalid environment configuration")?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(threshold) = args.threshold {
        config.confidence_threshold = threshold;
    }
    if args.json_logs {
        config.log_format = LogFormat::Json;
    }
    config.check().context("Invalid configuration")?;
    Ok(config)
}

fn print_survey(path: &Path) -> anyhow::Result<()> {
    let summary = SurveySummary::from_path(path)
        .with_context(|| format!("Failed to read survey {}", path.display()))?;
    println!("{}", summary.to_markdown());
    Ok(())
}

/// Returns `false` when the session should end
fn handle_command(command: Command, session: &Session) -> bool {
    match command {
        Command::Quit => return false,
        Command::History => println!("{}", markdown::render_history(session)),
        Command::Timeline => println!("{}", markdown::render_timeline(session)),
        Command::Survey(Some(path)) => {
            if let Err(e) = print_survey(&path) {
                error!("{:#}", e);
                println!("Could not read that survey file.");
            }
        }
        Command::Survey(None) | Command::Help => println!("{}", HELP),
    }
    true
}

fn chat_loop(router: &mut DefaultRouter) -> anyhow::Result<()> {
    let mut session = Session::new();
    info!("Session {} started", session.id);

    println!("\u{1f9e0} Personalized Mental Health Assistant");
    println!("{}\n", HELP);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut lines = stdin.lock().lines();

    loop {
        print!("{}", PROMPT);
        stdout.flush()?;

        let Some(line) = lines.next() else { break };
        let line = line?;
        let text = line.trim();
        if text.is_empty() {
            continue;
        }

        if let Some(command) = Command::parse(text) {
            if !handle_command(command, &session) {
                break;
            }
            continue;
        }

        let reply = router.respond(&mut session, text);
        println!("{}", markdown::render_reply(&reply));
    }

    info!("Session {} ended after {} messages", session.id, session.len());
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    let args = Args::parse();
    let config = load_config(&args)?;
    logging::init(config.log_format);

    if let Some(path) = &args.survey {
        return print_survey(path);
    }

    let mut router = bootstrap(&config).context("Failed to start assistant")?;
    chat_loop(&mut router)
}
