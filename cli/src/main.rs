use clap::{Parser, Subcommand};
use mojimaze_core::progress::ProgressRecord;
use mojimaze_core::reconcile::{apply_choice, reconcile, ConflictChoice, ReconcileAction, RemoteSnapshot};
use mojimaze_core::{phrase_id_for_level, select_phrase, word_count_for_level};

mod bot;

#[derive(Parser)]
#[command(name = "mojimaze-cli", version, about = "Headless playtest and inspection tools for mojimaze")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the deterministic phrase selection for a range of levels.
    Preview {
        #[arg(long, default_value_t = 1)]
        from_level: u32,
        #[arg(long, default_value_t = 20)]
        count: u32,
    },
    /// Solve consecutive levels through the real state machine.
    Playtest(bot::PlaytestArgs),
    /// Run the local/remote reconciler on explicit values.
    SyncDemo {
        #[arg(long)]
        local_level: u32,
        #[arg(long)]
        local_score: u32,
        #[arg(long)]
        remote_level: Option<u32>,
        #[arg(long)]
        remote_score: Option<u32>,
        /// Resolve a conflict: "remote" or "local".
        #[arg(long)]
        keep: Option<String>,
    },
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Preview { from_level, count } => {
            for level in from_level..from_level.saturating_add(count) {
                let phrase = select_phrase(level);
                println!(
                    "level {:>6}  {}w  {:<14} {:<32} {}",
                    level,
                    word_count_for_level(level),
                    phrase.category,
                    phrase.text,
                    phrase_id_for_level(level),
                );
            }
            Ok(())
        }
        Commands::Playtest(args) => bot::run(args),
        Commands::SyncDemo {
            local_level,
            local_score,
            remote_level,
            remote_score,
            keep,
        } => {
            let mut local = ProgressRecord {
                level: local_level,
                score: local_score,
                ..ProgressRecord::default()
            };
            let remote = match (remote_level, remote_score) {
                (Some(level), Some(score)) => Some(RemoteSnapshot {
                    level,
                    score,
                    email: None,
                    updated_at_ms: 0,
                }),
                _ => None,
            };
            match reconcile(&local, remote.as_ref()) {
                ReconcileAction::PushLocal => {
                    println!("push-local: level={} score={}", local.level, local.score);
                }
                ReconcileAction::NoOp => println!("no-op: already in sync"),
                ReconcileAction::Conflict { remote } => {
                    println!(
                        "conflict: local level={} score={} / remote level={} score={}",
                        local.level, local.score, remote.level, remote.score
                    );
                    let choice = match keep.as_deref() {
                        Some("remote") => Some(ConflictChoice::KeepRemote),
                        Some("local") => Some(ConflictChoice::KeepLocal),
                        Some(other) => {
                            eprintln!("unknown --keep value: {other} (use remote|local)");
                            None
                        }
                        None => None,
                    };
                    if let Some(choice) = choice {
                        let push = apply_choice(choice, &mut local, &remote);
                        println!(
                            "resolved: level={} score={} push_to_remote={}",
                            local.level, local.score, push
                        );
                    }
                }
            }
            Ok(())
        }
    }
}
