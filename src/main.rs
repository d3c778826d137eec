//! Sideline tracker console: records plays against the tracker endpoints from a terminal.

use std::{fs, io::Write, path::Path, sync::Arc};

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::watch;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sideline_tracker::{
    commands::{Command, HELP},
    config::AppConfig,
    dao::tracker_service::http::HttpTrackerService,
    dto::seed::SeedData,
    error::TrackerError,
    services::{
        notifications::{Notification, NotificationKind},
        score_service::{ScoreOverride, override_quarter, override_score, prompt_label},
        submission_service::{SubmitOutcome, submit},
        tracker_service::{
            cancel, choose_penalty, open_form, open_special_teams, quick_yards, refresh_feed,
            set_value, toggle,
        },
        undo_service::{UndoOutcome, undo_last},
    },
    state::{
        SharedTracker, TrackerState,
        form::{FieldSpec, FieldValue, FormSpec},
        roster::Player,
        state_machine::TrackerPhase,
    },
};

type Input = Lines<BufReader<Stdin>>;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load();
    let seed = load_seed(config.seed_path())?;
    let game_id = seed.game_id;

    let service_config = config
        .service_config()
        .context("resolving tracker endpoint")?;
    let service =
        HttpTrackerService::connect(service_config, game_id).context("building HTTP client")?;
    let tracker = TrackerState::new(seed, Arc::new(service), config.tracker_settings())
        .context("initializing tracker")?;
    info!(game_id, team = %tracker.team().team_abbr, "tracker ready");

    tokio::spawn(render_notifications(tracker.notifier().subscribe()));

    if tracker.feed().read().await.is_empty() {
        // Failure is already logged; the feed fills as plays are recorded.
        let _ = refresh_feed(&tracker).await;
    }

    render_status(&tracker).await;
    run_console(&tracker).await
}

/// Read and parse the seed the hosting page would have embedded.
fn load_seed(path: &Path) -> anyhow::Result<SeedData> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("reading seed file {}", path.display()))?;
    serde_json::from_str(&contents).with_context(|| format!("parsing seed file {}", path.display()))
}

async fn run_console(tracker: &SharedTracker) -> anyhow::Result<()> {
    let mut input = BufReader::new(tokio::io::stdin()).lines();
    println!("type `help` for commands");

    while let Some(line) = input.next_line().await.context("reading stdin")? {
        if line.trim().is_empty() {
            continue;
        }
        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(err) => {
                println!("{err}");
                continue;
            }
        };
        if command == Command::Quit {
            break;
        }
        if let Err(err) = execute(tracker, command, &mut input).await {
            println!("error: {err}");
        }
    }

    info!("console closed");
    Ok(())
}

async fn execute(
    tracker: &SharedTracker,
    command: Command,
    input: &mut Input,
) -> Result<(), TrackerError> {
    match command {
        Command::Open(play_type) => {
            let spec = open_form(tracker, play_type).await?;
            render_form(&spec);
        }
        Command::SpecialTeams => {
            open_special_teams(tracker).await?;
            println!("special teams: kickoff | punt | fg | xp | cancel");
        }
        Command::Cancel => {
            cancel(tracker).await?;
            println!("select a play type");
        }
        Command::Toggle(field) => {
            let active = toggle(tracker, &field).await?;
            println!("{field}: {}", if active { "on" } else { "off" });
        }
        Command::Set { field, value } => set_value(tracker, &field, &value).await?,
        Command::QuickYards(yards) => {
            let field = quick_yards(tracker, yards).await?;
            println!("{field} = {yards}");
        }
        Command::Penalty(index) => {
            let selection = choose_penalty(tracker, index).await?;
            println!("{} ({} yds)", selection.name, selection.yards);
        }
        Command::Submit => {
            let Some(play_type) = tracker.phase().await.open_form() else {
                return Err(TrackerError::NoOpenForm);
            };
            match submit(tracker, play_type).await? {
                SubmitOutcome::Recorded {
                    chain: Some(next), ..
                } => {
                    render_status(tracker).await;
                    println!("{next} form opens shortly");
                }
                SubmitOutcome::Recorded { .. } => render_status(tracker).await,
                SubmitOutcome::Dropped => println!("a request is already in flight"),
                SubmitOutcome::Rejected { .. } | SubmitOutcome::TransportFailed => {}
            }
        }
        Command::Undo => {
            let outcome =
                undo_last(tracker, move || confirm(input, "Undo the last play? [y/N] ")).await?;
            if let UndoOutcome::Undone(_) = outcome {
                render_status(tracker).await;
            }
        }
        Command::Score(side) => {
            let prompt = prompt_label(tracker.team(), side);
            if let Some(raw) = ask(input, &prompt).await {
                if let ScoreOverride::Updated(_) = override_score(tracker, side, &raw).await {
                    render_status(tracker).await;
                }
            }
        }
        Command::Quarter => {
            if let Some(raw) = ask(input, "Quarter (1-4, 5+ for OT):").await {
                if override_quarter(tracker, &raw).await.is_ok() {
                    render_status(tracker).await;
                }
            }
        }
        Command::Refresh => match refresh_feed(tracker).await {
            Ok(_) => render_status(tracker).await,
            Err(err) => println!("could not refresh plays: {err}"),
        },
        Command::Show => {
            render_status(tracker).await;
            render_open_form(tracker).await;
        }
        Command::Help => println!("{HELP}"),
        Command::Quit => {}
    }
    Ok(())
}

/// Prompt for one line; `None` when the operator enters nothing or input ends.
async fn ask(input: &mut Input, prompt: &str) -> Option<String> {
    print!("{prompt} ");
    let _ = std::io::stdout().flush();
    match input.next_line().await {
        Ok(Some(line)) if !line.trim().is_empty() => Some(line),
        Ok(_) => None,
        Err(err) => {
            warn!(error = %err, "failed to read prompt answer");
            None
        }
    }
}

async fn confirm(input: &mut Input, prompt: &str) -> bool {
    ask(input, prompt)
        .await
        .is_some_and(|answer| matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes"))
}

async fn render_status(tracker: &SharedTracker) {
    let team = tracker.team();
    let display = tracker.display().await;
    let down = display
        .down_distance
        .map(|dd| format!("{} & {}", dd.down_label, dd.distance))
        .unwrap_or_default();
    println!(
        "{} {} - {} {} | {} | {} | ball {} ({:.0}%)",
        team.team_abbr,
        display.team_score,
        display.opponent_score,
        team.opponent,
        display.quarter_label,
        down,
        display.ball_label,
        display.marker_percent,
    );

    for entry in tracker.feed_entries().await {
        let mut line = format!(
            "  #{} Q{} {}",
            entry.sequence_number, entry.quarter, entry.summary
        );
        if let Some(yards) = entry.yards_label() {
            line.push_str(&format!(" [{yards}]"));
        }
        if entry.is_touchdown {
            line.push_str(" TD");
        }
        if entry.is_interception {
            line.push_str(" INT");
        }
        println!("{line}");
    }

    match tracker.phase().await {
        TrackerPhase::SpecialTeamsMenu => println!("special teams menu"),
        TrackerPhase::ChainPending(next) => println!("{next} form pending"),
        _ => {}
    }
}

fn render_form(spec: &FormSpec) {
    println!("== {} ==", spec.title);
    for field in &spec.fields {
        match field {
            FieldSpec::PlayerPicker { id, label, options } => {
                let choices = options
                    .iter()
                    .map(|option| format!("{}={}", option.id, option.label))
                    .collect::<Vec<_>>()
                    .join(", ");
                println!("  {label} [{id}]: {choices}");
            }
            FieldSpec::Numeric {
                id, label, default, ..
            } => println!("  {label} [{id}] (default {default})"),
            FieldSpec::Toggles { toggles } => {
                let ids = toggles.iter().map(|t| t.id).collect::<Vec<_>>().join(" ");
                println!("  toggles: {ids}");
            }
            FieldSpec::RadioGroup { label, members } => {
                let ids = members.iter().map(|m| m.id).collect::<Vec<_>>().join(" | ");
                println!("  {label}: {ids}");
            }
            FieldSpec::PenaltyList { entries } => {
                for entry in entries {
                    println!("  {:>2}. {} ({})", entry.index, entry.name, entry.yards_label);
                }
            }
            FieldSpec::Hidden { .. } => {}
            FieldSpec::Notes { id } => println!("  notes [{id}]"),
        }
    }
}

async fn render_open_form(tracker: &SharedTracker) {
    let form = tracker.form().read().await;
    let Some(form) = form.as_ref() else {
        return;
    };
    println!("-- {} --", form.play_type());
    for (id, value) in form.fields() {
        let shown = match value {
            FieldValue::Player(Some(player)) => tracker
                .roster()
                .find(*player)
                .map(Player::option_label)
                .unwrap_or_else(|| format!("id {player}")),
            FieldValue::Player(None) => "-".to_string(),
            FieldValue::Number { text, default } if text.is_empty() => format!("({default})"),
            FieldValue::Number { text, .. } => text.clone(),
            FieldValue::Toggle(on) => if *on { "on" } else { "off" }.to_string(),
            FieldValue::Text(text) | FieldValue::Hidden(text) => text.clone(),
        };
        println!("  {id}: {shown}");
    }
}

/// Print each notification as it is raised.
async fn render_notifications(mut rx: watch::Receiver<Option<Notification>>) {
    while rx.changed().await.is_ok() {
        let current = rx.borrow_and_update().clone();
        if let Some(notification) = current {
            let tag = match notification.kind {
                NotificationKind::Success => "ok",
                NotificationKind::Error => "error",
            };
            println!("[{tag}] {}", notification.message);
        }
    }
}

/// Configure tracing subscribers; logs go to stderr so they do not interleave with prompts.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,sideline_tracker=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
