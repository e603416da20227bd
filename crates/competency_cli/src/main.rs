//! Command-line front end for the competency tracker.
//!
//! # Responsibility
//! - Parse commands, build the repository from config and print results.
//! - Keep every business rule inside `competency_core`.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use competency_core::db::open_db;
use competency_core::model::designer::{Goal, PainPoint};
use competency_core::render::html;
use competency_core::repo::designer_repo::SNAPSHOT_KEY;
use competency_core::service::tracker_service::{ActionDraft, OwnerChoice};
use competency_core::{
    import_json, init_logging, ActionFilter, ActionItemView, ActionStatus, Designer,
    DesignerForm, DesignerPatch, DesignerRepository, InMemoryRemoteStore, Priority,
    ProficiencyLevel, RemoteStore, RestRemoteStore, SnapshotStore, SqliteSnapshotStore,
    ToolKey, ToolProficiency, TrackerConfig, TrackerService, EXPORT_FILE_NAME,
};
use log::info;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "competency")]
#[command(about = "Track designers' AI tool proficiency, pain points, goals and follow-ups")]
#[command(version)]
struct Cli {
    /// Work against an in-process store seeded from the local snapshot.
    #[arg(long, global = true)]
    memory: bool,
    /// Snapshot database path (overrides COMPETENCY_SNAPSHOT_PATH).
    #[arg(long, global = true)]
    snapshot: Option<PathBuf>,
    /// Absolute directory for log files (overrides COMPETENCY_LOG_DIR).
    #[arg(long, global = true)]
    log_dir: Option<PathBuf>,
    /// trace|debug|info|warn|error (overrides COMPETENCY_LOG_LEVEL).
    #[arg(long, global = true)]
    log_level: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List designers with their next open action
    List,
    /// Show one designer as JSON
    Show { id: String },
    /// Record a new interview
    Add(AddArgs),
    /// Change basic fields of a designer
    Update(UpdateArgs),
    /// Delete a designer
    Delete { id: String },
    /// Append a progress note dated today
    Note { id: String, text: String },
    /// Add a pending action item
    Action {
        id: String,
        text: String,
        /// Owner name; defaults to the designer
        #[arg(long)]
        owner: Option<String>,
    },
    /// Set the status of an action item by index
    SetStatus {
        id: String,
        index: usize,
        #[arg(value_parser = parse_status)]
        status: ActionStatus,
    },
    /// Toggle an action item between done and pending
    Toggle { id: String, index: usize },
    /// List action items across all designers
    Actions {
        /// Only items owned by me
        #[arg(long, conflicts_with = "owner")]
        mine: bool,
        /// Only items owned by this name
        #[arg(long)]
        owner: Option<String>,
    },
    /// Print summary statistics
    Stats,
    /// Write the export document
    Export {
        #[arg(long, default_value = EXPORT_FILE_NAME)]
        out: PathBuf,
    },
    /// Render an HTML view
    Render {
        #[arg(value_enum)]
        view: View,
        /// Designer id for the `designer` view
        id: Option<String>,
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Print the tool catalog and level scale
    Catalog,
}

#[derive(Clone, Copy, ValueEnum)]
enum View {
    Overview,
    Designer,
}

#[derive(Args)]
struct AddArgs {
    #[arg(long)]
    name: String,
    #[arg(long, default_value = "")]
    team: String,
    /// Interview date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    date: String,
    #[arg(long, default_value = "")]
    insight: String,
    /// tool=level[:notes], e.g. claude=expert:daily use
    #[arg(long = "tool", value_parser = parse_tool)]
    tools: Vec<(ToolKey, ToolProficiency)>,
    /// issue[:details]
    #[arg(long = "pain", value_parser = parse_pain)]
    pains: Vec<PainPoint>,
    /// [high|medium|low:]goal
    #[arg(long = "goal", value_parser = parse_goal)]
    goals: Vec<Goal>,
    /// Action owned by me
    #[arg(long = "my-action")]
    my_actions: Vec<String>,
    /// Action owned by the designer
    #[arg(long = "their-action")]
    their_actions: Vec<String>,
}

#[derive(Args)]
struct UpdateArgs {
    id: String,
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    team: Option<String>,
    #[arg(long)]
    date: Option<String>,
    #[arg(long)]
    insight: Option<String>,
}

fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = TrackerConfig::from_env()?;
    if let Some(path) = cli.snapshot.clone() {
        config.snapshot_path = path;
    }
    if let Some(dir) = cli.log_dir.clone() {
        config.log_dir = Some(dir);
    }
    if let Some(level) = cli.log_level.clone() {
        config.log_level = level;
    }
    if let Some(dir) = &config.log_dir {
        let dir = dir
            .to_str()
            .ok_or_else(|| anyhow!("log directory is not valid UTF-8"))?;
        init_logging(&config.log_level, dir)?;
    }

    let snapshot = SqliteSnapshotStore::new(
        open_db(&config.snapshot_path)
            .with_context(|| format!("opening {}", config.snapshot_path.display()))?,
    );

    if cli.memory {
        let seeded = match snapshot.load(SNAPSHOT_KEY)? {
            Some(document) => import_json(&document)?,
            None => Vec::new(),
        };
        let remote = InMemoryRemoteStore::with_designers(&seeded);
        run(TrackerService::new(DesignerRepository::open(remote, snapshot)), cli.command)
    } else {
        config.validate()?;
        let remote =
            RestRemoteStore::with_timeout(&config.remote_url, &config.api_key, config.request_timeout)?;
        run(TrackerService::new(DesignerRepository::open(remote, snapshot)), cli.command)
    }
}

fn run<R: RemoteStore>(
    mut service: TrackerService<R, SqliteSnapshotStore>,
    command: Command,
) -> Result<()> {
    info!(
        "event=cli_start module=cli status=ok source={}",
        service.repository().source().as_str()
    );

    match command {
        Command::List => {
            for designer in service.repository().list() {
                print_designer_line(designer);
            }
        }
        Command::Show { id } => {
            let designer = service
                .repository()
                .get_by_id(&id)
                .ok_or_else(|| anyhow!("designer not found: {id}"))?;
            println!("{}", serde_json::to_string_pretty(designer)?);
        }
        Command::Add(args) => {
            let designer = service.submit_new(add_form(args))?;
            println!("added {}", designer.id);
        }
        Command::Update(args) => {
            let patch = DesignerPatch {
                name: args.name,
                team: args.team,
                interview_date: args.date,
                key_insight: args.insight,
                ..DesignerPatch::default()
            };
            if patch.is_empty() {
                bail!("nothing to update; pass at least one of --name, --team, --date, --insight");
            }
            let designer = service.repository_mut().update(&args.id, patch)?;
            println!("updated {} (last updated {})", designer.id, designer.last_updated);
        }
        Command::Delete { id } => {
            service.repository_mut().delete(&id)?;
            println!("deleted {id}");
        }
        Command::Note { id, text } => {
            service.add_note(&id, &text)?;
            println!("noted on {id}");
        }
        Command::Action { id, text, owner } => {
            let index = service.add_action(&id, &text, owner.as_deref())?;
            println!("added action {index} to {id}");
        }
        Command::SetStatus { id, index, status } => {
            service
                .repository_mut()
                .set_action_item_status(&id, index, status)?;
            println!("{id}[{index}] is now {}", status.as_key());
        }
        Command::Toggle { id, index } => {
            let status = service.toggle_action(&id, index)?;
            println!("{id}[{index}] is now {}", status.as_key());
        }
        Command::Actions { mine, owner } => {
            let filter = match (mine, owner) {
                (true, _) => ActionFilter::Mine,
                (false, Some(owner)) => ActionFilter::Owner(owner),
                (false, None) => ActionFilter::All,
            };
            for view in service.filter_actions(&filter) {
                print_action_line(&view);
            }
        }
        Command::Stats => {
            let stats = service.repository().summary_stats();
            println!(
                "designers interviewed: {}/{}",
                stats.interviewed_count, stats.total_designers
            );
            println!("pending actions: {}", stats.pending_actions);
            println!("my actions: {}", stats.my_actions);
            for (issue, count) in stats.top_pain_points(5) {
                println!("pain point: {issue} ({count})");
            }
            for (goal, count) in stats.top_goals(5) {
                println!("goal: {goal} ({count})");
            }
        }
        Command::Export { out } => {
            let document = service.repository().export_json()?;
            std::fs::write(&out, document)
                .with_context(|| format!("writing {}", out.display()))?;
            println!("exported {} designers to {}", service.repository().list().len(), out.display());
        }
        Command::Render { view, id, out } => {
            let repo = service.repository();
            let page = match view {
                View::Overview => html::team_overview(
                    repo.list(),
                    &repo.summary_stats(),
                    &repo.all_action_items(),
                ),
                View::Designer => {
                    let id = id.ok_or_else(|| anyhow!("the designer view needs an id"))?;
                    let designer = repo
                        .get_by_id(&id)
                        .ok_or_else(|| anyhow!("designer not found: {id}"))?;
                    html::designer_profile(designer)
                }
            };
            match out {
                Some(path) => std::fs::write(&path, page)
                    .with_context(|| format!("writing {}", path.display()))?,
                None => println!("{page}"),
            }
        }
        Command::Catalog => {
            for tool in ToolKey::ALL {
                let info = tool.info();
                println!("{:<14} {:<16} {}", tool.as_key(), info.display_name, info.description);
            }
            for level in ProficiencyLevel::ALL {
                println!("{} {:<10} {}", level.rank(), level.as_key(), level.label());
            }
        }
    }

    service.close()?;
    Ok(())
}

fn add_form(args: AddArgs) -> DesignerForm {
    let my_actions = args.my_actions.into_iter().map(|action| ActionDraft {
        key: None,
        action,
        owner: OwnerChoice::Me,
        status: ActionStatus::Pending,
    });
    let their_actions = args.their_actions.into_iter().map(|action| ActionDraft {
        key: None,
        action,
        owner: OwnerChoice::Designer,
        status: ActionStatus::Pending,
    });

    DesignerForm {
        name: args.name,
        team: args.team,
        interview_date: args.date,
        key_insight: args.insight,
        tool_proficiency: args.tools.into_iter().collect(),
        pain_points: args.pains,
        goals: args.goals,
        actions: my_actions.chain(their_actions).collect(),
    }
}

fn print_designer_line(designer: &Designer) {
    let next = designer
        .next_open_action()
        .map(|item| item.action.as_str())
        .unwrap_or("No pending actions");
    println!("{:<20} {:<24} {:<12} {}", designer.id, designer.name, designer.team, next);
}

fn print_action_line(view: &ActionItemView) {
    println!(
        "{}[{}] {:<11} {:<10} {} ({})",
        view.designer_id,
        view.action_index,
        view.item.status.as_key(),
        view.item.owner.label(),
        view.item.action,
        view.designer_name
    );
}

fn parse_status(value: &str) -> Result<ActionStatus, String> {
    ActionStatus::ALL
        .into_iter()
        .find(|status| status.as_key() == value)
        .ok_or_else(|| format!("unknown status `{value}`; expected pending|in-progress|done"))
}

fn parse_tool(value: &str) -> Result<(ToolKey, ToolProficiency), String> {
    let (tool, rest) = value
        .split_once('=')
        .ok_or_else(|| format!("expected tool=level[:notes], got `{value}`"))?;
    let tool = ToolKey::parse(tool.trim()).ok_or_else(|| format!("unknown tool `{tool}`"))?;
    let (level, notes) = rest.split_once(':').unwrap_or((rest, ""));
    let level = ProficiencyLevel::ALL
        .into_iter()
        .find(|candidate| candidate.as_key() == level.trim())
        .ok_or_else(|| format!("unknown level `{level}`"))?;
    Ok((tool, ToolProficiency::new(level, notes.trim())))
}

fn parse_pain(value: &str) -> Result<PainPoint, String> {
    let (issue, details) = value.split_once(':').unwrap_or((value, ""));
    Ok(PainPoint {
        issue: issue.trim().to_string(),
        details: details.trim().to_string(),
    })
}

fn parse_goal(value: &str) -> Result<Goal, String> {
    let parsed = value.split_once(':').and_then(|(priority, goal)| {
        Priority::ALL
            .into_iter()
            .find(|candidate| candidate.as_key() == priority.trim())
            .map(|priority| (priority, goal))
    });
    let (priority, goal) = parsed.unwrap_or((Priority::default(), value));
    Ok(Goal {
        goal: goal.trim().to_string(),
        priority,
    })
}
