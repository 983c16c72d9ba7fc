//! Artistdash CLI - work with the artist dashboard backend from a terminal
//!
//! # Commands
//!
//! ```bash
//! artistdash concerts list --city Москва --sort date-asc
//! artistdash videos list --category live
//! artistdash banners list --status pending
//! artistdash banners approve b-1 b-2
//! artistdash banners reject b-3 --note "Нечитаемый шрифт"
//! artistdash tickets list --status open
//! artistdash campaigns
//! artistdash platforms
//! artistdash validate concert concert.json
//! artistdash submit concert concert.json --draft
//! artistdash submit track track.json --no-animation
//! artistdash submit reply reply.json --ticket t-42
//! ```
//!
//! Reads `SUPABASE_PROJECT_ID` and `SUPABASE_ANON_KEY` from the environment
//! or a `.env` file.

use artistdash::listing::{DateRange, Facet, ListQuery, Listable, SortKey};
use artistdash::notify::{Toast, ToastLevel};
use artistdash::{
    bulk_approve, bulk_reject, ApiError, ApiResult, Attachment, AttachmentData, BannerForm, CampaignForm,
    ConcertForm, EdgeClient, FieldErrors, Form, ImmediateTicker, Notifier, PitchForm, ProgressConfig,
    ReplyForm, SubmissionPhase, SubmitError, Submitter, TicketForm, TokioTicker, TrackForm, VideoForm,
};
use artistdash::moderation::Selection;
use clap::{Parser, Subcommand, ValueEnum};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::future::Future;
use std::io::Write;
use std::path::{Path, PathBuf};
use tokio::sync::broadcast;

#[derive(Parser)]
#[command(name = "artistdash")]
#[command(about = "Artist dashboard client: lists, moderation and submissions", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Concert announcements
    Concerts {
        #[command(subcommand)]
        action: ConcertAction,
    },

    /// Uploaded videos
    Videos {
        #[command(subcommand)]
        action: VideoAction,
    },

    /// Banner bookings and their moderation
    Banners {
        #[command(subcommand)]
        action: BannerAction,
    },

    /// Support tickets
    Tickets {
        #[command(subcommand)]
        action: TicketAction,
    },

    /// Email campaigns with their open and click rates
    Campaigns {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Pitching platforms and this artist's request state
    Platforms {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Check a form JSON file without sending it
    Validate {
        /// Which form the file holds
        kind: FormKind,
        /// Input JSON file (form values as typed)
        input: PathBuf,
    },

    /// Run the submission workflow for a form JSON file
    Submit {
        #[command(subcommand)]
        target: SubmitTarget,
    },
}

/// Toolbar flags shared by list commands.
#[derive(clap::Args)]
struct ListArgs {
    /// Free-text search
    #[arg(short, long, default_value = "")]
    search: String,

    /// Status filter
    #[arg(long)]
    status: Option<String>,

    /// Sort order: date-asc, date-desc, views, clicks, newest
    #[arg(long)]
    sort: Option<SortKey>,

    /// From date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    from: String,

    /// To date, YYYY-MM-DD
    #[arg(long, default_value = "")]
    to: String,

    /// Print JSON instead of a table
    #[arg(long)]
    json: bool,
}

impl ListArgs {
    fn query(&self) -> ListQuery {
        let mut query = ListQuery::new()
            .search(self.search.clone())
            .dates(DateRange::from_inputs(&self.from, &self.to));
        if let Some(status) = &self.status {
            query.set_filter(Facet::Status, status.clone());
        }
        query.sort = self.sort;
        query
    }
}

#[derive(Subcommand)]
enum ConcertAction {
    /// List concerts
    List {
        #[command(flatten)]
        list: ListArgs,

        /// City filter
        #[arg(long)]
        city: Option<String>,

        /// Event type filter (concert, festival, club, private, online)
        #[arg(long = "type")]
        event_type: Option<String>,
    },
}

#[derive(Subcommand)]
enum VideoAction {
    /// List videos
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Category filter (music-video, live, lyric, backstage, interview, other)
        #[arg(long)]
        category: Option<String>,
    },
}

#[derive(Subcommand)]
enum BannerAction {
    /// List banners
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Placement filter (home-top, home-sidebar, catalog, player)
        #[arg(long)]
        placement: Option<String>,
    },

    /// Approve banners, one request per id
    Approve {
        /// Banner ids, processed in order
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Reject banners with a note, one request per id
    Reject {
        /// Banner ids, processed in order
        #[arg(required = true)]
        ids: Vec<String>,

        /// Reason shown to the artist
        #[arg(short, long)]
        note: String,
    },
}

#[derive(Subcommand)]
enum TicketAction {
    /// List tickets
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Priority filter (low, medium, high, urgent)
        #[arg(long)]
        priority: Option<String>,
    },
}

/// Flags shared by every submit target.
#[derive(clap::Args)]
struct SubmitArgs {
    /// Input JSON file (form values as typed)
    input: PathBuf,

    /// Save as draft, skipping validation
    #[arg(long)]
    draft: bool,

    /// Print the payload instead of sending it
    #[arg(long)]
    dry_run: bool,

    /// Skip the progress animation
    #[arg(long)]
    no_animation: bool,
}

#[derive(Subcommand)]
enum SubmitTarget {
    /// Create a concert announcement, or edit one with --id
    Concert {
        #[command(flatten)]
        args: SubmitArgs,

        /// Poster image URL, used when the file has no banner
        #[arg(long)]
        poster_url: Option<String>,

        /// Draft or rejected concert to overwrite
        #[arg(long)]
        id: Option<String>,
    },

    /// Upload a video or link an external one
    Video {
        #[command(flatten)]
        args: SubmitArgs,
    },

    /// Send a track for a listener test
    Track {
        #[command(flatten)]
        args: SubmitArgs,
    },

    /// Book a banner placement
    Banner {
        #[command(flatten)]
        args: SubmitArgs,
    },

    /// Send or schedule an email campaign
    Campaign {
        #[command(flatten)]
        args: SubmitArgs,
    },

    /// Pitch a track to a platform
    Pitch {
        #[command(flatten)]
        args: SubmitArgs,
    },

    /// Open a support ticket
    Ticket {
        #[command(flatten)]
        args: SubmitArgs,
    },

    /// Reply in a support ticket thread
    Reply {
        #[command(flatten)]
        args: SubmitArgs,

        /// Ticket to reply to
        #[arg(long)]
        ticket: String,
    },
}

impl SubmitTarget {
    /// Track tests animate on a slower schedule.
    fn progress(&self) -> ProgressConfig {
        match self {
            SubmitTarget::Track { .. } => ProgressConfig::TRACK_TEST,
            _ => ProgressConfig::UPLOAD,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum FormKind {
    Concert,
    Video,
    Track,
    Banner,
    Ticket,
    Campaign,
    Pitch,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Concerts { action } => cmd_concerts(action).await,
        Commands::Videos { action } => cmd_videos(action).await,
        Commands::Banners { action } => cmd_banners(action).await,
        Commands::Tickets { action } => cmd_tickets(action).await,
        Commands::Campaigns { json } => cmd_campaigns(json).await,
        Commands::Platforms { json } => cmd_platforms(json).await,
        Commands::Validate { kind, input } => cmd_validate(kind, &input).map(|valid| {
            if !valid {
                std::process::exit(1);
            }
        }),
        Commands::Submit { target } => cmd_submit(target).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

// =============================================================================
// Lists
// =============================================================================

async fn cmd_concerts(action: ConcertAction) -> CliResult<()> {
    let ConcertAction::List { list, city, event_type } = action;
    let client = EdgeClient::from_env()?;

    eprintln!("📡 Loading concerts...");
    let concerts = client.list_concerts().await?;

    let mut query = list.query();
    query.set_filter(Facet::City, city.unwrap_or_default());
    query.set_filter(Facet::EventType, event_type.unwrap_or_default());

    let visible = query.apply(&concerts);
    print_list(&visible, concerts.len(), list.json, |c| {
        format!(
            "{:<10} {:<5} {:<16} {} [{}]",
            c.date.map(|d| d.to_string()).unwrap_or_else(|| "—".into()),
            c.time,
            c.city,
            c.title,
            c.status
        )
    })
}

async fn cmd_videos(action: VideoAction) -> CliResult<()> {
    let VideoAction::List { list, category } = action;
    let client = EdgeClient::from_env()?;

    eprintln!("📡 Loading videos...");
    let videos = client.list_videos().await?;

    let mut query = list.query();
    query.set_filter(Facet::Category, category.unwrap_or_default());

    let visible = query.apply(&videos);
    print_list(&visible, videos.len(), list.json, |v| {
        format!(
            "{:<12} {:<12} {:>7} просмотров  {} [{}]",
            v.id,
            v.category.map(|c| c.as_str()).unwrap_or("—"),
            v.stats.views,
            v.title,
            v.status
        )
    })
}

async fn cmd_banners(action: BannerAction) -> CliResult<()> {
    let client = EdgeClient::from_env()?;
    let notifier = Notifier::new();

    match action {
        BannerAction::List { list, placement } => {
            eprintln!("📡 Loading banners...");
            let banners = client.list_banners().await?;

            let mut query = list.query();
            query.set_filter(Facet::Placement, placement.unwrap_or_default());

            let visible = query.apply(&banners);
            print_list(&visible, banners.len(), list.json, |b| {
                format!(
                    "{:<12} {:<13} {:>6} показов {:>5} кликов  {} [{}]",
                    b.id, b.placement, b.impressions, b.clicks, b.title, b.status
                )
            })
        }

        BannerAction::Approve { ids } => {
            let selection = select(ids);
            eprintln!("✔️  Approving {} banner(s)...", selection.len());
            let mut rx = notifier.subscribe();
            let report = bulk_approve(&selection, |id| {
                let client = client.clone();
                async move { client.approve_banner(&id).await }
            })
            .await?;
            report.notify(&notifier);
            drain_toasts(&mut rx);
            finish_bulk(report.failed.len())
        }

        BannerAction::Reject { ids, note } => {
            let selection = select(ids);
            eprintln!("✖️  Rejecting {} banner(s)...", selection.len());
            let mut rx = notifier.subscribe();
            let report = bulk_reject(&selection, &note, |id, note| {
                let client = client.clone();
                async move { client.reject_banner(&id, &note).await }
            })
            .await?;
            report.notify(&notifier);
            drain_toasts(&mut rx);
            finish_bulk(report.failed.len())
        }
    }
}

async fn cmd_tickets(action: TicketAction) -> CliResult<()> {
    let TicketAction::List { list, priority } = action;
    let client = EdgeClient::from_env()?;

    eprintln!("📡 Loading tickets...");
    let tickets = client.list_tickets().await?;

    let mut query = list.query();
    query.set_filter(Facet::Priority, priority.unwrap_or_default());

    let visible = query.apply(&tickets);
    print_list(&visible, tickets.len(), list.json, |t| {
        let unread = if t.has_unread_reply() { " ●" } else { "" };
        format!(
            "{:<12} {:<16} {:<8} {}{}",
            t.id, t.status, t.priority, t.subject, unread
        )
    })
}

async fn cmd_campaigns(json: bool) -> CliResult<()> {
    let client = EdgeClient::from_env()?;

    eprintln!("📡 Loading campaigns...");
    let campaigns = client.list_campaigns().await?;
    print_all(&campaigns, json, |c| {
        let rate = |value: Option<f32>| value.map(|v| format!("{:.1}%", v)).unwrap_or_else(|| "—".into());
        format!(
            "{:<12} {:<10} {:>6} получателей  открытия {:>6}  клики {:>6}  {}",
            c.id,
            c.status,
            c.recipient_count,
            rate(c.open_rate),
            rate(c.click_rate),
            c.subject
        )
    })
}

async fn cmd_platforms(json: bool) -> CliResult<()> {
    let client = EdgeClient::from_env()?;

    eprintln!("📡 Loading pitching platforms...");
    let platforms = client.list_platforms().await?;
    print_all(&platforms, json, |p| {
        let open = if p.can_pitch() { "" } else { " (заявка открыта)" };
        format!("{:<12} {:<10} {:>5} монет  {} [{}]{}", p.id, p.channel, p.cost, p.name, p.status, open)
    })
}

fn print_all<T: Serialize>(items: &[T], json: bool, row: impl Fn(&T) -> String) -> CliResult<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(items)?);
    } else {
        for item in items {
            println!("{}", row(item));
        }
    }
    Ok(())
}

fn print_list<T: Listable + Serialize>(
    visible: &[&T],
    total: usize,
    json: bool,
    row: impl Fn(&T) -> String,
) -> CliResult<()> {
    eprintln!("   Showing {} of {}", visible.len(), total);
    if json {
        println!("{}", serde_json::to_string_pretty(visible)?);
    } else {
        for item in visible {
            println!("{}", row(item));
        }
    }
    Ok(())
}

fn select(ids: Vec<String>) -> Selection {
    let mut selection = Selection::new();
    for id in ids {
        selection.select(id);
    }
    selection
}

fn finish_bulk(failed: usize) -> CliResult<()> {
    if failed > 0 {
        return Err(format!("{} item(s) failed", failed).into());
    }
    eprintln!("\n✨ Done!");
    Ok(())
}

/// Prints toasts already broadcast, in order.
fn drain_toasts(rx: &mut broadcast::Receiver<Toast>) {
    while let Ok(toast) = rx.try_recv() {
        let prefix = match toast.level {
            ToastLevel::Info => "  ",
            ToastLevel::Success => "   ✓",
            ToastLevel::Warning => "   ⚠️",
            ToastLevel::Error => "   ❌",
        };
        eprintln!("{} {}", prefix, toast.message);
    }
}

// =============================================================================
// Validate & submit
// =============================================================================

fn read_form<F: Form + DeserializeOwned>(input: &Path) -> CliResult<F> {
    let content = fs::read_to_string(input)?;
    Ok(serde_json::from_str(&content)?)
}

fn report_errors(errors: &FieldErrors) {
    for (field, message) in errors.iter() {
        eprintln!("   - {}: {}", field, message);
    }
}

/// Returns whether the file holds a valid form.
fn cmd_validate(kind: FormKind, input: &Path) -> CliResult<bool> {
    eprintln!("✔️  Validating: {}", input.display());

    let errors = match kind {
        FormKind::Concert => read_form::<ConcertForm>(input)?.validate(),
        FormKind::Video => read_form::<VideoForm>(input)?.validate(),
        FormKind::Track => read_form::<TrackForm>(input)?.validate(),
        FormKind::Banner => read_form::<BannerForm>(input)?.validate(),
        FormKind::Ticket => read_form::<TicketForm>(input)?.validate(),
        FormKind::Campaign => read_form::<CampaignForm>(input)?.validate(),
        FormKind::Pitch => read_form::<PitchForm>(input)?.validate(),
    };

    if errors.is_empty() {
        eprintln!("   ✅ Valid");
        Ok(true)
    } else {
        eprintln!("   ❌ {} invalid field(s):", errors.len());
        report_errors(&errors);
        Ok(false)
    }
}

async fn cmd_submit(target: SubmitTarget) -> CliResult<()> {
    let progress = target.progress();

    match target {
        SubmitTarget::Concert { args, poster_url, id } => {
            let mut form: ConcertForm = read_form(&args.input)?;
            if form.banner.is_none() {
                form.banner = poster_url.map(remote_attachment);
            }
            run_submission(form, &args, progress, "concert", |client, payload| async move {
                match id {
                    Some(id) => client.update_concert(&id, &payload).await,
                    None => client.create_concert(&payload).await,
                }
            })
            .await
        }
        SubmitTarget::Video { args } => {
            let form: VideoForm = read_form(&args.input)?;
            run_submission(form, &args, progress, "video", |client, payload| async move {
                client.create_video(&payload).await
            })
            .await
        }
        SubmitTarget::Track { args } => {
            let form: TrackForm = read_form(&args.input)?;
            run_submission(form, &args, progress, "track test", |client, payload| async move {
                client.create_track_test(&payload).await
            })
            .await
        }
        SubmitTarget::Banner { args } => {
            let form: BannerForm = read_form(&args.input)?;
            run_submission(form, &args, progress, "banner", |client, payload| async move {
                client.create_banner(&payload).await
            })
            .await
        }
        SubmitTarget::Campaign { args } => {
            let form: CampaignForm = read_form(&args.input)?;
            run_submission(form, &args, progress, "campaign", |client, payload| async move {
                client.create_campaign(&payload).await
            })
            .await
        }
        SubmitTarget::Pitch { args } => {
            let form: PitchForm = read_form(&args.input)?;
            run_submission(form, &args, progress, "pitch", |client, payload| async move {
                client.create_pitch(&payload).await
            })
            .await
        }
        SubmitTarget::Ticket { args } => {
            let form: TicketForm = read_form(&args.input)?;
            run_submission(form, &args, progress, "ticket", |client, payload| async move {
                client.create_ticket(&payload).await
            })
            .await
        }
        SubmitTarget::Reply { args, ticket } => {
            let form: ReplyForm = read_form(&args.input)?;
            run_submission(form, &args, progress, "reply", |client, payload| async move {
                client.send_message(&ticket, &payload).await
            })
            .await
        }
    }
}

/// Runs the workflow for one form. `send` is only called outside dry runs.
async fn run_submission<F, T, S, Fut>(
    form: F,
    args: &SubmitArgs,
    progress: ProgressConfig,
    what: &str,
    send: S,
) -> CliResult<()>
where
    F: Form,
    F::Payload: Serialize,
    T: Serialize,
    S: FnOnce(EdgeClient, F::Payload) -> Fut,
    Fut: Future<Output = ApiResult<T>>,
{
    eprintln!("📄 Processing {}: {}", what, args.input.display());

    let client = if args.dry_run { None } else { Some(EdgeClient::from_env()?) };
    let submitter = Submitter::new(progress);
    let on_phase = |phase: SubmissionPhase| print_phase(&phase);

    let persist = |payload: F::Payload, is_draft: bool| async move {
        match client {
            Some(client) => send(client, payload).await.map(Some),
            None => {
                eprintln!();
                eprintln!("   (dry run, draft: {})", is_draft);
                let json = serde_json::to_string_pretty(&payload)
                    .map_err(|e| ApiError::InvalidResponse(e.to_string()))?;
                println!("{}", json);
                Ok(None)
            }
        }
    };

    let result = if args.no_animation || args.dry_run {
        submitter.submit(&form, args.draft, &ImmediateTicker, on_phase, persist).await
    } else {
        submitter.submit(&form, args.draft, &TokioTicker, on_phase, persist).await
    };

    match result {
        Ok(Some(saved)) => {
            println!("{}", serde_json::to_string_pretty(&saved)?);
            eprintln!("\n✨ Saved {}", what);
            Ok(())
        }
        Ok(None) => Ok(()),
        Err(SubmitError::Invalid(errors)) => {
            report_errors(&errors);
            Err("submission blocked by validation".into())
        }
        Err(e) => Err(e.user_message().into()),
    }
}

fn remote_attachment(url: String) -> Attachment {
    let file_name = url.rsplit('/').next().unwrap_or("poster").to_string();
    Attachment {
        file_name,
        mime_type: "image/*".to_string(),
        size_bytes: 0,
        data: AttachmentData::Remote(url),
    }
}

fn print_phase(phase: &SubmissionPhase) {
    match phase {
        SubmissionPhase::Validating => eprintln!("   Validating..."),
        SubmissionPhase::Invalid(errors) => eprintln!("   ❌ {} invalid field(s):", errors.len()),
        SubmissionPhase::Submitting { progress } => {
            eprint!("\r   ⬆️  Uploading... {:>3}%", progress);
            let _ = std::io::stderr().flush();
        }
        SubmissionPhase::Succeeded => eprintln!(),
        SubmissionPhase::Failed(message) => eprintln!("\n   ❌ {}", message),
        SubmissionPhase::Idle => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;
    use tempfile::NamedTempFile;

    fn json_file(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_validate_reports_invalid_concert() {
        let file = json_file(
            r#"{"title":"","date":"2026-06-15","time":"19:00","city":"Москва","venue":"","type":"","banner":null}"#,
        );
        assert!(!cmd_validate(FormKind::Concert, file.path()).unwrap());
    }

    #[test]
    fn test_validate_accepts_ticket() {
        let file = json_file(r#"{"subject":"Оплата","category":"billing","message":"Списали дважды"}"#);
        assert!(cmd_validate(FormKind::Ticket, file.path()).unwrap());
    }

    #[test]
    fn test_validate_rejects_unknown_choice() {
        let file = json_file(r#"{"title":"x","type":"rave"}"#);
        assert!(cmd_validate(FormKind::Concert, file.path()).is_err());
    }

    fn dry_run(file: &NamedTempFile, draft: bool) -> SubmitArgs {
        SubmitArgs {
            input: file.path().to_path_buf(),
            draft,
            dry_run: true,
            no_animation: true,
        }
    }

    #[tokio::test]
    async fn test_dry_run_draft_submits_without_network() {
        let file = json_file(r#"{"title":"Черновик"}"#);
        let target = SubmitTarget::Concert { args: dry_run(&file, true), poster_url: None, id: None };
        assert!(cmd_submit(target).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_blocks_invalid_form() {
        let file = json_file(r#"{"title":"Без даты"}"#);
        let target = SubmitTarget::Concert {
            args: dry_run(&file, false),
            poster_url: Some("https://cdn.example.com/poster.jpg".into()),
            id: None,
        };
        assert!(cmd_submit(target).await.is_err());
    }

    #[tokio::test]
    async fn test_dry_run_video() {
        let file = json_file(
            r#"{"title":"Live at Stadium","category":"live","videoUrl":"https://youtube.com/watch?v=abc"}"#,
        );
        assert!(cmd_submit(SubmitTarget::Video { args: dry_run(&file, false) }).await.is_ok());

        let missing = json_file(r#"{"title":"Без ссылки","category":"live"}"#);
        assert!(cmd_submit(SubmitTarget::Video { args: dry_run(&missing, false) }).await.is_err());
    }

    #[tokio::test]
    async fn test_dry_run_track_draft() {
        let file = json_file(r#"{"title":"Demo","artist":"Группа"}"#);
        assert!(cmd_submit(SubmitTarget::Track { args: dry_run(&file, true) }).await.is_ok());
        assert!(cmd_submit(SubmitTarget::Track { args: dry_run(&file, false) }).await.is_err());
    }

    #[tokio::test]
    async fn test_dry_run_banner_draft() {
        let file = json_file(r#"{"title":"Новый альбом","placement":"home-top"}"#);
        assert!(cmd_submit(SubmitTarget::Banner { args: dry_run(&file, true) }).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_campaign() {
        let file = json_file(r#"{"subject":"Новый релиз","body":"Слушайте везде","scheduledAt":"2026-09-01T12:00"}"#);
        assert!(cmd_submit(SubmitTarget::Campaign { args: dry_run(&file, false) }).await.is_ok());
    }

    #[tokio::test]
    async fn test_dry_run_pitch() {
        let file = json_file(r#"{"platformId":"p-radio","trackId":"t-7","message":"Для эфира"}"#);
        assert!(cmd_submit(SubmitTarget::Pitch { args: dry_run(&file, false) }).await.is_ok());

        let missing = json_file(r#"{"platformId":"p-radio"}"#);
        assert!(cmd_submit(SubmitTarget::Pitch { args: dry_run(&missing, false) }).await.is_err());
    }

    #[tokio::test]
    async fn test_dry_run_ticket_and_reply() {
        let ticket = json_file(r#"{"subject":"Оплата","category":"billing","message":"Списали дважды"}"#);
        assert!(cmd_submit(SubmitTarget::Ticket { args: dry_run(&ticket, false) }).await.is_ok());

        let reply = json_file(r#"{"text":"Спасибо, всё пришло"}"#);
        let target = SubmitTarget::Reply { args: dry_run(&reply, false), ticket: "t-42".into() };
        assert!(cmd_submit(target).await.is_ok());

        let empty = json_file(r#"{"text":"  "}"#);
        let target = SubmitTarget::Reply { args: dry_run(&empty, false), ticket: "t-42".into() };
        assert!(cmd_submit(target).await.is_err());
    }

    #[test]
    fn test_track_tests_use_their_own_progress() {
        let cli = Cli::parse_from(["artistdash", "submit", "track", "track.json", "--dry-run"]);
        let Commands::Submit { target } = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(target.progress(), ProgressConfig::TRACK_TEST);

        let cli = Cli::parse_from(["artistdash", "submit", "reply", "r.json", "--ticket", "t-1"]);
        let Commands::Submit { target } = cli.command else {
            panic!("expected submit");
        };
        assert_eq!(target.progress(), ProgressConfig::UPLOAD);
    }

    #[test]
    fn test_list_args_query() {
        let cli = Cli::parse_from([
            "artistdash", "concerts", "list", "--status", "approved", "--sort", "date-asc", "--from", "2026-01-01",
        ]);
        let Commands::Concerts { action: ConcertAction::List { list, .. } } = cli.command else {
            panic!("expected concerts list");
        };
        let query = list.query();
        assert_eq!(query.filters.get(&Facet::Status).map(String::as_str), Some("approved"));
        assert_eq!(query.sort, Some(SortKey::DateAsc));
        assert!(query.date_range.from.is_some());
    }

    #[test]
    fn test_remote_attachment_name() {
        let a = remote_attachment("https://cdn.example.com/img/poster.jpg".into());
        assert_eq!(a.file_name, "poster.jpg");
        assert_eq!(a.reference(), "https://cdn.example.com/img/poster.jpg");
    }
}
