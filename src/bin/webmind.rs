//! Webmind CLI: capture notes, summarize them, and render the mind map.
//!
//! Usage:
//!   webmind note <subcommand> [--db path]
//!   webmind summarize <text>
//!   webmind mindmap [--format json|svg|scene] [--collapse id]...
//!   webmind stats | status

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::sync::Arc;
use webmind::summarizer::{SummaryLength, SummaryType};
use webmind::{
    probe_capability, reduce, Action, AppState, MindmapView, NoteService, NoteStatus,
    OpenStore, SqliteNoteStore, Statistics, Summarizer, SummarizerOptions, UserActivation,
    WebmindConfig,
};

#[derive(Parser)]
#[command(
    name = "webmind",
    version,
    about = "Note capture and mind-map engine"
)]
struct Cli {
    /// Path to the YAML config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    /// Path to SQLite database file
    #[arg(long, global = true)]
    db: Option<PathBuf>,
    /// More log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage notes
    Note {
        #[command(subcommand)]
        action: NoteAction,
    },
    /// Summarize text without storing it
    Summarize {
        text: String,
        #[arg(long, value_enum, default_value = "tldr")]
        kind: KindArg,
        #[arg(long, value_enum, default_value = "medium")]
        length: LengthArg,
    },
    /// Build the mind map of all notes
    Mindmap {
        #[arg(long, value_enum, default_value = "json")]
        format: MapFormat,
        /// Collapse this node before rendering (repeatable)
        #[arg(long)]
        collapse: Vec<String>,
        /// Write to a file instead of stdout
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Show note statistics
    Stats {
        #[arg(long)]
        json: bool,
    },
    /// Report summarizer availability
    Status,
}

#[derive(Subcommand)]
enum NoteAction {
    /// Capture a new note
    Add {
        text: String,
        #[arg(long, default_value = "")]
        url: String,
        #[arg(long, default_value = "")]
        title: String,
        /// Tag the note (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },
    /// List notes
    List {
        /// Only notes matching this text
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Show one note
    Show { id: String },
    /// Delete a note
    Delete { id: String },
    /// Delete every note
    Clear,
    /// Summarize notes (all pending notes when no ids are given)
    Summarize { ids: Vec<String> },
    /// Connect two or more notes
    Connect {
        #[arg(required = true, num_args = 2..)]
        ids: Vec<String>,
    },
    /// Export all notes as JSON
    Export {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Pending,
    Summarized,
    Connected,
}

impl From<StatusArg> for NoteStatus {
    fn from(s: StatusArg) -> Self {
        match s {
            StatusArg::Pending => NoteStatus::Pending,
            StatusArg::Summarized => NoteStatus::Summarized,
            StatusArg::Connected => NoteStatus::Connected,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum KindArg {
    KeyPoints,
    Tldr,
    Teaser,
    Headline,
}

#[derive(Clone, Copy, ValueEnum)]
enum LengthArg {
    Short,
    Medium,
    Long,
}

#[derive(Clone, Copy, PartialEq, ValueEnum)]
enum MapFormat {
    /// Flat node/link graph
    Json,
    /// Laid-out scene (positions, shapes, labels)
    Scene,
    Svg,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        _ => tracing::Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn open_service(config: &WebmindConfig, db: Option<PathBuf>) -> Result<NoteService, String> {
    let db_path = db.unwrap_or_else(|| config.resolved_db_path());
    let store = SqliteNoteStore::open(&db_path).map_err(|e| format!("Failed to open database: {}", e))?;
    let summarizer = Arc::new(build_summarizer(config));
    Ok(NoteService::new(Arc::new(store), summarizer).with_mindmap_config(config.mindmap.clone()))
}

/// Running a command is the user's explicit request, so it counts as
/// activation.
fn build_summarizer(config: &WebmindConfig) -> Summarizer {
    Summarizer::new(probe_capability(&config.summarizer), UserActivation::activated())
}

fn open_or_exit(config: &WebmindConfig, db: Option<PathBuf>) -> NoteService {
    match open_service(config, db) {
        Ok(service) => service,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn write_output(out: Option<&PathBuf>, text: &str) -> i32 {
    match out {
        Some(path) => match std::fs::write(path, text) {
            Ok(()) => {
                println!("Wrote {}", path.display());
                0
            }
            Err(e) => {
                eprintln!("Error: cannot write '{}': {}", path.display(), e);
                1
            }
        },
        None => {
            println!("{}", text);
            0
        }
    }
}

fn status_icon(status: NoteStatus) -> &'static str {
    match status {
        NoteStatus::Pending => "⏳",
        NoteStatus::Summarized => "✅",
        NoteStatus::Connected => "🔗",
    }
}

fn cmd_note_add(service: &mut NoteService, text: &str, url: &str, title: &str, tags: Vec<String>) -> i32 {
    let mut note = match service.collect_text(text, url, title) {
        Ok(note) => note,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if !tags.is_empty() {
        note.tags = Some(tags);
        if let Err(e) = service.update_note(&note) {
            eprintln!("Error: {}", e);
            return 1;
        }
    }
    println!("Saved note {}", note.id);
    0
}

fn cmd_note_list(service: &NoteService, search: Option<String>, status: Option<StatusArg>) -> i32 {
    let notes = match service.list_notes() {
        Ok(notes) => notes,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let mut state = reduce(AppState::default(), Action::NotesLoaded(notes));
    if let Some(query) = search {
        state = reduce(state, Action::SetSearch(query));
    }
    let shown = match status {
        Some(s) => state.notes_with_status(s.into()),
        None => state.filtered_notes(),
    };
    if shown.is_empty() {
        println!("No notes.");
        return 0;
    }
    println!("{:<36}  {:<2}  {}", "ID", "", "TITLE");
    println!("{}", "-".repeat(72));
    for note in shown {
        let title = if note.title.is_empty() {
            webmind::text::extract_title(note.text())
        } else {
            note.title.clone()
        };
        println!("{:<36}  {:<2}  {}", note.id, status_icon(note.status), title);
    }
    0
}

fn cmd_note_show(service: &NoteService, id: &str) -> i32 {
    match service.get_note(id) {
        Ok(note) => match serde_json::to_string_pretty(&note) {
            Ok(json) => {
                println!("{}", json);
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_note_delete(service: &mut NoteService, id: &str) -> i32 {
    match service.delete_note(id) {
        Ok(()) => {
            println!("Deleted note {}", id);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_note_clear(service: &mut NoteService) -> i32 {
    match service.clear_notes() {
        Ok(n) => {
            println!("Deleted {} notes", n);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_note_summarize(service: &mut NoteService, ids: Vec<String>) -> i32 {
    let ids = if ids.is_empty() {
        match service.list_notes() {
            Ok(notes) => notes
                .into_iter()
                .filter(|n| n.status == NoteStatus::Pending)
                .map(|n| n.id)
                .collect(),
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    } else {
        ids
    };
    if ids.is_empty() {
        println!("No pending notes.");
        return 0;
    }
    match service.summarize_notes(&ids).await {
        Ok(report) => {
            println!(
                "Summarized {} notes ({} by AI, {} extractive, {} skipped)",
                report.summarized + report.fallback,
                report.summarized,
                report.fallback,
                report.skipped
            );
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_note_connect(service: &mut NoteService, ids: &[String]) -> i32 {
    match service.connect_notes(ids) {
        Ok(notes) => {
            println!("Connected {} notes", notes.len());
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

fn cmd_note_export(service: &NoteService, out: Option<&PathBuf>) -> i32 {
    match service.export_notes() {
        Ok(json) => write_output(out, &json),
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_summarize(config: &WebmindConfig, text: &str, kind: KindArg, length: LengthArg) -> i32 {
    let summarizer = build_summarizer(config);
    let options = SummarizerOptions {
        summary_type: match kind {
            KindArg::KeyPoints => SummaryType::KeyPoints,
            KindArg::Tldr => SummaryType::Tldr,
            KindArg::Teaser => SummaryType::Teaser,
            KindArg::Headline => SummaryType::Headline,
        },
        length: match length {
            LengthArg::Short => SummaryLength::Short,
            LengthArg::Medium => SummaryLength::Medium,
            LengthArg::Long => SummaryLength::Long,
        },
        ..SummarizerOptions::default()
    };
    match summarizer.summarize_once(text, &options).await {
        Ok(summary) => {
            println!("{}", summary);
            0
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

async fn cmd_mindmap(
    service: &mut NoteService,
    config: &WebmindConfig,
    format: MapFormat,
    collapse: &[String],
    out: Option<&PathBuf>,
) -> i32 {
    let map = match service.mindmap().await {
        Ok(map) => map,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if format == MapFormat::Json {
        return match serde_json::to_string_pretty(&map) {
            Ok(json) => write_output(out, &json),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        };
    }

    let Some(mut view) = MindmapView::new(&map, config.viewport.width, config.viewport.height) else {
        eprintln!("Error: mind map has no nodes");
        return 1;
    };
    for id in collapse {
        if !view.set_expanded(id, false) {
            eprintln!("Warning: '{}' is not an expanded node with children", id);
        }
    }
    match format {
        MapFormat::Svg => write_output(out, &view.to_svg()),
        _ => match serde_json::to_string_pretty(view.scene()) {
            Ok(json) => write_output(out, &json),
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
    }
}

fn cmd_stats(service: &NoteService, json: bool) -> i32 {
    let notes = match service.list_notes() {
        Ok(notes) => notes,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    let stats = Statistics::compute(&notes, chrono::Utc::now());
    if json {
        return match serde_json::to_string_pretty(&stats) {
            Ok(text) => {
                println!("{}", text);
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        };
    }

    println!("📝 Total notes: {}", stats.total);
    println!("⏳ Pending:     {}", stats.pending);
    println!("✅ Summarized:  {}", stats.summarized);
    println!("🔗 Connected:   {}", stats.connected);
    println!();
    println!("📈 Activity (last 7 days)");
    let max = stats.max_daily();
    for day in &stats.activity {
        let bar = "█".repeat(day.count * 20 / max);
        println!("  {}  {:<20} {}", day.day, bar, day.count);
    }
    println!("  Average: {:.1} notes/day", stats.average_per_day);
    if !stats.top_tags.is_empty() {
        println!();
        println!("🏷️ Top tags");
        for tag in &stats.top_tags {
            println!("  #{:<20} {}", tag.tag, tag.count);
        }
    }
    0
}

async fn cmd_status(config: &WebmindConfig) -> i32 {
    let status = build_summarizer(config).ai_status().await;
    println!("{}", status.message);
    0
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = match WebmindConfig::load_or_default(cli.config.as_deref()) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    let code = match cli.command {
        Commands::Note { action } => {
            let mut service = open_or_exit(&config, cli.db);
            match action {
                NoteAction::Add { text, url, title, tags } => {
                    cmd_note_add(&mut service, &text, &url, &title, tags)
                }
                NoteAction::List { search, status } => cmd_note_list(&service, search, status),
                NoteAction::Show { id } => cmd_note_show(&service, &id),
                NoteAction::Delete { id } => cmd_note_delete(&mut service, &id),
                NoteAction::Clear => cmd_note_clear(&mut service),
                NoteAction::Summarize { ids } => cmd_note_summarize(&mut service, ids).await,
                NoteAction::Connect { ids } => cmd_note_connect(&mut service, &ids),
                NoteAction::Export { out } => cmd_note_export(&service, out.as_ref()),
            }
        }
        Commands::Summarize { text, kind, length } => cmd_summarize(&config, &text, kind, length).await,
        Commands::Mindmap { format, collapse, out } => {
            let mut service = open_or_exit(&config, cli.db);
            cmd_mindmap(&mut service, &config, format, &collapse, out.as_ref()).await
        }
        Commands::Stats { json } => cmd_stats(&open_or_exit(&config, cli.db), json),
        Commands::Status => cmd_status(&config).await,
    };
    std::process::exit(code);
}
