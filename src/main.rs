mod app;
mod config;
mod engine;
mod event;
mod generator;
mod session;
mod store;
mod ui;

use std::fs::{self, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Instant;

use anyhow::Result;
use clap::Parser;
use crossterm::execute;
use crossterm::style::Print;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Paragraph};
use tracing_subscriber::EnvFilter;

use app::{App, AppMessage, LEADERBOARD_ROWS};
use config::{Config, LoadedConfig};
use event::{AppEvent, EventHandler, TICK_RATE};
use generator::phrase::{Difficulty, PhraseBank};
use store::json_store::{self, JsonStore, KeyValueStore, MemoryStore};
use store::ranking::RankingStore;
use ui::components::leaderboard::Leaderboard;
use ui::components::progress_bar::ProgressBar;
use ui::components::result_panel::ResultPanel;
use ui::components::stats_sidebar::StatsSidebar;
use ui::components::typing_area::TypingArea;
use ui::layout::{AppLayout, pack_hint_lines};

#[derive(Parser)]
#[command(
    name = "phrasedash",
    version,
    about = "Terminal typing practice with live metrics and a local leaderboard"
)]
struct Cli {
    #[arg(short, long, help = "Phrase length tier (short, medium, long)")]
    difficulty: Option<String>,

    #[arg(short, long, help = "Theme name (light, dark, colorful)")]
    theme: Option<String>,

    #[arg(long, help = "Directory for the best score and leaderboard files")]
    data_dir: Option<PathBuf>,

    #[arg(long, value_name = "PATH", help = "Write the leaderboard as JSON and exit")]
    export: Option<PathBuf>,

    #[arg(long, help = "Clear the leaderboard (the best score is kept) and exit")]
    clear_leaderboard: bool,

    #[arg(long, help = "Print the best WPM and exit")]
    best: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = Config::config_path();
    let LoadedConfig {
        mut config,
        save_path: config_save_path,
        error: config_error,
    } = Config::load_or_default(&config_path);
    if let Some(difficulty) = cli.difficulty.as_deref() {
        config.set_difficulty(Difficulty::from_name(difficulty));
    }
    if let Some(theme) = cli.theme {
        config.theme = theme;
    }
    let data_dir = cli
        .data_dir
        .or_else(|| config.data_dir.clone())
        .unwrap_or_else(json_store::default_data_dir);

    init_logging(&data_dir);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "starting phrasedash");
    if let Some(e) = config_error {
        tracing::warn!(
            path = %config_path.display(),
            error = %e,
            "config could not be loaded, using defaults and leaving the file untouched"
        );
    }

    let mut ranking = RankingStore::open(open_storage(data_dir));

    if let Some(path) = cli.export {
        ranking.export_to(&path)?;
        println!(
            "Exported {} runs to {}",
            ranking.entries().len(),
            path.display()
        );
        return Ok(());
    }
    if cli.clear_leaderboard {
        ranking.clear();
        println!("Leaderboard cleared (best score kept: {}).", ranking.best_wpm());
        return Ok(());
    }
    if cli.best {
        println!("{}", ranking.best_wpm());
        return Ok(());
    }

    let phrases = PhraseBank::from_config(&config.phrases);
    let mut app = App::new(config, ranking, phrases).with_config_file(config_save_path);

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let events = EventHandler::new(TICK_RATE);

    let result = run_app(&mut terminal, &mut app, &events);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = result {
        tracing::error!(error = ?err, "app loop failed");
        eprintln!("Error: {err:?}");
    }

    Ok(())
}

/// File-backed storage in `data_dir`, or process memory if that directory
/// cannot be created.
fn open_storage(data_dir: PathBuf) -> Box<dyn KeyValueStore> {
    match JsonStore::with_base_dir(data_dir) {
        Ok(store) => Box::new(store),
        Err(e) => {
            tracing::warn!(error = %e, "data directory unavailable, results will not be saved");
            Box::new(MemoryStore::default())
        }
    }
}

/// Log to `<data_dir>/phrasedash.log`; the terminal belongs to the UI.
fn init_logging(data_dir: &Path) {
    let filter = EnvFilter::try_from_env("PHRASEDASH_LOG")
        .unwrap_or_else(|_| EnvFilter::new("phrasedash=info"));

    let log_file = fs::create_dir_all(data_dir).and_then(|()| {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(data_dir.join("phrasedash.log"))
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_ansi(false)
        .with_target(false);
    let _ = match log_file {
        Ok(file) => builder.with_writer(Mutex::new(file)).try_init(),
        Err(_) => builder.with_writer(io::sink).try_init(),
    };
}

fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
    events: &EventHandler,
) -> Result<()> {
    let mut redraw = true;
    loop {
        if redraw {
            terminal.draw(|frame| render(frame, app))?;
        }

        let message = match events.next()? {
            AppEvent::Key(key) => app::message_for_key(key, app.confirm_clear),
            AppEvent::Tick(at) => Some(AppMessage::Tick(at)),
            AppEvent::Resize(_, _) => None,
        };
        redraw = match message {
            Some(message) => app.dispatch(message, Instant::now()),
            None => true,
        };

        if app.take_celebration() {
            execute!(terminal.backend_mut(), Print("\x07"))?;
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn render(frame: &mut ratatui::Frame, app: &App) {
    let area = frame.area();
    let colors = &app.theme.colors;

    let bg = Block::default().style(Style::default().bg(colors.bg()));
    frame.render_widget(bg, area);

    let layout = AppLayout::new(area);
    let metrics = app.session.metrics();
    let started = app.session.started_at().is_some();

    let header_info = if layout.tier.show_sidebar() {
        format!(
            " {} | theme: {} ",
            app.difficulty.as_str(),
            app.theme.name
        )
    } else {
        format!(
            " {} | WPM: {} | Acc: {}% | Mistakes: {} | Best: {} ",
            app.difficulty.as_str(),
            metrics.wpm,
            metrics.accuracy,
            metrics.mistakes,
            app.ranking.best_wpm()
        )
    };
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            " phrasedash ",
            Style::default()
                .fg(colors.header_fg())
                .bg(colors.header_bg())
                .add_modifier(Modifier::BOLD),
        ),
        Span::styled(
            header_info,
            Style::default()
                .fg(colors.text_pending())
                .bg(colors.header_bg()),
        ),
    ]))
    .block(Block::bordered().border_style(Style::default().fg(colors.border())))
    .style(Style::default().bg(colors.header_bg()));
    frame.render_widget(header, layout.header);

    frame.render_widget(TypingArea::new(&app.session, &app.theme), layout.typing);
    frame.render_widget(
        ProgressBar::from_metrics(metrics, app.session.phrase().len(), &app.theme),
        layout.progress,
    );

    match app.last_run.as_ref() {
        Some(run) if app.session.is_completed() => {
            frame.render_widget(ResultPanel::new(run, &app.theme), layout.result);
        }
        _ => {
            let status = Paragraph::new(app.status.as_str())
                .style(Style::default().fg(colors.fg()))
                .block(
                    Block::bordered()
                        .title(" Status ")
                        .border_style(Style::default().fg(colors.border())),
                );
            frame.render_widget(status, layout.result);
        }
    }

    if let Some(stats_area) = layout.stats {
        let new_best = app
            .last_run
            .as_ref()
            .is_some_and(|run| run.new_best && app.session.is_completed());
        frame.render_widget(
            StatsSidebar::new(metrics, started, app.ranking.best_wpm(), new_best, &app.theme),
            stats_area,
        );
    }

    frame.render_widget(
        Leaderboard::new(
            app.ranking.top_entries(LEADERBOARD_ROWS),
            app.confirm_clear,
            &app.theme,
        ),
        layout.leaderboard,
    );

    let hints = [
        "[Enter] next",
        "[Ctrl+R] restart",
        "[Tab] tier",
        "[Ctrl+T] theme",
        "[Ctrl+E] export",
        "[Ctrl+L] clear board",
        "[Esc] quit",
    ];
    let width = layout.footer.width.saturating_sub(2) as usize;
    let footer_lines: Vec<Line> = pack_hint_lines(&hints, width)
        .into_iter()
        .take(1)
        .map(|l| Line::from(Span::styled(l, Style::default().fg(colors.text_pending()))))
        .collect();
    let footer = Paragraph::new(footer_lines)
        .block(Block::bordered().border_style(Style::default().fg(colors.border())));
    frame.render_widget(footer, layout.footer);
}
