use anyhow::{Context, Result, bail};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState, Paragraph},
};
use relative_path::RelativePathBuf;
use std::{
    env,
    io::{Stdout, stdout},
    path::{Path, PathBuf},
    process,
};
use trd_outline_config::Config;
use trd_outline_engine::{
    ContentItem, DirectorySink, DocumentFile, DocumentFormat, ParseOptions, ParsedDocument,
    Section,
    export::{export_analysis, export_document},
    io, render,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum View {
    Content,
    Outline,
}

/// One row of the document list: a parsed document or a file that failed to load.
struct Entry {
    title: String,
    document: Result<ParsedDocument, String>,
}

struct App {
    entries: Vec<Entry>,
    list_state: ListState,
    view: View,
    current_content: Vec<String>,
}

impl App {
    fn new(root: &Path, files: Vec<DocumentFile>, options: &ParseOptions) -> Self {
        let mut entries = Vec::new();
        for file in files {
            match io::read_parsed(&file, root, options) {
                Ok(documents) => entries.extend(documents.into_iter().map(|document| Entry {
                    title: document.title.clone(),
                    document: Ok(document),
                })),
                Err(e) => {
                    log::warn!("skipping {}: {e}", file.relative_path());
                    entries.push(Entry {
                        title: file.display_name().to_string(),
                        document: Err(e.to_string()),
                    });
                }
            }
        }

        let mut app = Self {
            entries,
            list_state: ListState::default(),
            view: View::Content,
            current_content: Vec::new(),
        };

        if !app.entries.is_empty() {
            app.list_state.select(Some(0));
            app.update_content_for_selection();
        }

        app
    }

    fn next_document(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1) % self.entries.len(),
            None => 0,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn previous_document(&mut self) {
        if self.entries.is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(0) | None => self.entries.len() - 1,
            Some(i) => i - 1,
        };
        self.list_state.select(Some(i));
        self.update_content_for_selection();
    }

    fn toggle_view(&mut self) {
        self.view = match self.view {
            View::Content => View::Outline,
            View::Outline => View::Content,
        };
        self.update_content_for_selection();
    }

    fn update_content_for_selection(&mut self) {
        let Some(entry) = self.list_state.selected().and_then(|i| self.entries.get(i)) else {
            return;
        };

        self.current_content = match &entry.document {
            Ok(document) if document.sections.is_empty() => {
                vec!["No sections found in this document".to_string()]
            }
            Ok(document) => match self.view {
                View::Content => content_lines(&document.sections),
                View::Outline => outline_lines(&document.sections),
            },
            Err(e) => vec![format!("Error reading document: {e}")],
        };
    }
}

fn content_lines(sections: &[Section]) -> Vec<String> {
    let mut lines = Vec::new();

    for section in sections {
        lines.push(format!(
            "{}. {}  [{}]",
            section.number, section.title, section.section_type
        ));
        push_items(&mut lines, &section.content, "  ");

        for sub in &section.subsections {
            lines.push(format!("  {} {}", sub.number, sub.title));
            push_items(&mut lines, &sub.content, "    ");
        }
        lines.push(String::new());
    }

    lines
}

fn push_items(lines: &mut Vec<String>, items: &[ContentItem], indent: &str) {
    for item in items {
        match item {
            ContentItem::Text { content } | ContentItem::BoldText { content } => {
                lines.push(format!("{indent}{content}"))
            }
            ContentItem::BulletList { content } => lines.push(format!("{indent}• {content}")),
            ContentItem::NumberedList { content } => lines.push(format!("{indent}# {content}")),
            ContentItem::CodeBlock { content } => lines.push(format!("{indent}│ {content}")),
            ContentItem::Requirement { id, content } => {
                lines.push(format!("{indent}[{id}] {content}"))
            }
            ContentItem::Table(table) => lines.extend(
                table
                    .raw_content
                    .iter()
                    .map(|row| format!("{indent}{row}")),
            ),
        }
    }
}

fn outline_lines(sections: &[Section]) -> Vec<String> {
    let mut lines: Vec<String> = render::outline(sections)
        .iter()
        .map(|entry| {
            let indent = "  ".repeat(usize::from(entry.depth.saturating_sub(1)));
            format!(
                "{indent}{} {}  [{}]",
                entry.number, entry.title, entry.section_type
            )
        })
        .collect();

    let summary = render::summary(sections);
    lines.push(String::new());
    lines.push(format!(
        "{} sections, {} subsections",
        summary.sections, summary.subsections
    ));
    lines.extend(
        summary
            .items
            .iter()
            .map(|(kind, count)| format!("  {kind}: {count}")),
    );
    if !summary.requirement_ids.is_empty() {
        lines.push(format!("Requirements: {}", summary.requirement_ids.join(", ")));
    }

    lines
}

/// Splits a file path into its directory and a document file relative to it.
fn document_at(path: &Path) -> Result<(PathBuf, DocumentFile)> {
    let name = path
        .file_name()
        .and_then(|n| n.to_str())
        .with_context(|| format!("'{}' is not a file path", path.display()))?;
    let root = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    Ok((root, DocumentFile::new(RelativePathBuf::from(name))))
}

fn parse_options(config: Option<&Config>) -> ParseOptions {
    ParseOptions {
        keep_preamble: config.is_some_and(|c| c.keep_preamble),
    }
}

fn load_config() -> Option<Config> {
    match Config::load() {
        Ok(config) => config,
        Err(e) => {
            log::warn!("ignoring config: {e}");
            None
        }
    }
}

fn print_usage(program: &str) {
    eprintln!("Usage:");
    eprintln!("  {program} [documents-folder-or-file]");
    eprintln!("  {program} json <document>");
    eprintln!("  {program} export <document> [output-dir]");
}

fn main() -> Result<()> {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Warn)
        .init();

    let args: Vec<String> = env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("trd-outline-cli");

    match args.get(1).map(String::as_str) {
        Some("json") if args.len() == 3 => print_json(Path::new(&args[2])),
        Some("export") if (3..=4).contains(&args.len()) => {
            export(Path::new(&args[2]), args.get(3).map(PathBuf::from))
        }
        Some("json" | "export" | "-h" | "--help") => {
            print_usage(program);
            process::exit(1);
        }
        _ if args.len() <= 2 => view(program, args.get(1).map(PathBuf::from)),
        _ => {
            print_usage(program);
            process::exit(1);
        }
    }
}

fn print_json(path: &Path) -> Result<()> {
    let config = load_config();
    let (root, file) = document_at(path)?;
    let documents = io::read_parsed(&file, &root, &parse_options(config.as_ref()))?;

    let json = match file.format() {
        DocumentFormat::Text => {
            let sections = documents.into_iter().flat_map(|d| d.sections);
            serde_json::to_string_pretty(&sections.collect::<Vec<_>>())?
        }
        DocumentFormat::Analysis => {
            let by_kind: serde_json::Map<String, serde_json::Value> = documents
                .into_iter()
                .filter_map(|d| Some((d.kind?.suffix().to_string(), d.sections)))
                .map(|(kind, sections)| serde_json::to_value(sections).map(|v| (kind, v)))
                .collect::<Result<_, _>>()?;
            serde_json::to_string_pretty(&by_kind)?
        }
    };
    println!("{json}");
    Ok(())
}

fn export(path: &Path, out_dir: Option<PathBuf>) -> Result<()> {
    let config = load_config();
    let Some(out_dir) = out_dir.or_else(|| config.as_ref().and_then(|c| c.export_dir.clone()))
    else {
        bail!(
            "No output directory given and no export_dir set in {}",
            Config::config_path().display()
        );
    };

    let options = parse_options(config.as_ref());
    let (root, file) = document_at(path)?;
    let mut sink = DirectorySink::new(&out_dir);

    let written = match file.format() {
        DocumentFormat::Text => {
            let text = io::read_document(file.relative_path(), &root)?;
            export_document(file.display_name(), &text, &mut sink, &options)?
        }
        DocumentFormat::Analysis => {
            let payload = io::load_analysis(path)?;
            export_analysis(file.display_name(), &payload, &mut sink, &options)?
        }
    };

    for name in written {
        println!("{}", out_dir.join(name).display());
    }
    Ok(())
}

fn view(program: &str, path: Option<PathBuf>) -> Result<()> {
    let config = load_config();
    let config_path = Config::config_path();

    let (path, from_config) = match (path, &config) {
        (Some(path), _) => (path, false),
        (None, Some(config)) => (config.documents_path.clone(), true),
        (None, None) => {
            eprintln!("Error: No documents path provided and no config file found");
            print_usage(program);
            eprintln!("Or create a config file at {}", config_path.display());
            process::exit(1);
        }
    };

    let options = parse_options(config.as_ref());
    let (root, files) = if path.is_file() {
        let (root, file) = document_at(&path)?;
        (root, vec![file])
    } else {
        match io::scan_documents(&path) {
            Ok(files) => (path, files),
            Err(e) => {
                let source = if from_config {
                    format!(" from config file '{}'", config_path.display())
                } else {
                    String::new()
                };
                eprintln!(
                    "Error: Documents path '{}'{} is invalid: {e}",
                    path.display(),
                    source
                );
                process::exit(1);
            }
        }
    };
    log::info!("found {} document file(s) in {}", files.len(), root.display());

    let mut app = App::new(&root, files, &options);

    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        println!("{err:?}");
    }

    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<Stdout>>, app: &mut App) -> Result<()> {
    loop {
        terminal.draw(|f| ui(f, app))?;

        if let Event::Key(key) = event::read()? {
            match key.code {
                KeyCode::Char('q') => return Ok(()),
                KeyCode::Down | KeyCode::Char('j') => app.next_document(),
                KeyCode::Up | KeyCode::Char('k') => app.previous_document(),
                KeyCode::Tab | KeyCode::Char('o') => app.toggle_view(),
                _ => {}
            }
        }
    }
}

fn ui(f: &mut Frame, app: &mut App) {
    let chunks = Layout::default()
        .direction(Direction::Horizontal)
        .margin(1)
        .constraints([Constraint::Percentage(30), Constraint::Percentage(70)].as_ref())
        .split(f.area());

    let items: Vec<ListItem> = app
        .entries
        .iter()
        .map(|entry| {
            let icon = if entry.document.is_ok() { "📄 " } else { "⚠ " };
            ListItem::new(vec![Line::from(vec![Span::raw(format!(
                "{icon}{}",
                entry.title
            ))])])
        })
        .collect();

    let documents_list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title("Documents"))
        .highlight_style(Style::default().bg(Color::Yellow).fg(Color::Black));

    f.render_stateful_widget(documents_list, chunks[0], &mut app.list_state);

    let content_text = if app.current_content.is_empty() {
        vec![Line::from("Select a document to view its sections")]
    } else {
        app.current_content
            .iter()
            .map(|line| Line::from(vec![Span::raw(line.clone())]))
            .collect()
    };

    let title = match app.view {
        View::Content => "Sections",
        View::Outline => "Outline",
    };
    let content = Paragraph::new(content_text)
        .block(Block::default().borders(Borders::ALL).title(title))
        .wrap(ratatui::widgets::Wrap { trim: false });

    f.render_widget(content, chunks[1]);

    let help_text = Line::from(vec![
        Span::raw("q: Quit | "),
        Span::raw("↑/k: Previous | "),
        Span::raw("↓/j: Next | "),
        Span::raw("Tab/o: Sections/Outline"),
    ]);

    let help = Paragraph::new(vec![help_text]).block(Block::default());

    let bottom_chunk = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(3)].as_ref())
        .split(f.area());

    f.render_widget(help, bottom_chunk[1]);
}
