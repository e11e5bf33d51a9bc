use anyhow::{bail, Context, Result};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::path::Path;
use std::sync::Arc;

use tasktally::action::Action;
use tasktally::app::App;
use tasktally::host::{
    CommandTable, Editor, LogNotifier, MemoryEditor, MenuItems, Position, StdoutClipboard,
};
use tasktally::shared::{Config, Language};

const USAGE: &str = "usage: tasktally [-v] <command> [args]

commands:
  compute-total-time <file> [LINE:COL]
  insert-task-not-finished <file> [LINE:COL]
  insert-task-finished <file> [LINE:COL]
  insert-clock-time <file> [LINE:COL]
  copy-link <file> [LINE:COL]
  menu <file> [LINE:COL]
  commands
  set-language <en|zh_CN|system>
  set-auto-compute <on|off>";

#[tokio::main]
async fn main() -> Result<()> {
    let mut args: Vec<String> = std::env::args().skip(1).collect();
    let verbose = args.first().is_some_and(|arg| arg == "-v");
    if verbose {
        args.remove(0);
    }

    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    );

    let config_path = Config::config_path()?;
    let config = Config::load_from(&config_path)?;
    let mut app = App::new(config, Arc::new(LogNotifier), Arc::new(StdoutClipboard));

    let Some(command) = args.first().map(String::as_str) else {
        bail!("{USAGE}");
    };

    match command {
        "commands" => {
            let mut table = CommandTable::default();
            app.register_commands(&mut table);
            for command in &table.commands {
                println!("{}\t{}", command.id, command.name);
            }
        }
        "set-language" => {
            let language = match args.get(1).map(String::as_str) {
                Some("system") => None,
                Some(code) => Some(
                    Language::from_code(code)
                        .with_context(|| format!("unknown language {code:?}"))?,
                ),
                None => bail!("{USAGE}"),
            };
            let mut config = app.config().clone();
            config.set_language(language);
            config.save_to(&config_path)?;
            app.apply_config(config);
            println!("language: {}", app.config().language_display());
        }
        "set-auto-compute" => {
            let enabled = match args.get(1).map(String::as_str) {
                Some("on") => true,
                Some("off") => false,
                _ => bail!("{USAGE}"),
            };
            let mut config = app.config().clone();
            config.set_auto_compute(enabled);
            config.save_to(&config_path)?;
            app.apply_config(config);
            println!("auto compute: {}", if enabled { "on" } else { "off" });
        }
        "menu" => {
            let (editor, _) = open_document(&args)?;
            let mut menu = MenuItems::default();
            app.on_editor_menu(&mut menu, &editor);
            for item in &menu.items {
                println!("{}\t{}\t{}", item.icon, item.action.id(), item.title);
            }
        }
        id => {
            let Some(action) = Action::from_id(id) else {
                bail!("unknown command {id:?}\n\n{USAGE}");
            };
            let (mut editor, path) = open_document(&args)?;
            let before = editor.value();

            if let Some(write) = app.execute(action, &mut editor) {
                // The host outlives the command; wait so the process does not exit mid-write
                write.await?;
            }

            let after = editor.value();
            if after != before {
                tokio::fs::write(path, after)
                    .await
                    .with_context(|| format!("writing {path}"))?;
            }
        }
    }

    Ok(())
}

/// Load `<file> [LINE:COL]` from the arguments into an in-memory editor
fn open_document(args: &[String]) -> Result<(MemoryEditor, &str)> {
    let Some(path) = args.get(1) else {
        bail!("{USAGE}");
    };
    let text = std::fs::read_to_string(Path::new(path))
        .with_context(|| format!("reading {path}"))?;
    let editor = MemoryEditor::new(text);

    let cursor = match args.get(2) {
        Some(arg) => parse_position(arg)?,
        None => editor.end(),
    };
    log::debug!("Opened {path} with cursor at {cursor:?}");
    Ok((editor.with_cursor(cursor), path.as_str()))
}

/// `LINE:COL`, both one-based
fn parse_position(arg: &str) -> Result<Position> {
    let (line, col) = arg
        .split_once(':')
        .with_context(|| format!("expected LINE:COL, got {arg:?}"))?;
    let line: usize = line.parse().with_context(|| format!("bad line in {arg:?}"))?;
    let col: usize = col.parse().with_context(|| format!("bad column in {arg:?}"))?;
    if line == 0 || col == 0 {
        bail!("LINE and COL start at 1, got {arg:?}");
    }
    Ok(Position::new(line - 1, col - 1))
}
