use clap::Parser;
use colored::Colorize;
use directories::ProjectDirs;
use fernotes_core::{Document, Result, Workspace};
use std::fs;
use std::io::Read;
use std::path::{Path, PathBuf};

mod args;
use args::{Cli, Commands};

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    let db_path = cli
        .workspace
        .clone()
        .unwrap_or_else(default_workspace_path);
    if let Some(dir) = db_path.parent() {
        let _ = fs::create_dir_all(dir);
    }
    log::debug!("workspace database at {}", db_path.display());

    if let Err(e) = run(&cli, &db_path) {
        eprintln!("{} {}", "Error:".red(), e.user_message());
        std::process::exit(1);
    }
}

fn run(cli: &Cli, db_path: &Path) -> Result<()> {
    let mut workspace = Workspace::open(db_path)?;

    match &cli.command {
        Commands::Parse { file } => {
            let text = read_input(file)?;
            workspace.set_outline_text(&text);
            workspace.parse()?;
            print_tree(workspace.document());
        }
        Commands::Show => print_tree(workspace.document()),
        Commands::Text => println!("{}", workspace.outline_text()),
        Commands::Set {
            path,
            content,
            content_file,
            aliases,
        } => {
            let content = match (content, content_file) {
                (Some(inline), _) => Some(inline.clone()),
                (None, Some(file)) => Some(fs::read_to_string(file)?),
                (None, None) => None,
            };
            if let Some(content) = content {
                workspace.set_note_content(path, &content);
            }
            if let Some(aliases) = aliases {
                workspace.set_note_aliases(path, aliases);
            }
            workspace.save()?;
            println!("Note updated: {}", path.green());
        }
        Commands::Export { out } => {
            let json = workspace.export_json()?;
            if out == Path::new("-") {
                println!("{json}");
            } else {
                fs::write(out, json)?;
                println!("Exported to {}", out.display());
            }
        }
        Commands::Import { file } => {
            let json = fs::read_to_string(file)?;
            workspace.import_json(&json)?;
            println!(
                "Imported {} root notes",
                workspace.document().forest().roots().len()
            );
        }
    }

    Ok(())
}

fn read_input(file: &Path) -> Result<String> {
    if file == Path::new("-") {
        let mut buffer = String::new();
        std::io::stdin().read_to_string(&mut buffer)?;
        Ok(buffer)
    } else {
        Ok(fs::read_to_string(file)?)
    }
}

fn default_workspace_path() -> PathBuf {
    ProjectDirs::from("com", "fernotes", "fernotes")
        .map(|dirs| dirs.data_dir().join("fernotes.db"))
        .unwrap_or_else(|| PathBuf::from("fernotes.db"))
}

fn print_tree(document: &Document) {
    if document.forest().is_empty() {
        println!("No notes yet. Parse an outline first.");
        return;
    }
    for note in document.forest().walk() {
        let indent = "  ".repeat(note.level);
        if document.content(&note.path).is_some() {
            println!("{indent}{} {}", note.title.bold(), "✓".green());
        } else if note.has_warning {
            println!("{indent}{} {}", note.title.bold(), "⚠".yellow());
        } else {
            println!("{indent}{}", note.title.bold());
        }
    }
}
