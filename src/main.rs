//! CLI entry point for star-binder
//!
//! Loads the base action maps, replays saved edits, and exposes listing,
//! conflict checks, manual binds and profile import/export.

use anyhow::Context;
use clap::{Parser, Subcommand};
use colored::*;
use star_binder::config::{write_atomic, StateStore};
use star_binder::core::keywords::{subcategories, CATEGORY_TAGS};
use star_binder::core::translator::display_bind;
use star_binder::core::{
    ActionFilter, ActionRecord, ActivationChoice, ActivationMode, BoundFilter, DeviceClass,
    KeywordDictionary, SubstringSearch,
};
use star_binder::editor::BindEditor;
use star_binder::xml::{load_base_config, DEFAULT_PROFILE_NAME};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "star-binder")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base action map document shipped with the game
    #[arg(long, global = true, default_value = "~/.config/star-binder/actionmaps.xml")]
    actionmaps: PathBuf,

    /// Keyword dictionary (labels, descriptions, tags)
    #[arg(long, global = true, default_value = "~/.config/star-binder/keybinds.json")]
    keywords: PathBuf,

    /// Saved bind state
    #[arg(long, global = true, default_value = "~/.config/star-binder/bindings.json")]
    state: PathBuf,

    /// Device class to work on (keyboard, mouse, controller, joystick)
    #[arg(short, long, global = true, default_value = "keyboard")]
    device: DeviceClass,

    /// More log output (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List actions shown under the device class
    List {
        /// Only actions with a bind
        #[arg(long, conflicts_with = "unbound")]
        bound: bool,

        /// Only actions without a bind
        #[arg(long)]
        unbound: bool,

        /// Only actions carrying this tag (repeatable)
        #[arg(short, long)]
        tag: Vec<String>,

        /// Search name, label, description and tags
        #[arg(short, long, default_value = "")]
        search: String,

        /// Only actions sharing a bind with another action
        #[arg(long)]
        conflicts: bool,
    },

    /// Show every slot of one action
    Show { action: String },

    /// Check for binds shared by several actions
    Conflicts,

    /// Bind an action by typing `[<device index>:]<bind>`
    Bind { action: String, entry: String },

    /// Set the activation mode (a mode name, or `default`)
    Mode { action: String, mode: String },

    /// Unbind an action
    Clear { action: String },

    /// Unbind every action of the device class
    ClearAll,

    /// Write a game profile
    Export {
        output: PathBuf,

        #[arg(short, long, default_value = DEFAULT_PROFILE_NAME)]
        profile: String,
    },

    /// Apply a game profile
    Import { input: PathBuf },

    /// List filter categories and their sub-tags
    Tags,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match &cli.command {
        Commands::Tags => {
            list_tags();
            return Ok(());
        }
        Commands::Export { output, profile } => {
            let editor = open_editor(&cli)?;
            let path = expand(output)?;
            let xml = editor.export_xml(profile)?;
            write_atomic(&path, &xml)?;
            println!("{} Exported profile to {}", "✓".green(), path.display());
        }
        Commands::Import { input } => {
            let mut editor = open_editor(&cli)?;
            let path = expand(input)?;
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            let report = editor.import_xml(&content)?;

            println!("{} Imported {} actions", "✓".green(), report.applied.len());
            for name in &report.not_found {
                println!("  {} {} not in base configuration", "⚠".yellow(), name);
            }
        }
        Commands::List {
            bound,
            unbound,
            tag,
            search,
            conflicts,
        } => {
            let editor = open_editor(&cli)?;
            let filter = ActionFilter {
                bound: match (*bound, *unbound) {
                    (true, _) => BoundFilter::Bound,
                    (_, true) => BoundFilter::Unbound,
                    _ => BoundFilter::All,
                },
                tags: tag.clone(),
                query: search.clone(),
                conflicts_only: *conflicts,
            };
            list_actions(&editor, &filter);
        }
        Commands::Show { action } => {
            let editor = open_editor(&cli)?;
            let record = editor
                .record(action)
                .with_context(|| format!("Action '{}' not found", action))?;
            show_action(record);
        }
        Commands::Conflicts => {
            let editor = open_editor(&cli)?;
            check_conflicts(&editor);
        }
        Commands::Bind { action, entry } => {
            let mut editor = open_editor(&cli)?;
            let state = editor.apply_manual_entry(action, entry)?;
            println!(
                "{} {} ({}) → {} on device {}",
                "✓".green(),
                action,
                cli.device,
                state.input.cyan().bold(),
                state.device_index
            );
            let shared = editor.sharing_bind(action);
            if !shared.is_empty() {
                println!(
                    "{} {}",
                    "⚠ This bind is shared with:".yellow(),
                    shared.join(", ")
                );
            }
        }
        Commands::Mode { action, mode } => {
            let mut editor = open_editor(&cli)?;
            let choice: ActivationChoice = mode.parse()?;
            if let ActivationChoice::Named(name) = &choice {
                log::warn!("'{}' is not a known activation mode", name);
            }
            let applied = editor.set_activation_mode(action, &choice)?;
            println!("{} {} activation mode: {}", "✓".green(), action, mode_label(&applied));
        }
        Commands::Clear { action } => {
            let mut editor = open_editor(&cli)?;
            editor.clear_bind(action)?;
            println!("{} Cleared {} ({})", "✓".green(), action, cli.device);
        }
        Commands::ClearAll => {
            let mut editor = open_editor(&cli)?;
            let cleared = editor.clear_all();
            println!("{} Cleared {} {} binds", "✓".green(), cleared, cli.device);
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

/// Expand tilde and environment variables in a path
fn expand(path: &Path) -> anyhow::Result<PathBuf> {
    let raw = path
        .to_str()
        .ok_or_else(|| anyhow::anyhow!("Invalid path encoding"))?;
    let expanded = shellexpand::full(raw).with_context(|| format!("Cannot expand {}", raw))?;
    Ok(PathBuf::from(expanded.as_ref()))
}

/// Loads base records, replays saved edits and wires the state store as hook
fn open_editor(cli: &Cli) -> anyhow::Result<BindEditor> {
    let keywords = KeywordDictionary::load_or_empty(&expand(&cli.keywords)?);
    let actionmaps = expand(&cli.actionmaps)?;
    let actions = load_base_config(&actionmaps, &keywords)
        .with_context(|| format!("Cannot load base configuration {}", actionmaps.display()))?;

    let store = StateStore::new(expand(&cli.state)?)?;
    let saved = match store.load() {
        Ok(saved) => saved,
        Err(e) => {
            log::error!("Ignoring saved state: {}", e);
            None
        }
    };

    let mut editor = BindEditor::new(actions, Box::new(store));
    if let Some(saved) = saved {
        editor.replay_state(&saved);
    }
    editor.set_device(cli.device);
    Ok(editor)
}

fn mode_label(mode: &str) -> String {
    match ActivationMode::from_name(mode) {
        Some(known) => known.label().to_string(),
        None if mode.is_empty() => "(game default)".to_string(),
        None => mode.to_string(),
    }
}

fn format_bind(bind: &str) -> String {
    if bind.is_empty() {
        "unbound".dimmed().to_string()
    } else {
        display_bind(bind).join(" + ").cyan().bold().to_string()
    }
}

fn list_actions(editor: &BindEditor, filter: &ActionFilter) {
    let device = editor.device();
    let records = editor.filtered(filter, &SubstringSearch);

    println!(
        "{}",
        format!("{} actions ({}, {})\n", device, filter.bound, records.len()).bold()
    );

    for record in &records {
        let marker = if editor.has_conflict(record.action_name()) {
            "⚠".yellow().to_string()
        } else {
            " ".to_string()
        };
        println!(
            "{} {:<40} {} {}",
            marker,
            record.display_name(),
            format_bind(record.bind(device)),
            record.action_name().dimmed()
        );
    }
}

fn show_action(record: &ActionRecord) {
    println!("{}", record.display_name().bold());
    println!("  {}", record.description());
    println!(
        "  {} {} / {}",
        "map:".dimmed(),
        record.action_map_name(),
        record.action_name()
    );
    if !record.keyword_tags().is_empty() {
        println!("  {} {}", "tags:".dimmed(), record.keyword_tags().join(", "));
    }
    println!();

    for device in DeviceClass::ALL {
        let slot = record.slot(device);
        if !slot.is_bindable() && !slot.is_bound() {
            println!("  {:<11} {}", device.to_string(), "not bindable".dimmed());
            continue;
        }
        println!(
            "  {:<11} {} {} {}",
            device.to_string(),
            format_bind(slot.input()),
            format!("[{}]", slot.console_placeholder()).dimmed(),
            mode_label(slot.activation_mode()).magenta()
        );
    }
}

/// Print shared binds for the focused device class
fn check_conflicts(editor: &BindEditor) {
    let detector = editor.conflict_detector();
    let conflicts = detector.find_conflicts();

    if conflicts.is_empty() {
        println!(
            "{} {} ({} bound actions checked)",
            "✓".green().bold(),
            "No conflicts detected!".bold(),
            detector.total_binds()
        );
        return;
    }

    println!(
        "{} Found {} conflict{} among {} bound actions on {}:\n",
        "✗".red().bold(),
        conflicts.len(),
        if conflicts.len() == 1 { "" } else { "s" },
        detector.total_binds(),
        editor.device()
    );

    for (i, conflict) in conflicts.iter().enumerate() {
        println!(
            "{} {}",
            format!("Conflict {}", i + 1).yellow().bold(),
            format_bind(&conflict.bind)
        );
        for (idx, name) in conflict.action_names.iter().enumerate() {
            let label = editor
                .record(name)
                .map(|r| r.display_name().to_string())
                .unwrap_or_default();
            println!("  {} {} {}", format!("{}.", idx + 1).dimmed(), label, name.dimmed());
        }
        println!();
    }
}

fn list_tags() {
    for tag in CATEGORY_TAGS {
        println!("{}", tag.bold());
        for sub in subcategories(tag) {
            println!("  {}", sub);
        }
    }
}
