//! YoSurvey - local survey form with a stats dashboard
//!
//! A CLI tool that collects survey responses into a local JSON store,
//! lets viewers toggle emoji reactions, exports the collection, and renders
//! an aggregate-statistics dashboard.
//!
//! Exit codes:
//!   0 - Success
//!   1 - Runtime error (config, IO, invalid import, etc.)
//!   2 - Submission blocked by validation errors

mod analysis;
mod cli;
mod config;
mod i18n;
mod models;
mod report;
mod store;
mod validation;

use anyhow::{Context, Result};
use chrono::Utc;
use cli::{Args, Command, StatsFormat, ThemeChoice};
use config::{Config, CONFIG_FILE_NAME};
use i18n::{Language, Msg};
use models::{Favorite, ResponseDraft, SurveyResponse};
use std::io::{BufRead, Write};
use std::path::PathBuf;
use store::error::StoreError;
use store::{FileBackend, Preferences, ResponseBook, Store, SubmitError, Theme, RESPONSES_KEY};
use tracing::{debug, error, info, warn};
use tracing_subscriber::FmtSubscriber;

fn main() -> Result<()> {
    // Parse command-line arguments
    let args = Args::parse_args();

    // Validate arguments
    if let Err(e) = args.validate() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }

    // Handle --init-config early (no logging needed)
    if args.init_config {
        return handle_init_config();
    }

    // Config comes first so `general.verbose` can set the log level
    let mut config = match load_config(&args) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    config.merge_with_args(&args);

    init_logging(&args, config.general.verbose);

    debug!("YoSurvey v{}", env!("CARGO_PKG_VERSION"));
    debug!("Arguments: {:?}", args);
    debug!("Config: {:?}", config);

    match run(args, config) {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            error!("Command failed: {:#}", e);
            eprintln!("\n❌ Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

/// Handle --init-config: generate a default .yosurvey.toml.
fn handle_init_config() -> Result<()> {
    let path = std::path::Path::new(CONFIG_FILE_NAME);

    if path.exists() {
        eprintln!(
            "⚠️  {} already exists. Remove it first or edit it manually.",
            CONFIG_FILE_NAME
        );
        std::process::exit(1);
    }

    let content = Config::default_toml();
    std::fs::write(path, &content)
        .with_context(|| format!("Failed to write {}", CONFIG_FILE_NAME))?;

    println!("✅ Created {} with default settings.", CONFIG_FILE_NAME);
    println!("   Edit it to change the store location, language and dashboard.");
    Ok(())
}

/// Initialize logging based on verbosity settings.
///
/// Logs go to stderr so `stats --format json` output stays parseable.
fn init_logging(args: &Args, verbose_by_default: bool) {
    let level = args.log_level(verbose_by_default);

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .compact()
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
    }
}

/// Load configuration from file or use defaults.
///
/// Runs before logging is set up, so problems go straight to stderr.
fn load_config(args: &Args) -> Result<Config> {
    if let Some(ref config_path) = args.config {
        return Config::load(config_path);
    }

    match Config::load_default() {
        Ok(Some(config)) => Ok(config),
        Ok(None) => Ok(Config::default()),
        Err(e) => {
            if !args.quiet {
                eprintln!("⚠️  Failed to load {}: {:#}", CONFIG_FILE_NAME, e);
            }
            Ok(Config::default())
        }
    }
}

/// Ask a yes/no question on stdin. `assume_yes` skips the prompt.
fn confirm(question: &str, assume_yes: bool) -> Result<bool> {
    if assume_yes {
        return Ok(true);
    }

    print!("❓ {} [y/N] ", question);
    std::io::stdout().flush().context("Failed to flush stdout")?;

    let mut answer = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut answer)
        .context("Failed to read confirmation")?;

    Ok(matches!(
        answer.trim().to_lowercase().as_str(),
        "y" | "yes" | "s" | "si" | "sí"
    ))
}

/// Run the selected command. Returns the exit code.
fn run(args: Args, config: Config) -> Result<i32> {
    let store_path = config.store_path();
    info!("Using store: {}", store_path.display());
    let mut store = Store::new(FileBackend::new(&store_path));

    let (lang, theme) = {
        let prefs = Preferences::new(&mut store);
        let lang = args
            .lang
            .unwrap_or_else(|| prefs.language(config.general.language));
        let theme = prefs.theme(Theme::from_dark(config.general.dark_mode));
        (lang, theme)
    };
    debug!("Language: {}, theme: {:?}", lang, theme);

    // Recompute the dashboard headline whenever the collection changes.
    let quiet = args.quiet;
    store.subscribe(RESPONSES_KEY, move |value| {
        let responses: Vec<SurveyResponse> = match serde_json::from_value(value.clone()) {
            Ok(responses) => responses,
            Err(e) => {
                warn!("Could not decode updated responses: {}", e);
                return;
            }
        };
        let stats = analysis::summarize(&responses, Utc::now(), lang);
        if !quiet {
            println!("📊 {}", analysis::generate_summary_text(&stats, lang));
        }
    });

    let Some(command) = args.command.clone() else {
        return Ok(1);
    };

    match command {
        Command::Submit {
            name,
            age,
            satisfaction,
            favorite,
            other,
            notes,
        } => {
            let favorite = match (favorite, other) {
                (_, Some(text)) => Favorite::FreeText(text),
                (Some(category), None) => Favorite::Category(category),
                (None, None) => Favorite::Category(config.survey.default_favorite),
            };
            let draft = ResponseDraft {
                name,
                age,
                satisfaction: satisfaction.unwrap_or(config.survey.default_satisfaction),
                favorite,
                notes,
            };
            handle_submit(&mut store, draft, lang)
                .with_context(|| format!("Failed to save response to {}", store_path.display()))
        }

        Command::List { limit } => {
            let responses = ResponseBook::new(&mut store).responses();
            let limit = limit.or(match config.dashboard.list_limit {
                0 => None,
                n => Some(n),
            });
            print!("{}", report::render_response_list(&responses, lang, limit));
            Ok(0)
        }

        Command::React { id, reaction } => {
            let toggled = ResponseBook::new(&mut store)
                .toggle_reaction(id, reaction)
                .with_context(|| format!("Failed to save reaction to {}", store_path.display()))?;
            match toggled {
                Some(true) => println!("✅ {} {}", Msg::ReactionAdded.text(lang), reaction),
                Some(false) => println!("✅ {} {}", Msg::ReactionRemoved.text(lang), reaction),
                None => {
                    eprintln!("⚠️  {}: {}", Msg::ResponseNotFound.text(lang), id);
                    return Ok(1);
                }
            }
            Ok(0)
        }

        Command::Delete { id } => {
            let mut book = ResponseBook::new(&mut store);
            let Some(response) = book.find(id) else {
                eprintln!("⚠️  {}: {}", Msg::ResponseNotFound.text(lang), id);
                return Ok(1);
            };

            print!("{}", report::render_response(&response, lang));
            if !confirm(Msg::ConfirmDelete.text(lang), args.yes)? {
                println!("{}", Msg::Cancelled.text(lang));
                return Ok(0);
            }

            book.delete(id)
                .with_context(|| format!("Failed to save deletion to {}", store_path.display()))?;
            println!("✅ {}", Msg::ResponseDeleted.text(lang));
            Ok(0)
        }

        Command::Clear => {
            if !confirm(Msg::ConfirmClearAll.text(lang), args.yes)? {
                println!("{}", Msg::Cancelled.text(lang));
                return Ok(0);
            }

            ResponseBook::new(&mut store)
                .clear_all()
                .with_context(|| format!("Failed to clear responses in {}", store_path.display()))?;
            println!("✅ {}", Msg::AllResponsesCleared.text(lang));
            Ok(0)
        }

        Command::Export { output } => {
            let path = output.unwrap_or_else(|| PathBuf::from(&config.export.file_name));
            let responses = ResponseBook::new(&mut store).responses();
            report::write_export(&responses, &path)?;
            println!(
                "✅ {} {} ({})",
                Msg::Exported.text(lang),
                path.display(),
                responses.len()
            );
            Ok(0)
        }

        Command::Import { path } => {
            let imported = report::read_import(&path)?;
            let mut book = ResponseBook::new(&mut store);

            if !book.responses().is_empty()
                && !confirm(Msg::ConfirmImportReplace.text(lang), args.yes)?
            {
                println!("{}", Msg::Cancelled.text(lang));
                return Ok(0);
            }

            book.replace_all(&imported).with_context(|| {
                format!("Failed to save imported responses to {}", store_path.display())
            })?;
            println!("✅ {} ({})", Msg::Imported.text(lang), imported.len());
            Ok(0)
        }

        Command::Stats { format } => {
            let responses = ResponseBook::new(&mut store).responses();
            let stats = analysis::summarize(&responses, Utc::now(), lang);

            match format {
                StatsFormat::Json => {
                    let json = serde_json::to_string_pretty(&stats)
                        .context("Failed to serialize statistics")?;
                    println!("{}", json);
                }
                StatsFormat::Text => print!(
                    "{}",
                    report::render_dashboard(
                        &stats,
                        lang,
                        theme,
                        config.dashboard.chart_width,
                        config.dashboard.show_charts,
                    )
                ),
            }
            Ok(0)
        }

        Command::Report { output } => {
            let responses = ResponseBook::new(&mut store).responses();
            let now = Utc::now();
            let stats = analysis::summarize(&responses, now, lang);
            let metadata = report::ReportMetadata {
                generated_at: now,
                store_path: store_path.display().to_string(),
                language: lang,
                chart_width: config.dashboard.chart_width,
            };

            report::write_report(&responses, &stats, &metadata, &output)?;
            println!("✅ Report saved to: {}", output.display());
            Ok(0)
        }

        Command::Theme { mode } => {
            let fallback = Theme::from_dark(config.general.dark_mode);
            let mut prefs = Preferences::new(&mut store);
            let theme = match mode {
                None => prefs.theme(fallback),
                Some(ThemeChoice::Toggle) => prefs.toggle_theme(fallback),
                Some(ThemeChoice::Dark) => {
                    prefs.set_theme(Theme::Dark);
                    Theme::Dark
                }
                Some(ThemeChoice::Light) => {
                    prefs.set_theme(Theme::Light);
                    Theme::Light
                }
            };
            let msg = match theme {
                Theme::Dark => Msg::ThemeDark,
                Theme::Light => Msg::ThemeLight,
            };
            println!("{} {}", if theme.is_dark() { "🌙" } else { "☀️" }, msg.text(lang));
            Ok(0)
        }

        Command::Lang { language } => {
            let mut prefs = Preferences::new(&mut store);
            let current = match language {
                Some(new_lang) => {
                    prefs.set_language(new_lang);
                    new_lang
                }
                None => prefs.language(config.general.language),
            };
            println!("🌐 {}", Msg::LanguageSet.text(current));
            Ok(0)
        }
    }
}

/// Validate and store a draft. Returns 2 when validation blocks it.
fn handle_submit(
    store: &mut Store<FileBackend>,
    draft: ResponseDraft,
    lang: Language,
) -> Result<i32, StoreError> {
    match ResponseBook::new(store).submit(draft, Utc::now(), lang) {
        Ok(response) => {
            println!(
                "✅ {} (#{})",
                Msg::ThanksForResponse.text(lang),
                response.id
            );
            Ok(0)
        }
        Err(SubmitError::Store(e)) => Err(e),
        Err(SubmitError::Invalid(errors)) => {
            eprintln!("❌ {}", Msg::FixErrorsFirst.text(lang));
            for e in &errors {
                debug!("Validation failed: {}", e);
                eprintln!("   - {}: {}", e.field(), e.message(lang));
            }
            Ok(2)
        }
    }
}
