//! folio CLI
//!
//! Drives the portfolio site's form and page behaviors from a terminal.

mod console;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use folio_forms::{
    render_contact_form, validate, Field, FormOrchestrator, FormSpec, OrchestratorConfig,
    SimulatedTransport, SubmitReport, ValidationResult,
};
use folio_site::{JsonFileStore, ProjectCard, ProjectFilter, Theme, ThemeController};

use crate::console::ConsoleSurface;

/// Contact form and page behaviors for the portfolio site.
#[derive(Parser)]
#[command(name = "folio")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate field values without submitting.
    Validate {
        #[command(flatten)]
        form: FormArgs,
    },

    /// Validate and submit the form through the simulated transport.
    Submit {
        #[command(flatten)]
        form: FormArgs,

        /// Make the transport fail with this reason.
        #[arg(long)]
        fail: Option<String>,

        /// Simulated network latency in milliseconds.
        #[arg(long, default_value_t = 1500)]
        latency_ms: u64,

        /// How long the status message stays up, in milliseconds.
        #[arg(long, env = "FOLIO_DISMISS_MS", default_value_t = 5000)]
        dismiss_ms: u64,
    },

    /// Print the form markup.
    Render {
        /// Form layout as JSON (the contact form if not specified).
        #[arg(long)]
        form: Option<PathBuf>,

        /// Form action URL.
        #[arg(long, default_value = "#")]
        action: String,

        /// Form method.
        #[arg(long, default_value = "post")]
        method: String,
    },

    /// Show or change the theme preference.
    Theme {
        /// Preference store file.
        #[arg(long, env = "FOLIO_THEME_STORE", default_value = ".folio-preferences.json")]
        store: PathBuf,

        /// Whether the system prefers a dark color scheme.
        #[arg(long)]
        system_dark: bool,

        #[command(subcommand)]
        action: ThemeAction,
    },

    /// Filter a list of projects by category.
    Filter {
        /// Projects as a JSON array of `{"title", "category"}` objects.
        #[arg(short, long)]
        projects: PathBuf,

        /// Category to show ("all" shows everything).
        #[arg(short, long, conflicts_with = "query")]
        category: Option<String>,

        /// Page query string to restore the filter from, e.g. `?filter=web`.
        #[arg(short, long)]
        query: Option<String>,
    },
}

#[derive(Subcommand)]
enum ThemeAction {
    /// Print the active theme.
    Show,
    /// Switch between light and dark.
    Toggle,
    /// Set a theme explicitly.
    Set {
        /// `light` or `dark`.
        theme: Theme,
    },
}

#[derive(clap::Args)]
struct FormArgs {
    /// Form layout as JSON (the contact form if not specified).
    #[arg(long)]
    form: Option<PathBuf>,

    /// Field value as `name=value`; repeat for each field.
    #[arg(short, long = "field", value_parser = parse_field)]
    fields: Vec<(String, String)>,
}

impl FormArgs {
    fn spec(&self) -> anyhow::Result<FormSpec> {
        load_spec(self.form.as_deref())
    }
}

fn parse_field(raw: &str) -> Result<(String, String), String> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim().to_string(), value.to_string()))
        .ok_or_else(|| format!("expected name=value, got '{raw}'"))
}

/// Rejects values for fields the form does not contain.
fn check_fields(fields: &[Field], values: &[(String, String)]) -> anyhow::Result<()> {
    for (name, _) in values {
        if !fields.iter().any(|f| f.name == *name) {
            bail!("unknown field: {name}");
        }
    }
    Ok(())
}

fn load_spec(path: Option<&Path>) -> anyhow::Result<FormSpec> {
    let Some(path) = path else {
        return Ok(FormSpec::contact());
    };
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("reading form layout {}", path.display()))?;
    Ok(FormSpec::from_json(&json)?)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let log_level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .without_time()
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Validate { form } => {
            let spec = form.spec()?;
            let mut fields = spec.build()?;
            check_fields(&fields, &form.fields)?;
            for (name, value) in form.fields {
                if let Some(field) = fields.iter_mut().find(|f| f.name == name) {
                    field.value = value;
                }
            }

            let mut invalid = 0;
            for field in &fields {
                match validate(field) {
                    ValidationResult::Valid => info!("  {}: ok", field.name),
                    ValidationResult::Invalid(reason) => {
                        invalid += 1;
                        warn!("  {}: {reason}", field.name);
                    }
                }
            }
            if invalid > 0 {
                bail!("{invalid} invalid field(s)");
            }
            info!("All fields valid.");
        }

        Commands::Submit {
            form,
            fail,
            latency_ms,
            dismiss_ms,
        } => {
            let spec = form.spec()?;
            check_fields(&spec.build()?, &form.fields)?;
            let mut transport =
                SimulatedTransport::new().latency(Duration::from_millis(latency_ms));
            if let Some(reason) = fail {
                transport = transport.failing(reason);
            }
            let config = OrchestratorConfig::new().dismiss_after_ms(dismiss_ms);

            let mut orchestrator =
                FormOrchestrator::new(&spec, ConsoleSurface::new(form.fields), transport)?
                    .config(config);

            let report = orchestrator.submit().await;

            // Keep running until the status message is dismissed.
            while let Some(deadline) = orchestrator.next_deadline() {
                tokio::time::sleep_until(tokio::time::Instant::from_std(deadline)).await;
                orchestrator.tick();
            }

            match report {
                SubmitReport::Succeeded(id) => info!("Attempt {id} delivered."),
                SubmitReport::Rejected(errors) => bail!("{} invalid field(s)", errors.len()),
                SubmitReport::Failed { id, error } => bail!("attempt {id} failed: {error}"),
                SubmitReport::Ignored => warn!("Submission ignored."),
            }
        }

        Commands::Render {
            form,
            action,
            method,
        } => {
            let fields = load_spec(form.as_deref())?.build()?;
            println!("{}", render_contact_form(&fields, None, &action, &method));
        }

        Commands::Theme {
            store,
            system_dark,
            action,
        } => {
            let store = JsonFileStore::open(&store)?;
            let mut controller = ThemeController::init(store, system_dark);

            let theme = match action {
                ThemeAction::Show => controller.theme(),
                ThemeAction::Toggle => controller.toggle()?,
                ThemeAction::Set { theme } => controller.set(theme)?,
            };
            println!("{theme}");
            if !controller.has_explicit_preference() {
                info!("Following the system color scheme.");
            }
        }

        Commands::Filter {
            projects,
            category,
            query,
        } => {
            let json = std::fs::read_to_string(&projects)
                .with_context(|| format!("reading projects {}", projects.display()))?;
            let cards: Vec<ProjectCard> = serde_json::from_str(&json)?;
            let mut filter = ProjectFilter::from_cards(cards);

            let updates = match (category, query) {
                (Some(category), _) => filter.apply(&category)?,
                (None, Some(query)) => filter
                    .apply_query(&query)
                    .with_context(|| format!("query '{query}' names no known filter"))?,
                (None, None) => filter.apply(folio_site::filter::ALL)?,
            };

            println!("\nFilter: {}", filter.active());
            println!("{:-<60}", "");
            for update in updates.iter().filter(|u| u.visible) {
                let card = &filter.cards()[update.index];
                println!(
                    "  {:<40} {:<10} +{}ms",
                    card.title,
                    card.category,
                    update.delay.as_millis()
                );
            }
            if let Some((key, value)) = filter.query_param() {
                println!("\nURL: ?{key}={value}");
            }
        }
    }

    Ok(())
}
