use anyhow::{anyhow, Context};
use clap::{Parser, Subcommand};
use std::path::{Path, PathBuf};
use studio_core::assist::Assistant;
use studio_core::catalog::{self, SelectKind};
use studio_core::export::{to_pretty_json, write_json, write_text};
use studio_core::form::{FormState, MultiSelect};
use studio_core::gemini::{GeminiClient, GeminiConfig, InlineImage};
use studio_core::mapper::{apply_suggestion, generate, hydrate_str};
use studio_core::protocol::{PromptDocument, ValidationStatus};
use studio_core::schema;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "studio_cli", about = "Build ASMR video prompts as JSON")]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Gemini model for the AI helpers (defaults to GEMINI_MODEL or gemini-2.5-flash).
    #[arg(long, global = true)]
    model: Option<String>,

    /// Read the Gemini API key from a file instead of GEMINI_API_KEY.
    #[arg(long, global = true, value_name = "PATH")]
    api_key_file: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every option set; the default of single-select sets is marked.
    Catalog,
    /// Write an all-defaults form file.
    New {
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Toggle one entry of a multi-select field in a form file.
    Toggle {
        #[arg(long, value_name = "FILE")]
        form: PathBuf,
        /// moods, visualEffects, soundscapeSecondary, asmrTriggers or materials.
        #[arg(long)]
        field: String,
        #[arg(long)]
        item: String,
    },
    /// Build the prompt JSON from a form file.
    Generate {
        #[arg(long, value_name = "FILE")]
        form: PathBuf,
        /// Write `<idea>.json` into this directory instead of printing.
        #[arg(long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        self_test: bool,
    },
    /// Run the schema self-test on a prompt JSON file.
    Validate { file: PathBuf },
    /// Turn a prompt JSON file back into a form file.
    Hydrate {
        file: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
    /// Expand the idea into a title and description.
    Enhance {
        #[arg(long, value_name = "FILE")]
        form: PathBuf,
    },
    /// Let the model pick settings for the idea and description.
    Suggest {
        #[arg(long, value_name = "FILE")]
        form: PathBuf,
    },
    /// Seed idea, description and settings from an image.
    SeedImage {
        #[arg(long, value_name = "FILE")]
        form: PathBuf,
        #[arg(long, value_name = "PATH")]
        image: PathBuf,
    },
    /// Ask the model to improve a prompt JSON; the form is updated when the result passes the self-test.
    Refine {
        #[arg(long, value_name = "FILE")]
        form: PathBuf,
        #[arg(long)]
        instructions: Option<String>,
    },
    /// Write a prose paragraph describing the prompt.
    Narrative {
        #[arg(long, value_name = "FILE")]
        form: PathBuf,
        #[arg(long, value_name = "FILE")]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();

    match &args.command {
        Command::Catalog => print_catalog(),
        Command::New { out } => {
            let text = serde_json::to_string_pretty(&FormState::default())?;
            match out {
                Some(path) => {
                    write_text(path, &text)?;
                    eprintln!("wrote {}", path.display());
                }
                None => println!("{text}"),
            }
        }
        Command::Toggle { form, field, item } => {
            let field = MultiSelect::from_key(field).ok_or_else(|| match catalog::entry(field) {
                Some(entry) => anyhow!(
                    "{} [{}] is single-select; edit it in the form file",
                    entry.label,
                    entry.key
                ),
                None => anyhow!("unknown multi-select field {field:?} (try `catalog`)"),
            })?;
            let mut state = load_form(form)?;
            let selected = state.toggle(field, item);
            save_form(form, &state)?;
            eprintln!(
                "{} {item:?} in {}",
                if selected { "selected" } else { "deselected" },
                field.key()
            );
        }
        Command::Generate {
            form,
            out_dir,
            self_test,
        } => {
            let state = load_form(form)?;
            let doc = generate(&state);
            let text = to_pretty_json(&doc)?;
            match out_dir {
                Some(dir) => {
                    let path = write_json(dir, &state.idea, &doc)?;
                    eprintln!("wrote {}", path.display());
                }
                None => println!("{text}"),
            }
            let status = if *self_test {
                schema::validate_str(&text)
            } else {
                ValidationStatus::Unchecked
            };
            eprintln!("self-test: {status}");
        }
        Command::Validate { file } => {
            let text = read(file)?;
            match schema::check_str(&text) {
                Ok(()) => println!("{}", ValidationStatus::Valid),
                Err(e) => {
                    println!("{}: {e}", ValidationStatus::Invalid);
                    std::process::exit(1);
                }
            }
        }
        Command::Hydrate { file, out } => {
            let state = hydrate_str(&read(file)?);
            let text = serde_json::to_string_pretty(&state)?;
            match out {
                Some(path) => {
                    write_text(path, &text)?;
                    eprintln!("wrote {}", path.display());
                }
                None => println!("{text}"),
            }
        }
        Command::Enhance { form } => {
            let assistant = assistant(&args)?;
            let mut state = load_form(form)?;
            let expansion = assistant.enhance_idea(&state.idea).await?;
            expansion.apply(&mut state);
            save_form(form, &state)?;
            println!("{}\n\n{}", state.idea, state.description);
        }
        Command::Suggest { form } => {
            let assistant = assistant(&args)?;
            let state = load_form(form)?;
            let suggestion = assistant.suggest_settings(&state).await?;
            let next = apply_suggestion(&state, &suggestion);
            report_warnings(&next);
            save_form(form, &next)?;
            println!("{}", serde_json::to_string_pretty(&next)?);
        }
        Command::SeedImage { form, image } => {
            let assistant = assistant(&args)?;
            let state = load_form_or_default(form)?;
            let bytes = std::fs::read(image)
                .with_context(|| format!("failed to read image {}", image.display()))?;
            let seed = assistant
                .seed_from_image(&InlineImage::from_path_bytes(image, bytes))
                .await?;
            let next = seed.apply(&state);
            report_warnings(&next);
            save_form(form, &next)?;
            println!("{}", serde_json::to_string_pretty(&next)?);
        }
        Command::Refine { form, instructions } => {
            let assistant = assistant(&args)?;
            let state = load_form(form)?;
            let refinement = assistant
                .refine_json(&generate(&state), instructions.as_deref())
                .await?;
            println!("{}", serde_json::to_string_pretty(&refinement.document)?);
            match refinement.to_form() {
                Some(next) => {
                    save_form(form, &next)?;
                    eprintln!("self-test: {} (form updated)", refinement.status);
                }
                None => {
                    let reason = schema::check(&refinement.document)
                        .err()
                        .map(|e| e.to_string())
                        .unwrap_or_default();
                    eprintln!("self-test: {} {reason} (form left unchanged)", refinement.status);
                }
            }
        }
        Command::Narrative { form, out } => {
            let assistant = assistant(&args)?;
            let doc: PromptDocument = generate(&load_form(form)?);
            let text = assistant.narrative(&doc).await?;
            match out {
                Some(path) => {
                    write_text(path, &text)?;
                    eprintln!("wrote {}", path.display());
                }
                None => println!("{text}"),
            }
        }
    }

    Ok(())
}

fn assistant(args: &Args) -> anyhow::Result<Assistant> {
    let mut config = GeminiConfig::from_env();
    if let Some(model) = args.model.as_deref() {
        config = config.with_model(model.trim());
    }
    if let Some(path) = args.api_key_file.as_deref() {
        let key = read(path)?;
        config = config.with_api_key(key.trim());
    }
    let client = GeminiClient::new(config)?;
    tracing::debug!(model = client.model(), "gemini client ready");
    Ok(Assistant::new(client))
}

fn read(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Form files are user-edited; the loaded state is normalized and unknown
/// options are reported, not rejected.
fn load_form(path: &Path) -> anyhow::Result<FormState> {
    let text = read(path)?;
    let state: FormState = serde_json::from_str(&text)
        .with_context(|| format!("{} is not a form file", path.display()))?;
    let state = state.normalized();
    report_warnings(&state);
    Ok(state)
}

fn load_form_or_default(path: &Path) -> anyhow::Result<FormState> {
    if path.exists() {
        load_form(path)
    } else {
        Ok(FormState::default())
    }
}

fn save_form(path: &Path, state: &FormState) -> anyhow::Result<()> {
    write_text(path, &serde_json::to_string_pretty(state)?)?;
    Ok(())
}

fn report_warnings(state: &FormState) {
    for w in state.catalog_warnings() {
        eprintln!("warning: {w}");
    }
}

fn print_catalog() {
    for entry in catalog::ENTRIES {
        let kind = match entry.kind {
            SelectKind::Single => "single",
            SelectKind::Multi => "multi",
        };
        println!("{} [{}] ({kind})", entry.label, entry.key);
        for (i, option) in entry.options.iter().enumerate() {
            let marker = if i == 0 && entry.kind == SelectKind::Single {
                " (default)"
            } else {
                ""
            };
            println!("  - {option}{marker}");
        }
    }
}
