//! CLI binary for toolforge: list tool pages, inspect their forms and generate results.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::collections::BTreeMap;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tf_core::config::ToolforgeConfig;
use tf_core::form::FormState;
use tf_core::request;
use tf_core::schema::{Category, FieldKind};
use tf_engine::{SeededFlavor, Tool, all_tools, find_tool, suggest_tool};
use tf_runtime::{GenerationSpinner, PageStatus, ToolPage};

#[derive(Parser)]
#[command(name = "toolforge", about = "Template-driven AI tool page simulator")]
struct Cli {
    /// Project root holding `.toolforge/config.toml` (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Form inputs shared by `generate` and `request`.
#[derive(clap::Args)]
struct FormArgs {
    /// Tool id (see `toolforge list`)
    tool: String,

    /// Set a field: `name=value`. Multi-select takes comma-separated ids,
    /// toggles take true/false (repeatable)
    #[arg(short, long = "set", value_name = "NAME=VALUE")]
    sets: Vec<String>,

    /// Flip one id in a multi-select field: `name=id` (repeatable)
    #[arg(short, long = "toggle", value_name = "NAME=ID")]
    toggles: Vec<String>,

    /// Start from a saved request file instead of the defaults
    #[arg(short, long)]
    request: Option<PathBuf>,

    /// Seed for decorative numbers
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every tool page by category
    List,

    /// Show a tool's fields, defaults and options
    Describe {
        /// Tool id
        tool: String,

        /// Print the schema as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fill in a form and generate the result
    Generate {
        #[command(flatten)]
        form: FormArgs,

        /// Skip the fake generation delay
        #[arg(long)]
        no_delay: bool,

        /// Also write the request snapshot to this file
        #[arg(long, value_name = "FILE")]
        save_request: Option<PathBuf>,
    },

    /// Write a request file without generating
    Request {
        #[command(flatten)]
        form: FormArgs,

        /// Output file
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;

    match cli.command {
        Commands::List => {
            cmd_list();
            Ok(())
        }
        Commands::Describe { tool, json } => cmd_describe(&tool, json),
        Commands::Generate {
            form,
            no_delay,
            save_request,
        } => cmd_generate(&project_root, &form, no_delay, save_request.as_deref()).await,
        Commands::Request { form, out } => cmd_request(&form, &out),
    }
}

/// Look up a tool id, or fail with the closest match.
fn resolve_tool(id: &str) -> Result<&'static dyn Tool> {
    if let Some(tool) = find_tool(id) {
        return Ok(tool);
    }
    match suggest_tool(id) {
        Some(hint) => anyhow::bail!("unknown tool '{}'. Did you mean '{}'?", id, hint),
        None => anyhow::bail!("unknown tool '{}'. Run `toolforge list` to see all tools.", id),
    }
}

fn split_assignment<'a>(raw: &'a str, flag: &str) -> Result<(&'a str, &'a str)> {
    raw.split_once('=')
        .map(|(name, value)| (name.trim(), value))
        .with_context(|| format!("{} expects NAME=VALUE, got '{}'", flag, raw))
}

/// Build the form from an optional request file, then `--set` and `--toggle` in order.
/// Returns the form and the seed recorded in the request file, if any.
fn build_form(tool: &'static dyn Tool, args: &FormArgs) -> Result<(FormState, Option<u64>)> {
    let (mut form, file_seed) = match &args.request {
        Some(path) => {
            let req = request::load(path)?;
            let form = FormState::from_request(tool.schema(), &req)
                .with_context(|| format!("request file {} does not fit this tool", path.display()))?;
            (form, req.seed)
        }
        None => (tool.schema().initial_state(), None),
    };

    for raw in &args.sets {
        let (name, value) = split_assignment(raw, "--set")?;
        form.set_from_str(name, value)?;
    }
    for raw in &args.toggles {
        let (name, id) = split_assignment(raw, "--toggle")?;
        let selected = form.toggle_option(name, id.trim())?;
        tracing::debug!(field = name, id, selected, "toggled option");
    }
    Ok((form, file_seed))
}

fn cmd_list() {
    let mut by_category: BTreeMap<Category, Vec<&dyn Tool>> = BTreeMap::new();
    for tool in all_tools() {
        by_category
            .entry(tool.schema().category)
            .or_default()
            .push(*tool);
    }

    for (category, tools) in &by_category {
        println!("{}", category);
        for tool in tools {
            let schema = tool.schema();
            println!(
                "  {:<20} {:<26} {:>5} ms",
                schema.id, schema.title, schema.latency_ms
            );
        }
    }
}

fn cmd_describe(id: &str, json: bool) -> Result<()> {
    let tool = resolve_tool(id)?;
    let schema = tool.schema();

    if json {
        println!("{}", serde_json::to_string_pretty(schema)?);
        return Ok(());
    }

    println!("{} ({})", schema.title, schema.id);
    println!("{}", schema.description);
    println!(
        "Category: {}  Latency: {} ms",
        schema.category, schema.latency_ms
    );
    println!();
    println!("Fields:");
    for field in schema.fields {
        println!("  {} [{}] {}", field.name, field.kind.name(), field.label);
        match field.kind {
            FieldKind::Text { placeholder, .. } => {
                println!("      placeholder: {}", placeholder);
            }
            FieldKind::Toggle { default } => {
                println!("      default: {}", default);
            }
            FieldKind::Choice { catalog } => {
                for entry in catalog.entries {
                    let mark = if entry.id == catalog.default_id { "*" } else { " " };
                    println!("    {} {:<18} {}", mark, entry.id, entry.label);
                }
            }
            FieldKind::MultiChoice { catalog, defaults } => {
                for entry in catalog.entries {
                    let mark = if defaults.contains(&entry.id) { "*" } else { " " };
                    println!("    {} {:<18} {}", mark, entry.id, entry.label);
                }
            }
        }
    }
    Ok(())
}

async fn cmd_generate(
    project_root: &Path,
    args: &FormArgs,
    no_delay: bool,
    save_request: Option<&Path>,
) -> Result<()> {
    let config = ToolforgeConfig::load(project_root)?;
    let tool = resolve_tool(&args.tool)?;
    let (form, file_seed) = build_form(tool, args)?;
    let seed = args.seed.or(file_seed).or(config.generation.seed);

    let latency = if no_delay {
        Duration::ZERO
    } else {
        config.effective_latency(tool.id(), tool.schema().latency_ms)
    };

    let mut page = ToolPage::new(tool, latency);
    page.load_request(&form.snapshot(seed))?;

    let spinner = if latency.is_zero() || !std::io::stderr().is_terminal() {
        GenerationSpinner::hidden()
    } else {
        GenerationSpinner::new(tool.schema().title)
    };

    page.generate_seeded(Box::new(SeededFlavor::from_option(seed)), seed)?;
    let status = page.subscribe();
    let finished = tokio::select! {
        s = spinner.follow(status) => s,
        _ = tokio::signal::ctrl_c() => {
            spinner.finish();
            page.teardown();
            anyhow::bail!("generation cancelled");
        }
    };

    let result = match (finished, page.result()) {
        (PageStatus::Ready, Some(text)) => text,
        _ => anyhow::bail!("{} did not produce a result", tool.id()),
    };

    if let (Some(path), Some(snapshot)) = (save_request, page.last_request()) {
        request::save(path, snapshot)?;
        eprintln!("Saved request to {}", path.display());
    }

    if config.output.show_header {
        let schema = tool.schema();
        println!("{} [{}]", schema.title, schema.category);
        println!("{}", schema.description);
        println!("{}", "-".repeat(60));
    }
    println!("{}", result);
    Ok(())
}

fn cmd_request(args: &FormArgs, out: &Path) -> Result<()> {
    let tool = resolve_tool(&args.tool)?;
    let (form, file_seed) = build_form(tool, args)?;
    let snapshot = form.snapshot(args.seed.or(file_seed));
    request::save(out, &snapshot)?;
    eprintln!(
        "Wrote {} request ({} fields) to {}",
        tool.id(),
        snapshot.fields.len(),
        out.display()
    );
    Ok(())
}
