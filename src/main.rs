use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{ArgAction, Parser, Subcommand};
use tracing::{Level, info};

use evrename::diagnostics::render_error;
use evrename::{NameChange, ObjectsScope, Platform, Project};

#[derive(Parser)]
#[command(name = "evrename", version, about = "Rename project elements referenced from event expressions")]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rename an element in every instruction parameter of a project
    Rename {
        /// Project file (JSON)
        project: PathBuf,
        /// Instruction and expression metadata (TOML)
        #[arg(long)]
        metadata: PathBuf,
        /// Parameter type referring to the element, e.g. "layer"
        #[arg(long)]
        parameter_type: String,
        /// Only rename references bound to this object
        #[arg(long)]
        object: Option<String>,
        old_name: String,
        new_name: String,
        /// Output file. If omitted, prints to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Retarget link events after an events sheet was renamed
    Link {
        /// Project file (JSON)
        project: PathBuf,
        old_name: String,
        new_name: String,
        /// Output file. If omitted, prints to stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print the spans of an element's occurrences in one expression.
    ///
    /// Object and behavior calls are resolved against the objects of
    /// `--project` (and `--layout`). Without a project every object call
    /// uses the base object's functions and behavior calls are skipped.
    Find {
        /// Instruction and expression metadata (TOML)
        #[arg(long)]
        metadata: PathBuf,
        #[arg(long)]
        parameter_type: String,
        #[arg(long)]
        object: Option<String>,
        /// Project file whose global objects are in scope
        #[arg(long)]
        project: Option<PathBuf>,
        /// Layout whose objects are in scope as well
        #[arg(long, requires = "project")]
        layout: Option<String>,
        old_name: String,
        expression: String,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => Level::WARN,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .with_max_level(level)
        .init();

    if let Err(err) = run(cli.command) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}

fn run(command: Commands) -> anyhow::Result<()> {
    match command {
        Commands::Rename { project, metadata, parameter_type, object, old_name, new_name, output } => {
            let platform = load_platform(&metadata)?;
            let mut loaded = load_project(&project)?;
            let mut request = NameChange::new(parameter_type, old_name, new_name);
            if let Some(object) = object {
                request = request.scoped_to(object);
            }
            evrename::rename_in_project(&mut loaded, &platform, &request);
            write_project(&loaded, &project, output.as_deref())
        }
        Commands::Link { project, old_name, new_name, output } => {
            let mut loaded = load_project(&project)?;
            evrename::rename_link_targets(&mut loaded, &old_name, &new_name);
            write_project(&loaded, &project, output.as_deref())
        }
        Commands::Find { metadata, parameter_type, object, project, layout, old_name, expression } => {
            let platform = load_platform(&metadata)?;
            let loaded = project.as_deref().map(load_project).transpose()?;
            let objects = match (&loaded, layout.as_deref()) {
                (None, _) => ObjectsScope::empty(),
                (Some(loaded), None) => ObjectsScope::new(&loaded.objects, &[]),
                (Some(loaded), Some(name)) => {
                    let layout = loaded
                        .layout(name)
                        .with_context(|| format!("no layout named '{name}' in the project"))?;
                    ObjectsScope::new(&loaded.objects, &layout.objects)
                }
            };
            let root = match evrename::parse_expression(&expression) {
                Ok(root) => root,
                Err(err) => {
                    render_error(&expression, &err);
                    return Err(err.into());
                }
            };
            let mut request = NameChange::new(parameter_type, old_name, "");
            if let Some(object) = object {
                request = request.scoped_to(object);
            }
            let occurrences = evrename::find_occurrences(&platform, objects, &root, &expression, &request);
            for span in occurrences {
                println!("{}..{}\t{}", span.start, span.end, span.slice(&expression).unwrap_or_default());
            }
            Ok(())
        }
    }
}

fn load_platform(path: &Path) -> anyhow::Result<Platform> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read metadata file {}", path.display()))?;
    Ok(Platform::from_toml_str(&text, path)?)
}

fn load_project(path: &Path) -> anyhow::Result<Project> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("could not read project file {}", path.display()))?;
    Ok(Project::from_json(&text, path)?)
}

fn write_project(project: &Project, source: &Path, output: Option<&Path>) -> anyhow::Result<()> {
    let json = project.to_json(source)?;
    match output {
        Some(path) => {
            std::fs::write(path, json + "\n")
                .with_context(|| format!("could not write {}", path.display()))?;
            info!(path = %path.display(), "wrote project");
        }
        None => println!("{json}"),
    }
    Ok(())
}
