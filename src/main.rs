use std::path::{Path, PathBuf};

use acf_pro_installer::config::{MANIFEST_FILE, log_path};
use acf_pro_installer::host::{ComposerManifest, RootPackage};
use acf_pro_installer::installer::{self, Activation};
use acf_pro_installer::repository::TemplateSource;
use acf_pro_installer::version::{resolve_link, validate};
use anyhow::Context;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "acf-pro-installer")]
#[command(
    version,
    about = "Add an ACF PRO package repository pinned to the version composer.json requires"
)]
struct Cli {
    /// Increase log output (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Also write JSON logs to a file (defaults to the data directory)
    #[arg(long, value_name = "PATH", global = true)]
    log_file: Option<Option<PathBuf>>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the version constraint composer.json declares for the package
    Resolve {
        #[arg(long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,
        /// Repository template naming the package
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Check that a version is an exact single-digit major.minor.patch
    Validate { version: String },
    /// Prepend the pinned repository to composer.json
    Activate {
        #[arg(long, default_value = MANIFEST_FILE)]
        manifest: PathBuf,
        /// Repository template, overriding extra.acf-pro-installer.template
        #[arg(long)]
        template: Option<PathBuf>,
        /// Save the result into the manifest instead of printing it
        #[arg(long)]
        write: bool,
    },
    /// Print the repository template in effect
    Template {
        #[arg(long)]
        template: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let log_file = cli.log_file.map(|path| path.unwrap_or_else(log_path));
    let _guard = acf_pro_installer::logging::init(cli.verbose, log_file.as_deref())
        .map_err(|e| anyhow::anyhow!(e))
        .context("Failed to initialize logging")?;

    match cli.command {
        Command::Resolve { manifest, template } => run_resolve(&manifest, template),
        Command::Validate { version } => run_validate(&version),
        Command::Activate {
            manifest,
            template,
            write,
        } => run_activate(&manifest, template, write),
        Command::Template { template } => run_template(template),
    }
}

fn template_source(template: Option<PathBuf>) -> TemplateSource {
    template.map_or(TemplateSource::Builtin, TemplateSource::File)
}

fn load_manifest(path: &Path) -> anyhow::Result<ComposerManifest> {
    ComposerManifest::load(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn run_resolve(manifest_path: &Path, template: Option<PathBuf>) -> anyhow::Result<()> {
    let manifest = load_manifest(manifest_path)?;
    let definition = template_source(template).load()?;
    let package = definition.package_name();

    match resolve_link(package, manifest.requires(), manifest.dev_requires()) {
        Some(link) => println!("{}", link.pretty_constraint()),
        None => eprintln!(
            "{} is not required in {}",
            package,
            manifest_path.display()
        ),
    }
    Ok(())
}

fn run_validate(version: &str) -> anyhow::Result<()> {
    let definition = TemplateSource::Builtin.load()?;
    validate(definition.package_name(), version)?;
    println!("{version}");
    Ok(())
}

fn run_activate(
    manifest_path: &Path,
    template: Option<PathBuf>,
    write: bool,
) -> anyhow::Result<()> {
    let mut manifest = load_manifest(manifest_path)?;

    match installer::run(&mut manifest, template)? {
        Activation::Disabled => {
            eprintln!("Disabled in {}; nothing to do", manifest_path.display());
        }
        Activation::Skipped => {
            eprintln!("Package not required; {} left unchanged", manifest_path.display());
        }
        Activation::Registered { repository } if write => {
            manifest.save()?;
            eprintln!(
                "Added {} {} repository to {}",
                repository.definition.package_name(),
                repository.definition.version().unwrap_or_default(),
                manifest_path.display()
            );
        }
        Activation::Registered { repository } => {
            println!("{}", serde_json::to_string_pretty(&repository.definition)?);
        }
    }
    Ok(())
}

fn run_template(template: Option<PathBuf>) -> anyhow::Result<()> {
    let definition = template_source(template).load()?;
    println!("{}", serde_json::to_string_pretty(&definition)?);
    Ok(())
}
