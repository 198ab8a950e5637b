use std::fs;
use std::io::Write;
use std::path::Path;
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

const LAMBDA_PACKAGE: &str = "cfn_response_lambda";
const LAMBDA_BINARY: &str = "custom_resource_lambda";

#[derive(Parser)]
#[command(
    name = "xtask",
    about = "Task runner for the custom resource response workspace"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests)
    Ci,
    /// Build the custom resource Lambda and zip it as `bootstrap`
    LambdaPackage {
        /// Compilation target triple for the Lambda binary
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build profile used for the binary
        #[arg(value_enum, long, default_value_t = BuildProfile::Release)]
        profile: BuildProfile,
        /// Directory receiving the zip artifact
        #[arg(long, default_value = "dist")]
        dist_dir: String,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum BuildProfile {
    Debug,
    Release,
}

impl BuildProfile {
    fn dir_name(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Release => "release",
        }
    }
}

/// Run cargo under a banner, exiting with its status code on failure.
fn cargo_step(label: &str, args: &[&str]) {
    eprintln!("\n=== {label} ===\n+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .unwrap_or_else(|error| panic!("could not spawn cargo: {error}"));
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn ci() {
    cargo_step("Formatting", &["fmt", "--all", "--", "--check"]);
    cargo_step(
        "Clippy",
        &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"],
    );
    cargo_step("Tests", &["test", "--workspace"]);
    eprintln!("\nCI passed.");
}

fn lambda_package(target: &str, profile: BuildProfile, dist_dir: &Path) {
    let mut build = vec![
        "build",
        "-p",
        LAMBDA_PACKAGE,
        "--bin",
        LAMBDA_BINARY,
        "--target",
        target,
    ];
    if let BuildProfile::Release = profile {
        build.push("--release");
    }
    cargo_step("Build lambda", &build);

    let binary_path = Path::new("target")
        .join(target)
        .join(profile.dir_name())
        .join(LAMBDA_BINARY);
    let zip_path = dist_dir.join(format!("{LAMBDA_BINARY}.zip"));
    if let Err(error) = write_bootstrap_zip(&binary_path, dist_dir, &zip_path) {
        eprintln!("packaging {} failed: {error}", binary_path.display());
        exit(1);
    }
    eprintln!("\nPackaged {}", zip_path.display());
}

/// The provided.al2 runtime executes an entry named `bootstrap`.
fn write_bootstrap_zip(
    binary_path: &Path,
    dist_dir: &Path,
    zip_path: &Path,
) -> zip::result::ZipResult<()> {
    let binary = fs::read(binary_path)?;
    fs::create_dir_all(dist_dir)?;

    let mut zip = ZipWriter::new(fs::File::create(zip_path)?);
    let options = FileOptions::default()
        .compression_method(CompressionMethod::Deflated)
        .unix_permissions(0o755);
    zip.start_file("bootstrap", options)?;
    zip.write_all(&binary)?;
    zip.finish()?;
    Ok(())
}

fn main() {
    match Cli::parse().command {
        Commands::Ci => ci(),
        Commands::LambdaPackage {
            target,
            profile,
            dist_dir,
        } => lambda_package(&target, profile, Path::new(&dist_dir)),
    }
}
