use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use zyx_frames::config::Configuration;
use zyx_frames::{HomogeneousMatrix, Step};

#[derive(Parser)]
#[command(name = "zyx-frames")]
#[command(about = "Map a point through T = Trans(t) · Rz(γ) · Ry(β) · Rx(α)")]
#[command(version)]
struct Cli {
    /// TOML configuration file (defaults to ./zyx-frames.toml if present)
    config: Option<PathBuf>,
}

fn print_matrix(label: &str, matrix: &HomogeneousMatrix) {
    println!("{label} =\n{matrix}\n");
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let config = match cli.config {
        // a file the user named must be used, or nothing at all
        Some(path) => match Configuration::load_from(&path) {
            Ok(config) => config,
            Err(e) => {
                log::error!("{e}");
                eprintln!("{e}");
                return ExitCode::FAILURE;
            }
        },
        None => Configuration::load().unwrap_or_else(|e| {
            log::warn!("Failed to load config: {}. Using defaults.", e);
            Configuration::default()
        }),
    };
    log::info!(
        "alpha = {}°, beta = {}°, gamma = {}°, t = {:?}",
        config.angles.alpha,
        config.angles.beta,
        config.angles.gamma,
        config.translation
    );

    let evaluation = config.evaluate(&mut |step: Step, matrix: &HomogeneousMatrix| {
        print_matrix(&step.to_string(), matrix)
    });

    print_matrix(
        "T (Trans @ Rz @ Ry @ Rx)",
        &evaluation.composition.transform,
    );
    println!("u_P = {}", evaluation.point_in_u);
    println!("b_P = {}", evaluation.point_in_b);
    ExitCode::SUCCESS
}
