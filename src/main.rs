use clap::{Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use risk_calc::config::{Config, ExportConfig};
use risk_calc::export;
use risk_calc::output;
use risk_calc::scoring::what_if::{risk_by_age, risk_by_bmi};
use risk_calc::scoring::{
    compute_general_risk, compute_qrisk_simplified, validate_general, validate_qrisk, Ethnicity,
    Gender, GeneralInput, QriskInput,
};
use risk_calc::session::{self, SessionLog};

const EXIT_SUCCESS: i32 = 0;
const EXIT_FAILURE: i32 = 1;
const EXIT_INPUT: i32 = 2;
const EXIT_EXPORT: i32 = 3;
const EXIT_CONFIG: i32 = 4;

#[derive(Subcommand, Debug)]
enum Commands {
    /// Interactive terminal session (default if no subcommand)
    Session,
    /// Compute the General risk score
    General {
        #[command(flatten)]
        input: GeneralArgs,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Compute the simplified QRISK-style 10-year risk
    Qrisk {
        /// Age in years (25-84)
        #[arg(long)]
        age: u32,
        #[arg(long, value_enum)]
        gender: Gender,
        #[arg(long, value_enum)]
        ethnicity: Ethnicity,
        #[arg(long)]
        smoker: bool,
        /// On blood pressure medication
        #[arg(long)]
        bp_meds: bool,
        #[arg(long)]
        diabetic: bool,
        /// Total cholesterol / HDL ratio (2.0-8.0)
        #[arg(long)]
        chol_ratio: f64,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Show how the General score changes with age and BMI
    WhatIf {
        #[command(flatten)]
        input: GeneralArgs,
    },
    /// Explain the models, healthy ranges, limitations and references
    Info,
    /// Run every calculation in a YAML batch file
    Batch {
        /// Path to the batch file
        file: PathBuf,
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(Args, Debug)]
struct GeneralArgs {
    /// Age in years (18-100)
    #[arg(long)]
    age: u32,
    /// Body-mass index (15.0-60.0)
    #[arg(long)]
    bmi: f64,
    #[arg(long)]
    smoker: bool,
    #[arg(long)]
    diabetic: bool,
}

impl GeneralArgs {
    fn to_input(&self) -> GeneralInput {
        GeneralInput {
            age: self.age,
            bmi: self.bmi,
            is_smoker: self.smoker,
            is_diabetic: self.diabetic,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Args, Debug)]
struct OutputArgs {
    /// Output format
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
    /// Export the session as CSV into the configured export directory
    #[arg(long)]
    csv: bool,
    /// Export a PDF report of the latest calculation
    #[arg(long)]
    pdf: bool,
}

#[derive(Parser, Debug)]
#[command(name = "risk-calc")]
#[command(about = "Health risk calculator (educational demo, not for clinical use)", long_about = None)]
#[command(version)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to config file (defaults to ~/.config/risk-calc/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Route tracing events through the stderr buffer so they never land on
/// top of the terminal UI.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("risk_calc=debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_ansi(std::io::stderr().is_terminal())
        .with_writer(|| risk_calc::stderr_buffer::BufferedStderr)
        .init();
}

fn exit_with_errors(heading: &str, errors: Vec<String>, code: i32) -> ! {
    eprintln!("{}", heading);
    for error in errors {
        eprintln!("  - {}", error);
    }
    std::process::exit(code);
}

/// Run the requested exports; exits with EXIT_EXPORT on the first failure
fn run_exports(log: &SessionLog, export_config: &ExportConfig, out: &OutputArgs) {
    let dir = export_config.export_dir();

    if out.csv {
        match export::export_session_csv(log, &dir, &export_config.csv_filename) {
            Ok(path) => eprintln!(
                "Exported {} rows to {} ({})",
                log.len(),
                path.display(),
                export::mime_for(&export_config.csv_filename)
            ),
            Err(e) => {
                eprintln!("CSV export failed: {}", e);
                std::process::exit(EXIT_EXPORT);
            }
        }
    }

    if out.pdf {
        match export::export_entry_pdf(log, None, &dir, &export_config.pdf_filename) {
            Ok(path) => eprintln!(
                "Saved report to {} ({})",
                path.display(),
                export::mime_for(&export_config.pdf_filename)
            ),
            Err(e) => {
                eprintln!("PDF export failed: {}", e);
                std::process::exit(EXIT_EXPORT);
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let command = cli.command.unwrap_or(Commands::Session);

    // Load config
    let config: Config = match risk_calc::config::load_config(cli.config) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Config error: {:#}", e);
            std::process::exit(EXIT_CONFIG);
        }
    };

    if let Err(errors) = risk_calc::config::validate_config(&config) {
        exit_with_errors("Config errors:", errors, EXIT_CONFIG);
    }

    let use_colors = output::should_use_colors();

    match command {
        Commands::Session => {
            let theme = risk_calc::tui::resolve_theme(config.theme);
            let app = risk_calc::tui::App::new(&config, theme);
            match risk_calc::tui::run_tui(app).await {
                Ok(app) => {
                    if !app.session.is_empty() {
                        eprintln!(
                            "Session ended with {} calculations (history is not saved)",
                            app.session.len()
                        );
                    }
                }
                Err(e) => {
                    eprintln!("Terminal error: {:#}", e);
                    std::process::exit(EXIT_FAILURE);
                }
            }
        }
        Commands::General { input, output: out } => {
            let input = input.to_input();
            if let Err(errors) = validate_general(&input) {
                exit_with_errors("Input errors:", errors, EXIT_INPUT);
            }

            let result = compute_general_risk(&input);
            let mut log = SessionLog::new();
            log.record_general(input, &result);

            match out.format {
                Format::Text => println!("{}", output::format_general_result(&result, use_colors)),
                Format::Json => println!("{}", output::format_general_json(&input, &result)),
            }
            run_exports(&log, &config.export, &out);
        }
        Commands::Qrisk {
            age,
            gender,
            ethnicity,
            smoker,
            bp_meds,
            diabetic,
            chol_ratio,
            output: out,
        } => {
            let input = QriskInput {
                age,
                gender,
                ethnicity,
                is_smoker: smoker,
                on_bp_medication: bp_meds,
                is_diabetic: diabetic,
                chol_hdl_ratio: chol_ratio,
            };
            if let Err(errors) = validate_qrisk(&input) {
                exit_with_errors("Input errors:", errors, EXIT_INPUT);
            }

            let score = compute_qrisk_simplified(&input);
            let mut log = SessionLog::new();
            log.record_qrisk(input, score);

            match out.format {
                Format::Text => println!("{}", output::format_qrisk_result(score, use_colors)),
                Format::Json => println!("{}", output::format_qrisk_json(&input, score)),
            }
            run_exports(&log, &config.export, &out);
        }
        Commands::WhatIf { input } => {
            let input = input.to_input();
            if let Err(errors) = validate_general(&input) {
                exit_with_errors("Input errors:", errors, EXIT_INPUT);
            }
            println!(
                "{}",
                output::format_what_if(&risk_by_age(&input), &risk_by_bmi(&input), use_colors)
            );
        }
        Commands::Info => println!("{}", output::format_info(use_colors)),
        Commands::Batch { file, output: out } => {
            let batch = match session::load_batch(&file) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("Batch error: {:#}", e);
                    std::process::exit(EXIT_INPUT);
                }
            };
            if let Err(errors) = session::validate_batch(&batch) {
                exit_with_errors("Input errors:", errors, EXIT_INPUT);
            }

            let log = session::run_batch(&batch);
            match out.format {
                Format::Text => {
                    println!("{}", output::format_history_table(log.entries(), use_colors))
                }
                Format::Json => println!("{}", output::format_history_json(log.entries())),
            }
            run_exports(&log, &config.export, &out);
        }
    }

    std::process::exit(EXIT_SUCCESS);
}
