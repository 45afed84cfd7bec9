use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::{Duration, Instant},
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use console::style;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use tokio::io::AsyncReadExt;
use tracing_subscriber::EnvFilter;

use vision_core::{
    Action, ApiConfig, DEFAULT_ORIGIN, ProgressHandler, Segment, SubmissionParts, VisionClient,
    parse_response,
};

mod render;

fn format_duration(d: Duration) -> String {
    let secs = d.as_secs_f64();
    if secs < 60.0 {
        format!("{:.1}s", secs)
    } else {
        format!("{:.0}m {:.0}s", (secs / 60.0).floor(), secs % 60.0)
    }
}

/// CLI wrapper for Action enum (needed for clap ValueEnum)
#[derive(Clone, Copy, ValueEnum)]
enum CliAction {
    FaceMatch,
    DescriptionSearch,
}

impl From<CliAction> for Action {
    fn from(cli: CliAction) -> Self {
        match cli {
            CliAction::FaceMatch => Action::FaceMatch,
            CliAction::DescriptionSearch => Action::DescriptionSearch,
        }
    }
}

#[derive(Parser)]
#[command(name = "vision")]
#[command(about = "Match faces and describe outfits across video clips with the vision API")]
struct Cli {
    /// Base URL prepended to every API path. Unset means relative /api routes.
    #[arg(long, global = true, env = "VISION_API_BASE_URL")]
    api_base: Option<String>,

    /// Origin that relative API routes are resolved against
    #[arg(long, global = true, env = "VISION_PROXY_TARGET", default_value = DEFAULT_ORIGIN)]
    origin: String,

    /// Print segments as JSON instead of panels
    #[arg(long, global = true)]
    json: bool,

    /// Plain text output without colors or badges
    #[arg(long, global = true)]
    plain: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Find segments where the reference face appears
    FaceMatch(Inputs),

    /// Find segments matching a clothing or accessory description
    #[command(alias = "describe")]
    DescriptionSearch(Inputs),

    /// Run every action the given inputs allow, concurrently
    Run(Inputs),

    /// Render segments from a saved API response ("-" reads stdin)
    Inspect {
        file: PathBuf,

        /// Action the response belongs to
        #[arg(short, long, default_value = "face-match")]
        action: CliAction,
    },
}

#[derive(Args, Clone)]
struct Inputs {
    /// Video clip to analyze (.mp4, .mov, ...)
    #[arg(short, long)]
    video: Option<PathBuf>,

    /// Reference face image (PNG or JPG portrait)
    #[arg(short, long)]
    reference: Option<PathBuf>,

    /// Outfit or accessory description, e.g. "Red blazer with gold buttons"
    #[arg(short, long)]
    description: Option<String>,
}

impl From<Inputs> for SubmissionParts {
    fn from(inputs: Inputs) -> Self {
        SubmissionParts {
            video: inputs.video,
            reference: inputs.reference,
            description: inputs.description,
        }
    }
}

fn create_progress_bar(multi: &MultiProgress, action: Action) -> ProgressBar {
    let pb = multi.add(ProgressBar::new(100));
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.cyan} {msg:<40} [{bar:30.magenta/blue}] {pos:>3}%")
            .unwrap()
            .tick_chars("⠁⠂⠄⡀⢀⠠⠐⠈ ")
            .progress_chars("█▓░"),
    );
    pb.set_message(action.progress_label());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

fn progress_handler(pb: &ProgressBar) -> ProgressHandler {
    let pb = pb.clone();
    Arc::new(move |percent: u8| pb.set_position(u64::from(percent.min(100))))
}

struct Console {
    client: VisionClient,
    multi: MultiProgress,
    json: bool,
    plain: bool,
}

impl Console {
    fn print_header(&self) {
        if self.json {
            return;
        }
        println!(
            "\n{}  {}",
            style("vision").cyan().bold(),
            style("Video intelligence console").dim()
        );
        let config = self.client.config();
        let helper = match config.base_url() {
            Some(base) => format!("Requests will target {}", base),
            None => format!(
                "Requests will use relative /api routes (proxied to {}).",
                config.origin()
            ),
        };
        println!("{}\n", style(helper).dim());
    }

    /// Submit one action and report the outcome. Failures are printed, not returned.
    async fn run_action(&self, action: Action, parts: &SubmissionParts) -> Option<Vec<Segment>> {
        if let Err(e) = parts.validate(action) {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            return None;
        }

        let step_start = Instant::now();
        let pb = create_progress_bar(&self.multi, action);
        let result = self
            .client
            .submit(action, parts, Some(progress_handler(&pb)))
            .await;

        match result {
            Ok(response) => {
                let segments = response.segments();
                pb.finish_with_message(format!(
                    "{} {} {}",
                    style("✓").green().bold(),
                    action.completion_notice(segments.len()),
                    style(format!("[{}]", format_duration(step_start.elapsed()))).dim()
                ));
                Some(segments)
            }
            Err(e) => {
                tracing::debug!(error = ?e, %action, "submission failed");
                pb.abandon_with_message(format!("{} {}", style("✗").red().bold(), action));
                eprintln!("{} {}", style("Error:").red().bold(), e);
                None
            }
        }
    }

    fn show(&self, results: &[(Action, Vec<Segment>)]) -> Result<()> {
        if self.json {
            return render::print_json(results);
        }
        for (action, segments) in results {
            render::print_panel(*action, segments, self.plain);
        }
        Ok(())
    }
}

async fn read_saved_response(file: &Path) -> Result<String> {
    if file.as_os_str() == "-" {
        let mut body = String::new();
        tokio::io::stdin().read_to_string(&mut body).await?;
        return Ok(body);
    }
    tokio::fs::read_to_string(file)
        .await
        .with_context(|| format!("Failed to read {}", file.display()))
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    if cli.plain {
        console::set_colors_enabled(false);
    }

    let config = ApiConfig::new(cli.api_base.as_deref(), &cli.origin)?;
    let app = Console {
        client: VisionClient::new(config)?,
        multi: MultiProgress::new(),
        json: cli.json,
        plain: cli.plain,
    };

    let total_start = Instant::now();

    let succeeded = match cli.command {
        Command::FaceMatch(inputs) => {
            app.print_header();
            let parts = SubmissionParts::from(inputs);
            match app.run_action(Action::FaceMatch, &parts).await {
                Some(segments) => app.show(&[(Action::FaceMatch, segments)]).map(|_| true)?,
                None => false,
            }
        }
        Command::DescriptionSearch(inputs) => {
            app.print_header();
            let parts = SubmissionParts::from(inputs);
            match app.run_action(Action::DescriptionSearch, &parts).await {
                Some(segments) => app
                    .show(&[(Action::DescriptionSearch, segments)])
                    .map(|_| true)?,
                None => false,
            }
        }
        Command::Run(inputs) => {
            app.print_header();
            let parts = SubmissionParts::from(inputs);
            let runnable: Vec<Action> = Action::ALL
                .into_iter()
                .filter(|action| parts.can_run(*action))
                .collect();

            if runnable.is_empty() {
                // Surface the most specific missing input
                let reason = parts
                    .validate(Action::DescriptionSearch)
                    .and_then(|_| parts.validate(Action::FaceMatch))
                    .err()
                    .map(|e| e.to_string())
                    .unwrap_or_default();
                eprintln!("{} {}", style("Error:").red().bold(), reason);
                false
            } else {
                let (face, description) = tokio::join!(
                    async {
                        if runnable.contains(&Action::FaceMatch) {
                            app.run_action(Action::FaceMatch, &parts).await
                        } else {
                            None
                        }
                    },
                    async {
                        if runnable.contains(&Action::DescriptionSearch) {
                            app.run_action(Action::DescriptionSearch, &parts).await
                        } else {
                            None
                        }
                    }
                );

                let all_ok = runnable.iter().all(|action| match action {
                    Action::FaceMatch => face.is_some(),
                    Action::DescriptionSearch => description.is_some(),
                });

                let results = [
                    (Action::FaceMatch, face.unwrap_or_default()),
                    (Action::DescriptionSearch, description.unwrap_or_default()),
                ];
                app.show(&results)?;
                all_ok
            }
        }
        Command::Inspect { file, action } => {
            let body = read_saved_response(&file).await?;
            let segments = parse_response(&body).segments();
            app.show(&[(Action::from(action), segments)])?;
            true
        }
    };

    if !app.json {
        println!(
            "{} {}",
            style("Total time:").dim(),
            style(format_duration(total_start.elapsed())).cyan().bold()
        );
    }

    if !succeeded {
        std::process::exit(1);
    }

    Ok(())
}
