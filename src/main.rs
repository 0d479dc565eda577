// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{anyhow, Context, Result};
use clap::{Args, CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{generate, Shell};
use indicatif::{ProgressBar, ProgressStyle};
use log::{info, warn, Level, LevelFilter, Log, Metadata, Record, SetLoggerError};
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use transcultura::app_config::{self, Config};
use transcultura::campaign::samples::{find_sample, SAMPLE_CAMPAIGNS};
use transcultura::campaign::{CampaignHistory, CampaignRequest, CampaignResult, Industry, Language, Region};
use transcultura::database::{DatabaseConnection, Repository};
use transcultura::knowledge::ReferenceGuidelines;
use transcultura::pipeline::{CampaignPipeline, CancellationToken, PipelineProgress, ProgressCallback};

/// CLI Wrapper for Language to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLanguage {
    Spanish,
    French,
    German,
    Japanese,
    Portuguese,
    Hindi,
}

impl From<CliLanguage> for Language {
    fn from(cli_language: CliLanguage) -> Self {
        match cli_language {
            CliLanguage::Spanish => Language::Spanish,
            CliLanguage::French => Language::French,
            CliLanguage::German => Language::German,
            CliLanguage::Japanese => Language::Japanese,
            CliLanguage::Portuguese => Language::Portuguese,
            CliLanguage::Hindi => Language::Hindi,
        }
    }
}

/// CLI Wrapper for Region to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliRegion {
    Spain,
    France,
    Germany,
    Japan,
    Brazil,
    India,
    Eu,
    Usa,
}

impl From<CliRegion> for Region {
    fn from(cli_region: CliRegion) -> Self {
        match cli_region {
            CliRegion::Spain => Region::Spain,
            CliRegion::France => Region::France,
            CliRegion::Germany => Region::Germany,
            CliRegion::Japan => Region::Japan,
            CliRegion::Brazil => Region::Brazil,
            CliRegion::India => Region::India,
            CliRegion::Eu => Region::Eu,
            CliRegion::Usa => Region::Usa,
        }
    }
}

/// CLI Wrapper for Industry to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliIndustry {
    Technology,
    Healthcare,
    Fashion,
    FoodAndBeverage,
    Finance,
    General,
}

impl From<CliIndustry> for Industry {
    fn from(cli_industry: CliIndustry) -> Self {
        match cli_industry {
            CliIndustry::Technology => Industry::Technology,
            CliIndustry::Healthcare => Industry::Healthcare,
            CliIndustry::Fashion => Industry::Fashion,
            CliIndustry::FoodAndBeverage => Industry::FoodAndBeverage,
            CliIndustry::Finance => Industry::Finance,
            CliIndustry::General => Industry::General,
        }
    }
}

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, Copy, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Options shared by every command that reads the configuration
#[derive(Args, Debug, Clone)]
struct CommonArgs {
    /// Configuration file path
    #[arg(short, long = "config", default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Localize a marketing campaign (default command)
    Process(ProcessArgs),

    /// Show processed campaigns and automation metrics
    History {
        /// Number of most recent campaigns to show
        #[arg(short = 'n', long, default_value_t = 20)]
        limit: usize,

        /// Print the history as JSON
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Check connectivity to the text generator
    Check {
        #[command(flatten)]
        common: CommonArgs,
    },

    /// Generate shell completions for transcultura
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct ProcessArgs {
    /// Marketing copy to localize
    #[arg(value_name = "CONTENT")]
    content: Option<String>,

    /// Read the marketing copy from a file
    #[arg(short, long, conflicts_with = "content")]
    file: Option<PathBuf>,

    /// Use a built-in sample campaign (e.g. "health-supplement")
    #[arg(short, long, conflicts_with_all = ["content", "file"])]
    sample: Option<String>,

    /// Target language
    #[arg(short, long, value_enum)]
    language: Option<CliLanguage>,

    /// Target region
    #[arg(short, long, value_enum)]
    region: Option<CliRegion>,

    /// Industry of the advertised product
    #[arg(short, long, value_enum)]
    industry: Option<CliIndustry>,

    /// Model name to use for every stage
    #[arg(short, long)]
    model: Option<String>,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Do not save the result to the history database
    #[arg(long)]
    no_history: bool,

    #[command(flatten)]
    common: CommonArgs,
}

/// TransCultura - Campaign localization with local LLMs
///
/// Translates marketing copy, adapts it to the target culture, reviews it
/// against regional compliance rules and flags campaigns that need human review.
#[derive(Parser, Debug)]
#[command(name = "transcultura")]
#[command(author = "TransCultura Team")]
#[command(version)]
#[command(about = "Campaign translation, localization and compliance review")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "TransCultura runs marketing copy through four agents: translation, cultural adaptation, compliance check and exception analysis.

EXAMPLES:
    transcultura \"Shop now!\" -l japanese -r japan          # Localize inline copy
    transcultura -s health-supplement -l hindi -r india -i healthcare
    transcultura process -f campaign.txt -l german -r germany --json
    transcultura history -n 10                             # Show recent campaigns
    transcultura check                                     # Test the Ollama connection
    transcultura completions bash > transcultura.bash      # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    process: ProcessArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color code for log level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "1;31",
            Level::Warn => "1;33",
            Level::Info => "1;32",
            Level::Debug => "1;36",
            Level::Trace => "1;35",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.target().starts_with("transcultura")
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let level = record.level();

            let mut stderr = std::io::stderr();
            let _ = writeln!(
                stderr,
                "\x1B[{}m{} {} {}\x1B[0m",
                Self::get_color_for_level(level),
                now,
                Self::get_emoji_for_level(level),
                record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Start at trace so the configured level can be applied with set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "transcultura", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Process(args)) => run_process(args).await,
        Some(Commands::History { limit, json, common }) => run_history(limit, json, common).await,
        Some(Commands::Check { common }) => run_check(common).await,
        None => run_process(cli.process).await,
    }
}

/// Load the configuration and apply the log level
fn load_config(common: &CommonArgs) -> Result<Config> {
    if let Some(level) = common.log_level {
        let level: app_config::LogLevel = level.into();
        log::set_max_level(level.to_level_filter());
    }

    let (mut config, created) = Config::load_or_create(&common.config_path)?;
    if created {
        warn!(
            "Config file not found at '{}', creating default config.",
            common.config_path
        );
    }

    match common.log_level {
        Some(level) => config.log_level = level.into(),
        None => log::set_max_level(config.log_level.to_level_filter()),
    }

    Ok(config)
}

fn open_repository(config: &Config) -> Result<Repository> {
    let db = match &config.history.database_path {
        Some(path) => DatabaseConnection::new(path)?,
        None => DatabaseConnection::new_default()?,
    };
    Ok(Repository::new(db))
}

/// Pick the campaign copy from the argument, a file or a sample
fn resolve_content(args: &ProcessArgs) -> Result<String> {
    if let Some(content) = &args.content {
        return Ok(content.clone());
    }

    if let Some(path) = &args.file {
        return std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read campaign file: {:?}", path));
    }

    if let Some(name) = &args.sample {
        let sample = find_sample(name).ok_or_else(|| {
            anyhow!(
                "Unknown sample campaign '{}'. Available: {}",
                name,
                SAMPLE_CAMPAIGNS
                    .iter()
                    .map(|s| s.name)
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })?;
        info!("Using sample campaign: {}", sample.name);
        return Ok(sample.content.to_string());
    }

    Err(anyhow!(
        "Campaign content is required: pass CONTENT, --file or --sample"
    ))
}

fn create_progress_bar(hidden: bool) -> ProgressBar {
    if hidden {
        return ProgressBar::hidden();
    }

    let progress_bar = ProgressBar::new(100);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}% {msg}")
        .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}% {msg}"))
        .unwrap_or_else(|_| ProgressStyle::default_bar());
    progress_bar.set_style(style);
    progress_bar.enable_steady_tick(std::time::Duration::from_millis(120));
    progress_bar
}

async fn run_process(args: ProcessArgs) -> Result<()> {
    let mut config = load_config(&args.common)?;

    if let Some(model) = &args.model {
        config.generator.model = model.clone();
    }

    config.validate().context("Configuration validation failed")?;

    let content = resolve_content(&args)?;
    let request = CampaignRequest::new(
        content,
        args.language.map(Into::into).unwrap_or(config.campaign.target_language),
        args.region.map(Into::into).unwrap_or(config.campaign.target_region),
    )
    .with_industry(args.industry.map(Into::into).unwrap_or(config.campaign.industry));

    let pipeline = CampaignPipeline::new(
        config.build_generator(),
        Arc::new(ReferenceGuidelines::new()),
        config.pipeline_config(),
    );

    let progress_bar = create_progress_bar(args.json);
    let bar = progress_bar.clone();
    let on_progress: ProgressCallback = Box::new(move |event: PipelineProgress| {
        bar.set_position(event.percent as u64);
        bar.set_message(event.message);
    });

    let token = CancellationToken::new();
    let interrupt = {
        let token = token.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted, cancelling the current stage");
                token.cancel("Interrupted by user");
            }
        })
    };

    let outcome = pipeline
        .process_with(&request, Some(&token), Some(&on_progress))
        .await;
    interrupt.abort();
    progress_bar.finish_and_clear();
    let result = outcome?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        print_result(&result);
    }

    if config.history.enabled && !args.no_history && !token.is_cancelled() {
        match save_to_history(&config, &result).await {
            Ok(history) => info!("{}", history.summary().describe()),
            Err(e) => warn!("Failed to save campaign to history: {}", e),
        }
    }

    Ok(())
}

async fn save_to_history(config: &Config, result: &CampaignResult) -> Result<CampaignHistory> {
    let repository = open_repository(config)?;
    repository.save_result(result, &config.generator.model).await?;
    repository.load_history(None).await
}

fn print_result(result: &CampaignResult) {
    let request = result.request();
    println!(
        "Campaign {} | {} / {} | {}",
        result.short_id(),
        request.target_language(),
        request.target_region(),
        request.industry()
    );

    for output in result.stage_outputs() {
        println!();
        println!("== {}. {} ==", output.stage.position(), output.stage.agent_name());
        println!("{}", output.text.trim());
    }

    println!();
    match result.priority() {
        Some(priority) => println!("Status: {} (priority {})", result.status().display_name(), priority),
        None => println!("Status: {}", result.status().display_name()),
    }
}

async fn run_history(limit: usize, json: bool, common: CommonArgs) -> Result<()> {
    let config = load_config(&common)?;
    let repository = open_repository(&config)?;
    let history = repository.load_history(Some(limit)).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&history.rows())?);
        return Ok(());
    }

    if history.is_empty() {
        println!("No campaigns processed yet.");
        return Ok(());
    }

    println!(
        "{:<10} {:<20} {:<22} {:<16} {}",
        "ID", "Timestamp", "Target", "Industry", "Status"
    );
    for row in history.rows() {
        println!(
            "{:<10} {:<20} {:<22} {:<16} {}",
            row.campaign_id, row.timestamp, row.target, row.industry, row.status
        );
    }
    println!();
    println!("{}", history.summary().describe());

    match repository.connection().stats() {
        Ok(stats) => info!("History database {:?} ({})", repository.connection().path(), stats),
        Err(e) => warn!("Failed to read database statistics: {}", e),
    }

    Ok(())
}

async fn run_check(common: CommonArgs) -> Result<()> {
    let config = load_config(&common)?;
    config.validate().context("Configuration validation failed")?;

    let ollama = config.build_ollama();
    let version = ollama
        .version()
        .await
        .with_context(|| format!("Could not reach {} at {}", config.generator.provider.display_name(), ollama.base_url()))?;

    info!(
        "Connected to {} {} at {} (model: {})",
        config.generator.provider.display_name(),
        version,
        ollama.base_url(),
        config.generator.model
    );
    Ok(())
}
