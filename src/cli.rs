// src/cli.rs
use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::path::PathBuf;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{info, warn};

use crate::assembler::{Assembler, SearchReport};
use crate::conversation::{self, Effect};
use crate::core::ConfigManager;
use crate::export::{self, ExportFormat};
use crate::sites::build_source;
use crate::types::criteria::{parse_yes_no, split_keywords};
use crate::types::{SearchCriteria, Site};

#[derive(Parser)]
#[command(name = "resume-scout")]
#[command(about = "Search work.ua and robota.ua for candidate résumés and rank them")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// YAML config file (defaults to $RESUME_SCOUT_CONFIG or ./config.yaml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run one search from flags
    Search {
        /// Job position, e.g. "Data Scientist"
        position: String,
        #[arg(long)]
        location: Option<String>,
        /// Salary budget in UAH
        #[arg(long)]
        salary: Option<u32>,
        /// Minimum years of experience
        #[arg(long)]
        experience: Option<u32>,
        /// English required: yes or no
        #[arg(long)]
        english: Option<String>,
        /// Comma or space separated keywords
        #[arg(long)]
        keywords: Option<String>,
        /// 1 / work.ua or 2 / robota.ua
        #[arg(long, default_value = "1")]
        site: Site,
        /// Number of résumés to display
        #[arg(long)]
        limit: Option<usize>,
        #[command(flatten)]
        output: OutputArgs,
    },
    /// Answer the questions one at a time
    Interactive {
        #[command(flatten)]
        output: OutputArgs,
    },
}

#[derive(clap::Args, Clone)]
pub struct OutputArgs {
    /// Result pages to fetch
    #[arg(long)]
    pub pages: Option<u32>,
    /// Output file
    #[arg(short, long)]
    pub output: Option<PathBuf>,
    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,
    /// Print results without writing a file
    #[arg(long)]
    pub no_save: bool,
}

/// Output settings after merging flags over config.
struct RunSettings {
    max_pages: u32,
    output: PathBuf,
    format: ExportFormat,
    save: bool,
    default_limit: usize,
}

impl RunSettings {
    fn resolve(args: &OutputArgs, config: &ConfigManager) -> Self {
        Self {
            max_pages: args.pages.unwrap_or(config.search.max_pages),
            output: args.output.clone().unwrap_or_else(|| config.output.path.clone()),
            format: args.format.unwrap_or(config.output.format),
            save: !args.no_save,
            default_limit: config.search.default_limit,
        }
    }
}

pub async fn handle_command(cli: Cli, config: ConfigManager) -> Result<()> {
    match cli.command {
        Command::Search {
            position,
            location,
            salary,
            experience,
            english,
            keywords,
            site,
            limit,
            output,
        } => {
            let settings = RunSettings::resolve(&output, &config);
            let criteria = SearchCriteria::new(&position)?
                .with_location(location)
                .with_salary(salary)
                .with_experience_years(experience)
                .with_requires_english(english.as_deref().and_then(parse_yes_no))
                .with_keywords(keywords.as_deref().map(split_keywords).unwrap_or_default())
                .with_result_limit(limit)?;

            run_search(&config, &settings, criteria, site).await
        }
        Command::Interactive { output } => {
            let settings = RunSettings::resolve(&output, &config);
            run_interactive(&config, &settings).await
        }
    }
}

async fn run_search(
    config: &ConfigManager,
    settings: &RunSettings,
    criteria: SearchCriteria,
    site: Site,
) -> Result<()> {
    let criteria = if criteria.result_limit.is_none() {
        criteria
            .with_result_limit(Some(settings.default_limit))
            .context("search.default_limit must be positive")?
    } else {
        criteria
    };

    let source = build_source(site, config)?;
    println!("Fetching resumes from {}...", site);
    let report = Assembler::new(source.as_ref())
        .search(&criteria, settings.max_pages)
        .await;

    present(&report, settings).await
}

async fn present(report: &SearchReport, settings: &RunSettings) -> Result<()> {
    print!("{}", export::display_text(report));

    if settings.save && !report.is_empty() {
        let path = export::save(report, &settings.output, settings.format).await?;
        println!("Resumes saved to {}", path.display());
    }
    Ok(())
}

async fn run_interactive(config: &ConfigManager, settings: &RunSettings) -> Result<()> {
    let (mut session, first) = conversation::start();
    info!("Interactive session {}", session.id);
    show(&first)?;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await.context("Failed to read stdin")? {
        let (next, effect) = conversation::step(session, &line);
        session = next;

        match effect {
            Effect::Search { criteria, site } => {
                run_search(config, settings, criteria, site).await?;
                return Ok(());
            }
            other => show(&other)?,
        }
    }

    warn!("Input closed before the search could start");
    Ok(())
}

fn show(effect: &Effect) -> Result<()> {
    let mut stdout = std::io::stdout();
    match effect {
        Effect::Prompt(prompt) => write!(stdout, "{}", prompt)?,
        Effect::Reject { reason, reprompt } => write!(stdout, "{}\n{}", reason, reprompt)?,
        Effect::Search { .. } => {}
    }
    stdout.flush()?;
    Ok(())
}
