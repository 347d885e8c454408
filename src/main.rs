use std::path::{Path, PathBuf};

use clap::{ArgAction, Args, Parser, Subcommand};
use tracing::info;

use kira_simheat::error::{AppError, error_chain};
use kira_simheat::input::load_input;
use kira_simheat::logging;
use kira_simheat::model::{BuildMode, DeviationConvention, StandardizeParams, ZeroVariancePolicy};
use kira_simheat::pipeline::stage2_pairwise::build_pairwise;
use kira_simheat::pipeline::stage3_vector::build_vector;
use kira_simheat::pipeline::stage4_standardize::standardize_columns;
use kira_simheat::pipeline::stage5_report::{Stage5Input, write_reports};
use kira_simheat::render::{
    DEFAULT_FONT_SCALE, FileRenderer, RenderSpec, RenderTarget, Renderer, TextRenderer,
    default_center,
};
use kira_simheat::scoring::ngram::DEFAULT_NGRAM;
use kira_simheat::scoring::{NgramMetric, NgramScorer};

const TOOL_NAME: &str = "kira-simheat";

/// Item-by-item similarity matrices and heatmap render requests.
#[derive(Parser, Debug)]
#[command(name = "kira-simheat")]
#[command(version)]
#[command(about = "Build a similarity matrix between items from an aligned corpus", long_about = None)]
struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score every item, write the matrix and reports, then render
    Run(RunArgs),
}

#[derive(Args, Debug, Clone)]
struct RunArgs {
    /// TSV manifest: label<TAB>inline text, or label<TAB>@path (.gz allowed)
    #[arg(long)]
    manifest: PathBuf,

    /// Output directory
    #[arg(long)]
    out: PathBuf,

    #[arg(long, value_enum, default_value_t = BuildMode::Pairwise)]
    mode: BuildMode,

    #[arg(long, value_enum, default_value_t = NgramMetric::Cosine)]
    metric: NgramMetric,

    /// Character n-gram size for the built-in scorer
    #[arg(long, default_value_t = DEFAULT_NGRAM)]
    ngram: usize,

    /// Standard deviation convention for vector-mode standardization
    #[arg(long, value_enum, default_value_t = DeviationConvention::Sample)]
    deviation: DeviationConvention,

    /// What to do with zero-variance columns after standardization
    #[arg(long, value_enum, default_value_t = ZeroVariancePolicy::Nan)]
    zero_variance: ZeroVariancePolicy,

    /// Keep raw vector-mode scores
    #[arg(long)]
    no_standardize: bool,

    /// Color scale center (default: 0 for standardized scores, 100 otherwise)
    #[arg(long, allow_hyphen_values = true)]
    center: Option<f64>,

    /// Color map name passed through to the renderer
    #[arg(long)]
    cmap: Option<String>,

    /// Figure size as W,H
    #[arg(long, value_parser = parse_figsize, default_value = "14,9")]
    figsize: (f64, f64),

    #[arg(long, default_value_t = DEFAULT_FONT_SCALE)]
    font_scale: f64,

    #[arg(long, value_enum, default_value_t = RenderTarget::File)]
    render: RenderTarget,
}

#[derive(Debug, Clone, PartialEq)]
struct RunConfig {
    manifest: PathBuf,
    out_dir: PathBuf,
    mode: BuildMode,
    metric: NgramMetric,
    ngram: usize,
    standardize: Option<StandardizeParams>,
    center: f64,
    cmap: Option<String>,
    figsize: (f64, f64),
    font_scale: f64,
    render_target: RenderTarget,
}

impl TryFrom<RunArgs> for RunConfig {
    type Error = AppError;

    fn try_from(args: RunArgs) -> Result<Self, Self::Error> {
        if args.ngram == 0 {
            return Err(AppError::InvalidArgument("--ngram must be >= 1".to_string()));
        }
        if !(args.font_scale.is_finite() && args.font_scale > 0.0) {
            return Err(AppError::InvalidArgument(
                "--font-scale must be a positive number".to_string(),
            ));
        }
        let standardize = match args.mode {
            BuildMode::Vector if !args.no_standardize => Some(StandardizeParams {
                convention: args.deviation,
                zero_variance: args.zero_variance,
            }),
            _ => None,
        };
        let center = args
            .center
            .unwrap_or_else(|| default_center(standardize.is_some()));
        if !center.is_finite() {
            return Err(AppError::InvalidArgument(
                "--center must be finite".to_string(),
            ));
        }
        Ok(RunConfig {
            manifest: args.manifest,
            out_dir: args.out,
            mode: args.mode,
            metric: args.metric,
            ngram: args.ngram,
            standardize,
            center,
            cmap: args.cmap,
            figsize: args.figsize,
            font_scale: args.font_scale,
            render_target: args.render,
        })
    }
}

fn parse_figsize(raw: &str) -> Result<(f64, f64), String> {
    let (w, h) = raw
        .split_once(',')
        .ok_or_else(|| "expected W,H".to_string())?;
    let w: f64 = w.trim().parse().map_err(|e| format!("bad width: {e}"))?;
    let h: f64 = h.trim().parse().map_err(|e| format!("bad height: {e}"))?;
    if !(w > 0.0 && h > 0.0 && w.is_finite() && h.is_finite()) {
        return Err("figure size must be positive".to_string());
    }
    Ok((w, h))
}

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let result = match cli.command {
        Commands::Run(args) => RunConfig::try_from(args).and_then(|config| run(&config)),
    };
    if let Err(err) = result {
        eprintln!("error: {}", error_chain(&err));
        std::process::exit(1);
    }
}

fn run(config: &RunConfig) -> Result<(), AppError> {
    let bundle = load_input(&config.manifest)?;
    let scorer = NgramScorer::train(&bundle.items, &bundle.corpus, config.ngram, config.metric)?;

    let raw = match config.mode {
        BuildMode::Pairwise => build_pairwise(&bundle.items, &bundle.corpus, &scorer)?,
        BuildMode::Vector => build_vector(&bundle.items, &bundle.corpus, &scorer)?,
    };
    info!(
        "built {} matrix {}x{}",
        config.mode.label(),
        raw.n_rows(),
        raw.n_cols()
    );

    let standardized = config
        .standardize
        .map(|params| (standardize_columns(&raw, &params), params));
    let final_matrix = standardized.as_ref().map(|(s, _)| &s.matrix).unwrap_or(&raw);

    let mut spec = RenderSpec::for_matrix(
        format!("{:?} similarity ({})", config.metric, config.mode.label()),
        final_matrix,
        config.center,
    );
    spec.cmap = config.cmap.clone();
    spec.figsize = config.figsize;
    spec.font_scale = config.font_scale;
    spec.target = config.render_target;

    let input = Stage5Input {
        bundle: &bundle,
        mode: config.mode,
        metric: config.metric,
        ngram: config.ngram,
        raw: &raw,
        standardized: standardized.as_ref().map(|(s, p)| (s, *p)),
        render: &spec,
        tool_name: TOOL_NAME.to_string(),
        tool_version: env!("CARGO_PKG_VERSION").to_string(),
        git_hash: read_git_hash(Path::new(".")),
    };
    write_reports(&input, &config.out_dir)?;

    let renderer: Box<dyn Renderer> = match config.render_target {
        RenderTarget::Inline => Box::new(TextRenderer),
        RenderTarget::File => Box::new(FileRenderer::new(&config.out_dir)),
    };
    renderer.render(final_matrix, &spec)?;

    Ok(())
}

fn read_git_hash(repo_root: &Path) -> Option<String> {
    let head = repo_root.join(".git/HEAD");
    let content = std::fs::read_to_string(head).ok()?;
    if let Some(ref_line) = content.strip_prefix("ref: ") {
        let ref_path = repo_root.join(".git").join(ref_line.trim());
        return std::fs::read_to_string(ref_path)
            .ok()
            .map(|s| s.trim().to_string());
    }
    Some(content.trim().to_string())
}

#[cfg(test)]
#[path = "../tests/src_inline/main_inline.rs"]
mod tests;
