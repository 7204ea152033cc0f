use std::path::{Path, PathBuf};

use anyhow::Context as _;
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "slipmaker", version)]
struct Cli {
    /// Log debug diagnostics (overridden by `RUST_LOG`).
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the joined and filtered schedule.
    List(ListArgs),
    /// Render a single card as a PNG.
    Preview(PreviewArgs),
    /// Render every card in the range as JPEGs into a bundle directory.
    Generate(GenerateArgs),
}

#[derive(Parser, Debug)]
struct ScheduleArgs {
    /// Schedule CSV with a header line.
    #[arg(long)]
    csv: PathBuf,

    /// First date to include (defaults to the earliest entry).
    #[arg(long)]
    from: Option<String>,

    /// Last date to include (defaults to the latest entry).
    #[arg(long)]
    to: Option<String>,

    /// JSON config file.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct ListArgs {
    #[command(flatten)]
    schedule: ScheduleArgs,
}

#[derive(Parser, Debug)]
struct PreviewArgs {
    #[command(flatten)]
    schedule: ScheduleArgs,

    /// Template image (PNG, JPEG, WebP or SVG).
    #[arg(long)]
    template: PathBuf,

    /// Index into the filtered list (0-based).
    #[arg(long, default_value_t = 0)]
    index: usize,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Font file; defaults to a bold system sans-serif.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct GenerateArgs {
    #[command(flatten)]
    schedule: ScheduleArgs,

    /// Template image (PNG, JPEG, WebP or SVG).
    #[arg(long)]
    template: PathBuf,

    /// Directory that receives the `S{id}_{date}` bundle.
    #[arg(long)]
    out: PathBuf,

    /// Downscale target width in pixels; 0 keeps the template resolution.
    #[arg(long)]
    width: Option<u32>,

    /// JPEG quality in (0, 1].
    #[arg(long)]
    quality: Option<f32>,

    /// Font file; defaults to a bold system sans-serif.
    #[arg(long)]
    font: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::List(args) => cmd_list(args),
        Command::Preview(args) => cmd_preview(args),
        Command::Generate(args) => cmd_generate(args),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "slipmaker=debug" } else { "slipmaker=info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn parse_bound(raw: Option<&str>, what: &str) -> anyhow::Result<Option<NaiveDate>> {
    raw.map(|s| {
        slipmaker::parse_date(s).with_context(|| format!("unrecognized {what} date '{s}'"))
    })
    .transpose()
}

/// Load config and rows, then apply the CLI range on top of the automatic one.
fn open_pipeline(args: &ScheduleArgs) -> anyhow::Result<slipmaker::Pipeline> {
    let config = match &args.config {
        Some(path) => slipmaker::AppConfig::load(path)?,
        None => slipmaker::AppConfig::default(),
    };
    let mut pipeline = slipmaker::Pipeline::new(config)?;

    let rows = slipmaker::read_records_path(&args.csv)?;
    pipeline.load(&rows);

    let from = parse_bound(args.from.as_deref(), "--from")?;
    let to = parse_bound(args.to.as_deref(), "--to")?;
    if from.is_some() || to.is_some() {
        let auto = pipeline.range();
        pipeline.set_range(slipmaker::DateRange::new(
            from.or(auto.from),
            to.or(auto.to),
        ));
    }
    Ok(pipeline)
}

fn make_renderer(
    pipeline: &slipmaker::Pipeline,
    template_path: &Path,
    font: Option<&Path>,
) -> anyhow::Result<slipmaker::CardRenderer> {
    let assets_root = template_path.parent().unwrap_or_else(|| Path::new("."));
    let extra_dirs = [assets_root.join("fonts")];
    let face = slipmaker::resolve_font(font, &extra_dirs)?;
    Ok(slipmaker::CardRenderer::new(
        &face,
        pipeline.config().layout.text_color,
    )?)
}

fn cmd_list(args: ListArgs) -> anyhow::Result<()> {
    let pipeline = open_pipeline(&args.schedule)?;
    for (idx, e) in pipeline.filtered().iter().enumerate() {
        let school = if e.school { " [school]" } else { "" };
        println!("{idx:>3}  {} · {}{school}", e.date, e.person);
        let assistant = if e.assistant.is_empty() { "-" } else { e.assistant.as_str() };
        println!("     Assistant: {assistant} · {}", e.assignment);
    }
    eprintln!(
        "{} of {} entries in range",
        pipeline.filtered().len(),
        pipeline.joined().len()
    );
    Ok(())
}

fn cmd_preview(args: PreviewArgs) -> anyhow::Result<()> {
    let mut pipeline = open_pipeline(&args.schedule)?;
    pipeline.set_template(slipmaker::load_template(&args.template)?);
    let mut renderer = make_renderer(&pipeline, &args.template, args.font.as_deref())?;

    let frame = pipeline.preview(&mut renderer, args.index)?;
    let png = slipmaker::encode_png(&frame)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    std::fs::write(&args.out, png).with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}

fn cmd_generate(args: GenerateArgs) -> anyhow::Result<()> {
    let mut pipeline = open_pipeline(&args.schedule)?;
    pipeline.set_template(slipmaker::load_template(&args.template)?);
    let mut renderer = make_renderer(&pipeline, &args.template, args.font.as_deref())?;

    let mut settings = pipeline.config().export;
    if let Some(w) = args.width {
        settings.target_width = (w > 0).then_some(w);
    }
    if let Some(q) = args.quality {
        settings.quality = q;
    }

    let today = chrono::Local::now().date_naive();
    let bundle_dir = args.out.join(pipeline.bundle_name(today));

    let artifacts = pipeline.generate(&mut renderer, &settings)?;
    slipmaker::write_artifacts(&bundle_dir, artifacts)?;

    eprintln!("wrote {} cards to {}", artifacts.len(), bundle_dir.display());
    Ok(())
}
