use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "bookstroke", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render the reading calendar as a PNG.
    Render(RenderArgs),
    /// Print the computed layout as JSON.
    Layout(LayoutArgs),
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Input books CSV.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Visual config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured stroke style (with its default parameters).
    #[arg(long, value_enum)]
    style: Option<StyleChoice>,

    /// Scale the page down to fit a WIDTHxHEIGHT box, e.g. `1280x720`.
    #[arg(long, value_parser = parse_fit)]
    fit: Option<FitBox>,

    /// TrueType/OpenType font for the calendar labels. System sans-serif when omitted.
    #[arg(long)]
    font: Option<PathBuf>,
}

#[derive(Parser, Debug)]
struct LayoutArgs {
    /// Input books CSV.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Visual config JSON. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Directory of cover images named by title slug.
    #[arg(long)]
    covers: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug)]
struct FitBox {
    width: f64,
    height: f64,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum StyleChoice {
    Marker,
    Pencil,
    Ballpen,
    Watercolor,
}

impl StyleChoice {
    fn name(self) -> &'static str {
        match self {
            Self::Marker => "marker",
            Self::Pencil => "pencil",
            Self::Ballpen => "ballpen",
            Self::Watercolor => "watercolor",
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    bookstroke::logging::init(cli.verbose);
    match cli.cmd {
        Command::Render(args) => cmd_render(args),
        Command::Layout(args) => cmd_layout(args),
    }
}

fn parse_fit(raw: &str) -> Result<FitBox, String> {
    let (w, h) = raw
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{raw}'"))?;
    let w: f64 = w.trim().parse().map_err(|_| format!("bad width '{w}'"))?;
    let h: f64 = h.trim().parse().map_err(|_| format!("bad height '{h}'"))?;
    if !(w.is_finite() && h.is_finite() && w > 0.0 && h > 0.0) {
        return Err(format!("fit box must be positive, got '{raw}'"));
    }
    Ok(FitBox {
        width: w,
        height: h,
    })
}

fn read_config(path: Option<&Path>) -> anyhow::Result<bookstroke::VisualConfig> {
    match path {
        Some(p) => Ok(bookstroke::VisualConfig::load(p)?),
        None => Ok(bookstroke::VisualConfig::default()),
    }
}

fn build_layout(
    in_path: &Path,
    cfg: &bookstroke::VisualConfig,
) -> anyhow::Result<bookstroke::BookLayout> {
    let records = bookstroke::load_books_csv(in_path)
        .with_context(|| format!("load books '{}'", in_path.display()))?;
    Ok(bookstroke::BookLayout::new(
        cfg.calendar.clone(),
        cfg.palette.len(),
        records,
    ))
}

fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let mut cfg = read_config(args.config.as_deref())?;
    if let Some(choice) = args.style {
        cfg.render.style = bookstroke::StrokeStyle::from_name(choice.name())
            .with_context(|| format!("unknown style '{}'", choice.name()))?;
    }
    if let Some(fit) = args.fit {
        cfg.layout = cfg.layout.fit_within(fit.width, fit.height);
    }
    cfg.validate()?;

    let layout = build_layout(&args.in_path, &cfg)?;
    let plan = bookstroke::compile_calendar(&layout, &cfg);

    let mut renderer = match &args.font {
        Some(path) => {
            let bytes = std::fs::read(path)
                .with_context(|| format!("read font '{}'", path.display()))?;
            bookstroke::CpuRenderer::with_font(bytes)?
        }
        None => bookstroke::CpuRenderer::new(),
    };
    let frame = renderer.render(&plan)?;

    if let Some(parent) = args.out.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    frame.save_png(&args.out)?;

    eprintln!(
        "wrote {} ({}x{}, {} segments)",
        args.out.display(),
        frame.width,
        frame.height,
        layout.segments().len()
    );
    Ok(())
}

fn cmd_layout(args: LayoutArgs) -> anyhow::Result<()> {
    let cfg = read_config(args.config.as_deref())?;
    let layout = build_layout(&args.in_path, &cfg)?;

    let segments = layout.segments();
    let strokes = layout.strokes(&cfg.layout, &cfg.palette);

    let mut covers: Box<dyn bookstroke::CoverSource> = match &args.covers {
        Some(dir) => Box::new(bookstroke::CoverStore::new(dir)),
        None => Box::new(bookstroke::NoCovers),
    };
    let books: Vec<serde_json::Value> = (0..layout.records().len())
        .filter_map(|i| layout.tooltip(i, covers.as_mut()).map(|t| (i, t)))
        .map(|(i, t)| {
            serde_json::json!({
                "book": i,
                "title": t.title,
                "author": t.author,
                "rating": t.rating,
                "avg_rating": t.avg_rating,
                "started": t.started,
                "finished": t.finished,
                "cover": t.cover.map(|c| [c.width, c.height]),
            })
        })
        .collect();

    let out = serde_json::json!({
        "year": layout.calendar().year,
        "lanes": bookstroke::lane_count(&segments),
        "books": books,
        "segments": &*segments,
        "strokes": strokes,
    });

    let text = serde_json::to_string_pretty(&out).context("serialize layout JSON")?;
    println!("{text}");
    Ok(())
}
