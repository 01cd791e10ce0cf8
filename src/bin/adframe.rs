use std::path::{Path, PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "adframe", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render one preview as a PNG.
    Render(RenderArgs),
    /// Print the built-in template JSON.
    Template,
}

#[derive(Parser, Debug)]
struct RenderArgs {
    /// Output PNG path.
    #[arg(long)]
    out: PathBuf,

    /// Template JSON (defaults to the built-in template).
    #[arg(long)]
    template: Option<PathBuf>,

    /// Background color, `#RRGGBB`.
    #[arg(long)]
    color: Option<adframe::HexColor>,

    /// Caption text (defaults to the template caption).
    #[arg(long)]
    caption: Option<String>,

    /// CTA label (defaults to the template CTA).
    #[arg(long)]
    cta: Option<String>,

    /// User image: URL, data URI or local file.
    #[arg(long)]
    mask: Option<String>,

    /// Font file used for caption and CTA text.
    #[arg(long, env = "ADFRAME_FONT")]
    font: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Render(args) => cmd_render(args).await,
        Command::Template => cmd_template(),
    }
}

fn cmd_template() -> anyhow::Result<()> {
    println!("{}", adframe::TemplateSpec::default().to_json_pretty()?);
    Ok(())
}

async fn cmd_render(args: RenderArgs) -> anyhow::Result<()> {
    let template = match &args.template {
        Some(path) => adframe::TemplateSpec::from_path(path)?,
        None => adframe::TemplateSpec::default(),
    };

    let mut edit = adframe::EditState::from_template(&template);
    if let Some(color) = args.color {
        edit.pick_custom_color(color);
    }
    if let Some(caption) = args.caption {
        edit.set_caption(caption);
    }
    if let Some(cta) = args.cta {
        edit.set_cta(cta);
    }
    if let Some(mask) = args.mask {
        if Path::new(&mask).is_file() {
            edit.set_mask_file(&mask)?;
        } else {
            edit.set_mask_source(mask);
        }
    }

    let mut surface_opts = adframe::CpuSurfaceOpts::default();
    match &args.font {
        Some(font) => surface_opts = surface_opts.with_font_file(font)?,
        None => tracing::warn!("no font given (--font or ADFRAME_FONT); text layers are skipped"),
    }
    let surface = adframe::CpuSurface::new(template.canvas, surface_opts)?;
    let loader = adframe::HttpAssetLoader::new(adframe::LoaderOpts::default())?;
    let mut compositor = adframe::Compositor::new(template, surface, loader)?;

    let (report, frame) = compositor.render_frame(&edit).await?;
    for (layer, status) in &report.outcomes {
        match status {
            adframe::LayerStatus::Drawn => eprintln!("{layer}: drawn"),
            adframe::LayerStatus::Skipped(reason) => eprintln!("{layer}: skipped ({reason})"),
        }
    }

    if let Some(parent) = args.out.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }

    image::save_buffer_with_format(
        &args.out,
        &frame.data,
        frame.width,
        frame.height,
        image::ColorType::Rgba8,
        image::ImageFormat::Png,
    )
    .with_context(|| format!("write png '{}'", args.out.display()))?;

    eprintln!("wrote {}", args.out.display());
    Ok(())
}
