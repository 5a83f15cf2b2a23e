use std::path::{Path, PathBuf};

use clap::Parser;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use tracing::{error, info, Level};

use era_camera::{
    catalog::EraCatalog,
    config::Config,
    error::{ConfigError, PipelineError, Result},
    gallery::{FileGallery, GalleryStore},
    pipeline::{AspectFormat, CapturePipeline, RawFrame},
};

#[derive(Parser)]
#[command(
    name = "era-camera",
    version,
    about = "Render captured frames as era-styled photographs",
    long_about = "Era-Camera takes a single captured frame and renders it through an \
era-specific image pipeline - tone, colour depth, grain, vignettes and all the other \
artefacts of 180 years of photographic history."
)]
struct Cli {
    /// Source frame (any image the `image` crate can decode)
    #[arg(short, long, required_unless_present = "list_eras")]
    input: Option<PathBuf>,

    /// Era to render (see --list-eras)
    #[arg(short, long)]
    era: Option<String>,

    /// Aspect format: square, portrait or landscape
    #[arg(short, long)]
    format: Option<String>,

    /// Directory to write the photo into
    #[arg(short, long, default_value = ".")]
    output: PathBuf,

    /// Also append the photo to the gallery
    #[arg(short, long)]
    gallery: bool,

    /// Configuration file (optional)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// List available eras and exit
    #[arg(long)]
    list_eras: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let log_level = if cli.verbose { Level::DEBUG } else { Level::INFO };
    tracing_subscriber::fmt().with_max_level(log_level).init();

    if let Err(err) = run(cli) {
        error!("{}", err.user_message());
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let catalog = EraCatalog::new();

    if cli.list_eras {
        for era in catalog.eras() {
            println!("{:<16} {:>4}  {} ({}-bit)", era.id, era.year, era.name, era.color_depth);
        }
        return Ok(());
    }

    // Load configuration
    let config = match cli.config {
        Some(config_path) => {
            info!("Loading configuration from {:?}", config_path);
            Config::from_file(&config_path)?
        }
        None => Config::default(),
    };
    config.validate()?;

    let era_id = cli.era.unwrap_or_else(|| config.capture.default_era.clone());
    let era = catalog
        .get(&era_id)
        .ok_or(PipelineError::UnknownEra { id: era_id })?;

    let format_id = cli
        .format
        .unwrap_or_else(|| config.capture.default_format.clone());
    let format: AspectFormat = format_id.parse().map_err(|_| ConfigError::InvalidValue {
        key: "format".to_string(),
        value: format_id.clone(),
    })?;

    // clap guarantees an input path once --list-eras is off
    let input = cli.input.ok_or_else(|| PipelineError::MissingSource {
        reason: "no input frame given".to_string(),
    })?;
    info!("Capturing {:?} as {} ({})", input, era.name, format);

    // Acquisition collaborator: the input image stands in for the camera frame
    let frame = load_frame(&input)?;

    let pipeline = CapturePipeline::new(config.capture.clone());
    let mut rng = SmallRng::from_entropy();
    let artifact = pipeline.capture(&frame, era, format, &mut rng)?;

    let output_path = cli.output.join(artifact.filename());
    std::fs::write(&output_path, &artifact.bytes)?;
    info!("Saved {:?} ({} bytes)", output_path, artifact.bytes.len());

    if cli.gallery {
        let mut gallery = FileGallery::open(&config.gallery.dir)?;
        let entry = gallery.append(&artifact)?;
        info!("Added to gallery as {} ({} photos total)", entry.id, gallery.entries().len());
    }

    Ok(())
}

fn load_frame(path: &Path) -> Result<RawFrame> {
    let image = image::open(path).map_err(|e| PipelineError::MissingSource {
        reason: format!("{}: {}", path.display(), e),
    })?;
    Ok(RawFrame::new(image.to_rgba8()))
}
