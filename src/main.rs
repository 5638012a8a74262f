use anyhow::{Context, Result};
use clap::Parser;
use marker_convert::markers::{
    ConvertError, ConvertOptions, IconAnchors, convert_to_string, parse_excluded_sets,
};
use std::fs;
use std::path::{Path, PathBuf};
use std::process;

/// Convert a Dynmap markers.yml into BlueMap marker sets
#[derive(Parser, Debug)]
#[command(name = "marker-convert", version)]
struct Args {
    /// Dynmap markers.yml
    input: PathBuf,

    /// Output file (stdout when omitted)
    output: Option<PathBuf>,

    /// TOML options file; flags below override its values
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Only keep markers of this world
    #[arg(short, long)]
    world: Option<String>,

    /// Exclude a marker set by name (repeatable)
    #[arg(short = 'x', long = "exclude-set")]
    exclude_sets: Vec<String>,

    /// File with one excluded set name per line
    #[arg(long)]
    exclude_sets_file: Option<PathBuf>,

    /// Icon path template, `%icon%` is replaced by the Dynmap icon name
    #[arg(short, long)]
    icon_template: Option<String>,

    /// JSON file mapping icon names (or `*`) to {"x": .., "y": ..} anchors
    #[arg(long)]
    icon_anchors: Option<PathBuf>,

    /// Append " (<marker name>)" to every label
    #[arg(long)]
    append_marker_name: bool,

    /// Warn about points farther than this many blocks from the origin
    #[arg(long)]
    warn_distance: Option<f64>,
}

fn load_options(args: &Args) -> Result<ConvertOptions> {
    let mut options = match &args.config {
        Some(path) => ConvertOptions::load_from_file(path)
            .with_context(|| format!("Error loading options file '{}'", path.display()))?,
        None => ConvertOptions::default(),
    };

    if let Some(world) = &args.world {
        options.world = Some(world.clone());
    }
    options.excluded_sets.extend(args.exclude_sets.iter().cloned());
    if let Some(path) = &args.exclude_sets_file {
        let text = read_text(path)?;
        options.excluded_sets.extend(parse_excluded_sets(&text));
    }
    if let Some(template) = &args.icon_template {
        options.icon_template = template.clone();
    }
    if let Some(path) = &args.icon_anchors {
        options.icon_anchors = IconAnchors::from_json(&read_text(path)?)
            .with_context(|| format!("Error in icon anchor file '{}'", path.display()))?;
    }
    if args.append_marker_name {
        options.append_marker_name = true;
    }
    if args.warn_distance.is_some() {
        options.warn_distance = args.warn_distance;
    }

    Ok(options)
}

fn read_text(path: &Path) -> Result<String> {
    fs::read_to_string(path).with_context(|| format!("Error reading '{}'", path.display()))
}

fn report_conversion_error(input_path: &Path, err: &ConvertError) {
    match err.location() {
        Some(loc) => log::error!("{}:{}: {}", input_path.display(), loc, err),
        None if err.is_input_error() => log::error!("{}: {}", input_path.display(), err),
        None => log::error!("Conversion failed unexpectedly: {}", err),
    }
}

fn main() {
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let args = Args::parse();

    let options = match load_options(&args) {
        Ok(options) => options,
        Err(e) => {
            log::error!("{:#}", e);
            process::exit(1);
        }
    };

    let input = match read_text(&args.input) {
        Ok(content) => content,
        Err(e) => {
            log::error!("{:#}", e);
            process::exit(2);
        }
    };

    let output = match convert_to_string(&input, &options) {
        Ok(text) => text,
        Err(e) => {
            report_conversion_error(&args.input, &e);
            process::exit(3);
        }
    };

    match &args.output {
        Some(path) => match fs::write(path, &output) {
            Ok(_) => log::info!(
                "Successfully converted '{}' to '{}'",
                args.input.display(),
                path.display()
            ),
            Err(e) => {
                log::error!("Error writing output file '{}': {}", path.display(), e);
                process::exit(4);
            }
        },
        None => print!("{}", output),
    }
}
