use std::error::Error;
use std::fs::File;
use std::io::prelude::*;
use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use whitted::ppm::PpmImage;
use whitted::scene::{gen_sphere_field, load_scene, save_scene};
use whitted::{render_with, Flow, RenderOptions, Scene, ShadowPolicy};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogLevel {
    Trace,
    Debug,
    Info,
    Warn,
    Error,
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Parser)]
#[command(name = "whitted")]
#[command(version)]
#[command(about = "Ray trace a scene of spheres lit by a single point light")]
struct Cli {
    /// Set logging level (trace, debug, info, warn, error)
    #[arg(long, global = true, value_name = "LEVEL")]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a scene to a PPM file
    Render {
        /// Scene JSON; the built-in demo scene when omitted
        #[arg(short, long)]
        scene: Option<PathBuf>,
        #[arg(long, default_value_t = 800)]
        width: usize,
        #[arg(long, default_value_t = 600)]
        height: usize,
        #[arg(short, long, default_value = "out/output.ppm")]
        output: PathBuf,
        /// Override the scene's reflection depth
        #[arg(long)]
        max_depth: Option<usize>,
        /// Clamp the diffuse term at zero
        #[arg(long)]
        clamp_diffuse: bool,
        /// Keep reflecting past a shadowed bounce instead of stopping
        #[arg(long)]
        skip_shadowed: bool,
    },

    /// Load and validate a scene file
    CheckScene {
        #[arg(short, long)]
        scene: PathBuf,
    },

    /// Write a random field of spheres as a scene file
    GenScene {
        #[arg(short, long, default_value_t = 20)]
        count: usize,
        #[arg(long, default_value_t = 0)]
        seed: u64,
        #[arg(short, long, default_value = "sphere_field.json")]
        output: PathBuf,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level_filter = if let Some(level) = cli.log_level {
        level.to_string()
    } else {
        tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"))
            .to_string()
    };

    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::new(&level_filter))
        .init();

    match cli.command {
        Commands::Render { scene, width, height, output, max_depth, clamp_diffuse, skip_shadowed } => {
            let mut scene = match scene {
                Some(path) => load_scene(path)?,
                None => Scene::default(),
            };
            if let Some(depth) = max_depth {
                scene.max_depth = depth;
            }
            let options = RenderOptions {
                shadow: if skip_shadowed { ShadowPolicy::SkipBounce } else { ShadowPolicy::Terminate },
                clamp_diffuse,
            };
            render_to_file(&scene, width, height, &options, &output)?;
        }
        Commands::CheckScene { scene } => {
            let scene = load_scene(&scene)?;
            println!("Scene OK: {} spheres, max depth {}", scene.spheres.len(), scene.max_depth);
            for name in scene.names() {
                println!("  {}", name);
            }
        }
        Commands::GenScene { count, seed, output } => {
            let scene = gen_sphere_field(count, seed);
            save_scene(&scene, &output)?;
            info!(path = %output.display(), count, seed, "wrote scene");
        }
    }

    Ok(())
}

fn render_to_file(scene: &Scene, width: usize, height: usize, options: &RenderOptions, path: &Path) -> Result<(), Box<dyn Error>> {
    let step = (height / 10).max(1);
    let image = render_with(scene, width, height, options, |p| {
        if p.rows_done % step == 0 || p.rows_done == p.total_rows {
            info!("{}/{} rows", p.rows_done, p.total_rows);
        }
        Flow::Continue
    })?;

    // Output the image to a file
    write_text_to_file(&PpmImage::from_image(&image).get_text(), path)
}

fn write_text_to_file(text: &str, path: &Path) -> Result<(), Box<dyn Error>> {
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            std::fs::create_dir_all(dir)?;
        }
    }

    let mut file = File::create(path)?;
    file.write_all(text.as_bytes())?;
    info!(path = %path.display(), "wrote image");
    Ok(())
}
