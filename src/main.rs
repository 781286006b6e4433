mod app;

use std::path::PathBuf;

use anyhow::Context;
use structopt::StructOpt;
use tracing::Level;

use scanline_renderer::scene::loader;
use scanline_renderer::{settings, Camera, Mesh, RenderSettings};

#[derive(Debug, StructOpt)]
#[structopt(rename_all = "kebab-case")]
struct Opt {
    /// Wavefront OBJ with vertex normals. The built-in cube is used when missing.
    #[structopt(long)]
    pub model: Option<PathBuf>,
    #[structopt(long, default_value = "800")]
    pub width: u32,
    #[structopt(long, default_value = "800")]
    pub height: u32,
    /// TOML file with render settings.
    #[structopt(long)]
    pub config: Option<PathBuf>,
    /// Render without a window and save the last frame here.
    #[structopt(long)]
    pub output: Option<PathBuf>,
    /// Also save the depth visualization of the last frame.
    #[structopt(long)]
    pub depth: Option<PathBuf>,
    /// Frames to render in headless mode.
    #[structopt(long, default_value = "1")]
    pub frames: u32,
    #[structopt(long)]
    pub print_fps: bool,
    #[structopt(long, default_value = "info")]
    pub log_level: String,
}

fn parse_log_level(level: &str, default: Level) -> Level {
    match level.to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" => Level::WARN,
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => default,
    }
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    tracing_subscriber::fmt()
        .with_max_level(parse_log_level(&opt.log_level, Level::INFO))
        .init();

    let settings = match &opt.config {
        Some(path) => settings::load(path)
            .with_context(|| format!("couldn't read settings from {}", path.display()))?,
        None => RenderSettings::default(),
    };

    let mesh = match &opt.model {
        Some(path) => loader::load_obj_file(path)
            .with_context(|| format!("couldn't load model {}", path.display()))?,
        None => Mesh::cube("cube"),
    };

    let params = app::Params {
        width: opt.width,
        height: opt.height,
        print_fps: opt.print_fps,
        settings,
        camera: Camera::default(),
        meshes: vec![mesh],
    };

    if opt.output.is_some() || opt.depth.is_some() {
        return app::render_to_files(params, opt.frames, opt.output, opt.depth);
    }

    // The window needs the display context to own the main thread.
    show_image::run_context(move || app::run(params));
}
