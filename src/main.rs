use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{Args, Parser, Subcommand};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::info;
use tracing_subscriber::EnvFilter;

use polyzone::app::App;
use polyzone::camera::{Camera, Point};
use polyzone::consts::{MAX_ZOOM, MIN_ZOOM, TILE_SIZE};
use polyzone::doc::ContainerKind;
use polyzone::input::DragPayload;
use polyzone::persist::{KeyValueStore, PersistError, StoreError};
use polyzone::render;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("persistence failed: {0}")]
    Persist(#[from] PersistError),
    #[error("nothing saved in {0}")]
    NoSavedState(String),
    #[error("invalid {name}: {value}")]
    InvalidArg { name: &'static str, value: String },
}

#[derive(Parser, Debug)]
#[command(name = "polyzone", about = "Polygon editor state tool")]
struct Cli {
    /// Directory holding the saved editor state.
    #[arg(long, env = "POLYZONE_DIR", default_value = ".")]
    dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Add random polygons to the buffer tray and save.
    Generate(GenerateCommand),
    /// Move every buffer polygon onto the canvas in a grid and save.
    Place(PlaceCommand),
    /// Print the work zone of the saved state as SVG.
    Render(RenderCommand),
    /// Delete the saved state.
    Reset,
}

#[derive(Args, Debug)]
struct GenerateCommand {
    /// How many polygons; a random 5 to 20 when omitted.
    #[arg(long, env = "POLYZONE_COUNT")]
    count: Option<usize>,

    /// RNG seed for reproducible output.
    #[arg(long, env = "POLYZONE_SEED")]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct PlaceCommand {
    #[arg(long, default_value_t = 5)]
    columns: usize,

    /// Distance between grid cells in world units.
    #[arg(long, default_value_t = 140.0)]
    spacing: f64,
}

#[derive(Args, Debug)]
struct RenderCommand {
    #[arg(long, default_value_t = 800.0)]
    width: f64,

    #[arg(long, default_value_t = 600.0)]
    height: f64,

    #[arg(long, default_value_t = 1.0)]
    scale: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset_x: f64,

    #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
    offset_y: f64,
}

/// [`KeyValueStore`] keeping one `<key>.json` file per key in a directory.
struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    fn path(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path(key)) {
            Ok(raw) => Ok(Some(raw)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).map_err(|e| StoreError::Backend(e.to_string()))?;
        fs::write(self.path(key), value).map_err(|e| StoreError::Backend(e.to_string()))
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path(key)) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Backend(e.to_string())),
        }
    }
}

fn main() -> Result<(), CliError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let store = FileStore { dir: cli.dir };

    match cli.command {
        Command::Generate(cmd) => run_generate(store, &cmd),
        Command::Place(cmd) => run_place(store, &cmd),
        Command::Render(cmd) => run_render(store, &cmd),
        Command::Reset => App::new(store).reset().map_err(CliError::from),
    }
}

fn run_generate(store: FileStore, cmd: &GenerateCommand) -> Result<(), CliError> {
    let mut rng = match cmd.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut app = App::open(store);
    let added = match cmd.count {
        Some(count) => app.create(count, &mut rng),
        None => app.create_random(&mut rng),
    };
    app.save(now_ms())?;
    println!("added {added} polygons (buffer: {})", app.engine().buffer.len());
    Ok(())
}

fn run_place(store: FileStore, cmd: &PlaceCommand) -> Result<(), CliError> {
    if cmd.columns == 0 {
        return Err(CliError::InvalidArg { name: "columns", value: cmd.columns.to_string() });
    }
    let dir = store.dir.display().to_string();
    let mut app = App::new(store);
    if !app.load() {
        return Err(CliError::NoSavedState(dir));
    }

    let engine = app.engine_mut();
    let ids: Vec<_> = engine.buffer.polygons().iter().map(|p| p.id.clone()).collect();
    let first = engine.canvas.len();
    let mut placed = 0usize;
    for (i, id) in ids.into_iter().enumerate() {
        let cell = first + i;
        #[allow(clippy::cast_precision_loss)]
        let target = Point::new(
            (cell % cmd.columns) as f64 * cmd.spacing + TILE_SIZE / 2.0,
            (cell / cmd.columns) as f64 * cmd.spacing + TILE_SIZE / 2.0,
        );
        let screen = engine.camera().world_to_screen(target);
        engine.on_drag_start(ContainerKind::Buffer, &id);
        let payload = DragPayload::transfer(id, ContainerKind::Buffer);
        if !engine.on_drop(ContainerKind::Canvas, screen, &payload).is_empty() {
            placed += 1;
        }
    }

    app.save(now_ms())?;
    info!(placed, "polygons placed");
    println!("placed {placed} polygons (canvas: {})", app.engine().canvas.len());
    Ok(())
}

fn run_render(store: FileStore, cmd: &RenderCommand) -> Result<(), CliError> {
    if !(cmd.scale.is_finite() && cmd.scale > 0.0) {
        return Err(CliError::InvalidArg { name: "scale", value: cmd.scale.to_string() });
    }
    let mut app = App::open(store);
    let engine = app.engine_mut();
    engine.set_viewport(cmd.width, cmd.height);
    engine.camera = Camera { scale: cmd.scale.clamp(MIN_ZOOM, MAX_ZOOM), offset_x: cmd.offset_x, offset_y: cmd.offset_y };

    let engine = app.engine();
    println!(
        "{}",
        render::work_zone(
            engine.canvas.polygons(),
            &engine.camera(),
            &engine.axis_overlay(),
            engine.viewport_width,
            engine.viewport_height,
        )
    );
    Ok(())
}

fn now_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| i64::try_from(d.as_millis()).unwrap_or(i64::MAX))
}
