use carousel::core::config::{self, CliOverrides};
use carousel::core::drag::Axis;
use carousel::tui;
use clap::Parser;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "carousel", about = "Terminal slide carousel")]
struct Args {
    /// Wrap around from the last slide to the first
    #[arg(long = "loop")]
    looped: bool,

    /// Bring distant slides next door before animating
    #[arg(long)]
    jump: bool,

    /// Cross-fade in place instead of sliding the track
    #[arg(long)]
    fade: bool,

    /// Rest the selected slide in the middle of the screen
    #[arg(long)]
    centered: bool,

    /// Neighbors kept on each side of the selection when looping
    #[arg(short, long)]
    neighbors: Option<usize>,

    /// Axis drags are measured along
    #[arg(long, value_enum)]
    axis: Option<Axis>,

    /// Slide to start on (zero-based)
    #[arg(short, long)]
    start: Option<usize>,

    /// Log level written to carousel.log
    #[arg(long)]
    log_level: Option<String>,
}

impl Args {
    fn overrides(&self) -> CliOverrides {
        // Boolean flags can only switch features on
        CliOverrides {
            looped: self.looped.then_some(true),
            jump: self.jump.then_some(true),
            fade: self.fade.then_some(true),
            centered: self.centered.then_some(true),
            neighbor_count: self.neighbors,
            axis: self.axis,
            start_index: self.start,
            log_level: self.log_level.clone(),
        }
    }
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let file_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load ~/.carousel/config.toml: {e}");
            return Err(std::io::Error::other(e));
        }
    };
    let resolved = config::resolve(&file_config, &args.overrides());

    // Initialize file logger - writes to carousel.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create("carousel.log") {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!(
        "Carousel starting: {} slides, looped={}, jump={}, fade={}",
        resolved.slides.len(),
        resolved.looped,
        resolved.jump,
        resolved.fade
    );

    tui::run(resolved)
}
