use clap::Parser;
use pairmatch_core::{Color, Coord, GameConfig, Shape};
use wasm_bindgen::prelude::*;

mod flow;
mod game;
mod tile;
mod utils;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// What log level to use
    #[command(flatten)]
    verbose: clap_verbosity_flag::Verbosity,

    /// Force a seed for the first board instead of random
    #[arg(short, long)]
    seed: Option<u64>,

    /// Board height in tiles
    #[arg(long, default_value_t = 4)]
    rows: Coord,

    /// Board width in tiles
    #[arg(long, default_value_t = 8)]
    cols: Coord,
}

impl Args {
    /// Parses the `#--flag=value&...` form used in the page URL.
    fn from_location_hash(hash: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(hash.split(['#', '&']))
    }

    fn game_config(&self) -> pairmatch_core::Result<GameConfig> {
        GameConfig::new((self.rows, self.cols), &Shape::ALL, &Color::ALL)
    }
}

#[wasm_bindgen(start)]
pub fn run_app() {
    use gloo::utils::{document, window};

    #[cfg(feature = "console_error_panic_hook")]
    {
        console_error_panic_hook::set_once();
    }

    let location_hash = window()
        .location()
        .hash()
        .unwrap_or_else(|_| "".to_string());

    let args = Args::from_location_hash(&location_hash).expect("Could not parse args");
    if let Some(log_level) = args.verbose.log_level() {
        console_log::init_with_level(log_level).expect("Error initializing logger");
    }
    log::debug!("args: {:?}", args);

    let config = match args.game_config() {
        Ok(config) => config,
        Err(err) => {
            log::error!("Invalid board {}x{}: {}", args.rows, args.cols, err);
            panic!("Invalid board configuration: {}", err);
        }
    };

    let root = document()
        .get_element_by_id("game")
        .expect("Could not find id=\"game\" element");

    log::debug!("App started");
    let props = game::GameProps {
        config,
        seed: args.seed,
    };
    yew::Renderer::<game::GameView>::with_root_and_props(root, props).render();
}
