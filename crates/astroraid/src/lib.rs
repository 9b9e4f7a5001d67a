use anyhow::Result;

use astroraid_core::{Game, GameConfig};
use astroraid_sdl2::SdlInitInfo;

pub const VIEWPORT_WIDTH: u32 = 1200;
pub const VIEWPORT_HEIGHT: u32 = 800;
pub const FRAME_RATE: u32 = 30;

/// Builds the game with the fixed configuration and hands it to the SDL2
/// frontend. Returns once the player quits, or with the setup error that
/// kept the frame loop from starting.
pub fn run() -> Result<()> {
    let init_info = SdlInitInfo::builder()
        .width(VIEWPORT_WIDTH)
        .height(VIEWPORT_HEIGHT)
        .title("AstroRaid".to_string())
        .frame_rate(FRAME_RATE)
        .build();

    let config = GameConfig::new((VIEWPORT_WIDTH as i32, VIEWPORT_HEIGHT as i32));
    let game = Game::new(config);

    log::info!("starting AstroRaid at {VIEWPORT_WIDTH}x{VIEWPORT_HEIGHT}, {FRAME_RATE} fps");
    astroraid_sdl2::run(init_info, game)
}
