//! SDL2 frontend: window and renderer setup, asset loading, the event pump
//! and the fixed-rate frame loop. Everything here is a thin capability
//! layer; the game itself lives behind the `App` and `Frame` traits.

use std::collections::HashMap;
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use sdl2::event::Event;
use sdl2::image::LoadTexture;
use sdl2::keyboard::Keycode;
use sdl2::mixer::{self, Chunk};
use sdl2::pixels::Color as SdlColor;
use sdl2::rect::Rect as SdlRect;
use sdl2::render::{Texture, TextureCreator, WindowCanvas};
use sdl2::ttf::{Font, Sdl2TtfContext};
use sdl2::video::WindowContext;
use typed_builder::TypedBuilder;

use astroraid_common::assets::FONT_PATH;
use astroraid_common::{App, Color, FontKind, Frame, Key, Rect, SoundCue, Sprite};

pub use sdl2;

const BACKGROUND: SdlColor = SdlColor::RGB(0, 0, 0);

#[derive(TypedBuilder)]
pub struct SdlInitInfo {
    pub width: u32,
    pub height: u32,
    pub title: String,
    #[builder(default = 30)]
    pub frame_rate: u32,
}

/// Every texture, font and sound the game refers to, loaded up front.
/// A missing or unreadable asset is a fatal setup error.
struct Assets<'r, 'ttf> {
    textures: HashMap<Sprite, Texture<'r>>,
    fonts: HashMap<FontKind, Font<'ttf, 'static>>,
    sounds: HashMap<SoundCue, Chunk>,
}

fn load_assets<'r, 'ttf>(
    creator: &'r TextureCreator<WindowContext>,
    ttf: &'ttf Sdl2TtfContext,
) -> Result<Assets<'r, 'ttf>> {
    let mut textures = HashMap::new();
    for sprite in Sprite::ALL {
        let texture = creator
            .load_texture(sprite.path())
            .map_err(|e| anyhow!("could not load texture {}: {e}", sprite.path()))?;
        textures.insert(sprite, texture);
    }

    let mut fonts = HashMap::new();
    for kind in FontKind::ALL {
        let font = ttf
            .load_font(FONT_PATH, kind.point_size())
            .map_err(|e| anyhow!("could not load font {FONT_PATH} at {}pt: {e}", kind.point_size()))?;
        fonts.insert(kind, font);
    }

    let mut sounds = HashMap::new();
    for cue in SoundCue::ALL {
        let chunk = Chunk::from_file(cue.path())
            .map_err(|e| anyhow!("could not load sound {}: {e}", cue.path()))?;
        sounds.insert(cue, chunk);
    }

    log::info!(
        "loaded {} textures, {} fonts, {} sounds",
        textures.len(),
        fonts.len(),
        sounds.len()
    );
    Ok(Assets {
        textures,
        fonts,
        sounds,
    })
}

/// One frame's draw target. Draw failures inside the loop are programmer
/// errors by contract, so they are logged loudly instead of propagated.
struct SdlFrame<'a, 'r, 'ttf> {
    canvas: &'a mut WindowCanvas,
    creator: &'r TextureCreator<WindowContext>,
    assets: &'a Assets<'r, 'ttf>,
    width: i32,
    height: i32,
}

impl Frame for SdlFrame<'_, '_, '_> {
    fn viewport(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.canvas
            .set_draw_color(SdlColor::RGBA(color.r, color.g, color.b, color.a));
        if let Err(e) = self
            .canvas
            .fill_rect(SdlRect::new(rect.x, rect.y, rect.w as u32, rect.h as u32))
        {
            log::error!("fill_rect failed: {e}");
        }
    }

    fn copy_sprite(&mut self, sprite: Sprite, dest: Rect) {
        let texture = &self.assets.textures[&sprite];
        let dest = SdlRect::new(dest.x, dest.y, dest.w as u32, dest.h as u32);
        if let Err(e) = self.canvas.copy(texture, None, Some(dest)) {
            log::error!("copy of {sprite:?} failed: {e}");
        }
    }

    fn text_size(&self, font: FontKind, text: &str) -> (i32, i32) {
        match self.assets.fonts[&font].size_of(text) {
            Ok((w, h)) => (w as i32, h as i32),
            Err(e) => {
                log::error!("could not measure {text:?}: {e}");
                (0, 0)
            }
        }
    }

    fn draw_text(&mut self, font: FontKind, text: &str, color: Color, x: i32, y: i32) {
        let rendered = self.assets.fonts[&font]
            .render(text)
            .solid(SdlColor::RGBA(color.r, color.g, color.b, color.a));
        let surface = match rendered {
            Ok(surface) => surface,
            Err(e) => {
                log::error!("could not render {text:?}: {e}");
                return;
            }
        };

        let texture = match self.creator.create_texture_from_surface(&surface) {
            Ok(texture) => texture,
            Err(e) => {
                log::error!("could not upload {text:?}: {e}");
                return;
            }
        };

        let dest = SdlRect::new(x, y, surface.width(), surface.height());
        if let Err(e) = self.canvas.copy(&texture, None, Some(dest)) {
            log::error!("copy of {text:?} failed: {e}");
        }
    }

    fn play(&mut self, cue: SoundCue) {
        let chunk = &self.assets.sounds[&cue];
        if let Err(e) = mixer::Channel::all().play(chunk, 0) {
            log::warn!("could not play {cue:?}: {e}");
        }
    }
}

/// Builds the SDL2 stack and drives `app` until a quit request. Any error
/// before the first frame is a fatal setup failure for the caller to
/// report; the loop itself does not fail.
pub fn run(init: SdlInitInfo, mut app: impl App) -> Result<()> {
    let SdlInitInfo {
        width,
        height,
        title,
        frame_rate,
    } = init;

    let sdl = sdl2::init().map_err(|e| anyhow!("could not initialize SDL: {e}"))?;
    let video = sdl
        .video()
        .map_err(|e| anyhow!("could not initialize the video subsystem: {e}"))?;
    let _audio = sdl
        .audio()
        .map_err(|e| anyhow!("could not initialize the audio subsystem: {e}"))?;
    let _image = sdl2::image::init(sdl2::image::InitFlag::PNG)
        .map_err(|e| anyhow!("could not initialize SDL_image: {e}"))?;
    let ttf = sdl2::ttf::init().context("could not initialize SDL_ttf")?;

    mixer::open_audio(44_100, mixer::DEFAULT_FORMAT, mixer::DEFAULT_CHANNELS, 1_024)
        .map_err(|e| anyhow!("could not open the audio device: {e}"))?;
    mixer::allocate_channels(8);

    let window = video
        .window(&title, width, height)
        .position_centered()
        .build()
        .context("could not create the window")?;
    let mut canvas = window
        .into_canvas()
        .accelerated()
        .build()
        .context("could not create the renderer")?;

    let creator = canvas.texture_creator();
    let assets = load_assets(&creator, &ttf)?;

    let mut event_pump = sdl
        .event_pump()
        .map_err(|e| anyhow!("could not obtain the event pump: {e}"))?;

    // Quit requests go through a channel so they can be raised from inside
    // an event-handling pass and are honored by a non-blocking check once
    // per iteration.
    let (quit_tx, quit_rx) = mpsc::channel::<()>();

    let frame_delay = Duration::from_millis(u64::from(1000 / frame_rate.max(1)));
    app.init();
    log::info!("entering frame loop at {frame_rate} fps");

    loop {
        for event in event_pump.poll_iter() {
            match event {
                Event::Quit { .. }
                | Event::KeyDown {
                    keycode: Some(Keycode::Q),
                    ..
                } => {
                    let _ = quit_tx.send(());
                }
                Event::KeyDown {
                    keycode: Some(keycode),
                    ..
                } => {
                    if let Some(key) = map_keycode(keycode) {
                        app.handle_key(key);
                    }
                }
                _ => {}
            }
        }

        if quit_rx.try_recv().is_ok() {
            break;
        }

        canvas.set_draw_color(BACKGROUND);
        canvas.clear();

        {
            let mut frame = SdlFrame {
                canvas: &mut canvas,
                creator: &creator,
                assets: &assets,
                width: width as i32,
                height: height as i32,
            };
            app.update(&mut frame);
        }

        canvas.present();

        // Fixed-delay pacing: sleep the nominal frame budget rather than
        // correcting for elapsed time, so the actual rate drifts slightly
        // under load.
        std::thread::sleep(frame_delay);
    }

    log::info!("quit requested, leaving frame loop");
    Ok(())
}

fn map_keycode(keycode: Keycode) -> Option<Key> {
    match keycode {
        Keycode::Left => Some(Key::Left),
        Keycode::Right => Some(Key::Right),
        Keycode::Space => Some(Key::Space),
        Keycode::Return => Some(Key::Return),
        _ => None,
    }
}
