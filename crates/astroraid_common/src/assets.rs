//! Identifiers for every asset the game draws or plays. The frontend loads
//! the backing files once at setup; failing to load any of them is fatal.

/// Textures drawn with `Frame::copy_sprite`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Sprite {
    Alien,
    Player,
    /// First frame of the title screen animation.
    Title1,
    /// Second frame of the title screen animation.
    Title2,
}

impl Sprite {
    pub const ALL: [Sprite; 4] = [Sprite::Alien, Sprite::Player, Sprite::Title1, Sprite::Title2];

    pub const fn path(self) -> &'static str {
        match self {
            Sprite::Alien => "assets/alien.png",
            Sprite::Player => "assets/player.png",
            Sprite::Title1 => "assets/title_1.png",
            Sprite::Title2 => "assets/title_2.png",
        }
    }
}

/// Sound effects triggered with `Frame::play`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum SoundCue {
    PlayerFire,
    AlienHit,
    PlayerHit,
}

impl SoundCue {
    pub const ALL: [SoundCue; 3] = [SoundCue::PlayerFire, SoundCue::AlienHit, SoundCue::PlayerHit];

    pub const fn path(self) -> &'static str {
        match self {
            SoundCue::PlayerFire => "assets/sounds/fire.wav",
            SoundCue::AlienHit => "assets/sounds/alien_hit.wav",
            SoundCue::PlayerHit => "assets/sounds/player_hit.wav",
        }
    }
}

/// The UI font at the three sizes the game uses.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum FontKind {
    Title,
    Info,
    Stats,
}

impl FontKind {
    pub const ALL: [FontKind; 3] = [FontKind::Title, FontKind::Info, FontKind::Stats];

    pub const fn point_size(self) -> u16 {
        match self {
            FontKind::Title => 80,
            FontKind::Info => 20,
            FontKind::Stats => 40,
        }
    }
}

/// All font kinds render from the same face.
pub const FONT_PATH: &str = "assets/font.ttf";
