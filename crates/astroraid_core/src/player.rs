use astroraid_common::{Color, Frame, Rect, SoundCue, Sprite};

use crate::bullet::{BulletConfig, BulletList, Heading, BULLET_WIDTH};

pub const PLAYER_WIDTH: i32 = 90;
pub const PLAYER_HEIGHT: i32 = 54;

#[derive(Clone, Debug)]
pub struct PlayerConfig {
    /// Horizontal pixels per move request.
    pub step_size: i32,
    pub bullet_speed: i32,
    pub lives: u32,
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Direction {
    Left,
    Right,
}

pub struct Player {
    config: PlayerConfig,
    x: i32,
    y: i32,
    lives: u32,
}

impl Player {
    /// Spawns the ship bottom-centered in the viewport with a full set of
    /// lives.
    pub fn new(config: &PlayerConfig, viewport: (i32, i32)) -> Player {
        let (viewport_width, viewport_height) = viewport;
        Player {
            config: config.clone(),
            x: viewport_width / 2 - PLAYER_WIDTH / 2,
            y: viewport_height - PLAYER_HEIGHT,
            lives: config.lives,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, PLAYER_WIDTH, PLAYER_HEIGHT)
    }

    pub fn lives(&self) -> u32 {
        self.lives
    }

    pub fn draw(&self, frame: &mut dyn Frame) {
        frame.copy_sprite(Sprite::Player, self.rect());
    }

    /// Steps sideways, clamped to the viewport.
    pub fn advance(&mut self, direction: Direction, viewport_width: i32) {
        match direction {
            Direction::Left => self.x = (self.x - self.config.step_size).max(0),
            Direction::Right => {
                self.x = (self.x + self.config.step_size).min(viewport_width - PLAYER_WIDTH)
            }
        }
    }

    /// Fires one bullet from the top center of the sprite. While a bullet
    /// is still in flight this is a no-op.
    pub fn fire(&self, bullets: &mut BulletList, frame: &mut dyn Frame) {
        if !bullets.is_empty() {
            return;
        }

        bullets.fire(
            self.x + PLAYER_WIDTH / 2 - BULLET_WIDTH / 2,
            self.y,
            &BulletConfig {
                speed: self.config.bullet_speed,
                heading: Heading::Up,
                color: Color::CYAN,
            },
        );
        frame.play(SoundCue::PlayerFire);
    }

    /// Consumes every alien bullet overlapping the ship; each one costs a
    /// life. Returns true once the last life is gone.
    pub fn test_hit(&mut self, bullets: &mut BulletList, frame: &mut dyn Frame) -> bool {
        let hits = bullets.remove_overlapping(self.rect());
        for _ in 0..hits {
            frame.play(SoundCue::PlayerHit);
            self.lives = self.lives.saturating_sub(1);
        }
        self.lives == 0
    }
}
