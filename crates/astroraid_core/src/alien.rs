use rand::Rng;

use astroraid_common::{Color, Frame, Rect, SoundCue, Sprite};

use crate::bullet::{BulletConfig, BulletList, Heading};
use crate::player::Player;

pub const ALIEN_WIDTH: i32 = 80;
pub const ALIEN_HEIGHT: i32 = 86;

/// Vertical offset of the formation's first row at level start.
const GRID_TOP_MARGIN: i32 = 50;

#[derive(Copy, Clone, Debug)]
pub struct Alien {
    pub(crate) x: i32,
    pub(crate) y: i32,
}

impl Alien {
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, ALIEN_WIDTH, ALIEN_HEIGHT)
    }

    fn draw(&self, frame: &mut dyn Frame) {
        frame.copy_sprite(Sprite::Alien, self.rect());
    }
}

#[derive(Clone, Debug)]
pub struct AlienGridConfig {
    pub rows: usize,
    pub cols: usize,
    /// Space between rows.
    pub margin_row: i32,
    /// Space between columns.
    pub margin_col: i32,
    /// Distance from a viewport edge at which the sweep turns around.
    pub return_point: i32,
    /// Sweep speed cap.
    pub speed_max: i32,
    /// Number of descents per sweep speed increase.
    pub speed_step: u32,
    pub bullet_speed: i32,
    /// Bernoulli rate gating enemy fire, applied once per volley and once
    /// per column.
    pub fire_rate: f64,
    pub step_size_x: i32,
    pub step_size_y: i32,
}

/// The enemy formation. One arena of row-major slots backs both views the
/// game needs: the flat list of live aliens (iteration, drawing, bounds)
/// and the (row, column) occupancy table (per-column queries). Removal
/// empties a slot and never compacts, so column indices stay stable.
pub struct AlienGrid {
    config: AlienGridConfig,
    slots: Vec<Option<Alien>>,
    /// +1 sweeps right, -1 sweeps left.
    direction: i32,
    drop_count: u32,
    speed: i32,
    move_counter: i32,
}

impl AlienGrid {
    /// Builds a fresh formation centered horizontally near the top of the
    /// viewport. Levels always start from this constructor; grids are never
    /// patched back into shape.
    pub fn new(config: &AlienGridConfig, viewport_width: i32) -> AlienGrid {
        let cell_width = ALIEN_WIDTH + config.margin_col;
        let start_x = (viewport_width - cell_width * config.cols as i32 - config.margin_col) / 2;

        let mut slots = Vec::with_capacity(config.rows * config.cols);
        for row in 0..config.rows {
            let y = GRID_TOP_MARGIN + row as i32 * (ALIEN_HEIGHT + config.margin_row);
            for col in 0..config.cols {
                let x = start_x + col as i32 * cell_width;
                slots.push(Some(Alien { x, y }));
            }
        }

        AlienGrid {
            config: config.clone(),
            slots,
            direction: 1,
            drop_count: 0,
            speed: 1,
            move_counter: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.live().count()
    }

    pub fn is_empty(&self) -> bool {
        self.live().next().is_none()
    }

    fn live(&self) -> impl Iterator<Item = &Alien> {
        self.slots.iter().flatten()
    }

    #[cfg(test)]
    pub(crate) fn slots(&self) -> &[Option<Alien>] {
        &self.slots
    }

    /// Bounding box of the live formation, None once the grid is empty.
    pub fn bounds(&self) -> Option<Rect> {
        let mut live = self.live();
        let first = live.next()?;
        let (mut x1, mut y1) = (first.x, first.y);
        let (mut x2, mut y2) = (first.rect().right(), first.rect().bottom());
        for alien in live {
            x1 = x1.min(alien.x);
            y1 = y1.min(alien.y);
            x2 = x2.max(alien.rect().right());
            y2 = y2.max(alien.rect().bottom());
        }
        Some(Rect::new(x1, y1, x2 - x1, y2 - y1))
    }

    pub fn draw_and_advance(&mut self, frame: &mut dyn Frame) {
        for alien in self.live() {
            alien.draw(frame);
        }
        let (viewport_width, _) = frame.viewport();
        self.advance(viewport_width);
    }

    /// One movement tick. The formation only shifts every few frames; the
    /// gap shrinks as the sweep speeds up, and at the cap it shifts every
    /// frame (never a modulus of zero). When the next lateral step would
    /// cross the return margin on either side, the whole formation drops
    /// one vertical step and reverses instead.
    pub(crate) fn advance(&mut self, viewport_width: i32) {
        self.move_counter += 1;
        if self.speed < self.config.speed_max
            && self.move_counter % (self.config.speed_max - self.speed) != 0
        {
            return;
        }
        self.move_counter = 0;

        let Some(bounds) = self.bounds() else {
            return;
        };

        let step = self.config.step_size_x * self.direction;
        let descend = bounds.right() + step >= viewport_width - self.config.return_point
            || bounds.x + step <= self.config.return_point;

        if descend {
            self.drop_count += 1;
            if self.drop_count % self.config.speed_step == 0 && self.speed < self.config.speed_max {
                self.speed += 1;
            }
            self.direction = -self.direction;
        }

        for alien in self.slots.iter_mut().flatten() {
            if descend {
                alien.y += self.config.step_size_y;
            } else {
                alien.x += step;
            }
        }
    }

    /// Resolves player bullets against the formation. Bullets outside the
    /// formation's bounding box are skipped outright; the first overlapping
    /// (bullet, alien) pair in iteration order is consumed. At most one
    /// alien and one bullet go per call. Returns whether something was hit
    /// and how many aliens remain.
    pub fn test_hit(&mut self, bullets: &mut BulletList, frame: &mut dyn Frame) -> (bool, usize) {
        let Some(bounds) = self.bounds() else {
            return (false, 0);
        };

        let mut hit: Option<(usize, usize)> = None;
        'bullets: for (bullet_index, bullet) in bullets.iter().enumerate() {
            let bullet_rect = bullet.rect();
            if bullet_rect.x < bounds.x
                || bullet_rect.right() > bounds.right()
                || bullet_rect.bottom() < bounds.y
            {
                continue;
            }

            for (slot, alien) in self.slots.iter().enumerate() {
                if let Some(alien) = alien {
                    if alien.rect().overlaps(&bullet_rect) {
                        hit = Some((bullet_index, slot));
                        break 'bullets;
                    }
                }
            }
        }

        match hit {
            Some((bullet_index, slot)) => {
                self.slots[slot] = None;
                bullets.remove(bullet_index);
                frame.play(SoundCue::AlienHit);
                (true, self.len())
            }
            None => (false, self.len()),
        }
    }

    /// True once the formation's lowest edge reaches the ground.
    pub fn test_boundary(&self, viewport_height: i32) -> bool {
        self.bounds()
            .map_or(false, |bounds| bounds.bottom() >= viewport_height)
    }

    /// True when any column's lowest alien has descended to the player's
    /// row and overlaps the player horizontally. An independent loss
    /// condition from the ground check above.
    pub fn test_player_collision(&self, player: &Player) -> bool {
        let player_rect = player.rect();
        let Some(bounds) = self.bounds() else {
            return false;
        };
        if player_rect.y > bounds.bottom() {
            return false;
        }

        self.bottom_aliens().into_iter().flatten().any(|alien| {
            let rect = alien.rect();
            rect.bottom() >= player_rect.y
                && rect.x < player_rect.right()
                && rect.right() > player_rect.x
        })
    }

    /// Marks the slot at (row, col) empty. The column keeps its index so
    /// lowest-in-column queries stay valid.
    pub fn remove(&mut self, row: usize, col: usize) {
        self.slots[row * self.config.cols + col] = None;
    }

    /// Per-column lowest live alien, None for emptied columns.
    fn bottom_aliens(&self) -> Vec<Option<&Alien>> {
        let mut bottom = vec![None; self.config.cols];
        for row in 0..self.config.rows {
            for col in 0..self.config.cols {
                if let Some(alien) = &self.slots[row * self.config.cols + col] {
                    bottom[col] = Some(alien);
                }
            }
        }
        bottom
    }

    /// Probabilistic enemy fire: one Bernoulli trial gates the volley, then
    /// each column rolls independently at the same rate, so fire stays
    /// ragged rather than arriving in synchronized walls. A firing column's
    /// bullet leaves from the base midpoint of its lowest alien.
    pub fn fire(&self, bullets: &mut BulletList, rng: &mut impl Rng) {
        if rng.gen::<f64>() > self.config.fire_rate {
            return;
        }

        for alien in self.bottom_aliens().into_iter().flatten() {
            if rng.gen::<f64>() > self.config.fire_rate {
                continue;
            }

            bullets.fire(
                alien.x + ALIEN_WIDTH / 2,
                alien.y + ALIEN_HEIGHT,
                &BulletConfig {
                    speed: self.config.bullet_speed,
                    heading: Heading::Down,
                    color: Color::PINK,
                },
            );
        }
    }
}
