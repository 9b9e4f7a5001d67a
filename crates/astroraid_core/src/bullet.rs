use astroraid_common::{Color, Frame, Rect};

pub const BULLET_WIDTH: i32 = 3;
pub const BULLET_HEIGHT: i32 = 5;

/// Vertical travel direction of a bullet.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Heading {
    Up,
    Down,
}

impl Heading {
    /// Sign of the per-frame y delta.
    pub const fn step(self) -> i32 {
        match self {
            Heading::Up => -1,
            Heading::Down => 1,
        }
    }
}

/// How a firing entity shapes its bullets.
#[derive(Copy, Clone, Debug)]
pub struct BulletConfig {
    pub speed: i32,
    pub heading: Heading,
    pub color: Color,
}

#[derive(Copy, Clone, Debug)]
pub struct Bullet {
    x: i32,
    y: i32,
    heading: Heading,
    speed: i32,
    color: Color,
}

impl Bullet {
    fn new(x: i32, y: i32, config: &BulletConfig) -> Bullet {
        Bullet {
            x,
            y,
            heading: config.heading,
            speed: config.speed,
            color: config.color,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, BULLET_WIDTH, BULLET_HEIGHT)
    }

    pub fn heading(&self) -> Heading {
        self.heading
    }

    fn advance(&mut self) {
        self.y += self.heading.step() * self.speed;
    }

    fn in_bounds(&self, viewport_height: i32) -> bool {
        self.y >= 0 && self.y <= viewport_height
    }

    fn draw(&self, frame: &mut dyn Frame) {
        frame.fill_rect(self.rect(), self.color);
    }
}

/// All bullets of one owner currently on screen. Invariant: outside of
/// `advance_and_draw` every bullet is within vertical viewport bounds.
#[derive(Default)]
pub struct BulletList {
    bullets: Vec<Bullet>,
}

impl BulletList {
    /// Appends a bullet at the muzzle point.
    pub fn fire(&mut self, x: i32, y: i32, config: &BulletConfig) {
        self.bullets.push(Bullet::new(x, y, config));
    }

    /// The single per-frame mutation point: advance every bullet, drop the
    /// ones that left the viewport vertically, draw the survivors.
    pub fn advance_and_draw(&mut self, frame: &mut dyn Frame) {
        let (_, viewport_height) = frame.viewport();
        self.bullets.retain_mut(|bullet| {
            bullet.advance();
            bullet.in_bounds(viewport_height)
        });
        for bullet in &self.bullets {
            bullet.draw(frame);
        }
    }

    /// Removes one bullet by position in the list; collision resolution
    /// identifies bullets by index within the current frame.
    pub fn remove(&mut self, index: usize) -> Bullet {
        self.bullets.remove(index)
    }

    /// Removes every bullet overlapping `rect`, returning how many were hit.
    pub fn remove_overlapping(&mut self, rect: Rect) -> usize {
        let before = self.bullets.len();
        self.bullets.retain(|bullet| !bullet.rect().overlaps(&rect));
        before - self.bullets.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Bullet> {
        self.bullets.iter()
    }

    pub fn len(&self) -> usize {
        self.bullets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bullets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::{BulletConfig, BulletList, Heading, BULLET_HEIGHT, BULLET_WIDTH};
    use crate::test_frame::TestFrame;
    use astroraid_common::Color;

    const UP: BulletConfig = BulletConfig {
        speed: 30,
        heading: Heading::Up,
        color: Color::CYAN,
    };
    const DOWN: BulletConfig = BulletConfig {
        speed: 15,
        heading: Heading::Down,
        color: Color::PINK,
    };

    #[test]
    fn fire_appends_at_muzzle_point() {
        let mut list = BulletList::default();
        list.fire(100, 200, &UP);

        assert_eq!(list.len(), 1);
        let bullet = list.iter().next().unwrap();
        assert_eq!(bullet.rect().x, 100);
        assert_eq!(bullet.rect().y, 200);
        assert_eq!(bullet.rect().w, BULLET_WIDTH);
        assert_eq!(bullet.rect().h, BULLET_HEIGHT);
        assert_eq!(bullet.heading(), Heading::Up);
    }

    #[test]
    fn advance_moves_with_heading() {
        let mut list = BulletList::default();
        let mut frame = TestFrame::new((1200, 800));
        list.fire(10, 400, &UP);
        list.fire(20, 400, &DOWN);

        list.advance_and_draw(&mut frame);

        let positions: Vec<i32> = list.iter().map(|b| b.rect().y).collect();
        assert_eq!(positions, vec![400 - 30, 400 + 15]);
    }

    #[test]
    fn advance_prunes_bullets_leaving_the_viewport() {
        let mut list = BulletList::default();
        let mut frame = TestFrame::new((1200, 800));
        list.fire(10, 20, &UP); // leaves through the top this frame
        list.fire(20, 790, &DOWN); // leaves through the bottom this frame
        list.fire(30, 400, &UP); // stays

        list.advance_and_draw(&mut frame);

        assert_eq!(list.len(), 1);
        for bullet in list.iter() {
            let y = bullet.rect().y;
            assert!((0..=800).contains(&y));
        }
        // Only the survivor was drawn.
        assert_eq!(frame.rects.len(), 1);
    }

    #[test]
    fn bullet_on_the_edge_is_retained() {
        let mut list = BulletList::default();
        let mut frame = TestFrame::new((1200, 800));
        list.fire(10, 30, &UP); // lands exactly on y = 0

        list.advance_and_draw(&mut frame);

        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().next().unwrap().rect().y, 0);
    }

    #[test]
    fn remove_overlapping_consumes_only_hits() {
        let mut list = BulletList::default();
        list.fire(100, 100, &DOWN);
        list.fire(500, 500, &DOWN);

        let removed = list.remove_overlapping(astroraid_common::Rect::new(90, 90, 30, 30));

        assert_eq!(removed, 1);
        assert_eq!(list.len(), 1);
        assert_eq!(list.iter().next().unwrap().rect().x, 500);
    }
}
