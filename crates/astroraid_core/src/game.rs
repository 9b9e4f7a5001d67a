use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;

use astroraid_common::{App, Frame, Key};

use crate::alien::{AlienGrid, AlienGridConfig};
use crate::bullet::BulletList;
use crate::end::EndScreen;
use crate::player::{Direction, Player, PlayerConfig};
use crate::start::StartScreen;
use crate::stats::Stats;

/// Points per alien kill.
pub const KILL_REWARD: u32 = 30;

#[derive(Clone, Debug)]
pub struct GameConfig {
    /// Viewport size in pixels, (width, height).
    pub viewport: (i32, i32),
    pub alien_grid: AlienGridConfig,
    pub player: PlayerConfig,
}

impl GameConfig {
    pub fn new(viewport: (i32, i32)) -> GameConfig {
        GameConfig {
            viewport,
            alien_grid: AlienGridConfig {
                rows: 5,
                cols: 10,
                margin_row: 20,
                margin_col: 20,
                return_point: 30,
                speed_max: 5,
                speed_step: 3,
                bullet_speed: 15,
                fire_rate: 0.05,
                step_size_x: 10,
                step_size_y: 10,
            },
            player: PlayerConfig {
                step_size: 30,
                bullet_speed: 30,
                lives: 5,
            },
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum Scene {
    Start,
    Play,
    End,
}

/// What a key press asks the game to do. Presses are queued as actions and
/// resolved at the top of the next update, when a frame is available.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Action {
    MoveLeft,
    MoveRight,
    Fire,
    Begin,
}

/// One step of a scene's per-frame pipeline. Each scene activation builds
/// its stage list once; the host runs it in order every frame.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
enum Stage {
    DrawStart,
    DrawEnd,
    DrawPlayer,
    DrawAlienBullets,
    DrawPlayerBullets,
    DrawAliens,
    DrawStats,
    ResolveAlienHits,
    ResolvePlayerHits,
    TestBoundary,
    TestPlayerCollision,
    AlienFire,
}

/// The scene director. Owns every entity and the per-scene stage list and
/// key bindings; switching scenes replaces both wholesale, which is what
/// keeps a finished scene's handlers from ever running again.
pub struct Game {
    config: GameConfig,
    scene: Scene,
    stages: Vec<Stage>,
    bindings: Vec<(Key, Action)>,
    pending: Vec<Action>,
    player: Player,
    grid: AlienGrid,
    player_bullets: BulletList,
    alien_bullets: BulletList,
    start: StartScreen,
    end: EndScreen,
    stats: Stats,
    score: u32,
    rng: StdRng,
}

impl Game {
    pub fn new(config: GameConfig) -> Game {
        Game::with_rng(config, StdRng::from_entropy())
    }

    /// Like `new` but with a caller-supplied RNG, so enemy fire can be
    /// driven deterministically.
    pub fn with_rng(config: GameConfig, rng: StdRng) -> Game {
        let mut game = Game {
            scene: Scene::Start,
            stages: Vec::new(),
            bindings: Vec::new(),
            pending: Vec::new(),
            player: Player::new(&config.player, config.viewport),
            grid: AlienGrid::new(&config.alien_grid, config.viewport.0),
            player_bullets: BulletList::default(),
            alien_bullets: BulletList::default(),
            start: StartScreen::new(),
            end: EndScreen::new(0),
            stats: Stats::new(),
            score: 0,
            rng,
            config,
        };
        game.switch_scene(Scene::Start);
        game
    }

    pub fn scene(&self) -> Scene {
        self.scene
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    fn switch_scene(&mut self, scene: Scene) {
        // Dropping the old stage list and bindings is the scene-transition
        // contract: nothing registered by the previous scene survives.
        self.stages.clear();
        self.bindings.clear();
        self.pending.clear();
        self.scene = scene;

        match scene {
            Scene::Start => self.scene_start(),
            Scene::Play => self.scene_play(),
            Scene::End => self.scene_end(),
        }
        info!("switched to {scene:?} scene");
    }

    fn scene_start(&mut self) {
        self.start = StartScreen::new();
        self.stages.push(Stage::DrawStart);
        self.bindings.push((Key::Return, Action::Begin));
    }

    fn scene_play(&mut self) {
        self.player = Player::new(&self.config.player, self.config.viewport);
        self.start_level();
        self.score = 0;
        self.stats = Stats::new();

        self.bindings = vec![
            (Key::Left, Action::MoveLeft),
            (Key::Right, Action::MoveRight),
            (Key::Space, Action::Fire),
        ];
        self.stages = vec![
            Stage::DrawPlayer,
            Stage::DrawAlienBullets,
            Stage::DrawPlayerBullets,
            Stage::DrawAliens,
            Stage::DrawStats,
            Stage::ResolveAlienHits,
            Stage::ResolvePlayerHits,
            Stage::TestBoundary,
            Stage::TestPlayerCollision,
            Stage::AlienFire,
        ];
    }

    fn scene_end(&mut self) {
        self.end = EndScreen::new(self.score);
        self.stages.push(Stage::DrawEnd);
        self.bindings.push((Key::Return, Action::Begin));
    }

    /// Rebuilds the alien grid and both bullet lists for a fresh level.
    /// Player and score are level-independent and survive.
    fn start_level(&mut self) {
        self.grid = AlienGrid::new(&self.config.alien_grid, self.config.viewport.0);
        self.player_bullets = BulletList::default();
        self.alien_bullets = BulletList::default();
    }

    fn perform(&mut self, action: Action, frame: &mut dyn Frame) {
        match action {
            Action::MoveLeft => self.player.advance(Direction::Left, self.config.viewport.0),
            Action::MoveRight => self.player.advance(Direction::Right, self.config.viewport.0),
            Action::Fire => self.player.fire(&mut self.player_bullets, frame),
            Action::Begin => self.switch_scene(Scene::Play),
        }
    }

    fn run_stage(&mut self, stage: Stage, frame: &mut dyn Frame) {
        match stage {
            Stage::DrawStart => self.start.draw(frame),
            Stage::DrawEnd => self.end.draw(frame),
            Stage::DrawPlayer => self.player.draw(frame),
            Stage::DrawAlienBullets => self.alien_bullets.advance_and_draw(frame),
            Stage::DrawPlayerBullets => self.player_bullets.advance_and_draw(frame),
            Stage::DrawAliens => self.grid.draw_and_advance(frame),
            Stage::DrawStats => self.stats.draw(frame, self.player.lives(), self.score),
            Stage::ResolveAlienHits => {
                let (hit, remaining) = self.grid.test_hit(&mut self.player_bullets, frame);
                if hit {
                    self.score += KILL_REWARD;
                    if remaining == 0 {
                        info!("level cleared at {} points", self.score);
                        self.start_level();
                    }
                }
            }
            Stage::ResolvePlayerHits => {
                if self.player.test_hit(&mut self.alien_bullets, frame) {
                    self.switch_scene(Scene::End);
                }
            }
            Stage::TestBoundary => {
                if self.grid.test_boundary(self.config.viewport.1) {
                    self.switch_scene(Scene::End);
                }
            }
            Stage::TestPlayerCollision => {
                if self.grid.test_player_collision(&self.player) {
                    self.switch_scene(Scene::End);
                }
            }
            Stage::AlienFire => self.grid.fire(&mut self.alien_bullets, &mut self.rng),
        }
    }
}

impl App for Game {
    fn init(&mut self) {
        info!("game ready");
    }

    fn update(&mut self, frame: &mut dyn Frame) {
        // Input first: queued key presses become player movement, fire
        // requests or a scene change.
        let pending = std::mem::take(&mut self.pending);
        for action in pending {
            self.perform(action, frame);
        }

        // Then the active scene's pipeline. A stage that switches scenes
        // ends the pass; the new scene starts clean next frame.
        let scene = self.scene;
        let mut index = 0;
        while self.scene == scene {
            let Some(&stage) = self.stages.get(index) else {
                break;
            };
            self.run_stage(stage, frame);
            index += 1;
        }
    }

    fn handle_key(&mut self, key: Key) {
        if let Some(&(_, action)) = self.bindings.iter().find(|(bound, _)| *bound == key) {
            self.pending.push(action);
        }
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::{Game, GameConfig, Scene, KILL_REWARD};
    use crate::alien::{ALIEN_HEIGHT, ALIEN_WIDTH};
    use crate::bullet::{BulletConfig, Heading};
    use crate::end::GAME_OVER_TEXT;
    use crate::start::TITLE_TEXT;
    use crate::test_frame::TestFrame;
    use astroraid_common::{App, Color, Key, Sprite};

    const VIEWPORT: (i32, i32) = (1200, 800);

    fn config() -> GameConfig {
        let mut config = GameConfig::new(VIEWPORT);
        // Keep the enemy guns quiet unless a test wants them.
        config.alien_grid.fire_rate = 0.0;
        config
    }

    fn game(config: GameConfig) -> Game {
        Game::with_rng(config, StdRng::seed_from_u64(1234))
    }

    /// Parks a zero-speed player bullet on a live alien so the next update
    /// resolves a hit regardless of formation movement.
    fn plant_bullet_on_alien(game: &mut Game) {
        let target = game
            .grid
            .slots()
            .iter()
            .flatten()
            .next()
            .copied()
            .expect("no live alien to aim at");
        game.player_bullets.fire(
            target.x + ALIEN_WIDTH / 2,
            target.y + ALIEN_HEIGHT / 2,
            &BulletConfig {
                speed: 0,
                heading: Heading::Up,
                color: Color::CYAN,
            },
        );
    }

    fn plant_bullet_on_player(game: &mut Game) {
        let rect = game.player.rect();
        game.alien_bullets.fire(
            rect.x + 10,
            rect.y + 10,
            &BulletConfig {
                speed: 0,
                heading: Heading::Down,
                color: Color::PINK,
            },
        );
    }

    #[test]
    fn boots_into_the_start_scene() {
        let mut game = game(config());
        let mut frame = TestFrame::new(VIEWPORT);

        assert_eq!(game.scene(), Scene::Start);
        game.update(&mut frame);
        assert!(frame.text_drawn(TITLE_TEXT));
        // No simulation on the start screen.
        assert!(frame.rects.is_empty());
    }

    #[test]
    fn return_starts_a_fresh_play_scene() {
        let mut game = game(config());
        let mut frame = TestFrame::new(VIEWPORT);

        game.handle_key(Key::Return);
        game.update(&mut frame);

        assert_eq!(game.scene(), Scene::Play);
        assert_eq!(game.grid.len(), 50);
        assert_eq!(game.score(), 0);
        assert_eq!(game.player.lives(), 5);
    }

    #[test]
    fn play_scene_draws_the_world_and_hud() {
        let mut game = game(config());
        let mut frame = TestFrame::new(VIEWPORT);
        game.handle_key(Key::Return);
        game.update(&mut frame);

        frame.reset();
        game.update(&mut frame);

        let players = frame
            .sprites
            .iter()
            .filter(|(s, _)| *s == Sprite::Player)
            .count();
        let aliens = frame
            .sprites
            .iter()
            .filter(|(s, _)| *s == Sprite::Alien)
            .count();
        assert_eq!(players, 1);
        assert_eq!(aliens, 50);
        assert!(frame.text_drawn("LIVES: 5"));
        assert!(frame.text_drawn("POINTS: 00000000"));
    }

    #[test]
    fn movement_keys_only_bind_in_play() {
        let mut game = game(config());

        // On the start screen nothing is bound to Space or the arrows.
        game.handle_key(Key::Space);
        game.handle_key(Key::Left);
        assert!(game.pending.is_empty());

        let mut frame = TestFrame::new(VIEWPORT);
        game.handle_key(Key::Return);
        game.update(&mut frame);

        let x = game.player.rect().x;
        game.handle_key(Key::Left);
        game.update(&mut frame);
        assert_eq!(game.player.rect().x, x - 30);
    }

    #[test]
    fn kills_score_and_clearing_the_grid_restarts_the_level() {
        let mut config = config();
        config.alien_grid.rows = 2;
        config.alien_grid.cols = 3;
        let mut game = game(config);
        let mut frame = TestFrame::new(VIEWPORT);
        game.handle_key(Key::Return);
        game.update(&mut frame);

        let total = 2 * 3;
        for kill in 0..total {
            plant_bullet_on_alien(&mut game);
            game.update(&mut frame);
            assert_eq!(game.score(), KILL_REWARD * (kill as u32 + 1));
        }

        // The last kill cleared the level: fresh grid, score intact,
        // still playing.
        assert_eq!(game.scene(), Scene::Play);
        assert_eq!(game.grid.len(), total);
        assert_eq!(game.score(), KILL_REWARD * total as u32);
        assert!(game.player_bullets.is_empty());
        assert!(game.alien_bullets.is_empty());
    }

    #[test]
    fn losing_every_life_ends_the_game_with_the_score_kept() {
        let mut config = config();
        config.player.lives = 2;
        let mut game = game(config);
        let mut frame = TestFrame::new(VIEWPORT);
        game.handle_key(Key::Return);
        game.update(&mut frame);

        // Bank some points first so the carry-over is visible.
        plant_bullet_on_alien(&mut game);
        game.update(&mut frame);
        assert_eq!(game.score(), KILL_REWARD);

        plant_bullet_on_player(&mut game);
        game.update(&mut frame);
        assert_eq!(game.scene(), Scene::Play);
        assert_eq!(game.player.lives(), 1);

        plant_bullet_on_player(&mut game);
        game.update(&mut frame);
        assert_eq!(game.scene(), Scene::End);
        assert_eq!(game.score(), KILL_REWARD);

        frame.reset();
        game.update(&mut frame);
        assert!(frame.text_drawn(GAME_OVER_TEXT));
        assert!(frame.text_drawn(&format!("POINTS: {KILL_REWARD}")));
    }

    #[test]
    fn restart_from_the_end_screen_resets_everything() {
        let mut config = config();
        config.player.lives = 1;
        let mut game = game(config);
        let mut frame = TestFrame::new(VIEWPORT);
        game.handle_key(Key::Return);
        game.update(&mut frame);

        plant_bullet_on_alien(&mut game);
        game.update(&mut frame);
        plant_bullet_on_player(&mut game);
        game.update(&mut frame);
        assert_eq!(game.scene(), Scene::End);

        game.handle_key(Key::Return);
        game.update(&mut frame);

        assert_eq!(game.scene(), Scene::Play);
        assert_eq!(game.score(), 0);
        assert_eq!(game.grid.len(), 50);
        assert_eq!(game.player.lives(), 1);
    }

    #[test]
    fn boundary_breach_ends_the_game() {
        // A short viewport puts the fresh formation's bottom edge at the
        // ground already.
        let mut config = config();
        config.viewport = (1200, 500);
        let mut game = game(config);
        let mut frame = TestFrame::new((1200, 500));

        game.handle_key(Key::Return);
        game.update(&mut frame);

        assert_eq!(game.scene(), Scene::End);
    }

    #[test]
    fn scene_switch_drops_stale_input_bindings() {
        let mut config = config();
        config.player.lives = 1;
        let mut game = game(config);
        let mut frame = TestFrame::new(VIEWPORT);
        game.handle_key(Key::Return);
        game.update(&mut frame);

        plant_bullet_on_player(&mut game);
        game.update(&mut frame);
        assert_eq!(game.scene(), Scene::End);

        // Play-scene keys are gone; only Return is live again.
        game.handle_key(Key::Space);
        game.handle_key(Key::Left);
        assert!(game.pending.is_empty());
    }

    #[test]
    fn stale_stages_stop_running_after_a_mid_frame_switch() {
        let mut config = config();
        config.player.lives = 1;
        // Guns blazing: every column fires on every enemy-fire stage.
        config.alien_grid.fire_rate = 1.0;
        let mut game = game(config);
        let mut frame = TestFrame::new(VIEWPORT);
        game.handle_key(Key::Return);
        game.update(&mut frame);

        // One full Play frame ran, so exactly one volley is in the air.
        assert_eq!(game.alien_bullets.len(), 10);

        plant_bullet_on_player(&mut game);
        game.update(&mut frame);

        // The player-hit stage switched to End mid-frame. The enemy-fire
        // stage of the dead Play scene must not have run afterwards, so
        // only the first volley remains (the planted bullet is consumed).
        assert_eq!(game.scene(), Scene::End);
        assert_eq!(game.alien_bullets.len(), 10);
    }

    #[test]
    fn seeded_alien_fire_reaches_the_player_eventually() {
        let mut config = config();
        config.alien_grid.fire_rate = 0.5;
        let mut game = game(config);
        let mut frame = TestFrame::new(VIEWPORT);
        game.handle_key(Key::Return);
        game.update(&mut frame);

        let mut fired = false;
        for _ in 0..200 {
            game.update(&mut frame);
            if !game.alien_bullets.is_empty() {
                fired = true;
                break;
            }
        }
        assert!(fired, "aliens never fired at 50% rate");
    }
}
