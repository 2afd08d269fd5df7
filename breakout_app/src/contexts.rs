//! Breakout contexts: the playfield and the pause menu drawn over it

use context_engine::prelude::*;

/// Playfield width in pixels
pub const FIELD_WIDTH: f32 = 400.0;
/// Playfield height in pixels
pub const FIELD_HEIGHT: f32 = 600.0;

const PADDLE_WIDTH: f32 = 64.0;
const PADDLE_HEIGHT: f32 = 10.0;
const PADDLE_Y: f32 = FIELD_HEIGHT - 40.0;
const PADDLE_SPEED: f32 = 300.0;

const BALL_SIZE: f32 = 8.0;
const BALL_SPEED: f32 = 240.0;

const FIELD_COLOR: Color = Color::rgb(20, 20, 40);
const PADDLE_COLOR: Color = Color::rgb(230, 230, 230);
const BALL_COLOR: Color = Color::rgb(250, 200, 60);
const PANEL_COLOR: Color = Color::rgb(60, 60, 90);

#[derive(Debug, Clone, Copy)]
struct Ball {
    position: Vec2,
    velocity: Vec2,
}

/// The game itself. Opaque; pauses by entering the menu above it.
pub struct GameplayContext {
    pause_menu: ContextKey,
    paddle_x: f32,
    ball: Option<Ball>,
    serves: u32,
    balls_lost: u32,
}

impl GameplayContext {
    /// New session with the paddle centered and the ball waiting to be served
    pub fn new(pause_menu: ContextKey) -> Self {
        Self {
            pause_menu,
            paddle_x: (FIELD_WIDTH - PADDLE_WIDTH) / 2.0,
            ball: None,
            serves: 0,
            balls_lost: 0,
        }
    }

    fn paddle_rect(&self) -> Rect {
        Rect::new(self.paddle_x, PADDLE_Y, PADDLE_WIDTH, PADDLE_HEIGHT)
    }

    fn serve(&mut self) {
        let paddle = self.paddle_rect();
        self.ball = Some(Ball {
            position: Vec2::new(paddle.center().x - BALL_SIZE / 2.0, PADDLE_Y - BALL_SIZE),
            velocity: Vec2::new(0.6, -0.8) * BALL_SPEED,
        });
        self.serves += 1;
        log::info!("Serve #{}", self.serves);
    }

    fn move_ball(&mut self, delta_time: f32) {
        let paddle = self.paddle_rect();
        let Some(ball) = self.ball.as_mut() else {
            return;
        };

        ball.position += ball.velocity * delta_time;

        if ball.position.x < 0.0 || ball.position.x + BALL_SIZE > FIELD_WIDTH {
            ball.velocity.x = -ball.velocity.x;
            ball.position.x = ball.position.x.clamp(0.0, FIELD_WIDTH - BALL_SIZE);
        }
        if ball.position.y < 0.0 {
            ball.velocity.y = -ball.velocity.y;
            ball.position.y = 0.0;
        }

        let bottom = ball.position.y + BALL_SIZE;
        let over_paddle = ball.position.x + BALL_SIZE >= paddle.x
            && ball.position.x <= paddle.x + paddle.width;
        if ball.velocity.y > 0.0 && over_paddle && bottom >= paddle.y && bottom <= paddle.y + paddle.height {
            ball.velocity.y = -ball.velocity.y;
            ball.position.y = paddle.y - BALL_SIZE;
        }

        if ball.position.y > FIELD_HEIGHT {
            self.ball = None;
            self.balls_lost += 1;
            log::info!("Ball lost ({} so far)", self.balls_lost);
        }
    }
}

impl Context for GameplayContext {
    fn name(&self) -> &str {
        "gameplay"
    }

    fn advance(&mut self, delta_time: f32, control: &mut ContextControl<'_>) {
        let input = control.input();
        let steer = input.directional_move.x;
        let serve = input.serve_ball.is_just_pressed();
        let pause = input.toggle_pause.is_just_pressed();

        self.paddle_x = (self.paddle_x + steer * PADDLE_SPEED * delta_time)
            .clamp(0.0, FIELD_WIDTH - PADDLE_WIDTH);

        if serve && self.ball.is_none() {
            self.serve();
        }
        self.move_ball(delta_time);

        if pause {
            if let Err(err) = control.enter(self.pause_menu) {
                log::warn!("Cannot open pause menu: {}", err);
            }
        }
    }

    fn render(&self, surface: &mut dyn RenderTarget) {
        surface.fill_rect(Rect::new(0.0, 0.0, FIELD_WIDTH, FIELD_HEIGHT), FIELD_COLOR);
        surface.fill_rect(self.paddle_rect(), PADDLE_COLOR);
        if let Some(ball) = &self.ball {
            surface.fill_rect(
                Rect::new(ball.position.x, ball.position.y, BALL_SIZE, BALL_SIZE),
                BALL_COLOR,
            );
        }
        surface.draw_text(
            Vec2::new(8.0, 8.0),
            &format!("Serves {}  Lost {}", self.serves, self.balls_lost),
            PADDLE_COLOR,
        );
    }

    fn is_opaque(&self) -> bool {
        true
    }

    fn is_menu(&self) -> bool {
        false
    }
}

/// Pause menu entries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    /// Back to the game
    Resume,
    /// Leave the game entirely
    Quit,
}

impl MenuItem {
    const ALL: [MenuItem; 2] = [MenuItem::Resume, MenuItem::Quit];

    fn label(self) -> &'static str {
        match self {
            MenuItem::Resume => "Resume",
            MenuItem::Quit => "Quit",
        }
    }
}

/// Translucent pause menu. Keeps its cursor between openings.
#[derive(Debug, Default)]
pub struct PauseMenuContext {
    selected: usize,
}

impl PauseMenuContext {
    /// Menu with the cursor on "Resume"
    pub fn new() -> Self {
        Self::default()
    }

    /// Highlighted entry
    pub fn selected(&self) -> MenuItem {
        MenuItem::ALL[self.selected]
    }
}

impl Context for PauseMenuContext {
    fn name(&self) -> &str {
        "pause menu"
    }

    fn advance(&mut self, _delta_time: f32, control: &mut ContextControl<'_>) {
        let input = control.input();
        let last = MenuItem::ALL.len() - 1;
        if input.navigate_up.is_triggered() {
            self.selected = self.selected.saturating_sub(1);
        }
        if input.navigate_down.is_triggered() {
            self.selected = (self.selected + 1).min(last);
        }

        if input.cancel.is_just_pressed() {
            if let Err(err) = control.exit_self() {
                log::warn!("Pause menu could not close: {}", err);
            }
            return;
        }

        if input.activate.is_just_pressed() {
            match self.selected() {
                MenuItem::Resume => {
                    if let Err(err) = control.exit_self() {
                        log::warn!("Pause menu could not close: {}", err);
                    }
                }
                MenuItem::Quit => {
                    log::info!("Quit selected");
                    control.exit_all();
                }
            }
        }
    }

    fn render(&self, surface: &mut dyn RenderTarget) {
        let panel = Rect::new(FIELD_WIDTH / 2.0 - 80.0, FIELD_HEIGHT / 2.0 - 50.0, 160.0, 100.0);
        surface.fill_rect(panel, PANEL_COLOR);
        surface.draw_text(Vec2::new(panel.x + 16.0, panel.y + 12.0), "Paused", Color::WHITE);

        for (index, item) in MenuItem::ALL.iter().enumerate() {
            let marker = if index == self.selected { ">" } else { " " };
            surface.draw_text(
                Vec2::new(panel.x + 16.0, panel.y + 40.0 + index as f32 * 24.0),
                &format!("{} {}", marker, item.label()),
                Color::WHITE,
            );
        }
    }

    fn is_opaque(&self) -> bool {
        false
    }

    fn is_menu(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DT: f32 = 1.0 / 30.0;

    struct Scene {
        contexts: ContextManager<RecordingSurface>,
        gameplay: ContextKey,
        pause_menu: ContextKey,
    }

    fn scene() -> Scene {
        let mut contexts = ContextManager::new();
        contexts.bind_surface(RecordingSurface::new(FIELD_WIDTH as u32, FIELD_HEIGHT as u32));
        let pause_menu = contexts.register(PauseMenuContext::new());
        let gameplay = contexts.register(GameplayContext::new(pause_menu));
        contexts.enter(gameplay).unwrap();
        Scene {
            contexts,
            gameplay,
            pause_menu,
        }
    }

    /// Rectangles of `color` drawn in the latest frame
    fn rects(scene: &Scene, color: Color) -> Vec<Rect> {
        let commands = scene.contexts.surface().unwrap().commands();
        let start = commands
            .iter()
            .rposition(|c| matches!(c, DrawCommand::Clear(_)))
            .unwrap_or(0);
        commands[start..]
            .iter()
            .filter_map(|c| match c {
                DrawCommand::FillRect { rect, color: fill } if *fill == color => Some(*rect),
                _ => None,
            })
            .collect()
    }

    fn paddle_x(scene: &Scene) -> f32 {
        rects(scene, PADDLE_COLOR)[0].x
    }

    fn ball_in_play(scene: &Scene) -> bool {
        !rects(scene, BALL_COLOR).is_empty()
    }

    fn score(scene: &Scene) -> String {
        scene.contexts.surface().unwrap().texts_since_clear()[0].to_string()
    }

    fn press(set: impl FnOnce(&mut InputActionStates)) -> InputActionStates {
        let mut input = InputActionStates::new();
        set(&mut input);
        input
    }

    #[test]
    fn test_paddle_follows_direction_and_stays_on_field() {
        let mut scene = scene();
        scene.contexts.tick(DT, &InputActionStates::new());
        let start = paddle_x(&scene);

        let right = press(|i| i.directional_move = Vec2::new(1.0, 0.0));
        scene.contexts.tick(DT, &right);
        assert!(paddle_x(&scene) > start);

        for _ in 0..200 {
            scene.contexts.tick(DT, &right);
        }
        assert_eq!(paddle_x(&scene), FIELD_WIDTH - PADDLE_WIDTH);
    }

    #[test]
    fn test_serve_only_on_press() {
        let mut scene = scene();

        scene.contexts.tick(DT, &press(|i| i.serve_ball = ButtonState::Held));
        assert!(!ball_in_play(&scene));

        scene.contexts.tick(DT, &press(|i| i.serve_ball = ButtonState::Down));
        assert!(ball_in_play(&scene));
        assert_eq!(score(&scene), "Serves 1  Lost 0");

        // a second press while the ball is live does nothing
        scene.contexts.tick(DT, &press(|i| i.serve_ball = ButtonState::Down));
        assert_eq!(score(&scene), "Serves 1  Lost 0");
    }

    #[test]
    fn test_pause_draws_menu_over_frozen_game() {
        let mut scene = scene();
        scene.contexts.tick(DT, &press(|i| i.toggle_pause = ButtonState::Down));

        assert_eq!(scene.contexts.current(), Some(scene.pause_menu));
        let texts = scene.contexts.surface().unwrap().texts_since_clear();
        assert_eq!(texts, vec!["Serves 0  Lost 0", "Paused", "> Resume", "  Quit"]);

        // gameplay no longer advances
        let x = paddle_x(&scene);
        scene.contexts.tick(DT, &press(|i| i.directional_move = Vec2::new(1.0, 0.0)));
        assert_eq!(paddle_x(&scene), x);
    }

    #[test]
    fn test_cancel_and_resume_close_menu() {
        let mut scene = scene();
        scene.contexts.tick(DT, &press(|i| i.toggle_pause = ButtonState::Down));

        scene.contexts.tick(DT, &press(|i| i.cancel = ButtonState::Down));
        assert_eq!(scene.contexts.stack(), &[scene.gameplay]);

        scene.contexts.tick(DT, &press(|i| i.toggle_pause = ButtonState::Down));
        scene.contexts.tick(DT, &press(|i| i.activate = ButtonState::Down));
        assert_eq!(scene.contexts.stack(), &[scene.gameplay]);
    }

    #[test]
    fn test_quit_empties_stack() {
        let mut scene = scene();
        scene.contexts.tick(DT, &press(|i| i.toggle_pause = ButtonState::Down));

        scene.contexts.tick(DT, &press(|i| i.navigate_down = ButtonState::Down));
        // held navigation does not move the cursor again
        scene.contexts.tick(DT, &press(|i| i.navigate_down = ButtonState::Held));
        scene.contexts.tick(DT, &press(|i| i.navigate_up = ButtonState::Held));
        scene.contexts.tick(DT, &press(|i| i.activate = ButtonState::Down));

        assert!(scene.contexts.is_empty());
        assert!(scene.contexts.context_changed_last_frame());
    }
}
