use crossterm::event::KeyCode;
use rand::rngs::StdRng;
use ratatui::{
    style::{Modifier, Style},
    text::{Line, Span},
    Frame,
};
use tracing::debug;

use crate::game::{spawn_food, Direction, Food, GameSettings, Grid, Snake, Sprite};
use crate::input::{keys, EventKind, Registry, WrappedEvent};
use crate::render::{Layer, Renderer};

use super::{Advance, DirectionChange, Schedule, State, StateSetter, Transition};

/// Snake, food and heading for one round
#[derive(Debug)]
pub struct Board {
    settings: GameSettings,
    grid: Grid,
    snake: Snake,
    food: Vec<Food>,
    direction: Direction,
    direction_changed: bool,
    rng: StdRng,
    next_food_id: u64,
}

impl Board {
    /// Fresh round: a one-segment snake in the middle heading up, plus one
    /// food off the snake
    pub fn new(settings: GameSettings, rng: StdRng) -> Self {
        let grid = Grid::new(settings.unit_size, settings.grid_size);
        let snake = Snake::new(grid.center_cell());
        let mut board = Self::with_snake(settings, snake, Direction::Up, rng);
        board.spawn_food();
        board
    }

    /// A board with a given snake and heading and no food yet
    pub fn with_snake(
        settings: GameSettings,
        snake: Snake,
        direction: Direction,
        rng: StdRng,
    ) -> Self {
        let grid = Grid::new(settings.unit_size, settings.grid_size);
        Self {
            settings,
            grid,
            snake,
            food: Vec::new(),
            direction,
            direction_changed: false,
            rng,
            next_food_id: 0,
        }
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn food(&self) -> &[Food] {
        &self.food
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn score(&self) -> usize {
        self.snake.len()
    }

    /// Set the heading for the next step
    ///
    /// Only the first change between two steps counts.
    pub fn change_direction(&mut self, direction: Direction) {
        if self.direction_changed {
            debug!(?direction, "direction already changed this tick");
            return;
        }

        debug!(from = ?self.direction, to = ?direction, "direction changed");
        self.direction = direction;
        self.direction_changed = true;
    }

    /// One simulation step
    ///
    /// Returns a transition to game over when the snake runs into itself.
    pub fn advance(&mut self) -> Option<Transition> {
        if self.food.is_empty() {
            self.spawn_food();
        }

        let eaten = self.pop_found_food();
        let next_head = self.grid.step(&self.snake.head(), self.direction);

        if eaten > 0 || self.snake.len() < self.settings.auto_grow_until {
            self.snake.grow(next_head);
        } else {
            self.snake.move_to(next_head);
        }
        self.direction_changed = false;

        if self.snake.collides_with_self() {
            debug!(score = self.score(), "snake collided with itself");
            return Some(Transition::ToGameOver {
                score: self.score(),
            });
        }

        None
    }

    /// Remove all food the head is on; returns how many were eaten
    fn pop_found_food(&mut self) -> usize {
        let before = self.food.len();
        let snake = &self.snake;
        self.food.retain(|food| {
            let found = food.found_by(snake);
            if found {
                debug!(id = food.id(), "food eaten");
            }
            !found
        });
        before - self.food.len()
    }

    fn spawn_food(&mut self) {
        let id = self.next_food_id;
        if let Some(food) = spawn_food(
            &self.grid,
            &self.snake,
            &mut self.rng,
            self.settings.max_food_attempts,
            id,
        ) {
            self.next_food_id += 1;
            self.food.push(food);
        }
    }
}

/// The round in progress
#[derive(Debug)]
pub struct PlayingState {
    registry: Registry<Board>,
    board: Board,
}

impl PlayingState {
    pub fn new(settings: GameSettings, rng: StdRng) -> Self {
        Self::from_board(Board::new(settings, rng))
    }

    /// Wrap an existing board with the playing bindings
    pub fn from_board(board: Board) -> Self {
        let mut registry = Registry::new();
        for (code, direction) in keys::ARROWS {
            registry.bind(WrappedEvent::KeyPress(code), DirectionChange(direction));
        }
        registry
            .bind(key(keys::MENU), StateSetter(Transition::ToMenu))
            .bind(key(keys::RESTART), StateSetter(Transition::ToPlaying))
            .bind(key(keys::QUIT), StateSetter(Transition::Quit))
            .bind(WrappedEvent::Tick, Advance);

        Self { registry, board }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }
}

fn key(code: KeyCode) -> WrappedEvent {
    WrappedEvent::KeyPress(code)
}

impl State for PlayingState {
    fn name(&self) -> &'static str {
        "Playing"
    }

    fn on_enter(&mut self, schedule: &mut Schedule) {
        schedule
            .allow(EventKind::Key)
            .allow(EventKind::Tick)
            .arm(self.board.settings.tick_interval());
    }

    fn handle_event(&mut self, event: &WrappedEvent) -> Option<Transition> {
        self.registry.dispatch(event, &mut self.board)
    }

    fn render(&self, frame: &mut Frame, renderer: &Renderer) {
        let settings = &self.board.settings;
        renderer.fill(frame, settings.game_background);

        // Snake goes last so it is drawn on top
        let layers = [
            Layer::new(
                self.board.food.iter().flat_map(|food| food.rects()),
                settings.food_colors,
            ),
            Layer::new(self.board.snake.rects(), settings.snake_colors),
        ];
        let status = Line::from(vec![
            Span::raw("Length: "),
            Span::styled(
                self.board.score().to_string(),
                Style::new().add_modifier(Modifier::BOLD),
            ),
        ]);

        renderer.draw_board(frame, settings.game_background, &layers, status);
    }
}
