use rand::Rng;
use std::collections::VecDeque;
use tracing::{debug, trace, warn};

use super::geometry::{Point, Rect};
use super::grid::Grid;

/// Anything drawn on the board as a set of rectangles
pub trait Sprite {
    fn rects(&self) -> impl Iterator<Item = Rect> + '_;

    /// True if any rectangle of `self` intersects any rectangle of `other`
    fn collides_with<S: Sprite>(&self, other: &S) -> bool {
        self.rects()
            .any(|mine| other.rects().any(|theirs| mine.intersects(&theirs)))
    }
}

/// The snake in the game
///
/// Body segments are kept in movement order: index 0 is the head, the
/// cell the snake moved into most recently.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snake {
    body: VecDeque<Rect>,
}

impl Snake {
    /// A snake made of a single head segment
    pub fn new(head: Rect) -> Self {
        Self {
            body: VecDeque::from([head]),
        }
    }

    /// Build a snake from explicit segments, head first
    ///
    /// Returns `None` for an empty body.
    pub fn from_segments(segments: impl IntoIterator<Item = Rect>) -> Option<Self> {
        let body: VecDeque<Rect> = segments.into_iter().collect();
        if body.is_empty() {
            None
        } else {
            Some(Self { body })
        }
    }

    /// Get the head segment
    pub fn head(&self) -> Rect {
        self.body[0]
    }

    /// Body segments excluding the head, neck first
    pub fn tail(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.body.iter().skip(1)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Rect> + '_ {
        self.body.iter()
    }

    /// Get the length of the snake
    pub fn len(&self) -> usize {
        self.body.len()
    }

    /// Always false; a snake keeps at least its head
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Recycle the last segment as the new head at `new_head`
    pub fn move_to(&mut self, new_head: Point) {
        trace!(x = new_head.x, y = new_head.y, "snake move");
        let size = self.head().size();
        if self.body.pop_back().is_some() {
            self.body.push_front(Rect::from_parts(new_head, size));
        }
    }

    /// Add a new head at `new_head` and keep the tail where it is
    pub fn grow(&mut self, new_head: Point) {
        trace!(x = new_head.x, y = new_head.y, "snake grow");
        let segment = self.head().moved_to(new_head);
        self.body.push_front(segment);
    }

    /// True if the head overlaps any other segment
    pub fn collides_with_self(&self) -> bool {
        let head = self.head();
        self.tail().any(|segment| segment.intersects(&head))
    }

    /// True if the head sits on `food`
    pub fn found_food(&self, food: &Food) -> bool {
        let head = self.head();
        food.rects().any(|rect| head.intersects(&rect))
    }
}

impl Sprite for Snake {
    fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        self.body.iter().copied()
    }
}

/// A single piece of food
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Food {
    id: u64,
    rect: Rect,
}

impl Food {
    pub fn new(id: u64, rect: Rect) -> Self {
        Self { id, rect }
    }

    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }

    /// True if the snake's head has reached this food
    pub fn found_by(&self, snake: &Snake) -> bool {
        snake.found_food(self)
    }
}

impl Sprite for Food {
    fn rects(&self) -> impl Iterator<Item = Rect> + '_ {
        std::iter::once(self.rect)
    }
}

/// Place a new food on a random cell the snake does not cover
///
/// Tries `max_attempts` random cells, then takes the first free cell in
/// row order. Returns `None` only when the snake covers the whole grid.
pub fn spawn_food<R: Rng + ?Sized>(
    grid: &Grid,
    snake: &Snake,
    rng: &mut R,
    max_attempts: usize,
    id: u64,
) -> Option<Food> {
    for _ in 0..max_attempts {
        let food = Food::new(id, grid.random_cell(rng));
        if !snake.collides_with(&food) {
            debug!(id, x = food.rect.x, y = food.rect.y, "food spawned");
            return Some(food);
        }
    }

    let fallback = grid
        .all_cells()
        .map(|rect| Food::new(id, rect))
        .find(|food| !snake.collides_with(food));

    match fallback {
        Some(food) => {
            debug!(id, x = food.rect.x, y = food.rect.y, "food spawned by scan");
            Some(food)
        }
        None => {
            warn!(snake_len = snake.len(), "no free cell left for food");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::geometry::Size;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn unit() -> Size {
        Size::new(10, 10)
    }

    fn cell(x: i32, y: i32) -> Rect {
        Rect::new(x * 10, y * 10, 10, 10)
    }

    fn snake(cells: &[(i32, i32)]) -> Snake {
        Snake::from_segments(cells.iter().map(|&(x, y)| cell(x, y))).unwrap()
    }

    #[test]
    fn test_snake_creation() {
        let snake = Snake::new(cell(5, 5));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), cell(5, 5));
        assert_eq!(snake.tail().count(), 0);
        assert!(!snake.collides_with_self());
    }

    #[test]
    fn test_empty_segments_rejected() {
        assert!(Snake::from_segments(Vec::new()).is_none());
    }

    #[test]
    fn test_move_preserves_length() {
        let mut snake = snake(&[(5, 5), (4, 5), (3, 5)]);
        snake.move_to(Point::new(60, 50));

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), cell(6, 5));
        let tail: Vec<Rect> = snake.tail().copied().collect();
        assert_eq!(tail, vec![cell(5, 5), cell(4, 5)]);
    }

    #[test]
    fn test_move_single_segment() {
        let mut snake = Snake::new(cell(0, 0));
        snake.move_to(Point::new(10, 0));
        assert_eq!(snake.len(), 1);
        assert_eq!(snake.head(), cell(1, 0));
    }

    #[test]
    fn test_grow_adds_one() {
        let mut snake = snake(&[(5, 5), (4, 5)]);
        snake.grow(Point::new(50, 60));

        assert_eq!(snake.len(), 3);
        assert_eq!(snake.head(), cell(5, 6));
        assert_eq!(snake.head().size(), unit());
        let tail: Vec<Rect> = snake.tail().copied().collect();
        assert_eq!(tail, vec![cell(5, 5), cell(4, 5)]);
    }

    #[test]
    fn test_self_collision() {
        assert!(!snake(&[(5, 5), (4, 5), (3, 5)]).collides_with_self());
        assert!(snake(&[(4, 5), (5, 5), (4, 5)]).collides_with_self());
        assert!(snake(&[(2, 2), (2, 3), (3, 3), (3, 2), (2, 2)]).collides_with_self());
    }

    #[test]
    fn test_food_pickup_checks_head_only() {
        let snake = snake(&[(5, 5), (4, 5)]);
        assert!(Food::new(0, cell(5, 5)).found_by(&snake));
        assert!(!Food::new(0, cell(4, 5)).found_by(&snake));
        assert!(snake.collides_with(&Food::new(0, cell(4, 5))));
        assert!(!snake.collides_with(&Food::new(0, cell(0, 0))));
    }

    #[test]
    fn test_spawned_food_never_on_snake() {
        let grid = Grid::new(unit(), Size::new(6, 6));
        let mut rng = StdRng::seed_from_u64(42);
        let snake = snake(&[
            (0, 0),
            (1, 0),
            (2, 0),
            (3, 0),
            (4, 0),
            (5, 0),
            (5, 1),
            (4, 1),
            (3, 1),
            (2, 1),
        ]);

        for id in 0..1000 {
            let food = spawn_food(&grid, &snake, &mut rng, 50, id).unwrap();
            assert!(!snake.collides_with(&food));
            assert_eq!(food.id(), id);
        }
    }

    #[test]
    fn test_spawn_falls_back_to_scan() {
        let grid = Grid::new(unit(), Size::new(2, 2));
        let snake = snake(&[(0, 0), (1, 0), (1, 1)]);
        let mut rng = StdRng::seed_from_u64(1);

        // No random draws at all: the scan finds the only free cell
        let food = spawn_food(&grid, &snake, &mut rng, 0, 9).unwrap();
        assert_eq!(food.rect(), cell(0, 1));
    }

    #[test]
    fn test_spawn_on_full_grid_gives_up() {
        let grid = Grid::new(unit(), Size::new(2, 1));
        let snake = snake(&[(0, 0), (1, 0)]);
        let mut rng = StdRng::seed_from_u64(3);

        assert!(spawn_food(&grid, &snake, &mut rng, 10, 0).is_none());
    }
}
