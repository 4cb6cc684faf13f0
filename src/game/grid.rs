use rand::Rng;

use super::direction::Direction;
use super::geometry::{cell_origin, screen_size, wrap_translate, Point, Rect, Size};

/// Maps logical grid cells to pixel rectangles and computes wrapped moves
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Grid {
    unit: Size,
    cells: Size,
}

impl Grid {
    pub fn new(unit: Size, cells: Size) -> Self {
        Self { unit, cells }
    }

    pub fn unit(&self) -> Size {
        self.unit
    }

    pub fn cells(&self) -> Size {
        self.cells
    }

    pub fn screen_size(&self) -> Size {
        screen_size(self.unit, self.cells)
    }

    /// Pixel rectangle covering the cell at grid coordinate `cell`
    pub fn cell_rect(&self, cell: Point) -> Rect {
        Rect::from_parts(cell_origin(self.unit, cell), self.unit)
    }

    /// Grid coordinate of the cell whose top-left is at pixel `origin`
    pub fn cell_of(&self, origin: Point) -> Point {
        Point::new(origin.x / self.unit.width, origin.y / self.unit.height)
    }

    /// The cell in the middle of the grid (rounded down)
    pub fn center_cell(&self) -> Rect {
        self.cell_rect(Point::new(self.cells.width / 2, self.cells.height / 2))
    }

    /// A uniformly random cell
    pub fn random_cell<R: Rng + ?Sized>(&self, rng: &mut R) -> Rect {
        let x = rng.gen_range(0..self.cells.width);
        let y = rng.gen_range(0..self.cells.height);
        self.cell_rect(Point::new(x, y))
    }

    /// Every cell, row by row
    pub fn all_cells(&self) -> impl Iterator<Item = Rect> + '_ {
        (0..self.cells.height).flat_map(move |y| {
            (0..self.cells.width).map(move |x| self.cell_rect(Point::new(x, y)))
        })
    }

    /// Where `rect` lands after one step in `direction`, wrapped at the edges
    pub fn step(&self, rect: &Rect, direction: Direction) -> Point {
        let (dx, dy) = direction.delta();
        let delta = Point::new(dx * rect.width, dy * rect.height);
        wrap_translate(rect, delta, self.screen_size())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn grid() -> Grid {
        Grid::new(Size::new(20, 20), Size::new(10, 8))
    }

    #[test]
    fn test_center_cell() {
        assert_eq!(grid().center_cell(), Rect::new(100, 80, 20, 20));

        let odd = Grid::new(Size::new(10, 10), Size::new(5, 5));
        assert_eq!(odd.center_cell(), Rect::new(20, 20, 10, 10));
    }

    #[test]
    fn test_cell_of_inverts_cell_rect() {
        let grid = grid();
        let cell = Point::new(7, 3);
        assert_eq!(grid.cell_of(grid.cell_rect(cell).origin()), cell);
    }

    #[test]
    fn test_random_cell_is_aligned_and_in_bounds() {
        let grid = grid();
        let screen = grid.screen_size();
        let mut rng = StdRng::seed_from_u64(7);

        for _ in 0..500 {
            let rect = grid.random_cell(&mut rng);
            assert_eq!(rect.x % 20, 0);
            assert_eq!(rect.y % 20, 0);
            assert!((0..screen.width).contains(&rect.x));
            assert!((0..screen.height).contains(&rect.y));
            assert_eq!(rect.size(), grid.unit());
        }
    }

    #[test]
    fn test_all_cells_covers_grid_once() {
        let grid = grid();
        let cells: Vec<Rect> = grid.all_cells().collect();
        assert_eq!(cells.len(), 80);
        assert_eq!(cells[0], Rect::new(0, 0, 20, 20));
        assert_eq!(cells[1], Rect::new(20, 0, 20, 20));
        assert_eq!(cells[79], Rect::new(180, 140, 20, 20));
    }

    #[test]
    fn test_step_wraps() {
        let grid = grid();
        let top_left = grid.cell_rect(Point::new(0, 0));
        assert_eq!(grid.step(&top_left, Direction::Up), Point::new(0, 140));
        assert_eq!(grid.step(&top_left, Direction::Left), Point::new(180, 0));
        assert_eq!(grid.step(&top_left, Direction::Right), Point::new(20, 0));
        assert_eq!(grid.step(&top_left, Direction::Down), Point::new(0, 20));

        let bottom_right = grid.cell_rect(Point::new(9, 7));
        assert_eq!(grid.step(&bottom_right, Direction::Down), Point::new(180, 0));
        assert_eq!(grid.step(&bottom_right, Direction::Right), Point::new(0, 140));
    }

    #[test]
    fn test_step_then_opposite_returns_home() {
        let grid = grid();
        for cell in grid.all_cells() {
            for direction in Direction::ALL {
                let there = cell.moved_to(grid.step(&cell, direction));
                let back = grid.step(&there, direction.opposite());
                assert_eq!(back, cell.origin());
            }
        }
    }
}
