use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect as Area},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Paragraph},
    Frame,
};

use crate::game::{BlockColors, Grid, Rect};

/// Terminal columns used to draw one grid cell
pub const CELL_WIDTH: u16 = 2;

/// A group of rectangles drawn with the same colors
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    pub rects: Vec<Rect>,
    pub colors: BlockColors,
}

impl Layer {
    pub fn new(rects: impl IntoIterator<Item = Rect>, colors: BlockColors) -> Self {
        Self {
            rects: rects.into_iter().collect(),
            colors,
        }
    }
}

/// Projects pixel-space entities onto terminal cells
///
/// One grid cell becomes `CELL_WIDTH` columns by one row. A cell is drawn
/// as `[]`: the fill color is the background, the border color the glyphs.
#[derive(Debug, Clone, Copy)]
pub struct Renderer {
    grid: Grid,
}

impl Renderer {
    pub fn new(grid: Grid) -> Self {
        Self { grid }
    }

    /// Paint the whole frame with `color`
    pub fn fill(&self, frame: &mut Frame, color: Color) {
        frame.render_widget(Block::new().style(Style::new().bg(color)), frame.area());
    }

    /// Draw the board with `layers` stacked in order, plus a status line
    /// underneath
    pub fn draw_board(
        &self,
        frame: &mut Frame,
        background: Color,
        layers: &[Layer],
        status: Line,
    ) {
        let cells = self.grid.cells();
        let width = cells.width as u16 * CELL_WIDTH;
        let height = cells.height as u16;

        let area = centered(frame.area(), width, height + 1);
        let [board_area, status_area] =
            Layout::vertical([Constraint::Length(height), Constraint::Length(1)]).areas(area);

        let mut painted: Vec<Option<BlockColors>> = vec![None; cells.area() as usize];
        for layer in layers {
            for rect in &layer.rects {
                let cell = self.grid.cell_of(rect.origin());
                if (0..cells.width).contains(&cell.x) && (0..cells.height).contains(&cell.y) {
                    painted[(cell.y * cells.width + cell.x) as usize] = Some(layer.colors);
                }
            }
        }

        let empty = Style::new().bg(background);
        let lines: Vec<Line> = painted
            .chunks(cells.width as usize)
            .map(|row| {
                let spans: Vec<Span> = row
                    .iter()
                    .map(|cell| match cell {
                        Some(colors) => {
                            Span::styled("[]", Style::new().fg(colors.border).bg(colors.fill))
                        }
                        None => Span::styled("  ", empty),
                    })
                    .collect();
                Line::from(spans)
            })
            .collect();

        frame.render_widget(Paragraph::new(lines), board_area);
        frame.render_widget(
            Paragraph::new(status).alignment(Alignment::Center),
            status_area,
        );
    }

    /// Draw a centered title with a hint line below it
    pub fn draw_title(&self, frame: &mut Frame, title: &str, color: Color, hint: Line) {
        let width = (title.chars().count().max(hint.width()) as u16).max(1);
        let area = centered(frame.area(), width, 3);

        let text = vec![
            Line::from(Span::styled(
                title.to_string(),
                Style::new().fg(color).add_modifier(Modifier::BOLD),
            )),
            Line::from(""),
            hint,
        ];

        frame.render_widget(Paragraph::new(text).alignment(Alignment::Center), area);
    }
}

/// Key hint such as "S start  Q quit"
pub fn hint_line(entries: &[(String, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (key, action)) in entries.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("  "));
        }
        spans.push(Span::styled(
            key.clone(),
            Style::new().fg(Color::White).add_modifier(Modifier::BOLD),
        ));
        spans.push(Span::raw(format!(" {action}")));
    }
    Line::from(spans)
}

fn centered(area: Area, width: u16, height: u16) -> Area {
    let [area] = Layout::horizontal([Constraint::Length(width)])
        .flex(Flex::Center)
        .areas(area);
    let [area] = Layout::vertical([Constraint::Length(height)])
        .flex(Flex::Center)
        .areas(area);
    area
}
