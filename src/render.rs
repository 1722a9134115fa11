//! Terminal renderers for the crossing simulation
//!
//! Renderers only ever see a [`Snapshot`]; they cannot change the simulation.

use anyhow::{Context, Result};
use std::io::Write;

use crate::simulation::{Phase, Snapshot};

const COLOR_RESET: &str = "\x1b[0m";
const COLOR_BOLD: &str = "\x1b[1m";
const COLOR_DIM: &str = "\x1b[2m";
const COLOR_RED: &str = "\x1b[31m";
const COLOR_GREEN: &str = "\x1b[32m";
const COLOR_YELLOW: &str = "\x1b[33m";
const COLOR_CYAN: &str = "\x1b[36m";
const COLOR_GRAY: &str = "\x1b[90m";
const CLEAR_SCREEN: &str = "\x1b[H\x1b[2J";

/// Produces one display frame per tick
pub trait Renderer {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()>;
}

/// Character grid for a snapshot, indexed `[y][x]`.
///
/// Roads through the intersection are `|` and `-`, the intersection shows
/// `G` on vertical green and `R` on horizontal green, vehicles draw over both.
pub fn draw_grid(snapshot: &Snapshot<'_>) -> Vec<Vec<char>> {
    let grid = snapshot.grid;
    let center = grid.intersection();
    let mut cells = vec![vec![' '; grid.width]; grid.height];

    for row in cells.iter_mut() {
        row[center.x] = '|';
    }
    for cell in cells[center.y].iter_mut() {
        *cell = '-';
    }
    cells[center.y][center.x] = match snapshot.phase() {
        Phase::VerticalGreen => 'G',
        Phase::HorizontalGreen => 'R',
    };

    for vehicle in snapshot.vehicles {
        let pos = vehicle.position;
        if grid.contains(pos) {
            cells[pos.y][pos.x] = vehicle.heading.glyph();
        }
    }

    cells
}

fn style_cell(ch: char) -> String {
    let color = match ch {
        'G' => COLOR_GREEN,
        'R' => COLOR_RED,
        '^' | 'v' => COLOR_CYAN,
        '<' | '>' => COLOR_YELLOW,
        '|' | '-' => COLOR_GRAY,
        _ => return ch.to_string(),
    };
    format!("{color}{ch}{COLOR_RESET}")
}

/// Framed grid view of the crossing
pub struct GridRenderer<W: Write> {
    out: W,
    clear_screen: bool,
    color: bool,
}

impl<W: Write> GridRenderer<W> {
    pub fn new(out: W) -> Self {
        Self {
            out,
            clear_screen: true,
            color: true,
        }
    }

    pub fn with_clear_screen(mut self, clear_screen: bool) -> Self {
        self.clear_screen = clear_screen;
        self
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, text: &str, color: &str) -> String {
        if self.color {
            format!("{color}{text}{COLOR_RESET}")
        } else {
            text.to_string()
        }
    }
}

impl<W: Write> Renderer for GridRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        let cells = draw_grid(snapshot);
        let phase_color = match snapshot.phase() {
            Phase::VerticalGreen => COLOR_GREEN,
            Phase::HorizontalGreen => COLOR_RED,
        };

        let mut frame = String::new();
        if self.clear_screen {
            frame.push_str(CLEAR_SCREEN);
        }
        frame.push_str(&format!(
            "{} | Tick: {} | Phase: {} ({}/{})\n",
            self.paint(&format!("Crossing '{}'", snapshot.name), COLOR_BOLD),
            snapshot.tick,
            self.paint(&snapshot.phase().to_string(), phase_color),
            snapshot.light.elapsed_ticks(),
            snapshot.light.interval()
        ));

        let border = format!("+{}+", "-".repeat(snapshot.grid.width));
        frame.push_str(&self.paint(&border, COLOR_DIM));
        frame.push('\n');
        for row in &cells {
            frame.push_str(&self.paint("|", COLOR_DIM));
            for &ch in row {
                if self.color {
                    frame.push_str(&style_cell(ch));
                } else {
                    frame.push(ch);
                }
            }
            frame.push_str(&self.paint("|", COLOR_DIM));
            frame.push('\n');
        }
        frame.push_str(&self.paint(&border, COLOR_DIM));
        frame.push('\n');
        frame.push_str("Legend: G=vertical green, R=horizontal green, ^/v=vertical cars, </>=horizontal cars, |/-=roads\n");

        self.out
            .write_all(frame.as_bytes())
            .context("Failed to write grid frame")?;
        self.out.flush().context("Failed to flush grid frame")?;
        Ok(())
    }
}

/// Plain vehicle list, one line per vehicle
pub struct ListRenderer<W: Write> {
    out: W,
}

impl<W: Write> ListRenderer<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> Renderer for ListRenderer<W> {
    fn render(&mut self, snapshot: &Snapshot<'_>) -> Result<()> {
        writeln!(
            self.out,
            "Tick {} | {} | intersection {}",
            snapshot.tick,
            snapshot.phase(),
            snapshot.grid.intersection()
        )
        .context("Failed to write vehicle list")?;
        for vehicle in snapshot.vehicles {
            writeln!(
                self.out,
                "  {} {} {} moved={} waited={}",
                vehicle.id, vehicle.position, vehicle.heading, vehicle.moved_ticks, vehicle.wait_ticks
            )
            .context("Failed to write vehicle list")?;
        }
        Ok(())
    }
}
