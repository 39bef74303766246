//! Decorative background: stars drifting slowly down the list area.
//!
//! Purely visual. It is advanced by the UI tick and never talks to the core.

use rand::Rng;
use ratatui::buffer::Buffer;
use ratatui::layout::Rect;
use ratatui::style::Color;

#[derive(Debug, Clone, Copy, PartialEq)]
struct Star {
    /// Normalized position in `[0, 1)`.
    x: f32,
    y: f32,
    /// Normalized distance per tick.
    speed: f32,
    bright: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Starfield {
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(count: usize, rng: &mut impl Rng) -> Self {
        let stars = (0..count)
            .map(|_| Star {
                x: rng.random::<f32>(),
                y: rng.random::<f32>(),
                speed: rng.random_range(0.0005..0.005),
                bright: rng.random_bool(0.25),
            })
            .collect();
        Self { stars }
    }

    pub fn advance(&mut self) {
        for star in &mut self.stars {
            star.y += star.speed;
            if star.y >= 1.0 {
                star.y -= 1.0;
            }
        }
    }

    /// Paints stars into blank cells of `area`, leaving drawn content alone.
    pub fn render(&self, area: Rect, buf: &mut Buffer, color: Color) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        for star in &self.stars {
            let x = area.x + ((star.x * f32::from(area.width)) as u16).min(area.width - 1);
            let y = area.y + ((star.y * f32::from(area.height)) as u16).min(area.height - 1);
            let Some(cell) = buf.cell_mut((x, y)) else {
                continue;
            };
            if cell.symbol() == " " {
                cell.set_symbol(if star.bright { "✦" } else { "·" });
                cell.set_fg(color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Starfield;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use ratatui::buffer::Buffer;
    use ratatui::layout::Rect;
    use ratatui::style::{Color, Style};

    fn field() -> Starfield {
        Starfield::new(40, &mut StdRng::seed_from_u64(7))
    }

    #[test]
    fn stars_stay_in_unit_square_while_drifting() {
        let mut field = field();
        assert_eq!(field.stars.len(), 40);
        for _ in 0..5_000 {
            field.advance();
        }
        assert!(field.stars.iter().all(|s| (0.0..1.0).contains(&s.y)));
    }

    #[test]
    fn render_only_touches_blank_cells_inside_area() {
        let field = field();
        let area = Rect::new(2, 1, 20, 8);
        let mut buf = Buffer::empty(Rect::new(0, 0, 30, 12));
        buf.set_string(2, 1, "####################", Style::default());

        field.render(area, &mut buf, Color::White);

        for x in 2..22u16 {
            assert_eq!(buf[(x, 1u16)].symbol(), "#");
        }
        for y in 0..12u16 {
            for x in 0..30u16 {
                let inside = area.contains((x, y).into());
                if !inside {
                    assert_eq!(buf[(x, y)].symbol(), " ");
                }
            }
        }
    }
}
