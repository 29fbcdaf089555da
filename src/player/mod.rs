//! Player — the interactive terminal runtime.
//!
//! Owns the engine, the three image panels, and the status log, and drives
//! them with a single-threaded event/tick loop. While the animation runs,
//! `event::poll` is given the time remaining until the next tick deadline;
//! when the deadline passes, the engine advances once and every panel
//! repaints from the updated transform before the next event is considered.
//! Paused, the loop just blocks on input.
//!
//! Raster pixels are drawn as upper-half-block cells: the glyph's foreground
//! carries the top pixel of a row pair and its background the bottom one,
//! so each terminal row shows two pixel rows in 24-bit color.

use std::io::{self, Write};
use std::time::{Duration, Instant};

use anyhow::{Result, bail};
use crossterm::{cursor, event, execute, queue, style, terminal};

use crate::config::GalleryConfig;
use crate::engine::{Engine, Sequence};
use crate::images;
use crate::menubar::print_menu_item;
use crate::renderer::Renderer;
use crate::types::{PanelContract, Raster, Rgb, StatusLog};

/// Rows reserved above the panels for the menu bar.
const MENU_ROWS: u16 = 1;
/// Blank columns between adjacent panel boxes.
const PANEL_GAP: u16 = 1;

/// One image panel: a fixed title and the raster it displays.
struct Panel {
    title: &'static str,
    raster: Raster,
}

/// User controls, resolved from key presses before dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ControlAction {
    Start,
    Pause,
    ClearLog,
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

/// Cell positions of the fixed screen regions, derived from the config.
struct Layout {
    /// Inner width of one panel in cells (one cell per pixel column).
    panel_cell_w: u16,
    /// Inner height of one panel in cells (two pixel rows per cell).
    panel_cell_h: u16,
    panels_y: u16,
    log_y: u16,
    log_h: u16,
    status_y: u16,
    need_w: u16,
    need_h: u16,
}

impl Layout {
    fn compute(config: &GalleryConfig) -> Self {
        let panel_cell_w = config.panel_px as u16;
        let panel_cell_h = (config.panel_px as u16).div_ceil(2);
        let need_w = 3 * (panel_cell_w + 2) + 2 * PANEL_GAP;
        let panels_y = MENU_ROWS;
        let log_y = panels_y + panel_cell_h + 2;
        let log_h = config.log_rows;
        let status_y = log_y + log_h + 2;
        Layout {
            panel_cell_w,
            panel_cell_h,
            panels_y,
            log_y,
            log_h,
            status_y,
            need_w,
            need_h: status_y + 1,
        }
    }

    /// Left edge of panel box `index` (0..3).
    fn panel_x(&self, index: u16) -> u16 {
        index * (self.panel_cell_w + 2 + PANEL_GAP)
    }
}

// ---------------------------------------------------------------------------
// Player
// ---------------------------------------------------------------------------

pub struct Player {
    config: GalleryConfig,
    engine: Engine,
    panels: Vec<Panel>,
    log: StatusLog,
    running: bool,
}

impl Player {
    pub fn new(config: GalleryConfig) -> Self {
        let sequence = if config.diagnostic {
            Sequence::Diagnostic
        } else {
            Sequence::Production
        };
        let size = config.image_size;
        let panels = vec![
            Panel { title: "Flag", raster: images::flag(size) },
            Panel { title: "Triangle", raster: images::triangle(size) },
            Panel { title: "Letter Z", raster: images::letter_z(size) },
        ];

        let mut log = StatusLog::new();
        log.push("Press \"s\" to start the animation");

        Player {
            config,
            engine: Engine::new(sequence),
            panels,
            log,
            running: false,
        }
    }

    /// Run the gallery in the terminal.
    ///
    /// Sets up the terminal, enters the event/tick loop, and restores the
    /// terminal on exit (even on error).
    pub fn play(&mut self) -> Result<()> {
        let layout = Layout::compute(&self.config);
        let (term_w, term_h) = terminal::size()?;
        if term_w < layout.need_w || term_h < layout.need_h {
            bail!(
                "Terminal too small: need {}x{}, have {}x{}",
                layout.need_w,
                layout.need_h,
                term_w,
                term_h,
            );
        }

        let mut stdout = io::stdout();
        terminal::enable_raw_mode()?;
        execute!(
            stdout,
            terminal::EnterAlternateScreen,
            cursor::Hide,
            terminal::Clear(terminal::ClearType::All),
        )?;

        let result = self.run_loop(&mut stdout, &layout);

        // Always restore terminal state.
        let _ = execute!(stdout, cursor::Show, terminal::LeaveAlternateScreen);
        let _ = terminal::disable_raw_mode();

        result
    }

    // -----------------------------------------------------------------------
    // Event/tick loop
    // -----------------------------------------------------------------------

    fn run_loop(&mut self, stdout: &mut io::Stdout, layout: &Layout) -> Result<()> {
        self.render_chrome(stdout, layout)?;
        self.render_frame(stdout, layout)?;

        let interval = Duration::from_millis(self.config.tick_ms);
        let mut next_tick: Option<Instant> = None;

        loop {
            // Keep the tick deadline in step with the running flag. A start
            // while already running leaves the armed deadline untouched.
            match (self.running, next_tick) {
                (true, None) => next_tick = Some(Instant::now() + interval),
                (false, Some(_)) => next_tick = None,
                _ => {}
            }

            let ev = match next_tick {
                Some(deadline) => {
                    let now = Instant::now();
                    if now >= deadline {
                        self.engine.advance(&mut self.log);
                        next_tick = Some(deadline + interval);
                        self.render_frame(stdout, layout)?;
                        continue;
                    }
                    if event::poll(deadline - now)? {
                        Some(event::read()?)
                    } else {
                        None
                    }
                }
                None => Some(event::read()?),
            };

            match ev {
                Some(event::Event::Key(key)) => {
                    use event::KeyCode::*;
                    let action = match key.code {
                        Char('q') | Esc => break,
                        Char('s') => Some(ControlAction::Start),
                        Char('p') => Some(ControlAction::Pause),
                        Char('c') => Some(ControlAction::ClearLog),
                        _ => None,
                    };
                    if let Some(action) = action {
                        self.handle_control(action);
                        self.render_frame(stdout, layout)?;
                    }
                }
                Some(event::Event::Resize(_, _)) => {
                    execute!(stdout, terminal::Clear(terminal::ClearType::All))?;
                    self.render_chrome(stdout, layout)?;
                    self.render_frame(stdout, layout)?;
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// Apply a user control. Start and pause are idempotent: the redundant
    /// press only produces a log notice and changes nothing else.
    fn handle_control(&mut self, action: ControlAction) {
        match action {
            ControlAction::Start => {
                if self.running {
                    self.log.push("Animation is already running; press \"p\" to pause");
                } else {
                    self.running = true;
                    self.log.push("Starting animation");
                }
            }
            ControlAction::Pause => {
                if self.running {
                    self.running = false;
                    self.log.push("Pausing animation");
                } else {
                    self.log.push("Animation is already paused; press \"s\" to resume");
                }
            }
            ControlAction::ClearLog => self.log.clear(),
        }
    }

    // -----------------------------------------------------------------------
    // Terminal output
    // -----------------------------------------------------------------------

    /// Static parts: menu bar and the panel/log borders.
    fn render_chrome(&self, stdout: &mut io::Stdout, layout: &Layout) -> Result<()> {
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::Print(" "),
        )?;
        let items: &[&str] = &["[s]tart", "[p]ause", "[c]lear log", "[q][Esc] quit"];
        for (i, item) in items.iter().enumerate() {
            if i > 0 {
                queue!(stdout, style::Print("  "))?;
            }
            print_menu_item(stdout, item)?;
        }

        for (i, panel) in self.panels.iter().enumerate() {
            draw_box(
                stdout,
                layout.panel_x(i as u16),
                layout.panels_y,
                layout.panel_cell_w + 2,
                layout.panel_cell_h + 2,
                Some(panel.title),
            )?;
        }
        draw_box(
            stdout,
            0,
            layout.log_y,
            layout.need_w,
            layout.log_h + 2,
            Some("Status log"),
        )?;

        stdout.flush()?;
        Ok(())
    }

    /// Dynamic parts: panel pixels, log tail, status bar.
    fn render_frame(&self, stdout: &mut io::Stdout, layout: &Layout) -> Result<()> {
        let contract = PanelContract {
            width: self.config.panel_px,
            height: self.config.panel_px,
        };
        let transform = self.engine.transform();

        for (i, panel) in self.panels.iter().enumerate() {
            let grid = Renderer::paint(&panel.raster, transform, contract);
            let x0 = layout.panel_x(i as u16) + 1;
            let y0 = layout.panels_y + 1;

            for row in 0..layout.panel_cell_h {
                queue!(stdout, cursor::MoveTo(x0, y0 + row))?;
                let top = &grid[(row * 2) as usize];
                let bottom = grid.get((row * 2 + 1) as usize);
                for col in 0..layout.panel_cell_w as usize {
                    let fg = top[col];
                    let bg = bottom.map_or(crate::renderer::BACKGROUND, |r| r[col]);
                    let cs = style::ContentStyle {
                        foreground_color: Some(to_ct_color(fg)),
                        background_color: Some(to_ct_color(bg)),
                        ..Default::default()
                    };
                    queue!(
                        stdout,
                        style::PrintStyledContent(style::StyledContent::new(cs, '\u{2580}'))
                    )?;
                }
            }
        }

        self.render_log(stdout, layout)?;
        self.render_status(stdout, layout)?;
        stdout.flush()?;
        Ok(())
    }

    fn render_log(&self, stdout: &mut io::Stdout, layout: &Layout) -> Result<()> {
        let inner_w = (layout.need_w - 2) as usize;
        let tail = self.log.tail(layout.log_h as usize);

        for row in 0..layout.log_h as usize {
            let mut line = tail.get(row).map(String::as_str).unwrap_or("").to_string();
            if line.chars().count() > inner_w {
                line = line.chars().take(inner_w).collect();
            }
            queue!(
                stdout,
                cursor::MoveTo(1, layout.log_y + 1 + row as u16),
                style::Print(format!("{line:<inner_w$}")),
            )?;
        }
        Ok(())
    }

    fn render_status(&self, stdout: &mut io::Stdout, layout: &Layout) -> Result<()> {
        let state = if self.running { "running" } else { "paused" };
        let status = format!(
            " Step {}/{} | {} | tick {}ms ",
            self.engine.frame_index(),
            self.engine.cycle_length(),
            state,
            self.config.tick_ms,
        );

        let mut cs = style::ContentStyle::default();
        cs.attributes.set(style::Attribute::Dim);

        queue!(
            stdout,
            cursor::MoveTo(0, layout.status_y),
            terminal::Clear(terminal::ClearType::CurrentLine),
            style::PrintStyledContent(style::StyledContent::new(cs, status)),
        )?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Drawing helpers
// ---------------------------------------------------------------------------

fn to_ct_color(c: Rgb) -> style::Color {
    style::Color::Rgb { r: c.r, g: c.g, b: c.b }
}

/// Draw a box-drawing border of outer size `w`×`h`, with an optional title
/// on the top edge.
fn draw_box(
    stdout: &mut io::Stdout,
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    title: Option<&str>,
) -> Result<()> {
    if w < 2 || h < 2 {
        return Ok(());
    }

    queue!(stdout, cursor::MoveTo(x, y), style::Print('\u{250c}'))?;
    for _ in 1..w - 1 {
        queue!(stdout, style::Print('\u{2500}'))?;
    }
    queue!(stdout, style::Print('\u{2510}'))?;

    for row in 1..h - 1 {
        queue!(
            stdout,
            cursor::MoveTo(x, y + row),
            style::Print('\u{2502}'),
            cursor::MoveTo(x + w - 1, y + row),
            style::Print('\u{2502}'),
        )?;
    }

    queue!(stdout, cursor::MoveTo(x, y + h - 1), style::Print('\u{2514}'))?;
    for _ in 1..w - 1 {
        queue!(stdout, style::Print('\u{2500}'))?;
    }
    queue!(stdout, style::Print('\u{2518}'))?;

    if let Some(title) = title {
        let room = (w.saturating_sub(4)) as usize;
        if room > 0 {
            let clipped: String = title.chars().take(room).collect();
            queue!(
                stdout,
                cursor::MoveTo(x + 2, y),
                style::Print(format!(" {clipped} ")),
            )?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn player() -> Player {
        Player::new(GalleryConfig::default())
    }

    #[test]
    fn starts_paused_with_a_hint() {
        let p = player();
        assert!(!p.running);
        assert_eq!(p.log.len(), 1);
        assert_eq!(p.engine.frame_index(), 0);
        assert_eq!(p.panels.len(), 3);
    }

    #[test]
    fn double_start_is_a_logged_no_op() {
        let mut p = player();
        p.handle_control(ControlAction::Start);
        assert!(p.running);
        let len = p.log.len();

        p.handle_control(ControlAction::Start);
        assert!(p.running);
        assert_eq!(p.log.len(), len + 1);
        assert!(p.log.entries().last().unwrap().contains("already running"));
    }

    #[test]
    fn double_pause_is_a_logged_no_op() {
        let mut p = player();
        p.handle_control(ControlAction::Pause);
        assert!(!p.running);
        assert!(p.log.entries().last().unwrap().contains("already paused"));

        p.handle_control(ControlAction::Start);
        p.handle_control(ControlAction::Pause);
        assert!(!p.running);
        assert!(p.log.entries().last().unwrap().starts_with("Pausing"));

        let len = p.log.len();
        p.handle_control(ControlAction::Pause);
        assert!(!p.running);
        assert_eq!(p.log.len(), len + 1);
    }

    #[test]
    fn clear_empties_the_log_only() {
        let mut p = player();
        p.handle_control(ControlAction::Start);
        p.engine.advance(&mut p.log);
        assert!(p.log.len() > 1);

        p.handle_control(ControlAction::ClearLog);
        assert!(p.log.is_empty());
        assert!(p.running);
        assert_eq!(p.engine.frame_index(), 1);
    }

    #[test]
    fn diagnostic_config_selects_the_long_table() {
        let config = GalleryConfig {
            diagnostic: true,
            ..GalleryConfig::default()
        };
        let p = Player::new(config);
        assert_eq!(p.engine.cycle_length(), 6);
        assert_eq!(player().engine.cycle_length(), 4);
    }

    #[test]
    fn layout_fits_three_panels_side_by_side() {
        let layout = Layout::compute(&GalleryConfig::default());
        assert_eq!(layout.panel_cell_w, 49);
        assert_eq!(layout.panel_cell_h, 25);
        // Panel boxes must not overlap.
        assert!(layout.panel_x(1) >= layout.panel_x(0) + layout.panel_cell_w + 2);
        assert!(layout.panel_x(2) + layout.panel_cell_w + 2 <= layout.need_w);
        assert!(layout.status_y < layout.need_h);
    }
}
