//! Per-frame render step: background, pipes, bird, then the HUD on top.
//!
//! Reads the game state and never mutates it.

use super::game_common::{centered_rect, render_dialog, render_status_bar};
use super::pixel_buf::{PixelBuf, Rgb};
use super::sprite::{Sprite, Sprites};
use flapper::core::constants::BIRD_SPRITE_SCALE;
use flapper::core::{GamePhase, GameState};
use flapper::game::{bird_tilt, Bird, Pipe, Rect as WorldRect};
use ratatui::{
    layout::{Alignment, Rect},
    style::{Color, Modifier, Style},
    text::Line,
    widgets::Paragraph,
    Frame,
};

const SKY_TOP: Rgb = Rgb(70, 180, 200);
const SKY_BOT: Rgb = Rgb(190, 232, 245);
const PIPE_L: Rgb = Rgb(74, 122, 26);
const PIPE_M: Rgb = Rgb(100, 170, 40);
const PIPE_R: Rgb = Rgb(115, 191, 46);
const PIPE_HI: Rgb = Rgb(145, 215, 62);
const BIRD_Y: Rgb = Rgb(245, 200, 66);
const BIRD_WING: Rgb = Rgb(215, 165, 35);
const BIRD_EYE: Rgb = Rgb(255, 255, 255);
const BIRD_PUPIL: Rgb = Rgb(20, 20, 20);
const BIRD_BEAK: Rgb = Rgb(225, 75, 35);

/// Split the terminal into the play area and the one-line controls bar.
pub fn play_area(area: Rect) -> (Rect, Rect) {
    let bar_h = area.height.min(1);
    let play = Rect {
        height: area.height - bar_h,
        ..area
    };
    let bar = Rect {
        y: area.y + play.height,
        height: bar_h,
        ..area
    };
    (play, bar)
}

/// World-to-pixel scale factors for a canvas.
struct Scale {
    sx: f64,
    sy: f64,
}

impl Scale {
    fn new(canvas: &PixelBuf, state: &GameState) -> Self {
        Self {
            sx: canvas.width() as f64 / state.world.width.max(1.0),
            sy: canvas.height() as f64 / state.world.height.max(1.0),
        }
    }

    /// World coordinates of a pixel's centre.
    fn to_world(&self, px: i32, py: i32) -> (f64, f64) {
        ((px as f64 + 0.5) / self.sx, (py as f64 + 0.5) / self.sy)
    }
}

/// Render the whole game screen.
pub fn render_game(
    frame: &mut Frame,
    area: Rect,
    state: &GameState,
    sprites: &Sprites,
    muted: bool,
) {
    let (play, bar) = play_area(area);
    if play.width > 0 && play.height > 0 {
        let mut canvas = PixelBuf::for_area(play, SKY_TOP);
        let scale = Scale::new(&canvas, state);
        draw_background(&mut canvas, sprites.background.as_ref());
        for pipe in &state.pipes {
            draw_pipe(&mut canvas, &scale, pipe, state.world.height, sprites.pipe.as_ref());
        }
        draw_bird(&mut canvas, &scale, &state.bird, sprites.bird.as_ref());
        frame.render_widget(&canvas, play);

        render_hud(frame, play, state);
    }

    render_status_bar(
        frame,
        bar,
        Some(if muted {
            ("Muted", Color::DarkGray)
        } else {
            ("Sound on", Color::Green)
        }),
        &[
            ("[Space/Click]", "Flap"),
            ("[R]", "Restart"),
            ("[C]", "Customize"),
            ("[M]", "Mute"),
            ("[Q]", "Quit"),
        ],
    );
}

/// Background stretched over the whole canvas, or a sky gradient.
fn draw_background(canvas: &mut PixelBuf, sprite: Option<&Sprite>) {
    let (w, h) = (canvas.width(), canvas.height());
    for y in 0..h {
        let t = ((y * 256) / h.max(1)) as u16;
        let sky = Rgb::lerp(SKY_TOP, SKY_BOT, t);
        for x in 0..w {
            let c = sprite
                .and_then(|s| {
                    s.sample(
                        (x as f64 + 0.5) / w as f64,
                        (y as f64 + 0.5) / h as f64,
                    )
                })
                .unwrap_or(sky);
            canvas.set(x as i32, y as i32, c);
        }
    }
}

/// Both segments of a pipe, with the pipe image stretched over each.
fn draw_pipe(
    canvas: &mut PixelBuf,
    scale: &Scale,
    pipe: &Pipe,
    world_height: f64,
    sprite: Option<&Sprite>,
) {
    for rect in [pipe.top_rect(), pipe.bottom_rect(world_height)] {
        fill_world_rect(canvas, scale, &rect, sprite);
    }
}

fn fill_world_rect(canvas: &mut PixelBuf, scale: &Scale, rect: &WorldRect, sprite: Option<&Sprite>) {
    if rect.w <= 0.0 || rect.h <= 0.0 {
        return;
    }
    let x0 = (rect.x * scale.sx).floor().max(0.0) as i32;
    let x1 = ((rect.x + rect.w) * scale.sx).ceil().min(canvas.width() as f64) as i32;
    let y0 = (rect.y * scale.sy).floor().max(0.0) as i32;
    let y1 = ((rect.y + rect.h) * scale.sy).ceil().min(canvas.height() as f64) as i32;
    let span = ((rect.w * scale.sx).ceil() as i32).max(1);

    for py in y0..y1 {
        for px in x0..x1 {
            let (wx, wy) = scale.to_world(px, py);
            let u = (wx - rect.x) / rect.w;
            let v = (wy - rect.y) / rect.h;
            if !(0.0..=1.0).contains(&u) || !(0.0..=1.0).contains(&v) {
                continue;
            }
            let c = match sprite {
                Some(s) => match s.sample(u, v) {
                    Some(c) => c,
                    None => continue,
                },
                None => pipe_shade((u * span as f64) as i32, span),
            };
            canvas.set(px, py, c);
        }
    }
}

/// Bird sprite, `2.2 * radius` square, rotated about its centre.
fn draw_bird(canvas: &mut PixelBuf, scale: &Scale, bird: &Bird, sprite: Option<&Sprite>) {
    let size = bird.radius * BIRD_SPRITE_SCALE;
    let half = size / 2.0;
    let angle = bird_tilt(bird.vel_y);
    let (sin, cos) = angle.sin_cos();
    // Rotated square fits inside a circle of radius half * sqrt(2)
    let reach = half * std::f64::consts::SQRT_2;

    let x0 = ((bird.x - reach) * scale.sx).floor() as i32;
    let x1 = ((bird.x + reach) * scale.sx).ceil() as i32;
    let y0 = ((bird.y - reach) * scale.sy).floor() as i32;
    let y1 = ((bird.y + reach) * scale.sy).ceil() as i32;

    for py in y0..y1 {
        for px in x0..x1 {
            let (wx, wy) = scale.to_world(px, py);
            let (dx, dy) = (wx - bird.x, wy - bird.y);
            // Inverse rotation into sprite space
            let lx = dx * cos + dy * sin;
            let ly = -dx * sin + dy * cos;
            if lx.abs() > half || ly.abs() > half {
                continue;
            }
            let u = (lx + half) / size;
            let v = (ly + half) / size;
            let c = match sprite {
                Some(s) => s.sample(u, v),
                None => fallback_bird_pixel(u, v),
            };
            if let Some(c) = c {
                canvas.set(px, py, c);
            }
        }
    }
}

/// Built-in bird drawn in sprite space, facing right.
fn fallback_bird_pixel(u: f64, v: f64) -> Option<Rgb> {
    let (x, y) = (u * 2.0 - 1.0, v * 2.0 - 1.0);

    // Beak pokes out of the body on the right
    if x > 0.55 && x <= 1.0 && y.abs() < 0.18 {
        return Some(BIRD_BEAK);
    }
    let body = (x / 0.8).powi(2) + (y / 0.65).powi(2);
    if body > 1.0 {
        return None;
    }
    let eye = (x - 0.35).powi(2) + (y + 0.25).powi(2);
    if eye < 0.02 {
        return Some(BIRD_PUPIL);
    }
    if eye < 0.06 {
        return Some(BIRD_EYE);
    }
    if x < 0.0 && y > -0.05 && y < 0.35 {
        return Some(BIRD_WING);
    }
    Some(BIRD_Y)
}

fn pipe_shade(x: i32, total_w: i32) -> Rgb {
    if total_w <= 1 {
        return PIPE_M;
    }
    let t = (x.clamp(0, total_w - 1) as f64 / (total_w - 1) as f64 * 256.0) as u16;
    if t < 64 {
        Rgb::lerp(PIPE_L, PIPE_M, (t * 4).min(256))
    } else if t < 100 {
        Rgb::lerp(PIPE_M, PIPE_HI, ((t - 64) * 7).min(256))
    } else if t < 160 {
        Rgb::lerp(PIPE_HI, PIPE_R, ((t - 100) * 4).min(256))
    } else {
        Rgb::lerp(PIPE_R, PIPE_L, ((t - 160) * 3).min(256))
    }
}

/// Score counter, start prompt and the end-of-run message.
fn render_hud(frame: &mut Frame, play: Rect, state: &GameState) {
    let score = Paragraph::new(state.score.to_string())
        .style(
            Style::default()
                .fg(Color::White)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    frame.render_widget(score, Rect { height: 1, ..play });

    match state.phase {
        GamePhase::Idle => {
            let area = centered_rect(play, 34, 3);
            render_dialog(
                frame,
                area,
                "Ready",
                Color::Yellow,
                vec![Line::from("Press Space or click to flap")],
            );
        }
        GamePhase::GameOver => {
            let area = centered_rect(play, 30, 6);
            render_dialog(
                frame,
                area,
                "Game Over",
                Color::Red,
                vec![
                    Line::from(""),
                    Line::styled(
                        format!("Score: {}", state.score),
                        Style::default()
                            .fg(Color::White)
                            .add_modifier(Modifier::BOLD),
                    ),
                    Line::from(""),
                    Line::styled("[Space] Restart", Style::default().fg(Color::DarkGray)),
                ],
            );
        }
        GamePhase::Running => {}
    }
}
