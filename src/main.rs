//! Demo frame loop exercising the canvas, trackers and button helper: an
//! arrow-key character, a click-counting button and a cursor dot.

use std::thread;
use std::time::Instant;

use log::info;

use easel::{do_button, AppWindow, Color, Keysym, MouseButton, Point, Rect, TextStyle, WindowConfig};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("Starting easel demo");

    let config = WindowConfig::load_from_file().unwrap_or_default();
    let mut window = AppWindow::new(&config)?;
    window.initialize_canvas()?;

    let keyboard = window.keyboard();
    let mouse = window.mouse();

    // Text is optional: drawn only when the config points at a font file.
    let text_style = config
        .font_path
        .as_deref()
        .and_then(|path| TextStyle::load(path, 24.0).ok());
    if text_style.is_none() {
        info!("No usable font configured, text drawing disabled");
    }

    let start_time = Instant::now();

    let mut character_x = 100;
    let mut character_y = 100;
    let character_size = 10;
    let character_speed = 2;

    let mut num_button_clicks = 0u32;

    while window.is_open() {
        window.pump_events()?;

        window.canvas_mut().clear()?;
        let time_since_start = start_time.elapsed().as_secs_f64();

        {
            let canvas = window.canvas_mut();
            let mut painter = canvas.painter()?;

            if let Some(style) = &text_style {
                painter.draw_text(
                    style,
                    "Hello, this is a graphics example!",
                    Color::BLACK,
                    Point::new(20, 30),
                );
                painter.draw_text(
                    style,
                    "Press the arrow keys and move the mouse.",
                    Color::BLACK,
                    Point::new(20, 60),
                );
            }

            painter.fill_rect(Rect::new(400, 200, 100, 50), Color::ORANGE);
            painter.outline_rect(Rect::new(450, 175, 100, 100), 3, Color::GRAY);
            painter.fill_ellipse(Point::new(200, 200), 30, 15, Color::GREEN);
            painter.fill_circle(Point::new(400, 400), 40, Color::RED);
            painter.line(Point::new(200, 200), Point::new(400, 400), 2, Color::CYAN);
            painter.fill_triangle(
                Point::new(50, 200),
                Point::new(150, 200),
                Point::new(100, 300),
                Color::BLUE,
            );

            // A rectangle that shrinks and grows; negative extents are fine,
            // fill_rect normalizes them.
            let cycling = Color::new(((time_since_start * 100.0) as i64 % 255) as u8, 0, 255, 255);
            painter.fill_rect(
                Rect::new(
                    600,
                    400,
                    (time_since_start.cos() * 100.0) as i32,
                    (time_since_start.sin() * 100.0) as i32,
                ),
                cycling,
            );

            // Move and draw the little character.
            if keyboard.is_key_down(Keysym::Left) {
                character_x -= character_speed;
            }
            if keyboard.is_key_down(Keysym::Right) {
                character_x += character_speed;
            }
            if keyboard.is_key_down(Keysym::Up) {
                character_y -= character_speed;
            }
            if keyboard.is_key_down(Keysym::Down) {
                character_y += character_speed;
            }

            let character_position = Point::new(character_x, character_y);
            painter.fill_circle(character_position, character_size, Color::MAGENTA);
            if mouse.is_in_rect(Rect::around_circle(character_position, character_size)) {
                if let Some(style) = &text_style {
                    painter.draw_text(style, "Hello!", Color::BLACK, character_position);
                }
            }

            if do_button(&mut painter, &mouse, Color::BLUE, Rect::new(300, 100, 50, 25)) {
                num_button_clicks += 1;
                info!("Button clicked {} times", num_button_clicks);
            }
            if let Some(style) = &text_style {
                painter.draw_text(
                    style,
                    &format!("Button clicked {} times", num_button_clicks),
                    Color::BLACK,
                    Point::new(360, 120),
                );
            }

            // A little cursor dot that reacts to the primary button.
            let cursor_color = if mouse.is_button_down(MouseButton::Primary) {
                Color::YELLOW
            } else {
                Color::BLUE
            };
            painter.fill_circle(mouse.position(), 5, cursor_color);
            if let Some(style) = &text_style {
                let readout = format!("X: {}, Y: {}", mouse.x(), mouse.y());
                painter.draw_text(style, &readout, Color::BLACK, mouse.position());
            }
        }

        window.present()?;

        mouse.reset_for_next_frame();
        keyboard.reset_for_next_frame();
        thread::sleep(config.frame_duration());
    }

    info!("Window closed, exiting");
    Ok(())
}
