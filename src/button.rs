//! Immediate-mode button
//!
//! Not a widget object: the caller re-issues [`do_button`] every frame and
//! the hover/press feedback is recomputed from the current input state each
//! time. At the shape counts this crate targets, that is simpler and cheap
//! enough that no persisted identity or state machine is worth carrying.

use crate::draw::{Color, Painter};
use crate::geometry::Rect;
use crate::mouse::{Mouse, MouseButton};

/// Channel offset added to the base color while hovered.
const HOVER_LIGHTEN: u8 = 50;
/// Channel offset subtracted from the base color while hovered and held.
const PRESS_DARKEN: u8 = 30;

/// Draw a rectangular button and report whether it was activated this frame.
///
/// The button lightens while hovered, darkens while hovered with the primary
/// button held, and activates when the primary button's release edge fires
/// while hovering.
///
/// ```no_run
/// # fn frame(painter: &mut easel::Painter, mouse: &easel::Mouse) {
/// use easel::{do_button, Color, Rect};
///
/// if do_button(painter, mouse, Color::BLUE, Rect::new(300, 100, 50, 25)) {
///     println!("The button was clicked!");
/// }
/// # }
/// ```
pub fn do_button(painter: &mut Painter, mouse: &Mouse, color: Color, rect: Rect) -> bool {
    let hovered = mouse.is_in_rect(rect);

    let mut shade = color;
    if hovered {
        shade = color.lighten(HOVER_LIGHTEN);
        if mouse.is_button_down(MouseButton::Primary) {
            shade = color.darken(PRESS_DARKEN);
        }
    }

    painter.fill_rect(rect, shade);

    hovered && mouse.is_button_up_this_frame(MouseButton::Primary)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pixel_at(pixels: &[u8], width: u32, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y * width + x) * 4) as usize;
        [
            pixels[idx],
            pixels[idx + 1],
            pixels[idx + 2],
            pixels[idx + 3],
        ]
    }

    fn frame(mouse: &Mouse, color: Color, rect: Rect) -> (bool, [u8; 4]) {
        let mut pixels = vec![0u8; 32 * 32 * 4];
        let mut painter = Painter::new(&mut pixels, 32, 32);
        let clicked = do_button(&mut painter, mouse, color, rect);
        (clicked, pixel_at(&pixels, 32, 12, 12))
    }

    #[test]
    fn idle_button_draws_base_color() {
        let mouse = Mouse::new();
        mouse.notify_motion(0.0, 0.0);
        let (clicked, pixel) = frame(&mouse, Color::BLUE, Rect::new(8, 8, 10, 10));
        assert!(!clicked);
        assert_eq!(pixel, Color::BLUE.to_argb8888());
    }

    #[test]
    fn hovered_button_lightens() {
        let mouse = Mouse::new();
        mouse.notify_motion(12.0, 12.0);
        let (clicked, pixel) = frame(&mouse, Color::BLUE, Rect::new(8, 8, 10, 10));
        assert!(!clicked);
        assert_eq!(pixel, Color::BLUE.lighten(50).to_argb8888());
    }

    #[test]
    fn held_button_darkens_from_base() {
        let mouse = Mouse::new();
        mouse.notify_motion(12.0, 12.0);
        mouse.notify_press(MouseButton::Primary);
        let (clicked, pixel) = frame(&mouse, Color::GRAY, Rect::new(8, 8, 10, 10));
        assert!(!clicked);
        // Darkened from the base color, not from the lightened shade.
        assert_eq!(pixel, Color::GRAY.darken(30).to_argb8888());
    }

    #[test]
    fn release_while_hovering_activates_once() {
        let mouse = Mouse::new();
        mouse.notify_motion(12.0, 12.0);
        mouse.notify_press(MouseButton::Primary);
        mouse.reset_for_next_frame();
        mouse.notify_release(MouseButton::Primary);

        let (clicked, _) = frame(&mouse, Color::BLUE, Rect::new(8, 8, 10, 10));
        assert!(clicked);

        // The edge is consumed by the frame reset, not by the query.
        mouse.reset_for_next_frame();
        let (clicked_again, _) = frame(&mouse, Color::BLUE, Rect::new(8, 8, 10, 10));
        assert!(!clicked_again);
    }

    #[test]
    fn release_outside_does_not_activate() {
        let mouse = Mouse::new();
        mouse.notify_motion(0.0, 0.0);
        mouse.notify_press(MouseButton::Primary);
        mouse.reset_for_next_frame();
        mouse.notify_release(MouseButton::Primary);

        let (clicked, _) = frame(&mouse, Color::BLUE, Rect::new(8, 8, 10, 10));
        assert!(!clicked);
    }
}
