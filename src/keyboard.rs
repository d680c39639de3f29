//! Frame-synchronous keyboard state tracking
//!
//! Key press/release notifications arrive asynchronously from the Wayland
//! event dispatch; the frame loop polls the accumulated state. Level state
//! ("is held") outlives frames; edge state ("changed this frame") lives from
//! one [`Keyboard::reset_for_next_frame`] call to the next.

use std::collections::HashSet;
use std::sync::Arc;

use log::debug;
use parking_lot::Mutex;
use smithay_client_toolkit::seat::keyboard::Keysym;

#[derive(Default)]
struct KeyState {
    held: HashSet<Keysym>,
    pressed_this_frame: HashSet<Keysym>,
    released_this_frame: HashSet<Keysym>,
}

/// Cloneable handle to the keyboard tracker. One tracker is bound to one
/// window for its whole lifetime; clones share the same state.
///
/// The two "this frame" sets are additive logs: a key pressed and released
/// inside a single frame window shows up in both, even though its level
/// state is back to not-held.
#[derive(Clone, Default)]
pub struct Keyboard {
    inner: Arc<Mutex<KeyState>>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if the key is currently held down, regardless of frames.
    pub fn is_key_down(&self, key: Keysym) -> bool {
        self.inner.lock().held.contains(&key)
    }

    /// True if a press notification for the key arrived since the last
    /// [`Keyboard::reset_for_next_frame`].
    pub fn is_key_down_this_frame(&self, key: Keysym) -> bool {
        self.inner.lock().pressed_this_frame.contains(&key)
    }

    /// True if a release notification for the key arrived since the last
    /// [`Keyboard::reset_for_next_frame`].
    pub fn is_key_up_this_frame(&self, key: Keysym) -> bool {
        self.inner.lock().released_this_frame.contains(&key)
    }

    /// Call at the end of every frame, after all queries, so the
    /// "this frame" queries answer for the right frame window.
    pub fn reset_for_next_frame(&self) {
        let mut state = self.inner.lock();
        state.pressed_this_frame.clear();
        state.released_this_frame.clear();
    }

    /// Record a key press. Normally called from the window's event plumbing.
    pub fn notify_press(&self, key: Keysym) {
        let mut state = self.inner.lock();
        state.held.insert(key);
        state.pressed_this_frame.insert(key);
    }

    /// Record a key release. Normally called from the window's event
    /// plumbing.
    pub fn notify_release(&self, key: Keysym) {
        let mut state = self.inner.lock();
        state.held.remove(&key);
        state.released_this_frame.insert(key);
    }

    /// Keyboard focus entered the window with `held` keys already down.
    /// Seeds level state only; no edges fire, matching the host toolkit's
    /// view that these presses happened before we could see them.
    pub fn notify_focus_gained(&self, held: &[Keysym]) {
        debug!("keyboard focus gained with {} held keys", held.len());
        let mut state = self.inner.lock();
        state.held.extend(held.iter().copied());
    }

    /// Keyboard focus left the window. Wayland stops delivering releases at
    /// this point, so every key must be treated as released.
    pub fn notify_focus_lost(&self) {
        debug!("keyboard focus lost, dropping held keys");
        self.inner.lock().held.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_sets_level_and_edge() {
        let keyboard = Keyboard::new();
        keyboard.notify_press(Keysym::a);

        assert!(keyboard.is_key_down(Keysym::a));
        assert!(keyboard.is_key_down_this_frame(Keysym::a));
        assert!(!keyboard.is_key_up_this_frame(Keysym::a));
        assert!(!keyboard.is_key_down(Keysym::b));
    }

    #[test]
    fn reset_clears_edges_but_not_level() {
        let keyboard = Keyboard::new();
        keyboard.notify_press(Keysym::a);
        keyboard.reset_for_next_frame();

        assert!(!keyboard.is_key_down_this_frame(Keysym::a));
        assert!(!keyboard.is_key_up_this_frame(Keysym::a));
        // Never released, so the level state survives the frame boundary.
        assert!(keyboard.is_key_down(Keysym::a));
    }

    #[test]
    fn press_and_release_within_one_frame_log_both_edges() {
        let keyboard = Keyboard::new();
        keyboard.notify_press(Keysym::space);
        keyboard.notify_release(Keysym::space);

        // Both transient sets keep their entry; they are not checked
        // against the level state.
        assert!(keyboard.is_key_down_this_frame(Keysym::space));
        assert!(keyboard.is_key_up_this_frame(Keysym::space));
        assert!(!keyboard.is_key_down(Keysym::space));
    }

    #[test]
    fn edges_stay_false_after_reset_until_new_notification() {
        let keyboard = Keyboard::new();
        keyboard.notify_press(Keysym::Left);
        keyboard.notify_release(Keysym::Left);
        keyboard.reset_for_next_frame();

        assert!(!keyboard.is_key_down_this_frame(Keysym::Left));
        assert!(!keyboard.is_key_up_this_frame(Keysym::Left));

        keyboard.notify_press(Keysym::Left);
        assert!(keyboard.is_key_down_this_frame(Keysym::Left));
    }

    #[test]
    fn focus_gained_seeds_level_without_edges() {
        let keyboard = Keyboard::new();
        keyboard.notify_focus_gained(&[Keysym::a, Keysym::b]);

        assert!(keyboard.is_key_down(Keysym::a));
        assert!(keyboard.is_key_down(Keysym::b));
        assert!(!keyboard.is_key_down_this_frame(Keysym::a));
    }

    #[test]
    fn focus_lost_drops_held_keys() {
        let keyboard = Keyboard::new();
        keyboard.notify_press(Keysym::a);
        keyboard.notify_focus_lost();
        assert!(!keyboard.is_key_down(Keysym::a));
    }

    #[test]
    fn clones_share_state_across_contexts() {
        let keyboard = Keyboard::new();
        let event_side = keyboard.clone();

        let writer = std::thread::spawn(move || {
            event_side.notify_press(Keysym::Return);
        });
        writer.join().unwrap();

        assert!(keyboard.is_key_down(Keysym::Return));
    }
}
