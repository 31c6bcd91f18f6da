//=========================================================================
// Input Tracker
//=========================================================================
//
// Held movement keys in press order, fed by a channel.
//
// Architecture:
//   Platform → InputListener::send() → bounded channel
//                                          ↓
//   GameLoop step → InputTracker::poll() → held keys (Vec, press order)
//                                          ↓
//                              current_direction() (last held key)
//
// Key events arrive whenever the OS delivers them; the tracker only
// observes them when the frame step drains the channel, so a step always
// reads one consistent snapshot.
//
//=========================================================================

//=== External Dependencies ===============================================

use crossbeam_channel::{bounded, Receiver, Sender, TryRecvError, TrySendError};
use log::{debug, trace, warn};

//=== Internal Dependencies ===============================================

use super::direction::{Direction, KeyBindings};
use super::event::{InputEvent, KeyCode};

//=== ListenerState =======================================================

/// Result of draining the input channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListenerState {
    /// At least one listener is still attached.
    Listening,

    /// Every listener was dropped; no further events can arrive.
    Disposed,
}

//=== InputListener =======================================================

/// Sending half handed to the platform layer.
///
/// Cloneable. Dropping every clone detaches the tracker from its event
/// source; the tracker notices on its next [`poll`](InputTracker::poll)
/// and releases all held keys.
#[derive(Debug, Clone)]
pub struct InputListener {
    sender: Sender<InputEvent>,
}

impl InputListener {
    /// Queues an event for the next frame.
    ///
    /// Returns `false` if the event was dropped (queue full or tracker gone).
    pub fn send(&self, event: InputEvent) -> bool {
        match self.sender.try_send(event) {
            Ok(()) => true,
            Err(TrySendError::Full(event)) => {
                warn!(target: "input", "Input queue full, dropping {:?}", event);
                false
            }
            Err(TrySendError::Disconnected(_)) => {
                trace!(target: "input", "Tracker dropped, ignoring {:?}", event);
                false
            }
        }
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.send(InputEvent::KeyDown(key))
    }

    pub fn key_up(&self, key: KeyCode) -> bool {
        self.send(InputEvent::KeyUp(key))
    }

    /// Stops listening. Equivalent to dropping the listener.
    pub fn dispose(self) {}
}

//=== InputTracker ========================================================

/// Insertion-ordered set of held movement keys.
pub struct InputTracker {
    bindings: KeyBindings,
    held: Vec<KeyCode>,
    last_pressed: Option<Direction>,
    receiver: Receiver<InputEvent>,
    capacity: usize,
    state: ListenerState,
}

impl InputTracker {
    /// Maximum events applied per poll; the rest wait for the next frame.
    const MAX_EVENTS_PER_FRAME: usize = 100;

    /// Creates a tracker and its first listener.
    ///
    /// # Panics
    ///
    /// Panics if `capacity == 0`.
    pub fn new(bindings: KeyBindings, capacity: usize) -> (Self, InputListener) {
        assert!(capacity > 0, "Input channel capacity must be positive");

        let (sender, receiver) = bounded(capacity);
        let tracker = Self {
            bindings,
            held: Vec::with_capacity(4),
            last_pressed: None,
            receiver,
            capacity,
            state: ListenerState::Listening,
        };

        (tracker, InputListener { sender })
    }

    /// Registers a fresh event source and returns its listener.
    ///
    /// Listeners handed out earlier are detached: their events are no
    /// longer observed. Held keys are released since their key-ups would
    /// arrive on the old channel.
    pub fn listen(&mut self) -> InputListener {
        let (sender, receiver) = bounded(self.capacity);
        self.receiver = receiver;
        self.held.clear();
        self.state = ListenerState::Listening;

        debug!(target: "input", "Listening on a new channel (capacity {})", self.capacity);
        InputListener { sender }
    }

    //--- Event Draining ---------------------------------------------------

    /// Applies queued events (bounded to prevent starvation).
    pub fn poll(&mut self) -> ListenerState {
        if self.state == ListenerState::Disposed {
            return self.state;
        }

        let mut drained = 0;
        while drained < Self::MAX_EVENTS_PER_FRAME {
            match self.receiver.try_recv() {
                Ok(event) => {
                    self.apply(event);
                    drained += 1;
                }
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    debug!(target: "input", "All listeners dropped, releasing {} held keys", self.held.len());
                    self.held.clear();
                    self.state = ListenerState::Disposed;
                    return self.state;
                }
            }
        }

        if drained >= Self::MAX_EVENTS_PER_FRAME {
            warn!(target: "input", "Input backlog: applied {} events this frame", drained);
        }

        self.state
    }

    /// Applies a single event immediately.
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::KeyDown(key) => self.press(key),
            InputEvent::KeyUp(key) => self.release(key),
        }
    }

    //--- Mutation ---------------------------------------------------------

    /// Appends `key` if it is a movement key not already held.
    pub fn press(&mut self, key: KeyCode) {
        let Some(direction) = self.bindings.direction_of(key) else {
            return;
        };

        self.last_pressed = Some(direction);
        if self.held.contains(&key) {
            return;
        }

        self.held.push(key);
        trace!(target: "input", "Pressed {:?} -> held {:?}", key, self.held);
    }

    /// Removes `key` if held.
    pub fn release(&mut self, key: KeyCode) {
        if let Some(index) = self.held.iter().position(|&k| k == key) {
            self.held.remove(index);
            trace!(target: "input", "Released {:?} -> held {:?}", key, self.held);
        }
    }

    //--- Query API --------------------------------------------------------

    /// Direction of the most recently pressed key that is still held.
    pub fn current_direction(&self) -> Option<Direction> {
        self.held
            .last()
            .and_then(|&key| self.bindings.direction_of(key))
    }

    /// Direction of the most recently pressed movement key, held or not.
    pub fn last_pressed(&self) -> Option<Direction> {
        self.last_pressed
    }

    /// Held movement keys, oldest press first.
    pub fn held_keys(&self) -> &[KeyCode] {
        &self.held
    }

    pub fn listener_state(&self) -> ListenerState {
        self.state
    }

    pub fn bindings(&self) -> &KeyBindings {
        &self.bindings
    }
}

//=========================================================================
// Unit Tests
//=========================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn tracker() -> (InputTracker, InputListener) {
        InputTracker::new(KeyBindings::default(), 16)
    }

    //=====================================================================
    // Direct press / release
    //=====================================================================

    #[test]
    fn most_recent_held_key_wins() {
        let (mut t, _l) = tracker();
        t.press(KeyCode::KeyW);
        t.press(KeyCode::KeyD);
        t.release(KeyCode::KeyW);
        assert_eq!(t.current_direction(), Some(Direction::Right));
    }

    #[test]
    fn pressing_twice_tracks_once() {
        let (mut t, _l) = tracker();
        t.press(KeyCode::KeyW);
        t.press(KeyCode::KeyW);
        assert_eq!(t.held_keys(), &[KeyCode::KeyW]);
    }

    #[test]
    fn releasing_newest_falls_back_to_older() {
        let (mut t, _l) = tracker();
        t.press(KeyCode::KeyW);
        t.press(KeyCode::KeyD);
        t.release(KeyCode::KeyD);
        assert_eq!(t.current_direction(), Some(Direction::Up));
    }

    #[test]
    fn repress_does_not_reorder() {
        let (mut t, _l) = tracker();
        t.press(KeyCode::KeyW);
        t.press(KeyCode::KeyD);
        t.press(KeyCode::KeyW); // auto-repeat
        assert_eq!(t.held_keys(), &[KeyCode::KeyW, KeyCode::KeyD]);
        assert_eq!(t.current_direction(), Some(Direction::Right));
    }

    #[test]
    fn non_movement_keys_are_ignored() {
        let (mut t, _l) = tracker();
        t.press(KeyCode::Space);
        t.press(KeyCode::KeyQ);
        assert!(t.held_keys().is_empty());
        assert_eq!(t.current_direction(), None);
        assert_eq!(t.last_pressed(), None);
    }

    #[test]
    fn releasing_unheld_key_is_noop() {
        let (mut t, _l) = tracker();
        t.press(KeyCode::KeyA);
        t.release(KeyCode::KeyS);
        t.release(KeyCode::Escape);
        assert_eq!(t.held_keys(), &[KeyCode::KeyA]);
    }

    #[test]
    fn empty_tracker_has_no_direction() {
        let (t, _l) = tracker();
        assert_eq!(t.current_direction(), None);
    }

    #[test]
    fn last_pressed_survives_release() {
        let (mut t, _l) = tracker();
        t.press(KeyCode::KeyS);
        t.release(KeyCode::KeyS);
        assert_eq!(t.current_direction(), None);
        assert_eq!(t.last_pressed(), Some(Direction::Down));
    }

    #[test]
    fn arrow_and_letter_for_same_direction_are_separate_keys() {
        let (mut t, _l) = tracker();
        t.press(KeyCode::KeyW);
        t.press(KeyCode::ArrowUp);
        t.release(KeyCode::KeyW);
        assert_eq!(t.current_direction(), Some(Direction::Up));
        assert_eq!(t.held_keys(), &[KeyCode::ArrowUp]);
    }

    //=====================================================================
    // Channel delivery
    //=====================================================================

    #[test]
    fn events_apply_only_on_poll() {
        let (mut t, listener) = tracker();
        assert!(listener.key_down(KeyCode::KeyD));
        assert_eq!(t.current_direction(), None);

        assert_eq!(t.poll(), ListenerState::Listening);
        assert_eq!(t.current_direction(), Some(Direction::Right));
    }

    #[test]
    fn poll_preserves_event_order() {
        let (mut t, listener) = tracker();
        listener.key_down(KeyCode::KeyW);
        listener.key_down(KeyCode::KeyD);
        listener.key_up(KeyCode::KeyW);
        t.poll();
        assert_eq!(t.held_keys(), &[KeyCode::KeyD]);
    }

    #[test]
    fn full_queue_drops_event() {
        let (mut t, listener) = InputTracker::new(KeyBindings::default(), 1);
        assert!(listener.key_down(KeyCode::KeyW));
        assert!(!listener.key_down(KeyCode::KeyD));
        t.poll();
        assert_eq!(t.held_keys(), &[KeyCode::KeyW]);
    }

    #[test]
    fn poll_is_bounded_per_frame() {
        let (mut t, listener) = InputTracker::new(KeyBindings::default(), 256);
        for _ in 0..150 {
            listener.key_down(KeyCode::Space);
        }
        listener.key_down(KeyCode::KeyA);

        t.poll();
        assert_eq!(t.current_direction(), None, "KeyA is still queued");

        t.poll();
        assert_eq!(t.current_direction(), Some(Direction::Left));
    }

    #[test]
    fn disposing_listener_releases_held_keys() {
        let (mut t, listener) = tracker();
        listener.key_down(KeyCode::KeyW);
        t.poll();
        assert_eq!(t.current_direction(), Some(Direction::Up));

        listener.dispose();
        assert_eq!(t.poll(), ListenerState::Disposed);
        assert!(t.held_keys().is_empty());
        assert_eq!(t.listener_state(), ListenerState::Disposed);
    }

    #[test]
    fn cloned_listener_keeps_channel_open() {
        let (mut t, listener) = tracker();
        let second = listener.clone();
        drop(listener);

        second.key_down(KeyCode::KeyA);
        assert_eq!(t.poll(), ListenerState::Listening);
        assert_eq!(t.current_direction(), Some(Direction::Left));
    }

    #[test]
    fn listen_reattaches_after_dispose() {
        let (mut t, listener) = tracker();
        listener.dispose();
        assert_eq!(t.poll(), ListenerState::Disposed);

        let fresh = t.listen();
        fresh.key_down(KeyCode::KeyS);
        assert_eq!(t.poll(), ListenerState::Listening);
        assert_eq!(t.current_direction(), Some(Direction::Down));
    }

    #[test]
    fn listen_detaches_previous_listener() {
        let (mut t, old) = tracker();
        old.key_down(KeyCode::KeyW);
        t.poll();

        let _fresh = t.listen();
        assert!(t.held_keys().is_empty());
        assert!(!old.key_down(KeyCode::KeyD));
        t.poll();
        assert_eq!(t.current_direction(), None);
    }

    #[test]
    fn send_after_tracker_dropped_is_harmless() {
        let (t, listener) = tracker();
        drop(t);
        assert!(!listener.key_down(KeyCode::KeyW));
    }

    #[test]
    #[should_panic(expected = "Input channel capacity must be positive")]
    fn zero_capacity_panics() {
        let _ = InputTracker::new(KeyBindings::default(), 0);
    }
}
