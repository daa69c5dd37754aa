//! Logical action state and edge-triggered subscriptions
//!
//! The keyboard-to-action mapping lives outside this crate; callers feed
//! already-mapped action levels in through [`InputState::set_action`].
//! Components either poll a per-frame [`InputSnapshot`] (movement) or
//! subscribe to level transitions (jump).

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

/// The five logical actions steering the marble
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Forward,
    Backward,
    Leftward,
    Rightward,
    Jump,
}

impl Action {
    /// All actions, in declaration order
    pub const ALL: [Action; 5] = [
        Action::Forward,
        Action::Backward,
        Action::Leftward,
        Action::Rightward,
        Action::Jump,
    ];
}

/// Level state of every action at one instant, copied each tick.
///
/// The directions are independent booleans; simultaneous directions carry no
/// ordering or priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputSnapshot {
    pub forward: bool,
    pub backward: bool,
    pub leftward: bool,
    pub rightward: bool,
    pub jump: bool,
}

impl InputSnapshot {
    pub fn get(&self, action: Action) -> bool {
        match action {
            Action::Forward => self.forward,
            Action::Backward => self.backward,
            Action::Leftward => self.leftward,
            Action::Rightward => self.rightward,
            Action::Jump => self.jump,
        }
    }

    pub fn any_held(&self) -> bool {
        self.forward || self.backward || self.leftward || self.rightward || self.jump
    }

    fn set(&mut self, action: Action, pressed: bool) {
        match action {
            Action::Forward => self.forward = pressed,
            Action::Backward => self.backward = pressed,
            Action::Leftward => self.leftward = pressed,
            Action::Rightward => self.rightward = pressed,
            Action::Jump => self.jump = pressed,
        }
    }
}

type EdgeHandler = Box<dyn FnMut(bool)>;

struct Subscriber {
    id: u64,
    action: Action,
    handler: EdgeHandler,
}

type Registry = Rc<RefCell<Vec<Subscriber>>>;

/// Current action levels plus the edge-observer registry.
pub struct InputState {
    held: InputSnapshot,
    subscribers: Registry,
    next_id: Cell<u64>,
}

impl InputState {
    pub fn new() -> Self {
        Self {
            held: InputSnapshot::default(),
            subscribers: Rc::new(RefCell::new(Vec::new())),
            next_id: Cell::new(0),
        }
    }

    /// Copy of the current action levels.
    pub fn snapshot(&self) -> InputSnapshot {
        self.held
    }

    /// Update one action's level.
    ///
    /// Observers for that action fire only when the level actually changes;
    /// a repeated level is silently absorbed. Dispatch holds the registry
    /// borrow, so handlers must not subscribe or unsubscribe reentrantly.
    pub fn set_action(&mut self, action: Action, pressed: bool) {
        if self.held.get(action) == pressed {
            return;
        }
        self.held.set(action, pressed);

        let mut subscribers = self.subscribers.borrow_mut();
        for subscriber in subscribers.iter_mut().filter(|s| s.action == action) {
            (subscriber.handler)(pressed);
        }
    }

    /// Register an edge observer for one action.
    ///
    /// The returned [`Subscription`] removes the observer when dropped.
    pub fn subscribe(&self, action: Action, handler: impl FnMut(bool) + 'static) -> Subscription {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        self.subscribers.borrow_mut().push(Subscriber {
            id,
            action,
            handler: Box::new(handler),
        });
        Subscription {
            registry: Rc::downgrade(&self.subscribers),
            id,
        }
    }
}

impl Default for InputState {
    fn default() -> Self {
        Self::new()
    }
}

/// Edge-observer handle; dropping it unregisters the handler.
pub struct Subscription {
    registry: Weak<RefCell<Vec<Subscriber>>>,
    id: u64,
}

impl Subscription {
    /// Explicit release, equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().retain(|s| s.id != self.id);
        }
    }
}
