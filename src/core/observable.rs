// Copyright 2025 bakri (tidynest@proton.me)
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! src/core/observable.rs
//!
//! Notify-on-write values
//!
//! `Observable<T>` is the only reactive primitive the carousel needs. It is
//! deliberately single-threaded (`Rc` + `RefCell`): every carousel operation
//! runs on the thread that owns the interaction loop.
//!
//! # Re-entrancy
//! Observers run synchronously inside `set()`, after the value has been
//! stored and all borrows released, so an observer may read or write the
//! same observable. Writing a value equal to the current one is a no-op and
//! notifies nobody, which is what stops notification cycles.
//!
//! # Sharing
//! Cloning an `Observable` yields a second handle onto the same value, so a
//! single writer can drive many readers (the recommended difficulty is
//! shared this way by every beatmap set).

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use slotmap::{new_key_type, SlotMap};

new_key_type! {
    /// Handle returned by [`Observable::subscribe`]
    pub struct SubscriptionId;
}

type Observer<T> = Rc<dyn Fn(&T, &T)>;

struct Shared<T> {
    value: RefCell<T>,
    observers: RefCell<SlotMap<SubscriptionId, Observer<T>>>,
}

/// A value that notifies subscribers whenever it changes
///
/// # Example
/// ```
/// use beatmap_carousel::core::Observable;
///
/// let difficulty = Observable::new(3.0);
/// let reader = difficulty.clone();
///
/// assert!(difficulty.set(4.5));
/// assert!(!difficulty.set(4.5)); // unchanged, nobody notified
/// assert_eq!(reader.get(), 4.5);
/// ```
pub struct Observable<T> {
    shared: Rc<Shared<T>>,
}

impl<T: Clone + PartialEq> Observable<T> {
    pub fn new(value: T) -> Self {
        Self {
            shared: Rc::new(Shared {
                value: RefCell::new(value),
                observers: RefCell::new(SlotMap::with_key()),
            }),
        }
    }

    /// Returns a copy of the current value
    pub fn get(&self) -> T {
        self.shared.value.borrow().clone()
    }

    /// Reads the value through a closure without cloning it
    pub fn with<R>(&self, f: impl FnOnce(&T) -> R) -> R {
        f(&self.shared.value.borrow())
    }

    /// Stores `value` and notifies observers, returning whether it changed
    ///
    /// Observers receive `(old, new)`. If an observer writes a different
    /// value back, the remaining observers of the outer write still see the
    /// outer `new`; the nested write delivers its own notification.
    pub fn set(&self, value: T) -> bool {
        let old = {
            let mut current = self.shared.value.borrow_mut();
            if *current == value {
                return false;
            }
            std::mem::replace(&mut *current, value.clone())
        };

        // Snapshot so observers can subscribe/unsubscribe while being notified
        let observers: Vec<Observer<T>> = self.shared.observers.borrow().values().cloned().collect();
        for observer in observers {
            observer(&old, &value);
        }

        true
    }

    /// Registers a callback invoked with `(old, new)` on every change
    pub fn subscribe<F>(&self, observer: F) -> SubscriptionId
    where
        F: Fn(&T, &T) + 'static,
    {
        self.shared.observers.borrow_mut().insert(Rc::new(observer))
    }

    /// Removes a callback. Returns `false` if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.shared.observers.borrow_mut().remove(id).is_some()
    }

    pub fn subscriber_count(&self) -> usize {
        self.shared.observers.borrow().len()
    }

    /// Whether two handles point at the same underlying value
    pub fn shares_with(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.shared, &other.shared)
    }
}

impl<T> Clone for Observable<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T: Clone + PartialEq + Default> Default for Observable<T> {
    fn default() -> Self {
        Self::new(T::default())
    }
}

impl<T: fmt::Debug> fmt::Debug for Observable<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Observable")
            .field("value", &*self.shared.value.borrow())
            .field("subscribers", &self.shared.observers.borrow().len())
            .finish()
    }
}
