//! Tracks the breakpoint of a live viewport.
//!
//! A [`BreakpointObserver`] registers the [`only`](crate::QueryFactory::only)
//! query of every breakpoint with a [`ViewportQueryEngine`]. Since those
//! queries partition the width axis, the breakpoint whose query most recently
//! started matching is the current one.

use std::{
    cell::{Cell, RefCell},
    rc::{Rc, Weak},
};

#[cfg(feature = "reactive")]
use floem_reactive::{ReadSignal, RwSignal, Scope, SignalGet, SignalUpdate};
use tracing::{debug, trace};

use crate::{
    breakpoint::{Breakpoint, BreakpointSet, BreakpointsDefinition},
    engine::{MatchListener, Registration, ViewportQueryEngine},
    query::{QueryFactory, QueryOptions},
};

struct BreakpointContext<B, H> {
    breakpoint: B,
    query: String,
    /// `None` once the query has been unregistered.
    handle: Option<H>,
}

type Subscriber<B> = Rc<dyn Fn(B)>;

struct ObserverState<B> {
    current: Cell<Option<B>>,
    disposed: Cell<bool>,
    subscribers: RefCell<Vec<(u64, Subscriber<B>)>>,
    next_subscriber: Cell<u64>,
}

impl<B: BreakpointSet> ObserverState<B> {
    fn new() -> Self {
        Self {
            current: Cell::new(None),
            disposed: Cell::new(false),
            subscribers: RefCell::new(Vec::new()),
            next_subscriber: Cell::new(0),
        }
    }

    fn set_current(&self, breakpoint: B) {
        if self.disposed.get() {
            trace!(?breakpoint, "ignoring match on disposed observer");
            return;
        }
        let previous = self.current.get();
        if previous == Some(breakpoint) {
            return;
        }

        debug!(?previous, current = ?breakpoint, "breakpoint changed");
        self.current.set(Some(breakpoint));

        // Subscribers may subscribe or unsubscribe while being notified.
        let subscribers: Vec<Subscriber<B>> = self
            .subscribers
            .borrow()
            .iter()
            .map(|(_, subscriber)| subscriber.clone())
            .collect();
        for subscriber in subscribers {
            // A subscriber moved the observer on; the rest already saw the newer breakpoint.
            if self.disposed.get() || self.current.get() != Some(breakpoint) {
                break;
            }
            subscriber(breakpoint);
        }
    }

    fn add_subscriber(&self, subscriber: Subscriber<B>) -> u64 {
        let id = self.next_subscriber.get();
        self.next_subscriber.set(id + 1);
        self.subscribers.borrow_mut().push((id, subscriber));
        id
    }

    fn remove_subscriber(&self, id: u64) {
        self.subscribers
            .borrow_mut()
            .retain(|(other, _)| *other != id);
    }
}

/// Keeps a subscriber of [`BreakpointObserver::subscribe`] alive.
///
/// The subscriber is removed when this is dropped, unless it was detached.
#[must_use = "dropping a Subscription unsubscribes immediately"]
pub struct Subscription {
    unsubscribe: Option<Box<dyn FnOnce()>>,
}

impl Subscription {
    fn new(unsubscribe: impl FnOnce() + 'static) -> Self {
        Self {
            unsubscribe: Some(Box::new(unsubscribe)),
        }
    }

    pub fn unsubscribe(mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }

    /// Keep the subscriber for as long as the observer lives.
    pub fn detach(mut self) {
        self.unsubscribe = None;
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(unsubscribe) = self.unsubscribe.take() {
            unsubscribe();
        }
    }
}

/// Observes which breakpoint range the viewport width is in.
///
/// ```rust,ignore
/// let observer = BreakpointObserver::new(BreakpointsDefinition::default(), engine);
/// let _subscription = observer.subscribe(|bp| println!("now at {bp}"));
/// ```
pub struct BreakpointObserver<E: ViewportQueryEngine, B: BreakpointSet = Breakpoint> {
    engine: E,
    contexts: Vec<BreakpointContext<B, E::Handle>>,
    state: Rc<ObserverState<B>>,
    #[cfg(feature = "reactive")]
    signal: std::cell::OnceCell<(Scope, RwSignal<Option<B>>)>,
}

impl<E: ViewportQueryEngine, B: BreakpointSet> BreakpointObserver<E, B> {
    /// Register one query per breakpoint with `engine`.
    ///
    /// If the engine reports a query as already matching, the observer
    /// resolves to that breakpoint before returning.
    pub fn new(breakpoints: BreakpointsDefinition<B>, engine: E) -> Self {
        let queries = QueryFactory::new(breakpoints, QueryOptions { query_only: true });
        let state = Rc::new(ObserverState::new());

        let contexts = queries
            .breakpoints()
            .iter()
            .map(|(breakpoint, _)| {
                let query = queries.only(breakpoint);
                let listener = Self::listener(Rc::downgrade(&state), breakpoint);
                let Registration { handle, matches } = engine.register(&query, listener);
                trace!(?breakpoint, %query, matches = matches, "registered breakpoint query");

                if matches {
                    state.set_current(breakpoint);
                }

                BreakpointContext {
                    breakpoint,
                    query,
                    handle: Some(handle),
                }
            })
            .collect();

        Self {
            engine,
            contexts,
            state,
            #[cfg(feature = "reactive")]
            signal: std::cell::OnceCell::new(),
        }
    }

    fn listener(state: Weak<ObserverState<B>>, breakpoint: B) -> MatchListener {
        Rc::new(move |matches| {
            if !matches {
                return;
            }
            if let Some(state) = state.upgrade() {
                state.set_current(breakpoint);
            }
        })
    }

    /// The breakpoint the viewport is in, or `None` if no query has matched
    /// yet.
    pub fn current(&self) -> Option<B> {
        self.state.current.get()
    }

    /// Call `f` with every new breakpoint.
    ///
    /// If a breakpoint has already been resolved, `f` is called with it
    /// before this returns. `f` is never called twice in a row with the same
    /// breakpoint.
    pub fn subscribe(&self, f: impl Fn(B) + 'static) -> Subscription {
        let subscriber: Subscriber<B> = Rc::new(f);
        let id = self.state.add_subscriber(subscriber.clone());
        if let Some(current) = self.current() {
            subscriber(current);
        }

        let state = Rc::downgrade(&self.state);
        Subscription::new(move || {
            if let Some(state) = state.upgrade() {
                state.remove_subscriber(id);
            }
        })
    }

    /// A signal holding [`current`](Self::current), for use in reactive
    /// effects.
    ///
    /// The signal lives in a child of the scope that is current on the first
    /// call, and is disposed together with the observer.
    #[cfg(feature = "reactive")]
    pub fn current_signal(&self) -> ReadSignal<Option<B>> {
        let (_, signal) = self.signal.get_or_init(|| {
            let scope = Scope::current().create_child();
            let signal = scope.create_rw_signal(self.current());
            self.subscribe(move |breakpoint| {
                if signal.get_untracked() != Some(breakpoint) {
                    signal.set(Some(breakpoint));
                }
            })
            .detach();
            (scope, signal)
        });
        signal.read_only()
    }

    /// The registered query of every breakpoint, narrowest first.
    pub fn queries(&self) -> impl Iterator<Item = (B, &str)> + '_ {
        self.contexts
            .iter()
            .map(|context| (context.breakpoint, context.query.as_str()))
    }

    pub fn subscriber_count(&self) -> usize {
        self.state.subscribers.borrow().len()
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn is_disposed(&self) -> bool {
        self.state.disposed.get()
    }

    /// Unregister every query from the engine.
    ///
    /// The current breakpoint stays readable, but no further changes are
    /// observed or emitted. The signal from
    /// [`current_signal`](Self::current_signal) is disposed. Called
    /// automatically on drop.
    pub fn dispose(&mut self) {
        if self.state.disposed.replace(true) {
            return;
        }

        for context in &mut self.contexts {
            if let Some(handle) = context.handle.take() {
                self.engine.unregister(handle);
            }
        }
        self.state.subscribers.borrow_mut().clear();
        #[cfg(feature = "reactive")]
        {
            if let Some((scope, _)) = self.signal.get() {
                scope.dispose();
            }
        }
        debug!(queries = self.contexts.len(), "breakpoint observer disposed");
    }
}

impl<E: ViewportQueryEngine, B: BreakpointSet> Drop for BreakpointObserver<E, B> {
    fn drop(&mut self) {
        self.dispose();
    }
}
