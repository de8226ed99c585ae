use std::rc::Rc;

/// Called with the new match state whenever a registered query starts or
/// stops matching.
pub type MatchListener = Rc<dyn Fn(bool)>;

/// The result of registering a query with a [`ViewportQueryEngine`].
#[derive(Debug)]
pub struct Registration<H> {
    pub handle: H,
    /// Whether the query matched the viewport when it was registered.
    pub matches: bool,
}

/// Evaluates media queries against a live viewport.
///
/// Listeners are invoked on the thread that owns the engine, one at a time,
/// in the order the engine observes the changes.
pub trait ViewportQueryEngine {
    type Handle;

    /// Start watching `query`, calling `listener` whenever its match state
    /// changes.
    fn register(&self, query: &str, listener: MatchListener) -> Registration<Self::Handle>;

    /// Stop watching. The listener of `handle` is not called after this
    /// returns.
    fn unregister(&self, handle: Self::Handle);
}

impl<E: ViewportQueryEngine + ?Sized> ViewportQueryEngine for Rc<E> {
    type Handle = E::Handle;

    fn register(&self, query: &str, listener: MatchListener) -> Registration<Self::Handle> {
        (**self).register(query, listener)
    }

    fn unregister(&self, handle: Self::Handle) {
        (**self).unregister(handle)
    }
}
