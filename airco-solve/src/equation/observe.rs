/// Receives solver events and optionally asks the solver to act.
///
/// Returning `Some(action)` requests a solver-specific action and `None` lets
/// the solver continue. Closures implement `Observer` automatically, and `()`
/// is a no-op observer.
pub trait Observer<E, A> {
    fn observe(&mut self, event: &E) -> Option<A>;
}

impl<E, A, F> Observer<E, A> for F
where
    F: FnMut(&E) -> Option<A>,
{
    fn observe(&mut self, event: &E) -> Option<A> {
        self(event)
    }
}

impl<E, A> Observer<E, A> for () {
    fn observe(&mut self, _event: &E) -> Option<A> {
        None
    }
}
