/// Receives the steps taken by the simplifier as they happen.
///
/// Pass `&mut ()` to discard the steps, or a `Vec` to keep them in order.
pub trait StepCollector<S> {
    fn push(&mut self, step: S);
}

impl<S> StepCollector<S> for () {
    #[inline]
    fn push(&mut self, _: S) {}
}

impl<S> StepCollector<S> for Vec<S> {
    #[inline]
    fn push(&mut self, step: S) {
        Vec::push(self, step);
    }
}
