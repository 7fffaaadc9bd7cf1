use crate::astar::Step;
use crate::cancel::CancelToken;

/// What an observer wants the search to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Control {
    Continue,
    Abort,
}

/// Hook invoked by the search driver once per expansion, before the next
/// cell is popped. It is the driver's only cancellation checkpoint.
///
/// Implemented for closures `FnMut(&Step<'_>) -> Control`, for
/// [`CancelToken`] and for [`NoObserver`].
pub trait StepObserver {
    fn on_step(&mut self, step: &Step<'_>) -> Control;
}

impl<F> StepObserver for F
where
    F: FnMut(&Step<'_>) -> Control,
{
    #[inline]
    fn on_step(&mut self, step: &Step<'_>) -> Control {
        self(step)
    }
}

impl StepObserver for CancelToken {
    #[inline]
    fn on_step(&mut self, _step: &Step<'_>) -> Control {
        if self.is_cancelled() {
            Control::Abort
        } else {
            Control::Continue
        }
    }
}

/// Observer that never interrupts.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoObserver;

impl StepObserver for NoObserver {
    #[inline]
    fn on_step(&mut self, _step: &Step<'_>) -> Control {
        Control::Continue
    }
}
