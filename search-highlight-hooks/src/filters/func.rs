use crate::{Action, Filter};

/// A named closure usable as a filter on any chain whose value type it accepts.
pub struct FnFilter<F> {
    name: &'static str,
    f: F,
}

impl<F> FnFilter<F> {
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<T, F> Filter<T> for FnFilter<F>
where
    F: Fn(T) -> T + Sync + Send,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn apply(&self, value: T) -> T {
        (self.f)(value)
    }
}

/// A named closure usable as an action.
pub struct FnAction<F> {
    name: &'static str,
    f: F,
}

impl<F> FnAction<F> {
    pub fn new(name: &'static str, f: F) -> Self {
        Self { name, f }
    }
}

impl<F> Action for FnAction<F>
where
    F: Fn() + Sync + Send,
{
    fn name(&self) -> &'static str {
        self.name
    }

    fn fire(&self) {
        (self.f)()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    #[test]
    fn fn_filter_applies_closure() {
        let upper = FnFilter::new("upper", |s: String| s.to_uppercase());
        assert_eq!(Filter::<String>::name(&upper), "upper");
        assert_eq!(upper.apply(String::from("span")), "SPAN");

        let double = FnFilter::new("double", |n: usize| n * 2);
        assert_eq!(double.apply(21), 42);
    }

    #[test]
    fn fn_action_fires() {
        let counter = Arc::new(AtomicUsize::new(0));
        let c = counter.clone();
        let action = FnAction::new("count", move || {
            c.fetch_add(1, Ordering::SeqCst);
        });
        action.fire();
        action.fire();
        assert_eq!(counter.load(Ordering::SeqCst), 2);
    }
}
