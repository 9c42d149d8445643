/// A step of a filter chain: receives the value produced by the previous
/// step and returns the value handed to the next one.
pub trait Filter<T>: Sync + Send {
    fn name(&self) -> &'static str;
    fn apply(&self, value: T) -> T;
}

/// A notification hook, fired for its side effects only.
pub trait Action: Sync + Send {
    fn name(&self) -> &'static str;
    fn fire(&self);
}

pub mod filters;
