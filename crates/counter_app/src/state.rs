use counter_reactive::{Derived, SignalRegistry, Value};

pub const COUNTER_KEY: &str = "counterAtom";
pub const DOUBLE_KEY: &str = "counterSelector";
pub const IS_EVEN_KEY: &str = "evenSelector";

/// The counter and the values derived from it.
///
/// The cell itself accepts any value, including negative ones; the floor of 0 is only applied by
/// the decrement operation.
#[derive(Clone, Debug)]
pub struct CounterState {
    counter: Value<i64>,
    /// Wider than the counter, so doubling is exact for every counter value.
    double: Derived<i128>,
    is_even: Derived<bool>,
}

impl CounterState {
    /// Create the counter, starting at 0, and register it and its derived values in the registry.
    pub fn new(registry: &SignalRegistry) -> Self {
        let counter = Value::new(0i64);
        let double = counter.derive(|count| i128::from(*count) * 2);
        let is_even = counter.derive(|count| count % 2 == 0);

        registry.register(COUNTER_KEY, counter.clone());
        registry.register(DOUBLE_KEY, double.clone());
        registry.register(IS_EVEN_KEY, is_even.clone());

        Self {
            counter,
            double,
            is_even,
        }
    }

    pub fn counter(&self) -> &Value<i64> {
        &self.counter
    }

    pub fn double(&self) -> &Derived<i128> {
        &self.double
    }

    pub fn is_even(&self) -> &Derived<bool> {
        &self.is_even
    }

    pub fn count(&self) -> i64 {
        self.counter.get()
    }
}
