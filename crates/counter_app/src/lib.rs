use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::SystemTime;

use counter_reactive::{SignalRegistry, ValueExt};
use crux_core::macros::effect;
use crux_core::render::RenderOperation;
pub use crux_core::Core;
use crux_core::{render, App, Command};
use thiserror::Error;
use tracing::{debug, info, trace, warn};

pub use crate::state::{CounterState, COUNTER_KEY, DOUBLE_KEY, IS_EVEN_KEY};

pub mod state;

#[derive(Default)]
pub struct Counter;

pub struct Model {
    /// Keeps the counter and its derived values alive, by key.
    registry: SignalRegistry,
    state: CounterState,
    /// Committed writes to the counter, counted by a subscription on the cell.
    writes: Arc<AtomicU64>,

    error: Option<(chrono::DateTime<chrono::Utc>, String)>,
}

impl Default for Model {
    fn default() -> Self {
        let registry = SignalRegistry::new();
        let state = CounterState::new(&registry);

        let writes = Arc::new(AtomicU64::new(0));
        state.counter().on_change({
            let writes = writes.clone();
            move || {
                let total = writes.fetch_add(1, Ordering::SeqCst) + 1;
                debug!("Counter changed. writes: {}", total);
            }
        });

        Self {
            registry,
            state,
            writes,
            error: None,
        }
    }
}

impl Model {
    pub fn state(&self) -> &CounterState {
        &self.state
    }

    pub fn registry(&self) -> &SignalRegistry {
        &self.registry
    }
}

#[effect]
pub enum Effect {
    Render(RenderOperation),
}

#[derive(serde::Serialize, serde::Deserialize, Default, PartialEq, Debug)]
pub struct CounterViewModel {
    pub count: i64,
    pub double: i128,
    pub is_even: bool,
    /// Number of writes committed to the counter since the start of the session.
    pub writes: u64,
    pub error: Option<(chrono::DateTime<chrono::Utc>, String)>,
}

#[derive(serde::Serialize, serde::Deserialize, Debug, Clone, PartialEq, Eq)]
pub enum Event {
    None,
    Increment,
    /// Decrement, unless the counter is already at (or below) 0.
    Decrement,
    Double,
    Reset,
    /// Write the counter directly.
    ///
    /// Unlike `Decrement` there is no floor, negative values are accepted.
    Set {
        value: i64,
    },
}

impl Counter {
    fn update_inner(
        &self,
        event: <Counter as App>::Event,
    ) -> Box<
        dyn FnOnce(
            &mut <Counter as App>::Model,
        ) -> Result<Command<<Counter as App>::Effect, <Counter as App>::Event>, AppError>,
    > {
        match event {
            Event::None => Box::new(|_model: &mut Model| Ok(render::render())),
            Event::Increment => Box::new(|model: &mut Model| {
                let count = model.state.count();
                info!("Increment. count: {}", count);

                let incremented = count
                    .checked_add(1)
                    .ok_or(AppError::Overflow {
                        operation: "increment",
                        count,
                    })?;
                model
                    .state
                    .counter()
                    .set(incremented);

                Ok(render::render())
            }),
            Event::Decrement => Box::new(|model: &mut Model| {
                let count = model.state.count();
                info!("Decrement. count: {}", count);

                if count > 0 {
                    model
                        .state
                        .counter()
                        .set(count - 1);
                } else {
                    debug!("Decrement ignored, counter is at the floor. count: {}", count);
                }

                Ok(render::render())
            }),
            Event::Double => Box::new(|model: &mut Model| {
                let count = model.state.count();
                info!("Double. count: {}", count);

                let doubled = count
                    .checked_mul(2)
                    .ok_or(AppError::Overflow {
                        operation: "double",
                        count,
                    })?;
                model
                    .state
                    .counter()
                    .set(doubled);

                Ok(render::render())
            }),
            Event::Reset => Box::new(|model: &mut Model| {
                info!("Reset. count: {}", model.state.count());

                model
                    .state
                    .counter()
                    .set(0);

                Ok(render::render())
            }),
            Event::Set {
                value,
            } => Box::new(move |model: &mut Model| {
                info!("Set. count: {}, value: {}", model.state.count(), value);

                model
                    .state
                    .counter()
                    .set(value);

                Ok(render::render())
            }),
        }
    }
}

impl App for Counter {
    type Event = Event;
    type Model = Model;
    type ViewModel = CounterViewModel;
    type Capabilities = ();
    type Effect = Effect;

    fn update(
        &self,
        event: Self::Event,
        model: &mut Self::Model,
        _caps: &Self::Capabilities,
    ) -> Command<Self::Effect, Self::Event> {
        trace!("update. event: {:?}", event);
        let try_fn = self.update_inner(event);

        match try_fn(model) {
            Err(e) => {
                warn!("Operation rejected. cause: {}", e);
                model
                    .error
                    .replace((chrono::DateTime::from(SystemTime::now()), e.to_string()));
                render::render()
            }
            Ok(command) => {
                model.error.take();
                command
            }
        }
    }

    fn view(&self, model: &Self::Model) -> Self::ViewModel {
        let view_model = CounterViewModel {
            count: model.state.count(),
            double: model.state.double().get(),
            is_even: model.state.is_even().get(),
            writes: model.writes.load(Ordering::SeqCst),
            error: model.error.clone(),
        };

        trace!("view model: {:?}", view_model);

        view_model
    }
}

#[derive(Error, Debug)]
enum AppError {
    #[error("Operation would overflow the counter. operation: {operation}, count: {count}")]
    Overflow { operation: &'static str, count: i64 },
}
