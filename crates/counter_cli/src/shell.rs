use anyhow::{anyhow, bail};
use counter_app::{Counter, CounterViewModel, Effect, Event};
use crossbeam_channel::{unbounded, Receiver, Sender};
use tracing::{debug, trace};

/// Drives the counter core: events go in, effects are queued and then handled in order.
pub(crate) struct Shell {
    core: crux_core::Core<Counter>,
    effects_tx: Sender<Effect>,
    effects_rx: Receiver<Effect>,
}

impl Shell {
    pub(crate) fn new() -> Self {
        let (effects_tx, effects_rx) = unbounded::<Effect>();
        Self {
            core: crux_core::Core::new(),
            effects_tx,
            effects_rx,
        }
    }

    /// Send an event to the core and handle every effect it requested.
    ///
    /// A view reporting an error fails the dispatch.
    pub(crate) fn dispatch(&self, event: Event) -> anyhow::Result<()> {
        trace!("dispatch. event: {:?}", event);

        for effect in self.core.process_event(event) {
            self.effects_tx
                .send(effect)
                .map_err(|e| anyhow!("{:?}", e))?;
        }

        let mut failure = None;
        while let Ok(effect) = self.effects_rx.try_recv() {
            trace!("effect: {:?}", effect);
            match effect {
                Effect::Render(_) => {
                    let view = self.view();

                    if let Some((_timestamp, error)) = view.error {
                        // keep draining, the queue must be empty for the next event
                        failure.replace(error);
                        continue;
                    }

                    debug!(
                        "Rendered. count: {}, double: {}, is_even: {}, writes: {}",
                        view.count, view.double, view.is_even, view.writes
                    );
                }
            }
        }

        if let Some(error) = failure {
            bail!(error)
        }

        Ok(())
    }

    pub(crate) fn view(&self) -> CounterViewModel {
        self.core.view()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_applies_events_in_order() {
        let shell = Shell::new();

        shell.dispatch(Event::Increment).unwrap();
        shell.dispatch(Event::Double).unwrap();
        shell.dispatch(Event::Decrement).unwrap();

        let view = shell.view();
        assert_eq!(view.count, 3);
        assert_eq!(view.double, 6);
        assert!(!view.is_even);
        assert_eq!(view.writes, 3);
    }

    #[test]
    fn error_in_view_fails_the_dispatch() {
        let shell = Shell::new();
        shell
            .dispatch(Event::Set {
                value: i64::MAX,
            })
            .unwrap();

        let result = shell.dispatch(Event::Double);

        assert!(result.is_err());
        assert_eq!(shell.view().count, i64::MAX);
        // the queue is left empty for the next event
        assert!(shell.dispatch(Event::Reset).is_ok());
        assert_eq!(shell.view().count, 0);
    }
}
