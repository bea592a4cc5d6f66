use {
    crate::{
        chain::Chain,
        holder::{Holder, Notifier},
        observe::{Broadcast, Fetchable, Observer, Sink, Source},
    },
    std::sync::{Arc, RwLock},
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                 Suspender
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SuspendState {
    Resumed,
    Suspended,
}

impl SuspendState {
    pub fn is_suspended(self) -> bool {
        matches!(self, SuspendState::Suspended)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// A boolean-gated valve that can be spliced into any chain.
///
/// Every transition call broadcasts the new state, including redundant ones
/// (holder semantics, no deduplication). The suspender is itself an
/// observable, fetchable source of its state.
#[derive(Clone)]
pub struct Suspender {
    holder: Holder<SuspendState>,
    notifier: Notifier<SuspendState>,
    _pipe: Observer,
}

impl Suspender {
    pub fn new() -> Self {
        Suspender::with_state(SuspendState::Resumed)
    }

    pub fn with_state(state: SuspendState) -> Self {
        let holder = Holder::new(state);
        let notifier = Notifier::new();
        let pipe = holder.chain().feed(&notifier).end();
        Suspender {
            holder,
            notifier,
            _pipe: pipe,
        }
    }

    pub fn state(&self) -> SuspendState {
        self.holder.value()
    }

    pub fn is_suspended(&self) -> bool {
        self.state().is_suspended()
    }

    pub fn set_state(&self, state: SuspendState) {
        #[cfg(feature = "tracing")]
        tracing::debug!(?state, "suspender transition");

        self.holder.set(state);
    }

    pub fn suspend(&self) {
        self.set_state(SuspendState::Suspended);
    }

    pub fn resume(&self) {
        self.set_state(SuspendState::Resumed);
    }

    /// Transition stream for the caching `suspend` operator; not replayed.
    pub(crate) fn transitions(&self) -> Chain<SuspendState, Notifier<SuspendState>> {
        self.notifier.chain()
    }
}

impl Default for Suspender {
    fn default() -> Self {
        Suspender::new()
    }
}

impl Source for Suspender {
    type Value = SuspendState;

    fn broadcast(&self) -> Broadcast<SuspendState> {
        self.holder.broadcast()
    }

    fn replay_value(&self) -> Option<SuspendState> {
        self.holder.replay_value()
    }
}

impl Fetchable for Suspender {
    fn fetched_value(&self) -> Option<SuspendState> {
        Some(self.state())
    }
}

impl Sink for Suspender {
    type Value = SuspendState;

    fn receive(&self, value: &SuspendState) {
        self.set_state(*value);
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
              Suspend Operators
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
impl<Out, Src> Chain<Out, Src>
where
    Out: Clone + Send + Sync + 'static,
    Src: Source,
{
    /// Pure valve: values arriving while the suspender is suspended are
    /// dropped. No caching, no replay on resume.
    pub fn gate(self, suspender: &Suspender) -> Chain<Out, Src> {
        let gate = suspender.clone();
        self.filter(move |_| !gate.is_suspended())
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Out, Src> Chain<Out, Src>
where
    Out: Clone + Send + Sync + 'static,
    Src: Fetchable,
{
    /// Caching valve for fetchable roots: values arriving while suspended
    /// are withheld, keeping only the most recent. Transitioning to resumed
    /// releases that value exactly once and clears the cache; resuming with
    /// an empty cache emits nothing.
    pub fn suspend(self, suspender: &Suspender) -> Chain<Out, Src> {
        let cache = Arc::new(RwLock::new(None::<Out>));
        let gate = suspender.clone();
        self.pair(suspender.transitions())
            .filter_map(move |(value, transition)| match (value, transition) {
                (Some(value), _) => {
                    if gate.is_suspended() {
                        *cache.write().unwrap() = Some(value);
                        None
                    } else {
                        Some(value)
                    }
                }
                (None, Some(SuspendState::Suspended)) => {
                    cache.write().unwrap().take();
                    None
                }
                (None, Some(SuspendState::Resumed)) => cache.write().unwrap().take(),
                (None, None) => unreachable!("pair emits at least one side"),
            })
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{
        chain::suspend::*,
        holder::{Holder, Notifier},
        observe::Source,
    };
    use std::sync::{Arc, RwLock};

    #[test]
    fn suspender_state1() {
        let suspender = Suspender::new();

        assert!(!suspender.is_suspended());

        suspender.suspend();

        assert_eq!(suspender.state(), SuspendState::Suspended);

        suspender.resume();

        assert_eq!(suspender.state(), SuspendState::Resumed);
    }

    #[test]
    fn suspender_broadcasts_transitions1() {
        let suspender = Suspender::new();
        let received = Arc::new(RwLock::new(Vec::new()));

        let _observer = {
            let received = received.clone();
            suspender
                .chain()
                .each(move |state| received.write().unwrap().push(*state))
                .sync()
        };

        suspender.suspend();
        suspender.resume();

        assert_eq!(
            *received.read().unwrap(),
            vec![
                SuspendState::Resumed,
                SuspendState::Suspended,
                SuspendState::Resumed,
            ]
        );
    }

    #[test]
    fn gate_drops_without_cache1() {
        let notifier = Notifier::<i32>::new();
        let suspender = Suspender::new();
        let received = Arc::new(RwLock::new(Vec::new()));

        let _observer = {
            let received = received.clone();
            notifier
                .chain()
                .gate(&suspender)
                .each(move |value| received.write().unwrap().push(*value))
                .end()
        };

        notifier.notify(1);
        suspender.suspend();
        notifier.notify(2);
        suspender.resume();
        notifier.notify(3);

        // the value sent while suspended is gone for good
        assert_eq!(*received.read().unwrap(), vec![1, 3]);
    }

    #[test]
    fn suspend_caches_last_value1() {
        let holder = Holder::new(0);
        let suspender = Suspender::new();
        let received = Arc::new(RwLock::new(Vec::new()));

        let _observer = {
            let received = received.clone();
            holder
                .chain()
                .suspend(&suspender)
                .each(move |value| received.write().unwrap().push(*value))
                .sync()
        };

        assert_eq!(*received.read().unwrap(), vec![0]);

        suspender.suspend();

        holder.set(1);
        holder.set(2);

        assert_eq!(*received.read().unwrap(), vec![0]);

        suspender.resume();

        // exactly the most recent withheld value, exactly once
        assert_eq!(*received.read().unwrap(), vec![0, 2]);

        suspender.resume();

        assert_eq!(*received.read().unwrap(), vec![0, 2]);
    }

    #[test]
    fn suspend_resume_without_values1() {
        let holder = Holder::new(0);
        let suspender = Suspender::new();
        let received = Arc::new(RwLock::new(Vec::new()));

        let _observer = {
            let received = received.clone();
            holder
                .chain()
                .suspend(&suspender)
                .each(move |value| received.write().unwrap().push(*value))
                .end()
        };

        suspender.suspend();
        suspender.resume();

        assert_eq!(*received.read().unwrap(), Vec::<i32>::new());
    }

    #[test]
    fn sync_while_suspended_is_withheld1() {
        let holder = Holder::new(7);
        let suspender = Suspender::with_state(SuspendState::Suspended);
        let received = Arc::new(RwLock::new(Vec::new()));

        let _observer = {
            let received = received.clone();
            holder
                .chain()
                .suspend(&suspender)
                .each(move |value| received.write().unwrap().push(*value))
                .sync()
        };

        assert_eq!(*received.read().unwrap(), Vec::<i32>::new());

        suspender.resume();

        assert_eq!(*received.read().unwrap(), vec![7]);
    }
}
