use {
    crate::observe::{Broadcast, Fetchable, Observer, Source},
    std::sync::{Arc, RwLock},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Event of an observable sequence whose elements are themselves
/// observable: the five structural kinds plus element-level relays.
#[derive(Clone)]
pub enum RelayVecEvent<E>
where
    E: Source,
{
    Fetched(Vec<E>),
    Any(Vec<E>),
    Inserted { at: usize, element: E },
    Removed { at: usize, element: E },
    Replaced { at: usize, element: E },
    Relayed { at: usize, element: E, event: E::Value },
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

struct RelaySlot {
    // shared with the relay closure; structural ops keep it accurate
    at: Arc<RwLock<usize>>,
    observer: Observer,
}

struct RelayVecState<E>
where
    E: Source,
{
    elements: Vec<E>,
    relays: Vec<RelaySlot>,
}

impl<E> Drop for RelayVecState<E>
where
    E: Source,
{
    fn drop(&mut self) {
        for slot in &self.relays {
            slot.observer.invalidate();
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Observable ordered sequence of observable elements.
///
/// At any quiescent point exactly one live relay subscription exists per
/// stored element: insert and replace create one, remove and replace
/// invalidate the outgoing element's relay before the reference is dropped.
/// Relay closures hold only weak references to this holder.
pub struct RelayableArrayHolder<E>
where
    E: Source,
{
    state: Arc<RwLock<RelayVecState<E>>>,
    cast: Broadcast<RelayVecEvent<E>>,
}

impl<E> RelayableArrayHolder<E>
where
    E: Source,
{
    pub fn new() -> Self {
        RelayableArrayHolder {
            state: Arc::new(RwLock::new(RelayVecState {
                elements: Vec::new(),
                relays: Vec::new(),
            })),
            cast: Broadcast::new(),
        }
    }

    pub fn with_elements(elements: Vec<E>) -> Self {
        let holder = RelayableArrayHolder::new();
        {
            let mut state = holder.state.write().unwrap();
            for (at, element) in elements.iter().enumerate() {
                state.relays.push(holder.relay(at, element));
            }
            state.elements = elements;
        }
        holder
    }

    pub fn raw(&self) -> Vec<E> {
        self.state.read().unwrap().elements.clone()
    }

    pub fn len(&self) -> usize {
        self.state.read().unwrap().elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.read().unwrap().elements.is_empty()
    }

    pub fn element(&self, at: usize) -> E {
        self.state.read().unwrap().elements[at].clone()
    }

    pub fn first(&self) -> Option<E> {
        self.state.read().unwrap().elements.first().cloned()
    }

    pub fn last(&self) -> Option<E> {
        self.state.read().unwrap().elements.last().cloned()
    }

    pub fn insert(&self, at: usize, element: E) {
        {
            let mut state = self.state.write().unwrap();
            state.elements.insert(at, element.clone());
            for slot in &state.relays {
                let mut index = slot.at.write().unwrap();
                if *index >= at {
                    *index += 1;
                }
            }
            let slot = self.relay(at, &element);
            state.relays.insert(at, slot);
        }
        self.cast.send(&RelayVecEvent::Inserted { at, element });
    }

    pub fn push(&self, element: E) {
        self.insert(self.len(), element);
    }

    pub fn replace_at(&self, at: usize, element: E) {
        let old = {
            let mut state = self.state.write().unwrap();
            state.elements[at] = element.clone();
            let slot = self.relay(at, &element);
            std::mem::replace(&mut state.relays[at], slot)
        };
        old.observer.invalidate();
        self.cast.send(&RelayVecEvent::Replaced { at, element });
    }

    pub fn remove_at(&self, at: usize) -> E {
        let (element, slot) = {
            let mut state = self.state.write().unwrap();
            let element = state.elements.remove(at);
            let slot = state.relays.remove(at);
            for slot in &state.relays {
                let mut index = slot.at.write().unwrap();
                if *index > at {
                    *index -= 1;
                }
            }
            (element, slot)
        };
        slot.observer.invalidate();
        self.cast.send(&RelayVecEvent::Removed {
            at,
            element: element.clone(),
        });
        element
    }

    pub fn replace_all(&self, elements: Vec<E>) {
        let old = {
            let mut state = self.state.write().unwrap();
            let slots = elements
                .iter()
                .enumerate()
                .map(|(at, element)| self.relay(at, element))
                .collect();
            state.elements = elements.clone();
            std::mem::replace(&mut state.relays, slots)
        };
        for slot in old {
            slot.observer.invalidate();
        }
        self.cast.send(&RelayVecEvent::Any(elements));
    }

    /// Already empty: nothing changed, nothing is broadcast.
    pub fn remove_all(&self) {
        let old;
        {
            let mut state = self.state.write().unwrap();
            if state.elements.is_empty() {
                return;
            }
            state.elements.clear();
            old = std::mem::take(&mut state.relays);
        }
        for slot in old {
            slot.observer.invalidate();
        }
        self.cast.send(&RelayVecEvent::Any(Vec::new()));
    }

    fn relay(&self, at: usize, element: &E) -> RelaySlot {
        let cell = Arc::new(RwLock::new(at));
        let weak_state = Arc::downgrade(&self.state);
        let weak_cast = self.cast.downgrade();
        let index = cell.clone();
        let observer = element
            .chain()
            .each(move |event: &E::Value| {
                let (Some(state), Some(cast)) = (weak_state.upgrade(), weak_cast.upgrade())
                else {
                    return;
                };
                let at = *index.read().unwrap();
                let element = { state.read().unwrap().elements[at].clone() };
                cast.send(&RelayVecEvent::Relayed {
                    at,
                    element,
                    event: event.clone(),
                });
            })
            .end();
        RelaySlot { at: cell, observer }
    }

    #[cfg(test)]
    fn live_relays(&self) -> usize {
        self.state
            .read()
            .unwrap()
            .relays
            .iter()
            .filter(|slot| slot.observer.is_valid())
            .count()
    }
}

impl<E> Clone for RelayableArrayHolder<E>
where
    E: Source,
{
    fn clone(&self) -> Self {
        RelayableArrayHolder {
            state: self.state.clone(),
            cast: self.cast.clone(),
        }
    }
}

impl<E> Default for RelayableArrayHolder<E>
where
    E: Source,
{
    fn default() -> Self {
        RelayableArrayHolder::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<E> Source for RelayableArrayHolder<E>
where
    E: Source,
{
    type Value = RelayVecEvent<E>;

    fn broadcast(&self) -> Broadcast<RelayVecEvent<E>> {
        self.cast.clone()
    }

    fn replay_value(&self) -> Option<RelayVecEvent<E>> {
        self.fetched_value()
    }
}

impl<E> Fetchable for RelayableArrayHolder<E>
where
    E: Source,
{
    fn fetched_value(&self) -> Option<RelayVecEvent<E>> {
        Some(RelayVecEvent::Fetched(self.raw()))
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

#[cfg(test)]
mod tests {
    use crate::{
        holder::{relay_vec::*, Holder},
        observe::Source,
    };
    use std::sync::{Arc, RwLock};

    fn record(
        holder: &RelayableArrayHolder<Holder<i32>>,
    ) -> (
        Arc<RwLock<Vec<RelayVecEvent<Holder<i32>>>>>,
        crate::observe::Observer,
    ) {
        let events = Arc::new(RwLock::new(Vec::new()));
        let observer = {
            let events = events.clone();
            holder
                .chain()
                .each(move |event: &RelayVecEvent<Holder<i32>>| {
                    events.write().unwrap().push(event.clone())
                })
                .end()
        };
        (events, observer)
    }

    #[test]
    fn one_relay_per_element1() {
        let holder = RelayableArrayHolder::with_elements(vec![Holder::new(0), Holder::new(1)]);

        assert_eq!(holder.live_relays(), 2);

        holder.push(Holder::new(2));

        assert_eq!(holder.live_relays(), 3);

        holder.remove_at(0);

        assert_eq!(holder.live_relays(), 2);

        holder.replace_all(vec![Holder::new(9)]);

        assert_eq!(holder.live_relays(), 1);

        holder.remove_all();

        assert_eq!(holder.live_relays(), 0);
    }

    #[test]
    fn relayed_event_carries_index_and_element1() {
        let first = Holder::new(10);
        let second = Holder::new(20);
        let holder = RelayableArrayHolder::with_elements(vec![first, second.clone()]);

        let (events, observer) = record(&holder);

        second.set(21);

        let events = events.read().unwrap();
        assert_eq!(events.len(), 1);
        match &events[0] {
            RelayVecEvent::Relayed { at, element, event } => {
                assert_eq!(*at, 1);
                assert_eq!(element, &Holder::new(21));
                assert_eq!(*event, 21);
            }
            _ => panic!("expected a relayed event"),
        }

        observer.invalidate();
    }

    #[test]
    fn relay_index_follows_insertions1() {
        let tracked = Holder::new(10);
        let holder = RelayableArrayHolder::with_elements(vec![tracked.clone()]);

        // a head insertion shifts the tracked element to index 1
        holder.insert(0, Holder::new(0));

        let (events, _observer) = record(&holder);

        tracked.set(11);

        match &events.read().unwrap()[0] {
            RelayVecEvent::Relayed { at, .. } => assert_eq!(*at, 1),
            _ => panic!("expected a relayed event"),
        }

        // removing the head shifts it back
        holder.remove_at(0);
        tracked.set(12);

        match &events.read().unwrap()[2] {
            RelayVecEvent::Relayed { at, .. } => assert_eq!(*at, 0),
            _ => panic!("expected a relayed event"),
        }
    }

    #[test]
    fn removed_element_stops_relaying1() {
        let tracked = Holder::new(10);
        let holder = RelayableArrayHolder::with_elements(vec![tracked.clone()]);

        let (events, _observer) = record(&holder);

        holder.remove_at(0);
        tracked.set(11);

        let events = events.read().unwrap();
        assert_eq!(events.len(), 1);
        assert!(matches!(events[0], RelayVecEvent::Removed { at: 0, .. }));
    }

    #[test]
    fn replaced_element_swaps_relay1() {
        let old = Holder::new(10);
        let new = Holder::new(20);
        let holder = RelayableArrayHolder::with_elements(vec![old.clone()]);

        let (events, _observer) = record(&holder);

        holder.replace_at(0, new.clone());

        old.set(11);

        assert_eq!(events.read().unwrap().len(), 1);
        assert_eq!(holder.live_relays(), 1);

        new.set(21);

        assert_eq!(events.read().unwrap().len(), 2);
    }

    #[test]
    fn structural_events1() {
        let holder = RelayableArrayHolder::<Holder<i32>>::new();
        let (events, _observer) = record(&holder);

        holder.push(Holder::new(1));
        holder.replace_at(0, Holder::new(2));
        holder.remove_at(0);
        holder.remove_all();

        let events = events.read().unwrap();
        assert!(matches!(events[0], RelayVecEvent::Inserted { at: 0, .. }));
        assert!(matches!(events[1], RelayVecEvent::Replaced { at: 0, .. }));
        assert!(matches!(events[2], RelayVecEvent::Removed { at: 0, .. }));
        // the final remove_all hit an empty sequence, so nothing more
        assert_eq!(events.len(), 3);
    }
}
