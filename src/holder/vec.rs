use {
    crate::observe::{Broadcast, Fetchable, Source},
    serde::{Deserialize, Serialize},
    std::sync::{Arc, RwLock},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Structural change of an observable sequence. Exactly one event is
/// broadcast per mutation, after the backing store has changed.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum VecEvent<E> {
    Fetched(Vec<E>),
    Any(Vec<E>),
    Inserted { at: usize, element: E },
    Removed { at: usize, element: E },
    Replaced { at: usize, element: E },
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// Observable ordered sequence.
///
/// Index arguments out of range are programmer errors and panic, matching
/// the backing `Vec`. Lookups for values that may be absent return `Option`.
pub struct ArrayHolder<E>
where
    E: Clone + Send + Sync + 'static,
{
    elements: Arc<RwLock<Vec<E>>>,
    cast: Broadcast<VecEvent<E>>,
}

impl<E> ArrayHolder<E>
where
    E: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        ArrayHolder {
            elements: Arc::new(RwLock::new(Vec::new())),
            cast: Broadcast::new(),
        }
    }

    pub fn with_elements(elements: Vec<E>) -> Self {
        ArrayHolder {
            elements: Arc::new(RwLock::new(elements)),
            cast: Broadcast::new(),
        }
    }

    pub fn raw(&self) -> Vec<E> {
        self.elements.read().unwrap().clone()
    }

    pub fn len(&self) -> usize {
        self.elements.read().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.read().unwrap().is_empty()
    }

    pub fn element(&self, at: usize) -> E {
        self.elements.read().unwrap()[at].clone()
    }

    pub fn first(&self) -> Option<E> {
        self.elements.read().unwrap().first().cloned()
    }

    pub fn last(&self) -> Option<E> {
        self.elements.read().unwrap().last().cloned()
    }

    pub fn capacity(&self) -> usize {
        self.elements.read().unwrap().capacity()
    }

    pub fn reserve(&self, additional: usize) {
        self.elements.write().unwrap().reserve(additional);
    }

    pub fn replace_all(&self, elements: Vec<E>) {
        {
            *self.elements.write().unwrap() = elements.clone();
        }
        self.cast.send(&VecEvent::Any(elements));
    }

    pub fn replace_at(&self, at: usize, element: E) {
        {
            self.elements.write().unwrap()[at] = element.clone();
        }
        self.cast.send(&VecEvent::Replaced { at, element });
    }

    pub fn insert(&self, at: usize, element: E) {
        {
            self.elements.write().unwrap().insert(at, element.clone());
        }
        self.cast.send(&VecEvent::Inserted { at, element });
    }

    pub fn push(&self, element: E) {
        let at = {
            let mut elements = self.elements.write().unwrap();
            elements.push(element.clone());
            elements.len() - 1
        };
        self.cast.send(&VecEvent::Inserted { at, element });
    }

    pub fn remove_at(&self, at: usize) -> E {
        let element = { self.elements.write().unwrap().remove(at) };
        self.cast.send(&VecEvent::Removed {
            at,
            element: element.clone(),
        });
        element
    }

    /// Already empty: nothing changed, nothing is broadcast.
    pub fn remove_all(&self) {
        {
            let mut elements = self.elements.write().unwrap();
            if elements.is_empty() {
                return;
            }
            elements.clear();
        }
        self.cast.send(&VecEvent::Any(Vec::new()));
    }
}

impl<E> Clone for ArrayHolder<E>
where
    E: Clone + Send + Sync + 'static,
{
    fn clone(&self) -> Self {
        ArrayHolder {
            elements: self.elements.clone(),
            cast: self.cast.clone(),
        }
    }
}

impl<E> Default for ArrayHolder<E>
where
    E: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        ArrayHolder::new()
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<E> Source for ArrayHolder<E>
where
    E: Clone + Send + Sync + 'static,
{
    type Value = VecEvent<E>;

    fn broadcast(&self) -> Broadcast<VecEvent<E>> {
        self.cast.clone()
    }

    fn replay_value(&self) -> Option<VecEvent<E>> {
        self.fetched_value()
    }
}

impl<E> Fetchable for ArrayHolder<E>
where
    E: Clone + Send + Sync + 'static,
{
    fn fetched_value(&self) -> Option<VecEvent<E>> {
        Some(VecEvent::Fetched(self.raw()))
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
