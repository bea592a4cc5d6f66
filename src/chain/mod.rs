use {
    crate::observe::{Fetchable, Handler, Observer, Source},
    std::{marker::PhantomData, sync::atomic::AtomicBool, sync::Arc},
};

pub mod each;
pub mod enumerate;
pub mod filter;
pub mod map;
pub mod merge;
pub mod pair;
pub mod suspend;

pub use suspend::{SuspendState, Suspender};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                   Chain
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// One upstream attachment produced while finalizing a chain.
pub(crate) struct Hook {
    pub(crate) unsub: Box<dyn Fn() + Send + Sync>,
    pub(crate) replay: Option<Box<dyn FnOnce()>>,
}

pub(crate) type BuildFn<Out> = Box<dyn FnOnce(Arc<AtomicBool>, Handler<Out>) -> Vec<Hook>>;

/// A single-use pipeline builder from a root source to a terminal stage.
///
/// Every operator consumes the builder and returns a new one over the same
/// pending subscription, so a chain under construction has exactly one open
/// tail by construction. A builder that is dropped without `end()` or
/// `sync()` registers nothing.
///
/// `Src` records the root source type; finalizers and operators that need
/// the root's fetch capability are only available when `Src: Fetchable`.
#[must_use = "a chain that is never finalized with `end()` or `sync()` subscribes to nothing"]
pub struct Chain<Out, Src> {
    pub(crate) build: BuildFn<Out>,
    pub(crate) _src: PhantomData<Src>,
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Out, Src> Chain<Out, Src>
where
    Out: Clone + Send + Sync + 'static,
    Src: Source<Value = Out>,
{
    pub(crate) fn begin(source: &Src) -> Self {
        let src = source.clone();
        Chain {
            build: Box::new(move |valid, next| {
                let cast = src.broadcast();
                let id = cast.insert(valid, next.clone());
                let weak = cast.downgrade();
                let unsub = Box::new(move || {
                    if let Some(cast) = weak.upgrade() {
                        cast.remove(id);
                    }
                }) as Box<dyn Fn() + Send + Sync>;
                let replay = Box::new(move || {
                    if let Some(value) = src.replay_value() {
                        next(&value);
                    }
                }) as Box<dyn FnOnce()>;
                vec![Hook {
                    unsub,
                    replay: Some(replay),
                }]
            }),
            _src: PhantomData,
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Out, Src> Chain<Out, Src>
where
    Out: Clone + Send + Sync + 'static,
    Src: Source,
{
    fn finalize(self, replay: bool) -> Observer {
        let valid = Arc::new(AtomicBool::new(true));
        let terminal: Handler<Out> = Arc::new(|_| {});
        let hooks = (self.build)(valid.clone(), terminal);

        let mut teardown = Vec::with_capacity(hooks.len());
        let mut replays = Vec::new();
        for hook in hooks {
            teardown.push(hook.unsub);
            if let Some(r) = hook.replay {
                replays.push(r);
            }
        }

        let observer = Observer::new(valid, teardown);

        // replay runs after every hook is attached
        if replay {
            for r in replays {
                r();
            }
        }

        observer
    }

    /// Finalize: attach to every participating source and return the
    /// subscription's disposal handle.
    pub fn end(self) -> Observer {
        self.finalize(false)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Out, Src> Chain<Out, Src>
where
    Out: Clone + Send + Sync + 'static,
    Src: Fetchable,
{
    /// Finalize like [`end`](Chain::end), then deliver the root's current
    /// value once through the full pipeline before returning.
    pub fn sync(self) -> Observer {
        self.finalize(true)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
