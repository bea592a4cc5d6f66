use {
    crate::{
        chain::Chain,
        observe::{Handler, Source},
    },
    std::{
        marker::PhantomData,
        sync::{Arc, RwLock},
    },
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Out, Src> Chain<Out, Src>
where
    Out: Clone + Send + Sync + 'static,
    Src: Source,
{
    /// Join two chains, emitting whenever either side fires. The side that
    /// did not fire is `None`, so downstream can tell which one changed.
    pub fn pair<B, Other>(self, other: Chain<B, Other>) -> Chain<(Option<Out>, Option<B>), Src>
    where
        B: Clone + Send + Sync + 'static,
        Other: Source,
    {
        let build = self.build;
        let other_build = other.build;
        Chain {
            build: Box::new(move |valid, next| {
                let left: Handler<Out> = {
                    let next = next.clone();
                    Arc::new(move |value: &Out| next(&(Some(value.clone()), None)))
                };
                let right: Handler<B> =
                    Arc::new(move |value: &B| next(&(None, Some(value.clone()))));

                let mut hooks = build(valid.clone(), left);
                hooks.extend(other_build(valid, right).into_iter().map(|mut hook| {
                    hook.replay = None;
                    hook
                }));
                hooks
            }),
            _src: PhantomData,
        }
    }

    /// Join two chains into the latest value of each. Emits once both sides
    /// have fired at least once, then on every subsequent firing of either.
    pub fn combine<B, Other>(self, other: Chain<B, Other>) -> Chain<(Out, B), Src>
    where
        B: Clone + Send + Sync + 'static,
        Other: Source,
    {
        let build = self.build;
        let other_build = other.build;
        Chain {
            build: Box::new(move |valid, next| {
                let latest = Arc::new(RwLock::new((None::<Out>, None::<B>)));

                let left: Handler<Out> = {
                    let latest = latest.clone();
                    let next = next.clone();
                    Arc::new(move |value: &Out| {
                        let ready = {
                            let mut latest = latest.write().unwrap();
                            latest.0 = Some(value.clone());
                            latest.0.clone().zip(latest.1.clone())
                        };
                        if let Some(both) = ready {
                            next(&both);
                        }
                    })
                };
                let right: Handler<B> = Arc::new(move |value: &B| {
                    let ready = {
                        let mut latest = latest.write().unwrap();
                        latest.1 = Some(value.clone());
                        latest.0.clone().zip(latest.1.clone())
                    };
                    if let Some(both) = ready {
                        next(&both);
                    }
                });

                let mut hooks = build(valid.clone(), left);
                hooks.extend(other_build(valid, right).into_iter().map(|mut hook| {
                    hook.replay = None;
                    hook
                }));
                hooks
            }),
            _src: PhantomData,
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
