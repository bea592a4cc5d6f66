use {
    crate::{chain::Chain, observe::Source},
    std::marker::PhantomData,
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Out, Src> Chain<Out, Src>
where
    Out: Clone + Send + Sync + 'static,
    Src: Source,
{
    /// Fan a second same-typed chain into this one. Values keep their
    /// arrival order; only the primary root replays on `sync()`.
    pub fn merge<Other>(self, other: Chain<Out, Other>) -> Chain<Out, Src>
    where
        Other: Source,
    {
        let build = self.build;
        let other_build = other.build;
        Chain {
            build: Box::new(move |valid, next| {
                let mut hooks = build(valid.clone(), next.clone());
                hooks.extend(other_build(valid, next).into_iter().map(|mut hook| {
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
