use {
    crate::{
        chain::Chain,
        observe::{Handler, Source},
    },
    std::{marker::PhantomData, sync::Arc},
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Out, Src> Chain<Out, Src>
where
    Out: Clone + Send + Sync + 'static,
    Src: Source,
{
    /// Values failing the predicate are dropped; downstream stages do not
    /// fire for them.
    pub fn filter<F>(self, pred: F) -> Chain<Out, Src>
    where
        F: Fn(&Out) -> bool + Send + Sync + 'static,
    {
        let build = self.build;
        Chain {
            build: Box::new(move |valid, next| {
                let filtered: Handler<Out> = Arc::new(move |value: &Out| {
                    if pred(value) {
                        next(value);
                    }
                });
                build(valid, filtered)
            }),
            _src: PhantomData,
        }
    }

    /// Transform and drop in one step: `None` results are withheld.
    pub fn filter_map<T, F>(self, filter_map: F) -> Chain<T, Src>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(Out) -> Option<T> + Send + Sync + 'static,
    {
        let build = self.build;
        Chain {
            build: Box::new(move |valid, next| {
                let filtered: Handler<Out> = Arc::new(move |value: &Out| {
                    if let Some(mapped) = filter_map(value.clone()) {
                        next(&mapped);
                    }
                });
                build(valid, filtered)
            }),
            _src: PhantomData,
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
