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
    /// Pure value transform.
    pub fn map<T, F>(self, map: F) -> Chain<T, Src>
    where
        T: Clone + Send + Sync + 'static,
        F: Fn(Out) -> T + Send + Sync + 'static,
    {
        let build = self.build;
        Chain {
            build: Box::new(move |valid, next| {
                let mapped: Handler<Out> = Arc::new(move |value: &Out| next(&map(value.clone())));
                build(valid, mapped)
            }),
            _src: PhantomData,
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
