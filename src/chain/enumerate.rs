use {
    crate::{
        chain::Chain,
        observe::{Handler, Source},
    },
    std::{
        marker::PhantomData,
        sync::{atomic::Ordering, Arc},
    },
};

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<E, Src> Chain<Vec<E>, Src>
where
    E: Clone + Send + Sync + 'static,
    Src: Source,
{
    /// Re-emit a sequence value one element at a time, paired with its
    /// index, synchronously within the same dispatch. Validity is
    /// re-checked between elements.
    pub fn enumerate(self) -> Chain<(usize, E), Src> {
        let build = self.build;
        Chain {
            build: Box::new(move |valid, next| {
                let alive = valid.clone();
                let spread: Handler<Vec<E>> = Arc::new(move |elements: &Vec<E>| {
                    for (index, element) in elements.iter().enumerate() {
                        if !alive.load(Ordering::SeqCst) {
                            break;
                        }
                        next(&(index, element.clone()));
                    }
                });
                build(valid, spread)
            }),
            _src: PhantomData,
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
