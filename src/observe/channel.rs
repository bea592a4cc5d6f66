use {
    crate::observe::Sink,
    async_std::stream::Stream,
    core::{
        pin::Pin,
        task::{Context, Poll, Waker},
    },
    std::{
        collections::HashSet,
        hash::Hash,
        sync::{Arc, Mutex},
    },
};

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                Buffer Kinds
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
/// Buffering strategy of a channel between a chain and an async consumer.
pub trait ChannelData: Default + IntoIterator + Send + Sync {
    fn channel_insert(&mut self, item: Self::Item);
}

/// Queue: every received value is kept in order.
impl<T> ChannelData for Vec<T>
where
    T: Send + Sync,
{
    fn channel_insert(&mut self, item: T) {
        self.push(item);
    }
}

/// Set: duplicate values between two polls collapse.
impl<T> ChannelData for HashSet<T>
where
    T: Eq + Hash + Send + Sync,
{
    fn channel_insert(&mut self, item: T) {
        self.insert(item);
    }
}

/// Last-wins: only the most recent value between two polls survives.
impl<T> ChannelData for Option<T>
where
    T: Send + Sync,
{
    fn channel_insert(&mut self, item: T) {
        *self = Some(item);
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                  Channel
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
struct ChannelState<Data: ChannelData> {
    buffer: Option<Data>,
    draining: Option<Data::IntoIter>,
    senders: usize,
    waker: Option<Waker>,
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub struct ChannelSender<Data: ChannelData>(Arc<Mutex<ChannelState<Data>>>);
pub struct ChannelReceiver<Data: ChannelData>(Arc<Mutex<ChannelState<Data>>>);

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Data: ChannelData> ChannelSender<Data> {
    pub fn send(&self, item: Data::Item) {
        let mut state = self.0.lock().unwrap();

        state
            .buffer
            .get_or_insert_with(Data::default)
            .channel_insert(item);

        if let Some(waker) = state.waker.take() {
            waker.wake();
        }
    }
}

impl<Data> Sink for ChannelSender<Data>
where
    Data: ChannelData + 'static,
    Data::Item: Clone + Send + Sync,
    Data::IntoIter: Send + Sync + 'static,
{
    type Value = Data::Item;

    fn receive(&self, value: &Data::Item) {
        self.send(value.clone());
    }
}

impl<Data: ChannelData> Clone for ChannelSender<Data> {
    fn clone(&self) -> Self {
        self.0.lock().unwrap().senders += 1;
        ChannelSender(self.0.clone())
    }
}

impl<Data: ChannelData> Drop for ChannelSender<Data> {
    fn drop(&mut self) {
        let mut state = self.0.lock().unwrap();
        state.senders -= 1;
        if let Some(waker) = state.waker.take() {
            waker.wake();
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Data: ChannelData> ChannelReceiver<Data> {
    pub async fn recv(&self) -> Option<Data> {
        ChannelRead(self.0.clone()).await
    }

    pub fn try_recv(&self) -> Option<Data> {
        self.0.lock().unwrap().buffer.take()
    }
}

struct ChannelRead<Data: ChannelData>(Arc<Mutex<ChannelState<Data>>>);

impl<Data: ChannelData> std::future::Future for ChannelRead<Data> {
    type Output = Option<Data>;

    fn poll(self: Pin<&mut Self>, cx: &mut Context) -> Poll<Self::Output> {
        let mut state = self.0.lock().unwrap();
        if let Some(buffer) = state.buffer.take() {
            Poll::Ready(Some(buffer))
        } else if state.senders == 0 {
            Poll::Ready(None)
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

impl<Data: ChannelData> Stream for ChannelReceiver<Data> {
    type Item = Data::Item;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let mut state = self.0.lock().unwrap();

        if let Some(draining) = state.draining.as_mut() {
            if let Some(item) = draining.next() {
                return Poll::Ready(Some(item));
            } else {
                state.draining = None;
            }
        }

        if let Some(buffer) = state.buffer.take() {
            state.draining = Some(buffer.into_iter());
            // a freshly filled buffer yields at least one item
            Poll::Ready(state.draining.as_mut().unwrap().next())
        } else if state.senders == 0 {
            Poll::Ready(None)
        } else {
            state.waker = Some(cx.waker().clone());
            Poll::Pending
        }
    }
}

                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
             Factory Functions
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
pub fn channel<Data: ChannelData>() -> (ChannelSender<Data>, ChannelReceiver<Data>) {
    let state = Arc::new(Mutex::new(ChannelState {
        buffer: None,
        draining: None,
        senders: 1,
        waker: None,
    }));

    (ChannelSender(state.clone()), ChannelReceiver(state))
}

pub fn queue_channel<T: Send + Sync>() -> (ChannelSender<Vec<T>>, ChannelReceiver<Vec<T>>) {
    channel::<Vec<T>>()
}

pub fn set_channel<T: Eq + Hash + Send + Sync>(
) -> (ChannelSender<HashSet<T>>, ChannelReceiver<HashSet<T>>) {
    channel::<HashSet<T>>()
}

pub fn singleton_channel<T: Send + Sync>() -> (ChannelSender<Option<T>>, ChannelReceiver<Option<T>>)
{
    channel::<Option<T>>()
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
