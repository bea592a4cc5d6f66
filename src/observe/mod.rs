
                    /*\
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                Capabilities
<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>
                    \*/
use {crate::chain::Chain, std::sync::Arc};

pub(crate) type Handler<V> = Arc<dyn Fn(&V) + Send + Sync>;

/// A type that can act as a chain root.
///
/// Sources are cheap cloneable handles over shared state; cloning a source
/// clones the handle, not the subscriber list.
pub trait Source: Clone + Send + Sync + 'static {
    type Value: Clone + Send + Sync + 'static;

    /// The fan-out this source dispatches through.
    fn broadcast(&self) -> Broadcast<Self::Value>;

    /// The value delivered once to a subscription finalized with `sync()`.
    /// Push-only sources return `None`; [`Fetchable`] sources must return
    /// their current value here as well.
    fn replay_value(&self) -> Option<Self::Value> {
        None
    }

    fn chain(&self) -> Chain<Self::Value, Self> {
        Chain::begin(self)
    }
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// A source that can produce its current value on demand. Enables
/// `Chain::sync` and the caching `Chain::suspend` operator.
pub trait Fetchable: Source {
    fn fetched_value(&self) -> Option<Self::Value>;
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

/// A terminal or side-effect receiver a chain can forward into.
pub trait Sink: Clone + Send + Sync + 'static {
    type Value;

    fn receive(&self, value: &Self::Value);
}

//<<<<>>>><<>><><<>><<<*>>><<>><><<>><<<<>>>>

pub mod broadcast;
pub mod channel;
pub mod observer;

pub use {
    broadcast::{Broadcast, WeakBroadcast},
    channel::{
        queue_channel, set_channel, singleton_channel, ChannelData, ChannelReceiver, ChannelSender,
    },
    observer::{Observer, ObserverPool},
};
