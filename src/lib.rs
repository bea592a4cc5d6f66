//! Reactive chaining of observable values and collections.
//!
//! **catena** lets observers subscribe to mutations of observable containers
//! (scalar *holders*, sequences, mappings) and to bare event sources, and
//! route those notifications through composable pipelines (*chains*) of
//! transform, filter, merge, combine and relay stages down to a callback or
//! a receiving sink.
//!
//! A source broadcasts a value, the value runs synchronously through the
//! chain's stages in subscription order, and finalizing a chain yields an
//! [`Observer`](observe::Observer) that controls the subscription's
//! lifetime. Sources that know their current value
//! ([`Fetchable`](observe::Fetchable)) can replay it into a fresh
//! subscription via `sync()`, and a [`Suspender`](chain::Suspender) can be
//! spliced into any chain to drop or buffer values while suspended.
//!
//!
//!# Examples
//!
//! ```
//! use catena::{holder::Notifier, observe::Source};
//! use std::sync::{Arc, RwLock};
//!
//! let notifier = Notifier::<i32>::new();
//!
//! let received = Arc::new(RwLock::new(None));
//! let target = received.clone();
//!
//! let observer = notifier.chain()
//!     .map(|x| x * 10)
//!     .filter(|x| *x > 10)
//!     .each(move |x| *target.write().unwrap() = Some(*x))
//!     .end();
//!
//! notifier.notify(1);   // filtered out
//! assert_eq!(*received.read().unwrap(), None);
//!
//! notifier.notify(3);
//! assert_eq!(*received.read().unwrap(), Some(30));
//!
//! observer.invalidate();
//! notifier.notify(5);   // no further delivery
//! assert_eq!(*received.read().unwrap(), Some(30));
//! ```
//!
//! Holders replay their current value to `sync()` subscriptions:
//!
//! ```
//! use catena::{holder::Holder, observe::Source};
//! use std::sync::{Arc, RwLock};
//!
//! let holder = Holder::new("hello".to_string());
//!
//! let received = Arc::new(RwLock::new(Vec::new()));
//! let target = received.clone();
//!
//! let _observer = holder.chain()
//!     .each(move |value: &String| target.write().unwrap().push(value.clone()))
//!     .sync();
//!
//! holder.set("world".to_string());
//!
//! assert_eq!(*received.read().unwrap(), vec!["hello".to_string(), "world".to_string()]);
//! ```

pub mod chain;
pub mod holder;
pub mod observe;
