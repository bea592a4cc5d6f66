pub mod map;
pub mod notifier;
pub mod read_only;
pub mod relay_map;
pub mod relay_value;
pub mod relay_vec;
pub mod value;
pub mod vec;

pub use {
    map::{DictionaryHolder, MapEvent},
    notifier::Notifier,
    read_only::ReadOnly,
    relay_map::{RelayMapEvent, RelayableDictionaryHolder},
    relay_value::{RelayValueEvent, RelayableHolder},
    relay_vec::{RelayVecEvent, RelayableArrayHolder},
    value::Holder,
    vec::{ArrayHolder, VecEvent},
};
