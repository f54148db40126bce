//! Dashboard state fed by the backend: the ticket list, the stats panel
//! and the refresh counter that ties them together.

pub mod collection;
pub mod refresh;
pub mod stats;

pub use collection::{CollectionEvent, CollectionStore};
pub use refresh::RefreshCoordinator;
pub use stats::{StatsLoaded, StatsPanel};
