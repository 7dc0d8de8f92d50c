pub mod games;

pub use games::{EventsPage, GameService};
