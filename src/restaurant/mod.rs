mod context;
pub mod model;
pub mod record;

pub use model::{Clock, MealWindow, OpenStatus, RestaurantData, TimingEntry, Timings};
pub use record::Record;
