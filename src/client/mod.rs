//! Terminal front end for the weather proxy.

pub mod forecast;
pub mod local_time;
pub mod render;
pub mod session;
pub mod suggestions;

pub use forecast::reduce_daily;
pub use local_time::local_time;
pub use session::{Dashboard, LookupOutcome, LookupSequencer, WeatherSession};
pub use suggestions::{Autocomplete, Key, Submission};
