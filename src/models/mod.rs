pub mod forecast;
pub mod search;
pub mod weather;

pub use forecast::{ForecastEntry, ForecastPayload};
pub use search::{SearchRecord, SearchSnapshot};
pub use weather::{CurrentWeather, Suggestion};
