pub mod weather_service;
pub mod weather_service_impl;

pub use weather_service::{WeatherError, WeatherService, require_city};
pub use weather_service_impl::SeaOrmWeatherService;
