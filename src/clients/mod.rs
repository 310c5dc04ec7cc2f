pub mod geodb;
pub mod openweather;
pub mod proxy;
