pub mod limits {

    pub const HISTORY_LIMIT: u64 = 10;

    pub const FORECAST_DAYS: usize = 5;
}

pub mod provider {

    pub const CURRENT_PATH: &str = "/data/2.5/weather";

    pub const FORECAST_PATH: &str = "/data/2.5/forecast";

    pub const ICON_URL: &str = "https://openweathermap.org/img/wn";
}

pub mod geocoding {

    pub const CITIES_PATH: &str = "/v1/geo/cities";
}
