/// Inbound events, as delivered by the transport layer.
///
/// The transport is responsible for turning raw user input (commands,
/// button presses, shared locations) into these variants.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    /// First contact; ensures the user record exists.
    Start,
    Help,
    /// Begin a city search; the next text message is the query.
    BeginSearch,
    /// Free text. A search query while awaiting a city name, otherwise
    /// unrecognized input.
    Text(String),
    /// Selection of a candidate from the latest search, by candidate id.
    PickCandidate(String),
    /// Save the current location as a favorite.
    AddFavorite,
    ShowFavorites,
    /// Make a saved favorite the current location, by location id.
    SetCurrentFromFavorite(String),
    DeleteFavorite(String),
    /// Device-reported coordinates.
    DeviceLocation { latitude: f64, longitude: f64 },
    /// Forecast with a 7-day horizon.
    WeeklyForecast,
    /// Forecast with a 30-day horizon; clamped to the provider maximum.
    MonthlyForecast,
}
