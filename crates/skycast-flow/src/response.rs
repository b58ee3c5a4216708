use skycast_geo::Location;

/// Typed outbound content, rendered into UI elements by the transport.
#[derive(Debug, Clone, PartialEq)]
pub enum Response {
    Welcome,
    Help,
    /// Prompt for a city name; the flow is now awaiting one.
    PromptCityName,
    /// The submitted search text was empty; still awaiting a name.
    EmptySearchText,
    /// Search ran and matched nothing.
    NoMatches { query: String },
    /// Candidates from a successful search, provider order preserved.
    Candidates(Vec<Location>),
    /// The picked candidate belongs to a superseded search.
    StaleSelection,
    /// Current location confirmed from a candidate.
    CurrentSet {
        location: Location,
        is_favorite: bool,
    },
    FavoriteAdded { location: Location },
    Favorites(Vec<Location>),
    /// A favorite was deleted; carries the refreshed list.
    FavoriteRemoved { favorites: Vec<Location> },
    FavoriteNotFound,
    /// Device coordinates saved as the current location.
    LocationSaved { location: Location },
    /// One summary text plus per-day icon references as side artifacts.
    Forecast { text: String, icons: Vec<String> },
    /// A current location is required first.
    NeedCity,
    /// Transient upstream failure; the core does not retry.
    ProviderUnavailable,
    UnknownInput,
}

impl Response {
    /// Transport-ready plain text for frontends without richer widgets.
    pub fn text(&self) -> String {
        match self {
            Response::Welcome => {
                "Ready. Search a city, open favorites, request a forecast, or send your location."
                    .to_string()
            }
            Response::Help => "Commands:\n\
                 /start - main menu\n\
                 /help - this message\n\n\
                 Actions: search a city, send your location, weekly or monthly \
                 forecast, favorites."
                .to_string(),
            Response::PromptCityName => {
                "Type a city name (for example: Almaty / Moscow / Berlin).".to_string()
            }
            Response::EmptySearchText => "Type a city name as text.".to_string(),
            Response::NoMatches { query } => {
                format!("Nothing found for \"{}\". Try another spelling.", query)
            }
            Response::Candidates(candidates) => {
                let mut lines = vec!["Pick the exact match:".to_string()];
                lines.extend(candidates.iter().map(|c| c.label()));
                lines.join("\n")
            }
            Response::StaleSelection => {
                "That list is stale. Search for the city again.".to_string()
            }
            Response::CurrentSet {
                location,
                is_favorite,
            } => {
                if *is_favorite {
                    format!("Current city set: {} (already a favorite)", location.label())
                } else {
                    format!("Current city set: {}", location.label())
                }
            }
            Response::FavoriteAdded { location } => {
                format!("Added to favorites: {}", location.label())
            }
            Response::Favorites(favorites) | Response::FavoriteRemoved { favorites } => {
                if favorites.is_empty() {
                    "Favorite cities: (empty)".to_string()
                } else {
                    let mut lines = vec!["Favorite cities:".to_string()];
                    lines.extend(favorites.iter().map(|c| c.label()));
                    lines.join("\n")
                }
            }
            Response::FavoriteNotFound => "No such favorite.".to_string(),
            Response::LocationSaved { location } => {
                format!("Location saved: {}", location.label())
            }
            Response::Forecast { text, .. } => text.clone(),
            Response::NeedCity => {
                "Pick a city first, or send your location.".to_string()
            }
            Response::ProviderUnavailable => {
                "The service is temporarily unavailable. Please try again.".to_string()
            }
            Response::UnknownInput => {
                "Not sure what you mean. Send /help for commands.".to_string()
            }
        }
    }
}
