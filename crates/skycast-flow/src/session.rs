//! The per-user session state machine.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::Mutex;
use tracing::instrument;

use crate::event::Event;
use crate::response::Response;
use skycast_core::StoreError;
use skycast_forecast::{format, ForecastClient};
use skycast_geo::{GeoClient, Location};
use skycast_store::{SearchCache, UserId, UserStore};

const WEEKLY_HORIZON_DAYS: u32 = 7;
const MONTHLY_HORIZON_DAYS: u32 = 30;

/// Transient conversation state, layered over the durable `UserRecord`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum UserState {
    #[default]
    Idle,
    /// The next text message is a city search query.
    AwaitingCityName,
}

/// Orchestrates search, selection, favorites, and forecasts per user.
///
/// Long-lived; there is no terminal state. Callers must serialize event
/// handling per user; events for different users may run concurrently.
pub struct SessionFlow {
    store: Arc<UserStore>,
    cache: SearchCache,
    geo: GeoClient,
    forecast: ForecastClient,
    states: Mutex<HashMap<UserId, UserState>>,
    search_limit: u8,
}

impl SessionFlow {
    pub fn new(
        store: Arc<UserStore>,
        geo: GeoClient,
        forecast: ForecastClient,
        search_limit: u8,
    ) -> Self {
        Self {
            store,
            cache: SearchCache::new(),
            geo,
            forecast,
            states: Mutex::new(HashMap::new()),
            search_limit,
        }
    }

    /// Dispatch one inbound event.
    ///
    /// Usage errors, empty search results, stale selections, missing
    /// preconditions, and upstream failures all come back as [`Response`]
    /// variants; only durable-store failures escape as `Err`.
    #[instrument(skip(self, event), fields(event = ?std::mem::discriminant(&event)), level = "debug")]
    pub async fn handle(&self, user: UserId, event: Event) -> Result<Response, StoreError> {
        match event {
            Event::Start => {
                self.store.get_or_create(user)?;
                Ok(Response::Welcome)
            }
            Event::Help => Ok(Response::Help),
            Event::BeginSearch => {
                self.set_state(user, UserState::AwaitingCityName);
                Ok(Response::PromptCityName)
            }
            Event::Text(text) => self.on_text(user, &text).await,
            Event::PickCandidate(candidate_id) => self.on_pick(user, &candidate_id),
            Event::AddFavorite => self.on_add_favorite(user),
            Event::ShowFavorites => {
                let record = self.store.get_or_create(user)?;
                Ok(Response::Favorites(record.favorites))
            }
            Event::SetCurrentFromFavorite(location_id) => {
                self.on_set_from_favorite(user, &location_id)
            }
            Event::DeleteFavorite(location_id) => {
                self.store.remove_favorite(user, &location_id)?;
                let record = self.store.get_or_create(user)?;
                Ok(Response::FavoriteRemoved {
                    favorites: record.favorites,
                })
            }
            Event::DeviceLocation {
                latitude,
                longitude,
            } => {
                // A shared location is also a valid answer to a city prompt.
                self.set_state(user, UserState::Idle);
                let location = Location::from_coordinates(latitude, longitude);
                self.store.set_current(user, location.clone())?;
                Ok(Response::LocationSaved { location })
            }
            Event::WeeklyForecast => self.forecast_for(user, WEEKLY_HORIZON_DAYS).await,
            Event::MonthlyForecast => self.forecast_for(user, MONTHLY_HORIZON_DAYS).await,
        }
    }

    async fn on_text(&self, user: UserId, text: &str) -> Result<Response, StoreError> {
        if self.state_of(user) != UserState::AwaitingCityName {
            return Ok(Response::UnknownInput);
        }

        let query = text.trim();
        if query.is_empty() {
            // Usage error: re-prompt, still awaiting a name.
            return Ok(Response::EmptySearchText);
        }

        // Submitting a search exits the state whatever the outcome.
        self.set_state(user, UserState::Idle);

        match self.geo.search(query, self.search_limit).await {
            Ok(candidates) if candidates.is_empty() => Ok(Response::NoMatches {
                query: query.to_string(),
            }),
            Ok(candidates) => {
                self.cache.put(user, &candidates);
                Ok(Response::Candidates(candidates))
            }
            Err(e) => {
                tracing::warn!(error = %e, "city search failed");
                Ok(Response::ProviderUnavailable)
            }
        }
    }

    fn on_pick(&self, user: UserId, candidate_id: &str) -> Result<Response, StoreError> {
        let Some(location) = self.cache.resolve(user, candidate_id) else {
            // Superseded search; no state change, no store mutation.
            return Ok(Response::StaleSelection);
        };

        self.store.set_current(user, location.clone())?;
        let record = self.store.get_or_create(user)?;
        Ok(Response::CurrentSet {
            is_favorite: record.is_favorite(&location.id),
            location,
        })
    }

    fn on_add_favorite(&self, user: UserId) -> Result<Response, StoreError> {
        let record = self.store.get_or_create(user)?;
        let Some(location) = record.current else {
            return Ok(Response::NeedCity);
        };

        self.store.add_favorite(user, location.clone())?;
        Ok(Response::FavoriteAdded { location })
    }

    fn on_set_from_favorite(
        &self,
        user: UserId,
        location_id: &str,
    ) -> Result<Response, StoreError> {
        let record = self.store.get_or_create(user)?;
        let Some(location) = record.favorites.iter().find(|c| c.id == location_id).cloned()
        else {
            return Ok(Response::FavoriteNotFound);
        };

        self.store.set_current(user, location.clone())?;
        Ok(Response::CurrentSet {
            location,
            is_favorite: true,
        })
    }

    async fn forecast_for(&self, user: UserId, horizon_days: u32) -> Result<Response, StoreError> {
        let record = self.store.get_or_create(user)?;
        let Some(current) = record.current else {
            return Ok(Response::NeedCity);
        };

        match self.forecast.daily(&current, horizon_days).await {
            Ok(forecast) => Ok(Response::Forecast {
                icons: forecast.icon_urls(),
                text: format::render(&forecast),
            }),
            Err(e) => {
                tracing::warn!(error = %e, "forecast fetch failed");
                Ok(Response::ProviderUnavailable)
            }
        }
    }

    fn state_of(&self, user: UserId) -> UserState {
        self.states.lock().get(&user).copied().unwrap_or_default()
    }

    fn set_state(&self, user: UserId, state: UserState) {
        self.states.lock().insert(user, state);
    }
}
