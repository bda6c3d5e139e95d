//! Application state management for citydash
//!
//! This module owns the aggregation state and its fetch-cycle state
//! machine: every new location bumps a cycle counter, fires the three
//! provider fetches as concurrent tasks, and collects their results
//! through a message channel. Messages carry the cycle they belong to so
//! that late completions of a superseded cycle are discarded.

use crossterm::event::{KeyCode, KeyEvent};
use tokio::sync::mpsc;

use crate::config::Config;
use crate::data::{
    ForecastClient, ForecastError, ForecastPoint, Location, NewsArticle, NewsClient, NewsError,
    WeatherClient, WeatherError, WeatherSnapshot,
};
use crate::location::LocationResolver;
use crate::theme::{theme_for_temp, ThemeBand};

/// Location loaded on first mount, before any search
const DEFAULT_CITY: &str = "New York";
const DEFAULT_COUNTRY_CODE: &str = "us";

/// Number of provider fetches per cycle
const FETCHES_PER_CYCLE: u8 = 3;

/// Messages sent from cycle fetch tasks back to the controller
///
/// Every message is tagged with the cycle that produced it; the
/// controller drops messages whose tag does not match the current cycle.
#[derive(Debug)]
pub enum CycleMessage {
    /// The current-conditions fetch settled
    Weather {
        cycle: u64,
        result: Result<WeatherSnapshot, WeatherError>,
    },
    /// The forecast fetch settled
    Forecast {
        cycle: u64,
        result: Result<Vec<ForecastPoint>, ForecastError>,
    },
    /// The news fetch settled
    News {
        cycle: u64,
        result: Result<Vec<NewsArticle>, NewsError>,
    },
}

impl CycleMessage {
    /// The cycle this message belongs to
    fn cycle(&self) -> u64 {
        match self {
            CycleMessage::Weather { cycle, .. }
            | CycleMessage::Forecast { cycle, .. }
            | CycleMessage::News { cycle, .. } => *cycle,
        }
    }
}

/// Main application struct owning the aggregated state
///
/// The three data slices (`weather`, `forecast`, `news`) are only written
/// by [`App::apply_message`]; a failed fetch leaves its slice at the prior
/// value and records a notice instead.
pub struct App {
    /// Location the current cycle was started for
    pub location: Location,
    /// Current conditions, absent until the first successful fetch
    pub weather: Option<WeatherSnapshot>,
    /// Forecast strip (at most FORECAST_POINTS entries)
    pub forecast: Vec<ForecastPoint>,
    /// Top headlines
    pub news: Vec<NewsArticle>,
    /// True from cycle start until all three fetches of that cycle settle
    pub is_loading: bool,
    /// Index of the highlighted news article
    pub selected_news_index: usize,
    /// Theme band derived from the last successful weather fetch
    pub theme: ThemeBand,
    /// Failure notice for the weather slice of the current cycle
    pub weather_notice: Option<String>,
    /// Failure notice for the forecast slice of the current cycle
    pub forecast_notice: Option<String>,
    /// Failure notice for the news slice of the current cycle
    pub news_notice: Option<String>,
    /// Synchronous notice from a blocked search (malformed input or
    /// unresolvable country); no cycle was started
    pub search_notice: Option<String>,
    /// Search input buffer
    pub search_input: String,
    /// Flag indicating Enter was pressed on the search buffer
    pub search_requested: bool,
    /// Flag indicating the application should quit
    pub should_quit: bool,
    /// Generation tag of the current cycle
    cycle: u64,
    /// Fetches of the current cycle that have not settled yet
    pending: u8,
    /// Channel the fetch tasks report back on
    receiver: mpsc::Receiver<CycleMessage>,
    sender: mpsc::Sender<CycleMessage>,
    /// Free-text location resolver
    resolver: LocationResolver,
    /// Weather API client
    weather_client: WeatherClient,
    /// Forecast API client
    forecast_client: ForecastClient,
    /// News API client
    news_client: NewsClient,
}

impl App {
    /// Creates a new App instance from the runtime configuration
    pub fn new(config: &Config) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        Self {
            location: Location::new(DEFAULT_CITY, DEFAULT_COUNTRY_CODE),
            weather: None,
            forecast: Vec::new(),
            news: Vec::new(),
            is_loading: false,
            selected_news_index: 0,
            theme: ThemeBand::Moderate,
            weather_notice: None,
            forecast_notice: None,
            news_notice: None,
            search_notice: None,
            search_input: String::new(),
            search_requested: false,
            should_quit: false,
            cycle: 0,
            pending: 0,
            receiver,
            sender,
            resolver: LocationResolver::new(config.resolve_country_names),
            weather_client: WeatherClient::new(&config.weather_api_key, &config.locale),
            forecast_client: ForecastClient::new(&config.weather_api_key, &config.locale),
            news_client: NewsClient::new(&config.news_api_key),
        }
    }

    /// The location shown before any search has run
    pub fn default_location() -> Location {
        Location::new(DEFAULT_CITY, DEFAULT_COUNTRY_CODE)
    }

    /// Synchronous bookkeeping for a new fetch cycle
    ///
    /// Bumps the cycle counter, replaces the location wholesale, resets
    /// the news selection, clears the per-slice notices, and arms the
    /// pending-fetch count. Returns the new cycle tag.
    pub fn begin_cycle(&mut self, location: Location) -> u64 {
        self.cycle += 1;
        self.location = location;
        self.selected_news_index = 0;
        self.is_loading = true;
        self.pending = FETCHES_PER_CYCLE;
        self.weather_notice = None;
        self.forecast_notice = None;
        self.news_notice = None;
        self.cycle
    }

    /// Starts a fetch cycle for the given location
    ///
    /// The three provider fetches run as concurrent tasks; each reports
    /// exactly one [`CycleMessage`] tagged with this cycle. Starting a new
    /// cycle does not abort in-flight requests of the previous one; their
    /// messages are discarded on arrival instead.
    pub fn start_cycle(&mut self, location: Location) {
        let cycle = self.begin_cycle(location);
        let location = self.location.clone();

        let weather_client = self.weather_client.clone();
        let tx = self.sender.clone();
        let loc = location.clone();
        tokio::spawn(async move {
            let result = weather_client.fetch_weather(&loc).await;
            let _ = tx.send(CycleMessage::Weather { cycle, result }).await;
        });

        let forecast_client = self.forecast_client.clone();
        let tx = self.sender.clone();
        let loc = location.clone();
        tokio::spawn(async move {
            let result = forecast_client.fetch_forecast(&loc).await;
            let _ = tx.send(CycleMessage::Forecast { cycle, result }).await;
        });

        let news_client = self.news_client.clone();
        let tx = self.sender.clone();
        tokio::spawn(async move {
            let result = news_client.fetch_news(&location.country_code).await;
            let _ = tx.send(CycleMessage::News { cycle, result }).await;
        });
    }

    /// Applies one settled fetch to the aggregated state
    ///
    /// Messages from superseded cycles are dropped without touching any
    /// state. Within the current cycle, a success replaces its slice and a
    /// failure leaves the slice at its prior value and records a notice;
    /// sibling fetches are never affected either way.
    pub fn apply_message(&mut self, msg: CycleMessage) {
        if msg.cycle() != self.cycle {
            // Stale completion from a superseded cycle
            return;
        }

        self.pending = self.pending.saturating_sub(1);
        if self.pending == 0 {
            self.is_loading = false;
        }

        match msg {
            CycleMessage::Weather { result, .. } => match result {
                Ok(snapshot) => {
                    // The only place the theme is ever recomputed
                    self.theme = theme_for_temp(snapshot.temp);
                    self.weather = Some(snapshot);
                }
                Err(err) => {
                    self.weather_notice = Some(format!("weather unavailable: {}", err));
                }
            },
            CycleMessage::Forecast { result, .. } => match result {
                Ok(points) => {
                    self.forecast = points;
                }
                Err(err) => {
                    self.forecast_notice = Some(format!("forecast unavailable: {}", err));
                }
            },
            CycleMessage::News { result, .. } => match result {
                Ok(articles) => {
                    // The prior cycle's articles stay selectable while this
                    // one is in flight, so the selection may exceed the new
                    // list; re-clamp (0 when the list is empty).
                    self.selected_news_index = self
                        .selected_news_index
                        .min(articles.len().saturating_sub(1));
                    self.news = articles;
                }
                Err(err) => {
                    self.news_notice = Some(format!("news unavailable: {}", err));
                }
            },
        }
    }

    /// Drains all pending cycle messages without blocking
    pub fn poll_messages(&mut self) {
        while let Ok(msg) = self.receiver.try_recv() {
            self.apply_message(msg);
        }
    }

    /// Resolves the search buffer and starts a cycle for the result
    ///
    /// Resolution failures (malformed input, unknown country) block the
    /// cycle entirely: a notice is recorded and no fetch is attempted.
    pub async fn run_search(&mut self) {
        let raw = self.search_input.trim().to_string();
        match self.resolver.resolve(&raw).await {
            Ok(location) => {
                self.search_notice = None;
                self.search_input.clear();
                self.start_cycle(location);
            }
            Err(err) => {
                self.search_notice = Some(err.to_string());
            }
        }
    }

    /// Moves the news selection one article forward, clamped
    pub fn select_next_news(&mut self) {
        if self.news.is_empty() {
            return;
        }
        if self.selected_news_index + 1 < self.news.len() {
            self.selected_news_index += 1;
        }
    }

    /// Moves the news selection one article back, clamped
    pub fn select_prev_news(&mut self) {
        self.selected_news_index = self.selected_news_index.saturating_sub(1);
    }

    /// Handles keyboard input
    ///
    /// # Key Bindings
    /// - Printable characters / `Backspace`: edit the search buffer
    /// - `Enter`: submit the search
    /// - `Left`/`Right`: move the news selection
    /// - `Esc`: quit the application
    pub fn handle_key(&mut self, key_event: KeyEvent) {
        match key_event.code {
            KeyCode::Esc => {
                self.should_quit = true;
            }
            KeyCode::Enter => {
                if !self.search_input.trim().is_empty() {
                    self.search_requested = true;
                }
            }
            KeyCode::Backspace => {
                self.search_input.pop();
            }
            KeyCode::Left => {
                self.select_prev_news();
            }
            KeyCode::Right => {
                self.select_next_news();
            }
            KeyCode::Char(c) => {
                self.search_input.push(c);
            }
            _ => {}
        }
    }
}
