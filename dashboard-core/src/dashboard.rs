//! Search state machine and the formatted view of whatever it currently holds.
//!
//! A submission moves the dashboard to [`Phase::Loading`] and hands back a
//! [`SearchTicket`]. The ticket is later resolved with the gateway outcome.
//! Only the most recent ticket may change state, so a slow response to a
//! superseded search can never overwrite a newer one.

use chrono::NaiveDate;

use crate::{
    advice::{Advice, advise},
    error::WeatherError,
    gateway::WeatherGateway,
    model::{WeatherQuery, WeatherReport},
    recent::RecentSearches,
    storage::KeyValueStore,
    units::UnitSystem,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Phase {
    #[default]
    Idle,
    Loading,
    Success,
    Error,
}

/// Handle for one in-flight search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTicket {
    seq: u64,
    query: WeatherQuery,
}

impl SearchTicket {
    pub fn query(&self) -> &WeatherQuery {
        &self.query
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

#[derive(Debug)]
pub struct Dashboard<S> {
    input: String,
    phase: Phase,
    report: Option<WeatherReport>,
    advice: Option<Advice>,
    error: Option<String>,
    units: UnitSystem,
    recent: RecentSearches,
    store: S,
    latest_seq: u64,
}

impl<S: KeyValueStore> Dashboard<S> {
    /// Reads the recent-search list from `store` once, up front.
    pub fn new(store: S) -> Self {
        let recent = RecentSearches::load(&store);
        Self {
            input: String::new(),
            phase: Phase::Idle,
            report: None,
            advice: None,
            error: None,
            units: UnitSystem::default(),
            recent,
            store,
            latest_seq: 0,
        }
    }

    pub fn with_units(mut self, units: UnitSystem) -> Self {
        self.units = units;
        self
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn report(&self) -> Option<&WeatherReport> {
        self.report.as_ref()
    }

    pub fn advice(&self) -> Option<Advice> {
        self.advice
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn recent(&self) -> &RecentSearches {
        &self.recent
    }

    /// Front ends disable their submit control while this is false.
    pub fn can_submit(&self) -> bool {
        self.phase != Phase::Loading
    }

    /// Submit whatever is currently in the input field.
    pub fn submit(&mut self) -> Option<SearchTicket> {
        let text = self.input.clone();
        self.submit_query(&text)
    }

    /// Submit a literal query, as the recent-search shortcuts do.
    ///
    /// Blank input is ignored. The previous report stays visible (as stale)
    /// until the new search resolves.
    pub fn submit_query(&mut self, text: &str) -> Option<SearchTicket> {
        let query = WeatherQuery::parse(text)?;

        self.latest_seq += 1;
        self.phase = Phase::Loading;
        self.error = None;
        self.advice = None;

        tracing::debug!(seq = self.latest_seq, city = query.city(), "search submitted");

        Some(SearchTicket { seq: self.latest_seq, query })
    }

    /// Apply a gateway outcome. Returns `false` when the ticket was
    /// superseded and the outcome was dropped.
    pub fn resolve(
        &mut self,
        ticket: SearchTicket,
        outcome: Result<WeatherReport, WeatherError>,
    ) -> bool {
        if ticket.seq != self.latest_seq {
            tracing::debug!(
                seq = ticket.seq,
                latest = self.latest_seq,
                city = ticket.query.city(),
                "dropping stale search result"
            );
            return false;
        }

        match outcome {
            Ok(report) => {
                let current = &report.current;
                self.advice = Some(advise(current.temperature_c, &current.condition));
                self.recent.record(&current.location);
                if let Err(err) = self.recent.save(&mut self.store) {
                    tracing::warn!(error = %err, "failed to persist recent searches");
                }
                self.report = Some(report);
                self.error = None;
                self.phase = Phase::Success;
            }
            Err(err) => {
                tracing::debug!(error = %err, city = ticket.query.city(), "search failed");
                self.error = Some(err.user_message());
                self.report = None;
                self.advice = None;
                self.phase = Phase::Error;
            }
        }

        true
    }

    /// Submit `text`, fetch both lookups, and resolve. Returns the new phase.
    pub async fn search<G>(&mut self, gateway: &G, text: &str) -> Phase
    where
        G: WeatherGateway + ?Sized,
    {
        let Some(ticket) = self.submit_query(text) else {
            return self.phase;
        };

        let outcome = gateway.fetch_report(ticket.query()).await;
        self.resolve(ticket, outcome);
        self.phase
    }

    pub fn toggle_units(&mut self) {
        self.units = self.units.toggled();
    }

    pub fn set_units(&mut self, units: UnitSystem) {
        self.units = units;
    }

    /// Format everything currently held for display.
    pub fn view(&self, today: NaiveDate) -> DashboardView {
        let units = self.units;

        let current = self.report.as_ref().map(|report| {
            let c = &report.current;
            CurrentView {
                location: c.display_name(),
                temperature: units.format_temperature(c.temperature_c),
                feels_like: units.format_temperature(c.feels_like_c),
                condition: c.condition.clone(),
                description: c.description.clone(),
                humidity: format!("{}%", c.humidity_pct),
                pressure: format!("{} hPa", c.pressure_hpa),
                wind: units.format_speed(c.wind_speed_mps),
            }
        });

        let forecast: Vec<ForecastCard> = self
            .report
            .as_ref()
            .map(|report| {
                report
                    .forecast
                    .daily()
                    .map(|entry| ForecastCard {
                        day: entry.time.format("%a").to_string(),
                        temperature: units.format_temperature(entry.temperature_c),
                        description: entry.description.clone(),
                    })
                    .collect()
            })
            .unwrap_or_default();

        DashboardView {
            today: format_long_date(today),
            phase: self.phase,
            stale: self.phase == Phase::Loading && self.report.is_some(),
            error: self.error.clone(),
            current,
            advice: self.advice.map(|a| a.message().to_string()),
            forecast,
            recent: self.recent.names().to_vec(),
            units,
        }
    }
}

/// "Monday, October 19, 2026".
pub fn format_long_date(date: NaiveDate) -> String {
    date.format("%A, %B %-d, %Y").to_string()
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView {
    pub today: String,
    pub phase: Phase,
    /// Old results still shown while a newer search loads.
    pub stale: bool,
    pub error: Option<String>,
    pub current: Option<CurrentView>,
    pub advice: Option<String>,
    pub forecast: Vec<ForecastCard>,
    pub recent: Vec<String>,
    pub units: UnitSystem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CurrentView {
    pub location: String,
    pub temperature: String,
    pub feels_like: String,
    pub condition: String,
    pub description: String,
    pub humidity: String,
    pub pressure: String,
    pub wind: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ForecastCard {
    pub day: String,
    pub temperature: String,
    pub description: String,
}
