//! Team logo lookup against the TheSportsDB team search.
//!
//! Lookups are best effort: every failure is logged and turned into "no
//! logo", so event creation never fails because of the third party.

use reqwest::StatusCode;
use serde::Deserialize;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{debug, warn};

use crate::config::LookupConfig;

/// Separator between the two teams in an event name
pub const TEAM_SEPARATOR: &str = " v ";

#[derive(Deserialize)]
struct SearchTeamsResponse {
    teams: Option<Vec<TeamEntry>>,
}

#[derive(Deserialize)]
struct TeamEntry {
    #[serde(rename = "strTeamLogo")]
    logo: Option<String>,
}

#[derive(Debug, thiserror::Error)]
enum LookupFault {
    #[error("rate limited")]
    RateLimited,
    #[error("unexpected status {0}")]
    Status(StatusCode),
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("malformed payload: {0}")]
    Malformed(#[source] reqwest::Error),
}

#[derive(Clone)]
pub struct LogoClient {
    http: reqwest::Client,
    base_url: String,
    max_retries: u32,
    retry_delay: Duration,
    rate_limit_delay: Duration,
}

impl LogoClient {
    pub fn new(config: &LookupConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            http,
            base_url: config.base_url.clone(),
            max_retries: config.max_retries,
            retry_delay: config.retry_delay,
            rate_limit_delay: config.rate_limit_delay,
        })
    }

    async fn try_fetch(&self, team: &str) -> Result<Option<String>, LookupFault> {
        let resp = self
            .http
            .get(&self.base_url)
            .query(&[("t", team)])
            .send()
            .await
            .map_err(LookupFault::Transport)?;

        match resp.status() {
            StatusCode::TOO_MANY_REQUESTS => return Err(LookupFault::RateLimited),
            s if !s.is_success() => return Err(LookupFault::Status(s)),
            _ => {}
        }

        let body: SearchTeamsResponse = resp.json().await.map_err(LookupFault::Malformed)?;

        Ok(body
            .teams
            .and_then(|teams| teams.into_iter().next())
            .and_then(|team| team.logo)
            .filter(|logo| !logo.is_empty()))
    }

    /// Logo URL of the first team matching `team`, if any.
    ///
    /// Connection failures and 429 responses are retried; timeouts, other
    /// statuses and bad payloads give up straight away.
    pub async fn fetch_logo(&self, team: &str) -> Option<String> {
        for attempt in 0..=self.max_retries {
            let delay = match self.try_fetch(team).await {
                Ok(logo) => {
                    debug!("Logo lookup for {:?}: {:?}", team, logo);
                    return logo;
                }
                Err(LookupFault::RateLimited) => self.rate_limit_delay,
                Err(LookupFault::Transport(e)) if !e.is_timeout() => {
                    warn!("Logo lookup for {:?} failed: {}", team, e);
                    self.retry_delay
                }
                Err(e) => {
                    warn!("Logo lookup for {:?} failed: {}", team, e);
                    return None;
                }
            };

            if attempt < self.max_retries {
                warn!(
                    "Retrying logo lookup for {:?} (attempt {}/{}) in {:?}",
                    team,
                    attempt + 2,
                    self.max_retries + 1,
                    delay
                );
                sleep(delay).await;
            }
        }

        warn!("Giving up on logo lookup for {:?}", team);
        None
    }

    /// `logo1|logo2` for a "Home v Away" event name. Names that do not split
    /// into exactly two teams are not looked up at all.
    pub async fn logos_for_event(&self, event_name: &str) -> Option<String> {
        let (home, away) = split_teams(event_name)?;
        let (home_logo, away_logo) = tokio::join!(self.fetch_logo(home), self.fetch_logo(away));
        join_logos(home_logo, away_logo)
    }
}

pub fn split_teams(event_name: &str) -> Option<(&str, &str)> {
    let (home, away) = event_name.split_once(TEAM_SEPARATOR)?;
    if away.contains(TEAM_SEPARATOR) {
        return None;
    }
    Some((home.trim(), away.trim()))
}

pub fn join_logos(home: Option<String>, away: Option<String>) -> Option<String> {
    if home.is_none() && away.is_none() {
        return None;
    }
    Some(format!(
        "{}|{}",
        home.unwrap_or_default(),
        away.unwrap_or_default()
    ))
}
