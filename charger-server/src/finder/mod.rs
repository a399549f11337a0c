//! Request orchestration with graceful fallback.
//!
//! A request runs in fixed stages: resolve the position, check the
//! cooldown, query the directory, rank, and if nothing usable came back,
//! rank a synthetic set instead. Every stage except position validation
//! degrades rather than fails, leaving a [`Notice`] behind.
//!
//! The two suspend points (position fix and directory call) each carry a
//! deadline. Dropping the future returned by [`ChargerFinder::find`]
//! cancels whichever is in flight.

mod config;
mod outcome;


pub use config::{FinderConfig, PositionFallback, SyntheticSource};
pub use outcome::{
    DataSource, FindError, FindOutcome, FindRequest, InvalidLocationReason, LocationIssue, Notice,
    PositionSource, RemoteFailure,
};

use std::collections::BTreeSet;
use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::blacklist::Blacklist;
use crate::corridor::Corridor;
use crate::deadline::with_deadline;
use crate::directory::{ChargerDirectory, PoiRecord, convert_records};
use crate::domain::{Charger, ChargerId, ChargerResult, Coordinate};
use crate::geo::{is_valid_coordinate, is_within_route_bounds};
use crate::location::{LocationProvider, locate};
use crate::planner::{RankingConfig, rank};
use crate::rate_limit::RateLimiter;
use crate::synthetic::SyntheticGenerator;

/// Finds and ranks chargers for one driver request at a time.
///
/// Holds every collaborator explicitly. Shared across requests behind an
/// `Arc`; the only mutable state is the rate limiter, the synthetic RNG and
/// whatever the directory and blacklist keep internally.
pub struct ChargerFinder<D, L, B> {
    directory: D,
    location: L,
    blacklist: B,
    rate_limiter: RateLimiter,
    synthetic: SyntheticGenerator,
    corridor: Corridor,
    ranking: RankingConfig,
    config: FinderConfig,
}

impl<D, L, B> ChargerFinder<D, L, B>
where
    D: ChargerDirectory,
    L: LocationProvider,
    B: Blacklist,
{
    pub fn new(directory: D, location: L, blacklist: B, config: FinderConfig) -> Self {
        Self {
            directory,
            location,
            blacklist,
            rate_limiter: RateLimiter::new(config.cooldown),
            synthetic: SyntheticGenerator::default(),
            corridor: Corridor::default(),
            ranking: RankingConfig::default(),
            config,
        }
    }

    pub fn with_ranking(mut self, ranking: RankingConfig) -> Self {
        self.ranking = ranking;
        self
    }

    pub fn with_corridor(mut self, corridor: Corridor) -> Self {
        self.corridor = corridor;
        self
    }

    pub fn with_synthetic(mut self, synthetic: SyntheticGenerator) -> Self {
        self.synthetic = synthetic;
        self
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }

    pub fn blacklist(&self) -> &B {
        &self.blacklist
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    pub fn corridor(&self) -> &Corridor {
        &self.corridor
    }

    /// Run one request through every stage.
    ///
    /// Fails only when the caller supplied a position that is not a real
    /// coordinate or lies off the corridor.
    pub async fn find(&self, request: FindRequest) -> Result<FindOutcome, FindError> {
        let mut notices = Vec::new();

        let (position, position_source) = self.resolve_position(&request, &mut notices).await?;
        debug!(%position, source = position_source.as_str(), "position resolved");

        let blacklist = self.blacklist.ids().await;

        let live = self.fetch_live(position, &request, &mut notices).await;
        let (results, data_source) = match live {
            Some(chargers) => {
                let ranked = rank(
                    &chargers,
                    request.direction,
                    request.range,
                    &position,
                    &blacklist,
                    &self.ranking,
                );
                if ranked.is_empty() {
                    info!(
                        candidates = chargers.len(),
                        "no live charger survived ranking, using synthetic data"
                    );
                    (self.rank_synthetic(position, &request, &blacklist), DataSource::Synthetic)
                } else {
                    (ranked, DataSource::Live)
                }
            }
            None => (self.rank_synthetic(position, &request, &blacklist), DataSource::Synthetic),
        };

        info!(
            results = results.len(),
            data = data_source.as_str(),
            direction = request.direction.as_str(),
            range_km = request.range.km(),
            "request ranked"
        );

        Ok(FindOutcome {
            advisory: FindOutcome::advisory_for(&notices),
            results,
            position,
            position_source,
            data_source,
            notices,
        })
    }

    async fn resolve_position(
        &self,
        request: &FindRequest,
        notices: &mut Vec<Notice>,
    ) -> Result<(Coordinate, PositionSource), FindError> {
        if let Some(supplied) = request.location {
            return check_supplied(supplied).map(|c| (c, PositionSource::Supplied));
        }

        let fix = with_deadline(self.config.location_timeout, locate(&self.location));
        let issue = match fix.await {
            Ok(Ok(fix)) if is_valid_coordinate(&fix) => return Ok((fix, PositionSource::Device)),
            Ok(Ok(fix)) => LocationIssue::InvalidFix(fix),
            Ok(Err(e)) => LocationIssue::Provider(e),
            Err(_) => LocationIssue::TimedOut,
        };
        warn!(?issue, "no usable position fix, using approximate position");
        notices.push(Notice::LocationUnavailable(issue));

        Ok(match self.config.position_fallback {
            PositionFallback::Fixed => (self.corridor.fallback_position, PositionSource::Fallback),
            PositionFallback::Estimated => (
                self.corridor.estimate_position(request.direction, request.range),
                PositionSource::Estimated,
            ),
        })
    }

    /// Live candidates, or `None` if the directory was skipped or failed.
    ///
    /// A fresh cached answer is used without touching the cooldown. A
    /// remote call holds a [`Reservation`](crate::rate_limit::Reservation)
    /// that is only committed on success.
    async fn fetch_live(
        &self,
        position: Coordinate,
        request: &FindRequest,
        notices: &mut Vec<Notice>,
    ) -> Option<Vec<Arc<Charger>>> {
        let radius_km = request.range.km();
        if let Some(records) = self.directory.cached(position, radius_km).await {
            debug!(records = records.len(), "directory answered from cache");
            return Some(into_chargers(&records));
        }

        let Some(reservation) = self.rate_limiter.try_acquire() else {
            let retry_in = self.rate_limiter.remaining();
            debug!(?retry_in, "directory cooling down, skipping");
            notices.push(Notice::RateLimited { retry_in });
            return None;
        };

        let search = self.directory.search(position, radius_km);
        let failure = match with_deadline(self.config.remote_timeout, search).await {
            Ok(Ok(records)) => {
                reservation.commit();
                let chargers = into_chargers(&records);
                debug!(
                    records = records.len(),
                    chargers = chargers.len(),
                    "directory answered"
                );
                return Some(chargers);
            }
            Ok(Err(e)) => {
                warn!(error = %e, "directory call failed");
                RemoteFailure::from(&e)
            }
            Err(elapsed) => {
                warn!(%elapsed, "directory call timed out");
                RemoteFailure::from(elapsed)
            }
        };

        notices.push(Notice::RemoteUnavailable(failure));
        None
    }

    fn rank_synthetic(
        &self,
        position: Coordinate,
        request: &FindRequest,
        blacklist: &BTreeSet<ChargerId>,
    ) -> Vec<ChargerResult> {
        let rank_all = |chargers: Vec<Charger>| {
            let chargers: Vec<Arc<Charger>> = chargers.into_iter().map(Arc::new).collect();
            rank(
                &chargers,
                request.direction,
                request.range,
                &position,
                blacklist,
                &self.ranking,
            )
        };

        if self.config.synthetic_source == SyntheticSource::Waypoints {
            let along = self.synthetic.along_route(&self.corridor, position, request.direction);
            let ranked = rank_all(along);
            if !ranked.is_empty() {
                return ranked;
            }
            debug!("no corridor waypoint in reach, generating nearby chargers");
        }

        let nearby = self
            .synthetic
            .generate(position, request.direction, self.config.synthetic_count);
        rank_all(nearby)
    }
}

/// A caller-supplied position must be real and on the corridor.
fn check_supplied(coordinate: Coordinate) -> Result<Coordinate, FindError> {
    if !is_valid_coordinate(&coordinate) {
        return Err(FindError::InvalidLocation {
            coordinate,
            reason: InvalidLocationReason::NotACoordinate,
        });
    }
    if !is_within_route_bounds(&coordinate) {
        return Err(FindError::InvalidLocation {
            coordinate,
            reason: InvalidLocationReason::OffCorridor,
        });
    }
    Ok(coordinate)
}

fn into_chargers(records: &[PoiRecord]) -> Vec<Arc<Charger>> {
    convert_records(records).into_iter().map(Arc::new).collect()
}
