//! Alternative slot discovery for rejected booking requests
//!
//! Three passes over a bounded horizon: same provider on the requested date,
//! same provider on nearby dates, then other qualified providers. The merged
//! candidates are ranked by a total key so two runs over the same data
//! always return the same list.

use std::cmp::Reverse;
use std::sync::Arc;

use chrono::{Days, NaiveDate, NaiveTime};
use slotbook_domain::{
    minutes_from_midnight, Provider, ScheduleError, ScheduleResult, Service, TimeSlot,
};
use tracing::debug;
use uuid::Uuid;

use super::ports::ServiceCatalog;
use super::slots::SlotGenerator;

/// A candidate with the fields the ranking key reads.
struct Ranked {
    slot: TimeSlot,
    day_distance: i64,
    minute_distance: i64,
    /// 0 for the originally requested provider, 1 for any other.
    tier: u8,
    /// Provider rating in hundredths, higher first.
    rating_centi: i64,
    provider_id: Uuid,
}

/// Searches for bookable alternatives after a rejection.
pub struct AlternativeFinder {
    generator: Arc<SlotGenerator>,
    catalog: Arc<dyn ServiceCatalog>,
}

impl AlternativeFinder {
    /// Create a finder sharing the read-only slot generator.
    pub fn new(generator: Arc<SlotGenerator>, catalog: Arc<dyn ServiceCatalog>) -> Self {
        Self { generator, catalog }
    }

    /// Find up to `max_results` ranked alternatives for a rejected request.
    /// `max_results` is clamped to
    /// [`slotbook_domain::SchedulingConfig::max_alternatives`].
    ///
    /// Ranking key, ascending: date distance in days, time distance in
    /// minutes, provider tier (requested provider first), provider rating
    /// descending, provider id. An empty result means the horizon is
    /// exhausted and is a valid, displayable outcome.
    pub async fn find_alternatives(
        &self,
        service_id: Uuid,
        date: NaiveDate,
        time: NaiveTime,
        max_results: usize,
    ) -> ScheduleResult<Vec<TimeSlot>> {
        let max_results = max_results.min(self.generator.config().max_alternatives);
        if max_results == 0 {
            return Ok(Vec::new());
        }

        let service = self
            .catalog
            .get_service(service_id)
            .await?
            .ok_or_else(|| {
                ScheduleError::Store(slotbook_domain::SlotbookError::NotFound(format!(
                    "service {service_id}"
                )))
            })?;
        if !service.active {
            return Err(ScheduleError::ServiceInactive(service_id));
        }
        let provider = self
            .catalog
            .get_provider(service.provider_id)
            .await?
            .ok_or(ScheduleError::ProviderNotFound(service.provider_id))?;

        let mut candidates =
            self.provider_passes(&service, &provider, 0, date, time, max_results).await?;

        // Other-providers pass, only when the home provider underfills.
        if candidates.len() < max_results {
            let equivalents = self.catalog.equivalent_services(service_id).await?;
            debug!(count = equivalents.len(), "searching equivalent services");
            for other in equivalents {
                if !other.active {
                    continue;
                }
                let Some(other_provider) = self.catalog.get_provider(other.provider_id).await?
                else {
                    continue;
                };
                if !other_provider.active {
                    continue;
                }
                let mut found = self
                    .provider_passes(&other, &other_provider, 1, date, time, max_results)
                    .await?;
                candidates.append(&mut found);
            }
        }

        candidates.sort_by_key(|ranked| {
            (
                ranked.day_distance,
                ranked.minute_distance,
                ranked.tier,
                Reverse(ranked.rating_centi),
                ranked.provider_id,
            )
        });
        candidates.truncate(max_results);

        Ok(candidates.into_iter().map(|ranked| ranked.slot).collect())
    }

    /// Passes 1 and 2 for a single provider: nearest same-day slots, then a
    /// forward day walk taking the earliest available slot per day while the
    /// quota is unfilled.
    async fn provider_passes(
        &self,
        service: &Service,
        provider: &Provider,
        tier: u8,
        date: NaiveDate,
        time: NaiveTime,
        max_results: usize,
    ) -> ScheduleResult<Vec<Ranked>> {
        let config = self.generator.config();
        let requested_minutes = i64::from(minutes_from_midnight(time));
        let mut found = Vec::new();

        // Pass 1: requested date, nearest available starts by minute distance.
        let day_slots = self.generator.generate_day_for_service(service, date).await?;
        let mut same_day: Vec<TimeSlot> =
            day_slots.into_iter().filter(|slot| slot.available).collect();
        same_day.sort_by_key(|slot| {
            (i64::from(minutes_from_midnight(slot.start)) - requested_minutes).abs()
        });
        for slot in same_day.into_iter().take(config.nearby_same_day) {
            found.push(self.rank(slot, service, provider, tier, date, requested_minutes));
        }

        // Pass 2: walk forward day by day while underfilled.
        if found.len() < max_results {
            for offset in 1..=u64::from(config.search_horizon_days) {
                if found.len() >= max_results {
                    break;
                }
                let Some(day) = date.checked_add_days(Days::new(offset)) else {
                    break;
                };
                let slots = self.generator.generate_day_for_service(service, day).await?;
                if let Some(slot) = slots.into_iter().find(|slot| slot.available) {
                    found.push(self.rank(slot, service, provider, tier, date, requested_minutes));
                }
            }
        }

        Ok(found)
    }

    #[allow(clippy::unused_self)]
    fn rank(
        &self,
        mut slot: TimeSlot,
        service: &Service,
        provider: &Provider,
        tier: u8,
        requested_date: NaiveDate,
        requested_minutes: i64,
    ) -> Ranked {
        // Cross-provider alternatives carry their provider on the slot.
        if tier != 0 {
            slot.provider_id = Some(service.provider_id);
        }
        let day_distance = (slot.date - requested_date).num_days().abs();
        let minute_distance =
            (i64::from(minutes_from_midnight(slot.start)) - requested_minutes).abs();
        #[allow(clippy::cast_possible_truncation)]
        let rating_centi = (f64::from(provider.rating) * 100.0).round() as i64;
        Ranked {
            slot,
            day_distance,
            minute_distance,
            tier,
            rating_centi,
            provider_id: service.provider_id,
        }
    }
}
