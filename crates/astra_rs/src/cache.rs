//! Bounded TTL cache for computed charts.
//!
//! Chart computation is referentially transparent, so caching by input
//! fingerprint is sound at this boundary. Time-varying outputs
//! (transits, horoscopes) must not go through here. The clock is
//! injected so expiry is testable without sleeping.

use std::hash::{DefaultHasher, Hash, Hasher};
use std::time::{Duration, Instant};

use astra_chart::{BirthInfo, HouseSystem, NatalChart};
use astra_time::TimezoneSpec;

/// Monotonic time source for cache expiry.
pub trait Clock {
    /// Seconds since an arbitrary fixed origin.
    fn monotonic_s(&self) -> f64;
}

/// Wall clock anchored at construction.
#[derive(Debug)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn monotonic_s(&self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

struct CacheSlot {
    fingerprint: u64,
    chart: NatalChart,
    stored_at_s: f64,
}

/// Fixed-capacity chart cache with a shared TTL.
///
/// Lookup scans linearly; intended capacities are a handful of active
/// sessions, not a database. Slots keep insertion order, so eviction at
/// capacity always drops the oldest entry.
pub struct ChartCache<C = SystemClock> {
    slots: Vec<CacheSlot>,
    capacity: usize,
    ttl_s: f64,
    clock: C,
}

impl ChartCache<SystemClock> {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self::with_clock(capacity, ttl, SystemClock::new())
    }
}

impl<C: Clock> ChartCache<C> {
    pub fn with_clock(capacity: usize, ttl: Duration, clock: C) -> Self {
        Self {
            slots: Vec::new(),
            capacity: capacity.max(1),
            ttl_s: ttl.as_secs_f64(),
            clock,
        }
    }

    /// Cached chart for this input, if present and fresh.
    pub fn get(&mut self, birth: &BirthInfo) -> Option<NatalChart> {
        let now = self.clock.monotonic_s();
        self.slots
            .retain(|slot| now - slot.stored_at_s <= self.ttl_s);
        let fp = fingerprint(birth);
        self.slots
            .iter()
            .find(|slot| slot.fingerprint == fp)
            .map(|slot| slot.chart.clone())
    }

    /// Store a chart, evicting the oldest slot at capacity.
    pub fn put(&mut self, birth: &BirthInfo, chart: NatalChart) {
        let fp = fingerprint(birth);
        let stored_at_s = self.clock.monotonic_s();
        self.slots.retain(|slot| slot.fingerprint != fp);
        if self.slots.len() >= self.capacity {
            self.slots.remove(0);
            log::debug!("chart cache full, evicted the oldest entry");
        }
        self.slots.push(CacheSlot {
            fingerprint: fp,
            chart,
            stored_at_s,
        });
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

/// Stable fingerprint over every chart-relevant input field.
///
/// Floats hash by bit pattern, so inputs differing only in sign of zero
/// or NaN payload fingerprint differently; chart validation rejects
/// non-finite coordinates before any cache sees them.
pub fn fingerprint(birth: &BirthInfo) -> u64 {
    let mut h = DefaultHasher::new();
    birth.date.year.hash(&mut h);
    birth.date.month.hash(&mut h);
    birth.date.day.hash(&mut h);
    match birth.time {
        None => 0u8.hash(&mut h),
        Some(t) => {
            1u8.hash(&mut h);
            t.hour.hash(&mut h);
            t.minute.hash(&mut h);
            t.second.to_bits().hash(&mut h);
        }
    }
    match &birth.timezone {
        TimezoneSpec::Utc => 0u8.hash(&mut h),
        TimezoneSpec::FixedHours(hours) => {
            1u8.hash(&mut h);
            hours.to_bits().hash(&mut h);
        }
        TimezoneSpec::Named(name) => {
            2u8.hash(&mut h);
            name.hash(&mut h);
        }
    }
    birth.latitude_deg.to_bits().hash(&mut h);
    birth.longitude_deg.to_bits().hash(&mut h);
    match birth.house_system {
        HouseSystem::Placidus => 0u8.hash(&mut h),
        HouseSystem::WholeSign => 1u8.hash(&mut h),
    }
    h.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::cell::Cell;
    use std::rc::Rc;

    use astra_ephem::Provider;
    use astra_time::{CivilDate, CivilTime};

    #[derive(Clone, Default)]
    struct FakeClock(Rc<Cell<f64>>);

    impl Clock for FakeClock {
        fn monotonic_s(&self) -> f64 {
            self.0.get()
        }
    }

    fn birth(latitude_deg: f64) -> BirthInfo {
        BirthInfo::new(
            CivilDate::new(1990, 6, 15),
            Some(CivilTime {
                hour: 12,
                minute: 0,
                second: 0.0,
            }),
            TimezoneSpec::FixedHours(3.0),
            latitude_deg,
            37.6173,
            HouseSystem::Placidus,
        )
    }

    fn chart_for(b: &BirthInfo) -> NatalChart {
        NatalChart::compute(&Provider::detect(), b).unwrap()
    }

    #[test]
    fn hit_returns_the_stored_chart() {
        let mut cache = ChartCache::with_clock(4, Duration::from_secs(60), FakeClock::default());
        let b = birth(55.7558);
        let chart = chart_for(&b);
        assert!(cache.get(&b).is_none());
        cache.put(&b, chart.clone());
        assert_eq!(cache.get(&b), Some(chart));
        assert!(cache.get(&birth(48.8566)).is_none());
    }

    #[test]
    fn entries_expire_after_the_ttl() {
        let clock = FakeClock::default();
        let mut cache = ChartCache::with_clock(4, Duration::from_secs(60), clock.clone());
        let b = birth(55.7558);
        cache.put(&b, chart_for(&b));

        clock.0.set(59.0);
        assert!(cache.get(&b).is_some());
        clock.0.set(61.0);
        assert!(cache.get(&b).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_evicts_the_oldest() {
        let mut cache = ChartCache::with_clock(2, Duration::from_secs(60), FakeClock::default());
        let first = birth(10.0);
        let second = birth(20.0);
        let third = birth(30.0);
        cache.put(&first, chart_for(&first));
        cache.put(&second, chart_for(&second));
        cache.put(&third, chart_for(&third));

        assert_eq!(cache.len(), 2);
        assert!(cache.get(&first).is_none());
        assert!(cache.get(&second).is_some());
        assert!(cache.get(&third).is_some());
    }

    #[test]
    fn same_input_overwrites_in_place() {
        let mut cache = ChartCache::with_clock(4, Duration::from_secs(60), FakeClock::default());
        let b = birth(55.7558);
        cache.put(&b, chart_for(&b));
        cache.put(&b, chart_for(&b));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn fingerprint_tracks_every_field() {
        let base = birth(55.7558);
        let fp = fingerprint(&base);

        let mut other = base.clone();
        other.latitude_deg = 55.7559;
        assert_ne!(fingerprint(&other), fp);

        let mut other = base.clone();
        other.time = None;
        assert_ne!(fingerprint(&other), fp);

        let mut other = base.clone();
        other.timezone = TimezoneSpec::Named("Europe/Moscow".to_string());
        assert_ne!(fingerprint(&other), fp);

        let mut other = base.clone();
        other.house_system = HouseSystem::WholeSign;
        assert_ne!(fingerprint(&other), fp);

        assert_eq!(fingerprint(&base.clone()), fp);
    }
}
