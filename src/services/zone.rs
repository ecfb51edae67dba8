//! Zone name resolution
//!
//! Users type zone names loosely ("edmonton", "Calgary Zone"); the export
//! stores them as "Edmonton Zone", "Calgary Zone", "Unknown".

use crate::error::{CovidError, CovidResult};
use crate::storage::Store;

/// Service for listing and validating zones
pub struct ZoneService<'a> {
    store: &'a Store,
}

impl<'a> ZoneService<'a> {
    pub fn new(store: &'a Store) -> Self {
        Self { store }
    }

    /// All zones in the store, sorted
    pub fn list(&self) -> CovidResult<Vec<String>> {
        Ok(self.store.distinct_zones()?.into_iter().collect())
    }

    /// Normalize every name and check it against the store.
    ///
    /// Names that normalize to the same zone collapse to its first
    /// occurrence. Fails on the first name that is not a known zone.
    pub fn resolve<S: AsRef<str>>(&self, names: &[S]) -> CovidResult<Vec<String>> {
        let known = self.store.distinct_zones()?;
        let mut resolved: Vec<String> = Vec::with_capacity(names.len());
        for zone in names.iter().map(|n| normalize_zone(n.as_ref())) {
            if !resolved.contains(&zone) {
                resolved.push(zone);
            }
        }

        if let Some(unknown) = resolved.iter().find(|z| !known.contains(z.as_str())) {
            return Err(CovidError::UnknownZone {
                zone: unknown.clone(),
                valid: known.into_iter().collect(),
            });
        }

        Ok(resolved)
    }
}

/// Canonical zone name: title case, with a " Zone" suffix unless the name
/// already has one or is "Unknown"
pub fn normalize_zone(name: &str) -> String {
    let titled = title_case(name.trim());
    if titled.contains("Zone") || titled == "Unknown" {
        titled
    } else {
        format!("{} Zone", titled)
    }
}

/// Short column prefix for a zone: "Edmonton Zone" becomes "Edmonton"
pub fn zone_prefix(zone: &str) -> &str {
    if zone.contains("Zone") {
        zone.split(' ').next().unwrap_or(zone)
    } else {
        zone
    }
}

/// Uppercase the first letter of every word and lowercase the rest
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut at_word_start = true;
    for c in s.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                out.extend(c.to_uppercase());
            } else {
                out.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            out.push(c);
            at_word_start = true;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::CaseRecord;
    use chrono::NaiveDate;

    fn store_with_zones(zones: &[&str]) -> Store {
        let mut store = Store::open_in_memory().unwrap();
        let date = NaiveDate::from_ymd_opt(2021, 1, 4).unwrap();
        let records: Vec<_> = zones
            .iter()
            .enumerate()
            .map(|(i, z)| CaseRecord::new(i as i64 + 1, date, *z, "F", "20-29", "Active", "Confirmed"))
            .collect();
        store.replace_all(&records).unwrap();
        store
    }

    #[test]
    fn test_normalize_zone() {
        assert_eq!(normalize_zone("edmonton"), "Edmonton Zone");
        assert_eq!(normalize_zone("EDMONTON zone"), "Edmonton Zone");
        assert_eq!(normalize_zone("north"), "North Zone");
        assert_eq!(normalize_zone("unknown"), "Unknown");
        assert_eq!(normalize_zone("Calgary Zone"), "Calgary Zone");
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in ["edmonton", "Calgary Zone", "unknown", "south zone", "Central"] {
            let once = normalize_zone(name);
            assert_eq!(normalize_zone(&once), once);
        }
    }

    #[test]
    fn test_zone_prefix() {
        assert_eq!(zone_prefix("Edmonton Zone"), "Edmonton");
        assert_eq!(zone_prefix("Unknown"), "Unknown");
    }

    #[test]
    fn test_resolve_known_zones() {
        let store = store_with_zones(&["Edmonton Zone", "Calgary Zone", "Unknown"]);
        let service = ZoneService::new(&store);

        let resolved = service.resolve(&["edmonton", "Unknown"]).unwrap();
        assert_eq!(resolved, vec!["Edmonton Zone", "Unknown"]);
    }

    #[test]
    fn test_resolve_collapses_repeated_zones() {
        let store = store_with_zones(&["Edmonton Zone", "Calgary Zone"]);
        let service = ZoneService::new(&store);

        let resolved = service
            .resolve(&["edmonton", "Calgary", "Edmonton Zone", "EDMONTON"])
            .unwrap();
        assert_eq!(resolved, vec!["Edmonton Zone", "Calgary Zone"]);
    }

    #[test]
    fn test_resolve_unknown_zone() {
        let store = store_with_zones(&["Edmonton Zone", "Calgary Zone"]);
        let service = ZoneService::new(&store);

        let err = service.resolve(&["edmonton", "atlantis"]).unwrap_err();
        match err {
            CovidError::UnknownZone { zone, valid } => {
                assert_eq!(zone, "Atlantis Zone");
                assert_eq!(valid, vec!["Calgary Zone", "Edmonton Zone"]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_list_sorted() {
        let store = store_with_zones(&["South Zone", "Calgary Zone", "South Zone"]);
        let service = ZoneService::new(&store);
        assert_eq!(service.list().unwrap(), vec!["Calgary Zone", "South Zone"]);
    }
}
