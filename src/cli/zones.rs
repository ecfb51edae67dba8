//! CLI handlers for zones

use crate::error::CovidResult;
use crate::services::ZoneService;
use crate::storage::Store;

/// Handle `--list-zones`: one zone per line
pub fn handle_list_zones(store: &Store) -> CovidResult<()> {
    for zone in ZoneService::new(store).list()? {
        println!("{}", zone);
    }
    Ok(())
}

/// Resolve the `--zone` values.
///
/// On an unknown zone the valid names are printed to stderr before the
/// error is returned.
pub fn resolve_zones(store: &Store, names: &[String], csv: bool) -> CovidResult<Vec<String>> {
    if names.is_empty() {
        return Ok(Vec::new());
    }

    let zones = ZoneService::new(store).resolve(names).map_err(|err| {
        if let Some(valid) = err.valid_zones() {
            eprintln!("Valid zones: {}", valid.join(", "));
        }
        err
    })?;

    if !csv {
        println!("Constraining results to zone(s): {}", zones.join(", "));
    }
    Ok(zones)
}
