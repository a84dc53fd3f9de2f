//! Snapshot fusion
//!
//! Merges the three partial provider snapshots into the canonical snapshot.
//! Precedence, lowest to highest, is forecast model, national agency, local
//! station. A field is copied from a higher-precedence snapshot only when it
//! is present there, so an absent value never erases a known one.

use crate::app::models::CanonicalSnapshot;
use crate::app::services::wind::variability;
use tracing::debug;

/// Partial snapshots of the three providers
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProviderSnapshots {
    pub forecast: CanonicalSnapshot,
    pub agency: CanonicalSnapshot,
    pub station: CanonicalSnapshot,
}

/// Overlay `overlay` on `base`, keeping base values where the overlay is absent.
///
/// Wind variability is derived during fusion and never copied from either
/// side's provider data: the base value is kept as is.
pub fn merge(base: CanonicalSnapshot, overlay: &CanonicalSnapshot) -> CanonicalSnapshot {
    CanonicalSnapshot {
        wind_direction: overlay.wind_direction.or(base.wind_direction),
        wind_speed: overlay.wind_speed.or(base.wind_speed),
        gust_direction: overlay.gust_direction.or(base.gust_direction),
        gust_speed: overlay.gust_speed.or(base.gust_speed),
        wind_variability: base.wind_variability,
        visibility: overlay.visibility.or(base.visibility),
        temperature: overlay.temperature.or(base.temperature),
        dew_point: overlay.dew_point.or(base.dew_point),
        qnh: overlay.qnh.or(base.qnh),
        precipitation: overlay.precipitation.or(base.precipitation),
        observation_time: overlay.observation_time.or(base.observation_time),
        sky_octas: overlay.sky_octas.or(base.sky_octas),
        cloud_layers: overlay.cloud_layers.clone().or(base.cloud_layers),
        phenomenon: overlay.phenomenon.or(base.phenomenon),
    }
}

/// Fuse the provider snapshots in precedence order.
///
/// When both the station bearing and the bearing known before the station
/// was applied (agency, else forecast) are present, the variability between
/// them is attached to the result.
pub fn fuse(snapshots: &ProviderSnapshots) -> CanonicalSnapshot {
    let before_station = merge(
        merge(CanonicalSnapshot::default(), &snapshots.forecast),
        &snapshots.agency,
    );
    let prior_bearing = before_station.wind_direction;

    let mut fused = merge(before_station, &snapshots.station);
    fused.wind_variability = variability(snapshots.station.wind_direction, prior_bearing);

    debug!(
        "Fused snapshot: wind {:?}@{:?}, variability {:?}, time {}",
        fused.wind_direction,
        fused.wind_speed,
        fused.wind_variability,
        fused.observation_time_text()
    );

    fused
}
