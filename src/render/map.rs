//! Map view of scored routes
//!
//! Builds a declarative map spec: one polyline per route colored by risk
//! tier, start/end markers, and a fixed default viewpoint. A route whose
//! path literal fails to decode is skipped and reported in the spec; the
//! remaining routes still render. The spec exports to GeoJSON for any
//! map front end.

use serde::Serialize;
use serde_json::{json, Value};
use tracing::warn;

use crate::data::path::{decode_path, LatLon};
use crate::data::ScoredRoute;
use crate::model::RiskLabel;

/// Default map center (no auto-fit)
pub const DEFAULT_CENTER: LatLon = LatLon {
    lat: 13.05,
    lon: 80.23,
};

/// Default zoom level
pub const DEFAULT_ZOOM: u8 = 12;

/// Polyline color for a risk tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierColor {
    Red,
    Orange,
    Green,
}

impl TierColor {
    /// Fixed tier mapping: High→red, Medium→orange, Low→green.
    pub fn for_risk(risk: RiskLabel) -> Self {
        match risk {
            RiskLabel::High => TierColor::Red,
            RiskLabel::Medium => TierColor::Orange,
            RiskLabel::Low => TierColor::Green,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TierColor::Red => "red",
            TierColor::Orange => "orange",
            TierColor::Green => "green",
        }
    }
}

/// One route drawn on the map.
#[derive(Debug, Clone, Serialize)]
pub struct MapRoute {
    pub route_id: String,
    pub risk: RiskLabel,
    pub color: TierColor,
    /// Popup text, e.g. "R1 - Low Risk"
    pub popup: String,
    pub coords: Vec<LatLon>,
}

/// A start or end marker.
#[derive(Debug, Clone, Serialize)]
pub struct MapMarker {
    pub at: LatLon,
    pub label: &'static str,
    pub color: &'static str,
}

/// A route left off the map because its path could not be decoded.
#[derive(Debug, Clone, Serialize)]
pub struct MapSkip {
    pub route_id: String,
    pub reason: String,
}

/// The rendered map: viewpoint, polylines, markers and skip reports.
#[derive(Debug, Clone, Serialize)]
pub struct MapSpec {
    pub center: LatLon,
    pub zoom: u8,
    pub routes: Vec<MapRoute>,
    pub markers: Vec<MapMarker>,
    pub skipped: Vec<MapSkip>,
}

impl MapSpec {
    /// Export as a GeoJSON FeatureCollection.
    ///
    /// GeoJSON positions are [lon, lat]. Polylines become LineString
    /// features, markers become Points; the viewpoint travels in the
    /// collection's foreign members.
    pub fn to_geojson(&self) -> Value {
        let mut features = Vec::new();

        for route in &self.routes {
            let coordinates: Vec<[f64; 2]> =
                route.coords.iter().map(|c| [c.lon, c.lat]).collect();
            features.push(json!({
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": coordinates },
                "properties": {
                    "route_id": route.route_id,
                    "risk": route.risk.as_str(),
                    "color": route.color.as_str(),
                    "popup": route.popup,
                },
            }));
        }

        for marker in &self.markers {
            features.push(json!({
                "type": "Feature",
                "geometry": { "type": "Point", "coordinates": [marker.at.lon, marker.at.lat] },
                "properties": { "label": marker.label, "marker-color": marker.color },
            }));
        }

        json!({
            "type": "FeatureCollection",
            "features": features,
            "center": [self.center.lon, self.center.lat],
            "zoom": self.zoom,
        })
    }
}

/// Render scored routes onto the map.
///
/// Paths are decoded here, per route; a decode failure skips that route
/// and records the reason instead of aborting the whole view.
pub fn render_map(scored: &[ScoredRoute]) -> MapSpec {
    let mut spec = MapSpec {
        center: DEFAULT_CENTER,
        zoom: DEFAULT_ZOOM,
        routes: Vec::new(),
        markers: Vec::new(),
        skipped: Vec::new(),
    };

    for s in scored {
        let coords = match decode_path(&s.record.path) {
            Ok(coords) => coords,
            Err(e) => {
                warn!(route_id = %s.record.route_id, error = %e, "skipping route on map");
                spec.skipped.push(MapSkip {
                    route_id: s.record.route_id.clone(),
                    reason: e.to_string(),
                });
                continue;
            }
        };

        // decode_path guarantees at least one coordinate
        spec.markers.push(MapMarker {
            at: coords[0],
            label: "Start",
            color: "blue",
        });
        spec.markers.push(MapMarker {
            at: coords[coords.len() - 1],
            label: "End",
            color: "gray",
        });

        spec.routes.push(MapRoute {
            route_id: s.record.route_id.clone(),
            risk: s.risk,
            color: TierColor::for_risk(s.risk),
            popup: format!("{} - {}", s.record.route_id, s.risk),
            coords,
        });
    }

    spec
}
