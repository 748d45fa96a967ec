use crate::core::params::{params_filter, Params};
use crate::domain::ports::ApiModel;
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoPoint {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// 地圖查詢範圍，以西北角與東南角表示
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Polygon {
    pub nw: GeoPoint,
    pub se: GeoPoint,
}

impl Polygon {
    pub fn new(nw: GeoPoint, se: GeoPoint) -> Self {
        Self { nw, se }
    }

    /// Builds the region from any two opposite corners given as `(lat, lng)`,
    /// e.g. south-west and north-east.
    pub fn from_corners(a: (f64, f64), b: (f64, f64)) -> Self {
        let (north, south) = (a.0.max(b.0), a.0.min(b.0));
        let (west, east) = (a.1.min(b.1), a.1.max(b.1));
        Self {
            nw: GeoPoint::new(north, west),
            se: GeoPoint::new(south, east),
        }
    }

    pub fn as_params(&self) -> serde_json::Value {
        json!({
            "latNW": self.nw.latitude,
            "lngNW": self.nw.longitude,
            "latSE": self.se.latitude,
            "lngSE": self.se.longitude,
        })
    }
}

/// Filters for the terminal map lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct TerminalQuery {
    pub polygon: Polygon,
    pub zoom: Option<u32>,
    /// Hide terminals inactive for longer than this many minutes.
    pub active_within_minutes: Option<u32>,
    pub include_partners: Option<bool>,
    pub partner_ids: Option<Vec<String>>,
    pub cache_terminals: Option<bool>,
    pub card_terminals: Option<bool>,
    /// `0` not identified, `1` partly identified, `2` fully identified.
    pub identification_types: Option<u8>,
    pub terminal_groups: Option<Vec<String>>,
}

impl TerminalQuery {
    pub const DEFAULT_ACTIVE_WITHIN_MINUTES: u32 = 30;

    pub fn new(polygon: Polygon) -> Self {
        Self {
            polygon,
            zoom: None,
            active_within_minutes: Some(Self::DEFAULT_ACTIVE_WITHIN_MINUTES),
            include_partners: None,
            partner_ids: None,
            cache_terminals: None,
            card_terminals: None,
            identification_types: None,
            terminal_groups: None,
        }
    }

    pub fn to_params(&self) -> Params {
        let mut query = self.polygon.as_params();
        if let Some(map) = query.as_object_mut() {
            let extra = json!({
                "zoom": self.zoom,
                "activeWithinMinutes": self.active_within_minutes,
                "withRefillWallet": self.include_partners,
                "ttpIds": self.partner_ids,
                "cacheAllowed": self.cache_terminals,
                "cardAllowed": self.card_terminals,
                "identificationTypes": self.identification_types,
                "ttpGroups": self.terminal_groups,
            });
            if let serde_json::Value::Object(extra) = extra {
                map.extend(extra);
            }
        }
        params_filter(&query)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TerminalCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    pub precise: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Terminal {
    pub terminal_id: i64,
    pub ttp_id: Option<i64>,
    pub last_active: Option<String>,
    pub count: Option<u32>,
    pub coordinate: TerminalCoordinate,
    pub address: Option<String>,
    pub verification_state: Option<i32>,
    pub label: Option<String>,
}

impl ApiModel for Terminal {
    const FIELDS: &'static [&'static str] = &[
        "terminal_id",
        "ttp_id",
        "last_active",
        "count",
        "coordinate",
        "address",
        "verification_state",
        "label",
    ];
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartnerImage {
    pub title: Option<String>,
    pub url: Option<String>,
}

/// Terminal operator group (`ttpGroup`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Partner {
    pub id: i64,
    pub label: String,
    pub image: Option<PartnerImage>,
}

impl ApiModel for Partner {
    const FIELDS: &'static [&'static str] = &["id", "label", "image"];
}
