use crate::consts::{DEFAULT_MAP_HEIGHT_KM, DEFAULT_MAP_WIDTH_KM, EARTH_RADIUS_M};
use crate::error::{GameError, GameResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A point on the quiz map.
///
/// `Geo` is a WGS84-style latitude/longitude pair in degrees. `Planar` is the
/// legacy campus-map variant: percentages (0-100) of a fixed-size image.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Coordinate {
    Geo {
        lat: f64,
        #[serde(alias = "lon")]
        lng: f64,
    },
    Planar {
        x: f64,
        y: f64,
    },
}

impl Coordinate {
    pub fn geo(lat: f64, lng: f64) -> GameResult<Self> {
        let c = Coordinate::Geo { lat, lng };
        c.validate()?;
        Ok(c)
    }

    pub fn planar(x: f64, y: f64) -> GameResult<Self> {
        let c = Coordinate::Planar { x, y };
        c.validate()?;
        Ok(c)
    }

    /// Checks finiteness and range. Deserialized coordinates bypass the
    /// constructors, so loaders call this explicitly.
    pub fn validate(&self) -> GameResult<()> {
        match *self {
            Coordinate::Geo { lat, lng } => {
                if !lat.is_finite() || !lng.is_finite() {
                    return Err(GameError::InvalidCoordinate(format!(
                        "non-finite lat/lng ({}, {})",
                        lat, lng
                    )));
                }
                if !(-90.0..=90.0).contains(&lat) {
                    return Err(GameError::InvalidCoordinate(format!(
                        "latitude {} out of range",
                        lat
                    )));
                }
                if !(-180.0..=180.0).contains(&lng) {
                    return Err(GameError::InvalidCoordinate(format!(
                        "longitude {} out of range",
                        lng
                    )));
                }
            }
            Coordinate::Planar { x, y } => {
                if !x.is_finite() || !y.is_finite() {
                    return Err(GameError::InvalidCoordinate(format!(
                        "non-finite x/y ({}, {})",
                        x, y
                    )));
                }
                if !(0.0..=100.0).contains(&x) || !(0.0..=100.0).contains(&y) {
                    return Err(GameError::InvalidCoordinate(format!(
                        "map position ({}, {}) outside 0-100%",
                        x, y
                    )));
                }
            }
        }
        Ok(())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Coordinate::Geo { .. } => "geo",
            Coordinate::Planar { .. } => "planar",
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Coordinate::Geo { lat, lng } => write!(f, "({:.5}, {:.5})", lat, lng),
            Coordinate::Planar { x, y } => write!(f, "({:.1}%, {:.1}%)", x, y),
        }
    }
}

/// Physical size of the reference map for the planar variant.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapScale {
    pub width_km: f64,
    pub height_km: f64,
}

impl Default for MapScale {
    fn default() -> Self {
        Self {
            width_km: DEFAULT_MAP_WIDTH_KM,
            height_km: DEFAULT_MAP_HEIGHT_KM,
        }
    }
}

/// Great-circle distance in meters between two lat/lng pairs (degrees).
pub fn haversine_m(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2) + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    // Rounding can push `a` a hair above 1.0 for antipodal points.
    let c = 2.0 * a.clamp(0.0, 1.0).sqrt().asin();
    EARTH_RADIUS_M * c
}

/// Converts a percentage-space offset into meters using a linear per-axis scale.
pub fn planar_m(x1: f64, y1: f64, x2: f64, y2: f64, scale: &MapScale) -> f64 {
    let dx_km = ((x2 - x1) / 100.0) * scale.width_km;
    let dy_km = ((y2 - y1) / 100.0) * scale.height_km;
    (dx_km * dx_km + dy_km * dy_km).sqrt() * 1000.0
}

/// Distance in meters between two coordinates of the same kind.
pub fn distance(a: &Coordinate, b: &Coordinate, scale: &MapScale) -> GameResult<f64> {
    a.validate()?;
    b.validate()?;
    match (*a, *b) {
        (Coordinate::Geo { lat: lat1, lng: lng1 }, Coordinate::Geo { lat: lat2, lng: lng2 }) => {
            Ok(haversine_m(lat1, lng1, lat2, lng2))
        }
        (Coordinate::Planar { x: x1, y: y1 }, Coordinate::Planar { x: x2, y: y2 }) => {
            Ok(planar_m(x1, y1, x2, y2, scale))
        }
        _ => Err(GameError::InvalidCoordinate(format!(
            "cannot measure between {} and {} coordinates",
            a.kind(),
            b.kind()
        ))),
    }
}

/// Raw Euclidean distance in percentage units. Planar coordinates only.
pub fn percent_distance(a: &Coordinate, b: &Coordinate) -> GameResult<f64> {
    a.validate()?;
    b.validate()?;
    match (*a, *b) {
        (Coordinate::Planar { x: x1, y: y1 }, Coordinate::Planar { x: x2, y: y2 }) => {
            let dx = x2 - x1;
            let dy = y2 - y1;
            Ok((dx * dx + dy * dy).sqrt())
        }
        _ => Err(GameError::InvalidCoordinate(format!(
            "percentage distance needs planar coordinates, got {} and {}",
            a.kind(),
            b.kind()
        ))),
    }
}

/// Where the map image is actually drawn inside its display element.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawParams {
    pub draw_w: f64,
    pub draw_h: f64,
    pub offset_x: f64,
    pub offset_y: f64,
}

/// A map image of natural size `natural_w x natural_h` shown in an element of
/// size `display_w x display_h`. The image keeps its aspect ratio and is
/// centered (letterboxed).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MapViewport {
    pub display_w: f64,
    pub display_h: f64,
    pub natural_w: f64,
    pub natural_h: f64,
}

impl MapViewport {
    pub fn new(display_w: f64, display_h: f64, natural_w: f64, natural_h: f64) -> GameResult<Self> {
        let dims = [display_w, display_h, natural_w, natural_h];
        if dims.iter().any(|d| !d.is_finite() || *d <= 0.0) {
            return Err(GameError::InvalidCoordinate(format!(
                "viewport dimensions must be positive: {:?}",
                dims
            )));
        }
        Ok(Self {
            display_w,
            display_h,
            natural_w,
            natural_h,
        })
    }

    pub fn draw_params(&self) -> DrawParams {
        let scale = (self.display_w / self.natural_w).min(self.display_h / self.natural_h);
        let draw_w = self.natural_w * scale;
        let draw_h = self.natural_h * scale;
        DrawParams {
            draw_w,
            draw_h,
            offset_x: (self.display_w - draw_w) / 2.0,
            offset_y: (self.display_h - draw_h) / 2.0,
        }
    }

    /// Converts a click, in pixels relative to the display element, into a
    /// planar map coordinate. Clicks on the letterbox bars are rejected.
    pub fn click_to_planar(&self, px: f64, py: f64) -> GameResult<Coordinate> {
        if !px.is_finite() || !py.is_finite() {
            return Err(GameError::InvalidCoordinate(format!(
                "non-finite click ({}, {})",
                px, py
            )));
        }
        let p = self.draw_params();
        let local_x = px - p.offset_x;
        let local_y = py - p.offset_y;
        if local_x < 0.0 || local_y < 0.0 || local_x > p.draw_w || local_y > p.draw_h {
            return Err(GameError::InvalidCoordinate(format!(
                "click ({}, {}) is outside the map image",
                px, py
            )));
        }
        Coordinate::planar((local_x / p.draw_w) * 100.0, (local_y / p.draw_h) * 100.0)
    }

    /// Marker position for a planar coordinate, as percentages of the display
    /// element (what a presentation layer uses for `left`/`top`).
    pub fn planar_to_display(&self, c: &Coordinate) -> GameResult<(f64, f64)> {
        c.validate()?;
        match *c {
            Coordinate::Planar { x, y } => {
                let p = self.draw_params();
                let left = ((p.offset_x + (x / 100.0) * p.draw_w) / self.display_w) * 100.0;
                let top = ((p.offset_y + (y / 100.0) * p.draw_h) / self.display_h) * 100.0;
                Ok((left, top))
            }
            Coordinate::Geo { .. } => Err(GameError::InvalidCoordinate(
                "viewport placement needs a planar coordinate".to_string(),
            )),
        }
    }
}
