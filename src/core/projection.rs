//! Räumliche Bezugssysteme und Koordinaten-Umrechnung.
//!
//! Unterstützt WGS84 (Länge/Breite in Grad), Web Mercator und die
//! UTM-Zonen auf dem WGS84-Ellipsoid. Alle Umrechnungen laufen über
//! WGS84 als Drehscheibe.

use std::fmt;

use anyhow::{bail, Context};
use glam::DVec2;

/// Große Halbachse des WGS84-Ellipsoids (Meter).
const WGS84_A: f64 = 6_378_137.0;
/// Abplattung des WGS84-Ellipsoids.
const WGS84_F: f64 = 1.0 / 298.257_223_563;
/// Maximale Breite der Web-Mercator-Projektion.
pub const WEB_MERCATOR_MAX_LAT: f64 = 85.051_128_78;

const UTM_K0: f64 = 0.9996;
const UTM_FALSE_EASTING: f64 = 500_000.0;
const UTM_FALSE_NORTHING_SOUTH: f64 = 10_000_000.0;

/// Ein räumliches Bezugssystem.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SpatialReference {
    /// Geographische Koordinaten (x = Länge, y = Breite, Grad)
    #[default]
    Wgs84,
    /// Sphärischer Mercator (EPSG:3857)
    WebMercator,
    /// UTM-Zone 1–60, Nord- oder Südhalbkugel
    Utm { zone: u8, north: bool },
}

impl SpatialReference {
    /// Liest einen Bezeichner wie `EPSG:4326`, `EPSG:3857` oder `EPSG:32630`.
    ///
    /// Ein leerer Bezeichner bedeutet WGS84.
    pub fn parse(identifier: &str) -> anyhow::Result<Self> {
        let trimmed = identifier.trim();
        if trimmed.is_empty() {
            return Ok(Self::Wgs84);
        }

        let upper = trimmed.to_ascii_uppercase();
        match upper.as_str() {
            "CRS:84" | "URN:OGC:DEF:CRS:OGC:1.3:CRS84" | "URN:OGC:DEF:CRS:EPSG::4326" => {
                return Ok(Self::Wgs84);
            }
            "URN:OGC:DEF:CRS:EPSG::3857" => return Ok(Self::WebMercator),
            _ => {}
        }

        let code_str = upper
            .strip_prefix("EPSG:")
            .with_context(|| format!("Unbekanntes Bezugssystem: '{trimmed}'"))?;
        let code: u32 = code_str
            .parse()
            .with_context(|| format!("Ungültiger EPSG-Code: '{trimmed}'"))?;
        Self::from_epsg(code)
    }

    /// Bezugssystem zu einem EPSG-Code.
    pub fn from_epsg(code: u32) -> anyhow::Result<Self> {
        match code {
            4326 => Ok(Self::Wgs84),
            3857 | 900_913 | 102_100 | 102_113 => Ok(Self::WebMercator),
            32_601..=32_660 => Ok(Self::Utm {
                zone: (code - 32_600) as u8,
                north: true,
            }),
            32_701..=32_760 => Ok(Self::Utm {
                zone: (code - 32_700) as u8,
                north: false,
            }),
            other => bail!("EPSG:{other} wird nicht unterstützt"),
        }
    }

    /// Kanonischer EPSG-Code.
    pub fn epsg_code(&self) -> u32 {
        match self {
            Self::Wgs84 => 4326,
            Self::WebMercator => 3857,
            Self::Utm { zone, north: true } => 32_600 + *zone as u32,
            Self::Utm { zone, north: false } => 32_700 + *zone as u32,
        }
    }

    /// Rechnet eine Koordinate dieses Systems nach WGS84 (Länge, Breite).
    pub fn to_wgs84(&self, p: DVec2) -> DVec2 {
        match self {
            Self::Wgs84 => p,
            Self::WebMercator => mercator_to_lon_lat(p),
            Self::Utm { zone, north } => utm_to_lon_lat(p, *zone, *north),
        }
    }

    /// Rechnet eine WGS84-Koordinate (Länge, Breite) in dieses System.
    pub fn from_wgs84(&self, lon_lat: DVec2) -> DVec2 {
        match self {
            Self::Wgs84 => lon_lat,
            Self::WebMercator => lon_lat_to_mercator(lon_lat),
            Self::Utm { zone, north } => lon_lat_to_utm(lon_lat, *zone, *north),
        }
    }
}

impl fmt::Display for SpatialReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EPSG:{}", self.epsg_code())
    }
}

/// Rechnet eine Koordinate zwischen zwei Bezugssystemen um.
///
/// Schlägt fehl, wenn das Ergebnis nicht endlich ist.
pub fn transform(p: DVec2, from: SpatialReference, to: SpatialReference) -> anyhow::Result<DVec2> {
    if from == to {
        return Ok(p);
    }
    let out = to.from_wgs84(from.to_wgs84(p));
    if !out.is_finite() {
        bail!("Koordinate ({}, {}) ist in {to} nicht darstellbar", p.x, p.y);
    }
    Ok(out)
}

// ── Web Mercator ────────────────────────────────────────────────────

fn lon_lat_to_mercator(lon_lat: DVec2) -> DVec2 {
    let lat = lon_lat
        .y
        .clamp(-WEB_MERCATOR_MAX_LAT, WEB_MERCATOR_MAX_LAT)
        .to_radians();
    DVec2::new(
        WGS84_A * lon_lat.x.to_radians(),
        WGS84_A * (std::f64::consts::FRAC_PI_4 + lat / 2.0).tan().ln(),
    )
}

fn mercator_to_lon_lat(p: DVec2) -> DVec2 {
    let lon = (p.x / WGS84_A).to_degrees();
    let lat = (2.0 * (p.y / WGS84_A).exp().atan() - std::f64::consts::FRAC_PI_2).to_degrees();
    DVec2::new(lon, lat)
}

// ── UTM (Krüger-Reihen, Ordnung n³) ─────────────────────────────────

struct KruegerSeries {
    n: f64,
    rectifying_radius: f64,
    alpha: [f64; 3],
    beta: [f64; 3],
    delta: [f64; 3],
}

impl KruegerSeries {
    fn wgs84() -> Self {
        let n = WGS84_F / (2.0 - WGS84_F);
        let n2 = n * n;
        let n3 = n2 * n;
        Self {
            n,
            rectifying_radius: WGS84_A / (1.0 + n) * (1.0 + n2 / 4.0 + n2 * n2 / 64.0),
            alpha: [
                n / 2.0 - 2.0 / 3.0 * n2 + 5.0 / 16.0 * n3,
                13.0 / 48.0 * n2 - 3.0 / 5.0 * n3,
                61.0 / 240.0 * n3,
            ],
            beta: [
                n / 2.0 - 2.0 / 3.0 * n2 + 37.0 / 96.0 * n3,
                1.0 / 48.0 * n2 + 1.0 / 15.0 * n3,
                17.0 / 480.0 * n3,
            ],
            delta: [
                2.0 * n - 2.0 / 3.0 * n2 - 2.0 * n3,
                7.0 / 3.0 * n2 - 8.0 / 5.0 * n3,
                56.0 / 15.0 * n3,
            ],
        }
    }
}

fn central_meridian(zone: u8) -> f64 {
    (zone as f64 * 6.0 - 183.0).to_radians()
}

fn false_northing(north: bool) -> f64 {
    if north { 0.0 } else { UTM_FALSE_NORTHING_SOUTH }
}

fn lon_lat_to_utm(lon_lat: DVec2, zone: u8, north: bool) -> DVec2 {
    let k = KruegerSeries::wgs84();
    let phi = lon_lat.y.to_radians();
    let lambda = lon_lat.x.to_radians() - central_meridian(zone);

    let c = 2.0 * k.n.sqrt() / (1.0 + k.n);
    let t = (phi.sin().atanh() - c * (c * phi.sin()).atanh()).sinh();
    let xi_p = t.atan2(lambda.cos());
    let eta_p = (lambda.sin() / (1.0 + t * t).sqrt()).atanh();

    let mut xi = xi_p;
    let mut eta = eta_p;
    for (j, alpha) in k.alpha.iter().enumerate() {
        let m = 2.0 * (j + 1) as f64;
        xi += alpha * (m * xi_p).sin() * (m * eta_p).cosh();
        eta += alpha * (m * xi_p).cos() * (m * eta_p).sinh();
    }

    let scale = UTM_K0 * k.rectifying_radius;
    DVec2::new(
        UTM_FALSE_EASTING + scale * eta,
        false_northing(north) + scale * xi,
    )
}

fn utm_to_lon_lat(p: DVec2, zone: u8, north: bool) -> DVec2 {
    let k = KruegerSeries::wgs84();
    let scale = UTM_K0 * k.rectifying_radius;
    let xi = (p.y - false_northing(north)) / scale;
    let eta = (p.x - UTM_FALSE_EASTING) / scale;

    let mut xi_p = xi;
    let mut eta_p = eta;
    for (j, beta) in k.beta.iter().enumerate() {
        let m = 2.0 * (j + 1) as f64;
        xi_p -= beta * (m * xi).sin() * (m * eta).cosh();
        eta_p -= beta * (m * xi).cos() * (m * eta).sinh();
    }

    let chi = (xi_p.sin() / eta_p.cosh()).asin();
    let mut phi = chi;
    for (j, delta) in k.delta.iter().enumerate() {
        phi += delta * (2.0 * (j + 1) as f64 * chi).sin();
    }
    let lambda = central_meridian(zone) + eta_p.sinh().atan2(xi_p.cos());

    DVec2::new(lambda.to_degrees(), phi.to_degrees())
}
