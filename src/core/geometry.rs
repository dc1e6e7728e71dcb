//! Geometrien und Ausdehnungen (Extent) in beliebigen Kartenkoordinaten.
//!
//! Koordinaten sind `DVec2` (x = Rechtswert/Länge, y = Hochwert/Breite).
//! Geometrien kennen ihr Bezugssystem nicht; die Umrechnung erfolgt
//! über [`Geometry::map_coords`].

use glam::DVec2;

/// Achsparalleles Rechteck in Kartenkoordinaten.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extent {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Extent {
    /// Erstellt einen Extent aus zwei Eckpunkten (Reihenfolge beliebig).
    pub fn new(a: DVec2, b: DVec2) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Extent eines einzelnen Punkts (Breite und Höhe 0).
    pub fn from_point(p: DVec2) -> Self {
        Self {
            min_x: p.x,
            min_y: p.y,
            max_x: p.x,
            max_y: p.y,
        }
    }

    /// Kleinster Extent, der alle Punkte enthält. `None` bei leerer Eingabe.
    pub fn from_points<'a>(points: impl IntoIterator<Item = &'a DVec2>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = Self::from_point(*iter.next()?);
        Some(iter.fold(first, |acc, p| acc.expanded_to(*p)))
    }

    /// Erweitert den Extent um einen Punkt.
    pub fn expanded_to(mut self, p: DVec2) -> Self {
        self.min_x = self.min_x.min(p.x);
        self.min_y = self.min_y.min(p.y);
        self.max_x = self.max_x.max(p.x);
        self.max_y = self.max_y.max(p.y);
        self
    }

    /// Vereinigung zweier Extents.
    pub fn union(&self, other: &Extent) -> Extent {
        Extent {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    pub fn center(&self) -> DVec2 {
        DVec2::new(
            (self.min_x + self.max_x) / 2.0,
            (self.min_y + self.max_y) / 2.0,
        )
    }

    /// Alle vier Eckpunkte (gegen den Uhrzeigersinn ab unten links).
    pub fn corners(&self) -> [DVec2; 4] {
        [
            DVec2::new(self.min_x, self.min_y),
            DVec2::new(self.max_x, self.min_y),
            DVec2::new(self.max_x, self.max_y),
            DVec2::new(self.min_x, self.max_y),
        ]
    }

    /// `true`, wenn alle Grenzen endliche Zahlen sind.
    pub fn is_finite(&self) -> bool {
        self.min_x.is_finite()
            && self.min_y.is_finite()
            && self.max_x.is_finite()
            && self.max_y.is_finite()
    }

    /// `true`, wenn der Extent zu einem Punkt zusammenfällt.
    pub fn is_degenerate(&self) -> bool {
        !(self.width() > 0.0 || self.height() > 0.0)
    }

    /// Endlich und nicht degeneriert: taugt als Ziel einer Ansichtsanpassung.
    pub fn is_fittable(&self) -> bool {
        self.is_finite() && !self.is_degenerate()
    }

    /// Punkt liegt innerhalb (Rand inklusive).
    pub fn contains(&self, p: DVec2) -> bool {
        p.x >= self.min_x && p.x <= self.max_x && p.y >= self.min_y && p.y <= self.max_y
    }

    /// Um `margin` in alle Richtungen vergrößerter Extent.
    pub fn buffered(&self, margin: f64) -> Extent {
        Extent {
            min_x: self.min_x - margin,
            min_y: self.min_y - margin,
            max_x: self.max_x + margin,
            max_y: self.max_y + margin,
        }
    }
}

/// Geometrie eines Features (GeoJSON-Geometrietypen).
///
/// Polygone sind Listen von Ringen; der erste Ring ist die Außengrenze,
/// weitere Ringe sind Löcher.
#[derive(Debug, Clone, PartialEq)]
pub enum Geometry {
    Point(DVec2),
    MultiPoint(Vec<DVec2>),
    LineString(Vec<DVec2>),
    MultiLineString(Vec<Vec<DVec2>>),
    Polygon(Vec<Vec<DVec2>>),
    MultiPolygon(Vec<Vec<Vec<DVec2>>>),
    GeometryCollection(Vec<Geometry>),
}

impl Geometry {
    /// GeoJSON-Typname der Geometrie.
    pub fn type_name(&self) -> &'static str {
        match self {
            Geometry::Point(_) => "Point",
            Geometry::MultiPoint(_) => "MultiPoint",
            Geometry::LineString(_) => "LineString",
            Geometry::MultiLineString(_) => "MultiLineString",
            Geometry::Polygon(_) => "Polygon",
            Geometry::MultiPolygon(_) => "MultiPolygon",
            Geometry::GeometryCollection(_) => "GeometryCollection",
        }
    }

    /// Ruft `visit` für jede Koordinate der Geometrie auf.
    pub fn for_each_coord(&self, visit: &mut impl FnMut(DVec2)) {
        match self {
            Geometry::Point(p) => visit(*p),
            Geometry::MultiPoint(points) | Geometry::LineString(points) => {
                points.iter().copied().for_each(&mut *visit)
            }
            Geometry::MultiLineString(lines) | Geometry::Polygon(lines) => lines
                .iter()
                .flatten()
                .copied()
                .for_each(&mut *visit),
            Geometry::MultiPolygon(polygons) => polygons
                .iter()
                .flatten()
                .flatten()
                .copied()
                .for_each(&mut *visit),
            Geometry::GeometryCollection(members) => {
                for member in members {
                    member.for_each_coord(visit);
                }
            }
        }
    }

    /// Ausdehnung aller Koordinaten. `None` für leere Geometrien.
    pub fn extent(&self) -> Option<Extent> {
        let mut extent: Option<Extent> = None;
        self.for_each_coord(&mut |p| {
            extent = Some(match extent {
                Some(e) => e.expanded_to(p),
                None => Extent::from_point(p),
            });
        });
        extent
    }

    /// Anzahl der Koordinaten.
    pub fn coord_count(&self) -> usize {
        let mut count = 0;
        self.for_each_coord(&mut |_| count += 1);
        count
    }

    /// Bildet jede Koordinate über `f` ab (z.B. Reprojektion).
    ///
    /// Bricht beim ersten Fehler ab.
    pub fn map_coords<F>(&self, f: &F) -> anyhow::Result<Geometry>
    where
        F: Fn(DVec2) -> anyhow::Result<DVec2>,
    {
        let map_line = |line: &Vec<DVec2>| -> anyhow::Result<Vec<DVec2>> {
            line.iter().map(|p| f(*p)).collect()
        };
        let map_rings = |rings: &Vec<Vec<DVec2>>| -> anyhow::Result<Vec<Vec<DVec2>>> {
            rings.iter().map(map_line).collect()
        };

        Ok(match self {
            Geometry::Point(p) => Geometry::Point(f(*p)?),
            Geometry::MultiPoint(points) => Geometry::MultiPoint(map_line(points)?),
            Geometry::LineString(points) => Geometry::LineString(map_line(points)?),
            Geometry::MultiLineString(lines) => Geometry::MultiLineString(map_rings(lines)?),
            Geometry::Polygon(rings) => Geometry::Polygon(map_rings(rings)?),
            Geometry::MultiPolygon(polygons) => Geometry::MultiPolygon(
                polygons
                    .iter()
                    .map(map_rings)
                    .collect::<anyhow::Result<_>>()?,
            ),
            Geometry::GeometryCollection(members) => Geometry::GeometryCollection(
                members
                    .iter()
                    .map(|m| m.map_coords(f))
                    .collect::<anyhow::Result<_>>()?,
            ),
        })
    }
}

/// Abstand eines Punkts zu einer Strecke.
pub fn distance_to_segment(p: DVec2, a: DVec2, b: DVec2) -> f64 {
    let ab = b - a;
    let len_sq = ab.length_squared();
    if len_sq <= f64::EPSILON {
        return p.distance(a);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    p.distance(a + ab * t)
}

/// Abstand eines Punkts zu einer offenen Linie.
pub fn distance_to_line(p: DVec2, line: &[DVec2]) -> f64 {
    match line {
        [] => f64::INFINITY,
        [single] => p.distance(*single),
        _ => line
            .windows(2)
            .map(|w| distance_to_segment(p, w[0], w[1]))
            .fold(f64::INFINITY, f64::min),
    }
}

/// Abstand eines Punkts zu einem (implizit geschlossenen) Ring.
pub fn distance_to_ring(p: DVec2, ring: &[DVec2]) -> f64 {
    let open = distance_to_line(p, ring);
    match (ring.first(), ring.last()) {
        (Some(first), Some(last)) if ring.len() > 2 => {
            open.min(distance_to_segment(p, *last, *first))
        }
        _ => open,
    }
}

/// Ray-Casting-Test für einen einzelnen Ring.
pub fn ring_contains(ring: &[DVec2], p: DVec2) -> bool {
    if ring.len() < 3 {
        return false;
    }
    let mut inside = false;
    let mut j = ring.len() - 1;
    for i in 0..ring.len() {
        let (a, b) = (ring[i], ring[j]);
        if (a.y > p.y) != (b.y > p.y) {
            let x_cross = (b.x - a.x) * (p.y - a.y) / (b.y - a.y) + a.x;
            if p.x < x_cross {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Punkt liegt im Polygon (Außenring, aber in keinem Loch).
pub fn polygon_contains(rings: &[Vec<DVec2>], p: DVec2) -> bool {
    let Some((outer, holes)) = rings.split_first() else {
        return false;
    };
    ring_contains(outer, p) && !holes.iter().any(|hole| ring_contains(hole, p))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn square(min: f64, max: f64) -> Vec<DVec2> {
        vec![
            DVec2::new(min, min),
            DVec2::new(max, min),
            DVec2::new(max, max),
            DVec2::new(min, max),
            DVec2::new(min, min),
        ]
    }

    #[test]
    fn test_extent_union_and_center() {
        let a = Extent::new(DVec2::new(0.0, 0.0), DVec2::new(2.0, 2.0));
        let b = Extent::new(DVec2::new(5.0, -1.0), DVec2::new(6.0, 1.0));
        let u = a.union(&b);
        assert_eq!(u, Extent::new(DVec2::new(0.0, -1.0), DVec2::new(6.0, 2.0)));
        assert_relative_eq!(u.center().x, 3.0);
        assert_relative_eq!(u.center().y, 0.5);
    }

    #[test]
    fn test_extent_degenerate_and_fittable() {
        let point = Extent::from_point(DVec2::new(1.0, 1.0));
        assert!(point.is_degenerate());
        assert!(!point.is_fittable());

        // Horizontale Linie: Höhe 0, Breite > 0 → nicht degeneriert
        let line = Extent::new(DVec2::new(0.0, 1.0), DVec2::new(4.0, 1.0));
        assert!(!line.is_degenerate());
        assert!(line.is_fittable());

        let infinite = Extent::new(DVec2::new(0.0, 0.0), DVec2::new(f64::INFINITY, 1.0));
        assert!(!infinite.is_fittable());
    }

    #[test]
    fn test_geometry_extent_multipolygon() {
        let geometry = Geometry::MultiPolygon(vec![vec![square(0.0, 1.0)], vec![square(3.0, 5.0)]]);
        let extent = geometry.extent().expect("Extent erwartet");
        assert_eq!(extent, Extent::new(DVec2::ZERO, DVec2::new(5.0, 5.0)));
        assert_eq!(geometry.coord_count(), 10);
    }

    #[test]
    fn test_empty_geometry_has_no_extent() {
        assert!(Geometry::LineString(Vec::new()).extent().is_none());
        assert!(Geometry::GeometryCollection(Vec::new()).extent().is_none());
    }

    #[test]
    fn test_map_coords_propagates_error() {
        let geometry = Geometry::LineString(vec![DVec2::new(1.0, 1.0), DVec2::new(-1.0, 1.0)]);
        let shifted = geometry
            .map_coords(&|p| Ok(p + DVec2::new(10.0, 0.0)))
            .expect("Verschiebung sollte gelingen");
        assert_eq!(
            shifted,
            Geometry::LineString(vec![DVec2::new(11.0, 1.0), DVec2::new(9.0, 1.0)])
        );

        let failing = geometry.map_coords(&|p| {
            if p.x < 0.0 {
                anyhow::bail!("negativ")
            }
            Ok(p)
        });
        assert!(failing.is_err());
    }

    #[test]
    fn test_polygon_contains_respects_holes() {
        let rings = vec![square(0.0, 10.0), square(4.0, 6.0)];
        assert!(polygon_contains(&rings, DVec2::new(2.0, 2.0)));
        assert!(!polygon_contains(&rings, DVec2::new(5.0, 5.0)));
        assert!(!polygon_contains(&rings, DVec2::new(11.0, 5.0)));
    }

    #[test]
    fn test_distance_to_ring_closes_ring() {
        // Ring ohne Wiederholung des Startpunkts
        let ring = vec![DVec2::new(0.0, 0.0), DVec2::new(4.0, 0.0), DVec2::new(4.0, 4.0)];
        // Nahe der impliziten Schlusskante (4,4)→(0,0)
        let d = distance_to_ring(DVec2::new(1.0, 2.0), &ring);
        assert_relative_eq!(d, (0.5f64).sqrt(), epsilon = 1e-9);
    }
}
