use std::{fmt, ops::Deref};

use crate::geometry;

/// A city position. Integer source coordinates are carried as `f64`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct City {
    pub x: f64,
    pub y: f64,
}

impl City {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Rounded Euclidean distance, see [`geometry::distance`].
    pub fn dist(self, rhs: &Self) -> i64 {
        geometry::distance(self, *rhs)
    }

    pub(crate) fn is_valid(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut b1 = ryu::Buffer::new();
        let mut b2 = ryu::Buffer::new();
        write!(f, "{} {}", b1.format(self.x), b2.format(self.y))
    }
}

/// Read-only, position-indexed cities. The index is the city's identity.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct CitySet {
    cities: Vec<City>,
}

impl CitySet {
    pub fn new(cities: Vec<City>) -> Self {
        Self { cities }
    }

    pub fn from_coords(coords: &[(f64, f64)]) -> Self {
        coords.iter().map(|&(x, y)| City::new(x, y)).collect()
    }

    /// Rounded distance between the cities at indices `a` and `b`.
    pub fn distance(&self, a: usize, b: usize) -> i64 {
        geometry::distance(self.cities[a], self.cities[b])
    }

    pub fn as_slice(&self) -> &[City] {
        &self.cities
    }
}

impl Deref for CitySet {
    type Target = [City];

    fn deref(&self) -> &Self::Target {
        &self.cities
    }
}

impl FromIterator<City> for CitySet {
    fn from_iter<I: IntoIterator<Item = City>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl From<Vec<City>> for CitySet {
    fn from(cities: Vec<City>) -> Self {
        Self::new(cities)
    }
}
