use std::fmt;
use std::str::FromStr;

use crate::error::InvalidCityError;

/// The cities with bike-share data available.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum City {
    Chicago,
    NewYorkCity,
    Washington,
}

impl City {
    pub const ALL: [City; 3] = [City::Chicago, City::NewYorkCity, City::Washington];

    pub fn name(self) -> &'static str {
        match self {
            City::Chicago => "Chicago",
            City::NewYorkCity => "New York City",
            City::Washington => "Washington",
        }
    }

    /// File the city's trips are read from when no override is configured.
    pub fn default_file(self) -> &'static str {
        match self {
            City::Chicago => "chicago.csv",
            City::NewYorkCity => "new_york_city.csv",
            City::Washington => "washington.csv",
        }
    }
}

impl fmt::Display for City {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for City {
    type Err = InvalidCityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        City::ALL
            .into_iter()
            .find(|city| city.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvalidCityError(wanted.to_string()))
    }
}
