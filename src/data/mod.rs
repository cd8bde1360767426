//! Trip data: the city catalog, CSV loading, and month/weekday filtering.

pub mod city;
pub mod filter;
pub mod loader;
pub mod trip;

pub use city::City;
pub use filter::{DayFilter, MonthFilter, TripFilter};
pub use loader::{load_city, load_city_named, load_path, read_trips};
pub use trip::{Column, Dataset, Schema, TripRecord};
