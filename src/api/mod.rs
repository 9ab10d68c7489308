pub mod ephemeris;
