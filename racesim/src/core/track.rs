use crate::error::{RaceSimError, RaceSimResult};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum WeatherCondition {
    Dry,
    Damp,
    Wet,
}

impl WeatherCondition {
    /// (-) Lap time multiplier caused by the track surface condition.
    pub fn factor(self) -> f64 {
        match self {
            WeatherCondition::Dry => 1.0,
            WeatherCondition::Damp => 1.1,
            WeatherCondition::Wet => 1.15,
        }
    }
}

impl fmt::Display for WeatherCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            WeatherCondition::Dry => "dry",
            WeatherCondition::Damp => "damp",
            WeatherCondition::Wet => "wet",
        };
        write!(f, "{}", s)
    }
}

/// * `condition` - Track surface condition
/// * `temperature_c` - (°C) Track temperature
/// * `humidity_pct` - (%) Relative humidity
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Weather {
    pub condition: WeatherCondition,
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

impl Weather {
    pub fn new(
        condition: WeatherCondition,
        temperature_c: f64,
        humidity_pct: f64,
    ) -> RaceSimResult<Weather> {
        let weather = Weather {
            condition,
            temperature_c,
            humidity_pct,
        };
        weather.validate()?;
        Ok(weather)
    }

    pub fn validate(&self) -> RaceSimResult<()> {
        if !(-30.0..=70.0).contains(&self.temperature_c) {
            return Err(RaceSimError::InvalidConfig(format!(
                "track temperature must be in [-30, 70]°C, but is {}",
                self.temperature_c
            )));
        }
        if !(0.0..=100.0).contains(&self.humidity_pct) {
            return Err(RaceSimError::InvalidConfig(format!(
                "humidity must be in [0, 100]%, but is {}",
                self.humidity_pct
            )));
        }
        Ok(())
    }

    pub fn factor(&self) -> f64 {
        self.condition.factor()
    }

    pub fn is_dry(&self) -> bool {
        matches!(self.condition, WeatherCondition::Dry)
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum Difficulty {
    Low,
    Medium,
    High,
}

impl Difficulty {
    fn score(self) -> f64 {
        match self {
            Difficulty::Low => 1.0,
            Difficulty::Medium => 2.0,
            Difficulty::High => 3.0,
        }
    }

    fn from_avg_score(avg: f64) -> Difficulty {
        if avg <= 1.5 {
            Difficulty::Low
        } else if avg <= 2.5 {
            Difficulty::Medium
        } else {
            Difficulty::High
        }
    }
}

/// * `name` - Corner name, e.g. Parabolica
/// * `vel_max` - (km/h) Maximum velocity through the corner
/// * `difficulty` - Difficulty rating of the corner
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Corner {
    pub name: String,
    pub vel_max: f64,
    pub difficulty: Difficulty,
}

/// * `name` - Name of the DRS zone
/// * `length_km` - (km) Length of the DRS zone
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct DrsZone {
    pub name: String,
    pub length_km: f64,
}

/// * `name` - Track name
/// * `location` - Location of the track, e.g. Monza, Italy
/// * `length_km` - (km) Length of the track
/// * `corners` - Corners of the track
/// * `drs_zones` - DRS zones of the track
/// * `weather` - Current weather at the track (must be set before a race can start)
#[derive(Debug, Deserialize, Clone)]
pub struct TrackPars {
    pub name: String,
    #[serde(default)]
    pub location: String,
    pub length_km: f64,
    #[serde(default)]
    pub corners: Vec<Corner>,
    #[serde(default)]
    pub drs_zones: Vec<DrsZone>,
    #[serde(default)]
    pub weather: Option<Weather>,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LapRecordEntry {
    pub laptime: f64,
    pub driver_initials: String,
    pub date: NaiveDate,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TrackStats {
    pub no_corners: usize,
    pub no_drs_zones: usize,
    pub lap_record: Option<LapRecordEntry>,
    pub weather: Option<Weather>,
    pub avg_difficulty: Option<Difficulty>,
}

#[derive(Debug, Clone)]
pub struct Track {
    pub name: String,
    pub location: String,
    pub length_km: f64,
    pub corners: Vec<Corner>,
    pub drs_zones: Vec<DrsZone>,
    pub weather: Option<Weather>,
    lap_record: Option<LapRecordEntry>,
}

impl Track {
    pub fn new(track_pars: &TrackPars) -> RaceSimResult<Track> {
        if !(track_pars.length_km.is_finite() && track_pars.length_km > 0.0) {
            return Err(RaceSimError::InvalidConfig(format!(
                "length of track {} must be > 0km, but is {}",
                track_pars.name, track_pars.length_km
            )));
        }

        if let Some(corner) = track_pars.corners.iter().find(|c| !(c.vel_max > 0.0)) {
            return Err(RaceSimError::InvalidConfig(format!(
                "maximum velocity of corner {} must be > 0km/h",
                corner.name
            )));
        }

        if let Some(zone) = track_pars.drs_zones.iter().find(|z| !(z.length_km > 0.0)) {
            return Err(RaceSimError::InvalidConfig(format!(
                "length of DRS zone {} must be > 0km",
                zone.name
            )));
        }

        if let Some(weather) = &track_pars.weather {
            weather.validate()?;
        }

        Ok(Track {
            name: track_pars.name.to_owned(),
            location: track_pars.location.to_owned(),
            length_km: track_pars.length_km,
            corners: track_pars.corners.to_owned(),
            drs_zones: track_pars.drs_zones.to_owned(),
            weather: track_pars.weather.to_owned(),
            lap_record: None,
        })
    }

    /// The method checks the parameters that cannot be enforced by the constructor alone.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty() && self.length_km.is_finite() && self.length_km > 0.0
    }

    pub fn set_weather(&mut self, weather: Weather) -> RaceSimResult<&Weather> {
        weather.validate()?;
        Ok(self.weather.insert(weather))
    }

    /// add_corner appends a corner and returns its (1-based) corner number.
    pub fn add_corner(&mut self, corner: Corner) -> RaceSimResult<usize> {
        if !(corner.vel_max > 0.0) {
            return Err(RaceSimError::InvalidConfig(format!(
                "maximum velocity of corner {} must be > 0km/h",
                corner.name
            )));
        }
        self.corners.push(corner);
        Ok(self.corners.len())
    }

    /// add_drs_zone appends a DRS zone and returns its (1-based) zone number.
    pub fn add_drs_zone(&mut self, drs_zone: DrsZone) -> RaceSimResult<usize> {
        if !(drs_zone.length_km > 0.0) {
            return Err(RaceSimError::InvalidConfig(format!(
                "length of DRS zone {} must be > 0km",
                drs_zone.name
            )));
        }
        self.drs_zones.push(drs_zone);
        Ok(self.drs_zones.len())
    }

    /// avg_difficulty returns the average corner difficulty, None for a track without corners.
    pub fn avg_difficulty(&self) -> Option<Difficulty> {
        if self.corners.is_empty() {
            return None;
        }
        let sum: f64 = self.corners.iter().map(|c| c.difficulty.score()).sum();
        Some(Difficulty::from_avg_score(sum / self.corners.len() as f64))
    }

    /// A track is challenging if it has more than 10 corners, at least two DRS zones, is longer
    /// than 5km and its corners are on average highly difficult.
    pub fn is_challenging(&self) -> bool {
        self.corners.len() > 10
            && self.drs_zones.len() >= 2
            && self.length_km > 5.0
            && self.avg_difficulty() == Some(Difficulty::High)
    }

    pub fn lap_record(&self) -> Option<&LapRecordEntry> {
        self.lap_record.as_ref()
    }

    /// update_lap_record stores the lap time if it strictly improves the current record. Returns
    /// true if a new record was set.
    pub fn update_lap_record(
        &mut self,
        laptime: f64,
        driver_initials: &str,
        date: NaiveDate,
    ) -> bool {
        let is_new_record = match &self.lap_record {
            Some(record) => laptime < record.laptime,
            None => laptime.is_finite() && laptime > 0.0,
        };

        if is_new_record {
            self.lap_record = Some(LapRecordEntry {
                laptime,
                driver_initials: driver_initials.to_owned(),
                date,
            });
        }

        is_new_record
    }

    pub fn stats(&self) -> TrackStats {
        TrackStats {
            no_corners: self.corners.len(),
            no_drs_zones: self.drs_zones.len(),
            lap_record: self.lap_record.to_owned(),
            weather: self.weather.to_owned(),
            avg_difficulty: self.avg_difficulty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn monza_pars() -> TrackPars {
        TrackPars {
            name: "Monza".to_owned(),
            location: "Italy".to_owned(),
            length_km: 5.793,
            corners: vec![],
            drs_zones: vec![],
            weather: None,
        }
    }

    fn corner(difficulty: Difficulty) -> Corner {
        Corner {
            name: "Curva".to_owned(),
            vel_max: 120.0,
            difficulty,
        }
    }

    #[test]
    fn weather_factors() {
        assert_eq!(WeatherCondition::Dry.factor(), 1.0);
        assert_eq!(WeatherCondition::Damp.factor(), 1.1);
        assert_eq!(WeatherCondition::Wet.factor(), 1.15);
    }

    #[test]
    fn malformed_track_is_rejected() {
        let mut pars = monza_pars();
        pars.length_km = 0.0;
        assert!(matches!(Track::new(&pars), Err(RaceSimError::InvalidConfig(_))));

        let mut pars = monza_pars();
        pars.weather = Some(Weather {
            condition: WeatherCondition::Dry,
            temperature_c: 25.0,
            humidity_pct: 140.0,
        });
        assert!(Track::new(&pars).is_err());
    }

    #[test]
    fn challenging_track() {
        let mut track = Track::new(&monza_pars()).unwrap();
        assert_eq!(track.avg_difficulty(), None);
        assert!(!track.is_challenging());

        for _ in 0..11 {
            track.add_corner(corner(Difficulty::High)).unwrap();
        }
        track
            .add_drs_zone(DrsZone {
                name: "Main straight".to_owned(),
                length_km: 1.0,
            })
            .unwrap();
        assert!(!track.is_challenging());

        assert_eq!(
            track
                .add_drs_zone(DrsZone {
                    name: "Parabolica".to_owned(),
                    length_km: 0.8,
                })
                .unwrap(),
            2
        );
        assert!(track.is_challenging());

        // (33 + 3) / 14 = 2.57 is still high
        for _ in 0..3 {
            track.add_corner(corner(Difficulty::Low)).unwrap();
        }
        assert_eq!(track.avg_difficulty(), Some(Difficulty::High));
        assert!(track.is_challenging());

        // (33 + 6) / 17 = 2.29
        for _ in 0..3 {
            track.add_corner(corner(Difficulty::Low)).unwrap();
        }
        assert_eq!(track.avg_difficulty(), Some(Difficulty::Medium));
        assert!(!track.is_challenging());
    }

    #[test]
    fn lap_record_requires_strict_improvement() {
        let mut track = Track::new(&monza_pars()).unwrap();
        let date_2004 = NaiveDate::from_ymd_opt(2004, 9, 12).unwrap();
        let date_2024 = NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();

        assert!(track.update_lap_record(81.046, "BAR", date_2004));
        assert!(!track.update_lap_record(81.046, "HAM", date_2024));
        assert_eq!(track.lap_record().unwrap().date, date_2004);

        assert!(track.update_lap_record(80.9, "LEC", date_2024));
        assert_eq!(track.lap_record().unwrap().driver_initials, "LEC");
        assert_eq!(track.lap_record().unwrap().date, date_2024);
        assert_eq!(track.stats().lap_record.unwrap().laptime, 80.9);
    }

    #[test]
    fn set_weather_validates() {
        let mut track = Track::new(&monza_pars()).unwrap();
        let wet = Weather::new(WeatherCondition::Wet, 18.0, 85.0).unwrap();
        assert_eq!(track.set_weather(wet).unwrap().condition, WeatherCondition::Wet);
        assert!(Weather::new(WeatherCondition::Dry, 120.0, 40.0).is_err());
    }
}
