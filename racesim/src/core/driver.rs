use crate::core::car::Car;
use crate::core::track::Weather;
use crate::error::{RaceSimError, RaceSimResult};
use helpers::general::clamp_pct;
use serde::{Deserialize, Serialize};

/// * `speed` - (0-100) Raw pace of the driver
/// * `consistency` - (0-100) Ability to repeat lap times
/// * `aggression` - (0-100) Willingness to attack
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Default)]
pub struct DriverSkills {
    pub speed: f64,
    pub consistency: f64,
    pub aggression: f64,
}

impl DriverSkills {
    pub fn new(speed: f64, consistency: f64, aggression: f64) -> RaceSimResult<DriverSkills> {
        let skills = DriverSkills {
            speed,
            consistency,
            aggression,
        };
        skills.validate()?;
        Ok(skills)
    }

    pub fn validate(&self) -> RaceSimResult<()> {
        for (name, val) in [
            ("speed", self.speed),
            ("consistency", self.consistency),
            ("aggression", self.aggression),
        ] {
            if !(0.0..=100.0).contains(&val) {
                return Err(RaceSimError::InvalidConfig(format!(
                    "skill {} must be in [0, 100], but is {}",
                    name, val
                )));
            }
        }
        Ok(())
    }

    /// overall_rating returns the mean of the three skills.
    pub fn overall_rating(&self) -> f64 {
        (self.speed + self.consistency + self.aggression) / 3.0
    }

    /// laptime_rating returns the rating in [0, 1] that is used by the lap time model. Only
    /// speed and consistency contribute.
    pub fn laptime_rating(&self) -> f64 {
        ((self.speed + self.consistency) / 200.0).clamp(0.0, 1.0)
    }

    fn meets(&self, requirements: &DriverSkills) -> bool {
        self.speed >= requirements.speed
            && self.consistency >= requirements.consistency
            && self.aggression >= requirements.aggression
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DrivingStyle {
    Aggressive,
    Conservative,
}

impl Default for DrivingStyle {
    fn default() -> Self {
        DrivingStyle::Aggressive
    }
}

/// * `initials` - Driver initials, e.g. LEC
/// * `name` - Driver name, e.g. Charles Leclerc
/// * `nationality` - Driver nationality
/// * `skills` - Skill attributes in [0, 100]
#[derive(Debug, Deserialize, Clone)]
pub struct DriverPars {
    pub initials: String,
    pub name: String,
    #[serde(default)]
    pub nationality: String,
    pub skills: DriverSkills,
    #[serde(default)]
    pub style: DrivingStyle,
}

/// Skill values of a driver after adjusting them to the current conditions.
#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Performance {
    pub speed: f64,
    pub consistency: f64,
    pub aggression: f64,
    pub total: f64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct StyleAdaptation {
    pub style_prev: DrivingStyle,
    pub style_new: DrivingStyle,
    pub delta_aggression: f64,
    pub delta_consistency: f64,
}

/// Results credited to a driver.
/// * `races` - Number of classified races
/// * `wins` - Number of wins
/// * `podiums` - Number of top 3 finishes (wins included)
/// * `fastest_laps` - Number of fastest race laps
/// * `points` - Total points
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq, Default)]
pub struct DriverStats {
    pub races: u32,
    pub wins: u32,
    pub podiums: u32,
    pub fastest_laps: u32,
    pub points: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Driver {
    pub initials: String,
    pub name: String,
    pub nationality: String,
    pub skills: DriverSkills,
    pub style: DrivingStyle,
    stats: DriverStats,
}

impl Driver {
    pub fn new(driver_pars: &DriverPars) -> RaceSimResult<Driver> {
        driver_pars.skills.validate()?;

        if driver_pars.initials.trim().is_empty() {
            return Err(RaceSimError::InvalidConfig(format!(
                "driver {} has no initials",
                driver_pars.name
            )));
        }

        Ok(Driver {
            initials: driver_pars.initials.to_owned(),
            name: driver_pars.name.to_owned(),
            nationality: driver_pars.nationality.to_owned(),
            skills: driver_pars.skills,
            style: driver_pars.style,
            stats: DriverStats::default(),
        })
    }

    pub fn stats(&self) -> DriverStats {
        self.stats
    }

    /// record_result credits a finishing position and the points scored with it.
    pub fn record_result(&mut self, position: u32, points: u32) {
        self.stats.races += 1;
        self.stats.points += points;
        if position == 1 {
            self.stats.wins += 1;
        }
        if (1..=3).contains(&position) {
            self.stats.podiums += 1;
        }
    }

    pub fn record_fastest_lap(&mut self) {
        self.stats.fastest_laps += 1;
    }

    /// set_skills replaces all skills at once. Nothing is changed if a value is out of range.
    pub fn set_skills(&mut self, skills: DriverSkills) -> RaceSimResult<f64> {
        skills.validate()?;
        self.skills = skills;
        Ok(self.skills.overall_rating())
    }

    /// calc_performance returns the skills adjusted to the given conditions without changing the
    /// driver.
    pub fn calc_performance(&self, weather: &Weather) -> Performance {
        let mut speed = self.skills.speed;
        let mut consistency = self.skills.consistency;
        let mut aggression = self.skills.aggression;

        if weather.is_dry() {
            speed += 2.0;
            aggression += 2.0;
        } else {
            speed -= 5.0;
            consistency += 5.0;
            aggression -= 5.0;
        }

        if weather.temperature_c > 30.0 {
            consistency -= 3.0;
        }
        if weather.humidity_pct > 70.0 {
            aggression -= 2.0;
        }

        let speed = clamp_pct(speed);
        let consistency = clamp_pct(consistency);
        let aggression = clamp_pct(aggression);

        Performance {
            speed,
            consistency,
            aggression,
            total: (speed + consistency + aggression) / 3.0,
        }
    }

    /// adapt_style switches the driver to a conservative style on a damp or wet track and back to
    /// an aggressive style on a dry track. The skills are adjusted accordingly and stay in
    /// [0, 100].
    pub fn adapt_style(&mut self, weather: &Weather) -> StyleAdaptation {
        let style_prev = self.style;

        let (style_new, delta_aggression, delta_consistency) = if weather.is_dry() {
            (DrivingStyle::Aggressive, 10.0, -5.0)
        } else {
            (DrivingStyle::Conservative, -20.0, 15.0)
        };

        self.style = style_new;
        self.skills.aggression = clamp_pct(self.skills.aggression + delta_aggression);
        self.skills.consistency = clamp_pct(self.skills.consistency + delta_consistency);

        StyleAdaptation {
            style_prev,
            style_new,
            delta_aggression,
            delta_consistency,
        }
    }

    /// can_drive checks if the car is available and if the driver's skills fulfill the car's
    /// requirements.
    pub fn can_drive(&self, car: &Car) -> bool {
        self.check_can_drive(car).is_ok()
    }

    pub(crate) fn check_can_drive(&self, car: &Car) -> RaceSimResult<()> {
        if !car.is_available() {
            return Err(self.incompatible(car, "car is not available"));
        }
        if !self.skills.meets(&car.requirements) {
            return Err(self.incompatible(car, "skills are below the car's requirements"));
        }
        Ok(())
    }

    fn incompatible(&self, car: &Car, reason: &str) -> RaceSimError {
        RaceSimError::IncompatibleAssignment {
            driver: self.initials.to_owned(),
            car_no: car.car_no,
            reason: reason.to_owned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::track::WeatherCondition;
    use approx::assert_abs_diff_eq;

    fn driver(speed: f64, consistency: f64, aggression: f64) -> Driver {
        Driver::new(&DriverPars {
            initials: "HAM".to_owned(),
            name: "Lewis Hamilton".to_owned(),
            nationality: "British".to_owned(),
            skills: DriverSkills::new(speed, consistency, aggression).unwrap(),
            style: DrivingStyle::Aggressive,
        })
        .unwrap()
    }

    #[test]
    fn skills_out_of_range_are_rejected() {
        assert!(DriverSkills::new(101.0, 50.0, 50.0).is_err());
        assert!(DriverSkills::new(50.0, -1.0, 50.0).is_err());
        assert!(DriverSkills::new(50.0, 50.0, f64::NAN).is_err());

        let mut d = driver(95.0, 90.0, 85.0);
        let bad = DriverSkills {
            speed: 120.0,
            ..d.skills
        };
        assert!(d.set_skills(bad).is_err());
        assert_abs_diff_eq!(d.skills.speed, 95.0);
    }

    #[test]
    fn ratings() {
        let skills = DriverSkills::new(95.0, 90.0, 85.0).unwrap();
        assert_abs_diff_eq!(skills.overall_rating(), 90.0);
        assert_abs_diff_eq!(skills.laptime_rating(), 0.925);
    }

    #[test]
    fn performance_in_rain_and_heat() {
        let d = driver(95.0, 90.0, 85.0);

        let dry = Weather::new(WeatherCondition::Dry, 25.0, 40.0).unwrap();
        let p = d.calc_performance(&dry);
        assert_abs_diff_eq!(p.speed, 97.0);
        assert_abs_diff_eq!(p.consistency, 90.0);
        assert_abs_diff_eq!(p.aggression, 87.0);

        let wet_hot = Weather::new(WeatherCondition::Wet, 32.0, 80.0).unwrap();
        let p = d.calc_performance(&wet_hot);
        assert_abs_diff_eq!(p.speed, 90.0);
        assert_abs_diff_eq!(p.consistency, 92.0);
        assert_abs_diff_eq!(p.aggression, 78.0);
        assert_abs_diff_eq!(p.total, 260.0 / 3.0);

        // the driver itself is untouched
        assert_abs_diff_eq!(d.skills.speed, 95.0);
    }

    #[test]
    fn results_are_credited() {
        let mut d = driver(95.0, 90.0, 85.0);
        assert_eq!(d.stats(), DriverStats::default());

        d.record_result(1, 25);
        d.record_fastest_lap();
        d.record_result(3, 15);
        d.record_result(11, 0);

        assert_eq!(
            d.stats(),
            DriverStats {
                races: 3,
                wins: 1,
                podiums: 2,
                fastest_laps: 1,
                points: 40,
            }
        );
    }

    #[test]
    fn style_adaptation_is_clamped() {
        let mut d = driver(80.0, 95.0, 10.0);
        let wet = Weather::new(WeatherCondition::Wet, 18.0, 85.0).unwrap();

        let adaptation = d.adapt_style(&wet);
        assert_eq!(adaptation.style_prev, DrivingStyle::Aggressive);
        assert_eq!(adaptation.style_new, DrivingStyle::Conservative);
        assert_abs_diff_eq!(d.skills.aggression, 0.0);
        assert_abs_diff_eq!(d.skills.consistency, 100.0);

        let dry = Weather::new(WeatherCondition::Dry, 25.0, 40.0).unwrap();
        let adaptation = d.adapt_style(&dry);
        assert_eq!(adaptation.style_new, DrivingStyle::Aggressive);
        assert_abs_diff_eq!(d.skills.aggression, 10.0);
        assert_abs_diff_eq!(d.skills.consistency, 95.0);
    }
}
