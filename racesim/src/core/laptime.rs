use crate::core::car::Car;
use crate::core::driver::DriverSkills;
use crate::core::track::Weather;
use crate::error::{RaceSimError, RaceSimResult};

/// (-) Maximum relative lap time reduction of a perfectly rated driver.
pub const DRIVER_GAIN_MAX: f64 = 0.1;

/// calc_laptime returns the lap time (s) of a car driven with the given skills on a track of the
/// given length, considering the car's current tire wear.
///
/// `laptime = base * f_driver * grip * f_weather * f_tire_wear` with
/// * `base = length / max_speed * 3600`
/// * `f_driver = 1 - rating * 0.1`, `rating = (speed + consistency) / 200` clamped to [0, 1]
/// * `f_tire_wear = 1 + tire_wear * 0.001`
pub fn calc_laptime(
    car: &Car,
    skills: &DriverSkills,
    track_length_km: f64,
    weather: &Weather,
) -> RaceSimResult<f64> {
    let f_tire_wear = car.t_factor_tire_wear();
    calc_laptime_with_tire_factor(car, skills, track_length_km, weather, f_tire_wear)
}

/// calc_laptime_fresh returns the lap time the car would achieve with unworn tires.
pub fn calc_laptime_fresh(
    car: &Car,
    skills: &DriverSkills,
    track_length_km: f64,
    weather: &Weather,
) -> RaceSimResult<f64> {
    calc_laptime_with_tire_factor(car, skills, track_length_km, weather, 1.0)
}

/// calc_driven_laptime returns the lap time of a car with its assigned driver. A car without a
/// driver cannot set a lap time.
pub fn calc_driven_laptime(
    car: &Car,
    track_length_km: f64,
    weather: &Weather,
) -> RaceSimResult<f64> {
    let driver = car.driver.as_ref().ok_or_else(|| {
        RaceSimError::InvalidRaceSetup(format!("car {} has no driver assigned", car.car_no))
    })?;
    calc_laptime(car, &driver.skills, track_length_km, weather)
}

fn calc_laptime_with_tire_factor(
    car: &Car,
    skills: &DriverSkills,
    track_length_km: f64,
    weather: &Weather,
    f_tire_wear: f64,
) -> RaceSimResult<f64> {
    if !(car.max_speed.is_finite() && car.max_speed > 0.0) {
        return Err(RaceSimError::InvalidVehicleConfig {
            car_no: car.car_no,
            reason: format!("maximum speed must be > 0km/h, but is {}", car.max_speed),
        });
    }

    let grip = car.compound().grip_factor;
    if !(grip.is_finite() && grip >= 0.0) {
        return Err(RaceSimError::InvalidTireCompound(format!(
            "grip factor of {} must be a non-negative number, but is {}",
            car.compound().name,
            grip
        )));
    }

    let t_base = calc_base_laptime(track_length_km, car.max_speed);
    let f_driver = 1.0 - skills.laptime_rating() * DRIVER_GAIN_MAX;

    Ok(t_base * f_driver * grip * weather.factor() * f_tire_wear)
}

/// calc_base_laptime returns the time (s) required to cover the track at top speed.
pub fn calc_base_laptime(track_length_km: f64, max_speed: f64) -> f64 {
    track_length_km / max_speed * 3600.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::car::{CarPars, CarStatus, WearConfig};
    use crate::core::driver::{Driver, DriverPars, DrivingStyle};
    use crate::core::tireset::{TireCatalogue, TireConfig};
    use crate::core::track::WeatherCondition;
    use approx::assert_abs_diff_eq;
    use helpers::general::format_laptime;

    const MONZA_KM: f64 = 5.793;

    fn car(compound: &str, max_speed: f64, tire_wear: f64) -> Car {
        let pars = CarPars {
            car_no: 16,
            team: None,
            manufacturer: "Ferrari".to_owned(),
            model: "SF21".to_owned(),
            compound: compound.to_owned(),
            max_speed,
            initial_wear: WearConfig {
                tire_wear,
                engine_wear: 0.0,
                fuel: 100.0,
            },
            status: CarStatus::Racing,
            driver_initials: None,
            requirements: Default::default(),
        };
        Car::new(&pars, &TireCatalogue::new(&TireConfig::default()).unwrap()).unwrap()
    }

    fn dry() -> Weather {
        Weather::new(WeatherCondition::Dry, 25.0, 50.0).unwrap()
    }

    /// Skills with a lap time rating of 0.8.
    fn skills_08() -> DriverSkills {
        DriverSkills::new(80.0, 80.0, 50.0).unwrap()
    }

    #[test]
    fn reference_lap() {
        let laptime = calc_laptime(&car("medium", 340.0, 0.0), &skills_08(), MONZA_KM, &dry())
            .unwrap();

        assert_abs_diff_eq!(calc_base_laptime(MONZA_KM, 340.0), 61.337647, epsilon = 1e-6);
        assert_abs_diff_eq!(laptime, 61.337647 * 0.92, epsilon = 1e-6);
        assert_eq!(format_laptime(laptime), "0:56.431");
    }

    #[test]
    fn factors_multiply() {
        let damp = Weather::new(WeatherCondition::Damp, 25.0, 50.0).unwrap();
        let wet = Weather::new(WeatherCondition::Wet, 25.0, 50.0).unwrap();
        let base = calc_laptime(&car("medium", 340.0, 0.0), &skills_08(), MONZA_KM, &dry())
            .unwrap();

        let t_damp = calc_laptime(&car("medium", 340.0, 0.0), &skills_08(), MONZA_KM, &damp)
            .unwrap();
        assert_abs_diff_eq!(t_damp, base * 1.1, epsilon = 1e-9);

        let t_wet_worn = calc_laptime(&car("medium", 340.0, 50.0), &skills_08(), MONZA_KM, &wet)
            .unwrap();
        assert_abs_diff_eq!(t_wet_worn, base * 1.15 * 1.05, epsilon = 1e-9);

        let t_soft = calc_laptime(&car("soft", 340.0, 0.0), &skills_08(), MONZA_KM, &dry())
            .unwrap();
        assert_abs_diff_eq!(t_soft, base * 0.98, epsilon = 1e-9);
    }

    #[test]
    fn fresh_laptime_ignores_wear() {
        let worn = car("medium", 340.0, 80.0);
        let fresh = calc_laptime_fresh(&worn, &skills_08(), MONZA_KM, &dry()).unwrap();
        let actual = calc_laptime(&worn, &skills_08(), MONZA_KM, &dry()).unwrap();
        assert_abs_diff_eq!(worn.t_factor_tire_wear(), 1.08, epsilon = 1e-12);
        assert_abs_diff_eq!(actual, fresh * 1.08, epsilon = 1e-9);
    }

    #[test]
    fn better_driver_is_faster() {
        let c = car("medium", 340.0, 0.0);
        let slow = DriverSkills::new(0.0, 0.0, 0.0).unwrap();
        let fast = DriverSkills::new(100.0, 100.0, 0.0).unwrap();

        let t_slow = calc_laptime(&c, &slow, MONZA_KM, &dry()).unwrap();
        let t_fast = calc_laptime(&c, &fast, MONZA_KM, &dry()).unwrap();
        assert_abs_diff_eq!(t_fast, t_slow * 0.9, epsilon = 1e-9);
    }

    #[test]
    fn invalid_max_speed_is_rejected() {
        let mut c = car("medium", 340.0, 0.0);
        c.max_speed = 0.0;
        assert!(matches!(
            calc_laptime(&c, &skills_08(), MONZA_KM, &dry()),
            Err(RaceSimError::InvalidVehicleConfig { car_no: 16, .. })
        ));
    }

    #[test]
    fn driverless_car_has_no_laptime() {
        let mut c = car("medium", 340.0, 0.0);
        assert!(matches!(
            calc_driven_laptime(&c, MONZA_KM, &dry()),
            Err(RaceSimError::InvalidRaceSetup(_))
        ));

        let driver = Driver::new(&DriverPars {
            initials: "LEC".to_owned(),
            name: "Charles Leclerc".to_owned(),
            nationality: String::new(),
            skills: skills_08(),
            style: DrivingStyle::Aggressive,
        })
        .unwrap();
        c.assign_driver(driver).unwrap();
        assert_abs_diff_eq!(
            calc_driven_laptime(&c, MONZA_KM, &dry()).unwrap(),
            61.337647 * 0.92,
            epsilon = 1e-6
        );
    }
}
