use crate::core::driver::{Driver, DriverSkills};
use crate::core::race::SimConstants;
use crate::core::tireset::{TireCatalogue, TireCompound, Tireset};
use crate::error::{RaceSimError, RaceSimResult};
use helpers::general::clamp_pct;
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::warn;

/// (s) Standstill time for changing all four tires.
pub const T_PIT_TIRECHANGE: f64 = 2.5;
/// (s) Standstill time for refueling.
pub const T_PIT_REFUEL: f64 = 1.8;
/// (s) Time for entering and leaving the pits.
pub const T_PIT_DRIVE: f64 = 1.0;

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CarStatus {
    Racing,
    InPit,
    Reserve,
    Development,
}

impl Default for CarStatus {
    fn default() -> Self {
        CarStatus::Racing
    }
}

impl fmt::Display for CarStatus {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            CarStatus::Racing => "racing",
            CarStatus::InPit => "in pit",
            CarStatus::Reserve => "reserve",
            CarStatus::Development => "development",
        };
        write!(f, "{}", s)
    }
}

/// * `tire_wear` - (%) Tire wear, 0 is a fresh set
/// * `engine_wear` - (%) Engine wear, 0 is a fresh engine
/// * `fuel` - (%) Fuel level, 100 is a full tank
#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq)]
pub struct WearConfig {
    pub tire_wear: f64,
    pub engine_wear: f64,
    pub fuel: f64,
}

impl Default for WearConfig {
    fn default() -> Self {
        WearConfig {
            tire_wear: 0.0,
            engine_wear: 0.0,
            fuel: 100.0,
        }
    }
}

/// * `car_no` - Car number
/// * `team` - Team the car belongs to (only used for aggregating points)
/// * `manufacturer` - Manufacturer, e.g. Ferrari
/// * `model` - Model, e.g. SF21
/// * `compound` - Name of the mounted tire compound
/// * `max_speed` - (km/h) Rated top speed
/// * `initial_wear` - Wear and fuel levels at the start of the session
/// * `status` - Status of the car
/// * `driver_initials` - Initials of the driver assigned to the car (if any)
/// * `requirements` - Minimum driver skills required to drive the car
#[derive(Debug, Deserialize, Clone)]
pub struct CarPars {
    pub car_no: u32,
    #[serde(default)]
    pub team: Option<String>,
    #[serde(default)]
    pub manufacturer: String,
    #[serde(default)]
    pub model: String,
    pub compound: String,
    pub max_speed: f64,
    #[serde(default)]
    pub initial_wear: WearConfig,
    #[serde(default)]
    pub status: CarStatus,
    #[serde(default)]
    pub driver_initials: Option<String>,
    #[serde(default)]
    pub requirements: DriverSkills,
}

/// Conditions of a single lap that determine the wear of a car.
/// * `avg_speed` - (km/h) Average speed during the lap
/// * `temperature_c` - (°C) Track temperature
/// * `humidity_pct` - (%) Relative humidity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LapConditions {
    pub avg_speed: f64,
    pub temperature_c: f64,
    pub humidity_pct: f64,
}

/// Wear caused by one lap. All values are positive, `fuel` is the consumed amount.
#[derive(Debug, Serialize, Clone, Copy, PartialEq, Default)]
pub struct WearDelta {
    pub tire_wear: f64,
    pub engine_wear: f64,
    pub fuel: f64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct WearStats {
    pub tire_wear: f64,
    pub engine_wear: f64,
    pub fuel: f64,
    pub status: CarStatus,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct TireChange {
    pub compound_prev: String,
    pub compound_new: String,
    pub wear_reset: bool,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq)]
pub struct Refuel {
    pub fuel_prev: f64,
    pub fuel_new: f64,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PitOperation {
    TireChange,
    Refuel,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct PitStop {
    pub status: CarStatus,
    pub operations: Vec<PitOperation>,
    pub t_total: f64,
}

#[derive(Debug, Deserialize, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PartKind {
    Engine,
    Aerodynamics,
    Tires,
    Suspension,
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Part {
    pub kind: PartKind,
    pub specification: String,
}

#[derive(Debug)]
pub struct Car {
    pub car_no: u32,
    pub team: Option<String>,
    pub manufacturer: String,
    pub model: String,
    pub status: CarStatus,
    pub max_speed: f64,
    pub requirements: DriverSkills,
    pub driver: Option<Driver>,
    pub km_driven: f64,
    tireset: Tireset,
    engine_wear: f64,
    fuel: f64,
    new_parts: Vec<Part>,
}

impl Car {
    pub fn new(car_pars: &CarPars, tire_catalogue: &TireCatalogue) -> RaceSimResult<Car> {
        if !(car_pars.max_speed.is_finite() && car_pars.max_speed > 0.0) {
            return Err(RaceSimError::InvalidVehicleConfig {
                car_no: car_pars.car_no,
                reason: format!("maximum speed must be > 0km/h, but is {}", car_pars.max_speed),
            });
        }
        car_pars.requirements.validate()?;

        let mut car = Car {
            car_no: car_pars.car_no,
            team: car_pars.team.to_owned(),
            manufacturer: car_pars.manufacturer.to_owned(),
            model: car_pars.model.to_owned(),
            status: car_pars.status,
            max_speed: car_pars.max_speed,
            requirements: car_pars.requirements,
            driver: None,
            km_driven: 0.0,
            tireset: Tireset::new(tire_catalogue.get(&car_pars.compound)?),
            engine_wear: 0.0,
            fuel: 0.0,
            new_parts: Vec::new(),
        };
        car.set_initial_wear(&car_pars.initial_wear)?;

        Ok(car)
    }

    // ---------------------------------------------------------------------------------------------
    // GETTERS -------------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    pub fn compound(&self) -> &TireCompound {
        &self.tireset.compound
    }

    pub fn tire_wear(&self) -> f64 {
        self.tireset.wear
    }

    /// t_factor_tire_wear returns the lap time multiplier caused by the current tire wear.
    pub fn t_factor_tire_wear(&self) -> f64 {
        self.tireset.t_factor_wear()
    }

    pub fn engine_wear(&self) -> f64 {
        self.engine_wear
    }

    pub fn fuel(&self) -> f64 {
        self.fuel
    }

    pub fn new_parts(&self) -> &[Part] {
        &self.new_parts
    }

    pub fn driver_initials(&self) -> Option<&str> {
        self.driver.as_ref().map(|d| d.initials.as_str())
    }

    pub fn wear_stats(&self) -> WearStats {
        WearStats {
            tire_wear: self.tireset.wear,
            engine_wear: self.engine_wear,
            fuel: self.fuel,
            status: self.status,
        }
    }

    // ---------------------------------------------------------------------------------------------
    // DRIVER ASSIGNMENT ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// A car is available if nobody drives it and it is not in development.
    pub fn is_available(&self) -> bool {
        self.driver.is_none() && self.status != CarStatus::Development
    }

    /// assign_driver puts the driver into the car. Nothing is changed if the car is unavailable
    /// or the driver does not fulfill the car's requirements.
    pub fn assign_driver(&mut self, driver: Driver) -> RaceSimResult<()> {
        driver.check_can_drive(self)?;
        self.driver = Some(driver);
        Ok(())
    }

    pub fn remove_driver(&mut self) -> Option<Driver> {
        self.driver.take()
    }

    // ---------------------------------------------------------------------------------------------
    // WEAR AND FUEL -------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// set_initial_wear sets all wear and fuel levels at once. Nothing is changed if a value is
    /// outside [0, 100].
    pub fn set_initial_wear(&mut self, wear: &WearConfig) -> RaceSimResult<()> {
        for (name, val) in [
            ("tire wear", wear.tire_wear),
            ("engine wear", wear.engine_wear),
            ("fuel", wear.fuel),
        ] {
            if !(0.0..=100.0).contains(&val) {
                return Err(RaceSimError::InvalidConfig(format!(
                    "{} of car {} must be in [0, 100], but is {}",
                    name, self.car_no, val
                )));
            }
        }

        self.tireset.wear = wear.tire_wear;
        self.engine_wear = wear.engine_wear;
        self.fuel = wear.fuel;
        Ok(())
    }

    /// A car is in optimal condition if tire wear < 30%, engine wear < 40%, fuel > 20% and, if
    /// it is racing, a driver is assigned.
    pub fn is_in_optimal_condition(&self) -> bool {
        let driver_ok = self.status != CarStatus::Racing || self.driver.is_some();
        driver_ok && self.tireset.wear < 30.0 && self.engine_wear < 40.0 && self.fuel > 20.0
    }

    /// calc_wear returns the wear caused by one lap under the given conditions. The wear is
    /// proportional to the ratio between average speed and top speed.
    pub fn calc_wear(&self, conditions: &LapConditions, sim_consts: &SimConstants) -> WearDelta {
        let speed_ratio = conditions.avg_speed / self.max_speed;

        let mut tire_wear = speed_ratio * self.tireset.compound.degr_rate;
        if conditions.temperature_c > sim_consts.temp_hot_track {
            tire_wear *= sim_consts.f_tire_wear_hot_track;
        }

        let mut engine_wear = speed_ratio;
        if conditions.humidity_pct > sim_consts.humidity_high {
            engine_wear *= sim_consts.f_engine_wear_humid;
        }

        WearDelta {
            tire_wear,
            engine_wear,
            fuel: speed_ratio,
        }
    }

    /// drive_lap applies the wear of one lap. All levels stay within [0, 100].
    pub fn drive_lap(&mut self, wear_delta: &WearDelta, track_length_km: f64) {
        self.tireset.drive_lap(wear_delta.tire_wear);
        self.engine_wear = clamp_pct(self.engine_wear + wear_delta.engine_wear);

        let fuel_new = self.fuel - wear_delta.fuel;
        if fuel_new < 0.0 {
            warn!(car_no = self.car_no, "fuel tank is empty");
        }
        self.fuel = clamp_pct(fuel_new);

        self.km_driven += track_length_km;
    }

    // ---------------------------------------------------------------------------------------------
    // PIT STOPS AND DEVELOPMENT -------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// change_tires mounts a fresh set of the given compound.
    pub fn change_tires(
        &mut self,
        tire_catalogue: &TireCatalogue,
        compound: &str,
    ) -> RaceSimResult<TireChange> {
        let compound_new = tire_catalogue.get(compound)?;
        let compound_prev = self.tireset.compound.name.to_owned();

        self.tireset = Tireset::new(compound_new);

        Ok(TireChange {
            compound_prev,
            compound_new: self.tireset.compound.name.to_owned(),
            wear_reset: true,
        })
    }

    /// refuel adds fuel to the tank. The tank is capped at 100%.
    pub fn refuel(&mut self, amount: f64) -> RaceSimResult<Refuel> {
        if !(0.0..=100.0).contains(&amount) {
            return Err(RaceSimError::InvalidConfig(format!(
                "refuel amount must be in [0, 100], but is {}",
                amount
            )));
        }

        let fuel_prev = self.fuel;
        if fuel_prev + amount > 100.0 {
            warn!(car_no = self.car_no, "tank is full, surplus fuel is discarded");
        }
        self.fuel = clamp_pct(fuel_prev + amount);

        Ok(Refuel {
            fuel_prev,
            fuel_new: self.fuel,
        })
    }

    /// perform_pitstop changes the tires and refuels the car. The inputs are checked before
    /// anything is changed.
    pub fn perform_pitstop(
        &mut self,
        tire_catalogue: &TireCatalogue,
        compound: &str,
        fuel: f64,
    ) -> RaceSimResult<PitStop> {
        tire_catalogue.get(compound)?;
        if !(0.0..=100.0).contains(&fuel) {
            return Err(RaceSimError::InvalidConfig(format!(
                "refuel amount must be in [0, 100], but is {}",
                fuel
            )));
        }

        self.status = CarStatus::InPit;
        self.change_tires(tire_catalogue, compound)?;
        self.refuel(fuel)?;

        Ok(PitStop {
            status: self.status,
            operations: vec![PitOperation::TireChange, PitOperation::Refuel],
            t_total: T_PIT_TIRECHANGE + T_PIT_REFUEL + T_PIT_DRIVE,
        })
    }

    /// leave_pits sends a car that is in the pits back to the race.
    pub fn leave_pits(&mut self) {
        if self.status == CarStatus::InPit {
            self.status = CarStatus::Racing;
        }
    }

    /// install_part installs a new part and puts the car into development.
    pub fn install_part(&mut self, part: Part) -> CarStatus {
        self.new_parts.push(part);
        self.status = CarStatus::Development;
        self.status
    }
}
