use crate::core::car::{Car, CarPars, CarStatus, LapConditions, WearDelta};
use crate::core::driver::{Driver, DriverPars};
use crate::core::laptime::{calc_driven_laptime, calc_laptime_fresh};
use crate::core::qualifying::{run_qualifying, QualifyingResult};
use crate::core::tireset::{TireCatalogue, TireConfig};
use crate::core::track::{Track, TrackPars, Weather};
use crate::error::{RaceSimError, RaceSimResult};
use crate::post::race_result::{CarDriverPair, RaceResult};
use chrono::NaiveDate;
use helpers::general::{argmin, argsort, format_gap, format_laptime, SortOrder};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap, HashSet};
use std::fmt;
use tracing::{debug, info};

/// Constants of the race model. Every value can be overridden in the parameter file.
///
/// * `t_race_target` - (s) Target race duration
/// * `fuel_capacity` - (kg) Fuel allowed for the race distance
/// * `b_fuel_per_lap` - (kg/lap) Fuel burn per lap on a track of reference length
/// * `tire_allowance_laps` - (laps) Tire allowance on a track of reference length
/// * `length_ref` - (km) Reference track length
/// * `avg_speed_ratio` - (-) Average lap speed as a fraction of the car's top speed. This is a
/// heuristic, not a physically derived value.
/// * `temp_hot_track` - (°C) Track temperature above which tires wear faster
/// * `f_tire_wear_hot_track` - (-) Tire wear multiplier on a hot track
/// * `humidity_high` - (%) Humidity above which engines wear faster
/// * `f_engine_wear_humid` - (-) Engine wear multiplier at high humidity
/// * `min_no_cars` - Minimum field size for a race
/// * `q1_eliminations` - Number of cars eliminated in Q1
/// * `q3_size` - Maximum number of cars in Q3
/// * `points` - Points for the finishing positions 1, 2, ... (0 for all further positions)
#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SimConstants {
    pub t_race_target: f64,
    pub fuel_capacity: f64,
    pub b_fuel_per_lap: f64,
    pub tire_allowance_laps: f64,
    pub length_ref: f64,
    pub avg_speed_ratio: f64,
    pub temp_hot_track: f64,
    pub f_tire_wear_hot_track: f64,
    pub humidity_high: f64,
    pub f_engine_wear_humid: f64,
    pub min_no_cars: usize,
    pub q1_eliminations: usize,
    pub q3_size: usize,
    pub points: Vec<u32>,
}

impl Default for SimConstants {
    fn default() -> Self {
        SimConstants {
            t_race_target: 5400.0,
            fuel_capacity: 110.0,
            b_fuel_per_lap: 2.5,
            tire_allowance_laps: 40.0,
            length_ref: 5.0,
            avg_speed_ratio: 0.65,
            temp_hot_track: 35.0,
            f_tire_wear_hot_track: 1.15,
            humidity_high: 60.0,
            f_engine_wear_humid: 1.1,
            min_no_cars: 10,
            q1_eliminations: 5,
            q3_size: 10,
            points: vec![25, 18, 15, 12, 10, 8, 6, 4, 2, 1],
        }
    }
}

impl SimConstants {
    pub fn validate(&self) -> RaceSimResult<()> {
        let positive = [
            ("t_race_target", self.t_race_target),
            ("fuel_capacity", self.fuel_capacity),
            ("b_fuel_per_lap", self.b_fuel_per_lap),
            ("tire_allowance_laps", self.tire_allowance_laps),
            ("length_ref", self.length_ref),
            ("avg_speed_ratio", self.avg_speed_ratio),
            ("f_tire_wear_hot_track", self.f_tire_wear_hot_track),
            ("f_engine_wear_humid", self.f_engine_wear_humid),
        ];

        for (name, val) in positive {
            if !(val.is_finite() && val > 0.0) {
                return Err(RaceSimError::InvalidConfig(format!(
                    "simulation constant {} must be > 0, but is {}",
                    name, val
                )));
            }
        }

        if self.avg_speed_ratio > 1.0 {
            return Err(RaceSimError::InvalidConfig(format!(
                "average speed ratio must be in ]0, 1], but is {}",
                self.avg_speed_ratio
            )));
        }

        Ok(())
    }

    /// points_for_position returns the points for a (1-based) finishing position.
    pub fn points_for_position(&self, position: u32) -> u32 {
        position
            .checked_sub(1)
            .and_then(|idx| self.points.get(idx as usize))
            .copied()
            .unwrap_or(0)
    }
}

/// * `name` - Name of the event, e.g. Gran Premio d'Italia
/// * `date` - Date of the event (YYYY-MM-DD)
/// * `participants` - Car numbers of the participating cars
#[derive(Debug, Deserialize, Clone)]
pub struct RacePars {
    pub name: String,
    pub date: String,
    pub participants: Vec<u32>,
}

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum RacePhase {
    NotStarted,
    Qualifying,
    Racing,
    Finished,
}

impl fmt::Display for RacePhase {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let s = match self {
            RacePhase::NotStarted => "not started",
            RacePhase::Qualifying => "in qualifying",
            RacePhase::Racing => "racing",
            RacePhase::Finished => "finished",
        };
        write!(f, "{}", s)
    }
}

/// A single lap driven by a car in the race.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct LapRecord {
    pub lap: u32,
    pub car_no: u32,
    pub driver_initials: String,
    pub laptime: f64,
    pub laptime_fmt: String,
    pub is_fastest_lap: bool,
}

/// Position of a car in the live standings. `time_or_gap` is the formatted lap time for the
/// leader and the gap to the leader's lap time for all other cars.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct Standing {
    pub position: u32,
    pub car_no: u32,
    pub driver_initials: String,
    pub laptime: f64,
    pub racetime: f64,
    pub time_or_gap: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct RaceStartInfo {
    pub phase: RacePhase,
    pub tot_no_laps: u32,
    pub no_cars: usize,
    pub weather: Weather,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct DriverPoints {
    pub position: u32,
    pub car_no: u32,
    pub driver_initials: String,
    pub team: Option<String>,
    pub points: u32,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct FinalResult {
    pub podium: Vec<Standing>,
    pub fastest_lap: Option<LapRecord>,
    pub points: Vec<DriverPoints>,
}

impl FinalResult {
    /// points_by_team sums up the points per team, sorted by points (descending) and team name.
    /// Cars without a team are not considered.
    pub fn points_by_team(&self) -> Vec<(String, u32)> {
        let mut teams: BTreeMap<&str, u32> = BTreeMap::new();
        for entry in self.points.iter() {
            if let Some(team) = &entry.team {
                *teams.entry(team.as_str()).or_insert(0) += entry.points;
            }
        }

        let mut teams: Vec<(String, u32)> = teams
            .into_iter()
            .map(|(team, points)| (team.to_owned(), points))
            .collect();
        teams.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        teams
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ResultsSnapshot {
    pub phase: RacePhase,
    pub standings: Vec<Standing>,
    pub laps_completed: u32,
    pub laps_remaining: u32,
    pub fastest_lap: Option<LapRecord>,
}

#[derive(Debug)]
pub struct Race {
    pub name: String,
    pub date: NaiveDate,
    pub sim_consts: SimConstants,
    pub track: Track,
    pub cars_list: Vec<Car>,
    tire_catalogue: TireCatalogue,
    phase: RacePhase,
    weather: Option<Weather>,
    tot_no_laps: u32,
    laps_completed: u32,
    laptimes: Vec<Vec<f64>>,
    racetimes: Vec<f64>,
    standings: Vec<Standing>,
    fastest_lap: Option<LapRecord>,
    lap_records: Vec<LapRecord>,
    qualifying_result: Option<QualifyingResult>,
}

impl Race {
    pub fn new(
        race_pars: &RacePars,
        track_pars: &TrackPars,
        tire_config: &TireConfig,
        driver_pars_all: &HashMap<String, DriverPars>,
        car_pars_all: &HashMap<u32, CarPars>,
        sim_consts: &SimConstants,
    ) -> RaceSimResult<Race> {
        sim_consts.validate()?;

        let date = NaiveDate::parse_from_str(&race_pars.date, "%Y-%m-%d").map_err(|e| {
            RaceSimError::InvalidConfig(format!("invalid race date {}: {}", race_pars.date, e))
        })?;

        let track = Track::new(track_pars)?;
        let tire_catalogue = TireCatalogue::new(tire_config)?;

        // create cars and put their drivers in
        let mut cars_list: Vec<Car> = Vec::with_capacity(race_pars.participants.len());
        let mut assigned_drivers: HashSet<&str> = HashSet::new();

        for car_no in race_pars.participants.iter() {
            if cars_list.iter().any(|car| car.car_no == *car_no) {
                return Err(RaceSimError::InvalidConfig(format!(
                    "car {} takes part more than once",
                    car_no
                )));
            }

            let car_pars = car_pars_all.get(car_no).ok_or_else(|| {
                RaceSimError::InvalidConfig(format!("missing parameters for car {}", car_no))
            })?;
            let mut car = Car::new(car_pars, &tire_catalogue)?;

            if let Some(initials) = &car_pars.driver_initials {
                let driver_pars = driver_pars_all.get(initials).ok_or_else(|| {
                    RaceSimError::InvalidConfig(format!(
                        "missing parameters for driver {} of car {}",
                        initials, car_no
                    ))
                })?;

                if !assigned_drivers.insert(initials.as_str()) {
                    return Err(RaceSimError::IncompatibleAssignment {
                        driver: initials.to_owned(),
                        car_no: *car_no,
                        reason: "driver is already assigned to another car".to_owned(),
                    });
                }

                car.assign_driver(Driver::new(driver_pars)?)?;
            }

            cars_list.push(car);
        }

        Ok(Race {
            name: race_pars.name.to_owned(),
            date,
            sim_consts: sim_consts.to_owned(),
            track,
            cars_list,
            tire_catalogue,
            phase: RacePhase::NotStarted,
            weather: None,
            tot_no_laps: 0,
            laps_completed: 0,
            laptimes: Vec::new(),
            racetimes: Vec::new(),
            standings: Vec::new(),
            fastest_lap: None,
            lap_records: Vec::new(),
            qualifying_result: None,
        })
    }

    // ---------------------------------------------------------------------------------------------
    // MAIN METHODS --------------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// run_qualifying determines the starting grid. The cars are reordered accordingly, such
    /// that equal lap times in the race are ranked by grid position.
    pub fn run_qualifying(&mut self) -> RaceSimResult<QualifyingResult> {
        self.check_phase("qualifying", &[RacePhase::NotStarted])?;

        let weather = self
            .track
            .weather
            .as_ref()
            .ok_or_else(|| missing_weather(&self.track))?;

        let result = run_qualifying(
            &self.cars_list,
            self.track.length_km,
            weather,
            &self.sim_consts,
        )?;

        let grid_pos: HashMap<u32, usize> = result
            .starting_grid
            .iter()
            .enumerate()
            .map(|(i, slot)| (slot.car_no, i))
            .collect();
        self.cars_list
            .sort_by_key(|car| grid_pos.get(&car.car_no).copied().unwrap_or(usize::MAX));

        info!(
            race = %self.name,
            pole = result.starting_grid.first().map(|s| s.car_no),
            "qualifying finished"
        );

        self.phase = RacePhase::Qualifying;
        self.qualifying_result = Some(result.to_owned());
        Ok(result)
    }

    /// start_race validates the race setup, takes over the track weather, computes the number of
    /// laps and lets the drivers adapt their style to the weather. Nothing is changed if the setup
    /// is invalid.
    pub fn start_race(&mut self) -> RaceSimResult<RaceStartInfo> {
        self.check_phase("starting the race", &[RacePhase::NotStarted, RacePhase::Qualifying])?;
        self.validate_setup()?;

        let weather = self
            .track
            .weather
            .to_owned()
            .ok_or_else(|| missing_weather(&self.track))?;
        let tot_no_laps = self.calc_tot_no_laps(&weather)?;

        // from here on nothing can fail
        for car in self.cars_list.iter_mut() {
            if let Some(driver) = car.driver.as_mut() {
                let adaptation = driver.adapt_style(&weather);
                debug!(
                    driver = %driver.initials,
                    style = ?adaptation.style_new,
                    "driver adapted style to the weather"
                );
            }
        }

        let no_cars = self.cars_list.len();
        self.laptimes = vec![Vec::with_capacity(tot_no_laps as usize); no_cars];
        self.racetimes = vec![0.0; no_cars];
        self.tot_no_laps = tot_no_laps;
        self.weather = Some(weather.to_owned());
        self.phase = RacePhase::Racing;

        info!(
            race = %self.name,
            track = %self.track.name,
            laps = tot_no_laps,
            cars = no_cars,
            weather = %weather.condition,
            "race started"
        );

        Ok(RaceStartInfo {
            phase: self.phase,
            tot_no_laps,
            no_cars,
            weather,
        })
    }

    /// run_lap simulates one lap for every car: lap times are calculated with the current wear,
    /// afterwards the wear of the lap is applied and the standings are ranked by lap time. The
    /// method does nothing once all laps are completed.
    pub fn run_lap(&mut self) -> RaceSimResult<Vec<Standing>> {
        self.check_phase("running a lap", &[RacePhase::Racing])?;

        if self.laps_completed >= self.tot_no_laps {
            return Ok(self.standings.to_owned());
        }

        let weather = self
            .weather
            .as_ref()
            .ok_or_else(|| RaceSimError::InvalidRaceSetup("race weather is not set".to_owned()))?;
        let track_length_km = self.track.length_km;

        // calculate everything that can fail before the cars are changed
        let mut cur_laptimes: Vec<f64> = Vec::with_capacity(self.cars_list.len());
        let mut wear_deltas: Vec<WearDelta> = Vec::with_capacity(self.cars_list.len());

        for car in self.cars_list.iter() {
            cur_laptimes.push(calc_driven_laptime(car, track_length_km, weather)?);

            let conditions = LapConditions {
                avg_speed: car.max_speed * self.sim_consts.avg_speed_ratio,
                temperature_c: weather.temperature_c,
                humidity_pct: weather.humidity_pct,
            };
            wear_deltas.push(car.calc_wear(&conditions, &self.sim_consts));
        }

        // apply wear
        for (car, wear_delta) in self.cars_list.iter_mut().zip(wear_deltas.iter()) {
            car.drive_lap(wear_delta, track_length_km);
        }

        let lap = self.laps_completed + 1;

        // update fastest lap
        let idx_fastest = argmin(&cur_laptimes).filter(|&idx| {
            self.fastest_lap
                .as_ref()
                .map_or(true, |fastest_lap| cur_laptimes[idx] < fastest_lap.laptime)
        });

        // record laps
        for (i, &laptime) in cur_laptimes.iter().enumerate() {
            self.laptimes[i].push(laptime);
            self.racetimes[i] += laptime;

            let record = LapRecord {
                lap,
                car_no: self.cars_list[i].car_no,
                driver_initials: initials(&self.cars_list[i]),
                laptime,
                laptime_fmt: format_laptime(laptime),
                is_fastest_lap: idx_fastest == Some(i),
            };

            if record.is_fastest_lap {
                debug!(
                    lap,
                    car_no = record.car_no,
                    laptime = %record.laptime_fmt,
                    "new fastest lap"
                );
                self.fastest_lap = Some(record.to_owned());
            }
            self.lap_records.push(record);
        }

        // rank cars by lap time
        let order = argsort(&cur_laptimes, SortOrder::Ascending);
        let t_leader = cur_laptimes[order[0]];

        self.standings = order
            .iter()
            .enumerate()
            .map(|(pos, &idx)| Standing {
                position: pos as u32 + 1,
                car_no: self.cars_list[idx].car_no,
                driver_initials: initials(&self.cars_list[idx]),
                laptime: cur_laptimes[idx],
                racetime: self.racetimes[idx],
                time_or_gap: if pos == 0 {
                    format_laptime(t_leader)
                } else {
                    format_gap(cur_laptimes[idx] - t_leader)
                },
            })
            .collect();

        self.laps_completed = lap;
        debug!(
            lap,
            tot_no_laps = self.tot_no_laps,
            leader = self.standings[0].car_no,
            "lap completed"
        );

        Ok(self.standings.to_owned())
    }

    /// finalize_race ends the race and awards the points on the basis of the current standings.
    /// If no lap was driven yet, one lap is simulated first.
    pub fn finalize_race(&mut self) -> RaceSimResult<FinalResult> {
        self.check_phase("finalizing the race", &[RacePhase::Racing])?;

        if self.laps_completed == 0 {
            self.run_lap()?;
        }

        let podium: Vec<Standing> = self.standings.iter().take(3).cloned().collect();

        let points: Vec<DriverPoints> = self
            .standings
            .iter()
            .map(|standing| DriverPoints {
                position: standing.position,
                car_no: standing.car_no,
                driver_initials: standing.driver_initials.to_owned(),
                team: self
                    .cars_list
                    .iter()
                    .find(|car| car.car_no == standing.car_no)
                    .and_then(|car| car.team.to_owned()),
                points: self.sim_consts.points_for_position(standing.position),
            })
            .collect();

        // credit the drivers
        for entry in points.iter() {
            if let Some(driver) = self.driver_mut(entry.car_no) {
                driver.record_result(entry.position, entry.points);
            }
        }

        if let Some(fastest_lap) = self.fastest_lap.to_owned() {
            if let Some(driver) = self.driver_mut(fastest_lap.car_no) {
                driver.record_fastest_lap();
            }

            if self.track.update_lap_record(
                fastest_lap.laptime,
                &fastest_lap.driver_initials,
                self.date,
            ) {
                info!(
                    track = %self.track.name,
                    laptime = %fastest_lap.laptime_fmt,
                    driver = %fastest_lap.driver_initials,
                    "new track lap record"
                );
            }
        }

        self.phase = RacePhase::Finished;

        info!(
            race = %self.name,
            laps = self.laps_completed,
            winner = podium.first().map(|s| s.car_no),
            "race finished"
        );

        Ok(FinalResult {
            podium,
            fastest_lap: self.fastest_lap.to_owned(),
            points,
        })
    }

    // ---------------------------------------------------------------------------------------------
    // METHODS (HELPERS) ---------------------------------------------------------------------------
    // ---------------------------------------------------------------------------------------------

    /// validate_setup checks the minimum requirements for starting the race: enough cars, a valid
    /// track, weather set and a driver in every car.
    pub fn validate_setup(&self) -> RaceSimResult<()> {
        if self.cars_list.len() < self.sim_consts.min_no_cars {
            return Err(RaceSimError::InvalidRaceSetup(format!(
                "at least {} cars are required, but only {} take part",
                self.sim_consts.min_no_cars,
                self.cars_list.len()
            )));
        }

        if !self.track.is_valid() {
            return Err(RaceSimError::InvalidRaceSetup(format!(
                "track {} is invalid",
                self.track.name
            )));
        }

        if self.track.weather.is_none() {
            return Err(missing_weather(&self.track));
        }

        for car in self.cars_list.iter() {
            if car.status != CarStatus::Racing {
                return Err(RaceSimError::InvalidRaceSetup(format!(
                    "car {} cannot take part, its status is {}",
                    car.car_no, car.status
                )));
            }
            if car.driver.is_none() {
                return Err(RaceSimError::InvalidRaceSetup(format!(
                    "car {} has no driver assigned",
                    car.car_no
                )));
            }
        }

        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate_setup().is_ok()
    }

    /// calc_tot_no_laps returns the number of race laps as the minimum of the laps limited by the
    /// target duration (using the average lap time of the field on fresh tires), by the fuel
    /// allowance and by the tire allowance. At least one lap is driven.
    pub fn calc_tot_no_laps(&self, weather: &Weather) -> RaceSimResult<u32> {
        if self.cars_list.is_empty() {
            return Err(RaceSimError::InvalidRaceSetup("no cars take part".to_owned()));
        }

        let mut t_sum = 0.0;
        for car in self.cars_list.iter() {
            let driver = car.driver.as_ref().ok_or_else(|| {
                RaceSimError::InvalidRaceSetup(format!("car {} has no driver assigned", car.car_no))
            })?;
            t_sum += calc_laptime_fresh(car, &driver.skills, self.track.length_km, weather)?;
        }
        let t_lap_avg = t_sum / self.cars_list.len() as f64;

        let length_frac = self.track.length_km / self.sim_consts.length_ref;
        let b_fuel_per_lap = self.sim_consts.b_fuel_per_lap * length_frac;

        let laps_duration = (self.sim_consts.t_race_target / t_lap_avg).floor();
        let laps_fuel = (self.sim_consts.fuel_capacity / b_fuel_per_lap).floor();
        let laps_tires = (self.sim_consts.tire_allowance_laps * length_frac).floor();

        let tot_no_laps = laps_duration.min(laps_fuel).min(laps_tires).max(1.0);

        debug!(
            t_lap_avg,
            laps_duration,
            laps_fuel,
            laps_tires,
            "calculated number of laps"
        );

        Ok(tot_no_laps as u32)
    }

    fn driver_mut(&mut self, car_no: u32) -> Option<&mut Driver> {
        self.cars_list
            .iter_mut()
            .find(|car| car.car_no == car_no)
            .and_then(|car| car.driver.as_mut())
    }

    fn check_phase(&self, operation: &'static str, allowed: &[RacePhase]) -> RaceSimResult<()> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(RaceSimError::InvalidPhase {
                operation,
                phase: self.phase.to_string(),
            })
        }
    }

    pub fn phase(&self) -> RacePhase {
        self.phase
    }

    pub fn tot_no_laps(&self) -> u32 {
        self.tot_no_laps
    }

    pub fn laps_completed(&self) -> u32 {
        self.laps_completed
    }

    pub fn get_all_finished(&self) -> bool {
        self.phase == RacePhase::Racing && self.laps_completed >= self.tot_no_laps
    }

    /// Weather snapshot taken at the race start.
    pub fn weather(&self) -> Option<&Weather> {
        self.weather.as_ref()
    }

    pub fn standings(&self) -> &[Standing] {
        &self.standings
    }

    pub fn fastest_lap(&self) -> Option<&LapRecord> {
        self.fastest_lap.as_ref()
    }

    pub fn lap_records(&self) -> &[LapRecord] {
        &self.lap_records
    }

    pub fn qualifying_result(&self) -> Option<&QualifyingResult> {
        self.qualifying_result.as_ref()
    }

    pub fn tire_catalogue(&self) -> &TireCatalogue {
        &self.tire_catalogue
    }

    /// get_results returns the current state of the race. It can be called in any phase.
    pub fn get_results(&self) -> ResultsSnapshot {
        ResultsSnapshot {
            phase: self.phase,
            standings: self.standings.to_owned(),
            laps_completed: self.laps_completed,
            laps_remaining: self.tot_no_laps.saturating_sub(self.laps_completed),
            fastest_lap: self.fastest_lap.to_owned(),
        }
    }

    /// get_race_result returns the lap and race times of all cars for post-processing.
    pub fn get_race_result(&self) -> RaceResult {
        RaceResult {
            race_name: self.name.to_owned(),
            tot_no_laps: self.laps_completed,
            car_driver_pairs: self
                .cars_list
                .iter()
                .map(|car| CarDriverPair {
                    car_no: car.car_no,
                    driver_initials: initials(car),
                })
                .collect(),
            laptimes: self.laptimes.to_owned(),
            racetimes: self
                .laptimes
                .iter()
                .map(|laptimes_car| {
                    laptimes_car
                        .iter()
                        .scan(0.0, |t_race, t_lap| {
                            *t_race += t_lap;
                            Some(*t_race)
                        })
                        .collect()
                })
                .collect(),
        }
    }
}

fn missing_weather(track: &Track) -> RaceSimError {
    RaceSimError::InvalidRaceSetup(format!("weather of track {} is not set", track.name))
}

fn initials(car: &Car) -> String {
    car.driver_initials().unwrap_or_default().to_owned()
}
