use crate::core::car::Car;
use crate::core::laptime::calc_driven_laptime;
use crate::core::race::SimConstants;
use crate::core::track::Weather;
use crate::error::{RaceSimError, RaceSimResult};
use helpers::general::{argsort, format_laptime, SortOrder};
use serde::Serialize;
use tracing::debug;

/// Timed lap of a car in one qualifying stage. `position` is the rank within the stage.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct QualifyingEntry {
    pub position: u32,
    pub car_no: u32,
    pub driver_initials: String,
    pub laptime: f64,
    pub laptime_fmt: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct GridSlot {
    pub position: u32,
    pub car_no: u32,
    pub driver_initials: String,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct QualifyingResult {
    pub q1: Vec<QualifyingEntry>,
    pub q2: Vec<QualifyingEntry>,
    pub q3: Vec<QualifyingEntry>,
    pub starting_grid: Vec<GridSlot>,
}

impl QualifyingResult {
    /// grid_order returns the car numbers from pole position to the last grid slot.
    pub fn grid_order(&self) -> Vec<u32> {
        self.starting_grid.iter().map(|slot| slot.car_no).collect()
    }
}

/// run_qualifying performs a three-stage elimination qualifying. Every stage consists of one
/// timed lap per remaining car, ranked by lap time. Equal lap times are ranked by the order of
/// the cars in `cars`.
///
/// * Q1: all cars, the slowest `q1_eliminations` (at most all of them) are eliminated
/// * Q2: the survivors, the slowest are eliminated until at most `q3_size` cars remain
/// * Q3: the remaining cars decide the top of the grid
///
/// The starting grid is the Q3 order followed by the cars eliminated in Q2 (Q2 order) and the
/// cars eliminated in Q1 (Q1 order).
pub fn run_qualifying(
    cars: &[Car],
    track_length_km: f64,
    weather: &Weather,
    sim_consts: &SimConstants,
) -> RaceSimResult<QualifyingResult> {
    if cars.is_empty() {
        return Err(RaceSimError::InsufficientParticipants);
    }

    let all_idxs: Vec<usize> = (0..cars.len()).collect();

    // Q1
    let q1_order = run_stage(cars, &all_idxs, track_length_km, weather)?;
    let no_q1_survivors = q1_order.len() - sim_consts.q1_eliminations.min(q1_order.len());
    let q1_survivors: Vec<usize> = q1_order[..no_q1_survivors].iter().map(|x| x.0).collect();

    // Q2
    let q2_order = run_stage(cars, &q1_survivors, track_length_km, weather)?;
    let no_q2_survivors = q2_order.len().min(sim_consts.q3_size);
    let q2_survivors: Vec<usize> = q2_order[..no_q2_survivors].iter().map(|x| x.0).collect();

    // Q3
    let q3_order = run_stage(cars, &q2_survivors, track_length_km, weather)?;

    debug!(
        q1 = q1_order.len(),
        q2 = q2_order.len(),
        q3 = q3_order.len(),
        "qualifying finished"
    );

    let grid_idxs = q3_order
        .iter()
        .chain(q2_order[no_q2_survivors..].iter())
        .chain(q1_order[no_q1_survivors..].iter())
        .map(|x| x.0);

    let starting_grid = grid_idxs
        .enumerate()
        .map(|(i, idx)| GridSlot {
            position: i as u32 + 1,
            car_no: cars[idx].car_no,
            driver_initials: initials(&cars[idx]),
        })
        .collect();

    Ok(QualifyingResult {
        q1: to_entries(cars, &q1_order),
        q2: to_entries(cars, &q2_order),
        q3: to_entries(cars, &q3_order),
        starting_grid,
    })
}

/// run_stage lets every given car set a timed lap and returns (car index, lap time) pairs ordered
/// from fastest to slowest.
fn run_stage(
    cars: &[Car],
    idxs: &[usize],
    track_length_km: f64,
    weather: &Weather,
) -> RaceSimResult<Vec<(usize, f64)>> {
    let laptimes = idxs
        .iter()
        .map(|&idx| calc_driven_laptime(&cars[idx], track_length_km, weather))
        .collect::<RaceSimResult<Vec<f64>>>()?;

    Ok(argsort(&laptimes, SortOrder::Ascending)
        .into_iter()
        .map(|i| (idxs[i], laptimes[i]))
        .collect())
}

fn to_entries(cars: &[Car], order: &[(usize, f64)]) -> Vec<QualifyingEntry> {
    order
        .iter()
        .enumerate()
        .map(|(i, &(idx, laptime))| QualifyingEntry {
            position: i as u32 + 1,
            car_no: cars[idx].car_no,
            driver_initials: initials(&cars[idx]),
            laptime,
            laptime_fmt: format_laptime(laptime),
        })
        .collect()
}

fn initials(car: &Car) -> String {
    car.driver_initials().unwrap_or_default().to_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::car::{CarPars, CarStatus, WearConfig};
    use crate::core::driver::{Driver, DriverPars, DriverSkills, DrivingStyle};
    use crate::core::tireset::{TireCatalogue, TireConfig};
    use crate::core::track::WeatherCondition;

    /// Creates cars whose speed increases with the car number, i.e. car n is faster than car m
    /// for n > m.
    fn field(no_cars: u32) -> Vec<Car> {
        let catalogue = TireCatalogue::new(&TireConfig::default()).unwrap();
        (1..=no_cars)
            .map(|car_no| {
                let pars = CarPars {
                    car_no,
                    team: None,
                    manufacturer: String::new(),
                    model: String::new(),
                    compound: "medium".to_owned(),
                    max_speed: 300.0 + car_no as f64,
                    initial_wear: WearConfig::default(),
                    status: CarStatus::Racing,
                    driver_initials: None,
                    requirements: DriverSkills::default(),
                };
                let mut car = Car::new(&pars, &catalogue).unwrap();
                car.assign_driver(
                    Driver::new(&DriverPars {
                        initials: format!("D{:02}", car_no),
                        name: format!("Driver {}", car_no),
                        nationality: String::new(),
                        skills: DriverSkills::new(80.0, 80.0, 80.0).unwrap(),
                        style: DrivingStyle::Aggressive,
                    })
                    .unwrap(),
                )
                .unwrap();
                car
            })
            .collect()
    }

    fn dry() -> Weather {
        Weather::new(WeatherCondition::Dry, 25.0, 50.0).unwrap()
    }

    fn car_nos(entries: &[QualifyingEntry]) -> Vec<u32> {
        entries.iter().map(|e| e.car_no).collect()
    }

    #[test]
    fn twenty_cars_eliminate_five_per_stage() {
        let cars = field(20);
        let res = run_qualifying(&cars, 5.793, &dry(), &SimConstants::default()).unwrap();

        assert_eq!(res.q1.len(), 20);
        assert_eq!(res.q2.len(), 15);
        assert_eq!(res.q3.len(), 10);
        assert_eq!(res.starting_grid.len(), 20);

        // fastest car takes pole, slowest starts last
        assert_eq!(car_nos(&res.q3), (11..=20).rev().collect::<Vec<u32>>());
        assert_eq!(res.grid_order(), (1..=20).rev().collect::<Vec<u32>>());
        assert_eq!(res.starting_grid[0].driver_initials, "D20");
        assert_eq!(res.starting_grid[19].position, 20);
    }

    #[test]
    fn small_fields_shrink_the_stages() {
        let cars = field(12);
        let res = run_qualifying(&cars, 5.793, &dry(), &SimConstants::default()).unwrap();
        assert_eq!(res.q2.len(), 7);
        assert_eq!(res.q3.len(), 7);
        assert_eq!(res.starting_grid.len(), 12);

        let cars = field(4);
        let res = run_qualifying(&cars, 5.793, &dry(), &SimConstants::default()).unwrap();
        assert!(res.q2.is_empty());
        assert!(res.q3.is_empty());
        assert_eq!(res.grid_order(), vec![4, 3, 2, 1]);
    }

    #[test]
    fn grid_is_q3_then_q2_then_q1_eliminations() {
        let cars = field(20);
        let res = run_qualifying(&cars, 5.793, &dry(), &SimConstants::default()).unwrap();

        let mut expected = car_nos(&res.q3);
        expected.extend(car_nos(&res.q2[10..]));
        expected.extend(car_nos(&res.q1[15..]));
        assert_eq!(res.grid_order(), expected);
    }

    #[test]
    fn equal_laptimes_keep_entry_order() {
        let mut cars = field(6);
        for car in cars.iter_mut() {
            car.max_speed = 330.0;
        }
        let res = run_qualifying(&cars, 5.793, &dry(), &SimConstants::default()).unwrap();
        assert_eq!(res.grid_order(), vec![1, 2, 3, 4, 5, 6]);
        assert_eq!(res.q1[0].laptime_fmt, res.q1[5].laptime_fmt);
    }

    #[test]
    fn empty_field_is_rejected() {
        assert_eq!(
            run_qualifying(&[], 5.793, &dry(), &SimConstants::default()),
            Err(RaceSimError::InsufficientParticipants)
        );
    }

    #[test]
    fn car_without_driver_is_rejected() {
        let mut cars = field(10);
        cars[3].remove_driver();
        assert!(matches!(
            run_qualifying(&cars, 5.793, &dry(), &SimConstants::default()),
            Err(RaceSimError::InvalidRaceSetup(_))
        ));
    }
}
