use crate::core::car::{CarPars, CarStatus, WearConfig};
use crate::core::driver::{DriverPars, DriverSkills, DrivingStyle};
use crate::core::race::{RacePars, SimConstants};
use crate::core::tireset::TireConfig;
use crate::core::track::{Corner, Difficulty, DrsZone, TrackPars, Weather, WeatherCondition};
use crate::pre::read_sim_pars::SimPars;
use helpers::general::clamp_pct;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use std::collections::HashMap;

const COMPOUNDS: [&str; 3] = ["soft", "medium", "hard"];

/// create_demo_field creates the parameters of a race at Monza with `no_cars` randomly rated cars
/// and drivers. Two cars each form a team. The same seed always results in the same field.
pub fn create_demo_field(no_cars: u32, seed: u64) -> anyhow::Result<SimPars> {
    let mut rng = StdRng::seed_from_u64(seed);

    let skill_dist = Normal::<f64>::new(80.0, 8.0)
        .map_err(|e| anyhow::anyhow!("Invalid skill distribution: {}", e))?;
    let speed_dist = Normal::<f64>::new(330.0, 4.0)
        .map_err(|e| anyhow::anyhow!("Invalid top speed distribution: {}", e))?;

    let mut driver_pars_all = HashMap::with_capacity(no_cars as usize);
    let mut car_pars_all = HashMap::with_capacity(no_cars as usize);

    for car_no in 1..=no_cars {
        let initials = format!("D{:02}", car_no);

        let skills = DriverSkills {
            speed: clamp_pct(skill_dist.sample(&mut rng)),
            consistency: clamp_pct(skill_dist.sample(&mut rng)),
            aggression: clamp_pct(skill_dist.sample(&mut rng)),
        };

        driver_pars_all.insert(
            initials.to_owned(),
            DriverPars {
                initials: initials.to_owned(),
                name: format!("Driver {}", car_no),
                nationality: String::new(),
                skills,
                style: DrivingStyle::Aggressive,
            },
        );

        car_pars_all.insert(
            car_no,
            CarPars {
                car_no,
                team: Some(format!("Team {}", (car_no + 1) / 2)),
                manufacturer: String::new(),
                model: String::new(),
                compound: COMPOUNDS[rng.gen_range(0..COMPOUNDS.len())].to_owned(),
                max_speed: speed_dist.sample(&mut rng).max(250.0),
                initial_wear: WearConfig::default(),
                status: CarStatus::Racing,
                driver_initials: Some(initials),
                requirements: DriverSkills::default(),
            },
        );
    }

    Ok(SimPars {
        race_pars: RacePars {
            name: "Demo Grand Prix".to_owned(),
            date: "2024-09-08".to_owned(),
            participants: (1..=no_cars).collect(),
        },
        track_pars: monza(),
        driver_pars_all,
        car_pars_all,
        tire_config: TireConfig::default(),
        sim_constants: SimConstants::default(),
    })
}

fn monza() -> TrackPars {
    let corner = |name: &str, vel_max: f64, difficulty: Difficulty| Corner {
        name: name.to_owned(),
        vel_max,
        difficulty,
    };

    TrackPars {
        name: "Monza".to_owned(),
        location: "Monza, Italy".to_owned(),
        length_km: 5.793,
        corners: vec![
            corner("Variante del Rettifilo", 80.0, Difficulty::High),
            corner("Curva Biassono", 300.0, Difficulty::Low),
            corner("Variante della Roggia", 110.0, Difficulty::Medium),
            corner("Lesmo 1", 180.0, Difficulty::Medium),
            corner("Lesmo 2", 170.0, Difficulty::Medium),
            corner("Variante Ascari", 190.0, Difficulty::High),
            corner("Curva Alboreto", 210.0, Difficulty::High),
        ],
        drs_zones: vec![
            DrsZone {
                name: "Main straight".to_owned(),
                length_km: 1.1,
            },
            DrsZone {
                name: "Rettifilo Centro".to_owned(),
                length_km: 0.9,
            },
        ],
        weather: Some(Weather {
            condition: WeatherCondition::Dry,
            temperature_c: 28.0,
            humidity_pct: 45.0,
        }),
    }
}
