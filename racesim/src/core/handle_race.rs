use crate::core::qualifying::QualifyingResult;
use crate::core::race::{FinalResult, Race, RaceStartInfo};
use crate::post::race_result::RaceResult;
use crate::pre::read_sim_pars::SimPars;
use anyhow::Context;
use tracing::info;

/// Everything a race weekend produces: the qualifying, the start information, the final
/// classification and the lap and race times of all cars.
#[derive(Debug, Clone)]
pub struct RaceOutcome {
    pub qualifying_result: QualifyingResult,
    pub start_info: RaceStartInfo,
    pub final_result: FinalResult,
    pub race_result: RaceResult,
}

/// handle_race creates and simulates a race on the basis of the inserted parameters, and returns
/// the results for post-processing.
pub fn handle_race(sim_pars: &SimPars, print_debug: bool) -> anyhow::Result<RaceOutcome> {
    let mut race = Race::new(
        &sim_pars.race_pars,
        &sim_pars.track_pars,
        &sim_pars.tire_config,
        &sim_pars.driver_pars_all,
        &sim_pars.car_pars_all,
        &sim_pars.sim_constants,
    )
    .context("Failed to set up the race!")?;

    let qualifying_result = race
        .run_qualifying()
        .context("Failed to run the qualifying!")?;
    let start_info = race.start_race().context("Failed to start the race!")?;

    while !race.get_all_finished() {
        let standings = race.run_lap().context("Failed to simulate a lap!")?;

        if print_debug {
            let leader = &standings[0];
            println!(
                "INFO: Lap {}/{} completed, leader is car {} ({}) with {}",
                race.laps_completed(),
                race.tot_no_laps(),
                leader.car_no,
                leader.driver_initials,
                leader.time_or_gap
            );
        }
    }

    let final_result = race.finalize_race().context("Failed to finalize the race!")?;
    info!(
        race = %race.name,
        laps = race.laps_completed(),
        "race weekend simulated"
    );

    Ok(RaceOutcome {
        qualifying_result,
        start_info,
        final_result,
        race_result: race.get_race_result(),
    })
}
