use clap::Parser;
use racesim::core::handle_race::handle_race;
use racesim::pre::demo_field::create_demo_field;
use racesim::pre::read_sim_pars::read_sim_pars;
use racesim::pre::sim_opts::SimOpts;
use std::time::Instant;
use tracing_subscriber::EnvFilter;

/// log_filter uses the directives from RUST_LOG if they are set and valid, otherwise the level
/// selected by the debug flag.
fn log_filter(env_directives: Option<&str>, debug: bool) -> EnvFilter {
    let default_level = if debug { "debug" } else { "info" };
    env_directives
        .and_then(|dirs| EnvFilter::try_new(dirs).ok())
        .unwrap_or_else(|| EnvFilter::new(default_level))
}

fn main() -> anyhow::Result<()> {
    // PRE-PROCESSING ------------------------------------------------------------------------------
    // get simulation options from the command line arguments
    let sim_opts: SimOpts = SimOpts::parse();

    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    tracing_subscriber::fmt()
        .with_env_filter(log_filter(env_directives.as_deref(), sim_opts.debug))
        .with_writer(std::io::stderr)
        .init();

    // get simulation parameters
    let sim_pars = if let Some(parfile_path) = &sim_opts.parfile_path {
        println!("INFO: Reading simulation parameters from {:?}", parfile_path);
        read_sim_pars(parfile_path)?
    } else {
        println!(
            "INFO: No parameter file given, creating a demo field of {} cars (seed {})",
            sim_opts.no_cars, sim_opts.demo_seed
        );
        create_demo_field(sim_opts.no_cars, sim_opts.demo_seed)?
    };

    // print race details
    println!(
        "INFO: Simulating {} ({}) at {}",
        sim_pars.race_pars.name, sim_pars.race_pars.date, sim_pars.track_pars.name
    );

    // EXECUTION -----------------------------------------------------------------------------------
    let t_start = Instant::now();
    let outcome = handle_race(&sim_pars, sim_opts.debug)?;
    println!("INFO: Execution time: {}ms", t_start.elapsed().as_millis());

    // POST-PROCESSING -----------------------------------------------------------------------------
    println!("RESULT: Starting grid");
    for slot in outcome.qualifying_result.starting_grid.iter() {
        println!("{:3}. car {:3} ({})", slot.position, slot.car_no, slot.driver_initials);
    }

    println!(
        "RESULT: {} laps in {} conditions",
        outcome.start_info.tot_no_laps, outcome.start_info.weather.condition
    );

    println!("RESULT: Podium");
    for standing in outcome.final_result.podium.iter() {
        println!(
            "{:3}. car {:3} ({}) {}",
            standing.position, standing.car_no, standing.driver_initials, standing.time_or_gap
        );
    }

    if let Some(fastest_lap) = &outcome.final_result.fastest_lap {
        println!(
            "RESULT: Fastest lap {} by car {} ({}) in lap {}",
            fastest_lap.laptime_fmt,
            fastest_lap.car_no,
            fastest_lap.driver_initials,
            fastest_lap.lap
        );
    }

    println!("RESULT: Points");
    for entry in outcome.final_result.points.iter().filter(|e| e.points > 0) {
        println!(
            "{:3}. car {:3} ({}) {:2} points",
            entry.position, entry.car_no, entry.driver_initials, entry.points
        );
    }
    for (team, points) in outcome.final_result.points_by_team() {
        println!("{:>12}: {:2} points", team, points);
    }

    if sim_opts.debug {
        outcome.race_result.print_lap_and_race_times();
    }

    if let Some(output_path) = &sim_opts.output_path {
        outcome.race_result.write_laptimes_csv(output_path)?;
        println!("INFO: Lap and race times written to {:?}", output_path);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_directives_take_precedence() {
        assert_eq!(log_filter(Some("warn"), true).to_string(), "warn");
        assert_eq!(log_filter(Some("racesim=trace"), false).to_string(), "racesim=trace");
    }

    #[test]
    fn debug_flag_sets_default_level() {
        assert_eq!(log_filter(None, true).to_string(), "debug");
        assert_eq!(log_filter(None, false).to_string(), "info");
    }
}
