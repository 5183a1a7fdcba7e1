use anyhow::Context;
use helpers::general::{format_laptime, format_racetime};
use serde::{Deserialize, Serialize};
use std::fmt::Write;
use std::path::Path;

/// CarDriverPair is used to store car number and driver initials for post-processing the results.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CarDriverPair {
    pub car_no: u32,
    pub driver_initials: String,
}

/// RaceResult contains all race information that is required for post-processing the results.
/// The outer index of `laptimes` and `racetimes` is the car (same order as `car_driver_pairs`),
/// the inner index is the lap (index 0 = lap 1).
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RaceResult {
    pub race_name: String,
    pub tot_no_laps: u32,
    pub car_driver_pairs: Vec<CarDriverPair>,
    pub laptimes: Vec<Vec<f64>>,
    pub racetimes: Vec<Vec<f64>>,
}

impl RaceResult {
    fn header(&self) -> Vec<String> {
        let mut header = vec!["lap".to_owned()];
        header.extend(
            self.car_driver_pairs
                .iter()
                .map(|pair| format!("{} ({})", pair.car_no, pair.driver_initials)),
        );
        header
    }

    fn table_string(&self, times: &[Vec<f64>], fmt: fn(f64) -> String) -> String {
        let mut table = String::new();

        // writing into a String cannot fail
        let _ = writeln!(&mut table, "{}", self.header().join(", "));
        for lap in 0..self.tot_no_laps as usize {
            let _ = write!(&mut table, "{:3}", lap + 1);
            for times_car in times.iter() {
                let t_fmt = times_car.get(lap).map_or_else(String::new, |&t| fmt(t));
                let _ = write!(&mut table, ", {:>11}", t_fmt);
            }
            table.push('\n');
        }

        table
    }

    /// print_lap_and_race_times prints the resulting lap and race times to the console output.
    pub fn print_lap_and_race_times(&self) {
        println!("RESULT: Lap times");
        println!("{}", self.table_string(&self.laptimes, format_laptime));

        println!("RESULT: Race times");
        println!("{}", self.table_string(&self.racetimes, format_racetime));
    }

    /// write_laptimes_csv writes one row per lap containing the lap time (s) and the race time (s)
    /// of every car.
    pub fn write_laptimes_csv(&self, filepath: &Path) -> anyhow::Result<()> {
        let mut wtr = csv::Writer::from_path(filepath).context(format!(
            "Failed to create result file {}!",
            filepath.display()
        ))?;

        let mut header = vec!["lap".to_owned()];
        for pair in self.car_driver_pairs.iter() {
            header.push(format!("laptime_{}_{}", pair.car_no, pair.driver_initials));
            header.push(format!("racetime_{}_{}", pair.car_no, pair.driver_initials));
        }
        wtr.write_record(&header)?;

        for lap in 0..self.tot_no_laps as usize {
            let mut record = vec![(lap + 1).to_string()];
            for (laptimes_car, racetimes_car) in self.laptimes.iter().zip(self.racetimes.iter()) {
                record.push(fmt_csv_time(laptimes_car.get(lap)));
                record.push(fmt_csv_time(racetimes_car.get(lap)));
            }
            wtr.write_record(&record)?;
        }

        wtr.flush().context(format!(
            "Failed to write result file {}!",
            filepath.display()
        ))?;
        Ok(())
    }
}

fn fmt_csv_time(t: Option<&f64>) -> String {
    t.map_or_else(String::new, |t| format!("{:.3}", t))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result() -> RaceResult {
        RaceResult {
            race_name: "Test".to_owned(),
            tot_no_laps: 2,
            car_driver_pairs: vec![
                CarDriverPair {
                    car_no: 16,
                    driver_initials: "LEC".to_owned(),
                },
                CarDriverPair {
                    car_no: 44,
                    driver_initials: "HAM".to_owned(),
                },
            ],
            laptimes: vec![vec![81.5, 82.25], vec![81.75, 81.0]],
            racetimes: vec![vec![81.5, 163.75], vec![81.75, 162.75]],
        }
    }

    #[test]
    fn laptime_table() {
        let table = result().table_string(&result().laptimes, format_laptime);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "lap, 16 (LEC), 44 (HAM)");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("  1"));
        assert!(lines[1].contains("1:21.500"));
        assert!(lines[2].contains("1:21.000"));
    }

    #[test]
    fn csv_contains_all_laps() {
        let filepath = std::env::temp_dir().join(format!("racesim_{}.csv", std::process::id()));
        result().write_laptimes_csv(&filepath).unwrap();

        let mut rdr = csv::Reader::from_path(&filepath).unwrap();
        let header = rdr.headers().unwrap().clone();
        assert_eq!(header.len(), 5);
        assert_eq!(&header[1], "laptime_16_LEC");

        let rows: Vec<csv::StringRecord> = rdr.records().map(|r| r.unwrap()).collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(&rows[1][0], "2");
        assert_eq!(&rows[1][4], "162.750");

        std::fs::remove_file(&filepath).unwrap();
    }
}
