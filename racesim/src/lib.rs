pub mod core {
    pub mod car;
    pub mod driver;
    pub mod handle_race;
    pub mod laptime;
    pub mod qualifying;
    pub mod race;
    pub mod tireset;
    pub mod track;
}
pub mod error;
pub mod post {
    pub mod race_result;
}
pub mod pre {
    pub mod demo_field;
    pub mod read_sim_pars;
    pub mod sim_opts;
}
