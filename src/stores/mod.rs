pub mod speed_history;
