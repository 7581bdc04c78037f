mod loader;

pub use loader::{LoadError, load_scenario_from_json, parse_scenario};
