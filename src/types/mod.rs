pub mod collection;
pub mod daily;
pub mod parameter;
pub mod snapshot;
pub mod timestep;
pub mod weather_condition;
