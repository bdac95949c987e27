pub mod states;
pub mod trail;
pub mod params;
pub mod physics;
pub mod integrator;
pub mod controller;
pub mod scenario;
