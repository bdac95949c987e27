pub mod orbitsim_vis2d;
pub mod headless;
