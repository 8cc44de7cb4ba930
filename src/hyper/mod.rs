//! Hyper-parameters rescaling the data and its noise

mod background_noise;
pub use background_noise::HyperBackgroundNoise;

mod hyper_galaxy;
pub use hyper_galaxy::HyperGalaxy;

mod hyper_images;
pub use hyper_images::HyperImages;

mod image_sky;
pub use image_sky::HyperImageSky;
