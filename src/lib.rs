#![doc = include_str!("../README.md")]


pub mod analysis;
pub use analysis::{
    Analysis, AnalysisImaging, AnalysisInterferometer, AnalysisResult, PENALTY_FIGURE_OF_MERIT,
    figure_of_merit_or_penalty,
};

mod data;
pub use data::{GalaxyData, GalaxyQuantity, Grid2D, Imaging, Interferometer, Mask2D};

mod error;
pub use error::FitError;

pub mod fit;
pub use fit::{
    FitData, FitGalaxy, FitImaging, FitInterferometer, FitTrait, FitValue, SettingsFit,
};

mod float_trait;
pub use float_trait::Float;

mod galaxy;
pub use galaxy::{Galaxy, GalaxyKind};

pub mod hyper;
pub use hyper::{HyperBackgroundNoise, HyperGalaxy, HyperImageSky, HyperImages};

pub mod inversion;
pub use inversion::{
    Constant, Inversion, InversionImaging, InversionInterferometer, InversionSolver, Mapper,
    Pixelization, PixelizationTrait, Rectangular, Regularization, RegularizationTrait,
    SettingsInversion, SettingsPixelization, Zeroth,
};

mod plane;
pub use plane::Plane;

mod profiles;
pub use profiles::{LightProfile, MassProfile};

pub mod transformer;
pub use transformer::{Transformer, TransformerDft, TransformerTrait};

mod types;
pub use types::{ARCSEC_TO_RAD, Visibilities, VisibilitiesView};

pub use ndarray;
pub use num_complex;
