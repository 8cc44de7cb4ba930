//! Linear reconstruction of pixelized sources with regularization

mod linear_inversion;
pub use linear_inversion::{Inversion, InversionImaging, InversionInterferometer};

mod mapper;
pub use mapper::Mapper;

mod operator;
pub use operator::{DataOperator, ImageOperator, VisibilityOperator};

mod pixelization;
pub use pixelization::{Pixelization, PixelizationTrait, Rectangular};

mod regularization;
pub use regularization::{Constant, Regularization, RegularizationTrait, Zeroth};

mod settings;
pub use settings::{SettingsInversion, SettingsPixelization};

mod solver;
pub use solver::{InversionSolver, LinearProblem, LinearSolution};
