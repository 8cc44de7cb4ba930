mod galaxy_data;
pub use galaxy_data::{GalaxyData, GalaxyQuantity};

mod grid;
pub use grid::Grid2D;

mod imaging;
pub use imaging::Imaging;

mod interferometer;
pub use interferometer::Interferometer;

mod mask;
pub use mask::Mask2D;
