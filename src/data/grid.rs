use crate::data::mask::Mask2D;
use crate::error::FitError;
use crate::types::ARCSEC_TO_RAD;

use ndarray::{Array2, ArrayView1, ArrayView2, Axis};
use serde::{Deserialize, Serialize};

/// `(y, x)` arc-second coordinates, one row per data pixel
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(try_from = "Array2<f64>", into = "Array2<f64>")]
pub struct Grid2D(Array2<f64>);

impl Grid2D {
    pub fn new(coordinates: Array2<f64>) -> Result<Self, FitError> {
        FitError::check_len("grid coordinate pair", 2, coordinates.ncols())?;
        Ok(Self(coordinates))
    }

    pub(crate) fn from_points(points: &[(f64, f64)]) -> Self {
        Self(Array2::from_shape_fn((points.len(), 2), |(i, k)| {
            if k == 0 { points[i].0 } else { points[i].1 }
        }))
    }

    /// Pixel centres of the unmasked pixels, in slim order
    pub fn from_mask(mask: &Mask2D) -> Self {
        let points: Vec<_> = mask
            .unmasked_pixels()
            .map(|(row, col)| mask.pixel_centre(row, col))
            .collect();
        Self::from_points(&points)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.nrows()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    #[inline]
    pub fn coordinates(&self) -> ArrayView2<'_, f64> {
        self.0.view()
    }

    #[inline]
    pub fn point(&self, i: usize) -> ArrayView1<'_, f64> {
        self.0.row(i)
    }

    pub fn in_radians(&self) -> Array2<f64> {
        self.0.mapv(|v| v * ARCSEC_TO_RAD)
    }

    /// `(y_min, y_max, x_min, x_max)`, `None` for an empty grid
    pub fn extent(&self) -> Option<(f64, f64, f64, f64)> {
        if self.is_empty() {
            return None;
        }
        let fold_min_max = |column: ArrayView1<f64>| {
            column.fold((f64::INFINITY, f64::NEG_INFINITY), |(min, max), &v| {
                (min.min(v), max.max(v))
            })
        };
        let (y_min, y_max) = fold_min_max(self.0.column(0));
        let (x_min, x_max) = fold_min_max(self.0.column(1));
        Some((y_min, y_max, x_min, x_max))
    }

    /// Move points lying beyond `border` back onto it
    ///
    /// A point further from the border origin than the closest border point is pulled in along
    /// its radial direction to that border point's radius.
    pub fn relocated_to_border(&self, border: &Grid2D) -> Grid2D {
        let Some(origin) = border.0.mean_axis(Axis(0)) else {
            return self.clone();
        };
        let origin = (origin[0], origin[1]);
        let radius = |y: f64, x: f64| ((y - origin.0).powi(2) + (x - origin.1).powi(2)).sqrt();
        let border_radii: Vec<_> = border.0.rows().into_iter().map(|b| radius(b[0], b[1])).collect();
        let border_min_radius = border_radii.iter().copied().fold(f64::INFINITY, f64::min);

        let mut relocated = self.0.clone();
        for mut point in relocated.rows_mut() {
            let r = radius(point[0], point[1]);
            if r <= border_min_radius {
                continue;
            }
            let closest = border
                .0
                .rows()
                .into_iter()
                .map(|b| (b[0] - point[0]).powi(2) + (b[1] - point[1]).powi(2))
                .enumerate()
                .fold((0, f64::INFINITY), |(i_min, d_min), (i, d)| {
                    if d < d_min { (i, d) } else { (i_min, d_min) }
                })
                .0;
            let move_factor = border_radii[closest] / r;
            if move_factor < 1.0 {
                point[0] = origin.0 + move_factor * (point[0] - origin.0);
                point[1] = origin.1 + move_factor * (point[1] - origin.1);
            }
        }
        Self(relocated)
    }
}

impl From<Grid2D> for Array2<f64> {
    fn from(grid: Grid2D) -> Self {
        grid.0
    }
}

impl TryFrom<Array2<f64>> for Grid2D {
    type Error = FitError;

    fn try_from(coordinates: Array2<f64>) -> Result<Self, Self::Error> {
        Self::new(coordinates)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_abs_diff_eq;
    use galaxy_fit_test_util::mask_7x7;
    use ndarray::array;

    #[test]
    fn requires_two_columns() {
        assert!(Grid2D::new(Array2::zeros((4, 3))).is_err());
        assert!(Grid2D::new(Array2::zeros((4, 2))).is_ok());
    }

    #[test]
    fn deserialization_requires_two_columns() {
        let grid: Grid2D =
            serde_json::from_str(r#"{"v":1,"dim":[2,2],"data":[0.0,1.0,2.0,3.0]}"#).unwrap();
        assert_eq!(grid.extent(), Some((0.0, 2.0, 1.0, 3.0)));
        assert_eq!(
            serde_json::to_string(&grid).unwrap(),
            r#"{"v":1,"dim":[2,2],"data":[0.0,1.0,2.0,3.0]}"#
        );

        let result = serde_json::from_str::<Grid2D>(r#"{"v":1,"dim":[2,1],"data":[0.0,1.0]}"#);
        assert!(result.is_err());
    }

    #[test]
    fn grid_from_mask() {
        let mask = Mask2D::new(mask_7x7(), (1.0, 1.0)).unwrap();
        let grid = Grid2D::from_mask(&mask);
        assert_eq!(grid.len(), 9);
        assert_abs_diff_eq!(grid.point(0), array![1.0, -1.0].view());
        assert_abs_diff_eq!(grid.point(4), array![0.0, 0.0].view());
        assert_abs_diff_eq!(grid.point(8), array![-1.0, 1.0].view());
        assert_eq!(grid.extent(), Some((-1.0, 1.0, -1.0, 1.0)));
    }

    #[test]
    fn radians() {
        let grid = Grid2D::new(array![[648_000.0, -324_000.0]]).unwrap();
        let radians = grid.in_radians();
        assert_abs_diff_eq!(radians[[0, 0]], std::f64::consts::PI, epsilon = 1e-12);
        assert_abs_diff_eq!(radians[[0, 1]], -std::f64::consts::FRAC_PI_2, epsilon = 1e-12);
    }

    #[test]
    fn relocation_pulls_outliers_onto_border() {
        let mask = Mask2D::new(mask_7x7(), (1.0, 1.0)).unwrap();
        let border = mask.border_grid();
        let mut coordinates = Grid2D::from_mask(&mask).0;
        coordinates[[0, 0]] = -100.0;
        let grid = Grid2D::new(coordinates).unwrap();

        let relocated = grid.relocated_to_border(&border);
        let p = relocated.point(0);
        assert!(p[0] < 0.0);
        // the closest border point is the (-1, -1) corner
        assert_abs_diff_eq!(
            (p[0].powi(2) + p[1].powi(2)).sqrt(),
            std::f64::consts::SQRT_2,
            epsilon = 1e-12
        );
        // points inside the border are untouched
        assert_abs_diff_eq!(relocated.point(4), grid.point(4));
        assert_abs_diff_eq!(relocated.point(8), grid.point(8));
    }
}
