use criterion::Criterion;
use galaxy_fit::ndarray::{Array1, Array2};
use galaxy_fit::num_complex::Complex64;
use galaxy_fit::{
    Analysis, AnalysisImaging, AnalysisInterferometer, Constant, Galaxy, Imaging, Interferometer,
    Mask2D, Plane, Rectangular, SettingsFit, SettingsInversion,
};
use rand::prelude::*;
use rand_distr::Normal;
use std::hint::black_box;

fn pixelized_plane(shape: (usize, usize)) -> Plane {
    Plane::new(vec![Galaxy::pixelized(
        1.0,
        Rectangular::new(shape).unwrap().into(),
        Constant::new(1.0).into(),
    )])
}

fn settings(use_linear_operators: bool) -> SettingsFit {
    SettingsFit {
        settings_inversion: SettingsInversion {
            use_linear_operators,
            ..SettingsInversion::default()
        },
        ..SettingsFit::default()
    }
}

pub fn bench_fit_imaging(c: &mut Criterion) {
    const SIDE: usize = 30;

    let mut rng = StdRng::seed_from_u64(0);
    let noise = Normal::new(0.0, 0.1).unwrap();
    let mask = Mask2D::unmasked((SIDE, SIDE), (0.05, 0.05)).unwrap();
    let image: Array1<f64> = (0..SIDE * SIDE)
        .map(|i| (i as f64 * 0.1).sin().abs() + noise.sample(&mut rng))
        .collect();
    let imaging = Imaging::new(image, Array1::from_elem(SIDE * SIDE, 0.1), mask).unwrap();
    let plane = pixelized_plane((12, 12));

    for (name, use_linear_operators) in [
        ("Imaging fit: matrix inversion", false),
        ("Imaging fit: linear operator inversion", true),
    ] {
        let analysis = AnalysisImaging::new(imaging.clone(), settings(use_linear_operators));
        c.bench_function(name, |b| {
            b.iter(|| analysis.log_likelihood_or_penalty(black_box(&plane)));
        });
    }
}

pub fn bench_fit_interferometer(c: &mut Criterion) {
    const SIDE: usize = 15;
    const N_VIS: usize = 200;

    let mut rng = StdRng::seed_from_u64(0);
    let baseline = Normal::new(0.0, 5e4).unwrap();
    let noise = Normal::new(0.0, 1.0).unwrap();
    let uv_wavelengths = Array2::from_shape_simple_fn((N_VIS, 2), || baseline.sample(&mut rng));
    let visibilities: Array1<Complex64> = (0..N_VIS)
        .map(|_| Complex64::new(noise.sample(&mut rng), noise.sample(&mut rng)))
        .collect();
    let mask = Mask2D::unmasked((SIDE, SIDE), (0.1, 0.1)).unwrap();
    let interferometer = Interferometer::new(
        visibilities,
        Array1::from_elem(N_VIS, Complex64::new(1.0, 1.0)),
        uv_wavelengths,
        mask,
    )
    .unwrap();
    let plane = pixelized_plane((7, 7));

    for (name, use_linear_operators) in [
        ("Interferometer fit: matrix inversion", false),
        ("Interferometer fit: linear operator inversion", true),
    ] {
        let analysis =
            AnalysisInterferometer::new(interferometer.clone(), settings(use_linear_operators));
        c.bench_function(name, |b| {
            b.iter(|| analysis.log_likelihood_or_penalty(black_box(&plane)));
        });
    }
}
