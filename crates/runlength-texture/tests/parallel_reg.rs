//! Parallel evaluation regression test
//!
//! Tests that the worker count never changes the result:
//!   (1) 3D noise volume with 1, 2, 3 and 4 workers, bit-identical
//!   (2) Masked 2D image with more workers than rows
//!   (3) Output geometry follows the input

use runlength_core::NdImage;
use runlength_test::{RegParams, lcg_noise, ramp};
use runlength_texture::RunLengthTextureFilter;

fn noise_filter() -> RunLengthTextureFilter<u16> {
    let mut filter = RunLengthTextureFilter::new();
    filter.set_uniform_radius(1);
    filter.set_number_of_bins_per_axis(16).expect("bins");
    filter.set_pixel_value_min_max(0, 15).expect("min/max");
    filter
}

/// Test 1: worker counts 1 to 4 on a 3D volume with 13 directions
#[test]
fn parallel_reg_worker_counts() {
    let mut rp = RegParams::new("parallel_worker_counts");

    let img = lcg_noise(&[9, 7, 5], 16, 7).expect("image");
    let mut filter = noise_filter();
    filter.set_number_of_workers(1).expect("workers");
    let reference = filter.compute::<f64>(&img, None).expect("1 worker");
    rp.check(
        reference.data().iter().any(|v| !v.is_zero()),
        "reference has runs",
    );

    for workers in 2..=4 {
        filter.set_number_of_workers(workers).expect("workers");
        let out = filter.compute::<f64>(&img, None).expect("n workers");
        rp.compare_images(&reference, &out);
    }

    assert!(rp.cleanup(), "parallel_worker_counts regression test failed");
}

/// Test 2: 2D image with a mask, 16 workers over 3 rows
#[test]
fn parallel_reg_masked_many_workers() {
    let mut rp = RegParams::new("parallel_masked");

    let img = lcg_noise(&[11, 3], 16, 99).expect("image");
    let mask = NdImage::from_data(
        &[11, 3],
        (0..33).map(|k| u16::from(k % 3 != 0)).collect(),
    )
    .expect("mask");

    let mut filter = noise_filter();
    filter.set_number_of_workers(1).expect("workers");
    let reference = filter.compute::<f32>(&img, Some(&mask)).expect("1 worker");
    filter.set_number_of_workers(16).expect("workers");
    let out = filter.compute::<f32>(&img, Some(&mask)).expect("16 workers");
    rp.compare_images(&reference, &out);

    // Let the pool size default to the machine.
    let mut auto = noise_filter();
    auto.set_uniform_radius(2);
    let a = auto.compute::<f32>(&img, Some(&mask)).expect("auto");
    auto.set_number_of_workers(2).expect("workers");
    let b = auto.compute::<f32>(&img, Some(&mask)).expect("2 workers");
    rp.compare_images(&a, &b);

    assert!(rp.cleanup(), "parallel_masked regression test failed");
}

/// Test 3: size and spacing are carried to the output
#[test]
fn parallel_reg_geometry() {
    let mut rp = RegParams::new("parallel_geometry");

    let img = ramp(&[4, 3, 2])
        .expect("image")
        .with_spacing(&[0.5, 2.0, 1.25])
        .expect("spacing");
    let out = noise_filter().compute::<f64>(&img, None).expect("compute");
    rp.check(out.size() == img.size(), "size preserved");
    rp.check(out.spacing() == img.spacing(), "spacing preserved");
    rp.compare_values(img.len() as f64, out.len() as f64, 0.0);

    assert!(rp.cleanup(), "parallel_geometry regression test failed");
}
