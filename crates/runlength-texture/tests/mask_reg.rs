//! Mask regression test
//!
//! Tests how a mask restricts the computation:
//!   (1) Masked-out voxels break runs and are never counted
//!   (2) Voxels outside the mask produce the zero vector
//!   (3) An isolated inside voxel sees a single run per direction
//!   (4) Custom inside value
//!   (5) Mask geometry must match the image

use runlength_core::NdImage;
use runlength_test::RegParams;
use runlength_texture::{RunLengthFeature, RunLengthTextureFilter, TextureError};

/// Test 1: the last voxel of the 1D example is masked out
#[test]
fn mask_reg_breaks_runs() {
    let mut rp = RegParams::new("mask_breaks_runs");

    let img = NdImage::from_data(&[7], vec![0u8, 0, 0, 1, 1, 0, 0]).expect("image");
    let mask = NdImage::from_data(&[7], vec![1u8, 1, 1, 1, 1, 1, 0]).expect("mask");
    let mut filter = RunLengthTextureFilter::<u8>::new();
    filter.set_uniform_radius(3);
    filter.set_number_of_bins_per_axis(2).expect("bins");
    filter.set_pixel_value_min_max(0, 1).expect("min/max");
    filter.set_offset(vec![1]).expect("offset");

    let out = filter.compute::<f64>(&img, Some(&mask)).expect("compute");
    let center = out.get(&[3]).expect("center");
    // Runs: (bin 0, len 3), (bin 1, len 2), (bin 0, len 1)
    rp.compare_values(14.0 / 3.0, center[RunLengthFeature::LongRunEmphasis], 1e-12);
    rp.compare_values(
        (1.0 / 9.0 + 0.25 + 1.0) / 3.0,
        center[RunLengthFeature::ShortRunEmphasis],
        1e-12,
    );
    rp.check(out.get(&[6]).expect("masked").is_zero(), "masked voxel is zero");

    assert!(rp.cleanup(), "mask_breaks_runs regression test failed");
}

/// Test 2: an empty mask zeroes the whole output
#[test]
fn mask_reg_empty_mask() {
    let mut rp = RegParams::new("mask_empty");

    let img = runlength_test::lcg_noise(&[8, 6], 32, 3).expect("image");
    let mask = img.new_like(0u16);
    let out = RunLengthTextureFilter::<u16>::new()
        .compute::<f64>(&img, Some(&mask))
        .expect("compute");
    rp.check(out.data().iter().all(|v| v.is_zero()), "all features zero");

    assert!(rp.cleanup(), "mask_empty regression test failed");
}

/// Test 3: only the center voxel is inside
#[test]
fn mask_reg_isolated_voxel() {
    let mut rp = RegParams::new("mask_isolated_voxel");

    let img = NdImage::new(&[5, 5], 3u8).expect("image");
    let mut mask = img.new_like(0u8);
    mask.set(&[2, 2], 1).expect("set");

    let mut filter = RunLengthTextureFilter::<u8>::new();
    filter.set_number_of_bins_per_axis(4).expect("bins");
    filter.set_pixel_value_min_max(0, 3).expect("min/max");
    let out = filter.compute::<f64>(&img, Some(&mask)).expect("compute");

    // One run of length 1 in bin 3 (i = 4) for every direction
    let expected = [
        1.0,
        1.0,
        1.0,
        1.0,
        1.0 / 16.0,
        16.0,
        1.0 / 16.0,
        16.0,
        1.0 / 16.0,
        16.0,
    ];
    rp.compare_features(&expected, out.get(&[2, 2]).expect("center"), 1e-12);

    let zeros = out
        .region()
        .iter()
        .filter(|p| p.as_slice() != [2, 2])
        .all(|p| out.get(&p).is_some_and(|v| v.is_zero()));
    rp.check(zeros, "outside voxels are zero");

    assert!(rp.cleanup(), "mask_isolated_voxel regression test failed");
}

/// Test 4: a mask labelled with 2 selects voxels equal to 2
#[test]
fn mask_reg_inside_value() {
    let mut rp = RegParams::new("mask_inside_value");

    let img = runlength_test::ramp(&[6, 6]).expect("image");
    let mut mask = img.new_like(1u16);
    for x in 0..3 {
        for y in 0..6 {
            mask.set(&[x, y], 2).expect("set");
        }
    }

    let mut filter = RunLengthTextureFilter::<u16>::new();
    filter.set_inside_pixel_value(2);
    let out = filter.compute::<f64>(&img, Some(&mask)).expect("compute");
    rp.check(!out.get(&[1, 3]).expect("inside").is_zero(), "inside voxel");
    rp.check(out.get(&[4, 3]).expect("outside").is_zero(), "outside voxel");

    // With the default inside value of 1 the labels swap.
    filter.set_inside_pixel_value(1);
    let swapped = filter.compute::<f64>(&img, Some(&mask)).expect("compute");
    rp.check(swapped.get(&[1, 3]).expect("outside").is_zero(), "swapped outside");
    rp.check(!swapped.get(&[4, 3]).expect("inside").is_zero(), "swapped inside");

    assert!(rp.cleanup(), "mask_inside_value regression test failed");
}

/// Test 5: mismatched mask size or spacing is rejected before any work
#[test]
fn mask_reg_geometry() {
    let mut rp = RegParams::new("mask_geometry");

    let img = NdImage::new(&[4, 4], 1u8).expect("image");
    let filter = RunLengthTextureFilter::<u8>::new();

    let small = NdImage::new(&[4, 3], 1u8).expect("mask");
    let result = filter.compute::<f64>(&img, Some(&small));
    rp.check(
        matches!(result, Err(TextureError::MaskGeometry { .. })),
        "size mismatch rejected",
    );

    let stretched = img.clone().with_spacing(&[1.0, 0.5]).expect("spacing");
    let result = filter.compute::<f64>(&img, Some(&stretched));
    rp.check(result.is_err(), "spacing mismatch rejected");

    assert!(rp.cleanup(), "mask_geometry regression test failed");
}
