//! Regression test for end-to-end cuts
//!
//! Encodes synthetic screenshots, cuts them at a color line from each
//! edge, and checks the decoded crops.

use colorcut::io::{
    ImageFormat, decode_data_url, detect_format, read_image, read_image_mem, write_image,
    write_image_mem,
};
use colorcut::{
    CutDirection, Rect, Rgb, RgbaImage, ScanOptions, ThresholdPolicy, cut_image,
    cut_image_by_color_line, cut_image_bytes_by_color_line, cut_image_file,
    cut_image_to_data_url,
};
use colorcut_test::{RegParams, make_col_bands, make_row_bands, regout_dir};

/// 10x10 content with a 3-row gray header and a 2-column white margin
fn screenshot() -> RgbaImage {
    let mut img = make_row_bands(10, &[(3, [90, 90, 90]), (7, [20, 120, 200])]);
    img.fill_rect(Rect::new(8, 0, 2, 10), [255, 255, 255, 255]);
    img
}

#[test]
fn cut_reg_strip_header() {
    let mut rp = RegParams::new("cut_header");
    let img = screenshot();

    // First row from the top that is mostly blue
    let options = ScanOptions::new()
        .with_target(Rgb::new(20, 120, 200))
        .with_deviation(4)
        .with_threshold(50.0)
        .with_direction(CutDirection::Top)
        .with_policy(ThresholdPolicy::FirstLineOver);

    let cropped = cut_image(&img, &options).unwrap().unwrap();
    rp.compare_values(10.0, cropped.width() as f64, 0.0);
    rp.compare_values(7.0, cropped.height() as f64, 0.0);
    rp.compare_images(&img.clip_rectangle(&Rect::new(0, 3, 10, 7)).unwrap(), &cropped);
    rp.write_image_and_check(&cropped, ImageFormat::Png).unwrap();

    assert!(rp.cleanup());
}

#[test]
fn cut_reg_strip_margin() {
    let mut rp = RegParams::new("cut_margin");
    let png = write_image_mem(&screenshot(), ImageFormat::Png).unwrap();

    // From the right, first column that is less than half white
    let options = ScanOptions::new()
        .with_target(Rgb::WHITE)
        .with_direction(CutDirection::Right)
        .with_policy(ThresholdPolicy::LastLineUnder);

    let out = cut_image_bytes_by_color_line(&png, &options).unwrap().unwrap();
    let decoded = read_image_mem(&out).unwrap();
    // Column 7 is found; Right keeps columns 0..7
    rp.compare_values(7.0, decoded.width() as f64, 0.0);
    rp.compare_values(10.0, decoded.height() as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn cut_reg_not_found_leaves_source() {
    let mut rp = RegParams::new("cut_not_found");
    let path = format!("{}/cut_not_found_src.png", regout_dir());
    write_image(&screenshot(), &path, ImageFormat::Png).unwrap();

    let options = ScanOptions::new()
        .with_target(Rgb::new(255, 0, 255))
        .with_direction(CutDirection::Left);
    let out = cut_image_by_color_line(&path, &options).unwrap();
    rp.compare_values(0.0, out.is_some() as u8 as f64, 0.0);

    let out_path = format!("{}/cut_not_found_dst.png", regout_dir());
    let _ = std::fs::remove_file(&out_path);
    let rect = cut_image_file(&path, &out_path, &options).unwrap();
    rp.compare_rect(None, rect);
    rp.compare_values(0.0, std::path::Path::new(&out_path).exists() as u8 as f64, 0.0);

    assert!(rp.cleanup());
}

#[test]
fn cut_reg_file_to_file() {
    let mut rp = RegParams::new("cut_file");
    let src = make_col_bands(4, &[(3, [0, 0, 0]), (5, [250, 250, 250])]);
    let path = format!("{}/cut_file_src.png", regout_dir());
    let out_path = format!("{}/cut_file_dst.png", regout_dir());
    write_image(&src, &path, ImageFormat::Png).unwrap();

    let options = ScanOptions::new()
        .with_target(Rgb::WHITE)
        .with_deviation(5)
        .with_direction(CutDirection::Left);
    let rect = cut_image_file(&path, &out_path, &options).unwrap();
    rp.compare_rect(Some(Rect::new(3, 0, 5, 4)), rect);

    let written = read_image(&out_path).unwrap();
    rp.compare_images(&src.clip_rectangle(&Rect::new(3, 0, 5, 4)).unwrap(), &written);

    assert!(rp.cleanup());
}

#[test]
fn cut_reg_file_to_jpeg() {
    let mut rp = RegParams::new("cut_jpeg");
    let src = make_row_bands(16, &[(4, [240, 240, 240]), (12, [40, 90, 160])]);
    let path = format!("{}/cut_jpeg_src.png", regout_dir());
    let out_path = format!("{}/cut_jpeg_dst.jpg", regout_dir());
    write_image(&src, &path, ImageFormat::Png).unwrap();

    let options = ScanOptions::new()
        .with_target(Rgb::new(40, 90, 160))
        .with_direction(CutDirection::Top);
    let rect = cut_image_file(&path, &out_path, &options).unwrap();
    rp.compare_rect(Some(Rect::new(0, 4, 16, 12)), rect);

    // The .jpg extension selects the JPEG encoder
    rp.compare_values(
        1.0,
        (detect_format(&out_path).unwrap() == ImageFormat::Jpeg) as u8 as f64,
        0.0,
    );
    let written = read_image(&out_path).unwrap();
    rp.compare_values(16.0, written.width() as f64, 0.0);
    rp.compare_values(12.0, written.height() as f64, 0.0);
    let [r, g, b, _] = written.get_rgba(8, 6).unwrap();
    rp.compare_values(40.0, r as f64, 6.0);
    rp.compare_values(90.0, g as f64, 6.0);
    rp.compare_values(160.0, b as f64, 6.0);

    assert!(rp.cleanup());
}

#[test]
fn cut_reg_data_url() {
    let mut rp = RegParams::new("cut_data_url");
    let path = format!("{}/cut_data_url_src.png", regout_dir());
    write_image(&screenshot(), &path, ImageFormat::Png).unwrap();

    let options = ScanOptions::new()
        .with_target(Rgb::new(20, 120, 200))
        .with_direction(CutDirection::Top);
    let url = cut_image_to_data_url(&path, &options).unwrap().unwrap();
    rp.compare_values(1.0, url.starts_with("data:image/png;base64,") as u8 as f64, 0.0);

    let (format, bytes) = decode_data_url(&url).unwrap();
    rp.compare_values(1.0, (format == ImageFormat::Png) as u8 as f64, 0.0);
    let decoded = read_image_mem(&bytes).unwrap();
    rp.compare_images(&screenshot().clip_rectangle(&Rect::new(0, 3, 10, 7)).unwrap(), &decoded);

    assert!(rp.cleanup());
}
