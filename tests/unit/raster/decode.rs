use std::io::Cursor;

use super::*;

fn encode_png(width: u32, height: u32, rgba: Vec<u8>) -> Vec<u8> {
    let img = image::RgbaImage::from_raw(width, height, rgba).unwrap();
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_png_dimensions_and_premul() {
    let prepared = decode_image(&encode_png(1, 1, vec![100, 50, 200, 128])).unwrap();
    assert_eq!(prepared.width, 1);
    assert_eq!(prepared.height, 1);
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[
            ((100u16 * 128 + 127) / 255) as u8,
            ((50u16 * 128 + 127) / 255) as u8,
            ((200u16 * 128 + 127) / 255) as u8,
            128u8
        ]
    );
}

#[test]
fn transparent_pixels_lose_color() {
    let prepared = decode_image(&encode_png(2, 1, vec![9, 9, 9, 0, 10, 20, 30, 255])).unwrap();
    assert_eq!(
        prepared.rgba8_premul.as_slice(),
        &[0, 0, 0, 0, 10, 20, 30, 255]
    );
}

#[test]
fn garbage_bytes_are_an_error() {
    let err = decode_image(b"not an image").unwrap_err();
    assert!(matches!(err, RouteViewError::Decode(_)));
}

#[test]
fn missing_file_names_the_path() {
    let err = load_image(Path::new("/definitely/missing/backdrop.png")).unwrap_err();
    assert!(err.to_string().contains("backdrop.png"));
}
