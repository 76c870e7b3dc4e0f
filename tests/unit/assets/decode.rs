use std::io::Cursor;

use super::*;

fn encode_png(img: image::RgbaImage) -> Vec<u8> {
    let mut buf = Vec::new();
    image::DynamicImage::ImageRgba8(img)
        .write_to(&mut Cursor::new(&mut buf), image::ImageFormat::Png)
        .unwrap();
    buf
}

#[test]
fn decode_image_png_dimensions_and_premul() {
    let img = image::RgbaImage::from_raw(1, 1, vec![100u8, 50u8, 200u8, 128u8]).unwrap();

    let prepared = decode_image(&encode_png(img)).unwrap();
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
fn decode_image_rejects_garbage() {
    assert!(decode_image(b"definitely not an image").is_err());
}

#[test]
fn load_image_missing_file_is_image_load_error() {
    let err = load_image(Path::new("target/unit_decode/does-not-exist.png")).unwrap_err();
    assert!(matches!(err, PresentationError::ImageLoad(_)));
    assert!(err.to_string().contains("does-not-exist.png"));
}

#[test]
fn load_image_corrupt_file_is_image_load_error() {
    let dir = Path::new("target").join("unit_decode");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("corrupt.png");
    std::fs::write(&path, b"\x89PNG\r\n\x1a\ntruncated").unwrap();

    let err = load_image(&path).unwrap_err();
    assert!(matches!(err, PresentationError::ImageLoad(_)));
}

#[test]
fn unpremultiply_inverts_opaque_and_clears_transparent() {
    let mut px = vec![10u8, 20, 30, 255, 9, 9, 9, 0, 64, 32, 0, 128];
    unpremultiply_rgba8_in_place(&mut px);
    assert_eq!(&px[0..4], &[10, 20, 30, 255]);
    assert_eq!(&px[4..8], &[0, 0, 0, 0]);
    assert_eq!(&px[8..12], &[128, 64, 0, 128]);
}
