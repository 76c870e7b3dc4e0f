use super::*;

#[test]
fn canvas_size_rejects_zero_and_oversized() {
    assert!(CanvasSize::new(1920, 1080).is_ok());
    assert!(CanvasSize::new(65535, 1).is_ok());

    let err = CanvasSize::new(0, 1080).unwrap_err();
    assert!(err.is_fatal());
    assert!(CanvasSize::new(1920, 0).is_err());
    assert!(CanvasSize::new(70_000, 1080).is_err());
    assert!(CanvasSize::new(1920, 65536).is_err());
}

#[test]
fn canvas_size_center_is_half_extent() {
    assert_eq!(CanvasSize::REFERENCE.center(), (960.0, 540.0));
    assert_eq!(CanvasSize::new(7, 3).unwrap().center(), (3.5, 1.5));
}

#[test]
fn rgb_quantizes_and_clamps() {
    assert_eq!(Rgb::BACKGROUND.to_rgba8(), [255, 230, 255, 255]);
    assert_eq!(Rgb::NAVY.to_rgba8(), [0, 0, 77, 255]);
    assert_eq!(Rgb::new(1.0, 0.9, 1.9).to_rgba8(), Rgb::BACKGROUND.to_rgba8());
    assert_eq!(Rgb::new(-0.5, f64::NAN, 0.5).to_rgba8(), [0, 0, 128, 255]);
}

#[test]
fn output_index_file_names_are_zero_padded() {
    assert_eq!(OutputIndex(0).file_name(), "000.png");
    assert_eq!(OutputIndex(7).file_name(), "007.png");
    assert_eq!(OutputIndex(42).file_name(), "042.png");
    assert_eq!(OutputIndex(1234).file_name(), "1234.png");
    assert_eq!(OutputIndex(3).to_string(), "003");
    assert_eq!(OutputIndex(3).successor(), OutputIndex(4));
}
