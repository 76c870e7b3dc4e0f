use super::*;

#[test]
fn from_bytes_rejects_non_font_data() {
    let err = FontFace::from_bytes(b"not a font".to_vec(), 0).unwrap_err();
    assert!(matches!(err, PresentationError::FontLoad(_)));
}

#[test]
fn from_path_missing_file_is_font_load_error() {
    let err = FontFace::from_path(Path::new("target/unit_fonts/missing.ttf")).unwrap_err();
    assert!(matches!(err, PresentationError::FontLoad(_)));
    assert!(err.to_string().contains("missing.ttf"));
}

#[test]
fn system_sans_reports_family_and_bytes() {
    let Ok(face) = FontFace::system_sans() else {
        eprintln!("skipping: no system fonts installed");
        return;
    };
    assert!(!face.family().trim().is_empty());
    assert!(!face.data().is_empty());

    // Re-registering the same bytes resolves the same family.
    let again = FontFace::from_bytes(face.data().as_ref().clone(), face.index()).unwrap();
    assert_eq!(again.family(), face.family());
}
