use std::sync::Arc;

use super::*;

fn fresh_dir(name: &str) -> PathBuf {
    let dir = PathBuf::from("target").join("unit_export").join(name);
    let _ = std::fs::remove_dir_all(&dir);
    std::fs::create_dir_all(&dir).unwrap();
    dir
}

fn write_png(dir: &Path, name: &str) -> PathBuf {
    let path = dir.join(name);
    image::RgbaImage::from_pixel(4, 3, image::Rgba([10, 200, 30, 255]))
        .save(&path)
        .unwrap();
    path
}

fn small_settings(output_dir: PathBuf) -> DeckSettings {
    DeckSettings {
        canvas: CanvasSize::new(80, 60).unwrap(),
        output_dir,
        font: None,
    }
}

#[test]
fn output_path_is_zero_padded() {
    let dir = Path::new("output");
    assert_eq!(output_path(dir, OutputIndex(0)), dir.join("000.png"));
    assert_eq!(output_path(dir, OutputIndex(12)), dir.join("012.png"));
    assert_eq!(output_path(dir, OutputIndex(1000)), dir.join("1000.png"));
}

#[test]
fn failed_slides_consume_an_index_and_leave_a_gap() {
    let dir = fresh_dir("gap");
    let src = fresh_dir("gap_src");
    let good = write_png(&src, "good.png");

    let mut deck = Deck::new(small_settings(dir.clone()));
    deck.push(SlideSpec::image(&good))
        .push(SlideSpec::image(src.join("missing.png")))
        .push(SlideSpec::image(&good));
    assert_eq!(deck.next_index(), OutputIndex(0));

    let report = deck.render().unwrap();
    assert_eq!(deck.next_index(), OutputIndex(3));
    assert_eq!(report.outcomes.len(), 3);
    assert_eq!(report.written_count(), 2);
    assert_eq!(report.skipped_count(), 1);

    let indices: Vec<u32> = report.outcomes.iter().map(|o| o.index.0).collect();
    assert_eq!(indices, vec![0, 1, 2]);
    assert!(matches!(
        &report.outcomes[1].status,
        SlideStatus::Skipped { reason } if reason.contains("image load error")
    ));

    assert!(dir.join("000.png").is_file());
    assert!(!dir.join("001.png").exists());
    assert!(dir.join("002.png").is_file());
}

#[test]
fn text_slides_without_font_are_skipped_not_fatal() {
    let dir = fresh_dir("no_font");
    let mut deck = Deck::with_slides(
        small_settings(dir.clone()),
        vec![SlideSpec::title("x"), SlideSpec::bullets("y", ["z"])],
    );

    let report = deck.render().unwrap();
    assert_eq!(report.written_count(), 0);
    assert_eq!(deck.next_index(), OutputIndex(2));
    for outcome in &report.outcomes {
        assert!(matches!(
            &outcome.status,
            SlideStatus::Skipped { reason } if reason.contains("font load error")
        ));
    }
}

#[test]
fn export_failure_still_advances_counter() {
    let src = fresh_dir("export_fail_src");
    let good = write_png(&src, "good.png");
    let missing_dir = src.join("not-created");

    let mut deck = Deck::with_slides(
        small_settings(missing_dir.clone()),
        vec![SlideSpec::image(&good), SlideSpec::image(&good)],
    );
    let report = deck.render().unwrap();

    assert_eq!(report.written_count(), 0);
    assert_eq!(deck.next_index(), OutputIndex(2));
    assert!(matches!(
        &report.outcomes[0].status,
        SlideStatus::Skipped { reason } if reason.contains("export io error")
    ));
    assert!(!missing_dir.exists());
}

#[test]
fn unallocatable_canvas_aborts_before_any_slide() {
    let dir = fresh_dir("fatal");
    let src = fresh_dir("fatal_src");
    let good = write_png(&src, "good.png");

    let settings = DeckSettings {
        canvas: CanvasSize {
            width: 0,
            height: 60,
        },
        output_dir: dir.clone(),
        font: None,
    };
    let mut deck = Deck::with_slides(settings, vec![SlideSpec::image(&good)]);
    let err = deck.render().unwrap_err();

    assert!(matches!(err, PresentationError::SurfaceCreation(_)));
    assert_eq!(deck.next_index(), OutputIndex(0));
    assert_eq!(std::fs::read_dir(&dir).unwrap().count(), 0);
}

#[test]
fn ensure_output_dir_creates_nested_and_accepts_existing() {
    let root = fresh_dir("mkdir");
    let nested = root.join("a").join("b");
    ensure_output_dir(&nested).unwrap();
    assert!(nested.is_dir());
    ensure_output_dir(&nested).unwrap();

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt as _;
        let mode = std::fs::metadata(&nested).unwrap().permissions().mode();
        assert_eq!(mode & 0o077, 0, "mode {mode:o} is not owner-only");
    }
}

#[test]
fn ensure_output_dir_under_a_file_fails() {
    let root = fresh_dir("mkdir_fail");
    let file = root.join("plain-file");
    std::fs::write(&file, b"x").unwrap();

    let err = ensure_output_dir(&file.join("sub")).unwrap_err();
    assert!(matches!(err, PresentationError::DirectoryCreation(_)));
}

#[test]
fn rendering_again_restarts_numbering() {
    let dir = fresh_dir("rerender");
    let src = fresh_dir("rerender_src");
    let good = write_png(&src, "good.png");

    let mut deck = Deck::with_slides(
        small_settings(dir.clone()),
        vec![SlideSpec::image(&good), SlideSpec::image(&good)],
    );
    let first = deck.render().unwrap();
    let second = deck.render().unwrap();

    assert_eq!(first, second);
    assert_eq!(deck.next_index(), OutputIndex(2));
    assert!(!dir.join("002.png").exists());
}

#[test]
fn text_engine_is_lent_per_slide_and_returned() {
    let face = match FontFace::system_sans() {
        Ok(face) => face,
        Err(e) => {
            eprintln!("skipping: {e}");
            return;
        }
    };
    let dir = fresh_dir("engine_reuse");
    let settings = DeckSettings {
        font: Some(face.clone()),
        ..small_settings(dir.clone())
    };
    let mut text = Some(TextLayoutEngine::new(face.clone()).unwrap());

    let path = render_one(&settings, &SlideSpec::title("a"), OutputIndex(0), &mut text).unwrap();
    assert_eq!(path, dir.join("000.png"));
    let engine = text.as_ref().unwrap();
    assert!(Arc::ptr_eq(engine.face().data(), face.data()));

    // Export into a missing directory fails after drawing; the engine still comes back.
    let missing = DeckSettings {
        output_dir: dir.join("not-created"),
        ..settings.clone()
    };
    let err = render_one(&missing, &SlideSpec::bullets("b", ["c"]), OutputIndex(1), &mut text)
        .unwrap_err();
    assert!(matches!(err, PresentationError::ExportIo(_)));
    assert!(text.is_some());

    // Image slides never borrow it.
    let src = fresh_dir("engine_reuse_src");
    let good = write_png(&src, "good.png");
    render_one(&settings, &SlideSpec::image(&good), OutputIndex(2), &mut text).unwrap();
    assert!(text.is_some());

    let mut none = None;
    let err = render_one(&settings, &SlideSpec::title("d"), OutputIndex(3), &mut none).unwrap_err();
    assert!(matches!(err, PresentationError::FontLoad(_)));
}
