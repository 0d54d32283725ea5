use egui::{Color32, Pos2, Vec2};
use signature_pad::export::{self, ExportFormat};
use signature_pad::pad::DEFAULT_PRESSURE;
use signature_pad::{ExportError, SignaturePad, data_url};

fn create_signed_pad() -> SignaturePad {
    let mut pad = SignaturePad::with_size(Vec2::new(80.0, 40.0));
    pad.begin_stroke(Pos2::new(10.0, 20.0), 0.0, DEFAULT_PRESSURE);
    pad.extend_stroke(Pos2::new(40.0, 10.0), 0.1, DEFAULT_PRESSURE);
    pad.extend_stroke(Pos2::new(70.0, 30.0), 0.2, DEFAULT_PRESSURE);
    pad.end_stroke();
    pad
}

#[test]
fn test_every_format_has_matching_name_and_mime() {
    let pad = create_signed_pad();
    for (format, mime, name) in [
        (ExportFormat::Png, "image/png", "signature.png"),
        (ExportFormat::Jpeg, "image/jpeg", "signature.jpg"),
        (ExportFormat::Svg, "image/svg+xml", "signature.svg"),
    ] {
        let file = export::export(&pad, format).unwrap();
        assert!(!file.bytes.is_empty());
        assert_eq!(file.mime, mime);
        assert_eq!(file.name, name);
    }
}

#[test]
fn test_raster_exports_decode_to_buffer_size() {
    let pad = create_signed_pad();
    for format in [ExportFormat::Png, ExportFormat::Jpeg] {
        let file = export::export(&pad, format).unwrap();
        let decoded = image::load_from_memory(&file.bytes).unwrap();
        assert_eq!(decoded.width(), pad.buffer().width());
        assert_eq!(decoded.height(), pad.buffer().height());
    }
}

#[test]
fn test_png_export_is_lossless() {
    let pad = create_signed_pad();
    let file = export::export(&pad, ExportFormat::Png).unwrap();
    let decoded = image::load_from_memory(&file.bytes).unwrap().to_rgba8();
    assert_eq!(&decoded, pad.buffer().image());
}

#[test]
fn test_cleared_pad_exports_plain_background() {
    let mut pad = create_signed_pad();
    pad.set_background_color(Color32::from_rgb(200, 220, 240));
    pad.clear();
    let background = [200u8, 220, 240];

    let png = export::export(&pad, ExportFormat::Png).unwrap();
    let png = image::load_from_memory(&png.bytes).unwrap().to_rgb8();
    assert!(png.pixels().all(|p| p.0 == background));

    // JPEG is lossy; a flat image should still come back within rounding
    let jpeg = export::export(&pad, ExportFormat::Jpeg).unwrap();
    let jpeg = image::load_from_memory(&jpeg.bytes).unwrap().to_rgb8();
    assert!(jpeg.pixels().all(|p| {
        p.0.iter()
            .zip(background)
            .all(|(got, want)| (*got as i16 - want as i16).abs() <= 3)
    }));

    let svg = export::export(&pad, ExportFormat::Svg).unwrap();
    let svg = String::from_utf8(svg.bytes).unwrap();
    assert!(svg.contains(r##"fill="#c8dcf0""##));
    assert!(!svg.contains("<path"));
    assert!(!svg.contains("<circle"));
}

#[test]
fn test_svg_export_matches_data_url_payload() {
    let pad = create_signed_pad();
    let url = pad.to_data_url(ExportFormat::Svg).unwrap();
    assert!(url.starts_with("data:image/svg+xml;base64,"));

    let file = export::export(&pad, ExportFormat::Svg).unwrap();
    assert_eq!(file.bytes, data_url::decode(&url).unwrap().bytes);
    assert_eq!(file.bytes, pad.to_svg(true).into_bytes());
}

#[test]
fn test_export_by_mime() {
    let pad = create_signed_pad();
    let file = export::export_mime(&pad, "image/jpeg").unwrap();
    assert_eq!(file.name, "signature.jpg");
    assert!(matches!(
        export::export_mime(&pad, "image/webp"),
        Err(ExportError::UnsupportedMime(_))
    ));
}

#[test]
fn test_download_writes_named_file() {
    let pad = create_signed_pad();
    let dir = std::env::temp_dir().join(format!("signature-pad-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();

    let path = export::download(&pad, ExportFormat::Png, &dir).unwrap();
    assert_eq!(path, dir.join("signature.png"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(image::load_from_memory(&bytes).is_ok());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_download_never_overwrites() {
    let pad = create_signed_pad();
    let dir = std::env::temp_dir().join(format!("signature-pad-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();

    let first = export::download(&pad, ExportFormat::Svg, &dir).unwrap();
    std::fs::write(&first, b"keep me").unwrap();
    let second = export::download(&pad, ExportFormat::Svg, &dir).unwrap();
    let third = export::download(&pad, ExportFormat::Svg, &dir).unwrap();

    assert_eq!(first, dir.join("signature.svg"));
    assert_eq!(second, dir.join("signature (1).svg"));
    assert_eq!(third, dir.join("signature (2).svg"));
    assert_eq!(std::fs::read(&first).unwrap(), b"keep me");
    assert!(std::fs::read_to_string(&second).unwrap().starts_with("<svg"));

    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn test_download_into_missing_dir_fails() {
    let pad = create_signed_pad();
    let dir = std::env::temp_dir()
        .join(format!("signature-pad-missing-{}", uuid::Uuid::new_v4()));
    assert!(matches!(
        export::download(&pad, ExportFormat::Svg, &dir),
        Err(ExportError::Write { .. })
    ));
}
