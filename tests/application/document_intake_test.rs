use bytes::Bytes;

use digitize::application::services::{DocumentIntake, IncomingFile, IntakeError};
use digitize::domain::{ImageFormat, IntakeChannel};

use crate::helpers::{jpeg_bytes, png_bytes};

const CHANNELS: [IntakeChannel; 2] = [IntakeChannel::DragAndDrop, IntakeChannel::FilePicker];

fn file(content_type: &str, bytes: Bytes) -> IncomingFile {
    IncomingFile {
        filename: "scan".to_string(),
        content_type: content_type.to_string(),
        bytes,
    }
}

#[test]
fn given_jpeg_or_png_when_accepting_through_any_channel_then_returns_document() {
    let intake = DocumentIntake::default();

    for channel in CHANNELS {
        let jpeg = intake.accept(file("image/jpeg", jpeg_bytes(128)), channel).unwrap();
        assert_eq!(jpeg.format, ImageFormat::Jpeg);
        assert_eq!(jpeg.received_via, channel);

        let png = intake.accept(file("image/png", png_bytes(128)), channel).unwrap();
        assert_eq!(png.format, ImageFormat::Png);
        assert_eq!(png.size_bytes(), 128);
    }
}

#[test]
fn given_unsupported_type_when_accepting_then_both_channels_reject_identically() {
    let intake = DocumentIntake::default();

    for content_type in ["application/pdf", "image/gif", "text/plain"] {
        let errors: Vec<_> = CHANNELS
            .iter()
            .map(|channel| {
                intake
                    .accept(file(content_type, png_bytes(128)), *channel)
                    .unwrap_err()
            })
            .collect();

        assert!(matches!(errors[0], IntakeError::InvalidFormat(_)));
        assert_eq!(errors[0], errors[1]);
    }
}

#[test]
fn given_fifteen_megabyte_png_when_accepting_then_rejects_too_large() {
    let intake = DocumentIntake::default();
    let size = 15 * 1024 * 1024;

    let error = intake
        .accept(file("image/png", png_bytes(size)), IntakeChannel::DragAndDrop)
        .unwrap_err();

    assert_eq!(
        error,
        IntakeError::TooLarge {
            size: size as u64,
            limit: 10 * 1024 * 1024,
        }
    );
}

#[test]
fn given_png_declared_as_jpeg_when_accepting_then_rejects_invalid_format() {
    let intake = DocumentIntake::default();

    let error = intake
        .accept(file("image/jpeg", png_bytes(128)), IntakeChannel::FilePicker)
        .unwrap_err();

    assert!(matches!(error, IntakeError::InvalidFormat(_)));
}

#[test]
fn given_empty_file_when_accepting_then_rejects_empty() {
    let intake = DocumentIntake::new(1024);

    let error = intake
        .accept(file("image/png", Bytes::new()), IntakeChannel::FilePicker)
        .unwrap_err();

    assert_eq!(error, IntakeError::Empty);
}
