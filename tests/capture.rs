//! Capture pipeline integration tests
//!
//! Tests frame/clip encoding without requiring audio/video hardware

use std::io::Cursor;

use glimpse_client::Error;
use glimpse_client::capture::{
    ClipEncoder, ENCODING_CANDIDATES, RECORD_WINDOW, WavEncoder, clip_sample_rate, encode_frame,
    negotiate_encoding,
};
use image::{Rgb, RgbImage};

/// Generate sine wave audio samples
fn generate_sine_samples(frequency: f32, duration_secs: f32, amplitude: f32) -> Vec<f32> {
    let sample_rate = clip_sample_rate();
    let num_samples = (sample_rate as f32 * duration_secs) as usize;
    (0..num_samples)
        .map(|i| {
            let t = i as f32 / sample_rate as f32;
            amplitude * (2.0 * std::f32::consts::PI * frequency * t).sin()
        })
        .collect()
}

#[test]
fn encoded_frame_is_a_jpeg_with_source_dimensions() {
    let image = RgbImage::from_pixel(32, 24, Rgb([120, 80, 40]));
    let frame = encode_frame(&image).unwrap();

    assert_eq!(frame.dimensions(), (32, 24));
    // JPEG SOI marker
    assert_eq!(&frame.data()[0..2], &[0xFF, 0xD8]);
}

#[test]
fn zero_dimension_frame_is_not_ready() {
    let image = RgbImage::new(0, 0);
    let result = encode_frame(&image);

    assert!(matches!(result, Err(Error::NotReady(_))));
}

#[test]
fn frame_data_uri_is_jpeg_tagged() {
    let image = RgbImage::from_pixel(4, 4, Rgb([0, 0, 0]));
    let frame = encode_frame(&image).unwrap();

    assert!(frame.to_data_uri().starts_with("data:image/jpeg;base64,"));
}

#[test]
fn wav_encoder_produces_a_riff_header() {
    let samples = generate_sine_samples(440.0, 0.1, 0.5);
    let wav_data = WavEncoder.encode(&samples, clip_sample_rate()).unwrap();

    assert_eq!(&wav_data[0..4], b"RIFF");
    assert_eq!(&wav_data[8..12], b"WAVE");
    assert!(wav_data.len() > 44); // WAV header is 44 bytes
}

#[test]
fn wav_roundtrip_preserves_sample_count() {
    let original_samples: Vec<f32> = vec![0.0, 0.5, -0.5, 1.0, -1.0, 0.25];
    let wav_data = WavEncoder
        .encode(&original_samples, clip_sample_rate())
        .unwrap();

    let cursor = Cursor::new(wav_data);
    let mut reader = hound::WavReader::new(cursor).unwrap();

    let spec = reader.spec();
    assert_eq!(spec.sample_rate, clip_sample_rate());
    assert_eq!(spec.channels, 1);

    let read_samples: Vec<i16> = reader.samples::<i16>().map(|s| s.unwrap()).collect();
    assert_eq!(read_samples.len(), original_samples.len());
}

#[test]
fn recording_window_is_fixed_at_three_seconds() {
    assert_eq!(RECORD_WINDOW.as_millis(), 3000);
}

#[test]
fn negotiation_walks_the_preference_order() {
    // Everything supported: the most-preferred candidate wins.
    assert_eq!(negotiate_encoding(|_| true), "audio/webm;codecs=opus");

    // Only the third candidate supported: it wins over the sentinel.
    assert_eq!(
        negotiate_encoding(|mime| mime == "audio/ogg;codecs=opus"),
        "audio/ogg;codecs=opus"
    );

    // Nothing supported: the sentinel defers to the environment default.
    assert_eq!(negotiate_encoding(|_| false), "");
}

#[test]
fn preference_list_is_never_empty_and_ends_with_the_sentinel() {
    assert!(ENCODING_CANDIDATES.len() > 1);
    assert_eq!(*ENCODING_CANDIDATES.last().unwrap(), "");
    // Every non-sentinel entry is a concrete MIME type.
    for candidate in &ENCODING_CANDIDATES[..ENCODING_CANDIDATES.len() - 1] {
        assert!(candidate.starts_with("audio/"), "bad candidate {candidate}");
    }
}
