use super::{HEADER_SIZE, Header, Image, ImageError, MAGIC};

fn with_header(header: Header, payload: &[u8]) -> Vec<u8> {
    let mut bytes = header.to_bytes().to_vec();
    bytes.extend_from_slice(payload);
    bytes
}

#[test]
fn header_layout() {
    let header = Header {
        options: 0x0403_0201,
        static_size: 0x0102,
        ..Header::default()
    };
    let bytes = header.to_bytes();

    assert_eq!(bytes.len(), HEADER_SIZE);
    assert_eq!(
        bytes,
        [0xBE, 0xEF, 0xCA, 0xFE, 0x01, 0x00, 0x00, 0x01, 0x02, 0x03, 0x04, 0x02, 0x01]
    );
    assert_eq!(Header::from_bytes(&bytes), Some(header));
}

#[test]
fn header_too_short() {
    assert_eq!(Header::from_bytes(&MAGIC), None);
}

#[test]
fn image_with_header() {
    let image = Image::from_bytes(with_header(Header::new(2), &[b'h', b'i', 0x01])).unwrap();

    assert!(image.has_header());
    assert_eq!(image.code_offset(), 2);
    assert_eq!(image.static_segment(), b"hi");
    assert_eq!(image.code(), [0x01]);
    assert_eq!(image.payload().len(), 3);
}

#[test]
fn headerless_image() {
    let image = Image::from_bytes(vec![0x60, 0x00, 0xFF, 0x00, 0x01]).unwrap();

    assert!(!image.has_header());
    assert_eq!(image.header(), &Header::default());
    assert_eq!(image.code_offset(), 0);
    assert_eq!(image.code().len(), 5);
    assert_eq!(image.to_bytes(), [0x60, 0x00, 0xFF, 0x00, 0x01]);
}

#[test]
fn empty_buffer_is_headerless() {
    let image = Image::from_bytes(Vec::new()).unwrap();
    assert!(image.code().is_empty());
}

#[test]
fn truncated_header() {
    let err = Image::from_bytes(vec![0xBE, 0xEF, 0xCA, 0xFE, 0x01]).unwrap_err();
    assert!(matches!(err, ImageError::TruncatedHeader(5)));
}

#[test]
fn rejects_unknown_version_and_endianness() {
    let bad_version = Header {
        version: 7,
        ..Header::default()
    };
    let err = Image::from_bytes(with_header(bad_version, &[])).unwrap_err();
    assert_eq!(err.to_string(), "unsupported image version 7 (expected 1)");

    let big_endian = Header {
        endianness: 1,
        ..Header::default()
    };
    let err = Image::from_bytes(with_header(big_endian, &[])).unwrap_err();
    assert!(matches!(err, ImageError::UnsupportedEndianness(1)));
}

#[test]
fn static_size_must_fit_payload() {
    let err = Image::from_bytes(with_header(Header::new(4), &[1, 2])).unwrap_err();
    assert!(matches!(
        err,
        ImageError::StaticOverrun {
            static_size: 4,
            payload: 2
        }
    ));
}

#[test]
fn compose_roundtrips_through_bytes() {
    let image = Image::compose(&[3, b'a', b'b', b'c'], &[0x01]).unwrap();
    let bytes = image.to_bytes();

    assert_eq!(&bytes[..4], &MAGIC);
    assert_eq!(bytes.len(), HEADER_SIZE + 5);
    assert_eq!(Image::from_bytes(bytes).unwrap(), image);
}

#[test]
fn compose_rejects_oversized_payload() {
    let code = vec![0u8; 0x10000];
    let err = Image::compose(&[], &code).unwrap_err();
    assert!(matches!(err, ImageError::TooLarge(0x10000)));
}
