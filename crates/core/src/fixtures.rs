//! Minimal EXIF-bearing JPEG files for tests.
//!
//! Layout: SOI, one APP1 `Exif\0\0` segment holding a little-endian TIFF
//! structure, EOI. No image data follows, which the EXIF reader does not need.

pub const MAKE: u16 = 0x010f;
pub const DATE_TIME: u16 = 0x0132;
pub const DATE_TIME_ORIGINAL: u16 = 0x9003;

const EXIF_IFD_POINTER: u16 = 0x8769;
const TYPE_ASCII: u16 = 2;
const TYPE_LONG: u16 = 4;
const TIFF_HEADER_LEN: usize = 8;

/// Builds a JPEG whose IFD0 carries `primary` and whose Exif sub-IFD carries
/// `exif`. Every value is written as ASCII.
pub fn jpeg_with_exif(primary: &[(u16, &str)], exif: &[(u16, &str)]) -> Vec<u8> {
    let primary_count = primary.len() + usize::from(!exif.is_empty());
    let exif_offset = TIFF_HEADER_LEN + ifd_len(primary_count);
    let exif_len = if exif.is_empty() { 0 } else { ifd_len(exif.len()) };
    let data_offset = exif_offset + exif_len;

    let mut data = Vec::new();
    let mut tiff = Vec::new();
    tiff.extend_from_slice(b"II");
    tiff.extend_from_slice(&42u16.to_le_bytes());
    tiff.extend_from_slice(&(TIFF_HEADER_LEN as u32).to_le_bytes());

    tiff.extend_from_slice(&(primary_count as u16).to_le_bytes());
    for (tag, value) in primary {
        push_ascii_entry(&mut tiff, &mut data, data_offset, *tag, value);
    }
    if !exif.is_empty() {
        push_entry(
            &mut tiff,
            EXIF_IFD_POINTER,
            TYPE_LONG,
            1,
            (exif_offset as u32).to_le_bytes(),
        );
    }
    tiff.extend_from_slice(&0u32.to_le_bytes());

    if !exif.is_empty() {
        tiff.extend_from_slice(&(exif.len() as u16).to_le_bytes());
        for (tag, value) in exif {
            push_ascii_entry(&mut tiff, &mut data, data_offset, *tag, value);
        }
        tiff.extend_from_slice(&0u32.to_le_bytes());
    }

    debug_assert_eq!(tiff.len(), data_offset);
    tiff.extend_from_slice(&data);

    let mut jpeg = vec![0xff, 0xd8, 0xff, 0xe1];
    jpeg.extend_from_slice(&((2 + 6 + tiff.len()) as u16).to_be_bytes());
    jpeg.extend_from_slice(b"Exif\0\0");
    jpeg.extend_from_slice(&tiff);
    jpeg.extend_from_slice(&[0xff, 0xd9]);
    jpeg
}

fn ifd_len(entries: usize) -> usize {
    2 + 12 * entries + 4
}

fn push_ascii_entry(
    ifd: &mut Vec<u8>,
    data: &mut Vec<u8>,
    data_offset: usize,
    tag: u16,
    value: &str,
) {
    let mut bytes = value.as_bytes().to_vec();
    bytes.push(0);
    let count = bytes.len() as u32;

    let field = if bytes.len() <= 4 {
        bytes.resize(4, 0);
        [bytes[0], bytes[1], bytes[2], bytes[3]]
    } else {
        let offset = (data_offset + data.len()) as u32;
        data.extend_from_slice(&bytes);
        if data.len() % 2 == 1 {
            data.push(0);
        }
        offset.to_le_bytes()
    };
    push_entry(ifd, tag, TYPE_ASCII, count, field);
}

fn push_entry(ifd: &mut Vec<u8>, tag: u16, kind: u16, count: u32, field: [u8; 4]) {
    ifd.extend_from_slice(&tag.to_le_bytes());
    ifd.extend_from_slice(&kind.to_le_bytes());
    ifd.extend_from_slice(&count.to_le_bytes());
    ifd.extend_from_slice(&field);
}
