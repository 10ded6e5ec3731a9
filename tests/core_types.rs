use imgrotate::image::RGB_DEPTH;
use imgrotate::{Coord, ErrorKind, Pixel, PixelBuffer, RotateError};

#[test]
fn pixel_buffer_rejects_invalid_dimensions() {
    let err = PixelBuffer::blank(0, 3, RGB_DEPTH).err().unwrap();
    assert_eq!(
        err,
        RotateError::InvalidDimensions {
            width: 0,
            height: 3,
        }
    );
    assert_eq!(err.kind(), ErrorKind::Input);

    let err = PixelBuffer::from_pixels(2, 0, RGB_DEPTH, &[]).err().unwrap();
    assert_eq!(
        err,
        RotateError::InvalidDimensions {
            width: 2,
            height: 0,
        }
    );
}

#[test]
fn pixel_buffer_rejects_small_source() {
    let pixels = [Pixel::WHITE; 3];
    let err = PixelBuffer::from_pixels(2, 2, RGB_DEPTH, &pixels)
        .err()
        .unwrap();
    assert_eq!(err, RotateError::BufferTooSmall { needed: 4, got: 3 });
}

#[test]
fn from_pixels_copies_exactly_width_by_height() {
    let mut pixels: Vec<Pixel> = (0u8..6).map(|v| Pixel::new(v, v, v)).collect();
    let buf = PixelBuffer::from_pixels(2, 2, RGB_DEPTH, &pixels).unwrap();
    pixels[0] = Pixel::WHITE;

    assert_eq!(buf.pixels().len(), 4);
    assert_eq!(buf.get(0, 0), Pixel::new(0, 0, 0));
    assert_eq!(buf.get(1, 1), Pixel::new(3, 3, 3));
    assert_eq!(buf.depth(), RGB_DEPTH);
    assert_eq!(buf.max_color(), 255);
}

#[test]
fn blank_canvas_is_black() {
    let buf = PixelBuffer::blank(3, 2, RGB_DEPTH).unwrap();
    assert_eq!((buf.width(), buf.height()), (3, 2));
    assert!(buf.pixels().iter().all(|p| *p == Pixel::BLACK));
    assert_eq!(buf.half_width(), 1.5);
    assert_eq!(buf.half_height(), 1.0);
}

#[test]
fn out_of_range_reads_are_black() {
    let buf = PixelBuffer::from_pixels(2, 2, RGB_DEPTH, &[Pixel::WHITE; 4]).unwrap();
    assert_eq!(buf.get(0, 0), Pixel::WHITE);
    assert_eq!(buf.get(-1, 0), Pixel::BLACK);
    assert_eq!(buf.get(0, -1), Pixel::BLACK);
    assert_eq!(buf.get(2, 0), Pixel::BLACK);
    assert_eq!(buf.get(0, 2), Pixel::BLACK);
    assert_eq!(buf.get(isize::MIN, isize::MAX), Pixel::BLACK);
}

#[test]
fn set_is_bounds_checked() {
    let mut buf = PixelBuffer::blank(2, 2, RGB_DEPTH).unwrap();
    assert!(buf.set(1, 0, Pixel::WHITE));
    assert!(!buf.set(-1, 0, Pixel::WHITE));
    assert!(!buf.set(0, 2, Pixel::WHITE));
    let whites = buf.pixels().iter().filter(|p| **p == Pixel::WHITE).count();
    assert_eq!(whites, 1);
}

#[test]
fn containment_excludes_half_extent_boundary() {
    let buf = PixelBuffer::blank(2, 2, RGB_DEPTH).unwrap();
    assert!(buf.contains_point(Coord::new(-0.5, 0.5)));
    assert!(buf.contains_point(Coord::new(0.999, -0.999)));
    assert!(!buf.contains_point(Coord::new(1.0, 0.0)));
    assert!(!buf.contains_point(Coord::new(-1.0, 0.0)));
    assert!(!buf.contains_point(Coord::new(0.0, 1.0)));
    assert!(!buf.contains_point(Coord::new(0.0, -1.0)));
}
