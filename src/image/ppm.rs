//! Binary color pixmap (`P6`) codec.
//!
//! Layout: the ASCII magic `P6`, three whitespace separated decimal
//! integers (width, height, max color value), a single whitespace byte, then
//! `width * height` raw RGB triplets in row-major order. A `#` in the header
//! starts a comment that runs to the end of the line. Grayscale pixmaps
//! (`P5`) are recognized and rejected.

use crate::image::{checked_len, Pixel, PixelBuffer, RGB_DEPTH, RGB_MAX_COLOR};
use crate::util::{RotateError, RotateResult};
use std::io::{BufRead, Read, Write};

const MAGIC_RGB: [u8; 2] = *b"P6";
const MAGIC_GRAY: [u8; 2] = *b"P5";

/// Decoded header fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PpmHeader {
    pub width: usize,
    pub height: usize,
    pub max_color: u32,
}

/// Reads a `P6` pixmap from `reader`.
pub fn read_ppm<R: BufRead>(mut reader: R) -> RotateResult<PixelBuffer> {
    let header = read_header(&mut reader)?;
    let len = checked_len(header.width, header.height)?;
    let needed = len
        .checked_mul(3)
        .ok_or(RotateError::InvalidDimensions {
            width: header.width,
            height: header.height,
        })?;

    let mut bytes = Vec::with_capacity(needed);
    reader.take(needed as u64).read_to_end(&mut bytes)?;
    if bytes.len() < needed {
        return Err(RotateError::Truncated {
            needed,
            got: bytes.len(),
        });
    }

    let pixels = bytes
        .chunks_exact(3)
        .map(|rgb| Pixel::new(rgb[0], rgb[1], rgb[2]))
        .collect();
    Ok(PixelBuffer::from_parts(
        pixels,
        header.width,
        header.height,
        RGB_DEPTH,
        header.max_color,
    ))
}

/// Reads and validates the magic and header integers.
///
/// On success the reader is positioned at the first pixel byte.
pub fn read_header<R: BufRead>(reader: &mut R) -> RotateResult<PpmHeader> {
    let mut magic = [0u8; 2];
    let mut got = 0;
    while got < magic.len() {
        match reader.read(&mut magic[got..])? {
            0 => break,
            n => got += n,
        }
    }
    if magic == MAGIC_GRAY {
        return Err(RotateError::Unsupported {
            feature: "grayscale pixmap (P5)",
        });
    }
    if magic != MAGIC_RGB {
        return Err(RotateError::BadMagic { found: magic });
    }

    let mut tokens = HeaderTokens::new(reader);
    let width = tokens.next_uint()?;
    let height = tokens.next_uint()?;
    let max_color = tokens.next_uint()?;

    let width = usize::try_from(width).map_err(|_| RotateError::MalformedHeader {
        reason: "width does not fit in memory",
    })?;
    let height = usize::try_from(height).map_err(|_| RotateError::MalformedHeader {
        reason: "height does not fit in memory",
    })?;
    if width == 0 || height == 0 {
        return Err(RotateError::InvalidDimensions { width, height });
    }
    if max_color == 0 {
        return Err(RotateError::MalformedHeader {
            reason: "max color value must be positive",
        });
    }
    if max_color > u64::from(RGB_MAX_COLOR) {
        return Err(RotateError::Unsupported {
            feature: "16-bit samples",
        });
    }

    Ok(PpmHeader {
        width,
        height,
        max_color: max_color as u32,
    })
}

/// Checks that `buffer` still holds RGB pixels that can be written as `P6`.
pub(crate) fn ensure_writable(buffer: &PixelBuffer) -> RotateResult<()> {
    if buffer.is_released() {
        return Err(RotateError::Released);
    }
    if buffer.depth() != RGB_DEPTH {
        return Err(RotateError::Unsupported {
            feature: "non-RGB depth",
        });
    }
    Ok(())
}

/// Writes `buffer` as a `P6` pixmap.
///
/// Released buffers and buffers whose depth is not RGB are rejected before
/// anything is written.
pub fn write_ppm<W: Write>(buffer: &PixelBuffer, mut writer: W) -> RotateResult<()> {
    ensure_writable(buffer)?;
    write!(
        writer,
        "P6\n{} {}\n{}\n",
        buffer.width(),
        buffer.height(),
        buffer.max_color()
    )?;
    let mut row = Vec::with_capacity(buffer.width() * 3);
    for line in buffer.pixels().chunks_exact(buffer.width().max(1)) {
        row.clear();
        for p in line {
            row.extend_from_slice(&[p.r, p.g, p.b]);
        }
        writer.write_all(&row)?;
    }
    Ok(())
}

fn is_header_space(byte: u8) -> bool {
    matches!(byte, b' ' | b'\t' | b'\n' | b'\r')
}

/// Byte-level tokenizer for the ASCII part of the header.
struct HeaderTokens<'a, R> {
    reader: &'a mut R,
}

impl<'a, R: BufRead> HeaderTokens<'a, R> {
    fn new(reader: &'a mut R) -> Self {
        Self { reader }
    }

    fn next_byte(&mut self) -> RotateResult<Option<u8>> {
        let byte = match self.reader.fill_buf()?.first() {
            Some(&b) => b,
            None => return Ok(None),
        };
        self.reader.consume(1);
        Ok(Some(byte))
    }

    /// Returns the next header byte, collapsing a comment into its line end.
    fn next_char(&mut self) -> RotateResult<Option<u8>> {
        let byte = self.next_byte()?;
        if byte != Some(b'#') {
            return Ok(byte);
        }
        loop {
            match self.next_byte()? {
                Some(b'\n') => return Ok(Some(b'\n')),
                Some(b'\r') => return Ok(Some(b'\r')),
                Some(_) => {}
                None => return Ok(None),
            }
        }
    }

    /// Parses one unsigned decimal token and consumes its terminator.
    fn next_uint(&mut self) -> RotateResult<u64> {
        let mut ch = self.next_char()?;
        while matches!(ch, Some(b) if is_header_space(b)) {
            ch = self.next_char()?;
        }
        let mut value = match ch {
            Some(b @ b'0'..=b'9') => u64::from(b - b'0'),
            Some(_) => {
                return Err(RotateError::MalformedHeader {
                    reason: "expected a decimal integer",
                })
            }
            None => {
                return Err(RotateError::MalformedHeader {
                    reason: "unexpected end of header",
                })
            }
        };

        loop {
            match self.next_char()? {
                Some(b @ b'0'..=b'9') => {
                    value = value
                        .checked_mul(10)
                        .and_then(|v| v.checked_add(u64::from(b - b'0')))
                        .ok_or(RotateError::MalformedHeader {
                            reason: "header value overflows",
                        })?;
                }
                Some(b) if is_header_space(b) => return Ok(value),
                None => return Ok(value),
                Some(_) => {
                    return Err(RotateError::MalformedHeader {
                        reason: "expected whitespace after header value",
                    })
                }
            }
        }
    }
}
