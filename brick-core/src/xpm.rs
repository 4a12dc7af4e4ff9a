//! Parser for the XPM indexed-color text format.
//!
//! Input is line-oriented: a quoted header (`"width height ncolors cwidth"`),
//! `ncolors` quoted palette lines, then `height` quoted pixel rows. Lines
//! before the header that don't start with `"` are preamble and are skipped.
//! Any malformed line aborts the whole parse.

use std::collections::HashMap;
use std::io::{BufRead, Lines};

use crate::format::{Color, Pixmap, Rgb};

#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("header line must contain four integers, got {0:?}")]
    MalformedHeader(String),
    #[error("colormap entry has neither `c None` nor a `c #RRGGBB` token: {0:?}")]
    MalformedColorEntry(String),
    #[error("pixel code {0:?} has no colormap entry")]
    UnknownPixelCode(String),
    #[error("input ended while reading {0}")]
    TruncatedInput(&'static str),
    #[error("line has no quote-delimited payload: {0:?}")]
    UnquotedLine(String),
    #[error("pixel row {row} has {got} characters, expected {want}")]
    ShortPixelRow { row: usize, got: usize, want: usize },
    #[error("read error: {0}")]
    Io(#[from] std::io::Error),
}

/// Parse an XPM document from a line-readable source.
pub fn parse<R: BufRead>(input: R) -> Result<Pixmap, ParseError> {
    let mut lines = input.lines();
    let header = read_header(&mut lines)?;
    let colormap = read_colormap(&mut lines, &header)?;
    let rows = read_pixel_rows(&mut lines, &header, &colormap)?;
    Ok(Pixmap {
        width: header.width,
        height: header.height,
        colormap,
        rows,
    })
}

struct Header {
    width: usize,
    height: usize,
    num_colors: usize,
    cwidth: usize,
}

/// The payload between the first and last double quote of a line.
fn strip_quotes(line: &str) -> Option<&str> {
    let start = line.find('"')?;
    let end = line.rfind('"')?;
    if end <= start {
        return None;
    }
    Some(&line[start + 1..end])
}

/// Skip preamble until the first quoted line, then pull four integers out
/// of it.
fn read_header<R: BufRead>(lines: &mut Lines<R>) -> Result<Header, ParseError> {
    loop {
        let line = match lines.next() {
            Some(line) => line?,
            None => return Err(ParseError::TruncatedInput("header")),
        };
        if !line.starts_with('"') {
            continue;
        }
        let payload =
            strip_quotes(&line).ok_or_else(|| ParseError::UnquotedLine(line.clone()))?;
        let fields: Vec<usize> = payload
            .split_whitespace()
            .map(|tok| tok.parse())
            .collect::<Result<_, _>>()
            .map_err(|_| ParseError::MalformedHeader(payload.to_string()))?;
        if fields.len() != 4 {
            return Err(ParseError::MalformedHeader(payload.to_string()));
        }
        // a zero-width code could never slice a pixel row, and
        // width * cwidth must stay representable for the row length check
        if fields[3] == 0 || fields[0].checked_mul(fields[3]).is_none() {
            return Err(ParseError::MalformedHeader(payload.to_string()));
        }
        return Ok(Header {
            width: fields[0],
            height: fields[1],
            num_colors: fields[2],
            cwidth: fields[3],
        });
    }
}

fn read_colormap<R: BufRead>(
    lines: &mut Lines<R>,
    header: &Header,
) -> Result<HashMap<String, Color>, ParseError> {
    let mut colormap = HashMap::with_capacity(header.num_colors);
    for _ in 0..header.num_colors {
        let line = match lines.next() {
            Some(line) => line?,
            None => return Err(ParseError::TruncatedInput("colormap")),
        };
        let payload =
            strip_quotes(&line).ok_or_else(|| ParseError::UnquotedLine(line.clone()))?;
        let chars: Vec<char> = payload.chars().collect();
        if chars.len() < header.cwidth {
            return Err(ParseError::MalformedColorEntry(payload.to_string()));
        }
        let code: String = chars[..header.cwidth].iter().collect();
        let rest: String = chars[header.cwidth..].iter().collect();
        let color = parse_color_tokens(&rest)
            .ok_or_else(|| ParseError::MalformedColorEntry(payload.to_string()))?;
        colormap.insert(code, color);
    }
    Ok(colormap)
}

/// `c None` wins; otherwise the first `c #` followed by six hex digits.
fn parse_color_tokens(rest: &str) -> Option<Color> {
    if rest.contains("c None") {
        return Some(Color::None);
    }
    for (i, _) in rest.match_indices("c #") {
        if let Some(hex) = rest.get(i + 3..i + 9) {
            if let Some(rgb) = Rgb::from_hex(hex) {
                return Some(Color::Solid(rgb));
            }
        }
    }
    None
}

fn read_pixel_rows<R: BufRead>(
    lines: &mut Lines<R>,
    header: &Header,
    colormap: &HashMap<String, Color>,
) -> Result<Vec<Vec<String>>, ParseError> {
    let want = header.width * header.cwidth;
    let mut rows = Vec::with_capacity(header.height);
    for row in 0..header.height {
        let line = match lines.next() {
            Some(line) => line?,
            None => return Err(ParseError::TruncatedInput("pixel rows")),
        };
        let payload =
            strip_quotes(&line).ok_or_else(|| ParseError::UnquotedLine(line.clone()))?;
        let chars: Vec<char> = payload.chars().collect();
        if chars.len() < want {
            return Err(ParseError::ShortPixelRow {
                row,
                got: chars.len(),
                want,
            });
        }
        let mut cells = Vec::with_capacity(header.width);
        for chunk in chars.chunks(header.cwidth).take(header.width) {
            let code: String = chunk.iter().collect();
            if !colormap.contains_key(&code) {
                return Err(ParseError::UnknownPixelCode(code));
            }
            cells.push(code);
        }
        rows.push(cells);
    }
    Ok(rows)
}
