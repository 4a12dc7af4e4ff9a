//! Greedy row partitioning of a pixmap into brick blocks.
//!
//! Each row is scanned left to right. A run collects contiguous cells of one
//! solid color and closes on a color change, a transparent cell, the MAX_RUN
//! cap, or the end of the row. Transparent cells are never emitted.

use crate::format::{Block, Color, Pixmap, Rgb, MAX_RUN};

/// Partition the pixmap into blocks, row-major, left to right.
/// Rows are produced one at a time, so the caller can consume the sequence
/// incrementally.
pub fn blockize(pixmap: &Pixmap) -> impl Iterator<Item = Block> + '_ {
    (0..pixmap.height).flat_map(move |row| blockize_row(pixmap, row))
}

fn blockize_row(pixmap: &Pixmap, row: usize) -> Vec<Block> {
    let mut blocks = Vec::new();
    // (color, length) of the currently open run
    let mut run: Option<(Rgb, usize)> = None;

    for col in 0..pixmap.width {
        match pixmap.color_at(row, col) {
            Color::None => {
                if let Some((open, length)) = run.take() {
                    blocks.push(make_block(pixmap, col, row, length, open));
                }
            }
            Color::Solid(rgb) => {
                run = match run {
                    Some((open, length)) if open == rgb && length < MAX_RUN => {
                        Some((open, length + 1))
                    }
                    Some((open, length)) => {
                        // color change, or the cap forcing a fresh run of
                        // the same color
                        blocks.push(make_block(pixmap, col, row, length, open));
                        Some((rgb, 1))
                    }
                    None => Some((rgb, 1)),
                };
            }
        }
    }

    if let Some((open, length)) = run {
        blocks.push(make_block(pixmap, pixmap.width, row, length, open));
    }

    blocks
}

/// Build the block ending just before `col`. Pins go wherever the cell
/// directly above is transparent; the top row is always fully pinned.
fn make_block(pixmap: &Pixmap, col: usize, row: usize, length: usize, color: Rgb) -> Block {
    let left = col - length;
    let pins = if row == 0 {
        vec![true; length]
    } else {
        (left..left + length)
            .map(|x| pixmap.color_at(row - 1, x) == Color::None)
            .collect()
    };
    Block {
        left,
        row,
        length,
        pins,
        color,
    }
}
