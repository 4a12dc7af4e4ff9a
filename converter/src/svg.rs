use std::io::Write;

use brick_core::format::{Block, Rgb};

// Layout in SVG user units.
const CELL: i32 = 45;
const PIN_W: i32 = 25;
const PIN_H: i32 = 7;
const PIN_XOFF: i32 = 10;
const PIN_YOFF: i32 = -7;

/// Writes the SVG document incrementally, one block at a time.
pub struct SvgPutter<W: Write> {
    writer: W,
}

impl<W: Write> SvgPutter<W> {
    /// Create a new writer. Emits the document prologue immediately.
    /// The viewBox leaves room above row 0 for the top-edge pins.
    pub fn new(mut writer: W, width: usize, height: usize) -> anyhow::Result<Self> {
        let w = width as i32 * CELL;
        let h = height as i32 * CELL - PIN_YOFF;
        writeln!(writer, r#"<?xml version="1.0" encoding="utf-8" ?>"#)?;
        writeln!(
            writer,
            r#"<svg xmlns="http://www.w3.org/2000/svg" baseProfile="tiny" version="1.2" width="{w}" height="{h}" viewBox="0 {PIN_YOFF} {w} {h}">"#
        )?;
        Ok(Self { writer })
    }

    /// Draw one block: its body rect plus a pin rect per flagged cell.
    pub fn put_block(&mut self, block: &Block) -> anyhow::Result<()> {
        let left = block.left as i32 * CELL;
        let top = block.row as i32 * CELL;
        let stroke = stroke_for(block.color);
        let fill = block.color;

        self.rect(left, top, block.length as i32 * CELL, CELL, &stroke, fill)?;

        for (i, &pin) in block.pins.iter().enumerate() {
            if !pin {
                continue;
            }
            self.rect(
                left + i as i32 * CELL + PIN_XOFF,
                top + PIN_YOFF,
                PIN_W,
                PIN_H,
                &stroke,
                fill,
            )?;
        }
        Ok(())
    }

    fn rect(
        &mut self,
        x: i32,
        y: i32,
        w: i32,
        h: i32,
        stroke: &str,
        fill: Rgb,
    ) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" stroke="{stroke}" fill="{fill}" />"#
        )?;
        Ok(())
    }

    /// Close the document and flush, returning the writer.
    pub fn finish(mut self) -> anyhow::Result<W> {
        writeln!(self.writer, "</svg>")?;
        self.writer.flush()?;
        Ok(self.writer)
    }
}

/// Outlines are black, except on black bricks where they lighten to stay
/// visible.
fn stroke_for(color: Rgb) -> String {
    if color == (Rgb { r: 0, g: 0, b: 0 }) {
        "#666666".to_string()
    } else {
        "#000000".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(blocks: &[Block], width: usize, height: usize) -> String {
        let mut out = SvgPutter::new(Vec::new(), width, height).unwrap();
        for block in blocks {
            out.put_block(block).unwrap();
        }
        String::from_utf8(out.finish().unwrap()).unwrap()
    }

    #[test]
    fn document_shape() {
        let svg = render(&[], 4, 2);
        assert!(svg.starts_with("<?xml"));
        assert!(svg.contains(r#"width="180" height="97""#));
        assert!(svg.trim_end().ends_with("</svg>"));
    }

    #[test]
    fn block_body_and_pins() {
        let block = Block {
            left: 1,
            row: 2,
            length: 2,
            pins: vec![false, true],
            color: Rgb { r: 255, g: 0, b: 0 },
        };
        let svg = render(std::slice::from_ref(&block), 4, 4);
        // body at (45, 90), 90 wide
        assert!(svg.contains(r##"<rect x="45" y="90" width="90" height="45" stroke="#000000" fill="#FF0000" />"##));
        // one pin, over the second cell only
        assert!(svg.contains(r##"<rect x="100" y="83" width="25" height="7" stroke="#000000" fill="#FF0000" />"##));
        assert_eq!(svg.matches("<rect").count(), 2);
    }

    #[test]
    fn black_bricks_get_grey_stroke() {
        let block = Block {
            left: 0,
            row: 0,
            length: 1,
            pins: vec![false],
            color: Rgb { r: 0, g: 0, b: 0 },
        };
        let svg = render(std::slice::from_ref(&block), 1, 1);
        assert!(svg.contains(r##"stroke="#666666""##));
    }
}
