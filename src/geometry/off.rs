use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::str::FromStr;

use glam::Vec3;
use log::{debug, warn};

use super::error::{FormatError, OffError, OffResult};
use super::mesh::Mesh;

const HEADER: &str = "OFF";

// Upper bound for up-front allocation; counts come from untrusted headers.
const MAX_PREALLOC: usize = 1 << 20;

#[derive(Debug, Clone)]
pub struct OffDocument {
    pub mesh: Mesh,
    pub skipped_faces: usize,
    pub edge_count: usize,
}

pub fn open_off(path: impl AsRef<Path>) -> OffResult<OffDocument> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| OffError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_off(BufReader::new(file))
}

pub fn read_off_str(source: &str) -> OffResult<OffDocument> {
    read_off(source.as_bytes())
}

pub fn read_off<R: BufRead>(reader: R) -> OffResult<OffDocument> {
    let mut tokens = Tokenizer::new(reader);
    tokens.expect_header()?;

    let vertex_count: usize = tokens.number("vertex count")?;
    let face_count: usize = tokens.number("face count")?;
    let edge_count: usize = tokens.number("edge count")?;

    let mut mesh = Mesh::with_capacity(
        vertex_count.min(MAX_PREALLOC),
        face_count.min(MAX_PREALLOC),
    );

    for _ in 0..vertex_count {
        let x = tokens.coordinate()?;
        let y = tokens.coordinate()?;
        let z = tokens.coordinate()?;
        mesh.positions.push(Vec3::new(x, y, z));
    }

    let mut skipped_faces = 0;
    for face in 0..face_count {
        let arity: i64 = tokens.number("face vertex count")?;
        if arity != 3 {
            debug!("face {face} has {arity} vertices, skipping");
            skipped_faces += 1;
            tokens.skip_line();
            continue;
        }

        let mut triangle = [0u32; 3];
        for slot in &mut triangle {
            let index: u64 = tokens.number("vertex index")?;
            *slot = u32::try_from(index)
                .ok()
                .filter(|&i| (i as usize) < vertex_count)
                .ok_or_else(|| {
                    tokens.format_error(FormatError::IndexOutOfRange {
                        index,
                        vertex_count,
                    })
                })?;
        }
        // trailing per-face data such as colors
        tokens.skip_line();
        mesh.triangles.push(triangle);
    }

    if skipped_faces > 0 {
        warn!("skipped {skipped_faces} non-triangle face(s) out of {face_count}");
    }

    Ok(OffDocument {
        mesh,
        skipped_faces,
        edge_count,
    })
}

// Line-aware so a face record can be abandoned mid-line.
struct Tokenizer<R> {
    reader: R,
    buf: Vec<u8>,
    line: String,
    cursor: usize,
    line_no: usize,
}

impl<R: BufRead> Tokenizer<R> {
    fn new(reader: R) -> Self {
        Self {
            reader,
            buf: Vec::new(),
            line: String::new(),
            cursor: 0,
            line_no: 0,
        }
    }

    fn advance_line(&mut self) -> OffResult<bool> {
        self.buf.clear();
        self.line.clear();
        self.cursor = 0;
        if self.reader.read_until(b'\n', &mut self.buf)? == 0 {
            return Ok(false);
        }
        self.line_no += 1;

        match std::str::from_utf8(&self.buf) {
            Ok(text) => self.line.push_str(text.trim_end_matches(['\n', '\r'])),
            Err(_) => return Err(self.format_error(FormatError::InvalidEncoding)),
        }
        Ok(true)
    }

    fn expect_header(&mut self) -> OffResult<()> {
        while self.advance_line()? {
            let trimmed = self.line.trim();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed != HEADER {
                return Err(self.format_error(FormatError::MissingHeader));
            }
            self.skip_line();
            return Ok(());
        }
        Err(self.format_error(FormatError::MissingHeader))
    }

    fn next_token(&mut self) -> OffResult<Option<&str>> {
        loop {
            if let Some((start, end)) = token_span(&self.line, self.cursor) {
                self.cursor = end;
                return Ok(Some(&self.line[start..end]));
            }
            if !self.advance_line()? {
                return Ok(None);
            }
        }
    }

    fn number<T: FromStr>(&mut self, expected: &'static str) -> OffResult<T> {
        let parsed = match self.next_token()? {
            Some(token) => token.parse::<T>().map_err(|_| token.to_owned()),
            None => return Err(self.format_error(FormatError::UnexpectedEof { expected })),
        };
        parsed.map_err(|token| self.format_error(FormatError::InvalidNumber { token, expected }))
    }

    fn coordinate(&mut self) -> OffResult<f32> {
        let expected = "vertex coordinate";
        let value: f32 = self.number(expected)?;
        if value.is_finite() {
            return Ok(value);
        }
        // `nan`, `inf` and literals past f32::MAX all parse
        let token = self.line[..self.cursor]
            .rsplit(char::is_whitespace)
            .next()
            .unwrap_or_default()
            .to_owned();
        Err(self.format_error(FormatError::InvalidNumber { token, expected }))
    }

    fn skip_line(&mut self) {
        self.cursor = self.line.len();
    }

    fn format_error(&self, error: FormatError) -> OffError {
        OffError::Format {
            line: self.line_no,
            error,
        }
    }
}

fn token_span(line: &str, from: usize) -> Option<(usize, usize)> {
    let rest = &line[from..];
    let start = from + rest.find(|c: char| !c.is_whitespace())?;
    let len = line[start..]
        .find(char::is_whitespace)
        .unwrap_or(line.len() - start);
    Some((start, start + len))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_span_walks_whitespace() {
        let line = "  3 10\t 2  ";
        assert_eq!(token_span(line, 0), Some((2, 3)));
        assert_eq!(token_span(line, 3), Some((4, 6)));
        assert_eq!(token_span(line, 6), Some((8, 9)));
        assert_eq!(token_span(line, 9), None);
        assert_eq!(token_span("", 0), None);
    }

    #[test]
    fn counts_may_span_lines() {
        let doc = read_off_str("OFF\n3\n1\n0\n0 0 0\n1 0 0\n0 1 0\n3 0 1 2\n").unwrap();
        assert_eq!(doc.mesh.vertex_count(), 3);
        assert_eq!(doc.mesh.triangle_count(), 1);
    }

    #[test]
    fn leading_blank_lines_before_header() {
        let doc = read_off_str("\n   \nOFF\n0 0 0\n").unwrap();
        assert!(doc.mesh.is_empty());
    }

    #[test]
    fn skipped_face_with_arity_on_its_own_line() {
        let src = "OFF\n3 2 0\n0 0 0\n1 0 0\n0 1 0\n4\n3 0 1 2\n";
        let doc = read_off_str(src).unwrap();
        assert_eq!(doc.skipped_faces, 1);
        assert_eq!(doc.mesh.triangles, vec![[0, 1, 2]]);
    }

    #[test]
    fn error_reports_line_number() {
        let src = "OFF\n2 0 0\n0 0 0\n1 x 0\n";
        match read_off_str(src) {
            Err(OffError::Format { line, error }) => {
                assert_eq!(line, 4);
                assert_eq!(
                    error,
                    FormatError::InvalidNumber {
                        token: "x".into(),
                        expected: "vertex coordinate",
                    }
                );
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn invalid_utf8_is_a_format_error() {
        match read_off(&b"OFF\n1 0 0\n0 0 \xff\n"[..]) {
            Err(OffError::Format { line, error }) => {
                assert_eq!(line, 3);
                assert_eq!(error, FormatError::InvalidEncoding);
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn crlf_line_endings() {
        let doc = read_off_str("OFF\r\n3 1 0\r\n0 0 0\r\n1 0 0\r\n0 1 0\r\n3 0 1 2\r\n").unwrap();
        assert_eq!(doc.mesh.triangles, vec![[0, 1, 2]]);
    }
}
