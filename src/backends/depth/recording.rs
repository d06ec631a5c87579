// SPDX-License-Identifier: GPL-3.0-only

//! Raw depth recordings
//!
//! A recording is a plain concatenation of frames, each `width * height`
//! little-endian `f32` samples in row-major order. The dimensions are not
//! stored in the file and must be supplied by the reader.

use super::DepthSource;
use crate::errors::SourceError;
use crate::tracking::{DepthFrame, SAMPLE_SIZE, sample_count};
use std::fs::File;
use std::io::{BufReader, ErrorKind, Read, Write};
use std::path::Path;
use tracing::{debug, trace};

/// Reads frames from a raw recording
pub struct RecordingSource<R> {
    reader: R,
    width: u32,
    height: u32,
    buffer: Vec<u8>,
    frames_read: usize,
}

impl RecordingSource<BufReader<File>> {
    /// Open a recording file
    pub fn open(path: &Path, width: u32, height: u32) -> Result<Self, SourceError> {
        let file = File::open(path)?;
        debug!(path = %path.display(), width, height, "Opened depth recording");
        Self::new(BufReader::new(file), width, height)
    }
}

impl<R: Read> RecordingSource<R> {
    /// Wrap a reader; fails for frame sizes no frame could have
    pub fn new(reader: R, width: u32, height: u32) -> Result<Self, SourceError> {
        let frame_bytes = sample_count(width, height)? * SAMPLE_SIZE;
        Ok(Self {
            reader,
            width,
            height,
            buffer: vec![0; frame_bytes],
            frames_read: 0,
        })
    }

    /// Frames successfully decoded so far
    pub fn frames_read(&self) -> usize {
        self.frames_read
    }

    /// Fill the frame buffer; returns the number of bytes read before EOF
    fn fill_buffer(&mut self) -> Result<usize, SourceError> {
        let mut filled = 0;
        while filled < self.buffer.len() {
            match self.reader.read(&mut self.buffer[filled..]) {
                Ok(0) => break,
                Ok(n) => filled += n,
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => return Err(e.into()),
            }
        }
        Ok(filled)
    }
}

impl<R: Read + Send> DepthSource for RecordingSource<R> {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn next_frame(&mut self) -> Result<Option<DepthFrame>, SourceError> {
        let filled = self.fill_buffer()?;
        if filled == 0 {
            debug!(frames = self.frames_read, "Depth recording finished");
            return Ok(None);
        }
        if filled < self.buffer.len() {
            return Err(SourceError::TruncatedFrame {
                expected: self.buffer.len(),
                actual: filled,
            });
        }

        let frame = DepthFrame::from_le_bytes(self.width, self.height, &self.buffer)?;
        self.frames_read += 1;
        trace!(index = self.frames_read, "Read depth frame");
        Ok(Some(frame))
    }
}

/// Append one frame to a recording
pub fn write_frame<W: Write>(writer: &mut W, frame: &DepthFrame) -> Result<(), SourceError> {
    let bytes: Vec<u8> = frame
        .samples()
        .iter()
        .flat_map(|sample| sample.to_le_bytes())
        .collect();
    writer.write_all(&bytes)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::TrackerError;
    use std::io::Cursor;

    #[test]
    fn test_reads_frames_until_eof() {
        let mut data = Vec::new();
        write_frame(&mut data, &DepthFrame::filled(2, 2, 1.0).unwrap()).unwrap();
        write_frame(&mut data, &DepthFrame::filled(2, 2, 2.0).unwrap()).unwrap();

        let mut source = RecordingSource::new(Cursor::new(data), 2, 2).unwrap();
        assert_eq!(source.next_frame().unwrap().unwrap().samples(), &[1.0; 4]);
        assert_eq!(source.next_frame().unwrap().unwrap().samples(), &[2.0; 4]);
        assert!(source.next_frame().unwrap().is_none());
        assert_eq!(source.frames_read(), 2);
    }

    #[test]
    fn test_truncated_frame() {
        let mut data = Vec::new();
        write_frame(&mut data, &DepthFrame::filled(2, 2, 1.0).unwrap()).unwrap();
        data.extend_from_slice(&[0u8; 6]);

        let mut source = RecordingSource::new(Cursor::new(data), 2, 2).unwrap();
        assert!(source.next_frame().unwrap().is_some());
        assert!(matches!(
            source.next_frame(),
            Err(SourceError::TruncatedFrame {
                expected: 16,
                actual: 6
            })
        ));
    }

    #[test]
    fn test_nan_survives_round_trip() {
        let frame = DepthFrame::new(2, 1, vec![f32::NAN, 0.5]).unwrap();
        let mut data = Vec::new();
        write_frame(&mut data, &frame).unwrap();

        let mut source = RecordingSource::new(Cursor::new(data), 2, 1).unwrap();
        let read = source.next_frame().unwrap().unwrap();
        assert!(read.samples()[0].is_nan());
        assert_eq!(read.samples()[1], 0.5);
    }

    #[test]
    fn test_rejects_impossible_frame_size() {
        assert!(matches!(
            RecordingSource::new(Cursor::new(Vec::new()), u32::MAX, u32::MAX),
            Err(SourceError::Frame(TrackerError::TooLarge { .. }))
        ));
        assert!(matches!(
            RecordingSource::new(Cursor::new(Vec::new()), 0, 192),
            Err(SourceError::Frame(TrackerError::EmptyFrame))
        ));
    }
}
