// src/media/movie_header.rs
use std::fs::File;
use std::io::{self, Read, Seek, SeekFrom};
use std::path::Path;

const HEADER_LEN: u64 = 8;
const LARGE_HEADER_LEN: u64 = 16;

/// Running time of an ISO base media file (`.mp4`, `.mov`, `.m4v`) read from
/// its movie header. Other containers and unreadable files give `None`.
pub fn video_duration_secs(path: &Path) -> Option<f32> {
    let mut file = File::open(path).ok()?;
    let len = file.metadata().ok()?.len();
    match movie_duration_secs(&mut file, len) {
        Ok(duration) => duration,
        Err(e) => {
            bevy::log::trace!("No movie header in {}: {}", path.display(), e);
            None
        }
    }
}

fn movie_duration_secs<R: Read + Seek>(reader: &mut R, len: u64) -> io::Result<Option<f32>> {
    let Some((moov_start, moov_end)) = find_box(reader, 0, len, b"moov")? else {
        return Ok(None);
    };
    let Some((mvhd_start, _)) = find_box(reader, moov_start, moov_end, b"mvhd")? else {
        return Ok(None);
    };
    read_mvhd(reader, mvhd_start)
}

/// Payload range of the first `kind` box among the siblings in `[start, end)`.
fn find_box<R: Read + Seek>(
    reader: &mut R,
    start: u64,
    end: u64,
    kind: &[u8; 4],
) -> io::Result<Option<(u64, u64)>> {
    let mut pos = start;
    while pos + HEADER_LEN <= end {
        reader.seek(SeekFrom::Start(pos))?;
        let mut header = [0u8; 8];
        reader.read_exact(&mut header)?;
        let (size, header_len) = match u32::from_be_bytes([header[0], header[1], header[2], header[3]]) {
            0 => (end - pos, HEADER_LEN),
            1 => (read_u64(reader)?, LARGE_HEADER_LEN),
            n => (u64::from(n), HEADER_LEN),
        };
        if size < header_len || pos.saturating_add(size) > end {
            return Ok(None);
        }
        if &header[4..8] == kind {
            return Ok(Some((pos + header_len, pos + size)));
        }
        pos += size;
    }
    Ok(None)
}

fn read_mvhd<R: Read + Seek>(reader: &mut R, payload_start: u64) -> io::Result<Option<f32>> {
    reader.seek(SeekFrom::Start(payload_start))?;
    let mut version_flags = [0u8; 4];
    reader.read_exact(&mut version_flags)?;
    let (timescale, duration) = if version_flags[0] == 1 {
        reader.seek(SeekFrom::Current(16))?;
        (read_u32(reader)?, read_u64(reader)?)
    } else {
        reader.seek(SeekFrom::Current(8))?;
        let timescale = read_u32(reader)?;
        match read_u32(reader)? {
            // All ones marks an unknown duration.
            u32::MAX => return Ok(None),
            duration => (timescale, u64::from(duration)),
        }
    };
    if timescale == 0 || duration == 0 {
        return Ok(None);
    }
    Ok(Some((duration as f64 / f64::from(timescale)) as f32))
}

fn read_u32<R: Read>(reader: &mut R) -> io::Result<u32> {
    let mut buf = [0u8; 4];
    reader.read_exact(&mut buf)?;
    Ok(u32::from_be_bytes(buf))
}

fn read_u64<R: Read>(reader: &mut R) -> io::Result<u64> {
    let mut buf = [0u8; 8];
    reader.read_exact(&mut buf)?;
    Ok(u64::from_be_bytes(buf))
}
