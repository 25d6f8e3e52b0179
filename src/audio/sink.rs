//! Utilities for creating `rodio` sinks from track files.
//!
//! The helper here encapsulates opening and decoding a file and preparing
//! a paused `Sink` at the requested start position.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::time::Duration;

use rodio::{Decoder, OutputStream, Sink, Source};

/// A paused sink for `path` starting at `start_at`, plus the decoded total
/// duration of the file when the decoder knows it.
pub(super) fn create_sink_at(
    stream: &OutputStream,
    path: &Path,
    start_at: Duration,
) -> Result<(Sink, Option<Duration>), String> {
    let file = File::open(path).map_err(|e| format!("failed to open {}: {e}", path.display()))?;

    let source = Decoder::new(BufReader::new(file))
        .map_err(|e| format!("failed to decode {}: {e}", path.display()))?;
    let duration = source.total_duration();

    let sink = Sink::connect_new(stream.mixer());
    sink.pause();
    // `skip_duration` is the fallback seeking primitive; Duration::ZERO is fine.
    sink.append(source.skip_duration(start_at));
    Ok((sink, duration))
}
