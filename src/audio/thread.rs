use std::path::PathBuf;
use std::sync::mpsc::{Receiver, RecvTimeoutError, Sender, SyncSender};
use std::thread;
use std::time::Duration;

use rodio::{OutputStream, OutputStreamBuilder, Sink};

use super::sink::create_sink_at;
use super::types::{AudioCmd, ClockHandle, EngineEvent, ItemId};

const TICK: Duration = Duration::from_millis(200);
const FADE_STEP: Duration = Duration::from_millis(15);
const MAX_FADE_STEPS: u128 = 64;

/// Everything the audio thread knows about the loaded item.
struct Current {
    item: ItemId,
    path: PathBuf,
    sink: Option<Sink>,
    duration: Option<Duration>,
    /// Position the sink's own clock starts from after a rebuilt seek.
    base: Duration,
    paused: bool,
    /// Set once the sink ran dry while playing, or the file failed to open.
    ended: bool,
    failure: Option<String>,
}

impl Current {
    fn position(&self) -> Duration {
        match &self.sink {
            Some(s) => self.base + s.get_pos(),
            None => Duration::ZERO,
        }
    }
}

pub(super) fn run_audio_thread(
    rx: Receiver<AudioCmd>,
    events: Sender<EngineEvent>,
    clock: ClockHandle,
    ready: SyncSender<Result<(), String>>,
) {
    let mut stream = match OutputStreamBuilder::open_default_stream() {
        Ok(s) => s,
        Err(e) => {
            let _ = ready.send(Err(e.to_string()));
            return;
        }
    };
    // rodio logs to stderr when OutputStream is dropped.
    stream.log_on_drop(false);
    let _ = ready.send(Ok(()));

    let mut current: Option<Current> = None;
    let mut observed: Option<ItemId> = None;

    loop {
        match rx.recv_timeout(TICK) {
            Ok(cmd) => match cmd {
                AudioCmd::Load { item, path } => {
                    if let Some(old) = current.take() {
                        if let Some(s) = old.sink {
                            s.stop();
                        }
                    }
                    current = Some(load(&stream, item, path));
                }
                AudioCmd::Play => {
                    if let Some(cur) = current.as_mut() {
                        if let Some(s) = cur.sink.as_ref() {
                            s.play();
                        }
                        cur.paused = false;
                    }
                }
                AudioCmd::Pause => {
                    if let Some(cur) = current.as_mut() {
                        if let Some(s) = cur.sink.as_ref() {
                            s.pause();
                        }
                        cur.paused = true;
                    }
                }
                AudioCmd::Seek(position) => {
                    if let Some(cur) = current.as_mut() {
                        seek(&stream, cur, position);
                    }
                }
                AudioCmd::Observe(item) => {
                    observed = Some(item);
                }
                AudioCmd::ClearObserver => {
                    observed = None;
                }
                AudioCmd::Quit { fade_out } => {
                    if let Some(s) = current.as_ref().and_then(|c| c.sink.as_ref()) {
                        fade_out_sink(s, fade_out);
                        s.stop();
                    }
                    if let Ok(mut info) = clock.lock() {
                        *info = Default::default();
                    }
                    break;
                }
            },
            Err(RecvTimeoutError::Timeout) => {}
            Err(RecvTimeoutError::Disconnected) => break,
        }

        if let Some(cur) = current.as_mut() {
            if !cur.ended && !cur.paused && cur.sink.as_ref().is_some_and(|s| s.empty()) {
                cur.ended = true;
            }
            if cur.ended && observed == Some(cur.item) {
                observed = None;
                let event = match &cur.failure {
                    Some(reason) => EngineEvent::ItemFailed {
                        item: cur.item,
                        reason: reason.clone(),
                    },
                    None => EngineEvent::ItemFinished(cur.item),
                };
                log::debug!("audio thread: {event:?}");
                if events.send(event).is_err() {
                    log::debug!("audio thread: event receiver dropped");
                }
            }
        }

        if let Ok(mut info) = clock.lock() {
            match current.as_ref() {
                Some(cur) => {
                    info.item = Some(cur.item);
                    info.position = cur.position();
                    info.duration = cur.duration;
                }
                None => *info = Default::default(),
            }
        }
    }
}

fn load(stream: &OutputStream, item: ItemId, path: PathBuf) -> Current {
    match create_sink_at(stream, &path, Duration::ZERO) {
        Ok((sink, duration)) => Current {
            item,
            path,
            sink: Some(sink),
            duration,
            base: Duration::ZERO,
            paused: true,
            ended: false,
            failure: None,
        },
        Err(reason) => {
            log::warn!("audio thread: {reason}");
            Current {
                item,
                path,
                sink: None,
                duration: None,
                base: Duration::ZERO,
                paused: true,
                ended: true,
                failure: Some(reason),
            }
        }
    }
}

fn seek(stream: &OutputStream, cur: &mut Current, position: Duration) {
    if cur.failure.is_some() {
        return;
    }
    let position = match cur.duration {
        Some(d) => position.min(d),
        None => position,
    };

    if !cur.ended {
        if let Some(s) = cur.sink.as_ref() {
            match s.try_seek(position) {
                Ok(()) => {
                    cur.base = Duration::ZERO;
                    return;
                }
                Err(e) => log::debug!("audio thread: seek failed, rebuilding sink: {e}"),
            }
        }
    }

    // Drained sinks and decoders without seek support: reopen and skip ahead.
    match create_sink_at(stream, &cur.path, position) {
        Ok((sink, _)) => {
            if let Some(old) = cur.sink.replace(sink) {
                old.stop();
            }
            if let Some(s) = cur.sink.as_ref() {
                if !cur.paused {
                    s.play();
                }
            }
            cur.base = position;
            cur.ended = false;
        }
        Err(reason) => log::warn!("audio thread: {reason}"),
    }
}

/// Volume levels, ending in silence, for fading out from `start` over
/// `fade_out`, and the pause between them. Longer fades get more steps.
pub(super) fn fade_levels(start: f32, fade_out: Duration) -> (Vec<f32>, Duration) {
    let steps = (fade_out.as_millis() / FADE_STEP.as_millis()).clamp(1, MAX_FADE_STEPS) as u32;
    let pause = fade_out / steps;
    let levels = (1..=steps)
        .map(|i| start * (1.0 - i as f32 / steps as f32))
        .collect();
    (levels, pause)
}

fn fade_out_sink(sink: &Sink, fade_out: Duration) {
    let (levels, pause) = fade_levels(sink.volume(), fade_out);
    for level in levels {
        sink.set_volume(level);
        if !pause.is_zero() {
            thread::sleep(pause);
        }
    }
}
