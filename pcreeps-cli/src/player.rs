use crate::capture::read_records;
use crate::config::PlayArgs;
use anyhow::{Context, bail};
use log::{debug, info, warn};
use pcreeps_core::{Byte, MessageKey, Outbox, Result, ScaledFrame, Screen, Session};
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::PathBuf;
use std::thread;

/// Writes every published frame as a binary PPM image.
#[derive(Debug)]
pub struct PpmScreen {
    out_dir: PathBuf,
    written: usize,
}

impl PpmScreen {
    pub fn new(out_dir: PathBuf) -> Self {
        Self {
            out_dir,
            written: 0,
        }
    }

    pub fn written(&self) -> usize {
        self.written
    }
}

impl Screen for PpmScreen {
    fn on_raster_ready(&mut self, frame: &ScaledFrame) -> Result<()> {
        let path = self.out_dir.join(format!("frame-{:04}.ppm", self.written));
        let file = File::create(&path)
            .with_context(|| format!("Failed to create {}", path.display()))?;

        write_ppm(BufWriter::new(file), frame)?;
        debug!("Wrote {}", path.display());
        self.written += 1;

        Ok(())
    }

    fn show_text(&mut self, text: &str) -> Result<()> {
        info!("[{text}]");
        Ok(())
    }
}

pub fn write_ppm(mut writer: impl Write, frame: &ScaledFrame) -> Result<()> {
    write!(writer, "P6\n{} {}\n255\n", frame.width(), frame.height())?;
    writer.write_all(&frame.to_rgb())?;
    writer.flush()?;

    Ok(())
}

/// A capture has no live sender behind it, so outbound messages are only
/// recorded.
#[derive(Debug, Default)]
pub struct CaptureOutbox {
    pub sent: Vec<(MessageKey, Vec<Byte>)>,
}

impl Outbox for CaptureOutbox {
    fn send(&mut self, key: MessageKey, payload: &[Byte]) -> Result<()> {
        info!("Outbound {key:?} message: {payload:?}");
        self.sent.push((key, payload.to_vec()));
        Ok(())
    }
}

pub struct Player {
    args: PlayArgs,
    session: Session<PpmScreen, CaptureOutbox>,
}

impl Player {
    pub fn create(args: PlayArgs) -> Result<Self> {
        fs::create_dir_all(&args.out_dir)
            .with_context(|| format!("Failed to create {}", args.out_dir.display()))?;

        let session = Session::new(
            args.session_config(),
            PpmScreen::new(args.out_dir.clone()),
            CaptureOutbox::default(),
        );

        Ok(Self { args, session })
    }

    /// Replays the capture, then plays the buffered frames back at the tick
    /// rate. Returns how many images were written.
    pub fn run(&mut self) -> Result<usize> {
        let file = File::open(&self.args.capture)
            .with_context(|| format!("Failed to open {}", self.args.capture.display()))?;
        let records = read_records(BufReader::new(file))?;
        info!("Read {} records", records.len());

        let mut rejected = 0;
        for record in &records {
            if self.session.receive(record.key, &record.payload).is_err() {
                rejected += 1;
            }
        }
        if rejected > 0 {
            warn!("{rejected} records were rejected");
        }

        if self.session.is_loading() && !self.args.autoplay {
            warn!("Transfer did not finish loading, not starting playback (see --autoplay)");
            return Ok(self.session.screen().written());
        }
        if !self.session.start_playback() {
            bail!("Capture contains no usable keyframe");
        }

        let tick = self.session.config().tick;
        while self.session.is_animating() {
            thread::sleep(tick);
            if let Some(report) = self.session.tick() {
                debug!("{report:?}");
            }
        }

        Ok(self.session.screen().written())
    }
}
