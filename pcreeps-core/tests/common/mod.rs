use anyhow::bail;
use pcreeps_core::{Byte, Config, MessageKey, Outbox, Result, ScaledFrame, Screen, Session};

/// Keeps every published frame and text in memory.
#[derive(Debug, Default)]
pub struct RecordingScreen {
    pub frames: Vec<ScaledFrame>,
    pub texts: Vec<String>,
}

impl Screen for RecordingScreen {
    fn on_raster_ready(&mut self, frame: &ScaledFrame) -> Result<()> {
        self.frames.push(frame.clone());
        Ok(())
    }

    fn show_text(&mut self, text: &str) -> Result<()> {
        self.texts.push(text.to_owned());
        Ok(())
    }
}

#[derive(Debug, Default)]
pub struct RecordingOutbox {
    pub sent: Vec<(MessageKey, Vec<Byte>)>,
    pub fail: bool,
}

impl Outbox for RecordingOutbox {
    fn send(&mut self, key: MessageKey, payload: &[Byte]) -> Result<()> {
        if self.fail {
            bail!("outbox is closed");
        }
        self.sent.push((key, payload.to_vec()));
        Ok(())
    }
}

pub type TestSession = Session<RecordingScreen, RecordingOutbox>;

#[allow(unused)]
pub fn session() -> TestSession {
    session_with(Config::default())
}

#[allow(unused)]
pub fn session_with(config: Config) -> TestSession {
    Session::new(config, RecordingScreen::default(), RecordingOutbox::default())
}

#[allow(unused)]
pub fn blank_keyframe() -> Vec<Byte> {
    vec![0; 2500]
}
