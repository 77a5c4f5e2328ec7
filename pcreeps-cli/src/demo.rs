use crate::capture::{Record, write_records};
use crate::config::DemoArgs;
use anyhow::{Context, bail};
use log::{info, warn};
use pcreeps_core::encode::{MAX_CHANGE_RATIO, change_ratio, diff_rasters};
use pcreeps_core::render::palette;
use pcreeps_core::{Byte, Message, MessageKey, Raster, Result};
use std::fs::File;
use std::io::BufWriter;

/// Walled-in plain with a swamp in the middle.
fn terrain(width: usize, height: usize) -> Raster {
    let mut raster = Raster::blank(width, height);
    for y in 0..height {
        for x in 0..width {
            let border = x == 0 || y == 0 || x + 1 == width || y + 1 == height;
            let swamp = (width / 3..2 * width / 3).contains(&x)
                && (height / 3..height / 2).contains(&y);
            let value = match (border, swamp) {
                (true, _) => palette::WALL,
                (false, true) => palette::SWAMP,
                (false, false) => palette::PLAIN,
            };
            raster.set_pixel(x, y, value);
        }
    }

    raster
}

/// Keyframe plus `frames` deltas of a creep walking the diagonal and leaving
/// a road behind it.
pub fn build_demo(args: &DemoArgs) -> Result<Vec<Record>> {
    if args.width < 3 || args.height < 3 || args.width > 256 || args.height > 256 {
        bail!("Demo terrain must be between 3x3 and 256x256");
    }
    if args.frames > usize::from(Byte::MAX) + 1 {
        bail!("At most 256 frames fit in a slot byte");
    }

    let keyframe = terrain(args.width, args.height);
    let mut records = vec![
        Record::from(&Message::RoomName("demo".into())),
        Record::from(&Message::RoomCount(1)),
        Record::from(&Message::Terrain(keyframe.as_bytes().to_vec())),
    ];

    let span = args.width.min(args.height) - 2;
    let mut previous = keyframe;
    for slot in 0..args.frames {
        let mut next = previous.clone();
        let step = 1 + slot % span;
        if step > 1 {
            next.set_pixel(step - 1, step - 1, palette::ROAD);
        }
        next.set_pixel(step, step, palette::CREEP);

        let ratio = change_ratio(&previous, &next)?;
        if ratio > MAX_CHANGE_RATIO {
            warn!("Frame {slot} changes {:.0}% of the image", ratio * 100.0);
        }

        let payload = diff_rasters(slot as Byte, &previous, &next)?;
        records.push(Record::new(MessageKey::Frame.id(), payload));
        previous = next;
    }
    records.push(Record::from(&Message::EndOfTransfer));

    Ok(records)
}

pub fn write_demo(args: &DemoArgs) -> Result<()> {
    let records = build_demo(args)?;
    let file = File::create(&args.output)
        .with_context(|| format!("Failed to create {}", args.output.display()))?;

    write_records(BufWriter::new(file), &records)?;
    info!("Wrote {} records to {}", records.len(), args.output.display());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use pcreeps_core::{Config, Outbox, ScaledFrame, Screen, Session};
    use std::path::PathBuf;

    struct NullScreen;

    impl Screen for NullScreen {
        fn on_raster_ready(&mut self, _frame: &ScaledFrame) -> Result<()> {
            Ok(())
        }

        fn show_text(&mut self, _text: &str) -> Result<()> {
            Ok(())
        }
    }

    struct NullOutbox;

    impl Outbox for NullOutbox {
        fn send(&mut self, _key: MessageKey, _payload: &[Byte]) -> Result<()> {
            Ok(())
        }
    }

    fn args(frames: usize) -> DemoArgs {
        DemoArgs {
            output: PathBuf::from("unused.cap"),
            frames,
            width: 50,
            height: 50,
        }
    }

    #[test]
    fn demo_capture_loads_into_a_session() {
        let records = build_demo(&args(20)).expect("Failed to build demo");
        let mut session = Session::new(Config::default(), NullScreen, NullOutbox);

        for record in &records {
            session
                .receive(record.key, &record.payload)
                .expect("Demo record rejected");
        }

        assert_eq!(records.len(), 3 + 20 + 1);
        assert_eq!(session.room_name(), "demo");
        assert_eq!(session.frames().stored_count(), 20);
        assert!(!session.is_loading());
    }

    #[test]
    fn demo_playback_leaves_the_creep_at_the_end_of_its_walk() {
        let records = build_demo(&args(5)).expect("Failed to build demo");
        let mut session = Session::new(Config::default(), NullScreen, NullOutbox);
        for record in &records {
            session
                .receive(record.key, &record.payload)
                .expect("Demo record rejected");
        }

        session.start_playback();
        while session.tick().is_some() {}

        let raster = session.current().expect("Keyframe missing");
        assert_eq!(raster.get(5, 5), Some(palette::CREEP));
        assert_eq!(raster.get(4, 4), Some(palette::ROAD));
        assert_eq!(raster.get(0, 0), Some(palette::WALL));
    }

    #[test]
    fn too_many_frames_are_refused() {
        assert_matches!(build_demo(&args(300)), Err(_));
    }
}
