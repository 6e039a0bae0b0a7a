//! `gmcfg record`: read or update a scenario's best record.

use anyhow::{Context as _, Result, bail};

use super::common::Context;
use crate::gamemode::ConfigKind;
use crate::log;
use crate::record::{self, BestRecord};

pub fn run(ctx: &Context, kind: ConfigKind, name: &str, submit: Option<&[f32]>) -> Result<()> {
    if kind.command().is_none() {
        bail!("{} configs do not keep records", kind.dir_name());
    }

    let mut best = BestRecord::load(&ctx.storage, kind, name);

    if let Some(&[time, real_time]) = submit {
        if best.submit(time, real_time) {
            best.save(&ctx.storage, kind, name)
                .with_context(|| format!("failed to save record for `{name}`"))?;
            log!("record"; "new best for {name}");
        } else {
            log!("record"; "no improvement for {name}");
        }
    } else if !record::exists(&ctx.storage, kind, name) {
        log!("record"; "{name} has not been completed yet");
        return Ok(());
    }

    println!("time: {}", record::format_time(best.time));
    println!("real time: {}", record::format_time(best.real_time));
    println!("real time minus time: {}", record::format_time(best.real_time_minus_time));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gamemode::Storage;
    use crate::settings::Settings;
    use tempfile::TempDir;

    fn context(dir: &TempDir) -> Context {
        Context {
            storage: Storage::new(dir.path()),
            settings: Settings::default(),
        }
    }

    #[test]
    fn test_submit_creates_record() {
        let dir = TempDir::new().unwrap();
        let ctx = context(&dir);

        run(&ctx, ConfigKind::Bmm, "c1a0", Some(&[42.0, 60.0])).unwrap();
        let best = BestRecord::load(&ctx.storage, ConfigKind::Bmm, "c1a0");
        assert_eq!(best.time, 42.0);
        assert_eq!(best.real_time, 60.0);
        assert_eq!(best.real_time_minus_time, 18.0);

        // Reading does not touch the file
        run(&ctx, ConfigKind::Bmm, "c1a0", None).unwrap();
        assert_eq!(BestRecord::load(&ctx.storage, ConfigKind::Bmm, "c1a0"), best);
    }

    #[test]
    fn test_map_kind_is_rejected() {
        let dir = TempDir::new().unwrap();
        assert!(run(&context(&dir), ConfigKind::Map, "c1a0", None).is_err());
    }
}
