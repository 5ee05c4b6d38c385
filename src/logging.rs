use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use env_logger::{Builder, Env, Target};

/// Route log records into `path`.
///
/// Without a file nothing is initialised: records would land on the alternate
/// screen and tear the frame.
pub fn init(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        return Ok(());
    };
    let file = File::create(path)
        .with_context(|| format!("cannot create log file {}", path.display()))?;

    let mut builder = Builder::from_env(Env::default().default_filter_or("apple_container=info"));
    builder.target(Target::Pipe(Box::new(file)));
    builder.format(|buf, record| {
        let module_path = record.module_path().unwrap_or("<unknown>");
        writeln!(
            buf,
            "{} [{}][{}] {}",
            buf.timestamp_millis(),
            record.level(),
            module_path,
            record.args()
        )
    });
    builder.try_init().context("logger already initialised")?;
    Ok(())
}
