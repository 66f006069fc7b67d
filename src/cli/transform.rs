//! `transform` command: run the content pipeline over a file or stdin.

use std::fs;
use std::io::{Read, Write, stdin, stdout};
use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::TransformArgs;
use crate::config::LazyLoadConfig;
use crate::debug;
use crate::transform::{AreaContext, ContentTransformer};

pub fn run_transform(args: &TransformArgs, config: &LazyLoadConfig) -> Result<()> {
    crate::logger::set_verbose(args.verbose);

    let content = read_input(args.input.as_deref())?;

    let transformer = ContentTransformer::new(config.transform.clone());
    // The CLI is its own host; command-line invocations are always an
    // eligible rendering area.
    let output = transformer.transform(&content, AreaContext::Eligible);

    let images = output.matches("data-lazy-src=").count();
    let backgrounds = output.matches("data-lazy-background=").count();
    debug!("transform"; "deferred {} image(s), {} background(s)", images, backgrounds);

    write_output(args.output.as_deref(), &output)
}

fn read_input(input: Option<&Path>) -> Result<String> {
    match input {
        Some(path) if path != Path::new("-") => fs::read_to_string(path)
            .with_context(|| format!("failed to read '{}'", path.display())),
        _ => {
            let mut content = String::new();
            stdin()
                .read_to_string(&mut content)
                .context("failed to read stdin")?;
            Ok(content)
        }
    }
}

fn write_output(output: Option<&Path>, content: &str) -> Result<()> {
    match output {
        Some(path) => fs::write(path, content)
            .with_context(|| format!("failed to write '{}'", path.display())),
        None => {
            let mut stdout = stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
            Ok(())
        }
    }
}
