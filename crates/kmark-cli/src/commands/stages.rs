//! `kmark stages` command implementation.

use std::io::Write;

use kmark::Pipeline;

use crate::error::CliError;

/// List pipeline stages in execution order.
pub(crate) fn execute() -> Result<(), CliError> {
    let mut stdout = std::io::stdout().lock();
    stdout.write_all(stage_listing(&Pipeline::standard()).as_bytes())?;
    stdout.flush()?;
    Ok(())
}

fn stage_listing(pipeline: &Pipeline) -> String {
    pipeline
        .stage_names()
        .enumerate()
        .map(|(i, name)| format!("{:>2}. {name}\n", i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_listing() {
        let listing = stage_listing(&Pipeline::standard());
        let lines: Vec<_> = listing.lines().collect();

        assert_eq!(lines[0], " 1. fenced-code");
        assert_eq!(lines[8], " 9. escape");
        assert_eq!(lines.last(), Some(&"21. em-dash"));
    }
}
