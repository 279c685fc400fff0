//! `kmark render` command implementation.

use std::io::Write;
use std::path::{Path, PathBuf};

use clap::Args;
use kmark::Renderer;
use kmark_config::{CliSettings, Config};

use crate::error::CliError;
use crate::output::Output;

/// Arguments for the render command.
#[derive(Args)]
pub(crate) struct RenderArgs {
    /// Input files. `-` or no path reads from stdin.
    paths: Vec<PathBuf>,

    /// Write HTML to this file instead of stdout.
    #[arg(short, long, conflicts_with = "out_dir")]
    output: Option<PathBuf>,

    /// Write one `<name>.html` per input into this directory.
    #[arg(long)]
    out_dir: Option<PathBuf>,

    /// Path to configuration file (default: auto-discover kmark.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Styling class for the container (overrides config).
    #[arg(long)]
    class: Option<String>,

    /// Wrap output in the container element (default: enabled).
    #[arg(long)]
    container: Option<bool>,

    /// Emit bare HTML without the container element.
    #[arg(long, conflicts_with = "container")]
    no_container: bool,

    /// Enable render memoization (default: enabled).
    #[arg(long)]
    cache: Option<bool>,

    /// Disable render memoization.
    #[arg(long, conflicts_with = "cache")]
    no_cache: bool,

    /// Enable verbose output.
    #[arg(short, long)]
    pub verbose: bool,
}

/// Where a document comes from.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Stdin,
    File(PathBuf),
}

impl Input {
    fn read(&self) -> Result<String, CliError> {
        match self {
            Self::Stdin => Ok(std::io::read_to_string(std::io::stdin())?),
            Self::File(path) => std::fs::read_to_string(path).map_err(|source| CliError::Input {
                path: path.clone(),
                source,
            }),
        }
    }

    /// File name used under `--out-dir`.
    fn output_name(&self) -> String {
        match self {
            Self::Stdin => "stdin.html".to_owned(),
            Self::File(path) => {
                let stem = path
                    .file_stem()
                    .map_or_else(|| "document".into(), |s| s.to_string_lossy());
                format!("{stem}.html")
            }
        }
    }
}

impl RenderArgs {
    /// Execute the render command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration fails or an input or output cannot be
    /// read or written. Rendering itself never fails.
    pub(crate) fn execute(self) -> Result<(), CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            class: self.class.clone(),
            container: self.resolve_container(),
            cache_enabled: self.resolve_cache_enabled(),
        };
        let config = Config::load(self.config.as_deref(), Some(&cli_settings))?;
        if let Some(path) = &config.config_path {
            tracing::info!(path = %path.display(), "Loaded configuration");
        }

        let renderer = Renderer::new(config.renderer_config());
        let inputs = self.inputs();

        let mut documents = Vec::with_capacity(inputs.len());
        let mut cache_hits = 0;
        for input in &inputs {
            let source = input.read()?;
            let rendered = renderer.render_view(Some(&source), None);
            if rendered.from_cache {
                cache_hits += 1;
            }
            tracing::debug!(input = ?input, html_len = rendered.html.len(), "Rendered document");
            documents.push(rendered.html);
        }

        if let Some(out_dir) = &self.out_dir {
            write_documents(out_dir, &inputs, &documents)?;
        } else if let Some(path) = &self.output {
            write_file(path, &documents.join("\n"))?;
        } else {
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(documents.join("\n").as_bytes())?;
            stdout.write_all(b"\n")?;
            stdout.flush()?;
        }

        if self.verbose {
            output.success(&format!(
                "Rendered {} document(s), {cache_hits} from cache",
                documents.len()
            ));
            if let Some(out_dir) = &self.out_dir {
                output.info(&format!("Output directory: {}", out_dir.display()));
            }
        }

        Ok(())
    }

    fn inputs(&self) -> Vec<Input> {
        if self.paths.is_empty() {
            return vec![Input::Stdin];
        }
        self.paths
            .iter()
            .map(|path| {
                if path.as_os_str() == "-" {
                    Input::Stdin
                } else {
                    Input::File(path.clone())
                }
            })
            .collect()
    }

    /// Resolve `container` from --container/--no-container flags.
    fn resolve_container(&self) -> Option<bool> {
        self.no_container.then_some(false).or(self.container)
    }

    /// Resolve `cache_enabled` from --cache/--no-cache flags.
    fn resolve_cache_enabled(&self) -> Option<bool> {
        self.no_cache.then_some(false).or(self.cache)
    }
}

fn write_documents(out_dir: &Path, inputs: &[Input], documents: &[String]) -> Result<(), CliError> {
    std::fs::create_dir_all(out_dir).map_err(|source| CliError::Output {
        path: out_dir.to_path_buf(),
        source,
    })?;
    for (input, html) in inputs.iter().zip(documents) {
        write_file(&out_dir.join(input.output_name()), html)?;
    }
    Ok(())
}

fn write_file(path: &Path, html: &str) -> Result<(), CliError> {
    std::fs::write(path, html).map_err(|source| CliError::Output {
        path: path.to_path_buf(),
        source,
    })
}
