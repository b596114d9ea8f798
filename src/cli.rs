// ============================================================================
// CudaViz CLI — command-line seeding of the window, or headless export
// ============================================================================
//
// Usage examples:
//   cudaviz                                        (window with the default launch)
//   cudaviz --grid-x 4 --block-x 16 --length 200  (window seeded with these values)
//   cudaviz --print text                           (matrix on stdout, no window)
//   cudaviz --grid-x 100 --print json -o map.json  (gridDim.x clamps to 10)
//
// Dimension values are raw text and go through exactly the same clamping as
// the window's input fields.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::Parser;

use crate::export::ExportFormat;
use crate::grid::DimensionField;
use crate::session::VisualizerSession;

// ============================================================================
// CLI argument definition (clap Derive)
// ============================================================================

/// CUDA grid visualizer.
///
/// Maps gridDim × blockDim onto a flattened array and shows which thread owns
/// each element.
#[derive(Parser, Debug, Default)]
#[command(
    name = "cudaviz",
    about = "Visualize how a CUDA launch grid covers a flattened array",
    long_about = "Opens an interactive window by default. With --print the mapping is\n\
                  written as text, CSV or JSON instead and no window is opened.\n\n\
                  Out-of-range values are clamped (grid ≤ 10, block ≤ 32, length ≤ 4096);\n\
                  unparseable or non-positive values fall back to the defaults."
)]
pub struct CliArgs {
    /// gridDim.x: blocks along x (1-10, default 3).
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub grid_x: Option<String>,

    /// gridDim.y: blocks along y (1-10, default 2).
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub grid_y: Option<String>,

    /// blockDim.x: threads per block along x (1-32, default 8).
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub block_x: Option<String>,

    /// blockDim.y: threads per block along y (1-32, default 4).
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub block_y: Option<String>,

    /// Input array length (1-4096, default 96).
    #[arg(short, long, value_name = "N", allow_hyphen_values = true)]
    pub length: Option<String>,

    /// Print the mapping in this format instead of opening a window.
    #[arg(short, long, value_enum, value_name = "FORMAT")]
    pub print: Option<ExportFormat>,

    /// Write the printed mapping to a file instead of stdout.
    #[arg(short, long, value_name = "FILE", requires = "print")]
    pub output: Option<PathBuf>,

    /// UI language code (en, es). Overrides the saved preference for this run.
    ///
    /// Only the window is translated; --print output is the same in every language.
    #[arg(long, value_name = "CODE")]
    pub language: Option<String>,
}

impl CliArgs {
    /// Raw dimension text in `DimensionField::ALL` order, defaults filled in.
    pub fn raw_dimensions(&self) -> [String; 5] {
        let given = [
            &self.grid_x,
            &self.grid_y,
            &self.block_x,
            &self.block_y,
            &self.length,
        ];
        let mut out = DimensionField::ALL.map(|f| f.default_value().to_string());
        for (slot, value) in out.iter_mut().zip(given) {
            if let Some(v) = value {
                *slot = v.clone();
            }
        }
        out
    }

    pub fn session(&self) -> VisualizerSession {
        VisualizerSession::from_raw_inputs(self.raw_dimensions())
    }

    pub fn is_headless(&self) -> bool {
        self.print.is_some()
    }
}

// ============================================================================
// Public entry point
// ============================================================================

/// Render the requested export and return an OS exit code.
pub fn run(args: CliArgs) -> ExitCode {
    let Some(format) = args.print else {
        eprintln!("error: nothing to print (pass --print text|csv|json).");
        return ExitCode::FAILURE;
    };

    match export(&args, format) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            crate::log_err!("Export failed: {}", e);
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn export(args: &CliArgs, format: ExportFormat) -> Result<(), String> {
    let session = args.session();
    let rendered = format.render(session.mapping())?;

    match &args.output {
        Some(path) => write_file(path, &rendered),
        None => {
            let mut stdout = std::io::stdout().lock();
            stdout
                .write_all(rendered.as_bytes())
                .map_err(|e| format!("could not write to stdout: {}", e))
        }
    }
}

fn write_file(path: &Path, contents: &str) -> Result<(), String> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("could not create '{}': {}", parent.display(), e))?;
    }
    std::fs::write(path, contents)
        .map_err(|e| format!("could not write '{}': {}", path.display(), e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_use_defaults() {
        let args = CliArgs::parse_from(["cudaviz"]);
        assert_eq!(args.raw_dimensions(), ["3", "2", "8", "4", "96"].map(String::from));
        assert!(!args.is_headless());
    }

    #[test]
    fn raw_values_pass_through_clamping() {
        let args = CliArgs::parse_from([
            "cudaviz", "--grid-x", "100", "--block-y", "abc", "--length", "-4", "--print", "csv",
        ]);
        let session = args.session();
        let d = session.dimensions();
        assert_eq!(d.grid_dim_x, 10);
        assert_eq!(d.block_dim_y, 4);
        assert_eq!(d.array_length, 96);
        assert_eq!(args.print, Some(ExportFormat::Csv));
    }

    #[test]
    fn output_requires_print() {
        assert!(CliArgs::try_parse_from(["cudaviz", "-o", "out.txt"]).is_err());
    }

    #[test]
    fn run_without_print_fails() {
        assert_eq!(run(CliArgs::default()), ExitCode::FAILURE);
    }
}
