use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};
use pixpress_core::reduce::DEFAULT_MAX_SIZE_KB;

#[derive(Parser, Debug)]
#[command(name = "pixpress")]
#[command(version)]
#[command(about = "Shrink images under a size budget and pull previews out of Sketch files", long_about = None)]
#[command(after_help = "Examples:\n  \
  pixpress optimize assets/img              shrink every image in assets/img to 500KB\n  \
  pixpress optimize hero.png -m 200         shrink a single file to 200KB\n  \
  pixpress extract design.sketch -o out     copy design.sketch previews into out/")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log more detail to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Silence all log output on stderr; status lines still print
    #[arg(short = 'q', long = "quiet", global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Re-encode images as JPEG until each file fits under the budget
    Optimize {
        /// Image file or directory of images
        #[arg(value_name = "PATH")]
        path: PathBuf,

        /// Maximum file size in kilobytes
        #[arg(short = 'm', long = "max-size-kb", value_name = "KB", default_value_t = DEFAULT_MAX_SIZE_KB)]
        max_size_kb: u64,
    },

    /// Copy the rendered preview PNGs out of a .sketch file
    Extract {
        /// Sketch file to unpack
        #[arg(value_name = "SKETCH")]
        sketch: PathBuf,

        /// Where to write previews (default: next to the sketch file)
        #[arg(short = 'o', long = "output-dir", value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },
}

impl Cli {
    /// Log filter used when `RUST_LOG` is not set.
    pub fn default_log_filter(&self) -> &'static str {
        if self.quiet {
            return "off";
        }
        match self.verbose {
            0 => "error",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}
