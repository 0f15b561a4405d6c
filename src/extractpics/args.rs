use clap::{Parser, Subcommand, ValueEnum};
use extractpics::model::{ExtractMode, ScanMode};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "extractpics", version)]
#[command(about = "Inspect and edit the ExtractPics retention state", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Verbose output (debug logging on stderr)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the whole stored state as JSON
    Show,

    /// List or edit extraction history
    #[command(alias = "h")]
    History {
        #[command(subcommand)]
        action: Option<HistoryAction>,
    },

    /// Show or change preferences
    Prefs {
        #[command(subcommand)]
        action: Option<PrefsAction>,
    },

    /// Show usage statistics
    Stats,

    /// Record one completed extraction
    Record {
        /// Number of images the extraction found
        images: u64,

        /// The extraction ran in batch mode
        #[arg(long)]
        batch: bool,

        /// The extraction used a deep scan
        #[arg(long)]
        deep: bool,
    },

    /// Record a visit (updates the streak)
    Visit,

    /// Email capture prompt state
    Email {
        #[command(subcommand)]
        action: Option<EmailAction>,
    },

    /// Check the stored state without changing it
    Doctor,

    /// Print the state as pretty JSON, suitable for `import`
    Export,

    /// Replace the state with a previously exported file
    Import { file: PathBuf },

    /// Discard all state and start over
    Reset,
}

#[derive(Subcommand, Debug)]
pub enum HistoryAction {
    /// List history, newest first
    #[command(alias = "ls")]
    List,

    /// Add a history entry
    Add {
        url: String,

        /// Number of images found
        #[arg(short = 'n', long, default_value_t = 0)]
        images: u64,

        #[arg(long, value_enum, default_value_t = ScanModeArg::Quick)]
        scan_mode: ScanModeArg,

        #[arg(long)]
        thumbnail: Option<String>,
    },

    /// Remove one entry by id
    #[command(alias = "rm")]
    Remove { id: String },

    /// Remove all entries
    Clear,
}

#[derive(Subcommand, Debug)]
pub enum PrefsAction {
    Show,

    /// Change only the given preferences
    Set {
        #[arg(long, value_enum)]
        scan_mode: Option<ScanModeArg>,

        #[arg(long, value_enum)]
        mode: Option<ExtractModeArg>,

        #[arg(long)]
        sound: Option<bool>,

        #[arg(long)]
        min_width: Option<u32>,
    },
}

#[derive(Subcommand, Debug)]
pub enum EmailAction {
    /// Whether the prompt would be shown now
    Status,
    /// Mark the prompt as shown
    Shown,
    /// Record that contact info was supplied
    Captured,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ScanModeArg {
    Quick,
    Deep,
}

impl From<ScanModeArg> for ScanMode {
    fn from(arg: ScanModeArg) -> Self {
        match arg {
            ScanModeArg::Quick => ScanMode::Quick,
            ScanModeArg::Deep => ScanMode::Deep,
        }
    }
}

#[derive(Copy, Clone, Debug, ValueEnum)]
pub enum ExtractModeArg {
    Single,
    Batch,
}

impl From<ExtractModeArg> for ExtractMode {
    fn from(arg: ExtractModeArg) -> Self {
        match arg {
            ExtractModeArg::Single => ExtractMode::Single,
            ExtractModeArg::Batch => ExtractMode::Batch,
        }
    }
}
