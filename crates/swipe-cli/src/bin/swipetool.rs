use std::path::Path;

use clap::{Parser, Subcommand};

use swipe_cli::commands::decode_ops::DecodeOptions;
use swipe_cli::commands::{config_ops, decode_ops, dict_ops};
use swipe_cli::trace_init::init_tracing;
use swipe_core::dict::DEFAULT_MAX_WORDS;

#[derive(Parser)]
#[command(name = "swipetool", about = "Swipe keyboard dictionary and decoder tool")]
struct Cli {
    /// Write JSON trace logs to this directory instead of stderr
    #[arg(long, global = true)]
    trace_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Compile a word list (`word [frequency]` per line) into a dictionary
    Compile {
        /// Word list file
        words_file: String,
        /// Output dictionary file
        output_file: String,
        /// Maximum number of words to read
        #[arg(long, default_value_t = DEFAULT_MAX_WORDS)]
        max_words: usize,
        /// Write the packed 10-byte node format instead of SWDX
        #[arg(long)]
        packed: bool,
    },
    /// Show dictionary statistics (SWDX or packed, auto-detected)
    Info {
        /// Dictionary file
        file: String,
    },
    /// Look up a word or prefix
    Lookup {
        /// Dictionary file
        dict_file: String,
        /// Word to look up
        word: String,
    },
    /// List all words with their frequencies
    Dump {
        /// Dictionary file
        dict_file: String,
        /// Only words starting with this prefix
        #[arg(long)]
        prefix: Option<String>,
    },
    /// Convert a dictionary to the packed 10-byte node format
    ExportPacked {
        /// Input dictionary file
        dict_file: String,
        /// Output file
        output_file: String,
    },
    /// Decode a gesture path into ranked words
    Decode {
        /// Dictionary file
        dict_file: String,
        /// Points as "x,y x,y ..."
        #[arg(long)]
        points: Option<String>,
        /// JSON file with [[x, y], ...]
        #[arg(long)]
        path_file: Option<String>,
        /// Key layout TOML ([keys] a = [x, y]); defaults to QWERTY
        #[arg(long)]
        layout: Option<String>,
        /// Settings TOML; defaults to the built-in settings
        #[arg(long)]
        settings: Option<String>,
        /// Number of candidates
        #[arg(short, long)]
        n: Option<usize>,
    },
    /// Decode the ideal gesture through a word's keys
    Trace {
        /// Dictionary file
        dict_file: String,
        /// Word to trace
        word: String,
        /// Samples per key
        #[arg(long, default_value = "1")]
        linger: usize,
        /// Key layout TOML; defaults to QWERTY
        #[arg(long)]
        layout: Option<String>,
    },
    /// Export default settings as TOML
    SettingsExport,
    /// Validate a custom settings TOML file
    SettingsValidate {
        /// Path to the TOML file
        file: String,
    },
}

fn main() {
    let cli = Cli::parse();
    let _guard = init_tracing(cli.trace_dir.as_deref().map(Path::new));

    match cli.command {
        Command::Compile {
            words_file,
            output_file,
            max_words,
            packed,
        } => dict_ops::compile(&words_file, &output_file, max_words, packed),
        Command::Info { file } => dict_ops::info(&file),
        Command::Lookup { dict_file, word } => dict_ops::lookup(&dict_file, &word),
        Command::Dump { dict_file, prefix } => dict_ops::dump(&dict_file, prefix.as_deref()),
        Command::ExportPacked {
            dict_file,
            output_file,
        } => dict_ops::export_packed(&dict_file, &output_file),
        Command::Decode {
            dict_file,
            points,
            path_file,
            layout,
            settings,
            n,
        } => {
            let opts = DecodeOptions {
                points: points.as_deref(),
                path_file: path_file.as_deref(),
                layout_file: layout.as_deref(),
                settings_file: settings.as_deref(),
                max_results: n,
            };
            decode_ops::decode_cmd(&dict_file, &opts);
        }
        Command::Trace {
            dict_file,
            word,
            linger,
            layout,
        } => decode_ops::trace_cmd(&dict_file, &word, linger, layout.as_deref()),
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
