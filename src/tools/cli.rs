use clap::Parser;
use std::io::Read;
use std::path::PathBuf;
use std::{fmt::Display, fmt::Formatter};

/// Verbosity of user information
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Verbosity {
    Quiet,
    Errors,
    Warnings,
    Info,
    Debug,
    Trace,
}

impl Verbosity {
    /// The log level matching this verbosity.
    pub fn level_filter(self) -> log::LevelFilter {
        match self {
            Verbosity::Quiet => log::LevelFilter::Off,
            Verbosity::Errors => log::LevelFilter::Error,
            Verbosity::Warnings => log::LevelFilter::Warn,
            Verbosity::Info => log::LevelFilter::Info,
            Verbosity::Debug => log::LevelFilter::Debug,
            Verbosity::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Encode, Decode, Tree, Compress, Decompress
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mode {
    Encode,
    Decode,
    Tree,
    Compress,
    Decompress,
}
impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// Where the text to work on comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Text(String),
    File(PathBuf),
    Stdin,
}

impl Input {
    /// Read the whole input as text.
    pub fn read(&self) -> std::io::Result<String> {
        match self {
            Input::Text(text) => Ok(text.clone()),
            Input::File(path) => std::fs::read_to_string(path),
            Input::Stdin => {
                let mut text = String::new();
                std::io::stdin().read_to_string(&mut text)?;
                Ok(text)
            }
        }
    }
}

/// Define the two output channels
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Output {
    File(PathBuf),
    Stdout,
}
impl Display for Output {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Output::File(path) => write!(f, "{}", path.display()),
            Output::Stdout => write!(f, "stdout"),
        }
    }
}

/// Settings the rest of the program runs from, built from the command line.
#[derive(Debug, Clone)]
pub struct HuffOpts {
    /// What to do
    pub op_mode: Mode,
    /// Text to encode, or the source text whose tree decodes `bits`
    pub input: Input,
    /// Bit string to decode (decode mode)
    pub bits: Option<String>,
    /// Location where output is sent
    pub output: Output,
    /// Emit Graphviz DOT instead of an outline (tree mode)
    pub dot: bool,
    /// Verbosity of user information
    pub verbose: Verbosity,
}

impl HuffOpts {
    pub fn new() -> Self {
        Self {
            op_mode: Mode::Encode,
            input: Input::Stdin,
            bits: None,
            output: Output::Stdout,
            dot: false,
            verbose: Verbosity::Warnings,
        }
    }

    /// Convert parsed arguments into settings.
    pub fn from_args(args: Args) -> Self {
        let mut opts = HuffOpts::new();
        opts.verbose = match (args.quiet, args.verbose) {
            (true, _) => Verbosity::Quiet,
            (false, 0) => Verbosity::Warnings,
            (false, 1) => Verbosity::Info,
            (false, 2) => Verbosity::Debug,
            (false, _) => Verbosity::Trace,
        };

        match args.command {
            Command::Encode { source } => {
                opts.op_mode = Mode::Encode;
                opts.input = source.into_input();
            }
            Command::Decode { bits, source } => {
                opts.op_mode = Mode::Decode;
                opts.bits = Some(bits);
                opts.input = source.into_input();
            }
            Command::Tree { source, dot } => {
                opts.op_mode = Mode::Tree;
                opts.input = source.into_input();
                opts.dot = dot;
            }
            Command::Compress { source, output } => {
                opts.op_mode = Mode::Compress;
                opts.input = source.into_input();
                opts.output = Output::File(output);
            }
            Command::Decompress { file, output } => {
                opts.op_mode = Mode::Decompress;
                opts.input = Input::File(file);
                opts.output = output.map_or(Output::Stdout, Output::File);
            }
        }
        opts
    }
}

impl Default for HuffOpts {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse the command line and set the log level from it.
pub fn huffopts_init() -> HuffOpts {
    let opts = HuffOpts::from_args(Args::parse());
    log::set_max_level(opts.verbose.level_filter());
    opts
}

/// Command Line Interpretation - uses external CLAP crate.
#[derive(Parser, Debug)]
#[clap(
    version,
    about = "Huffman coding of text",
    long_about = "
    Builds a huffman tree from the symbol frequencies of some text, shows the codes
    and the encoded bits, decodes bit strings against the tree, and can pack the
    result into a small container file."
)]
pub struct Args {
    /// Raise verbosity; repeat for more (-v info, -vv debug, -vvv trace)
    #[clap(short = 'v', long = "verbose", parse(from_occurrences), global = true)]
    verbose: u8,

    /// Only report errors through the exit status
    #[clap(short = 'q', long = "quiet", global = true)]
    quiet: bool,

    #[clap(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand, Debug)]
pub enum Command {
    /// Show frequencies, codes and the encoded bits of some text
    Encode {
        #[clap(flatten)]
        source: Source,
    },
    /// Decode a bit string with the tree built from its source text
    Decode {
        /// Bits to decode, e.g. 000111110
        bits: String,
        #[clap(flatten)]
        source: Source,
    },
    /// Print the huffman tree of some text
    Tree {
        #[clap(flatten)]
        source: Source,
        /// Print Graphviz DOT instead of an outline
        #[clap(long = "dot")]
        dot: bool,
    },
    /// Write the codes and encoded bits of some text to a container file
    Compress {
        #[clap(flatten)]
        source: Source,
        /// Container file to write
        #[clap(short = 'o', long = "output")]
        output: PathBuf,
    },
    /// Read a container file back into text
    Decompress {
        /// Container file to read
        file: PathBuf,
        /// Write the text here instead of the terminal
        #[clap(short = 'o', long = "output")]
        output: Option<PathBuf>,
    },
}

/// Text given on the command line, in a file, or (failing both) on stdin
#[derive(clap::Args, Debug)]
pub struct Source {
    /// Text to work on
    text: Option<String>,
    /// Read the text from this file
    #[clap(short = 'i', long = "input", conflicts_with = "text")]
    input: Option<PathBuf>,
}

impl Source {
    fn into_input(self) -> Input {
        match (self.text, self.input) {
            (Some(text), _) => Input::Text(text),
            (None, Some(path)) => Input::File(path),
            (None, None) => Input::Stdin,
        }
    }
}
