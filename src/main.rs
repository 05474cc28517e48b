//Enable more cargo lint tests
#![warn(rust_2018_idioms)]

use std::fs::File;
use std::io::{self, BufReader, BufWriter, Write};
use std::process::exit;

use log::{error, info, warn, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use huffman::compression::{compress::compress, decompress::decompress};
use huffman::tools::cli::{huffopts_init, HuffOpts, Input, Mode, Output};
use huffman::tools::tree_view::{render_dot, render_text};
use huffman::{decode_to_string, encode_str, EncodedStream, FrequencyTable, HuffError, HuffmanTree};

fn main() {
    // Available log levels are Error, Warn, Info, Debug, Trace
    if let Err(e) = TermLogger::init(
        LevelFilter::Trace,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    ) {
        eprintln!("Unable to start logging: {}", e);
    }

    let opts = huffopts_init();
    info!("Mode: {}, output to {}", opts.op_mode, opts.output);

    //----- Figure how what we need to do and go do it
    let result = match opts.op_mode {
        Mode::Encode => encode_cmd(&opts),
        Mode::Decode => decode_cmd(&opts),
        Mode::Tree => tree_cmd(&opts),
        Mode::Compress => compress_cmd(&opts),
        Mode::Decompress => decompress_cmd(&opts),
    };

    if let Err(e) = result {
        error!("{}", e);
        exit(1);
    }
    info!("Done.");
}

/// Read the input text, refusing empty text with a message naming what we were asked to do.
fn read_text(opts: &HuffOpts, action: &str) -> Result<String, HuffError> {
    let text = opts.input.read()?;
    if text.is_empty() {
        warn!("Please enter some text to {}.", action);
        return Err(HuffError::EmptyInput);
    }
    Ok(text)
}

/// Print the frequency and code of every symbol, then the encoded bits.
fn encode_cmd(opts: &HuffOpts) -> Result<(), HuffError> {
    let text = read_text(opts, "encode")?;
    let freqs = FrequencyTable::count(text.chars());
    let (_, codes, bits) = encode_str(&text)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    writeln!(out, "symbol\tcount\tcode")?;
    for (symbol, code) in codes.iter() {
        writeln!(out, "{:?}\t{}\t{}", symbol, freqs.get(symbol).unwrap_or(0), code)?;
    }

    // Width of a fixed length code for the same alphabet, at least one bit.
    let width = (usize::BITS - (codes.len() - 1).leading_zeros()).max(1) as u64;
    writeln!(
        out,
        "{} bits, fixed width would need {} bits",
        bits.len(),
        width * freqs.total()
    )?;
    writeln!(out, "{}", bits)?;
    Ok(())
}

/// Decode a bit string with the tree built from the source text.
fn decode_cmd(opts: &HuffOpts) -> Result<(), HuffError> {
    let bits = opts.bits.as_deref().unwrap_or_default();
    if bits.trim().is_empty() {
        warn!("Please enter some text to decode.");
        return Err(HuffError::EmptyInput);
    }
    let bits: EncodedStream = bits.parse()?;
    let text = read_text(opts, "build the decoding tree from")?;
    let tree = HuffmanTree::from_symbols(text.chars())?;
    let decoded = decode_to_string(&bits, tree.root())?;
    println!("{}", decoded);
    Ok(())
}

/// Print the tree as an outline or as Graphviz DOT.
fn tree_cmd(opts: &HuffOpts) -> Result<(), HuffError> {
    let text = read_text(opts, "encode")?;
    let tree = HuffmanTree::from_symbols(text.chars())?;
    let rendered = if opts.dot {
        render_dot(tree.root())
    } else {
        render_text(tree.root())
    };
    print!("{}", rendered);
    Ok(())
}

/// Write the text to a container file.
fn compress_cmd(opts: &HuffOpts) -> Result<(), HuffError> {
    let text = read_text(opts, "compress")?;
    let path = match &opts.output {
        Output::File(path) => path,
        Output::Stdout => {
            return Err(HuffError::Io(io::Error::new(
                io::ErrorKind::InvalidInput,
                "compress needs an output file",
            )))
        }
    };
    let report = compress(&text, &mut BufWriter::new(File::create(path)?))?;
    println!(
        "{} symbols ({} distinct) -> {} bits, {} bytes written to {}",
        report.symbols, report.distinct, report.encoded_bits, report.container_bytes, opts.output
    );
    Ok(())
}

/// Read a container file and print or write the text.
fn decompress_cmd(opts: &HuffOpts) -> Result<(), HuffError> {
    let text = match &opts.input {
        Input::File(path) => decompress(BufReader::new(File::open(path)?))?,
        _ => decompress(io::stdin().lock())?,
    };
    match &opts.output {
        Output::File(path) => std::fs::write(path, text)?,
        Output::Stdout => print!("{}", text),
    }
    Ok(())
}
