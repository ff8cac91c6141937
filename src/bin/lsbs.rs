//! LSBS - least significant bit steganography
//!
//! Hides text, files, images and audio in the low bits of PNG, BMP and WAV
//! covers, recovers them, and guesses the depth of unknown text payloads.

use anyhow::{bail, ensure, Context, Result};
use clap::{ArgGroup, Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use lsbs::media::{Cover, Raster, Wav};
use lsbs::payload::{sanitize_text, AudioRecord, ImageRecord, RECOVERED_SAMPLE_RATE};
use lsbs::{BitDepth, Carrier, Conceal, Framing, Package, Slots};

/// Characters of each candidate shown by `guess`.
const PREVIEW_LEN: usize = 48;

/// LSBS - least significant bit steganography
///
/// Covers must be lossless: PNG or BMP images, or 8/16-bit PCM WAV files.
/// Payloads are hidden in the clear, so encrypt them first if they are secret.
#[derive(Parser)]
#[command(name = "lsbs")]
#[command(version)]
#[command(about = "Hide data in the least significant bits of images and audio")]
struct Cli {
    /// Log more (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Hide a payload in a cover file
    Encode(EncodeArgs),

    /// Recover a payload from a cover file
    Decode(DecodeArgs),

    /// Guess the depth of a hidden text payload
    ///
    /// Decodes at every depth from 1 to 8 and ranks the results by how much
    /// of them is alphanumeric text.
    Guess {
        /// Cover file to inspect
        cover: PathBuf,

        /// Number of candidates to show
        #[arg(long, default_value_t = 3)]
        top: usize,
    },

    /// Show how many payload bytes a cover holds at each depth
    Capacity {
        /// Cover file to inspect
        cover: PathBuf,

        /// Account for length-prefixed framing instead of a terminator
        #[arg(short, long)]
        binary: bool,
    },
}

#[derive(Args)]
#[command(group(
    ArgGroup::new("payload")
        .required(true)
        .args(["message", "file", "image", "audio"])
))]
struct EncodeArgs {
    /// Cover file (PNG, BMP or WAV)
    cover: PathBuf,

    /// Text to hide. Non-ASCII characters are dropped unless --binary is set.
    #[arg(short, long)]
    message: Option<String>,

    /// File whose contents to hide. Read as text unless --binary is set.
    #[arg(short, long)]
    file: Option<PathBuf>,

    /// Image to hide as an image record
    #[arg(long)]
    image: Option<PathBuf>,

    /// 16-bit WAV file whose samples to hide
    #[arg(long)]
    audio: Option<PathBuf>,

    /// Hide the payload as raw bytes behind a 32-bit length prefix
    #[arg(short, long)]
    binary: bool,

    /// Number of low bits to use in each sample
    #[arg(short, long, default_value_t = BitDepth::ONE, value_parser = parse_depth)]
    depth: BitDepth,

    /// Write one output per depth from 1 to 8, named <stem>.<depth>.<ext>
    #[arg(long, conflicts_with = "depth")]
    all_depths: bool,

    /// Output file, or output directory with --all-depths
    #[arg(short, long)]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct DecodeArgs {
    /// Cover file (PNG, BMP or WAV)
    cover: PathBuf,

    /// Number of low bits used in each sample
    #[arg(short, long, default_value_t = BitDepth::ONE, value_parser = parse_depth)]
    depth: BitDepth,

    /// The payload was hidden with --binary
    #[arg(short, long, conflicts_with = "record")]
    binary: bool,

    /// Decode a structured record hidden with --image or --audio
    #[arg(long, value_enum)]
    record: Option<Record>,

    /// Write the payload to a file instead of printing it
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Keep whatever was recovered when the payload is incomplete
    #[arg(long)]
    partial: bool,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Record {
    Image,
    Audio,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Encode(args) => encode(&args)?,
        Commands::Decode(args) => decode(&args)?,
        Commands::Guess { cover, top } => guess(&cover, top)?,
        Commands::Capacity { cover, binary } => capacity(&cover, binary)?,
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    let fallback = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn parse_depth(s: &str) -> Result<BitDepth, String> {
    let bits: u8 = s.parse().map_err(|_| format!("{s:?} is not a bit count"))?;
    BitDepth::new(bits).map_err(|err| err.to_string())
}

fn open_cover(path: &Path) -> Result<Cover> {
    Cover::open(path).with_context(|| format!("Failed to open cover {}", path.display()))
}

/// Hides a payload at one depth, or at every depth with `--all-depths`.
fn encode(args: &EncodeArgs) -> Result<()> {
    let cover = open_cover(&args.cover)?;
    let (payload, framing) = load_payload(args)?;

    info!(len = payload.len(), ?framing, "payload loaded");

    if !args.all_depths {
        let output = args
            .output
            .clone()
            .unwrap_or_else(|| sibling(&args.cover, "stego"));
        let mut stego = cover;

        let slots = Carrier::new(args.depth, framing)
            .conceal(&payload, &mut stego)
            .with_context(|| format!("Failed to hide payload in {}", args.cover.display()))?;
        persist(&output, |tmp| stego.save(tmp))?;

        info!(slots, depth = args.depth.get(), "payload concealed");
        println!("{}", output.display());
        return Ok(());
    }

    let mut written = 0;

    for depth in BitDepth::all() {
        let mut stego = cover.clone();

        match Carrier::new(depth, framing).conceal(&payload, &mut stego) {
            Ok(_) => {}
            Err(err @ lsbs::Error::PayloadTooLarge { .. }) => {
                warn!(depth = depth.get(), "skipped: {err}");
                continue;
            }
            Err(err) => return Err(err.into()),
        }

        let output = sibling(&args.cover, &depth.to_string());
        let output = match &args.output {
            Some(dir) => dir.join(output.file_name().unwrap_or_default()),
            None => output,
        };

        persist(&output, |tmp| stego.save(tmp))?;
        println!("{}", output.display());
        written += 1;
    }

    ensure!(
        written > 0,
        "Payload does not fit in {} at any depth",
        args.cover.display()
    );

    Ok(())
}

/// Reads the payload named on the command line and picks its framing.
fn load_payload(args: &EncodeArgs) -> Result<(Vec<u8>, Framing)> {
    let framing = if args.binary {
        Framing::binary()
    } else {
        Framing::text()
    };

    if let Some(message) = &args.message {
        let payload = if args.binary {
            message.as_bytes().to_vec()
        } else {
            sanitize_text(message)
        };
        return Ok((payload, framing));
    }

    if let Some(path) = &args.file {
        let bytes =
            fs::read(path).with_context(|| format!("Failed to read payload {}", path.display()))?;
        let payload = if args.binary {
            bytes
        } else {
            sanitize_text(&String::from_utf8_lossy(&bytes))
        };
        return Ok((payload, framing));
    }

    if let Some(path) = &args.image {
        let raster = Raster::open_converted(path)
            .with_context(|| format!("Failed to open image payload {}", path.display()))?;
        let (width, height) = raster.dimensions();
        let record = ImageRecord::new(width, height, raster.to_png_bytes()?);
        return Ok((record.to_record().into_bytes(), Framing::text()));
    }

    if let Some(path) = &args.audio {
        let wav = Wav::open(path)
            .with_context(|| format!("Failed to open audio payload {}", path.display()))?;
        let samples = wav
            .samples16()
            .with_context(|| format!("{} is not 16-bit audio", path.display()))?;
        let record = AudioRecord::new(samples.to_vec());
        return Ok((record.to_bytes(), Framing::samples16()));
    }

    bail!("No payload given")
}

fn decode(args: &DecodeArgs) -> Result<()> {
    let cover = open_cover(&args.cover)?;
    let framing = match args.record {
        Some(Record::Image) => Framing::text(),
        Some(Record::Audio) => Framing::samples16(),
        None if args.binary => Framing::binary(),
        None => Framing::text(),
    };

    let extraction = Package::new(args.depth, framing).extract(&cover)?;

    if !extraction.complete {
        ensure!(
            args.partial,
            "No complete payload at depth {} ({} bytes recovered, use --partial to keep them)",
            args.depth,
            extraction.payload.len()
        );
        warn!(len = extraction.payload.len(), "payload is incomplete");
    }

    let payload = extraction.payload;

    match args.record {
        Some(Record::Image) => {
            let output = args
                .output
                .as_deref()
                .context("--output is required to recover an image")?;
            let text = std::str::from_utf8(&payload).context("Image record is not text")?;
            let record = ImageRecord::parse(text)?;

            persist(output, |tmp| Ok(fs::write(tmp, &record.bytes)?))?;
            info!(width = record.width, height = record.height, "image recovered");
            println!("{}", output.display());
        }
        Some(Record::Audio) => {
            let output = args
                .output
                .as_deref()
                .context("--output is required to recover audio")?;
            let record = AudioRecord::from_bytes(&payload)?;
            let wav = Wav::mono16(record.samples, RECOVERED_SAMPLE_RATE);

            persist(output, |tmp| wav.save(tmp))?;
            info!(seconds = wav.duration_secs(), "audio recovered");
            println!("{}", output.display());
        }
        None => match &args.output {
            Some(output) => persist(output, |tmp| Ok(fs::write(tmp, &payload)?))?,
            None => println!("{}", String::from_utf8_lossy(&payload)),
        },
    }

    Ok(())
}

fn guess(path: &Path, top: usize) -> Result<()> {
    let cover = open_cover(path)?;
    let ranking = lsbs::rank(&cover, Framing::text())?;

    for candidate in ranking.iter().take(top) {
        let preview: String = String::from_utf8_lossy(&candidate.payload)
            .chars()
            .take(PREVIEW_LEN)
            .flat_map(char::escape_debug)
            .collect();

        println!(
            "depth {:>2}  score {:.3}{}  \"{preview}\"",
            candidate.depth,
            candidate.score,
            if candidate.complete { "" } else { " (incomplete)" },
        );
    }

    Ok(())
}

fn capacity(path: &Path, binary: bool) -> Result<()> {
    let cover = open_cover(path)?;
    let framing = if binary {
        Framing::binary()
    } else {
        Framing::text()
    };

    println!(
        "{}: {} cover, {} slots of {} bits",
        path.display(),
        cover.kind(),
        cover.len(),
        cover.width()
    );

    for bits in BitDepth::MIN..=cover.width() {
        let depth = BitDepth::new(bits)?;
        let bytes = Carrier::new(depth, framing).capacity(&cover);
        println!("  depth {depth:>2}: {bytes} bytes");
    }

    Ok(())
}

/// Returns `<stem>.<tag>.<ext>` next to `path`.
fn sibling(path: &Path, tag: &str) -> PathBuf {
    let stem = path.file_stem().unwrap_or_default().to_string_lossy();
    let extension = path.extension().unwrap_or_default().to_string_lossy();
    path.with_file_name(format!("{stem}.{tag}.{extension}"))
}

/// Writes `path` through a temporary file in the same directory, so that an
/// interrupted write never leaves a partial output behind.
fn persist<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&Path) -> lsbs::Result<()>,
{
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    // the extension picks the image encoder
    let suffix = path
        .extension()
        .map(|extension| format!(".{}", extension.to_string_lossy()))
        .unwrap_or_default();

    let file = tempfile::Builder::new()
        .prefix(".lsbs-")
        .suffix(&suffix)
        .tempfile_in(dir)
        .with_context(|| format!("Failed to create a temporary file in {}", dir.display()))?;

    write(file.path()).with_context(|| format!("Failed to write {}", path.display()))?;
    file.persist(path)
        .with_context(|| format!("Failed to move output into {}", path.display()))?;

    Ok(())
}
