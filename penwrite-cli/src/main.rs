//! `penwrite` CLI — plot text files on a serial pen plotter.
//!
//! Loads a single-stroke font, lays the document out against the
//! configured page width, and streams the resulting G-code to a serial
//! device, to stdout (`--dry-run`), or into an SVG preview.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;

use penwrite_core::config::{ScaleFactor, TextHeight};
use penwrite_core::font;
use penwrite_core::glyph::GlyphTable;
use penwrite_core::layout::LayoutOptions;
use penwrite_gcode::command::DEFAULT_FEED_RATE;
use penwrite_gcode::device::DeviceChannel;
use penwrite_gcode::emit::document_commands;
use penwrite_gcode::plot::plot_document;
use penwrite_gcode::preview::{self, PreviewOptions};

#[derive(Parser)]
#[command(version, about = "Penwrite \u{2014} plot text with a single-stroke font")]
struct Cli {
    /// Text file to plot (stdin when omitted)
    text: Option<PathBuf>,

    /// Stroke font description file
    #[arg(short, long)]
    font: PathBuf,

    /// Text height in millimetres (4-10); prompted for when omitted
    #[arg(long)]
    height: Option<f64>,

    /// Serial device to drive (e.g. /dev/ttyUSB0)
    #[arg(short, long)]
    port: Option<PathBuf>,

    /// Print the command stream to stdout instead of driving a device
    #[arg(long)]
    dry_run: bool,

    /// Write an SVG preview of the toolpath
    #[arg(long, value_name = "FILE")]
    preview: Option<PathBuf>,

    /// Maximum writing width in millimetres
    #[arg(long, default_value_t = 100.0)]
    line_width: f64,

    /// Line spacing in millimetres
    #[arg(long, default_value_t = 10.0)]
    line_spacing: f64,

    /// Feed rate for the homing move, in mm/min
    #[arg(long, default_value_t = DEFAULT_FEED_RATE)]
    feed_rate: u32,
}

fn main() {
    let cli = Cli::parse();

    let table = match font::load_font_file(&cli.font) {
        Ok(table) => table,
        Err(e) => {
            eprintln!("Error loading font {}: {e}", cli.font.display());
            process::exit(1);
        }
    };
    if table.is_empty() {
        eprintln!("Error: font {} contains no glyphs", cli.font.display());
        process::exit(1);
    }

    let height = resolve_height(&cli);
    let scale = ScaleFactor::from(height);
    let options = LayoutOptions {
        max_line_width: cli.line_width,
        line_spacing: cli.line_spacing,
        ..LayoutOptions::default()
    };

    let text = read_text(&cli);

    if let Some(svg_path) = &cli.preview {
        write_preview(svg_path, &text, &table, scale, &options, cli.feed_rate);
    }

    if let Some(port) = &cli.port {
        plot_to_serial(port, &text, &table, scale, &options, cli.feed_rate);
    } else if cli.dry_run || cli.preview.is_none() {
        // No port: default to a dry run on stdout.
        plot_to_console(&text, &table, scale, &options, cli.feed_rate);
    }
}

// ---------------------------------------------------------------------------
// Input resolution
// ---------------------------------------------------------------------------

/// Take the height from `--height`, or prompt for it until valid.
///
/// A height given on the command line is validated once and is fatal when
/// out of range; only the interactive prompt re-asks.
fn resolve_height(cli: &Cli) -> TextHeight {
    if let Some(mm) = cli.height {
        return match TextHeight::new(mm) {
            Ok(height) => height,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        };
    }

    let stdin = io::stdin();
    loop {
        eprint!("Text height in mm (4-10): ");
        let _ = io::stderr().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => {
                eprintln!("No height given; giving up.");
                process::exit(1);
            }
            Ok(_) => {}
        }

        match line.trim().parse::<f64>() {
            Ok(mm) => match TextHeight::new(mm) {
                Ok(height) => return height,
                Err(e) => eprintln!("{e}"),
            },
            Err(_) => eprintln!("Not a number: {:?}", line.trim()),
        }
    }
}

/// Read the document text from the given file, or from stdin.
fn read_text(cli: &Cli) -> String {
    match &cli.text {
        Some(path) => match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) => {
                eprintln!("Error reading {}: {e}", path.display());
                process::exit(1);
            }
        },
        None => {
            let mut text = String::new();
            if let Err(e) = io::stdin().lock().read_to_string(&mut text) {
                eprintln!("Error reading stdin: {e}");
                process::exit(1);
            }
            text
        }
    }
}

// ---------------------------------------------------------------------------
// Output paths
// ---------------------------------------------------------------------------

fn write_preview(
    svg_path: &Path,
    text: &str,
    table: &GlyphTable,
    scale: ScaleFactor,
    options: &LayoutOptions,
    feed_rate: u32,
) {
    let commands =
        match document_commands(text.as_bytes(), table, scale, options.clone(), feed_rate) {
            Ok(commands) => commands,
            Err(e) => {
                eprintln!("Error: {e}");
                process::exit(1);
            }
        };

    let svg = preview::render_to_string(&commands, &PreviewOptions::default());
    match fs::write(svg_path, svg) {
        Ok(()) => eprintln!("Wrote {}", svg_path.display()),
        Err(e) => {
            eprintln!("Error writing {}: {e}", svg_path.display());
            process::exit(1);
        }
    }
}

fn plot_to_serial(
    port: &Path,
    text: &str,
    table: &GlyphTable,
    scale: ScaleFactor,
    options: &LayoutOptions,
    feed_rate: u32,
) {
    let mut device = SerialDevice::new(port.to_path_buf());
    if let Err(e) = device.open() {
        eprintln!("Error opening {}: {e}", port.display());
        process::exit(1);
    }
    eprintln!("The plotter is ready to draw");

    run_plot(text, table, scale, options, feed_rate, &mut device);

    if let Err(e) = device.close() {
        eprintln!("Warning: closing {}: {e}", port.display());
    }
}

fn plot_to_console(
    text: &str,
    table: &GlyphTable,
    scale: ScaleFactor,
    options: &LayoutOptions,
    feed_rate: u32,
) {
    let mut device = ConsoleDevice;
    run_plot(text, table, scale, options, feed_rate, &mut device);
}

fn run_plot(
    text: &str,
    table: &GlyphTable,
    scale: ScaleFactor,
    options: &LayoutOptions,
    feed_rate: u32,
    device: &mut dyn DeviceChannel,
) {
    match plot_document(
        text.as_bytes(),
        table,
        scale,
        options.clone(),
        feed_rate,
        device,
    ) {
        Ok(summary) => {
            eprintln!(
                "Plotted {} glyphs with {} commands over {} line breaks",
                summary.glyphs, summary.commands, summary.line_breaks
            );
        }
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    }
}

// ---------------------------------------------------------------------------
// Console device
// ---------------------------------------------------------------------------

/// Prints each command line to stdout; acknowledgment is immediate.
struct ConsoleDevice;

impl DeviceChannel for ConsoleDevice {
    fn open(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn transmit(&mut self, line: &str) -> io::Result<()> {
        io::stdout().lock().write_all(line.as_bytes())
    }

    fn await_acknowledgment(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        io::stdout().lock().flush()
    }
}

// ---------------------------------------------------------------------------
// Serial device
// ---------------------------------------------------------------------------

/// Device channel over a serial character device.
///
/// Opens the port read/write, waits for the controller's startup banner,
/// and requires an `ok` line after every command before the next one is
/// sent. Lines beginning with `error` fail the plot.
struct SerialDevice {
    path: PathBuf,
    writer: Option<File>,
    reader: Option<BufReader<File>>,
    ready: bool,
}

impl SerialDevice {
    const fn new(path: PathBuf) -> Self {
        Self {
            path,
            writer: None,
            reader: None,
            ready: false,
        }
    }

    /// Read one reply line from the controller.
    fn read_reply(&mut self) -> io::Result<String> {
        let reader = self
            .reader
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "port is not open"))?;

        let mut line = String::new();
        if reader.read_line(&mut line)? == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                "controller closed the connection",
            ));
        }
        Ok(line)
    }
}

impl DeviceChannel for SerialDevice {
    fn open(&mut self) -> io::Result<()> {
        let file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        self.reader = Some(BufReader::new(file.try_clone()?));
        self.writer = Some(file);

        // Wait for the startup banner; skip any blank lines around it.
        loop {
            let banner = self.read_reply()?;
            if !banner.trim().is_empty() {
                break;
            }
        }

        self.ready = true;
        Ok(())
    }

    fn is_ready(&self) -> bool {
        self.ready
    }

    fn transmit(&mut self, line: &str) -> io::Result<()> {
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotConnected, "port is not open"))?;
        writer.write_all(line.as_bytes())?;
        writer.flush()
    }

    fn await_acknowledgment(&mut self) -> io::Result<()> {
        loop {
            let reply = self.read_reply()?;
            let reply = reply.trim();
            if reply.eq_ignore_ascii_case("ok") {
                return Ok(());
            }
            if reply.to_ascii_lowercase().starts_with("error") {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidData,
                    format!("controller reported: {reply}"),
                ));
            }
            // Status chatter between acknowledgments; keep waiting.
        }
    }

    fn close(&mut self) -> io::Result<()> {
        self.ready = false;
        self.reader = None;
        self.writer = None;
        Ok(())
    }
}
