use clap::Parser;
use d86_decoder::{DecodeError, InstructionStream};
use d86_instruction::{render, Instruction};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, Level};

#[derive(Debug, thiserror::Error)]
enum DisassembleError {
    #[error("Could not read binary file \"{}\". ({source})", .path.display())]
    FileUnavailable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Decode(#[from] DecodeError),

    #[error("Could not write output. ({0})")]
    Output(#[from] std::io::Error),
}

type Result<T> = std::result::Result<T, DisassembleError>;

#[derive(Parser, Debug)]
#[command(name = "d86-dis", version, about = "Disassembles 8086 MOV instructions")]
struct Opt {
    /// The raw binary file to disassemble
    binary: PathBuf,

    /// Prefix each line with its offset and the instruction bytes
    #[arg(short, long)]
    listing: bool,

    /// Start the output with a `bits 16` line
    #[arg(long)]
    bits: bool,

    /// Log more details to stderr, repeat for more
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Opt {
    fn log_level(&self) -> Level {
        match self.verbose {
            0 => Level::WARN,
            1 => Level::INFO,
            _ => Level::DEBUG,
        }
    }
}

fn load_data(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).map_err(|source| DisassembleError::FileUnavailable {
        path: path.to_path_buf(),
        source,
    })
}

fn print_instruction(
    out: &mut impl Write,
    offset: usize,
    bytes: &[u8],
    instruction: &Instruction,
) -> std::io::Result<()> {
    let b: String = bytes.iter().map(|b| format!("{:02X} ", b)).collect();

    writeln!(out, "{:04X}  {:<18} {}", offset, b, instruction)
}

fn write_disassembly(out: &mut impl Write, data: &[u8], opts: &Opt) -> Result<()> {
    if opts.bits {
        writeln!(out, "bits 16")?;
    }

    for result in InstructionStream::new(data) {
        let (offset, instruction) = result?;

        if opts.listing {
            let bytes = &data[offset..offset + instruction.length as usize];
            print_instruction(out, offset, bytes, &instruction)?;
        } else {
            out.write_all(render(&instruction).as_bytes())?;
        }
    }

    Ok(())
}

fn disassemble(opts: &Opt) -> Result<()> {
    let data = load_data(&opts.binary)?;
    info!(
        "Disassembling {} ({} bytes)",
        opts.binary.display(),
        data.len()
    );

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    write_disassembly(&mut out, &data, opts)?;
    out.flush()?;

    Ok(())
}

fn main() -> ExitCode {
    let opts = Opt::parse();

    tracing_subscriber::fmt()
        .with_max_level(opts.log_level())
        .with_writer(std::io::stderr)
        .without_time()
        .init();

    match disassemble(&opts) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}
