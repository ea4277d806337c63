use std::io;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use log::LevelFilter;

use framepeek::engine::constants::ETH_P_ALL;
use framepeek::{CancelToken, CaptureConfig, CaptureLoop, FrameSource, PcapSource, WriteSink};

/// Print the Ethernet II header of every frame seen on the wire.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Interface to capture on (default: all interfaces)
    #[arg(short, long)]
    interface: Option<String>,

    /// Replay a pcap file instead of capturing live
    #[arg(short, long, value_name = "FILE", conflicts_with = "interface")]
    read: Option<PathBuf>,

    /// Stop after this many decoded frames
    #[arg(short, long)]
    count: Option<u64>,

    /// Link-layer protocol for the packet socket, host order (hex with 0x, or decimal)
    #[arg(long, default_value_t = ETH_P_ALL, value_parser = parse_protocol)]
    protocol: u16,

    /// Longest single wait for a frame in milliseconds; 0 blocks indefinitely
    #[arg(long, default_value_t = 500)]
    timeout_ms: u64,

    /// Print a hex dump of each frame under its header line
    #[arg(short = 'x', long)]
    hex: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

fn parse_protocol(value: &str) -> Result<u16, String> {
    let parsed = match value
        .strip_prefix("0x")
        .or_else(|| value.strip_prefix("0X"))
    {
        Some(hex) => u16::from_str_radix(hex, 16),
        None => value.parse(),
    };
    parsed.map_err(|err| format!("invalid protocol value {value:?}: {err}"))
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .init();
}

static STOP: OnceLock<Arc<AtomicBool>> = OnceLock::new();

extern "C" fn on_signal(_signal: libc::c_int) {
    if let Some(flag) = STOP.get() {
        flag.store(true, Ordering::SeqCst);
    }
}

fn install_signal_handlers(cancel: &CancelToken) -> Result<()> {
    if STOP.set(cancel.flag()).is_err() {
        anyhow::bail!("signal handlers are already installed");
    }

    for signal in [libc::SIGINT, libc::SIGTERM] {
        let mut action: libc::sigaction = unsafe { std::mem::zeroed() };
        action.sa_sigaction = on_signal as extern "C" fn(libc::c_int) as libc::sighandler_t;
        // no SA_RESTART, so a blocked recv returns EINTR and the loop sees the flag
        action.sa_flags = 0;
        unsafe { libc::sigemptyset(&mut action.sa_mask) };

        if unsafe { libc::sigaction(signal, &action, std::ptr::null_mut()) } == -1 {
            return Err(io::Error::last_os_error()).context("installing signal handler");
        }
    }
    Ok(())
}

fn open_source(args: &Args) -> Result<Box<dyn FrameSource>> {
    if let Some(path) = &args.read {
        let source =
            PcapSource::open(path).with_context(|| format!("reading {}", path.display()))?;
        return Ok(Box::new(source));
    }
    open_live(args)
}

#[cfg(target_os = "linux")]
fn open_live(args: &Args) -> Result<Box<dyn FrameSource>> {
    use std::time::Duration;

    use framepeek::SourceConfig;
    use framepeek::source::RawSocket;

    let config = SourceConfig {
        interface: args.interface.clone(),
        protocol: args.protocol,
        read_timeout: (args.timeout_ms > 0).then(|| Duration::from_millis(args.timeout_ms)),
    };
    let socket = RawSocket::open(&config)
        .context("opening packet socket (needs root or CAP_NET_RAW)")?;
    Ok(Box::new(socket))
}

#[cfg(not(target_os = "linux"))]
fn open_live(_args: &Args) -> Result<Box<dyn FrameSource>> {
    anyhow::bail!("live capture needs a Linux AF_PACKET socket; use --read <FILE>")
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let source = open_source(&args)?;
    let cancel = CancelToken::new();
    install_signal_handlers(&cancel)?;

    println!("Gathering Packets...");

    let sink = WriteSink::new(io::stdout().lock()).with_hexdump(args.hex);
    let config = CaptureConfig {
        max_records: args.count,
    };
    let mut capture = CaptureLoop::new(source, sink, config).with_cancel_token(cancel);
    capture.run().context("capture failed")?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn protocol_accepts_hex_with_either_prefix() {
        assert_eq!(parse_protocol("0x0003").expect("lowercase prefix"), 0x0003);
        assert_eq!(parse_protocol("0X88cc").expect("uppercase prefix"), 0x88cc);
    }

    #[test]
    fn protocol_accepts_decimal() {
        assert_eq!(parse_protocol("3").expect("decimal value"), 3);
        assert_eq!(parse_protocol("2048").expect("decimal value"), 0x0800);
    }

    #[test]
    fn protocol_rejects_bad_digits_and_overflow() {
        assert!(parse_protocol("0xzz").is_err());
        assert!(parse_protocol("70000").is_err());
        assert!(parse_protocol("0x10000").is_err());
        assert!(parse_protocol("").is_err());
    }

    #[test]
    fn protocol_error_names_the_input() {
        let err = parse_protocol("0xzz").expect_err("not hex");
        assert!(err.contains("\"0xzz\""), "{err}");
    }

    #[test]
    fn signal_handlers_install_once() {
        let first = CancelToken::new();
        install_signal_handlers(&first).expect("first install should succeed");

        let second = CancelToken::new();
        assert!(install_signal_handlers(&second).is_err());

        on_signal(libc::SIGINT);
        assert!(first.is_cancelled());
        assert!(!second.is_cancelled());
    }
}
