//! Console UART task
//!
//! Reads call expressions from the UART, runs them through the bridge and
//! writes the reply back.

use defmt::*;
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use ferrule_console::{format_error, Console, ConsoleError, LineBuffer};
use ferrule_core::config::ConsoleConfig;
use ferrule_core::Bridge;
use ferrule_hal_rp2040::Rp2040Platform;

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Erase one character on the terminal
const RUBOUT: &[u8] = b"\x08 \x08";

/// Console task - owns the bridge for the lifetime of the firmware
#[embassy_executor::task]
pub async fn console_task(
    mut rx: BufferedUartRx,
    mut tx: BufferedUartTx,
    console: Console,
    mut bridge: Bridge<Rp2040Platform>,
    config: ConsoleConfig,
) {
    info!("Console task started");

    let mut lines = LineBuffer::new();
    let mut buf = [0u8; RX_BUF_SIZE];
    let mut after_cr = false;

    write_all(&mut tx, config.prompt.as_bytes()).await;

    loop {
        let n = match rx.read(&mut buf).await {
            Ok(n) => n,
            Err(e) => {
                warn!("UART read error: {:?}", e);
                continue;
            }
        };
        trace!("RX: {} bytes", n);

        for &byte in &buf[..n] {
            let before = lines.pending().len();
            let result = lines.feed(byte);

            if config.echo {
                echo(&mut tx, byte, after_cr, before, lines.pending().len()).await;
            }
            after_cr = byte == b'\r';

            match result {
                Ok(Some(line)) => {
                    debug!("Eval: {}", line.as_str());
                    // Terminal calls never come back from here
                    if let Some(output) = console.evaluate(&mut bridge, &line).await {
                        write_all(&mut tx, output.as_bytes()).await;
                        write_all(&mut tx, b"\r\n").await;
                    }
                    write_all(&mut tx, config.prompt.as_bytes()).await;
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("Console line error: {:?}", e);
                    let output = format_error(&ConsoleError::from(e));
                    write_all(&mut tx, b"\r\n").await;
                    write_all(&mut tx, output.as_bytes()).await;
                    write_all(&mut tx, b"\r\n").await;
                    write_all(&mut tx, config.prompt.as_bytes()).await;
                }
            }
        }
    }
}

/// Echo one received byte given the pending length before and after it
async fn echo(tx: &mut BufferedUartTx, byte: u8, after_cr: bool, before: usize, after: usize) {
    match byte {
        // The LF of a CRLF pair was already echoed with the CR
        b'\n' if after_cr => {}
        b'\r' | b'\n' => write_all(tx, b"\r\n").await,
        0x08 | 0x7f => {
            if after < before {
                write_all(tx, RUBOUT).await;
            }
        }
        _ if after > before => write_all(tx, &[byte]).await,
        _ => {}
    }
}

async fn write_all(tx: &mut BufferedUartTx, bytes: &[u8]) {
    if let Err(e) = tx.write_all(bytes).await {
        warn!("UART write error: {:?}", e);
    }
}
