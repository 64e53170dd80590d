//! Host link UART tasks
//!
//! RX frames request lines and forwards parsed requests to the converter
//! task. TX answers with a status line whenever the converter publishes
//! one, and with an error line for every rejected request.

use defmt::*;
use embassy_futures::select::{select, Either};
use embassy_rp::uart::{BufferedUartRx, BufferedUartTx};
use embedded_io_async::{Read, Write};

use powerbox_protocol::{error_line, status_line, LineParser, Request, RequestError};

use crate::channels::{CONVERTER_CMD, CONVERTER_STATUS, HOST_ERROR};

/// Buffer size for UART receive
const RX_BUF_SIZE: usize = 64;

/// Host RX task - receives and parses request lines
#[embassy_executor::task]
pub async fn host_rx_task(mut rx: BufferedUartRx) {
    info!("Host RX task started");

    let mut parser = LineParser::new();
    let mut buf = [0u8; RX_BUF_SIZE];

    loop {
        match rx.read(&mut buf).await {
            Ok(n) if n > 0 => {
                trace!("RX: {} bytes", n);

                for &byte in &buf[..n] {
                    match parser.feed(byte) {
                        Ok(Some(line)) => handle_line(&line).await,
                        Ok(None) => {}
                        Err(e) => reject(e.into()),
                    }
                }
            }
            Ok(_) => {}
            Err(e) => {
                warn!("UART read error: {:?}", e);
            }
        }
    }
}

async fn handle_line(line: &[u8]) {
    match Request::parse(line) {
        Ok(request) => {
            debug!("Host request: {:?}", request);
            CONVERTER_CMD.send(request).await;
        }
        Err(e) => reject(e),
    }
}

fn reject(error: RequestError) {
    warn!("Host request rejected: {:?}", error);
    HOST_ERROR.signal(error);
}

/// Host TX task - sends status and error replies
#[embassy_executor::task]
pub async fn host_tx_task(mut tx: BufferedUartTx) {
    info!("Host TX task started");

    loop {
        let reply = match select(CONVERTER_STATUS.wait(), HOST_ERROR.wait()).await {
            Either::First(status) => status_line(&status),
            Either::Second(error) => error_line(error),
        };

        match reply {
            Ok(line) => {
                if let Err(e) = tx.write_all(line.as_bytes()).await {
                    warn!("Failed to send host reply: {:?}", e);
                }
            }
            Err(_) => warn!("Host reply did not fit the line buffer"),
        }
    }
}
