//! i2cprog - I2C EEPROM programmer host tool

mod args;

use std::io;
use std::process::ExitCode;

use clap::Parser;
use i2cprog_common::hash::sha256_file_prefix;
use i2cprog_common::{Direction, TransferRequest, device_catalog};
use tracing::{debug, error, info, warn};

use i2cprog_host::constants::*;
use i2cprog_host::logging::init_logging;
use i2cprog_host::{
    CancelToken, PreparedTransfer, SerialSession, TransferOutcome, TransferStatus,
    install_interrupt_handler,
};

use args::{Args, Plan};

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.debug);

    if args.list_devices {
        print!("{}", device_catalog());
        return ExitCode::SUCCESS;
    }

    let plan = match args.plan() {
        Ok(plan) => plan,
        Err(e) => {
            error!("{}{}", ERR_INVALID_ARGUMENTS, e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    info!("{}{}", MSG_BANNER, env!("CARGO_PKG_VERSION"));
    for notice in &plan.notices {
        info!("{}", notice);
    }

    run(plan)
}

/// Run one transfer; the serial session is released on every path
fn run(plan: Plan) -> ExitCode {
    let Plan {
        request, session, ..
    } = plan;

    // Installed first so an interrupt during setup still ends in a clean release
    let cancel = CancelToken::new();
    if let Err(e) = install_interrupt_handler(cancel.clone()) {
        warn!("{}{}", ERR_INTERRUPT_HANDLER, e);
    }

    let prepared = match PreparedTransfer::prepare(request.clone()) {
        Ok(prepared) => prepared,
        Err(e) => {
            error!("{}", e);
            return ExitCode::from(EXIT_FAILURE);
        }
    };

    let mut serial = match SerialSession::open(&session) {
        Ok(serial) => serial,
        Err(e) => {
            error!("{}{}: {}", ERR_OPEN_SERIAL, session.path.display(), e);
            if let Err(e) = prepared.abandon() {
                warn!("{}{}: {}", ERR_REMOVE_PARTIAL, request.file_path().display(), e);
            }
            return ExitCode::from(EXIT_FAILURE);
        }
    };
    info!("{}{}", session.path.display(), MSG_OPENED);

    match request.direction() {
        Direction::Read => info!("{}", MSG_STARTING_READ),
        Direction::Write => info!("{}", MSG_STARTING_WRITE),
    }

    let outcome = prepared.execute(&mut serial, cancel, io::stdout().lock());

    if let Err(e) = serial.close() {
        warn!("{}{}: {}", ERR_RELEASE_SERIAL, session.path.display(), e);
    }

    report(&request, &outcome)
}

/// Log the outcome, clean up a failed read, and pick the exit code
fn report(request: &TransferRequest, outcome: &TransferOutcome) -> ExitCode {
    let path = request.file_path();

    match outcome.status {
        TransferStatus::Success => {
            let message = match request.direction() {
                Direction::Read => MSG_READ_COMPLETE,
                Direction::Write => MSG_WRITE_COMPLETE,
            };
            info!("{}{} bytes", message, outcome.bytes_transferred);
            match sha256_file_prefix(path, request.byte_count()) {
                Ok(digest) => info!("SHA-256 {}", digest),
                Err(e) => warn!("{}{}", ERR_DIGEST, e),
            }
            ExitCode::SUCCESS
        }
        TransferStatus::Cancelled => {
            warn!("{}", MSG_INTERRUPTED);
            if request.direction() == Direction::Read {
                info!(
                    "{}{} ({} bytes)",
                    MSG_KEEPING_PARTIAL,
                    path.display(),
                    outcome.bytes_transferred
                );
            } else {
                info!("{} bytes written before stopping", outcome.bytes_transferred);
            }
            ExitCode::from(EXIT_CANCELLED)
        }
        TransferStatus::IoError | TransferStatus::VerificationError => {
            match &outcome.error {
                Some(e) => error!("{}{}", ERR_TRANSFER_FAILED, e),
                None => error!("{}{:?}", ERR_TRANSFER_FAILED, outcome.status),
            }
            if let Some(partial) = outcome.partial_output() {
                info!("{}{}", MSG_REMOVING_PARTIAL, partial.display());
                match outcome.discard_partial_output() {
                    Ok(removed) => debug!("Partial output removed: {}", removed),
                    Err(e) => error!("{}{}: {}", ERR_REMOVE_PARTIAL, partial.display(), e),
                }
            }
            ExitCode::from(EXIT_FAILURE)
        }
    }
}
