/*!
Walk command - list every item header in a CBOR buffer
*/

use super::io::{Input, Output};
use super::settings::Settings;
use super::{DecoderArgs, describe};
use anyhow::anyhow;
use cbor_header::decode::{Decoder, Error};
use clap::Parser;
use std::fmt::Write;
use tracing::debug;

/// List every item header in a CBOR buffer
#[derive(Parser, Debug)]
#[command(
    about = "List every item header in a CBOR buffer",
    long_about = "Decode consecutive item headers, skipping definite length string payloads.\n\n\
                  Container elements are listed in order after their container's header."
)]
pub struct Command {
    #[command(flatten)]
    decoder: DecoderArgs,

    /// Treat the input as hexadecimal text
    #[arg(long)]
    hex: bool,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<Output>,

    /// Input CBOR file (use '-' for stdin)
    input: Input,
}

/// Render one line per header, returning the text and the error that
/// stopped the walk, if any
pub fn walk(decoder: &Decoder, data: &[u8]) -> (String, Option<Error>) {
    let mut text = String::new();
    for item in decoder.headers(data) {
        match item {
            Ok((offset, header)) => {
                _ = writeln!(text, "{offset:>8}: {}", describe(&header));
            }
            Err(e) => return (text, Some(e)),
        }
    }
    (text, None)
}

impl Command {
    pub fn exec(self, settings: &Settings) -> anyhow::Result<()> {
        let data = self.input.read_cbor(self.hex)?;
        let decoder = Decoder::new(self.decoder.options(settings.decoder));
        debug!("Walking {} bytes with {:?}", data.len(), decoder.options());

        let (text, error) = walk(&decoder, &data);
        self.output.unwrap_or(Output::Stdout).write_str(&text)?;
        match error {
            Some(e) => Err(anyhow!("Failed to decode {}: {e}", self.input)),
            None => Ok(()),
        }
    }
}
