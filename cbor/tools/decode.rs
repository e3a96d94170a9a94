/*!
Decode command - display the header of a single CBOR item
*/

use super::io::{Input, Output};
use super::settings::Settings;
use super::{DecoderArgs, describe};
use anyhow::anyhow;
use cbor_header::decode::Decoder;
use clap::Parser;
use tracing::debug;

/// Decode the header of a single CBOR item
#[derive(Parser, Debug)]
#[command(about = "Decode the header of a single CBOR item", long_about = None)]
pub struct Command {
    #[command(flatten)]
    decoder: DecoderArgs,

    /// Treat the input as hexadecimal text
    #[arg(long)]
    hex: bool,

    /// Byte offset of the header within the input
    #[arg(long, default_value_t = 0)]
    offset: usize,

    /// Read no more than this many bytes from the offset
    #[arg(long, value_name = "BYTES")]
    max_length: Option<usize>,

    /// Output file (default: stdout)
    #[arg(short = 'o', long)]
    output: Option<Output>,

    /// Input CBOR file (use '-' for stdin)
    input: Input,
}

impl Command {
    pub fn exec(self, settings: &Settings) -> anyhow::Result<()> {
        let data = self.input.read_cbor(self.hex)?;
        let data = data.get(self.offset..).ok_or_else(|| {
            anyhow!(
                "Offset {} is beyond the end of the {} byte input",
                self.offset,
                data.len()
            )
        })?;

        let decoder = Decoder::new(self.decoder.options(settings.decoder));
        debug!("Decoding {} bytes with {:?}", data.len(), decoder.options());

        let header = match self.max_length {
            Some(max_length) => decoder.decode_bounded(data, max_length),
            None => decoder.decode(data),
        }
        .map_err(|e| anyhow!("Failed to decode header at offset {}: {e}", self.offset))?;

        let mut text = describe(&header);
        text.push('\n');
        self.output.unwrap_or(Output::Stdout).write_str(&text)?;
        Ok(())
    }
}
