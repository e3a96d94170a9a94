/*!
CBOR Header Tools - A CLI for inspecting CBOR item headers

# Commands

- `decode`: Decode the single item header at an offset
- `walk`: List every item header in a buffer with its offset

# Examples

```bash
# Decode the header at the start of a file
cbor-header decode data.cbor

# Decode a hex string from stdin, unwrapping up to 4 tags
echo 'c1 c2 1a514b67b0' | cbor-header decode --hex --max-tags 4 -

# Decode as if only the first 3 bytes had arrived
cbor-header decode --max-length 3 data.cbor

# List all headers
cbor-header walk data.cbor
```

Settings are read from `cbor-header.toml` in the current directory (or the
file given with `--config`) and from `CBOR_HEADER_*` environment variables,
e.g. `CBOR_HEADER_LOG_LEVEL=debug` or `CBOR_HEADER_DECODER__MAX_TAG_DEPTH=2`.
*/

use cbor_header::decode::{Header, Options};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod decode;
mod io;
mod settings;
mod walk;

/// A CLI tool for inspecting CBOR item headers
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "A CLI tool for inspecting CBOR item headers",
    long_about = "Decodes the header of CBOR (RFC 8949) data items: the major and minor type, \
                  the argument value, any semantic tags, and the number of bytes consumed."
)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Decode the item header at an offset
    Decode(decode::Command),

    /// List every item header in the input
    Walk(walk::Command),
}

/// Decoder options shared by all commands, overriding the configuration
#[derive(clap::Args, Debug, Default)]
pub struct DecoderArgs {
    /// Maximum number of tags to unwrap in front of an item
    #[arg(long = "max-tags", value_name = "DEPTH")]
    max_tag_depth: Option<usize>,

    /// Fail on tags beyond the maximum depth
    #[arg(long)]
    strict: bool,
}

impl DecoderArgs {
    pub fn options(&self, base: Options) -> Options {
        Options {
            max_tag_depth: self.max_tag_depth.unwrap_or(base.max_tag_depth),
            strict_tag_depth: self.strict || base.strict_tag_depth,
        }
    }
}

/// Render a header as a single line of text
pub fn describe(header: &Header) -> String {
    let mut s = format!(
        "{} ({}) minor={} value={} length={}",
        header.major_type(),
        u8::from(header.major_type()),
        header.minor_type(),
        header.value(),
        header.length()
    );
    if !header.tags().is_empty() {
        s.push_str(&format!(" tags={:?}", header.tags()));
    }
    if header.is_break() {
        s.push_str(" break");
    } else if header.is_indefinite() {
        s.push_str(" indefinite");
    }
    if !header.is_shortest() {
        s.push_str(" non-shortest");
    }
    s
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = settings::load(cli.config)?;
    settings::init_logger(&settings)?;

    match cli.command {
        Commands::Decode(args) => args.exec(&settings),
        Commands::Walk(args) => args.exec(&settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_override_options() {
        let base = Options {
            max_tag_depth: 3,
            strict_tag_depth: false,
        };
        assert_eq!(DecoderArgs::default().options(base), base);

        let args = DecoderArgs {
            max_tag_depth: Some(0),
            strict: true,
        };
        assert_eq!(
            args.options(base),
            Options {
                max_tag_depth: 0,
                strict_tag_depth: true
            }
        );
    }

    #[test]
    fn describe_headers() {
        let header = cbor_header::decode::decode_header(&[0xC1, 0x18, 0x64]).unwrap();
        assert_eq!(
            describe(&header),
            "unsigned integer (0) minor=24 value=100 length=3 tags=[1]"
        );

        let header = cbor_header::decode::decode_header(&[0xFF]).unwrap();
        assert_eq!(describe(&header), "simple (7) minor=31 value=31 length=1 break");

        let header = cbor_header::decode::decode_header(&[0x9F]).unwrap();
        assert_eq!(describe(&header), "array (4) minor=31 value=31 length=1 indefinite");

        let header = cbor_header::decode::decode_header(&[0x18, 0x01]).unwrap();
        assert_eq!(
            describe(&header),
            "unsigned integer (0) minor=24 value=1 length=2 non-shortest"
        );
    }

    #[test]
    fn parse_command_line() {
        let cli = Cli::try_parse_from([
            "cbor-header",
            "decode",
            "--hex",
            "--max-tags",
            "2",
            "--offset",
            "4",
            "-",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::Decode(_)));

        assert!(Cli::try_parse_from(["cbor-header", "walk", "--max-tags", "x", "-"]).is_err());
    }
}
