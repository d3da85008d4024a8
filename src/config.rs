//! Command line configuration.
//!
//! Options marked `env` can also be set in the environment or in a `.env`
//! file, which the binary loads before parsing.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// How results are printed.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Colored, human readable
    #[default]
    Text,
    /// Pretty printed JSON with the wire field names
    Json,
    /// Quoted CSV rows (subnet listings only, other commands print text)
    Csv,
}

#[derive(Debug, Parser)]
#[command(name = "ipv6calc")]
#[command(about = "IPv6 address and prefix calculator", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Output format
    #[arg(long, short, global = true, value_enum, env = "IPV6CALC_FORMAT", default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,

    /// log4rs configuration file
    #[arg(long, global = true, env = "IPV6CALC_LOG_CONFIG", default_value = "log4rs.yml")]
    pub log_config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Commands {
    /// Print the full 8-group form of an address
    Expand { address: String },
    /// Print the RFC 5952 short form of an address
    Compress { address: String },
    /// Type, forms, range and reverse zone of an address or CIDR
    Info { input: String },
    /// Network, first and last address of a CIDR
    Range { cidr: String },
    /// Split a prefix by adding bits, show the first and the last child
    Subnets {
        cidr: String,

        /// Bits added to the prefix length
        #[arg(long, short = 'b')]
        add_bits: u8,

        /// Number of leading children to show
        #[arg(long, default_value_t = 8)]
        show: usize,
    },
    /// Page through all children of a given length
    Enumerate {
        cidr: String,

        /// Prefix length of the children
        #[arg(long, short = 't')]
        target: u8,

        /// Index of the first child
        #[arg(long, default_value_t = 0)]
        offset: u128,

        /// Page size
        #[arg(long, default_value_t = 16)]
        limit: usize,
    },
    /// Addresses in a /LEN, or subnets of /NEW_LEN inside a /LEN
    Count { len: u8, new_len: Option<u8> },
    /// Smallest number of bits giving at least NEEDED subnets
    Bits { needed: u128 },
    /// Is A (address or CIDR) inside prefix B, and do they overlap
    Contains { a: String, b: String },
    /// ip6.arpa name of an address and its zone cut for a prefix length
    Reverse {
        address: String,

        /// Delegated prefix length; rounded up to a nibble boundary
        #[arg(long, short)]
        prefix: Option<u8>,
    },
    /// Next and previous network of the same size
    Navigate {
        cidr: String,

        #[arg(long, default_value_t = 1)]
        steps: u128,
    },
    /// Per-group breakdown of an address against a prefix length
    Groups {
        address: String,

        #[arg(long, short, default_value_t = 64)]
        prefix: u8,
    },
    /// Generate a planning exercise, optionally check a plan against it
    Scenario {
        #[arg(long, env = "IPV6CALC_SEED", default_value_t = 1)]
        seed: u32,

        /// Site prefix length of your plan
        #[arg(long, requires = "vlan")]
        site: Option<u8>,

        /// VLAN prefix length of your plan
        #[arg(long, requires = "site")]
        vlan: Option<u8>,
    },
}
