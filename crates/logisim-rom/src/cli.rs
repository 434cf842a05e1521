use clap::{Parser, Subcommand};
use std::net::IpAddr;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "logisim-rom",
    version,
    about = "Converts MARS memory dumps into Logisim ROM listings"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts a memory dump (one hex word per line) into a ROM listing.
    Convert {
        /// Memory dump to read, or `-` for stdin.
        input: PathBuf,
        #[arg(short, long, default_value = "logism_rom.txt")]
        output: PathBuf,
        /// Print the listing instead of writing the output file.
        #[arg(long, conflicts_with = "output")]
        stdout: bool,
    },
    /// Serves the upload/download web front end.
    Serve {
        #[arg(long, env = "LOGISIM_ROM_HOST", default_value = "127.0.0.1")]
        host: IpAddr,
        #[arg(short, long, env = "LOGISIM_ROM_PORT", default_value_t = 5000)]
        port: u16,
        /// Directory uploaded dumps are saved to.
        #[arg(long, env = "LOGISIM_ROM_UPLOAD_DIR", default_value = "uploads")]
        upload_dir: PathBuf,
        /// Directory the generated listing is written to.
        #[arg(long, env = "LOGISIM_ROM_PROCESSED_DIR", default_value = "processed")]
        processed_dir: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn convert_defaults_to_logism_rom() {
        let cli = Cli::try_parse_from(["logisim-rom", "convert", "dump.txt"]).unwrap();
        match cli.command {
            Commands::Convert {
                input,
                output,
                stdout,
            } => {
                assert_eq!(input, PathBuf::from("dump.txt"));
                assert_eq!(output, PathBuf::from("logism_rom.txt"));
                assert!(!stdout);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn serve_accepts_overrides() {
        let cli = Cli::try_parse_from([
            "logisim-rom",
            "serve",
            "--host",
            "0.0.0.0",
            "--port",
            "8080",
            "--processed-dir",
            "out",
        ])
        .unwrap();
        match cli.command {
            Commands::Serve {
                host,
                port,
                processed_dir,
                ..
            } => {
                assert_eq!(host.to_string(), "0.0.0.0");
                assert_eq!(port, 8080);
                assert_eq!(processed_dir, PathBuf::from("out"));
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
