//! Command-line configuration for the server binary.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::Parser;

/// Medstock - medicine inventory with QR labels
#[derive(Debug, Clone, Parser)]
#[command(name = "medstock")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Address to listen on
    #[arg(long, default_value = "127.0.0.1:5000")]
    pub bind: SocketAddr,

    /// Path to the SQLite database file (created if missing)
    #[arg(long, default_value = "medicine.db")]
    pub database: PathBuf,

    /// Directory generated QR images are written to
    #[arg(long, default_value = "static/qr_codes")]
    pub qr_dir: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = Config::parse_from(["medstock"]);
        assert_eq!(config.bind, "127.0.0.1:5000".parse().unwrap());
        assert_eq!(config.database, PathBuf::from("medicine.db"));
        assert_eq!(config.qr_dir, PathBuf::from("static/qr_codes"));
    }

    #[test]
    fn test_overrides() {
        let config = Config::parse_from([
            "medstock",
            "--bind",
            "0.0.0.0:8080",
            "--database",
            "/var/lib/medstock/inventory.db",
            "--qr-dir",
            "/srv/qr",
        ]);
        assert_eq!(config.bind.port(), 8080);
        assert_eq!(config.database, PathBuf::from("/var/lib/medstock/inventory.db"));
        assert_eq!(config.qr_dir, PathBuf::from("/srv/qr"));
    }

    #[test]
    fn test_rejects_bad_address() {
        assert!(Config::try_parse_from(["medstock", "--bind", "not-an-addr"]).is_err());
    }
}
