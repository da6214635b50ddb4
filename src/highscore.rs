//! High score persistence
//!
//! A single integer, stored as one plain decimal value in a text file.
//! Missing or corrupt files are recovered locally by defaulting to zero;
//! the game never crashes over its score file.

use std::fs;
use std::io;
use std::path::Path;

/// Default file name next to the executable's working directory
pub const DEFAULT_PATH: &str = "highscore.txt";

/// The persisted best score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighScore(pub u64);

impl HighScore {
    /// Load from `path`. Absent or unparsable content falls back to 0 with
    /// a log line rather than an error.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(content) => match content.trim().parse::<u64>() {
                Ok(value) => {
                    log::info!("loaded high score {value} from {}", path.display());
                    Self(value)
                }
                Err(_) => {
                    log::warn!(
                        "high score file {} is corrupt, starting from 0",
                        path.display()
                    );
                    Self(0)
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no high score file at {}, starting from 0", path.display());
                Self(0)
            }
            Err(err) => {
                log::warn!(
                    "could not read high score file {}: {err}, starting from 0",
                    path.display()
                );
                Self(0)
            }
        }
    }

    /// Write the score as a plain decimal integer
    pub fn save(&self, path: &Path) -> io::Result<()> {
        fs::write(path, self.0.to_string())?;
        log::info!("saved high score {} to {}", self.0, path.display());
        Ok(())
    }

    /// Record a finished run; persists only when the run's score is at
    /// least the stored value.
    pub fn record(&mut self, score: u64, path: &Path) {
        if score >= self.0 {
            self.0 = score;
            if let Err(err) = self.save(path) {
                log::warn!("failed to save high score: {err}");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn temp_path(name: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!("crt_breakout_{name}_{}", std::process::id()));
        path
    }

    #[test]
    fn missing_file_defaults_to_zero() {
        let path = temp_path("missing");
        let _ = fs::remove_file(&path);
        assert_eq!(HighScore::load(&path), HighScore(0));
    }

    #[test]
    fn corrupt_file_defaults_to_zero() {
        let path = temp_path("corrupt");
        fs::write(&path, "not a number").unwrap();
        assert_eq!(HighScore::load(&path), HighScore(0));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn save_load_roundtrip() {
        let path = temp_path("roundtrip");
        HighScore(4200).save(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "4200");
        assert_eq!(HighScore::load(&path), HighScore(4200));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn record_keeps_the_better_score() {
        let path = temp_path("record");
        let _ = fs::remove_file(&path);
        let mut best = HighScore(500);
        best.record(300, &path);
        assert_eq!(best.0, 500);
        // A lower score must not have been written out
        assert_eq!(HighScore::load(&path), HighScore(0));

        best.record(800, &path);
        assert_eq!(best.0, 800);
        assert_eq!(HighScore::load(&path), HighScore(800));
        let _ = fs::remove_file(&path);
    }

    #[test]
    fn whitespace_is_tolerated() {
        let path = temp_path("whitespace");
        fs::write(&path, " 123\n").unwrap();
        assert_eq!(HighScore::load(&path), HighScore(123));
        let _ = fs::remove_file(&path);
    }
}
