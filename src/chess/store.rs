//! Append-only move log.
//!
//! One line per generated game: `<half-moves> <san> <san> ...`. The 0-based
//! line number is the game's seed index, so the file must only ever grow by
//! whole lines. A line that does not parse is reported as corruption and never
//! skipped, because every later line would be attributed to the wrong seed.

use std::fs::{File, OpenOptions};
use std::io::{self, BufRead, BufReader, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use super::error::{CorruptReason, StoreError};
use super::types::{FullGame, StubGame};

#[derive(Debug)]
pub struct MoveLogStore {
    path: PathBuf,
    file: File,
    /// The last line on disk has no `\n` yet; the next append supplies it.
    unterminated: bool,
}

impl MoveLogStore {
    /// Opens the log for appending, creating it if missing.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let open_err = |source| StoreError::Open {
            path: path.clone(),
            source,
        };
        let mut file = OpenOptions::new()
            .read(true)
            .create(true)
            .append(true)
            .open(&path)
            .map_err(open_err)?;
        let unterminated = ends_mid_line(&mut file).map_err(open_err)?;
        if unterminated {
            log::warn!(
                "Last line of storage file \"{}\" has no line break; it is completed on the next append",
                path.display()
            );
        }
        Ok(Self {
            path,
            file,
            unterminated,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Starts a fresh scan from the first line.
    pub fn scan(&self) -> Result<Scan<BufReader<File>>, StoreError> {
        let file = File::open(&self.path).map_err(|source| StoreError::Open {
            path: self.path.clone(),
            source,
        })?;
        Ok(Scan::new(BufReader::new(file)))
    }

    /// Appends one game and syncs it to disk.
    ///
    /// `StoreError::Sync` means the line was written but may not be durable.
    pub fn append(&mut self, game: &FullGame) -> Result<(), StoreError> {
        let mut line = format_line(game);
        if self.unterminated {
            line.insert(0, '\n');
        }
        self.file
            .write_all(line.as_bytes())
            .and_then(|()| self.file.flush())
            .map_err(|source| StoreError::Write {
                seed: game.seed,
                source,
            })?;
        self.unterminated = false;
        self.file.sync_data().map_err(|source| StoreError::Sync {
            seed: game.seed,
            source,
        })
    }
}

fn ends_mid_line(file: &mut File) -> io::Result<bool> {
    if file.metadata()?.len() == 0 {
        return Ok(false);
    }
    let mut last = [0u8];
    file.seek(SeekFrom::End(-1))?;
    file.read_exact(&mut last)?;
    Ok(last[0] != b'\n')
}

/// Encodes a game as a log line, including the trailing newline.
pub fn format_line(game: &FullGame) -> String {
    let mut line = game.half_moves().to_string();
    for san in &game.moves {
        line.push(' ');
        line.push_str(san);
    }
    line.push('\n');
    line
}

fn parse_line(line: &str, seed: u64) -> Result<StubGame, CorruptReason> {
    let mut tokens = line.split_ascii_whitespace();
    let head = tokens.next().unwrap_or_default();
    let length: usize = head
        .parse()
        .map_err(|_| CorruptReason::BadLength(head.to_string()))?;
    let moves: Vec<String> = tokens.map(str::to_string).collect();
    if moves.len() != length {
        return Err(CorruptReason::LengthMismatch {
            declared: length,
            actual: moves.len(),
        });
    }
    Ok(StubGame {
        seed,
        length,
        moves,
    })
}

/// Lazy, fail-stop iterator over the stored games.
pub struct Scan<R> {
    reader: R,
    buffer: String,
    next_seed: u64,
    failed: bool,
}

impl<R: BufRead> Scan<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: String::new(),
            next_seed: 0,
            failed: false,
        }
    }

    /// Number of lines parsed so far; also the seed of the next game to generate.
    pub fn scanned(&self) -> u64 {
        self.next_seed
    }
}

impl<R: BufRead> Iterator for Scan<R> {
    type Item = Result<StubGame, StoreError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }

        self.buffer.clear();
        let seed = self.next_seed;
        let line = seed as usize + 1;
        match self.reader.read_line(&mut self.buffer) {
            Ok(0) => None,
            Ok(_) => match parse_line(&self.buffer, seed) {
                Ok(stub) => {
                    self.next_seed += 1;
                    Some(Ok(stub))
                }
                Err(reason) => {
                    self.failed = true;
                    Some(Err(StoreError::Corrupt { line, seed, reason }))
                }
            },
            Err(source) => {
                self.failed = true;
                Some(Err(StoreError::Read { line, source }))
            }
        }
    }
}
