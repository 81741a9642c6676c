use super::scoring::calculate_score;
use crate::core::constants::{RANKING_CAPACITY, RANKING_FILENAME, RANKING_VERSION_MAGIC};
use crate::core::settings::Difficulty;
use crate::utils::persistence::data_path;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankingEntry {
    pub player_name: String,
    pub score: u64,
    pub elapsed_seconds: f64,
    pub enemies_killed: u32,
    pub difficulty: Difficulty,
    /// Unix seconds when the run was recorded.
    pub timestamp: i64,
}

impl RankingEntry {
    /// Scores a finished run and stamps it with the current time.
    pub fn new(
        player_name: impl Into<String>,
        elapsed_seconds: f64,
        enemies_killed: u32,
        difficulty: Difficulty,
    ) -> Self {
        Self {
            player_name: player_name.into(),
            score: calculate_score(enemies_killed, elapsed_seconds, difficulty),
            elapsed_seconds,
            enemies_killed,
            difficulty,
            timestamp: chrono::Utc::now().timestamp(),
        }
    }

    /// Local date of the run as `DD/MM/YYYY`.
    pub fn date_label(&self) -> String {
        chrono::DateTime::from_timestamp(self.timestamp, 0)
            .map(|utc| utc.with_timezone(&chrono::Local).format("%d/%m/%Y").to_string())
            .unwrap_or_default()
    }
}

/// The high-score table: at most [`RANKING_CAPACITY`] entries, best first.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ranking {
    entries: Vec<RankingEntry>,
}

impl Ranking {
    /// Inserts an entry, keeping the table sorted and bounded. Ties keep
    /// insertion order. Returns the 0-based rank, or `None` if it did not
    /// make the cut.
    pub fn add(&mut self, entry: RankingEntry) -> Option<usize> {
        let rank = self.entries.partition_point(|e| e.score >= entry.score);
        self.entries.insert(rank, entry);
        self.entries.truncate(RANKING_CAPACITY);
        (rank < RANKING_CAPACITY).then_some(rank)
    }

    pub fn top(&self) -> &[RankingEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Magic, length prefix and SHA256 checksum around the payload.
const HEADER_AND_CHECKSUM_LEN: u64 = 8 + 4 + 32;

/// Reads and writes the ranking with a checksummed binary format.
#[derive(Debug, Clone)]
pub struct RankingStore {
    path: PathBuf,
}

impl RankingStore {
    /// Store in the default data directory.
    pub fn new() -> io::Result<Self> {
        Ok(Self::at(data_path(RANKING_FILENAME)?))
    }

    pub fn at(path: PathBuf) -> Self {
        Self { path }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Writes the whole ranking.
    ///
    /// File format:
    /// - Version magic (8 bytes)
    /// - Data length (4 bytes)
    /// - bincode payload (variable length)
    /// - SHA256 checksum of the three above (32 bytes)
    pub fn save(&self, ranking: &Ranking) -> io::Result<()> {
        let data =
            bincode::serialize(ranking).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        let data_len = data.len() as u32;

        let mut hasher = Sha256::new();
        hasher.update(RANKING_VERSION_MAGIC.to_le_bytes());
        hasher.update(data_len.to_le_bytes());
        hasher.update(&data);
        let checksum = hasher.finalize();

        // Written beside the real file and renamed over it, so a failed
        // write never touches the previous ranking.
        let tmp_path = self.temp_path();
        let mut file = fs::File::create(&tmp_path)?;
        file.write_all(&RANKING_VERSION_MAGIC.to_le_bytes())?;
        file.write_all(&data_len.to_le_bytes())?;
        file.write_all(&data)?;
        file.write_all(&checksum)?;
        file.sync_all()?;
        drop(file);
        fs::rename(&tmp_path, &self.path)
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("tmp")
    }

    /// Reads the ranking, failing on a missing file, wrong magic, bad
    /// checksum or undecodable payload.
    pub fn load(&self) -> io::Result<Ranking> {
        let mut file = fs::File::open(&self.path)?;
        let file_len = file.metadata()?.len();

        let mut version_bytes = [0u8; 8];
        file.read_exact(&mut version_bytes)?;
        let version = u64::from_le_bytes(version_bytes);
        if version != RANKING_VERSION_MAGIC {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!(
                    "Invalid ranking version: expected 0x{:016X}, got 0x{:016X}",
                    RANKING_VERSION_MAGIC, version
                ),
            ));
        }

        let mut length_bytes = [0u8; 4];
        file.read_exact(&mut length_bytes)?;
        let data_len = u32::from_le_bytes(length_bytes);
        if u64::from(data_len) > file_len.saturating_sub(HEADER_AND_CHECKSUM_LEN) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                format!("Ranking length {} exceeds file size {}", data_len, file_len),
            ));
        }

        let mut data = vec![0u8; data_len as usize];
        file.read_exact(&mut data)?;

        let mut stored_checksum = [0u8; 32];
        file.read_exact(&mut stored_checksum)?;

        let mut hasher = Sha256::new();
        hasher.update(version_bytes);
        hasher.update(length_bytes);
        hasher.update(&data);
        if stored_checksum != hasher.finalize().as_slice() {
            return Err(io::Error::new(
                io::ErrorKind::InvalidData,
                "Checksum verification failed",
            ));
        }

        let mut ranking: Ranking =
            bincode::deserialize(&data).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
        ranking.entries.sort_by(|a, b| b.score.cmp(&a.score));
        ranking.entries.truncate(RANKING_CAPACITY);
        Ok(ranking)
    }

    /// Loads the ranking, starting empty if the file is absent or damaged.
    pub fn load_or_default(&self) -> Ranking {
        match self.load() {
            Ok(ranking) => {
                info!(entries = ranking.len(), "ranking loaded");
                ranking
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ranking::default(),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "ranking unreadable, starting empty");
                Ranking::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, kills: u32, secs: f64) -> RankingEntry {
        RankingEntry::new(name, secs, kills, Difficulty::Normal)
    }

    #[test]
    fn test_add_keeps_sorted_and_bounded() {
        let mut ranking = Ranking::default();
        for i in 0..15 {
            ranking.add(entry(&format!("p{i}"), (i * 7) % 11, 60.0));
        }
        assert_eq!(ranking.len(), RANKING_CAPACITY);
        assert!(ranking.top().windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn test_add_reports_rank() {
        let mut ranking = Ranking::default();
        assert_eq!(ranking.add(entry("a", 3, 0.0)), Some(0));
        assert_eq!(ranking.add(entry("b", 5, 0.0)), Some(0));
        assert_eq!(ranking.add(entry("c", 4, 0.0)), Some(1));
        for _ in 0..7 {
            ranking.add(entry("d", 9, 0.0));
        }
        assert_eq!(ranking.add(entry("e", 0, 0.0)), None);
        assert!(ranking.top().iter().all(|e| e.player_name != "e"));
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let mut ranking = Ranking::default();
        ranking.add(entry("first", 2, 0.0));
        ranking.add(entry("second", 2, 0.0));
        let names: Vec<_> = ranking.top().iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["first", "second"]);
    }

    #[test]
    fn test_clear() {
        let mut ranking = Ranking::default();
        ranking.add(entry("a", 1, 0.0));
        ranking.clear();
        assert!(ranking.is_empty());
    }

    #[test]
    fn test_store_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = RankingStore::at(dir.path().join("ranking.dat"));
        let mut ranking = Ranking::default();
        ranking.add(entry("Ana", 5, 120.0));
        store.save(&ranking).unwrap();

        let loaded = store.load().unwrap();
        assert_eq!(loaded, ranking);
        assert_eq!(loaded.top()[0].score, 488);
    }

    #[test]
    fn test_load_missing_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = RankingStore::at(dir.path().join("ranking.dat"));
        assert_eq!(store.load().unwrap_err().kind(), io::ErrorKind::NotFound);
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_corrupted_file_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = RankingStore::at(dir.path().join("ranking.dat"));
        let mut ranking = Ranking::default();
        ranking.add(entry("Ana", 5, 120.0));
        store.save(&ranking).unwrap();

        let mut bytes = fs::read(store.path()).unwrap();
        let middle = bytes.len() / 2;
        bytes[middle] ^= 0xFF;
        fs::write(store.path(), bytes).unwrap();

        assert_eq!(store.load().unwrap_err().kind(), io::ErrorKind::InvalidData);
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_wrong_magic_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = RankingStore::at(dir.path().join("ranking.dat"));
        fs::write(store.path(), [0u8; 64]).unwrap();
        assert_eq!(store.load().unwrap_err().kind(), io::ErrorKind::InvalidData);
    }

    #[test]
    fn test_leftover_temp_file_keeps_saved_ranking() {
        let dir = tempfile::tempdir().unwrap();
        let store = RankingStore::at(dir.path().join("ranking.dat"));
        let mut ranking = Ranking::default();
        ranking.add(entry("Ana", 5, 120.0));
        store.save(&ranking).unwrap();

        // An interrupted save leaves only a partial temp file behind.
        fs::write(store.temp_path(), RANKING_VERSION_MAGIC.to_le_bytes()).unwrap();
        assert_eq!(store.load().unwrap(), ranking);

        ranking.add(entry("Bo", 7, 60.0));
        store.save(&ranking).unwrap();
        assert_eq!(store.load().unwrap(), ranking);
        assert!(!store.temp_path().exists());
    }

    #[test]
    fn test_oversized_length_header_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let store = RankingStore::at(dir.path().join("ranking.dat"));
        let mut bytes = RANKING_VERSION_MAGIC.to_le_bytes().to_vec();
        bytes.extend_from_slice(&u32::MAX.to_le_bytes());
        bytes.extend_from_slice(&[0u8; 40]);
        fs::write(store.path(), bytes).unwrap();

        assert_eq!(store.load().unwrap_err().kind(), io::ErrorKind::InvalidData);
        assert!(store.load_or_default().is_empty());
    }

    #[test]
    fn test_unsorted_file_is_sorted_on_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = RankingStore::at(dir.path().join("ranking.dat"));
        let unsorted = Ranking {
            entries: vec![entry("low", 1, 0.0), entry("high", 9, 0.0), entry("mid", 4, 0.0)],
        };
        store.save(&unsorted).unwrap();

        let mut loaded = store.load().unwrap();
        let names: Vec<_> = loaded.top().iter().map(|e| e.player_name.as_str()).collect();
        assert_eq!(names, vec!["high", "mid", "low"]);
        assert_eq!(loaded.add(entry("new", 5, 0.0)), Some(1));
    }

    #[test]
    fn test_date_label() {
        let e = entry("a", 1, 0.0);
        assert_eq!(e.date_label().len(), 10);
    }
}
