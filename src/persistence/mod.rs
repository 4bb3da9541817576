//! Roster save/load
//!
//! The roster is stored verbatim as a JSON array of players under a single
//! key. There is no envelope or version field: anything that does not parse
//! as a roster is treated as no roster at all.

use crate::platform::KeyValueStore;
use crate::roster::Player;

/// Serialize a roster to its stored JSON form
pub fn encode_roster(players: &[Player]) -> Result<String, serde_json::Error> {
    serde_json::to_string(players)
}

/// Parse a stored roster
pub fn decode_roster(json: &str) -> Result<Vec<Player>, serde_json::Error> {
    serde_json::from_str(json)
}

/// Load the roster stored under `key`, falling back to an empty roster when
/// the entry is missing, unreadable or corrupt
pub fn load_roster<S: KeyValueStore + ?Sized>(storage: &S, key: &str) -> Vec<Player> {
    let json = match storage.get(key) {
        Ok(Some(json)) => json,
        Ok(None) => {
            log::info!("No saved roster found, starting fresh");
            return Vec::new();
        }
        Err(e) => {
            log::warn!("Failed to read roster: {}", e);
            return Vec::new();
        }
    };

    match decode_roster(&json) {
        Ok(players) => {
            log::info!("Loaded roster ({} players)", players.len());
            players
        }
        Err(e) => {
            log::warn!("Discarding unreadable roster: {}", e);
            Vec::new()
        }
    }
}

/// Overwrite the stored roster; failures are logged and otherwise ignored
pub fn save_roster<S: KeyValueStore + ?Sized>(storage: &mut S, key: &str, players: &[Player]) {
    let json = match encode_roster(players) {
        Ok(json) => json,
        Err(e) => {
            log::warn!("Failed to encode roster: {}", e);
            return;
        }
    };

    match storage.set(key, &json) {
        Ok(()) => log::debug!("Roster saved ({} players)", players.len()),
        Err(e) => log::warn!("Failed to save roster: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::ROSTER_STORAGE_KEY;
    use crate::platform::MemoryStore;
    use crate::roster::{Letter, PlayerId};

    fn sample_roster() -> Vec<Player> {
        let mut ana = Player::new(PlayerId(1_700_000_000_001), "Ana");
        ana.toggle(Letter::S);
        ana.toggle(Letter::T);
        let bruno = Player::new(PlayerId(1_700_000_000_002), "Bruno");
        let mut caio = Player::new(PlayerId(1_700_000_000_003), "Caio");
        for letter in Letter::ALL {
            caio.toggle(letter);
        }
        vec![bruno, ana, caio]
    }

    #[test]
    fn test_roundtrip_preserves_roster() {
        let roster = sample_roster();
        let json = encode_roster(&roster).unwrap();
        assert_eq!(decode_roster(&json).unwrap(), roster);
    }

    #[test]
    fn test_decodes_browser_format() {
        let json = r#"[{"id":1712345678901,"name":"Ana","letters":[
            {"letter":"S","failed":true},{"letter":"K","failed":false},
            {"letter":"A","failed":false},{"letter":"T","failed":false},
            {"letter":"E","failed":false}]}]"#;
        let roster = decode_roster(json).unwrap();
        assert_eq!(roster.len(), 1);
        assert_eq!(roster[0].id, PlayerId(1_712_345_678_901));
        assert_eq!(roster[0].name, "Ana");
        assert!(roster[0].is_failed(Letter::S));
        assert_eq!(roster[0].failed_count(), 1);
    }

    #[test]
    fn test_load_missing_is_empty() {
        let storage = MemoryStore::new();
        assert!(load_roster(&storage, ROSTER_STORAGE_KEY).is_empty());
    }

    #[test]
    fn test_load_corrupt_is_empty() {
        for bad in ["not json", "{}", "[{\"id\":1}]", "[1,2,3]", ""] {
            let storage = MemoryStore::with_entry(ROSTER_STORAGE_KEY, bad);
            assert!(load_roster(&storage, ROSTER_STORAGE_KEY).is_empty(), "{bad:?}");
        }
    }

    #[test]
    fn test_save_then_load() {
        let roster = sample_roster();
        let mut storage = MemoryStore::new();
        save_roster(&mut storage, ROSTER_STORAGE_KEY, &roster);
        assert_eq!(load_roster(&storage, ROSTER_STORAGE_KEY), roster);
    }
}
