/// Holdings persistence
///
/// The backing file is a flat JSON object of string keys to JSON values.
/// Holdings live under one key; other keys in the file are preserved.
use super::types::{Holding, NewHolding};
use crate::errors::{PortfolioError, PortfolioResult};
use crate::logger::{self, LogTag};
use chrono::Utc;
use serde_json::{Map, Value};
use std::fs;
use std::path::{Path, PathBuf};

/// Key the holdings list is stored under
pub const HOLDINGS_KEY: &str = "cryptoHoldings";

pub struct HoldingsStore {
    path: PathBuf,
}

impl HoldingsStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All holdings in insertion order; a missing file is an empty list
    pub fn load(&self) -> PortfolioResult<Vec<Holding>> {
        let mut entries = self.read_entries()?;
        match entries.remove(HOLDINGS_KEY) {
            Some(Value::Null) | None => Ok(Vec::new()),
            Some(value) => Ok(serde_json::from_value(value)?),
        }
    }

    /// Replace the stored holdings list
    pub fn save(&self, holdings: &[Holding]) -> PortfolioResult<()> {
        let mut entries = self.read_entries()?;
        entries.insert(HOLDINGS_KEY.to_string(), serde_json::to_value(holdings)?);
        self.write_entries(&entries)?;

        logger::debug(
            LogTag::Portfolio,
            &format!(
                "Saved {} holdings to {}",
                holdings.len(),
                self.path.display()
            ),
        );
        Ok(())
    }

    pub fn add(&self, input: NewHolding) -> PortfolioResult<Holding> {
        input.validate()?;
        let mut holdings = self.load()?;

        let (symbol, name) = input.normalized_parts();
        let holding = Holding {
            id: next_id(&holdings, Utc::now().timestamp_millis().max(0) as u64)?,
            symbol,
            name,
            amount: input.amount,
            purchase_price: input.purchase_price,
            date_added: Utc::now(),
        };

        holdings.push(holding.clone());
        self.save(&holdings)?;

        logger::info(
            LogTag::Portfolio,
            &format!(
                "Added holding {} ({} {} @ {})",
                holding.id, holding.amount, holding.symbol, holding.purchase_price
            ),
        );
        Ok(holding)
    }

    /// Replace the editable fields of holding `id`, keeping id and date added
    pub fn update(&self, id: u64, input: NewHolding) -> PortfolioResult<Holding> {
        input.validate()?;
        let mut holdings = self.load()?;

        let existing = holdings
            .iter_mut()
            .find(|holding| holding.id == id)
            .ok_or(PortfolioError::NotFound { id })?;

        let (symbol, name) = input.normalized_parts();
        existing.symbol = symbol;
        existing.name = name;
        existing.amount = input.amount;
        existing.purchase_price = input.purchase_price;
        let updated = existing.clone();

        self.save(&holdings)?;
        logger::info(LogTag::Portfolio, &format!("Updated holding {}", id));
        Ok(updated)
    }

    /// Whether a holding with `id` existed and was removed
    pub fn remove(&self, id: u64) -> PortfolioResult<bool> {
        let mut holdings = self.load()?;
        let before = holdings.len();
        holdings.retain(|holding| holding.id != id);

        if holdings.len() == before {
            return Ok(false);
        }

        self.save(&holdings)?;
        logger::info(LogTag::Portfolio, &format!("Removed holding {}", id));
        Ok(true)
    }

    /// Holdings whose symbol or name contains `term`, ignoring case
    pub fn filter(&self, term: &str) -> PortfolioResult<Vec<Holding>> {
        let holdings = self.load()?;
        let term = term.trim();
        if term.is_empty() {
            return Ok(holdings);
        }
        Ok(holdings
            .into_iter()
            .filter(|holding| holding.matches(term))
            .collect())
    }

    fn read_entries(&self) -> PortfolioResult<Map<String, Value>> {
        if !self.path.exists() {
            return Ok(Map::new());
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Map::new());
        }
        Ok(serde_json::from_str(&content)?)
    }

    fn write_entries(&self, entries: &Map<String, Value>) -> PortfolioResult<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(entries)?;
        let temp_path = self.path.with_extension("json.tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;
        Ok(())
    }
}

/// `candidate`, or one past the largest id when that is already taken
fn next_id(holdings: &[Holding], candidate: u64) -> PortfolioResult<u64> {
    match holdings.iter().map(|holding| holding.id).max() {
        Some(max) if max >= candidate => {
            max.checked_add(1).ok_or_else(|| PortfolioError::InvalidHolding {
                reason: format!("no holding id left after {}", max),
            })
        }
        _ => Ok(candidate),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store_in(dir: &TempDir) -> HoldingsStore {
        HoldingsStore::new(dir.path().join("holdings.json"))
    }

    #[test]
    fn missing_file_loads_empty() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        assert!(store.load().unwrap().is_empty());
        assert!(!store.remove(42).unwrap());
    }

    #[test]
    fn add_persists_across_instances() {
        let dir = TempDir::new().unwrap();
        let added = store_in(&dir)
            .add(NewHolding::new("btc", 0.5, 30000.0).with_name("Bitcoin"))
            .unwrap();

        let loaded = store_in(&dir).load().unwrap();
        assert_eq!(loaded, vec![added.clone()]);
        assert_eq!(added.symbol, "BTC");
        assert_eq!(added.name, "Bitcoin");
        assert!(!dir.path().join("holdings.json.tmp").exists());
    }

    #[test]
    fn ids_stay_unique_when_added_in_the_same_millisecond() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let first = store.add(NewHolding::new("btc", 1.0, 1.0)).unwrap();
        let second = store.add(NewHolding::new("eth", 1.0, 1.0)).unwrap();
        assert_ne!(first.id, second.id);
        assert_eq!(next_id(&[first.clone()], first.id).unwrap(), first.id + 1);
        assert_eq!(next_id(&[], 7).unwrap(), 7);
    }

    #[test]
    fn exhausted_id_space_is_an_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let mut saturated = store.add(NewHolding::new("btc", 1.0, 1.0)).unwrap();
        saturated.id = u64::MAX;
        store.save(&[saturated]).unwrap();

        let err = store.add(NewHolding::new("eth", 1.0, 1.0)).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidHolding { .. }));
        assert_eq!(store.load().unwrap().len(), 1);
    }

    #[test]
    fn invalid_input_is_rejected_without_writing() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let err = store.add(NewHolding::new("btc", 0.0, 1.0)).unwrap_err();
        assert!(matches!(err, PortfolioError::InvalidHolding { .. }));
        assert!(!store.path().exists());
    }

    #[test]
    fn update_keeps_identity() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let original = store.add(NewHolding::new("sol", 10.0, 20.0)).unwrap();

        let updated = store
            .update(original.id, NewHolding::new("sol", 12.0, 25.0).with_name("Solana"))
            .unwrap();
        assert_eq!(updated.id, original.id);
        assert_eq!(updated.date_added, original.date_added);
        assert_eq!(updated.amount, 12.0);
        assert_eq!(updated.name, "Solana");
        assert_eq!(store.load().unwrap(), vec![updated]);

        let err = store
            .update(original.id + 1000, NewHolding::new("sol", 1.0, 1.0))
            .unwrap_err();
        assert!(matches!(err, PortfolioError::NotFound { .. }));
    }

    #[test]
    fn remove_only_drops_the_matching_holding() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        let btc = store.add(NewHolding::new("btc", 1.0, 1.0)).unwrap();
        let eth = store.add(NewHolding::new("eth", 1.0, 1.0)).unwrap();

        assert!(store.remove(btc.id).unwrap());
        assert!(!store.remove(btc.id).unwrap());
        assert_eq!(store.load().unwrap(), vec![eth]);
    }

    #[test]
    fn filter_matches_symbol_or_name() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        store
            .add(NewHolding::new("btc", 1.0, 1.0).with_name("Bitcoin"))
            .unwrap();
        store
            .add(NewHolding::new("eth", 1.0, 1.0).with_name("Ethereum"))
            .unwrap();

        assert_eq!(store.filter("COIN").unwrap().len(), 1);
        assert_eq!(store.filter("eth").unwrap()[0].symbol, "ETH");
        assert_eq!(store.filter("").unwrap().len(), 2);
        assert!(store.filter("doge").unwrap().is_empty());
    }

    #[test]
    fn other_keys_in_the_file_survive_saves() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), r#"{"theme":"dark"}"#).unwrap();

        store.add(NewHolding::new("ada", 100.0, 0.4)).unwrap();

        let raw: Map<String, Value> =
            serde_json::from_str(&fs::read_to_string(store.path()).unwrap()).unwrap();
        assert_eq!(raw["theme"], "dark");
        assert_eq!(raw[HOLDINGS_KEY].as_array().unwrap().len(), 1);
    }

    #[test]
    fn corrupt_file_is_a_serialization_error() {
        let dir = TempDir::new().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), "not json").unwrap();
        assert!(matches!(
            store.load().unwrap_err(),
            PortfolioError::Serialization(_)
        ));
    }
}
