//! Startup hydration and write-back of the calculator state.
//!
//! Two persisted documents, each guarded by its own TTL:
//!
//! | Key | Content | TTL |
//! |-----|---------|-----|
//! | `car-import-state-v1` | full calculator state + `persistedAt` | 24 h |
//! | `car-import-last-fx-v1` | last in-band rate pair + `fetchedAt` | 6 h |
//!
//! Stale or malformed data never raises: the affected entry is purged and
//! the corresponding fields fall back to hard-coded defaults.

use anyhow::{Context, Result};
use landed_core::models::fees::{
    MAX_CUSTOMS_DUTY_PCT, MAX_HOMOLOGATION_FEE_EUR, MAX_MISCELLANEOUS_EUR, MAX_TRANSLATION_PAGES,
    MAX_VAT_PCT,
};
use landed_core::models::{
    ContainerType, CostScenario, DEFAULT_KRW_PER_USD, DEFAULT_USD_PER_EUR, RatePair,
    is_valid_krw_per_usd, is_valid_usd_per_eur,
};
use landed_core::state::CalculatorState;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::decode;
use crate::kv::KeyValueStore;

pub const STATE_KEY: &str = "car-import-state-v1";
pub const FX_KEY: &str = "car-import-last-fx-v1";

pub const STATE_TTL_MS: i64 = 24 * 60 * 60 * 1000;
pub const FX_TTL_MS: i64 = 6 * 60 * 60 * 1000;

/// Wire shape of the main persisted blob.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersistedState {
    pub car_prices: Vec<f64>,
    pub krw_per_usd_rate: f64,
    pub usd_per_eur_rate: f64,
    pub customs_duty: f64,
    pub vat: f64,
    pub translation_pages: f64,
    pub homologation_fee: f64,
    pub miscellaneous: f64,
    pub scenario: CostScenario,
    pub number_of_cars: usize,
    pub container_type: ContainerType,
    #[serde(rename = "autoUpdateFX")]
    pub auto_update_fx: bool,
    /// Epoch milliseconds of the write.
    pub persisted_at: i64,
}

impl PersistedState {
    pub fn from_state(
        state: &CalculatorState,
        persisted_at: i64,
    ) -> Self {
        Self {
            car_prices: state.car_prices.clone(),
            krw_per_usd_rate: state.krw_per_usd_rate,
            usd_per_eur_rate: state.usd_per_eur_rate,
            customs_duty: state.customs_duty,
            vat: state.vat,
            translation_pages: state.translation_pages,
            homologation_fee: state.homologation_fee,
            miscellaneous: state.miscellaneous,
            scenario: state.scenario,
            number_of_cars: state.number_of_cars,
            container_type: state.container_type,
            auto_update_fx: state.auto_update_fx,
            persisted_at,
        }
    }
}

/// Wire shape of the last-good-rates snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FxSnapshot {
    pub krw_per_usd: f64,
    pub usd_per_eur: f64,
    /// Epoch milliseconds of the fetch that produced this pair.
    pub fetched_at: i64,
}

impl FxSnapshot {
    pub fn rates(&self) -> RatePair {
        RatePair {
            krw_per_usd: self.krw_per_usd,
            usd_per_eur: self.usd_per_eur,
        }
    }
}

/// Builds the startup state from the store.
///
/// Never fails: malformed or expired data degrades to defaults, and expired
/// entries are removed from the store so the next run starts clean.
pub fn hydrate(
    store: &mut dyn KeyValueStore,
    now_ms: i64,
) -> CalculatorState {
    let snapshot = load_fx_snapshot(store, now_ms);
    let mut state = hydrate_main(store, now_ms);
    if let Some(snapshot) = snapshot {
        state.last_valid_rates = Some(snapshot.rates());
        state.last_updated_at = Some(snapshot.fetched_at);
    }
    state
}

fn hydrate_main(
    store: &mut dyn KeyValueStore,
    now_ms: i64,
) -> CalculatorState {
    let Some(raw) = store.get(STATE_KEY) else {
        return CalculatorState::default();
    };

    let root = match serde_json::from_str::<Value>(&raw) {
        Ok(Value::Object(map)) => map,
        Ok(_) | Err(_) => {
            tracing::warn!("persisted state is not a JSON object, using defaults");
            return CalculatorState::default();
        }
    };

    let persisted_at = decode::num_or(root.get("persistedAt"), f64::NAN);
    if !persisted_at.is_finite() || now_ms.saturating_sub(persisted_at as i64) > STATE_TTL_MS {
        tracing::warn!("persisted state expired or missing timestamp, discarding");
        store.remove(STATE_KEY);
        return CalculatorState::default();
    }

    let container_type = decode::container_or_default(root.get("containerType"));
    let number_of_cars = decode::car_count_or_default(root.get("numberOfCars"), container_type);
    let car_prices = decode::car_prices_or_default(root.get("carPrices"), number_of_cars);

    let (krw_per_usd_rate, usd_per_eur_rate) = resolve_rates(&root);

    CalculatorState {
        car_prices,
        krw_per_usd_rate,
        usd_per_eur_rate,
        customs_duty: decode::num_or(root.get("customsDuty"), 10.0).clamp(0.0, MAX_CUSTOMS_DUTY_PCT),
        vat: decode::num_or(root.get("vat"), 21.0).clamp(0.0, MAX_VAT_PCT),
        translation_pages: decode::num_or(root.get("translationPages"), 0.0)
            .clamp(0.0, MAX_TRANSLATION_PAGES),
        homologation_fee: decode::num_or(root.get("homologationFee"), 0.0)
            .clamp(0.0, MAX_HOMOLOGATION_FEE_EUR),
        miscellaneous: decode::num_or(root.get("miscellaneous"), 0.0)
            .clamp(0.0, MAX_MISCELLANEOUS_EUR),
        scenario: decode::scenario_or_default(root.get("scenario")),
        number_of_cars,
        container_type,
        auto_update_fx: decode::bool_or(root.get("autoUpdateFX"), true),
        last_valid_rates: None,
        last_updated_at: None,
    }
}

/// Resolves the stored rate pair, deriving it from legacy fields when the
/// current ones are absent, and substituting the fallback for anything
/// outside the plausible bands.
fn resolve_rates(root: &serde_json::Map<String, Value>) -> (f64, f64) {
    let mut krw_per_usd = decode::num_or(root.get("krwPerUsdRate"), f64::NAN);
    let mut usd_per_eur = decode::num_or(root.get("usdPerEurRate"), f64::NAN);

    if root.get("krwPerUsdRate").is_none()
        && root.get("usdPerEurRate").is_none()
        && let Some(legacy) = decode::derive_legacy_rates(
            decode::num_or(root.get("krwToEurRate"), f64::NAN),
            decode::num_or(root.get("usdToEurRate"), f64::NAN),
        )
    {
        krw_per_usd = legacy.krw_per_usd;
        usd_per_eur = legacy.usd_per_eur;
    }

    let krw_per_usd = if is_valid_krw_per_usd(krw_per_usd) {
        krw_per_usd
    } else {
        DEFAULT_KRW_PER_USD
    };
    let usd_per_eur = if is_valid_usd_per_eur(usd_per_eur) {
        usd_per_eur
    } else {
        DEFAULT_USD_PER_EUR
    };
    (krw_per_usd, usd_per_eur)
}

/// Loads the last-good-rates snapshot, purging it when expired, malformed
/// or out of band.
pub fn load_fx_snapshot(
    store: &mut dyn KeyValueStore,
    now_ms: i64,
) -> Option<FxSnapshot> {
    let raw = store.get(FX_KEY)?;

    let snapshot = match serde_json::from_str::<FxSnapshot>(&raw) {
        Ok(snapshot) => snapshot,
        Err(error) => {
            tracing::warn!(%error, "rate snapshot unreadable, discarding");
            store.remove(FX_KEY);
            return None;
        }
    };

    if now_ms.saturating_sub(snapshot.fetched_at) > FX_TTL_MS {
        tracing::warn!("rate snapshot expired, discarding");
        store.remove(FX_KEY);
        return None;
    }
    if !snapshot.rates().is_valid() {
        tracing::warn!("rate snapshot out of band, discarding");
        store.remove(FX_KEY);
        return None;
    }
    Some(snapshot)
}

/// Writes the main state blob.
pub fn persist(
    store: &mut dyn KeyValueStore,
    state: &CalculatorState,
    now_ms: i64,
) -> Result<()> {
    let blob = serde_json::to_string(&PersistedState::from_state(state, now_ms))
        .context("serializing calculator state")?;
    store
        .set(STATE_KEY, &blob)
        .context("writing calculator state")?;
    Ok(())
}

/// Writes the last-good-rates snapshot.
pub fn persist_fx(
    store: &mut dyn KeyValueStore,
    rates: RatePair,
    fetched_at: i64,
) -> Result<()> {
    let snapshot = FxSnapshot {
        krw_per_usd: rates.krw_per_usd,
        usd_per_eur: rates.usd_per_eur,
        fetched_at,
    };
    let blob = serde_json::to_string(&snapshot).context("serializing rate snapshot")?;
    store.set(FX_KEY, &blob).context("writing rate snapshot")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use landed_core::models::fees::MAX_CAR_PRICE_EUR;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::kv::MemoryStore;

    const NOW: i64 = 1_750_000_000_000;

    fn store_with_state(value: serde_json::Value) -> MemoryStore {
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, &value.to_string()).unwrap();
        store
    }

    fn full_blob(persisted_at: i64) -> serde_json::Value {
        json!({
            "carPrices": [12_000.0, 8_500.0],
            "krwPerUsdRate": 1420.0,
            "usdPerEurRate": 1.1,
            "customsDuty": 5.0,
            "vat": 19.0,
            "translationPages": 4.0,
            "homologationFee": 300.0,
            "miscellaneous": 120.0,
            "scenario": "company",
            "numberOfCars": 2,
            "containerType": "20ft",
            "autoUpdateFX": false,
            "persistedAt": persisted_at,
        })
    }

    #[test]
    fn fresh_blob_hydrates_verbatim() {
        let mut store = store_with_state(full_blob(NOW));

        let state = hydrate(&mut store, NOW);

        assert_eq!(state.car_prices, vec![12_000.0, 8_500.0]);
        assert_eq!(state.krw_per_usd_rate, 1420.0);
        assert_eq!(state.usd_per_eur_rate, 1.1);
        assert_eq!(state.customs_duty, 5.0);
        assert_eq!(state.vat, 19.0);
        assert_eq!(state.scenario, CostScenario::Company);
        assert_eq!(state.number_of_cars, 2);
        assert_eq!(state.container_type, ContainerType::TwentyFoot);
        assert!(!state.auto_update_fx);
    }

    #[test]
    fn blob_older_than_ttl_is_discarded_and_removed() {
        let mut store = store_with_state(full_blob(NOW - STATE_TTL_MS - 1));

        let state = hydrate(&mut store, NOW);

        assert_eq!(state, CalculatorState::default());
        assert!(!store.contains(STATE_KEY));
    }

    #[test]
    fn blob_exactly_at_ttl_still_hydrates() {
        let mut store = store_with_state(full_blob(NOW - STATE_TTL_MS));

        let state = hydrate(&mut store, NOW);

        assert_eq!(state.number_of_cars, 2);
    }

    #[test]
    fn missing_timestamp_discards_the_blob() {
        let mut blob = full_blob(NOW);
        blob.as_object_mut().unwrap().remove("persistedAt");
        let mut store = store_with_state(blob);

        let state = hydrate(&mut store, NOW);

        assert_eq!(state, CalculatorState::default());
        assert!(!store.contains(STATE_KEY));
    }

    #[test]
    fn malformed_json_falls_back_to_defaults() {
        let mut store = MemoryStore::new();
        store.set(STATE_KEY, "{not json").unwrap();

        assert_eq!(hydrate(&mut store, NOW), CalculatorState::default());
    }

    #[test]
    fn empty_store_hydrates_defaults() {
        let mut store = MemoryStore::new();

        let state = hydrate(&mut store, NOW);

        assert_eq!(state, CalculatorState::default());
        assert_eq!(state.krw_per_usd_rate, 1350.0);
        assert_eq!(state.usd_per_eur_rate, 1.08);
    }

    #[test]
    fn out_of_band_rates_fall_back_to_defaults() {
        let mut blob = full_blob(NOW);
        blob["krwPerUsdRate"] = json!(5.0);
        blob["usdPerEurRate"] = json!("nonsense");
        let mut store = store_with_state(blob);

        let state = hydrate(&mut store, NOW);

        assert_eq!(state.krw_per_usd_rate, DEFAULT_KRW_PER_USD);
        assert_eq!(state.usd_per_eur_rate, DEFAULT_USD_PER_EUR);
    }

    #[test]
    fn legacy_rate_fields_derive_the_new_pair() {
        let blob = json!({
            "carPrices": [1000.0],
            "krwToEurRate": 1.0 / 1458.0,
            "usdToEurRate": 1.0 / 1.08,
            "numberOfCars": 1,
            "containerType": "40ft",
            "persistedAt": NOW,
        });
        let mut store = store_with_state(blob);

        let state = hydrate(&mut store, NOW);

        assert!((state.krw_per_usd_rate - 1350.0).abs() < 1e-6);
        assert!((state.usd_per_eur_rate - 1.08).abs() < 1e-9);
    }

    #[test]
    fn legacy_rates_rejected_when_non_positive() {
        let blob = json!({
            "krwToEurRate": 0.0,
            "usdToEurRate": 1.0 / 1.08,
            "persistedAt": NOW,
        });
        let mut store = store_with_state(blob);

        let state = hydrate(&mut store, NOW);

        assert_eq!(state.krw_per_usd_rate, DEFAULT_KRW_PER_USD);
        assert_eq!(state.usd_per_eur_rate, DEFAULT_USD_PER_EUR);
    }

    #[test]
    fn stored_prices_are_clamped_and_length_normalized() {
        let mut blob = full_blob(NOW);
        blob["carPrices"] = json!([-500.0, 9.0e8, "1 000,5", null]);
        blob["numberOfCars"] = json!(4);
        blob["containerType"] = json!("40ft");
        let mut store = store_with_state(blob);

        let state = hydrate(&mut store, NOW);

        assert_eq!(state.number_of_cars, 4);
        assert_eq!(
            state.car_prices,
            vec![0.0, MAX_CAR_PRICE_EUR, 1000.5, 0.0]
        );
    }

    #[test]
    fn numeric_strings_with_separators_decode() {
        let mut blob = full_blob(NOW);
        blob["customsDuty"] = json!("7,5");
        blob["homologationFee"] = json!("1 250");
        let mut store = store_with_state(blob);

        let state = hydrate(&mut store, NOW);

        assert_eq!(state.customs_duty, 7.5);
        assert_eq!(state.homologation_fee, 1250.0);
    }

    #[test]
    fn fresh_fx_snapshot_populates_rate_history() {
        let mut store = store_with_state(full_blob(NOW));
        persist_fx(
            &mut store,
            RatePair {
                krw_per_usd: 1390.0,
                usd_per_eur: 1.05,
            },
            NOW - 1000,
        )
        .unwrap();

        let state = hydrate(&mut store, NOW);

        assert_eq!(
            state.last_valid_rates,
            Some(RatePair {
                krw_per_usd: 1390.0,
                usd_per_eur: 1.05,
            })
        );
        assert_eq!(state.last_updated_at, Some(NOW - 1000));
    }

    #[test]
    fn stale_fx_snapshot_is_purged() {
        let mut store = MemoryStore::new();
        persist_fx(&mut store, RatePair::fallback(), NOW - FX_TTL_MS - 1).unwrap();

        let state = hydrate(&mut store, NOW);

        assert_eq!(state.last_valid_rates, None);
        assert_eq!(state.last_updated_at, None);
        assert!(!store.contains(FX_KEY));
    }

    #[test]
    fn stale_main_state_does_not_drop_fresh_fx_history() {
        let mut store = store_with_state(full_blob(NOW - STATE_TTL_MS - 1));
        persist_fx(&mut store, RatePair::fallback(), NOW).unwrap();

        let state = hydrate(&mut store, NOW);

        assert_eq!(state.number_of_cars, 1);
        assert_eq!(state.last_valid_rates, Some(RatePair::fallback()));
    }

    #[test]
    fn persist_then_hydrate_round_trips() {
        let mut store = MemoryStore::new();
        let mut original = CalculatorState::default();
        original.car_prices = vec![7500.0, 0.0, 0.0];
        original.number_of_cars = 3;
        original.scenario = CostScenario::Company;
        original.translation_pages = 12.0;

        persist(&mut store, &original, NOW).unwrap();
        let state = hydrate(&mut store, NOW);

        assert_eq!(state.car_prices, original.car_prices);
        assert_eq!(state.number_of_cars, 3);
        assert_eq!(state.scenario, CostScenario::Company);
        assert_eq!(state.translation_pages, 12.0);
    }
}
