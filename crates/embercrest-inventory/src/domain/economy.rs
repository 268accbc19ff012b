//! Upgrading and disenchanting items for gold and essence.
//!
//! Every random decision goes through a `DeterministicRng`. Costs are paid
//! whether or not the roll goes the player's way: a failed upgrade destroys
//! the item, and a disenchant that yields nothing still consumes it.

use embercrest_character::domain::character::{Character, ItemLocation};
use embercrest_content::domain::catalog::GameCatalog;
use embercrest_content::domain::items::{ItemInstance, ItemTemplate, Rarity};
use embercrest_core::config::EngineConfig;
use embercrest_core::rng::DeterministicRng;
use serde::Serialize;
use thiserror::Error;
use uuid::Uuid;

/// Lowest upgrade success chance, in percent.
pub const MIN_UPGRADE_CHANCE: u32 = 10;

/// Essence consumed by one upgrade attempt.
pub const UPGRADE_ESSENCE_COST: u32 = 1;

/// Why an upgrade or disenchant was rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EconomyFailure {
    /// The item is not on the character.
    #[error("item not found: {0}")]
    ItemNotFound(Uuid),

    /// The item's template is missing from the catalog.
    #[error("unknown item template: {0}")]
    UnknownTemplate(String),

    /// The item is already at the configured maximum.
    #[error("item is already at the maximum upgrade level {max}")]
    MaxLevelReached {
        /// Configured maximum level.
        max: u8,
    },

    /// Not enough gold to pay for the action.
    #[error("requires {required} gold, character has {available}")]
    InsufficientGold {
        /// Gold cost.
        required: u64,
        /// Gold held.
        available: u64,
    },

    /// Not enough essence of the item's tier.
    #[error("requires {required} {tier:?} essence, character has {available}")]
    InsufficientEssence {
        /// Essence tier.
        tier: Rarity,
        /// Essence cost.
        required: u32,
        /// Essence held.
        available: u32,
    },
}

/// Cost and odds of the next upgrade of an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct UpgradeQuote {
    /// Level the item reaches on success.
    pub next_level: u8,
    /// Gold cost.
    pub gold_cost: u64,
    /// Essence tier consumed.
    pub essence: Rarity,
    /// Essence consumed.
    pub essence_cost: u32,
    /// Success chance, in percent.
    pub success_chance: u32,
}

/// Cost and possible yield of disenchanting an item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DisenchantQuote {
    /// Gold cost.
    pub gold_cost: u64,
    /// Essence tier produced.
    pub essence: Rarity,
    /// Smallest non-zero yield.
    pub min_yield: u32,
    /// Largest yield.
    pub max_yield: u32,
    /// Chance of any yield at all, in percent.
    pub yield_chance: u32,
}

/// Result of an upgrade attempt.
#[derive(Debug, Clone)]
pub struct UpgradeOutcome {
    /// The character after paying and rolling.
    pub character: Character,
    /// Whether the item survived and gained a level.
    pub success: bool,
    /// The item's level after the attempt. On failure, the level it had
    /// when it was destroyed.
    pub new_level: u8,
    /// Gold paid.
    pub gold_spent: u64,
}

/// Result of a disenchant.
#[derive(Debug, Clone)]
pub struct DisenchantOutcome {
    /// The character after the item was consumed.
    pub character: Character,
    /// Essence tier credited.
    pub essence: Rarity,
    /// Essence credited, possibly zero.
    pub amount: u32,
    /// Gold paid.
    pub gold_spent: u64,
}

struct EssenceYield {
    min: u32,
    max: u32,
    chance: u32,
}

fn essence_yield(rarity: Rarity) -> EssenceYield {
    let (min, max, chance) = match rarity {
        Rarity::Common => (1, 4, 100),
        Rarity::Uncommon | Rarity::Rare => (1, 2, 100),
        Rarity::Epic => (1, 1, 100),
        Rarity::Legendary => (1, 1, 50),
    };
    EssenceYield { min, max, chance }
}

fn roll_percent(rng: &mut dyn DeterministicRng, chance: u32) -> bool {
    rng.next_u32_range(1, 100) <= chance
}

fn roll_essence_yield(rarity: Rarity, rng: &mut dyn DeterministicRng) -> u32 {
    let table = essence_yield(rarity);
    if table.chance < 100 && !roll_percent(rng, table.chance) {
        return 0;
    }
    if table.min == table.max {
        table.min
    } else {
        rng.next_u32_range(table.min, table.max)
    }
}

/// Gold cost of disenchanting an item worth `value`: 10% of the value,
/// rounded half up.
#[must_use]
pub fn disenchant_gold_cost(value: u64) -> u64 {
    value.saturating_add(5) / 10
}

/// Gold cost of raising an item worth `value` to `next_level`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
pub fn upgrade_gold_cost(value: u64, next_level: u8, rarity: Rarity) -> u64 {
    (value as f64 * 0.5 * f64::from(next_level) * rarity.upgrade_cost_multiplier()).floor() as u64
}

/// Success chance, in percent, of upgrading an item currently at `level`.
#[must_use]
pub fn upgrade_success_chance(level: u8) -> u32 {
    100u32
        .saturating_sub(u32::from(level) * 10)
        .max(MIN_UPGRADE_CHANCE)
}

fn resolve_template<'a>(
    item: &ItemInstance,
    catalog: &'a GameCatalog,
) -> Result<&'a ItemTemplate, EconomyFailure> {
    catalog
        .template_for(item)
        .ok_or_else(|| EconomyFailure::UnknownTemplate(item.template_id.clone()))
}

/// Prices the next upgrade of `item` without rolling.
///
/// # Errors
///
/// Returns `EconomyFailure::UnknownTemplate` if the template is missing, or
/// `EconomyFailure::MaxLevelReached` if the item cannot go higher.
pub fn upgrade_quote(
    item: &ItemInstance,
    catalog: &GameCatalog,
    config: &EngineConfig,
) -> Result<UpgradeQuote, EconomyFailure> {
    let template = resolve_template(item, catalog)?;

    let next_level = item
        .upgrade_level
        .checked_add(1)
        .filter(|next| *next <= config.max_upgrade_level)
        .ok_or(EconomyFailure::MaxLevelReached {
            max: config.max_upgrade_level,
        })?;

    Ok(UpgradeQuote {
        next_level,
        gold_cost: upgrade_gold_cost(template.value, next_level, template.rarity),
        essence: template.rarity,
        essence_cost: UPGRADE_ESSENCE_COST,
        success_chance: upgrade_success_chance(item.upgrade_level),
    })
}

/// Prices disenchanting `item` without rolling.
///
/// # Errors
///
/// Returns `EconomyFailure::UnknownTemplate` if the template is missing.
pub fn disenchant_quote(
    item: &ItemInstance,
    catalog: &GameCatalog,
) -> Result<DisenchantQuote, EconomyFailure> {
    let template = resolve_template(item, catalog)?;
    let table = essence_yield(template.rarity);
    Ok(DisenchantQuote {
        gold_cost: disenchant_gold_cost(template.value),
        essence: template.rarity,
        min_yield: table.min,
        max_yield: table.max,
        yield_chance: table.chance,
    })
}

fn ensure_gold(character: &Character, required: u64) -> Result<(), EconomyFailure> {
    let available = character.currencies.gold;
    if available < required {
        return Err(EconomyFailure::InsufficientGold {
            required,
            available,
        });
    }
    Ok(())
}

/// Attempts to upgrade the item `item_id`, carried or equipped.
///
/// The inventory is searched before equipment slots. Gold and essence are
/// spent on every attempt; a failed roll destroys the item.
///
/// Destroying an equipped item can leave stored vitals above the new
/// maxima. Persist the result through `persist_character` to cap them.
///
/// # Errors
///
/// Returns an `EconomyFailure` if the item is missing, cannot go higher, or
/// the character cannot pay. The RNG is not consulted on rejection.
pub fn upgrade(
    character: &Character,
    item_id: Uuid,
    catalog: &GameCatalog,
    config: &EngineConfig,
    rng: &mut dyn DeterministicRng,
) -> Result<UpgradeOutcome, EconomyFailure> {
    let location = character
        .locate(item_id)
        .ok_or(EconomyFailure::ItemNotFound(item_id))?;
    let item = character
        .item_at(location)
        .ok_or(EconomyFailure::ItemNotFound(item_id))?;
    let quote = upgrade_quote(item, catalog, config)?;

    ensure_gold(character, quote.gold_cost)?;
    let available = character.currencies.essences.get(quote.essence);
    if available < quote.essence_cost {
        return Err(EconomyFailure::InsufficientEssence {
            tier: quote.essence,
            required: quote.essence_cost,
            available,
        });
    }

    let success = roll_percent(rng, quote.success_chance);

    let mut next = character.clone();
    next.currencies.gold -= quote.gold_cost;
    *next.currencies.essences.get_mut(quote.essence) -= quote.essence_cost;

    let new_level = if success {
        if let Some(upgraded) = next.item_at_mut(location) {
            upgraded.upgrade_level = quote.next_level;
        }
        quote.next_level
    } else {
        next.take_item(location);
        item.upgrade_level
    };

    Ok(UpgradeOutcome {
        character: next,
        success,
        new_level,
        gold_spent: quote.gold_cost,
    })
}

/// Disenchants the inventory item `item_id` into essence of its rarity tier.
///
/// The gold cost is paid and the item consumed even when the roll yields
/// nothing.
///
/// # Errors
///
/// Returns an `EconomyFailure` if the item is not in the inventory, its
/// template is missing, or the character cannot pay.
pub fn disenchant(
    character: &Character,
    item_id: Uuid,
    catalog: &GameCatalog,
    rng: &mut dyn DeterministicRng,
) -> Result<DisenchantOutcome, EconomyFailure> {
    let position = character
        .inventory_position(item_id)
        .ok_or(EconomyFailure::ItemNotFound(item_id))?;
    let quote = disenchant_quote(&character.inventory[position], catalog)?;

    ensure_gold(character, quote.gold_cost)?;

    let amount = roll_essence_yield(quote.essence, rng);

    let mut next = character.clone();
    next.take_item(ItemLocation::Inventory(position));
    next.currencies.gold -= quote.gold_cost;
    let balance = next.currencies.essences.get_mut(quote.essence);
    *balance = balance.saturating_add(amount);

    Ok(DisenchantOutcome {
        character: next,
        essence: quote.essence,
        amount,
        gold_spent: quote.gold_cost,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use embercrest_character::domain::character::EquipmentSlot;
    use embercrest_character::domain::race::Race;
    use embercrest_content::domain::attributes::PrimaryStats;
    use embercrest_content::domain::items::{Affix, ItemSlot};
    use embercrest_test_support::{MaxRng, MockRng, SequenceRng};

    fn template(id: &str, rarity: Rarity, value: u64) -> ItemTemplate {
        let mut template = ItemTemplate::new(id, id, ItemSlot::MainHand, rarity);
        template.value = value;
        template
    }

    fn catalog() -> GameCatalog {
        GameCatalog::new(
            [
                template("dagger", Rarity::Common, 100),
                template("blade", Rarity::Uncommon, 120),
                template("relic", Rarity::Epic, 400),
                template("crown", Rarity::Legendary, 1000),
            ],
            Vec::<Affix>::new(),
        )
        .unwrap()
    }

    fn character(gold: u64) -> Character {
        let mut character = Character::new(
            Uuid::new_v4(),
            "Corvin",
            Race::Human,
            PrimaryStats::default(),
        );
        character.currencies.gold = gold;
        character
    }

    fn carry(character: &mut Character, item: ItemInstance) -> Uuid {
        let id = item.unique_id;
        character.inventory.push(item);
        id
    }

    #[test]
    fn test_upgrade_quote_prices_by_rarity_and_level() {
        let catalog = catalog();
        let config = EngineConfig::default();

        let common = upgrade_quote(
            &ItemInstance::new("dagger").with_upgrade_level(3),
            &catalog,
            &config,
        )
        .unwrap();
        let uncommon = upgrade_quote(&ItemInstance::new("blade"), &catalog, &config).unwrap();

        assert_eq!(common.next_level, 4);
        assert_eq!(common.gold_cost, 200);
        assert_eq!(common.essence, Rarity::Common);
        assert_eq!(common.essence_cost, 1);
        assert_eq!(common.success_chance, 70);
        // floor(120 * 0.5 * 1 * 1.5)
        assert_eq!(uncommon.gold_cost, 90);
        assert_eq!(uncommon.success_chance, 100);
    }

    #[test]
    fn test_upgrade_success_chance_floors_at_ten_percent() {
        assert_eq!(upgrade_success_chance(0), 100);
        assert_eq!(upgrade_success_chance(8), 20);
        assert_eq!(upgrade_success_chance(9), 10);
        assert_eq!(upgrade_success_chance(12), 10);
    }

    #[test]
    fn test_upgrade_success_raises_level_and_spends_costs() {
        // Arrange
        let mut character = character(500);
        character.currencies.essences.common = 2;
        let dagger = carry(
            &mut character,
            ItemInstance::new("dagger").with_upgrade_level(3),
        );

        // Act
        let outcome = upgrade(
            &character,
            dagger,
            &catalog(),
            &EngineConfig::default(),
            &mut MockRng,
        )
        .unwrap();

        // Assert
        assert!(outcome.success);
        assert_eq!(outcome.new_level, 4);
        assert_eq!(outcome.gold_spent, 200);
        assert_eq!(outcome.character.currencies.gold, 300);
        assert_eq!(outcome.character.currencies.essences.common, 1);
        assert_eq!(outcome.character.inventory[0].upgrade_level, 4);
    }

    #[test]
    fn test_upgrade_failure_destroys_item_and_still_spends_costs() {
        let mut character = character(500);
        character.currencies.essences.common = 1;
        let dagger = carry(
            &mut character,
            ItemInstance::new("dagger").with_upgrade_level(3),
        );

        let outcome = upgrade(
            &character,
            dagger,
            &catalog(),
            &EngineConfig::default(),
            &mut MaxRng,
        )
        .unwrap();

        assert!(!outcome.success);
        assert_eq!(outcome.new_level, 3);
        assert!(outcome.character.inventory.is_empty());
        assert_eq!(outcome.character.currencies.gold, 300);
        assert_eq!(outcome.character.currencies.essences.common, 0);
    }

    #[test]
    fn test_upgrade_equipped_item_in_place() {
        let mut character = character(500);
        character.currencies.essences.common = 1;
        let worn = ItemInstance::new("dagger");
        let id = worn.unique_id;
        character.equipment.insert(EquipmentSlot::MainHand, worn);

        let outcome = upgrade(
            &character,
            id,
            &catalog(),
            &EngineConfig::default(),
            &mut MockRng,
        )
        .unwrap();

        let upgraded = outcome.character.equipment.get(EquipmentSlot::MainHand);
        assert_eq!(upgraded.map(|i| i.upgrade_level), Some(1));
    }

    #[test]
    fn test_upgrade_failure_clears_equipped_slot() {
        let mut character = character(500);
        character.currencies.essences.common = 1;
        let worn = ItemInstance::new("dagger").with_upgrade_level(5);
        let id = worn.unique_id;
        character.equipment.insert(EquipmentSlot::MainHand, worn);

        let outcome = upgrade(
            &character,
            id,
            &catalog(),
            &EngineConfig::default(),
            &mut SequenceRng::new(vec![51]),
        )
        .unwrap();

        assert!(!outcome.success);
        assert!(!outcome.character.equipment.is_occupied(EquipmentSlot::MainHand));
    }

    #[test]
    fn test_upgrade_at_max_level_is_rejected_without_rolling() {
        let mut character = character(100_000);
        character.currencies.essences.common = 5;
        let dagger = carry(
            &mut character,
            ItemInstance::new("dagger").with_upgrade_level(10),
        );
        let mut rng = SequenceRng::new(vec![]);

        let result = upgrade(
            &character,
            dagger,
            &catalog(),
            &EngineConfig::default(),
            &mut rng,
        );

        match result {
            Err(EconomyFailure::MaxLevelReached { max }) => assert_eq!(max, 10),
            other => panic!("expected MaxLevelReached, got {other:?}"),
        }
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_upgrade_respects_configured_max_level() {
        let mut character = character(100_000);
        character.currencies.essences.common = 5;
        let dagger = carry(
            &mut character,
            ItemInstance::new("dagger").with_upgrade_level(2),
        );
        let config = EngineConfig {
            max_upgrade_level: 2,
            ..EngineConfig::default()
        };

        let result = upgrade(&character, dagger, &catalog(), &config, &mut MockRng);

        assert!(matches!(
            result,
            Err(EconomyFailure::MaxLevelReached { max: 2 })
        ));
    }

    #[test]
    fn test_upgrade_without_gold_is_rejected() {
        let mut character = character(199);
        character.currencies.essences.common = 1;
        let dagger = carry(
            &mut character,
            ItemInstance::new("dagger").with_upgrade_level(3),
        );

        let result = upgrade(
            &character,
            dagger,
            &catalog(),
            &EngineConfig::default(),
            &mut MockRng,
        );

        match result {
            Err(EconomyFailure::InsufficientGold {
                required,
                available,
            }) => {
                assert_eq!(required, 200);
                assert_eq!(available, 199);
            }
            other => panic!("expected InsufficientGold, got {other:?}"),
        }
    }

    #[test]
    fn test_upgrade_without_essence_is_rejected() {
        let mut character = character(500);
        character.currencies.essences.uncommon = 3;
        let dagger = carry(&mut character, ItemInstance::new("dagger"));

        let result = upgrade(
            &character,
            dagger,
            &catalog(),
            &EngineConfig::default(),
            &mut MockRng,
        );

        match result {
            Err(EconomyFailure::InsufficientEssence {
                tier,
                required,
                available,
            }) => {
                assert_eq!(tier, Rarity::Common);
                assert_eq!(required, 1);
                assert_eq!(available, 0);
            }
            other => panic!("expected InsufficientEssence, got {other:?}"),
        }
    }

    #[test]
    fn test_upgrade_unknown_item_is_rejected() {
        let character = character(500);
        let missing = Uuid::new_v4();

        let result = upgrade(
            &character,
            missing,
            &catalog(),
            &EngineConfig::default(),
            &mut MockRng,
        );

        assert!(matches!(result, Err(EconomyFailure::ItemNotFound(id)) if id == missing));
    }

    #[test]
    fn test_disenchant_common_yields_rolled_amount() {
        let mut character = character(50);
        let dagger = carry(&mut character, ItemInstance::new("dagger"));
        let mut rng = SequenceRng::new(vec![3]);

        let outcome = disenchant(&character, dagger, &catalog(), &mut rng).unwrap();

        assert_eq!(outcome.essence, Rarity::Common);
        assert_eq!(outcome.amount, 3);
        assert_eq!(outcome.gold_spent, 10);
        assert_eq!(outcome.character.currencies.gold, 40);
        assert_eq!(outcome.character.currencies.essences.common, 3);
        assert!(outcome.character.inventory.is_empty());
    }

    #[test]
    fn test_disenchant_uncommon_yields_at_most_two() {
        let mut character = character(50);
        let blade = carry(&mut character, ItemInstance::new("blade"));

        let outcome = disenchant(&character, blade, &catalog(), &mut MaxRng).unwrap();

        assert_eq!(outcome.essence, Rarity::Uncommon);
        assert_eq!(outcome.amount, 2);
        assert_eq!(outcome.gold_spent, 12);
        assert_eq!(outcome.character.currencies.essences.uncommon, 2);
        assert_eq!(outcome.character.currencies.gold, 38);
    }

    #[test]
    fn test_disenchant_epic_yields_exactly_one_without_rolling() {
        let mut character = character(50);
        let relic = carry(&mut character, ItemInstance::new("relic"));
        let mut rng = SequenceRng::new(vec![]);

        let outcome = disenchant(&character, relic, &catalog(), &mut rng).unwrap();

        assert_eq!(outcome.amount, 1);
        assert_eq!(outcome.character.currencies.essences.epic, 1);
        assert_eq!(rng.consumed(), 0);
    }

    #[test]
    fn test_disenchant_legendary_losing_roll_still_consumes_item_and_gold() {
        let mut character = character(150);
        let crown = carry(&mut character, ItemInstance::new("crown"));

        let outcome = disenchant(&character, crown, &catalog(), &mut MaxRng).unwrap();

        assert_eq!(outcome.amount, 0);
        assert_eq!(outcome.essence, Rarity::Legendary);
        assert_eq!(outcome.character.currencies.essences.legendary, 0);
        assert_eq!(outcome.character.currencies.gold, 50);
        assert!(outcome.character.inventory.is_empty());
    }

    #[test]
    fn test_disenchant_legendary_winning_roll_yields_one() {
        let mut character = character(150);
        let crown = carry(&mut character, ItemInstance::new("crown"));

        let outcome = disenchant(&character, crown, &catalog(), &mut MockRng).unwrap();

        assert_eq!(outcome.amount, 1);
        assert_eq!(outcome.character.currencies.essences.legendary, 1);
    }

    #[test]
    fn test_disenchant_essence_balance_saturates() {
        let mut character = character(50);
        character.currencies.essences.common = u32::MAX - 1;
        let dagger = carry(&mut character, ItemInstance::new("dagger"));

        let outcome = disenchant(&character, dagger, &catalog(), &mut MaxRng).unwrap();

        assert_eq!(outcome.amount, 4);
        assert_eq!(outcome.character.currencies.essences.common, u32::MAX);
    }

    #[test]
    fn test_disenchant_equipped_item_is_rejected() {
        let mut character = character(150);
        let worn = ItemInstance::new("dagger");
        let id = worn.unique_id;
        character.equipment.insert(EquipmentSlot::MainHand, worn);

        let result = disenchant(&character, id, &catalog(), &mut MockRng);

        assert!(matches!(result, Err(EconomyFailure::ItemNotFound(_))));
    }

    #[test]
    fn test_disenchant_without_gold_is_rejected() {
        let mut character = character(99);
        let crown = carry(&mut character, ItemInstance::new("crown"));

        let result = disenchant(&character, crown, &catalog(), &mut MockRng);

        assert!(matches!(
            result,
            Err(EconomyFailure::InsufficientGold {
                required: 100,
                available: 99
            })
        ));
    }

    #[test]
    fn test_disenchant_gold_cost_rounds_half_up() {
        assert_eq!(disenchant_gold_cost(0), 0);
        assert_eq!(disenchant_gold_cost(14), 1);
        assert_eq!(disenchant_gold_cost(15), 2);
        assert_eq!(disenchant_gold_cost(1000), 100);
    }

    #[test]
    fn test_disenchant_quote_reports_uncommon_range() {
        let quote = disenchant_quote(&ItemInstance::new("blade"), &catalog()).unwrap();

        assert_eq!(quote.essence, Rarity::Uncommon);
        assert_eq!(quote.gold_cost, 12);
        assert_eq!(quote.min_yield, 1);
        assert_eq!(quote.max_yield, 2);
        assert_eq!(quote.yield_chance, 100);
    }

    #[test]
    fn test_disenchant_quote_reports_legendary_odds() {
        let quote = disenchant_quote(&ItemInstance::new("crown"), &catalog()).unwrap();

        assert_eq!(quote.gold_cost, 100);
        assert_eq!(quote.min_yield, 1);
        assert_eq!(quote.max_yield, 1);
        assert_eq!(quote.yield_chance, 50);
    }
}
