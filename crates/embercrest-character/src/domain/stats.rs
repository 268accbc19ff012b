//! Stat aggregation: resolves a character and its gear into a statline.
//!
//! Everything here is a pure function of the character snapshot and the
//! catalog. The derived statline is a view; it is recomputed on every read
//! and never stored.

use embercrest_content::domain::attributes::PrimaryStats;
use embercrest_content::domain::catalog::GameCatalog;
use embercrest_content::domain::items::{CombatBonuses, ItemTemplate};
use serde::Serialize;
use uuid::Uuid;

use super::character::{Character, EquipmentSlot, Vitals};
use super::race::Race;

const BASE_HEALTH: i32 = 50;
const HEALTH_PER_STAMINA: i32 = 10;
const BASE_MANA: i32 = 20;
const MANA_PER_INTELLIGENCE: i32 = 10;
const BASE_ENERGY: i32 = 10;
const BASE_CRIT_DAMAGE_MODIFIER: i32 = 200;

/// The fully resolved combat statline of a character.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DerivedCharacter {
    /// Character identifier.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Race.
    pub race: Race,
    /// Character level.
    pub level: u32,
    /// Experience points.
    pub experience: u64,
    /// Base attributes plus every equipment and affix bonus.
    pub stats: PrimaryStats,
    /// Current health, capped at `max_health`.
    pub health: i32,
    /// Current mana, capped at `max_mana`.
    pub mana: i32,
    /// Current energy, capped at `max_energy`.
    pub energy: i32,
    /// Maximum health.
    pub max_health: i32,
    /// Maximum mana.
    pub max_mana: i32,
    /// Maximum energy.
    pub max_energy: i32,
    /// Minimum physical damage per hit.
    pub min_damage: i32,
    /// Maximum physical damage per hit.
    pub max_damage: i32,
    /// Minimum magic damage per hit. Zero without a magic damage source.
    pub min_magic_damage: i32,
    /// Maximum magic damage per hit. Zero without a magic damage source.
    pub max_magic_damage: i32,
    /// Armor.
    pub armor: i32,
    /// Crit chance, in percent.
    pub crit_chance: f64,
    /// Crit damage, in percent of a normal hit.
    pub crit_damage_modifier: i32,
    /// Attacks per round, rounded to two decimals.
    pub attacks_per_round: f64,
    /// Mana regenerated per tick.
    pub mana_regen: i32,
    /// Armor ignored on hit.
    pub armor_penetration: i32,
    /// Life steal, in percent of damage dealt.
    pub life_steal_percent: f64,
    /// Mana steal, in percent of damage dealt.
    pub mana_steal_percent: f64,
    /// Health returned per hit.
    pub life_steal_flat: i32,
    /// Mana returned per hit.
    pub mana_steal_flat: i32,
    /// Dodge chance, in percent.
    pub dodge_chance: f64,
    /// Mana spent per attack by the main-hand weapon.
    pub weapon_mana_cost: i32,
}

impl DerivedCharacter {
    /// Current vitals as stored on the character.
    #[must_use]
    pub fn vitals(&self) -> Vitals {
        Vitals {
            health: self.health,
            mana: self.mana,
            energy: self.energy,
        }
    }
}

/// Maximum health, mana and energy for the given total attributes.
#[must_use]
pub fn vital_maxima(stats: &PrimaryStats, bonus_max_health: i32) -> Vitals {
    Vitals {
        health: BASE_HEALTH + stats.stamina * HEALTH_PER_STAMINA + bonus_max_health,
        mana: BASE_MANA + stats.intelligence * MANA_PER_INTELLIGENCE,
        energy: BASE_ENERGY + stats.energy.div_euclid(2),
    }
}

/// `base + round(base * factor)`.
#[allow(clippy::cast_possible_truncation)]
fn scale_flat(base: i32, factor: f64) -> i32 {
    base + (f64::from(base) * factor).round() as i32
}

/// Adds template bonuses scaled by the item's upgrade factor.
///
/// Flat counters are rounded; crit chance is a percentage and is not.
/// Crit damage, penetration, steal, dodge and extra attacks never scale.
fn add_template_bonuses(total: &mut CombatBonuses, bonuses: &CombatBonuses, factor: f64) {
    total.stats += bonuses.stats.map(|v| scale_flat(v, factor));
    total.min_damage += scale_flat(bonuses.min_damage, factor);
    total.max_damage += scale_flat(bonuses.max_damage, factor);
    total.min_magic_damage += scale_flat(bonuses.min_magic_damage, factor);
    total.max_magic_damage += scale_flat(bonuses.max_magic_damage, factor);
    total.armor += scale_flat(bonuses.armor, factor);
    total.max_health += scale_flat(bonuses.max_health, factor);
    total.crit_chance += bonuses.crit_chance + bonuses.crit_chance * factor;
    add_fixed_bonuses(total, bonuses);
}

/// Adds the bonuses that are always taken at face value.
fn add_fixed_bonuses(total: &mut CombatBonuses, bonuses: &CombatBonuses) {
    total.crit_damage_modifier += bonuses.crit_damage_modifier;
    total.armor_penetration += bonuses.armor_penetration;
    total.life_steal_percent += bonuses.life_steal_percent;
    total.mana_steal_percent += bonuses.mana_steal_percent;
    total.life_steal_flat += bonuses.life_steal_flat;
    total.mana_steal_flat += bonuses.mana_steal_flat;
    total.dodge_chance += bonuses.dodge_chance;
    total.attacks_per_round_bonus += bonuses.attacks_per_round_bonus;
}

/// Adds an affix roll. Affixes never scale with upgrade level.
fn add_affix_bonuses(total: &mut CombatBonuses, bonuses: &CombatBonuses) {
    add_template_bonuses(total, bonuses, 0.0);
}

/// The main-hand weapon template: `MainHand`, falling back to `TwoHand`.
fn main_weapon<'a>(character: &Character, catalog: &'a GameCatalog) -> Option<&'a ItemTemplate> {
    character
        .equipment
        .get(EquipmentSlot::MainHand)
        .or_else(|| character.equipment.get(EquipmentSlot::TwoHand))
        .and_then(|item| catalog.template_for(item))
}

fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[allow(clippy::cast_possible_truncation)]
fn floor_scaled(value: i32, factor: f64) -> i32 {
    (f64::from(value) * factor).floor() as i32
}

/// Resolves `character` into its combat statline.
///
/// Total over any structurally valid character: items whose template is
/// missing from the catalog contribute nothing.
#[must_use]
pub fn derive_stats(character: &Character, catalog: &GameCatalog) -> DerivedCharacter {
    let mut total = CombatBonuses {
        stats: character.attributes,
        ..CombatBonuses::default()
    };

    for (_, item) in character.equipment.iter() {
        if let Some(template) = catalog.template_for(item) {
            add_template_bonuses(&mut total, &template.bonuses, item.upgrade_factor());
        }
        for affix in item.affixes() {
            add_affix_bonuses(&mut total, &affix.bonuses);
        }
    }

    let weapon = main_weapon(character, catalog);
    let attacks_per_round = round_to_hundredths(
        weapon.and_then(|w| w.attacks_per_round).unwrap_or(1.0) + total.attacks_per_round_bonus,
    );

    let stats = total.stats;
    let maxima = vital_maxima(&stats, total.max_health);

    let (min_damage, max_damage) = if weapon.is_some_and(ItemTemplate::is_magical) {
        (1 + total.min_damage, 2 + total.max_damage)
    } else {
        (
            1 + stats.strength + total.min_damage,
            2 + stats.strength * 2 + total.max_damage,
        )
    };

    let (min_magic_damage, max_magic_damage) = if total.has_magic_damage() {
        let intelligence_bonus = floor_scaled(stats.intelligence, 1.5);
        (
            total.min_magic_damage + intelligence_bonus,
            total.max_magic_damage + intelligence_bonus,
        )
    } else {
        (0, 0)
    };

    let racial = character.race.modifiers();

    DerivedCharacter {
        id: character.id,
        name: character.name.clone(),
        race: character.race,
        level: character.level,
        experience: character.experience,
        stats,
        health: character.vitals.health.min(maxima.health),
        mana: character.vitals.mana.min(maxima.mana),
        energy: character.vitals.energy.min(maxima.energy),
        max_health: maxima.health,
        max_mana: maxima.mana,
        max_energy: maxima.energy,
        min_damage,
        max_damage,
        min_magic_damage,
        max_magic_damage,
        armor: total.armor + racial.armor,
        crit_chance: f64::from(stats.accuracy) * 0.5 + total.crit_chance,
        crit_damage_modifier: BASE_CRIT_DAMAGE_MODIFIER + total.crit_damage_modifier,
        attacks_per_round,
        mana_regen: stats.intelligence * 2 + racial.mana_regen,
        armor_penetration: total.armor_penetration,
        life_steal_percent: total.life_steal_percent,
        mana_steal_percent: total.mana_steal_percent,
        life_steal_flat: total.life_steal_flat,
        mana_steal_flat: total.mana_steal_flat,
        dodge_chance: f64::from(stats.agility) * 0.1 + total.dodge_chance,
        weapon_mana_cost: weapon.and_then(|w| w.mana_cost).unwrap_or(0),
    }
}

/// Returns `character` with its current vitals capped at the derived maxima.
#[must_use]
pub fn clamp_vitals(character: Character, catalog: &GameCatalog) -> Character {
    let vitals = derive_stats(&character, catalog).vitals();
    Character { vitals, ..character }
}
