use std::fmt::Write as _;

use mhw_core::core_api::{CoreError, CoreErrorCode, Session};
use mhw_core::{DecorationLookup, SaveError};
use mhw_core::monsters::Crowns;
use mhw_core::slots::SaveSlotBase;
use mhw_core::slots::decorations::DecorationEntry;
use mhw_core::slots::equipment::{Equipment, EquipmentKind, EquipmentRecord};
use mhw_core::slots::monster_stats::{MonsterStats, MonsterStatsRecord};
use mhw_core::slots::weapon_usage::{WeaponUsage, WeaponUsageRecord};
use serde_json::{Map as JsonMap, Value as JsonValue};

const LABEL_WIDTH: usize = 16;
const MONSTER_NAME_WIDTH: usize = 22;
const COUNT_WIDTH: usize = 6;

/// Which decoded domains to render. Nothing selected means the slot list only.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DomainSelection {
    pub slots: bool,
    pub equipment: bool,
    pub decorations: bool,
    pub weapon_usage: bool,
    pub monsters: bool,
}

impl DomainSelection {
    pub fn all() -> Self {
        Self {
            slots: true,
            equipment: true,
            decorations: true,
            weapon_usage: true,
            monsters: true,
        }
    }

    pub fn is_any_selected(&self) -> bool {
        self.slots || self.equipment || self.decorations || self.weapon_usage || self.monsters
    }
}

/// Every selected domain decoded once, ready for either renderer.
#[derive(Debug, Default)]
pub struct Report {
    pub layout: String,
    pub slots: Vec<SaveSlotBase>,
    pub equipment: Option<Vec<EquipmentRecord>>,
    pub decorations: Option<Vec<(u8, Vec<DecorationEntry>)>>,
    pub weapon_usage: Option<Vec<WeaponUsageRecord>>,
    pub monsters: Option<Vec<MonsterStatsRecord>>,
}

impl Report {
    pub fn collect(
        session: &Session,
        fields: &DomainSelection,
        lookup: Option<&dyn DecorationLookup>,
    ) -> Result<Self, CoreError> {
        let decorations = if fields.decorations {
            Some(collect_decorations(session, lookup)?)
        } else {
            None
        };

        Ok(Self {
            layout: session.layout().name.to_string(),
            slots: session.slots().to_vec(),
            equipment: fields.equipment.then(|| session.equipment()).transpose()?,
            decorations,
            weapon_usage: fields
                .weapon_usage
                .then(|| session.weapon_usage())
                .transpose()?,
            monsters: fields.monsters.then(|| session.monster_stats()).transpose()?,
        })
    }
}

fn collect_decorations(
    session: &Session,
    lookup: Option<&dyn DecorationLookup>,
) -> Result<Vec<(u8, Vec<DecorationEntry>)>, CoreError> {
    let lookup = lookup.ok_or_else(|| {
        CoreError::new(
            CoreErrorCode::Lookup,
            "decorations need a decoration table to translate socketed ids",
        )
    })?;

    session
        .decorations(lookup)?
        .into_iter()
        .map(|record| Ok((record.base.slot_number, record.resolve(lookup)?)))
        .collect::<Result<_, SaveError>>()
        .map_err(CoreError::from)
}

pub fn render_json(report: &Report) -> JsonValue {
    let mut out = JsonMap::new();
    out.insert(
        "layout".to_string(),
        JsonValue::String(report.layout.clone()),
    );
    out.insert(
        "slots".to_string(),
        JsonValue::Array(report.slots.iter().map(slot_to_json).collect()),
    );

    if let Some(records) = &report.equipment {
        out.insert(
            "equipment".to_string(),
            per_slot_json(records.iter().map(|r| {
                (
                    r.base.slot_number,
                    "items",
                    JsonValue::Array(r.equipment.iter().map(equipment_to_json).collect()),
                )
            })),
        );
    }
    if let Some(records) = &report.decorations {
        out.insert(
            "decorations".to_string(),
            per_slot_json(records.iter().map(|(slot, entries)| {
                (
                    *slot,
                    "decorations",
                    JsonValue::Array(entries.iter().map(decoration_to_json).collect()),
                )
            })),
        );
    }
    if let Some(records) = &report.weapon_usage {
        out.insert(
            "weapon_usage".to_string(),
            JsonValue::Array(records.iter().map(weapon_usage_to_json).collect()),
        );
    }
    if let Some(records) = &report.monsters {
        out.insert(
            "monsters".to_string(),
            per_slot_json(records.iter().map(|r| {
                (
                    r.base.slot_number,
                    "monsters",
                    JsonValue::Array(r.monsters.iter().map(monster_to_json).collect()),
                )
            })),
        );
    }

    JsonValue::Object(out)
}

fn per_slot_json<'a, I>(rows: I) -> JsonValue
where
    I: Iterator<Item = (u8, &'a str, JsonValue)>,
{
    JsonValue::Array(
        rows.map(|(slot, key, value)| {
            let mut m = JsonMap::new();
            m.insert("slot".to_string(), JsonValue::from(slot));
            m.insert(key.to_string(), value);
            JsonValue::Object(m)
        })
        .collect(),
    )
}

fn slot_to_json(slot: &SaveSlotBase) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("slot".to_string(), JsonValue::from(slot.slot_number));
    m.insert("name".to_string(), JsonValue::String(slot.name.clone()));
    m.insert("hunter_rank".to_string(), JsonValue::from(slot.hunter_rank));
    m.insert("master_rank".to_string(), JsonValue::from(slot.master_rank));
    m.insert("zeni".to_string(), JsonValue::from(slot.zeni));
    m.insert(
        "research_points".to_string(),
        JsonValue::from(slot.research_points),
    );
    m.insert(
        "hunter_experience".to_string(),
        JsonValue::from(slot.hunter_experience),
    );
    m.insert(
        "master_experience".to_string(),
        JsonValue::from(slot.master_experience),
    );
    m.insert("playtime".to_string(), JsonValue::from(slot.playtime));
    m.insert(
        "playtime_display".to_string(),
        JsonValue::String(slot.playtime_display()),
    );
    JsonValue::Object(m)
}

fn optional_slots(slots: &[Option<u32>; 3]) -> JsonValue {
    JsonValue::Array(slots.iter().map(|slot| JsonValue::from(*slot)).collect())
}

fn equipment_to_json(item: &Equipment) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("sort_index".to_string(), JsonValue::from(item.sort_index));
    m.insert(
        "kind".to_string(),
        JsonValue::String(item.kind.label().to_string()),
    );
    m.insert("class_id".to_string(), JsonValue::from(item.class_id));
    match &item.kind {
        EquipmentKind::Armor { piece } => {
            m.insert("piece".to_string(), JsonValue::String(piece.to_string()));
        }
        EquipmentKind::Weapon {
            type_id,
            class,
            mods,
        } => {
            m.insert("weapon_type".to_string(), JsonValue::from(*type_id));
            m.insert(
                "weapon_class".to_string(),
                class.map_or(JsonValue::Null, |c| JsonValue::String(c.to_string())),
            );
            if let Some(mods) = mods {
                m.insert("mods".to_string(), optional_slots(mods));
            }
        }
        EquipmentKind::Charm { charm_id } => {
            m.insert("charm_id".to_string(), JsonValue::from(*charm_id));
        }
        EquipmentKind::Kinsect {
            kinsect_id,
            kinsect_type,
        } => {
            m.insert("kinsect_id".to_string(), JsonValue::from(*kinsect_id));
            m.insert("kinsect_type".to_string(), JsonValue::from(*kinsect_type));
        }
    }
    m.insert(
        "upgrade_level".to_string(),
        JsonValue::from(item.upgrade_level),
    );
    m.insert(
        "upgrade_points".to_string(),
        JsonValue::from(item.upgrade_points),
    );
    m.insert(
        "decorations".to_string(),
        optional_slots(&item.decorations),
    );
    m.insert(
        "augmentations".to_string(),
        optional_slots(&item.augmentations),
    );
    m.insert("display".to_string(), JsonValue::String(item.to_string()));
    JsonValue::Object(m)
}

fn decoration_to_json(entry: &DecorationEntry) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("item_id".to_string(), JsonValue::from(entry.item_id));
    m.insert("name".to_string(), JsonValue::String(entry.name.clone()));
    m.insert("quantity".to_string(), JsonValue::from(entry.quantity));
    JsonValue::Object(m)
}

fn usage_to_json(usage: &WeaponUsage) -> JsonValue {
    let mut m = JsonMap::new();
    for (class, count) in usage.iter() {
        m.insert(class.short_name().to_string(), JsonValue::from(count));
    }
    JsonValue::Object(m)
}

fn weapon_usage_to_json(record: &WeaponUsageRecord) -> JsonValue {
    let mut categories = JsonMap::new();
    for (category, usage) in &record.categories {
        categories.insert(category.label().to_string(), usage_to_json(usage));
    }

    let mut m = JsonMap::new();
    m.insert("slot".to_string(), JsonValue::from(record.base.slot_number));
    m.insert("categories".to_string(), JsonValue::Object(categories));
    m.insert("total".to_string(), usage_to_json(&record.total()));
    JsonValue::Object(m)
}

fn crowns_to_json(crowns: &Crowns) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("mini".to_string(), JsonValue::Bool(crowns.mini));
    m.insert("silver".to_string(), JsonValue::Bool(crowns.silver));
    m.insert("gold".to_string(), JsonValue::Bool(crowns.gold));
    JsonValue::Object(m)
}

fn monster_to_json(stats: &MonsterStats) -> JsonValue {
    let mut m = JsonMap::new();
    m.insert("index".to_string(), JsonValue::from(stats.index));
    m.insert("name".to_string(), JsonValue::String(stats.name.clone()));
    m.insert("captured".to_string(), JsonValue::from(stats.captured));
    m.insert("slain".to_string(), JsonValue::from(stats.slain));
    m.insert("largest".to_string(), JsonValue::from(stats.largest));
    m.insert("smallest".to_string(), JsonValue::from(stats.smallest));
    m.insert(
        "research_level".to_string(),
        JsonValue::from(stats.research_level),
    );
    m.insert(
        "crowns".to_string(),
        if stats.has_crowns {
            crowns_to_json(&stats.crowns)
        } else {
            JsonValue::Null
        },
    );
    JsonValue::Object(m)
}

/// Plain-text report grouped by slot.
pub fn render_text(report: &Report) -> String {
    let mut out = String::new();
    writeln!(out, "Layout: {}", report.layout).expect("writing to String cannot fail");
    if report.slots.is_empty() {
        writeln!(out, "No saved hunters.").expect("writing to String cannot fail");
        return out;
    }

    for slot in &report.slots {
        let number = slot.slot_number;
        out.push('\n');
        write_slot_header(&mut out, slot);

        if let Some(record) = find_slot(report.equipment.as_deref(), number, |r| &r.base) {
            writeln!(out, " ::: Equipment ({}) :::", record.equipment.len())
                .expect("writing to String cannot fail");
            for item in &record.equipment {
                writeln!(out, "   {item}").expect("writing to String cannot fail");
            }
        }
        if let Some(records) = &report.decorations
            && let Some((_, entries)) = records.iter().find(|(slot, _)| *slot == number)
        {
            writeln!(out, " ::: Decorations :::").expect("writing to String cannot fail");
            for entry in entries {
                writeln!(out, "   {} x{}", entry.name, entry.quantity)
                    .expect("writing to String cannot fail");
            }
        }
        if let Some(record) = find_slot(report.weapon_usage.as_deref(), number, |r| &r.base) {
            write_weapon_usage(&mut out, record);
        }
        if let Some(record) = find_slot(report.monsters.as_deref(), number, |r| &r.base) {
            write_monsters(&mut out, &record.monsters);
        }
    }
    out
}

fn find_slot<'a, T>(
    records: Option<&'a [T]>,
    number: u8,
    base: impl Fn(&T) -> &SaveSlotBase,
) -> Option<&'a T> {
    records?
        .iter()
        .find(|record| base(record).slot_number == number)
}

fn write_slot_header(out: &mut String, slot: &SaveSlotBase) {
    writeln!(out, "Slot {}: {}", slot.slot_number, slot.name)
        .expect("writing to String cannot fail");
    writeln!(out, "  {:<LABEL_WIDTH$}{}", "Hunter Rank:", slot.hunter_rank)
        .expect("writing to String cannot fail");
    if let Some(master_rank) = slot.master_rank {
        writeln!(out, "  {:<LABEL_WIDTH$}{master_rank}", "Master Rank:")
            .expect("writing to String cannot fail");
    }
    writeln!(out, "  {:<LABEL_WIDTH$}{}", "Zeni:", slot.zeni)
        .expect("writing to String cannot fail");
    writeln!(
        out,
        "  {:<LABEL_WIDTH$}{}",
        "Research Pts:", slot.research_points
    )
    .expect("writing to String cannot fail");
    writeln!(
        out,
        "  {:<LABEL_WIDTH$}{}",
        "Playtime:",
        slot.playtime_display()
    )
    .expect("writing to String cannot fail");
}

fn write_weapon_usage(out: &mut String, record: &WeaponUsageRecord) {
    writeln!(out, " ::: Weapon Usage :::").expect("writing to String cannot fail");
    let mut header = format!("   {:<LABEL_WIDTH$}", "");
    for (class, _) in WeaponUsage::default().iter() {
        write!(header, "{:>COUNT_WIDTH$}", class.short_name())
            .expect("writing to String cannot fail");
    }
    writeln!(out, "{}", header.trim_end()).expect("writing to String cannot fail");

    let mut row = |label: &str, usage: &WeaponUsage| {
        let mut line = format!("   {label:<LABEL_WIDTH$}");
        for (_, count) in usage.iter() {
            write!(line, "{count:>COUNT_WIDTH$}").expect("writing to String cannot fail");
        }
        writeln!(out, "{line}").expect("writing to String cannot fail");
    };
    for (category, usage) in &record.categories {
        row(category.label(), usage);
    }
    row("Total", &record.total());
}

fn write_monsters(out: &mut String, monsters: &[MonsterStats]) {
    writeln!(out, " ::: Monsters :::").expect("writing to String cannot fail");
    for stats in monsters.iter().filter(|m| m.hunted() > 0) {
        let mut crowns = Vec::new();
        if stats.crowns.mini {
            crowns.push("mini");
        }
        if stats.crowns.silver {
            crowns.push("silver");
        }
        if stats.crowns.gold {
            crowns.push("gold");
        }
        writeln!(
            out,
            "   {:<MONSTER_NAME_WIDTH$} slain {:>4}  captured {:>4}  research {:>2}  {}",
            stats.name,
            stats.slain,
            stats.captured,
            stats.research_level,
            crowns.join(" ")
        )
        .expect("writing to String cannot fail");
    }
}
