use std::fs;

use battle_content::{CombatantTemplate, ContentFactory};
use battle_core::{Battle, DamageType, PassiveRegistry, PassiveTier, Side};
use tempfile::TempDir;

const CATALOG: &str = r#"[
    (
        id: "warden",
        name: "Warden",
        side: party,
        damage_type: "light",
        stats: { "max_hp": 1500.0, "defense": 80.0 },
        passives: ["guardians_aegis:prime"],
        overheal: true,
    ),
    (
        id: "wisp",
        name: "Wisp",
        side: foes,
        damage_type: "wind",
        ultimate_hits: Some(3),
    ),
]"#;

fn data_dir(catalog: &str, config: &str) -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    fs::write(dir.path().join("combatants.ron"), catalog).expect("write catalog");
    fs::write(dir.path().join("config.toml"), config).expect("write config");
    dir
}

#[test]
fn loads_and_spawns_a_roster() {
    let dir = data_dir(CATALOG, "max_event_depth = 8\n");
    let factory = ContentFactory::new(dir.path());
    let registry = PassiveRegistry::with_builtin();

    let config = factory.load_config().expect("config");
    assert_eq!(config.max_event_depth, 8);

    let roster = factory.load_roster(&registry).expect("roster");
    let ids: Vec<&str> = roster.iter().map(|(id, _)| id.as_str()).collect();
    assert_eq!(ids, vec!["warden", "wisp"]);

    let (_, warden) = &roster[0];
    assert_eq!(warden.damage_type, DamageType::Light);
    assert_eq!(warden.base.max_hp, 1500.0);
    assert!(warden.overheal);
    assert_eq!(warden.passives[0].tier(), PassiveTier::Prime);

    let mut battle = Battle::new(config, 1);
    let spawned: Vec<_> = roster.into_iter().map(|(_, spec)| battle.spawn(spec)).collect();
    assert_eq!(battle.combatant(spawned[0]).map(|c| c.hp()), Some(1500));
    assert_eq!(battle.combatant(spawned[1]).and_then(|c| c.ultimate_hits()), Some(3));
}

#[test]
fn unknown_ids_fail_fast() {
    let registry = PassiveRegistry::with_builtin();

    let mut bad_type = CombatantTemplate::new("x", "X", Side::Foes);
    bad_type.damage_type = "poison".to_string();
    let err = ContentFactory::build(&bad_type, &registry).expect_err("unknown damage type");
    assert!(err.to_string().contains("poison"));

    let mut bad_stat = CombatantTemplate::new("x", "X", Side::Foes);
    bad_stat.stats.insert("luck".to_string(), 7.0);
    assert!(ContentFactory::build(&bad_stat, &registry).is_err());

    let mut bad_passive = CombatantTemplate::new("x", "X", Side::Foes);
    bad_passive.passives.push("ember_tempo:legendary".to_string());
    assert!(ContentFactory::build(&bad_passive, &registry).is_err());
}

#[test]
fn one_bad_entry_fails_the_whole_roster() {
    let catalog = r#"[
        (id: "ok", name: "Ok", side: party),
        (id: "bad", name: "Bad", side: foes, passives: ["vampirism"]),
    ]"#;
    let dir = data_dir(catalog, "");
    let factory = ContentFactory::new(dir.path());

    assert!(factory.load_roster(&PassiveRegistry::with_builtin()).is_err());
}

#[test]
fn missing_files_report_their_path() {
    let dir = tempfile::tempdir().expect("temp dir");
    let factory = ContentFactory::new(dir.path());

    let err = factory.load_combatants().expect_err("no catalog");
    assert!(err.to_string().contains("combatants.ron"));
}
